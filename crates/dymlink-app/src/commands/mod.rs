//! Subcommand implementations. Each writes its result to `out`.

mod replay;

use std::io::Write;

use dymlink_bridge::frame::frame_url;
use dymlink_bridge::script::RELAY_INIT_SCRIPT;
use dymlink_config::DymlinkConfig;

use crate::cli::Command;

use replay::run_replay;

pub fn run(command: &Command, config: &DymlinkConfig, out: &mut dyn Write) -> dymlink_common::Result<()> {
    match command {
        Command::FrameUrl => {
            let url = frame_url(&config.peer)?;
            writeln!(out, "{url}")?;
        }
        Command::RelayScript => {
            writeln!(out, "{}", RELAY_INIT_SCRIPT.trim())?;
        }
        Command::Config => {
            writeln!(out, "{}", dymlink_config::config_to_json(config))?;
        }
        Command::Replay { file } => {
            let input = std::fs::File::open(file)?;
            let summary = run_replay(std::io::BufReader::new(input), config, out)?;
            tracing::info!(
                steps = summary.steps,
                sent = summary.sent,
                "replay finished"
            );
        }
    }
    Ok(())
}
