use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// dymlink: host-side bridge to an embedded wallet-connection widget.
#[derive(Parser, Debug)]
#[command(name = "dymlink", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (e.g. "dymlink=debug").
    #[arg(long)]
    pub log_level: Option<String>,

    /// Deep-link account view, overriding `peer.qr_account`.
    #[arg(long)]
    pub qr_account: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the URL to load into the peer frame.
    FrameUrl,

    /// Print the script a host webview injects to relay peer messages.
    RelayScript,

    /// Print the effective configuration as JSON.
    Config,

    /// Drive a bridge from a JSON-lines script and print what it does.
    Replay {
        /// Script file, one step per line.
        file: PathBuf,
    },
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_replay_with_globals() {
        let args = Args::try_parse_from([
            "dymlink",
            "--config",
            "/tmp/dymlink.toml",
            "--qr-account",
            "dym1abc",
            "replay",
            "session.jsonl",
        ])
        .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("/tmp/dymlink.toml")));
        assert_eq!(args.qr_account.as_deref(), Some("dym1abc"));
        assert!(matches!(args.command, Command::Replay { ref file } if file == &PathBuf::from("session.jsonl")));
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Args::try_parse_from(["dymlink"]).is_err());
    }

    #[test]
    fn kebab_case_subcommands() {
        let args = Args::try_parse_from(["dymlink", "frame-url"]).unwrap();
        assert!(matches!(args.command, Command::FrameUrl));
        let args = Args::try_parse_from(["dymlink", "relay-script"]).unwrap();
        assert!(matches!(args.command, Command::RelayScript));
    }
}
