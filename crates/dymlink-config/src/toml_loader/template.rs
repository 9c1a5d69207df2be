//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# dymlink configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[peer]
# base_url = "http://localhost:3000"    # only this origin is trusted
# network_ids = ["evmtestiroagain_283331-1"]
# main_denom = "aevm"
# frame_path = "/connect"
# qr_account = "dym1account"            # deep link to an account view

[appearance]
# menu_align = "center"                 # left, center, right

# Replaces the default palette wholesale when present.
# [appearance.styles]
# "--black-light" = "rgb(63 81 59)"
# "--black-light-rgb" = "63, 81, 59"
# "--black-dark" = "rgb(27 40 24)"
# "--black-dark-rgb" = "27, 40, 24"
# "--background-color" = "rgb(42 59 42)"
# "--background-color-secondary" = "rgb(63 78 63)"

[bridge]
# coalesce_layout_events = true
# tx_response = "alert"                 # alert, log
# event_capacity = 64                   # 1-4096

[transaction]
# self_send_amount = "1000000000000000000"

[logging]
# level = "INFO"                        # DEBUG, INFO, WARNING, ERROR
"##
    .to_string()
}
