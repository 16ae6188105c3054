//! Human-readable error descriptions and structured JSON error formatting.

use pump_remote::RemoteError;
use serde_json::json;

/// Exit code for configuration and startup errors.
pub const EXIT_STARTUP: i32 = 2;

/// Map an eyre::Report to a human-readable explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    if let Some(RemoteError::BaseUrl(url)) = err.downcast_ref::<RemoteError>() {
        return format!(
            "What happened: The controller address {url:?} is not a valid URL.\nLikely causes: Typo in api.base_url or a missing scheme.\nHow to fix: Set api.base_url to something like \"http://192.168.1.50:8080/\"."
        );
    }

    let msg = err.to_string();
    let lower = msg.to_ascii_lowercase();

    if lower.starts_with("read config") {
        return format!(
            "What happened: The config file could not be read ({msg}).\nLikely causes: Wrong --config path or missing permissions.\nHow to fix: Check the path, or omit --config to use built-in defaults."
        );
    }

    if is_config_error(&lower) {
        return format!(
            "What happened: Invalid configuration ({msg}).\nLikely causes: Unknown keys, wrong value types, or out-of-range values in the TOML.\nHow to fix: Edit the config file, then rerun."
        );
    }

    if lower.contains("log level") || lower.contains("logging.") || lower.contains("init logging") {
        return format!(
            "What happened: Logging could not be set up ({msg}).\nLikely causes: Bad --log-level or [logging] values, or an unwritable log directory.\nHow to fix: Use a level such as warn or debug and check logging.file."
        );
    }

    // Generic fallback
    let mut cause = String::new();
    if let Some(src) = err.source() {
        cause = format!(" Cause: {src}");
    }
    format!(
        "Something went wrong.{cause}\nHow to fix: Re-run with --log-level=debug for details. Original: {msg}"
    )
}

fn is_config_error(lower: &str) -> bool {
    lower.starts_with("read config") || lower.contains("invalid configuration") || lower.contains(" must ")
}

/// Errors that reach `main` are configuration or startup failures.
pub fn exit_code_for_error(_err: &eyre::Report) -> i32 {
    EXIT_STARTUP
}

/// Structured JSON for errors when --json is enabled.
pub fn format_error_json(err: &eyre::Report) -> String {
    let reason = match err.downcast_ref::<RemoteError>() {
        Some(RemoteError::BaseUrl(_)) => "BaseUrl",
        _ if is_config_error(&err.to_string().to_ascii_lowercase()) => "Config",
        _ => "Error",
    };
    json!({ "reason": reason, "message": humanize(err) }).to_string()
}
