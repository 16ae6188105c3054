//! Terminal rendering of status views, controls and notifications.

use pump_core::projector::{NOT_CONNECTED, format_elapsed};
use pump_core::{Color, Controls, StatusView};
use pump_traits::Notifier;
use serde_json::json;

const GREEN: &str = "\x1b[32m";
const RESET: &str = "\x1b[0m";
/// Return to column 0 and erase the line.
pub const CLEAR_LINE: &str = "\r\x1b[2K";

/// One status line; the run-state flag is colored when `ansi` is set.
pub fn status_line(view: &StatusView, ansi: bool) -> String {
    match view {
        StatusView::NotConnected => NOT_CONNECTED.to_string(),
        StatusView::Connected { since_update, .. } => {
            let flag = format!("Pump Running: {}", view.run_label().unwrap_or("No"));
            let flag = if ansi && view.color() == Some(Color::Affirmative) {
                format!("{GREEN}{flag}{RESET}")
            } else {
                flag
            };
            format!(
                "Time since last update: {} | {flag}",
                format_elapsed(*since_update)
            )
        }
    }
}

pub fn status_json(view: &StatusView) -> serde_json::Value {
    match view {
        StatusView::NotConnected => json!({ "connected": false }),
        StatusView::Connected {
            since_update,
            running,
            color,
        } => json!({
            "connected": true,
            "running": running,
            "label": view.run_label(),
            "color": color_name(*color),
            "since_update_ms": since_update.as_millis() as u64,
        }),
    }
}

fn color_name(color: Color) -> &'static str {
    match color {
        Color::Affirmative => "affirmative",
        Color::Neutral => "neutral",
    }
}

pub fn controls_line(c: Controls) -> String {
    let state = |on: bool| if on { "enabled" } else { "disabled" };
    format!(
        "[start: {}] [stop: {}]",
        state(c.start_enabled),
        state(c.stop_enabled)
    )
}

/// Prints each notification on its own stdout line.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleNotifier {
    json: bool,
    over_live_line: bool,
}

impl ConsoleNotifier {
    pub fn new(json: bool) -> Self {
        Self {
            json,
            over_live_line: false,
        }
    }

    /// Clear a redrawn status line before printing, so messages don't trail it.
    pub fn over_live_line(mut self, on: bool) -> Self {
        self.over_live_line = on;
        self
    }

    fn line(&self, message: &str) -> String {
        if self.json {
            json!({ "notification": message }).to_string()
        } else if self.over_live_line {
            format!("{CLEAR_LINE}{message}")
        } else {
            message.to_string()
        }
    }
}

impl Notifier for ConsoleNotifier {
    fn alert(&self, message: &str) {
        println!("{}", self.line(message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pump_core::{SystemStatus, project};
    use std::time::{Duration, Instant};

    #[test]
    fn running_flag_is_green_only_with_ansi() {
        let t = Instant::now();
        let view = project(Some(&SystemStatus::new(true, t)), t + Duration::from_secs(5));
        assert_eq!(
            status_line(&view, false),
            "Time since last update: 5s | Pump Running: Yes"
        );
        assert_eq!(
            status_line(&view, true),
            "Time since last update: 5s | \x1b[32mPump Running: Yes\x1b[0m"
        );
    }

    #[test]
    fn stopped_flag_is_never_colored() {
        let t = Instant::now();
        let view = project(Some(&SystemStatus::new(false, t)), t);
        assert!(!status_line(&view, true).contains('\x1b'));
    }

    #[test]
    fn not_connected_json() {
        assert_eq!(
            status_json(&StatusView::NotConnected),
            json!({ "connected": false })
        );
    }

    #[test]
    fn controls_text() {
        let c = Controls {
            start_enabled: true,
            stop_enabled: false,
        };
        assert_eq!(controls_line(c), "[start: enabled] [stop: disabled]");
    }

    #[test]
    fn connected_json_carries_label_and_color() {
        let t = Instant::now();
        let running = project(Some(&SystemStatus::new(true, t)), t + Duration::from_millis(1500));
        assert_eq!(
            status_json(&running),
            json!({
                "connected": true,
                "running": true,
                "label": "Yes",
                "color": "affirmative",
                "since_update_ms": 1500,
            })
        );
        let idle = project(Some(&SystemStatus::new(false, t)), t);
        let v = status_json(&idle);
        assert_eq!(v["label"], "No");
        assert_eq!(v["color"], "neutral");
    }

    #[test]
    fn notification_clears_live_line_on_terminal() {
        let plain = ConsoleNotifier::new(false);
        assert_eq!(plain.line("Water pump stopped successfully!"), "Water pump stopped successfully!");
        let live = plain.over_live_line(true);
        assert_eq!(
            live.line("Water pump stopped successfully!"),
            "\r\x1b[2KWater pump stopped successfully!"
        );
        let json = ConsoleNotifier::new(true).over_live_line(true);
        assert_eq!(
            json.line("x"),
            json!({ "notification": "x" }).to_string()
        );
    }
}
