//! Display projection of the latest snapshot.
//!
//! `project` is a pure function of `(status, now)`; the elapsed time keeps
//! growing between snapshots only because callers re-project with a later
//! `now` (see `live::LiveStatus`).

use crate::status::SystemStatus;
use std::fmt;
use std::time::{Duration, Instant};

pub const NOT_CONNECTED: &str = "Not connected";

/// Color attribute of the run-state label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// Pump running (green)
    Affirmative,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusView {
    NotConnected,
    Connected {
        since_update: Duration,
        running: bool,
        color: Color,
    },
}

pub fn project(status: Option<&SystemStatus>, now: Instant) -> StatusView {
    match status {
        None => StatusView::NotConnected,
        Some(s) => {
            let running = s.pump.running;
            StatusView::Connected {
                since_update: now.saturating_duration_since(s.updated),
                running,
                color: if running {
                    Color::Affirmative
                } else {
                    Color::Neutral
                },
            }
        }
    }
}

impl StatusView {
    /// "Yes"/"No" run-state flag; `None` when not connected.
    pub fn run_label(&self) -> Option<&'static str> {
        match self {
            StatusView::NotConnected => None,
            StatusView::Connected { running: true, .. } => Some("Yes"),
            StatusView::Connected { running: false, .. } => Some("No"),
        }
    }

    pub fn color(&self) -> Option<Color> {
        match self {
            StatusView::NotConnected => None,
            StatusView::Connected { color, .. } => Some(*color),
        }
    }

    pub fn since_update(&self) -> Option<Duration> {
        match self {
            StatusView::NotConnected => None,
            StatusView::Connected { since_update, .. } => Some(*since_update),
        }
    }
}

/// Whole seconds, humanized ("0s", "42s", "1m 5s").
pub fn format_elapsed(d: Duration) -> String {
    humantime::format_duration(Duration::from_secs(d.as_secs())).to_string()
}

impl fmt::Display for StatusView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusView::NotConnected => f.write_str(NOT_CONNECTED),
            StatusView::Connected { since_update, .. } => write!(
                f,
                "Time since last update: {} | Pump Running: {}",
                format_elapsed(*since_update),
                self.run_label().unwrap_or("No")
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_status_is_not_connected() {
        let view = project(None, Instant::now());
        assert_eq!(view, StatusView::NotConnected);
        assert_eq!(view.to_string(), "Not connected");
        assert_eq!(view.run_label(), None);
    }

    #[test]
    fn running_is_yes_in_affirmative_color() {
        let t = Instant::now();
        let s = SystemStatus::new(true, t);
        let view = project(Some(&s), t + Duration::from_secs(3));
        assert_eq!(view.run_label(), Some("Yes"));
        assert_eq!(view.color(), Some(Color::Affirmative));
        assert_eq!(
            view.to_string(),
            "Time since last update: 3s | Pump Running: Yes"
        );
    }

    #[test]
    fn stopped_is_no_in_neutral_color() {
        let t = Instant::now();
        let view = project(Some(&SystemStatus::new(false, t)), t);
        assert_eq!(view.run_label(), Some("No"));
        assert_eq!(view.color(), Some(Color::Neutral));
        assert_eq!(
            view.to_string(),
            "Time since last update: 0s | Pump Running: No"
        );
    }

    #[test]
    fn elapsed_is_truncated_to_seconds() {
        assert_eq!(format_elapsed(Duration::from_millis(999)), "0s");
        assert_eq!(format_elapsed(Duration::from_millis(65_400)), "1m 5s");
    }

    #[test]
    fn now_before_update_saturates() {
        let t = Instant::now();
        let s = SystemStatus::new(false, t + Duration::from_secs(1));
        assert_eq!(project(Some(&s), t).since_update(), Some(Duration::ZERO));
    }
}
