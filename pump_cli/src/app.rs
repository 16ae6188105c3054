//! Command execution: one-shot start/stop/status and the interactive watch session.

use crate::backend::Backend;
use crate::cli::Commands;
use crate::render::{CLEAR_LINE, ConsoleNotifier, controls_line, status_json, status_line};
use crate::shutdown::shutdown_signal;
use eyre::WrapErr;
use pump_core::{
    CommandDispatcher, Controls, Intent, LiveStatus, MonitorSettings, StatusStore, StatusView,
    poll_once, poll_status, project,
};
use pump_traits::clock::{Clock, MonotonicClock};
use std::io::{IsTerminal, Write};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;

/// Exit code when a start/stop command was not accepted.
pub const EXIT_COMMAND_FAILED: i32 = 1;

pub async fn execute(cmd: Commands, cfg: &pump_config::Config, json: bool) -> eyre::Result<i32> {
    let settings = MonitorSettings::from(cfg);
    let backend = Arc::new(Backend::from_config(cfg)?);
    match cmd {
        Commands::Start { ms } => {
            let d = ms.map_or(settings.default_pour, Duration::from_millis);
            Ok(one_shot(backend, Intent::Start(d), json).await)
        }
        Commands::Stop => Ok(one_shot(backend, Intent::Stop, json).await),
        Commands::Status => {
            status(&backend, json).await;
            Ok(0)
        }
        Commands::Watch => watch(backend, settings, json).await,
    }
}

async fn one_shot(backend: Arc<Backend>, intent: Intent, json: bool) -> i32 {
    let dispatcher = CommandDispatcher::new(backend, ConsoleNotifier::new(json));
    if dispatcher.dispatch(intent).await.is_success() {
        0
    } else {
        EXIT_COMMAND_FAILED
    }
}

async fn status(backend: &Backend, json: bool) {
    let store = StatusStore::new();
    let clock = MonotonicClock::new();
    let snapshot = poll_once(backend, &store, &clock).await;
    let view = project(snapshot.as_ref(), clock.now());
    if json {
        let mut out = status_json(&view);
        if let Some(s) = snapshot {
            out["time_left_ms"] = s.pump.time_left.map(|d| d.as_millis() as u64).into();
            out["water_threshold_ms"] = s.water_threshold.map(|d| d.as_millis() as u64).into();
        }
        println!("{out}");
    } else {
        println!("{}", status_line(&view, std::io::stdout().is_terminal()));
        println!("{}", controls_line(Controls::for_status(snapshot.as_ref())));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WatchCommand {
    Intent(Intent),
    Quit,
}

fn parse_watch_command(line: &str, default_pour: Duration) -> Option<WatchCommand> {
    let mut words = line.split_whitespace();
    let cmd = match words.next()? {
        "start" => match words.next() {
            None => Intent::Start(default_pour),
            Some(ms) => Intent::Start(Duration::from_millis(ms.parse().ok()?)),
        },
        "stop" => Intent::Stop,
        "quit" | "exit" => return Some(WatchCommand::Quit),
        _ => return None,
    };
    words.next().is_none().then_some(WatchCommand::Intent(cmd))
}

fn print_view(view: &StatusView, json: bool, tty: bool) {
    let mut out = std::io::stdout().lock();
    if json {
        let _ = writeln!(out, "{}", status_json(view));
    } else if tty {
        let _ = write!(out, "{CLEAR_LINE}{}", status_line(view, true));
        let _ = out.flush();
    } else {
        let _ = writeln!(out, "{}", status_line(view, false));
    }
}

async fn watch(backend: Arc<Backend>, settings: MonitorSettings, json: bool) -> eyre::Result<i32> {
    let store = StatusStore::new();
    let clock = MonotonicClock::new();
    let tty = !json && std::io::stdout().is_terminal();

    // Prime the store so the first command sees real controls.
    poll_once(&*backend, &store, &clock).await;

    let (stop_poll, poll_stopped) = tokio::sync::oneshot::channel::<()>();
    let poller = {
        let backend = backend.clone();
        let store = store.clone();
        tokio::spawn(async move {
            poll_status(&*backend, &store, &clock, settings.poll_interval, async {
                let _ = poll_stopped.await;
            })
            .await;
        })
    };

    let live = LiveStatus::start(&store, clock, settings.tick_interval, move |view| {
        print_view(view, json, tty);
    });

    let dispatcher = Arc::new(CommandDispatcher::new(
        backend,
        ConsoleNotifier::new(json).over_live_line(tty),
    ));
    let prefix = if tty { CLEAR_LINE } else { "" };
    let mut in_flight = JoinSet::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            res = &mut shutdown => {
                if let Err(e) = res {
                    tracing::warn!(error = %e, "signal handler unavailable");
                }
                break;
            }
            line = lines.next_line() => {
                let Some(line) = line.wrap_err("read stdin")? else {
                    break;
                };
                match parse_watch_command(&line, settings.default_pour) {
                    Some(WatchCommand::Quit) => break,
                    Some(WatchCommand::Intent(intent)) => {
                        let controls = Controls::for_status(store.current().as_ref());
                        if !controls.allows(&intent) {
                            println!("{prefix}{} is disabled {}", intent.name(), controls_line(controls));
                            continue;
                        }
                        let dispatcher = dispatcher.clone();
                        in_flight.spawn(async move {
                            dispatcher.dispatch(intent).await;
                        });
                    }
                    None if line.trim().is_empty() => {}
                    None => println!("{prefix}commands: start [ms] | stop | quit"),
                }
            }
        }
    }

    // Let accepted commands report their outcome before tearing down.
    while in_flight.join_next().await.is_some() {}
    let _ = stop_poll.send(());
    if let Err(e) = poller.await {
        tracing::warn!(error = %e, "status poller task failed");
    }
    live.stop();
    if tty {
        println!();
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT: Duration = Duration::from_millis(3000);

    #[test]
    fn parses_watch_commands() {
        assert_eq!(
            parse_watch_command("start", DEFAULT),
            Some(WatchCommand::Intent(Intent::Start(DEFAULT)))
        );
        assert_eq!(
            parse_watch_command("  start 1500 ", DEFAULT),
            Some(WatchCommand::Intent(Intent::Start(Duration::from_millis(1500))))
        );
        assert_eq!(
            parse_watch_command("stop", DEFAULT),
            Some(WatchCommand::Intent(Intent::Stop))
        );
        assert_eq!(parse_watch_command("quit", DEFAULT), Some(WatchCommand::Quit));
    }

    #[test]
    fn rejects_malformed_watch_commands() {
        assert_eq!(parse_watch_command("", DEFAULT), None);
        assert_eq!(parse_watch_command("start soon", DEFAULT), None);
        assert_eq!(parse_watch_command("stop now", DEFAULT), None);
        assert_eq!(parse_watch_command("pour", DEFAULT), None);
    }
}
