//! Periodic refresh timer.
//!
//! Spawns one thread that calls the tick callback with the clock's `now`
//! every period. The thread is signalled and joined when the `Ticker` is
//! stopped or dropped, so no tick is delivered after teardown returns.
use crossbeam_channel as xch;
use pump_traits::clock::Clock;
use std::time::{Duration, Instant};

pub struct Ticker {
    /// Dropping the sender wakes the thread immediately.
    stop_tx: Option<xch::Sender<()>>,
    join_handle: Option<std::thread::JoinHandle<()>>,
}

impl Ticker {
    pub fn spawn<C, F>(period: Duration, clock: C, mut on_tick: F) -> Self
    where
        C: Clock + Send + 'static,
        F: FnMut(Instant) + Send + 'static,
    {
        let (stop_tx, stop_rx) = xch::bounded::<()>(1);
        let period = period.max(Duration::from_millis(1));

        let join_handle = std::thread::spawn(move || {
            loop {
                match stop_rx.recv_timeout(period) {
                    Err(xch::RecvTimeoutError::Timeout) => on_tick(clock.now()),
                    Ok(()) | Err(xch::RecvTimeoutError::Disconnected) => {
                        tracing::debug!("Ticker thread received shutdown signal");
                        break;
                    }
                }
            }
            tracing::trace!("Ticker thread exiting cleanly");
        });

        Self {
            stop_tx: Some(stop_tx),
            join_handle: Some(join_handle),
        }
    }

    /// Stop ticking and wait for the thread to exit.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        drop(self.stop_tx.take());
        if let Some(handle) = self.join_handle.take() {
            // Torn down from inside a tick: the loop exits on its own after the callback.
            if handle.thread().id() == std::thread::current().id() {
                return;
            }
            match handle.join() {
                Ok(()) => {
                    tracing::trace!("Ticker thread joined successfully");
                }
                Err(e) => {
                    // Thread panicked; log but don't propagate (we may be in Drop)
                    tracing::warn!(?e, "Ticker thread panicked during shutdown");
                }
            }
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.shutdown();
    }
}
