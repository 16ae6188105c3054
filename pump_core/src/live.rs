//! Continuously refreshed status projection.
//!
//! A `LiveStatus` re-renders on every published snapshot and on every tick of
//! its own `Ticker`, so the elapsed time advances without new snapshots.
//! Stopping or dropping it closes the render gate first, then stops the
//! ticker and unsubscribes from the store. Once teardown returns, no render is
//! running and none will start, even for a publish already mid-notify.

use crate::projector::{StatusView, project};
use crate::store::{StatusStore, Subscription};
use crate::ticker::Ticker;
use pump_traits::clock::Clock;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// Open while the view is displayed. Renders hold the lock, so closing it
/// waits for a render in progress.
#[derive(Debug)]
struct Gate {
    open: Mutex<bool>,
}

impl Gate {
    fn new() -> Self {
        Self {
            open: Mutex::new(true),
        }
    }

    fn run(&self, render: impl FnOnce()) {
        let open = self.open.lock().unwrap_or_else(PoisonError::into_inner);
        if *open {
            render();
        }
    }

    fn close(&self) {
        *self.open.lock().unwrap_or_else(PoisonError::into_inner) = false;
    }
}

pub struct LiveStatus {
    gate: Arc<Gate>,
    ticker: Option<Ticker>,
    subscription: Option<Subscription>,
}

impl LiveStatus {
    /// `render` must not tear down this `LiveStatus` from inside a render.
    pub fn start<C, R>(store: &StatusStore, clock: C, tick: Duration, render: R) -> Self
    where
        C: Clock + Clone + Send + Sync + 'static,
        R: Fn(&StatusView) + Send + Sync + 'static,
    {
        let gate = Arc::new(Gate::new());
        let render = Arc::new(render);
        render(&project(store.current().as_ref(), clock.now()));

        let subscription = {
            let (gate, render, clock) = (gate.clone(), render.clone(), clock.clone());
            store.subscribe(move |status| {
                gate.run(|| render(&project(status, clock.now())));
            })
        };

        let ticker = {
            let (gate, store) = (gate.clone(), store.clone());
            Ticker::spawn(tick, clock, move |now| {
                gate.run(|| render(&project(store.current().as_ref(), now)));
            })
        };
        tracing::debug!(tick_ms = tick.as_millis() as u64, "live status started");

        Self {
            gate,
            ticker: Some(ticker),
            subscription: Some(subscription),
        }
    }

    /// Tear down the display; no render happens after this returns.
    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for LiveStatus {
    fn drop(&mut self) {
        self.gate.close();
        if let Some(ticker) = self.ticker.take() {
            ticker.stop();
        }
        drop(self.subscription.take());
        tracing::debug!("live status stopped");
    }
}
