//! Recurring refresh of a page: once at start, then every five minutes.
//!
//! Ticks run one after another on a single task, so two requests for the
//! same page are never in flight at once. When a tick outlasts the period,
//! one late tick fires as soon as it finishes and the rest of the missed
//! ticks are dropped. A failing tick is logged and the next natural tick
//! tries again.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use tokio::{task::JoinHandle, time::MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::{FetchError, PollError};

/// Fixed refresh period.
pub const POLL_PERIOD: Duration = Duration::from_secs(5 * 60);

/// One unit of periodic work.
#[async_trait]
pub trait Tick: Send + Sync {
    async fn tick(&self) -> Result<(), FetchError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Idle,
    Polling,
}

/// Owns the recurring task. Dropping the loop cancels it.
#[derive(Debug, Default)]
pub struct PollLoop {
    running: Option<Running>,
}

#[derive(Debug)]
struct Running {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl PollLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PollState {
        match self.running {
            Some(_) => PollState::Polling,
            None => PollState::Idle,
        }
    }

    /// Idle → Polling. Must be called from within a tokio runtime.
    pub fn start<T: Tick + 'static>(&mut self, tick: Arc<T>) -> Result<(), PollError> {
        if self.running.is_some() {
            return Err(PollError::AlreadyPolling);
        }

        let cancel = CancellationToken::new();
        let task = tokio::spawn(run(tick, POLL_PERIOD, cancel.clone()));
        tracing::info!(period_secs = POLL_PERIOD.as_secs(), "poll loop started");

        self.running = Some(Running { cancel, task });
        Ok(())
    }

    /// Cancel the timer and any in-flight tick, then wait for the task.
    pub async fn stop(&mut self) {
        if let Some(Running { cancel, task }) = self.running.take() {
            cancel.cancel();
            if let Err(e) = task.await {
                tracing::warn!("poll task ended abnormally: {e}");
            }
            tracing::info!("poll loop stopped");
        }
    }
}

impl Drop for PollLoop {
    fn drop(&mut self) {
        if let Some(running) = &self.running {
            running.cancel.cancel();
        }
    }
}

async fn run<T: Tick>(tick: Arc<T>, period: Duration, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = interval.tick() => {}
        }

        tracing::debug!("poll tick");
        tokio::select! {
            _ = cancel.cancelled() => break,
            result = tick.tick() => {
                if let Err(e) = result {
                    tracing::warn!("weather refresh failed: {e}");
                }
            }
        }
    }
}
