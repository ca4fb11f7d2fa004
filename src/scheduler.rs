use crate::clock::Clock;
use chrono::{NaiveDateTime, NaiveTime};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

const ONE_DAY: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickReason {
    Startup,
    Interval,
    Midnight,
}

/// Re-runs a recomputation on start-up, every `interval`, and at each local
/// midnight reported by the clock.
pub struct Scheduler {
    shutdown_tx: watch::Sender<bool>,
    handle: Option<JoinHandle<()>>,
}

impl Scheduler {
    /// Spawns the timer task. Must be called from inside a tokio runtime.
    pub fn start<F>(interval: Duration, clock: Arc<dyn Clock>, mut tick: F) -> Self
    where
        F: FnMut(TickReason) + Send + 'static,
    {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let period = interval.max(Duration::from_secs(1));

        let handle = tokio::spawn(async move {
            tick(TickReason::Startup);

            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                let midnight = time::sleep(until_next_midnight(clock.now()));

                // Midnight is polled before the interval so a tick landing on
                // the same instant cannot swallow the rollover.
                tokio::select! {
                    biased;
                    _ = shutdown_rx.changed() => {
                        debug!("scheduler shutting down");
                        break;
                    }
                    _ = midnight => {
                        info!("local midnight reached, rolling over");
                        tick(TickReason::Midnight);
                        ticker.reset();
                    }
                    _ = ticker.tick() => {
                        debug!("interval tick");
                        tick(TickReason::Interval);
                    }
                }
            }
        });

        Self {
            shutdown_tx,
            handle: Some(handle),
        }
    }

    pub fn stop(&mut self) {
        let _ = self.shutdown_tx.send(true);
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Time from `now` until the start of the next local calendar day.
pub fn until_next_midnight(now: NaiveDateTime) -> Duration {
    now.date()
        .succ_opt()
        .map(|tomorrow| tomorrow.and_time(NaiveTime::MIN))
        .and_then(|midnight| (midnight - now).to_std().ok())
        .unwrap_or(ONE_DAY)
}
