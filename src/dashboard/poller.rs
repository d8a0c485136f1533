use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, warn};

/// Owns the polling timer. `stop` consumes the handle, so it runs at most once.
#[derive(Debug)]
pub struct PollHandle {
    timer: Option<JoinHandle<()>>,
}

impl PollHandle {
    pub fn is_active(&self) -> bool {
        self.timer.as_ref().map(|t| !t.is_finished()).unwrap_or(false)
    }

    pub fn stop(mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
            debug!("Status polling stopped");
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            warn!("Poll handle dropped without stop(); aborting timer");
            timer.abort();
        }
    }
}

/// Run `tick` every `period`, first one `period` after now.
///
/// Each tick is spawned on its own and is not awaited, so a slow tick never delays
/// the next one. Ticks already spawned keep running after `stop`.
pub fn start_polling<F, Fut>(period: Duration, tick: F) -> PollHandle
where
    F: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let timer = tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            tokio::spawn(tick());
        }
    });

    debug!("Status polling started every {:?}", period);
    PollHandle { timer: Some(timer) }
}
