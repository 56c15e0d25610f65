use std::{sync::Weak, time::Duration};

use tokio::{
    sync::Mutex,
    task::JoinHandle,
    time::{interval_at, Instant},
};

use crate::models::domain::{AssessmentSession, TickOutcome};

/// Periodic timer for one attempt.
///
/// Each period takes one second off the session clock. The task stops on
/// its own once the clock runs out (after submitting), when the session
/// leaves `InProgress`, when the epoch it was started for is gone, or when
/// the session itself has been dropped. Dropping or cancelling the driver
/// aborts the task, so a driver never outlives its owner.
pub struct CountdownDriver {
    handle: JoinHandle<()>,
    epoch: u64,
}

impl CountdownDriver {
    pub fn spawn(session: Weak<Mutex<AssessmentSession>>, epoch: u64, period: Duration) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);

            loop {
                ticker.tick().await;

                let Some(session) = session.upgrade() else {
                    break;
                };

                let outcome = session.lock().await.tick(epoch);
                match outcome {
                    TickOutcome::Running(_) => {}
                    TickOutcome::Expired => {
                        log::info!("Time is up, test submitted automatically (epoch {})", epoch);
                        break;
                    }
                    TickOutcome::Ignored => break,
                }
            }
        });

        Self { handle, epoch }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for CountdownDriver {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
