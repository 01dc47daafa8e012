//! Repeating telemetry poll with an explicit lifecycle.
//!
//! The poller owns one background task that fetches the latest reading every
//! [`POLL_INTERVAL`], appends it to the shared [`TelemetrySeries`], and
//! notifies the view over a channel. [`PollerHandle::stop`] cancels the task,
//! so the recurring work has an owner and a teardown path instead of living
//! for the life of the process.
//!
//! # Ordering
//!
//! Each tick awaits its request to completion before the next tick fires
//! (`MissedTickBehavior::Delay`), so responses cannot interleave and series
//! appends always happen in request order. A slow node delays the cadence
//! rather than producing out-of-order chart points. A failed poll is logged,
//! that refresh is skipped, and the loop continues untouched.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use time::OffsetDateTime;
use time::macros::format_description;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use plantdeck_types::SensorReading;

use crate::series::{MetricSample, TelemetrySeries};
use crate::transport::NodeApi;

/// Fixed poll cadence.
pub const POLL_INTERVAL: Duration = Duration::from_millis(5000);

/// Event emitted to the view after each poll attempt.
#[derive(Debug, Clone)]
pub enum PollEvent {
    /// A reading arrived and was appended to the series; re-render cards
    /// and chart.
    Reading(SensorReading),
    /// The poll failed; the refresh was skipped. Carries the error text for
    /// a status line, not an alert.
    Failed(String),
}

/// Spawns and owns the repeating poll task.
pub struct Poller;

/// Handle to a running poll task.
///
/// Dropping the handle does not stop the task; call [`stop`](Self::stop)
/// (or [`shutdown`](Self::shutdown) to also await completion).
pub struct PollerHandle {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// Cancel the repeating task.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// Cancel the repeating task and wait for it to finish.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        let _ = self.task.await;
    }

    /// Whether the task has been asked to stop.
    pub fn is_stopped(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Poller {
    /// Start polling `api` into `series`, notifying `events` after every
    /// attempt.
    ///
    /// The first poll runs immediately; subsequent polls follow at
    /// [`POLL_INTERVAL`]. The task ends when the handle is stopped or the
    /// event receiver goes away.
    pub fn spawn(
        api: Arc<dyn NodeApi>,
        series: Arc<Mutex<TelemetrySeries>>,
        events: mpsc::Sender<PollEvent>,
    ) -> PollerHandle {
        let cancel = CancellationToken::new();
        let task_cancel = cancel.clone();

        let task = tokio::spawn(async move {
            info!("telemetry poller started");
            let mut ticker = tokio::time::interval(POLL_INTERVAL);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = task_cancel.cancelled() => {
                        info!("telemetry poller stopped");
                        break;
                    }
                    _ = ticker.tick() => {
                        let event = poll_once(api.as_ref(), &series).await;
                        if events.send(event).await.is_err() {
                            debug!("poll event receiver dropped, stopping poller");
                            break;
                        }
                    }
                }
            }
        });

        PollerHandle { cancel, task }
    }
}

/// Run one poll attempt: fetch, append, report.
async fn poll_once(api: &dyn NodeApi, series: &Mutex<TelemetrySeries>) -> PollEvent {
    match api.latest_reading().await {
        Ok(reading) => {
            let label = tick_label(&reading);
            let sample = MetricSample::from(&reading);
            // Lock is never held across an await.
            series
                .lock()
                .expect("telemetry series lock poisoned")
                .push(label, sample);
            PollEvent::Reading(reading)
        }
        Err(e) => {
            warn!(error = %e, "poll failed, skipping refresh");
            PollEvent::Failed(e.to_string())
        }
    }
}

/// Format the timestamp label for one appended sample.
fn tick_label(reading: &SensorReading) -> String {
    let at = reading.timestamp_or(OffsetDateTime::now_utc());
    let fmt = format_description!("[hour]:[minute]:[second]");
    at.format(&fmt).unwrap_or_else(|_| "--:--:--".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockNode;
    use crate::series::Metric;

    fn setup(node: MockNode) -> (
        PollerHandle,
        Arc<Mutex<TelemetrySeries>>,
        mpsc::Receiver<PollEvent>,
    ) {
        let series = Arc::new(Mutex::new(TelemetrySeries::new()));
        let (tx, rx) = mpsc::channel(256);
        let handle = Poller::spawn(Arc::new(node), Arc::clone(&series), tx);
        (handle, series, rx)
    }

    #[tokio::test(start_paused = true)]
    async fn test_polls_on_cadence() {
        let node = MockNode::new().with_reading(SensorReading {
            temperature_c: Some(21.0),
            ..SensorReading::default()
        });
        let (handle, series, mut rx) = setup(node);

        // First poll is immediate, then one per interval.
        for _ in 0..3 {
            let event = rx.recv().await.unwrap();
            assert!(matches!(event, PollEvent::Reading(_)));
        }

        assert_eq!(series.lock().unwrap().len(), 3);
        assert_eq!(series.lock().unwrap().latest(Metric::Temperature), Some(21.0));
        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_skips_refresh_but_keeps_polling() {
        let node = MockNode::new().with_reading(SensorReading {
            humidity_pct: Some(50.0),
            ..SensorReading::default()
        });
        node.fail_next_readings(2);
        let (handle, series, mut rx) = setup(node);

        assert!(matches!(rx.recv().await.unwrap(), PollEvent::Failed(_)));
        assert!(matches!(rx.recv().await.unwrap(), PollEvent::Failed(_)));
        // The loop survives the failures and the next tick succeeds.
        assert!(matches!(rx.recv().await.unwrap(), PollEvent::Reading(_)));

        // Failed polls append nothing: the refresh is skipped entirely.
        assert_eq!(series.lock().unwrap().len(), 1);
        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_cancels_task() {
        let node = MockNode::new();
        let (handle, _series, mut rx) = setup(node);

        let _ = rx.recv().await; // first immediate poll
        assert!(!handle.is_stopped());
        handle.stop();
        assert!(handle.is_stopped());
        handle.shutdown().await;

        // No further events after cancellation.
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_appends_are_serialized_in_request_order() {
        // Even with per-request latency longer than the cadence, ticks are
        // awaited sequentially, so samples land in request order.
        let node = MockNode::new();
        node.set_read_latency(Duration::from_millis(7000));
        for i in 0..3 {
            node.push_reading(SensorReading {
                light_lux: Some(i as f64),
                ..SensorReading::default()
            });
        }
        let (handle, series, mut rx) = setup(node);

        for _ in 0..3 {
            assert!(matches!(rx.recv().await.unwrap(), PollEvent::Reading(_)));
        }

        let lights: Vec<Option<f64>> = series.lock().unwrap().values(Metric::Light).collect();
        assert_eq!(lights, vec![Some(0.0), Some(1.0), Some(2.0)]);
        handle.shutdown().await;
    }
}
