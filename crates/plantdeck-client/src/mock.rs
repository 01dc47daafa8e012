//! In-memory node for tests and demos.
//!
//! [`MockNode`] implements [`NodeApi`] without any I/O. Tests script it with
//! canned readings, injected failures, and artificial latency, then assert
//! on what the client sent (saved settings patches, dispatched control
//! payloads).

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};

use plantdeck_types::{HistoryRecord, SensorReading};

use crate::error::{Error, Result};
use crate::history::RangeFilter;
use crate::transport::{CameraStartResponse, NodeApi};

#[derive(Debug, Default)]
struct MockState {
    /// One-shot readings served before falling back to `fallback_reading`.
    queued_readings: VecDeque<SensorReading>,
    fallback_reading: SensorReading,
    history: Vec<HistoryRecord>,
    settings: Value,
    control_response: Option<Value>,
    camera_failure: Option<String>,
    read_latency: Option<Duration>,
    saved_patches: Vec<Value>,
    dispatched: Vec<Value>,
}

/// A scriptable in-memory greenhouse node.
#[derive(Debug, Default)]
pub struct MockNode {
    state: Mutex<MockState>,
    fail_reads: AtomicU32,
}

impl MockNode {
    /// A node that serves an all-absent reading, empty history, and an
    /// empty settings document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the reading served by every poll (builder form).
    pub fn with_reading(self, reading: SensorReading) -> Self {
        self.state.lock().unwrap().fallback_reading = reading;
        self
    }

    /// Queue a one-shot reading; queued readings are served in order before
    /// the fallback.
    pub fn push_reading(&self, reading: SensorReading) {
        self.state.lock().unwrap().queued_readings.push_back(reading);
    }

    /// Make the next `n` reading fetches fail.
    pub fn fail_next_readings(&self, n: u32) {
        self.fail_reads.store(n, Ordering::SeqCst);
    }

    /// Delay every reading fetch by `latency` (tokio time, so paused-clock
    /// tests stay deterministic).
    pub fn set_read_latency(&self, latency: Duration) {
        self.state.lock().unwrap().read_latency = Some(latency);
    }

    /// Set the record set served by history queries.
    pub fn set_history(&self, records: Vec<HistoryRecord>) {
        self.state.lock().unwrap().history = records;
    }

    /// Set the raw settings document served by `load_settings`.
    pub fn set_settings(&self, settings: Value) {
        self.state.lock().unwrap().settings = settings;
    }

    /// Set the body returned for control dispatches.
    pub fn set_control_response(&self, response: Value) {
        self.state.lock().unwrap().control_response = Some(response);
    }

    /// Make camera start answer `ok: false` with the given reason.
    pub fn set_camera_failure(&self, reason: &str) {
        self.state.lock().unwrap().camera_failure = Some(reason.to_string());
    }

    /// Every settings patch the client has saved, in order.
    pub fn saved_patches(&self) -> Vec<Value> {
        self.state.lock().unwrap().saved_patches.clone()
    }

    /// Every control payload the client has dispatched, in order.
    pub fn dispatched(&self) -> Vec<Value> {
        self.state.lock().unwrap().dispatched.clone()
    }

    async fn apply_latency(&self) {
        let latency = self.state.lock().unwrap().read_latency;
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl NodeApi for MockNode {
    fn base_url(&self) -> &str {
        "http://mock.local"
    }

    async fn latest_reading(&self) -> Result<SensorReading> {
        self.apply_latency().await;
        if self
            .fail_reads
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            return Err(Error::Api {
                status: 503,
                message: "sensor read failed".to_string(),
            });
        }
        let mut state = self.state.lock().unwrap();
        Ok(state
            .queued_readings
            .pop_front()
            .unwrap_or_else(|| state.fallback_reading.clone()))
    }

    async fn history(&self, _filter: &RangeFilter) -> Result<Vec<HistoryRecord>> {
        Ok(self.state.lock().unwrap().history.clone())
    }

    async fn send_control(&self, payload: &Value) -> Result<Value> {
        let mut state = self.state.lock().unwrap();
        state.dispatched.push(payload.clone());
        Ok(state
            .control_response
            .clone()
            .unwrap_or_else(|| json!({"ok": true})))
    }

    async fn load_settings(&self) -> Result<Value> {
        Ok(self.state.lock().unwrap().settings.clone())
    }

    async fn save_settings(&self, patch: &Value) -> Result<Value> {
        let mut state = self.state.lock().unwrap();
        state.saved_patches.push(patch.clone());
        Ok(patch.clone())
    }

    async fn camera_start(&self) -> Result<CameraStartResponse> {
        let failure = self.state.lock().unwrap().camera_failure.clone();
        Ok(match failure {
            Some(reason) => CameraStartResponse {
                ok: false,
                error: Some(reason),
            },
            None => CameraStartResponse {
                ok: true,
                error: None,
            },
        })
    }

    async fn camera_stop(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_queued_readings_served_before_fallback() {
        let node = MockNode::new().with_reading(SensorReading {
            temperature_c: Some(20.0),
            ..SensorReading::default()
        });
        node.push_reading(SensorReading {
            temperature_c: Some(99.0),
            ..SensorReading::default()
        });

        assert_eq!(
            node.latest_reading().await.unwrap().temperature_c,
            Some(99.0)
        );
        assert_eq!(
            node.latest_reading().await.unwrap().temperature_c,
            Some(20.0)
        );
    }

    #[tokio::test]
    async fn test_fail_next_readings_counts_down() {
        let node = MockNode::new();
        node.fail_next_readings(1);
        assert!(node.latest_reading().await.is_err());
        assert!(node.latest_reading().await.is_ok());
    }
}
