//! Transport seam between the dashboard logic and the node's HTTP API.
//!
//! Everything above this trait (poller, history engine, settings
//! synchronizer, control dispatcher, camera controller) is generic over
//! [`NodeApi`], so it runs identically against the real
//! [`NodeClient`](crate::NodeClient) and the in-memory
//! [`MockNode`](crate::MockNode) used in tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use plantdeck_types::{HistoryRecord, SensorReading};

use crate::error::Result;
use crate::history::RangeFilter;

/// Response to `GET /camera/start`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CameraStartResponse {
    /// Whether the stream started.
    #[serde(default)]
    pub ok: bool,
    /// Server-reported reason when `ok` is false.
    #[serde(default)]
    pub error: Option<String>,
}

/// Request/response operations the dashboard relies on.
///
/// One method per backend operation; see the external-interface table in
/// the crate docs. Implementors own all HTTP details, callers only see
/// typed results.
#[async_trait]
pub trait NodeApi: Send + Sync {
    /// Base URL of the node, for constructing hand-off URLs (report export,
    /// video stream) that are opened by external collaborators.
    fn base_url(&self) -> &str;

    /// `GET /api/sensors`: the latest live reading.
    async fn latest_reading(&self) -> Result<SensorReading>;

    /// `GET /api/history` with an optional since/until range.
    async fn history(&self, filter: &RangeFilter) -> Result<Vec<HistoryRecord>>;

    /// `POST /api/control`: send an arbitrary command payload, receive an
    /// arbitrary structured result. No schema validation at this layer.
    async fn send_control(&self, payload: &Value) -> Result<Value>;

    /// `GET /api/settings`: the raw configuration document, before any
    /// client-side repair.
    async fn load_settings(&self) -> Result<Value>;

    /// `POST /api/settings`: a partial configuration update. Fields not in
    /// `patch` are preserved by the server-side merge.
    async fn save_settings(&self, patch: &Value) -> Result<Value>;

    /// `GET /camera/start`.
    async fn camera_start(&self) -> Result<CameraStartResponse>;

    /// `GET /camera/stop`.
    async fn camera_stop(&self) -> Result<()>;
}
