//! Camera stream lifecycle and the cache-busted stream URL.

use time::OffsetDateTime;

use crate::error::{Error, Result};
use crate::transport::NodeApi;

/// Tracks whether the node's camera stream is live and where to attach it.
///
/// The controller holds the stream URL only while the stream is running;
/// [`stream_url`](Self::stream_url) returning `Some` is the signal to show
/// the feed.
#[derive(Debug, Default)]
pub struct CameraController {
    stream_url: Option<String>,
}

impl CameraController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Where to attach the live feed, if the stream is running.
    pub fn stream_url(&self) -> Option<&str> {
        self.stream_url.as_deref()
    }

    /// Start the camera stream.
    ///
    /// On success the feed URL carries a fresh timestamp query parameter so
    /// no intermediary can serve a stale frame from a previous session. A
    /// node that answers but declines (`ok: false`) is an [`Error::Camera`]
    /// carrying the node's reason; the caller surfaces it as an alert.
    pub async fn start<A: NodeApi + ?Sized>(&mut self, api: &A) -> Result<&str> {
        let response = api.camera_start().await?;
        if !response.ok {
            let reason = response
                .error
                .unwrap_or_else(|| "camera failed to start".to_string());
            return Err(Error::Camera(reason));
        }
        let ts = (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64;
        self.stream_url = Some(format!("{}/video_feed?ts={}", api.base_url(), ts));
        Ok(self.stream_url.as_deref().unwrap_or_default())
    }

    /// Stop the camera stream and detach the feed.
    ///
    /// The URL is cleared only after the node acknowledges the stop.
    pub async fn stop<A: NodeApi + ?Sized>(&mut self, api: &A) -> Result<()> {
        api.camera_stop().await?;
        self.stream_url = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockNode;

    #[tokio::test]
    async fn test_start_attaches_cache_busted_url() {
        let node = MockNode::new();
        let mut camera = CameraController::new();

        let url = camera.start(&node).await.unwrap().to_string();
        assert!(url.starts_with("http://mock.local/video_feed?ts="));

        let ts: i64 = url.rsplit("ts=").next().unwrap().parse().unwrap();
        assert!(ts > 0);
        assert_eq!(camera.stream_url(), Some(url.as_str()));
    }

    #[tokio::test]
    async fn test_declined_start_reports_node_reason() {
        let node = MockNode::new();
        node.set_camera_failure("sensor busy");
        let mut camera = CameraController::new();

        let err = camera.start(&node).await.unwrap_err();
        assert!(matches!(err, Error::Camera(ref reason) if reason == "sensor busy"));
        assert_eq!(camera.stream_url(), None);
    }

    #[tokio::test]
    async fn test_stop_clears_url_after_ack() {
        let node = MockNode::new();
        let mut camera = CameraController::new();
        camera.start(&node).await.unwrap();

        camera.stop(&node).await.unwrap();
        assert_eq!(camera.stream_url(), None);
    }
}
