//! Client library for a plantdeck greenhouse sensor node.
//!
//! This crate is the core of the dashboard: everything with non-trivial
//! state, timing, or validation logic lives here, behind the [`NodeApi`]
//! transport seam so it all runs against [`MockNode`] in tests.
//!
//! - **Telemetry pipeline**: [`Poller`] fetches the latest reading on a
//!   fixed 5 s cadence into a capped [`TelemetrySeries`] and notifies the
//!   view; [`PollerHandle::stop`] makes the recurring task's lifecycle
//!   explicit.
//! - **History pipeline**: [`RangeFilter`] builds the optional since/until
//!   query, [`history::fetch`] returns the ordered record set, and
//!   [`history::report_url`] constructs the export URL for the external
//!   reporting collaborator.
//! - **Configuration pipeline**: [`settings`] loads raw config through the
//!   pure [`validate::validate_config`] repair function and offers partial
//!   (basic/theme) and full (auto-control) save operations.
//! - **One-shot commands**: [`control::dispatch`] plus the single audited
//!   [`control::render_result`] renderer; [`CameraController`] manages the
//!   cache-busted stream URL.
//!
//! # Quick start
//!
//! ```no_run
//! use std::sync::{Arc, Mutex};
//! use plantdeck_client::{NodeClient, Poller, TelemetrySeries};
//! use tokio::sync::mpsc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Arc::new(NodeClient::new("http://greenhouse.local:5000")?);
//! let series = Arc::new(Mutex::new(TelemetrySeries::new()));
//! let (tx, mut rx) = mpsc::channel(16);
//!
//! let handle = Poller::spawn(client, Arc::clone(&series), tx);
//! while let Some(event) = rx.recv().await {
//!     // re-render cards and chart
//! }
//! handle.stop();
//! # Ok(())
//! # }
//! ```

pub mod camera;
pub mod client;
pub mod control;
pub mod error;
pub mod history;
pub mod mock;
pub mod poller;
pub mod series;
pub mod settings;
pub mod transport;
pub mod validate;

pub use camera::CameraController;
pub use client::NodeClient;
pub use error::{Error, Result};
pub use history::RangeFilter;
pub use mock::MockNode;
pub use poller::{POLL_INTERVAL, PollEvent, Poller, PollerHandle};
pub use series::{Metric, MetricSample, SERIES_CAPACITY, TelemetrySeries};
pub use settings::{AutoControlForm, LoadedSettings};
pub use transport::{CameraStartResponse, NodeApi};
pub use validate::{Correction, validate_config};
