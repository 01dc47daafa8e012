//! Platform-agnostic types for the plantdeck greenhouse node dashboard.
//!
//! This crate defines the data model shared by the HTTP client and the
//! terminal dashboard:
//!
//! - [`SensorReading`]: one live sample from the node, every field optional
//! - [`HistoryRecord`]: one row of the node's historical log
//! - [`NodeConfig`]: the device configuration with its nested auto-control
//!   policy and WS2812 LED sub-configuration
//! - [`format_metric`]: the single place a possibly-absent value becomes text
//!
//! All wire types deserialize leniently: a field that is missing, null, or
//! non-numeric becomes `None` and renders as a placeholder, never as `0`.

pub mod config;
pub mod format;
pub mod history;
pub mod reading;

pub(crate) mod de;

pub use config::{AutoControl, NodeConfig, Theme, Ws2812Config};
pub use format::{PLACEHOLDER, format_metric};
pub use history::HistoryRecord;
pub use reading::SensorReading;
