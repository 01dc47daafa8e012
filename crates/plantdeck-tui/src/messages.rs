//! Message types for communication between the UI and the worker task.
//!
//! - [`Command`]: requests from the UI thread to the background worker
//! - [`UiEvent`]: results and telemetry sent from the worker back to the UI

use plantdeck_client::control::ControlCommand;
use plantdeck_client::{AutoControlForm, LoadedSettings, RangeFilter};
use plantdeck_types::{HistoryRecord, SensorReading, Theme};

/// Messages sent from the UI thread to the background worker.
#[derive(Debug)]
pub enum Command {
    /// Start (or restart) the repeating telemetry poll.
    StartPolling,
    /// Stop the repeating telemetry poll.
    StopPolling,
    /// Fetch history matching the filter; the result replaces the table.
    LoadHistory { filter: RangeFilter },
    /// Post a one-shot device command.
    Dispatch { command: ControlCommand },
    /// Fetch and validate the node's settings document.
    LoadSettings,
    /// Save the two basic settings.
    SaveBasic { theme: Theme, log_interval_min: u32 },
    /// Persist a theme change (the UI has already applied it locally).
    SaveTheme { theme: Theme },
    /// Save the automation form.
    SaveAutoControl { form: AutoControlForm },
    /// Start the camera stream.
    CameraStart,
    /// Stop the camera stream.
    CameraStop,
    /// Shut the worker down.
    Shutdown,
}

/// Events sent from the worker back to the UI thread.
#[derive(Debug)]
pub enum UiEvent {
    /// A poll succeeded; the series already holds the new sample.
    Reading(SensorReading),
    /// A poll failed; this refresh was skipped.
    PollFailed(String),
    /// A history query finished; replace table and chart wholesale.
    History(Vec<HistoryRecord>),
    HistoryFailed(String),
    /// A control dispatch finished; the string is the rendered result body.
    ControlResult(String),
    ControlFailed(String),
    /// Settings loaded (and repaired where needed).
    Settings(LoadedSettings),
    SettingsFailed(String),
    /// A settings save was acknowledged.
    SettingsSaved,
    /// The camera stream is live at this URL.
    CameraStarted(String),
    CameraStopped,
    /// The camera could not start; shown as a blocking alert.
    CameraFailed(String),
}
