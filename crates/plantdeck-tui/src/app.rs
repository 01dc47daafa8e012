//! Application state for the terminal dashboard.
//!
//! [`App`] holds everything the renderer needs: the active tab, the shared
//! telemetry series, the latest reading, per-tab view state, and the
//! channels to and from the worker. All mutation happens on the UI thread,
//! either from key input (see [`crate::input`]) or from worker events via
//! [`App::handle_event`].

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use plantdeck_client::{AutoControlForm, LoadedSettings, RangeFilter, TelemetrySeries, history};
use plantdeck_types::{HistoryRecord, SensorReading, Theme};

use crate::messages::{Command, UiEvent};

/// Top-level tabs, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Dashboard,
    History,
    Control,
    Camera,
    Settings,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::Dashboard,
        Tab::History,
        Tab::Control,
        Tab::Camera,
        Tab::Settings,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::History => "History",
            Tab::Control => "Control",
            Tab::Camera => "Camera",
            Tab::Settings => "Settings",
        }
    }

    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let i = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Which history range input is being edited, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeField {
    Since,
    Until,
}

/// Editable automation form fields, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    Enabled,
    QuietHours,
    SoilLowThreshold,
    PumpDuration,
    LightTarget,
    LightBrightness,
    WsEnabled,
    WsMode,
    WsBrightness,
    WsDuration,
}

impl SettingsField {
    pub const ALL: [SettingsField; 10] = [
        SettingsField::Enabled,
        SettingsField::QuietHours,
        SettingsField::SoilLowThreshold,
        SettingsField::PumpDuration,
        SettingsField::LightTarget,
        SettingsField::LightBrightness,
        SettingsField::WsEnabled,
        SettingsField::WsMode,
        SettingsField::WsBrightness,
        SettingsField::WsDuration,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SettingsField::Enabled => "auto-control enabled",
            SettingsField::QuietHours => "quiet hours",
            SettingsField::SoilLowThreshold => "soil low threshold %",
            SettingsField::PumpDuration => "pump duration s",
            SettingsField::LightTarget => "light target lux",
            SettingsField::LightBrightness => "light brightness %",
            SettingsField::WsEnabled => "ws2812 enabled",
            SettingsField::WsMode => "ws2812 mode",
            SettingsField::WsBrightness => "ws2812 brightness",
            SettingsField::WsDuration => "ws2812 duration s",
        }
    }
}

/// The text input that currently owns key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Range(RangeField),
    Setting(SettingsField),
}

/// Application state.
pub struct App {
    pub tab: Tab,
    pub theme: Theme,
    pub should_quit: bool,
    /// Origin of the node, for report and stream URLs.
    pub server_url: String,

    /// Shared with the poller task; the renderer locks it briefly per frame.
    pub series: Arc<Mutex<TelemetrySeries>>,
    pub latest: Option<SensorReading>,
    pub polling: bool,
    /// Transient status line (last poll failure, save ack, ...).
    pub status: Option<String>,
    /// Blocking alert overlay; input is ignored until dismissed.
    pub alert: Option<String>,

    pub history: Vec<HistoryRecord>,
    pub since_input: String,
    pub until_input: String,
    pub editing: Option<EditField>,

    /// Rendered body of the last control dispatch (result or error text).
    pub control_output: Option<String>,

    pub camera_url: Option<String>,

    pub settings: Option<LoadedSettings>,
    /// Locally edited log interval, saved with the basic settings.
    pub log_interval_input: u32,
    /// Raw automation form text, edited in place and saved with 'a'.
    pub auto_form: AutoControlForm,
    /// Index into [`SettingsField::ALL`] for the highlighted form row.
    pub settings_cursor: usize,

    pub command_tx: mpsc::Sender<Command>,
    pub event_rx: mpsc::Receiver<UiEvent>,
}

impl App {
    pub fn new(
        server_url: String,
        theme: Theme,
        series: Arc<Mutex<TelemetrySeries>>,
        command_tx: mpsc::Sender<Command>,
        event_rx: mpsc::Receiver<UiEvent>,
    ) -> Self {
        Self {
            tab: Tab::Dashboard,
            theme,
            should_quit: false,
            server_url,
            series,
            latest: None,
            polling: false,
            status: None,
            alert: None,
            history: Vec::new(),
            since_input: String::new(),
            until_input: String::new(),
            editing: None,
            control_output: None,
            camera_url: None,
            settings: None,
            log_interval_input: 30,
            auto_form: AutoControlForm::default(),
            settings_cursor: 0,
            command_tx,
            event_rx,
        }
    }

    /// The range filter the history inputs currently describe.
    pub fn range_filter(&self) -> RangeFilter {
        RangeFilter::from_inputs(&self.since_input, &self.until_input)
    }

    /// The PDF report export URL for the current range.
    pub fn report_url(&self) -> String {
        history::report_url(&self.server_url, &self.range_filter())
    }

    /// The automation form text behind one settings row.
    pub fn auto_field(&self, field: SettingsField) -> &str {
        match field {
            SettingsField::Enabled => &self.auto_form.enabled,
            SettingsField::QuietHours => &self.auto_form.quiet_hours,
            SettingsField::SoilLowThreshold => &self.auto_form.soil_low_threshold,
            SettingsField::PumpDuration => &self.auto_form.pump_duration_s,
            SettingsField::LightTarget => &self.auto_form.light_target_lux,
            SettingsField::LightBrightness => &self.auto_form.normal_light_brightness,
            SettingsField::WsEnabled => &self.auto_form.ws_enabled,
            SettingsField::WsMode => &self.auto_form.ws_mode,
            SettingsField::WsBrightness => &self.auto_form.ws_brightness,
            SettingsField::WsDuration => &self.auto_form.ws_duration_s,
        }
    }

    pub fn auto_field_mut(&mut self, field: SettingsField) -> &mut String {
        match field {
            SettingsField::Enabled => &mut self.auto_form.enabled,
            SettingsField::QuietHours => &mut self.auto_form.quiet_hours,
            SettingsField::SoilLowThreshold => &mut self.auto_form.soil_low_threshold,
            SettingsField::PumpDuration => &mut self.auto_form.pump_duration_s,
            SettingsField::LightTarget => &mut self.auto_form.light_target_lux,
            SettingsField::LightBrightness => &mut self.auto_form.normal_light_brightness,
            SettingsField::WsEnabled => &mut self.auto_form.ws_enabled,
            SettingsField::WsMode => &mut self.auto_form.ws_mode,
            SettingsField::WsBrightness => &mut self.auto_form.ws_brightness,
            SettingsField::WsDuration => &mut self.auto_form.ws_duration_s,
        }
    }

    /// Switch the theme locally, then ask the worker to persist it.
    ///
    /// The new theme takes effect on the next frame regardless of whether
    /// the save round-trip succeeds.
    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next();
        let _ = self.command_tx.try_send(Command::SaveTheme { theme: self.theme });
    }

    /// Apply one worker event to the state.
    pub fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Reading(reading) => {
                self.latest = Some(reading);
                self.status = None;
            }
            UiEvent::PollFailed(message) => {
                // The stale values stay on screen; only the status changes.
                self.status = Some(format!("poll failed: {message}"));
            }
            UiEvent::History(records) => {
                // Full replace, never a merge.
                self.history = records;
                self.status = Some(format!("{} history rows", self.history.len()));
            }
            UiEvent::HistoryFailed(message) => {
                self.status = Some(format!("history query failed: {message}"));
            }
            UiEvent::ControlResult(rendered) => {
                self.control_output = Some(rendered);
            }
            UiEvent::ControlFailed(message) => {
                self.control_output = Some(format!("dispatch failed: {message}"));
            }
            UiEvent::Settings(loaded) => {
                self.theme = loaded.config.theme;
                self.log_interval_input = loaded.config.log_interval_min;
                self.auto_form = AutoControlForm::from_config(&loaded.config.auto_control);
                self.settings = Some(loaded);
            }
            UiEvent::SettingsFailed(message) => {
                self.status = Some(format!("settings: {message}"));
            }
            UiEvent::SettingsSaved => {
                self.status = Some("settings saved".to_string());
            }
            UiEvent::CameraStarted(url) => {
                self.camera_url = Some(url);
            }
            UiEvent::CameraStopped => {
                self.camera_url = None;
            }
            UiEvent::CameraFailed(reason) => {
                self.alert = Some(reason);
            }
        }
    }
}
