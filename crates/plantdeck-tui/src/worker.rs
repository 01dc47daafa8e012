//! Background worker for node communication.
//!
//! All HTTP I/O happens here, in a separate Tokio task, so the render loop
//! never blocks on the network. The worker receives [`Command`]s from the
//! UI, talks to the node through the [`NodeApi`] seam, and reports back with
//! [`UiEvent`]s. It also owns the telemetry [`PollerHandle`], so polling
//! starts and stops with an explicit command rather than running unowned.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tracing::{debug, info};

use plantdeck_client::control;
use plantdeck_client::{
    CameraController, NodeApi, PollEvent, Poller, PollerHandle, TelemetrySeries, history, settings,
};

use crate::messages::{Command, UiEvent};

/// Background worker that talks to the greenhouse node.
pub struct NodeWorker {
    command_rx: mpsc::Receiver<Command>,
    event_tx: mpsc::Sender<UiEvent>,
    api: Arc<dyn NodeApi>,
    series: Arc<Mutex<TelemetrySeries>>,
    camera: CameraController,
    poller: Option<PollerHandle>,
    /// Kept so `poll_rx` never closes while the worker lives.
    poll_tx: mpsc::Sender<PollEvent>,
    poll_rx: mpsc::Receiver<PollEvent>,
}

impl NodeWorker {
    pub fn new(
        command_rx: mpsc::Receiver<Command>,
        event_tx: mpsc::Sender<UiEvent>,
        api: Arc<dyn NodeApi>,
        series: Arc<Mutex<TelemetrySeries>>,
    ) -> Self {
        let (poll_tx, poll_rx) = mpsc::channel(32);
        Self {
            command_rx,
            event_tx,
            api,
            series,
            camera: CameraController::new(),
            poller: None,
            poll_tx,
            poll_rx,
        }
    }

    /// Run the worker's main loop.
    ///
    /// Consumes the worker and runs until [`Command::Shutdown`] arrives or
    /// the command channel closes.
    pub async fn run(mut self) {
        info!("node worker started");

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => {
                    match cmd {
                        Some(Command::Shutdown) | None => break,
                        Some(cmd) => self.handle_command(cmd).await,
                    }
                }
                Some(event) = self.poll_rx.recv() => {
                    self.forward_poll_event(event).await;
                }
            }
        }

        if let Some(poller) = self.poller.take() {
            poller.shutdown().await;
        }
        info!("node worker stopped");
    }

    async fn handle_command(&mut self, cmd: Command) {
        debug!(?cmd, "handling command");
        match cmd {
            Command::StartPolling => {
                if self.poller.as_ref().is_none_or(|p| p.is_stopped()) {
                    self.poller = Some(Poller::spawn(
                        Arc::clone(&self.api),
                        Arc::clone(&self.series),
                        self.poll_tx.clone(),
                    ));
                }
            }
            Command::StopPolling => {
                if let Some(poller) = self.poller.take() {
                    poller.shutdown().await;
                }
            }
            Command::LoadHistory { filter } => {
                let event = match history::fetch(self.api.as_ref(), &filter).await {
                    Ok(records) => UiEvent::History(records),
                    Err(e) => UiEvent::HistoryFailed(e.to_string()),
                };
                self.send(event).await;
            }
            Command::Dispatch { command } => {
                let event = match control::dispatch(self.api.as_ref(), &command).await {
                    Ok(result) => UiEvent::ControlResult(control::render_result(&result)),
                    Err(e) => UiEvent::ControlFailed(e.to_string()),
                };
                self.send(event).await;
            }
            Command::LoadSettings => {
                let event = match settings::load(self.api.as_ref()).await {
                    Ok(loaded) => UiEvent::Settings(loaded),
                    Err(e) => UiEvent::SettingsFailed(e.to_string()),
                };
                self.send(event).await;
            }
            Command::SaveBasic {
                theme,
                log_interval_min,
            } => {
                let event =
                    match settings::save_basic(self.api.as_ref(), theme, log_interval_min).await {
                        Ok(_) => UiEvent::SettingsSaved,
                        Err(e) => UiEvent::SettingsFailed(e.to_string()),
                    };
                self.send(event).await;
            }
            Command::SaveTheme { theme } => {
                // The theme is already active locally; a failed save only
                // means it will not stick across a restart.
                let event = match settings::save_theme(self.api.as_ref(), theme).await {
                    Ok(_) => UiEvent::SettingsSaved,
                    Err(e) => UiEvent::SettingsFailed(e.to_string()),
                };
                self.send(event).await;
            }
            Command::SaveAutoControl { form } => {
                let event = match settings::save_auto_control(self.api.as_ref(), &form).await {
                    Ok(_) => UiEvent::SettingsSaved,
                    Err(e) => UiEvent::SettingsFailed(e.to_string()),
                };
                self.send(event).await;
            }
            Command::CameraStart => {
                let event = match self.camera.start(self.api.as_ref()).await {
                    Ok(url) => UiEvent::CameraStarted(url.to_string()),
                    Err(e) => UiEvent::CameraFailed(e.to_string()),
                };
                self.send(event).await;
            }
            Command::CameraStop => {
                let event = match self.camera.stop(self.api.as_ref()).await {
                    Ok(()) => UiEvent::CameraStopped,
                    Err(e) => UiEvent::CameraFailed(e.to_string()),
                };
                self.send(event).await;
            }
            Command::Shutdown => unreachable!("handled in run()"),
        }
    }

    async fn forward_poll_event(&self, event: PollEvent) {
        let event = match event {
            PollEvent::Reading(reading) => UiEvent::Reading(reading),
            PollEvent::Failed(message) => UiEvent::PollFailed(message),
        };
        self.send(event).await;
    }

    async fn send(&self, event: UiEvent) {
        let _ = self.event_tx.send(event).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plantdeck_client::MockNode;
    use plantdeck_client::control::ControlCommand;
    use plantdeck_types::Theme;
    use serde_json::json;

    fn spawn_worker(node: MockNode) -> (
        Arc<MockNode>,
        mpsc::Sender<Command>,
        mpsc::Receiver<UiEvent>,
        tokio::task::JoinHandle<()>,
    ) {
        let node = Arc::new(node);
        let (cmd_tx, cmd_rx) = mpsc::channel(8);
        let (event_tx, event_rx) = mpsc::channel(8);
        let series = Arc::new(Mutex::new(TelemetrySeries::new()));
        let api = Arc::clone(&node) as Arc<dyn NodeApi>;
        let worker = NodeWorker::new(cmd_rx, event_tx, api, series);
        let handle = tokio::spawn(worker.run());
        (node, cmd_tx, event_rx, handle)
    }

    #[tokio::test]
    async fn test_load_settings_round_trip() {
        let node = MockNode::new();
        node.set_settings(json!({"theme": "dark"}));
        let (_node, cmd_tx, mut event_rx, handle) = spawn_worker(node);

        cmd_tx.send(Command::LoadSettings).await.unwrap();
        match event_rx.recv().await.unwrap() {
            UiEvent::Settings(loaded) => assert_eq!(loaded.config.theme, Theme::Dark),
            other => panic!("unexpected event: {other:?}"),
        }

        cmd_tx.send(Command::Shutdown).await.unwrap();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_dispatch_returns_rendered_result() {
        let node = MockNode::new();
        node.set_control_response(json!({"ok": true}));
        let (node, cmd_tx, mut event_rx, handle) = spawn_worker(node);

        cmd_tx
            .send(Command::Dispatch {
                command: ControlCommand::Pump {
                    on: true,
                    duration_s: Some(3),
                },
            })
            .await
            .unwrap();

        match event_rx.recv().await.unwrap() {
            UiEvent::ControlResult(rendered) => assert!(rendered.contains("ok")),
            other => panic!("unexpected event: {other:?}"),
        }
        assert_eq!(node.dispatched().len(), 1);

        cmd_tx.send(Command::Shutdown).await.unwrap();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_camera_failure_is_reported() {
        let node = MockNode::new();
        node.set_camera_failure("sensor busy");
        let (_node, cmd_tx, mut event_rx, handle) = spawn_worker(node);

        cmd_tx.send(Command::CameraStart).await.unwrap();
        match event_rx.recv().await.unwrap() {
            UiEvent::CameraFailed(reason) => assert!(reason.contains("sensor busy")),
            other => panic!("unexpected event: {other:?}"),
        }

        cmd_tx.send(Command::Shutdown).await.unwrap();
        handle.await.unwrap();
    }
}
