//! Keyboard handling: key -> [`Action`] -> state change and/or [`Command`].
//!
//! [`handle_key`] is a pure mapping so the keymap is testable without a
//! terminal; [`apply_action`] mutates the [`App`] and returns the command to
//! send to the worker, if any.

use crossterm::event::KeyCode;

use plantdeck_client::control::ControlCommand;
use plantdeck_types::AutoControl;

use crate::app::{App, EditField, RangeField, SettingsField, Tab};
use crate::messages::Command;

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    NextTab,
    PrevTab,
    GoTab(Tab),
    CycleTheme,
    DismissAlert,

    // Dashboard
    TogglePolling,
    ClearSeries,

    // History
    EditSince,
    EditUntil,
    InputChar(char),
    InputBackspace,
    CommitEdit,
    CancelEdit,
    RunQuery,
    ClearFilter,
    ShowReportUrl,

    // Control
    PumpOn,
    PumpOff,
    LightOn,
    LightOff,
    StripOn,
    StripOff,

    // Camera
    CameraStart,
    CameraStop,

    // Settings
    ReloadSettings,
    SaveBasic,
    SaveAutoControl,
    IntervalUp,
    IntervalDown,
    SettingsCursorDown,
    SettingsCursorUp,
    EditSetting,
}

/// Map a key press to an action, given the current input context.
///
/// A pending alert swallows everything except its dismissal; text editing
/// captures printable keys.
pub fn handle_key(code: KeyCode, tab: Tab, editing: bool, alert: bool) -> Action {
    if alert {
        return match code {
            KeyCode::Enter | KeyCode::Esc => Action::DismissAlert,
            _ => Action::None,
        };
    }

    if editing {
        return match code {
            KeyCode::Char(c) => Action::InputChar(c),
            KeyCode::Backspace => Action::InputBackspace,
            KeyCode::Enter => Action::CommitEdit,
            KeyCode::Esc => Action::CancelEdit,
            _ => Action::None,
        };
    }

    // Global keys first.
    match code {
        KeyCode::Char('q') => return Action::Quit,
        KeyCode::Tab => return Action::NextTab,
        KeyCode::BackTab => return Action::PrevTab,
        KeyCode::Char('t') => return Action::CycleTheme,
        KeyCode::Char(c @ '1'..='5') => {
            let i = (c as usize) - ('1' as usize);
            return Action::GoTab(Tab::ALL[i]);
        }
        _ => {}
    }

    match (tab, code) {
        (Tab::Dashboard, KeyCode::Char('p')) => Action::TogglePolling,
        (Tab::Dashboard, KeyCode::Char('c')) => Action::ClearSeries,

        (Tab::History, KeyCode::Char('s')) => Action::EditSince,
        (Tab::History, KeyCode::Char('u')) => Action::EditUntil,
        (Tab::History, KeyCode::Char('r')) | (Tab::History, KeyCode::Enter) => Action::RunQuery,
        (Tab::History, KeyCode::Char('x')) => Action::ClearFilter,
        (Tab::History, KeyCode::Char('o')) => Action::ShowReportUrl,

        (Tab::Control, KeyCode::Char('w')) => Action::PumpOn,
        (Tab::Control, KeyCode::Char('W')) => Action::PumpOff,
        (Tab::Control, KeyCode::Char('l')) => Action::LightOn,
        (Tab::Control, KeyCode::Char('L')) => Action::LightOff,
        (Tab::Control, KeyCode::Char('g')) => Action::StripOn,
        (Tab::Control, KeyCode::Char('G')) => Action::StripOff,

        (Tab::Camera, KeyCode::Char('s')) => Action::CameraStart,
        (Tab::Camera, KeyCode::Char('x')) => Action::CameraStop,

        (Tab::Settings, KeyCode::Char('r')) => Action::ReloadSettings,
        (Tab::Settings, KeyCode::Char('b')) => Action::SaveBasic,
        (Tab::Settings, KeyCode::Char('a')) => Action::SaveAutoControl,
        (Tab::Settings, KeyCode::Char('+')) | (Tab::Settings, KeyCode::Char('=')) => {
            Action::IntervalUp
        }
        (Tab::Settings, KeyCode::Char('-')) => Action::IntervalDown,
        (Tab::Settings, KeyCode::Down) | (Tab::Settings, KeyCode::Char('j')) => {
            Action::SettingsCursorDown
        }
        (Tab::Settings, KeyCode::Up) | (Tab::Settings, KeyCode::Char('k')) => {
            Action::SettingsCursorUp
        }
        (Tab::Settings, KeyCode::Enter) | (Tab::Settings, KeyCode::Char('e')) => {
            Action::EditSetting
        }

        _ => Action::None,
    }
}

/// The auto-control policy currently on screen, for command parameters.
fn current_policy(app: &App) -> AutoControl {
    app.settings
        .as_ref()
        .map(|s| s.config.auto_control.clone())
        .unwrap_or_default()
}

/// Apply an action to the app, returning the worker command it produces.
pub fn apply_action(app: &mut App, action: Action) -> Option<Command> {
    match action {
        Action::None => None,
        Action::Quit => {
            app.should_quit = true;
            None
        }
        Action::NextTab => {
            app.tab = app.tab.next();
            None
        }
        Action::PrevTab => {
            app.tab = app.tab.prev();
            None
        }
        Action::GoTab(tab) => {
            app.tab = tab;
            None
        }
        Action::CycleTheme => {
            app.cycle_theme();
            None
        }
        Action::DismissAlert => {
            app.alert = None;
            None
        }

        Action::TogglePolling => {
            app.polling = !app.polling;
            Some(if app.polling {
                Command::StartPolling
            } else {
                Command::StopPolling
            })
        }
        Action::ClearSeries => {
            if let Ok(mut series) = app.series.lock() {
                series.clear();
            }
            app.latest = None;
            None
        }

        Action::EditSince => {
            app.editing = Some(EditField::Range(RangeField::Since));
            None
        }
        Action::EditUntil => {
            app.editing = Some(EditField::Range(RangeField::Until));
            None
        }
        Action::InputChar(c) => {
            match app.editing {
                Some(EditField::Range(RangeField::Since)) => app.since_input.push(c),
                Some(EditField::Range(RangeField::Until)) => app.until_input.push(c),
                Some(EditField::Setting(field)) => app.auto_field_mut(field).push(c),
                None => {}
            }
            None
        }
        Action::InputBackspace => {
            match app.editing {
                Some(EditField::Range(RangeField::Since)) => {
                    app.since_input.pop();
                }
                Some(EditField::Range(RangeField::Until)) => {
                    app.until_input.pop();
                }
                Some(EditField::Setting(field)) => {
                    app.auto_field_mut(field).pop();
                }
                None => {}
            }
            None
        }
        Action::CommitEdit => {
            // Committing a range bound runs the query; a settings field just
            // stays in the form until it is saved.
            match app.editing.take() {
                Some(EditField::Range(_)) => Some(Command::LoadHistory {
                    filter: app.range_filter(),
                }),
                _ => None,
            }
        }
        Action::CancelEdit => {
            app.editing = None;
            None
        }
        Action::RunQuery => Some(Command::LoadHistory {
            filter: app.range_filter(),
        }),
        Action::ClearFilter => {
            app.since_input.clear();
            app.until_input.clear();
            Some(Command::LoadHistory {
                filter: app.range_filter(),
            })
        }
        Action::ShowReportUrl => {
            app.status = Some(format!("report: {}", app.report_url()));
            None
        }

        Action::PumpOn => {
            let policy = current_policy(app);
            Some(Command::Dispatch {
                command: ControlCommand::Pump {
                    on: true,
                    duration_s: Some(policy.pump_duration_s),
                },
            })
        }
        Action::PumpOff => Some(Command::Dispatch {
            command: ControlCommand::Pump {
                on: false,
                duration_s: None,
            },
        }),
        Action::LightOn => {
            let policy = current_policy(app);
            Some(Command::Dispatch {
                command: ControlCommand::Light {
                    on: true,
                    brightness: Some(policy.normal_light_brightness),
                },
            })
        }
        Action::LightOff => Some(Command::Dispatch {
            command: ControlCommand::Light {
                on: false,
                brightness: None,
            },
        }),
        Action::StripOn => {
            let policy = current_policy(app);
            Some(Command::Dispatch {
                command: ControlCommand::Strip {
                    on: true,
                    mode: Some(policy.ws2812.mode),
                },
            })
        }
        Action::StripOff => Some(Command::Dispatch {
            command: ControlCommand::Strip {
                on: false,
                mode: None,
            },
        }),

        Action::CameraStart => Some(Command::CameraStart),
        Action::CameraStop => Some(Command::CameraStop),

        Action::ReloadSettings => Some(Command::LoadSettings),
        Action::SaveBasic => Some(Command::SaveBasic {
            theme: app.theme,
            log_interval_min: app.log_interval_input,
        }),
        Action::SaveAutoControl => Some(Command::SaveAutoControl {
            form: app.auto_form.clone(),
        }),
        Action::IntervalUp => {
            app.log_interval_input = app.log_interval_input.saturating_add(5);
            None
        }
        Action::IntervalDown => {
            // Log interval is always positive.
            app.log_interval_input = app.log_interval_input.saturating_sub(5).max(5);
            None
        }
        Action::SettingsCursorDown => {
            app.settings_cursor = (app.settings_cursor + 1) % SettingsField::ALL.len();
            None
        }
        Action::SettingsCursorUp => {
            let n = SettingsField::ALL.len();
            app.settings_cursor = (app.settings_cursor + n - 1) % n;
            None
        }
        Action::EditSetting => {
            app.editing = Some(EditField::Setting(SettingsField::ALL[app.settings_cursor]));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use tokio::sync::mpsc;

    use plantdeck_client::TelemetrySeries;
    use plantdeck_types::Theme;

    use crate::messages::UiEvent;

    fn test_app() -> (App, mpsc::Receiver<Command>) {
        let (command_tx, command_rx) = mpsc::channel(8);
        let (_event_tx, event_rx) = mpsc::channel::<UiEvent>(8);
        let series = Arc::new(Mutex::new(TelemetrySeries::new()));
        let app = App::new(
            "http://node.local".to_string(),
            Theme::Dark,
            series,
            command_tx,
            event_rx,
        );
        (app, command_rx)
    }

    #[test]
    fn test_quit_key() {
        assert_eq!(
            handle_key(KeyCode::Char('q'), Tab::Dashboard, false, false),
            Action::Quit
        );
    }

    #[test]
    fn test_digit_jumps_to_tab() {
        assert_eq!(
            handle_key(KeyCode::Char('3'), Tab::Dashboard, false, false),
            Action::GoTab(Tab::Control)
        );
    }

    #[test]
    fn test_keys_are_tab_scoped() {
        // 's' starts the camera on the camera tab but edits the since bound
        // on the history tab.
        assert_eq!(
            handle_key(KeyCode::Char('s'), Tab::Camera, false, false),
            Action::CameraStart
        );
        assert_eq!(
            handle_key(KeyCode::Char('s'), Tab::History, false, false),
            Action::EditSince
        );
        assert_eq!(
            handle_key(KeyCode::Char('s'), Tab::Dashboard, false, false),
            Action::None
        );
    }

    #[test]
    fn test_alert_swallows_everything_but_dismissal() {
        assert_eq!(
            handle_key(KeyCode::Char('q'), Tab::Dashboard, false, true),
            Action::None
        );
        assert_eq!(
            handle_key(KeyCode::Enter, Tab::Dashboard, false, true),
            Action::DismissAlert
        );
        assert_eq!(
            handle_key(KeyCode::Esc, Tab::Dashboard, false, true),
            Action::DismissAlert
        );
    }

    #[test]
    fn test_editing_captures_printable_keys() {
        assert_eq!(
            handle_key(KeyCode::Char('q'), Tab::History, true, false),
            Action::InputChar('q')
        );
        assert_eq!(
            handle_key(KeyCode::Enter, Tab::History, true, false),
            Action::CommitEdit
        );
    }

    #[test]
    fn test_settings_tab_navigates_and_edits_fields() {
        assert_eq!(
            handle_key(KeyCode::Down, Tab::Settings, false, false),
            Action::SettingsCursorDown
        );
        assert_eq!(
            handle_key(KeyCode::Up, Tab::Settings, false, false),
            Action::SettingsCursorUp
        );
        assert_eq!(
            handle_key(KeyCode::Enter, Tab::Settings, false, false),
            Action::EditSetting
        );
    }

    #[test]
    fn test_settings_cursor_wraps() {
        let (mut app, _rx) = test_app();
        apply_action(&mut app, Action::SettingsCursorUp);
        assert_eq!(app.settings_cursor, SettingsField::ALL.len() - 1);
        apply_action(&mut app, Action::SettingsCursorDown);
        assert_eq!(app.settings_cursor, 0);
    }

    #[test]
    fn test_edited_auto_control_field_reaches_the_save() {
        let (mut app, _rx) = test_app();
        app.tab = Tab::Settings;

        // Select the quiet-hours row and type a new pair.
        apply_action(&mut app, Action::SettingsCursorDown);
        apply_action(&mut app, Action::EditSetting);
        assert_eq!(
            app.editing,
            Some(EditField::Setting(SettingsField::QuietHours))
        );
        for c in "22, 6".chars() {
            apply_action(&mut app, Action::InputChar(c));
        }
        assert!(apply_action(&mut app, Action::CommitEdit).is_none());
        assert_eq!(app.editing, None);

        let cmd = apply_action(&mut app, Action::SaveAutoControl).unwrap();
        match cmd {
            Command::SaveAutoControl { form } => {
                assert_eq!(form.quiet_hours, "22, 6");
                assert_eq!(form.parse().quiet_hours, [22, 6]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_committing_a_settings_field_does_not_run_a_query() {
        let (mut app, _rx) = test_app();
        apply_action(&mut app, Action::EditSetting);
        assert!(apply_action(&mut app, Action::CommitEdit).is_none());

        apply_action(&mut app, Action::EditSince);
        assert!(matches!(
            apply_action(&mut app, Action::CommitEdit),
            Some(Command::LoadHistory { .. })
        ));
    }
}
