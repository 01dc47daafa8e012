//! One-shot device commands and the single result renderer.
//!
//! Dispatch is fire-and-observe: the command posts to the node and whatever
//! JSON comes back is shown verbatim, pretty-printed, with markup-significant
//! characters escaped. There is exactly one escaping function and every
//! rendered result passes through it.

use serde_json::{Value, json};

use crate::error::Result;
use crate::transport::NodeApi;

/// A one-shot actuator command.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlCommand {
    /// Run or stop the water pump, optionally for a fixed duration.
    Pump { on: bool, duration_s: Option<u32> },
    /// Switch the grow light, optionally at a given brightness (0-100).
    Light { on: bool, brightness: Option<u8> },
    /// Switch the WS2812 strip, optionally selecting a mode.
    Strip { on: bool, mode: Option<String> },
}

impl ControlCommand {
    /// The JSON payload posted to the node.
    pub fn payload(&self) -> Value {
        fn base(device: &str, on: bool) -> Value {
            json!({"device": device, "action": if on { "on" } else { "off" }})
        }
        match self {
            ControlCommand::Pump { on, duration_s } => {
                let mut p = base("pump", *on);
                if let Some(d) = duration_s {
                    p["duration_s"] = json!(d);
                }
                p
            }
            ControlCommand::Light { on, brightness } => {
                let mut p = base("light", *on);
                if let Some(b) = brightness {
                    p["brightness"] = json!(b);
                }
                p
            }
            ControlCommand::Strip { on, mode } => {
                let mut p = base("ws2812", *on);
                if let Some(m) = mode {
                    p["mode"] = json!(m);
                }
                p
            }
        }
    }
}

/// Post a command and return the node's raw response body.
pub async fn dispatch<A: NodeApi + ?Sized>(api: &A, command: &ControlCommand) -> Result<Value> {
    api.send_control(&command.payload()).await
}

/// Escape markup-significant characters.
///
/// Every string that reaches a rendered surface goes through here; call
/// sites never escape ad hoc.
pub fn escape_markup(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render a dispatch result for display: pretty-printed JSON, escaped.
///
/// The body is shown verbatim, success or not; interpretation is left to
/// whoever reads it.
pub fn render_result(result: &Value) -> String {
    let pretty = serde_json::to_string_pretty(result).unwrap_or_else(|_| result.to_string());
    escape_markup(&pretty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockNode;

    #[test]
    fn test_pump_payload() {
        let cmd = ControlCommand::Pump {
            on: true,
            duration_s: Some(5),
        };
        assert_eq!(
            cmd.payload(),
            json!({"device": "pump", "action": "on", "duration_s": 5})
        );
    }

    #[test]
    fn test_off_payload_omits_optionals() {
        let cmd = ControlCommand::Light {
            on: false,
            brightness: None,
        };
        assert_eq!(cmd.payload(), json!({"device": "light", "action": "off"}));
    }

    #[tokio::test]
    async fn test_dispatch_posts_payload_and_returns_body() {
        let node = MockNode::new();
        node.set_control_response(json!({"ok": true, "ran_for_s": 5}));

        let cmd = ControlCommand::Pump {
            on: true,
            duration_s: Some(5),
        };
        let result = dispatch(&node, &cmd).await.unwrap();

        assert_eq!(result, json!({"ok": true, "ran_for_s": 5}));
        assert_eq!(node.dispatched(), vec![cmd.payload()]);
    }

    #[test]
    fn test_escape_markup_covers_all_significant_chars() {
        assert_eq!(
            escape_markup(r#"<b a="1">&x</b>"#),
            "&lt;b a=&quot;1&quot;&gt;&amp;x&lt;/b&gt;"
        );
        assert_eq!(escape_markup("plain"), "plain");
    }

    #[test]
    fn test_render_result_is_pretty_and_escaped() {
        let rendered = render_result(&json!({"note": "<done>"}));
        assert!(rendered.contains("&lt;done&gt;"));
        assert!(rendered.contains('\n')); // pretty-printed, not compact
        // The quotes of the JSON syntax itself are escaped too: one
        // renderer, one policy, no exceptions.
        assert!(rendered.contains("&quot;note&quot;"));
    }
}
