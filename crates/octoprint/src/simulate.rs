//! In-process stand-in for the clothopus plugin on an OctoPrint host.
//!
//! Mirrors the plugin's command handling closely enough to drive the wizard
//! offline: the same validation order, the same error strings and the same
//! calibration payload shape.

use crate::client::CommandClient;
use crate::error::{ApiError, ApiResult};
use crate::types::{CommandResult, CALIBRATE_SCALE, INITIALIZE_SCALE};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

const MISSING_PINS: &str = "Missing pins.";
const NOT_CONNECTED: &str = "Could not connect to scale.";
const NOT_CALIBRATED: &str = "Could not calibrate scale.";

/// Highest BCM GPIO number on a Raspberry Pi header.
const MAX_GPIO: u8 = 27;
const SIMULATED_OFFSET: f64 = 804_444.776;
/// Net ADC counts the simulated load cell reports under the reference weight.
const SIMULATED_LOAD_COUNTS: f64 = -224_499.0;

#[derive(Debug, Clone, Copy)]
struct Wiring {
    dout: u8,
    pd_sck: u8,
}

#[derive(Clone, Default)]
pub struct SimulatedHost {
    scales: Arc<RwLock<HashMap<String, Wiring>>>,
}

impl SimulatedHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn scale_count(&self) -> usize {
        self.scales.read().await.len()
    }

    async fn initialize(&self, params: &Value) -> Value {
        let scale_id = scale_id(params);
        let pins = match params.get("pins") {
            Some(Value::Object(map)) if !map.is_empty() => &params["pins"],
            _ => return failure(MISSING_PINS),
        };
        let Some(wiring) = parse_wiring(pins) else {
            return failure(NOT_CONNECTED);
        };

        info!(scale_id = %scale_id, dout = wiring.dout, pd_sck = wiring.pd_sck, "Simulated scale registered");
        self.scales.write().await.insert(scale_id, wiring);
        json!({ "success": true })
    }

    async fn calibrate(&self, params: &Value) -> Value {
        let scale_id = scale_id(params);
        let known_weight = params.get("known_weight").filter(|w| is_present(w));
        let wiring = self.scales.read().await.get(&scale_id).copied();

        let (Some(wiring), Some(known_weight)) = (wiring, known_weight) else {
            return failure(NOT_CONNECTED);
        };
        let Some(weight) = parse_weight(known_weight) else {
            return failure(NOT_CALIBRATED);
        };

        info!(scale_id = %scale_id, weight, "Simulated scale calibrated");
        json!({
            "pins": { "dout": wiring.dout, "pd_sck": wiring.pd_sck },
            "calib": {
                "offset": SIMULATED_OFFSET,
                "scale": SIMULATED_LOAD_COUNTS / weight,
            },
        })
    }
}

impl CommandClient for SimulatedHost {
    async fn send(&self, _plugin_id: &str, command: &str, params: Value) -> ApiResult<CommandResult> {
        let response = match command {
            INITIALIZE_SCALE => self.initialize(&params).await,
            CALIBRATE_SCALE => self.calibrate(&params).await,
            other => {
                return Err(ApiError::Status {
                    status: 400,
                    body: format!("Unknown command: {other}"),
                })
            }
        };
        CommandResult::from_value(response)
    }
}

fn failure(error: &str) -> Value {
    json!({ "success": false, "error": error })
}

fn scale_id(params: &Value) -> String {
    match params.get("scale_id") {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "None".to_string(),
    }
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64() != Some(0.0),
        _ => true,
    }
}

fn parse_gpio(value: &Value) -> Option<u8> {
    let pin = match value {
        Value::Number(n) => u8::try_from(n.as_u64()?).ok()?,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    (pin <= MAX_GPIO).then_some(pin)
}

fn parse_wiring(pins: &Value) -> Option<Wiring> {
    let dout = parse_gpio(pins.get("dout")?)?;
    let pd_sck = parse_gpio(pins.get("pd_sck")?)?;
    (dout != pd_sck).then_some(Wiring { dout, pd_sck })
}

fn parse_weight(value: &Value) -> Option<f64> {
    let weight = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    (weight.is_finite() && weight > 0.0).then_some(weight)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CalibrationProfile, PinConfig};

    async fn init(host: &SimulatedHost, id: &str, pins: Value) -> CommandResult {
        host.send("clothopus", INITIALIZE_SCALE, json!({"scale_id": id, "pins": pins}))
            .await
            .expect("exchange")
    }

    async fn calibrate(host: &SimulatedHost, id: &str, weight: Value) -> CommandResult {
        host.send(
            "clothopus",
            CALIBRATE_SCALE,
            json!({"scale_id": id, "known_weight": weight}),
        )
        .await
        .expect("exchange")
    }

    #[tokio::test]
    async fn initialize_without_pins_reports_missing_pins() {
        let host = SimulatedHost::new();
        let result = init(&host, "1", json!({})).await;
        assert!(result.is_explicit_failure());
        assert_eq!(result.error(), Some(MISSING_PINS));
        assert_eq!(host.scale_count().await, 0);
    }

    #[tokio::test]
    async fn initialize_with_bad_pins_cannot_connect() {
        let host = SimulatedHost::new();
        let result = init(&host, "1", json!({"dout": "abc", "pd_sck": "6"})).await;
        assert_eq!(result.error(), Some(NOT_CONNECTED));

        let result = init(&host, "1", json!({"dout": "5", "pd_sck": "5"})).await;
        assert_eq!(result.error(), Some(NOT_CONNECTED));
    }

    #[tokio::test]
    async fn initialize_then_calibrate_returns_profile() {
        let host = SimulatedHost::new();
        let result = init(&host, "42", json!({"dout": "5", "pd_sck": "6"})).await;
        assert!(result.has_truthy_success());

        let result = calibrate(&host, "42", json!("500")).await;
        assert!(!result.is_explicit_failure());
        let profile = CalibrationProfile::from_result(result.as_map()).expect("profile");
        assert_eq!(profile.pins, Some(PinConfig::new("5", "6")));
        assert_eq!(profile.scale, SIMULATED_LOAD_COUNTS / 500.0);
    }

    #[tokio::test]
    async fn calibrate_unknown_scale_cannot_connect() {
        let host = SimulatedHost::new();
        let result = calibrate(&host, "missing", json!("500")).await;
        assert_eq!(result.error(), Some(NOT_CONNECTED));
    }

    #[tokio::test]
    async fn calibrate_with_empty_weight_cannot_connect() {
        let host = SimulatedHost::new();
        init(&host, "1", json!({"dout": 5, "pd_sck": 6})).await;
        let result = calibrate(&host, "1", json!("")).await;
        assert_eq!(result.error(), Some(NOT_CONNECTED));
    }

    #[tokio::test]
    async fn calibrate_with_nonsense_weight_fails_calibration() {
        let host = SimulatedHost::new();
        init(&host, "1", json!({"dout": 5, "pd_sck": 6})).await;
        let result = calibrate(&host, "1", json!("heavy")).await;
        assert_eq!(result.error(), Some(NOT_CALIBRATED));
    }

    #[tokio::test]
    async fn unknown_command_is_a_transport_error() {
        let host = SimulatedHost::new();
        let result = host.send("clothopus", "tare", json!({})).await;
        assert!(matches!(result, Err(ApiError::Status { status: 400, .. })));
    }
}
