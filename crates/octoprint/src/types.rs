use crate::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

pub const INITIALIZE_SCALE: &str = "initialize_scale";
pub const CALIBRATE_SCALE: &str = "calibrate_scale";

/// HX711 wiring. Serialized with the host's `dout` / `pd_sck` names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinConfig {
    #[serde(rename = "dout")]
    pub data_pin: String,
    #[serde(rename = "pd_sck")]
    pub clock_pin: String,
}

impl PinConfig {
    pub fn new(data_pin: impl Into<String>, clock_pin: impl Into<String>) -> Self {
        Self {
            data_pin: data_pin.into(),
            clock_pin: clock_pin.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data_pin.is_empty() && self.clock_pin.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScaleCommand {
    InitializeScale { scale_id: String, pins: PinConfig },
    CalibrateScale { scale_id: String, known_weight: String },
}

impl ScaleCommand {
    pub fn name(&self) -> &'static str {
        match self {
            ScaleCommand::InitializeScale { .. } => INITIALIZE_SCALE,
            ScaleCommand::CalibrateScale { .. } => CALIBRATE_SCALE,
        }
    }

    pub fn scale_id(&self) -> &str {
        match self {
            ScaleCommand::InitializeScale { scale_id, .. }
            | ScaleCommand::CalibrateScale { scale_id, .. } => scale_id,
        }
    }

    /// Parameters sent alongside the command name.
    pub fn params(&self) -> Value {
        match self {
            ScaleCommand::InitializeScale { scale_id, pins } => json!({
                "scale_id": scale_id,
                "pins": pins,
            }),
            ScaleCommand::CalibrateScale {
                scale_id,
                known_weight,
            } => json!({
                "scale_id": scale_id,
                "known_weight": known_weight,
            }),
        }
    }
}

/// Response envelope of a plugin command: `{ success?, error?, ...payload }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandResult(Map<String, Value>);

impl CommandResult {
    pub fn from_value(value: Value) -> ApiResult<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(ApiError::InvalidResponse(format!(
                "expected a JSON object, got {other}"
            ))),
        }
    }

    pub fn success(&self) -> Option<&Value> {
        self.0.get("success")
    }

    /// `success` is present and truthy in the JSON/JavaScript sense.
    pub fn has_truthy_success(&self) -> bool {
        self.success().is_some_and(is_truthy)
    }

    /// `success` is exactly `false`. Any other value, or no value, is not a failure.
    pub fn is_explicit_failure(&self) -> bool {
        matches!(self.success(), Some(Value::Bool(false)))
    }

    /// The `error` field when it is a non-empty string.
    pub fn error(&self) -> Option<&str> {
        self.0
            .get("error")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for CommandResult {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Typed view over a calibration payload:
/// `{"pins": {"dout", "pd_sck"}, "calib": {"offset", "scale"}}`.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationProfile {
    pub pins: Option<PinConfig>,
    pub offset: f64,
    pub scale: f64,
}

impl CalibrationProfile {
    pub fn from_result(result: &Map<String, Value>) -> Option<Self> {
        let calib = result.get("calib")?;
        let offset = calib.get("offset")?.as_f64()?;
        let scale = calib.get("scale")?.as_f64()?;
        let pins = result.get("pins").and_then(|p| {
            Some(PinConfig {
                data_pin: pin_text(p.get("dout")?)?,
                clock_pin: pin_text(p.get("pd_sck")?)?,
            })
        });
        Some(Self {
            pins,
            offset,
            scale,
        })
    }
}

fn pin_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerVersion {
    pub api: String,
    pub server: String,
    #[serde(default)]
    pub text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(value: Value) -> CommandResult {
        CommandResult::from_value(value).expect("object")
    }

    #[test]
    fn initialize_params_use_host_pin_names() {
        let cmd = ScaleCommand::InitializeScale {
            scale_id: "17".to_string(),
            pins: PinConfig::new("5", "6"),
        };
        assert_eq!(cmd.name(), "initialize_scale");
        assert_eq!(
            cmd.params(),
            json!({"scale_id": "17", "pins": {"dout": "5", "pd_sck": "6"}})
        );
    }

    #[test]
    fn calibrate_params_carry_weight_as_entered() {
        let cmd = ScaleCommand::CalibrateScale {
            scale_id: "17".to_string(),
            known_weight: "500".to_string(),
        };
        assert_eq!(cmd.name(), "calibrate_scale");
        assert_eq!(cmd.scale_id(), "17");
        assert_eq!(cmd.params(), json!({"scale_id": "17", "known_weight": "500"}));
    }

    #[test]
    fn non_object_body_is_rejected() {
        assert!(matches!(
            CommandResult::from_value(json!([1, 2])),
            Err(ApiError::InvalidResponse(_))
        ));
    }

    #[test]
    fn truthiness_follows_javascript() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!("yes")));
        assert!(is_truthy(&json!({})));
        assert!(is_truthy(&json!([])));
    }

    #[test]
    fn only_literal_false_is_an_explicit_failure() {
        assert!(result(json!({"success": false})).is_explicit_failure());
        assert!(!result(json!({})).is_explicit_failure());
        assert!(!result(json!({"success": 0})).is_explicit_failure());
        assert!(!result(json!({"success": null})).is_explicit_failure());
    }

    #[test]
    fn missing_success_is_not_truthy() {
        assert!(!result(json!({})).has_truthy_success());
        assert!(result(json!({"success": true})).has_truthy_success());
    }

    #[test]
    fn empty_error_string_is_ignored() {
        assert_eq!(result(json!({"error": ""})).error(), None);
        assert_eq!(result(json!({"error": "bad pin"})).error(), Some("bad pin"));
        assert_eq!(result(json!({"error": 3})).error(), None);
    }

    #[test]
    fn profile_reads_host_payload() {
        let payload = json!({
            "pins": {"dout": 5, "pd_sck": 6},
            "calib": {"offset": 804444.776, "scale": -448.998}
        });
        let map = payload.as_object().cloned().expect("object");
        let profile = CalibrationProfile::from_result(&map).expect("profile");
        assert_eq!(profile.pins, Some(PinConfig::new("5", "6")));
        assert_eq!(profile.offset, 804444.776);
        assert_eq!(profile.scale, -448.998);
    }

    #[test]
    fn profile_is_absent_for_opaque_payloads() {
        assert!(CalibrationProfile::from_result(&Map::new()).is_none());
    }
}
