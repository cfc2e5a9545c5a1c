use crate::client::CommandClient;
use crate::error::{ApiError, ApiResult};
use crate::types::{CommandResult, ServerVersion};
use reqwest::Client;
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

const API_KEY_HEADER: &str = "X-Api-Key";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// HTTP client for an OctoPrint instance's REST API.
#[derive(Clone)]
pub struct OctoPrintApi {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl OctoPrintApi {
    pub fn new(base_url: &str, api_key: impl Into<String>, timeout: Duration) -> ApiResult<Self> {
        let client = Client::builder()
            .user_agent("scale-wizard/0.1")
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Ok(Self {
            client,
            base_url: normalize_base_url(base_url)?,
            api_key: api_key.into(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn plugin_url(&self, plugin_id: &str) -> ApiResult<Url> {
        Ok(self.base_url.join(&format!("api/plugin/{plugin_id}"))?)
    }

    pub async fn server_version(&self) -> ApiResult<ServerVersion> {
        let response = self
            .client
            .get(self.base_url.join("api/version")?)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status, body));
        }

        let version: ServerVersion = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;
        info!(server = %version.server, api = %version.api, "Connected to OctoPrint");
        Ok(version)
    }
}

impl CommandClient for OctoPrintApi {
    async fn send(&self, plugin_id: &str, command: &str, params: Value) -> ApiResult<CommandResult> {
        let url = self.plugin_url(plugin_id)?;
        let body = command_body(command, params);
        debug!(%url, command, "Sending plugin command");

        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!(command, %status, "Plugin command rejected by host");
            return Err(ApiError::from_status(status, text));
        }

        let data: Value = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;
        CommandResult::from_value(data)
    }
}

/// `{"command": name, ...params}`; non-object params are dropped.
fn command_body(command: &str, params: Value) -> Value {
    let mut body = Map::new();
    body.insert("command".to_string(), Value::String(command.to_string()));
    match params {
        Value::Object(map) => body.extend(map),
        Value::Null => {}
        other => debug!("Ignoring non-object params for {command}: {other}"),
    }
    Value::Object(body)
}

fn normalize_base_url(raw: &str) -> ApiResult<Url> {
    let mut url = Url::parse(raw.trim())?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn api(base: &str) -> OctoPrintApi {
        OctoPrintApi::new(base, "key", Duration::from_secs(1)).expect("valid url")
    }

    #[test]
    fn plugin_url_on_bare_host() {
        let url = api("http://octopi.local").plugin_url("clothopus").expect("url");
        assert_eq!(url.as_str(), "http://octopi.local/api/plugin/clothopus");
    }

    #[test]
    fn plugin_url_keeps_reverse_proxy_prefix() {
        let url = api("https://printers.lan/octoprint")
            .plugin_url("clothopus")
            .expect("url");
        assert_eq!(url.as_str(), "https://printers.lan/octoprint/api/plugin/clothopus");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(matches!(
            OctoPrintApi::new("not a url", "", Duration::from_secs(1)),
            Err(ApiError::Url(_))
        ));
    }

    #[test]
    fn command_body_flattens_params() {
        let body = command_body("calibrate_scale", json!({"scale_id": "1", "known_weight": "200"}));
        assert_eq!(
            body,
            json!({"command": "calibrate_scale", "scale_id": "1", "known_weight": "200"})
        );
    }

    #[test]
    fn command_body_drops_scalar_params() {
        assert_eq!(command_body("noop", json!(5)), json!({"command": "noop"}));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_transport_error() {
        let api = api("http://127.0.0.1:9");
        let result = api.send("clothopus", "initialize_scale", json!({})).await;
        assert!(matches!(
            result,
            Err(ApiError::Network(_)) | Err(ApiError::Timeout(_))
        ));
    }
}
