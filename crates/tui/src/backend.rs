use crate::config::Config;
use anyhow::Result;
use loadcell_octoprint::{ApiResult, CommandClient, CommandResult, OctoPrintApi, SimulatedHost};
use serde_json::Value;

/// Where plugin commands go: a real OctoPrint host or the in-process simulation.
#[derive(Clone)]
pub enum Backend {
    Live(OctoPrintApi),
    Simulated(SimulatedHost),
}

impl Backend {
    pub fn from_config(config: &Config) -> Result<Self> {
        if config.wizard.simulate {
            return Ok(Backend::Simulated(SimulatedHost::new()));
        }
        config.validate()?;
        let api = OctoPrintApi::new(
            &config.octoprint.base_url,
            config.octoprint.api_key.clone(),
            config.timeout(),
        )?;
        Ok(Backend::Live(api))
    }

    pub fn describe(&self) -> String {
        match self {
            Backend::Live(api) => api.base_url().to_string(),
            Backend::Simulated(_) => "simulated host".to_string(),
        }
    }
}

impl CommandClient for Backend {
    async fn send(&self, plugin_id: &str, command: &str, params: Value) -> ApiResult<CommandResult> {
        match self {
            Backend::Live(api) => api.send(plugin_id, command, params).await,
            Backend::Simulated(host) => host.send(plugin_id, command, params).await,
        }
    }
}
