use crate::error::ApiResult;
use crate::types::{CommandResult, ScaleCommand};
use serde_json::Value;
use std::future::Future;

/// A request/response channel to a plugin's command endpoint.
///
/// Implementations resolve `Err` only for transport failures. A payload with
/// `"success": false` is still a successful exchange.
pub trait CommandClient: Send + Sync {
    fn send(
        &self,
        plugin_id: &str,
        command: &str,
        params: Value,
    ) -> impl Future<Output = ApiResult<CommandResult>> + Send;

    fn send_scale_command(
        &self,
        plugin_id: &str,
        command: &ScaleCommand,
    ) -> impl Future<Output = ApiResult<CommandResult>> + Send {
        self.send(plugin_id, command.name(), command.params())
    }
}
