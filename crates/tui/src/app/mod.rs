use crate::backend::Backend;
use crate::input::FieldFocus;
use crate::keybinds::Keybinds;
use crate::Config;
use anyhow::Result;
use chrono::Utc;
use loadcell_octoprint::CommandClient;
use loadcell_wizard::{Notice, Outcome, Primary, Step, Wizard, WizardError};
use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::Frame;
use std::future::Future;
use tokio::sync::mpsc;

mod actions;
mod effects;
mod input;
mod render;
mod state;
mod types;

pub use state::App;
pub use types::{AppAsyncEvent, CalibratedScale, HostStatus};

impl App {
    pub(super) fn report_error(&mut self, context: &str, error: impl std::fmt::Display) {
        let message = format!("{context}: {}", self.redact_sensitive(&error.to_string()));
        self.last_error = Some(message.clone());
        tracing::warn!("{message}");
    }

    pub(super) fn clear_error(&mut self) {
        self.last_error = None;
        self.show_error_details = false;
    }

    fn redact_sensitive(&self, input: &str) -> String {
        let key = &self.config.octoprint.api_key;
        if key.is_empty() {
            input.to_string()
        } else {
            input.replace(key.as_str(), "[REDACTED]")
        }
    }

    pub(super) fn spawn_app_task<F>(&self, future: F)
    where
        F: Future<Output = AppAsyncEvent> + Send + 'static,
    {
        if let Some(tx) = self.app_async_tx.clone() {
            tokio::spawn(async move {
                let event = future.await;
                let _ = tx.send(event);
            });
        }
    }
}
