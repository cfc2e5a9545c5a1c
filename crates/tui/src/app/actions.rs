use super::*;

impl App {
    pub(super) fn open_wizard(&mut self) {
        self.wizard.open_wizard();
        self.focus.reset();
        self.clear_error();
    }

    pub(super) fn submit_primary(&mut self) {
        match self.wizard.primary_action() {
            Ok(Primary::Request(pending)) => {
                let backend = self.backend.clone();
                let plugin_id = self.wizard.plugin_id().to_string();
                self.spawn_app_task(async move {
                    let response = backend
                        .send_scale_command(&plugin_id, &pending.command)
                        .await;
                    AppAsyncEvent::ScaleCommandFinished {
                        ticket: pending.ticket,
                        response,
                    }
                });
            }
            Ok(Primary::Restarted) => {
                self.focus.reset();
                self.clear_error();
            }
            Err(WizardError::Busy) => {
                tracing::debug!("Ignoring submit while a request is in flight");
            }
            Err(e) => self.report_error("Cannot continue", e),
        }
    }

    pub(super) fn submit_secondary(&mut self) {
        self.wizard.secondary_action();
        self.focus.reset();
    }

    /// Types `c` into the focused field, or deletes its last character on `None`.
    pub(super) fn edit_focused(&mut self, c: Option<char>) {
        let Some(field) = self.focus.field(self.wizard.step()) else {
            return;
        };
        let result = match c {
            Some(c) => self.wizard.push_char(field, c),
            None => self.wizard.pop_char(field),
        };
        if let Err(e) = result {
            tracing::debug!("Edit ignored: {e}");
        }
    }

    pub(super) fn record_calibration(&mut self) {
        let state = self.wizard.state();
        let Some(scale_id) = state.scale_id.as_ref() else {
            return;
        };
        self.calibrated.push(CalibratedScale {
            scale_id: scale_id.to_string(),
            pins: state.pins.clone(),
            profile: state.profile(),
            calibrated_at: Utc::now(),
        });
    }
}
