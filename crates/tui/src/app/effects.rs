use super::*;

impl App {
    pub async fn init(&mut self) -> Result<()> {
        let backend = self.backend.clone();
        self.host_status = match backend {
            Backend::Simulated(_) => HostStatus::Simulated,
            Backend::Live(api) => match api.server_version().await {
                Ok(version) => HostStatus::Connected {
                    server: version.server,
                    api: version.api,
                },
                Err(e) => {
                    self.report_error("Could not reach OctoPrint", e.user_message());
                    tracing::warn!("Version check failed: {e}");
                    HostStatus::Unreachable
                }
            },
        };
        self.is_loading = false;
        Ok(())
    }

    pub fn process_events(&mut self) {
        let mut async_events = Vec::new();
        if let Some(ref mut rx) = self.app_async_rx {
            while let Ok(event) = rx.try_recv() {
                async_events.push(event);
            }
        }

        for event in async_events {
            match event {
                AppAsyncEvent::ScaleCommandFinished { ticket, response } => {
                    match self.wizard.complete(ticket, response) {
                        Outcome::Advanced(Step::Calibrate) => {
                            self.focus.reset();
                            self.clear_error();
                        }
                        Outcome::Advanced(Step::Confirm) => {
                            self.record_calibration();
                            self.clear_error();
                        }
                        Outcome::Advanced(_) | Outcome::Restarted => {}
                        Outcome::Rejected(_) | Outcome::Failed(_) => {}
                        Outcome::Discarded => {
                            tracing::debug!("Late response ignored");
                        }
                    }
                }
            }
        }

        while let Ok(notice) = self.notice_rx.try_recv() {
            self.report_error(&notice.title, notice.message);
        }
    }
}
