use tokio::sync::mpsc;

/// A user-facing failure report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

pub trait Notifier {
    fn notify(&mut self, notice: Notice);
}

impl Notifier for Vec<Notice> {
    fn notify(&mut self, notice: Notice) {
        self.push(notice);
    }
}

impl Notifier for mpsc::UnboundedSender<Notice> {
    fn notify(&mut self, notice: Notice) {
        if self.send(notice).is_err() {
            tracing::debug!("Notice dropped, no receiver");
        }
    }
}
