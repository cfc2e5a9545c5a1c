use super::*;

pub struct App {
    pub should_quit: bool,
    pub config: Config,
    pub backend: Backend,
    pub wizard: Wizard<mpsc::UnboundedSender<Notice>>,
    pub focus: FieldFocus,
    pub keybinds: Keybinds,
    pub host_status: HostStatus,
    pub calibrated: Vec<CalibratedScale>,
    pub notice_rx: mpsc::UnboundedReceiver<Notice>,
    pub app_async_tx: Option<mpsc::UnboundedSender<AppAsyncEvent>>,
    pub app_async_rx: Option<mpsc::UnboundedReceiver<AppAsyncEvent>>,
    pub show_help: bool,
    pub is_loading: bool,
    pub loading_message: String,
    pub last_error: Option<String>,
    pub show_error_details: bool,
}

impl App {
    pub fn new(config: Config, backend: Backend) -> Self {
        let (notice_tx, notice_rx) = mpsc::unbounded_channel();
        let (app_async_tx, app_async_rx) = mpsc::unbounded_channel();
        let wizard = Wizard::new(config.octoprint.plugin_id.clone(), notice_tx);

        Self {
            should_quit: false,
            config,
            backend,
            wizard,
            focus: FieldFocus::default(),
            keybinds: Keybinds,
            host_status: HostStatus::Unknown,
            calibrated: Vec::new(),
            notice_rx,
            app_async_tx: Some(app_async_tx),
            app_async_rx: Some(app_async_rx),
            show_help: false,
            is_loading: true,
            loading_message: "Connecting to OctoPrint...".to_string(),
            last_error: None,
            show_error_details: false,
        }
    }
}
