use chrono::{DateTime, Utc};
use loadcell_octoprint::{ApiResult, CalibrationProfile, CommandResult, PinConfig};
use loadcell_wizard::Ticket;

pub enum AppAsyncEvent {
    ScaleCommandFinished {
        ticket: Ticket,
        response: ApiResult<CommandResult>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum HostStatus {
    Unknown,
    Connected { server: String, api: String },
    Unreachable,
    Simulated,
}

impl HostStatus {
    pub fn label(&self) -> String {
        match self {
            HostStatus::Unknown => "checking...".to_string(),
            HostStatus::Connected { server, api } => format!("OctoPrint {server} (API {api})"),
            HostStatus::Unreachable => "unreachable".to_string(),
            HostStatus::Simulated => "simulated".to_string(),
        }
    }
}

/// A scale that finished calibration during this session.
#[derive(Debug, Clone)]
pub struct CalibratedScale {
    pub scale_id: String,
    pub pins: PinConfig,
    pub profile: Option<CalibrationProfile>,
    pub calibrated_at: DateTime<Utc>,
}

impl CalibratedScale {
    pub fn summary(&self) -> String {
        let factor = self
            .profile
            .as_ref()
            .map(|p| format!("scale {:.3}, offset {:.1}", p.scale, p.offset))
            .unwrap_or_else(|| "no profile returned".to_string());
        format!(
            "#{}  DOUT {} / PD_SCK {}  {}  ({})",
            self.scale_id,
            self.pins.data_pin,
            self.pins.clock_pin,
            factor,
            self.calibrated_at.format("%H:%M:%S")
        )
    }
}
