use crate::scale_id::ScaleId;
use loadcell_octoprint::{CalibrationProfile, PinConfig};
use serde_json::{Map, Value};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Step {
    #[default]
    Identify = 1,
    Calibrate = 2,
    Confirm = 3,
}

impl Step {
    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::Identify => "Identify",
            Step::Calibrate => "Calibrate",
            Step::Confirm => "Confirm",
        }
    }

    pub fn primary_text(self) -> &'static str {
        match self {
            Step::Identify => "Next Step",
            Step::Calibrate => "Finish",
            Step::Confirm => "Add Scale",
        }
    }

    pub fn secondary_text(self) -> &'static str {
        match self {
            Step::Identify | Step::Calibrate => "Cancel",
            Step::Confirm => "Finish",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// User-editable inputs, each owned by exactly one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardField {
    DataPin,
    ClockPin,
    ReferenceWeight,
}

impl WizardField {
    pub fn step(self) -> Step {
        match self {
            WizardField::DataPin | WizardField::ClockPin => Step::Identify,
            WizardField::ReferenceWeight => Step::Calibrate,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WizardField::DataPin => "Data pin (DOUT)",
            WizardField::ClockPin => "Clock pin (PD_SCK)",
            WizardField::ReferenceWeight => "Reference weight (g)",
        }
    }
}

impl fmt::Display for WizardField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WizardState {
    pub step: Step,
    pub scale_id: Option<ScaleId>,
    pub pins: PinConfig,
    pub reference_weight: String,
    pub last_result: Option<Map<String, Value>>,
}

impl WizardState {
    pub fn field(&self, field: WizardField) -> &str {
        match field {
            WizardField::DataPin => &self.pins.data_pin,
            WizardField::ClockPin => &self.pins.clock_pin,
            WizardField::ReferenceWeight => &self.reference_weight,
        }
    }

    pub(crate) fn field_mut(&mut self, field: WizardField) -> &mut String {
        match field {
            WizardField::DataPin => &mut self.pins.data_pin,
            WizardField::ClockPin => &mut self.pins.clock_pin,
            WizardField::ReferenceWeight => &mut self.reference_weight,
        }
    }

    pub fn profile(&self) -> Option<CalibrationProfile> {
        self.last_result
            .as_ref()
            .and_then(CalibrationProfile::from_result)
    }

    pub fn is_pristine(&self) -> bool {
        *self == Self::default()
    }
}
