use loadcell_wizard::{Step, WizardField};

const IDENTIFY_FIELDS: [WizardField; 2] = [WizardField::DataPin, WizardField::ClockPin];

/// Which wizard field receives typed characters.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FieldFocus {
    selected: usize,
}

impl FieldFocus {
    pub fn field(&self, step: Step) -> Option<WizardField> {
        match step {
            Step::Identify => Some(IDENTIFY_FIELDS[self.selected % IDENTIFY_FIELDS.len()]),
            Step::Calibrate => Some(WizardField::ReferenceWeight),
            Step::Confirm => None,
        }
    }

    pub fn toggle(&mut self) {
        self.selected = (self.selected + 1) % IDENTIFY_FIELDS.len();
    }

    pub fn reset(&mut self) {
        self.selected = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggles_between_pins_on_identify() {
        let mut focus = FieldFocus::default();
        assert_eq!(focus.field(Step::Identify), Some(WizardField::DataPin));
        focus.toggle();
        assert_eq!(focus.field(Step::Identify), Some(WizardField::ClockPin));
        focus.toggle();
        assert_eq!(focus.field(Step::Identify), Some(WizardField::DataPin));
    }

    #[test]
    fn other_steps_have_fixed_focus() {
        let mut focus = FieldFocus::default();
        focus.toggle();
        assert_eq!(
            focus.field(Step::Calibrate),
            Some(WizardField::ReferenceWeight)
        );
        assert_eq!(focus.field(Step::Confirm), None);
    }
}
