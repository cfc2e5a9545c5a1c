use crate::state::{Step, WizardField};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("Action belongs to step {expected}, wizard is at step {actual}")]
    WrongStep { expected: Step, actual: Step },

    #[error("No scale has been initialized yet")]
    MissingScaleId,

    #[error("A request is already in progress")]
    Busy,

    #[error("{field} cannot be edited at step {step}")]
    FieldLocked { field: WizardField, step: Step },
}
