pub mod controller;
pub mod error;
pub mod notify;
pub mod scale_id;
pub mod state;

pub use controller::{CommandKind, Outcome, PendingCommand, Primary, Ticket, Wizard};
pub use error::WizardError;
pub use notify::{Notice, Notifier};
pub use scale_id::{ScaleId, ScaleIdGenerator};
pub use state::{Step, WizardField, WizardState};
