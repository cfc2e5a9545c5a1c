use crate::error::WizardError;
use crate::notify::{Notice, Notifier};
use crate::scale_id::{ScaleId, ScaleIdGenerator};
use crate::state::{Step, WizardField, WizardState};
use loadcell_octoprint::{ApiResult, CommandClient, CommandResult, ScaleCommand};
use tokio::sync::watch;
use tracing::{debug, info, warn};

const UNKNOWN_ERROR: &str = "Unknown error";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Initialize,
    Calibrate,
}

impl CommandKind {
    fn failure_title(self) -> &'static str {
        match self {
            CommandKind::Initialize => "Scale initialization failed",
            CommandKind::Calibrate => "Scale calibration failed",
        }
    }
}

/// Identifies one outstanding request. Only the ticket the wizard is waiting
/// on may complete; anything else is a stale response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    seq: u64,
    scale_id: ScaleId,
    kind: CommandKind,
}

impl Ticket {
    pub fn scale_id(&self) -> &ScaleId {
        &self.scale_id
    }

    pub fn kind(&self) -> CommandKind {
        self.kind
    }
}

#[derive(Debug, Clone)]
pub struct PendingCommand {
    pub ticket: Ticket,
    pub command: ScaleCommand,
}

#[derive(Debug)]
pub enum Primary {
    Request(PendingCommand),
    Restarted,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Advanced(Step),
    /// The host answered with an application-level failure.
    Rejected(String),
    /// The exchange itself failed.
    Failed(String),
    Restarted,
    Discarded,
}

/// Three-step flow for registering and calibrating one scale.
///
/// Forward actions are split into `begin_*` (validates preconditions and
/// produces the command to send) and [`Wizard::complete`] (applies the
/// host's answer), so callers may run the exchange on a background task.
/// The async helpers combine both for callers that can hold `&mut self`
/// across the request.
pub struct Wizard<N: Notifier> {
    plugin_id: String,
    state: WizardState,
    visible: bool,
    pending: Option<Ticket>,
    next_seq: u64,
    ids: ScaleIdGenerator,
    notifier: N,
    store: watch::Sender<WizardState>,
}

impl<N: Notifier> Wizard<N> {
    pub fn new(plugin_id: impl Into<String>, notifier: N) -> Self {
        let (store, _) = watch::channel(WizardState::default());
        Self {
            plugin_id: plugin_id.into(),
            state: WizardState::default(),
            visible: false,
            pending: None,
            next_seq: 0,
            ids: ScaleIdGenerator::new(),
            notifier,
            store,
        }
    }

    pub fn plugin_id(&self) -> &str {
        &self.plugin_id
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn step(&self) -> Step {
        self.state.step
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn subscribe(&self) -> watch::Receiver<WizardState> {
        self.store.subscribe()
    }

    pub fn primary_text(&self) -> &'static str {
        self.state.step.primary_text()
    }

    pub fn secondary_text(&self) -> &'static str {
        self.state.step.secondary_text()
    }

    pub fn open_wizard(&mut self) {
        self.reset_for_new_scale();
        self.visible = true;
    }

    /// Hides the wizard without touching its state. An outstanding request is
    /// abandoned and its response will be discarded.
    pub fn close_wizard(&mut self) {
        if let Some(ticket) = self.pending.take() {
            debug!(scale_id = %ticket.scale_id, "Abandoning in-flight request");
        }
        self.visible = false;
    }

    pub fn reset_for_new_scale(&mut self) {
        if let Some(ticket) = self.pending.take() {
            debug!(scale_id = %ticket.scale_id, "Abandoning in-flight request");
        }
        self.state = WizardState::default();
        self.publish();
    }

    pub fn secondary_action(&mut self) {
        match self.state.step {
            Step::Identify | Step::Calibrate => self.close_wizard(),
            Step::Confirm => self.close_wizard(),
        }
    }

    pub fn primary_action(&mut self) -> Result<Primary, WizardError> {
        if self.pending.is_some() {
            return Err(WizardError::Busy);
        }
        match self.state.step {
            Step::Identify => self.begin_initialize().map(Primary::Request),
            Step::Calibrate => self.begin_calibrate().map(Primary::Request),
            Step::Confirm => {
                self.reset_for_new_scale();
                Ok(Primary::Restarted)
            }
        }
    }

    pub fn begin_initialize(&mut self) -> Result<PendingCommand, WizardError> {
        self.ensure_ready(Step::Identify)?;
        let scale_id = self.ids.next_id();
        let command = ScaleCommand::InitializeScale {
            scale_id: scale_id.to_string(),
            pins: self.state.pins.clone(),
        };
        info!(scale_id = %scale_id, "Initializing scale");
        Ok(self.track(scale_id, CommandKind::Initialize, command))
    }

    pub fn begin_calibrate(&mut self) -> Result<PendingCommand, WizardError> {
        self.ensure_ready(Step::Calibrate)?;
        let scale_id = self
            .state
            .scale_id
            .clone()
            .ok_or(WizardError::MissingScaleId)?;
        let command = ScaleCommand::CalibrateScale {
            scale_id: scale_id.to_string(),
            known_weight: self.state.reference_weight.clone(),
        };
        info!(scale_id = %scale_id, "Calibrating scale");
        Ok(self.track(scale_id, CommandKind::Calibrate, command))
    }

    /// Applies the host's answer to the request identified by `ticket`.
    pub fn complete(&mut self, ticket: Ticket, response: ApiResult<CommandResult>) -> Outcome {
        if self.pending.as_ref() != Some(&ticket) {
            debug!(scale_id = %ticket.scale_id, kind = ?ticket.kind, "Discarding stale response");
            return Outcome::Discarded;
        }
        self.pending = None;

        let result = match response {
            Ok(result) => result,
            Err(e) => {
                warn!(kind = ?ticket.kind, "Scale command failed: {e}");
                let message = e.user_message().to_string();
                self.report(ticket.kind, &message);
                self.publish();
                return Outcome::Failed(message);
            }
        };

        let outcome = match ticket.kind {
            CommandKind::Initialize if result.has_truthy_success() => {
                self.state.scale_id = Some(ticket.scale_id);
                self.advance(Step::Calibrate)
            }
            CommandKind::Calibrate if !result.is_explicit_failure() => {
                self.state.last_result = Some(result.into_map());
                self.advance(Step::Confirm)
            }
            kind => {
                let message = result.error().unwrap_or(UNKNOWN_ERROR).to_string();
                warn!(kind = ?kind, "Host rejected scale command: {message}");
                self.report(kind, &message);
                Outcome::Rejected(message)
            }
        };
        self.publish();
        outcome
    }

    pub fn set_field(&mut self, field: WizardField, value: &str) -> Result<(), WizardError> {
        self.edit(field, |text| {
            text.clear();
            text.push_str(value);
        })
    }

    pub fn push_char(&mut self, field: WizardField, c: char) -> Result<(), WizardError> {
        self.edit(field, |text| text.push(c))
    }

    pub fn pop_char(&mut self, field: WizardField) -> Result<(), WizardError> {
        self.edit(field, |text| {
            text.pop();
        })
    }

    pub async fn initialize_scale<C: CommandClient>(
        &mut self,
        client: &C,
    ) -> Result<Outcome, WizardError> {
        let pending = self.begin_initialize()?;
        Ok(self.exchange(client, pending).await)
    }

    pub async fn calibrate_scale<C: CommandClient>(
        &mut self,
        client: &C,
    ) -> Result<Outcome, WizardError> {
        let pending = self.begin_calibrate()?;
        Ok(self.exchange(client, pending).await)
    }

    /// Runs the primary action of the current step to completion.
    pub async fn submit<C: CommandClient>(&mut self, client: &C) -> Result<Outcome, WizardError> {
        match self.primary_action()? {
            Primary::Request(pending) => Ok(self.exchange(client, pending).await),
            Primary::Restarted => Ok(Outcome::Restarted),
        }
    }

    async fn exchange<C: CommandClient>(&mut self, client: &C, pending: PendingCommand) -> Outcome {
        let response = client
            .send_scale_command(&self.plugin_id, &pending.command)
            .await;
        self.complete(pending.ticket, response)
    }

    fn ensure_ready(&self, expected: Step) -> Result<(), WizardError> {
        if self.pending.is_some() {
            return Err(WizardError::Busy);
        }
        if self.state.step != expected {
            return Err(WizardError::WrongStep {
                expected,
                actual: self.state.step,
            });
        }
        Ok(())
    }

    fn track(&mut self, scale_id: ScaleId, kind: CommandKind, command: ScaleCommand) -> PendingCommand {
        self.next_seq += 1;
        let ticket = Ticket {
            seq: self.next_seq,
            scale_id,
            kind,
        };
        self.pending = Some(ticket.clone());
        PendingCommand { ticket, command }
    }

    fn advance(&mut self, to: Step) -> Outcome {
        info!(from = %self.state.step, to = %to, "Wizard advanced");
        self.state.step = to;
        Outcome::Advanced(to)
    }

    fn edit(&mut self, field: WizardField, f: impl FnOnce(&mut String)) -> Result<(), WizardError> {
        if self.pending.is_some() {
            return Err(WizardError::Busy);
        }
        if field.step() != self.state.step {
            return Err(WizardError::FieldLocked {
                field,
                step: self.state.step,
            });
        }
        f(self.state.field_mut(field));
        self.publish();
        Ok(())
    }

    fn report(&mut self, kind: CommandKind, message: &str) {
        self.notifier
            .notify(Notice::new(kind.failure_title(), message));
    }

    fn publish(&self) {
        self.store.send_replace(self.state.clone());
    }
}
