//! Wizard session state machine.
//!
//! The interactive flow is modeled as an explicit machine instead of a pile
//! of booleans: a [`Session`] owns the form and the current [`Phase`], and
//! [`Session::apply`] is a pure transition function over [`Event`]s. The
//! render states are mutually exclusive by construction — a session is
//! showing the form, the loading notice, the error panel, or the result
//! panel, never a mix.
//!
//! The only suspending operation lives in [`run_generation`], which couples
//! the `Pending` phase to exactly one [`GenerateAsync`] call. While that
//! call is awaited the driver reads no input, so resubmission is impossible
//! mid-flight.

use tracing::{debug, info, warn};

use crate::api::GenerateAsync;
use crate::models::EpisodeForm;
use crate::prompt::build_prompt;

/// The mutually exclusive render states of a wizard session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing collected yet.
    #[default]
    Idle,
    /// Collecting host/guest identity fields and the specialization.
    Stage1,
    /// Collecting the episode title and the three section names.
    Stage2,
    /// A generation call is in flight.
    Pending,
    /// The generation call failed; carries the user-facing message.
    Failed(String),
    /// The generation call succeeded; carries the raw outline text.
    Completed(String),
}

/// Everything that can move a session between phases.
#[derive(Debug, Clone)]
pub enum Event {
    /// Start filling the form.
    Begin,
    /// Stage-1 fields are in; move on to the topics form.
    AdvanceToTopics,
    /// Submit the complete form for generation.
    Submit,
    /// The generation call returned outline text.
    Succeeded(String),
    /// The generation call failed with a message.
    Failed(String),
    /// From the error panel: back to the topics form, fields retained.
    Retry,
    /// Discard everything and return to the initial state.
    Reset,
}

/// One wizard session: the form being filled plus the current phase.
///
/// The outline text and the error message live inside the phase, so
/// clearing them is a phase change, not a separate bookkeeping step.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub phase: Phase,
    pub form: EpisodeForm,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an event, returning the updated session.
    ///
    /// Pure: no I/O, no side effects beyond the returned value. Events
    /// that make no sense in the current phase leave it unchanged —
    /// notably `AdvanceToTopics` before stage 1 is complete and `Submit`
    /// on an incomplete form. A successful `Submit` discards any previous
    /// error or result carried by the phase.
    pub fn apply(mut self, event: Event) -> Session {
        self.phase = match (self.phase, event) {
            (Phase::Idle, Event::Begin) => Phase::Stage1,
            (Phase::Stage1, Event::AdvanceToTopics) if self.form.stage1_complete() => {
                Phase::Stage2
            }
            (Phase::Stage2, Event::Submit) if self.form.is_complete() => Phase::Pending,
            (Phase::Pending, Event::Succeeded(text)) => Phase::Completed(text),
            (Phase::Pending, Event::Failed(message)) => Phase::Failed(message),
            (Phase::Failed(_), Event::Retry) => Phase::Stage2,
            (_, Event::Reset) => {
                self.form = EpisodeForm::default();
                Phase::Idle
            }
            (phase, event) => {
                debug!(?phase, ?event, "Ignoring event in current phase");
                phase
            }
        };
        self
    }
}

/// Drive the `Pending` phase through exactly one generation call.
///
/// A no-op for any other phase. Freezes the form, builds the prompt, and
/// awaits the generator once; the outcome is applied as `Succeeded` or
/// `Failed`. This is the single suspension point of the whole wizard.
pub async fn run_generation<G>(session: Session, generator: &G) -> Session
where
    G: GenerateAsync<Response = String>,
{
    if !matches!(session.phase, Phase::Pending) {
        return session;
    }

    let Some(inputs) = session.form.freeze() else {
        // Unreachable through `apply` (Submit is guarded), kept total.
        warn!("Pending session with incomplete form");
        return session.apply(Event::Failed(
            "el formulario quedó incompleto; vuelve a intentarlo".to_string(),
        ));
    };

    let prompt = build_prompt(&inputs);
    info!(episode = %inputs.episode_title, prompt_bytes = prompt.len(), "Requesting outline");

    match generator.generate(&prompt).await {
        Ok(text) => {
            info!(bytes = text.len(), "Outline received");
            session.apply(Event::Succeeded(text))
        }
        Err(e) => {
            warn!(error = %e, "Outline generation failed");
            session.apply(Event::Failed(e.to_string()))
        }
    }
}
