use crate::answer::ERROR_PREFIX;
use crate::config::Input;
use crate::gateway::AnswerGateway;
use askbot_core::{Transcript, Turn};
use tracing::{debug, warn};

/// Where the loop is between two inputs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExchangeState {
    #[default]
    Idle,
    AwaitingAnswer,
}

/// Result of feeding one input to a [`Conversation`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// Blank input; nothing recorded.
    Ignored,
    /// An end-session keyword; nothing recorded and the caller should stop.
    Ended,
    /// A question went out and this assistant turn was recorded for it.
    Answered { turn: Turn, failed: bool },
}

impl Step {
    pub fn is_ended(&self) -> bool {
        matches!(self, Step::Ended)
    }
}

/// The transcript of one session plus the two-state exchange machine.
///
/// `submit` takes `&mut self` across the provider call, so a conversation
/// can never have two questions in flight.
#[derive(Debug, Default)]
pub struct Conversation {
    transcript: Transcript,
    state: ExchangeState,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn state(&self) -> ExchangeState {
        self.state
    }

    /// Explicit user reset.
    pub fn clear(&mut self) {
        self.transcript.clear();
        self.state = ExchangeState::Idle;
    }

    pub async fn submit(&mut self, gateway: &AnswerGateway, input: Input) -> Step {
        match input {
            Input::Empty => Step::Ignored,
            Input::EndSession => Step::Ended,
            Input::Question(question) => self.exchange(gateway, question).await,
        }
    }

    async fn exchange(&mut self, gateway: &AnswerGateway, question: String) -> Step {
        if question.trim().is_empty() {
            return Step::Ignored;
        }

        self.recover_interrupted();

        self.transcript.append(Turn::user(question.as_str()));
        self.state = ExchangeState::AwaitingAnswer;

        let answer = gateway.answer(&question).await;

        let turn = if answer.failed {
            Turn::assistant_failure(answer.text)
        } else {
            Turn::assistant(answer.text)
        };
        self.transcript.append(turn.clone());
        self.state = ExchangeState::Idle;

        debug!(turns = self.transcript.len(), failed = answer.failed, "exchange complete");
        Step::Answered {
            turn,
            failed: answer.failed,
        }
    }

    // A dropped `submit` future leaves a user turn with no reply; close it
    // so user/assistant turns keep alternating.
    fn recover_interrupted(&mut self) {
        if self.state == ExchangeState::AwaitingAnswer {
            warn!("previous question was interrupted before an answer arrived");
            self.transcript.append(Turn::assistant_failure(format!(
                "{}question was interrupted before an answer arrived",
                ERROR_PREFIX
            )));
            self.state = ExchangeState::Idle;
        }
    }
}
