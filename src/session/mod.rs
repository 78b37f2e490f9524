//! One conversation: its transcript, its plant health and the turn awaiting
//! classification. All mutation goes through [`Session`].

use crate::classifier::Classification;
use crate::error::ClassifyError;
use tracing::{debug, info, warn};

pub mod health;
pub mod log;
pub mod onboarding;

use health::HealthState;
use log::ConversationLog;
use onboarding::OnboardingScript;

pub const FALLBACK_REPLY: &str =
    "I'm having a little trouble responding right now. Could you tell me more about that thought?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MessageId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Therapist,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Conversation,
    Onboarding,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: MessageId,
    pub text: String,
    pub sender: Sender,
    pub kind: MessageKind,
}

impl Message {
    pub fn is_onboarding(&self) -> bool {
        self.kind == MessageKind::Onboarding
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TurnId(pub u64);

/// A submitted message waiting for its classification.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingTurn {
    pub id: TurnId,
    pub text: String,
    pub health: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejected {
    Empty,
    Busy,
}

#[derive(Debug)]
pub struct Session {
    log: ConversationLog,
    health: HealthState,
    onboarding: OnboardingScript,
    guided_onboarding: bool,
    pending: Option<TurnId>,
    next_turn: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(OnboardingScript::default(), false)
    }
}

impl Session {
    pub fn new(onboarding: OnboardingScript, guided_onboarding: bool) -> Self {
        let mut session = Self {
            log: ConversationLog::default(),
            health: HealthState::default(),
            onboarding,
            guided_onboarding,
            pending: None,
            next_turn: 0,
        };
        if session.log.is_empty() {
            if let Some(intro) = session.onboarding.current() {
                let intro = intro.to_string();
                session.log.append(Sender::Therapist, intro, MessageKind::Onboarding);
            }
        }
        session
    }

    pub fn messages(&self) -> &[Message] {
        self.log.all()
    }

    pub fn health(&self) -> f64 {
        self.health.current()
    }

    #[cfg(test)]
    pub fn onboarding_step(&self) -> usize {
        self.onboarding.step()
    }

    pub fn is_composing(&self) -> bool {
        self.pending.is_some()
    }

    pub fn adjust_health(&mut self, delta: f64) -> f64 {
        let before = self.health.current();
        let after = self.health.adjust(delta);
        debug!(before, delta, after, "health adjusted");
        after
    }

    /// Moves health to `target` through the clamped adjustment.
    pub fn set_health(&mut self, target: f64) -> f64 {
        let delta = target - self.health.current();
        self.adjust_health(delta)
    }

    pub fn submit(&mut self, text: &str) -> Result<PendingTurn, SubmitRejected> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SubmitRejected::Empty);
        }
        if self.pending.is_some() {
            return Err(SubmitRejected::Busy);
        }

        self.log.append(Sender::User, text, MessageKind::Conversation);
        let id = TurnId(self.next_turn);
        self.next_turn += 1;
        self.pending = Some(id);

        Ok(PendingTurn {
            id,
            text: text.to_string(),
            health: self.health.current(),
        })
    }

    /// Applies the classification for `turn`. Returns `false` when the turn is
    /// not the one in flight and the result was dropped.
    pub fn complete(
        &mut self,
        turn: TurnId,
        outcome: Result<Classification, ClassifyError>,
    ) -> bool {
        if self.pending != Some(turn) {
            warn!(turn = turn.0, "dropping result for a turn that is not in flight");
            return false;
        }
        self.pending = None;

        match outcome {
            Ok(classification) => {
                let health = self.adjust_health(classification.delta);
                info!(
                    turn = turn.0,
                    delta = classification.delta,
                    score = ?classification.score,
                    health,
                    "turn classified"
                );
                let reply = if classification.reply.trim().is_empty() {
                    FALLBACK_REPLY.to_string()
                } else {
                    classification.reply
                };
                self.log.append(Sender::Therapist, reply, MessageKind::Conversation);
                self.advance_onboarding(classification.delta);
            }
            Err(err) => {
                warn!(turn = turn.0, error = %err, "classification failed; replying with fallback");
                self.log.append(Sender::Therapist, FALLBACK_REPLY, MessageKind::Conversation);
            }
        }
        true
    }

    fn advance_onboarding(&mut self, delta: f64) {
        if !self.guided_onboarding || !self.onboarding.expects(delta) {
            return;
        }
        if let Some(next) = self.onboarding.advance() {
            let next = next.to_string();
            info!(step = self.onboarding.step(), "onboarding advanced");
            self.log.append(Sender::Therapist, next, MessageKind::Onboarding);
        }
    }
}
