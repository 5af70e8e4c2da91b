//! Operation outcomes: proceed, reject with a notice, or abort with a diagnostic.

use case_rules::{Action, ActionId, LocationAddress, SequenceId};
use thiserror::Error;

use crate::render::{Notice, RenderInstruction, Renderer};

/// A content-integrity problem. Logged, never shown to the player.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    #[error("location data not found for {0}")]
    UnknownLocation(LocationAddress),

    #[error("sequence {sequence} not found for location {location}")]
    UnknownSequence {
        location: LocationAddress,
        sequence: SequenceId,
    },

    #[error("sequence {0} triggered with no current location")]
    NoCurrentLocation(SequenceId),

    #[error("action {0} is not currently available")]
    UnknownAction(ActionId),
}

/// How an operation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Proceeded,
    /// Player-input error; state untouched, notice shown.
    Rejected(Notice),
    /// Content-integrity error; the operation stopped.
    Aborted(Diagnostic),
}

/// What a transition does to the presented actions.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ActionSurface {
    #[default]
    Keep,
    Replace(Vec<Action>),
    Clear,
}

/// The result of one engine step, before the session applies it.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub outcome: Outcome,
    pub instructions: Vec<RenderInstruction>,
    pub surface: ActionSurface,
    /// Disabled markers of the presented actions may have changed.
    pub refresh: bool,
}

impl Transition {
    pub fn proceeded(instructions: Vec<RenderInstruction>, surface: ActionSurface) -> Self {
        Self {
            outcome: Outcome::Proceeded,
            instructions,
            surface,
            refresh: false,
        }
    }

    pub fn rejected(notice: Notice) -> Self {
        Self {
            instructions: vec![RenderInstruction::Notice(notice.clone())],
            outcome: Outcome::Rejected(notice),
            surface: ActionSurface::Keep,
            refresh: false,
        }
    }

    pub fn aborted(diagnostic: Diagnostic) -> Self {
        Self {
            outcome: Outcome::Aborted(diagnostic),
            instructions: Vec::new(),
            surface: ActionSurface::Keep,
            refresh: false,
        }
    }

    pub fn with_refresh(mut self, refresh: bool) -> Self {
        self.refresh = refresh;
        self
    }
}

/// What a public session operation returns to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub outcome: Outcome,
    pub instructions: Vec<RenderInstruction>,
}

impl Response {
    pub fn is_proceeded(&self) -> bool {
        matches!(self.outcome, Outcome::Proceeded)
    }

    /// Hand every instruction to a renderer, in order.
    pub fn render_to<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        for instruction in &self.instructions {
            renderer.render(instruction);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_carries_notice_instruction() {
        let transition = Transition::rejected(Notice::error("You cannot return to 68 WC."));

        assert!(matches!(transition.outcome, Outcome::Rejected(_)));
        assert_eq!(
            transition.instructions,
            vec![RenderInstruction::Notice(Notice::error("You cannot return to 68 WC."))]
        );
        assert_eq!(transition.surface, ActionSurface::Keep);
    }

    #[test]
    fn test_aborted_renders_nothing() {
        let address: LocationAddress = "1 WC".parse().unwrap();
        let transition = Transition::aborted(Diagnostic::UnknownLocation(address));

        assert!(transition.instructions.is_empty());
        assert_eq!(
            transition.outcome,
            Outcome::Aborted(Diagnostic::UnknownLocation("1 WC".parse().unwrap()))
        );
    }

    #[test]
    fn test_render_to_preserves_order() {
        let response = Response {
            outcome: Outcome::Proceeded,
            instructions: vec![RenderInstruction::text("one"), RenderInstruction::Separator],
        };

        let mut collected: Vec<RenderInstruction> = Vec::new();
        response.render_to(&mut collected);
        assert_eq!(collected, response.instructions);
    }
}
