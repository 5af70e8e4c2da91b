//! Render instructions - the only thing the engine hands to a front-end.
//!
//! The engine never produces markup. Each operation yields an ordered list of
//! [`RenderInstruction`]s which a [`Renderer`] turns into whatever the
//! front-end displays.

mod view;

pub use view::*;

use case_rules::{Clue, Credits, LocationAddress, Question};
use serde::{Deserialize, Serialize};

use crate::score::ScoreReport;

/// Severity of a transient notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

/// A transient, player-visible notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// How a text fragment should be set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Emphasis {
    /// Narrative text.
    Plain,
    /// A prompt or hint, typically shown in italics.
    Prompt,
}

/// The introduction screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntroductionView {
    pub title: Option<String>,
    pub date: Option<String>,
    pub intro: String,
}

/// One instruction for the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderInstruction {
    /// Start a new screen titled with this heading.
    Heading(String),
    Text { text: String, emphasis: Emphasis },
    Separator,
    Notice(Notice),
    ClueFound(Clue),
    LocationLocked(LocationAddress),
    /// Replace the action surface with these actions.
    PresentActions(Vec<ActionView>),
    /// Same actions as before with recomputed `disabled` markers.
    RefreshActions(Vec<ActionView>),
    ClearActions,
    Introduction(IntroductionView),
    Credits(Option<Credits>),
    Questions(Vec<Question>),
    Score(Box<ScoreReport>),
    /// The session cannot continue.
    TerminalError(String),
}

impl RenderInstruction {
    pub fn text(text: impl Into<String>) -> Self {
        RenderInstruction::Text {
            text: text.into(),
            emphasis: Emphasis::Plain,
        }
    }

    pub fn prompt(text: impl Into<String>) -> Self {
        RenderInstruction::Text {
            text: text.into(),
            emphasis: Emphasis::Prompt,
        }
    }
}

impl From<Notice> for RenderInstruction {
    fn from(notice: Notice) -> Self {
        RenderInstruction::Notice(notice)
    }
}

/// A front-end that displays render instructions.
pub trait Renderer {
    fn render(&mut self, instruction: &RenderInstruction);
}

/// Collects instructions, mostly useful in tests.
impl Renderer for Vec<RenderInstruction> {
    fn render(&mut self, instruction: &RenderInstruction) {
        self.push(instruction.clone());
    }
}
