//! Screens with no current location: introduction, credits, questions.

use case_rules::{CaseContent, CaseState};
use tracing::debug;

use crate::outcome::{ActionSurface, Transition};
use crate::render::{IntroductionView, RenderInstruction};

/// Return to the introduction screen.
pub fn introduction(content: &CaseContent, state: &mut CaseState) -> Transition {
    state.leave_location();
    debug!("Showing introduction");

    let metadata = &content.metadata;
    let view = IntroductionView {
        title: metadata.title.clone(),
        date: metadata.date.clone(),
        intro: metadata.intro.clone(),
    };
    Transition::proceeded(vec![RenderInstruction::Introduction(view)], ActionSurface::Clear)
}

pub fn credits(content: &CaseContent, state: &mut CaseState) -> Transition {
    state.leave_location();
    Transition::proceeded(
        vec![RenderInstruction::Credits(content.credits.clone())],
        ActionSurface::Clear,
    )
}

pub fn questions(content: &CaseContent, state: &mut CaseState) -> Transition {
    state.leave_location();
    let questions = content
        .questions
        .as_ref()
        .map(|q| q.questions.clone())
        .unwrap_or_default();
    Transition::proceeded(vec![RenderInstruction::Questions(questions)], ActionSurface::Clear)
}

#[cfg(test)]
mod tests {
    use super::*;
    use case_rules::{CaseMetadata, LocationAddress, Question, Questions};

    #[test]
    fn test_introduction_leaves_location() {
        let content = CaseContent::new(CaseMetadata {
            title: Some("The Tin Soldier".to_string()),
            intro: "Holmes was reading the paper.".to_string(),
            ..Default::default()
        });
        let mut state = CaseState::new();
        let here: LocationAddress = "4 SW".parse().unwrap();
        state.enter_location(&here);

        let transition = introduction(&content, &mut state);

        assert!(state.current_location().is_none());
        assert_eq!(transition.surface, ActionSurface::Clear);
        assert_eq!(
            transition.instructions,
            vec![RenderInstruction::Introduction(IntroductionView {
                title: Some("The Tin Soldier".to_string()),
                date: None,
                intro: "Holmes was reading the paper.".to_string(),
            })]
        );
    }

    #[test]
    fn test_missing_documents_render_empty() {
        let content = CaseContent::new(CaseMetadata::default());
        let mut state = CaseState::new();

        assert_eq!(
            credits(&content, &mut state).instructions,
            vec![RenderInstruction::Credits(None)]
        );
        assert_eq!(
            questions(&content, &mut state).instructions,
            vec![RenderInstruction::Questions(Vec::new())]
        );
    }

    #[test]
    fn test_questions_in_document_order() {
        let content = CaseContent::new(CaseMetadata::default()).with_questions(Questions {
            questions: vec![
                Question {
                    number: 1,
                    question: "Who killed the footman?".to_string(),
                },
                Question {
                    number: 2,
                    question: "Why?".to_string(),
                },
            ],
        });
        let mut state = CaseState::new();

        match &questions(&content, &mut state).instructions[0] {
            RenderInstruction::Questions(list) => {
                assert_eq!(list.len(), 2);
                assert_eq!(list[0].number, 1);
            }
            other => panic!("unexpected instruction: {other:?}"),
        }
    }
}
