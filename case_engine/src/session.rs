//! `CaseSession` - one play-through of a case.
//!
//! The session owns the mutable [`CaseState`], borrows nothing, and is the only
//! place where transitions are turned into responses. Every public operation
//! runs to completion before returning.

use case_rules::{
    Action, ActionId, CaseContent, CaseState, Clue, LocationAddress, ScoringRules,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use crate::outcome::{ActionSurface, Diagnostic, Outcome, Response, Transition};
use crate::render::{present, RenderInstruction, Renderer};
use crate::score::{calculate_score, CaseConclusion};
use crate::{resolver, screens, visit};

/// Identifies a session in log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Visit(LocationAddress),
    ChooseAction(ActionId),
    RequestScore,
    RequestIntro,
    RequestCredits,
    RequestQuestions,
}

/// One address in the location picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationListing {
    pub address: LocationAddress,
    pub visited: bool,
    pub locked: bool,
}

/// All addresses of one district, numerically ordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistrictListing {
    pub district: String,
    pub locations: Vec<LocationListing>,
}

/// Status bar snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// Every clue of the alphabet with whether it has been found.
    pub clues: Vec<(Clue, bool)>,
    pub leads_followed: u32,
}

pub struct CaseSession {
    id: SessionId,
    content: CaseContent,
    scoring: ScoringRules,
    state: CaseState,
    presented: Vec<Action>,
}

impl CaseSession {
    pub fn new(content: CaseContent, scoring: ScoringRules) -> Self {
        let id = SessionId::new();
        info!(
            session = %id,
            locations = content.location_count(),
            "Starting case session"
        );
        Self {
            id,
            content,
            scoring,
            state: CaseState::new(),
            presented: Vec::new(),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn state(&self) -> &CaseState {
        &self.state
    }

    pub fn content(&self) -> &CaseContent {
        &self.content
    }

    /// Actions currently on the action surface.
    pub fn presented_actions(&self) -> &[Action] {
        &self.presented
    }

    pub fn visit(&mut self, address: &LocationAddress) -> Response {
        info!(session = %self.id, %address, "Visit requested");
        let transition = visit::visit(&self.content, &mut self.state, address);
        self.apply(transition)
    }

    /// Pick a presented action, or one of the sub-choices of a presented action.
    pub fn choose_action(&mut self, id: &ActionId) -> Response {
        let Some(action) = self.presented.iter().find(|action| action.answers_to(id)) else {
            let diagnostic = Diagnostic::UnknownAction(id.clone());
            error!(session = %self.id, %diagnostic, "Action aborted");
            return self.apply(Transition::aborted(diagnostic));
        };

        info!(session = %self.id, action = %id, "Action chosen");
        let consequences = action.consequences.clone();
        let transition = resolver::resolve(&self.content, &mut self.state, id, &consequences);
        self.apply(transition)
    }

    pub fn request_score(&mut self) -> Response {
        self.state.leave_location();
        let report = calculate_score(self.state.flags(), self.state.leads_followed(), &self.scoring)
            .with_conclusion(CaseConclusion::new(&self.content.metadata, self.scoring.master_score));
        info!(
            session = %self.id,
            total = report.total,
            rating = %report.rating,
            "Case scored"
        );

        self.apply(Transition::proceeded(
            vec![RenderInstruction::Score(Box::new(report))],
            ActionSurface::Clear,
        ))
    }

    pub fn request_intro(&mut self) -> Response {
        let transition = screens::introduction(&self.content, &mut self.state);
        self.apply(transition)
    }

    pub fn request_credits(&mut self) -> Response {
        let transition = screens::credits(&self.content, &mut self.state);
        self.apply(transition)
    }

    pub fn request_questions(&mut self) -> Response {
        let transition = screens::questions(&self.content, &mut self.state);
        self.apply(transition)
    }

    /// The location picker, with visited and locked markers from state.
    pub fn directory(&self) -> Vec<DistrictListing> {
        self.content
            .addresses_by_district()
            .into_iter()
            .map(|(district, addresses)| DistrictListing {
                district: district.to_string(),
                locations: addresses
                    .into_iter()
                    .map(|address| LocationListing {
                        address: address.clone(),
                        visited: self.state.is_visited(address),
                        locked: self.state.is_locked(address),
                    })
                    .collect(),
            })
            .collect()
    }

    pub fn progress(&self) -> Progress {
        Progress {
            clues: Clue::ALL
                .iter()
                .map(|&clue| (clue, self.state.holds_clue(clue)))
                .collect(),
            leads_followed: self.state.leads_followed(),
        }
    }

    /// Run a command and hand its instructions to `renderer`.
    pub fn dispatch<R: Renderer + ?Sized>(&mut self, command: Command, renderer: &mut R) -> Outcome {
        let response = match command {
            Command::Visit(address) => self.visit(&address),
            Command::ChooseAction(id) => self.choose_action(&id),
            Command::RequestScore => self.request_score(),
            Command::RequestIntro => self.request_intro(),
            Command::RequestCredits => self.request_credits(),
            Command::RequestQuestions => self.request_questions(),
        };
        response.render_to(renderer);
        response.outcome
    }

    fn apply(&mut self, transition: Transition) -> Response {
        let Transition {
            outcome,
            mut instructions,
            surface,
            refresh,
        } = transition;

        match surface {
            ActionSurface::Replace(actions) => {
                let views = present(&actions, &self.state);
                instructions.push(if views.is_empty() {
                    RenderInstruction::ClearActions
                } else {
                    RenderInstruction::PresentActions(views)
                });
                self.presented = actions;
            }
            ActionSurface::Clear => {
                self.presented.clear();
                instructions.push(RenderInstruction::ClearActions);
            }
            ActionSurface::Keep => {
                if refresh && !self.presented.is_empty() {
                    instructions.push(RenderInstruction::RefreshActions(present(
                        &self.presented,
                        &self.state,
                    )));
                }
            }
        }

        Response {
            outcome,
            instructions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use case_rules::{CaseMetadata, Condition, Consequence, LocationDefinition, SuccessBranch};

    fn addr(s: &str) -> LocationAddress {
        s.parse().unwrap()
    }

    fn session() -> CaseSession {
        let content = CaseContent::new(CaseMetadata {
            intro: "A body in the theatre.".to_string(),
            ..Default::default()
        })
        .with_location(
            addr("4 SW"),
            LocationDefinition::new("The theatre.").with_clue(Clue::A),
        )
        .with_location(
            addr("28 WC"),
            LocationDefinition::new("The grocer.").with_conditions(vec![
                Condition::always(
                    SuccessBranch::new()
                        .with_action(
                            Action::new("bar_door", "Bar the door")
                                .with_consequence(Consequence::LockLocation),
                        )
                        .with_action(Action::new("chat", "Chat with the grocer")),
                ),
            ]),
        )
        .with_location(addr("3 WC"), LocationDefinition::new("A pub."));
        CaseSession::new(content, ScoringRules::default())
    }

    #[test]
    fn test_directory_markers() {
        let mut session = session();
        session.visit(&addr("4 SW"));
        session.visit(&addr("28 WC"));
        session.choose_action(&ActionId::new("bar_door"));

        let directory = session.directory();
        let districts: Vec<_> = directory.iter().map(|d| d.district.as_str()).collect();
        assert_eq!(districts, vec!["WC", "SW"]);

        let wc = &directory[0].locations;
        assert_eq!(wc[0].address, addr("3 WC"));
        assert!(!wc[0].visited);
        assert_eq!(wc[1].address, addr("28 WC"));
        assert!(wc[1].visited && wc[1].locked);
        assert!(directory[1].locations[0].visited);
    }

    #[test]
    fn test_lock_refreshes_presented_actions() {
        let mut session = session();
        session.visit(&addr("28 WC"));

        let response = session.choose_action(&ActionId::new("bar_door"));

        assert!(response.is_proceeded());
        match response.instructions.last() {
            Some(RenderInstruction::RefreshActions(views)) => {
                assert!(views[0].disabled);
                assert!(!views[1].disabled);
            }
            other => panic!("unexpected instruction: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_action_aborts() {
        let mut session = session();
        session.visit(&addr("4 SW"));

        let response = session.choose_action(&ActionId::new("chat"));
        assert_eq!(
            response.outcome,
            Outcome::Aborted(Diagnostic::UnknownAction(ActionId::new("chat")))
        );
    }

    #[test]
    fn test_visit_replaces_presented_actions() {
        let mut session = session();
        session.visit(&addr("28 WC"));
        assert_eq!(session.presented_actions().len(), 2);

        let response = session.visit(&addr("4 SW"));
        assert!(session.presented_actions().is_empty());
        assert_eq!(response.instructions.last(), Some(&RenderInstruction::ClearActions));
    }

    #[test]
    fn test_progress() {
        let mut session = session();
        session.visit(&addr("4 SW"));

        let progress = session.progress();
        assert_eq!(
            progress.clues,
            vec![(Clue::A, true), (Clue::B, false), (Clue::C, false)]
        );
        assert_eq!(progress.leads_followed, 1);
    }

    #[test]
    fn test_dispatch_forwards_to_renderer() {
        let mut session = session();
        let mut rendered: Vec<RenderInstruction> = Vec::new();

        let outcome = session.dispatch(Command::RequestIntro, &mut rendered);

        assert_eq!(outcome, Outcome::Proceeded);
        assert!(matches!(rendered[0], RenderInstruction::Introduction(_)));
        assert_eq!(rendered.last(), Some(&RenderInstruction::ClearActions));
    }

    #[test]
    fn test_score_includes_conclusion() {
        let mut session = session();
        let response = session.request_score();

        match &response.instructions[0] {
            RenderInstruction::Score(report) => {
                assert_eq!(report.total, 0);
                assert_eq!(report.conclusion.as_ref().map(|c| c.master_score), Some(100));
            }
            other => panic!("unexpected instruction: {other:?}"),
        }
    }
}
