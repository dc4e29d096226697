//! Wizard navigation and answer mutation engine
//!
//! Owns the current position (section index, question index), the review-mode
//! flag, and the answer store. All mutations of wizard state go through this
//! engine; validation constraints come from the question catalog.

use crate::catalog::{Catalog, Question, QuestionKind};
use crate::wizard::answers::AnswerStore;
use linkstrat_common::{Error, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Persisted wizard state: answers + position + mode
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WizardState {
    pub answers: AnswerStore,
    pub section_index: usize,
    pub question_index: usize,
    pub review_mode: bool,
}

/// Answer mutation, polymorphic by question kind
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", content = "value", rename_all = "snake_case")]
pub enum AnswerAction {
    /// Single-choice: replace the answer unconditionally
    Select(String),
    /// Multi-choice: toggle membership, bounded by max selections
    Toggle(String),
    /// Tag-list: append after trim/dedupe, bounded by max selections
    AddTag(String),
    /// Tag-list: remove if present
    RemoveTag(String),
}

/// Completion progress over the whole questionnaire
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WizardProgress {
    pub completed: usize,
    pub total: usize,
    pub percent: f64,
}

/// The wizard engine
#[derive(Debug, Clone)]
pub struct WizardEngine {
    catalog: Arc<Catalog>,
    state: WizardState,
}

impl WizardEngine {
    /// Start a fresh wizard at the first question
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            state: WizardState::default(),
        }
    }

    /// Rehydrate from persisted state
    ///
    /// A stored position that no longer resolves to a question (e.g. after a
    /// catalog change) is clamped to the last valid location.
    pub fn resume(catalog: Arc<Catalog>, mut state: WizardState) -> Self {
        if catalog
            .question_at(state.section_index, state.question_index)
            .is_none()
        {
            let (section_index, question_index) = catalog.last_position();
            tracing::warn!(
                stored_section = state.section_index,
                stored_question = state.question_index,
                "Stored wizard position out of range, clamping to last question"
            );
            state.section_index = section_index;
            state.question_index = question_index;
        }
        Self { catalog, state }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The question at the current position
    pub fn current_question(&self) -> &Question {
        self.catalog
            .question_at(self.state.section_index, self.state.question_index)
            .expect("wizard position always resolves to a question")
    }

    /// Apply an answer mutation to the identified question
    ///
    /// Selection-count violations are silent no-ops; an action that does not
    /// match the question's kind is an input error.
    pub fn apply(&mut self, question_id: &str, action: AnswerAction) -> Result<()> {
        let question = self
            .catalog
            .question(question_id)
            .ok_or_else(|| Error::NotFound(format!("Unknown question: {}", question_id)))?;

        match (&question.kind, action) {
            (QuestionKind::SingleChoice { .. }, AnswerAction::Select(value)) => {
                self.state.answers.set_text(question_id, value);
            }
            (QuestionKind::MultiChoice { max_selections, .. }, AnswerAction::Toggle(value)) => {
                self.state
                    .answers
                    .toggle_in_list(question_id, &value, *max_selections);
            }
            (QuestionKind::TagList { max_selections, .. }, AnswerAction::AddTag(value)) => {
                self.state.answers.add_tag(question_id, &value, *max_selections);
            }
            (QuestionKind::TagList { .. }, AnswerAction::RemoveTag(value)) => {
                self.state.answers.remove_tag(question_id, &value);
            }
            (_, action) => {
                return Err(Error::InvalidInput(format!(
                    "Action {:?} does not match kind of question {}",
                    action, question_id
                )));
            }
        }
        Ok(())
    }

    /// Advance to the next question; entering review mode from the last one
    ///
    /// Unanswered questions do not block navigation.
    pub fn go_next(&mut self) {
        if self.state.review_mode {
            return;
        }
        let section = self
            .catalog
            .section(self.state.section_index)
            .expect("wizard section index always valid");

        if self.state.question_index + 1 < section.questions.len() {
            self.state.question_index += 1;
        } else if self.state.section_index + 1 < self.catalog.sections().len() {
            self.state.section_index += 1;
            self.state.question_index = 0;
        } else {
            // Last question of the last section: freeze position, review
            self.state.review_mode = true;
        }
    }

    /// Step back to the previous question; no-op at the very first
    pub fn go_previous(&mut self) {
        if self.state.review_mode {
            return;
        }
        if self.state.question_index > 0 {
            self.state.question_index -= 1;
        } else if self.state.section_index > 0 {
            self.state.section_index -= 1;
            let section = self
                .catalog
                .section(self.state.section_index)
                .expect("wizard section index always valid");
            self.state.question_index = section.questions.len() - 1;
        }
    }

    /// Enter review mode without altering position
    pub fn enter_review(&mut self) {
        self.state.review_mode = true;
    }

    /// Leave review mode without altering position
    pub fn exit_review(&mut self) {
        self.state.review_mode = false;
    }

    /// Snapshot the answers for submission; valid only in review mode
    pub fn submission_answers(&self) -> Result<AnswerStore> {
        if !self.state.review_mode {
            return Err(Error::InvalidInput(
                "Submit is only valid from review mode".to_string(),
            ));
        }
        Ok(self.state.answers.clone())
    }

    /// Completion progress, counting the current question as reached
    pub fn progress(&self) -> WizardProgress {
        let total = self.catalog.total_questions();
        let completed = self
            .catalog
            .sections()
            .iter()
            .take(self.state.section_index)
            .map(|s| s.questions.len())
            .sum::<usize>()
            + self.state.question_index
            + 1;
        let percent = if total > 0 {
            (completed as f64 / total as f64) * 100.0
        } else {
            0.0
        };
        WizardProgress {
            completed,
            total,
            percent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> WizardEngine {
        WizardEngine::new(Arc::new(Catalog::standard()))
    }

    #[test]
    fn test_next_then_previous_returns_to_prior_position() {
        let mut e = engine();
        // Walk a few steps in, crossing a section boundary
        for _ in 0..3 {
            e.go_next();
        }
        let before = (e.state().section_index, e.state().question_index);
        e.go_next();
        e.go_previous();
        assert_eq!((e.state().section_index, e.state().question_index), before);
    }

    #[test]
    fn test_previous_at_first_question_is_noop() {
        let mut e = engine();
        e.go_previous();
        assert_eq!((e.state().section_index, e.state().question_index), (0, 0));
    }

    #[test]
    fn test_previous_crosses_section_boundary_to_last_question() {
        let mut e = engine();
        e.go_next(); // profile done (1 question) -> goals[0]
        assert_eq!((e.state().section_index, e.state().question_index), (1, 0));
        e.go_previous();
        assert_eq!((e.state().section_index, e.state().question_index), (0, 0));
    }

    #[test]
    fn test_next_from_last_question_enters_review_and_keeps_answers() {
        let mut e = engine();
        e.apply("role", AnswerAction::Select("founder".to_string())).unwrap();
        let answers_before = e.state().answers.clone();

        let total = e.catalog().total_questions();
        for _ in 0..(total - 1) {
            e.go_next();
        }
        assert!(!e.state().review_mode);
        let frozen = (e.state().section_index, e.state().question_index);

        e.go_next();
        assert!(e.state().review_mode);
        assert_eq!((e.state().section_index, e.state().question_index), frozen);
        assert_eq!(e.state().answers, answers_before);
    }

    #[test]
    fn test_review_toggles_without_moving() {
        let mut e = engine();
        e.go_next();
        let position = (e.state().section_index, e.state().question_index);
        e.enter_review();
        assert!(e.state().review_mode);
        e.exit_review();
        assert!(!e.state().review_mode);
        assert_eq!((e.state().section_index, e.state().question_index), position);
    }

    #[test]
    fn test_apply_rejects_kind_mismatch() {
        let mut e = engine();
        let result = e.apply("role", AnswerAction::AddTag("oops".to_string()));
        assert!(result.is_err());
        assert!(e.state().answers.is_empty());
    }

    #[test]
    fn test_apply_unknown_question_is_error() {
        let mut e = engine();
        assert!(e.apply("nope", AnswerAction::Select("x".to_string())).is_err());
    }

    #[test]
    fn test_submission_requires_review_mode() {
        let mut e = engine();
        assert!(e.submission_answers().is_err());
        e.enter_review();
        assert!(e.submission_answers().is_ok());
    }

    #[test]
    fn test_progress_counts_prior_sections() {
        let mut e = engine();
        assert_eq!(e.progress().completed, 1);
        e.go_next(); // into section 1
        let p = e.progress();
        assert_eq!(p.completed, 2);
        assert_eq!(p.total, 12);
    }

    #[test]
    fn test_resume_clamps_invalid_position() {
        let catalog = Arc::new(Catalog::standard());
        let state = WizardState {
            section_index: 99,
            question_index: 99,
            ..Default::default()
        };
        let e = WizardEngine::resume(catalog.clone(), state);
        assert_eq!(
            (e.state().section_index, e.state().question_index),
            catalog.last_position()
        );
    }
}
