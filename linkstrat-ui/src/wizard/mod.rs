//! Questionnaire wizard: answer storage, navigation engine, progress
//! persistence, and finalized submissions.

pub mod answers;
pub mod engine;
pub mod progress;
pub mod submission;

pub use answers::{AnswerStore, AnswerValue};
pub use engine::{AnswerAction, WizardEngine, WizardProgress, WizardState};
pub use submission::Submission;
