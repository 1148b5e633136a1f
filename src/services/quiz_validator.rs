use serde::Serialize;
use thiserror::Error;

use crate::models::{
    domain::{Question, QuestionKind, QuizDefinition},
    dto::request::{QuestionDraft, QuizDraft},
};

pub const MIN_QUESTIONS: usize = 10;
pub const MIN_OPTIONS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum ValidationReason {
    #[error("title must not be empty")]
    EmptyTitle,

    #[error("quiz has {count} questions, at least {minimum} are required")]
    TooFewQuestions { count: usize, minimum: usize },

    #[error("quiz must contain at least one image question")]
    MissingImageQuestion,

    #[error("quiz must contain at least one audio question")]
    MissingAudioQuestion,

    #[error("prompt must not be empty")]
    EmptyPrompt,

    #[error("{} question requires a media reference", .kind.as_str())]
    MissingMediaRef { kind: QuestionKind },

    #[error("text question must not carry a media reference")]
    UnexpectedMediaRef,

    #[error("question has {count} options, at least {minimum} are required")]
    TooFewOptions { count: usize, minimum: usize },

    #[error("option {option_index} must not be empty")]
    EmptyOption { option_index: usize },

    #[error("correct option index {index} is outside 0..{option_count}")]
    CorrectOptionOutOfRange { index: i64, option_count: usize },
}

/// Rejection of a quiz draft. `question_index` and `field` locate the first
/// offending question when the problem is not quiz-wide.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{}{reason}", location(.question_index, .field))]
pub struct QuizValidationError {
    #[serde(flatten)]
    pub reason: ValidationReason,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
}

fn location(question_index: &Option<usize>, field: &Option<&'static str>) -> String {
    match (question_index, field) {
        (Some(index), Some(field)) => format!("question {} ({}): ", index, field),
        (Some(index), None) => format!("question {}: ", index),
        (None, Some(field)) => format!("{}: ", field),
        (None, None) => String::new(),
    }
}

impl QuizValidationError {
    pub fn quiz_wide(field: &'static str, reason: ValidationReason) -> Self {
        Self {
            reason,
            question_index: None,
            field: Some(field),
        }
    }

    pub fn for_question(index: usize, field: &'static str, reason: ValidationReason) -> Self {
        Self {
            reason,
            question_index: Some(index),
            field: Some(field),
        }
    }
}

/// Structural checks a draft must pass before it may be persisted. Pure: no
/// I/O, nothing is stored here.
pub struct QuizValidator;

impl QuizValidator {
    /// Runs every check in order and builds the definition only if all pass.
    pub fn validate(draft: QuizDraft, owner_id: &str) -> Result<QuizDefinition, QuizValidationError> {
        Self::check_title(&draft.title)?;
        Self::check_question_count(&draft.questions)?;
        Self::check_media_coverage(&draft.questions)?;

        let questions = draft
            .questions
            .into_iter()
            .enumerate()
            .map(|(index, question)| Self::check_question(index, question))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(QuizDefinition::new(&draft.title, questions, owner_id))
    }

    /// Media kinds the quiz still lacks, image before audio. Empty when both
    /// are present.
    pub fn missing_media_kinds(questions: &[QuestionDraft]) -> Vec<QuestionKind> {
        [QuestionKind::Image, QuestionKind::Audio]
            .into_iter()
            .filter(|kind| !questions.iter().any(|q| q.kind == *kind))
            .collect()
    }

    fn check_title(title: &str) -> Result<(), QuizValidationError> {
        if title.trim().is_empty() {
            return Err(QuizValidationError::quiz_wide(
                "title",
                ValidationReason::EmptyTitle,
            ));
        }
        Ok(())
    }

    fn check_question_count(questions: &[QuestionDraft]) -> Result<(), QuizValidationError> {
        if questions.len() < MIN_QUESTIONS {
            return Err(QuizValidationError::quiz_wide(
                "questions",
                ValidationReason::TooFewQuestions {
                    count: questions.len(),
                    minimum: MIN_QUESTIONS,
                },
            ));
        }
        Ok(())
    }

    fn check_media_coverage(questions: &[QuestionDraft]) -> Result<(), QuizValidationError> {
        match Self::missing_media_kinds(questions).first() {
            Some(QuestionKind::Image) => Err(QuizValidationError::quiz_wide(
                "questions",
                ValidationReason::MissingImageQuestion,
            )),
            Some(_) => Err(QuizValidationError::quiz_wide(
                "questions",
                ValidationReason::MissingAudioQuestion,
            )),
            None => Ok(()),
        }
    }

    fn check_question(index: usize, draft: QuestionDraft) -> Result<Question, QuizValidationError> {
        let fail = |field, reason| Err(QuizValidationError::for_question(index, field, reason));

        if draft.prompt.trim().is_empty() {
            return fail("prompt", ValidationReason::EmptyPrompt);
        }

        // Blank references count as absent.
        let media_ref = draft.media_ref.filter(|r| !r.trim().is_empty());
        match (draft.kind.requires_media(), &media_ref) {
            (true, None) => {
                return fail("media_ref", ValidationReason::MissingMediaRef { kind: draft.kind })
            }
            (false, Some(_)) => return fail("media_ref", ValidationReason::UnexpectedMediaRef),
            _ => {}
        }

        if draft.options.len() < MIN_OPTIONS {
            return fail(
                "options",
                ValidationReason::TooFewOptions {
                    count: draft.options.len(),
                    minimum: MIN_OPTIONS,
                },
            );
        }

        if let Some(option_index) = draft.options.iter().position(|o| o.trim().is_empty()) {
            return fail("options", ValidationReason::EmptyOption { option_index });
        }

        let correct_option_index = match usize::try_from(draft.correct_option_index) {
            Ok(i) if i < draft.options.len() => i,
            _ => {
                return fail(
                    "correct_option_index",
                    ValidationReason::CorrectOptionOutOfRange {
                        index: draft.correct_option_index,
                        option_count: draft.options.len(),
                    },
                )
            }
        };

        Ok(Question {
            kind: draft.kind,
            prompt: draft.prompt,
            options: draft.options,
            correct_option_index,
            media_ref,
        })
    }
}
