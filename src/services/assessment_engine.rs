use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::models::domain::{
    GradedAnswer, PublicQuestion, Question, QuizDefinition, QuizPublicView, Submission,
    SubmittedAnswer,
};

/// An answer referenced a question position the quiz does not have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[error("question index {question_index} is out of range")]
pub struct OutOfRangeError {
    pub question_index: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grade {
    pub graded_answers: Vec<GradedAnswer>,
    pub score: u32,
}

pub struct AssessmentEngine;

impl AssessmentEngine {
    /// Examinee view of a quiz: same order and content, answer key removed.
    pub fn project_public(quiz: &QuizDefinition) -> QuizPublicView {
        QuizPublicView {
            id: quiz.id.clone(),
            title: quiz.title.clone(),
            questions: quiz.questions.iter().map(PublicQuestion::from).collect(),
            owner_id: quiz.owner_id.clone(),
            created_at: quiz.created_at,
        }
    }

    /// Grades `answers` in the order given. Only the indices present are
    /// graded; a missing question is simply not in the result. The first answer
    /// pointing outside the quiz rejects the whole set.
    pub fn grade(quiz: &QuizDefinition, answers: &[SubmittedAnswer]) -> Result<Grade, OutOfRangeError> {
        let graded_answers = answers
            .iter()
            .map(|answer| {
                let (question_index, question) = Self::lookup(quiz, answer.question_index)?;
                Ok(GradedAnswer {
                    question_index,
                    selected_option: answer.selected_option,
                    is_correct: question.is_correct(answer.selected_option),
                })
            })
            .collect::<Result<Vec<_>, OutOfRangeError>>()?;

        let score = graded_answers.iter().filter(|a| a.is_correct).count() as u32;

        Ok(Grade {
            graded_answers,
            score,
        })
    }

    /// Grades and stamps a new [`Submission`] with the current time.
    pub fn score(
        quiz: &QuizDefinition,
        answers: &[SubmittedAnswer],
        examinee_id: &str,
    ) -> Result<Submission, OutOfRangeError> {
        Self::score_at(quiz, answers, examinee_id, Utc::now())
    }

    pub fn score_at(
        quiz: &QuizDefinition,
        answers: &[SubmittedAnswer],
        examinee_id: &str,
        submitted_at: DateTime<Utc>,
    ) -> Result<Submission, OutOfRangeError> {
        let grade = Self::grade(quiz, answers)?;

        Ok(Submission {
            id: Uuid::new_v4().to_string(),
            quiz_id: quiz.id.clone(),
            quiz_title: quiz.title.clone(),
            examinee_id: examinee_id.to_string(),
            graded_answers: grade.graded_answers,
            score: grade.score,
            question_count: quiz.question_count(),
            submitted_at,
        })
    }

    fn lookup(quiz: &QuizDefinition, question_index: i64) -> Result<(usize, &Question), OutOfRangeError> {
        usize::try_from(question_index)
            .ok()
            .and_then(|index| quiz.questions.get(index).map(|q| (index, q)))
            .ok_or(OutOfRangeError { question_index })
    }
}
