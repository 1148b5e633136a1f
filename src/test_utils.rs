#[cfg(test)]
pub mod fixtures {
    use crate::models::{
        domain::{Principal, QuestionKind, QuizDefinition, Role, SubmittedAnswer},
        dto::request::{QuestionDraft, QuizDraft},
    };
    use crate::services::quiz_validator::QuizValidator;

    /// Four-option question of the given kind; media kinds get a reference.
    pub fn question_draft(kind: QuestionKind) -> QuestionDraft {
        QuestionDraft {
            kind,
            prompt: format!("Which {} option is right?", kind.as_str()),
            options: vec![
                "Alpha".to_string(),
                "Beta".to_string(),
                "Gamma".to_string(),
                "Delta".to_string(),
            ],
            correct_option_index: 1,
            media_ref: kind
                .requires_media()
                .then(|| format!("/uploads/{}-1700000000000.bin", kind.as_str())),
        }
    }

    pub fn image_question(media_ref: &str) -> QuestionDraft {
        QuestionDraft {
            media_ref: Some(media_ref.to_string()),
            ..question_draft(QuestionKind::Image)
        }
    }

    /// Ten questions: eight text, one image (index 8), one audio (index 9).
    /// Question `i` has correct option `(3 * i + 1) % 4`, so question 3 expects 2.
    pub fn valid_draft() -> QuizDraft {
        let questions = (0..10)
            .map(|i| {
                let kind = match i {
                    8 => QuestionKind::Image,
                    9 => QuestionKind::Audio,
                    _ => QuestionKind::Text,
                };
                QuestionDraft {
                    correct_option_index: (3 * i + 1) % 4,
                    ..question_draft(kind)
                }
            })
            .collect();

        QuizDraft {
            title: "General knowledge".to_string(),
            questions,
        }
    }

    pub fn valid_quiz() -> QuizDefinition {
        QuizValidator::validate(valid_draft(), "admin-1").expect("fixture draft is valid")
    }

    pub fn all_correct_answers(quiz: &QuizDefinition) -> Vec<SubmittedAnswer> {
        quiz.questions
            .iter()
            .enumerate()
            .map(|(i, q)| SubmittedAnswer {
                question_index: i as i64,
                selected_option: q.correct_option_index as i64,
            })
            .collect()
    }

    pub fn admin() -> Principal {
        Principal::new("admin-1", Role::Admin)
    }

    pub fn examinee(id: &str) -> Principal {
        Principal::new(id, Role::Examinee)
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::models::domain::QuestionKind;

    #[test]
    fn test_fixture_draft_shape() {
        let draft = valid_draft();
        assert_eq!(draft.questions.len(), 10);
        assert_eq!(draft.questions[8].kind, QuestionKind::Image);
        assert_eq!(draft.questions[9].kind, QuestionKind::Audio);
        assert_eq!(draft.questions[3].correct_option_index, 2);
    }

    #[test]
    fn test_fixture_answers_cover_every_question() {
        let quiz = valid_quiz();
        let answers = all_correct_answers(&quiz);
        assert_eq!(answers.len(), quiz.questions.len());
        assert_eq!(answers[3].selected_option, 2);
    }
}
