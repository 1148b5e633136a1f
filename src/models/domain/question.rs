use serde::{Deserialize, Serialize};

/// Media kind of a question. Image and audio questions point at an external
/// asset through `media_ref`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize, Copy)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Text,
    Image,
    Audio,
}

impl QuestionKind {
    pub fn requires_media(&self) -> bool {
        matches!(self, QuestionKind::Image | QuestionKind::Audio)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionKind::Text => "text",
            QuestionKind::Image => "image",
            QuestionKind::Audio => "audio",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub kind: QuestionKind,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_option_index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_ref: Option<String>,
}

impl Question {
    pub fn is_correct(&self, selected_option: i64) -> bool {
        usize::try_from(selected_option)
            .map(|selected| selected == self.correct_option_index)
            .unwrap_or(false)
    }
}

/// Examinee-facing question: everything but the answer key.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct PublicQuestion {
    pub kind: QuestionKind,
    pub prompt: String,
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_ref: Option<String>,
}

impl From<&Question> for PublicQuestion {
    fn from(question: &Question) -> Self {
        PublicQuestion {
            kind: question.kind,
            prompt: question.prompt.clone(),
            options: question.options.clone(),
            media_ref: question.media_ref.clone(),
        }
    }
}
