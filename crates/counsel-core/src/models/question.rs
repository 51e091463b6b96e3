use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// How a question is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum QuestionType {
    MultipleChoiceSingle,
    MultipleChoiceMulti,
    TextShort,
    TextLong,
    RatingScale,
    YesNo,
}

impl QuestionType {
    /// True for the two multiple-choice variants, which need an option list.
    pub fn is_choice(self) -> bool {
        matches!(
            self,
            QuestionType::MultipleChoiceSingle | QuestionType::MultipleChoiceMulti
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            QuestionType::MultipleChoiceSingle => "multiple_choice_single",
            QuestionType::MultipleChoiceMulti => "multiple_choice_multi",
            QuestionType::TextShort => "text_short",
            QuestionType::TextLong => "text_long",
            QuestionType::RatingScale => "rating_scale",
            QuestionType::YesNo => "yes_no",
        }
    }
}

/// Integer rating scale, e.g. 0–4 Likert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RatingScale {
    pub min: u32,
    pub max: u32,
    /// Display labels keyed by scale value (e.g. 0 → "Not at all").
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<u32, String>,
}

impl RatingScale {
    pub fn new(min: u32, max: u32) -> Self {
        Self {
            min,
            max,
            labels: BTreeMap::new(),
        }
    }

    pub fn with_label(mut self, value: u32, label: impl Into<String>) -> Self {
        self.labels.insert(value, label.into());
        self
    }
}

/// A single assessment item as authored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Question {
    pub id: String,
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<RatingScale>,
    #[serde(default = "default_weight")]
    pub weight: f64,
    pub category: String,
}

fn default_weight() -> f64 {
    1.0
}

impl Question {
    /// Create an optional question with weight 1 and no type-specific payload.
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        question_type: QuestionType,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            question_type,
            required: false,
            options: None,
            scale: None,
            weight: default_weight(),
            category: category.into(),
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_scale(mut self, scale: RatingScale) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Project the wire shape into a closed answer format.
    ///
    /// Returns `None` when the payload the question type needs is missing
    /// (choice question without options, rating question without a scale).
    /// Structural checks beyond presence live in the validation engine.
    pub fn answer_format(&self) -> Option<AnswerFormat> {
        let format = match self.question_type {
            QuestionType::MultipleChoiceSingle => AnswerFormat::SingleChoice {
                options: self.options.clone()?,
            },
            QuestionType::MultipleChoiceMulti => AnswerFormat::MultiChoice {
                options: self.options.clone()?,
            },
            QuestionType::TextShort => AnswerFormat::ShortText,
            QuestionType::TextLong => AnswerFormat::LongText,
            QuestionType::RatingScale => AnswerFormat::Rating {
                scale: self.scale.clone()?,
            },
            QuestionType::YesNo => AnswerFormat::YesNo,
        };
        Some(format)
    }
}

/// The answer shape of a question with only the fields its type uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "format", rename_all = "snake_case")]
#[ts(export)]
pub enum AnswerFormat {
    SingleChoice { options: Vec<String> },
    MultiChoice { options: Vec<String> },
    ShortText,
    LongText,
    Rating { scale: RatingScale },
    YesNo,
}
