use std::{fmt, str::FromStr};

use async_graphql::{Enum, SimpleObject};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::domain::subject::Subject;

/// One of the four answer slots of a question.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize, Enum)]
pub enum OptionLabel {
    A,
    B,
    C,
    D,
}

impl OptionLabel {
    pub const ALL: [OptionLabel; 4] = [OptionLabel::A, OptionLabel::B, OptionLabel::C, OptionLabel::D];

    pub fn as_str(&self) -> &'static str {
        match self {
            OptionLabel::A => "A",
            OptionLabel::B => "B",
            OptionLabel::C => "C",
            OptionLabel::D => "D",
        }
    }
}

impl fmt::Display for OptionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionLabel {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "A" => Ok(OptionLabel::A),
            "B" => Ok(OptionLabel::B),
            "C" => Ok(OptionLabel::C),
            "D" => Ok(OptionLabel::D),
            other => Err(AppError::InvalidAnswer(format!(
                "'{}' is not one of A, B, C, D",
                other
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize, Enum)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl FromStr for Difficulty {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(AppError::ValidationError(format!(
                "Unknown difficulty '{}', expected easy, medium or hard",
                other
            ))),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct QuestionOptions {
    #[serde(rename = "A")]
    #[graphql(name = "A")]
    pub a: String,
    #[serde(rename = "B")]
    #[graphql(name = "B")]
    pub b: String,
    #[serde(rename = "C")]
    #[graphql(name = "C")]
    pub c: String,
    #[serde(rename = "D")]
    #[graphql(name = "D")]
    pub d: String,
}

impl QuestionOptions {
    pub fn text(&self, label: OptionLabel) -> &str {
        match label {
            OptionLabel::A => &self.a,
            OptionLabel::B => &self.b,
            OptionLabel::C => &self.c,
            OptionLabel::D => &self.d,
        }
    }
}

/// A question as handed out by the question source. Never mutated after fetch.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub id: String,
    pub subject: Subject,
    pub topic: Option<String>,
    pub prompt: String,
    pub options: QuestionOptions,
    pub answer: OptionLabel,
    pub explanation: Option<String>,
    pub difficulty: Difficulty,
}

impl Question {
    pub fn is_correct(&self, selected: OptionLabel) -> bool {
        self.answer == selected
    }
}
