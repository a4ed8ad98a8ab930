pub mod client;

use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;
use thiserror::Error;

pub use client::{FetchError, HttpQuestionSource, QuestionSource};

/// Admission track a question was asked under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdmissionType {
    #[default]
    Susi,
    Jeongsi,
    Pyeonip,
}

impl AdmissionType {
    pub const ALL: [AdmissionType; 3] = [
        AdmissionType::Susi,
        AdmissionType::Jeongsi,
        AdmissionType::Pyeonip,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            AdmissionType::Susi => "SUSI",
            AdmissionType::Jeongsi => "JEONGSI",
            AdmissionType::Pyeonip => "PYEONIP",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AdmissionType::Susi => "수시",
            AdmissionType::Jeongsi => "정시",
            AdmissionType::Pyeonip => "편입학",
        }
    }
}

/// Topic of a question. `All` is the "no filter" sentinel and goes over the wire as `""`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionCategory {
    #[default]
    #[serde(rename = "")]
    All,
    AdmissionGuideline,
    PassingResult,
    PastQuestions,
    InterviewPracticalTest,
}

impl QuestionCategory {
    pub const ALL: [QuestionCategory; 5] = [
        QuestionCategory::All,
        QuestionCategory::AdmissionGuideline,
        QuestionCategory::PassingResult,
        QuestionCategory::PastQuestions,
        QuestionCategory::InterviewPracticalTest,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            QuestionCategory::All => "",
            QuestionCategory::AdmissionGuideline => "ADMISSION_GUIDELINE",
            QuestionCategory::PassingResult => "PASSING_RESULT",
            QuestionCategory::PastQuestions => "PAST_QUESTIONS",
            QuestionCategory::InterviewPracticalTest => "INTERVIEW_PRACTICAL_TEST",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QuestionCategory::All => "전체보기",
            QuestionCategory::AdmissionGuideline => "모집요강",
            QuestionCategory::PassingResult => "입시결과",
            QuestionCategory::PastQuestions => "기출문제",
            QuestionCategory::InterviewPracticalTest => "면접/실기",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(rename = "type")]
    pub admission_type: AdmissionType,
    pub category: QuestionCategory,
}

impl FilterState {
    pub fn new(admission_type: AdmissionType, category: QuestionCategory) -> Self {
        Self {
            admission_type,
            category,
        }
    }
}

/// Question as returned by the admin API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQuestion {
    pub id: i64,
    pub content: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub view_count: u64,
    pub is_checked: bool,
    #[serde(default)]
    pub answer: Option<RawAnswer>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawAnswer {
    pub id: i64,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRecord {
    pub id: i64,
    pub content: String,
}

/// Display shape of a question row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRecord {
    pub id: i64,
    pub content: String,
    pub view_count: String,
    pub is_checked: bool,
    pub answer: AnswerRecord,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("question {question_id} came without an answer")]
pub struct MissingAnswerError {
    pub question_id: i64,
}

pub fn map_record(raw: RawQuestion) -> Result<QuestionRecord, MissingAnswerError> {
    let answer = raw.answer.ok_or(MissingAnswerError {
        question_id: raw.id,
    })?;
    Ok(QuestionRecord {
        id: raw.id,
        content: raw.content,
        view_count: raw.view_count.to_string(),
        is_checked: raw.is_checked,
        answer: AnswerRecord {
            id: answer.id,
            content: answer.content,
        },
    })
}

// keeps upstream order, first question without an answer rejects the whole batch
pub fn map_records(raw: Vec<RawQuestion>) -> Result<Vec<QuestionRecord>, MissingAnswerError> {
    raw.into_iter().map(map_record).collect()
}
