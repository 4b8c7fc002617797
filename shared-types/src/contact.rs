use serde::{Deserialize, Serialize};

use crate::pipeline::PipelineError;

/// Language applied to a generated artifact. The cover letter and the email
/// carry independent selectors on the same contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    French,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "english",
            Language::French => "french",
        }
    }

    /// Parse a stored selector, defaulting to English for anything unknown.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "french" => Language::French,
            _ => Language::English,
        }
    }
}

/// Greeting style. Formal needs title + last name, semi-formal needs a first
/// name; when the required fields are empty the resolver falls back to the
/// impersonal greeting instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Formality {
    #[serde(rename = "formal")]
    Formal,
    #[serde(rename = "semi-formal")]
    SemiFormal,
    #[serde(rename = "informal")]
    Informal,
}

impl Formality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Formality::Formal => "formal",
            Formality::SemiFormal => "semi-formal",
            Formality::Informal => "informal",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "semi-formal" => Formality::SemiFormal,
            "informal" => Formality::Informal,
            _ => Formality::Formal,
        }
    }
}

/// One job-application target. Optional name fields are stored and exposed as
/// empty strings, never null, so the salutation resolver can treat "absent"
/// and "empty" uniformly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub id: i64,
    pub email: String,
    pub english_job: String,
    pub french_job: String,
    pub company: String,
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub formality: Formality,
    pub role: String,
    pub cover_letter_language: Language,
    pub email_language: Language,
    pub processed: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Contact {
    /// The stored job title for the given artifact language.
    pub fn job_for(&self, language: Language) -> &str {
        match language {
            Language::English => &self.english_job,
            Language::French => &self.french_job,
        }
    }

    /// Intake should prevent incomplete records, but the pipeline re-checks so
    /// a bad row fails its own run instead of crashing the batch.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.email.trim().is_empty() {
            return Err(PipelineError::Validation("email is empty".to_string()));
        }
        if self.company.trim().is_empty() {
            return Err(PipelineError::Validation("company is empty".to_string()));
        }
        if self.english_job.trim().is_empty() && self.french_job.trim().is_empty() {
            return Err(PipelineError::Validation(
                "both job titles are empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateContactRequest {
    pub email: String,
    pub english_job: String,
    pub french_job: String,
    pub company: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default = "default_formality")]
    pub formality: Formality,
    pub role: String,
    pub cover_letter_language: Language,
    pub email_language: Language,
}

/// Same shape as creation; every edit rewrites the row and re-queues it by
/// resetting the processed flag.
pub type UpdateContactRequest = CreateContactRequest;

fn default_formality() -> Formality {
    Formality::Formal
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContactsResponse {
    pub contacts: Vec<Contact>,
}
