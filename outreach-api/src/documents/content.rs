use chrono::{Datelike, NaiveDate};
use shared_types::{Language, PipelineError};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::config::DocumentsConfig;
use crate::documents::{template, DocumentRenderer};
use crate::salutation::Salutation;

/// Subject/body sections of the email text templates.
const SUBJECT_MARKER: &str = "#OBJECT";
const BODY_MARKER: &str = "#BODY";

const FRENCH_MONTHS: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

const ENGLISH_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Date line for the cover letter header, per the language's convention:
/// "11 janvier 2023" / "January 11, 2023".
pub fn localized_date(language: Language, date: NaiveDate) -> String {
    let month_index = date.month0() as usize;
    match language {
        Language::French => format!(
            "{:02} {} {}",
            date.day(),
            FRENCH_MONTHS[month_index],
            date.year()
        ),
        Language::English => format!(
            "{} {:02}, {}",
            ENGLISH_MONTHS[month_index],
            date.day(),
            date.year()
        ),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailContent {
    pub subject: String,
    pub body: String,
}

/// Builds the three per-record artifacts. Documents go through the external
/// rendering collaborator; the email is parsed and filled from the plain-text
/// templates directly.
pub struct ContentRenderer<'a> {
    renderer: &'a dyn DocumentRenderer,
    config: &'a DocumentsConfig,
}

impl<'a> ContentRenderer<'a> {
    pub fn new(renderer: &'a dyn DocumentRenderer, config: &'a DocumentsConfig) -> Self {
        Self { renderer, config }
    }

    /// The CV depends on the role alone; two contacts sharing a role get an
    /// identical document.
    pub fn render_cv(&self, role: &str) -> Result<PathBuf, PipelineError> {
        let mut context = HashMap::new();
        context.insert("role".to_string(), role.to_string());

        let output_name = format!("CV - {}.pdf", self.config.candidate_name);
        self.renderer.render("cv", &context, &output_name)
    }

    pub fn render_cover_letter(
        &self,
        language: Language,
        job: &str,
        company: &str,
        salutation: &Salutation,
    ) -> Result<PathBuf, PipelineError> {
        let template_id = match language {
            Language::English => "cover_letter_english",
            Language::French => "cover_letter_french",
        };

        let mut context = HashMap::new();
        context.insert(
            "date".to_string(),
            localized_date(language, chrono::Local::now().date_naive()),
        );
        context.insert("job".to_string(), job.to_string());
        context.insert("company".to_string(), company.to_string());
        context.insert("name".to_string(), salutation.greeting.clone());
        if let Some(signature) = &salutation.signature {
            context.insert("signature".to_string(), signature.clone());
        }

        let output_name = format!("Cover Letter - {}.pdf", self.config.candidate_name);
        self.renderer.render(template_id, &context, &output_name)
    }

    /// Parse the email template for the language and fill in greeting, job
    /// title and role. The template must hold exactly one subject section and
    /// one body section, split by the `#BODY` marker.
    pub fn render_email(
        &self,
        language: Language,
        job: &str,
        role: &str,
        greeting: &str,
    ) -> Result<EmailContent, PipelineError> {
        let file_name = match language {
            Language::English => "mail_english.txt",
            Language::French => "mail_french.txt",
        };
        let path = self.config.templates_dir.join(file_name);
        let text = std::fs::read_to_string(&path)
            .map_err(|e| PipelineError::Template(format!("{}: {}", path.display(), e)))?;

        let sections: Vec<&str> = text.split(BODY_MARKER).collect();
        if sections.len() != 2 {
            return Err(PipelineError::Template(format!(
                "{file_name}: expected exactly one {SUBJECT_MARKER} and one {BODY_MARKER} section"
            )));
        }

        let mut context = HashMap::new();
        context.insert("name".to_string(), greeting.to_string());
        context.insert("job".to_string(), job.to_string());
        context.insert("role".to_string(), role.to_string());

        let subject_section = sections[0].replace(SUBJECT_MARKER, "");
        let subject = template::fill(subject_section.trim(), &context);
        let body = template::fill(sections[1].trim(), &context);

        Ok(EmailContent { subject, body })
    }
}
