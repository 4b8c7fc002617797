pub mod queue;

use shared_types::{Contact, PipelineError, PipelineOutcome};

use crate::database::{contacts, Database};
use crate::documents::ContentRenderer;
use crate::mail::MailTransport;
use crate::salutation::{self, Channel};

pub use queue::QueueRunner;

/// Drive one record through render → send → mark-processed.
///
/// Already-processed records are skipped before any collaborator is touched;
/// that is the at-most-once-send guard, and only an edit (which resets the
/// flag) re-queues a record. Every failure is converted to an `error` outcome
/// here so the queue never sees it.
pub fn process_contact(
    db: &Database,
    content: &ContentRenderer,
    transport: &dyn MailTransport,
    contact: &Contact,
) -> PipelineOutcome {
    if contact.processed {
        tracing::info!("Skipping already processed contact {}", contact.id);
        return PipelineOutcome::skipped(contact.id);
    }

    match run_record(db, content, transport, contact) {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("Failed to process contact {}: {}", contact.id, e);
            PipelineOutcome::error(contact.id, e.to_string())
        }
    }
}

fn run_record(
    db: &Database,
    content: &ContentRenderer,
    transport: &dyn MailTransport,
    contact: &Contact,
) -> Result<PipelineOutcome, PipelineError> {
    contact.validate()?;

    tracing::info!("Processing contact {} ({})", contact.id, contact.email);

    // The cover letter and the email resolve their greetings independently:
    // each follows its own language selector.
    let letter_salutation = salutation::resolve(
        contact.cover_letter_language,
        Channel::Letter,
        contact.formality,
        &contact.title,
        &contact.first_name,
        &contact.last_name,
    );
    let email_salutation = salutation::resolve(
        contact.email_language,
        Channel::Email,
        contact.formality,
        &contact.title,
        &contact.first_name,
        &contact.last_name,
    );

    let cv = content.render_cv(&contact.role)?;
    let cover_letter = content.render_cover_letter(
        contact.cover_letter_language,
        contact.job_for(contact.cover_letter_language),
        &contact.company,
        &letter_salutation,
    )?;
    let email = content.render_email(
        contact.email_language,
        contact.job_for(contact.email_language),
        &contact.role,
        &email_salutation.greeting,
    )?;

    let sent = match transport.send(
        &contact.email,
        &email.subject,
        &email.body,
        &[cv, cover_letter],
    ) {
        Ok(sent) => sent,
        Err(e) => {
            tracing::error!("Transport failure for contact {}: {}", contact.id, e);
            return Ok(PipelineOutcome::error(contact.id, e.to_string()));
        }
    };

    if !sent {
        return Ok(PipelineOutcome::error(contact.id, "Failed to send email"));
    }

    // The flag is written only after the transport confirms the send. A crash
    // in between leaves the record re-sendable; the reverse order would risk
    // marking a record that never went out.
    if let Err(e) = contacts::mark_processed(db, contact.id) {
        tracing::error!(
            "Contact {} sent but the processed flag was not recorded: {}",
            contact.id,
            e
        );
        return Ok(PipelineOutcome::error(
            contact.id,
            format!("Email sent but processed flag not recorded: {e}"),
        ));
    }

    tracing::info!("Successfully processed contact {}", contact.id);
    Ok(PipelineOutcome::success(contact.id))
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::config::DocumentsConfig;
    use crate::documents::DocumentRenderer;
    use shared_types::{CreateContactRequest, Formality, Language};
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    pub const MAIL_ENGLISH: &str = "#OBJECT\n\
        Application for {{ job }}\n\
        #BODY\n\
        {{ name }},\n\nI would like to apply for {{ job }} as a {{ role }}.\n";

    pub const MAIL_FRENCH: &str = "#OBJECT\n\
        Candidature au poste de {{ job }}\n\
        #BODY\n\
        {{ name }},\n\nJe souhaite postuler au poste de {{ job }}.\n";

    /// Document renderer double: counts calls and records each request.
    #[derive(Default)]
    pub struct RecordingRenderer {
        pub calls: AtomicUsize,
        pub requests: Mutex<Vec<(String, HashMap<String, String>)>>,
    }

    impl DocumentRenderer for RecordingRenderer {
        fn render(
            &self,
            template_id: &str,
            context: &HashMap<String, String>,
            output_name: &str,
        ) -> Result<PathBuf, shared_types::PipelineError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requests
                .lock()
                .unwrap()
                .push((template_id.to_string(), context.clone()));
            Ok(PathBuf::from(output_name))
        }
    }

    pub enum SendBehavior {
        Accept,
        Reject,
        Fail,
    }

    /// Transport double: counts calls, records the last message.
    pub struct RecordingTransport {
        pub behavior: SendBehavior,
        pub calls: AtomicUsize,
        pub last_message: Mutex<Option<(String, String, String, Vec<PathBuf>)>>,
    }

    impl RecordingTransport {
        pub fn new(behavior: SendBehavior) -> Self {
            Self {
                behavior,
                calls: AtomicUsize::new(0),
                last_message: Mutex::new(None),
            }
        }
    }

    impl MailTransport for RecordingTransport {
        fn send(
            &self,
            to: &str,
            subject: &str,
            body: &str,
            attachments: &[PathBuf],
        ) -> Result<bool, shared_types::PipelineError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_message.lock().unwrap() = Some((
                to.to_string(),
                subject.to_string(),
                body.to_string(),
                attachments.to_vec(),
            ));
            match self.behavior {
                SendBehavior::Accept => Ok(true),
                SendBehavior::Reject => Ok(false),
                SendBehavior::Fail => Err(shared_types::PipelineError::Transport(
                    "mail client unreachable".to_string(),
                )),
            }
        }
    }

    /// Templates directory with both email templates in place.
    pub fn templates_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("mail_english.txt"), MAIL_ENGLISH).unwrap();
        std::fs::write(dir.path().join("mail_french.txt"), MAIL_FRENCH).unwrap();
        dir
    }

    pub fn docs_config(templates_dir: PathBuf) -> DocumentsConfig {
        DocumentsConfig {
            templates_dir,
            output_dir: PathBuf::from("output"),
            candidate_name: "Jane Doe".to_string(),
            convert_command: String::new(),
        }
    }

    pub fn dupont_request() -> CreateContactRequest {
        CreateContactRequest {
            email: "a@b.com".to_string(),
            english_job: "Trading Assistant".to_string(),
            french_job: "Assistant Trader".to_string(),
            company: "Acme".to_string(),
            first_name: String::new(),
            last_name: "Dupont".to_string(),
            title: "Mr.".to_string(),
            formality: Formality::Formal,
            role: "Trading Assistant".to_string(),
            cover_letter_language: Language::French,
            email_language: Language::English,
        }
    }
}
