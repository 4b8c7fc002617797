use serde::{Deserialize, Serialize};

pub mod contact;
pub mod pipeline;

pub use contact::{
    Contact, ContactsResponse, CreateContactRequest, Formality, Language, UpdateContactRequest,
};
pub use pipeline::{
    PipelineError, PipelineOutcome, PipelineStatus, SendSelectedRequest, SendSummary,
};

/// Error response for API endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
