pub mod desktop;

use shared_types::PipelineError;
use std::path::PathBuf;

pub use desktop::DesktopMailTransport;

/// Mail transport collaborator. `Ok(false)` is an ordinary delivery failure;
/// `Err` is a transport-level fault (client unreachable, account missing).
/// Either way the caller treats the send as failed and moves on. Getting the
/// right desktop client variant active is the implementation's business.
pub trait MailTransport: Send + Sync {
    fn send(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        attachments: &[PathBuf],
    ) -> Result<bool, PipelineError>;
}
