use shared_types::PipelineError;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::Duration;

use crate::config::MailConfig;
use crate::mail::MailTransport;

/// Drives the locally installed desktop mail client. The machine may carry
/// two variants of the client; only `client_process` can hold the automation
/// session, so before sending we close the conflicting variant, make sure the
/// right one is running, and give it time to come up. All of that stays
/// behind the `MailTransport` trait; the pipeline never sees process names.
pub struct DesktopMailTransport {
    config: MailConfig,
}

impl DesktopMailTransport {
    pub fn new(config: MailConfig) -> Self {
        Self { config }
    }

    fn process_running(&self, name: &str) -> bool {
        Command::new("pgrep")
            .arg("-x")
            .arg(name)
            .stdout(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    fn close_conflicting_variant(&self) -> Result<(), PipelineError> {
        let Some(name) = &self.config.conflicting_process else {
            return Ok(());
        };
        if !self.process_running(name) {
            return Ok(());
        }

        tracing::info!("Closing conflicting mail client variant: {}", name);
        Command::new("pkill")
            .arg("-x")
            .arg(name)
            .status()
            .map_err(|e| PipelineError::Transport(format!("Closing {name}: {e}")))?;
        std::thread::sleep(Duration::from_secs(2));
        Ok(())
    }

    fn ensure_client_running(&self) -> Result<(), PipelineError> {
        if self.process_running(&self.config.client_process) {
            return Ok(());
        }

        tracing::info!("Starting mail client: {}", self.config.client_command);
        let tokens = shell_words::split(&self.config.client_command)
            .map_err(|e| PipelineError::Transport(format!("Bad client_command: {e}")))?;
        let Some((program, args)) = tokens.split_first() else {
            return Err(PipelineError::Transport(
                "client_command is empty".to_string(),
            ));
        };
        Command::new(program)
            .args(args)
            .spawn()
            .map_err(|e| PipelineError::Transport(format!("Starting mail client: {e}")))?;

        std::thread::sleep(Duration::from_secs(self.config.startup_wait_secs));
        Ok(())
    }

    fn build_send_args(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        attachments: &[PathBuf],
    ) -> Result<Vec<String>, PipelineError> {
        let tokens = shell_words::split(&self.config.send_command)
            .map_err(|e| PipelineError::Transport(format!("Bad send_command: {e}")))?;
        if tokens.is_empty() {
            return Err(PipelineError::Transport("send_command is empty".to_string()));
        }

        // Substitute per token, after splitting, so subjects and bodies with
        // spaces stay single arguments. `{attachments}` expands to one
        // argument per existing file; a path that is not on disk would make
        // the client reject the whole message, so it is dropped instead.
        let mut args = Vec::with_capacity(tokens.len() + attachments.len());
        for token in tokens {
            if token == "{attachments}" {
                for attachment in attachments {
                    if !attachment.exists() {
                        tracing::warn!("Attachment not found, skipping: {}", attachment.display());
                        continue;
                    }
                    args.push(attachment.to_string_lossy().to_string());
                }
                continue;
            }
            args.push(
                token
                    .replace("{account}", &self.config.account)
                    .replace("{to}", to)
                    .replace("{subject}", subject)
                    .replace("{body}", body),
            );
        }
        Ok(args)
    }
}

impl MailTransport for DesktopMailTransport {
    fn send(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        attachments: &[PathBuf],
    ) -> Result<bool, PipelineError> {
        self.close_conflicting_variant()?;
        self.ensure_client_running()?;

        let args = self.build_send_args(to, subject, body, attachments)?;
        let output = Command::new(&args[0])
            .args(&args[1..])
            .output()
            .map_err(|e| PipelineError::Transport(format!("{}: {}", args[0], e)))?;

        if output.status.success() {
            tracing::info!("Email sent to {} from account {}", to, self.config.account);
            Ok(true)
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::error!("Send to {} failed: {}", to, stderr.trim());
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport(send_command: &str) -> DesktopMailTransport {
        DesktopMailTransport::new(MailConfig {
            account: "me@example.com".to_string(),
            client_command: "true".to_string(),
            client_process: "init".to_string(),
            conflicting_process: None,
            startup_wait_secs: 0,
            send_command: send_command.to_string(),
        })
    }

    #[test]
    fn test_send_args_substitute_per_token() {
        let dir = tempfile::tempdir().unwrap();
        let cv = dir.path().join("CV - Jane.pdf");
        let letter = dir.path().join("CL.pdf");
        std::fs::write(&cv, b"cv").unwrap();
        std::fs::write(&letter, b"letter").unwrap();

        let t = transport("mailsend --account {account} --to {to} --subject {subject} {attachments}");
        let args = t
            .build_send_args(
                "a@b.com",
                "Application for Trading Assistant",
                "body text",
                &[cv.clone(), letter.clone()],
            )
            .unwrap();

        assert_eq!(
            args,
            vec![
                "mailsend".to_string(),
                "--account".to_string(),
                "me@example.com".to_string(),
                "--to".to_string(),
                "a@b.com".to_string(),
                "--subject".to_string(),
                "Application for Trading Assistant".to_string(),
                cv.to_string_lossy().to_string(),
                letter.to_string_lossy().to_string(),
            ]
        );
    }

    #[test]
    fn test_missing_attachments_are_dropped_from_the_send_command() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("CV.pdf");
        std::fs::write(&present, b"cv").unwrap();
        let missing = dir.path().join("never-rendered.pdf");

        let t = transport("mailsend {attachments}");
        let args = t
            .build_send_args("a@b.com", "s", "b", &[present.clone(), missing])
            .unwrap();

        assert_eq!(
            args,
            vec![
                "mailsend".to_string(),
                present.to_string_lossy().to_string(),
            ]
        );
    }

    #[test]
    fn test_empty_send_command_is_a_transport_error() {
        let t = transport("");
        assert!(matches!(
            t.build_send_args("a@b.com", "s", "b", &[]),
            Err(PipelineError::Transport(_))
        ));
    }
}
