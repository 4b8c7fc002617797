use shared_types::{Contact, PipelineOutcome, PipelineStatus};
use std::time::Duration;

use crate::database::Database;
use crate::documents::ContentRenderer;
use crate::mail::MailTransport;
use crate::pipeline::process_contact;

/// Batch driver. Strictly sequential: the mail client holds a single session
/// and the converter is a singleton process, so records are never overlapped.
/// One record's failure never aborts the batch.
pub struct QueueRunner<'a> {
    db: &'a Database,
    content: &'a ContentRenderer<'a>,
    transport: &'a dyn MailTransport,
    delay: Duration,
}

impl<'a> QueueRunner<'a> {
    pub fn new(
        db: &'a Database,
        content: &'a ContentRenderer<'a>,
        transport: &'a dyn MailTransport,
        delay: Duration,
    ) -> Self {
        Self {
            db,
            content,
            transport,
            delay,
        }
    }

    /// Process the given records in order, returning exactly one outcome per
    /// record, in the same order. Works the same for the full table or a
    /// caller-chosen subset. The pacing delay sits between consecutive
    /// attempts only: not before the first, not after the last.
    pub fn run(&self, records: &[Contact]) -> Vec<PipelineOutcome> {
        let mut results = Vec::with_capacity(records.len());

        for (index, record) in records.iter().enumerate() {
            if index > 0 && !self.delay.is_zero() {
                std::thread::sleep(self.delay);
            }

            let outcome = process_contact(self.db, self.content, self.transport, record);
            if outcome.status == PipelineStatus::Error {
                tracing::error!(
                    "Error processing contact {}: {}",
                    outcome.id,
                    outcome.message
                );
            }
            results.push(outcome);
        }

        tracing::info!("Queue run finished: {} records attempted", results.len());
        results
    }
}
