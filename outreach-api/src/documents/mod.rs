pub mod content;
pub mod renderer;
pub mod template;

use shared_types::PipelineError;
use std::collections::HashMap;
use std::path::PathBuf;

pub use content::{ContentRenderer, EmailContent};
pub use renderer::FileRenderer;

/// External document rendering collaborator: fill the named template with the
/// context map and produce the final-format file under `output_name`.
pub trait DocumentRenderer: Send + Sync {
    fn render(
        &self,
        template_id: &str,
        context: &HashMap<String, String>,
        output_name: &str,
    ) -> Result<PathBuf, PipelineError>;
}
