use shared_types::PipelineError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::DocumentsConfig;
use crate::documents::{template, DocumentRenderer};

/// Template-file renderer: fills `<templates_dir>/<id>.txt`, stages the
/// filled text next to the output, and shells out to the configured converter
/// for the final format. The staged intermediate is a `NamedTempFile`, so it
/// is removed when rendering returns, on the error paths included.
pub struct FileRenderer {
    config: DocumentsConfig,
}

impl FileRenderer {
    pub fn new(config: DocumentsConfig) -> Self {
        Self { config }
    }

    fn run_converter(&self, input: &Path) -> Result<(), PipelineError> {
        let tokens = shell_words::split(&self.config.convert_command)
            .map_err(|e| PipelineError::Conversion(format!("Bad convert_command: {e}")))?;
        if tokens.is_empty() {
            return Err(PipelineError::Conversion(
                "convert_command is empty".to_string(),
            ));
        }

        // Placeholders are substituted per token, after splitting, so paths
        // with spaces never get re-tokenized.
        let outdir = self.config.output_dir.to_string_lossy().to_string();
        let input_str = input.to_string_lossy().to_string();
        let args: Vec<String> = tokens
            .into_iter()
            .map(|t| t.replace("{input}", &input_str).replace("{outdir}", &outdir))
            .collect();

        let output = Command::new(&args[0])
            .args(&args[1..])
            .output()
            .map_err(|e| PipelineError::Conversion(format!("{}: {}", args[0], e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PipelineError::Conversion(format!(
                "Converter exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(())
    }
}

impl DocumentRenderer for FileRenderer {
    fn render(
        &self,
        template_id: &str,
        context: &HashMap<String, String>,
        output_name: &str,
    ) -> Result<PathBuf, PipelineError> {
        let template_path = self.config.templates_dir.join(format!("{template_id}.txt"));
        let text = std::fs::read_to_string(&template_path).map_err(|e| {
            PipelineError::Template(format!("{}: {}", template_path.display(), e))
        })?;

        let filled = template::fill(&text, context);

        std::fs::create_dir_all(&self.config.output_dir)
            .map_err(|e| PipelineError::Conversion(format!("Output directory: {e}")))?;

        let staged = tempfile::Builder::new()
            .prefix(&format!("{template_id}_"))
            .suffix(".txt")
            .tempfile_in(&self.config.output_dir)
            .map_err(|e| PipelineError::Conversion(format!("Staging intermediate: {e}")))?;
        std::fs::write(staged.path(), &filled)
            .map_err(|e| PipelineError::Conversion(format!("Staging intermediate: {e}")))?;

        self.run_converter(staged.path())?;

        // The converter writes <staged stem>.<ext> into the output directory.
        let final_ext = Path::new(output_name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("pdf");
        let stem = staged
            .path()
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(template_id)
            .to_string();
        let produced = self.config.output_dir.join(format!("{stem}.{final_ext}"));

        if !produced.exists() {
            return Err(PipelineError::Conversion(format!(
                "Converter produced no {final_ext} for {template_id}"
            )));
        }

        let final_path = self.config.output_dir.join(output_name);
        std::fs::rename(&produced, &final_path)
            .map_err(|e| PipelineError::Conversion(format!("Placing {output_name}: {e}")))?;

        tracing::info!("Rendered {} to {}", template_id, final_path.display());
        Ok(final_path)
    }
}
