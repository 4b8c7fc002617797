use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub cors: Option<CorsConfig>,
    #[serde(default)]
    pub documents: DocumentsConfig,
    #[serde(default)]
    pub mail: MailConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DocumentsConfig {
    /// Directory holding the CV, cover letter and email templates.
    pub templates_dir: PathBuf,
    /// Directory the generated documents land in. Contents are disposable;
    /// every run regenerates them.
    pub output_dir: PathBuf,
    /// Name stamped into the generated file names.
    pub candidate_name: String,
    /// External command turning a filled template into its final form.
    /// `{input}` and `{outdir}` are substituted before execution.
    pub convert_command: String,
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        Self {
            templates_dir: PathBuf::from("templates"),
            output_dir: PathBuf::from("output"),
            candidate_name: "Candidate".to_string(),
            convert_command:
                "libreoffice --headless --convert-to pdf --outdir {outdir} {input}".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MailConfig {
    /// Account the desktop client must send from.
    pub account: String,
    /// Command that launches the desired mail client variant.
    pub client_command: String,
    /// Process name of the desired variant, for the readiness probe.
    pub client_process: String,
    /// Process name of the variant that must not be running while we send.
    pub conflicting_process: Option<String>,
    /// Seconds to wait after launching the client before the first send.
    pub startup_wait_secs: u64,
    /// Command performing one send. `{account}`, `{to}`, `{subject}`,
    /// `{body}` and `{attachments}` are substituted before execution.
    pub send_command: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            account: String::new(),
            client_command: "outlook".to_string(),
            client_process: "outlook".to_string(),
            conflicting_process: Some("olk".to_string()),
            startup_wait_secs: 5,
            send_command:
                "mailsend --account {account} --to {to} --subject {subject} --body {body} {attachments}"
                    .to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PipelineConfig {
    /// Pause between consecutive send attempts, to stay under the mail
    /// client's rate limits.
    pub send_delay_secs: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self { send_delay_secs: 2 }
    }
}

impl AppConfig {
    pub fn load() -> Result<(Self, PathBuf), ConfigError> {
        let config_path = get_config_path();

        // Create config directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Message(format!("Failed to create config directory: {e}"))
            })?;
        }

        // Create default config file if it doesn't exist
        if !config_path.exists() {
            let default_config = r#"
[server]
host = "127.0.0.1"
port = 8080

[documents]
templates_dir = "templates"
output_dir = "output"
candidate_name = "Candidate"
convert_command = "libreoffice --headless --convert-to pdf --outdir {outdir} {input}"

[mail]
account = ""
client_command = "outlook"
client_process = "outlook"
conflicting_process = "olk"
startup_wait_secs = 5
send_command = "mailsend --account {account} --to {to} --subject {subject} --body {body} {attachments}"

[pipeline]
send_delay_secs = 2
"#;
            std::fs::write(&config_path, default_config).map_err(|e| {
                ConfigError::Message(format!("Failed to write default config: {e}"))
            })?;
        }

        let builder = Config::builder()
            .add_source(File::from(config_path.clone()))
            .build()?;

        let config: AppConfig = builder.try_deserialize()?;

        Ok((config, config_path))
    }
}

pub fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("outreach").join("api.toml")
    } else {
        PathBuf::from("api.toml")
    }
}
