//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// JWT configuration.
    pub jwt: JwtSettings,
    /// Report rendering configuration.
    #[serde(default)]
    pub reports: ReportConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// JWT settings as read from configuration sources.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Access token expiration in seconds.
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry_secs: u64,
}

fn default_access_token_expiry() -> u64 {
    28_800 // one working shift
}

/// Settings for the payment-schedule report renderers.
///
/// Replaces the process-wide site settings the renderers would otherwise
/// read: everything they need is passed in explicitly.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// HTML template used for PDF reports.
    #[serde(default = "default_template_path")]
    pub template_path: String,
    /// HTML-to-PDF converter binary.
    #[serde(default = "default_converter_path")]
    pub converter_path: String,
    /// Arguments passed to the converter. HTML is piped on stdin, PDF read from stdout.
    #[serde(default = "default_converter_args")]
    pub converter_args: Vec<String>,
    /// Display name of the deposit behavior.
    #[serde(default = "default_deposit_label")]
    pub deposit_label: String,
    /// Display name of the credit behavior.
    #[serde(default = "default_credit_label")]
    pub credit_label: String,
}

fn default_template_path() -> String {
    "templates/payment_schedule.html".to_string()
}

fn default_converter_path() -> String {
    "wkhtmltopdf".to_string()
}

fn default_converter_args() -> Vec<String> {
    ["--quiet", "--encoding", "utf-8", "-", "-"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_deposit_label() -> String {
    "Депозит".to_string()
}

fn default_credit_label() -> String {
    "Кредит".to_string()
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            template_path: default_template_path(),
            converter_path: default_converter_path(),
            converter_args: default_converter_args(),
            deposit_label: default_deposit_label(),
            credit_label: default_credit_label(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones overriding earlier: `config/default`,
    /// `config/{RUN_MODE}`, then `MFO__SECTION__KEY` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("MFO")
                    .separator("__")
                    .list_separator(" ")
                    .with_list_parse_key("reports.converter_args")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
