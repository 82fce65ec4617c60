// src/config.rs

use std::env;
use std::time::Duration;

use dotenvy::dotenv;

pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_GENERATOR_ADDR: &str = "0.0.0.0:3001";
pub const DEFAULT_GENERATOR_URL: &str = "http://localhost:3001";
pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_MODEL_ID: &str = "us.anthropic.claude-3-5-sonnet-20241022-v2:0";
pub const DEFAULT_MAX_TOKENS: u32 = 1000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_MODEL_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_GENERATOR_TIMEOUT_SECS: u64 = 90;

/// AWS credential pair used to sign model invocations.
#[derive(Clone, Default)]
pub struct AwsCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

impl std::fmt::Debug for AwsCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("session_token", &self.session_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the portal REST backend, including the `/api` prefix.
    pub api_base_url: String,
    pub request_timeout: Duration,

    pub generator_addr: String,
    /// Where the portal reaches the generator service.
    pub generator_url: String,
    /// How long the portal waits for `POST /api/generate`; outlasts `model_timeout`.
    pub generator_timeout: Duration,
    pub aws_region: String,
    pub aws_credentials: AwsCredentials,
    pub model_id: String,
    pub max_tokens: u32,
    pub model_timeout: Duration,
    /// Overrides the regional runtime endpoint (local proxies, tests).
    pub model_endpoint: Option<String>,

    pub rust_log: String,
    pub log_dir: String,

    /// Problems found while reading the environment, logged once tracing is up.
    pub warnings: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            generator_addr: DEFAULT_GENERATOR_ADDR.to_string(),
            generator_url: DEFAULT_GENERATOR_URL.to_string(),
            generator_timeout: Duration::from_secs(DEFAULT_GENERATOR_TIMEOUT_SECS),
            aws_region: DEFAULT_REGION.to_string(),
            aws_credentials: AwsCredentials::default(),
            model_id: DEFAULT_MODEL_ID.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            model_timeout: Duration::from_secs(DEFAULT_MODEL_TIMEOUT_SECS),
            model_endpoint: None,
            rust_log: "info".to_string(),
            log_dir: "logs".to_string(),
            warnings: Vec::new(),
        }
    }
}

impl Config {
    /// Reads the configuration from the process environment (and `.env`, if present).
    ///
    /// Every key has a default; missing AWS credentials only surface when the
    /// model is actually invoked.
    pub fn from_env() -> Self {
        dotenv().ok();

        let defaults = Self::default();
        let mut warnings = Vec::new();

        let request_timeout = env_positive::<u64>("PORTAL_TIMEOUT_SECS", &mut warnings)
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout);
        let model_timeout = env_positive::<u64>("BEDROCK_TIMEOUT_SECS", &mut warnings)
            .map(Duration::from_secs)
            .unwrap_or(defaults.model_timeout);
        let generator_timeout = env_positive::<u64>("GENERATOR_TIMEOUT_SECS", &mut warnings)
            .map(Duration::from_secs)
            .unwrap_or(defaults.generator_timeout);
        if generator_timeout < model_timeout {
            warnings.push(format!(
                "GENERATOR_TIMEOUT_SECS ({}s) is shorter than BEDROCK_TIMEOUT_SECS ({}s); slow replies will be cut off",
                generator_timeout.as_secs(),
                model_timeout.as_secs()
            ));
        }
        let max_tokens = env_positive("BEDROCK_MAX_TOKENS", &mut warnings).unwrap_or(defaults.max_tokens);

        let aws_credentials = AwsCredentials {
            access_key_id: env::var("AWS_ACCESS_KEY_ID").unwrap_or_default(),
            secret_access_key: env::var("AWS_SECRET_ACCESS_KEY").unwrap_or_default(),
            session_token: env::var("AWS_SESSION_TOKEN")
                .ok()
                .filter(|v| !v.trim().is_empty()),
        };

        Self {
            api_base_url: env::var("PORTAL_API_URL").unwrap_or(defaults.api_base_url),
            request_timeout,
            generator_addr: env::var("GENERATOR_ADDR").unwrap_or(defaults.generator_addr),
            generator_url: env::var("GENERATOR_URL").unwrap_or(defaults.generator_url),
            generator_timeout,
            aws_region: env::var("AWS_REGION").unwrap_or(defaults.aws_region),
            aws_credentials,
            model_id: env::var("BEDROCK_MODEL_ID").unwrap_or(defaults.model_id),
            max_tokens,
            model_timeout,
            model_endpoint: env::var("BEDROCK_ENDPOINT")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            rust_log: env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            log_dir: env::var("LOG_DIR").unwrap_or(defaults.log_dir),
            warnings,
        }
    }

    /// Emits the warnings collected by `from_env`. Call after `init_tracing`.
    pub fn log_warnings(&self) {
        for warning in &self.warnings {
            tracing::warn!("{}", warning);
        }
    }
}

fn env_positive<T>(key: &str, warnings: &mut Vec<String>) -> Option<T>
where
    T: std::str::FromStr + PartialEq + From<u8>,
{
    parse_positive(key, env::var(key).ok(), warnings)
}

/// Parses a strictly positive number. Bad or zero values are skipped and noted.
fn parse_positive<T>(key: &str, raw: Option<String>, warnings: &mut Vec<String>) -> Option<T>
where
    T: std::str::FromStr + PartialEq + From<u8>,
{
    let raw = raw?;
    match raw.trim().parse::<T>() {
        Ok(value) if value != T::from(0) => Some(value),
        _ => {
            warnings.push(format!("Ignoring invalid value for {}: {:?}", key, raw));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_backend() {
        let config = Config::default();
        assert_eq!(config.api_base_url, "http://localhost:3000/api");
        assert_eq!(config.aws_region, "us-east-1");
        assert_eq!(config.max_tokens, 1000);
        assert_eq!(config.generator_url, "http://localhost:3001");
        assert!(config.aws_credentials.access_key_id.is_empty());
    }

    #[test]
    fn generator_timeout_outlasts_model_timeout() {
        let config = Config::default();
        assert_eq!(config.model_timeout, Duration::from_secs(60));
        assert!(config.generator_timeout > config.model_timeout);
        assert!(config.generator_timeout > config.request_timeout);
    }

    #[test]
    fn zero_and_garbage_numbers_are_rejected_with_a_warning() {
        let mut warnings = Vec::new();
        assert_eq!(parse_positive::<u64>("PORTAL_TIMEOUT_SECS", Some("0".into()), &mut warnings), None);
        assert_eq!(parse_positive::<u32>("BEDROCK_MAX_TOKENS", Some("lots".into()), &mut warnings), None);
        assert_eq!(parse_positive::<u64>("PORTAL_TIMEOUT_SECS", Some(" 15 ".into()), &mut warnings), Some(15));
        assert_eq!(parse_positive::<u64>("PORTAL_TIMEOUT_SECS", None, &mut warnings), None);
        assert_eq!(
            warnings,
            vec![
                "Ignoring invalid value for PORTAL_TIMEOUT_SECS: \"0\"".to_string(),
                "Ignoring invalid value for BEDROCK_MAX_TOKENS: \"lots\"".to_string(),
            ]
        );
    }

    #[test]
    fn debug_output_hides_secrets() {
        let creds = AwsCredentials {
            access_key_id: "AKIDEXAMPLE".to_string(),
            secret_access_key: "very-secret".to_string(),
            session_token: Some("token".to_string()),
        };
        let rendered = format!("{:?}", creds);
        assert!(rendered.contains("AKIDEXAMPLE"));
        assert!(!rendered.contains("very-secret"));
        assert!(!rendered.contains("\"token\""));
    }
}
