use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_REGION: &str = "ap-southeast-2";
const DEFAULT_MODEL_ID: &str = "mistral.mistral-7b-instruct-v0:2";
const DEFAULT_BUCKET: &str = "aws_bedrock_blogs_generated";
const DEFAULT_KEY_PREFIX: &str = "blog-output";

#[derive(Debug, Clone, Deserialize)]
pub struct BlogConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub bedrock: BedrockConfig,
    pub generation: GenerationConfig,
    pub storage: StorageConfig,
    pub failure_policy: FailurePolicy,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BedrockConfig {
    pub region: String,
    pub model_id: String,
    pub read_timeout_secs: u64,
    /// Retries after the first call; the SDK counts total attempts.
    pub max_retries: u32,
    /// Overrides the regional endpoint, e.g. for a local stand-in.
    #[serde(default)]
    pub endpoint_url: Option<String>,
}

impl BedrockConfig {
    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}

/// Decoding parameters sent with every inference request.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct GenerationConfig {
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_tokens: 200,
            temperature: 0.5,
            top_p: 0.9,
            top_k: 50,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub bucket: String,
    pub local_path: String,
    pub key_prefix: String,
    pub key_strategy: ObjectKeyStrategy,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Local,
    S3,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKeyStrategy {
    /// `<prefix>/<YYYY-MM-DD HH:MM:SS>.txt`. Collides within the same second.
    Timestamp,
    /// Timestamp plus the invocation id. Opt-in.
    Unique,
}

/// How generation and persistence failures reach the caller.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Log, substitute the sentinel text, and always answer 200.
    Mask,
    /// Answer with a structured error envelope for every failure category.
    Surface,
}

impl BlogConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = common_config.is_prod();
        let defaults = GenerationConfig::default();

        let config = BlogConfig {
            common: common_config,
            bedrock: BedrockConfig {
                region: get_env("BEDROCK_REGION", Some(DEFAULT_REGION), is_prod)?,
                model_id: get_env("BEDROCK_MODEL_ID", Some(DEFAULT_MODEL_ID), is_prod)?,
                read_timeout_secs: parse_env("BEDROCK_READ_TIMEOUT_SECS", 300, is_prod)?,
                max_retries: parse_env("BEDROCK_MAX_RETRIES", 3, is_prod)?,
                endpoint_url: env::var("BEDROCK_ENDPOINT_URL").ok(),
            },
            generation: GenerationConfig {
                max_tokens: parse_env("GENERATION_MAX_TOKENS", defaults.max_tokens, is_prod)?,
                temperature: parse_env("GENERATION_TEMPERATURE", defaults.temperature, is_prod)?,
                top_p: parse_env("GENERATION_TOP_P", defaults.top_p, is_prod)?,
                top_k: parse_env("GENERATION_TOP_K", defaults.top_k, is_prod)?,
            },
            storage: StorageConfig {
                backend: parse_env("STORAGE_BACKEND", StorageBackend::S3, is_prod)?,
                bucket: get_env("STORAGE_S3_BUCKET", Some(DEFAULT_BUCKET), is_prod)?,
                local_path: get_env("STORAGE_LOCAL_PATH", Some("storage"), false)?,
                key_prefix: get_env("STORAGE_KEY_PREFIX", Some(DEFAULT_KEY_PREFIX), false)?,
                key_strategy: parse_env("OBJECT_KEY_STRATEGY", ObjectKeyStrategy::Timestamp, false)?,
            },
            failure_policy: parse_env("FAILURE_POLICY", FailurePolicy::Mask, false)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Settings used when nothing is configured.
    pub fn defaults() -> Self {
        BlogConfig {
            common: core_config::Config::default(),
            bedrock: BedrockConfig {
                region: DEFAULT_REGION.to_string(),
                model_id: DEFAULT_MODEL_ID.to_string(),
                read_timeout_secs: 300,
                max_retries: 3,
                endpoint_url: None,
            },
            generation: GenerationConfig::default(),
            storage: StorageConfig {
                backend: StorageBackend::S3,
                bucket: DEFAULT_BUCKET.to_string(),
                local_path: "storage".to_string(),
                key_prefix: DEFAULT_KEY_PREFIX.to_string(),
                key_strategy: ObjectKeyStrategy::Timestamp,
            },
            failure_policy: FailurePolicy::Mask,
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        let required = [
            ("BEDROCK_REGION", &self.bedrock.region),
            ("BEDROCK_MODEL_ID", &self.bedrock.model_id),
            ("STORAGE_S3_BUCKET", &self.storage.bucket),
            ("STORAGE_KEY_PREFIX", &self.storage.key_prefix),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(invalid(format!("{} must not be empty", key)));
            }
        }

        if self.bedrock.read_timeout_secs == 0 {
            return Err(invalid("BEDROCK_READ_TIMEOUT_SECS must be positive"));
        }

        let generation = &self.generation;
        if generation.max_tokens == 0 {
            return Err(invalid("GENERATION_MAX_TOKENS must be positive"));
        }
        if !(0.0..=1.0).contains(&generation.temperature) {
            return Err(invalid("GENERATION_TEMPERATURE must be within [0, 1]"));
        }
        if !(generation.top_p > 0.0 && generation.top_p <= 1.0) {
            return Err(invalid("GENERATION_TOP_P must be within (0, 1]"));
        }
        if generation.top_k == 0 {
            return Err(invalid("GENERATION_TOP_K must be positive"));
        }

        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> AppError {
    let msg: String = msg.into();
    AppError::ConfigError(anyhow::anyhow!(msg))
}

macro_rules! impl_from_str {
    ($ty:ty, $what:literal, { $($name:literal => $variant:expr),+ $(,)? }) => {
        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($name => Ok($variant),)+
                    _ => Err(format!("Invalid {}: {}", $what, s)),
                }
            }
        }
    };
}

impl_from_str!(StorageBackend, "storage backend", {
    "local" => StorageBackend::Local,
    "s3" => StorageBackend::S3,
});

impl_from_str!(ObjectKeyStrategy, "object key strategy", {
    "timestamp" => ObjectKeyStrategy::Timestamp,
    "unique" => ObjectKeyStrategy::Unique,
});

impl_from_str!(FailurePolicy, "failure policy", {
    "mask" => FailurePolicy::Mask,
    "surface" => FailurePolicy::Surface,
});

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}

fn parse_env<T>(key: &str, default: T, is_prod: bool) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(val) => val.trim().parse().map_err(|e: T::Err| {
            AppError::ConfigError(anyhow::anyhow!("{} is invalid: {}", key, e))
        }),
        Err(_) if is_prod => Err(AppError::ConfigError(anyhow::anyhow!(
            "{} is required in production but not set",
            key
        ))),
        Err(_) => Ok(default),
    }
}
