//! Quiz engine configuration

use std::time::Duration;

use anyhow::Context;

pub const DEFAULT_TEMPERATURE: f32 = 0.8;
pub const DEFAULT_TURN_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, PartialEq)]
pub struct QuizConfig {
    /// Model override; `None` uses the provider's default model
    pub model: Option<String>,
    pub temperature: f32,
    /// Output cap passed to the model; `None` uses the provider setting
    pub max_tokens: Option<u32>,
    /// Upper bound on one whole turn, note fetch included
    pub turn_timeout: Duration,
    /// Extra model attempts after a transient failure
    pub model_retries: u32,
    /// Delay before the first retry, doubled on each subsequent one
    pub retry_backoff: Duration,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            model: None,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: None,
            turn_timeout: DEFAULT_TURN_TIMEOUT,
            model_retries: 0,
            retry_backoff: DEFAULT_RETRY_BACKOFF,
        }
    }
}

impl QuizConfig {
    /// Load from `QUIZ_*` environment variables, falling back to defaults
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let model = std::env::var("QUIZ_MODEL").ok().filter(|m| !m.trim().is_empty());

        let temperature = match std::env::var("QUIZ_TEMPERATURE") {
            Ok(raw) => {
                let value: f32 = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("QUIZ_TEMPERATURE is not a number: {raw}"))?;
                if !(0.0..=2.0).contains(&value) {
                    anyhow::bail!("QUIZ_TEMPERATURE must be between 0.0 and 2.0, got {value}");
                }
                value
            }
            Err(_) => defaults.temperature,
        };

        let max_tokens = optional_u64("QUIZ_MAX_TOKENS")?
            .map(|v| u32::try_from(v).context("QUIZ_MAX_TOKENS is too large"))
            .transpose()?;

        let turn_timeout = match optional_u64("QUIZ_TURN_TIMEOUT_SECS")? {
            Some(0) => anyhow::bail!("QUIZ_TURN_TIMEOUT_SECS must be greater than zero"),
            Some(secs) => Duration::from_secs(secs),
            None => defaults.turn_timeout,
        };

        let model_retries = optional_u64("QUIZ_MODEL_RETRIES")?
            .map(|v| u32::try_from(v).context("QUIZ_MODEL_RETRIES is too large"))
            .transpose()?
            .unwrap_or(defaults.model_retries);

        let retry_backoff = optional_u64("QUIZ_RETRY_BACKOFF_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.retry_backoff);

        Ok(Self {
            model,
            temperature,
            max_tokens,
            turn_timeout,
            model_retries,
            retry_backoff,
        })
    }
}

fn optional_u64(key: &str) -> anyhow::Result<Option<u64>> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{key} must be a non-negative integer, got {raw:?}")),
        Err(_) => Ok(None),
    }
}
