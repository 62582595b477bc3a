use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::time::Duration;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_TIMEOUT_SECS: u64 = 120;
const DEFAULT_TIMELINE_EVENT_COUNT: usize = 6;
const DEFAULT_TIMELINE_EVENT_DELAY_MS: u64 = 1000;

#[derive(Debug, Clone)]
pub struct PromptConfig {
    pub common: core_config::Config,
    pub gemini: GeminiSettings,
    pub timeline: TimelineSettings,
}

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: Secret<String>,
    pub model: String,
    /// Base URL up to and including the API version, without trailing slash.
    pub api_base: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct TimelineSettings {
    /// Number of upstream calls made per timeline.
    pub event_count: usize,
    /// Pause between consecutive timeline calls.
    pub event_delay: Duration,
}

impl PromptConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        let api_key = get_env("GEMINI_API_KEY", None, is_prod)?;
        if api_key.trim().is_empty() {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "GEMINI_API_KEY is set but empty"
            )));
        }

        Ok(PromptConfig {
            common: common_config,
            gemini: GeminiSettings {
                api_key: Secret::new(api_key),
                model: get_env("GEMINI_MODEL", Some(DEFAULT_GEMINI_MODEL), is_prod)?,
                api_base: get_env("GEMINI_API_BASE", Some(DEFAULT_GEMINI_API_BASE), is_prod)?
                    .trim_end_matches('/')
                    .to_string(),
                timeout: Duration::from_secs(parse_env(
                    "GEMINI_TIMEOUT_SECS",
                    DEFAULT_TIMEOUT_SECS,
                    is_prod,
                )?),
            },
            timeline: TimelineSettings {
                event_count: parse_env(
                    "TIMELINE_EVENT_COUNT",
                    DEFAULT_TIMELINE_EVENT_COUNT,
                    is_prod,
                )?,
                event_delay: Duration::from_millis(parse_env(
                    "TIMELINE_EVENT_DELAY_MS",
                    DEFAULT_TIMELINE_EVENT_DELAY_MS,
                    is_prod,
                )?),
            },
        })
    }
}

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
    T: std::str::FromStr + ToString,
    T::Err: std::fmt::Display,
{
    let raw = get_env(key, Some(&default.to_string()), is_prod)?;
    raw.trim().parse().map_err(|e| {
        AppError::ConfigError(anyhow::anyhow!("{} has invalid value '{}': {}", key, raw, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_env_uses_default_outside_prod() {
        let value = get_env("PROMPT_SERVICE_TEST_UNSET_VAR", Some("fallback"), false).unwrap();
        assert_eq!(value, "fallback");
    }

    #[test]
    fn test_get_env_requires_value_without_default() {
        let err = get_env("PROMPT_SERVICE_TEST_UNSET_VAR", None, false).unwrap_err();
        assert!(err.to_string().contains("PROMPT_SERVICE_TEST_UNSET_VAR is required"));
    }

    #[test]
    fn test_get_env_requires_value_in_prod() {
        let err = get_env("PROMPT_SERVICE_TEST_UNSET_VAR", Some("fallback"), true).unwrap_err();
        assert!(err.to_string().contains("required in production"));
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("PROMPT_SERVICE_TEST_BAD_NUMBER", "ten");
        let err = parse_env::<u64>("PROMPT_SERVICE_TEST_BAD_NUMBER", 5, false).unwrap_err();
        assert!(err.to_string().contains("invalid value 'ten'"));
    }

    #[test]
    fn test_parse_env_default() {
        let value = parse_env::<usize>("PROMPT_SERVICE_TEST_UNSET_NUMBER", 6, false).unwrap();
        assert_eq!(value, 6);
    }
}
