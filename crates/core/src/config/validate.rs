use super::{types::Config, ConfigError};

/// Highest split penalty alass accepts
const MAX_SPLIT_PENALTY: f64 = 1000.0;

/// Validate configuration
/// Currently validates:
/// - Preferred language is a short alphabetic code
/// - Tool timeouts are not 0
/// - Split penalty is within (0, 1000]
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let language = &config.selection.preferred_language;
    if language.is_empty()
        || language.len() > 8
        || !language.chars().all(|c| c.is_ascii_alphabetic() || c == '-')
    {
        return Err(ConfigError::ValidationError(format!(
            "selection.preferred_language is not a language code: {:?}",
            language
        )));
    }

    if config.tools.probe_timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "tools.probe_timeout_secs cannot be 0".to_string(),
        ));
    }

    if config.tools.extract_timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "tools.extract_timeout_secs cannot be 0".to_string(),
        ));
    }

    let penalty = config.sync.split_penalty;
    if !(penalty > 0.0 && penalty <= MAX_SPLIT_PENALTY) {
        return Err(ConfigError::ValidationError(format!(
            "sync.split_penalty must be in (0, {}], got {}",
            MAX_SPLIT_PENALTY, penalty
        )));
    }

    Ok(())
}
