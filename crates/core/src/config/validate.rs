use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Catalog API key is set
/// - An enabled announcer has a bot token, a chat and a non-zero post limit
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.catalog.api_key.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "catalog.api_key is required".to_string(),
        ));
    }

    if let Some(announcer) = config.announcer.as_ref().filter(|a| a.enabled) {
        if announcer.bot_token.is_empty() || announcer.chat_id.is_empty() {
            return Err(ConfigError::ValidationError(
                "announcer requires bot_token and chat_id when enabled".to_string(),
            ));
        }
        if announcer.post_limit == 0 {
            return Err(ConfigError::ValidationError(
                "announcer.post_limit cannot be 0".to_string(),
            ));
        }
    }

    Ok(())
}
