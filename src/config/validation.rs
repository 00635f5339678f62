use crate::config::types::{ChatConfig, Config, CrawlerConfig, RankerConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_snapshot_config(&config.snapshot)?;
    validate_ranker_config(&config.ranker)?;
    validate_chat_config(&config.chat)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    let seed = Url::parse(&config.seed_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid seed-url: {}", e)))?;

    if seed.scheme() != "http" && seed.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "seed-url must be http or https, got '{}'",
            seed.scheme()
        )));
    }

    if seed.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(
            "seed-url must have a host".to_string(),
        ));
    }

    if let Some(max_pages) = config.max_pages {
        if max_pages < 1 {
            return Err(ConfigError::Validation(format!(
                "max-pages must be >= 1 when set, got {}",
                max_pages
            )));
        }
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler-name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler-name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    // Validate contact URL
    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact-url: {}", e)))?;

    // Validate contact email (basic validation)
    validate_email(&config.contact_email)?;

    Ok(())
}

/// Validates snapshot configuration
fn validate_snapshot_config(
    config: &crate::config::types::SnapshotConfig,
) -> Result<(), ConfigError> {
    if config.path.is_empty() {
        return Err(ConfigError::Validation(
            "snapshot path cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Validates ranker configuration
fn validate_ranker_config(config: &RankerConfig) -> Result<(), ConfigError> {
    if config.top_k < 1 {
        return Err(ConfigError::Validation(format!(
            "top-k must be >= 1, got {}",
            config.top_k
        )));
    }

    if config.content_preview_chars < 1 {
        return Err(ConfigError::Validation(format!(
            "content-preview-chars must be >= 1, got {}",
            config.content_preview_chars
        )));
    }

    Ok(())
}

/// Validates chat configuration
fn validate_chat_config(config: &ChatConfig) -> Result<(), ConfigError> {
    Url::parse(&config.api_base)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid api-base: {}", e)))?;

    if config.model.is_empty() {
        return Err(ConfigError::Validation("model cannot be empty".to_string()));
    }

    if config.api_key_env.is_empty() {
        return Err(ConfigError::Validation(
            "api-key-env cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Basic email validation: one '@' with non-empty local and domain parts
fn validate_email(email: &str) -> Result<(), ConfigError> {
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");

    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(ConfigError::Validation(format!(
            "contact-email is not a valid email address: '{}'",
            email
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::{SnapshotConfig, UserAgentConfig};

    fn create_valid_config() -> Config {
        Config {
            crawler: CrawlerConfig {
                seed_url: "https://policyadvisor.com".to_string(),
                max_pages: Some(500),
                fetch_delay_ms: 2000,
            },
            user_agent: UserAgentConfig {
                crawler_name: "PolicyScout".to_string(),
                crawler_version: "1.0".to_string(),
                contact_url: "https://example.com/about".to_string(),
                contact_email: "admin@example.com".to_string(),
            },
            snapshot: SnapshotConfig {
                path: "./data/corpus.json".to_string(),
            },
            ranker: RankerConfig::default(),
            chat: ChatConfig::default(),
        }
    }

    #[test]
    fn test_valid_config_passes() {
        let config = create_valid_config();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_invalid_seed_url() {
        let mut config = create_valid_config();
        config.crawler.seed_url = "not a url".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_non_http_seed_url() {
        let mut config = create_valid_config();
        config.crawler.seed_url = "ftp://example.com".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_zero_max_pages() {
        let mut config = create_valid_config();
        config.crawler.max_pages = Some(0);
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_unbounded_max_pages_allowed() {
        let mut config = create_valid_config();
        config.crawler.max_pages = None;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_empty_crawler_name() {
        let mut config = create_valid_config();
        config.user_agent.crawler_name = String::new();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_crawler_name_with_spaces() {
        let mut config = create_valid_config();
        config.user_agent.crawler_name = "Policy Scout".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_invalid_email() {
        let mut config = create_valid_config();
        config.user_agent.contact_email = "not-an-email".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_snapshot_path() {
        let mut config = create_valid_config();
        config.snapshot.path = String::new();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_top_k() {
        let mut config = create_valid_config();
        config.ranker.top_k = 0;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_empty_api_key_env() {
        let mut config = create_valid_config();
        config.chat.api_key_env = String::new();
        assert!(validate(&config).is_err());
    }
}
