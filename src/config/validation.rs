use crate::config::types::{
    CatalogConfig, Config, HistoryConfig, MetadataConfig, PacingConfig, SourceConfig,
    UserAgentConfig,
};
use crate::ConfigError;
use url::Url;

/// Longest pause any pacing knob may request (one minute)
const MAX_DELAY_MS: u64 = 60_000;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_source_config(&config.source)?;
    validate_catalog_config(&config.catalog)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_metadata_config(&config.metadata)?;
    validate_pacing_config(&config.pacing)?;
    validate_history_config(&config.history)?;
    Ok(())
}

fn validate_source_config(config: &SourceConfig) -> Result<(), ConfigError> {
    require_non_empty("source.owner", &config.owner)?;
    require_non_empty("source.repo", &config.repo)?;
    require_non_empty("source.path", &config.path)?;
    validate_http_url("source.api-base", &config.api_base)?;

    if let Some(branch) = &config.branch {
        require_non_empty("source.branch", branch)?;
    }

    Ok(())
}

fn validate_catalog_config(config: &CatalogConfig) -> Result<(), ConfigError> {
    require_non_empty("catalog.path", &config.path)
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Name: non-empty, alphanumeric + hyphens only
    require_non_empty("user-agent.name", &config.name)?;

    if !config.name.chars().all(|c| c.is_alphanumeric() || c == '-') {
        return Err(ConfigError::Validation(format!(
            "user-agent.name must contain only alphanumeric characters and hyphens, got '{}'",
            config.name
        )));
    }

    require_non_empty("user-agent.version", &config.version)?;
    validate_http_url("user-agent.contact-url", &config.contact_url)?;
    validate_email(&config.contact_email)?;

    Ok(())
}

fn validate_metadata_config(config: &MetadataConfig) -> Result<(), ConfigError> {
    validate_http_url("metadata.oembed-endpoint", &config.oembed_endpoint)?;
    validate_http_url("metadata.thumbnail-base", &config.thumbnail_base)?;

    for pattern in &config.video_hosts {
        validate_domain_pattern(pattern)?;
    }

    if config.request_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "metadata.request-timeout-secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

fn validate_pacing_config(config: &PacingConfig) -> Result<(), ConfigError> {
    for (key, value) in [
        ("pacing.link-delay-ms", config.link_delay_ms),
        ("pacing.revision-delay-ms", config.revision_delay_ms),
        ("pacing.date-delay-ms", config.date_delay_ms),
    ] {
        if value > MAX_DELAY_MS {
            return Err(ConfigError::Validation(format!(
                "{} must be <= {}ms, got {}ms",
                key, MAX_DELAY_MS, value
            )));
        }
    }

    Ok(())
}

fn validate_history_config(config: &HistoryConfig) -> Result<(), ConfigError> {
    if config.per_page < 1 || config.per_page > 100 {
        return Err(ConfigError::Validation(format!(
            "history.per-page must be between 1 and 100, got {}",
            config.per_page
        )));
    }

    Ok(())
}

fn require_non_empty(key: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{} cannot be empty", key)));
    }
    Ok(())
}

/// Parses `value` and requires an http(s) scheme
fn validate_http_url(key: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", key, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} must use http or https, got '{}'",
            key, value
        )));
    }

    Ok(())
}

/// Validates a domain pattern (supports wildcards)
fn validate_domain_pattern(pattern: &str) -> Result<(), ConfigError> {
    if pattern.is_empty() {
        return Err(ConfigError::InvalidPattern(
            "Domain pattern cannot be empty".to_string(),
        ));
    }

    match pattern.strip_prefix("*.") {
        Some(domain) => validate_domain_string(domain),
        None => validate_domain_string(pattern),
    }
}

/// Validates a domain string (without wildcard prefix)
fn validate_domain_string(domain: &str) -> Result<(), ConfigError> {
    if domain.is_empty() {
        return Err(ConfigError::InvalidPattern(
            "Domain cannot be empty".to_string(),
        ));
    }

    if !domain
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.' || c == '-')
    {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' must be lowercase letters, digits, '.' or '-'",
            domain
        )));
    }

    if domain.starts_with('.')
        || domain.ends_with('.')
        || domain.starts_with('-')
        || domain.ends_with('-')
        || domain.contains("..")
    {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' has a misplaced '.' or '-'",
            domain
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' must contain at least one dot (e.g., 'youtu.be')",
            domain
        )));
    }

    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    let invalid = || ConfigError::Validation(format!("Invalid contact-email: '{}'", email));

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.is_empty() || domain.contains('@') || !domain.contains('.') {
        return Err(invalid());
    }

    Ok(())
}
