use crate::app_config::{AppConfig, ChannelKeys, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let api_base_url = require("SHUTTLE_API_BASE_URL")?;
    if !(api_base_url.starts_with("http://") || api_base_url.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: "SHUTTLE_API_BASE_URL".to_string(),
            reason: format!("expected an http(s) URL, got '{api_base_url}'"),
        });
    }
    let image_base_url = or_default("SHUTTLE_IMAGE_BASE_URL", &api_base_url);

    let env = parse_environment(&or_default("SHUTTLE_ENV", "development"))?;
    let log_level = or_default("SHUTTLE_LOG_LEVEL", "info");

    let request_timeout_secs = parse_u64("SHUTTLE_REQUEST_TIMEOUT_SECS", "15")?;
    let user_agent = or_default("SHUTTLE_USER_AGENT", "shuttle/0.1 (storefront-client)");
    let catalog_page_size = parse_u32("SHUTTLE_CATALOG_PAGE_SIZE", "500")?;
    if catalog_page_size == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "SHUTTLE_CATALOG_PAGE_SIZE".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    let token_store_path = PathBuf::from(or_default(
        "SHUTTLE_TOKEN_STORE_PATH",
        "./.shuttle/tokens.json",
    ));
    let user_id = lookup("SHUTTLE_USER_ID").ok().filter(|v| !v.is_empty());

    let payment_store_id = require("SHUTTLE_PAYMENT_STORE_ID")?;
    let channel_keys = ChannelKeys {
        tosspay: require("SHUTTLE_CHANNEL_KEY_TOSSPAY")?,
        kakaopay: require("SHUTTLE_CHANNEL_KEY_KAKAOPAY")?,
        card: require("SHUTTLE_CHANNEL_KEY_CARD")?,
        mobile: require("SHUTTLE_CHANNEL_KEY_MOBILE")?,
    };
    let payment_notice_url = lookup("SHUTTLE_PAYMENT_NOTICE_URL")
        .ok()
        .filter(|v| !v.is_empty());

    Ok(AppConfig {
        env,
        api_base_url,
        image_base_url,
        log_level,
        request_timeout_secs,
        user_agent,
        catalog_page_size,
        token_store_path,
        user_id,
        payment_store_id,
        channel_keys,
        payment_notice_url,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SHUTTLE_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
