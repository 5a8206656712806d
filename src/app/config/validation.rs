use super::{Config, ConfigError};
use url::Url;

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Some(api_url) = &self.api_url else {
            return Ok(());
        };

        let url = Url::parse(api_url).map_err(|e| {
            ConfigError::InvalidApiUrl(format!("Invalid API URL '{api_url}': {e}"))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidApiUrl(format!(
                "API URL '{api_url}' must use http or https"
            )));
        }

        Ok(())
    }
}
