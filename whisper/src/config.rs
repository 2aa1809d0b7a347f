use std::time::Duration;

const DEFAULT_API_BASE: &str = "https://growthpro-whisper-backend.onrender.com/api";

/// localStorage key holding the signed in identity
pub const STORAGE_KEY: &str = "whisper_user";

/// how long the "copied" status stays visible
pub const COPY_STATUS_TTL: Duration = Duration::from_secs(2);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub api_base: String,
    pub storage_key: &'static str,
    pub copy_status_ttl: Duration,
}

impl Default for Config {
    /// the API base can be overridden at build time with `WHISPER_API_BASE`,
    /// there is no process environment to read from inside the browser
    fn default() -> Self {
        Config {
            api_base: normalize_base(option_env!("WHISPER_API_BASE").unwrap_or(DEFAULT_API_BASE)),
            storage_key: STORAGE_KEY,
            copy_status_ttl: COPY_STATUS_TTL,
        }
    }
}

impl Config {
    pub fn with_api_base(mut self, api_base: &str) -> Self {
        self.api_base = normalize_base(api_base);
        self
    }

    /// join an API path onto the configured base
    pub fn api_url(&self, path: &str) -> String {
        let mut url = self.api_base.clone();
        url.push('/');
        url.push_str(path.trim_start_matches('/'));

        url
    }
}

fn normalize_base(base: &str) -> String {
    base.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_url_joins_single_slash() {
        let config = Config::default().with_api_base("http://localhost:3000/api/");

        assert_eq!(config.api_url("signup"), "http://localhost:3000/api/signup");
        assert_eq!(
            config.api_url("/messages/42"),
            "http://localhost:3000/api/messages/42"
        );
    }

    #[test]
    fn defaults() {
        let config = Config::default();

        assert_eq!(config.storage_key, "whisper_user");
        assert_eq!(config.copy_status_ttl, Duration::from_secs(2));
        assert!(!config.api_base.ends_with('/'));
    }
}
