use std::env;

/// Environment variable names - single source of truth
pub mod env_vars {
    pub const HOST: &str = "NOTES_API_HOST";
    pub const PORT: &str = "NOTES_API_PORT";
}

/// Default values
pub mod defaults {
    pub const HOST: &str = "0.0.0.0";
    pub const PORT: u16 = 8000;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: defaults::HOST.to_string(),
            port: defaults::PORT,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let host = lookup(env_vars::HOST)
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| defaults::HOST.to_string());

        let port = match lookup(env_vars::PORT) {
            Some(raw) => raw.trim().parse::<u16>().unwrap_or_else(|_| {
                log::warn!(
                    "Invalid {} value '{}', using default {}",
                    env_vars::PORT,
                    raw,
                    defaults::PORT
                );
                defaults::PORT
            }),
            None => defaults::PORT,
        };

        Self { host, port }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
