use serde::Deserialize;

pub const DEFAULT_AUTH_HEADER: &str = "X-User-Id";

/// Application settings read from Rocket's figment (`Rocket.toml`, `ROCKET_*`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// Header carrying the caller's user id, set by the upstream authentication layer.
    #[serde(default = "default_auth_header")]
    pub auth_header: String,
}

fn default_auth_header() -> String {
    DEFAULT_AUTH_HEADER.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            auth_header: default_auth_header(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rocket::figment::{providers::Serialized, Figment};

    #[test]
    fn header_defaults_when_unset() {
        let config: AppConfig = Figment::new().extract().unwrap();
        assert_eq!(config, AppConfig::default());

        let config: AppConfig = Figment::new()
            .merge(Serialized::default("auth_header", "X-Forwarded-User"))
            .extract()
            .unwrap();
        assert_eq!(config.auth_header, "X-Forwarded-User");
    }
}
