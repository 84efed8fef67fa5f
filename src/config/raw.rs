use duration_str::deserialize_duration;
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_CONFIG_FILE: &str = include_str!("yatube.default.toml");

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub db: Option<Db>,
    pub webserver: Option<WebServer>,
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_FILE).expect("Default configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Db {
    pub connection_sqlite: String,
    pub connection_pool_size: u8,
}

impl Default for Db {
    fn default() -> Self {
        Config::default().db.expect("DB configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WebServer {
    pub cors: bool,
    #[serde(deserialize_with = "deserialize_duration")]
    pub post_list_cache_max_age: Duration,
    #[serde(deserialize_with = "deserialize_duration")]
    pub token_validity: Duration,
}

impl Default for WebServer {
    fn default() -> Self {
        Config::default()
            .webserver
            .expect("Webserver configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_default_config_from_file() {
        let cfg: Config = toml::from_str(DEFAULT_CONFIG_FILE).unwrap();
        assert!(cfg.db.is_some());
        let webserver = cfg.webserver.unwrap();
        assert!(!webserver.cors);
        assert_eq!(webserver.post_list_cache_max_age, Duration::from_secs(20));
        assert_eq!(webserver.token_validity, Duration::from_secs(24 * 60 * 60));
    }

    #[test]
    fn missing_sections_are_none() {
        let cfg: Config =
            toml::from_str("[db]\nconnection-sqlite = \"blog.db\"\nconnection-pool-size = 2\n")
                .unwrap();
        assert!(cfg.webserver.is_none());
        assert_eq!(cfg.db.unwrap().connection_sqlite, "blog.db");
    }

    #[test]
    fn reject_invalid_durations() {
        let res = toml::from_str::<WebServer>(
            "cors = true\npost-list-cache-max-age = \"soon\"\ntoken-validity = \"1h\"\n",
        );
        assert!(res.is_err());
    }
}
