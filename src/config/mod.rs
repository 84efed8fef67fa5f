use anyhow::{anyhow, Result};
use std::{env, fs, io::ErrorKind, path::Path, time::Duration};

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "yatube.toml";

const ENV_NAME_DB_URL: &str = "DATABASE_URL";

pub struct Config {
    pub db: Db,
    pub webserver: WebServer,
}

impl Config {
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let file_path: &Path = file_path.as_ref().map(|p| p.as_ref()).unwrap_or_else(|| {
            log::info!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let raw_config = match fs::read_to_string(file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)?,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::info!(
                    "{} not found => load default configuration.",
                    file_path.display()
                );
                raw::Config::default()
            }
            Err(err) => return Err(err.into()),
        };
        let mut cfg = Self::try_from(raw_config)?;
        if let Ok(db_url) = env::var(ENV_NAME_DB_URL) {
            cfg.db.conn_sqlite = db_url;
        }
        Ok(cfg)
    }
}

pub struct Db {
    /// SQLite connection
    pub conn_sqlite: String,
    pub conn_pool_size: u8,
}

pub struct WebServer {
    pub enable_cors: bool,
    pub post_list_cache_max_age: Duration,
    pub token_validity: Duration,
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        let raw::Config { db, webserver } = from;

        let raw::Db {
            connection_sqlite,
            connection_pool_size,
        } = db.unwrap_or_default();

        if connection_pool_size == 0 {
            return Err(anyhow!("The connection pool must not be empty"));
        }
        let db = Db {
            conn_sqlite: connection_sqlite,
            conn_pool_size: connection_pool_size,
        };

        let raw::WebServer {
            cors,
            post_list_cache_max_age,
            token_validity,
        } = webserver.unwrap_or_default();

        if token_validity.is_zero() {
            return Err(anyhow!("Access tokens must be valid for some time"));
        }
        let webserver = WebServer {
            enable_cors: cors,
            post_list_cache_max_age,
            token_validity,
        };

        Ok(Self { db, webserver })
    }
}

impl From<&WebServer> for yatube_webserver::Cfg {
    fn from(from: &WebServer) -> Self {
        Self {
            post_list_cache_max_age: from.post_list_cache_max_age,
            token_validity: from.token_validity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_default_config() {
        let file: Option<&Path> = None;
        let cfg: Config = Config::try_load_from_file_or_default(file).unwrap();
        assert!(cfg.db.conn_pool_size > 0);
    }

    #[test]
    fn reject_empty_connection_pool() {
        let raw_cfg: raw::Config =
            toml::from_str("[db]\nconnection-sqlite = \"x.db\"\nconnection-pool-size = 0\n")
                .unwrap();
        assert!(Config::try_from(raw_cfg).is_err());
    }

    #[test]
    fn fill_missing_sections_with_defaults() {
        let raw_cfg: raw::Config = toml::from_str(
            "[webserver]\ncors = true\npost-list-cache-max-age = \"0s\"\ntoken-validity = \"1h\"\n",
        )
        .unwrap();
        let cfg = Config::try_from(raw_cfg).unwrap();
        assert!(cfg.webserver.enable_cors);
        assert_eq!(cfg.webserver.token_validity, Duration::from_secs(3600));
        assert_eq!(cfg.db.conn_sqlite, "yatube.db");
    }
}
