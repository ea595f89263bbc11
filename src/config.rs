use std::env;

use crate::error::Error;

/// Server configuration, read from the environment (and a `.env` file when
/// one is present).
///
/// | Env Var          | Default                     |
/// |------------------|-----------------------------|
/// | `MONGODB_URI`    | `mongodb://localhost:27017` |
/// | `DATABASE_NAME`  | `campaign_space`            |
/// | `BIND_ADDRESS`   | `127.0.0.1:8080`            |
/// | `SEED_TEMPLATES` | `false`                     |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub mongodb_uri: String,
    pub database_name: String,
    pub bind_address: String,
    pub seed_templates: bool,
}

impl Config {
    pub fn from_env() -> Result<Config, Error> {
        // a missing .env file is fine, the process environment still applies
        let _ = dotenvy::dotenv();

        Config::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Config, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mongodb_uri =
            lookup("MONGODB_URI").unwrap_or_else(|| "mongodb://localhost:27017".into());
        let database_name = lookup("DATABASE_NAME").unwrap_or_else(|| "campaign_space".into());
        let bind_address = lookup("BIND_ADDRESS").unwrap_or_else(|| "127.0.0.1:8080".into());

        let seed_templates = match lookup("SEED_TEMPLATES") {
            Some(value) => parse_flag("SEED_TEMPLATES", value)?,
            None => false,
        };

        Ok(Config {
            mongodb_uri,
            database_name,
            bind_address,
            seed_templates,
        })
    }
}

fn parse_flag(name: &'static str, value: String) -> Result<bool, Error> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" | "" => Ok(false),
        _ => Err(Error::InvalidConfig { name, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.mongodb_uri, "mongodb://localhost:27017".to_string());
        assert_eq!(config.database_name, "campaign_space".to_string());
        assert_eq!(config.bind_address, "127.0.0.1:8080".to_string());
        assert!(!config.seed_templates);
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("MONGODB_URI", "mongodb://db:27017"),
            ("DATABASE_NAME", "space"),
            ("BIND_ADDRESS", "0.0.0.0:9000"),
            ("SEED_TEMPLATES", "TRUE"),
        ]))
        .unwrap();

        assert_eq!(config.mongodb_uri, "mongodb://db:27017".to_string());
        assert_eq!(config.database_name, "space".to_string());
        assert_eq!(config.bind_address, "0.0.0.0:9000".to_string());
        assert!(config.seed_templates);
    }

    #[test]
    fn bad_flag_is_an_error() {
        let result = Config::from_lookup(lookup_from(&[("SEED_TEMPLATES", "sometimes")]));

        assert_eq!(
            result.unwrap_err(),
            Error::InvalidConfig {
                name: "SEED_TEMPLATES",
                value: "sometimes".to_string()
            }
        );
    }
}
