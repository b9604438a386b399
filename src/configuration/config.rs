#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::env;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::ArgMatches;
use clap::Command;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;
use tokio::fs;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

pub const DEFAULT_AGENT_URL: &str = "https://aws-us-east-2.langflow.datastax.com/lf/52ba3401-df32-4d2d-a5e3-7c0a54419c14/api/v1/run/9df30427-5fc0-473a-9928-1f2abb49d7cc";

#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    AgentURL,
    ConfigFile,
    OrgID,
    Token,
    Username,
}

impl ConfigKey {
    /// Keys holding credentials are never written to a generated config file
    /// with a value, and never logged.
    pub fn is_secret(&self) -> bool {
        return *self == ConfigKey::OrgID || *self == ConfigKey::Token;
    }
}

pub struct Config {}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        if let Some(val) = CONFIG.get(&key.to_string()) {
            return val.to_string();
        }

        return "".to_string();
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key.to_string(), value.to_string());
    }

    pub fn default(key: ConfigKey) -> String {
        if key == ConfigKey::Username {
            let mut user = env::var("USER").unwrap_or_else(|_| return "".to_string());
            if user.is_empty() {
                user = "You".to_string();
            }

            return user;
        }

        if key == ConfigKey::ConfigFile {
            return Config::default_config_path()
                .to_string_lossy()
                .to_string();
        }

        let res = match key {
            ConfigKey::AgentURL => DEFAULT_AGENT_URL,
            ConfigKey::OrgID => "",
            ConfigKey::Token => "",

            // Special
            ConfigKey::ConfigFile => "",
            ConfigKey::Username => "",
        };

        return res.to_string();
    }

    fn default_config_path() -> path::PathBuf {
        #[cfg(not(target_os = "macos"))]
        let config_dir = dirs::config_dir().unwrap_or_else(|| return path::PathBuf::from("."));
        #[cfg(target_os = "macos")]
        let config_dir = env::var("HOME")
            .map(|home| return path::PathBuf::from(home).join(".config"))
            .unwrap_or_else(|_| return path::PathBuf::from("."));

        return config_dir.join("macento/config.toml");
    }

    pub async fn load(clap_arg_matches: Vec<&ArgMatches>) -> Result<()> {
        for key in ConfigKey::iter() {
            Config::set(key, &Config::default(key))
        }

        let mut config_file = Config::default(ConfigKey::ConfigFile);
        for matches in clap_arg_matches.as_slice() {
            if let Ok(Some(arg_config_file)) =
                matches.try_get_one::<String>(&ConfigKey::ConfigFile.to_string())
            {
                config_file = arg_config_file.to_string();
            }
        }

        let config_path = path::PathBuf::from(config_file);
        if config_path.exists() {
            let toml_str = fs::read_to_string(config_path).await?;
            Config::load_toml(&toml_str)?;
        }

        for key in ConfigKey::iter() {
            for matches in clap_arg_matches.as_slice() {
                if let Ok(Some(val)) = matches.try_get_one::<String>(&key.to_string()) {
                    if val.is_empty() {
                        continue;
                    }
                    Config::set(key, val)
                }
            }
        }

        tracing::debug!(
            username = Config::get(ConfigKey::Username),
            agent_url = Config::get(ConfigKey::AgentURL),
            org_id_set = !Config::get(ConfigKey::OrgID).is_empty(),
            token_set = !Config::get(ConfigKey::Token).is_empty(),
            "config"
        );

        return Ok(());
    }

    fn load_toml(toml_str: &str) -> Result<()> {
        let doc = toml_str.parse::<toml_edit::Document>()?;

        for key in ConfigKey::iter() {
            if key == ConfigKey::ConfigFile {
                continue;
            }

            if let Some(val) = doc.get(&key.to_string()) {
                if let Some(val_str) = val.as_str() {
                    if val_str.is_empty() {
                        continue;
                    }
                    Config::set(key, val_str);
                } else {
                    bail!(format!(
                        "config.toml has an invalid value for key '{key}', expected a string"
                    ));
                }
            }
        }

        return Ok(());
    }

    pub fn serialize_default(cmd: Command) -> String {
        let toml_str = ConfigKey::iter()
            .filter_map(|key| {
                if key == ConfigKey::ConfigFile {
                    return None;
                }

                if key == ConfigKey::Username {
                    return Some(
                        "# Your name displayed above your chat bubbles.\n# username = \"\""
                            .to_string(),
                    );
                }

                let arg = cmd
                    .get_arguments()
                    .find(|e| return e.get_long() == Some(key.to_string().as_str()))?;

                let description = arg
                    .get_help()
                    .map(|help| return help.to_string())
                    .unwrap_or_default()
                    .split("[default:")
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_string();

                let val = Config::default(key);
                if val.is_empty() || key.is_secret() {
                    return Some(format!("# {description}\n# {key} = \"\""));
                }

                return Some(format!("# {description}\n{key} = \"{val}\""));
            })
            .collect::<Vec<String>>()
            .join("\n\n");

        return toml_str;
    }
}
