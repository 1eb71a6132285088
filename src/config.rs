use crate::error::{Error, Result};
use directories::BaseDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the plugin's credential config, relative to the home dir
pub const CONFIG_FILE_NAME: &str = ".creait";

pub fn default_config_path() -> Result<PathBuf> {
    let dirs = BaseDirs::new().ok_or(Error::NoHome)?;
    Ok(dirs.home_dir().join(CONFIG_FILE_NAME))
}

/// The plugin's key/value credential file.
///
/// Accepts both `api_key=...` and the plugin's own `apikey = "..."` layout.
/// Keys other than the api key and host are kept so a rewrite loses nothing
/// the caller didn't ask to drop.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CredentialConfig {
    pub api_key: Option<String>,
    pub host: Option<String>,
    pub extra: Vec<(String, String)>,
}

impl CredentialConfig {
    pub fn new(api_key: &str, host: Option<&str>) -> Self {
        CredentialConfig {
            api_key: Some(api_key.to_owned()),
            host: host.map(str::to_owned),
            extra: vec![],
        }
    }

    pub fn parse(content: &str) -> Result<Self> {
        let mut config = CredentialConfig::default();

        for (i, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (key, value) = line.split_once('=').ok_or_else(|| Error::ConfigParse {
                line: i + 1,
                text: raw.to_owned(),
            })?;

            let key = key.trim();
            let value = unquote(value.trim());

            match key {
                "api_key" | "apikey" => config.api_key = Some(value.to_owned()),
                "host" => config.host = Some(value.to_owned()),
                _ => config.extra.push((key.to_owned(), value.to_owned())),
            }
        }

        Ok(config)
    }

    /// `api_key=...` then `host=...`, one per line, extras after
    pub fn render(&self) -> String {
        let mut out = String::new();
        if let Some(key) = &self.api_key {
            out.push_str(&format!("api_key={}\n", key));
        }
        if let Some(host) = &self.host {
            out.push_str(&format!("host={}\n", host));
        }
        for (key, value) in &self.extra {
            out.push_str(&format!("{}={}\n", key, value));
        }
        out
    }

    pub fn store(&self, path: &Path) -> Result<()> {
        fs::write(path, self.render()).map_err(|e| Error::config_io(path.to_owned(), e))
    }
}

/// Raw file content; a missing file comes back as `Error::ConfigNotFound`
pub fn read_raw(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::config_io(path.to_owned(), e))
}

fn unquote(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}
