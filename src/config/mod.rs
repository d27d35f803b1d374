use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use dirs::home_dir;
use serde::{Deserialize, Serialize};

use crate::cycle::{Locale, DEFAULT_PRESET_COUNT};
use crate::errors::CycleError;

/// Environment variable overriding the data directory.
pub const HOME_ENV: &str = "CYCLE_PICKER_HOME";

const DEFAULT_DIR_NAME: &str = ".cycle_picker";
const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";
/// Upper bound for the preset list; keeps the recognition window finite.
pub const MAX_PRESET_COUNT: usize = 24;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub locale: Locale,
    pub preset_count: usize,
    pub plain_output: bool,
    pub high_contrast: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            preset_count: DEFAULT_PRESET_COUNT,
            plain_output: false,
            high_contrast: false,
        }
    }
}

impl Config {
    pub const KEYS: [&'static str; 4] = ["locale", "presets", "plain", "high-contrast"];

    /// Updates one setting from its textual form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), CycleError> {
        match key.to_ascii_lowercase().as_str() {
            "locale" => self.locale = value.parse()?,
            "presets" | "preset_count" => {
                let count: usize = value.trim().parse().map_err(|_| {
                    CycleError::InvalidSetting(format!("`{value}` is not a preset count"))
                })?;
                if !(1..=MAX_PRESET_COUNT).contains(&count) {
                    return Err(CycleError::InvalidSetting(format!(
                        "preset count must be between 1 and {MAX_PRESET_COUNT}"
                    )));
                }
                self.preset_count = count;
            }
            "plain" | "plain_output" => self.plain_output = parse_flag(value)?,
            "high-contrast" | "high_contrast" => self.high_contrast = parse_flag(value)?,
            other => {
                return Err(CycleError::InvalidSetting(format!(
                    "unknown key `{other}` (expected one of: {})",
                    Self::KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }
}

fn parse_flag(value: &str) -> Result<bool, CycleError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        _ => Err(CycleError::InvalidSetting(format!(
            "`{value}` is not on/off"
        ))),
    }
}

/// Returns the application data directory, defaulting to `~/.cycle_picker`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Self {
        Self {
            path: base.join(CONFIG_FILE),
        }
    }

    pub fn load(&self) -> Result<Config, CycleError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), CycleError> {
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        if let Err(err) = fs::rename(&tmp, &self.path) {
            fs::remove_file(&tmp).ok();
            return Err(err.into());
        }
        tracing::debug!(path = %self.path.display(), "configuration saved");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CycleError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf());
        assert_eq!(manager.load().unwrap(), Config::default());
    }

    #[test]
    fn save_then_load_keeps_settings() {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().join("nested"));
        let mut config = Config::default();
        config.set("locale", "en-US").unwrap();
        config.set("presets", "8").unwrap();
        config.set("plain", "on").unwrap();
        manager.save(&config).unwrap();

        let loaded = manager.load().unwrap();
        assert_eq!(loaded, config);
        assert!(!manager.path().with_extension("json.tmp").exists());
    }

    #[test]
    fn failed_save_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf());
        // A non-empty directory where the file should go makes the rename fail.
        fs::create_dir_all(manager.path().join("blocker")).unwrap();

        let result = manager.save(&Config::default());
        assert!(matches!(result, Err(CycleError::Io(_))));
        assert!(!manager.path().with_extension("json.tmp").exists());
        assert!(manager.path().is_dir());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf());
        fs::write(manager.path(), r#"{ "locale": "en-US" }"#).unwrap();
        let loaded = manager.load().unwrap();
        assert_eq!(loaded.locale, Locale::EnUs);
        assert_eq!(loaded.preset_count, DEFAULT_PRESET_COUNT);
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let mut config = Config::default();
        assert!(matches!(
            config.set("presets", "0"),
            Err(CycleError::InvalidSetting(_))
        ));
        assert!(matches!(
            config.set("presets", "many"),
            Err(CycleError::InvalidSetting(_))
        ));
        assert!(matches!(
            config.set("locale", "xx"),
            Err(CycleError::UnknownLocale(_))
        ));
        assert!(matches!(
            config.set("colour", "red"),
            Err(CycleError::InvalidSetting(_))
        ));
        assert_eq!(config, Config::default());
    }
}
