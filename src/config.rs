// src/config.rs

//! Persisted user preferences, loaded once at startup and passed explicitly to the session.

use crate::constants::{APP_DIR_NAME, CONFIG_FILE_NAME, PROBLEMS_FILE_NAME};
use crate::error::{Result, TrainerError};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Select problems by repetition tier instead of list order.
    pub spaced_rep: bool,
    /// Open the selected problem's link in the default browser.
    pub open_browser: bool,
}

impl Config {
    /// Reads the config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        debug!("Loaded config {:?}", config);
        Ok(config)
    }

    /// Applies the on/off switches given on the command line and saves the result.
    /// Returns `Ok(false)` without touching the file when no switch was given.
    pub fn apply_toggles(
        &mut self,
        path: &Path,
        spaced_rep: Option<bool>,
        open_browser: Option<bool>,
    ) -> Result<bool> {
        if spaced_rep.is_none() && open_browser.is_none() {
            return Ok(false);
        }
        if let Some(flag) = spaced_rep {
            self.spaced_rep = flag;
        }
        if let Some(flag) = open_browser {
            self.open_browser = flag;
        }
        self.save(path)?;
        Ok(true)
    }

    /// Writes the config via a temp file and rename.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, serde_json::to_string_pretty(self)?)?;
        fs::rename(&tmp_path, path)?;
        info!("Saved config to {:?}", path);
        Ok(())
    }
}

/// `<data dir>/lcprob/problems_unique.csv`
pub fn default_problems_path() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|d| d.join(APP_DIR_NAME).join(PROBLEMS_FILE_NAME))
        .ok_or(TrainerError::NoDataDir)
}

/// `<config dir>/lcprob/config.json`
pub fn default_config_path() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|d| d.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
        .ok_or(TrainerError::NoDataDir)
}
