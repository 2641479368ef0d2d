use crate::coach::Benchmark;
use crate::session::SwimStyle;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub style: SwimStyle,
    pub target_distance_meters: Option<u32>,
    pub seed: Option<u64>,
    pub log_path: Option<PathBuf>,
    /// Profile the coaching analysis compares against. Without one the CLI
    /// skips the analysis.
    pub benchmark: Option<Benchmark>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            style: SwimStyle::Freestyle,
            target_distance_meters: None,
            seed: None,
            log_path: None,
            benchmark: None,
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "hydrosync") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("hydrosync_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    /// Missing or unreadable files yield the defaults
    fn load(&self) -> Config {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(_) => return Config::default(),
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!(
                    "ignoring malformed config at {}: {}",
                    self.path.display(),
                    e
                );
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)
    }
}
