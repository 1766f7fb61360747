//! Engine configuration from the environment.
//!
//! | Variable               | Default                                   |
//! |------------------------|-------------------------------------------|
//! | `AMBRIEN_DATA_DIR`     | platform config dir, else working dir     |
//! | `AMBRIEN_STORAGE_FILE` | `storage.json`                            |
//! | `AMBRIEN_STORAGE_KEY`  | `ambrien-characters`                      |
//! | `AMBRIEN_LOG`          | `ambrien_engine=info`                     |

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::infrastructure::persistence::DEFAULT_STORAGE_KEY;

pub const DEFAULT_STORAGE_FILE: &str = "storage.json";
pub const DEFAULT_LOG_FILTER: &str = "ambrien_engine=info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Directory holding the storage file
    pub data_dir: PathBuf,
    /// Storage file name inside `data_dir`
    pub storage_file: String,
    /// Storage key of the character collection
    pub storage_key: String,
    /// `tracing` filter directive
    pub log_filter: String,
}

impl EngineConfig {
    /// Load from the process environment, after applying `.env.local` and
    /// `.env` from the working directory when present.
    pub fn from_env() -> Self {
        load_dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any variable lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            data_dir: var("AMBRIEN_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(default_data_dir),
            storage_file: var("AMBRIEN_STORAGE_FILE")
                .unwrap_or_else(|| DEFAULT_STORAGE_FILE.into()),
            storage_key: var("AMBRIEN_STORAGE_KEY").unwrap_or_else(|| DEFAULT_STORAGE_KEY.into()),
            log_filter: var("AMBRIEN_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.into()),
        }
    }

    /// Full path of the storage file.
    pub fn storage_path(&self) -> PathBuf {
        self.data_dir.join(&self.storage_file)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

/// Platform config directory:
/// - Linux: ~/.config/characters
/// - macOS: ~/Library/Application Support/io.ambrien.characters
/// - Windows: C:\Users\<User>\AppData\Roaming\ambrien\characters\config
fn default_data_dir() -> PathBuf {
    ProjectDirs::from("io", "ambrien", "characters")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

fn load_dotenv() {
    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = Path::new(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
