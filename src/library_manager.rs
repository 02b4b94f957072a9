//! # Library Manager Module
//!
//! ## Purpose
//! Provides centralized management of the JSON data files (element table and
//! ion table) used by ChemBot. Calculations never read files themselves: the
//! database is built from the paths stored here, so data versions can be
//! switched without touching the code.
//!
//! ## Architecture
//! - **LibraryConfig**: Serializable configuration structure
//! - **LibraryManager**: Core manager with file validation and persistence
//! - **Global Access**: `OnceLock<Mutex<_>>` singleton with closure accessors
//! - **Configuration File**: JSON-based persistent storage (chembot_config.json)
//!
//! ## Configuration Format
//! ```json
//! {
//!   "elements_base": "data/elements.json",
//!   "ions_base": "data/ions.json"
//! }
//! ```
//!
//! ## Usage Patterns
//! ```rust, ignore
//! use ChemBot::library_manager::{with_library_manager, with_library_manager_mut};
//!
//! let path = with_library_manager(|manager| manager.ions_base_path().to_string());
//! with_library_manager_mut(|manager| manager.set_ions_base("my_ions.json"))?;
//! ```

use crate::chem_errors::ChemError;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{Mutex, OnceLock};

pub const CONFIG_FILE: &str = "chembot_config.json";

/// Paths of the JSON data files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryConfig {
    pub elements_base: String,
    pub ions_base: String,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            elements_base: "data/elements.json".to_string(),
            ions_base: "data/ions.json".to_string(),
        }
    }
}

/// Holds the current configuration and the file it is persisted to.
#[derive(Debug, Clone)]
pub struct LibraryManager {
    config: LibraryConfig,
    config_file: String,
}

impl Default for LibraryManager {
    fn default() -> Self {
        Self::new()
    }
}

impl LibraryManager {
    /// Loads `chembot_config.json` from the current directory, or uses defaults
    /// if the file is missing or invalid.
    pub fn new() -> Self {
        Self::with_config_file(CONFIG_FILE)
    }

    pub fn with_config_file(config_file: &str) -> Self {
        let config = Self::load_config(config_file).unwrap_or_default();
        Self {
            config,
            config_file: config_file.to_string(),
        }
    }

    fn load_config(config_file: &str) -> Result<LibraryConfig, ChemError> {
        if Path::new(config_file).exists() {
            let content = fs::read_to_string(config_file)?;
            let config: LibraryConfig = serde_json::from_str(&content)?;
            info!("configuration loaded from {}", config_file);
            Ok(config)
        } else {
            Ok(LibraryConfig::default())
        }
    }

    /// Serializes the configuration to the config file.
    /// During tests, this method does nothing to keep the real config file untouched.
    pub fn save_config(&self) -> Result<(), ChemError> {
        #[cfg(test)]
        {
            return Ok(());
        }

        #[cfg(not(test))]
        {
            let content = serde_json::to_string_pretty(&self.config)?;
            fs::write(&self.config_file, content)?;
            Ok(())
        }
    }

    pub fn config_file(&self) -> &str {
        &self.config_file
    }

    pub fn elements_base_path(&self) -> &str {
        &self.config.elements_base
    }

    pub fn ions_base_path(&self) -> &str {
        &self.config.ions_base
    }

    /// Switches the element table file; the file must exist.
    pub fn set_elements_base(&mut self, path: &str) -> Result<(), ChemError> {
        if Path::new(path).exists() {
            self.config.elements_base = path.to_string();
            self.save_config()
        } else {
            Err(ChemError::NotFound(format!("file {}", path)))
        }
    }

    /// Switches the ion table file; the file must exist.
    pub fn set_ions_base(&mut self, path: &str) -> Result<(), ChemError> {
        if Path::new(path).exists() {
            self.config.ions_base = path.to_string();
            self.save_config()
        } else {
            Err(ChemError::NotFound(format!("file {}", path)))
        }
    }

    /// Updates several paths at once: either every file exists and all updates
    /// are applied, or nothing changes.
    /// Keys: "elements_base", "ions_base".
    pub fn update_libraries(&mut self, updates: HashMap<&str, &str>) -> Result<(), ChemError> {
        for (key, path) in &updates {
            if !matches!(*key, "elements_base" | "ions_base") {
                return Err(ChemError::NotFound(format!("library key {}", key)));
            }
            if !Path::new(path).exists() {
                return Err(ChemError::NotFound(format!("file {}", path)));
            }
        }
        for (key, path) in updates {
            match key {
                "elements_base" => self.config.elements_base = path.to_string(),
                _ => self.config.ions_base = path.to_string(),
            }
        }
        self.save_config()
    }

    pub fn get_config(&self) -> &LibraryConfig {
        &self.config
    }

    pub fn reset_to_defaults(&mut self) -> Result<(), ChemError> {
        self.config = LibraryConfig::default();
        self.save_config()
    }
}

/// Global singleton instance of LibraryManager
static GLOBAL_LIBRARY_MANAGER: OnceLock<Mutex<LibraryManager>> = OnceLock::new();

/// Returns a guard to the global LibraryManager. A poisoned lock is recovered:
/// the manager only holds paths, a panic elsewhere cannot leave it half written.
pub fn get_library_manager() -> std::sync::MutexGuard<'static, LibraryManager> {
    GLOBAL_LIBRARY_MANAGER
        .get_or_init(|| Mutex::new(LibraryManager::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Executes a closure with read-only access to the LibraryManager.
pub fn with_library_manager<F, R>(f: F) -> R
where
    F: FnOnce(&LibraryManager) -> R,
{
    let manager = get_library_manager();
    f(&manager)
}

/// Executes a closure with mutable access to the LibraryManager.
pub fn with_library_manager_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut LibraryManager) -> R,
{
    let mut manager = get_library_manager();
    f(&mut manager)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_library_manager_defaults() {
        let config = NamedTempFile::new().unwrap();
        // empty file is not valid JSON, defaults are used
        let manager = LibraryManager::with_config_file(config.path().to_str().unwrap());
        assert_eq!(manager.elements_base_path(), "data/elements.json");
        assert_eq!(manager.ions_base_path(), "data/ions.json");
    }

    #[test]
    fn test_library_manager_with_config() {
        let mut temp_config = NamedTempFile::new().unwrap();
        let config = LibraryConfig {
            elements_base: "my_elements.json".to_string(),
            ions_base: "my_ions.json".to_string(),
        };
        let config_json = serde_json::to_string_pretty(&config).unwrap();
        temp_config.write_all(config_json.as_bytes()).unwrap();

        let manager = LibraryManager::with_config_file(temp_config.path().to_str().unwrap());
        assert_eq!(manager.get_config(), &config);
    }

    #[test]
    fn test_setters_validate_files() {
        let temp_config = NamedTempFile::new().unwrap();
        let mut ions = NamedTempFile::new().unwrap();
        ions.write_all(b"[]").unwrap();
        let mut manager = LibraryManager::with_config_file(temp_config.path().to_str().unwrap());

        let ions_path = ions.path().to_str().unwrap();
        manager.set_ions_base(ions_path).unwrap();
        assert_eq!(manager.ions_base_path(), ions_path);
        assert!(matches!(
            manager.set_elements_base("surely/not/here.json"),
            Err(ChemError::NotFound(_))
        ));
        manager.reset_to_defaults().unwrap();
        assert_eq!(manager.ions_base_path(), "data/ions.json");
    }

    #[test]
    fn test_update_libraries() {
        let temp_config = NamedTempFile::new().unwrap();
        let elements = NamedTempFile::new().unwrap();
        let ions = NamedTempFile::new().unwrap();
        let mut manager = LibraryManager::with_config_file(temp_config.path().to_str().unwrap());

        let mut updates = HashMap::new();
        updates.insert("elements_base", elements.path().to_str().unwrap());
        updates.insert("ions_base", ions.path().to_str().unwrap());
        manager.update_libraries(updates).unwrap();
        assert_eq!(manager.elements_base_path(), elements.path().to_str().unwrap());

        let mut bad = HashMap::new();
        bad.insert("ions_base", "missing.json");
        assert!(manager.update_libraries(bad).is_err());
        assert_eq!(manager.ions_base_path(), ions.path().to_str().unwrap());
    }
}
