//! Reading and writing variable lists in settings files.
//!
//! Three shapes are recognized:
//!
//! - a settings object with a top-level `variables` array (an exported
//!   settings file),
//! - a storage dump with the settings under `modhead_settings`,
//! - a bare array of variables.
//!
//! Saving writes the variables back into the same place and leaves every other
//! field (rules, theme, export metadata) untouched.

use crate::models::Variable;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Key the extension stores its settings blob under.
pub const STORAGE_KEY: &str = "modhead_settings";

/// Errors that can occur while loading or saving a settings file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to access {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No variables array found in {}", .0.display())]
    MissingVariables(PathBuf),
}

/// Where the variables array lives inside the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsLayout {
    /// The document is the array.
    BareArray,
    /// `{"variables": [...]}`
    Settings,
    /// `{"modhead_settings": {"variables": [...]}}`
    StorageDump,
}

/// A settings file loaded from disk.
#[derive(Debug, Clone)]
pub struct SettingsFile {
    path: PathBuf,
    root: Value,
    layout: SettingsLayout,
    /// Variables in file order.
    pub variables: Vec<Variable>,
}

impl SettingsFile {
    /// Loads a settings file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let content = fs::read_to_string(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        let root: Value = serde_json::from_str(&content)?;

        let (layout, raw_variables) = locate_variables(&root)
            .ok_or_else(|| StoreError::MissingVariables(path.clone()))?;
        let variables: Vec<Variable> = serde_json::from_value(raw_variables.clone())?;

        log::debug!(
            "Loaded {} variables from {} ({:?})",
            variables.len(),
            path.display(),
            layout
        );

        Ok(Self {
            path,
            root,
            layout,
            variables,
        })
    }

    /// Path the file was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Detected document shape.
    pub fn layout(&self) -> SettingsLayout {
        self.layout
    }

    /// Finds a variable by name; the first match wins.
    pub fn find_by_name(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name == name)
    }

    /// Writes the current variables back to the file.
    pub fn save(&self) -> Result<(), StoreError> {
        let mut root = self.root.clone();
        let variables = serde_json::to_value(&self.variables)?;

        match self.layout {
            SettingsLayout::BareArray => root = variables,
            SettingsLayout::Settings => root["variables"] = variables,
            SettingsLayout::StorageDump => root[STORAGE_KEY]["variables"] = variables,
        }

        let content = serde_json::to_string_pretty(&root)?;
        fs::write(&self.path, content).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;

        log::debug!("Saved {} variables to {}", self.variables.len(), self.path.display());
        Ok(())
    }
}

fn locate_variables(root: &Value) -> Option<(SettingsLayout, &Value)> {
    if root.is_array() {
        return Some((SettingsLayout::BareArray, root));
    }
    if let Some(variables) = root.get("variables").filter(|v| v.is_array()) {
        return Some((SettingsLayout::Settings, variables));
    }
    root.get(STORAGE_KEY)
        .and_then(|settings| settings.get("variables"))
        .filter(|v| v.is_array())
        .map(|variables| (SettingsLayout::StorageDump, variables))
}
