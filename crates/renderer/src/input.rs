//! Loading of trace, registry and display-name inputs from JSON files.

use crate::abi::ContractRegistry;
use crate::diagram::DisplayNames;
use crate::trace::Trace;
use serde::de::DeserializeOwned;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, InputError> {
    let content = std::fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| InputError::Json {
        path: path.display().to_string(),
        source,
    })
}

/// Load a trace dump as written by the sandbox execution engine.
pub fn load_trace(path: &Path) -> Result<Trace, InputError> {
    load_json(path)
}

/// Load a contract registry: address -> ABI (types and error codes).
pub fn load_registry(path: &Path) -> Result<ContractRegistry, InputError> {
    load_json(path)
}

/// Load the address -> friendly name map.
pub fn load_names(path: &Path) -> Result<DisplayNames, InputError> {
    load_json(path)
}
