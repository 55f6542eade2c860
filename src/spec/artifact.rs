use super::definition::SpecSnapshot;
use crate::error::ExportError;
use crate::layout::LayoutFrame;
use crate::monitor::MonitorSnapshot;
use crate::validator::ValidationReport;
use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use serde::{Deserialize, Serialize};
use std::fs;

/// Everything needed to reproduce a diagnostics view offline: the spec the
/// graph was built from, its validation report, the last layout frame and a
/// monitor snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportBundle {
    pub spec: SpecSnapshot,
    pub report: ValidationReport,
    pub frame: LayoutFrame,
    pub monitor: MonitorSnapshot,
}

impl ExportBundle {
    pub fn to_json_pretty(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, ExportError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Compact binary form (bincode, standard config).
    pub fn to_bytes(&self) -> Result<Vec<u8>, ExportError> {
        Ok(encode_to_vec(self, standard())?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ExportError> {
        // bincode 2 returns (value, bytes_read)
        let (bundle, _) = decode_from_slice(bytes, standard())?;
        Ok(bundle)
    }

    /// Writes the bundle to `path`. A `.json` extension selects pretty JSON,
    /// anything else the binary form.
    pub fn save(&self, path: &str) -> Result<(), ExportError> {
        let bytes = if path.ends_with(".json") {
            self.to_json_pretty()?.into_bytes()
        } else {
            self.to_bytes()?
        };
        fs::write(path, bytes).map_err(|source| ExportError::Io {
            path: path.to_string(),
            source,
        })
    }

    /// Loads a bundle written by [`ExportBundle::save`].
    pub fn from_file(path: &str) -> Result<Self, ExportError> {
        let bytes = fs::read(path).map_err(|source| ExportError::Io {
            path: path.to_string(),
            source,
        })?;
        if path.ends_with(".json") {
            let json = String::from_utf8_lossy(&bytes);
            Self::from_json(&json)
        } else {
            Self::from_bytes(&bytes)
        }
    }
}
