//! Training run manifest and the run-id envelope every artifact carries.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use obesity_encode::{EncodingTable, OrdinalMap};

pub const MANIFEST_FILE: &str = "manifest.json";

/// Describes one training run's artifact set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactManifest {
    pub run_id: String,

    /// Feature columns in the order the scaler and model were fitted on.
    pub columns: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default)]
    pub files: ArtifactFiles,
}

/// File names of the artifacts, relative to the manifest's directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactFiles {
    pub model: String,
    pub scaler: String,
    pub encoders: String,
    pub ordinal: String,
    pub target: String,
}

impl Default for ArtifactFiles {
    fn default() -> Self {
        Self {
            model: "model.json".to_string(),
            scaler: "scaler.json".to_string(),
            encoders: "encoders.json".to_string(),
            ordinal: "ordinal.json".to_string(),
            target: "target.json".to_string(),
        }
    }
}

impl fmt::Display for ArtifactManifest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "run {} ({} columns)", self.run_id, self.columns.len())
    }
}

/// An artifact body tagged with the run that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stamped<T> {
    pub run_id: String,
    #[serde(flatten)]
    pub inner: T,
}

/// Body of `encoders.json`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EncoderTables {
    #[serde(default)]
    pub tables: BTreeMap<String, EncodingTable>,
}

/// Body of `ordinal.json`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OrdinalMaps {
    #[serde(default)]
    pub maps: BTreeMap<String, OrdinalMap>,
}
