//! Loading and cross-checking a training run's artifact set.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use obesity_encode::{CategoryTables, ColumnKind, FeatureSchema};
use obesity_form::field;

use crate::error::ArtifactError;
use crate::manifest::{ArtifactManifest, EncoderTables, OrdinalMaps, Stamped, MANIFEST_FILE};
use crate::model::{Classifier, ModelArtifact};
use crate::scaler::StandardScaler;
use crate::target::TargetLabels;

/// Everything a prediction needs, checked for mutual consistency.
///
/// Immutable once built; share it behind an `Arc`.
#[derive(Debug)]
pub struct ArtifactBundle {
    manifest: ArtifactManifest,
    schema: FeatureSchema,
    tables: CategoryTables,
    scaler: StandardScaler,
    classifier: Classifier,
    target: TargetLabels,
    source: Option<PathBuf>,
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let text = fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Every schema column must be a form field whose answers the tables can
/// encode, or no request could ever pass.
fn check_form_coverage(
    schema: &FeatureSchema,
    tables: &CategoryTables,
) -> Result<(), ArtifactError> {
    for col in schema.columns() {
        let name = col.name.as_str();
        let spec = field::field(name).ok_or_else(|| {
            ArtifactError::Schema(format!("column {name} is not a form field"))
        })?;
        let missing = match (spec.kind.choices(), col.kind) {
            (None, ColumnKind::Continuous) => None,
            (None, kind) => {
                return Err(ArtifactError::Schema(format!(
                    "column {name} is numeric in the form but has a {kind} table"
                )))
            }
            (Some(_), ColumnKind::Continuous) => {
                return Err(ArtifactError::Schema(format!(
                    "column {name} is categorical in the form but has no table"
                )))
            }
            (Some(choices), ColumnKind::Nominal) => tables
                .nominal
                .get(name)
                .and_then(|t| choices.iter().find(|c| !t.contains(c))),
            (Some(choices), ColumnKind::Ordinal) => tables
                .ordinal
                .get(name)
                .and_then(|m| choices.iter().find(|c| !m.contains(c))),
        };
        if let Some(label) = missing {
            return Err(ArtifactError::Schema(format!(
                "table for {name} cannot encode the form answer '{label}'"
            )));
        }
    }
    Ok(())
}

fn read_stamped<T: DeserializeOwned>(
    dir: &Path,
    file: &str,
    artifact: &'static str,
    run_id: &str,
) -> Result<T, ArtifactError> {
    let path = dir.join(file);
    let stamped: Stamped<T> = read_json(&path)?;
    if stamped.run_id != run_id {
        return Err(ArtifactError::RunMismatch {
            artifact,
            expected: run_id.to_string(),
            found: stamped.run_id,
        });
    }
    log::debug!("read {artifact} from {}", path.display());
    Ok(stamped.inner)
}

impl ArtifactBundle {
    /// Reads `manifest.json` in `dir` and every artifact it names.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let dir = dir.as_ref();
        let manifest: ArtifactManifest = read_json(&dir.join(MANIFEST_FILE))?;
        let run_id = manifest.run_id.as_str();
        let files = &manifest.files;

        let encoders: EncoderTables = read_stamped(dir, &files.encoders, "encoders", run_id)?;
        let ordinal: OrdinalMaps = read_stamped(dir, &files.ordinal, "ordinal maps", run_id)?;
        let scaler: StandardScaler = read_stamped(dir, &files.scaler, "scaler", run_id)?;
        let model: ModelArtifact = read_stamped(dir, &files.model, "model", run_id)?;
        let target: TargetLabels = read_stamped(dir, &files.target, "target labels", run_id)?;

        let tables = CategoryTables::new(encoders.tables, ordinal.maps).map_err(|e| {
            ArtifactError::Invalid {
                artifact: "category tables",
                reason: e.to_string(),
            }
        })?;

        let mut bundle = Self::from_parts(manifest, tables, scaler, model, target)?;
        bundle.source = Some(dir.to_path_buf());
        log::info!(
            "loaded {} from {} ({} estimator, {} classes)",
            bundle.manifest,
            dir.display(),
            bundle.classifier.backend_name(),
            bundle.target.len()
        );
        Ok(bundle)
    }

    /// Builds a bundle from already-parsed artifacts and cross-checks them.
    pub fn from_parts(
        manifest: ArtifactManifest,
        tables: CategoryTables,
        scaler: StandardScaler,
        model: ModelArtifact,
        target: TargetLabels,
    ) -> Result<Self, ArtifactError> {
        if let Some(col) = tables
            .columns()
            .find(|c| !manifest.columns.iter().any(|m| m.as_str() == *c))
        {
            return Err(ArtifactError::Schema(format!(
                "table for {col} names no manifest column"
            )));
        }
        let schema = FeatureSchema::from_columns(manifest.columns.as_slice(), &tables).map_err(|e| {
            ArtifactError::Invalid {
                artifact: "manifest",
                reason: e.to_string(),
            }
        })?;
        check_form_coverage(&schema, &tables)?;

        scaler.validate().map_err(|reason| ArtifactError::Invalid {
            artifact: "scaler",
            reason,
        })?;
        if let Some(col) = scaler.columns().find(|c| schema.position(c).is_none()) {
            return Err(ArtifactError::Schema(format!(
                "scaler column {col} is not in the schema"
            )));
        }

        let classifier = Classifier::from_artifact(model).map_err(|e| ArtifactError::Invalid {
            artifact: "model",
            reason: e.to_string(),
        })?;
        if classifier.n_features() != schema.len() {
            return Err(ArtifactError::Schema(format!(
                "model expects {} features, schema has {}",
                classifier.n_features(),
                schema.len()
            )));
        }
        if let Some(names) = classifier.feature_names_in() {
            if !schema.matches(names) {
                return Err(ArtifactError::Schema(
                    "model feature names differ from the manifest columns".into(),
                ));
            }
        }

        if let Some(class) = classifier
            .classes()
            .iter()
            .find(|c| target.inverse(**c).is_err())
        {
            return Err(ArtifactError::Schema(format!(
                "model class {class} has no target label"
            )));
        }

        Ok(Self {
            manifest,
            schema,
            tables,
            scaler,
            classifier,
            target,
            source: None,
        })
    }

    pub fn manifest(&self) -> &ArtifactManifest {
        &self.manifest
    }

    pub fn run_id(&self) -> &str {
        &self.manifest.run_id
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn tables(&self) -> &CategoryTables {
        &self.tables
    }

    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn target(&self) -> &TargetLabels {
        &self.target
    }

    /// Directory the bundle was loaded from, if it came from disk.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::backends::tree::{TreeNodes, LEAF};
    use crate::manifest::ArtifactFiles;
    use crate::model::EstimatorParams;
    use obesity_encode::{EncodingTable, OrdinalMap};
    use std::collections::BTreeMap;

    /// Three columns: Gender (nominal), CALC (ordinal), Weight (scaled).
    /// The tree splits on scaled weight at 0.0.
    pub(crate) fn parts() -> (
        ArtifactManifest,
        CategoryTables,
        StandardScaler,
        ModelArtifact,
        TargetLabels,
    ) {
        let manifest = ArtifactManifest {
            run_id: "unit".into(),
            columns: vec!["Gender".into(), "CALC".into(), "Weight".into()],
            target: Some("NObeyesdad".into()),
            description: None,
            created_at: None,
            files: ArtifactFiles::default(),
        };
        let mut nominal = BTreeMap::new();
        nominal.insert("Gender".into(), EncodingTable::new(["Female", "Male"]).unwrap());
        let mut ordinal = BTreeMap::new();
        ordinal.insert(
            "CALC".into(),
            OrdinalMap::new(["no", "Sometimes", "Frequently", "Always"]).unwrap(),
        );
        let tables = CategoryTables::new(nominal, ordinal).unwrap();
        let scaler = StandardScaler {
            feature_names_in: vec!["Weight".into()],
            mean: vec![80.0],
            scale: vec![20.0],
        };
        let model = ModelArtifact {
            n_features_in: 3,
            feature_names_in: Some(manifest.columns.clone()),
            classes: vec![0, 1],
            estimator: EstimatorParams::DecisionTree {
                tree: TreeNodes {
                    children_left: vec![1, LEAF, LEAF],
                    children_right: vec![2, LEAF, LEAF],
                    feature: vec![2, -2, -2],
                    threshold: vec![0.0, -2.0, -2.0],
                    value: vec![vec![5.0, 5.0], vec![4.0, 1.0], vec![1.0, 4.0]],
                },
            },
        };
        let target = TargetLabels::new("NObeyesdad", ["Normal_Weight", "Obesity_Type_I"]).unwrap();
        (manifest, tables, scaler, model, target)
    }

    pub(crate) fn bundle() -> ArtifactBundle {
        let (m, t, s, model, target) = parts();
        ArtifactBundle::from_parts(m, t, s, model, target).unwrap()
    }

    #[test]
    fn consistent_parts_build_a_bundle() {
        let b = bundle();
        assert_eq!(b.run_id(), "unit");
        assert_eq!(b.schema().len(), 3);
        assert!(b.source().is_none());
    }

    #[test]
    fn scaler_column_outside_schema_is_rejected() {
        let (m, t, mut s, model, target) = parts();
        s.feature_names_in[0] = "Height".into();
        let err = ArtifactBundle::from_parts(m, t, s, model, target).unwrap_err();
        assert!(matches!(err, ArtifactError::Schema(msg) if msg.contains("Height")));
    }

    #[test]
    fn model_feature_order_must_match_manifest() {
        let (m, t, s, mut model, target) = parts();
        model.feature_names_in = Some(vec!["CALC".into(), "Gender".into(), "Weight".into()]);
        let err = ArtifactBundle::from_parts(m, t, s, model, target).unwrap_err();
        assert!(matches!(err, ArtifactError::Schema(_)));
    }

    #[test]
    fn table_for_unknown_column_is_rejected() {
        let (m, mut t, s, model, target) = parts();
        t.nominal
            .insert("SMOKE".into(), EncodingTable::new(["no", "yes"]).unwrap());
        let err = ArtifactBundle::from_parts(m, t, s, model, target).unwrap_err();
        assert!(matches!(err, ArtifactError::Schema(msg) if msg.contains("SMOKE")));
    }

    #[test]
    fn categorical_column_without_table_is_rejected() {
        let (m, mut t, s, model, target) = parts();
        t.nominal.remove("Gender");
        let err = ArtifactBundle::from_parts(m, t, s, model, target).unwrap_err();
        assert!(matches!(err, ArtifactError::Schema(msg) if msg.contains("Gender")));
    }

    #[test]
    fn target_must_cover_model_classes() {
        let (m, t, s, model, _) = parts();
        let target = TargetLabels::new("NObeyesdad", ["Normal_Weight"]).unwrap();
        let err = ArtifactBundle::from_parts(m, t, s, model, target).unwrap_err();
        assert!(matches!(err, ArtifactError::Schema(msg) if msg.contains("class 1")));
    }
}
