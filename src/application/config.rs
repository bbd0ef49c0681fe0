// ============================================================
// Application: Configuration
// ============================================================
// Everything the data module needs, grouped the same way a
// training run's config file is:
//
//   model.model_name   → which tokenizer to load
//   train.batch_size   → examples per batch
//   data.max_length    → token budget per sentence pair
//   data.shuffle       → bool, or { train, dev, test }
//   data.seed          → seed for the shuffling RNG
//   data.columns       → CSV column names (optional)
//   path.*_path        → one CSV file per split
//
// Serialisable with serde so a run's settings can be kept as
// JSON next to its outputs and read back later.

use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::data::loader::ColumnSpec;
use crate::domain::split::Split;
use crate::error::{DataError, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StsConfig {
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub train: TrainConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub path: PathConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// tokenizer.json path, directory holding one, or hub id
    pub model_name: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self { model_name: "klue/roberta-small".to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainConfig {
    pub batch_size: usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self { batch_size: 16 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub max_length: usize,
    pub shuffle:    ShuffleConfig,
    pub seed:       u64,
    pub columns:    ColumnSpec,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            max_length: 128,
            shuffle:    ShuffleConfig::default(),
            seed:       42,
            columns:    ColumnSpec::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathConfig {
    pub train_path: PathBuf,
    pub dev_path:   PathBuf,
    pub test_path:  PathBuf,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            train_path: PathBuf::from("data/train.csv"),
            dev_path:   PathBuf::from("data/dev.csv"),
            test_path:  PathBuf::from("data/test.csv"),
        }
    }
}

impl PathConfig {
    pub fn for_split(&self, split: Split) -> &Path {
        match split {
            Split::Train => &self.train_path,
            Split::Dev   => &self.dev_path,
            Split::Test  => &self.test_path,
        }
    }
}

// ─── Shuffle ──────────────────────────────────────────────────────────────────
/// Per-split shuffle flags. Deserialises from either a single
/// bool (same flag for every split) or an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ShuffleRepr")]
pub struct ShuffleConfig {
    pub train: bool,
    pub dev:   bool,
    pub test:  bool,
}

impl Default for ShuffleConfig {
    fn default() -> Self {
        Self { train: true, dev: false, test: false }
    }
}

impl ShuffleConfig {
    pub fn all(shuffle: bool) -> Self {
        Self { train: shuffle, dev: shuffle, test: shuffle }
    }

    pub fn for_split(&self, split: Split) -> bool {
        match split {
            Split::Train => self.train,
            Split::Dev   => self.dev,
            Split::Test  => self.test,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ShuffleRepr {
    All(bool),
    PerSplit {
        #[serde(default = "default_true")]
        train: bool,
        #[serde(default)]
        dev:   bool,
        #[serde(default)]
        test:  bool,
    },
}

fn default_true() -> bool {
    true
}

impl From<ShuffleRepr> for ShuffleConfig {
    fn from(repr: ShuffleRepr) -> Self {
        match repr {
            ShuffleRepr::All(flag) => ShuffleConfig::all(flag),
            ShuffleRepr::PerSplit { train, dev, test } => ShuffleConfig { train, dev, test },
        }
    }
}

// ─── Loading / validation ─────────────────────────────────────────────────────
impl StsConfig {
    /// Read a JSON config file and validate it.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| DataError::io(path, e))?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: StsConfig = serde_json::from_str(json)
            .map_err(|e| DataError::Config(format!("cannot parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| DataError::Config(format!("cannot serialise config: {e}")))
    }

    pub fn validate(&self) -> Result<()> {
        if self.train.batch_size == 0 {
            return Err(DataError::Config("batch_size must be positive".into()));
        }
        if self.data.max_length == 0 {
            return Err(DataError::Config("max_length must be positive".into()));
        }
        if self.model.model_name.trim().is_empty() {
            return Err(DataError::Config("model_name is empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_sectioned_config() {
        let cfg = StsConfig::from_json(
            r#"{
                "model": { "model_name": "klue/roberta-large" },
                "train": { "batch_size": 32 },
                "data":  { "max_length": 160, "shuffle": true },
                "path":  { "train_path": "t.csv", "dev_path": "d.csv", "test_path": "x.csv" }
            }"#,
        )
        .unwrap();

        assert_eq!(cfg.model.model_name, "klue/roberta-large");
        assert_eq!(cfg.train.batch_size, 32);
        assert_eq!(cfg.data.max_length, 160);
        assert_eq!(cfg.data.shuffle, ShuffleConfig::all(true));
        assert_eq!(cfg.data.seed, 42);
        assert_eq!(cfg.path.for_split(Split::Dev), Path::new("d.csv"));
    }

    #[test]
    fn test_per_split_shuffle() {
        let cfg = StsConfig::from_json(r#"{ "data": { "shuffle": { "dev": true } } }"#).unwrap();
        assert!(cfg.data.shuffle.for_split(Split::Train));
        assert!(cfg.data.shuffle.for_split(Split::Dev));
        assert!(!cfg.data.shuffle.for_split(Split::Test));
    }

    #[test]
    fn test_zero_sizes_are_rejected() {
        let err = StsConfig::from_json(r#"{ "train": { "batch_size": 0 } }"#).unwrap_err();
        assert!(matches!(err, DataError::Config(_)));

        let err = StsConfig::from_json(r#"{ "data": { "max_length": 0 } }"#).unwrap_err();
        assert!(matches!(err, DataError::Config(_)));
    }

    #[test]
    fn test_bad_json_is_config_error() {
        assert!(matches!(
            StsConfig::from_json("{ not json"),
            Err(DataError::Config(_))
        ));
    }

    #[test]
    fn test_missing_config_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = StsConfig::from_file(dir.path().join("config.json")).unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
    }

    #[test]
    fn test_json_survives_a_save() {
        let mut cfg = StsConfig::default();
        cfg.data.shuffle = ShuffleConfig { train: false, dev: true, test: false };
        let back = StsConfig::from_json(&cfg.to_json().unwrap()).unwrap();
        assert_eq!(back, cfg);
    }
}
