// ============================================================
// Data: CSV Record Loader
// ============================================================
// Reads one split file into StsRecords.
//
// Expected layout (header row required):
//
//   id,sentence_1,sentence_2,label
//   boostcamp-sts-v1-train-000,"I like it.","I love it.",3.8
//   ...
//
// Rules:
//   - id is required but dropped; it never reaches the model
//   - sentence_1 / sentence_2 are required
//   - label is optional; without it every record is unlabelled
//     and the split runs in inference mode
//   - a label column with only blank cells counts as missing;
//     blank cells mixed with real labels are an error
//   - any other column is ignored
//
// One bad row fails the whole file. Skipping it would shift
// every later label against its inputs.

use csv::{ReaderBuilder, StringRecord};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    path::{Path, PathBuf},
};

use crate::domain::record::StsRecord;
use crate::domain::traits::RecordSource;
use crate::error::{DataError, Result};

// ─── ColumnSpec ───────────────────────────────────────────────────────────────
/// Names of the columns the loader looks for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnSpec {
    /// Identifier column, validated then dropped
    pub id: String,
    /// The two text columns, in encoding order (A, B)
    pub text: [String; 2],
    /// Target column; may be missing from the file
    pub label: String,
}

impl Default for ColumnSpec {
    fn default() -> Self {
        Self {
            id:    "id".to_string(),
            text:  ["sentence_1".to_string(), "sentence_2".to_string()],
            label: "label".to_string(),
        }
    }
}

/// Column positions resolved against a concrete header row
#[derive(Debug, Clone, Copy)]
struct ColumnLayout {
    sentence_1: usize,
    sentence_2: usize,
    label:      Option<usize>,
}

impl ColumnSpec {
    fn resolve(&self, headers: &StringRecord) -> std::result::Result<ColumnLayout, String> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        let require = |name: &str| {
            find(name).ok_or_else(|| format!("missing required column '{name}'"))
        };

        require(&self.id)?;

        Ok(ColumnLayout {
            sentence_1: require(&self.text[0])?,
            sentence_2: require(&self.text[1])?,
            label:      find(&self.label),
        })
    }
}

impl ColumnLayout {
    /// Pull one StsRecord out of a CSV row. `row` is 1-based
    /// and only used for error messages.
    fn extract(&self, row_data: &StringRecord, row: usize) -> std::result::Result<StsRecord, String> {
        let cell = |idx: usize| {
            row_data
                .get(idx)
                .ok_or_else(|| format!("row {row}: missing field {idx}"))
        };

        let label = match self.label.map(cell).transpose()?.map(str::trim) {
            None | Some("") => None,
            Some(raw) => {
                let value: f32 = raw
                    .parse()
                    .map_err(|_| format!("row {row}: label '{raw}' is not a number"))?;
                if !value.is_finite() {
                    return Err(format!("row {row}: label '{raw}' is not finite"));
                }
                Some(value)
            }
        };

        Ok(StsRecord {
            sentence_1: cell(self.sentence_1)?.to_string(),
            sentence_2: cell(self.sentence_2)?.to_string(),
            label,
        })
    }
}

// ─── CsvRecordLoader ──────────────────────────────────────────────────────────
/// Loads sentence-pair records from a comma-separated file.
pub struct CsvRecordLoader {
    path:    PathBuf,
    columns: ColumnSpec,
}

impl CsvRecordLoader {
    /// Loader using the default `id, sentence_1, sentence_2, label` columns
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self::with_columns(path, ColumnSpec::default())
    }

    pub fn with_columns(path: impl AsRef<Path>, columns: ColumnSpec) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            columns,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Map a csv error to Io when the underlying reader failed,
    /// otherwise to Schema (bad quoting, unequal row widths, ...)
    fn csv_error(&self, err: csv::Error) -> DataError {
        let message = err.to_string();
        match err.into_kind() {
            csv::ErrorKind::Io(source) => DataError::io(&self.path, source),
            _ => DataError::schema(&self.path, message),
        }
    }
}

impl RecordSource for CsvRecordLoader {
    fn load_all(&self) -> Result<Vec<StsRecord>> {
        let file = File::open(&self.path).map_err(|e| DataError::io(&self.path, e))?;

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .from_reader(file);

        let headers = reader.headers().map_err(|e| self.csv_error(e))?.clone();
        let layout = self
            .columns
            .resolve(&headers)
            .map_err(|reason| DataError::schema(&self.path, reason))?;

        let mut records = Vec::new();
        let mut first_blank = None;
        for (i, result) in reader.records().enumerate() {
            let row_data = result.map_err(|e| self.csv_error(e))?;
            let record = layout
                .extract(&row_data, i + 1)
                .map_err(|reason| DataError::schema(&self.path, reason))?;
            if layout.label.is_some() && record.label.is_none() && first_blank.is_none() {
                first_blank = Some(i + 1);
            }
            records.push(record);
        }

        let labelled = records.iter().any(StsRecord::is_labelled);
        if let (Some(row), true) = (first_blank, labelled) {
            return Err(DataError::schema(
                &self.path,
                format!("row {row}: label is blank while other rows are labelled"),
            ));
        }

        if !labelled {
            let why = if layout.label.is_some() { "only blank cells in" } else { "no" };
            tracing::warn!(
                "'{}' has {} '{}' column: loading in inference mode",
                self.path.display(),
                why,
                self.columns.label
            );
        }

        tracing::info!(
            "Loaded {} records from '{}' (labelled: {})",
            records.len(),
            self.path.display(),
            labelled
        );
        Ok(records)
    }
}

/// Shorthand for `CsvRecordLoader::new(path).load_all()`
pub fn load_csv(path: impl AsRef<Path>) -> Result<Vec<StsRecord>> {
    CsvRecordLoader::new(path).load_all()
}
