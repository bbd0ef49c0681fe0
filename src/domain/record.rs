// ============================================================
// Domain: StsRecord
// ============================================================
// One input example as it appears in the CSV file, minus the
// identifier column which is dropped at load time.
//
// The label is optional: test files used for prediction have
// no label column at all, and every record read from such a
// file carries `label: None`.

use serde::{Deserialize, Serialize};

/// A sentence pair with an optional similarity score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StsRecord {
    /// First sentence: always encoded as segment A
    pub sentence_1: String,

    /// Second sentence: always encoded as segment B
    pub sentence_2: String,

    /// Gold similarity score, absent in inference mode
    pub label: Option<f32>,
}

impl StsRecord {
    /// Create a labelled record
    pub fn new(
        sentence_1: impl Into<String>,
        sentence_2: impl Into<String>,
        label:      f32,
    ) -> Self {
        Self {
            sentence_1: sentence_1.into(),
            sentence_2: sentence_2.into(),
            label:      Some(label),
        }
    }

    /// Create a record without a label (inference mode)
    pub fn unlabelled(sentence_1: impl Into<String>, sentence_2: impl Into<String>) -> Self {
        Self {
            sentence_1: sentence_1.into(),
            sentence_2: sentence_2.into(),
            label:      None,
        }
    }

    pub fn is_labelled(&self) -> bool {
        self.label.is_some()
    }
}
