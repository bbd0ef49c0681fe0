// ============================================================
// Domain: Capability Traits
// ============================================================
// The two external capabilities the pipeline depends on:
//
//   RecordSource : something that yields StsRecords
//                   (CsvRecordLoader reads them from disk)
//   PairTokenizer: something that turns a sentence pair into
//                   ids / mask / type ids
//                   (HfPairTokenizer wraps the tokenizers crate)
//
// Programming against these traits keeps the data module
// testable with in-memory fakes.

use crate::domain::{example::EncodedPair, record::StsRecord};
use crate::error::Result;

// ─── RecordSource ─────────────────────────────────────────────────────────────
/// Any component that can load sentence-pair records.
pub trait RecordSource {
    /// Load every record, in file order.
    fn load_all(&self) -> Result<Vec<StsRecord>>;
}

// ─── PairTokenizer ────────────────────────────────────────────────────────────
/// Subword tokenization of a sentence pair.
///
/// Implementations insert special tokens and are expected to
/// pad/truncate to `max_length()`. The encoding step still
/// enforces that length, so a tokenizer that returns a shorter
/// or longer sequence is corrected rather than trusted.
pub trait PairTokenizer: Send + Sync {
    /// Encode `text_a` as segment A and `text_b` as segment B.
    fn tokenize(&self, text_a: &str, text_b: &str) -> anyhow::Result<EncodedPair>;

    /// The sequence length this tokenizer was configured for
    fn max_length(&self) -> usize;

    /// Id used to fill padding positions
    fn pad_id(&self) -> u32 {
        0
    }
}
