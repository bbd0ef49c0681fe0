// ============================================================
// Data: Pair Encoder
// ============================================================
// Turns StsRecords into fixed-length EncodedExamples.
//
// The tokenizer does the real work (subwords, [CLS]/[SEP],
// padding, truncation). This step owns the policy around it:
//
//   - sentence_1 is always segment A, sentence_2 segment B
//   - every output is exactly max_length long: the tokenizer
//     output is cut or padded here if it is not already
//   - a row the tokenizer rejects fails the whole split
//   - output order == input order

use crate::domain::{
    example::EncodedExample,
    record::StsRecord,
    traits::PairTokenizer,
};
use crate::error::{DataError, Result};

/// How often progress is reported while encoding
const PROGRESS_EVERY: usize = 1000;

/// Encode a single record. `row` is 1-based, used in errors.
pub fn encode_record(
    tokenizer:  &dyn PairTokenizer,
    record:     &StsRecord,
    max_length: usize,
    row:        usize,
) -> Result<EncodedExample> {
    let mut pair = tokenizer
        .tokenize(&record.sentence_1, &record.sentence_2)
        .map_err(|source| DataError::Tokenize { row, source })?;

    if pair.aligned_len().is_none() {
        return Err(DataError::Tokenize {
            row,
            source: anyhow::anyhow!(
                "tokenizer returned arrays of different lengths (ids={}, mask={}, types={})",
                pair.input_ids.len(),
                pair.attention_mask.len(),
                pair.token_type_ids.len()
            ),
        });
    }

    pair.fit_to_length(max_length, tokenizer.pad_id());
    Ok(EncodedExample::new(pair, record.label))
}

/// Encode every record in order, stopping at the first failure.
pub fn encode_records(
    tokenizer:  &dyn PairTokenizer,
    records:    &[StsRecord],
    max_length: usize,
) -> Result<Vec<EncodedExample>> {
    let total = records.len();
    let mut examples = Vec::with_capacity(total);

    for (i, record) in records.iter().enumerate() {
        examples.push(encode_record(tokenizer, record, max_length, i + 1)?);

        if (i + 1) % PROGRESS_EVERY == 0 {
            tracing::debug!("tokenizing: {}/{}", i + 1, total);
        }
    }

    tracing::info!("Tokenized {} sentence pairs (max_length={})", total, max_length);
    Ok(examples)
}
