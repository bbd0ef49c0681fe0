// ============================================================
// Domain: Encoded Examples
// ============================================================
// Output of the tokenizer for one sentence pair:
//
//   input_ids:      [CLS] A ... [SEP] B ... [SEP] [PAD] ...
//   attention_mask:   1   1 ...   1   1 ...   1     0   ...
//   token_type_ids:   0   0 ...   0   1 ...   1     0   ...
//
// All three sequences always have the same length, and once
// the encoding step has run that length is exactly max_length.

use serde::{Deserialize, Serialize};

/// What the external tokenizer hands back for one pair.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EncodedPair {
    pub input_ids:      Vec<u32>,
    pub attention_mask: Vec<u32>,
    pub token_type_ids: Vec<u32>,
}

impl EncodedPair {
    /// Length shared by the three arrays, or None if they disagree
    pub fn aligned_len(&self) -> Option<usize> {
        let n = self.input_ids.len();
        (self.attention_mask.len() == n && self.token_type_ids.len() == n).then_some(n)
    }

    /// Force every array to exactly `max_length`.
    /// Longer arrays are cut; shorter ones get `pad_id` / 0 / 0.
    pub fn fit_to_length(&mut self, max_length: usize, pad_id: u32) {
        self.input_ids.resize(max_length, pad_id);
        self.attention_mask.resize(max_length, 0);
        self.token_type_ids.resize(max_length, 0);
    }

    /// Number of non-padding positions
    pub fn real_tokens(&self) -> usize {
        self.attention_mask.iter().filter(|&&m| m != 0).count()
    }
}

/// One fully tokenised and padded STS sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodedExample {
    pub input_ids:      Vec<u32>,
    pub attention_mask: Vec<u32>,
    pub token_type_ids: Vec<u32>,
    pub label:          Option<f32>,
}

impl EncodedExample {
    pub fn new(pair: EncodedPair, label: Option<f32>) -> Self {
        Self {
            input_ids:      pair.input_ids,
            attention_mask: pair.attention_mask,
            token_type_ids: pair.token_type_ids,
            label,
        }
    }

    /// Split back into the input arrays and the label
    pub fn into_parts(self) -> (EncodedPair, Option<f32>) {
        let pair = EncodedPair {
            input_ids:      self.input_ids,
            attention_mask: self.attention_mask,
            token_type_ids: self.token_type_ids,
        };
        (pair, self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(len: usize) -> EncodedPair {
        EncodedPair {
            input_ids:      (1..=len as u32).collect(),
            attention_mask: vec![1; len],
            token_type_ids: vec![0; len],
        }
    }

    #[test]
    fn test_fit_pads_short_sequences() {
        let mut p = pair(3);
        p.fit_to_length(6, 0);
        assert_eq!(p.input_ids,      vec![1, 2, 3, 0, 0, 0]);
        assert_eq!(p.attention_mask, vec![1, 1, 1, 0, 0, 0]);
        assert_eq!(p.real_tokens(), 3);
    }

    #[test]
    fn test_fit_truncates_long_sequences() {
        let mut p = pair(10);
        p.fit_to_length(4, 0);
        assert_eq!(p.aligned_len(), Some(4));
        assert_eq!(p.input_ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_misaligned_pair_has_no_len() {
        let mut p = pair(3);
        p.token_type_ids.pop();
        assert_eq!(p.aligned_len(), None);
    }
}
