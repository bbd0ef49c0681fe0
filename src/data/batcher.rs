// ============================================================
// Data: STS Tensor Batcher
// ============================================================
// Implements Burn's Batcher trait so the splits can be fed to
// a Burn DataLoader / training loop directly.
//
//   Input:  Vec of N EncodedExamples, each of length S
//   Output: StsBatch with [N, S] int tensors (+ [N] labels)
//
// All sequences are already padded to max_length by the
// encoder, so stacking is a flatten + reshape.

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::data::batch_source::Batch;
use crate::domain::example::EncodedExample;

// ─── StsBatch ─────────────────────────────────────────────────────────────────
/// A batch of sentence pairs ready for a model forward pass.
#[derive(Debug, Clone)]
pub struct StsBatch<B: Backend> {
    /// [batch_size, seq_len]
    pub input_ids: Tensor<B, 2, Int>,

    /// [batch_size, seq_len]: 1 = real token, 0 = padding
    pub attention_mask: Tensor<B, 2, Int>,

    /// [batch_size, seq_len]: 0 = sentence A, 1 = sentence B
    pub token_type_ids: Tensor<B, 2, Int>,

    /// [batch_size] similarity scores; None for inference splits
    pub labels: Option<Tensor<B, 1>>,
}

#[derive(Clone, Debug)]
pub struct StsBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> StsBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }

    /// Convert a plain-array Batch (from a BatchSource) to tensors.
    pub fn to_tensors(&self, batch: &Batch) -> StsBatch<B> {
        let rows = batch.len();
        let seq_len = batch.input_ids.first().map_or(0, Vec::len);

        StsBatch {
            input_ids:      self.stack(&batch.input_ids, rows, seq_len),
            attention_mask: self.stack(&batch.attention_mask, rows, seq_len),
            token_type_ids: self.stack(&batch.token_type_ids, rows, seq_len),
            labels: batch
                .labels
                .as_ref()
                .map(|labels| Tensor::<B, 1>::from_floats(labels.as_slice(), &self.device)),
        }
    }

    /// Flatten row-major and reshape to [rows, seq_len]
    fn stack(&self, rows_data: &[Vec<u32>], rows: usize, seq_len: usize) -> Tensor<B, 2, Int> {
        let flat: Vec<i32> = rows_data
            .iter()
            .flat_map(|row| row.iter().map(|&x| x as i32))
            .collect();

        Tensor::<B, 1, Int>::from_ints(flat.as_slice(), &self.device)
            .reshape([rows, seq_len])
    }
}

// ─── Burn Batcher Trait Implementation ────────────────────────────────────────
impl<B: Backend> Batcher<EncodedExample, StsBatch<B>> for StsBatcher<B> {
    fn batch(&self, items: Vec<EncodedExample>) -> StsBatch<B> {
        self.to_tensors(&Batch::from_examples(items))
    }
}
