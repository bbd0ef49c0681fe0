// ============================================================
// Data: Batch Source
// ============================================================
// Hands out fixed-size batches of plain arrays, one pass at a
// time.
//
//   dataset (N rows) ──▶ order ──▶ [0..B) [B..2B) ... [kB..N)
//
// - order is 0..N, or a fresh random permutation of it when
//   shuffling; the dataset itself is never reordered
// - each call to iter() starts a new pass, so the same source
//   serves every epoch
// - the permutation comes from a seeded StdRng, so a given seed
//   replays the same sequence of epochs
// - the last batch holds the N mod B leftovers (if any)

use burn::data::dataset::Dataset;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use std::sync::Arc;

use crate::data::dataset::StsDataset;
use crate::domain::example::EncodedExample;
use crate::error::{DataError, Result};

// ─── Batch ────────────────────────────────────────────────────────────────────
/// Parallel arrays for one step. Row `i` of every array belongs
/// to the same example.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub input_ids:      Vec<Vec<u32>>,
    pub attention_mask: Vec<Vec<u32>>,
    pub token_type_ids: Vec<Vec<u32>>,
    /// Present only for labelled splits
    pub labels:         Option<Vec<f32>>,
}

impl Batch {
    /// Stack examples into a batch. Labels are kept only when
    /// every example carries one.
    pub fn from_examples(examples: Vec<EncodedExample>) -> Self {
        let n = examples.len();
        let mut batch = Batch {
            input_ids:      Vec::with_capacity(n),
            attention_mask: Vec::with_capacity(n),
            token_type_ids: Vec::with_capacity(n),
            labels:         None,
        };
        let mut labels = Vec::with_capacity(n);

        for ex in examples {
            batch.input_ids.push(ex.input_ids);
            batch.attention_mask.push(ex.attention_mask);
            batch.token_type_ids.push(ex.token_type_ids);
            if let Some(label) = ex.label {
                labels.push(label);
            }
        }

        if n > 0 && labels.len() == n {
            batch.labels = Some(labels);
        }
        batch
    }

    /// Number of examples in this batch
    pub fn len(&self) -> usize {
        self.input_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.input_ids.is_empty()
    }
}

// ─── BatchSource ──────────────────────────────────────────────────────────────
/// Restartable batch producer over one split.
pub struct BatchSource {
    dataset:    Arc<StsDataset>,
    batch_size: usize,
    shuffle:    bool,
    rng:        StdRng,
}

impl BatchSource {
    pub fn new(
        dataset:    Arc<StsDataset>,
        batch_size: usize,
        shuffle:    bool,
        seed:       u64,
    ) -> Result<Self> {
        if batch_size == 0 {
            return Err(DataError::Config("batch_size must be positive".into()));
        }
        Ok(Self {
            dataset,
            batch_size,
            shuffle,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Batches per pass: ceil(N / batch_size)
    pub fn num_batches(&self) -> usize {
        self.dataset.len().div_ceil(self.batch_size)
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn dataset(&self) -> &StsDataset {
        &self.dataset
    }

    /// Start a new pass over the dataset.
    pub fn iter(&mut self) -> Batches<'_> {
        let mut order: Vec<usize> = (0..self.dataset.len()).collect();
        if self.shuffle {
            order.shuffle(&mut self.rng);
        }

        Batches {
            dataset:    &self.dataset,
            order,
            batch_size: self.batch_size,
            cursor:     0,
        }
    }
}

// ─── Batches ──────────────────────────────────────────────────────────────────
/// One lazy pass. Batches are assembled only when `next` is called.
pub struct Batches<'a> {
    dataset:    &'a StsDataset,
    order:      Vec<usize>,
    batch_size: usize,
    cursor:     usize,
}

impl Iterator for Batches<'_> {
    type Item = Batch;

    fn next(&mut self) -> Option<Batch> {
        if self.cursor >= self.order.len() {
            return None;
        }
        let end = (self.cursor + self.batch_size).min(self.order.len());
        let examples = self.order[self.cursor..end]
            .iter()
            .filter_map(|&idx| self.dataset.get(idx))
            .collect();
        self.cursor = end;
        Some(Batch::from_examples(examples))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.order.len() - self.cursor).div_ceil(self.batch_size);
        (left, Some(left))
    }
}

impl ExactSizeIterator for Batches<'_> {}
