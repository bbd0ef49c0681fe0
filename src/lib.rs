// ============================================================
// sts-data
// ============================================================
// Data preparation for sentence-pair similarity (STS) training.
//
//   split CSV files
//       │
//       ▼
//   CsvRecordLoader   → StsRecords (id dropped, label optional)
//       │
//       ▼
//   encode_records    → fixed-length ids / mask / type ids
//       │
//       ▼
//   StsDataset        → Burn Dataset, random access
//       │
//       ▼
//   BatchSource       → plain-array batches, per-pass shuffle
//   StsBatcher        → Burn tensor batches for a DataLoader
//
// StsDataModule ties the steps together per split and is the
// entry point a training loop talks to.
//
// The layers follow the same split as the rest of the code:
//   domain      : plain types and capability traits
//   data        : loading, encoding, datasets, batching
//   infra       : the tokenizers-crate integration
//   application : configuration and the data module

pub mod application;
pub mod data;
pub mod domain;
pub mod error;
pub mod infra;

#[cfg(test)]
mod testing;

pub use application::{
    config::{ShuffleConfig, StsConfig},
    data_module::{SplitState, StsDataModule},
};
pub use data::{
    batch_source::{Batch, BatchSource, Batches},
    batcher::{StsBatch, StsBatcher},
    dataset::StsDataset,
    loader::{load_csv, ColumnSpec, CsvRecordLoader},
};
pub use domain::{
    example::{EncodedExample, EncodedPair},
    record::StsRecord,
    split::{Split, Stage},
    traits::{PairTokenizer, RecordSource},
};
pub use error::{DataError, Result};
pub use infra::tokenizer_store::{HfPairTokenizer, TokenizerStore};
