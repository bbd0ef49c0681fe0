// ============================================================
// Data Pipeline
// ============================================================
// Everything between a split's CSV file and a batch:
//
//   CsvRecordLoader  → reads rows, drops the id column
//       │
//       ▼
//   encode_records   → tokenizer call + length policy
//       │
//       ▼
//   StsDataset       → implements Burn's Dataset trait
//       │
//       ├──▶ BatchSource → plain-array batches
//       └──▶ StsBatcher  → Burn tensor batches
//
// Each module is one step and is tested on its own.

/// Reads split CSV files into StsRecords
pub mod loader;

/// Tokenizes records into fixed-length examples
pub mod encoder;

/// Implements Burn's Dataset trait for encoded examples
pub mod dataset;

/// Restartable, optionally shuffled batch iteration
pub mod batch_source;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;
