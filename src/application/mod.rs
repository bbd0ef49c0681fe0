// ============================================================
// Application Layer
// ============================================================
// Wires the data layer together for a training run:
//
//   config.rs     : StsConfig, read from JSON
//   data_module.rs: per-split state machine, setup stages and
//                    the batch iterators handed to the trainer
//
// No tokenization or CSV parsing happens here; this layer only
// decides what runs when.

/// Sectioned configuration (model / train / data / path)
pub mod config;

/// Load → tokenize → dataset orchestration per split
pub mod data_module;
