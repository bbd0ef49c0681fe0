// ============================================================
// Domain Layer
// ============================================================
// Plain Rust structs, enums and traits describing what the
// pipeline works on. Nothing in here touches the filesystem,
// the tokenizer library or burn tensors.
//
//   record.rs : one CSV row (two sentences + optional label)
//   example.rs: one tokenised, fixed-length row
//   split.rs  : the train/dev/test partitions and setup stages
//   traits.rs : capability seams (record source, tokenizer)
//               so the pipeline can be tested with fakes

/// A raw sentence pair read from disk
pub mod record;

/// Fixed-length tokenizer output for one sentence pair
pub mod example;

/// Split names and setup stages
pub mod split;

/// Capability traits implemented by the data and infra layers
pub mod traits;
