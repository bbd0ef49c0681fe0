// ============================================================
// Infrastructure Layer
// ============================================================
// Integration with third-party libraries that the domain only
// sees through traits.
//
//   tokenizer_store.rs: resolves a model name to a
//                        `tokenizers::Tokenizer`, pins its
//                        padding/truncation to max_length and
//                        exposes it as a PairTokenizer

/// Tokenizer loading and pair encoding
pub mod tokenizer_store;
