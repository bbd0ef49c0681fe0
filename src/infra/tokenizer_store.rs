// ============================================================
// Infra: Tokenizer Store
// ============================================================
// Resolves the configured model name into a ready-to-use
// pair tokenizer from the `tokenizers` crate.
//
// Resolution order for `model_name`:
//   1. a path to a tokenizer.json file
//   2. a directory containing tokenizer.json
//   3. a Hugging Face hub id (only with the `pretrained`
//      feature, which enables the tokenizers/http download)
//
// The loaded tokenizer is then pinned to one sequence length:
//   padding    → Fixed(max_length), pad id/token from the model
//   truncation → LongestFirst, right side, max_length
// so every encoding comes back exactly max_length long.

use std::path::Path;
use tokenizers::{
    PaddingDirection, PaddingParams, PaddingStrategy, Tokenizer, TruncationDirection,
    TruncationParams, TruncationStrategy,
};

use crate::domain::{example::EncodedPair, traits::PairTokenizer};
use crate::error::{DataError, Result};

const TOKENIZER_FILE: &str = "tokenizer.json";

/// Pad tokens tried, in order, when the model does not declare one
const PAD_TOKENS: [&str; 3] = ["[PAD]", "<pad>", "<|padding|>"];

pub struct TokenizerStore {
    model_name: String,
}

impl TokenizerStore {
    pub fn new(model_name: impl Into<String>) -> Self {
        Self { model_name: model_name.into() }
    }

    /// Load the tokenizer and configure it for `max_length`.
    pub fn load(&self, max_length: usize) -> Result<HfPairTokenizer> {
        if max_length == 0 {
            return Err(DataError::Config("max_length must be positive".into()));
        }
        let tokenizer = self.resolve()?;
        HfPairTokenizer::new(tokenizer, max_length)
    }

    fn resolve(&self) -> Result<Tokenizer> {
        let path = Path::new(&self.model_name);
        if path.is_file() {
            return self.from_file(path);
        }
        if path.is_dir() {
            return self.from_file(&path.join(TOKENIZER_FILE));
        }
        self.from_hub()
    }

    fn from_file(&self, path: &Path) -> Result<Tokenizer> {
        tracing::info!("Loading tokenizer from '{}'", path.display());
        Tokenizer::from_file(path).map_err(|e| {
            DataError::Config(format!("cannot load tokenizer from '{}': {e}", path.display()))
        })
    }

    #[cfg(feature = "pretrained")]
    fn from_hub(&self) -> Result<Tokenizer> {
        tracing::info!("Fetching tokenizer '{}' from the hub", self.model_name);
        Tokenizer::from_pretrained(&self.model_name, None).map_err(|e| {
            DataError::Config(format!("cannot fetch tokenizer '{}': {e}", self.model_name))
        })
    }

    #[cfg(not(feature = "pretrained"))]
    fn from_hub(&self) -> Result<Tokenizer> {
        Err(DataError::Config(format!(
            "'{}' is not a tokenizer file or directory \
             (enable the `pretrained` feature to fetch models by name)",
            self.model_name
        )))
    }
}

// ─── HfPairTokenizer ──────────────────────────────────────────────────────────
/// `tokenizers::Tokenizer` pinned to one max length.
pub struct HfPairTokenizer {
    inner:      Tokenizer,
    max_length: usize,
    pad_id:     u32,
}

impl HfPairTokenizer {
    pub fn new(mut inner: Tokenizer, max_length: usize) -> Result<Self> {
        let (pad_id, pad_token) = pad_of(&inner);

        inner.with_padding(Some(PaddingParams {
            strategy: PaddingStrategy::Fixed(max_length),
            direction: PaddingDirection::Right,
            pad_id,
            pad_token,
            ..Default::default()
        }));
        inner
            .with_truncation(Some(TruncationParams {
                max_length,
                strategy: TruncationStrategy::LongestFirst,
                direction: TruncationDirection::Right,
                stride: 0,
            }))
            .map_err(|e| DataError::Config(format!("cannot configure truncation: {e}")))?;

        tracing::debug!("Tokenizer ready (max_length={}, pad_id={})", max_length, pad_id);
        Ok(Self { inner, max_length, pad_id })
    }

    pub fn inner(&self) -> &Tokenizer {
        &self.inner
    }
}

/// Pad id and token the model declares, or the first known pad
/// token in its vocabulary, or id 0.
fn pad_of(tokenizer: &Tokenizer) -> (u32, String) {
    if let Some(params) = tokenizer.get_padding() {
        return (params.pad_id, params.pad_token.clone());
    }
    PAD_TOKENS
        .iter()
        .find_map(|tok| tokenizer.token_to_id(tok).map(|id| (id, tok.to_string())))
        .unwrap_or_else(|| (0, PAD_TOKENS[0].to_string()))
}

impl PairTokenizer for HfPairTokenizer {
    fn tokenize(&self, text_a: &str, text_b: &str) -> anyhow::Result<EncodedPair> {
        let encoding = self
            .inner
            .encode((text_a, text_b), true)
            .map_err(|e| anyhow::anyhow!("{e}"))?;

        Ok(EncodedPair {
            input_ids:      encoding.get_ids().to_vec(),
            attention_mask: encoding.get_attention_mask().to_vec(),
            token_type_ids: encoding.get_type_ids().to_vec(),
        })
    }

    fn max_length(&self) -> usize {
        self.max_length
    }

    fn pad_id(&self) -> u32 {
        self.pad_id
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::path::PathBuf;

    /// Write a small word-level tokenizer.json into `dir`
    /// (BERT-style ids for the special tokens).
    pub(crate) fn write_word_level(dir: &Path, words: &[&str]) -> PathBuf {
        let mut vocab = serde_json::json!({
            "[PAD]":  0,
            "[UNK]":  1,
            "[CLS]":  101,
            "[SEP]":  102,
        });
        for (i, word) in words.iter().enumerate() {
            vocab[*word] = serde_json::json!(200 + i);
        }

        let special = |id: u32, content: &str| {
            serde_json::json!({
                "id": id, "content": content, "single_word": false, "lstrip": false,
                "rstrip": false, "normalized": false, "special": true
            })
        };

        let tokenizer_json = serde_json::json!({
            "version": "1.0",
            "truncation": null,
            "padding": null,
            "added_tokens": [
                special(0, "[PAD]"),
                special(1, "[UNK]"),
                special(101, "[CLS]"),
                special(102, "[SEP]")
            ],
            "normalizer": {
                "type": "BertNormalizer",
                "clean_text": true,
                "handle_chinese_chars": true,
                "strip_accents": null,
                "lowercase": true
            },
            "pre_tokenizer": { "type": "Whitespace" },
            "post_processor": {
                "type": "TemplateProcessing",
                "single": [
                    { "SpecialToken": { "id": "[CLS]", "type_id": 0 } },
                    { "Sequence": { "id": "A", "type_id": 0 } },
                    { "SpecialToken": { "id": "[SEP]", "type_id": 0 } }
                ],
                "pair": [
                    { "SpecialToken": { "id": "[CLS]", "type_id": 0 } },
                    { "Sequence": { "id": "A", "type_id": 0 } },
                    { "SpecialToken": { "id": "[SEP]", "type_id": 0 } },
                    { "Sequence": { "id": "B", "type_id": 1 } },
                    { "SpecialToken": { "id": "[SEP]", "type_id": 1 } }
                ],
                "special_tokens": {
                    "[CLS]": { "id": "[CLS]", "ids": [101], "tokens": ["[CLS]"] },
                    "[SEP]": { "id": "[SEP]", "ids": [102], "tokens": ["[SEP]"] }
                }
            },
            "decoder": null,
            "model": {
                "type": "WordLevel",
                "vocab": vocab,
                "unk_token": "[UNK]"
            }
        });

        let path = dir.join(TOKENIZER_FILE);
        std::fs::write(&path, serde_json::to_string_pretty(&tokenizer_json).unwrap()).unwrap();
        path
    }

    #[test]
    fn test_pair_is_padded_to_max_length() {
        let dir = tempfile::tempdir().unwrap();
        write_word_level(dir.path(), &["cats", "purr", "dogs", "bark"]);

        let tok = TokenizerStore::new(dir.path().to_string_lossy()).load(10).unwrap();
        let pair = tok.tokenize("Cats purr", "dogs bark").unwrap();

        assert_eq!(pair.input_ids, vec![101, 200, 201, 102, 202, 203, 102, 0, 0, 0]);
        assert_eq!(pair.attention_mask, vec![1, 1, 1, 1, 1, 1, 1, 0, 0, 0]);
        assert_eq!(pair.token_type_ids, vec![0, 0, 0, 0, 1, 1, 1, 0, 0, 0]);
        assert_eq!(tok.pad_id(), 0);
    }

    #[test]
    fn test_long_pair_is_truncated() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_word_level(dir.path(), &["a", "b"]);

        let tok = TokenizerStore::new(path.to_string_lossy()).load(6).unwrap();
        let pair = tok.tokenize("a a a a a a", "b b b b b b").unwrap();

        assert_eq!(pair.aligned_len(), Some(6));
        assert_eq!(pair.input_ids.first(), Some(&101));
        assert_eq!(pair.attention_mask, vec![1; 6]);
    }

    #[test]
    fn test_unknown_model_name_is_config_error() {
        let err = match TokenizerStore::new("/definitely/not/a/model").load(8) {
            Err(err) => err,
            Ok(_) => panic!("expected an error"),
        };
        assert!(matches!(err, DataError::Config(_)));
    }

    #[test]
    fn test_zero_max_length_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        write_word_level(dir.path(), &[]);
        let result = TokenizerStore::new(dir.path().to_string_lossy()).load(0);
        assert!(matches!(result, Err(DataError::Config(_))));
    }
}
