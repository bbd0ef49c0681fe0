// Test fixtures shared by the unit tests: CSV writers and a
// deterministic in-memory tokenizer.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::atomic::{AtomicUsize, Ordering},
};

use crate::domain::{example::EncodedPair, traits::PairTokenizer};

pub const CLS: u32 = 101;
pub const SEP: u32 = 102;

pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn write_csv(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

/// `rows` labelled rows named `{prefix}-{i}` with label `i`
pub fn labelled_csv(dir: &Path, name: &str, rows: usize) -> PathBuf {
    let mut body = String::from("id,sentence_1,sentence_2,label\n");
    for i in 0..rows {
        body.push_str(&format!("{name}-{i},left {i},right {i},{i}\n"));
    }
    write_csv(dir, name, &body)
}

/// Whitespace tokenizer: `[CLS] a.. [SEP] b.. [SEP]`, word ids
/// are a hash of the word, so equal words get equal ids.
pub struct FakeTokenizer {
    max_length: usize,
    pad:        bool,
    fail_on:    Option<String>,
    calls:      AtomicUsize,
}

impl FakeTokenizer {
    pub fn new(max_length: usize) -> Self {
        Self {
            max_length,
            pad:     true,
            fail_on: None,
            calls:   AtomicUsize::new(0),
        }
    }

    /// Return raw, unpadded and untruncated sequences
    pub fn without_padding(mut self) -> Self {
        self.pad = false;
        self
    }

    /// Fail whenever sentence A equals `text`
    pub fn failing_on(mut self, text: &str) -> Self {
        self.fail_on = Some(text.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn word_id(word: &str) -> u32 {
        1000 + word
            .bytes()
            .fold(0u32, |h, b| h.wrapping_mul(31).wrapping_add(b as u32))
            % 5000
    }
}

impl PairTokenizer for FakeTokenizer {
    fn tokenize(&self, text_a: &str, text_b: &str) -> anyhow::Result<EncodedPair> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_on.as_deref() == Some(text_a) {
            anyhow::bail!("cannot tokenize '{text_a}'");
        }

        let mut input_ids = vec![CLS];
        input_ids.extend(text_a.split_whitespace().map(Self::word_id));
        input_ids.push(SEP);
        let segment_a = input_ids.len();
        input_ids.extend(text_b.split_whitespace().map(Self::word_id));
        input_ids.push(SEP);

        let mut token_type_ids = vec![0; segment_a];
        token_type_ids.resize(input_ids.len(), 1);
        let mut pair = EncodedPair {
            attention_mask: vec![1; input_ids.len()],
            input_ids,
            token_type_ids,
        };
        if self.pad {
            pair.fit_to_length(self.max_length, 0);
        }
        Ok(pair)
    }

    fn max_length(&self) -> usize {
        self.max_length
    }
}
