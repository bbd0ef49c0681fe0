// ============================================================
// Application: STS Data Module
// ============================================================
// Orchestrates load → tokenize → dataset for every split and
// hands out batch iterators to the training loop.
//
// Each split moves through an explicit state machine:
//
//   Unconfigured ──load──▶ Loaded ──tokenize──▶ Tokenized ──build──▶ Ready
//                 (records)          (examples)            (dataset)
//
// Transitions only go forward. Changing the file paths, the
// max length or the tokenizer means building a new module.
//
// setup(Stage::Fit) prepares train + dev, setup(Stage::Test)
// prepares test. Within a stage every file is read before any
// tokenization starts, so a bad path fails fast.
//
// Every split owns a shuffle stream seeded from data.seed. Each
// batch source or DataLoader handed out draws its seed from that
// stream, so asking again next epoch gives a new order while the
// same config replays the same run.

use burn::{
    data::dataloader::{DataLoader, DataLoaderBuilder},
    prelude::Backend,
};
use rand::{rngs::StdRng, RngCore, SeedableRng};
use std::sync::Arc;

use crate::application::config::StsConfig;
use crate::data::{
    batch_source::BatchSource,
    batcher::{StsBatch, StsBatcher},
    dataset::StsDataset,
    encoder::encode_records,
    loader::CsvRecordLoader,
};
use crate::domain::{
    example::EncodedExample,
    record::StsRecord,
    split::{Split, Stage},
    traits::{PairTokenizer, RecordSource},
};
use crate::error::{DataError, Result};
use crate::infra::tokenizer_store::TokenizerStore;

// ─── SplitState ───────────────────────────────────────────────────────────────
#[derive(Debug, Default)]
pub enum SplitState {
    #[default]
    Unconfigured,
    Loaded(Vec<StsRecord>),
    Tokenized(Vec<EncodedExample>),
    Ready(Arc<StsDataset>),
}

impl SplitState {
    pub fn name(&self) -> &'static str {
        match self {
            SplitState::Unconfigured => "unconfigured",
            SplitState::Loaded(_)    => "loaded",
            SplitState::Tokenized(_) => "tokenized",
            SplitState::Ready(_)     => "ready",
        }
    }
}

// ─── StsDataModule ────────────────────────────────────────────────────────────
pub struct StsDataModule {
    config:    StsConfig,
    tokenizer: Arc<dyn PairTokenizer>,
    train:     SplitState,
    dev:       SplitState,
    test:      SplitState,
    /// Shuffle streams, one per split (train, dev, test)
    pass_rngs: [StdRng; 3],
}

impl StsDataModule {
    /// Build a module around an already-configured tokenizer.
    /// The tokenizer's max length must match the config.
    pub fn new(config: StsConfig, tokenizer: Arc<dyn PairTokenizer>) -> Result<Self> {
        config.validate()?;
        if tokenizer.max_length() != config.data.max_length {
            return Err(DataError::Config(format!(
                "tokenizer is configured for max_length={}, config asks for {}",
                tokenizer.max_length(),
                config.data.max_length
            )));
        }

        let seed = config.data.seed;
        Ok(Self {
            config,
            tokenizer,
            train:     SplitState::Unconfigured,
            dev:       SplitState::Unconfigured,
            test:      SplitState::Unconfigured,
            pass_rngs: [0, 1, 2].map(|i| StdRng::seed_from_u64(seed.wrapping_add(i))),
        })
    }

    /// Resolve `model.model_name` through the TokenizerStore and
    /// build the module with it.
    pub fn from_config(config: StsConfig) -> Result<Self> {
        config.validate()?;
        let tokenizer = TokenizerStore::new(&config.model.model_name)
            .load(config.data.max_length)?;
        Self::new(config, Arc::new(tokenizer))
    }

    pub fn config(&self) -> &StsConfig {
        &self.config
    }

    pub fn state(&self, split: Split) -> &SplitState {
        match split {
            Split::Train => &self.train,
            Split::Dev   => &self.dev,
            Split::Test  => &self.test,
        }
    }

    fn state_mut(&mut self, split: Split) -> &mut SplitState {
        match split {
            Split::Train => &mut self.train,
            Split::Dev   => &mut self.dev,
            Split::Test  => &mut self.test,
        }
    }

    /// Seed for the next pass over `split`
    fn next_pass_seed(&mut self, split: Split) -> u64 {
        let slot = match split {
            Split::Train => 0,
            Split::Dev   => 1,
            Split::Test  => 2,
        };
        self.pass_rngs[slot].next_u64()
    }

    fn stage_error(&self, split: Split, expected: &'static str) -> DataError {
        DataError::Stage {
            split,
            expected,
            found: self.state(split).name(),
        }
    }

    // ── Transitions ───────────────────────────────────────────────────────────

    /// Unconfigured → Loaded, reading the split's CSV file.
    pub fn load(&mut self, split: Split) -> Result<()> {
        let loader = CsvRecordLoader::with_columns(
            self.config.path.for_split(split),
            self.config.data.columns.clone(),
        );
        self.load_from(split, &loader)
    }

    /// Unconfigured → Loaded, from any record source.
    pub fn load_from(&mut self, split: Split, source: &dyn RecordSource) -> Result<()> {
        if !matches!(self.state(split), SplitState::Unconfigured) {
            return Err(self.stage_error(split, "unconfigured"));
        }
        let records = source.load_all()?;
        tracing::debug!("{} split loaded ({} records)", split, records.len());
        *self.state_mut(split) = SplitState::Loaded(records);
        Ok(())
    }

    /// Loaded → Tokenized. On failure the split stays Loaded.
    pub fn tokenize(&mut self, split: Split) -> Result<()> {
        let examples = match self.state(split) {
            SplitState::Loaded(records) => {
                tracing::info!("tokenizing {} split", split);
                encode_records(self.tokenizer.as_ref(), records, self.config.data.max_length)?
            }
            _ => return Err(self.stage_error(split, "loaded")),
        };
        *self.state_mut(split) = SplitState::Tokenized(examples);
        Ok(())
    }

    /// Tokenized → Ready. A failed build leaves the split Unconfigured.
    pub fn build(&mut self, split: Split) -> Result<()> {
        let examples = match std::mem::take(self.state_mut(split)) {
            SplitState::Tokenized(examples) => examples,
            other => {
                *self.state_mut(split) = other;
                return Err(self.stage_error(split, "tokenized"));
            }
        };

        let dataset = StsDataset::from_examples(examples)?;
        if !dataset.is_labelled() {
            tracing::warn!("{} split has no labels: batches will carry inputs only", split);
        }
        *self.state_mut(split) = SplitState::Ready(Arc::new(dataset));
        Ok(())
    }

    /// Bring every split of `stage` to Ready.
    ///
    /// Splits already past a phase are left alone, so calling
    /// setup twice is harmless.
    pub fn setup(&mut self, stage: Stage) -> Result<()> {
        let splits = stage.splits();

        for &split in splits {
            if matches!(self.state(split), SplitState::Unconfigured) {
                self.load(split)?;
            }
        }
        for &split in splits {
            if matches!(self.state(split), SplitState::Loaded(_)) {
                self.tokenize(split)?;
            }
        }
        for &split in splits {
            if matches!(self.state(split), SplitState::Tokenized(_)) {
                self.build(split)?;
            }
        }

        tracing::info!("setup({:?}) complete", stage);
        Ok(())
    }

    // ── Produced interface ────────────────────────────────────────────────────

    pub fn dataset(&self, split: Split) -> Result<Arc<StsDataset>> {
        match self.state(split) {
            SplitState::Ready(dataset) => Ok(Arc::clone(dataset)),
            _ => Err(self.stage_error(split, "ready")),
        }
    }

    /// Fresh batch source over a ready split, shuffled per config.
    /// Each call continues the split's shuffle stream.
    pub fn batches(&mut self, split: Split) -> Result<BatchSource> {
        let dataset = self.dataset(split)?;
        BatchSource::new(
            dataset,
            self.config.train.batch_size,
            self.config.data.shuffle.for_split(split),
            self.next_pass_seed(split),
        )
    }

    pub fn train_batches(&mut self) -> Result<BatchSource> {
        self.batches(Split::Train)
    }

    pub fn dev_batches(&mut self) -> Result<BatchSource> {
        self.batches(Split::Dev)
    }

    pub fn test_batches(&mut self) -> Result<BatchSource> {
        self.batches(Split::Test)
    }

    /// Burn DataLoader over a ready split, producing tensor batches.
    pub fn dataloader<B: Backend>(
        &mut self,
        split:  Split,
        device: B::Device,
    ) -> Result<Arc<dyn DataLoader<StsBatch<B>>>> {
        let dataset = self.dataset(split)?;

        let mut builder = DataLoaderBuilder::new(StsBatcher::<B>::new(device))
            .batch_size(self.config.train.batch_size);
        if self.config.data.shuffle.for_split(split) {
            builder = builder.shuffle(self.next_pass_seed(split));
        }

        Ok(builder.build(dataset))
    }
}
