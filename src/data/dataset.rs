use burn::data::dataset::Dataset;

use crate::domain::example::{EncodedExample, EncodedPair};
use crate::error::{DataError, Result};

/// Tokenised rows of one split, stored as parallel arrays.
///
/// `targets` is either empty (inference mode) or one value per
/// row. Items returned by `get` carry `label: None` in the first
/// case.
#[derive(Debug, Clone, Default)]
pub struct StsDataset {
    input_ids:      Vec<Vec<u32>>,
    attention_mask: Vec<Vec<u32>>,
    token_type_ids: Vec<Vec<u32>>,
    targets:        Vec<f32>,
}

impl StsDataset {
    pub fn new(inputs: Vec<EncodedPair>, targets: Vec<f32>) -> Result<Self> {
        if !targets.is_empty() && targets.len() != inputs.len() {
            return Err(DataError::Dataset(format!(
                "{} targets for {} inputs",
                targets.len(),
                inputs.len()
            )));
        }

        let mut dataset = Self {
            input_ids:      Vec::with_capacity(inputs.len()),
            attention_mask: Vec::with_capacity(inputs.len()),
            token_type_ids: Vec::with_capacity(inputs.len()),
            targets,
        };
        for pair in inputs {
            dataset.input_ids.push(pair.input_ids);
            dataset.attention_mask.push(pair.attention_mask);
            dataset.token_type_ids.push(pair.token_type_ids);
        }
        Ok(dataset)
    }

    /// Build from encoded examples. Labels are kept only if
    /// every example has one; a mix is rejected.
    pub fn from_examples(examples: Vec<EncodedExample>) -> Result<Self> {
        let labelled = examples.iter().filter(|e| e.label.is_some()).count();
        if labelled != 0 && labelled != examples.len() {
            return Err(DataError::Dataset(format!(
                "{labelled} of {} examples are labelled",
                examples.len()
            )));
        }

        let (inputs, targets): (Vec<_>, Vec<_>) =
            examples.into_iter().map(EncodedExample::into_parts).unzip();
        Self::new(inputs, targets.into_iter().flatten().collect())
    }

    /// False for inference-only splits
    pub fn is_labelled(&self) -> bool {
        !self.targets.is_empty()
    }

    pub fn targets(&self) -> &[f32] {
        &self.targets
    }
}

impl Dataset<EncodedExample> for StsDataset {
    fn get(&self, index: usize) -> Option<EncodedExample> {
        Some(EncodedExample {
            input_ids:      self.input_ids.get(index)?.clone(),
            attention_mask: self.attention_mask.get(index)?.clone(),
            token_type_ids: self.token_type_ids.get(index)?.clone(),
            label:          self.targets.get(index).copied(),
        })
    }

    fn len(&self) -> usize {
        self.input_ids.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(id: u32) -> EncodedPair {
        EncodedPair {
            input_ids:      vec![id, id],
            attention_mask: vec![1, 1],
            token_type_ids: vec![0, 1],
        }
    }

    #[test]
    fn test_targets_passed_at_construction_are_used() {
        let ds = StsDataset::new(vec![pair(5), pair(6)], vec![0.5, 4.0]).unwrap();
        assert!(ds.is_labelled());
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.get(1).unwrap().label, Some(4.0));
        assert_eq!(ds.get(1).unwrap().input_ids, vec![6, 6]);
        assert!(ds.get(2).is_none());
    }

    #[test]
    fn test_empty_targets_mean_inference_mode() {
        let ds = StsDataset::new(vec![pair(1)], Vec::new()).unwrap();
        assert!(!ds.is_labelled());
        assert_eq!(ds.get(0).unwrap().label, None);
    }

    #[test]
    fn test_target_count_must_match() {
        let err = StsDataset::new(vec![pair(1), pair(2)], vec![1.0]).unwrap_err();
        assert!(matches!(err, DataError::Dataset(_)));
    }

    #[test]
    fn test_mixed_labels_are_rejected() {
        let examples = vec![
            EncodedExample::new(pair(1), Some(1.0)),
            EncodedExample::new(pair(2), None),
        ];
        assert!(StsDataset::from_examples(examples).is_err());
    }
}
