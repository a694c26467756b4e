//! # Maximum-likelihood estimation
//!
//! Builds a [`Model`] from an aligned token/label corpus in two passes:
//!
//! 1. **Counting**: raw frequencies for every (label, token) emission, every
//!    (label, next-label) transition, and one start transition per sentence.
//! 2. **Normalization**: each row is divided by its total and converted to a
//!    natural logarithm.
//!
//! No smoothing is applied; an unseen (label, token) pair simply has no
//! entry, and the decoder substitutes its unobserved-token penalty.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{KotobaError, Result};
use crate::model::{LogProbRow, Model, START_LABEL};
use crate::types::SentencePair;

/// Estimates emission and transition log-probabilities from a training
/// corpus.
///
/// Tokens are case-folded to lowercase before counting; label case is
/// preserved.
///
/// # Errors
///
/// - [`KotobaError::EmptyCorpus`] when `corpus` has no sentences.
/// - [`KotobaError::EmptySentence`] when a pair has zero tokens.
/// - [`KotobaError::LengthMismatch`] when a pair's token and label sequences
///   differ in length.
pub fn estimate(corpus: &[SentencePair]) -> Result<Model> {
    if corpus.is_empty() {
        return Err(KotobaError::EmptyCorpus);
    }

    let mut emission_counts: BTreeMap<String, BTreeMap<String, u64>> = BTreeMap::new();
    let mut transition_counts: BTreeMap<String, BTreeMap<String, u64>> = BTreeMap::new();

    for (index, pair) in corpus.iter().enumerate() {
        if pair.tokens.len() != pair.labels.len() {
            return Err(KotobaError::LengthMismatch {
                index,
                tokens: pair.tokens.len(),
                labels: pair.labels.len(),
            });
        }
        if pair.is_empty() {
            return Err(KotobaError::EmptySentence { index });
        }

        for (token, label) in pair.tokens.iter().zip(&pair.labels) {
            *emission_counts
                .entry(label.clone())
                .or_default()
                .entry(token.to_lowercase())
                .or_insert(0) += 1;
        }

        // The start pseudo-label opens every sentence exactly once.
        *transition_counts
            .entry(START_LABEL.to_string())
            .or_default()
            .entry(pair.labels[0].clone())
            .or_insert(0) += 1;

        for window in pair.labels.windows(2) {
            *transition_counts
                .entry(window[0].clone())
                .or_default()
                .entry(window[1].clone())
                .or_insert(0) += 1;
        }
    }

    let emission = normalize(emission_counts)?;
    let transition = normalize(transition_counts)?;

    debug!(
        labels = emission.len(),
        transition_rows = transition.len(),
        sentences = corpus.len(),
        "model estimated"
    );

    Ok(Model::new(emission, transition))
}

/// Converts raw frequency rows into log-probability rows.
fn normalize(
    counts: BTreeMap<String, BTreeMap<String, u64>>,
) -> Result<BTreeMap<String, LogProbRow>> {
    let mut rows = BTreeMap::new();
    for (label, row) in counts {
        let total: u64 = row.values().sum();
        if total == 0 {
            return Err(KotobaError::ZeroRowTotal { label });
        }
        let total = total as f64;
        let normalized: LogProbRow = row
            .into_iter()
            .map(|(key, count)| (key, (count as f64 / total).ln()))
            .collect();
        rows.insert(label, normalized);
    }
    Ok(rows)
}
