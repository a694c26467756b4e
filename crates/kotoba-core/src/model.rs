//! # Trained HMM artifact
//!
//! A [`Model`] holds the two log-probability tables a hidden Markov model
//! needs for decoding:
//!
//! - **Emission**: P(token | label), estimated as token frequency within a
//!   label divided by the label's total token count.
//! - **Transition**: P(next-label | label), including the reserved start
//!   pseudo-label's row for P(first-label-of-sentence).
//!
//! Both tables store natural logarithms so that path scores can be summed
//! instead of multiplied, avoiding underflow over long sentences.
//!
//! Rows are `BTreeMap`s on purpose: every place the decoder scans label
//! candidates for a maximum iterates in lexicographic order, which makes
//! tie-breaking deterministic across runs and platforms.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Reserved pseudo-label marking the start of every sentence.
///
/// It only ever appears as a source row in the transition table; it never
/// emits a token and is never a transition target.
pub const START_LABEL: &str = "#";

/// One table row: label (or token) to log-probability.
pub type LogProbRow = BTreeMap<String, f64>;

/// Trained HMM: emission and transition log-probability tables.
///
/// Built once by [`estimate`](crate::train::estimate) and read-only
/// afterwards. Decoding takes `&Model`, so a trained model can be shared
/// across any number of concurrent decode calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Model {
    /// Label → token → log P(token | label).
    emission: BTreeMap<String, LogProbRow>,
    /// Label → next-label → log P(next | label). Includes the start row.
    transition: BTreeMap<String, LogProbRow>,
}

impl Model {
    pub(crate) fn new(
        emission: BTreeMap<String, LogProbRow>,
        transition: BTreeMap<String, LogProbRow>,
    ) -> Self {
        Self {
            emission,
            transition,
        }
    }

    /// Log P(token | label), if the token was observed under this label
    /// during training.
    pub fn emission(&self, label: &str, token: &str) -> Option<f64> {
        self.emission.get(label)?.get(token).copied()
    }

    /// The outgoing transition row for a label.
    ///
    /// Returns `None` for labels that only ever ended sentences in training;
    /// the decoder treats that as "no outgoing transitions", not an error.
    pub fn transitions_from(&self, label: &str) -> Option<&LogProbRow> {
        self.transition.get(label)
    }

    /// All labels the model can assign, in lexicographic order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.emission.keys().map(String::as_str)
    }

    /// Number of distinct labels the model can assign.
    pub fn label_count(&self) -> usize {
        self.emission.len()
    }

    #[cfg(test)]
    pub(crate) fn emission_rows(&self) -> &BTreeMap<String, LogProbRow> {
        &self.emission
    }

    #[cfg(test)]
    pub(crate) fn transition_rows(&self) -> &BTreeMap<String, LogProbRow> {
        &self.transition
    }
}
