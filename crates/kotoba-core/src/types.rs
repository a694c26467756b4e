//! Shared data types crossing the corpus boundary.

use serde::{Deserialize, Serialize};

/// A tokenized sentence paired with its gold labels.
///
/// The two sequences are expected to be the same length; the estimator and
/// evaluator verify this and reject misaligned pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentencePair {
    /// Tokens of the sentence, lower-cased by the corpus source.
    pub tokens: Vec<String>,
    /// Gold label for each token, case preserved.
    pub labels: Vec<String>,
}

impl SentencePair {
    /// Builds a pair from anything yielding string-likes.
    pub fn new<T, L>(tokens: T, labels: L) -> Self
    where
        T: IntoIterator,
        T::Item: Into<String>,
        L: IntoIterator,
        L::Item: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of tokens in the sentence.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True when the sentence has no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_from_str_slices() {
        let pair = SentencePair::new(["the", "dog"], ["DET", "NOUN"]);
        assert_eq!(pair.len(), 2);
        assert_eq!(pair.tokens, vec!["the", "dog"]);
        assert_eq!(pair.labels, vec!["DET", "NOUN"]);
    }
}
