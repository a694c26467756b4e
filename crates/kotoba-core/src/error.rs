use thiserror::Error;

/// Errors that can occur during Kotoba core operations.
#[derive(Debug, Error)]
pub enum KotobaError {
    /// A sentence and its labeling disagree in length.
    #[error("sentence {index}: {tokens} tokens but {labels} labels")]
    LengthMismatch {
        /// Zero-based index of the offending pair in the corpus.
        index: usize,
        /// Token count of the sentence.
        tokens: usize,
        /// Label count of the labeling.
        labels: usize,
    },

    /// The training corpus contains no sentences.
    #[error("training corpus is empty")]
    EmptyCorpus,

    /// A training pair has no tokens at all.
    #[error("sentence {index} is empty")]
    EmptySentence {
        /// Zero-based index of the offending pair in the corpus.
        index: usize,
    },

    /// A frequency row summed to zero during normalization.
    #[error("label {label:?} has zero total frequency")]
    ZeroRowTotal {
        /// The label whose row could not be normalized.
        label: String,
    },

    /// The trellis ran out of reachable labels mid-decode.
    #[error("no reachable label at position {position}")]
    NoPath {
        /// Token position at which every candidate path died out.
        position: usize,
    },

    /// Accuracy is undefined because no sentence was eligible for scoring.
    #[error("accuracy is undefined: no eligible tokens in test corpus")]
    NoEligibleTokens,

    /// The sentence and label files disagree in line count.
    #[error("corpus files disagree: {sentences} sentence lines but {labels} label lines")]
    LineCountMismatch {
        /// Line count of the sentences file.
        sentences: usize,
        /// Line count of the labels file.
        labels: usize,
    },

    /// I/O failure while reading a corpus file.
    #[error("corpus I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Kotoba operations.
pub type Result<T> = std::result::Result<T, KotobaError>;
