use thiserror::Error;

/// Errors surfaced by corpus loading, training, and prediction.
#[derive(Debug, Error)]
pub enum WsdError {
    #[error("failed to read corpus: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed corpus markup: {0}")]
    Markup(#[from] roxmltree::Error),
    #[error("instance {instance}: missing {field}")]
    MissingField {
        instance: String,
        field: &'static str,
    },
    #[error("unknown target lemma {0:?}")]
    UnknownLemma(String),
    #[error("instance {instance}: {sense:?} is not a sense of {lemma:?}")]
    UnknownSense {
        instance: String,
        lemma: String,
        sense: String,
    },
    #[error("no dictionary synset for {0}")]
    UnknownSynset(String),
    #[error("lemma {0:?} has no trained sense")]
    UntrainedLemma(String),
    #[error("invalid split: denominator must be positive")]
    InvalidSplit,
    #[error("cannot evaluate an empty instance set")]
    EmptyInstances,
    #[error("instance {0}: context is empty")]
    EmptyContext(String),
}
