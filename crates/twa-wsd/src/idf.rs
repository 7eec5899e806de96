use std::collections::{HashMap, HashSet};

use crate::corpus::Instance;
use crate::error::WsdError;

/// Inverse document frequency of every context token.
///
/// Each instance context counts as one document; a token's document
/// frequency is the number of contexts containing it at least once, and its
/// score is `ln(N / df)`. Empty inputs and empty contexts are errors since
/// the scores would be undefined.
pub fn idf_scores(instances: &[Instance]) -> Result<HashMap<String, f64>, WsdError> {
    if instances.is_empty() {
        return Err(WsdError::EmptyInstances);
    }
    let total = instances.len() as f64;
    let mut document_frequency: HashMap<&str, usize> = HashMap::new();
    for instance in instances {
        if instance.context.is_empty() {
            return Err(WsdError::EmptyContext(instance.id.clone()));
        }
        for token in instance.context_set() {
            *document_frequency.entry(token).or_default() += 1;
        }
    }
    Ok(document_frequency
        .into_iter()
        .map(|(token, df)| (token.to_string(), (total / df as f64).ln()))
        .collect())
}

/// Tokens whose IDF clears the midpoint of the observed score range.
///
/// Tokens present in every context score zero and are the first to go;
/// a corpus where every token scores alike keeps all of them.
pub fn informative_tokens(instances: &[Instance]) -> Result<HashSet<String>, WsdError> {
    let scores = idf_scores(instances)?;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for score in scores.values() {
        min = min.min(*score);
        max = max.max(*score);
    }
    let threshold = (min + max) / 2.0;
    Ok(scores
        .into_iter()
        .filter(|(_, score)| *score >= threshold)
        .map(|(token, _)| token)
        .collect())
}
