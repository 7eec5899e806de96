use std::collections::HashSet;

use tracing::debug;

use crate::corpus::{Instance, sense_distribution};
use crate::error::WsdError;
use crate::idf::informative_tokens;
use crate::inventory;
use crate::rng::SenseRng;

/// Shared contract for WSD strategies.
///
/// `train` may be a no-op for baselines; `predict_sense` takes `&mut self`
/// because some strategies draw from a generator on fallback paths.
pub trait Classifier {
    fn name(&self) -> &'static str;

    fn train(&mut self, instances: &[Instance]) -> Result<(), WsdError>;

    fn predict_sense(&mut self, instance: &Instance) -> Result<String, WsdError>;

    /// Fraction of instances predicted correctly, rounded to three decimals.
    fn evaluate(&mut self, instances: &[Instance]) -> Result<f64, WsdError> {
        if instances.is_empty() {
            return Err(WsdError::EmptyInstances);
        }
        let mut correct = 0usize;
        for instance in instances {
            if self.predict_sense(instance)? == instance.sense {
                correct += 1;
            }
        }
        Ok(round3(correct as f64 / instances.len() as f64))
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Uniform random choice among the target lemma's inventory senses.
pub struct RandomSense {
    rng: SenseRng,
}

impl RandomSense {
    pub fn new(rng: SenseRng) -> Self {
        Self { rng }
    }
}

impl Classifier for RandomSense {
    fn name(&self) -> &'static str {
        "RandomSense"
    }

    fn train(&mut self, _instances: &[Instance]) -> Result<(), WsdError> {
        Ok(())
    }

    fn predict_sense(&mut self, instance: &Instance) -> Result<String, WsdError> {
        let labels = inventory::sense_labels(&instance.lemma)?;
        let label = self
            .rng
            .pick(&labels)
            .ok_or_else(|| WsdError::UnknownLemma(instance.lemma.clone()))?;
        Ok((*label).to_string())
    }
}

/// Per-lemma majority sense taken from the training distribution.
pub struct MostFrequentSense {
    mfs: std::collections::HashMap<String, String>,
}

impl MostFrequentSense {
    pub fn new() -> Self {
        Self {
            mfs: std::collections::HashMap::new(),
        }
    }
}

impl Default for MostFrequentSense {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier for MostFrequentSense {
    fn name(&self) -> &'static str {
        "MostFrequentSense"
    }

    fn train(&mut self, instances: &[Instance]) -> Result<(), WsdError> {
        self.mfs.clear();
        let distribution = sense_distribution(instances);
        let lemmas: HashSet<&str> = instances.iter().map(|i| i.lemma.as_str()).collect();
        for lemma in lemmas {
            // Sense labels embed their lemma, so a substring match gathers
            // the lemma's candidates. Ties go to the smaller label.
            let mut candidates: Vec<(&str, usize)> = distribution
                .iter()
                .filter(|(sense, _)| sense.contains(lemma))
                .map(|(sense, count)| (sense.as_str(), *count))
                .collect();
            candidates.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
            if let Some((best, _)) = candidates.first() {
                self.mfs.insert(lemma.to_string(), (*best).to_string());
            }
        }
        debug!("most frequent senses for {} lemmas", self.mfs.len());
        Ok(())
    }

    fn predict_sense(&mut self, instance: &Instance) -> Result<String, WsdError> {
        self.mfs
            .get(&instance.lemma)
            .cloned()
            .ok_or_else(|| WsdError::UntrainedLemma(instance.lemma.clone()))
    }
}

/// Options steering [`SimplifiedLesk`] training.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeskOptions {
    /// Keep only this many context tokens on each side of the target.
    pub window: Option<usize>,
    /// Keep only informative (high-IDF) context tokens.
    pub use_idf: bool,
}

/// Simplified Lesk: scores each candidate sense by the overlap between its
/// signature and the instance context.
///
/// A sense's signature unions the lemma's dictionary signature with the
/// contexts of every training instance tagged with that sense. Prediction
/// takes the candidate with the strictly greatest overlap, so ties keep the
/// earliest-trained sense; when nothing overlaps, a random candidate is
/// chosen.
pub struct SimplifiedLesk<S> {
    source: S,
    options: LeskOptions,
    rng: SenseRng,
    signatures: Vec<(String, HashSet<String>)>,
}

impl<S> SimplifiedLesk<S>
where
    S: Fn(&str) -> Result<Vec<String>, WsdError>,
{
    pub fn new(source: S, options: LeskOptions, rng: SenseRng) -> Self {
        Self {
            source,
            options,
            rng,
            signatures: Vec::new(),
        }
    }

    /// Trained signature for a sense label, if any.
    pub fn signature(&self, sense: &str) -> Option<&HashSet<String>> {
        self.signatures
            .iter()
            .find(|(s, _)| s == sense)
            .map(|(_, signature)| signature)
    }
}

impl<S> Classifier for SimplifiedLesk<S>
where
    S: Fn(&str) -> Result<Vec<String>, WsdError>,
{
    fn name(&self) -> &'static str {
        "SimplifiedLesk"
    }

    fn train(&mut self, instances: &[Instance]) -> Result<(), WsdError> {
        self.signatures.clear();
        let informative = if self.options.use_idf {
            Some(informative_tokens(instances)?)
        } else {
            None
        };

        for instance in instances {
            let mut contribution: Vec<String> = match self.options.window {
                Some(window) => {
                    let left = &instance.left_context;
                    let keep_from = left.len().saturating_sub(window);
                    left[keep_from..]
                        .iter()
                        .chain(instance.right_context.iter().take(window))
                        .cloned()
                        .collect()
                }
                None => instance.context.clone(),
            };
            if let Some(keep) = &informative {
                contribution.retain(|token| keep.contains(token));
            }

            match self
                .signatures
                .iter_mut()
                .find(|(sense, _)| sense == &instance.sense)
            {
                Some((_, signature)) => signature.extend(contribution),
                None => {
                    let mut signature: HashSet<String> =
                        (self.source)(&instance.lemma)?.into_iter().collect();
                    signature.extend(contribution);
                    self.signatures.push((instance.sense.clone(), signature));
                }
            }
        }
        debug!("trained {} sense signatures", self.signatures.len());
        Ok(())
    }

    fn predict_sense(&mut self, instance: &Instance) -> Result<String, WsdError> {
        let context = instance.context_set();
        let candidates: Vec<usize> = self
            .signatures
            .iter()
            .enumerate()
            .filter(|(_, (sense, _))| sense.contains(instance.lemma.as_str()))
            .map(|(i, _)| i)
            .collect();
        if candidates.is_empty() {
            return Err(WsdError::UntrainedLemma(instance.lemma.clone()));
        }

        let mut best: Option<usize> = None;
        let mut max_overlap = 0;
        for &i in &candidates {
            let (_, signature) = &self.signatures[i];
            let overlap = signature
                .iter()
                .filter(|token| context.contains(token.as_str()))
                .count();
            if overlap > max_overlap {
                max_overlap = overlap;
                best = Some(i);
            }
        }

        let chosen = match best {
            Some(i) => i,
            None => *self
                .rng
                .pick(&candidates)
                .ok_or_else(|| WsdError::UntrainedLemma(instance.lemma.clone()))?,
        };
        Ok(self.signatures[chosen].0.clone())
    }
}
