use wordnet_gloss::SenseDict;
use wordnet_sense::SenseKey;

use crate::error::WsdError;
use crate::inventory;
use crate::tokenize::normalize_and_split;

/// Builds per-lemma token signatures from dictionary glosses.
///
/// A lemma's signature concatenates, for every sense in the inventory and
/// every synset behind it, the normalized tokens of the definition followed
/// by those of each usage example.
pub struct SignatureBuilder<'a> {
    dict: &'a SenseDict,
}

impl<'a> SignatureBuilder<'a> {
    pub fn new(dict: &'a SenseDict) -> Self {
        Self { dict }
    }

    /// Signature tokens for one target lemma.
    ///
    /// Fails if the lemma is not a corpus target or one of its sense keys
    /// has no synset in the dictionary.
    pub fn lemma_signature(&self, lemma: &str) -> Result<Vec<String>, WsdError> {
        let mut tokens = Vec::new();
        for entry in inventory::senses_for(lemma)? {
            for raw in entry.synsets {
                let key: SenseKey = raw
                    .parse()
                    .map_err(|_| WsdError::UnknownSynset((*raw).to_string()))?;
                let synset = self
                    .dict
                    .synset(&key)
                    .ok_or_else(|| WsdError::UnknownSynset(key.to_string()))?;
                tokens.extend(normalize_and_split(synset.gloss.definition));
                for example in &synset.gloss.examples {
                    tokens.extend(normalize_and_split(example));
                }
            }
        }
        Ok(tokens)
    }

    /// Adapter for classifiers that take a signature source closure.
    pub fn source(&self) -> impl Fn(&str) -> Result<Vec<String>, WsdError> {
        move |lemma: &str| self.lemma_signature(lemma)
    }
}
