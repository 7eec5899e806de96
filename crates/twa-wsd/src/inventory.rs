use crate::error::WsdError;

/// One sense of an ambiguous lemma plus the dictionary synsets backing it.
#[derive(Clone, Copy, Debug)]
pub struct SenseEntry {
    /// Corpus label in the `lemma%tag` form, e.g. `crane%bird`.
    pub label: &'static str,
    /// Sense keys whose glosses contribute to this lemma's signature.
    pub synsets: &'static [&'static str],
}

/// Sense inventory for the six ambiguous TWA target words, mapped onto
/// WordNet sense keys.
static CORRESPONDENCES: &[(&str, &[SenseEntry])] = &[
    (
        "bass",
        &[
            SenseEntry {
                label: "bass%music",
                synsets: &["bass.n.01", "bass.n.02", "bass.n.03", "bass.n.06", "bass.n.07"],
            },
            SenseEntry {
                label: "bass%fish",
                synsets: &["sea_bass.n.01", "freshwater_bass.n.01", "bass.n.08"],
            },
        ],
    ),
    (
        "crane",
        &[
            SenseEntry {
                label: "crane%machine",
                synsets: &["crane.n.04"],
            },
            SenseEntry {
                label: "crane%bird",
                synsets: &["crane.n.05"],
            },
        ],
    ),
    (
        "motion",
        &[
            SenseEntry {
                label: "motion%physical",
                synsets: &[
                    "gesture.n.02",
                    "movement.n.03",
                    "motion.n.03",
                    "motion.n.04",
                    "motion.n.06",
                ],
            },
            SenseEntry {
                label: "motion%legal",
                synsets: &["motion.n.05"],
            },
        ],
    ),
    (
        "palm",
        &[
            SenseEntry {
                label: "palm%hand",
                synsets: &["palm.n.01"],
            },
            SenseEntry {
                label: "palm%tree",
                synsets: &["palm.n.03"],
            },
        ],
    ),
    (
        "plant",
        &[
            SenseEntry {
                label: "plant%factory",
                synsets: &["plant.n.01"],
            },
            SenseEntry {
                label: "plant%living",
                synsets: &["plant.n.02"],
            },
        ],
    ),
    (
        "tank",
        &[
            SenseEntry {
                label: "tank%vehicle",
                synsets: &["tank.n.01"],
            },
            SenseEntry {
                label: "tank%container",
                synsets: &["tank.n.02"],
            },
        ],
    ),
];

/// Whether a lemma is one of the corpus targets.
pub fn contains(lemma: &str) -> bool {
    CORRESPONDENCES.iter().any(|(l, _)| *l == lemma)
}

/// The sense entries of a target lemma.
pub fn senses_for(lemma: &str) -> Result<&'static [SenseEntry], WsdError> {
    CORRESPONDENCES
        .iter()
        .find(|(l, _)| *l == lemma)
        .map(|(_, entries)| *entries)
        .ok_or_else(|| WsdError::UnknownLemma(lemma.to_string()))
}

/// Just the sense labels of a target lemma.
pub fn sense_labels(lemma: &str) -> Result<Vec<&'static str>, WsdError> {
    Ok(senses_for(lemma)?.iter().map(|e| e.label).collect())
}

/// Whether `sense` is a listed sense of `lemma`.
pub fn is_known_sense(lemma: &str, sense: &str) -> bool {
    senses_for(lemma)
        .map(|entries| entries.iter().any(|e| e.label == sense))
        .unwrap_or(false)
}

/// All target lemmas in table order.
pub fn lemmas() -> impl Iterator<Item = &'static str> {
    CORRESPONDENCES.iter().map(|(l, _)| *l)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordnet_sense::SenseKey;

    #[test]
    fn covers_six_lemmas_with_two_senses_each() {
        assert_eq!(lemmas().count(), 6);
        for lemma in lemmas() {
            let entries = senses_for(lemma).expect("target lemma");
            assert_eq!(entries.len(), 2, "{lemma} should have two senses");
            for entry in entries {
                assert!(entry.label.contains(lemma), "{} lacks {lemma}", entry.label);
                assert!(!entry.synsets.is_empty());
            }
        }
    }

    #[test]
    fn every_synset_is_a_valid_sense_key() {
        for lemma in lemmas() {
            for entry in senses_for(lemma).expect("target lemma") {
                for raw in entry.synsets {
                    raw.parse::<SenseKey>()
                        .unwrap_or_else(|e| panic!("{raw}: {e}"));
                }
            }
        }
    }

    #[test]
    fn recognizes_senses_of_each_lemma() {
        assert!(is_known_sense("crane", "crane%bird"));
        assert!(!is_known_sense("crane", "crane%fish"));
        assert!(!is_known_sense("walrus", "walrus%animal"));
        assert!(contains("tank"));
        assert!(!contains("walrus"));
    }

    #[test]
    fn unknown_lemma_is_an_error() {
        assert!(matches!(
            sense_labels("walrus"),
            Err(WsdError::UnknownLemma(_))
        ));
    }
}
