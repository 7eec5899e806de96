use serde::Serialize;
use tracing::info;
use wordnet_gloss::SenseDict;

use crate::classify::{Classifier, LeskOptions, MostFrequentSense, RandomSense, SimplifiedLesk};
use crate::corpus::Instance;
use crate::error::WsdError;
use crate::rng::SenseRng;
use crate::signature::SignatureBuilder;
use crate::split::random_data_split;

/// Instances with `i % SPLIT_N < SPLIT_P` form the held-out test set.
pub const SPLIT_P: usize = 1;
pub const SPLIT_N: usize = 10;
/// Context window of the windowed Lesk configuration.
pub const LESK_WINDOW: usize = 10;
/// Training instances given to the IDF-filtered Lesk configuration.
pub const IDF_TRAIN_LIMIT: usize = 10;

/// One comparison row: a configuration label and its accuracy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreLine {
    pub classifier: &'static str,
    pub accuracy: f64,
}

/// Score the five stock configurations against the corpus.
///
/// The random baseline is scored on the full corpus; every other
/// configuration trains on nine tenths of a shuffled split and is scored on
/// the held-out tenth. A fixed `seed` makes the shuffle and all fallback
/// draws reproducible.
pub fn run_harness(
    dict: &SenseDict,
    instances: &[Instance],
    seed: Option<u64>,
) -> Result<Vec<ScoreLine>, WsdError> {
    let mut rng = match seed {
        Some(seed) => SenseRng::new(seed),
        None => SenseRng::from_entropy(),
    };
    let (test, train) = random_data_split(instances.to_vec(), SPLIT_P, SPLIT_N, &mut rng)?;
    info!(
        "split {} instances into {} train / {} test",
        instances.len(),
        train.len(),
        test.len()
    );

    let signatures = SignatureBuilder::new(dict);
    let mut lines = Vec::with_capacity(5);

    let mut random = RandomSense::new(SenseRng::new(rng.next_u64()));
    lines.push(ScoreLine {
        classifier: "Random Baseline",
        accuracy: random.evaluate(instances)?,
    });

    let mut frequent = MostFrequentSense::new();
    frequent.train(&train)?;
    lines.push(ScoreLine {
        classifier: "Frequent Sense Baseline",
        accuracy: frequent.evaluate(&test)?,
    });

    let mut lesk = SimplifiedLesk::new(
        signatures.source(),
        LeskOptions::default(),
        SenseRng::new(rng.next_u64()),
    );
    lesk.train(&train)?;
    lines.push(ScoreLine {
        classifier: "Simplified Lesk",
        accuracy: lesk.evaluate(&test)?,
    });

    let windowed = LeskOptions {
        window: Some(LESK_WINDOW),
        use_idf: false,
    };
    let mut lesk_windowed =
        SimplifiedLesk::new(signatures.source(), windowed, SenseRng::new(rng.next_u64()));
    lesk_windowed.train(&train)?;
    lines.push(ScoreLine {
        classifier: "Simplified Lesk with window",
        accuracy: lesk_windowed.evaluate(&test)?,
    });

    let filtered = LeskOptions {
        window: None,
        use_idf: true,
    };
    let mut lesk_idf =
        SimplifiedLesk::new(signatures.source(), filtered, SenseRng::new(rng.next_u64()));
    lesk_idf.train(&train[..train.len().min(IDF_TRAIN_LIMIT)])?;
    lines.push(ScoreLine {
        classifier: "Simplified Lesk with IDF",
        accuracy: lesk_idf.evaluate(&test)?,
    });

    Ok(lines)
}
