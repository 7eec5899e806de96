pub mod classify;
pub mod corpus;
pub mod error;
pub mod harness;
pub mod idf;
pub mod inventory;
pub mod rng;
pub mod signature;
pub mod split;
pub mod tokenize;

pub use classify::{Classifier, LeskOptions, MostFrequentSense, RandomSense, SimplifiedLesk};
pub use corpus::{Instance, load_corpus, parse_corpus, sense_distribution};
pub use error::WsdError;
pub use harness::{
    IDF_TRAIN_LIMIT, LESK_WINDOW, SPLIT_N, SPLIT_P, ScoreLine, run_harness,
};
pub use rng::SenseRng;
pub use signature::SignatureBuilder;
pub use split::{data_split, random_data_split};
pub use tokenize::normalize_and_split;
