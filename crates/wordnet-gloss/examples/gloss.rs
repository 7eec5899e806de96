use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use wordnet_gloss::{LoadMode, SenseDict};
use wordnet_sense::SenseKey;

fn main() -> Result<()> {
    let mut args = env::args().skip(1);
    let dict_dir = args
        .next()
        .map(PathBuf::from)
        .context("usage: cargo run -p wordnet-gloss --example gloss -- <dict-dir> <sense-key>")?;
    let key: SenseKey = args
        .next()
        .context("missing sense key, e.g. crane.n.05")?
        .parse()?;

    let dict = SenseDict::load_with_mode(&dict_dir, LoadMode::Mmap)
        .with_context(|| format!("loading WordNet from {}", dict_dir.display()))?;

    println!("Dictionary: {}", dict_dir.display());
    println!("Lemma keys: {}", dict.lemma_count());
    println!("Synsets   : {}", dict.synset_count());

    let synset = dict
        .synset(&key)
        .with_context(|| format!("no synset for {key}"))?;
    println!("{key} = {}", synset.gloss.definition);
    for example in &synset.gloss.examples {
        println!("  \"{example}\"");
    }

    Ok(())
}
