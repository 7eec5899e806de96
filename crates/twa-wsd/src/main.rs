use std::env;
use std::path::PathBuf;
use std::process;
use std::time::Instant;

use anyhow::Context;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;
use wordnet_gloss::{LoadMode, SenseDict};

use twa_wsd::{load_corpus, run_harness, sense_distribution};

const DEFAULT_WORDNET_DIR: &str = "dict";
const USAGE: &str = "usage: twa-wsd <TWA_FILE> [--wordnet-dir <DIR>] \
[--wordnet-mode <mmap|owned>] [--seed <N>] [--json] [--distribution] [--dump]";

fn main() {
    init_tracing();
    let config = load_config();
    if let Err(err) = run(&config) {
        eprintln!("error: {err:#}");
        process::exit(1);
    }
}

fn run(config: &Config) -> anyhow::Result<()> {
    let start = Instant::now();
    let instances = load_corpus(&config.corpus_path)
        .with_context(|| format!("loading corpus {}", config.corpus_path.display()))?;
    info!("corpus loaded in {} ms", start.elapsed().as_millis());

    if config.dump {
        for instance in &instances {
            println!(
                "{}: {} [{}]",
                instance.id,
                instance.lemma,
                instance.context.join(" ")
            );
        }
        return Ok(());
    }

    if config.distribution {
        let distribution = sense_distribution(&instances);
        let mut senses: Vec<_> = distribution.iter().collect();
        senses.sort_by_key(|&(sense, _)| sense);
        for (sense, count) in senses {
            println!("{sense}\t{count}");
        }
        println!();
    }

    let dict_start = Instant::now();
    let dict = SenseDict::load_with_mode(&config.wordnet_dir, config.wordnet_mode)
        .with_context(|| format!("loading dictionary {}", config.wordnet_dir.display()))?;
    info!("dictionary loaded in {} ms", dict_start.elapsed().as_millis());

    let scores = run_harness(&dict, &instances, config.seed)?;
    if config.json {
        println!("{}", serde_json::to_string_pretty(&scores)?);
    } else {
        for line in &scores {
            println!("{} {}", line.classifier, line.accuracy);
        }
    }
    Ok(())
}

#[derive(Debug, Clone)]
struct Config {
    corpus_path: PathBuf,
    wordnet_dir: PathBuf,
    wordnet_mode: LoadMode,
    seed: Option<u64>,
    json: bool,
    distribution: bool,
    dump: bool,
}

fn load_config() -> Config {
    let mut corpus_path: Option<PathBuf> = None;
    let mut wordnet_dir: Option<PathBuf> = None;
    let mut wordnet_mode: Option<LoadMode> = None;
    let mut seed: Option<u64> = None;
    let mut json = false;
    let mut distribution = false;
    let mut dump = false;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--json" => json = true,
            "--distribution" => distribution = true,
            "--dump" => dump = true,
            "--wordnet-dir" => {
                if let Some(path) = args.next() {
                    wordnet_dir = Some(PathBuf::from(path));
                }
            }
            "--wordnet-mode" => {
                if let Some(mode) = args.next() {
                    wordnet_mode = parse_load_mode(&mode);
                }
            }
            "--seed" => {
                if let Some(value) = args.next() {
                    seed = value.parse().ok();
                }
            }
            _ => {
                if let Some(path) = arg.strip_prefix("--wordnet-dir=") {
                    wordnet_dir = Some(PathBuf::from(path));
                } else if let Some(mode) = arg.strip_prefix("--wordnet-mode=") {
                    wordnet_mode = parse_load_mode(mode);
                } else if let Some(value) = arg.strip_prefix("--seed=") {
                    seed = value.parse().ok();
                } else if arg.starts_with('-') {
                    eprintln!("unknown option: {arg}");
                    eprintln!("{USAGE}");
                    process::exit(2);
                } else if corpus_path.is_none() {
                    corpus_path = Some(PathBuf::from(arg));
                } else {
                    eprintln!("unexpected argument: {arg}");
                    eprintln!("{USAGE}");
                    process::exit(2);
                }
            }
        }
    }

    let Some(corpus_path) = corpus_path else {
        eprintln!("{USAGE}");
        process::exit(2);
    };

    Config {
        corpus_path,
        wordnet_dir: wordnet_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_WORDNET_DIR)),
        wordnet_mode: wordnet_mode.unwrap_or(LoadMode::Mmap),
        seed,
        json,
        distribution,
        dump,
    }
}

fn parse_load_mode(raw: &str) -> Option<LoadMode> {
    match raw.to_ascii_lowercase().as_str() {
        "mmap" => Some(LoadMode::Mmap),
        "owned" => Some(LoadMode::Owned),
        _ => None,
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let max_level = env_filter
        .max_level_hint()
        .and_then(|hint| hint.into_level())
        .unwrap_or(Level::INFO);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_level(true)
        .with_max_level(max_level)
        .init();
}
