use std::path::PathBuf;

use wordnet_gloss::{LoadMode, SenseDict};
use wordnet_sense::{Pos, SenseKey};

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("wn")
}

fn key(raw: &str) -> SenseKey {
    raw.parse().expect("valid sense key")
}

#[test]
fn resolves_sense_keys_in_index_order() {
    let dict = SenseDict::load(fixture_dir()).expect("load fixtures");

    let machine = dict.synset(&key("crane.n.04")).expect("crane.n.04 present");
    assert_eq!(machine.id.offset, 404);
    assert_eq!(
        machine.gloss.definition,
        "a lifting device for moving heavy objects"
    );
    assert_eq!(
        machine.gloss.examples,
        vec!["the crane hoisted the crate onto the deck"]
    );

    let bird = dict.synset(&key("crane.n.05")).expect("crane.n.05 present");
    assert_eq!(bird.id.offset, 405);
    assert_eq!(
        bird.gloss.definition,
        "large long-necked wading bird of marshes and plains"
    );
}

#[test]
fn pos_separates_homographs() {
    let dict = SenseDict::load(fixture_dir()).expect("load fixtures");
    let verb = dict.synset(&key("crane.v.01")).expect("crane.v.01 present");
    assert_eq!(verb.gloss.definition, "stretch the neck forward");
    assert_eq!(verb.gloss.examples, vec!["the women craned their necks to see"]);
}

#[test]
fn definition_stops_at_first_semicolon_outside_quotes() {
    let dict = SenseDict::load(fixture_dir()).expect("load fixtures");
    let unit = dict.synset(&key("palm.n.02")).expect("palm.n.02 present");
    assert_eq!(
        unit.gloss.definition,
        "a linear unit based on the breadth of the hand"
    );
    assert!(unit.gloss.examples.is_empty());
}

#[test]
fn missing_gloss_section_yields_empty_definition() {
    let dict = SenseDict::load(fixture_dir()).expect("load fixtures");
    let bare = dict.synset(&key("crane.n.03")).expect("crane.n.03 present");
    assert_eq!(bare.gloss.definition, "");
    assert!(bare.gloss.examples.is_empty());
}

#[test]
fn unknown_keys_resolve_to_none() {
    let dict = SenseDict::load(fixture_dir()).expect("load fixtures");
    assert!(dict.synset(&key("crane.n.06")).is_none(), "sense past count");
    assert!(dict.synset(&key("walrus.n.01")).is_none(), "unknown lemma");
    assert!(dict.synset(&key("crane.r.01")).is_none(), "wrong pos");
}

#[test]
fn lookups_normalize_lemmas() {
    let dict = SenseDict::load(fixture_dir()).expect("load fixtures");
    assert!(dict.lemma_exists(Pos::Noun, "CRANE"));
    assert!(dict.lemma_exists(Pos::Noun, " palm "));
    assert!(!dict.lemma_exists(Pos::Adv, "crane"));
}

#[test]
fn counts_cover_all_parts_of_speech() {
    let dict = SenseDict::load(fixture_dir()).expect("load fixtures");
    assert_eq!(dict.sense_count(Pos::Noun, "crane"), 5);
    assert_eq!(dict.sense_count(Pos::Noun, "palm"), 3);
    assert_eq!(dict.sense_count(Pos::Noun, "walrus"), 0);
    assert_eq!(dict.lemma_count(), 6);
    assert_eq!(dict.synset_count(), 12);
}

#[test]
fn owned_mode_matches_mmap() {
    let mmap = SenseDict::load_with_mode(fixture_dir(), LoadMode::Mmap).expect("mmap load");
    let owned = SenseDict::load_with_mode(fixture_dir(), LoadMode::Owned).expect("owned load");
    let k = key("crane.n.05");
    assert_eq!(
        mmap.synset(&k).expect("mmap synset").gloss,
        owned.synset(&k).expect("owned synset").gloss
    );
    assert_eq!(mmap.synset_count(), owned.synset_count());
}

#[test]
fn missing_files_are_an_error() {
    let err = SenseDict::load(fixture_dir().join("nope")).expect_err("load should fail");
    assert!(err.to_string().contains("missing required WordNet file"));
}
