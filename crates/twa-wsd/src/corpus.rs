use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use roxmltree::{Document, Node};
use tracing::info;

use crate::error::WsdError;
use crate::inventory;
use crate::tokenize::normalize_and_split;

/// One sense-tagged occurrence of an ambiguous target word.
///
/// Contexts hold normalized tokens in reading order. `context` is the
/// classifier view: right context first, then left, matching the order the
/// signatures are scored against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    pub id: String,
    pub lemma: String,
    pub sense: String,
    pub left_context: Vec<String>,
    pub right_context: Vec<String>,
    pub context: Vec<String>,
}

impl Instance {
    pub fn new(
        id: impl Into<String>,
        lemma: impl Into<String>,
        sense: impl Into<String>,
        left_context: Vec<String>,
        right_context: Vec<String>,
    ) -> Self {
        let context = right_context
            .iter()
            .chain(left_context.iter())
            .cloned()
            .collect();
        Self {
            id: id.into(),
            lemma: lemma.into(),
            sense: sense.into(),
            left_context,
            right_context,
            context,
        }
    }

    /// Deduplicated view of the full context.
    pub fn context_set(&self) -> HashSet<&str> {
        self.context.iter().map(String::as_str).collect()
    }
}

/// Known sense-label typos in the corpus and their corrections.
const SENSE_TYPOS: &[(&str, &str)] = &[("ank%container", "tank%container")];

/// Read a TWA file from disk and parse it into instances.
pub fn load_corpus(path: &Path) -> Result<Vec<Instance>, WsdError> {
    let raw = fs::read_to_string(path)?;
    parse_corpus(&raw)
}

/// Parse TWA markup into instances.
///
/// TWA files lack a root element, so the text is wrapped in a synthetic
/// `<collection>` node first. HTML-named character references are decoded
/// before parsing; the XML-predefined five are left to the parser.
pub fn parse_corpus(raw: &str) -> Result<Vec<Instance>, WsdError> {
    let decoded = decode_entities(raw);
    let wrapped = format!("<collection>\n{decoded}\n</collection>");
    let doc = Document::parse(&wrapped)?;

    let mut instances = Vec::new();
    for (idx, node) in doc
        .root()
        .descendants()
        .filter(|n| n.has_tag_name("instance"))
        .enumerate()
    {
        instances.push(parse_instance(node, idx)?);
    }
    info!("parsed {} corpus instances", instances.len());
    Ok(instances)
}

fn parse_instance(node: Node<'_, '_>, idx: usize) -> Result<Instance, WsdError> {
    let id = node.attribute("id").ok_or_else(|| WsdError::MissingField {
        instance: format!("#{idx}"),
        field: "id",
    })?;
    let missing = |field: &'static str| WsdError::MissingField {
        instance: id.to_string(),
        field,
    };

    let answer = node
        .children()
        .find(|n| n.has_tag_name("answer"))
        .ok_or_else(|| missing("answer"))?;
    let sense = correct_sense(answer.attribute("senseid").ok_or_else(|| missing("senseid"))?);

    let context = node
        .children()
        .find(|n| n.has_tag_name("context"))
        .ok_or_else(|| missing("context"))?;
    let head = context
        .descendants()
        .find(|n| n.has_tag_name("head"))
        .ok_or_else(|| missing("head"))?;
    let lemma = head.text().unwrap_or_default().trim().to_lowercase();
    if lemma.is_empty() {
        return Err(missing("target lemma"));
    }

    // Text before the head is left context, text after it is right context;
    // the head's own token belongs to neither.
    let mut seen_head = false;
    let mut left_text = String::new();
    let mut right_text = String::new();
    for part in context.descendants() {
        if part == head {
            seen_head = true;
            continue;
        }
        if part.ancestors().any(|a| a == head) {
            continue;
        }
        if part.is_text()
            && let Some(text) = part.text()
        {
            if seen_head {
                right_text.push_str(text);
            } else {
                left_text.push_str(text);
            }
        }
    }

    if !inventory::contains(&lemma) {
        return Err(WsdError::UnknownLemma(lemma));
    }
    if !inventory::is_known_sense(&lemma, &sense) {
        return Err(WsdError::UnknownSense {
            instance: id.to_string(),
            lemma,
            sense,
        });
    }

    Ok(Instance::new(
        id,
        lemma,
        sense,
        normalize_and_split(&left_text),
        normalize_and_split(&right_text),
    ))
}

fn correct_sense(raw: &str) -> String {
    SENSE_TYPOS
        .iter()
        .find(|(typo, _)| *typo == raw)
        .map(|(_, fixed)| (*fixed).to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// Count instances per sense label.
pub fn sense_distribution(instances: &[Instance]) -> HashMap<String, usize> {
    let mut distribution = HashMap::new();
    for instance in instances {
        *distribution.entry(instance.sense.clone()).or_default() += 1;
    }
    distribution
}

/// Longest entity name we bother scanning for.
const MAX_ENTITY_LEN: usize = 10;

/// HTML-named character references seen in the corpus that XML itself does
/// not predefine. Sorted by name for binary search.
static NAMED_ENTITIES: &[(&str, char)] = &[
    ("aacute", 'á'),
    ("acirc", 'â'),
    ("agrave", 'à'),
    ("auml", 'ä'),
    ("ccedil", 'ç'),
    ("cent", '¢'),
    ("copy", '©'),
    ("deg", '°'),
    ("eacute", 'é'),
    ("ecirc", 'ê'),
    ("egrave", 'è'),
    ("euml", 'ë'),
    ("frac12", '½'),
    ("frac14", '¼'),
    ("hellip", '…'),
    ("iacute", 'í'),
    ("icirc", 'î'),
    ("igrave", 'ì'),
    ("iuml", 'ï'),
    ("ldquo", '\u{201c}'),
    ("lsquo", '\u{2018}'),
    ("mdash", '\u{2014}'),
    ("nbsp", '\u{a0}'),
    ("ndash", '\u{2013}'),
    ("ntilde", 'ñ'),
    ("oacute", 'ó'),
    ("ocirc", 'ô'),
    ("ograve", 'ò'),
    ("ouml", 'ö'),
    ("pound", '£'),
    ("rdquo", '\u{201d}'),
    ("reg", '®'),
    ("rsquo", '\u{2019}'),
    ("sect", '§'),
    ("szlig", 'ß'),
    ("uacute", 'ú'),
    ("ucirc", 'û'),
    ("ugrave", 'ù'),
    ("uuml", 'ü'),
    ("yen", '¥'),
];

/// Decode HTML-named character references the XML parser would reject.
///
/// Numeric `&#NNN;`/`&#xHH;` forms and the XML-predefined five are valid
/// markup already and are copied through for the parser to resolve;
/// pre-decoding `&#38;` here would inject a bare `&` into the document.
pub fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];

        let semi = rest
            .char_indices()
            .take(MAX_ENTITY_LEN + 2)
            .find(|(_, c)| *c == ';')
            .map(|(i, _)| i);
        if let Some(semi) = semi
            && let Some(decoded) = decode_entity(&rest[1..semi])
        {
            out.push(decoded);
            rest = &rest[semi + 1..];
            continue;
        }
        out.push('&');
        rest = &rest[1..];
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    if name.starts_with('#') {
        return None;
    }
    NAMED_ENTITIES
        .binary_search_by(|(n, _)| (*n).cmp(name))
        .ok()
        .map(|i| NAMED_ENTITIES[i].1)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SINGLE: &str = r#"<instance id="crane.1">
<answer instance="crane.1" senseid="crane%bird"/>
<context>
 the big <head>crane</head> flew away
</context>
</instance>"#;

    #[test]
    fn splits_context_around_the_head() {
        let instances = parse_corpus(SINGLE).expect("parse");
        assert_eq!(instances.len(), 1);
        let instance = &instances[0];
        assert_eq!(instance.id, "crane.1");
        assert_eq!(instance.lemma, "crane");
        assert_eq!(instance.sense, "crane%bird");
        assert_eq!(instance.left_context, vec!["big"]);
        assert_eq!(instance.right_context, vec!["flew", "away"]);
        assert_eq!(instance.context, vec!["flew", "away", "big"]);
    }

    #[test]
    fn parses_multiple_instances_without_a_root() {
        let raw = format!(
            "{SINGLE}\n<instance id=\"tank.1\">\n<answer instance=\"tank.1\" senseid=\"tank%vehicle\"/>\n<context>\nan armored <head>tank</head> rolled forward\n</context>\n</instance>"
        );
        let instances = parse_corpus(&raw).expect("parse");
        assert_eq!(instances.len(), 2);
        assert_eq!(instances[1].id, "tank.1");
        assert_eq!(instances[1].sense, "tank%vehicle");
    }

    #[test]
    fn corrects_the_container_typo() {
        let raw = r#"<instance id="tank.2">
<answer instance="tank.2" senseid="ank%container"/>
<context>
a water <head>tank</head> of steel
</context>
</instance>"#;
        let instances = parse_corpus(raw).expect("parse");
        assert_eq!(instances[0].sense, "tank%container");
    }

    #[test]
    fn decodes_html_references_in_context() {
        let raw = r#"<instance id="crane.2">
<answer instance="crane.2" senseid="crane%machine"/>
<context>
near the caf&eacute; a <head>crane</head> lifted beams &#38; girders
</context>
</instance>"#;
        let instances = parse_corpus(raw).expect("parse");
        let instance = &instances[0];
        assert!(instance.left_context.contains(&"café".to_string()));
        assert!(instance.right_context.contains(&"girders".to_string()));
    }

    #[test]
    fn lowercases_the_target_lemma() {
        let raw = SINGLE.replace("<head>crane</head>", "<head>Crane</head>");
        let instances = parse_corpus(&raw).expect("parse");
        assert_eq!(instances[0].lemma, "crane");
    }

    #[test]
    fn missing_answer_is_an_error() {
        let raw = r#"<instance id="crane.3">
<context>
the <head>crane</head> flew
</context>
</instance>"#;
        let err = parse_corpus(raw).expect_err("should fail");
        assert!(matches!(
            err,
            WsdError::MissingField { field: "answer", .. }
        ));
    }

    #[test]
    fn missing_context_is_an_error() {
        let raw = r#"<instance id="crane.4">
<answer instance="crane.4" senseid="crane%bird"/>
</instance>"#;
        let err = parse_corpus(raw).expect_err("should fail");
        assert!(matches!(
            err,
            WsdError::MissingField { field: "context", .. }
        ));
    }

    #[test]
    fn missing_head_is_an_error() {
        let raw = r#"<instance id="crane.5">
<answer instance="crane.5" senseid="crane%bird"/>
<context>
the crane flew away
</context>
</instance>"#;
        let err = parse_corpus(raw).expect_err("should fail");
        assert!(matches!(err, WsdError::MissingField { field: "head", .. }));
    }

    #[test]
    fn missing_id_reports_instance_position() {
        let raw = r#"<instance>
<answer instance="x" senseid="crane%bird"/>
<context>
the <head>crane</head> flew
</context>
</instance>"#;
        let err = parse_corpus(raw).expect_err("should fail");
        match err {
            WsdError::MissingField { instance, field } => {
                assert_eq!(instance, "#0");
                assert_eq!(field, "id");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unknown_lemma_fails_the_load() {
        let raw = SINGLE.replace("<head>crane</head>", "<head>walrus</head>");
        let err = parse_corpus(&raw).expect_err("should fail");
        assert!(matches!(err, WsdError::UnknownLemma(l) if l == "walrus"));
    }

    #[test]
    fn sense_not_in_inventory_fails_the_load() {
        let raw = SINGLE.replace("crane%bird", "crane%fish");
        let err = parse_corpus(&raw).expect_err("should fail");
        assert!(matches!(err, WsdError::UnknownSense { .. }));
    }

    #[test]
    fn malformed_markup_is_an_error() {
        assert!(matches!(
            parse_corpus("<instance id=\"x\">"),
            Err(WsdError::Markup(_))
        ));
    }

    #[test]
    fn distribution_counts_senses() {
        let instances = vec![
            Instance::new("a", "crane", "crane%bird", vec![], vec![]),
            Instance::new("b", "crane", "crane%bird", vec![], vec![]),
            Instance::new("c", "crane", "crane%machine", vec![], vec![]),
        ];
        let dist = sense_distribution(&instances);
        assert_eq!(dist.get("crane%bird"), Some(&2));
        assert_eq!(dist.get("crane%machine"), Some(&1));
    }

    #[test]
    fn entity_table_is_sorted() {
        for pair in NAMED_ENTITIES.windows(2) {
            assert!(pair[0].0 < pair[1].0, "{:?} out of order", pair);
        }
    }

    #[test]
    fn decode_touches_only_named_references() {
        assert_eq!(decode_entities("caf&eacute;"), "café");
        assert_eq!(decode_entities("&pound;5 &ndash; &pound;6"), "£5 \u{2013} £6");
        assert_eq!(decode_entities("&#233;"), "&#233;");
        assert_eq!(decode_entities("AT&T"), "AT&T");
        assert_eq!(decode_entities("&unknown;"), "&unknown;");
        assert_eq!(decode_entities("&amp;"), "&amp;");
        assert_eq!(decode_entities("fish & chips"), "fish & chips");
        assert_eq!(decode_entities("tail&"), "tail&");
    }
}
