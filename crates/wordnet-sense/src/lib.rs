//! Shared types for addressing WordNet senses.
//!
//! A sense is named by a dotted key such as `crane.n.05`: lemma, part of
//! speech, and a 1-based sense number giving the position of the synset in
//! the lemma's `index.*` entry. [`SenseKey`] parses and prints that form,
//! [`SynsetId`] keys a synset inside the dictionary files, and [`Synset`]
//! carries the gloss text a lookup resolves to, borrowed from the backing
//! buffer.
//!
//! ```rust
//! use wordnet_sense::{Pos, SenseKey};
//!
//! let key: SenseKey = "sea_bass.n.01".parse().unwrap();
//! assert_eq!(key.lemma, "sea_bass");
//! assert_eq!(key.pos, Pos::Noun);
//! assert_eq!(key.sense, 1);
//! assert_eq!(key.to_string(), "sea_bass.n.01");
//! ```

use std::fmt;
use std::str::FromStr;

/// Part-of-speech marker as used by WordNet files (`n`, `v`, `a`/`s`, `r`).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Pos {
    Noun,
    Verb,
    Adj,
    Adv,
}

impl Pos {
    /// Parse a WordNet POS character into an enum.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'n' => Some(Pos::Noun),
            'v' => Some(Pos::Verb),
            'a' | 's' => Some(Pos::Adj),
            'r' => Some(Pos::Adv),
            _ => None,
        }
    }

    /// Emit the POS character used in `index.*`/`data.*`.
    pub fn to_char(self) -> char {
        match self {
            Pos::Noun => 'n',
            Pos::Verb => 'v',
            Pos::Adj => 'a',
            Pos::Adv => 'r',
        }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Pos::Noun => "noun",
            Pos::Verb => "verb",
            Pos::Adj => "adj",
            Pos::Adv => "adv",
        })
    }
}

/// `(offset, pos)` pair uniquely identifying a synset within the WordNet files.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct SynsetId {
    pub pos: Pos,
    pub offset: u32,
}

/// Dotted sense key in the `lemma.pos.NN` form, e.g. `crane.n.05`.
///
/// The lemma may itself contain dots, so parsing splits from the right. The
/// sense number is 1-based and printed zero-padded to two digits.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct SenseKey {
    pub lemma: String,
    pub pos: Pos,
    pub sense: u32,
}

impl SenseKey {
    pub fn new(lemma: impl Into<String>, pos: Pos, sense: u32) -> Self {
        SenseKey {
            lemma: normalize_lemma(&lemma.into()),
            pos,
            sense,
        }
    }
}

impl FromStr for SenseKey {
    type Err = ParseSenseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseSenseKeyError {
            input: s.to_string(),
        };
        let mut parts = s.rsplitn(3, '.');
        let sense_part = parts.next().ok_or_else(err)?;
        let pos_part = parts.next().ok_or_else(err)?;
        let lemma_part = parts.next().ok_or_else(err)?;

        let sense: u32 = sense_part.parse().map_err(|_| err())?;
        if sense == 0 {
            return Err(err());
        }
        let mut pos_chars = pos_part.chars();
        let pos = match (pos_chars.next(), pos_chars.next()) {
            (Some(c), None) => Pos::from_char(c).ok_or_else(err)?,
            _ => return Err(err()),
        };
        let lemma = normalize_lemma(lemma_part);
        if lemma.is_empty() {
            return Err(err());
        }
        Ok(SenseKey { lemma, pos, sense })
    }
}

impl fmt::Display for SenseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{:02}", self.lemma, self.pos.to_char(), self.sense)
    }
}

/// Error returned when a dotted sense key fails to parse.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseSenseKeyError {
    input: String,
}

impl fmt::Display for ParseSenseKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid sense key {:?}, expected `lemma.pos.NN`",
            self.input
        )
    }
}

impl std::error::Error for ParseSenseKeyError {}

/// Canonical lemma form used as a lookup key: trimmed, lowercased, with
/// spaces collapsed to underscores as in the dictionary files.
pub fn normalize_lemma(lemma: &str) -> String {
    lemma.trim().to_lowercase().replace(' ', "_")
}

/// Gloss text attached to a synset: a definition plus zero or more
/// quoted usage examples.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Gloss<'a> {
    pub definition: &'a str,
    pub examples: Vec<&'a str>,
}

/// A resolved synset: its identity plus the gloss text behind it.
#[derive(Clone, Debug)]
pub struct Synset<'a> {
    pub id: SynsetId,
    pub gloss: Gloss<'a>,
}
