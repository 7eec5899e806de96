//! Resolve WordNet sense keys to glosses with zero-copy text.
//!
//! This crate ingests the canonical `data.*`/`index.*` files and answers one
//! question: given a dotted sense key such as `crane.n.05`, what are the
//! definition and usage examples of that sense? The sense number indexes into
//! the lemma's entry in `index.*`, whose synset offsets are listed in sense
//! order; the gloss text itself borrows from the backing buffer. Callers
//! choose between memory-mapped files or owned buffers at runtime via
//! [`LoadMode`].
//!
//! Index records are folded into lookup tables during load, so only the
//! `data.*` buffers stay resident.
//!
//! # Example
//! ```no_run
//! use wordnet_gloss::{LoadMode, SenseDict};
//! use wordnet_sense::SenseKey;
//!
//! # fn main() -> anyhow::Result<()> {
//! let dict = SenseDict::load_with_mode("/path/to/dict", LoadMode::Mmap)?;
//! let key: SenseKey = "crane.n.05".parse()?;
//! if let Some(synset) = dict.synset(&key) {
//!     println!("{key}: {}", synset.gloss.definition);
//! }
//! # Ok(()) }
//! ```
//!
//! For a runnable demo, see `cargo run -p wordnet-gloss --example gloss -- <dict> <key>`.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use memmap2::Mmap;
use wordnet_sense::{Gloss, Pos, SenseKey, Synset, SynsetId, normalize_lemma};

/// Strategy for loading dictionary files.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LoadMode {
    /// Memory-map each WordNet file (fast, zero-copy).
    Mmap,
    /// Read each file into an owned buffer (portable fallback).
    Owned,
}

#[derive(Debug)]
enum Buffer {
    Mmap(Mmap),
    Owned(Vec<u8>),
}

impl Buffer {
    fn as_slice(&self) -> &[u8] {
        match self {
            Buffer::Mmap(m) => m.as_ref(),
            Buffer::Owned(v) => v.as_slice(),
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum FileKind {
    DataNoun,
    DataVerb,
    DataAdj,
    DataAdv,
}

impl FileKind {
    fn name(self) -> &'static str {
        match self {
            FileKind::DataNoun => "data.noun",
            FileKind::DataVerb => "data.verb",
            FileKind::DataAdj => "data.adj",
            FileKind::DataAdv => "data.adv",
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct TextRef {
    file: FileKind,
    start: usize,
    len: usize,
}

#[derive(Debug)]
struct DictFiles {
    data_noun: Buffer,
    data_verb: Buffer,
    data_adj: Buffer,
    data_adv: Buffer,
}

impl DictFiles {
    fn load(dict_dir: &Path, mode: LoadMode) -> Result<Self> {
        Ok(Self {
            data_noun: load_file(dict_dir.join("data.noun"), mode)?,
            data_verb: load_file(dict_dir.join("data.verb"), mode)?,
            data_adj: load_file(dict_dir.join("data.adj"), mode)?,
            data_adv: load_file(dict_dir.join("data.adv"), mode)?,
        })
    }

    fn bytes(&self, file: FileKind) -> &[u8] {
        match file {
            FileKind::DataNoun => self.data_noun.as_slice(),
            FileKind::DataVerb => self.data_verb.as_slice(),
            FileKind::DataAdj => self.data_adj.as_slice(),
            FileKind::DataAdv => self.data_adv.as_slice(),
        }
    }

    fn text(&self, r: TextRef) -> &str {
        let bytes = self.bytes(r.file);
        let slice = &bytes[r.start..r.start + r.len];
        std::str::from_utf8(slice).expect("wordnet text is valid utf8")
    }
}

#[derive(Debug)]
struct GlossData {
    definition: TextRef,
    examples: Vec<TextRef>,
}

/// In-memory view of a WordNet dictionary keyed by sense, backed by mmap or
/// owned buffers.
#[derive(Debug)]
pub struct SenseDict {
    files: DictFiles,
    senses: HashMap<(Pos, String), Vec<u32>>,
    glosses: HashMap<SynsetId, GlossData>,
}

impl SenseDict {
    /// Load a dictionary from a directory containing `data.*` and `index.*`
    /// files.
    ///
    /// Defaults to memory-mapping the source files. Use [`load_with_mode`] to
    /// force owned buffers instead.
    ///
    /// [`load_with_mode`]: SenseDict::load_with_mode
    pub fn load(dict_dir: impl AsRef<Path>) -> Result<Self> {
        Self::load_with_mode(dict_dir, LoadMode::Mmap)
    }

    /// Load a dictionary choosing between mmap and owned buffers at runtime.
    pub fn load_with_mode(dict_dir: impl AsRef<Path>, mode: LoadMode) -> Result<Self> {
        let dir = dict_dir.as_ref();
        let required = [
            "data.noun",
            "data.verb",
            "data.adj",
            "data.adv",
            "index.noun",
            "index.verb",
            "index.adj",
            "index.adv",
        ];
        for name in &required {
            let path = dir.join(name);
            if !path.exists() {
                anyhow::bail!("missing required WordNet file: {}", path.display());
            }
        }

        // Index files are only needed while building the sense tables, so
        // they are loaded, folded, and dropped before the data buffers.
        let mut senses = HashMap::new();
        let index_files = [
            ("index.noun", Pos::Noun),
            ("index.verb", Pos::Verb),
            ("index.adj", Pos::Adj),
            ("index.adv", Pos::Adv),
        ];
        for (name, pos) in index_files {
            let buf = load_file(dir.join(name), mode)?;
            parse_index(buf.as_slice(), name, pos, &mut senses)?;
        }

        let files = DictFiles::load(dir, mode)?;
        let mut glosses = HashMap::new();
        parse_data(
            files.bytes(FileKind::DataNoun),
            FileKind::DataNoun,
            Pos::Noun,
            &mut glosses,
        )?;
        parse_data(
            files.bytes(FileKind::DataVerb),
            FileKind::DataVerb,
            Pos::Verb,
            &mut glosses,
        )?;
        parse_data(
            files.bytes(FileKind::DataAdj),
            FileKind::DataAdj,
            Pos::Adj,
            &mut glosses,
        )?;
        parse_data(
            files.bytes(FileKind::DataAdv),
            FileKind::DataAdv,
            Pos::Adv,
            &mut glosses,
        )?;

        Ok(Self {
            files,
            senses,
            glosses,
        })
    }

    /// Resolve a sense key to its synset, or `None` if the lemma is unknown
    /// or the sense number exceeds the lemma's sense count.
    pub fn synset(&self, key: &SenseKey) -> Option<Synset<'_>> {
        let offsets = self.senses.get(&(key.pos, normalize_lemma(&key.lemma)))?;
        let idx = key.sense.checked_sub(1)? as usize;
        let offset = *offsets.get(idx)?;
        let id = SynsetId {
            pos: key.pos,
            offset,
        };
        let gloss = self.glosses.get(&id)?;
        Some(Synset {
            id,
            gloss: Gloss {
                definition: self.files.text(gloss.definition),
                examples: gloss
                    .examples
                    .iter()
                    .map(|r| self.files.text(*r))
                    .collect(),
            },
        })
    }

    /// Check whether a lemma exists for the given POS according to index files.
    pub fn lemma_exists(&self, pos: Pos, lemma: &str) -> bool {
        self.senses.contains_key(&(pos, normalize_lemma(lemma)))
    }

    /// Number of senses listed for a lemma, or zero if absent.
    pub fn sense_count(&self, pos: Pos, lemma: &str) -> usize {
        self.senses
            .get(&(pos, normalize_lemma(lemma)))
            .map(Vec::len)
            .unwrap_or(0)
    }

    /// Number of lemmas tracked across all parts of speech.
    pub fn lemma_count(&self) -> usize {
        self.senses.len()
    }

    /// Number of synsets with a parsed gloss.
    pub fn synset_count(&self) -> usize {
        self.glosses.len()
    }
}

fn load_file(path: PathBuf, mode: LoadMode) -> Result<Buffer> {
    match mode {
        LoadMode::Mmap => {
            let file = File::open(&path).with_context(|| format!("open {}", path.display()))?;
            unsafe { Mmap::map(&file) }
                .map(Buffer::Mmap)
                .with_context(|| format!("mmap {}", path.display()))
        }
        LoadMode::Owned => {
            let mut file = File::open(&path).with_context(|| format!("open {}", path.display()))?;
            let mut buf = Vec::new();
            file.read_to_end(&mut buf)
                .with_context(|| format!("read {}", path.display()))?;
            Ok(Buffer::Owned(buf))
        }
    }
}

fn parse_index(
    bytes: &[u8],
    name: &str,
    pos: Pos,
    senses: &mut HashMap<(Pos, String), Vec<u32>>,
) -> Result<()> {
    for (lineno, raw_line) in bytes.split(|b| *b == b'\n').enumerate() {
        let line = strip_cr(raw_line);
        if line.is_empty() || matches!(line.first(), Some(b' ' | b'\t')) {
            continue;
        }
        let line_str = std::str::from_utf8(line)
            .with_context(|| format!("{}:{} invalid utf8", name, lineno + 1))?;
        let tokens: Vec<&str> = line_str.split_ascii_whitespace().collect();
        if tokens.len() < 6 {
            anyhow::bail!("{}:{} malformed index line (too few tokens)", name, lineno + 1);
        }

        let lemma = normalize_lemma(tokens[0]);
        let synset_cnt: u32 = tokens[2]
            .parse()
            .with_context(|| format!("{}:{} synset_cnt", name, lineno + 1))?;
        let p_cnt: usize = tokens[3]
            .parse()
            .with_context(|| format!("{}:{} p_cnt", name, lineno + 1))?;

        // Skip the pointer symbols plus the sense_cnt/tagsense_cnt pair; the
        // trailing tokens are the synset offsets in sense order.
        let offsets_at = 4 + p_cnt + 2;
        if tokens.len() < offsets_at {
            anyhow::bail!("{}:{} truncated index line", name, lineno + 1);
        }
        let offsets: Vec<u32> = tokens[offsets_at..]
            .iter()
            .map(|t| {
                t.parse::<u32>()
                    .with_context(|| format!("{}:{} synset_offsets", name, lineno + 1))
            })
            .collect::<Result<_>>()?;
        if offsets.len() != synset_cnt as usize {
            anyhow::bail!(
                "{}:{} synset_cnt mismatch (expected {}, got {})",
                name,
                lineno + 1,
                synset_cnt,
                offsets.len()
            );
        }

        senses.insert((pos, lemma), offsets);
    }

    Ok(())
}

fn parse_data(
    bytes: &[u8],
    file: FileKind,
    pos: Pos,
    glosses: &mut HashMap<SynsetId, GlossData>,
) -> Result<()> {
    for (lineno, raw_line) in bytes.split(|b| *b == b'\n').enumerate() {
        let line = strip_cr(raw_line);
        if line.is_empty() || matches!(line.first(), Some(b' ' | b'\t')) {
            continue;
        }
        let line_str = std::str::from_utf8(line)
            .with_context(|| format!("{}:{} invalid utf8", file.name(), lineno + 1))?;
        let (left, gloss_part) = match line_str.split_once('|') {
            Some((l, r)) => (l.trim(), r.trim()),
            None => (line_str.trim(), ""),
        };

        let offset: u32 = left
            .split_ascii_whitespace()
            .next()
            .ok_or_else(|| anyhow::anyhow!("{}:{} missing offset", file.name(), lineno + 1))?
            .parse()
            .with_context(|| format!("{}:{} offset", file.name(), lineno + 1))?;

        let gloss = parse_gloss(file, bytes, gloss_part);
        glosses.insert(SynsetId { pos, offset }, gloss);
    }

    Ok(())
}

/// Split a gloss into definition and quoted examples.
///
/// The definition runs up to the first `;` outside quotes; each
/// double-quoted span becomes one example.
fn parse_gloss(file: FileKind, root: &[u8], gloss: &str) -> GlossData {
    let trimmed = gloss.trim();
    if trimmed.is_empty() {
        // Data lines without a gloss section resolve to an empty definition.
        return GlossData {
            definition: TextRef { file, start: 0, len: 0 },
            examples: Vec::new(),
        };
    }

    let mut examples = Vec::new();
    let mut in_quote = false;
    let mut quote_start: Option<usize> = None;
    let mut def_end = trimmed.len();
    for (idx, ch) in trimmed.char_indices() {
        match ch {
            '"' => {
                if in_quote {
                    if let Some(start) = quote_start.take()
                        && idx > start + 1
                    {
                        let start_bytes =
                            trimmed.as_ptr() as usize + start + 1 - root.as_ptr() as usize;
                        examples.push(TextRef {
                            file,
                            start: start_bytes,
                            len: idx - start - 1,
                        });
                    }
                } else {
                    quote_start = Some(idx);
                }
                in_quote = !in_quote;
            }
            ';' if !in_quote && def_end == trimmed.len() => {
                def_end = idx;
            }
            _ => {}
        }
    }

    let definition_slice = trimmed[..def_end].trim();
    let definition = TextRef {
        file,
        start: definition_slice.as_ptr() as usize - root.as_ptr() as usize,
        len: definition_slice.len(),
    };

    GlossData {
        definition,
        examples,
    }
}

fn strip_cr(line: &[u8]) -> &[u8] {
    if line.ends_with(b"\r") {
        &line[..line.len() - 1]
    } else {
        line
    }
}
