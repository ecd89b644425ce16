//! Part-of-speech tagging
//!
//! A bigram hidden Markov tagger. The [`PosModel`] holds lexical and suffix
//! tag distributions and tag transition counts; [`PosTagger`] decodes the
//! k best tag sequences with a list Viterbi search.
//!
//! # Model format
//!
//! Tab-separated records, one per line:
//!
//! ```text
//! W   <word>    <tag>   <count>    lexicon entry
//! S   <suffix>  <tag>   <count>    suffix entry for unknown words
//! T   <prev>    <next>  <count>    tag transition; "<s>" is the start state
//! ```

use std::path::Path;

use rustc_hash::FxHashMap;

use super::{model_lines, read_model};
use crate::error::{Error, Result};

/// CoNLL-2002 Dutch tagset, in tie-breaking order
pub const DUTCH_TAGSET: [&str; 12] = [
    "N", "V", "Adj", "Adv", "Art", "Pron", "Prep", "Conj", "Num", "Punc", "Int", "Misc",
];

/// Start-of-sentence state in transition records
pub const START_STATE: &str = "<s>";

/// Longest suffix consulted for unknown words
const MAX_SUFFIX_LEN: usize = 6;

/// Prior for words that match neither the lexicon, a suffix nor a shape rule
const OPEN_CLASS_PRIOR: [(&str, f64); 3] = [("N", 0.6), ("Adj", 0.2), ("V", 0.2)];

/// Emission candidates: (tag index, log probability), sorted by tag index
type Emissions = Vec<(usize, f64)>;

/// Trained tagger parameters
#[derive(Debug, Clone)]
pub struct PosModel {
    tags: Vec<String>,
    tag_index: FxHashMap<String, usize>,
    lexicon: FxHashMap<String, Emissions>,
    suffixes: FxHashMap<String, Emissions>,
    /// Row 0 is the start state, row `p + 1` is tag `p`; entries are log probabilities
    transitions: Vec<Vec<f64>>,
}

/// Raw counts collected while reading a model
#[derive(Debug, Default)]
struct Counts {
    tags: Vec<String>,
    tag_index: FxHashMap<String, usize>,
    lexicon: FxHashMap<String, FxHashMap<usize, u64>>,
    suffixes: FxHashMap<String, FxHashMap<usize, u64>>,
    transitions: FxHashMap<(Option<usize>, usize), u64>,
}

impl Counts {
    fn with_tagset(tagset: &[&str]) -> Self {
        let mut counts = Self::default();
        for tag in tagset {
            counts.intern(tag);
        }
        counts
    }

    fn intern(&mut self, tag: &str) -> usize {
        if let Some(&idx) = self.tag_index.get(tag) {
            return idx;
        }
        let idx = self.tags.len();
        self.tags.push(tag.to_string());
        self.tag_index.insert(tag.to_string(), idx);
        idx
    }

    fn finish(self) -> PosModel {
        let n = self.tags.len();

        let mut rows = vec![vec![0u64; n]; n + 1];
        for ((prev, next), count) in self.transitions {
            let row = prev.map_or(0, |p| p + 1);
            rows[row][next] += count;
        }
        // Add-one smoothing keeps every transition reachable
        let transitions = rows
            .into_iter()
            .map(|row| {
                let total: u64 = row.iter().sum();
                let denom = (total + n as u64) as f64;
                row.into_iter()
                    .map(|c| ((c + 1) as f64 / denom).ln())
                    .collect()
            })
            .collect();

        PosModel {
            tags: self.tags,
            tag_index: self.tag_index,
            lexicon: normalize(self.lexicon),
            suffixes: normalize(self.suffixes),
            transitions,
        }
    }
}

fn normalize(table: FxHashMap<String, FxHashMap<usize, u64>>) -> FxHashMap<String, Emissions> {
    table
        .into_iter()
        .map(|(key, dist)| {
            let total: u64 = dist.values().sum();
            let mut emissions: Emissions = dist
                .into_iter()
                .map(|(tag, c)| (tag, (c as f64 / total as f64).ln()))
                .collect();
            emissions.sort_by_key(|&(tag, _)| tag);
            (key, emissions)
        })
        .collect()
}

impl PosModel {
    /// Load a model file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = read_model(path)?;
        Self::parse(&text, path)
    }

    /// Parse model text; `origin` is only used in error messages
    pub fn parse(text: &str, origin: impl AsRef<Path>) -> Result<Self> {
        let origin = origin.as_ref();
        let mut counts = Counts::with_tagset(&DUTCH_TAGSET);

        for (line_no, line) in model_lines(text) {
            let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
            let &[kind, a, b, count] = fields.as_slice() else {
                return Err(Error::malformed(
                    origin,
                    line_no,
                    format!("expected 4 tab-separated fields, found {}", fields.len()),
                ));
            };
            let count: u64 = match count.parse() {
                Ok(c) if c > 0 => c,
                _ => {
                    return Err(Error::malformed(
                        origin,
                        line_no,
                        format!("count must be a positive integer, got {count:?}"),
                    ))
                }
            };
            if a.is_empty() || b.is_empty() {
                return Err(Error::malformed(origin, line_no, "empty field"));
            }

            match kind {
                "W" => {
                    let tag = counts.intern(b);
                    *counts
                        .lexicon
                        .entry(a.to_lowercase())
                        .or_default()
                        .entry(tag)
                        .or_insert(0) += count;
                }
                "S" => {
                    let tag = counts.intern(b);
                    *counts
                        .suffixes
                        .entry(a.to_lowercase())
                        .or_default()
                        .entry(tag)
                        .or_insert(0) += count;
                }
                "T" => {
                    let prev = if a == START_STATE {
                        None
                    } else {
                        Some(counts.intern(a))
                    };
                    let next = counts.intern(b);
                    *counts.transitions.entry((prev, next)).or_insert(0) += count;
                }
                other => {
                    return Err(Error::malformed(
                        origin,
                        line_no,
                        format!("unknown record type {other:?}"),
                    ))
                }
            }
        }

        Ok(counts.finish())
    }

    /// Tags known to the model, in tie-breaking order
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Number of lexicon entries
    pub fn lexicon_len(&self) -> usize {
        self.lexicon.len()
    }

    fn tag_id(&self, tag: &str) -> Option<usize> {
        self.tag_index.get(tag).copied()
    }

    fn transition(&self, prev: Option<usize>, next: usize) -> f64 {
        self.transitions[prev.map_or(0, |p| p + 1)][next]
    }

    /// Candidate tags for a word; never empty
    fn emissions(&self, word: &str) -> Emissions {
        let lower = word.to_lowercase();
        if let Some(e) = self.lexicon.get(&lower) {
            return e.clone();
        }

        let chars: Vec<char> = lower.chars().collect();
        // Includes the empty token left behind by quote removal
        if chars.iter().all(|c| !c.is_alphanumeric()) {
            if let Some(id) = self.tag_id("Punc") {
                return vec![(id, 0.0)];
            }
        }
        if chars.iter().any(char::is_ascii_digit)
            && chars
                .iter()
                .all(|&c| c.is_ascii_digit() || matches!(c, '.' | ',' | ':' | '-' | '/' | '%'))
        {
            if let Some(id) = self.tag_id("Num") {
                return vec![(id, 0.0)];
            }
        }

        let longest = MAX_SUFFIX_LEN.min(chars.len().saturating_sub(1));
        for len in (1..=longest).rev() {
            let suffix: String = chars[chars.len() - len..].iter().collect();
            if let Some(e) = self.suffixes.get(&suffix) {
                return e.clone();
            }
        }

        let mut prior: Emissions = OPEN_CLASS_PRIOR
            .iter()
            .filter_map(|&(tag, p)| self.tag_id(tag).map(|id| (id, p.ln())))
            .collect();
        if prior.is_empty() {
            prior.push((0, 0.0));
        }
        prior.sort_by_key(|&(tag, _)| tag);
        prior
    }
}

/// A scored tag sequence
#[derive(Debug, Clone, PartialEq)]
pub struct TagSequence {
    pub tags: Vec<String>,
    /// Log probability of the sequence
    pub score: f64,
}

/// Partial path kept per state during k-best decoding
#[derive(Debug, Clone)]
struct Hypothesis {
    score: f64,
    path: Vec<usize>,
}

/// Viterbi decoder over a [`PosModel`]
#[derive(Debug, Clone)]
pub struct PosTagger<'m> {
    model: &'m PosModel,
}

impl<'m> PosTagger<'m> {
    pub fn new(model: &'m PosModel) -> Self {
        Self { model }
    }

    /// Tags of the most probable sequence; same length as `tokens`
    pub fn best_sequence<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<String> {
        self.top_k_sequences(tokens, 1)
            .into_iter()
            .next()
            .map(|s| s.tags)
            .unwrap_or_default()
    }

    /// Up to `k` most probable sequences, best first
    ///
    /// Ties are broken by preferring earlier tags in [`PosModel::tags`] order.
    pub fn top_k_sequences<S: AsRef<str>>(&self, tokens: &[S], k: usize) -> Vec<TagSequence> {
        if tokens.is_empty() || k == 0 {
            return Vec::new();
        }
        let n_tags = self.model.tags.len();

        // beams[tag] holds the k best paths ending in `tag`
        let mut beams: Vec<Vec<Hypothesis>> = vec![Vec::new(); n_tags];
        for (tag, lp) in self.model.emissions(tokens[0].as_ref()) {
            beams[tag].push(Hypothesis {
                score: self.model.transition(None, tag) + lp,
                path: vec![tag],
            });
        }

        for token in &tokens[1..] {
            let mut next: Vec<Vec<Hypothesis>> = vec![Vec::new(); n_tags];
            for (tag, lp) in self.model.emissions(token.as_ref()) {
                let mut candidates: Vec<(f64, &Hypothesis)> = beams
                    .iter()
                    .enumerate()
                    .flat_map(|(prev, hyps)| {
                        let trans = self.model.transition(Some(prev), tag);
                        hyps.iter().map(move |h| (h.score + trans + lp, h))
                    })
                    .collect();
                candidates.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.path.cmp(&b.1.path)));
                next[tag] = candidates
                    .into_iter()
                    .take(k)
                    .map(|(score, h)| {
                        let mut path = Vec::with_capacity(h.path.len() + 1);
                        path.extend_from_slice(&h.path);
                        path.push(tag);
                        Hypothesis { score, path }
                    })
                    .collect();
            }
            beams = next;
        }

        let mut finals: Vec<Hypothesis> = beams.into_iter().flatten().collect();
        finals.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.path.cmp(&b.path)));
        finals.truncate(k);

        finals
            .into_iter()
            .map(|h| TagSequence {
                tags: h.path.iter().map(|&t| self.model.tags[t].clone()).collect(),
                score: h.score,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const MODEL: &str = "\
# lexicon
W\tde\tArt\t100
W\thet\tArt\t60
W\thet\tPron\t40
W\tkat\tN\t10
W\tslaapt\tV\t10
W\tlopen\tV\t6
W\tlopen\tN\t4
W\tmooie\tAdj\t8
# suffixes
S\ting\tN\t20
S\tlijk\tAdj\t15
S\ten\tV\t5
S\ten\tN\t5
# transitions
T\t<s>\tArt\t50
T\t<s>\tPron\t20
T\tArt\tN\t60
T\tArt\tAdj\t30
T\tAdj\tN\t30
T\tN\tV\t40
T\tPron\tV\t30
T\tV\tPunc\t20
T\tN\tPunc\t10
";

    fn model() -> PosModel {
        PosModel::parse(MODEL, "test.tsv").unwrap()
    }

    #[test]
    fn test_simple_sentence() {
        let m = model();
        let tags = PosTagger::new(&m).best_sequence(&["de", "kat", "slaapt", "."]);
        assert_eq!(tags, vec!["Art", "N", "V", "Punc"]);
    }

    #[test]
    fn test_context_resolves_ambiguity() {
        let m = model();
        let tagger = PosTagger::new(&m);
        // "het" after sentence start followed by a verb reads as a pronoun
        assert_eq!(tagger.best_sequence(&["het", "slaapt"]), vec!["Pron", "V"]);
        // ...and as an article before a noun
        assert_eq!(tagger.best_sequence(&["het", "kat"]), vec!["Art", "N"]);
    }

    #[test]
    fn test_unknown_words_use_suffix_and_shape() {
        let m = model();
        let tags = PosTagger::new(&m).best_sequence(&["de", "vergadering", "42", "!"]);
        assert_eq!(tags[1], "N");
        assert_eq!(tags[2], "Num");
        assert_eq!(tags[3], "Punc");
    }

    #[test]
    fn test_lexicon_is_case_insensitive() {
        let m = model();
        let tags = PosTagger::new(&m).best_sequence(&["De", "Kat"]);
        assert_eq!(tags, vec!["Art", "N"]);
    }

    #[test]
    fn test_empty_input() {
        let m = model();
        let empty: [&str; 0] = [];
        assert!(PosTagger::new(&m).best_sequence(&empty).is_empty());
        assert!(PosTagger::new(&m).top_k_sequences(&["kat"], 0).is_empty());
    }

    #[test]
    fn test_top_k_ordered_and_first_is_best() {
        let m = model();
        let tagger = PosTagger::new(&m);
        let tokens = ["het", "lopen"];
        let seqs = tagger.top_k_sequences(&tokens, 3);

        assert!(seqs.len() > 1 && seqs.len() <= 3);
        assert_eq!(seqs[0].tags, tagger.best_sequence(&tokens));
        for pair in seqs.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_malformed_field_count() {
        let err = PosModel::parse("W\tde\tArt\n", "bad.tsv").unwrap_err();
        match err {
            Error::MalformedModel { line, .. } => assert_eq!(line, 1),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_count() {
        let err = PosModel::parse("# c\nW\tde\tArt\tveel\n", "bad.tsv").unwrap_err();
        assert!(matches!(err, Error::MalformedModel { line: 2, .. }));
    }

    #[test]
    fn test_unknown_record_type() {
        let err = PosModel::parse("X\tde\tArt\t1\n", "bad.tsv").unwrap_err();
        assert!(matches!(err, Error::MalformedModel { .. }));
    }

    #[test]
    fn test_extra_tags_are_appended() {
        let m = PosModel::parse("W\tzo'n\tDet\t3\n", "t.tsv").unwrap();
        assert_eq!(m.tags().len(), DUTCH_TAGSET.len() + 1);
        assert_eq!(m.tags().last().map(String::as_str), Some("Det"));
    }

    proptest! {
        #[test]
        fn prop_one_tag_per_token(tokens in proptest::collection::vec("[a-z.,!0-9]{1,8}", 0..20)) {
            let m = model();
            let tags = PosTagger::new(&m).best_sequence(&tokens);
            prop_assert_eq!(tags.len(), tokens.len());
        }
    }
}
