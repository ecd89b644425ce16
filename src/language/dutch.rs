//! Dutch language model
//!
//! [`LanguageDutch`] forwards every operation to the NLP components in
//! [`crate::nlp`], driven by three model files under a resource directory:
//!
//! | File | Component |
//! |------|-----------|
//! | `models/nl-sent.txt`  | [`SentenceModel`] |
//! | `models/nl-token.txt` | [`TokenizerModel`] |
//! | `models/nl-pos.tsv`   | [`PosModel`] |
//!
//! Loading is expensive relative to tagging, so resources are loaded once per
//! directory and shared between every `LanguageDutch` built from it.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use rustc_hash::FxHashMap;
use tracing::{debug, info};

use super::LanguageModel;
use crate::error::{Error, Result};
use crate::nlp::sentence::{SentenceDetector, SentenceModel};
use crate::nlp::stemmer::DutchStemmer;
use crate::nlp::stopwords::StopwordFilter;
use crate::nlp::tagger::{PosModel, PosTagger, TagSequence};
use crate::nlp::tokenizer::{Tokenizer, TokenizerModel};

/// Sentence model path relative to the resource directory
pub const SENTENCE_MODEL: &str = "models/nl-sent.txt";
/// Tokenizer model path relative to the resource directory
pub const TOKENIZER_MODEL: &str = "models/nl-token.txt";
/// POS model path relative to the resource directory
pub const POS_MODEL: &str = "models/nl-pos.tsv";

const BUNDLED_SENTENCE: &str = include_str!("../../resources/models/nl-sent.txt");
const BUNDLED_TOKENIZER: &str = include_str!("../../resources/models/nl-token.txt");
const BUNDLED_POS: &str = include_str!("../../resources/models/nl-pos.tsv");

/// Loaded Dutch resources
#[derive(Debug)]
pub struct DutchResources {
    pub splitter: SentenceModel,
    pub tokenizer: TokenizerModel,
    pub tagger: PosModel,
    pub stemmer: DutchStemmer,
    pub stopwords: StopwordFilter,
}

impl DutchResources {
    /// Load every model file under `dir`
    pub fn load(dir: &Path) -> Result<Self> {
        let resources = Self {
            splitter: SentenceModel::load(dir.join(SENTENCE_MODEL))?,
            tokenizer: TokenizerModel::load(dir.join(TOKENIZER_MODEL))?,
            tagger: PosModel::load(dir.join(POS_MODEL))?,
            stemmer: DutchStemmer::new(),
            stopwords: StopwordFilter::dutch(),
        };
        info!(
            path = %dir.display(),
            abbreviations = resources.splitter.len(),
            protected_tokens = resources.tokenizer.len(),
            lexicon = resources.tagger.lexicon_len(),
            "loaded Dutch language resources"
        );
        Ok(resources)
    }

    fn bundled() -> Result<Self> {
        let resources = Self {
            splitter: SentenceModel::parse(BUNDLED_SENTENCE),
            tokenizer: TokenizerModel::parse(BUNDLED_TOKENIZER),
            tagger: PosModel::parse(BUNDLED_POS, POS_MODEL)?,
            stemmer: DutchStemmer::new(),
            stopwords: StopwordFilter::dutch(),
        };
        info!(
            source = "bundled",
            abbreviations = resources.splitter.len(),
            protected_tokens = resources.tokenizer.len(),
            lexicon = resources.tagger.lexicon_len(),
            "loaded Dutch language resources"
        );
        Ok(resources)
    }
}

type ResourceCache = Mutex<FxHashMap<PathBuf, Arc<DutchResources>>>;

fn cache() -> &'static ResourceCache {
    static CACHE: OnceLock<ResourceCache> = OnceLock::new();
    CACHE.get_or_init(|| Mutex::new(FxHashMap::default()))
}

fn bundled_resources() -> Result<Arc<DutchResources>> {
    static BUNDLED: OnceLock<Arc<DutchResources>> = OnceLock::new();
    if let Some(res) = BUNDLED.get() {
        return Ok(Arc::clone(res));
    }
    let res = Arc::new(DutchResources::bundled()?);
    Ok(Arc::clone(BUNDLED.get_or_init(|| res)))
}

fn canonical(path: &Path) -> Result<PathBuf> {
    std::fs::canonicalize(path).map_err(|e| Error::io(path, e))
}

/// Dutch sentence splitting, tokenization, tagging and stemming
#[derive(Debug, Clone)]
pub struct LanguageDutch {
    resources: Arc<DutchResources>,
}

impl LanguageDutch {
    /// Build from a resource directory, reusing resources already loaded from it
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let dir = canonical(path.as_ref())?;
        let mut cache = cache().lock().unwrap_or_else(|e| e.into_inner());

        if let Some(res) = cache.get(&dir) {
            debug!(path = %dir.display(), "reusing cached Dutch resources");
            return Ok(Self {
                resources: Arc::clone(res),
            });
        }

        let res = Arc::new(DutchResources::load(&dir)?);
        cache.insert(dir, Arc::clone(&res));
        Ok(Self { resources: res })
    }

    /// Load resources from `path` again, replacing any cached copy
    pub fn reload(path: impl AsRef<Path>) -> Result<Self> {
        let dir = canonical(path.as_ref())?;
        let res = Arc::new(DutchResources::load(&dir)?);
        cache()
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(dir, Arc::clone(&res));
        Ok(Self { resources: res })
    }

    /// Build from the model files compiled into the crate
    pub fn bundled() -> Result<Self> {
        Ok(Self {
            resources: bundled_resources()?,
        })
    }

    /// Shared resources backing this model
    pub fn resources(&self) -> &Arc<DutchResources> {
        &self.resources
    }

    /// Up to `k` best tag sequences for the token list
    pub fn top_k_sequences(&self, tokens: &[String], k: usize) -> Vec<TagSequence> {
        PosTagger::new(&self.resources.tagger).top_k_sequences(tokens, k)
    }
}

impl LanguageModel for LanguageDutch {
    fn split_paragraph(&self, text: &str) -> Vec<String> {
        SentenceDetector::new(&self.resources.splitter).detect(text)
    }

    fn tokenize_sentence(&self, text: &str) -> Vec<String> {
        Tokenizer::new(&self.resources.tokenizer)
            .tokenize(text)
            .into_iter()
            .map(|t| t.replace('"', "").to_lowercase().trim().to_string())
            .collect()
    }

    fn tag_tokens(&self, tokens: &[String]) -> Vec<String> {
        PosTagger::new(&self.resources.tagger).best_sequence(tokens)
    }

    /// `N` and `N(...)` only; numerals (`Num`) are not nouns
    fn is_noun(&self, pos: &str) -> bool {
        pos == "N" || pos.starts_with("N(")
    }

    fn is_adjective(&self, pos: &str) -> bool {
        pos.starts_with("Adj")
    }

    fn stem_token(&self, token: &str) -> String {
        self.resources.stemmer.stem(token)
    }

    fn stopwords(&self) -> &StopwordFilter {
        &self.resources.stopwords
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn dutch() -> LanguageDutch {
        LanguageDutch::bundled().unwrap()
    }

    #[test]
    fn test_split_paragraph() {
        let nl = dutch();
        let sentences = nl.split_paragraph("Amsterdam is de hoofdstad. Den Haag is de regeringszetel.");
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0], "Amsterdam is de hoofdstad.");
    }

    #[test]
    fn test_split_paragraph_bundled_abbreviation() {
        let nl = dutch();
        let sentences = nl.split_paragraph("Er zijn o.a. fietsen en bijv. Auto's. Klaar.");
        assert_eq!(sentences.len(), 2);
    }

    #[test]
    fn test_tokenize_normalizes() {
        let nl = dutch();
        let tokens = nl.tokenize_sentence("Hij zei \"Hallo\" tegen Z'n moeder.");
        assert_eq!(
            tokens,
            vec!["hij", "zei", "", "hallo", "", "tegen", "z'n", "moeder", "."]
        );
    }

    #[test]
    fn test_tag_tokens_length() {
        let nl = dutch();
        let tokens = nl.tokenize_sentence("De snelle trein rijdt naar Utrecht.");
        let tags = nl.tag_tokens(&tokens);
        assert_eq!(tags.len(), tokens.len());
        assert_eq!(tags[0], "Art");
        assert_eq!(tags.last().map(String::as_str), Some("Punc"));
    }

    #[test]
    fn test_tag_noun_after_article() {
        let nl = dutch();
        let tokens: Vec<String> = ["de", "trein"].iter().map(|s| s.to_string()).collect();
        let tags = nl.tag_tokens(&tokens);
        assert!(nl.is_noun(&tags[1]));
    }

    #[test]
    fn test_noun_and_adjective_predicates() {
        let nl = dutch();
        assert!(nl.is_noun("N"));
        assert!(nl.is_noun("N(eigen)"));
        assert!(!nl.is_noun("Num"));
        assert!(nl.is_adjective("Adj"));
        assert!(!nl.is_adjective("Adv"));
    }

    #[test]
    fn test_node_key_uses_stem() {
        let nl = dutch();
        assert_eq!(nl.node_key("boeken", "N").unwrap(), "Nboek");
        assert_eq!(nl.node_key("Boeken,", "N").unwrap(), "Nboek");
    }

    #[test]
    fn test_top_k_first_matches_tag_tokens() {
        let nl = dutch();
        let tokens = nl.tokenize_sentence("Het werk is mooi.");
        let seqs = nl.top_k_sequences(&tokens, 2);
        assert_eq!(seqs[0].tags, nl.tag_tokens(&tokens));
    }

    #[test]
    fn test_bundled_is_shared() {
        let a = dutch();
        let b = dutch();
        assert!(Arc::ptr_eq(a.resources(), b.resources()));
    }

    proptest! {
        #[test]
        fn prop_tokens_are_normalized_and_tagged(
            s in "[A-Za-zÉéëï'\".,;:!?…«»„“”‘’()€ -]{0,60}|\\PC{0,40}"
        ) {
            let nl = dutch();
            let tokens = nl.tokenize_sentence(&s);
            prop_assert_eq!(nl.tag_tokens(&tokens).len(), tokens.len());
            for t in &tokens {
                prop_assert!(!t.contains('"'));
                prop_assert_eq!(&t.to_lowercase(), t);
            }
        }
    }
}
