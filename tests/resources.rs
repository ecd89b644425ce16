use std::fs;
use std::path::Path;
use std::sync::Arc;

use textrank_nl::language::dutch::{POS_MODEL, SENTENCE_MODEL, TOKENIZER_MODEL};
use textrank_nl::{load_language, Error, LanguageDutch, LanguageModel, TextRank, TextRankConfig};

const BUNDLED: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/resources");

fn copy_resources(dest: &Path) {
    fs::create_dir_all(dest.join("models")).unwrap();
    for file in [SENTENCE_MODEL, TOKENIZER_MODEL, POS_MODEL] {
        fs::copy(Path::new(BUNDLED).join(file), dest.join(file)).unwrap();
    }
}

#[test]
fn loads_from_resource_directory() {
    let dir = tempfile::tempdir().unwrap();
    copy_resources(dir.path());

    let nl = LanguageDutch::new(dir.path()).unwrap();
    let sentences = nl.split_paragraph("Dit is zin een. Dit is zin twee.");
    assert_eq!(sentences.len(), 2);
}

#[test]
fn resources_are_loaded_once_per_directory() {
    let dir = tempfile::tempdir().unwrap();
    copy_resources(dir.path());

    let a = LanguageDutch::new(dir.path()).unwrap();
    // Different spelling of the same directory
    let b = LanguageDutch::new(dir.path().join("models").join("..")).unwrap();
    assert!(Arc::ptr_eq(a.resources(), b.resources()));

    let other = tempfile::tempdir().unwrap();
    copy_resources(other.path());
    let c = LanguageDutch::new(other.path()).unwrap();
    assert!(!Arc::ptr_eq(a.resources(), c.resources()));
}

#[test]
fn reload_replaces_cached_resources() {
    let dir = tempfile::tempdir().unwrap();
    copy_resources(dir.path());
    let before = LanguageDutch::new(dir.path()).unwrap();

    fs::write(dir.path().join(SENTENCE_MODEL), "zin\n").unwrap();
    let reloaded = LanguageDutch::reload(dir.path()).unwrap();
    let after = LanguageDutch::new(dir.path()).unwrap();

    assert!(!Arc::ptr_eq(before.resources(), reloaded.resources()));
    assert!(Arc::ptr_eq(reloaded.resources(), after.resources()));
    assert!(after.resources().splitter.is_abbreviation("zin"));
}

#[test]
fn missing_model_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    copy_resources(dir.path());
    fs::remove_file(dir.path().join(TOKENIZER_MODEL)).unwrap();

    match LanguageDutch::new(dir.path()) {
        Err(Error::Io { path, .. }) => assert!(path.ends_with(TOKENIZER_MODEL)),
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn malformed_pos_model_reports_line() {
    let dir = tempfile::tempdir().unwrap();
    copy_resources(dir.path());
    fs::write(dir.path().join(POS_MODEL), "W\tde\tArt\t1\nW\tkapot\n").unwrap();

    match LanguageDutch::new(dir.path()) {
        Err(Error::MalformedModel { line, .. }) => assert_eq!(line, 2),
        other => panic!("expected MalformedModel, got {other:?}"),
    }
}

#[test]
fn factory_builds_dutch_engine() {
    let dir = tempfile::tempdir().unwrap();
    copy_resources(dir.path());

    let language = load_language(dir.path(), "nl").unwrap();
    let engine = TextRank::new(language, TextRankConfig::default().with_top_n(3)).unwrap();
    let result = engine
        .analyze(
            "Open data helpt de gemeente. De gemeente publiceert open data.\n\n\
             Burgers gebruiken open data van de gemeente.",
        )
        .unwrap();

    assert_eq!(result.sentences, 3);
    assert!(result.keywords.len() <= 3);
    assert!(result.keywords.iter().any(|k| k.text == "gemeente"));
}
