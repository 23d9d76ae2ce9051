//! Catalog Integration Tests
//!
//! Exercises the manager against real directory trees built in temp dirs.

use std::fs;
use std::path::Path;

use locale_catalog::{Entries, ErrorKind, LocaleError, LocalizationManager, OutputFormat, SectionStore};
use tempfile::{tempdir, TempDir};

/// Build `<root>/<lang>/<section>.json` with the same keys everywhere
fn generate_catalog(languages: &[&str], sections: &[&str], keys: &[(&str, &str)]) -> TempDir {
    let dir = tempdir().unwrap();
    for lang in languages {
        fs::create_dir(dir.path().join(lang)).unwrap();
        for section in sections {
            let store = SectionStore::new(
                dir.path().join(lang).join(format!("{}.json", section)),
                OutputFormat::Pretty,
            );
            store.create().unwrap();
            store
                .write_keys(&keys.iter().copied().collect::<Entries>())
                .unwrap();
        }
    }
    dir
}

fn section_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

// =============================================================================
// Introspection
// =============================================================================

#[test]
fn test_languages_and_sections_discovered() {
    let dir = generate_catalog(&["en", "uk"], &["errors", "messages"], &[("hello", "")]);
    let manager = LocalizationManager::open(dir.path()).unwrap();

    assert_eq!(manager.languages(), ["en", "uk"]);
    assert_eq!(manager.sections(), ["errors", "messages"]);
}

#[test]
fn test_sections_match_every_language_directory() {
    let dir = generate_catalog(&["en", "uk"], &["messages"], &[]);
    let mut manager = LocalizationManager::open(dir.path()).unwrap();
    manager.create_language("pl").unwrap();
    manager.create_section("errors").unwrap();
    manager.rename_section("greetings", "messages").unwrap();

    let expected: Vec<String> = manager
        .sections()
        .iter()
        .map(|s| format!("{}.json", s))
        .collect::<std::collections::BTreeSet<_>>()
        .into_iter()
        .collect();
    for lang in manager.languages() {
        assert_eq!(section_files(&dir.path().join(lang)), expected, "language {}", lang);
    }
}

// =============================================================================
// Languages
// =============================================================================

#[test]
fn test_create_language_twice_fails() {
    let dir = generate_catalog(&["en"], &["messages"], &[]);
    let mut manager = LocalizationManager::open(dir.path()).unwrap();

    manager.create_language("de").unwrap();
    let err = manager.create_language("de").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::LangAlreadyExists);
    assert_eq!(manager.languages().len(), 2);
}

#[test]
fn test_rename_language_updates_inventory() {
    let dir = generate_catalog(&["en", "uk"], &["messages"], &[("hello", "Hi")]);
    let mut manager = LocalizationManager::open(dir.path()).unwrap();

    manager.rename_language("en-GB", "en").unwrap();
    assert_eq!(manager.languages(), ["en-GB", "uk"]);
    assert_eq!(manager.key("hello", "messages").unwrap()["en-GB"], "Hi");

    // The old name is no longer known
    assert_eq!(manager.rename_language("uk", "en").unwrap_err().kind(), ErrorKind::LangAlreadyExists);
    assert_eq!(manager.rename_language("fr", "en").unwrap_err().kind(), ErrorKind::LangDoesNotExist);
}

#[test]
fn test_delete_language_removes_everything() {
    let dir = generate_catalog(&["en", "uk"], &["errors", "messages"], &[("hello", "")]);
    let mut manager = LocalizationManager::open(dir.path()).unwrap();

    manager.delete_language("uk").unwrap();
    assert!(!dir.path().join("uk").exists());
    assert_eq!(manager.languages(), ["en"]);

    let err = manager.delete_language("uk").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::LangDoesNotExist);
}

// =============================================================================
// Sections
// =============================================================================

#[test]
fn test_create_section_conflict_mutates_nothing() {
    let dir = generate_catalog(&["en", "uk"], &["messages"], &[]);
    fs::write(dir.path().join("uk/errors.json"), "{}\n").unwrap();
    let mut manager = LocalizationManager::open(dir.path()).unwrap();

    let err = manager.create_section("errors").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SectionAlreadyExists);
    assert!(!err.is_partial());
    assert!(!dir.path().join("en/errors.json").exists());
    assert_eq!(manager.sections(), ["messages"]);
}

#[test]
fn test_delete_and_rename_section() {
    let dir = generate_catalog(&["en", "uk"], &["errors", "messages"], &[("hello", "Hi")]);
    let mut manager = LocalizationManager::open(dir.path()).unwrap();

    let outcome = manager.rename_section("greetings", "messages").unwrap();
    assert_eq!(outcome.targets, vec!["en", "uk"]);
    assert_eq!(manager.sections(), ["errors", "greetings"]);
    assert_eq!(manager.key("hello", "greetings").unwrap()["uk"], "Hi");

    manager.delete_section("errors").unwrap();
    assert_eq!(manager.sections(), ["greetings"]);
    assert!(!dir.path().join("en/errors.json").exists());
    assert!(!dir.path().join("uk/errors.json").exists());

    let err = manager.delete_section("errors").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SectionDoesNotExist);
}

#[test]
fn test_partial_fan_out_is_reported() {
    let dir = generate_catalog(&["en", "uk"], &["messages"], &[]);
    let mut manager = LocalizationManager::open(dir.path()).unwrap();

    // The cached inventory still lists "uk" after it disappears underneath
    fs::remove_dir_all(dir.path().join("uk")).unwrap();

    let err = manager.create_section("errors").unwrap_err();
    assert!(err.is_partial());
    match err {
        LocaleError::PartiallyApplied { operation, applied, failed, .. } => {
            assert_eq!(operation, "create_section");
            assert_eq!(applied, vec!["en"]);
            assert_eq!(failed, "uk");
        }
        other => panic!("Expected PartiallyApplied, got {:?}", other),
    }
    assert!(dir.path().join("en/errors.json").exists());
    assert_eq!(manager.sections(), ["messages"]);

    manager.refresh().unwrap();
    assert_eq!(manager.languages(), ["en"]);
    assert_eq!(manager.sections(), ["errors", "messages"]);
}

// =============================================================================
// Keys
// =============================================================================

#[test]
fn test_create_key_then_get() {
    let dir = generate_catalog(&["en", "pl", "uk"], &["messages"], &[]);
    let mut manager = LocalizationManager::open(dir.path()).unwrap();

    manager.create_key("hello", "messages").unwrap();
    let values = manager.key("hello", "messages").unwrap();
    assert_eq!(values.len(), 3);
    assert!(values.values().all(|v| v.is_empty()));
}

#[test]
fn test_set_value_is_language_specific() {
    let dir = generate_catalog(&["en", "uk"], &["messages"], &[("hello", "")]);
    let mut manager = LocalizationManager::open(dir.path()).unwrap();

    manager.set_value("hello", "Привіт", "messages", "uk").unwrap();
    let values = manager.key("hello", "messages").unwrap();
    assert_eq!(values["uk"], "Привіт");
    assert_eq!(values["en"], "");

    let err = manager.set_value("hello", "x", "messages", "fr").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::LangDoesNotExist);
    let err = manager.set_value("hello", "x", "errors", "en").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SectionDoesNotExist);
    let err = manager.set_value("bye", "x", "messages", "en").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::KeyNotFound);
}

#[test]
fn test_rename_missing_key_leaves_containers_unchanged() {
    let dir = generate_catalog(&["en", "uk"], &["messages"], &[("hello", "Hi"), ("bye", "Bye")]);
    let mut manager = LocalizationManager::open(dir.path()).unwrap();
    let before = manager.keys("en").unwrap();

    let err = manager.rename_key("farewell", "missing", "messages").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::KeyNotFound);
    assert_eq!(manager.keys("en").unwrap(), before);

    manager.rename_key("farewell", "bye", "messages").unwrap();
    assert_eq!(manager.key("farewell", "messages").unwrap()["uk"], "Bye");
    assert_eq!(manager.key("bye", "messages").unwrap_err().kind(), ErrorKind::KeyNotFound);
}

#[test]
fn test_key_missing_in_one_language_fails_whole_read() {
    let dir = generate_catalog(&["en", "uk"], &["messages"], &[("hello", "")]);
    fs::write(dir.path().join("uk/messages.json"), "{}\n").unwrap();
    let manager = LocalizationManager::open(dir.path()).unwrap();

    let err = manager.key("hello", "messages").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::KeyNotFound);
}

#[test]
fn test_delete_key_is_strict_and_prevalidated() {
    let dir = generate_catalog(&["en", "uk"], &["messages"], &[("hello", ""), ("bye", "")]);
    let mut manager = LocalizationManager::open(dir.path()).unwrap();

    manager.delete_key("bye", "messages").unwrap();
    let err = manager.delete_key("bye", "messages").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::KeyNotFound);

    // Missing in one language: no language is touched
    fs::write(dir.path().join("uk/messages.json"), "{}\n").unwrap();
    let err = manager.delete_key("hello", "messages").unwrap_err();
    assert!(!err.is_partial());
    assert!(manager.keys("en").unwrap()["messages"].contains_key("hello"));
}

#[test]
fn test_create_key_duplicate_in_one_language_mutates_nothing() {
    let dir = generate_catalog(&["en", "uk"], &["messages"], &[]);
    fs::write(dir.path().join("uk/messages.json"), "{\"hello\": \"\"}\n").unwrap();
    let mut manager = LocalizationManager::open(dir.path()).unwrap();

    let err = manager.create_key("hello", "messages").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::KeyAlreadyExists);
    assert!(manager.keys("en").unwrap()["messages"].is_empty());
}

// =============================================================================
// End to end
// =============================================================================

#[test]
fn test_new_language_replicates_schema() {
    let dir = generate_catalog(&["en", "uk"], &["messages"], &[("hello", "")]);
    let mut manager = LocalizationManager::open(dir.path()).unwrap();
    manager.set_value("hello", "Hello", "messages", "en").unwrap();

    let outcome = manager.create_language("pl").unwrap();
    assert_eq!(outcome.targets, vec!["messages"]);
    assert!(dir.path().join("pl/messages.json").is_file());
    assert_eq!(manager.sections(), ["messages"]);
    assert_eq!(manager.languages(), ["en", "uk", "pl"]);

    // Keys are copied, values are not
    let pl = manager.keys("pl").unwrap();
    assert_eq!(pl["messages"].get("hello").as_deref(), Some(""));

    manager.set_value("hello", "Welcome", "messages", "en").unwrap();
    let values = manager.key("hello", "messages").unwrap();
    assert_eq!(values["en"], "Welcome");
    assert_eq!(values["uk"], "");
    assert_eq!(values["pl"], "");
    assert_eq!(values.len(), 3);

    assert!(manager.audit().unwrap().is_consistent());
}
