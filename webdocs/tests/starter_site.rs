use std::sync::Arc;

use webdocs::content_loader::load_site;
use webdocs::scaffold::{starter_paths, write_starter_site, ScaffoldError};
use webdocs::search::SearchEngine;

#[test]
fn test_init_writes_loadable_site() {
    let dir = tempfile::tempdir().unwrap();
    let written = write_starter_site(dir.path(), Some("My \"Docs\""), false).unwrap();
    assert_eq!(written, starter_paths().count());

    let site = load_site(dir.path()).unwrap();
    assert_eq!(site.config.site_title, "My \"Docs\"");

    let keys: Vec<_> = site.library.base_tree().keys().collect();
    assert_eq!(keys, vec!["javascript", "css"]);

    let engine = SearchEngine::new(Arc::new(site.library.clone()));
    let results = engine.search("closure", "en");
    assert_eq!(results[0].path, "/docs/javascript#closures");

    let results = engine.search("fermetures", "fr");
    assert_eq!(results[0].path, "/docs/javascript#les-fermetures");

    assert_eq!(site.catalog.translate("fr", "navigation.home"), "Accueil");
}

#[test]
fn test_init_refuses_non_empty_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("notes.txt"), "keep me").unwrap();

    let err = write_starter_site(dir.path(), None, false).unwrap_err();
    assert!(matches!(err, ScaffoldError::NotEmpty(_)));

    assert!(write_starter_site(dir.path(), None, true).is_ok());
    assert!(dir.path().join("notes.txt").exists());
}
