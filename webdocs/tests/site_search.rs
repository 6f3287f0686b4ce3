use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use webdocs::content_loader::{load_site, LoadError, Site};
use webdocs::controller::{DisplayState, QueryController};
use webdocs::navigation::NavigationTarget;
use webdocs::search::SearchEngine;

fn fixture_site() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/site")
}

fn load_fixture() -> Site {
    load_site(&fixture_site()).expect("fixture site should load")
}

fn engine(site: &Site) -> Arc<SearchEngine> {
    Arc::new(
        SearchEngine::new(Arc::new(site.library.clone()))
            .with_excerpt_length(site.config.search.excerpt_length),
    )
}

#[test]
fn test_fixture_site_loads() {
    let site = load_fixture();
    let base = site.library.base_tree();

    // The category without sections and the malformed section are skipped
    let keys: Vec<_> = base.keys().collect();
    assert_eq!(keys, vec!["javascript", "css"]);
    assert_eq!(base.section_count(), 4);

    let parallel: Vec<_> = site.library.parallel_languages().map(|l| l.to_string()).collect();
    assert_eq!(parallel, vec!["de"]);
    assert_eq!(site.config.search.excerpt_length, 150);
}

#[test]
fn test_search_base_language_with_colliding_titles() {
    let site = load_fixture();
    let results = engine(&site).search("closure", "en");

    let paths: Vec<_> = results.iter().map(|r| r.path.as_str()).collect();
    assert_eq!(paths, vec!["/docs/javascript#closures", "/docs/javascript#closures-1"]);
    let indexes: Vec<_> = results.iter().map(|r| r.section_index).collect();
    assert_eq!(indexes, vec![0, 2]);
    assert_eq!(results[0].content, "A closure captures variables....");
}

#[test]
fn test_search_per_field_translation() {
    let site = load_fixture();
    let results = engine(&site).search("closure", "fr");

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].title, "Fermetures");
    assert_eq!(results[0].path, "/docs/javascript#fermetures");
    assert_eq!(results[0].content, "A closure captures variables....");
    assert_eq!(results[1].path, "/docs/javascript#closures");

    let results = engine(&site).search("BOUCLE", "fr");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].path, "/docs/javascript#boucle-d-v-nements");
    assert_eq!(results[0].section_index, 1);
}

#[test]
fn test_search_parallel_tree() {
    let site = load_fixture();
    let engine = engine(&site);

    let results = engine.search("erfasst", "de");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].path, "/docs/javascript#closures");

    // The parallel tree is the whole document set for its language
    assert!(engine.search("grid", "de").is_empty());
    assert_eq!(engine.search("grid", "it").len(), 1);
}

#[test]
fn test_search_is_repeatable() {
    let site = load_fixture();
    let engine = engine(&site);
    assert_eq!(engine.search("e", "en"), engine.search("e", "en"));
    assert!(engine.search("", "en").is_empty());
}

#[test]
fn test_controller_debounce_over_site() {
    let site = load_fixture();
    let t0 = Instant::now();
    let mut controller =
        QueryController::new(engine(&site), "en").with_debounce(site.config.debounce());

    controller.input("g", t0);
    controller.input("gr", t0 + Duration::from_millis(50));
    controller.input("gri", t0 + Duration::from_millis(80));

    let mut fired = 0;
    for ms in (0..=1000).step_by(10) {
        if controller.poll(t0 + Duration::from_millis(ms)) {
            fired += 1;
            assert!(ms >= 380, "scan fired too early at {}ms", ms);
        }
    }

    assert_eq!(fired, 1);
    assert_eq!(controller.scanned_query(), Some("gri"));
    assert_eq!(controller.display_state(), DisplayState::HasResults);

    let target = controller.select(0).unwrap();
    assert_eq!(target.path(), "/docs/css#grid");
}

#[test]
fn test_controller_states_over_site() {
    let site = load_fixture();
    let controller = QueryController::new(engine(&site), "en").with_initial_query("xyz-no-match");
    assert_eq!(controller.display_state(), DisplayState::NoResults);

    let controller = QueryController::new(engine(&site), "en").with_initial_query("");
    assert_eq!(controller.display_state(), DisplayState::Idle);
}

#[test]
fn test_result_navigation_round_trip() {
    let site = load_fixture();
    let results = engine(&site).search("callbacks", "en");
    assert_eq!(results.len(), 1);

    let set = site.library.document_set("en");
    let located = results[0].target().locate(&set).unwrap();
    assert_eq!(located.section, Some(1));

    let legacy = NavigationTarget::parse("/docs/javascript/event-loop").unwrap();
    assert_eq!(legacy.locate(&set).unwrap().section, Some(1));
}

#[test]
fn test_catalog_fallback() {
    let site = load_fixture();
    assert_eq!(site.catalog.translate("fr", "navigation.search"), "Rechercher");
    assert_eq!(site.catalog.translate("fr", "navigation.home"), "Home");
    assert_eq!(site.catalog.translate("fr", "navigation.contribute"), "navigation.contribute");
}

#[test]
fn test_missing_config_is_an_error() {
    let missing = fixture_site().join("docs");
    let err = load_site(&missing).unwrap_err();
    assert!(matches!(err, LoadError::ConfigError(_, _)));
}
