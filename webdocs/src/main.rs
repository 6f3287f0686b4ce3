//! webdocs - community documentation search tool
//!
//! A CLI for searching and browsing a documentation site made of
//! categorized HTML sections with optional translations.

#![deny(unsafe_code)]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::all))]
#![allow(clippy::module_name_repetitions)]

mod cli;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use webdocs::content_loader::{load_site, Site};
use webdocs::controller::{DisplayState, QueryController};
use webdocs::html_text::strip_tags;
use webdocs::library::{DocumentSet, ResolvedCategory};
use webdocs::navigation::NavigationTarget;
use webdocs::scaffold;
use webdocs::search::SearchEngine;
use webdocs::slug::slugify;

/// Main entry point for the webdocs CLI application
fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}

/// Run the CLI application
fn run() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match cli.command {
        Commands::Init { path, force, title } => {
            handle_init_command(path, force, title)?;
        }

        Commands::Search {
            query,
            site,
            lang,
            json,
        } => {
            handle_search_command(&query, &site, lang, json)?;
        }

        Commands::Open {
            path,
            site,
            lang,
            index,
        } => {
            handle_open_command(&path, &site, lang, index)?;
        }

        Commands::List { site, lang } => {
            handle_list_command(&site, lang)?;
        }

        Commands::Translate { key, site, lang } => {
            handle_translate_command(&key, &site, lang)?;
        }

        Commands::Check { site } => {
            handle_check_command(&site)?;
        }
    }

    Ok(())
}

/// Load a site, attaching the directory to any error
fn load(site: &Path) -> Result<Site> {
    load_site(site).with_context(|| format!("Failed to load site from {}", site.display()))
}

/// Requested language, or the site's base language
fn display_language(site: &Site, lang: Option<String>) -> String {
    lang.unwrap_or_else(|| site.config.base_language.to_string())
}

/// Interface string from the catalog, or `default` if the key is missing
fn ui_string<'a>(site: &'a Site, lang: &str, key: &'a str, default: &'a str) -> &'a str {
    match site.catalog.translate(lang, key) {
        found if found == key => default,
        found => found,
    }
}

/// Handle the init command
fn handle_init_command(path: Option<PathBuf>, force: bool, title: Option<String>) -> Result<()> {
    let target_path = path.unwrap_or_else(|| PathBuf::from("."));

    println!("Initializing documentation site");
    println!("Target path: {}", target_path.display());

    let files_created = scaffold::write_starter_site(&target_path, title.as_deref(), force)
        .with_context(|| format!("Failed to initialize {}", target_path.display()))?;

    println!("\n✓ Successfully created {} files", files_created);
    println!("\nNext steps:");
    println!("  1. Edit webdocs.toml to configure your site");
    println!("  2. Add categories as docs/NN_<category>.toml");
    println!("  3. Run 'webdocs search <query>' to try the search");

    Ok(())
}

/// Handle the search command
fn handle_search_command(query: &str, site_dir: &Path, lang: Option<String>, json: bool) -> Result<()> {
    let site = load(site_dir)?;
    let lang = display_language(&site, lang);

    let engine = SearchEngine::new(Arc::new(site.library.clone()))
        .with_excerpt_length(site.config.search.excerpt_length);
    let controller = QueryController::new(Arc::new(engine), lang.as_str())
        .with_debounce(site.config.debounce())
        .with_initial_query(query);

    if json {
        let output = serde_json::to_string_pretty(controller.current_results())
            .context("Failed to serialize search results")?;
        println!("{}", output);
        return Ok(());
    }

    match controller.display_state() {
        DisplayState::Idle => {
            println!(
                "{}",
                ui_string(&site, &lang, "search.startTyping", "Start typing to search...")
            );
        }
        DisplayState::NoResults => {
            println!(
                "{} \"{}\"",
                ui_string(&site, &lang, "search.noResults", "No results found for"),
                controller.current_query()
            );
        }
        DisplayState::HasResults => {
            for result in controller.current_results() {
                println!("[{}] {}", result.category, result.title);
                println!("    {}", result.path);
                println!("    {}", result.content);
                println!();
            }
            println!("{} result(s)", controller.current_results().len());
        }
    }

    Ok(())
}

/// Handle the open command
fn handle_open_command(
    path: &str,
    site_dir: &Path,
    lang: Option<String>,
    index: Option<usize>,
) -> Result<()> {
    let site = load(site_dir)?;
    let lang = display_language(&site, lang);
    let set = site.library.document_set(&lang);

    let mut target = NavigationTarget::parse(path)?;
    if let Some(index) = index {
        target = target.with_section_index(index);
    }
    let located = target
        .locate(&set)
        .with_context(|| format!("Failed to open {}", path))?;

    println!("# {}", located.category.title);

    let Some(section_index) = located.section else {
        print_category_outline(&located.category);
        return Ok(());
    };

    let section = &located.category.sections[section_index];
    println!("\n## {}  (#{})\n", section.title, section.anchor);
    println!("{}", strip_tags(section.content).trim());

    if let Some(code) = &section.section.code {
        println!("\n```\n{}\n```", code.trim_end());
    }

    if let Some(preview) = &section.section.preview {
        println!("\n{}:", ui_string(&site, &lang, "documentation.common.preview", "Preview"));
        if let Some(output) = &preview.output {
            println!("{}", output);
        }
        if let Some(html) = &preview.html {
            println!("{}", strip_tags(html));
        }
    }

    Ok(())
}

/// Handle the list command
fn handle_list_command(site_dir: &Path, lang: Option<String>) -> Result<()> {
    let site = load(site_dir)?;
    let lang = display_language(&site, lang);
    let set = site.library.document_set(&lang);

    println!("{} ({})", site.config.site_title, set.language());
    for category in set.categories() {
        println!("\n{} - {}", category.key, category.title);
        print_category_outline(&category);
    }

    Ok(())
}

/// Handle the translate command
fn handle_translate_command(key: &str, site_dir: &Path, lang: Option<String>) -> Result<()> {
    let site = load(site_dir)?;
    let lang = display_language(&site, lang);
    println!("{}", site.catalog.translate(&lang, key));
    Ok(())
}

/// Handle the check command
fn handle_check_command(site_dir: &Path) -> Result<()> {
    let site = load(site_dir)?;
    let mut issues = Vec::new();

    for language in site.config.display_languages() {
        let set = site.library.document_set(language.as_str());
        issues.extend(check_anchors(&set));
    }

    let base = site.library.document_set(site.config.base_language.as_str());
    for language in site.config.display_languages() {
        if language == site.config.base_language {
            continue;
        }
        if site.library.parallel_languages().any(|l| *l == language) {
            let parallel = site.library.document_set(language.as_str());
            issues.extend(check_parallel_structure(&base, &parallel));
        } else {
            issues.extend(check_translations(&base, language.as_str()));
        }
    }

    if issues.is_empty() {
        println!("✓ No issues found");
        return Ok(());
    }

    for issue in &issues {
        println!("  - {}", issue);
    }
    anyhow::bail!("{} issue(s) found", issues.len());
}

/// Print the sections of a category with their paths
fn print_category_outline(category: &ResolvedCategory<'_>) {
    for section in &category.sections {
        println!(
            "  [{}] {}  {}",
            section.index,
            section.title,
            NavigationTarget::path_for(category.key, &section.anchor)
        );
    }
}

/// Report anchors that differ from the plain slug of their title
fn check_anchors(set: &DocumentSet<'_>) -> Vec<String> {
    let mut issues = Vec::new();
    for category in set.categories() {
        for section in &category.sections {
            let slug = slugify(section.title);
            if slug.is_empty() {
                issues.push(format!(
                    "[{}] {}[{}] '{}' has no slug characters; anchored as #{}",
                    set.language(),
                    category.key,
                    section.index,
                    section.title,
                    section.anchor
                ));
            } else if slug != section.anchor {
                issues.push(format!(
                    "[{}] {}[{}] '{}' collides with an earlier section; anchored as #{}",
                    set.language(),
                    category.key,
                    section.index,
                    section.title,
                    section.anchor
                ));
            }
        }
    }
    issues
}

/// Report sections with no translated title or content for `language`
fn check_translations(base: &DocumentSet<'_>, language: &str) -> Vec<String> {
    let Ok(lang) = webdocs::Language::parse(language) else {
        return Vec::new();
    };

    let mut issues = Vec::new();
    for category in base.categories() {
        for section in &category.sections {
            let translation = section.section.translations.get(&lang);
            let missing: Vec<&str> = [
                ("title", translation.and_then(|t| t.title.as_ref()).is_none()),
                ("content", translation.and_then(|t| t.content.as_ref()).is_none()),
            ]
            .into_iter()
            .filter_map(|(field, missing)| missing.then_some(field))
            .collect();

            if !missing.is_empty() {
                issues.push(format!(
                    "[{}] {}#{} has no translated {}",
                    lang,
                    category.key,
                    section.anchor,
                    missing.join(" or ")
                ));
            }
        }
    }
    issues
}

/// Report categories and sections whose shape differs from the base tree
fn check_parallel_structure(base: &DocumentSet<'_>, parallel: &DocumentSet<'_>) -> Vec<String> {
    let mut issues = Vec::new();
    for category in base.categories() {
        match parallel.category(category.key) {
            None => issues.push(format!(
                "[{}] category '{}' is missing from the parallel tree",
                parallel.language(),
                category.key
            )),
            Some(other) if other.sections.len() != category.sections.len() => {
                issues.push(format!(
                    "[{}] category '{}' has {} sections, base has {}",
                    parallel.language(),
                    category.key,
                    other.sections.len(),
                    category.sections.len()
                ))
            }
            Some(_) => {}
        }
    }
    for key in parallel.tree().keys() {
        if base.tree().get(key).is_none() {
            issues.push(format!(
                "[{}] category '{}' does not exist in the base tree",
                parallel.language(),
                key
            ));
        }
    }
    issues
}
