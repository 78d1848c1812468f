use crate::cli::Commands;
use snipdex_core::{
    config::get_config_file_path, copy_snippet_and_hold, open_url, Catalog, ClipboardSink, Config,
    Result, SnipdexError, SystemClipboard,
};
use snipdex_ui::display_catalog_browser;
use std::io::{self, Write};

pub fn handle_command(command: Option<Commands>, config: &Config) -> Result<()> {
    let mut out = io::stdout();
    if command == Some(Commands::Config) {
        return show_config(&mut out, config);
    }

    let catalog = Catalog::load_configured(config)?;
    match command {
        // Default: show the browser when no command is provided
        None => display_catalog_browser(&catalog, config, None),
        Some(Commands::Browse { category }) => {
            display_catalog_browser(&catalog, config, category.as_deref())
        }
        Some(Commands::List) => list_categories(&mut out, &catalog),
        Some(Commands::Show { category }) => show_category(&mut out, &catalog, &category),
        Some(Commands::Copy { snippet }) => {
            let mut clipboard = SystemClipboard::new()?;
            copy_by_id(&mut out, &mut clipboard, &catalog, &snippet)
        }
        Some(Commands::Docs { category }) => {
            let category = catalog
                .category(&category)
                .ok_or_else(|| SnipdexError::category_not_found(&category))?;
            open_url(&category.docs_url)
        }
        Some(Commands::Export) => {
            writeln!(out, "{}", catalog.to_json_pretty()?)?;
            Ok(())
        }
        Some(Commands::Config) => show_config(&mut out, config),
    }
}

pub fn list_categories(out: &mut impl Write, catalog: &Catalog) -> Result<()> {
    for category in catalog.iter() {
        writeln!(
            out,
            "{:<12} {:<12} {:>3} snippets",
            category.id,
            category.name,
            category.snippets.len()
        )?;
    }
    Ok(())
}

pub fn show_category(out: &mut impl Write, catalog: &Catalog, id: &str) -> Result<()> {
    let category = catalog
        .category(id)
        .ok_or_else(|| SnipdexError::category_not_found(id))?;

    writeln!(out, "{} - {}", category.name, category.description)?;
    writeln!(out, "Docs: {}", category.docs_url)?;
    for tutorial in &category.tutorials {
        writeln!(out, "Tutorial: {} <{}>", tutorial.title, tutorial.url)?;
    }
    for snippet in &category.snippets {
        writeln!(out)?;
        writeln!(out, "[{}] {} ({})", snippet.id, snippet.title, snippet.language)?;
        if !snippet.description.is_empty() {
            writeln!(out, "{}", snippet.description)?;
        }
        for line in snippet.code.lines() {
            writeln!(out, "    {}", line)?;
        }
    }
    Ok(())
}

pub fn copy_by_id(
    out: &mut impl Write,
    clipboard: &mut impl ClipboardSink,
    catalog: &Catalog,
    id: &str,
) -> Result<()> {
    let (_, snippet) = catalog
        .find_snippet(id)
        .ok_or_else(|| SnipdexError::snippet_not_found(id))?;
    copy_snippet_and_hold(clipboard, snippet)?;
    writeln!(out, "Copied '{}' to clipboard", snippet.title)?;
    Ok(())
}

pub fn show_config(out: &mut impl Write, config: &Config) -> Result<()> {
    writeln!(out, "Config file: {}", get_config_file_path().display())?;
    writeln!(out, "scroll_speed_multiplier: {}", config.scroll_speed_multiplier)?;
    match &config.catalog_path {
        Some(path) => writeln!(out, "catalog_path: {}", path.display())?,
        None => writeln!(out, "catalog_path: (builtin)")?,
    }
    writeln!(out, "log_level: {}", config.log_level)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_category() {
        let catalog = Catalog::builtin().unwrap();
        let mut out = Vec::new();
        list_categories(&mut out, &catalog).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), catalog.len());
        assert!(text.lines().next().unwrap().starts_with("react"));
    }

    #[test]
    fn shows_category_snippets_with_code() {
        let catalog = Catalog::builtin().unwrap();
        let mut out = Vec::new();
        show_category(&mut out, &catalog, "git").unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Git - "));
        assert!(text.contains("[git-undo-commit] Undo last commit (bash)"));
        assert!(text.contains("    git reset --soft HEAD~1"));
    }

    #[test]
    fn unknown_category_is_not_found() {
        let catalog = Catalog::builtin().unwrap();
        let err = show_category(&mut Vec::new(), &catalog, "cobol").unwrap_err();
        assert_eq!(err.to_string(), "Category 'cobol' not found");
    }

    #[derive(Default)]
    struct RecordingClipboard {
        written: Vec<String>,
        held: Vec<String>,
    }

    impl ClipboardSink for RecordingClipboard {
        fn write(&mut self, text: &str) -> Result<()> {
            self.written.push(text.to_string());
            Ok(())
        }

        fn write_and_hold(&mut self, text: &str) -> Result<()> {
            self.held.push(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn copy_command_holds_clipboard_content() {
        let catalog = Catalog::builtin().unwrap();
        let mut clipboard = RecordingClipboard::default();
        let mut out = Vec::new();
        copy_by_id(&mut out, &mut clipboard, &catalog, "git-undo-commit").unwrap();

        assert_eq!(clipboard.held, vec!["git reset --soft HEAD~1".to_string()]);
        assert!(clipboard.written.is_empty());
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Copied 'Undo last commit' to clipboard\n"
        );
    }

    #[test]
    fn copy_unknown_snippet_leaves_clipboard_alone() {
        let catalog = Catalog::builtin().unwrap();
        let mut clipboard = RecordingClipboard::default();
        let err = copy_by_id(&mut Vec::new(), &mut clipboard, &catalog, "nope").unwrap_err();
        assert!(matches!(err, SnipdexError::NotFound { .. }));
        assert!(clipboard.held.is_empty());
    }

    #[test]
    fn config_output_names_builtin_catalog() {
        let mut out = Vec::new();
        show_config(&mut out, &Config::default()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("scroll_speed_multiplier: 2"));
        assert!(text.contains("catalog_path: (builtin)"));
    }
}
