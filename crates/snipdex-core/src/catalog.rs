use crate::config::Config;
use crate::error::{Result, SnipdexError};
use crate::models::{Category, Snippet};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.json");

/// Ordered, read-only collection of categories.
///
/// Category ids are unique within the catalog and snippet ids are unique
/// across every category. Both are checked on construction.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    pub fn new(categories: Vec<Category>) -> Result<Catalog> {
        let catalog = Catalog { categories };
        catalog.check_integrity()?;
        Ok(catalog)
    }

    /// The catalog shipped with the binary
    pub fn builtin() -> Result<Catalog> {
        Catalog::from_json(BUILTIN_CATALOG)
    }

    pub fn from_json(content: &str) -> Result<Catalog> {
        let catalog: Catalog = serde_json::from_str(content)?;
        catalog.check_integrity()?;
        Ok(catalog)
    }

    /// Load a user catalog file
    pub fn load(path: &Path) -> Result<Catalog> {
        let content = fs::read_to_string(path)?;
        let catalog = Catalog::from_json(&content)?;
        tracing::info!(
            "Loaded catalog from {} ({} categories)",
            path.display(),
            catalog.len()
        );
        Ok(catalog)
    }

    /// Load the user catalog named in `config`, or the builtin one
    pub fn load_configured(config: &Config) -> Result<Catalog> {
        match &config.catalog_path {
            Some(path) => Catalog::load(path),
            None => Catalog::builtin(),
        }
    }

    fn check_integrity(&self) -> Result<()> {
        if self.categories.is_empty() {
            return Err(SnipdexError::EmptyCatalog);
        }

        let mut category_ids = HashSet::new();
        let mut snippet_ids = HashSet::new();
        for category in &self.categories {
            if !category_ids.insert(category.id.as_str()) {
                return Err(SnipdexError::DuplicateId {
                    kind: "category",
                    id: category.id.clone(),
                });
            }
            for snippet in &category.snippets {
                if !snippet_ids.insert(snippet.id.as_str()) {
                    return Err(SnipdexError::DuplicateId {
                        kind: "snippet",
                        id: snippet.id.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    pub fn category_at(&self, index: usize) -> Option<&Category> {
        self.categories.get(index)
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    /// Position of the category with the given id
    pub fn position(&self, id: &str) -> Option<usize> {
        self.categories.iter().position(|category| category.id == id)
    }

    /// Find a snippet anywhere in the catalog along with its category
    pub fn find_snippet(&self, id: &str) -> Option<(&Category, &Snippet)> {
        self.categories.iter().find_map(|category| {
            category
                .snippet(id)
                .map(|snippet| (category, snippet))
        })
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(SnipdexError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snippet(id: &str) -> Snippet {
        Snippet {
            id: id.to_string(),
            title: format!("{id} title"),
            description: String::new(),
            code: "echo hi".to_string(),
            language: "bash".to_string(),
        }
    }

    fn category(id: &str, snippets: Vec<Snippet>) -> Category {
        Category {
            id: id.to_string(),
            name: id.to_uppercase(),
            description: String::new(),
            docs_url: "https://example.com".to_string(),
            tutorials: vec![],
            snippets,
        }
    }

    #[test]
    fn builtin_catalog_loads() {
        let catalog = Catalog::builtin().unwrap();
        assert!(catalog.len() >= 4);
        for id in ["react", "typescript", "sql", "git"] {
            assert!(catalog.category(id).is_some(), "missing category {id}");
        }
        assert!(catalog.iter().all(|category| !category.snippets.is_empty()));
    }

    #[test]
    fn rejects_duplicate_category_ids() {
        let err = Catalog::new(vec![
            category("git", vec![snippet("a")]),
            category("git", vec![snippet("b")]),
        ])
        .unwrap_err();
        assert!(matches!(err, SnipdexError::DuplicateId { kind: "category", .. }));
    }

    #[test]
    fn rejects_duplicate_snippet_ids_across_categories() {
        let err = Catalog::new(vec![
            category("git", vec![snippet("shared")]),
            category("sql", vec![snippet("shared")]),
        ])
        .unwrap_err();
        match err {
            SnipdexError::DuplicateId { kind, id } => {
                assert_eq!(kind, "snippet");
                assert_eq!(id, "shared");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_empty_catalog() {
        assert!(matches!(
            Catalog::new(vec![]).unwrap_err(),
            SnipdexError::EmptyCatalog
        ));
    }

    #[test]
    fn finds_snippet_with_its_category() {
        let catalog = Catalog::new(vec![
            category("git", vec![snippet("git-status")]),
            category("sql", vec![snippet("sql-select"), snippet("sql-join")]),
        ])
        .unwrap();

        let (category, snippet) = catalog.find_snippet("sql-join").unwrap();
        assert_eq!(category.id, "sql");
        assert_eq!(snippet.id, "sql-join");
        assert_eq!(catalog.position("sql"), Some(1));
        assert!(catalog.find_snippet("nope").is_none());
    }

    #[test]
    fn tutorials_default_to_empty() {
        let json = r#"{
            "categories": [{
                "id": "git",
                "name": "Git",
                "description": "",
                "docs_url": "https://git-scm.com/doc",
                "snippets": []
            }]
        }"#;
        let catalog = Catalog::from_json(json).unwrap();
        assert!(catalog.category_at(0).unwrap().tutorials.is_empty());
    }
}
