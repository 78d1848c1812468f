use serde::{Deserialize, Serialize};

/// A single copyable code sample
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    pub id: String,
    pub title: String,
    pub description: String,
    pub code: String,
    pub language: String,
}

impl Snippet {
    /// Number of lines in the snippet code
    pub fn line_count(&self) -> usize {
        self.code.lines().count()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TutorialLink {
    pub title: String,
    pub url: String,
}

/// One tab in the catalog: a language, framework or tool
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: String,
    pub docs_url: String,
    #[serde(default)]
    pub tutorials: Vec<TutorialLink>,
    pub snippets: Vec<Snippet>,
}

impl Category {
    pub fn snippet(&self, id: &str) -> Option<&Snippet> {
        self.snippets.iter().find(|snippet| snippet.id == id)
    }
}
