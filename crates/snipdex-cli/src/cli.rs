use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    version = env!("CARGO_PKG_VERSION"),
    about = "snipdex - A terminal reference catalog of code snippets",
    long_about = "snipdex shows categorized code snippets and copies them to the clipboard."
)]
pub struct Snipdex {
    #[clap(subcommand)]
    pub commands: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Browse the catalog in the terminal
    Browse {
        #[clap(long, short, help = "Category to open first")]
        category: Option<String>,
    },
    /// List all categories
    List,
    /// Print the snippets of a category
    Show {
        #[clap(help = "Category id, e.g. react or git")]
        category: String,
    },
    /// Copy a snippet to the clipboard
    Copy {
        #[clap(help = "Snippet id, e.g. git-amend")]
        snippet: String,
    },
    /// Open the documentation of a category in the browser
    Docs {
        #[clap(help = "Category id")]
        category: String,
    },
    /// Print the active catalog as JSON
    Export,
    /// Show the config file location and effective settings
    Config,
}
