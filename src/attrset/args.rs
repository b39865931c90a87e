use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "attrset")]
#[command(about = "Build and render HTML element attributes", long_about = None)]
#[command(version = env!("ATTRSET_LONG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Options shared by every command that builds an attribute set.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// JSON file with initial attributes (an object of name -> value)
    #[arg(short, long)]
    pub from: Option<PathBuf>,

    /// Set an attribute, replacing its value (e.g. -s title="Hello world")
    #[arg(short, long = "set", value_name = "NAME=VALUE")]
    pub set: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the attribute string
    #[command(alias = "r")]
    Render {
        #[command(flatten)]
        build: BuildArgs,

        /// Add classes (applied after --set)
        #[arg(short, long = "add-class", value_name = "CLASSES")]
        add_class: Vec<String>,

        /// Remove classes (applied after --add-class)
        #[arg(short, long = "remove-class", value_name = "CLASSES")]
        remove_class: Vec<String>,

        /// Print stored values as JSON instead of the attribute string
        #[arg(long)]
        json: bool,
    },

    /// Check whether a class is present
    HasClass {
        /// The class to look for
        class: String,

        #[command(flatten)]
        build: BuildArgs,
    },

    /// Escape reserved characters in text
    Escape {
        /// Text to escape
        text: String,
    },

    /// Restore reserved characters from their entities
    Unescape {
        /// Text to unescape
        text: String,
    },
}
