//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Binary and N-ary tree traversals on encoded trees
#[derive(Parser, Debug)]
#[command(name = "arbor")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output: -d info, -dd debug, -ddd trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file layered over the global config
    #[arg(short, long, global = true, env = "ARBOR_CONFIG", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Binary tree operations on a preorder encoding like `1,2,#,#,3,#,#`
    Binary {
        #[command(subcommand)]
        command: BinaryCommands,
    },

    /// N-ary tree operations on a TOML file
    Nary {
        #[command(subcommand)]
        command: NaryCommands,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum BinaryCommands {
    /// Shortest root-to-leaf path length
    MinDepth {
        /// Encoded tree
        #[arg(allow_hyphen_values = true)]
        tree: String,
    },

    /// Longest root-to-leaf path length
    MaxDepth {
        /// Encoded tree
        #[arg(allow_hyphen_values = true)]
        tree: String,
    },

    /// Largest sum along any path
    MaxSum {
        /// Encoded tree
        #[arg(allow_hyphen_values = true)]
        tree: String,
    },

    /// Smallest value greater than a bound
    NextLarger {
        /// Encoded tree
        #[arg(allow_hyphen_values = true)]
        tree: String,
        /// Exclusive lower bound
        #[arg(allow_hyphen_values = true)]
        bound: i64,
    },

    /// Check whether two nodes (given by value) are cousins
    Cousins {
        /// Encoded tree
        #[arg(allow_hyphen_values = true)]
        tree: String,
        /// Value of the first node
        #[arg(allow_hyphen_values = true)]
        a: i64,
        /// Value of the second node
        #[arg(allow_hyphen_values = true)]
        b: i64,
    },

    /// Lowest common ancestor of two nodes (given by value)
    Lca {
        /// Encoded tree
        #[arg(allow_hyphen_values = true)]
        tree: String,
        /// Value of the first node
        #[arg(allow_hyphen_values = true)]
        a: i64,
        /// Value of the second node
        #[arg(allow_hyphen_values = true)]
        b: i64,
    },

    /// Print leaf values
    Leaves {
        /// Encoded tree
        #[arg(allow_hyphen_values = true)]
        tree: String,
    },

    /// Re-encode in canonical form
    Serialize {
        /// Encoded tree
        #[arg(allow_hyphen_values = true)]
        tree: String,
    },

    /// Show as tree
    Show {
        /// Encoded tree
        #[arg(allow_hyphen_values = true)]
        tree: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum NaryCommands {
    /// Sum of all values
    Sum {
        /// TOML tree file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Count of even values
    Evens {
        /// TOML tree file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Count of values greater than a bound
    Greater {
        /// TOML tree file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Exclusive lower bound
        #[arg(allow_hyphen_values = true)]
        bound: i64,
    },

    /// Longest root-to-leaf path length
    Depth {
        /// TOML tree file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Print leaf values
    Leaves {
        /// TOML tree file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Show as tree
    Show {
        /// TOML tree file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Print a commented config template
    Template,
    /// Show global config path
    Path,
}
