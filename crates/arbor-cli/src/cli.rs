use std::path::PathBuf;

use arbor_format::Format;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "arbor",
    about = "Arbor: structured three-way merge for JSON, YAML and TOML documents",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Driver configuration file (defaults to ./.arbor.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Merge two descendants of a common base; writes the result into OURS
    Merge(MergeArgs),
    /// Show the structural edits from one document to another
    Diff(DiffArgs),
    /// Print a document with sequence element identities filled in
    Annotate(AnnotateArgs),
}

/// Options shared by every command that reads documents.
#[derive(Args, Clone, Debug, Default)]
pub struct DocumentArgs {
    /// Document format (inferred from the file extension when omitted)
    #[arg(long)]
    pub format: Option<Format>,
    /// Field identifying sequence elements; repeat to try several in order
    #[arg(long = "id-field", value_name = "FIELD")]
    pub id_fields: Vec<String>,
    /// Field name reserved for rendered identities
    #[arg(long, value_name = "FIELD")]
    pub reserved_field: Option<String>,
}

#[derive(Args)]
pub struct MergeArgs {
    pub ours: PathBuf,
    pub base: PathBuf,
    pub theirs: PathBuf,
    /// Path of the document in the repository (git's %P), used for format detection
    #[arg(long)]
    pub path: Option<PathBuf>,
    /// Write the result here instead of into OURS
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    #[arg(long, default_value = "text")]
    pub report: ReportFormat,
    #[command(flatten)]
    pub document: DocumentArgs,
}

#[derive(Args)]
pub struct DiffArgs {
    pub old: PathBuf,
    pub new: PathBuf,
    #[arg(long, default_value = "text")]
    pub report: ReportFormat,
    #[command(flatten)]
    pub document: DocumentArgs,
}

#[derive(Args)]
pub struct AnnotateArgs {
    pub file: PathBuf,
    #[command(flatten)]
    pub document: DocumentArgs,
}
