use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "clipqual",
    version,
    about = "Clip qualifier matrix derivation and validation tooling"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Derive the editable row × category matrix from a document
    Matrix(MatrixArgs),
    /// Validate a document against an edited matrix, a CSV, or a second document
    Validate(ValidateArgs),
    /// Remove clips flagged against an edited matrix into a new document
    Filter(FilterArgs),
}

#[derive(Args, Debug, Clone)]
pub struct MatrixArgs {
    #[arg(long)]
    pub document: PathBuf,

    #[arg(long, default_value = "output")]
    pub output_dir: PathBuf,

    /// Initialize cells to the document's own presence instead of all false
    #[arg(long, default_value_t = false)]
    pub seed_presence: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    #[arg(long)]
    pub document: PathBuf,

    /// Edited matrix file (tabla_editable.json shape)
    #[arg(long)]
    pub matrix: Option<PathBuf>,

    /// CSV table with a row_name column plus one column per category
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Second document to compare against
    #[arg(long)]
    pub against: Option<PathBuf>,

    #[arg(long, default_value = "output")]
    pub output_dir: PathBuf,

    #[arg(long)]
    pub report_path: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
    #[arg(long)]
    pub document: PathBuf,

    /// Edited matrix file the document is validated against
    #[arg(long)]
    pub matrix: PathBuf,

    #[arg(long, default_value = "output")]
    pub output_dir: PathBuf,
}
