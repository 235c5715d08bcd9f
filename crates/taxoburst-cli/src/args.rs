use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint};

/// Parse, search, lay out and render AI-safety risk taxonomies as sunburst charts.
#[derive(Parser, Debug)]
#[command(name = "taxoburst")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// JSON file with configuration overrides, deep-merged onto the defaults
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse the CSV export and print the taxonomy tree as JSON
    Parse {
        #[arg(value_hint = ValueHint::FilePath)]
        input: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Print the items matching a case-insensitive query
    Search {
        #[arg(value_hint = ValueHint::FilePath)]
        input: PathBuf,

        query: String,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Print the computed chart layout as JSON
    Layout {
        #[arg(value_hint = ValueHint::FilePath)]
        input: PathBuf,

        #[command(flatten)]
        view: ViewArgs,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Render the chart as SVG
    Render {
        #[arg(value_hint = ValueHint::FilePath)]
        input: PathBuf,

        #[command(flatten)]
        view: ViewArgs,

        /// SVG root element id
        #[arg(long)]
        id: Option<String>,

        /// Output file (default: stdout)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        out: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ViewArgs {
    /// Node to select, as `Category`, `Category/Subcategory` or `Category/Subcategory/Item`
    #[arg(short, long)]
    pub select: Option<String>,

    /// Search query applied as a visibility mask
    #[arg(short, long, default_value = "")]
    pub query: String,

    #[arg(long, default_value_t = 800.0)]
    pub width: f64,

    #[arg(long, default_value_t = 800.0)]
    pub height: f64,
}

#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Pretty-print JSON
    #[arg(long)]
    pub pretty: bool,

    /// Output file (default: stdout)
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub out: Option<PathBuf>,
}
