#![forbid(unsafe_code)]

mod args;

use std::io::Write as _;
use std::path::Path;

use args::{Cli, Commands, OutputArgs, ViewArgs};
use clap::Parser;
use serde::Serialize;
use taxoburst_core::{Engine, NodeKey, TaxoburstConfig, TaxonomyTree};
use taxoburst_render::search::matching_items;
use taxoburst_render::svg::{SvgRenderOptions, render_chart_svg};
use taxoburst_render::{LayoutOptions, ViewState, layout_chart};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

#[derive(Debug)]
enum CliError {
    Usage(String),
    Io(std::io::Error),
    Data(taxoburst_core::Error),
    Render(taxoburst_render::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Data(err) => write!(f, "{err}"),
            CliError::Render(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<taxoburst_core::Error> for CliError {
    fn from(value: taxoburst_core::Error) -> Self {
        Self::Data(value)
    }
}

impl From<taxoburst_render::Error> for CliError {
    fn from(value: taxoburst_render::Error) -> Self {
        match value {
            taxoburst_render::Error::Core(err) => Self::Data(err),
            other => Self::Render(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl CliError {
    fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => 2,
            CliError::Render(taxoburst_render::Error::Layout(_)) => 3,
            _ => 1,
        }
    }
}

fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(filter);

    // A second init (e.g. from tests) is harmless.
    let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
}

fn load_config(path: Option<&Path>) -> Result<TaxoburstConfig, CliError> {
    let Some(path) = path else {
        return Ok(TaxoburstConfig::defaults());
    };
    let text = std::fs::read_to_string(path)?;
    let overrides: serde_json::Value = serde_json::from_str(&text)?;
    if !overrides.is_object() {
        return Err(CliError::Usage(format!(
            "config file {} must contain a JSON object",
            path.display()
        )));
    }
    tracing::info!(path = %path.display(), "loaded configuration overrides");
    Ok(TaxoburstConfig::with_overrides(&overrides))
}

fn load_tree(engine: &Engine, input: &Path) -> Result<TaxonomyTree, CliError> {
    let tree = futures::executor::block_on(engine.load_taxonomy(input))?;
    tracing::info!(
        categories = tree.categories.len(),
        items = tree.item_count,
        "parsed taxonomy"
    );
    Ok(tree)
}

fn view_state(view: &ViewArgs) -> Result<ViewState, CliError> {
    let selection = match view.select.as_deref() {
        None => None,
        Some(path) => Some(NodeKey::from_path(path).ok_or_else(|| {
            CliError::Usage(format!(
                "invalid selection `{path}` (expected Category[/Subcategory[/Item]])"
            ))
        })?),
    };
    if !(view.width.is_finite() && view.width > 0.0 && view.height.is_finite() && view.height > 0.0)
    {
        return Err(CliError::Usage(format!(
            "viewport must be positive, got {}x{}",
            view.width, view.height
        )));
    }
    Ok(ViewState {
        selection,
        query: view.query.clone(),
        width: view.width,
        height: view.height,
    })
}

fn write_output(out: Option<&Path>, bytes: &[u8]) -> Result<(), CliError> {
    match out {
        Some(path) => std::fs::write(path, bytes)?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(bytes)?;
            if !bytes.ends_with(b"\n") {
                stdout.write_all(b"\n")?;
            }
        }
    }
    Ok(())
}

fn write_json<T: Serialize>(value: &T, output: &OutputArgs) -> Result<(), CliError> {
    let text = if output.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    write_output(output.out.as_deref(), text.as_bytes())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchOutput<'a> {
    query: &'a str,
    count: usize,
    items: Vec<&'a taxoburst_core::Item>,
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(cli.config.as_deref())?;
    let engine = Engine::new().with_config(config.clone());

    match cli.command {
        Commands::Parse { input, output } => {
            let tree = load_tree(&engine, &input)?;
            write_json(&tree, &output)
        }
        Commands::Search {
            input,
            query,
            output,
        } => {
            let tree = load_tree(&engine, &input)?;
            let items = matching_items(&tree, &query);
            write_json(
                &SearchOutput {
                    query: &query,
                    count: items.len(),
                    items,
                },
                &output,
            )
        }
        Commands::Layout {
            input,
            view,
            output,
        } => {
            let tree = load_tree(&engine, &input)?;
            let options = LayoutOptions::from_config(&config)?;
            let layout = layout_chart(&tree, &view_state(&view)?, &options)?;
            write_json(&layout, &output)
        }
        Commands::Render {
            input,
            view,
            id,
            out,
        } => {
            let tree = load_tree(&engine, &input)?;
            let options = LayoutOptions::from_config(&config)?;
            let layout = layout_chart(&tree, &view_state(&view)?, &options)?;
            let svg = render_chart_svg(
                &layout,
                &SvgRenderOptions {
                    diagram_id: id,
                    ..SvgRenderOptions::default()
                },
            );
            write_output(out.as_deref(), svg.as_bytes())
        }
    }
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("{err}");
        std::process::exit(err.exit_code());
    }
}
