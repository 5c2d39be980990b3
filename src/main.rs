use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, ValueEnum};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use tracing::debug;

use goviz::core::{validate_exclude_pattern, GoList, GraphBuilder, ResolveConfig, ResolveError};
use goviz::formatters::{DotFormatter, JsonCompactFormatter, MetricsFormatter};

#[derive(Debug, Clone, Parser)]
#[command(
    name = "goviz",
    version = "0.1.0",
    author = "goviz developers",
    about = "Plot the import graph of a Go package"
)]
struct Cli {
    /// Import path or directory of the package to start from
    #[arg(short, long, value_name = "PACKAGE")]
    input: String,

    /// Output file, or STDOUT / STDERR
    #[arg(short, long, value_name = "FILE", default_value = "STDOUT")]
    output: String,

    /// Max plot depth of the dependency tree
    #[arg(short, long, default_value_t = 128)]
    depth: usize,

    /// Hide packages with no files
    #[arg(short = 'n', long)]
    hide_no_files: bool,

    /// Plot the packages that depend on this one instead
    #[arg(short, long, value_name = "PACKAGE")]
    focus: Option<String>,

    /// Only expand imports under this prefix, SELF for the input package
    #[arg(short, long, value_name = "PREFIX", default_value = "")]
    search: String,

    /// Exclude files whose path matches this regex
    #[arg(short = 'x', long, value_name = "REGEX", default_value = "")]
    exclude: String,

    /// Plot skipped packages as leaf nodes
    #[arg(short, long)]
    leaf: bool,

    /// Print package metrics instead of a graph
    #[arg(short, long)]
    metrics: bool,

    /// Limit file names displayed per package
    #[arg(short = 'e', long, default_value_t = 2147483647)]
    files_shown: usize,

    /// Include _test.go and _example.go files
    #[arg(short = 't', long)]
    tests: bool,

    /// Indent json-compact output
    #[arg(long)]
    pretty: bool,

    /// Output format: dot, metrics, json-compact
    #[arg(long, value_name = "FORMAT", value_enum, default_value_t = OutputFormat::Dot)]
    format: OutputFormat,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
#[value(rename_all = "kebab-case")]
enum OutputFormat {
    Dot,
    Metrics,
    JsonCompact,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    let go = GoList::new();
    let input = go.package_from_path(&cli.input);
    let search = go.package_from_path(&cli.search);

    validate_exclude_pattern(&cli.exclude)
        .map_err(|err| anyhow!("-x or --exclude should be a valid regexp: {err}"))?;

    let config = ResolveConfig::new(input.clone())
        .with_seek_path(search)
        .with_exclude_file(cli.exclude.clone())
        .with_plot_leaf(cli.leaf)
        .with_tests(cli.tests);
    debug!("resolving with {config:?}");

    let mut builder = match GraphBuilder::with_go_list(&config) {
        Ok(builder) => builder,
        Err(ResolveError::RootUnresolved(_)) => {
            bail!("{input} does not exist.\n go get {input}")
        }
        Err(err) => return Err(err.into()),
    };

    let root = builder.root();
    if !root.has_files() {
        bail!("{} has no .go files", root.import_path());
    }

    let format = if cli.metrics {
        OutputFormat::Metrics
    } else {
        cli.format
    };

    let mut output = open_output(&cli.output)?;

    match format {
        OutputFormat::Metrics => {
            MetricsFormatter::new().format(builder.graph(), &mut output)?;
        }
        OutputFormat::JsonCompact => {
            JsonCompactFormatter::new()
                .with_pretty(cli.pretty)
                .format(builder.graph(), builder.root_id(), &mut output)?;
        }
        OutputFormat::Dot => {
            let reversed = cli.focus.is_some();
            let start = match &cli.focus {
                Some(focus) => builder.focus(focus)?,
                None => builder.root_id(),
            };

            DotFormatter::new()
                .with_max_depth(cli.depth)
                .with_hide_no_files(cli.hide_no_files)
                .with_reversed(reversed)
                .with_seek_path(builder.filter().seek_path())
                .with_files_shown(cli.files_shown)
                .format(builder.graph(), start, &mut output)?;
        }
    }

    output.flush()?;
    Ok(())
}

fn open_output(name: &str) -> Result<Box<dyn Write>> {
    Ok(match name {
        "STDOUT" => Box::new(BufWriter::new(io::stdout())),
        "STDERR" => Box::new(io::stderr()),
        path => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("failed to create {path}"))?,
        )),
    })
}
