//! Command-line front end for `vouch-core`.
//!
//! Queries, checks and compares JSON or YAML documents the way contract
//! test expectations do, using exit codes a test runner can rely on:
//! `0` when the expectation holds, `1` when it does not, `2` on usage or I/O
//! errors.

mod logging;

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::Value as JsonValue;
use tracing::{debug, warn};
use vouch_core::format::{format, FormatConfig, Value};
use vouch_core::query::Expected;
use vouch_core::{
    CompareMode, CompareOptions, Engine, Node, DEFAULT_MAX_BYTES, DEFAULT_MAX_LINES,
};

use crate::logging::LogFormat;

#[derive(Debug, Parser)]
#[command(name = "vouch", version, about = "Query and compare JSON and YAML documents.")]
struct Cli {
    /// Read inputs as YAML instead of JSON.
    #[arg(long, global = true)]
    yaml: bool,

    /// Log debug events to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Write log events as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Resolve PATH exactly and print the value it reaches.
    Query(QueryArgs),
    /// Check that EXPECTED is found at PATH; a leading `~` searches recursively.
    Check(CheckArgs),
    /// Compare an expected document against an actual one.
    Compare(CompareArgs),
    /// Print the canonical rendering of a document.
    Render(RenderArgs),
}

#[derive(Debug, Args)]
struct QueryArgs {
    /// Dotted path, e.g. `items.0.id` or `items.size()`.
    path: String,
    /// Document to read; stdin when omitted.
    file: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct CheckArgs {
    /// Dotted path, optionally prefixed with `~`.
    path: String,
    /// Expected value as JSON; text that is not JSON is taken as a string.
    expected: String,
    /// Document to read; stdin when omitted.
    file: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct CompareArgs {
    /// Also report content only present in ACTUAL.
    #[arg(long)]
    strict: bool,
    /// Stop reporting after this many rendered bytes.
    #[arg(long, default_value_t = DEFAULT_MAX_BYTES)]
    max_bytes: usize,
    /// Stop reporting after this many rendered lines.
    #[arg(long, default_value_t = DEFAULT_MAX_LINES)]
    max_lines: usize,
    /// Expected document.
    expected: PathBuf,
    /// Actual document; stdin when omitted.
    actual: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct RenderArgs {
    /// Annotate containers and named types.
    #[arg(long)]
    types: bool,
    /// Annotate primitive kinds as well.
    #[arg(long)]
    primitive_types: bool,
    /// Render JSON-style.
    #[arg(long)]
    json: bool,
    /// Document to read; stdin when omitted.
    file: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Outcome {
    Pass,
    Fail,
}

impl Outcome {
    fn code(self) -> i32 {
        match self {
            Self::Pass => 0,
            Self::Fail => 1,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let format = if cli.log_json { LogFormat::Json } else { LogFormat::Text };
    logging::init(format, cli.verbose);

    match run(&cli) {
        Ok(outcome) => std::process::exit(outcome.code()),
        Err(err) => {
            let _ = writeln!(io::stderr(), "error: {err:#}");
            std::process::exit(2);
        }
    }
}

fn run(cli: &Cli) -> Result<Outcome> {
    let engine = Engine::new();
    match &cli.command {
        Command::Query(args) => run_query(&engine, args, cli.yaml),
        Command::Check(args) => run_check(&engine, args, cli.yaml),
        Command::Compare(args) => run_compare(args, cli.yaml),
        Command::Render(args) => run_render(args, cli.yaml),
    }
}

fn run_query(engine: &Engine, args: &QueryArgs, yaml: bool) -> Result<Outcome> {
    let doc = load(args.file.as_deref(), yaml)?;
    let path = engine.parse_path(&args.path);
    debug!(path = %path, mode = %path.mode(), "parsed path");
    match engine.resolve(&doc, &path) {
        Ok(value) => {
            let text = serde_json::to_string_pretty(&value.to_json_value())
                .context("failed to serialize resolved value")?;
            emit(&format!("{text}\n"))?;
            Ok(Outcome::Pass)
        }
        Err(err) => {
            emit(&format!("{err}\n"))?;
            Ok(Outcome::Fail)
        }
    }
}

fn run_check(engine: &Engine, args: &CheckArgs, yaml: bool) -> Result<Outcome> {
    let doc = load(args.file.as_deref(), yaml)?;
    let expected = parse_expected(&args.expected)?;
    let result = engine.check(&doc, &args.path, &expected);
    if result.found {
        return Ok(Outcome::Pass);
    }
    match (&result.error, &result.value) {
        (Some(err), _) => emit(&format!("{err}\n"))?,
        (None, Some(actual)) => emit(&format!("expected {expected}, got {actual}\n"))?,
        (None, None) => emit(&format!("expected {expected} not found\n"))?,
    }
    Ok(Outcome::Fail)
}

fn run_compare(args: &CompareArgs, yaml: bool) -> Result<Outcome> {
    let expected = load(Some(&args.expected), yaml).context("failed to load expected document")?;
    let actual = load(args.actual.as_deref(), yaml).context("failed to load actual document")?;
    let mode = if args.strict { CompareMode::Strict } else { CompareMode::Partial };
    let options = CompareOptions::default()
        .with_mode(mode)
        .with_max_bytes(args.max_bytes)
        .and_then(|opts| opts.with_max_lines(args.max_lines))?;

    let report = expected.diff(&actual, &options);
    if report.is_truncated() {
        warn!(kept = report.len(), "diff report truncated at its size cap");
    }
    emit(&report.render())?;
    Ok(if report.is_empty() { Outcome::Pass } else { Outcome::Fail })
}

fn run_render(args: &RenderArgs, yaml: bool) -> Result<Outcome> {
    let doc = load(args.file.as_deref(), yaml)?;
    let config = if args.json {
        FormatConfig::json()
    } else {
        FormatConfig::default().with_show_type(args.types || args.primitive_types)
    }
    .with_primitive_types(args.primitive_types);
    emit(&format!("{}\n", format(&Value::from(&doc), &config)))?;
    Ok(Outcome::Pass)
}

fn parse_expected(raw: &str) -> Result<Expected> {
    let value = serde_json::from_str(raw).unwrap_or_else(|_| JsonValue::String(raw.to_string()));
    Expected::from_json_value(value).context("invalid expected value")
}

fn load(file: Option<&Path>, yaml: bool) -> Result<Node> {
    let text = match file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).context("failed to read stdin")?;
            buffer
        }
    };
    let node = if yaml { Node::from_yaml_str(&text)? } else { Node::from_json_str(&text)? };
    Ok(node)
}

fn emit(text: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes()).context("failed to write output")?;
    stdout.flush().context("failed to flush output")
}
