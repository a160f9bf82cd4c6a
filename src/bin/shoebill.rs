//! Command-line interface for shoebill
//! Parses a markup file (or a program carrying markup in its comments), writes the job
//! table and executable next to it, and prints the submit description the scheduler
//! would receive.
//!
//! Usage:
//!   shoebill `<path>`                          - Parse a markup file
//!   shoebill --executable `<path>`             - Parse markup from the comments of a program
//!   shoebill `<path>` --format json            - Print the full parse result as JSON
//!
//! Logging goes to stderr and is controlled with `SHOEBILL_LOG` (e.g. `SHOEBILL_LOG=debug`).

use clap::{Arg, ArgAction, ArgMatches, Command};
use serde::Serialize;
use shoebill::shoebill::artifacts::JobArtifacts;
use shoebill::shoebill::comments::HostLanguage;
use shoebill::shoebill::config::{Loader, ShoebillConfig};
use shoebill::shoebill::processor::{ParsedJob, Processor, SourceMode};
use shoebill::shoebill::submit::{submit_job, DryRunBackend, SubmissionHandle};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const LOCAL_CONFIG: &str = "shoebill.toml";

fn main() {
    init_tracing();

    let matches = Command::new("shoebill")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Turn Shoebill section markup into a job submit description")
        .arg(
            Arg::new("path")
                .help("Path to the markup file or program")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("executable")
                .long("executable")
                .short('x')
                .help("Treat the input file as a program and extract markup from its comments")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("language")
                .long("language")
                .help("Host language of the program (with --executable); defaults to comments.language"),
        )
        .arg(
            Arg::new("workdir")
                .long("workdir")
                .short('C')
                .help("Directory the table and executable are written to")
                .default_value("."),
        )
        .arg(
            Arg::new("cleanup")
                .long("cleanup")
                .help("Remove the table file after the dry run")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format: text, json or yaml")
                .value_parser(["text", "json", "yaml"])
                .default_value("text"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the built-in defaults (default: <workdir>/shoebill.toml if present)"),
        )
        .get_matches();

    if let Err(message) = run(&matches) {
        eprintln!("Error: {}", message);
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("SHOEBILL_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Serialize)]
struct Report<'a> {
    #[serde(flatten)]
    job: &'a ParsedJob,
    table_path: &'a Path,
    exec_path: Option<&'a Path>,
    submission: &'a SubmissionHandle,
}

fn run(matches: &ArgMatches) -> Result<(), String> {
    let path = PathBuf::from(required(matches, "path")?);
    let workdir = required(matches, "workdir")?;
    let config = load_config(matches.get_one::<String>("config"), workdir)?;
    let processor = Processor::new(&config).map_err(|e| e.to_string())?;

    let mode = if matches.get_flag("executable") {
        let language = match matches.get_one::<String>("language") {
            Some(name) => name.parse::<HostLanguage>()?,
            None => config.comments.language,
        };
        SourceMode::HostSource(language)
    } else {
        SourceMode::Markup
    };

    let job = processor
        .parse_file(&path, mode)
        .map_err(|e| e.to_string())?;
    let (artifacts, handle) = submit_job(&job, &DryRunBackend, workdir, &config.artifacts)
        .map_err(|e| e.to_string())?;

    print!("{}", render(&job, &artifacts, &handle, required(matches, "format")?)?);

    if matches.get_flag("cleanup") {
        artifacts.cleanup().map_err(|e| e.to_string())?;
    }
    Ok(())
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a str, String> {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .ok_or_else(|| format!("missing argument: {}", name))
}

/// An explicit `--config` file must exist; otherwise `<workdir>/shoebill.toml` is used when present.
fn load_config(path: Option<&String>, workdir: &str) -> Result<ShoebillConfig, String> {
    let loader = match path {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new().with_optional_file(Path::new(workdir).join(LOCAL_CONFIG)),
    };
    loader.build().map_err(|e| e.to_string())
}

fn render(
    job: &ParsedJob,
    artifacts: &JobArtifacts,
    handle: &SubmissionHandle,
    format: &str,
) -> Result<String, String> {
    let report = Report {
        job,
        table_path: artifacts.table_path(),
        exec_path: artifacts.exec_path(),
        submission: handle,
    };
    match format {
        "json" => serde_json::to_string_pretty(&report)
            .map(|json| format!("{}\n", json))
            .map_err(|e| e.to_string()),
        "yaml" => serde_yaml::to_string(&report).map_err(|e| e.to_string()),
        _ => Ok(format!("{}\n", job.template())),
    }
}
