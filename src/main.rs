//! telelog - Tabular Telemetry Log Tool
//!
//! Prints the machinery report for a telemetry file: sorted, searched and
//! filtered rows followed by the registered alerts.

use anyhow::Result;
use clap::{value_parser, Arg, ArgMatches, Command};
use std::path::PathBuf;
use telelog::{Application, RunConfig};

fn cli() -> Command {
    Command::new("telelog")
        .version(telelog::VERSION)
        .about("Sort, search and filter whitespace-delimited telemetry logs")
        .long_about(
            "telelog reads a telemetry file of whitespace-separated columns and prints \
             rows matching a keyword and rows above a numeric threshold, followed by \
             priority-grouped alerts. Column indices are zero-based.",
        )
        .arg(
            Arg::new("file")
                .help("Telemetry file to read, or '-' for standard input")
                .value_parser(value_parser!(PathBuf))
                .index(1),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_name("PATH")
                .help("TOML configuration file")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("sort-column")
                .long("sort-column")
                .value_name("INDEX")
                .help("Column to sort by")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("search-column")
                .long("search-column")
                .value_name("INDEX")
                .help("Column compared against the keyword")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("keyword")
                .long("keyword")
                .short('k')
                .help("Exact token to search for"),
        )
        .arg(
            Arg::new("filter-column")
                .long("filter-column")
                .value_name("INDEX")
                .help("Numeric column for the threshold filter")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("threshold")
                .long("threshold")
                .short('t')
                .help("Keep rows whose filter column is greater than this")
                .allow_negative_numbers(true)
                .value_parser(value_parser!(f64)),
        )
}

/// Explicit `--config` file, else the per-user config file if present, else defaults.
#[cfg(feature = "config")]
fn base_config(matches: &ArgMatches) -> Result<RunConfig> {
    use anyhow::Context;

    let path = match matches.get_one::<PathBuf>("config") {
        Some(path) => path.clone(),
        None => match RunConfig::default_path().filter(|path| path.is_file()) {
            Some(path) => path,
            None => return Ok(RunConfig::default()),
        },
    };

    RunConfig::load(&path).with_context(|| format!("failed to load config {}", path.display()))
}

#[cfg(not(feature = "config"))]
fn base_config(matches: &ArgMatches) -> Result<RunConfig> {
    if matches.get_one::<PathBuf>("config").is_some() {
        anyhow::bail!("telelog was built without the `config` feature");
    }
    Ok(RunConfig::default())
}

/// Defaults, then the config file, then command-line flags.
fn resolve_config(matches: &ArgMatches) -> Result<RunConfig> {
    let mut config = base_config(matches)?;

    if let Some(file) = matches.get_one::<PathBuf>("file") {
        config.source = file.clone();
    }
    if let Some(&column) = matches.get_one::<usize>("sort-column") {
        config.sort_column = column;
    }
    if let Some(&column) = matches.get_one::<usize>("search-column") {
        config.search_column = column;
    }
    if let Some(keyword) = matches.get_one::<String>("keyword") {
        config.keyword = keyword.clone();
    }
    if let Some(&column) = matches.get_one::<usize>("filter-column") {
        config.filter_column = column;
    }
    if let Some(&threshold) = matches.get_one::<f64>("threshold") {
        config.threshold = threshold;
    }

    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (RUST_LOG controls verbosity)
    env_logger::init();

    let matches = cli().get_matches();
    let config = resolve_config(&matches)?;

    let app = Application::new(config);
    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    let mut out = stdout.lock();
    let mut diagnostics = stderr.lock();

    app.run(&mut out, &mut diagnostics).await?;

    Ok(())
}
