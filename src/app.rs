//! Application orchestration layer
//!
//! Drives one report run: describe the machinery states, load the telemetry,
//! sort, search, filter, then flush the alert register. Output and diagnostics
//! go to caller-supplied writers so a run can be captured.

use crate::alert::AlertRegister;
use crate::config::RunConfig;
use crate::error::{Result, TelelogError};
use crate::machinery::MachineryState;
use crate::parser::load_or_empty;
use crate::query::{search, sort_by_column, try_filter};
use crate::table::Table;
use std::io::Write;

/// Counts and recovered errors from one run.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub rows_loaded: usize,
    pub matches: usize,
    pub filtered: usize,
    pub alerts: usize,
    /// Why the source could not be read, if it could not
    pub load_error: Option<TelelogError>,
    /// Predicate failure that aborted the filter stage
    pub filter_error: Option<TelelogError>,
}

/// Application orchestrator
pub struct Application {
    config: RunConfig,
}

impl Application {
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Run the report, writing it to `out` and recovered failures to `diagnostics`.
    ///
    /// An unreadable source or a non-numeric filter token is reported and the
    /// run continues. Only failures to write output are returned as errors.
    pub async fn run<W, E>(&self, out: &mut W, diagnostics: &mut E) -> Result<RunSummary>
    where
        W: Write,
        E: Write,
    {
        let config = &self.config;
        let mut summary = RunSummary::default();

        for state in MachineryState::ALL {
            writeln!(out, "{}", state.describe())?;
        }

        let source_spec = config.source_spec();
        let source = source_spec.open();
        let report = load_or_empty(source.as_ref()).await;
        if let Some(error) = &report.error {
            writeln!(diagnostics, "Error: {error}")?;
        }
        summary.load_error = report.error;
        let mut logs = report.table;
        summary.rows_loaded = logs.len();
        log::info!("loaded {} rows from {}", logs.len(), source_spec);

        writeln!(out, "Sorting logs by column {}...", config.sort_column)?;
        sort_by_column(&mut logs, config.sort_column);

        writeln!(
            out,
            "Searching for logs with keyword '{}' in column {}...",
            config.keyword, config.search_column
        )?;
        let error_logs = search(&logs, &config.keyword, config.search_column);
        summary.matches = error_logs.len();
        write!(out, "{error_logs}")?;

        writeln!(
            out,
            "Filtering logs where column {} > {}...",
            config.filter_column, config.threshold
        )?;
        let threshold = config.threshold();
        let filtered_logs = match try_filter(&logs, |row| threshold.try_matches(row)) {
            Ok(table) => table,
            Err(error) => {
                log::debug!("filter aborted: {error}");
                writeln!(diagnostics, "Error: {error}")?;
                summary.filter_error = Some(error);
                Table::new()
            }
        };
        summary.filtered = filtered_logs.len();
        write!(out, "{filtered_logs}")?;

        let mut register = AlertRegister::new();
        for seed in &config.alerts {
            register.add(seed.priority, seed.message.as_str());
        }
        register.write_to(out)?;
        summary.alerts = register.len();

        log::debug!(
            "run complete: {} matches, {} filtered, {} alerts",
            summary.matches,
            summary.filtered,
            summary.alerts
        );
        Ok(summary)
    }
}
