//! CLI runner - resolves configuration and runs the fetch

use crate::cli::commands::{Cli, RecordsArg};
use crate::config::QueryConfig;
use crate::decode::RecordLocator;
use crate::engine::{FetchEngine, FetchResult};
use crate::error::{Error, Result};
use crate::pagination::OffsetPaginator;
use tracing::debug;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Build the effective query config: file (or defaults), then flags
    pub fn resolve_config(&self) -> Result<QueryConfig> {
        let mut config = match &self.cli.config {
            Some(path) => QueryConfig::from_file(path)?,
            None => QueryConfig::default(),
        };

        let cli = &self.cli;
        if let Some(endpoint) = &cli.endpoint {
            config.endpoint.clone_from(endpoint);
        }
        if let Some(token) = &cli.token {
            config.token = Some(token.clone());
        }
        if let Some(start_date) = cli.start_date {
            config.start_date = start_date;
        }
        if let Some(end_date) = cli.end_date {
            config.end_date = end_date;
        }
        if let Some(fields) = &cli.fields {
            config.fields.clone_from(fields);
        }
        if let Some(limit) = cli.limit {
            config.limit = limit;
        }
        if let Some(max_records) = cli.max_records {
            config.max_records = Some(max_records);
        }
        if let Some(timeout_secs) = cli.timeout_secs {
            config.timeout_secs = Some(timeout_secs);
        }
        if let Some(records) = cli.records {
            config.records = match records {
                RecordsArg::Root => RecordLocator::Root,
                RecordsArg::Envelope => RecordLocator::Envelope,
            };
        }
        if let Some(path) = &cli.records_path {
            config.records = RecordLocator::Path(path.clone());
        }

        config.validate()?;
        debug!(?config, "Resolved query config");
        Ok(config)
    }

    /// Fetch every page, printing progress and the final total to stdout
    pub async fn run(&self) -> Result<FetchResult> {
        let config = self.resolve_config()?;

        let mut engine =
            FetchEngine::from_query_config(&config)?.on_progress(|event| println!("{event}"));
        let paginator = OffsetPaginator::with_limit(config.limit);

        let result = engine
            .fetch_all(&config.endpoint, &config.base_params(), &paginator)
            .await;

        for line in summary_lines(&result) {
            println!("{line}");
        }
        Ok(result)
    }
}

/// Human-readable lines describing how a fetch ended
pub fn summary_lines(result: &FetchResult) -> Vec<String> {
    let mut lines = Vec::new();

    match result {
        FetchResult::Complete { .. } => {}
        FetchResult::Truncated { max_records, .. } => {
            lines.push(format!("Stopped after reaching {max_records} records"));
        }
        FetchResult::Failed { offset, error, .. } => {
            let line = if error.is_transport() {
                format!("Request failed at offset {offset}: {error}")
            } else if let Some(status) = error.status() {
                format!("Error: HTTP {status} at offset {offset}")
            } else {
                format!("Unreadable response at offset {offset}: {error}")
            };
            lines.push(line);
            if let Error::HttpStatus { body, .. } = error {
                if !body.is_empty() {
                    lines.push(body.clone());
                }
            }
        }
    }

    lines.push(String::new());
    lines.push(format!("Final Total Length: {}", result.total_count()));
    lines
}
