pub mod cli;
pub mod config;
pub mod output;

use std::io::{self, Write};

use anyhow::Context;
use inspectarr_arr::{ArrClient, Granularity, MediaSource, Radarr, Sonarr};
use inspectarr_query::{OperationKind, QueryEngine};
use tracing::debug;

use crate::cli::{Cli, Command, OutputFormat};
use crate::config::Service;
use crate::output::{OutputOptions, Printer, stats};

/// Resolve the connection for the chosen service and inspect it.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let env = |var: &str| std::env::var(var).ok();

    match cli.command {
        Command::Radarr(args) => {
            let config = config::resolve(Service::Radarr, &args.service, env)?;
            let source = Radarr::new(ArrClient::new(config));
            let mut printer = Printer::new(io::stdout(), OutputOptions::from(&args.output));
            inspect(&source, args.query.as_deref().unwrap_or_default(), &mut printer).await
        }
        Command::Sonarr(args) => {
            let config = config::resolve(Service::Sonarr, &args.service, env)?;
            let granularity = Granularity::from_flags(args.by_season, args.by_episode);
            let source = Sonarr::new(ArrClient::new(config), granularity);
            let mut printer = Printer::new(io::stdout(), OutputOptions::from(&args.output));
            inspect(&source, args.query.as_deref().unwrap_or_default(), &mut printer).await
        }
    }
}

/// Fetch, filter, transform and print the media of `source`.
pub async fn inspect<S, W>(source: &S, query: &str, printer: &mut Printer<W>) -> anyhow::Result<()>
where
    S: MediaSource,
    W: Write,
{
    printer.info("Fetching media...")?;
    let rows = source.normalized_rows().await?;

    let engine = QueryEngine::new(source.schema());
    let parsed = engine
        .parse(query)
        .with_context(|| format!("failed to parse query '{query}'"))?;

    let filtered = engine.apply_filter(&rows, &parsed.filter);
    debug!(rows = rows.len(), matched = filtered.len(), "applied filter");

    // JSON consumers get every field
    let parsed = match printer.options().format {
        OutputFormat::Json => parsed.without_operation(OperationKind::Exclude),
        OutputFormat::Md => parsed,
    };
    let transformed = engine
        .apply_operations(&filtered, &parsed.operations)
        .with_context(|| format!("failed to apply operations to media with query '{query}'"))?;

    printer.info(&format!("{} has: {}", source.name(), stats(&rows)))?;
    if transformed.len() != rows.len() {
        printer.info(&format!("The query matched: {}", stats(&transformed)))?;
    }
    if transformed.is_empty() {
        return Ok(());
    }

    printer.info("")?;
    printer.print_rows(source.schema(), &transformed)?;
    Ok(())
}
