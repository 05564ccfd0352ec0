use crate::config::Config;
use crate::output::{write_result, OutputFormat};
use clap::{Args, Subcommand};
use simtap_core::targets::{identifiers, load_target_list};
use simtap_core::transform::{aggregate, move_column_first};
use simtap_core::types::TabularResult;
use simtap_core::QueryService;
use simtap_query::{
    describe_columns, id_exists, list_available_tables, validate_query, CrossMatchRunner, TracingObserver,
};
use simtap_tap::TapClient;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Cross-match a target list against SIMBAD
    Crossmatch(CrossmatchArgs),
    /// List the tables published by the service
    Tables(OutputArgs),
    /// Describe the columns of one table
    Describe {
        table: String,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Check whether an identifier is known to SIMBAD
    Exists {
        identifier: String,
        /// Prefix prepended to the identifier (defaults to the configured one)
        #[arg(long)]
        prefix: Option<String>,
    },
    /// Run one raw ADQL query
    Query {
        adql: String,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Debug, Args)]
pub struct OutputArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Tsv)]
    pub format: OutputFormat,
    /// Write to this file instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct CrossmatchArgs {
    /// Whitespace-delimited target list with a header line
    #[arg(long)]
    pub targets: PathBuf,
    /// Column of the target list holding the source identifiers
    #[arg(long)]
    pub column: Option<String>,
    #[arg(long)]
    pub prefix: Option<String>,
    /// Column used to merge duplicate matches
    #[arg(long)]
    pub group_by: Option<String>,
    /// Keep every returned row instead of merging duplicates
    #[arg(long)]
    pub no_group: bool,
    #[command(flatten)]
    pub output: OutputArgs,
}

pub async fn run(command: Command, config: &Config) -> anyhow::Result<()> {
    let client = TapClient::new(config.tap_options())?;
    match command {
        Command::Crossmatch(args) => crossmatch(&client, config, args).await,
        Command::Tables(output) => {
            let tables = list_available_tables(&client).await?;
            emit(&tables, &output)
        }
        Command::Describe { table, output } => {
            let columns = describe_columns(&client, &table).await?;
            emit(&columns, &output)
        }
        Command::Exists { identifier, prefix } => {
            let prefix = prefix.unwrap_or_else(|| config.crossmatch.id_prefix.clone());
            let full_id = format!("{prefix}{identifier}");
            let found = id_exists(&client, &full_id).await;
            println!("{full_id}\t{found}");
            Ok(())
        }
        Command::Query { adql, output } => {
            validate_query(&adql)?;
            let result = client.execute_query(&adql).await?;
            emit(&result, &output)
        }
    }
}

pub(crate) async fn crossmatch<S>(service: &S, config: &Config, args: CrossmatchArgs) -> anyhow::Result<()>
where
    S: QueryService + ?Sized,
{
    let column = args.column.as_deref().unwrap_or(&config.crossmatch.id_column);
    let prefix = args.prefix.as_deref().unwrap_or(&config.crossmatch.id_prefix);
    let join_key = args.group_by.as_deref().unwrap_or(&config.crossmatch.join_key);

    let targets = load_target_list(&args.targets)?;
    let ids = identifiers(&targets, column)?;
    info!("Querying SIMBAD for {} source(s)", ids.len());

    let report = CrossMatchRunner::new(service, &TracingObserver)
        .run_batch_report(&ids, prefix)
        .await;
    if !report.failures.is_empty() {
        warn!("{} of {} queries failed", report.failures.len(), ids.len());
    }

    let result = arrange(report.result, join_key, !args.no_group)?;
    emit(&result, &args.output)
}

/// Merges duplicates on `join_key` (or only moves it first) for non-empty results.
pub fn arrange(result: TabularResult, join_key: &str, group: bool) -> anyhow::Result<TabularResult> {
    if result.columns.is_empty() {
        return Ok(result);
    }
    let arranged = if group {
        aggregate(&result, join_key)?
    } else {
        move_column_first(&result, join_key)?
    };
    Ok(arranged)
}

fn emit(result: &TabularResult, output: &OutputArgs) -> anyhow::Result<()> {
    match &output.output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            write_result(&mut writer, result, output.format)?;
            writer.flush()?;
            info!("wrote {} row(s) to {}", result.len(), path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            write_result(&mut lock, result, output.format)?;
        }
    }
    Ok(())
}
