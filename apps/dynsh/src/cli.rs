//! Command-line and shell command grammar.
//!
//! The same [`ShellCommand`] grammar is used for one-shot invocations
//! (`dynsh --table users query -k "pk = 'a'"`) and for lines typed into the
//! interactive shell.

use clap::{Args, Parser, Subcommand};
use dynsh_core::DynshConfig;
use dynsh_core::request::{DeleteArgs, GetArgs, PutArgs, QueryArgs, ScanArgs, UpdateArgs};
use dynsh_model::{ReturnConsumedCapacity, ReturnValue, Select};

/// Process arguments.
#[derive(Debug, Parser)]
#[command(name = "dynsh", version)]
#[command(about = "Interactive DynamoDB shell with inline expression syntax", long_about = None)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// The region to use (overrides `AWS_REGION`).
    #[arg(long)]
    pub region: Option<String>,

    /// Override the default endpoint URL.
    #[arg(long)]
    pub endpoint_url: Option<String>,

    /// Log level filter (overrides `LOG_LEVEL`; `RUST_LOG` wins over both).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log translated expressions.
    #[arg(short, long)]
    pub verbose: bool,

    /// Table to select before running the command or starting the shell.
    #[arg(short, long)]
    pub table: Option<String>,

    /// Run a single command instead of starting the shell.
    #[command(subcommand)]
    pub command: Option<ShellCommand>,
}

impl Cli {
    /// Apply command-line overrides on top of `config`.
    #[must_use]
    pub fn overlay(&self, mut config: DynshConfig) -> DynshConfig {
        if let Some(region) = &self.region {
            config.region.clone_from(region);
        }
        if let Some(endpoint_url) = &self.endpoint_url {
            config.endpoint_url = Some(endpoint_url.clone());
        }
        if let Some(log_level) = &self.log_level {
            config.log_level.clone_from(log_level);
        }
        config.verbose |= self.verbose;
        config
    }
}

/// One line typed into the shell.
#[derive(Debug, Parser)]
#[command(name = "dynsh", no_binary_name = true, disable_help_subcommand = true)]
#[command(disable_version_flag = true)]
pub struct ShellLine {
    /// The command.
    #[command(subcommand)]
    pub command: ShellCommand,
}

/// Commands understood by the shell.
#[derive(Debug, Subcommand)]
pub enum ShellCommand {
    /// Select the table subsequent commands operate on.
    Use {
        /// Table name.
        table: String,
    },
    /// Describe the selected table.
    #[command(alias = "describe")]
    Desc,
    /// Query the selected table by key condition.
    Query(QueryOpts),
    /// Scan the selected table.
    Scan(ScanOpts),
    /// Get one item by primary key.
    Get(GetOpts),
    /// Put (insert or replace) one item.
    Put(PutOpts),
    /// Update one item by primary key.
    Update(UpdateOpts),
    /// Delete one item by primary key.
    Delete(DeleteOpts),
    /// Show the available commands.
    Help,
    /// Leave the shell.
    #[command(aliases = ["quit", "q"])]
    Exit,
}

// ---------------------------------------------------------------------------
// Read options
// ---------------------------------------------------------------------------

/// Options shared by `query` and `scan`.
#[derive(Debug, Clone, Default, Args)]
pub struct ReadOpts {
    /// Projection expression, e.g. `pk, info.tags[0]`.
    #[arg(short, long)]
    pub projection: Option<String>,

    /// Filter expression.
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Index name.
    #[arg(short, long)]
    pub index: Option<String>,

    /// Use a strongly consistent read.
    #[arg(short, long)]
    pub consistent_read: bool,

    /// Return consumed capacity: INDEXES, TOTAL or NONE.
    #[arg(short = 'r', long = "return-consumed-capacity")]
    pub return_consumed_capacity: Option<ReturnConsumedCapacity>,

    /// Attributes to return: ALL_ATTRIBUTES, ALL_PROJECTED_ATTRIBUTES,
    /// SPECIFIC_ATTRIBUTES or COUNT.
    #[arg(short, long)]
    pub select: Option<Select>,

    /// Maximum number of items to evaluate.
    #[arg(short, long)]
    pub limit: Option<i32>,
}

/// Options of `query`.
#[derive(Debug, Clone, Args)]
pub struct QueryOpts {
    /// Key condition expression, e.g. `pk = 'a' AND sk > 10`.
    #[arg(short, long)]
    pub key: String,

    /// Traverse the index in descending order.
    #[arg(short, long)]
    pub no_scan_index_forward: bool,

    /// Shared read options.
    #[command(flatten)]
    pub read: ReadOpts,
}

impl From<QueryOpts> for QueryArgs {
    fn from(opts: QueryOpts) -> Self {
        Self {
            key_condition: opts.key,
            filter: opts.read.filter,
            projection: opts.read.projection,
            index: opts.read.index,
            consistent_read: opts.read.consistent_read,
            select: opts.read.select,
            limit: opts.read.limit,
            reverse: opts.no_scan_index_forward,
            return_consumed_capacity: opts.read.return_consumed_capacity,
        }
    }
}

/// Options of `scan`.
#[derive(Debug, Clone, Args)]
pub struct ScanOpts {
    /// Segment of a parallel scan.
    #[arg(long)]
    pub segment: Option<i32>,

    /// Total segments of a parallel scan.
    #[arg(long)]
    pub total_segments: Option<i32>,

    /// Shared read options.
    #[command(flatten)]
    pub read: ReadOpts,
}

impl From<ScanOpts> for ScanArgs {
    fn from(opts: ScanOpts) -> Self {
        Self {
            filter: opts.read.filter,
            projection: opts.read.projection,
            index: opts.read.index,
            consistent_read: opts.read.consistent_read,
            select: opts.read.select,
            limit: opts.read.limit,
            segment: opts.segment,
            total_segments: opts.total_segments,
            return_consumed_capacity: opts.read.return_consumed_capacity,
        }
    }
}

// ---------------------------------------------------------------------------
// Item options
// ---------------------------------------------------------------------------

/// Options of `get`.
#[derive(Debug, Clone, Args)]
pub struct GetOpts {
    /// Primary key as a map literal, e.g. `{pk: 'a', sk: 1}`.
    #[arg(short, long)]
    pub key: String,

    /// Projection expression.
    #[arg(short, long)]
    pub projection: Option<String>,

    /// Use a strongly consistent read.
    #[arg(short, long)]
    pub consistent_read: bool,
}

impl From<GetOpts> for GetArgs {
    fn from(opts: GetOpts) -> Self {
        Self {
            key: opts.key,
            projection: opts.projection,
            consistent_read: opts.consistent_read,
        }
    }
}

/// Options of `put`.
#[derive(Debug, Clone, Args)]
pub struct PutOpts {
    /// The item as a map literal.
    #[arg(short, long)]
    pub item: String,

    /// Condition expression.
    #[arg(short = 'C', long)]
    pub condition: Option<String>,

    /// Attributes to return: NONE or ALL_OLD.
    #[arg(long)]
    pub return_values: Option<ReturnValue>,
}

impl From<PutOpts> for PutArgs {
    fn from(opts: PutOpts) -> Self {
        Self {
            item: opts.item,
            condition: opts.condition,
            return_values: opts.return_values,
        }
    }
}

/// Options of `update`.
#[derive(Debug, Clone, Args)]
pub struct UpdateOpts {
    /// Primary key as a map literal.
    #[arg(short, long)]
    pub key: String,

    /// Update expression, e.g. `SET a = a + 1 REMOVE b`.
    #[arg(short, long)]
    pub update: String,

    /// Condition expression.
    #[arg(short = 'C', long)]
    pub condition: Option<String>,

    /// Attributes to return.
    #[arg(long)]
    pub return_values: Option<ReturnValue>,
}

impl From<UpdateOpts> for UpdateArgs {
    fn from(opts: UpdateOpts) -> Self {
        Self {
            key: opts.key,
            update: opts.update,
            condition: opts.condition,
            return_values: opts.return_values,
        }
    }
}

/// Options of `delete`.
#[derive(Debug, Clone, Args)]
pub struct DeleteOpts {
    /// Primary key as a map literal.
    #[arg(short, long)]
    pub key: String,

    /// Condition expression.
    #[arg(short = 'C', long)]
    pub condition: Option<String>,

    /// Attributes to return: NONE or ALL_OLD.
    #[arg(long)]
    pub return_values: Option<ReturnValue>,
}

impl From<DeleteOpts> for DeleteArgs {
    fn from(opts: DeleteOpts) -> Self {
        Self {
            key: opts.key,
            condition: opts.condition,
            return_values: opts.return_values,
        }
    }
}
