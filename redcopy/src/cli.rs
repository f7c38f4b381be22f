// redcopy/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Args, Parser, Subcommand, ValueEnum};
use redcopy_core::TransferSpec;
use redcopy_core::domain::transfer::VerifyOption;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "redcopy")]
#[command(about = "Loads an S3 object or a DynamoDB table into Redshift with one COPY", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🚀 Runs the transfer described by the task file
    Run {
        #[command(flatten)]
        args: TaskArgs,
    },

    /// 🔎 Resolves credentials and prints the redacted COPY statement, without executing it
    Plan {
        #[command(flatten)]
        args: TaskArgs,

        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
}

#[derive(Args, Debug)]
pub struct TaskArgs {
    /// Task file describing the transfer
    #[arg(long, short, default_value = "transfer.yml")]
    pub task: PathBuf,

    /// Directory holding connections.yml
    #[arg(long, default_value = ".")]
    pub config_dir: PathBuf,

    /// Overrides the operation from the task file (COPY | UPSERT)
    #[arg(long, env = "REDCOPY_OPERATION")]
    pub operation: Option<String>,

    /// Overrides the commit mode from the task file
    #[arg(long, env = "REDCOPY_AUTOCOMMIT")]
    pub autocommit: Option<bool>,

    /// Overrides certificate verification: true, false or a CA bundle path
    #[arg(long, env = "REDCOPY_VERIFY")]
    pub verify: Option<VerifyOption>,
}

impl TaskArgs {
    /// Layers command-line / environment values over the task file.
    pub fn apply_overrides(&self, mut spec: TransferSpec) -> TransferSpec {
        if let Some(operation) = &self.operation {
            tracing::info!(old = %spec.operation, new = %operation, "Overriding operation");
            spec.operation = operation.clone();
        }
        if let Some(autocommit) = self.autocommit {
            tracing::info!(old = spec.autocommit, new = autocommit, "Overriding autocommit");
            spec.autocommit = autocommit;
        }
        if let Some(verify) = &self.verify {
            tracing::info!(old = %spec.verify, new = %verify, "Overriding verify");
            spec.verify = verify.clone();
        }
        spec
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}
