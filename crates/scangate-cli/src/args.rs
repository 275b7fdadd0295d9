use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use scangate_core::config::{DEFAULT_POLICY_DIR, DEFAULT_REPORT_DIR, DEFAULT_RUNNER};

#[derive(Debug, Parser)]
#[command(
    name = "scangate",
    version,
    about = "Container image policy scan with bill-of-materials aggregation"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Verbose logging; also passed to the scanner
    #[arg(long, global = true)]
    pub debug: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the scanner against an image, then aggregate its reports
    Scan(ScanArgs),
    /// Aggregate the reports of a scan that already ran
    Aggregate(AggregateArgs),
}

#[derive(Debug, ClapArgs)]
pub struct ScanArgs {
    /// Image to scan, e.g. `alpine:latest`
    pub image_reference: String,

    /// Custom policy bundle, relative to the workspace
    #[arg(long)]
    pub custom_policy_path: Option<String>,

    /// Dockerfile used to build the image
    #[arg(long)]
    pub dockerfile_path: Option<String>,

    /// Fail the build on a failing policy evaluation ("true" to enable)
    #[arg(long)]
    pub fail_build: Option<String>,

    /// Include application packages (selects the full scanner image)
    #[arg(long)]
    pub include_app_packages: bool,

    /// Scanner release to use
    #[arg(long)]
    pub scanner_version: Option<String>,

    /// Base directory for relative policy paths
    #[arg(long, env = "GITHUB_WORKSPACE", default_value = ".")]
    pub workspace: PathBuf,

    /// Directory holding the built-in policy bundle
    #[arg(long, default_value = DEFAULT_POLICY_DIR)]
    pub policy_dir: PathBuf,

    /// Script that launches the scanner
    #[arg(long, default_value = DEFAULT_RUNNER)]
    pub runner: PathBuf,

    #[command(flatten)]
    pub reports: ReportArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, ClapArgs)]
pub struct AggregateArgs {
    /// Fail the build on a failing policy evaluation ("true" to enable)
    #[arg(long)]
    pub fail_build: Option<String>,

    #[command(flatten)]
    pub reports: ReportArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, ClapArgs)]
pub struct ReportArgs {
    /// Directory the scanner writes its reports into
    #[arg(long, default_value = DEFAULT_REPORT_DIR)]
    pub report_dir: PathBuf,
}

#[derive(Debug, ClapArgs)]
pub struct OutputArgs {
    /// Output format
    #[arg(long, default_value = "json")]
    pub format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}
