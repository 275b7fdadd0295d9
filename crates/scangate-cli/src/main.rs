use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use scangate_core::config::{Environment, ReportLayout, ScanConfig, ScanInputs, parse_fail_build};
use scangate_core::outputs::model::{Decision, RunSummary, ToolInfo};
use scangate_core::outputs::render;
use scangate_core::scan::runner::ProcessScanner;

mod args;
mod exit;
mod logging;

use args::{AggregateArgs, Command, OutputArgs, OutputFormat, ScanArgs};
use exit::ExitCode;

fn main() -> process::ExitCode {
    let args = args::Args::parse();

    if let Err(err) = logging::init_tracing(args.debug, args.log_json) {
        eprintln!("scangate: warning: {err:#}");
    }

    let code = match execute(args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("scangate: error: {err:#}");
            ExitCode::Error
        }
    };
    code.into()
}

fn execute(args: args::Args) -> Result<ExitCode> {
    debug!(command = ?args.command, "starting");
    let tool = ToolInfo {
        name: scangate_core::TOOL_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let (summary, output) = match args.command {
        Command::Scan(scan) => {
            let config = scan_config(&scan_inputs(&scan, args.debug), &scan)?;
            let summary = scangate_core::run(&config, &ProcessScanner, tool)
                .with_context(|| format!("scan of {} failed", config.image_reference))?;
            (summary, scan.output)
        }
        Command::Aggregate(AggregateArgs {
            fail_build,
            reports,
            output,
        }) => {
            let layout = ReportLayout::new(reports.report_dir);
            let summary =
                scangate_core::aggregate(&layout, parse_fail_build(fail_build.as_deref()), tool)
                    .with_context(|| {
                        format!(
                            "failed to aggregate reports in {}",
                            layout.report_dir.display()
                        )
                    })?;
            (summary, output)
        }
    };

    emit(&summary, &output)?;

    match &summary.decision {
        Decision::Pass => Ok(ExitCode::Pass),
        Decision::Fail(reason) => {
            eprintln!("scangate: {reason}");
            Ok(ExitCode::PolicyFail)
        }
    }
}

fn scan_inputs(scan: &ScanArgs, debug: bool) -> ScanInputs {
    ScanInputs {
        image_reference: scan.image_reference.clone(),
        custom_policy_path: scan.custom_policy_path.clone(),
        dockerfile_path: scan.dockerfile_path.clone(),
        debug: debug.then(|| "true".to_string()),
        fail_build: scan.fail_build.clone(),
        include_app_packages: scan.include_app_packages.then(|| "true".to_string()),
        scanner_version: scan.scanner_version.clone(),
    }
}

fn scan_config(inputs: &ScanInputs, scan: &ScanArgs) -> Result<ScanConfig> {
    let env = Environment {
        workspace: scan.workspace.clone(),
        policy_dir: scan.policy_dir.clone(),
        runner: scan.runner.clone(),
        layout: ReportLayout::new(scan.reports.report_dir.clone()),
    };
    ScanConfig::from_inputs(inputs, &env).context("invalid scan configuration")
}

fn emit(summary: &RunSummary, output: &OutputArgs) -> Result<()> {
    let rendered = match output.format {
        OutputFormat::Json => serde_json::to_string_pretty(summary)?,
        OutputFormat::Text => render::render_text(summary),
    };

    match &output.out {
        Some(path) => std::fs::write(path, &rendered)
            .with_context(|| format!("failed to write output: {}", path.display()))?,
        None => print!("{rendered}"),
    }
    Ok(())
}
