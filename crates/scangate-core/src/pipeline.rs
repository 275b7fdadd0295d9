use std::path::Path;

use tracing::{error, info, warn};

use crate::config::{ReportLayout, ScanConfig};
use crate::error::ScanResult;
use crate::outputs::model::{Decision, RunSummary, ScanOutputs, ToolInfo};
use crate::policy::verdict::read_verdict;
use crate::reports::locate::find_content_reports;
use crate::reports::merge::merge_content_reports;
use crate::reports::model::{BomArtifact, write_bill_of_materials};
use crate::scan::invocation::ScanInvocation;
use crate::scan::runner::Scanner;

/// Locate, merge and persist the bill of materials for `report_dir`.
pub fn build_bill_of_materials(report_dir: &Path, destination: &Path) -> ScanResult<BomArtifact> {
    let files = find_content_reports(report_dir);
    let bom = merge_content_reports(&files)?;
    write_bill_of_materials(destination, &bom)
}

/// Turn the reports of a finished scan into the run's outputs.
///
/// The policy verdict is read before the bill of materials is built, so a
/// malformed evaluation aborts the run without writing anything.
pub fn aggregate(layout: &ReportLayout, fail_build: bool, tool: ToolInfo) -> ScanResult<RunSummary> {
    let verdict = read_verdict(&layout.policy_evaluation())?;

    let bom_path = layout.bill_of_materials();
    let artifact = build_bill_of_materials(&layout.report_dir, &bom_path).inspect_err(|err| {
        error!(error = %err, "failed to construct bill of materials from scanner output");
    })?;
    info!(
        path = %artifact.path.display(),
        packages = artifact.package_count,
        "bill of materials written"
    );

    let outputs = ScanOutputs::new(&bom_path, &layout.vulnerabilities(), verdict);
    let decision = Decision::decide(fail_build, &outputs.policycheck);
    if let Decision::Fail(reason) = &decision {
        warn!(status = %outputs.policycheck, "{reason}");
    }

    Ok(RunSummary::new(tool, outputs, artifact, decision))
}

/// Run the scanner for `config`, then aggregate its reports.
pub fn run(config: &ScanConfig, scanner: &dyn Scanner, tool: ToolInfo) -> ScanResult<RunSummary> {
    let invocation = ScanInvocation::from_config(config);

    info!(
        image = %config.image_reference,
        scanner_image = %config.scanner_image.reference(),
        policy = %config.policy.name,
        fail_build = config.fail_build,
        "analyzing image"
    );
    scanner.run(&invocation)?;

    aggregate(&config.layout, config.fail_build, tool)
}
