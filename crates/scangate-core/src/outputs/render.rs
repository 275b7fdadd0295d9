use crate::TOOL_NAME;
use crate::outputs::model::{Decision, RunSummary};

pub fn render_text(summary: &RunSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} {}\n", TOOL_NAME, summary.tool.version));
    out.push_str(&format!(
        "billofmaterials: {}\n",
        summary.outputs.billofmaterials
    ));
    out.push_str(&format!(
        "vulnerabilities: {}\n",
        summary.outputs.vulnerabilities
    ));
    out.push_str(&format!("policycheck: {}\n", summary.outputs.policycheck));
    out.push_str(&format!(
        "Packages: {} ({} {})\n",
        summary.bill_of_materials.package_count,
        summary.bill_of_materials.hash.algorithm,
        summary.bill_of_materials.hash.value
    ));
    match &summary.decision {
        Decision::Pass => out.push_str("Decision: PASS\n"),
        Decision::Fail(reason) => out.push_str(&format!("Decision: FAIL ({reason})\n")),
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outputs::model::{ScanOutputs, ToolInfo};
    use crate::policy::verdict::PolicyVerdict;
    use crate::reports::model::BomArtifact;
    use crate::reports::read::fingerprint;
    use std::path::Path;

    fn summary(decision: Decision) -> RunSummary {
        RunSummary::new(
            ToolInfo {
                name: "scangate".into(),
                version: "1.0.0".into(),
            },
            ScanOutputs::new(
                Path::new("r/content.json"),
                Path::new("r/vulnerabilities.json"),
                PolicyVerdict::new("fail"),
            ),
            BomArtifact {
                path: "r/content.json".into(),
                package_count: 2,
                size_bytes: 10,
                hash: fingerprint(b"x"),
            },
            decision,
        )
    }

    #[test]
    fn renders_outputs_and_decision() {
        let text = render_text(&summary(Decision::Fail("Image failed".into())));

        assert!(text.starts_with("scangate 1.0.0\n"));
        assert!(text.contains("billofmaterials: r/content.json\n"));
        assert!(text.contains("vulnerabilities: r/vulnerabilities.json\n"));
        assert!(text.contains("policycheck: fail\n"));
        assert!(text.contains("Packages: 2 (sha256 "));
        assert!(text.ends_with("Decision: FAIL (Image failed)\n"));
    }

    #[test]
    fn renders_pass() {
        let text = render_text(&summary(Decision::Pass));
        assert!(text.ends_with("Decision: PASS\n"));
    }
}
