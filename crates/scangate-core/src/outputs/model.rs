use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::SCHEMA_VERSION;
use crate::policy::verdict::PolicyVerdict;
use crate::reports::model::BomArtifact;

/// Message attached to a failed build.
pub const POLICY_FAILURE_MESSAGE: &str = "Image failed Anchore policy evaluation";

/// The three named results exposed to the calling job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanOutputs {
    pub billofmaterials: String,
    pub vulnerabilities: String,
    pub policycheck: PolicyVerdict,
}

impl ScanOutputs {
    pub fn new(bill_of_materials: &Path, vulnerabilities: &Path, verdict: PolicyVerdict) -> Self {
        Self {
            billofmaterials: bill_of_materials.display().to_string(),
            vulnerabilities: vulnerabilities.display().to_string(),
            policycheck: verdict,
        }
    }
}

/// Whether the calling build should be failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", content = "reason", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    Pass,
    Fail(String),
}

impl Decision {
    /// Fail only when requested and the verdict is exactly `"fail"`.
    pub fn decide(fail_build: bool, verdict: &PolicyVerdict) -> Self {
        if fail_build && verdict.is_fail() {
            Self::Fail(POLICY_FAILURE_MESSAGE.to_string())
        } else {
            Self::Pass
        }
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, Self::Fail(_))
    }
}

/// Tool metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

/// Everything a run produced, in one serialisable document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub schema_version: String,
    pub tool: ToolInfo,
    pub outputs: ScanOutputs,
    pub bill_of_materials: BomArtifact,
    pub decision: Decision,
}

impl RunSummary {
    pub fn new(
        tool: ToolInfo,
        outputs: ScanOutputs,
        bill_of_materials: BomArtifact,
        decision: Decision,
    ) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            tool,
            outputs,
            bill_of_materials,
            decision,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fails_only_when_enabled_and_verdict_is_fail() {
        let fail = PolicyVerdict::new("fail");
        let pass = PolicyVerdict::new("pass");

        assert_eq!(
            Decision::decide(true, &fail),
            Decision::Fail(POLICY_FAILURE_MESSAGE.to_string())
        );
        assert_eq!(Decision::decide(false, &fail), Decision::Pass);
        assert_eq!(Decision::decide(true, &pass), Decision::Pass);
        assert_eq!(Decision::decide(true, &PolicyVerdict::new("Fail")), Decision::Pass);
    }

    #[test]
    fn outputs_serialize_with_named_keys() {
        let outputs = ScanOutputs::new(
            Path::new("./anchore-reports/content.json"),
            Path::new("./anchore-reports/vulnerabilities.json"),
            PolicyVerdict::new("pass"),
        );

        assert_eq!(
            serde_json::to_value(&outputs).unwrap(),
            json!({
                "billofmaterials": "./anchore-reports/content.json",
                "vulnerabilities": "./anchore-reports/vulnerabilities.json",
                "policycheck": "pass"
            })
        );
    }

    #[test]
    fn decision_serializes_with_reason() {
        assert_eq!(
            serde_json::to_value(Decision::Pass).unwrap(),
            json!({"result": "PASS"})
        );
        assert_eq!(
            serde_json::to_value(Decision::Fail("boom".into())).unwrap(),
            json!({"result": "FAIL", "reason": "boom"})
        );
    }
}
