use std::path::{Path, PathBuf};

use crate::error::{ScanError, ScanResult};

/// Scanner release used when no version is requested.
pub const DEFAULT_SCANNER_VERSION: &str = "0.7.2";

/// Name (and file stem) of the built-in policy bundle.
pub const DEFAULT_POLICY_BUNDLE: &str = "critical_security_policy";

/// Name of the scan script the runner is asked to execute.
pub const SCAN_SCRIPT: &str = "inline_scan";

/// Directory the scanner writes its reports into.
pub const DEFAULT_REPORT_DIR: &str = "./anchore-reports";

/// Runner script wrapping the scanner.
pub const DEFAULT_RUNNER: &str = "lib/run_scan.sh";

/// Directory holding the built-in policy bundle.
pub const DEFAULT_POLICY_DIR: &str = "lib";

pub const BILL_OF_MATERIALS_FILE: &str = "content.json";
pub const VULNERABILITIES_FILE: &str = "vulnerabilities.json";
pub const POLICY_EVALUATION_FILE: &str = "policy_evaluation.json";

/// Container image the scanner runs inside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScannerImage {
    /// OS packages only.
    Slim { version: String },
    /// OS and application packages.
    Full { version: String },
}

impl ScannerImage {
    pub fn select(include_app_packages: bool, version: &str) -> Self {
        let version = version.to_string();
        if include_app_packages {
            Self::Full { version }
        } else {
            Self::Slim { version }
        }
    }

    pub fn reference(&self) -> String {
        match self {
            Self::Slim { version } => format!("docker.io/anchore/inline-scan-slim:v{version}"),
            Self::Full { version } => format!("docker.io/anchore/inline-scan:v{version}"),
        }
    }
}

/// Policy bundle the image is evaluated against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyBundle {
    pub name: String,
    pub path: PathBuf,
}

impl PolicyBundle {
    pub fn builtin(policy_dir: &Path) -> Self {
        Self {
            name: DEFAULT_POLICY_BUNDLE.to_string(),
            path: policy_dir.join(format!("{DEFAULT_POLICY_BUNDLE}.json")),
        }
    }
}

/// Where the scanner leaves its output and where the bill of materials goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLayout {
    pub report_dir: PathBuf,
}

impl ReportLayout {
    pub fn new(report_dir: impl Into<PathBuf>) -> Self {
        Self {
            report_dir: report_dir.into(),
        }
    }

    pub fn bill_of_materials(&self) -> PathBuf {
        self.report_dir.join(BILL_OF_MATERIALS_FILE)
    }

    pub fn vulnerabilities(&self) -> PathBuf {
        self.report_dir.join(VULNERABILITIES_FILE)
    }

    pub fn policy_evaluation(&self) -> PathBuf {
        self.report_dir.join(POLICY_EVALUATION_FILE)
    }
}

impl Default for ReportLayout {
    fn default() -> Self {
        Self::new(DEFAULT_REPORT_DIR)
    }
}

/// Raw, string-typed inputs as a CI job hands them over.
///
/// Flags arrive as free-form strings; [`ScanConfig::from_inputs`] applies
/// the normalisation rules once so nothing downstream re-interprets them.
#[derive(Debug, Clone, Default)]
pub struct ScanInputs {
    pub image_reference: String,
    pub custom_policy_path: Option<String>,
    pub dockerfile_path: Option<String>,
    pub debug: Option<String>,
    pub fail_build: Option<String>,
    pub include_app_packages: Option<String>,
    pub scanner_version: Option<String>,
}

/// Fully resolved configuration for a single run.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub image_reference: String,
    pub dockerfile_path: Option<PathBuf>,
    pub debug: bool,
    pub fail_build: bool,
    pub scanner_version: String,
    pub scanner_image: ScannerImage,
    pub policy: PolicyBundle,
    pub layout: ReportLayout,
    pub runner: PathBuf,
}

/// Locations that are fixed per installation rather than per run.
#[derive(Debug, Clone)]
pub struct Environment {
    /// Base for relative custom policy paths.
    pub workspace: PathBuf,
    pub policy_dir: PathBuf,
    pub runner: PathBuf,
    pub layout: ReportLayout,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            workspace: PathBuf::from("."),
            policy_dir: PathBuf::from(DEFAULT_POLICY_DIR),
            runner: PathBuf::from(DEFAULT_RUNNER),
            layout: ReportLayout::default(),
        }
    }
}

impl ScanConfig {
    /// Normalise raw inputs into a run configuration.
    ///
    /// A custom policy bundle is loaded here so that a broken bundle aborts
    /// the run before the scanner is started.
    pub fn from_inputs(inputs: &ScanInputs, env: &Environment) -> ScanResult<Self> {
        let image_reference = inputs.image_reference.trim();
        if image_reference.is_empty() {
            return Err(ScanError::Config("image reference is required".into()));
        }

        let scanner_version = non_empty(inputs.scanner_version.as_deref())
            .unwrap_or(DEFAULT_SCANNER_VERSION)
            .to_string();
        let include_app_packages = non_empty(inputs.include_app_packages.as_deref()).is_some();

        let policy = match non_empty(inputs.custom_policy_path.as_deref()) {
            Some(custom) => crate::policy::bundle::load_custom(&env.workspace.join(custom))?,
            None => PolicyBundle::builtin(&env.policy_dir),
        };

        Ok(Self {
            image_reference: image_reference.to_string(),
            dockerfile_path: non_empty(inputs.dockerfile_path.as_deref()).map(PathBuf::from),
            debug: non_empty(inputs.debug.as_deref()).is_some(),
            fail_build: parse_fail_build(inputs.fail_build.as_deref()),
            scanner_image: ScannerImage::select(include_app_packages, &scanner_version),
            scanner_version,
            policy,
            layout: env.layout.clone(),
            runner: env.runner.clone(),
        })
    }
}

/// Only a case-insensitive `"true"` enables build failure.
pub fn parse_fail_build(raw: Option<&str>) -> bool {
    raw.is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
}

fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|v| !v.is_empty())
}
