use std::path::Path;

use fincoach_core::config::AppConfig;
use fincoach_core::{GrowthStrategy, InsurancePlan, PensionProduct, RuleStore};
use rust_decimal::Decimal;
use serde::Serialize;

use super::{load_config, serialize_payload, CommandResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<DoctorCheck>,
}

pub fn run(config_path: Option<&Path>, json_output: bool) -> CommandResult {
    let report = build_report(config_path);
    let exit_code = if report.overall_status == CheckStatus::Pass { 0 } else { 1 };

    let output = if json_output { serialize_payload(&report) } else { render_human(&report) };
    CommandResult { exit_code, output }
}

fn build_report(config_path: Option<&Path>) -> DoctorReport {
    let mut checks = Vec::new();

    match load_config(config_path) {
        Ok(config) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Pass,
                details: "configuration loaded and validated".to_string(),
            });
            checks.push(check_table("insurance_rules", load_insurance(&config)));
            checks.push(check_table("growth_rules", load_growth(&config)));
            checks.push(check_table("pension_rules", load_pension(&config)));
            checks.push(check_engine_probe(&config));
        }
        Err(error) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Fail,
                details: error.to_string(),
            });
            for name in ["insurance_rules", "growth_rules", "pension_rules", "engine_probe"] {
                checks.push(DoctorCheck {
                    name,
                    status: CheckStatus::Skipped,
                    details: "skipped because configuration did not load".to_string(),
                });
            }
        }
    }

    let all_pass = checks.iter().all(|check| check.status == CheckStatus::Pass);
    let overall_status = if all_pass { CheckStatus::Pass } else { CheckStatus::Fail };
    let summary = if all_pass {
        "doctor: all readiness checks passed".to_string()
    } else {
        "doctor: one or more readiness checks failed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

fn check_table(
    name: &'static str,
    loaded: Result<(String, usize), fincoach_core::RuleSetError>,
) -> DoctorCheck {
    match loaded {
        Ok((version, rows)) => DoctorCheck {
            name,
            status: CheckStatus::Pass,
            details: format!("version {version}, {rows} rules"),
        },
        Err(error) => DoctorCheck { name, status: CheckStatus::Fail, details: error.to_string() },
    }
}

fn load_insurance(
    config: &AppConfig,
) -> Result<(String, usize), fincoach_core::RuleSetError> {
    let store = match &config.rules.data_dir {
        Some(dir) => RuleStore::<InsurancePlan>::from_path(&dir.join("insurance.toml"))?,
        None => RuleStore::<InsurancePlan>::embedded()?,
    };
    Ok((store.meta().version.clone(), store.len()))
}

fn load_growth(config: &AppConfig) -> Result<(String, usize), fincoach_core::RuleSetError> {
    let store = match &config.rules.data_dir {
        Some(dir) => RuleStore::<GrowthStrategy>::from_path(&dir.join("growth.toml"))?,
        None => RuleStore::<GrowthStrategy>::embedded()?,
    };
    Ok((store.meta().version.clone(), store.len()))
}

fn load_pension(config: &AppConfig) -> Result<(String, usize), fincoach_core::RuleSetError> {
    let store = match &config.rules.data_dir {
        Some(dir) => RuleStore::<PensionProduct>::from_path(&dir.join("pension.toml"))?,
        None => RuleStore::<PensionProduct>::embedded()?,
    };
    Ok((store.meta().version.clone(), store.len()))
}

/// One fixed end-to-end query through every domain, confirming the
/// matcher is total over the loaded tables.
fn check_engine_probe(config: &AppConfig) -> DoctorCheck {
    let engine = match &config.rules.data_dir {
        Some(dir) => fincoach_core::RecommendationEngine::from_dir(dir),
        None => fincoach_core::RecommendationEngine::from_embedded(),
    };

    match engine {
        Ok(engine) => {
            let income = Decimal::from(3_000_000);
            let insurance = engine.insurance(35, "부부", income);
            let advice = engine.asset_growth(35, "부부", income);
            let pension = engine.pension(35, "부부", income);

            DoctorCheck {
                name: "engine_probe",
                status: CheckStatus::Pass,
                details: format!(
                    "probe resolved: insurance {}, growth {}, pension {}",
                    insurance.key, advice.primary.key, pension.key
                ),
            }
        }
        Err(error) => DoctorCheck {
            name: "engine_probe",
            status: CheckStatus::Fail,
            details: error.to_string(),
        },
    }
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = Vec::new();
    lines.push(report.summary.clone());

    for check in &report.checks {
        let marker = match check.status {
            CheckStatus::Pass => "ok",
            CheckStatus::Fail => "fail",
            CheckStatus::Skipped => "skip",
        };
        lines.push(format!("- [{marker}] {}: {}", check.name, check.details));
    }

    lines.join("\n")
}
