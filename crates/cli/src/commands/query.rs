use std::path::Path;

use fincoach_core::config::AppConfig;
use fincoach_core::{GrowthAdvice, InsurancePlan, PensionProduct, RecommendationEngine, Rule};
use serde::Serialize;

use super::{init_logging, load_config, serialize_payload, CommandResult};
use crate::QueryArgs;

#[derive(Clone, Copy, Debug)]
pub enum Domain {
    Insurance,
    Growth,
    Pension,
}

impl Domain {
    fn command_name(self) -> &'static str {
        match self {
            Self::Insurance => "insurance",
            Self::Growth => "growth",
            Self::Pension => "pension",
        }
    }
}

#[derive(Debug, Serialize)]
struct QueryEcho {
    age: u32,
    family: String,
    income: String,
}

#[derive(Debug, Serialize)]
struct InsuranceReport {
    command: &'static str,
    status: &'static str,
    query: QueryEcho,
    table_version: String,
    rule: Rule<InsurancePlan>,
}

#[derive(Debug, Serialize)]
struct GrowthReport {
    command: &'static str,
    status: &'static str,
    query: QueryEcho,
    table_version: String,
    advice: GrowthAdvice,
}

#[derive(Debug, Serialize)]
struct PensionReport {
    command: &'static str,
    status: &'static str,
    query: QueryEcho,
    table_version: String,
    rule: Rule<PensionProduct>,
}

pub fn run(config_path: Option<&Path>, domain: Domain, args: &QueryArgs) -> CommandResult {
    let command = domain.command_name();

    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(command, "config_validation", error.to_string(), 2)
        }
    };
    init_logging(&config);

    let engine = match build_engine(&config) {
        Ok(engine) => engine,
        Err(error) => return CommandResult::failure(command, "rule_set", error.to_string(), 3),
    };

    let echo = QueryEcho {
        age: args.age,
        family: args.family.clone(),
        income: args.income.to_string(),
    };

    let output = match domain {
        Domain::Insurance => {
            let rule = engine.insurance(args.age, &args.family, args.income);
            let report = InsuranceReport {
                command,
                status: "ok",
                query: echo,
                table_version: engine.insurance_store().meta().version.clone(),
                rule,
            };
            if args.json {
                serialize_payload(&report)
            } else {
                render_insurance(&report)
            }
        }
        Domain::Growth => {
            let advice = engine.asset_growth(args.age, &args.family, args.income);
            let report = GrowthReport {
                command,
                status: "ok",
                query: echo,
                table_version: engine.growth_store().meta().version.clone(),
                advice,
            };
            if args.json {
                serialize_payload(&report)
            } else {
                render_growth(&report)
            }
        }
        Domain::Pension => {
            let rule = engine.pension(args.age, &args.family, args.income);
            let report = PensionReport {
                command,
                status: "ok",
                query: echo,
                table_version: engine.pension_store().meta().version.clone(),
                rule,
            };
            if args.json {
                serialize_payload(&report)
            } else {
                render_pension(&report)
            }
        }
    };

    CommandResult { exit_code: 0, output }
}

fn build_engine(config: &AppConfig) -> Result<RecommendationEngine, fincoach_core::RuleSetError> {
    match &config.rules.data_dir {
        Some(dir) => RecommendationEngine::from_dir(dir),
        None => RecommendationEngine::from_embedded(),
    }
}

fn render_insurance(report: &InsuranceReport) -> String {
    let rule = &report.rule;
    let mut lines = vec![format!(
        "best match: {} (table {})",
        rule.key, report.table_version
    )];
    lines.push(format!("- required: {}", rule.payload.required.join(", ")));
    lines.push(format!("- recommended: {}", rule.payload.recommended.join(", ")));
    lines.push(format!("- not recommended: {}", rule.payload.not_recommended.join(", ")));
    lines.push(format!("- review trigger: {}", rule.payload.review_trigger));
    lines.join("\n")
}

fn render_growth(report: &GrowthReport) -> String {
    let advice = &report.advice;
    let mut lines = vec![format!(
        "growth advice for {} (table {})",
        advice.primary.key, report.table_version
    )];
    for (tier, rule) in [
        ("primary", &advice.primary),
        ("secondary", &advice.secondary),
        ("tertiary", &advice.tertiary),
    ] {
        lines.push(format!("- {tier}: {} [{}]", rule.payload.strategy, rule.key));
        lines.push(format!("    {} ({})", rule.payload.success_story, rule.payload.source));
    }
    lines.join("\n")
}

fn render_pension(report: &PensionReport) -> String {
    let rule = &report.rule;
    [
        format!("best match: {} (table {})", rule.key, report.table_version),
        format!("- product: {} / {}", rule.payload.institution, rule.payload.product),
        format!(
            "- annual yield {}% / fee {}%",
            rule.payload.annual_yield_pct, rule.payload.fee_pct
        ),
    ]
    .join("\n")
}
