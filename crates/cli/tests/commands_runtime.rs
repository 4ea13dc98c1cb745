use std::env;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

use fincoach_cli::commands::{doctor, query};
use fincoach_cli::QueryArgs;
use rust_decimal::Decimal;
use serde_json::Value;

fn args(age: u32, family: &str, income: i64, json: bool) -> QueryArgs {
    QueryArgs { age, family: family.to_string(), income: Decimal::from(income), json }
}

#[test]
fn insurance_query_returns_ok_json_with_bucketed_rule() {
    with_env(&[], || {
        let result =
            query::run(None, query::Domain::Insurance, &args(25, "1인가구", 2_500_000, true));
        assert_eq!(result.exit_code, 0, "expected successful insurance query");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "insurance");
        assert_eq!(payload["status"], "ok");
        assert_eq!(payload["rule"]["key"]["age_group"], "20s");
        assert_eq!(payload["rule"]["key"]["family_type"], "single");
        assert_eq!(payload["rule"]["key"]["income_band"], "200~300");
    });
}

#[test]
fn growth_query_returns_three_tiers_with_fixed_tertiary() {
    with_env(&[], || {
        let result = query::run(None, query::Domain::Growth, &args(22, "1인가구", 2_500_000, true));
        assert_eq!(result.exit_code, 0, "expected successful growth query");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "growth");
        assert_eq!(payload["advice"]["tertiary"]["payload"]["strategy"], "ETF 적립식 투자");
        assert_ne!(
            payload["advice"]["primary"]["payload"]["strategy"],
            payload["advice"]["secondary"]["payload"]["strategy"]
        );
    });
}

#[test]
fn pension_query_resolves_with_human_output() {
    with_env(&[], || {
        let result = query::run(None, query::Domain::Pension, &args(45, "부부", 3_500_000, false));
        assert_eq!(result.exit_code, 0, "expected successful pension query");
        assert!(result.output.contains("best match: 40s / couple / 300~400"));
        assert!(result.output.contains("신한은행"));
    });
}

#[test]
fn doctor_passes_against_embedded_tables() {
    with_env(&[], || {
        let result = doctor::run(None, true);
        assert_eq!(result.exit_code, 0, "expected all doctor checks to pass");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["overall_status"], "pass");

        let checks = payload["checks"].as_array().expect("checks array");
        assert_eq!(checks.len(), 5);
        assert!(checks.iter().all(|check| check["status"] == "pass"));
    });
}

#[test]
fn doctor_fails_when_the_rules_dir_is_missing_tables() {
    let dir = tempfile::tempdir().expect("tempdir");
    let dir_path = dir.path().to_str().expect("utf-8 path").to_string();

    with_env(&[("FINCOACH_RULES_DIR", &dir_path)], || {
        let result = doctor::run(None, true);
        assert_eq!(result.exit_code, 1, "expected doctor failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["overall_status"], "fail");
        assert_eq!(payload["checks"][0]["status"], "pass", "config itself is valid");
        assert_eq!(payload["checks"][1]["status"], "fail");
    });
}

#[test]
fn explicit_missing_config_path_is_a_config_failure() {
    with_env(&[], || {
        let missing = PathBuf::from("/nonexistent/fincoach.toml");
        let result = query::run(
            Some(&missing),
            query::Domain::Insurance,
            &args(25, "1인가구", 2_500_000, true),
        );
        assert_eq!(result.exit_code, 2, "expected config validation failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "config_validation");
    });
}

#[test]
fn query_against_broken_rules_dir_reports_rule_set_failure() {
    let dir = tempfile::tempdir().expect("tempdir");
    let dir_path = dir.path().to_str().expect("utf-8 path").to_string();

    with_env(&[("FINCOACH_RULES_DIR", &dir_path)], || {
        let result = query::run(None, query::Domain::Growth, &args(22, "1인가구", 2_500_000, true));
        assert_eq!(result.exit_code, 3, "expected rule set failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["error_class"], "rule_set");
    });
}

#[test]
fn repeated_queries_emit_identical_payloads() {
    with_env(&[], || {
        let first = query::run(None, query::Domain::Growth, &args(22, "1인가구", 2_500_000, true));
        let second = query::run(None, query::Domain::Growth, &args(22, "1인가구", 2_500_000, true));
        assert_eq!(first.output, second.output);
    });
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be valid JSON")
}

fn with_env(vars: &[(&str, &str)], test_fn: impl FnOnce()) {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let _guard =
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().expect("env mutex should not be poisoned");

    let keys = ["FINCOACH_RULES_DIR", "FINCOACH_LOG_LEVEL", "FINCOACH_LOG_FORMAT"];
    let previous_values: Vec<(&str, Option<String>)> =
        keys.iter().map(|key| (*key, env::var(key).ok())).collect();

    for key in &keys {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    test_fn();

    for (key, value) in previous_values {
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
    }
}
