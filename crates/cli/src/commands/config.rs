use std::env;
use std::path::Path;

use super::{load_config, CommandResult};

pub fn run(config_path: Option<&Path>) -> CommandResult {
    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure("config", "config_validation", error.to_string(), 2)
        }
    };

    let data_dir = config
        .rules
        .data_dir
        .as_ref()
        .map(|dir| dir.display().to_string())
        .unwrap_or_else(|| "<embedded>".to_string());

    let lines = vec![
        "effective config (source precedence: overrides > env > file > default):".to_string(),
        render_line("rules.data_dir", &data_dir, env_source("FINCOACH_RULES_DIR")),
        render_line("logging.level", &config.logging.level, env_source("FINCOACH_LOG_LEVEL")),
        render_line(
            "logging.format",
            &format!("{:?}", config.logging.format).to_lowercase(),
            env_source("FINCOACH_LOG_FORMAT"),
        ),
    ];

    CommandResult { exit_code: 0, output: lines.join("\n") }
}

fn render_line(key: &str, value: &str, source: &str) -> String {
    format!("  {key} = {value}  ({source})")
}

fn env_source(var: &str) -> &'static str {
    if env::var(var).is_ok() {
        "env"
    } else {
        "file or default"
    }
}
