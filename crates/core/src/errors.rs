use std::path::PathBuf;

use thiserror::Error;

/// Load-time failures for a rule table. Everything here is a startup
/// configuration problem; query paths never produce errors.
#[derive(Debug, Error)]
pub enum RuleSetError {
    #[error("could not read rule table `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse `{domain}` rule table: {source}")]
    Parse { domain: &'static str, source: toml::de::Error },
    #[error("rule table declares domain `{found}` but `{expected}` was expected")]
    DomainMismatch { expected: &'static str, found: String },
    #[error("invalid {field} label `{label}` in `{domain}` rule {row}")]
    InvalidBucketLabel { domain: String, row: usize, field: &'static str, label: String },
    #[error("rule table for `{domain}` is empty")]
    EmptyTable { domain: String },
}
