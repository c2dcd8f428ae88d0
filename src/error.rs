use thiserror::Error;

/// Failures the aggregation engine can surface to callers.
///
/// Configuration mistakes (bad module names) and corrupt dimension data
/// (unsortable quarter labels) are the only error cases; degenerate data
/// such as empty inputs or zero totals is handled by zero-substitution and
/// never reaches this type.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DashboardError {
    #[error("unknown module `{0}`, expected one of: customer, account, acv, team")]
    InvalidModule(String),
    #[error("missing required query parameter `module`")]
    MissingModule,
    #[error("quarter label `{0}` does not match the <year>-Q<n> pattern")]
    MalformedQuarter(String),
}
