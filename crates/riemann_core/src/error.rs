//! Plot error types

use std::fmt;

use riemann_expr::ExprError;

/// Error type for building plots
#[derive(Debug, Clone, PartialEq)]
pub enum PlotError {
    /// Expression failed to parse
    Expr(ExprError),
    /// Sampling range or step is unusable
    InvalidDomain(String),
    /// Domain would produce more samples than allowed
    TooManySamples { count: usize, max: usize },
}

impl fmt::Display for PlotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlotError::Expr(err) => write!(f, "Expression error: {}", err),
            PlotError::InvalidDomain(msg) => write!(f, "Invalid domain: {}", msg),
            PlotError::TooManySamples { count, max } => {
                write!(f, "Domain needs {} samples (max {})", count, max)
            }
        }
    }
}

impl std::error::Error for PlotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlotError::Expr(err) => Some(err),
            PlotError::InvalidDomain(_) => None,
            PlotError::TooManySamples { .. } => None,
        }
    }
}

impl From<ExprError> for PlotError {
    fn from(err: ExprError) -> Self {
        PlotError::Expr(err)
    }
}
