//! Expression Library
//!
//! Parses and evaluates single-variable expressions such as `1 / x` or
//! `Math.sin(x) * x`.
//!
//! ## Key Components
//!
//! - [`lexer::tokenize`] - Source text to tokens
//! - [`parser::parse`] - Tokens to an [`Expr`] tree
//! - [`Expr::eval`] - Evaluate at a given `x`
//! - [`CompiledFunction`] - Parsed expression plus its source text
//!
//! ## Syntax
//!
//! Numbers, the variable `x`, constants `pi` and `e`, the operators
//! `+ - * / % ^` (`**` is accepted for `^`), parentheses, and builtin
//! functions (see [`Function`]). JavaScript-style input keeps working:
//! functions take an optional `Math.` prefix and the constants are also
//! spelled `Math.PI` and `Math.E`.

mod error;
mod ast;
pub mod lexer;
pub mod parser;

pub use error::ExprError;
pub use ast::{BinaryOp, Constant, Expr, Function, UnaryOp};
pub use lexer::{Token, TokenKind};
pub use parser::parse;

/// A parsed expression together with the text it was parsed from
#[derive(Clone, Debug, PartialEq)]
pub struct CompiledFunction {
    source: String,
    expr: Expr,
}

impl CompiledFunction {
    /// Parse `source` once for repeated evaluation
    pub fn compile(source: &str) -> Result<Self, ExprError> {
        let expr = parse(source)?;
        log::debug!("Compiled '{}' as {}", source.trim(), expr);
        Ok(Self {
            source: source.trim().to_string(),
            expr,
        })
    }

    /// Evaluate at `x`
    #[inline]
    pub fn call(&self, x: f64) -> f64 {
        self.expr.eval(x)
    }

    /// The trimmed source text
    pub fn source(&self) -> &str {
        &self.source
    }
}
