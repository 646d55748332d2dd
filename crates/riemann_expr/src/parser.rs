//! Recursive-descent parser
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! sum     := product (('+' | '-') product)*
//! product := unary (('*' | '/' | '%') unary)*
//! unary   := ('-' | '+') unary | power
//! power   := primary ('^' unary)?
//! primary := number | 'x' | constant | function '(' args ')' | '(' sum ')'
//! ```
//!
//! `power` binds tighter than unary minus on its left and is right
//! associative, so `-x^2` is `-(x^2)` and `2^3^2` is `2^9`.
//!
//! Nesting is capped at [`MAX_DEPTH`]. Each unary level and each operator
//! in a `+`/`*` chain counts, so the depth of the resulting tree (and the
//! recursion of `eval` over it) stays bounded too.

use crate::ast::{BinaryOp, Constant, Expr, Function, UnaryOp};
use crate::lexer::{tokenize, Token, TokenKind};
use crate::ExprError;

/// Deepest nesting the parser accepts
pub const MAX_DEPTH: usize = 256;

/// Parse source text into an expression tree
pub fn parse(source: &str) -> Result<Expr, ExprError> {
    let tokens = tokenize(source)?;
    if tokens.is_empty() {
        return Err(ExprError::Empty);
    }

    let mut parser = Parser {
        tokens: &tokens,
        cursor: 0,
        depth: 0,
        end: source.len(),
    };
    let expr = parser.sum()?;

    match parser.peek() {
        None => Ok(expr),
        Some(token) => Err(unexpected(token)),
    }
}

struct Parser<'a> {
    tokens: &'a [Token],
    cursor: usize,
    depth: usize,
    /// Source length, reported when input runs out
    end: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.cursor)
    }

    fn next(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.cursor);
        if token.is_some() {
            self.cursor += 1;
        }
        token
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek().is_some_and(|t| &t.kind == kind) {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<(), ExprError> {
        match self.next() {
            Some(token) if &token.kind == kind => Ok(()),
            Some(token) => Err(unexpected(token)),
            None => Err(ExprError::UnexpectedEnd),
        }
    }

    /// One level deeper; fails past [`MAX_DEPTH`]
    ///
    /// Callers restore `depth` on success only. Any error ends the parse.
    fn enter(&mut self) -> Result<(), ExprError> {
        if self.depth >= MAX_DEPTH {
            let pos = self.peek().map_or(self.end, |t| t.pos);
            return Err(ExprError::TooDeep { pos });
        }
        self.depth += 1;
        Ok(())
    }

    fn sum(&mut self) -> Result<Expr, ExprError> {
        let base = self.depth;
        let mut lhs = self.product()?;
        loop {
            let op = match self.peek().map(|t| &t.kind) {
                Some(TokenKind::Plus) => BinaryOp::Add,
                Some(TokenKind::Minus) => BinaryOp::Sub,
                _ => {
                    self.depth = base;
                    return Ok(lhs);
                }
            };
            self.cursor += 1;
            self.enter()?;
            let rhs = self.product()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
    }

    fn product(&mut self) -> Result<Expr, ExprError> {
        let base = self.depth;
        let mut lhs = self.unary()?;
        loop {
            let op = match self.peek().map(|t| &t.kind) {
                Some(TokenKind::Star) => BinaryOp::Mul,
                Some(TokenKind::Slash) => BinaryOp::Div,
                Some(TokenKind::Percent) => BinaryOp::Rem,
                _ => {
                    self.depth = base;
                    return Ok(lhs);
                }
            };
            self.cursor += 1;
            self.enter()?;
            let rhs = self.unary()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
    }

    fn unary(&mut self) -> Result<Expr, ExprError> {
        self.enter()?;
        let expr = if self.eat(&TokenKind::Minus) {
            Expr::Unary(UnaryOp::Neg, Box::new(self.unary()?))
        } else if self.eat(&TokenKind::Plus) {
            self.unary()?
        } else {
            self.power()?
        };
        self.depth -= 1;
        Ok(expr)
    }

    fn power(&mut self) -> Result<Expr, ExprError> {
        let base = self.primary()?;
        if self.eat(&TokenKind::Caret) {
            // Exponent goes through `unary` so `2^-x` parses
            let exponent = self.unary()?;
            return Ok(Expr::Binary(BinaryOp::Pow, Box::new(base), Box::new(exponent)));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Expr, ExprError> {
        let token = self.next().ok_or(ExprError::UnexpectedEnd)?;

        match &token.kind {
            TokenKind::Number(n) => Ok(Expr::Number(*n)),
            TokenKind::LParen => {
                let inner = self.sum()?;
                self.expect(&TokenKind::RParen)?;
                Ok(inner)
            }
            TokenKind::Ident(name) => self.identifier(name, token.pos, false),
            TokenKind::MathMember(name) => self.identifier(name, token.pos, true),
            _ => Err(unexpected(token)),
        }
    }

    /// `math` is set for `Math.name`, which only names functions and `PI`/`E`
    fn identifier(&mut self, name: &str, pos: usize, math: bool) -> Result<Expr, ExprError> {
        if name == "x" && !math {
            return Ok(Expr::Var);
        }

        if let Some(function) = Function::from_name(name) {
            // A bare function name without a call is an error, not a variable
            self.expect(&TokenKind::LParen)?;
            let args = self.arguments()?;
            if args.len() != function.arity() {
                return Err(ExprError::Arity {
                    name: name.to_string(),
                    expected: function.arity(),
                    found: args.len(),
                });
            }
            return Ok(Expr::Call(function, args));
        }

        let constant = if math {
            Constant::from_math_member(name)
        } else {
            Constant::from_name(name)
        };
        if let Some(constant) = constant {
            return Ok(Expr::Const(constant));
        }

        let name = if math { format!("Math.{}", name) } else { name.to_string() };
        Err(ExprError::UnknownIdentifier { pos, name })
    }

    /// Comma-separated arguments after the opening parenthesis
    fn arguments(&mut self) -> Result<Vec<Expr>, ExprError> {
        let mut args = Vec::new();
        if self.eat(&TokenKind::RParen) {
            return Ok(args);
        }
        loop {
            args.push(self.sum()?);
            if self.eat(&TokenKind::Comma) {
                continue;
            }
            self.expect(&TokenKind::RParen)?;
            return Ok(args);
        }
    }
}

fn unexpected(token: &Token) -> ExprError {
    ExprError::UnexpectedToken {
        pos: token.pos,
        found: token.kind.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(source: &str) -> String {
        parse(source).unwrap().to_string()
    }

    fn eval(source: &str, x: f64) -> f64 {
        parse(source).unwrap().eval(x)
    }

    #[test]
    fn test_precedence() {
        assert_eq!(shape("1 + 2 * x"), "(1 + (2 * x))");
        assert_eq!(shape("1 - 2 - 3"), "((1 - 2) - 3)");
        assert_eq!(shape("8 / 4 / 2"), "((8 / 4) / 2)");
    }

    #[test]
    fn test_power_right_associative() {
        assert_eq!(shape("2^3^2"), "(2 ^ (3 ^ 2))");
        assert_eq!(eval("2^3^2", 0.0), 512.0);
    }

    #[test]
    fn test_unary_minus_below_power() {
        assert_eq!(shape("-x^2"), "(-(x ^ 2))");
        assert_eq!(eval("-x^2", 3.0), -9.0);
        assert_eq!(eval("2^-1", 0.0), 0.5);
        assert_eq!(eval("--x", 4.0), 4.0);
        assert_eq!(eval("+x", 4.0), 4.0);
    }

    #[test]
    fn test_parentheses() {
        assert_eq!(eval("(1 + x) * 2", 3.0), 8.0);
        assert_eq!(eval("((x))", 7.0), 7.0);
    }

    #[test]
    fn test_function_calls() {
        assert!((eval("sin(x)^2 + cos(x)^2", 0.7) - 1.0).abs() < 1e-12);
        assert_eq!(eval("pow(x, 3)", 2.0), 8.0);
        assert_eq!(eval("max(x, 1 / x)", 0.5), 2.0);
        assert!((eval("log(e)", 0.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_reciprocal_pole() {
        assert_eq!(eval("1 / x", 2.0), 0.5);
        assert!(eval("1 / x", 0.0).is_infinite());
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse(""), Err(ExprError::Empty));
        assert_eq!(parse("   "), Err(ExprError::Empty));
    }

    #[test]
    fn test_unexpected_end() {
        assert_eq!(parse("1 +"), Err(ExprError::UnexpectedEnd));
        assert_eq!(parse("(x"), Err(ExprError::UnexpectedEnd));
        assert_eq!(parse("sin"), Err(ExprError::UnexpectedEnd));
    }

    #[test]
    fn test_trailing_tokens() {
        assert_eq!(
            parse("x x"),
            Err(ExprError::UnexpectedToken { pos: 2, found: "x".into() })
        );
        assert_eq!(
            parse("x)"),
            Err(ExprError::UnexpectedToken { pos: 1, found: ")".into() })
        );
    }

    #[test]
    fn test_unknown_identifier() {
        assert_eq!(
            parse("2 * y"),
            Err(ExprError::UnknownIdentifier { pos: 4, name: "y".into() })
        );
    }

    #[test]
    fn test_arity_checked() {
        assert_eq!(
            parse("sin(x, 2)"),
            Err(ExprError::Arity { name: "sin".into(), expected: 1, found: 2 })
        );
        assert_eq!(
            parse("atan2(x)"),
            Err(ExprError::Arity { name: "atan2".into(), expected: 2, found: 1 })
        );
        assert_eq!(
            parse("abs()"),
            Err(ExprError::Arity { name: "abs".into(), expected: 1, found: 0 })
        );
    }

    #[test]
    fn test_math_constants_case_sensitive() {
        assert_eq!(eval("Math.PI", 0.0), std::f64::consts::PI);
        assert_eq!(eval("Math.E * e", 0.0), std::f64::consts::E * std::f64::consts::E);
        assert_eq!(
            parse("2 * PI"),
            Err(ExprError::UnknownIdentifier { pos: 4, name: "PI".into() })
        );
        assert_eq!(
            parse("Math.pi"),
            Err(ExprError::UnknownIdentifier { pos: 0, name: "Math.pi".into() })
        );
        assert_eq!(
            parse("Math.x"),
            Err(ExprError::UnknownIdentifier { pos: 0, name: "Math.x".into() })
        );
    }

    #[test]
    fn test_moderate_nesting_parses() {
        let source = format!("{}x{}", "(".repeat(200), ")".repeat(200));
        assert_eq!(eval(&source, 3.0), 3.0);
        assert_eq!(eval(&format!("{}x", "-".repeat(200)), 3.0), 3.0);
    }

    #[test]
    fn test_deep_parentheses_rejected() {
        let source = format!("{}x{}", "(".repeat(100_000), ")".repeat(100_000));
        assert!(matches!(parse(&source), Err(ExprError::TooDeep { .. })));
    }

    #[test]
    fn test_deep_unary_rejected() {
        let source = format!("{}x", "-".repeat(100_000));
        assert!(matches!(parse(&source), Err(ExprError::TooDeep { .. })));

        let source = format!("2{}", "^2".repeat(100_000));
        assert!(matches!(parse(&source), Err(ExprError::TooDeep { .. })));
    }

    #[test]
    fn test_long_chain_rejected() {
        // Left-leaning trees grow in a loop, not by recursion
        let source = format!("x{}", " + x".repeat(100_000));
        assert!(matches!(parse(&source), Err(ExprError::TooDeep { .. })));

        let short = format!("x{}", " * 1".repeat(100));
        assert_eq!(eval(&short, 5.0), 5.0);
    }

    #[test]
    fn test_misplaced_operator() {
        assert_eq!(
            parse("* x"),
            Err(ExprError::UnexpectedToken { pos: 0, found: "*".into() })
        );
    }
}
