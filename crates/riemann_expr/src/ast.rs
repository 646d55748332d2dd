//! Expression tree and evaluation

use std::fmt;

/// Prefix operators
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
}

/// Infix operators
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    /// Truncated remainder (sign follows the dividend)
    Rem,
    Pow,
}

impl BinaryOp {
    fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Pow => "^",
        }
    }

    #[inline]
    fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            BinaryOp::Add => a + b,
            BinaryOp::Sub => a - b,
            BinaryOp::Mul => a * b,
            BinaryOp::Div => a / b,
            BinaryOp::Rem => a % b,
            BinaryOp::Pow => a.powf(b),
        }
    }
}

/// Named constants
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Constant {
    Pi,
    E,
}

impl Constant {
    /// Look up a bare constant name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pi" => Some(Constant::Pi),
            "e" => Some(Constant::E),
            _ => None,
        }
    }

    /// Look up the member of `Math.PI` / `Math.E`
    pub fn from_math_member(name: &str) -> Option<Self> {
        match name {
            "PI" => Some(Constant::Pi),
            "E" => Some(Constant::E),
            _ => None,
        }
    }

    pub fn value(self) -> f64 {
        match self {
            Constant::Pi => std::f64::consts::PI,
            Constant::E => std::f64::consts::E,
        }
    }
}

/// Builtin functions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Exp,
    /// Natural logarithm (`ln` and `log` both map here)
    Ln,
    Log10,
    Log2,
    Sqrt,
    Cbrt,
    Abs,
    Floor,
    Ceil,
    Round,
    Trunc,
    Sign,
    Pow,
    Atan2,
    Min,
    Max,
    Hypot,
}

impl Function {
    pub fn from_name(name: &str) -> Option<Self> {
        let f = match name {
            "sin" => Function::Sin,
            "cos" => Function::Cos,
            "tan" => Function::Tan,
            "asin" => Function::Asin,
            "acos" => Function::Acos,
            "atan" => Function::Atan,
            "sinh" => Function::Sinh,
            "cosh" => Function::Cosh,
            "tanh" => Function::Tanh,
            "exp" => Function::Exp,
            "ln" | "log" => Function::Ln,
            "log10" => Function::Log10,
            "log2" => Function::Log2,
            "sqrt" => Function::Sqrt,
            "cbrt" => Function::Cbrt,
            "abs" => Function::Abs,
            "floor" => Function::Floor,
            "ceil" => Function::Ceil,
            "round" => Function::Round,
            "trunc" => Function::Trunc,
            "sign" => Function::Sign,
            "pow" => Function::Pow,
            "atan2" => Function::Atan2,
            "min" => Function::Min,
            "max" => Function::Max,
            "hypot" => Function::Hypot,
            _ => return None,
        };
        Some(f)
    }

    pub fn name(self) -> &'static str {
        match self {
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tan => "tan",
            Function::Asin => "asin",
            Function::Acos => "acos",
            Function::Atan => "atan",
            Function::Sinh => "sinh",
            Function::Cosh => "cosh",
            Function::Tanh => "tanh",
            Function::Exp => "exp",
            Function::Ln => "ln",
            Function::Log10 => "log10",
            Function::Log2 => "log2",
            Function::Sqrt => "sqrt",
            Function::Cbrt => "cbrt",
            Function::Abs => "abs",
            Function::Floor => "floor",
            Function::Ceil => "ceil",
            Function::Round => "round",
            Function::Trunc => "trunc",
            Function::Sign => "sign",
            Function::Pow => "pow",
            Function::Atan2 => "atan2",
            Function::Min => "min",
            Function::Max => "max",
            Function::Hypot => "hypot",
        }
    }

    /// Number of arguments the function takes
    pub fn arity(self) -> usize {
        match self {
            Function::Pow | Function::Atan2 | Function::Min | Function::Max | Function::Hypot => 2,
            _ => 1,
        }
    }

    /// Apply to already-evaluated arguments (length checked at parse time)
    fn apply(self, args: &[f64]) -> f64 {
        let a = args[0];
        match self {
            Function::Sin => a.sin(),
            Function::Cos => a.cos(),
            Function::Tan => a.tan(),
            Function::Asin => a.asin(),
            Function::Acos => a.acos(),
            Function::Atan => a.atan(),
            Function::Sinh => a.sinh(),
            Function::Cosh => a.cosh(),
            Function::Tanh => a.tanh(),
            Function::Exp => a.exp(),
            Function::Ln => a.ln(),
            Function::Log10 => a.log10(),
            Function::Log2 => a.log2(),
            Function::Sqrt => a.sqrt(),
            Function::Cbrt => a.cbrt(),
            Function::Abs => a.abs(),
            Function::Floor => a.floor(),
            Function::Ceil => a.ceil(),
            // Halves round toward +inf, as Math.round does
            Function::Round => {
                let f = a.floor();
                if a - f >= 0.5 {
                    f + 1.0
                } else {
                    f
                }
            }
            Function::Trunc => a.trunc(),
            // Zero and NaN map to themselves
            Function::Sign => {
                if a == 0.0 || a.is_nan() {
                    a
                } else {
                    a.signum()
                }
            }
            Function::Pow => a.powf(args[1]),
            Function::Atan2 => a.atan2(args[1]),
            Function::Min => nan_aware(a, args[1], f64::min),
            Function::Max => nan_aware(a, args[1], f64::max),
            Function::Hypot => a.hypot(args[1]),
        }
    }
}

/// `f64::min`/`max` ignore NaN; a NaN argument must poison the result
fn nan_aware(a: f64, b: f64, f: fn(f64, f64) -> f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        f(a, b)
    }
}

/// Parsed expression in the single variable `x`
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Number(f64),
    Var,
    Const(Constant),
    Unary(UnaryOp, Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
    Call(Function, Vec<Expr>),
}

impl Expr {
    /// Evaluate at `x`
    ///
    /// Never fails: division by zero and domain errors produce inf/NaN.
    pub fn eval(&self, x: f64) -> f64 {
        match self {
            Expr::Number(n) => *n,
            Expr::Var => x,
            Expr::Const(c) => c.value(),
            Expr::Unary(UnaryOp::Neg, inner) => -inner.eval(x),
            Expr::Binary(op, lhs, rhs) => op.apply(lhs.eval(x), rhs.eval(x)),
            Expr::Call(f, args) => match args.as_slice() {
                [a] => f.apply(&[a.eval(x)]),
                [a, b] => f.apply(&[a.eval(x), b.eval(x)]),
                _ => f64::NAN,
            },
        }
    }
}

impl fmt::Display for Expr {
    /// Fully parenthesized form, useful for checking precedence
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(n) => write!(f, "{}", n),
            Expr::Var => write!(f, "x"),
            Expr::Const(Constant::Pi) => write!(f, "pi"),
            Expr::Const(Constant::E) => write!(f, "e"),
            Expr::Unary(UnaryOp::Neg, inner) => write!(f, "(-{})", inner),
            Expr::Binary(op, lhs, rhs) => write!(f, "({} {} {})", lhs, op.symbol(), rhs),
            Expr::Call(func, args) => {
                write!(f, "{}(", func.name())?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(f: Function, args: &[f64]) -> f64 {
        f.apply(args)
    }

    #[test]
    fn test_function_lookup_roundtrip_names() {
        for name in ["sin", "log10", "atan2", "hypot", "sign"] {
            let f = Function::from_name(name).unwrap();
            assert_eq!(f.name(), name);
        }
        assert_eq!(Function::from_name("log"), Some(Function::Ln));
        assert_eq!(Function::from_name("Sin"), None);
    }

    #[test]
    fn test_arity() {
        assert_eq!(Function::Sin.arity(), 1);
        assert_eq!(Function::Pow.arity(), 2);
        assert_eq!(Function::Hypot.arity(), 2);
    }

    #[test]
    fn test_round_matches_javascript() {
        assert_eq!(call(Function::Round, &[2.5]), 3.0);
        assert_eq!(call(Function::Round, &[-2.5]), -2.0);
        assert_eq!(call(Function::Round, &[-2.6]), -3.0);
        // Adding 0.5 first would round these up
        assert_eq!(call(Function::Round, &[0.49999999999999994]), 0.0);
        assert_eq!(call(Function::Round, &[4503599627370497.0]), 4503599627370497.0);
    }

    #[test]
    fn test_sign_of_zero() {
        assert_eq!(call(Function::Sign, &[0.0]), 0.0);
        assert_eq!(call(Function::Sign, &[-3.0]), -1.0);
        assert!(call(Function::Sign, &[f64::NAN]).is_nan());
    }

    #[test]
    fn test_min_max_propagate_nan() {
        assert!(call(Function::Min, &[f64::NAN, 1.0]).is_nan());
        assert!(call(Function::Max, &[1.0, f64::NAN]).is_nan());
        assert_eq!(call(Function::Max, &[1.0, 2.0]), 2.0);
    }

    #[test]
    fn test_eval_ieee_semantics() {
        let recip = Expr::Binary(
            BinaryOp::Div,
            Box::new(Expr::Number(1.0)),
            Box::new(Expr::Var),
        );
        assert_eq!(recip.eval(0.0), f64::INFINITY);
        assert_eq!(recip.eval(-0.0), f64::NEG_INFINITY);

        let sqrt = Expr::Call(Function::Sqrt, vec![Expr::Var]);
        assert!(sqrt.eval(-1.0).is_nan());
    }

    #[test]
    fn test_remainder_sign_follows_dividend() {
        assert_eq!(BinaryOp::Rem.apply(-7.0, 3.0), -1.0);
        assert_eq!(BinaryOp::Rem.apply(7.0, -3.0), 1.0);
    }

    #[test]
    fn test_constant_spellings() {
        assert_eq!(Constant::from_name("pi"), Some(Constant::Pi));
        assert_eq!(Constant::from_name("PI"), None);
        assert_eq!(Constant::from_math_member("E"), Some(Constant::E));
        assert_eq!(Constant::from_math_member("e"), None);
    }
}
