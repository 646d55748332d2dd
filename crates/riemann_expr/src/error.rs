//! Expression error types

use std::fmt;

/// Error type for tokenizing and parsing expressions
///
/// Positions are byte offsets into the source text.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprError {
    /// Blank input
    Empty,
    /// A character that starts no token
    UnexpectedChar { pos: usize, ch: char },
    /// A token that does not fit the grammar here
    UnexpectedToken { pos: usize, found: String },
    /// Input ended in the middle of an expression
    UnexpectedEnd,
    /// Identifier that is neither `x`, a constant, nor a function
    UnknownIdentifier { pos: usize, name: String },
    /// Function called with the wrong number of arguments
    Arity { name: String, expected: usize, found: usize },
    /// Number literal that does not parse as f64
    InvalidNumber { pos: usize, text: String },
    /// Nesting deeper than the parser accepts
    TooDeep { pos: usize },
}

impl fmt::Display for ExprError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExprError::Empty => write!(f, "Empty expression"),
            ExprError::UnexpectedChar { pos, ch } => {
                write!(f, "Unexpected character '{}' at {}", ch, pos)
            }
            ExprError::UnexpectedToken { pos, found } => {
                write!(f, "Unexpected '{}' at {}", found, pos)
            }
            ExprError::UnexpectedEnd => write!(f, "Unexpected end of expression"),
            ExprError::UnknownIdentifier { pos, name } => {
                write!(f, "Unknown identifier '{}' at {}", name, pos)
            }
            ExprError::Arity { name, expected, found } => write!(
                f,
                "{}() takes {} argument{}, got {}",
                name,
                expected,
                if *expected == 1 { "" } else { "s" },
                found
            ),
            ExprError::InvalidNumber { pos, text } => {
                write!(f, "Invalid number '{}' at {}", text, pos)
            }
            ExprError::TooDeep { pos } => write!(f, "Expression nested too deeply at {}", pos),
        }
    }
}

impl std::error::Error for ExprError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(ExprError::Empty.to_string(), "Empty expression");
        assert_eq!(
            ExprError::UnexpectedChar { pos: 3, ch: '$' }.to_string(),
            "Unexpected character '$' at 3"
        );
        assert_eq!(
            ExprError::UnknownIdentifier { pos: 0, name: "y".into() }.to_string(),
            "Unknown identifier 'y' at 0"
        );
    }

    #[test]
    fn test_arity_pluralization() {
        let one = ExprError::Arity { name: "sin".into(), expected: 1, found: 2 };
        assert_eq!(one.to_string(), "sin() takes 1 argument, got 2");

        let two = ExprError::Arity { name: "pow".into(), expected: 2, found: 1 };
        assert_eq!(two.to_string(), "pow() takes 2 arguments, got 1");
    }
}
