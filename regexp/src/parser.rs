use crate::rpn::{Item, Rpn};

use std::convert::TryFrom;

use fsa_automata::Symbol;

/// Alias for [`Result`] for [`SyntaxError`].
pub type ParseResult<T> = std::result::Result<T, SyntaxError>;

/// Error returned when attempting to parse an invalid regular expression. Positions count
/// characters of the source, starting at 0.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum SyntaxError {
    #[error("empty regular expression")]
    EmptyExpression,

    /// A character that is neither a letter, a digit, the epsilon marker, an operator nor a
    /// parenthesis.
    #[error("unexpected token {token:?} at position {position}")]
    UnexpectedToken { token: char, position: usize },

    /// There are one or more sets of unclosed parentheses, or a closing parenthesis without an
    /// opening one.
    #[error("unbalanced parentheses at position {position}")]
    UnbalancedParentheses { position: usize },

    /// There are an invalid number of operators, or operands are missing.
    #[error("unbalanced operators at position {position}")]
    UnbalancedOperators { position: usize },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Operator {
    Union,
    Concatenation,
    KleeneStar,
}

impl Operator {
    #[inline]
    pub fn precedence(self) -> u8 {
        match self {
            Operator::Union => 1,
            Operator::Concatenation => 2,
            Operator::KleeneStar => 3,
        }
    }

    /// The number of operands the operator takes from the evaluation stack.
    #[inline]
    pub fn arity(self) -> usize {
        match self {
            Operator::KleeneStar => 1,
            Operator::Union | Operator::Concatenation => 2,
        }
    }

    #[inline]
    pub fn as_char(self) -> char {
        match self {
            Operator::Union => '|',
            Operator::Concatenation => '&',
            Operator::KleeneStar => '*',
        }
    }

    #[inline]
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '|' => Some(Operator::Union),
            '&' => Some(Operator::Concatenation),
            '*' => Some(Operator::KleeneStar),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Token {
    Symbol(Symbol),
    Operator(Operator),
    LeftParen,
    RightParen,
}

impl Token {
    #[inline]
    fn from_char(c: char) -> Option<Self> {
        match c {
            '(' => Some(Token::LeftParen),
            ')' => Some(Token::RightParen),
            _ => Operator::from_char(c)
                .map(Token::Operator)
                .or_else(|| Symbol::try_from(c).ok().map(Token::Symbol)),
        }
    }

    /// An operand may start with this token.
    #[inline]
    fn starts_operand(self) -> bool {
        matches!(self, Token::Symbol(_) | Token::LeftParen)
    }

    /// An operand may end with this token.
    #[inline]
    fn ends_operand(self) -> bool {
        matches!(
            self,
            Token::Symbol(_) | Token::RightParen | Token::Operator(Operator::KleeneStar)
        )
    }
}

/// Split the expression into tokens, inserting a concatenation operator between every pair of
/// juxtaposed operands. Each token carries the position of the character it came from; an
/// inserted operator carries the position of the token that follows it.
fn tokenize(expr: &str) -> ParseResult<Vec<(usize, Token)>> {
    let mut tokens: Vec<(usize, Token)> = Vec::with_capacity(expr.len());

    for (position, c) in expr.chars().enumerate() {
        let token =
            Token::from_char(c).ok_or(SyntaxError::UnexpectedToken { token: c, position })?;

        if token.starts_operand() {
            if let Some(&(_, prev)) = tokens.last() {
                if prev.ends_operand() {
                    tokens.push((position, Token::Operator(Operator::Concatenation)));
                }
            }
        }
        tokens.push((position, token));
    }

    Ok(tokens)
}

/// Reorder tokens into reverse Polish notation with the shunting-yard algorithm. Parentheses
/// are consumed; they must be balanced.
fn shunting_yard(tokens: &[(usize, Token)]) -> ParseResult<Vec<(usize, Item)>> {
    let mut output = Vec::with_capacity(tokens.len());
    // Holds only operators and left parentheses.
    let mut stack: Vec<(usize, Token)> = Vec::new();

    for &(position, token) in tokens {
        match token {
            Token::Symbol(s) => output.push((position, Item::Symbol(s))),
            Token::Operator(op) => {
                while let Some(&(top_position, Token::Operator(top))) = stack.last() {
                    if top.precedence() < op.precedence() {
                        break;
                    }
                    output.push((top_position, Item::Operator(top)));
                    stack.pop();
                }
                stack.push((position, token));
            }
            Token::LeftParen => stack.push((position, token)),
            Token::RightParen => loop {
                match stack.pop() {
                    Some((op_position, Token::Operator(op))) => {
                        output.push((op_position, Item::Operator(op)))
                    }
                    Some((_, Token::LeftParen)) => break,
                    _ => return Err(SyntaxError::UnbalancedParentheses { position }),
                }
            },
        }
    }

    while let Some((position, token)) = stack.pop() {
        match token {
            Token::Operator(op) => output.push((position, Item::Operator(op))),
            _ => return Err(SyntaxError::UnbalancedParentheses { position }),
        }
    }

    Ok(output)
}

/// Parse a regular expression into reverse Polish notation.
///
/// Letters, digits and the epsilon marker are operands. `|` is union, `&` is concatenation and
/// postfix `*` is Kleene star, binding in that order from loosest to tightest; concatenation may
/// be left implicit. Parentheses group.
pub fn parse(expr: &str) -> ParseResult<Rpn> {
    let tokens = tokenize(expr)?;
    let items = shunting_yard(&tokens)?;
    Ok(Rpn::from_items(items))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rpn(expr: &str) -> String {
        parse(expr).unwrap().to_string()
    }

    #[test]
    fn test_implicit_concatenation() {
        let tokens: String = tokenize("ab(c)*d|e")
            .unwrap()
            .into_iter()
            .map(|(_, t)| match t {
                Token::Symbol(s) => s.as_char(),
                Token::Operator(op) => op.as_char(),
                Token::LeftParen => '(',
                Token::RightParen => ')',
            })
            .collect();
        assert_eq!("a&b&(c)*&d|e", tokens);
    }

    #[test]
    fn test_explicit_concatenation_is_kept() {
        assert_eq!("ab&", rpn("a&b"));
        assert_eq!("ab&c&", rpn("a&bc"));
    }

    #[test]
    fn test_precedence() {
        assert_eq!("ab|", rpn("a|b"));
        assert_eq!("ab*|", rpn("a|b*"));
        assert_eq!("a*b&", rpn("a*b"));
        assert_eq!("ab&c|", rpn("ab|c"));
        assert_eq!("abc&|", rpn("a|bc"));
        assert_eq!("ab|*", rpn("(a|b)*"));
        assert_eq!("ab&*", rpn("(a&b)*"));
        assert_eq!("aE|", rpn("a|E"));
        assert_eq!("a**", rpn("a**"));
    }

    #[test]
    fn test_positions() {
        let items: Vec<usize> = parse("a|b").unwrap().items().map(|(p, _)| p).collect();
        assert_eq!(vec![0, 2, 1], items);
    }

    #[test]
    fn test_unbalanced_parentheses() {
        assert_eq!(
            Err(SyntaxError::UnbalancedParentheses { position: 1 }),
            parse("a)")
        );
        assert_eq!(
            Err(SyntaxError::UnbalancedParentheses { position: 0 }),
            parse("(ab")
        );
    }

    #[test]
    fn test_unexpected_token() {
        assert_eq!(
            Err(SyntaxError::UnexpectedToken {
                token: 'A',
                position: 1
            }),
            parse("aA")
        );
        assert!(parse("a b").is_err());
        assert!(parse("a+").is_err());
    }
}
