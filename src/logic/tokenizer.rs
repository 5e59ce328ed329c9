use crate::logic::error::SyntaxError;
use std::fmt;

/// One lexical unit of a sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// `[`
    OpenBracket,
    /// `]`
    CloseBracket,
    /// `-` / `¬`
    Not,
    /// `^` / `∧`
    And,
    /// `v` / `∨`
    Or,
    /// `x` / `⊕`
    Xor,
    /// `=>` / `⇒`
    Implies,
    /// `<=>` / `⇔`
    Iff,
    /// A variable name: a maximal run of word characters.
    Ident(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenParen => write!(f, "("),
            Self::CloseParen => write!(f, ")"),
            Self::OpenBracket => write!(f, "["),
            Self::CloseBracket => write!(f, "]"),
            Self::Not => write!(f, "¬"),
            Self::And => write!(f, "∧"),
            Self::Or => write!(f, "∨"),
            Self::Xor => write!(f, "⊕"),
            Self::Implies => write!(f, "⇒"),
            Self::Iff => write!(f, "⇔"),
            Self::Ident(name) => write!(f, "{name}"),
        }
    }
}

/// Splits a sentence into tokens.
///
/// Connectives have an ASCII and a Unicode spelling; `<=>` and `=>` are
/// matched greedily before any single-character reading. Identifiers are
/// maximal runs of word characters, except that the bare words `v` and `x`
/// are the OR and XOR connectives and can never name a variable.
pub fn tokenize(input: &str) -> Result<Vec<Token>, SyntaxError> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '(' => {
                chars.next();
                tokens.push(Token::OpenParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::CloseParen);
            }
            '[' => {
                chars.next();
                tokens.push(Token::OpenBracket);
            }
            ']' => {
                chars.next();
                tokens.push(Token::CloseBracket);
            }
            '-' | '¬' => {
                chars.next();
                tokens.push(Token::Not);
            }
            '^' | '∧' => {
                chars.next();
                tokens.push(Token::And);
            }
            '∨' => {
                chars.next();
                tokens.push(Token::Or);
            }
            '⊕' => {
                chars.next();
                tokens.push(Token::Xor);
            }
            '⇒' => {
                chars.next();
                tokens.push(Token::Implies);
            }
            '⇔' => {
                chars.next();
                tokens.push(Token::Iff);
            }
            '=' => {
                chars.next();
                match chars.next() {
                    Some('>') => tokens.push(Token::Implies),
                    _ => return Err(SyntaxError::UnexpectedCharacter('=')),
                }
            }
            '<' => {
                chars.next();
                match (chars.next(), chars.next()) {
                    (Some('='), Some('>')) => tokens.push(Token::Iff),
                    _ => return Err(SyntaxError::UnexpectedCharacter('<')),
                }
            }
            c if c.is_alphanumeric() || c == '_' => {
                let mut word = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_alphanumeric() || c == '_' {
                        word.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(match word.as_str() {
                    "v" => Token::Or,
                    "x" => Token::Xor,
                    _ => Token::Ident(word),
                });
            }
            other => return Err(SyntaxError::UnexpectedCharacter(other)),
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_connectives() {
        let tokens = tokenize("p ^ q v -r").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Ident("p".to_string()),
                Token::And,
                Token::Ident("q".to_string()),
                Token::Or,
                Token::Not,
                Token::Ident("r".to_string()),
            ]
        );
    }

    #[test]
    fn unicode_connectives() {
        let tokens = tokenize("¬p ∧ (q ∨ r) ⊕ s").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Not,
                Token::Ident("p".to_string()),
                Token::And,
                Token::OpenParen,
                Token::Ident("q".to_string()),
                Token::Or,
                Token::Ident("r".to_string()),
                Token::CloseParen,
                Token::Xor,
                Token::Ident("s".to_string()),
            ]
        );
    }

    #[test]
    fn arrows_match_greedily() {
        let tokens = tokenize("p <=> q => r").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Ident("p".to_string()),
                Token::Iff,
                Token::Ident("q".to_string()),
                Token::Implies,
                Token::Ident("r".to_string()),
            ]
        );
    }

    #[test]
    fn bare_v_and_x_are_connectives() {
        assert_eq!(tokenize("a x b").unwrap()[1], Token::Xor);
        assert_eq!(tokenize("a v b").unwrap()[1], Token::Or);
        // Longer words that merely start with v or x stay identifiers.
        assert_eq!(
            tokenize("victor").unwrap(),
            vec![Token::Ident("victor".to_string())]
        );
        assert_eq!(
            tokenize("x1").unwrap(),
            vec![Token::Ident("x1".to_string())]
        );
    }

    #[test]
    fn identifiers_take_digits_and_underscores() {
        assert_eq!(
            tokenize("rain_1").unwrap(),
            vec![Token::Ident("rain_1".to_string())]
        );
    }

    #[test]
    fn brackets() {
        let tokens = tokenize("[p]").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::OpenBracket,
                Token::Ident("p".to_string()),
                Token::CloseBracket,
            ]
        );
    }

    #[test]
    fn rejects_stray_characters() {
        assert_eq!(
            tokenize("p & q"),
            Err(SyntaxError::UnexpectedCharacter('&'))
        );
        assert_eq!(
            tokenize("p = q"),
            Err(SyntaxError::UnexpectedCharacter('='))
        );
        assert_eq!(
            tokenize("p <= q"),
            Err(SyntaxError::UnexpectedCharacter('<'))
        );
    }

    #[test]
    fn empty_input_gives_no_tokens() {
        assert_eq!(tokenize("   ").unwrap(), Vec::new());
    }
}
