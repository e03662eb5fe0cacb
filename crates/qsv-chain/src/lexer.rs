//! Lexer for gate chains.

use logos::Logos;
use qsv_ir::Quoted;

/// Tokens of the chain notation.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
#[logos(skip r"#[^\n]*")]
pub enum Token {
    // Constants
    #[token("pi")]
    Pi,

    #[token("true")]
    True,

    #[token("false")]
    False,

    // Literals
    #[regex(r"[0-9]+\.[0-9]*([eE][+-]?[0-9]+)?", parse_float)]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+", parse_float)]
    FloatLiteral(f64),

    #[regex(r"[0-9]+", |lex| lex.slice().parse::<i64>().ok())]
    IntLiteral(i64),

    #[regex(r#""([^"\\]|\\.)*""#, |lex| unescape(lex.slice()))]
    StringLiteral(String),

    // Identifiers
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    // Operators and punctuation
    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("/")]
    Slash,

    #[token("=")]
    Eq,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token(":")]
    Colon,

    #[token(",")]
    Comma,

    #[token(".")]
    Dot,
}

/// Float literals that overflow to infinity are rejected.
fn parse_float(lex: &mut logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Strip the quotes and resolve `\"`, `\\`, `\n` and `\t`. Any other escape
/// is a lexer error.
fn unescape(slice: &str) -> Option<String> {
    let inner = &slice[1..slice.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        out.push(match chars.next()? {
            '"' => '"',
            '\\' => '\\',
            'n' => '\n',
            't' => '\t',
            _ => return None,
        });
    }
    Some(out)
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Pi => write!(f, "pi"),
            Token::True => write!(f, "true"),
            Token::False => write!(f, "false"),
            Token::FloatLiteral(v) => write!(f, "{v}"),
            Token::IntLiteral(v) => write!(f, "{v}"),
            Token::StringLiteral(s) => write!(f, "{}", Quoted(s)),
            Token::Identifier(s) => write!(f, "{s}"),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::Eq => write!(f, "="),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::LBracket => write!(f, "["),
            Token::RBracket => write!(f, "]"),
            Token::Colon => write!(f, ":"),
            Token::Comma => write!(f, ","),
            Token::Dot => write!(f, "."),
        }
    }
}

/// A token with its byte span in the source.
#[derive(Debug, Clone)]
pub struct SpannedToken {
    pub token: Token,
    pub span: std::ops::Range<usize>,
}

/// Tokenize a chain source string.
pub fn tokenize(source: &str) -> Vec<Result<SpannedToken, (std::ops::Range<usize>, String)>> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        if let Ok(token) = result {
            tokens.push(Ok(SpannedToken { token, span }));
        } else {
            let slice = &source[span.clone()];
            tokens.push(Err((span, format!("Invalid token: '{slice}'"))));
        }
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(source: &str) -> Vec<Token> {
        tokenize(source)
            .into_iter()
            .filter_map(Result::ok)
            .map(|t| t.token)
            .collect()
    }

    #[test]
    fn test_segment_tokens() {
        assert_eq!(
            tokens("h[0].cx[0, 1]"),
            vec![
                Token::Identifier("h".into()),
                Token::LBracket,
                Token::IntLiteral(0),
                Token::RBracket,
                Token::Dot,
                Token::Identifier("cx".into()),
                Token::LBracket,
                Token::IntLiteral(0),
                Token::Comma,
                Token::IntLiteral(1),
                Token::RBracket,
            ]
        );
    }

    #[test]
    fn test_arguments() {
        let toks = tokens("rz(theta = pi/2, 1.5e-1)");
        assert_eq!(toks[0], Token::Identifier("rz".into()));
        assert_eq!(toks[3], Token::Eq);
        assert_eq!(toks[4], Token::Pi);
        assert_eq!(toks[5], Token::Slash);
        assert!(matches!(toks[8], Token::FloatLiteral(v) if (v - 0.15).abs() < 1e-12));
    }

    #[test]
    fn test_keywords_are_not_identifiers() {
        assert_eq!(
            tokens("pi true false pix"),
            vec![
                Token::Pi,
                Token::True,
                Token::False,
                Token::Identifier("pix".into()),
            ]
        );
    }

    #[test]
    fn test_comments_and_strings() {
        let toks = tokens("dbg(\"after h\")[:]  # trailing\n");
        assert_eq!(toks[2], Token::StringLiteral("after h".into()));
        assert_eq!(toks.len(), 7);
    }

    #[test]
    fn test_string_escapes() {
        let toks = tokens(r#"dbg("a\"b\\c\n")"#);
        assert_eq!(toks[2], Token::StringLiteral("a\"b\\c\n".into()));
        assert_eq!(toks[2].to_string(), r#""a\"b\\c\n""#);
        assert!(tokenize(r#"dbg("\q")"#).iter().any(Result::is_err));
    }

    #[test]
    fn test_overflowing_float_is_rejected() {
        assert!(tokenize("rz(1e400)").iter().any(Result::is_err));
        assert!(matches!(tokens("1e300")[0], Token::FloatLiteral(_)));
    }

    #[test]
    fn test_invalid_token_reports_span() {
        let results = tokenize("h[0] $");
        let err = results.into_iter().find_map(Result::err).unwrap();
        assert_eq!(err.0, 5..6);
        assert!(err.1.contains('$'));
    }
}
