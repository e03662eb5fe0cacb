//! Recursive-descent parser for gate chains.

use qsv_ir::Target;

use crate::ast::{Argument, BinOp, Chain, Expression, Segment};
use crate::error::{ChainError, ChainResult};
use crate::lexer::{SpannedToken, Token, tokenize};

/// Deepest nesting of parentheses, negations and operators accepted in one
/// argument or target.
pub const MAX_NESTING: usize = 128;

/// Parse a chain source string into its AST.
pub fn parse(source: &str) -> ChainResult<Chain> {
    let mut parser = Parser::new(source)?;
    parser.parse_chain()
}

/// Parser state.
struct Parser {
    tokens: Vec<SpannedToken>,
    pos: usize,
    /// Byte length of the source, reported for errors at end of input.
    end: usize,
    depth: usize,
}

impl Parser {
    /// Create a new parser from source.
    fn new(source: &str) -> ChainResult<Self> {
        let mut tokens = Vec::new();
        for result in tokenize(source) {
            match result {
                Ok(t) => tokens.push(t),
                Err((span, msg)) => {
                    return Err(ChainError::LexerError {
                        position: span.start,
                        message: msg,
                    });
                }
            }
        }

        Ok(Self {
            tokens,
            pos: 0,
            end: source.len(),
            depth: 0,
        })
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|t| &t.token)
    }

    fn peek_nth(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.pos + n).map(|t| &t.token)
    }

    /// Byte offset of the current token.
    fn position(&self) -> usize {
        self.tokens.get(self.pos).map_or(self.end, |t| t.span.start)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos)?.token.clone();
        self.pos += 1;
        Some(token)
    }

    fn unexpected(&self, expected: &str) -> ChainError {
        match self.peek() {
            Some(found) => ChainError::UnexpectedToken {
                position: self.position(),
                expected: expected.to_string(),
                found: found.to_string(),
            },
            None => ChainError::UnexpectedEof(expected.to_string()),
        }
    }

    /// Expect a specific token.
    #[allow(clippy::needless_pass_by_value)]
    fn expect(&mut self, expected: Token) -> ChainResult<()> {
        if self.check(&expected) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(&expected.to_string()))
        }
    }

    /// Go one level deeper, failing past [`MAX_NESTING`].
    fn descend(&mut self) -> ChainResult<()> {
        if self.depth >= MAX_NESTING {
            return Err(ChainError::InvalidExpression(format!(
                "nesting deeper than {MAX_NESTING} levels at byte {}",
                self.position()
            )));
        }
        self.depth += 1;
        Ok(())
    }

    /// Run `f` one level deeper.
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> ChainResult<T>) -> ChainResult<T> {
        self.descend()?;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn check(&self, token: &Token) -> bool {
        self.peek()
            .is_some_and(|t| std::mem::discriminant(t) == std::mem::discriminant(token))
    }

    fn consume(&mut self, token: &Token) -> bool {
        if self.check(token) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// chain := segment ('.' segment)*
    ///
    /// A source with no tokens is an empty chain.
    fn parse_chain(&mut self) -> ChainResult<Chain> {
        let mut segments = Vec::new();
        if !self.is_eof() {
            segments.push(self.parse_segment()?);
            while self.consume(&Token::Dot) {
                segments.push(self.parse_segment()?);
            }
        }
        if !self.is_eof() {
            return Err(self.unexpected("'.' or end of input"));
        }
        Ok(Chain { segments })
    }

    /// segment := IDENT call* '[' target ']'
    fn parse_segment(&mut self) -> ChainResult<Segment> {
        let name = self.parse_identifier()?;
        let mut calls = Vec::new();
        while self.consume(&Token::LParen) {
            calls.push(self.parse_arguments()?);
            self.expect(Token::RParen)?;
        }
        self.expect(Token::LBracket)?;
        let target = self.parse_target()?;
        self.expect(Token::RBracket)?;
        Ok(Segment {
            name,
            calls,
            target,
        })
    }

    fn parse_arguments(&mut self) -> ChainResult<Vec<Argument>> {
        if self.check(&Token::RParen) {
            return Ok(vec![]);
        }
        let mut args = vec![self.parse_argument()?];
        while self.consume(&Token::Comma) {
            args.push(self.parse_argument()?);
        }
        Ok(args)
    }

    /// arg := IDENT '=' expr | expr
    fn parse_argument(&mut self) -> ChainResult<Argument> {
        let keyword = matches!(
            (self.peek(), self.peek_nth(1)),
            (Some(Token::Identifier(_)), Some(Token::Eq))
        );
        let name = if keyword {
            let name = self.parse_identifier()?;
            self.expect(Token::Eq)?;
            Some(name)
        } else {
            None
        };
        Ok(Argument {
            name,
            value: self.parse_expression()?,
        })
    }

    /// expr := term (('+' | '-') term)*
    fn parse_expression(&mut self) -> ChainResult<Expression> {
        let entry = self.depth;
        let result = self.parse_expression_ops();
        self.depth = entry;
        result
    }

    fn parse_expression_ops(&mut self) -> ChainResult<Expression> {
        let mut left = self.parse_term()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinOp::Add,
                Some(Token::Minus) => BinOp::Sub,
                _ => break,
            };
            self.descend()?;
            self.advance();
            let right = self.parse_term()?;
            left = Expression::BinOp {
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    /// term := unary (('*' | '/') unary)*
    fn parse_term(&mut self) -> ChainResult<Expression> {
        let entry = self.depth;
        let result = self.parse_term_ops();
        self.depth = entry;
        result
    }

    fn parse_term_ops(&mut self) -> ChainResult<Expression> {
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinOp::Mul,
                Some(Token::Slash) => BinOp::Div,
                _ => break,
            };
            self.descend()?;
            self.advance();
            let right = self.parse_unary()?;
            left = Expression::BinOp {
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> ChainResult<Expression> {
        if self.consume(&Token::Minus) {
            let expr = self.nested(Self::parse_unary)?;
            return Ok(Expression::Neg(Box::new(expr)));
        }
        self.parse_atom()
    }

    fn parse_atom(&mut self) -> ChainResult<Expression> {
        let expr = match self.peek() {
            Some(Token::IntLiteral(v)) => Expression::Int(*v),
            Some(Token::FloatLiteral(v)) => Expression::Float(*v),
            Some(Token::StringLiteral(s)) => Expression::Str(s.clone()),
            Some(Token::Pi) => Expression::Pi,
            Some(Token::True) => Expression::Bool(true),
            Some(Token::False) => Expression::Bool(false),
            Some(Token::LParen) => {
                self.advance();
                let inner = self.nested(Self::parse_expression)?;
                self.expect(Token::RParen)?;
                return Ok(inner);
            }
            _ => return Err(self.unexpected("expression")),
        };
        self.advance();
        Ok(expr)
    }

    /// target := item (',' item)*
    fn parse_target(&mut self) -> ChainResult<Target> {
        let mut items = self.parse_target_items()?;
        if items.len() == 1 {
            if let Some(item) = items.pop() {
                return Ok(item);
            }
        }
        Ok(Target::Tuple(items))
    }

    fn parse_target_items(&mut self) -> ChainResult<Vec<Target>> {
        let mut items = vec![self.parse_target_item()?];
        while self.consume(&Token::Comma) {
            items.push(self.parse_target_item()?);
        }
        Ok(items)
    }

    /// item := INT | INT? ':' INT? | '(' target ')'
    fn parse_target_item(&mut self) -> ChainResult<Target> {
        match self.peek() {
            Some(Token::LParen) => {
                self.advance();
                let items = self.nested(Self::parse_target_items)?;
                self.expect(Token::RParen)?;
                Ok(Target::Tuple(items))
            }
            Some(Token::IntLiteral(start)) => {
                let start = *start;
                self.advance();
                if self.consume(&Token::Colon) {
                    Ok(Target::Slice {
                        start,
                        end: self.parse_optional_int(),
                    })
                } else {
                    Ok(Target::Index(start))
                }
            }
            Some(Token::Colon) => {
                self.advance();
                Ok(Target::Slice {
                    start: 0,
                    end: self.parse_optional_int(),
                })
            }
            _ => Err(self.unexpected("qubit index or slice")),
        }
    }

    fn parse_optional_int(&mut self) -> Option<i64> {
        if let Some(Token::IntLiteral(v)) = self.peek() {
            let v = *v;
            self.advance();
            Some(v)
        } else {
            None
        }
    }

    fn parse_identifier(&mut self) -> ChainResult<String> {
        if let Some(Token::Identifier(s)) = self.peek() {
            let s = s.clone();
            self.advance();
            Ok(s)
        } else {
            Err(self.unexpected("identifier"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bell_chain() {
        let chain = parse("h[0].cx[0, 1]").unwrap();
        assert_eq!(chain.segments.len(), 2);
        assert_eq!(chain.segments[0].name, "h");
        assert_eq!(chain.segments[0].target, Target::Index(0));
        assert_eq!(
            chain.segments[1].target,
            Target::Tuple(vec![Target::Index(0), Target::Index(1)])
        );
    }

    #[test]
    fn test_parse_slices() {
        let chain = parse("x[:].h[1:3].z[2:].i[:4]").unwrap();
        let targets: Vec<_> = chain.segments.iter().map(|s| s.target.clone()).collect();
        assert_eq!(
            targets,
            vec![
                Target::all(),
                Target::Slice {
                    start: 1,
                    end: Some(3)
                },
                Target::Slice {
                    start: 2,
                    end: None
                },
                Target::Slice {
                    start: 0,
                    end: Some(4)
                },
            ]
        );
    }

    #[test]
    fn test_parse_nested_target() {
        let chain = parse("cx[(0, 1), 2:4]").unwrap();
        assert_eq!(
            chain.segments[0].target,
            Target::Tuple(vec![
                Target::Tuple(vec![Target::Index(0), Target::Index(1)]),
                Target::Slice {
                    start: 2,
                    end: Some(4)
                },
            ])
        );
    }

    #[test]
    fn test_parse_calls() {
        let chain = parse("rz(pi / 2)[0].prep(1)(theta = -0.5)[1]").unwrap();
        let rz = &chain.segments[0];
        assert_eq!(rz.calls.len(), 1);
        assert_eq!(
            rz.calls[0][0].value,
            Expression::BinOp {
                left: Box::new(Expression::Pi),
                op: BinOp::Div,
                right: Box::new(Expression::Int(2)),
            }
        );
        let prep = &chain.segments[1];
        assert_eq!(prep.calls.len(), 2);
        assert_eq!(prep.calls[1][0].name.as_deref(), Some("theta"));
        assert_eq!(
            prep.calls[1][0].value,
            Expression::Neg(Box::new(Expression::Float(0.5)))
        );
    }

    #[test]
    fn test_precedence() {
        let chain = parse("rz(1 + 2 * 3)[0]").unwrap();
        let args = chain.segments[0].evaluate_calls().unwrap();
        assert_eq!(args[0].get("theta", 0), Some(&qsv_ir::ArgValue::Int(7)));
    }

    #[test]
    fn test_empty_source() {
        assert!(parse("").unwrap().segments.is_empty());
        assert!(parse("  # nothing here\n").unwrap().segments.is_empty());
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            parse("h[0]cx[1]"),
            Err(ChainError::UnexpectedToken { position: 4, .. })
        ));
        assert!(matches!(parse("h[0"), Err(ChainError::UnexpectedEof(_))));
        assert!(matches!(parse("h"), Err(ChainError::UnexpectedEof(_))));
        assert!(matches!(parse("h[]"), Err(ChainError::UnexpectedToken { .. })));
        assert!(matches!(parse("h[-1]"), Err(ChainError::UnexpectedToken { .. })));
        assert!(matches!(parse("rz(theta)[0]"), Err(ChainError::UnexpectedToken { .. })));
        assert!(matches!(
            parse("h[0] @"),
            Err(ChainError::LexerError { position: 5, .. })
        ));
    }

    #[test]
    fn test_nesting_is_capped() {
        let deep = |open: &str, close: &str, n: usize| {
            format!("rz({}1{})[0]", open.repeat(n), close.repeat(n))
        };
        assert!(parse(&deep("(", ")", MAX_NESTING - 1)).is_ok());
        for source in [
            deep("(", ")", 100_000),
            deep("-", "", 100_000),
            format!("rz(1{})[0]", " + 1".repeat(100_000)),
            format!("x[{}0{}]", "(".repeat(100_000), ")".repeat(100_000)),
        ] {
            assert!(matches!(parse(&source), Err(ChainError::InvalidExpression(_))));
        }
        assert!(parse(&format!("rz(1{})[0]", " + 1".repeat(MAX_NESTING - 1))).is_ok());
    }

    #[test]
    fn test_display_round_trip() {
        let source = "h[0].rz(theta=(pi / 2))[1].cx[(0, 1), 2:].m[:]";
        let chain = parse(source).unwrap();
        assert_eq!(chain.to_string(), source);
        assert_eq!(parse(&chain.to_string()).unwrap(), chain);
    }
}
