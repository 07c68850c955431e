//! Parser: recursive descent over a token stream, emitting the untyped AST
//! (spec.md §4.2).

mod error;
mod tokens;

pub use self::error::ParseError;
pub use self::tokens::Tokens;

use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::{
    ast::{
        Access, Assignment, Binary, Declaration, Expr, Field, ForLoop, FunctionCall, Group,
        IfStatement, Literal, Method, ReturnStmt, Source, Stmt, WhileLoop,
    },
    lexer::unescape_literal,
    token::{is_keyword, Token, TokenKind},
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Either a token kind or a literal string; the parser's `peek`/`match`
/// helpers accept both (spec.md §4.2).
#[derive(Clone, Copy)]
enum Pat {
    Kind(TokenKind),
    Lit(&'static str),
}

fn token_matches(token: &Token, pat: Pat) -> bool {
    match pat {
        Pat::Kind(kind) => token.is_kind(kind),
        Pat::Lit(lit) => token.is_literal(lit),
    }
}

pub struct Parser {
    tokens: Tokens,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens: Tokens::new(tokens),
        }
    }

    pub fn parse(input: Vec<Token>) -> ParseResult<Source<()>> {
        Parser::new(input).parse_source()
    }

    fn peek(&self, pat: Pat) -> bool {
        self.tokens.peek().is_some_and(|t| token_matches(t, pat))
    }

    fn match_(&mut self, pat: Pat) -> bool {
        if self.peek(pat) {
            self.tokens.advance();
            true
        } else {
            false
        }
    }

    fn next_index(&self) -> usize {
        self.tokens
            .peek()
            .map(|t| t.index)
            .unwrap_or_else(|| self.tokens.eof_index())
    }

    /// Consume and return the previous literal, or fail with the offending
    /// token's index (or, at EOF, the index just past the last token).
    fn require(&mut self, pat: Pat, what: &str) -> ParseResult<String> {
        let index = self.next_index();
        match self.tokens.advance() {
            Some(token) if token_matches(token, pat) => Ok(token.literal.clone()),
            Some(token) => Err(ParseError::new(
                format!("expected {what}, found '{}'", token.literal),
                index,
            )),
            None => Err(ParseError::new(format!("expected {what}, found EOF"), index)),
        }
    }

    /// Like [`Self::require`] for an identifier, but rejects reserved words:
    /// keywords lex as plain `Identifier` tokens, so this is the only place
    /// that tells `x` apart from `IF`.
    fn require_ident(&mut self, what: &str) -> ParseResult<String> {
        let index = self.next_index();
        let name = self.require(Pat::Kind(TokenKind::Identifier), what)?;
        if is_keyword(&name) {
            return Err(ParseError::new(
                format!("expected {what}, found reserved word '{name}'"),
                index,
            ));
        }
        Ok(name)
    }

    fn require_lit(&mut self, lit: &'static str) -> ParseResult<()> {
        self.require(Pat::Lit(lit), &format!("'{lit}'"))?;
        Ok(())
    }

    // source := field* method*
    fn parse_source(&mut self) -> ParseResult<Source<()>> {
        let mut fields = vec![];
        while self.peek(Pat::Lit("LET")) {
            fields.push(self.parse_field()?);
        }

        let mut methods = vec![];
        while self.peek(Pat::Lit("DEF")) {
            methods.push(self.parse_method()?);
        }

        if !self.tokens.is_empty() {
            let index = self.next_index();
            return Err(ParseError::new(
                "expected a field or method declaration",
                index,
            ));
        }

        Ok(Source { fields, methods })
    }

    // field := 'LET' IDENT (':' IDENT)? ('=' expr)? ';'
    fn parse_field(&mut self) -> ParseResult<Field<()>> {
        let position = self.next_index();
        self.require_lit("LET")?;
        let name = self.require_ident("a field name")?;

        let type_name = if self.match_(Pat::Lit(":")) {
            Some(self.require_ident("a type name")?)
        } else {
            None
        };

        let value = if self.match_(Pat::Lit("=")) {
            Some(self.parse_expr()?)
        } else {
            None
        };

        self.require_lit(";")?;

        Ok(Field {
            name,
            type_name,
            value,
            position,
            variable: None,
        })
    }

    // method := 'DEF' IDENT '(' (IDENT (':' IDENT)? (',' IDENT (':' IDENT)?)*)? ')'
    //           (':' IDENT)? 'DO' stmt* 'END'
    fn parse_method(&mut self) -> ParseResult<Method<()>> {
        let position = self.next_index();
        self.require_lit("DEF")?;
        let name = self.require_ident("a method name")?;
        self.require_lit("(")?;

        let mut parameters = vec![];
        let mut parameter_type_names = vec![];

        if !self.peek(Pat::Lit(")")) {
            loop {
                parameters.push(self.require_ident("a parameter name")?);
                self.require_lit(":")?;
                parameter_type_names.push(self.require_ident("a parameter type")?);

                if !self.match_(Pat::Lit(",")) {
                    break;
                }
            }
        }

        self.require_lit(")")?;

        let return_type_name = if self.match_(Pat::Lit(":")) {
            Some(self.require_ident("a return type name")?)
        } else {
            None
        };

        self.require_lit("DO")?;
        let body = self.parse_stmts_until(&["END"])?;
        self.require_lit("END")?;

        Ok(Method {
            name,
            parameters,
            parameter_type_names,
            return_type_name,
            body,
            position,
            function: None,
        })
    }

    fn parse_stmts_until(&mut self, terminators: &[&'static str]) -> ParseResult<Vec<Stmt<()>>> {
        let mut stmts = vec![];
        while !terminators.iter().any(|t| self.peek(Pat::Lit(t))) {
            if self.tokens.is_empty() {
                let index = self.next_index();
                return Err(ParseError::new("unexpected EOF in statement block", index));
            }
            stmts.push(self.parse_stmt()?);
        }
        Ok(stmts)
    }

    // stmt := 'LET' decl | 'IF' if_ | 'FOR' for_ | 'WHILE' while_ | 'RETURN' ret
    //       | expr ('=' expr)? ';'
    fn parse_stmt(&mut self) -> ParseResult<Stmt<()>> {
        if self.peek(Pat::Lit("LET")) {
            return self.parse_declaration();
        }
        if self.match_(Pat::Lit("IF")) {
            return self.parse_if();
        }
        if self.match_(Pat::Lit("FOR")) {
            return self.parse_for();
        }
        if self.match_(Pat::Lit("WHILE")) {
            return self.parse_while();
        }
        if self.match_(Pat::Lit("RETURN")) {
            return self.parse_return();
        }

        let position = self.next_index();
        let expr = self.parse_expr()?;

        if self.match_(Pat::Lit("=")) {
            let value = self.parse_expr()?;
            self.require_lit(";")?;
            return Ok(Stmt::Assignment(Assignment {
                receiver: expr,
                value,
                position,
            }));
        }

        self.require_lit(";")?;
        Ok(Stmt::Expression(expr))
    }

    fn parse_declaration(&mut self) -> ParseResult<Stmt<()>> {
        let position = self.next_index();
        self.require_lit("LET")?;
        let name = self.require_ident("a variable name")?;

        let type_name = if self.match_(Pat::Lit(":")) {
            Some(self.require_ident("a type name")?)
        } else {
            None
        };

        let value = if self.match_(Pat::Lit("=")) {
            Some(self.parse_expr()?)
        } else {
            None
        };

        self.require_lit(";")?;

        Ok(Stmt::Declaration(Declaration {
            name,
            type_name,
            value,
            position,
            variable: None,
        }))
    }

    // if_ := expr 'DO' stmt* ('ELSE' stmt*)? 'END'
    fn parse_if(&mut self) -> ParseResult<Stmt<()>> {
        let position = self.next_index();
        let condition = self.parse_expr()?;
        self.require_lit("DO")?;
        let then_branch = self.parse_stmts_until(&["ELSE", "END"])?;

        let else_branch = if self.match_(Pat::Lit("ELSE")) {
            self.parse_stmts_until(&["END"])?
        } else {
            vec![]
        };

        self.require_lit("END")?;

        Ok(Stmt::If(IfStatement {
            condition,
            then_branch,
            else_branch,
            position,
        }))
    }

    // for_ := IDENT 'IN' expr 'DO' stmt* 'END'
    fn parse_for(&mut self) -> ParseResult<Stmt<()>> {
        let position = self.next_index();
        let name = self.require_ident("a loop variable name")?;
        self.require_lit("IN")?;
        let iterable = self.parse_expr()?;
        self.require_lit("DO")?;
        let body = self.parse_stmts_until(&["END"])?;
        self.require_lit("END")?;

        Ok(Stmt::For(ForLoop {
            name,
            iterable,
            body,
            position,
        }))
    }

    // while_ := expr 'DO' stmt* 'END'
    fn parse_while(&mut self) -> ParseResult<Stmt<()>> {
        let position = self.next_index();
        let condition = self.parse_expr()?;
        self.require_lit("DO")?;
        let body = self.parse_stmts_until(&["END"])?;
        self.require_lit("END")?;

        Ok(Stmt::While(WhileLoop {
            condition,
            body,
            position,
        }))
    }

    // ret := expr ';'
    fn parse_return(&mut self) -> ParseResult<Stmt<()>> {
        let position = self.next_index();
        let value = self.parse_expr()?;
        self.require_lit(";")?;
        Ok(Stmt::Return(ReturnStmt { value, position }))
    }

    // expr := logical
    fn parse_expr(&mut self) -> ParseResult<Expr<()>> {
        self.parse_logical()
    }

    // logical := comparison (('AND'|'OR') comparison)*
    fn parse_logical(&mut self) -> ParseResult<Expr<()>> {
        self.parse_left_assoc(&["AND", "OR"], Self::parse_comparison)
    }

    // comparison := additive (('<'|'<='|'>'|'>='|'=='|'!=') additive)*
    fn parse_comparison(&mut self) -> ParseResult<Expr<()>> {
        self.parse_left_assoc(&["<", "<=", ">", ">=", "==", "!="], Self::parse_additive)
    }

    // additive := multiplicative (('+'|'-') multiplicative)*
    fn parse_additive(&mut self) -> ParseResult<Expr<()>> {
        self.parse_left_assoc(&["+", "-"], Self::parse_multiplicative)
    }

    // multiplicative := secondary (('*'|'/') secondary)*
    fn parse_multiplicative(&mut self) -> ParseResult<Expr<()>> {
        self.parse_left_assoc(&["*", "/"], Self::parse_secondary)
    }

    fn parse_left_assoc(
        &mut self,
        ops: &[&'static str],
        mut next: impl FnMut(&mut Self) -> ParseResult<Expr<()>>,
    ) -> ParseResult<Expr<()>> {
        let mut left = next(self)?;

        loop {
            let Some(op) = ops.iter().find(|op| self.peek(Pat::Lit(op))) else {
                break;
            };
            let position = self.next_index();
            self.tokens.advance();
            let right = next(self)?;
            left = Expr::Binary(Binary {
                op: (*op).to_owned(),
                left: Box::new(left),
                right: Box::new(right),
                position,
                info: (),
            });
        }

        Ok(left)
    }

    // secondary := primary ('.' IDENT ('(' args? ')')? )*
    fn parse_secondary(&mut self) -> ParseResult<Expr<()>> {
        let mut expr = self.parse_primary()?;

        while self.match_(Pat::Lit(".")) {
            let position = self.next_index();
            let name = self.require_ident("a member name")?;

            if self.match_(Pat::Lit("(")) {
                let arguments = self.parse_args()?;
                self.require_lit(")")?;
                expr = Expr::Function(FunctionCall {
                    receiver: Some(Box::new(expr)),
                    name,
                    arguments,
                    position,
                    info: (),
                    function: None,
                });
            } else {
                expr = Expr::Access(Access {
                    receiver: Some(Box::new(expr)),
                    name,
                    position,
                    info: (),
                    variable: None,
                });
            }
        }

        Ok(expr)
    }

    // primary := 'NIL' | 'TRUE' | 'FALSE' | INT | DEC | CHAR | STR
    //          | '(' expr ')' | IDENT ('(' args? ')')?
    fn parse_primary(&mut self) -> ParseResult<Expr<()>> {
        let position = self.next_index();

        if self.match_(Pat::Lit("NIL")) {
            return Ok(Expr::Literal {
                value: Literal::Nil,
                position,
                info: (),
            });
        }
        if self.match_(Pat::Lit("TRUE")) {
            return Ok(Expr::Literal {
                value: Literal::Boolean(true),
                position,
                info: (),
            });
        }
        if self.match_(Pat::Lit("FALSE")) {
            return Ok(Expr::Literal {
                value: Literal::Boolean(false),
                position,
                info: (),
            });
        }
        if self.peek(Pat::Kind(TokenKind::Integer)) {
            let literal = self.tokens.advance().unwrap().literal.clone();
            let value = parse_bigint(&literal)
                .map_err(|_| ParseError::new(format!("invalid integer '{literal}'"), position))?;
            return Ok(Expr::Literal {
                value: Literal::Integer(value),
                position,
                info: (),
            });
        }
        if self.peek(Pat::Kind(TokenKind::Decimal)) {
            let literal = self.tokens.advance().unwrap().literal.clone();
            let value = parse_bigdecimal(&literal)
                .map_err(|_| ParseError::new(format!("invalid decimal '{literal}'"), position))?;
            return Ok(Expr::Literal {
                value: Literal::Decimal(value),
                position,
                info: (),
            });
        }
        if self.peek(Pat::Kind(TokenKind::Character)) {
            let literal = self.tokens.advance().unwrap().literal.clone();
            let unescaped = unescape_literal(&literal);
            let value = unescaped.chars().next().ok_or_else(|| {
                ParseError::new(format!("invalid character literal '{literal}'"), position)
            })?;
            return Ok(Expr::Literal {
                value: Literal::Character(value),
                position,
                info: (),
            });
        }
        if self.peek(Pat::Kind(TokenKind::String)) {
            let literal = self.tokens.advance().unwrap().literal.clone();
            let value = unescape_literal(&literal);
            return Ok(Expr::Literal {
                value: Literal::String(value),
                position,
                info: (),
            });
        }
        if self.match_(Pat::Lit("(")) {
            let inner = self.parse_expr()?;
            self.require_lit(")")?;
            return Ok(Expr::Group(Group {
                inner: Box::new(inner),
                position,
                info: (),
            }));
        }
        if self.peek(Pat::Kind(TokenKind::Identifier)) {
            let name = self.require_ident("an identifier")?;

            if self.match_(Pat::Lit("(")) {
                let arguments = self.parse_args()?;
                self.require_lit(")")?;
                return Ok(Expr::Function(FunctionCall {
                    receiver: None,
                    name,
                    arguments,
                    position,
                    info: (),
                    function: None,
                }));
            }

            return Ok(Expr::Access(Access {
                receiver: None,
                name,
                position,
                info: (),
                variable: None,
            }));
        }

        Err(ParseError::new("expected an expression", position))
    }

    // args := expr (',' expr)*
    fn parse_args(&mut self) -> ParseResult<Vec<Expr<()>>> {
        let mut args = vec![];
        if self.peek(Pat::Lit(")")) {
            return Ok(args);
        }
        loop {
            args.push(self.parse_expr()?);
            if !self.match_(Pat::Lit(",")) {
                break;
            }
        }
        Ok(args)
    }
}

fn parse_bigint(literal: &str) -> Result<BigInt, ()> {
    let normalized = literal.strip_prefix('+').unwrap_or(literal);
    BigInt::from_str(normalized).map_err(|_| ())
}

fn parse_bigdecimal(literal: &str) -> Result<BigDecimal, ()> {
    let normalized = literal.strip_prefix('+').unwrap_or(literal);
    BigDecimal::from_str(normalized).map_err(|_| ())
}
