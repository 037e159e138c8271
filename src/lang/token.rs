use super::Error;
use crate::error;
use std::collections::HashMap;

thread_local!(
    static STRING_TO_KIND: HashMap<&'static str, TokenKind> = TokenKind::ALL
        .iter()
        .filter_map(|kind| kind.lexeme().map(|s| (s, *kind)))
        .collect();
    static TAG_TO_KIND: HashMap<&'static str, TokenKind> = TokenKind::ALL
        .iter()
        .map(|kind| (kind.tag(), *kind))
        .collect();
);

/// ## Token classification
///
/// Every kind except `Const` and `Ref` has exactly one spelling.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenKind {
    VarDec,
    FuncDec,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Gt,
    Geq,
    Lt,
    Leq,
    Eq,
    Neq,
    Not,
    Or,
    And,
    OpenParen,
    CloseParen,
    OpenBrace,
    CloseBrace,
    If,
    Else,
    While,
    For,
    Const,
    Ref,
    Semi,
    Print,
    Assign,
    Ret,
    Comma,
}

impl TokenKind {
    pub const ALL: [TokenKind; 31] = [
        TokenKind::VarDec,
        TokenKind::FuncDec,
        TokenKind::Add,
        TokenKind::Sub,
        TokenKind::Mul,
        TokenKind::Div,
        TokenKind::Mod,
        TokenKind::Gt,
        TokenKind::Geq,
        TokenKind::Lt,
        TokenKind::Leq,
        TokenKind::Eq,
        TokenKind::Neq,
        TokenKind::Not,
        TokenKind::Or,
        TokenKind::And,
        TokenKind::OpenParen,
        TokenKind::CloseParen,
        TokenKind::OpenBrace,
        TokenKind::CloseBrace,
        TokenKind::If,
        TokenKind::Else,
        TokenKind::While,
        TokenKind::For,
        TokenKind::Const,
        TokenKind::Ref,
        TokenKind::Semi,
        TokenKind::Print,
        TokenKind::Assign,
        TokenKind::Ret,
        TokenKind::Comma,
    ];

    pub fn tag(self) -> &'static str {
        use TokenKind::*;
        match self {
            VarDec => "VAR_DEC",
            FuncDec => "FUNC_DEC",
            Add => "ADD",
            Sub => "SUB",
            Mul => "MUL",
            Div => "DIV",
            Mod => "MOD",
            Gt => "GT",
            Geq => "GEQ",
            Lt => "LT",
            Leq => "LEQ",
            Eq => "EQ",
            Neq => "NEQ",
            Not => "NOT",
            Or => "OR",
            And => "AND",
            OpenParen => "OPEN_PAREN",
            CloseParen => "CLOSE_PAREN",
            OpenBrace => "OPEN_BRACE",
            CloseBrace => "CLOSE_BRACE",
            If => "IF",
            Else => "ELSE",
            While => "WHILE",
            For => "FOR",
            Const => "CONST",
            Ref => "REF",
            Semi => "SEMI",
            Print => "PRINT",
            Assign => "ASSIGN",
            Ret => "RET",
            Comma => "COMMA",
        }
    }

    /// The fixed source spelling, `None` for constants and references.
    pub fn lexeme(self) -> Option<&'static str> {
        use TokenKind::*;
        Some(match self {
            VarDec => "var",
            FuncDec => "func",
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Mod => "%",
            Gt => ">",
            Geq => ">=",
            Lt => "<",
            Leq => "<=",
            Eq => "==",
            Neq => "!=",
            Not => "!",
            Or => "||",
            And => "&&",
            OpenParen => "(",
            CloseParen => ")",
            OpenBrace => "{",
            CloseBrace => "}",
            If => "if",
            Else => "else",
            While => "while",
            For => "for",
            Const | Ref => return None,
            Semi => ";",
            Print => "print",
            Assign => "=",
            Ret => "return",
            Comma => ",",
        })
    }

    pub fn from_lexeme(s: &str) -> Option<TokenKind> {
        STRING_TO_KIND.with(|stk| stk.get(s).copied())
    }

    pub fn from_tag(s: &str) -> Option<TokenKind> {
        TAG_TO_KIND.with(|ttk| ttk.get(s).copied())
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    kind: TokenKind,
    text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: &str) -> Token {
        Token {
            kind,
            text: text.to_string(),
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} {}", self.kind, self.text)
    }
}

impl std::str::FromStr for Token {
    type Err = Error;

    /// Parses one `TYPE literal` line of a token file.
    fn from_str(s: &str) -> Result<Token, Error> {
        let mut parts = s.trim().splitn(2, char::is_whitespace);
        let tag = parts.next().unwrap_or_default();
        let text = parts.next().map(str::trim).unwrap_or_default();
        let kind = match TokenKind::from_tag(tag) {
            Some(kind) => kind,
            None => return Err(error!(LexicalError; &format!("UNKNOWN TOKEN TYPE {}", tag))),
        };
        if text.is_empty() {
            return Err(error!(LexicalError; &format!("MISSING LITERAL FOR {}", tag)));
        }
        Ok(Token::new(kind, text))
    }
}
