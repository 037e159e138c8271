use super::token::{Token, TokenKind};
use super::Error;
use crate::error;

type Result<T> = std::result::Result<T, Error>;

pub fn lex(s: &str) -> Result<Vec<Token>> {
    VeeLexer::lex(s)
}

/// Reads a token file: one `TYPE literal` pair per line, blank lines ignored.
pub fn read_tokens(s: &str) -> Result<Vec<Token>> {
    s.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.parse::<Token>())
        .collect()
}

pub fn write_tokens(tokens: &[Token]) -> String {
    let mut s = String::new();
    for token in tokens {
        s.push_str(&format!("{}\n", token));
    }
    s
}

fn is_vee_whitespace(c: char) -> bool {
    c.is_ascii_whitespace()
}

fn is_vee_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_vee_alphabetic(c: char) -> bool {
    c.is_ascii_alphabetic()
}

type Chars<'a> = std::iter::Peekable<std::str::CharIndices<'a>>;

trait Tokenizers<'a> {
    fn chars(&mut self) -> &mut Chars<'a>;

    fn peek_char(&mut self) -> Option<char> {
        self.chars().peek().map(|(_, ch)| *ch)
    }

    fn take_while(&mut self, s: &mut String, f: fn(char) -> bool) {
        while let Some(ch) = self.peek_char() {
            if !f(ch) {
                break;
            }
            s.push(ch);
            self.chars().next();
        }
    }

    fn line_comment(&mut self) {
        while let Some((_, ch)) = self.chars().next() {
            if ch == '\n' {
                break;
            }
        }
    }

    fn block_comment(&mut self, start: usize) -> Result<()> {
        self.chars().next();
        self.chars().next();
        let mut star = false;
        while let Some((_, ch)) = self.chars().next() {
            if star && ch == '/' {
                return Ok(());
            }
            star = ch == '*';
        }
        Err(error!(LexicalError, ..&(start..start + 2); "UNTERMINATED COMMENT"))
    }

    fn number(&mut self, start: usize) -> Result<Token> {
        let mut s = String::new();
        self.take_while(&mut s, is_vee_digit);
        if let Some(ch) = self.peek_char() {
            if is_vee_alphabetic(ch) {
                self.take_while(&mut s, |c| c.is_ascii_alphanumeric());
                let column = start..start + s.len();
                return Err(error!(LexicalError, ..&column; &s));
            }
        }
        Ok(Token::new(TokenKind::Const, &s))
    }

    fn alphabetic(&mut self) -> Token {
        let mut s = String::new();
        self.take_while(&mut s, |c| c.is_ascii_alphanumeric());
        match TokenKind::from_lexeme(&s) {
            Some(kind) => Token::new(kind, &s),
            None => Token::new(TokenKind::Ref, &s),
        }
    }

    fn minutia(&mut self, start: usize) -> Result<Token> {
        let mut s = String::new();
        if let Some((_, ch)) = self.chars().next() {
            s.push(ch);
        }
        if let Some(pk) = self.peek_char() {
            s.push(pk);
            if let Some(kind) = TokenKind::from_lexeme(&s) {
                self.chars().next();
                return Ok(Token::new(kind, &s));
            }
            s.pop();
        }
        match TokenKind::from_lexeme(&s) {
            Some(kind) => Ok(Token::new(kind, &s)),
            None => Err(error!(LexicalError, ..&(start..start + s.len()); &s)),
        }
    }
}

struct VeeLexer<'a> {
    chars: Chars<'a>,
    source: &'a str,
    failed: bool,
}

impl<'a> Tokenizers<'a> for VeeLexer<'a> {
    fn chars(&mut self) -> &mut Chars<'a> {
        &mut self.chars
    }
}

impl<'a> Iterator for VeeLexer<'a> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            let (start, pk) = *self.chars.peek()?;
            if is_vee_whitespace(pk) {
                self.chars.next();
                continue;
            }
            if pk == '#' {
                self.line_comment();
                continue;
            }
            if self.source[start..].starts_with("/*") {
                if let Err(error) = self.block_comment(start) {
                    self.failed = true;
                    return Some(Err(error));
                }
                continue;
            }
            let token = if is_vee_digit(pk) {
                self.number(start)
            } else if is_vee_alphabetic(pk) {
                Ok(self.alphabetic())
            } else {
                self.minutia(start)
            };
            self.failed = token.is_err();
            return Some(token);
        }
    }
}

impl<'a> VeeLexer<'a> {
    fn lex(s: &str) -> Result<Vec<Token>> {
        VeeLexer {
            chars: s.char_indices().peekable(),
            source: s,
            failed: false,
        }
        .collect()
    }
}
