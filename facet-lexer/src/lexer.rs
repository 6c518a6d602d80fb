use crate::token::{Symbol, Token};

/// The lexer for the Facet language.
///
/// It stops producing tokens at the first character it cannot make sense of,
/// the unconsumed input can then be inspected with [`Lexer::text`].
pub struct Lexer {
    pub(crate) chars: Vec<char>,
    pub(crate) line: usize,
    pub(crate) skip_comments: bool,
    pub(crate) skip_whitespace: bool,
}

impl Lexer {
    pub fn new<T: AsRef<str>>(input: T) -> Lexer {
        Lexer {
            chars: input.as_ref().chars().rev().collect(),
            line: 1,
            skip_comments: false,
            skip_whitespace: false,
        }
    }

    pub fn skip_whitespace(mut self, value: bool) -> Lexer {
        self.skip_whitespace = value;
        self
    }

    pub fn skip_comments(mut self, value: bool) -> Lexer {
        self.skip_comments = value;
        self
    }

    /// The line the lexer is currently positioned on.
    pub fn line(&self) -> usize {
        self.line
    }

    /// The input that has not been consumed yet.
    pub fn text(&self) -> String {
        self.chars.iter().rev().collect()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.chars.pop()?;
        if ch == '\n' {
            self.line += 1;
        }
        Some(ch)
    }

    fn lex_string(&mut self) -> Option<String> {
        let mut escaped = false;
        let terminated = self.chars.iter().rev().skip(1).any(|&ch| {
            if escaped {
                escaped = false;
                false
            } else {
                escaped = ch == '\\';
                ch == '\''
            }
        });
        if !terminated {
            return None;
        }
        let mut output = String::new();
        self.bump()?;
        loop {
            let ch = self.bump()?;
            match ch {
                '\'' => break Some(output),
                '\\' => {
                    let ch = self.bump()?;
                    match ch {
                        't' => output.push('\t'),
                        'n' => output.push('\n'),
                        'r' => output.push('\r'),
                        '\'' => output.push('\''),
                        '\\' => output.push('\\'),
                        // Unknown escapes are kept as written.
                        other => {
                            output.push('\\');
                            output.push(other);
                        }
                    }
                }
                ch => output.push(ch),
            }
        }
    }

    fn lex_comment(&mut self) -> Option<String> {
        if !self.chars.iter().rev().skip(1).any(|&ch| ch == '"') {
            return None;
        }
        let mut output = String::new();
        self.bump()?;
        loop {
            let ch = self.bump()?;
            if ch == '"' {
                break Some(output);
            }
            output.push(ch);
        }
    }

    fn lex_while(&mut self, predicate: impl Fn(char) -> bool) -> Option<String> {
        let len = self
            .chars
            .iter()
            .rev()
            .take_while(|ch| predicate(**ch))
            .count();
        let mut output = String::with_capacity(len);
        for _ in 0..len {
            output.push(self.bump()?);
        }
        Some(output)
    }

    fn lex_number(&mut self) -> Option<f64> {
        let iter = self.chars.iter().rev().copied();
        let int_part_len = iter.clone().take_while(|ch| ch.is_ascii_digit()).count();
        let mut dec_iter = iter.clone().skip(int_part_len);
        let total_len = match (dec_iter.next(), dec_iter.next()) {
            (Some('.'), Some(ch)) if ch.is_ascii_digit() => {
                let dec_part_len = iter
                    .clone()
                    .skip(int_part_len + 1)
                    .take_while(|ch| ch.is_ascii_digit())
                    .count();
                int_part_len + dec_part_len + 1
            }
            _ => int_part_len,
        };
        let repr: String = iter.take(total_len).collect();
        let number = repr.parse().ok()?;
        for _ in 0..total_len {
            self.bump()?;
        }
        Some(number)
    }

    fn keyword(ident: &str) -> Option<Symbol> {
        match ident {
            "method" => Some(Symbol::Method),
            "decorate" => Some(Symbol::Decorate),
            "forward" => Some(Symbol::Forward),
            "fn" => Some(Symbol::Fn),
            _ => None,
        }
    }

    fn is_operator(ch: char) -> bool {
        matches!(
            ch,
            '+' | '-' | '*' | '/' | '%' | '<' | '>' | '=' | '!' | '&' | '|' | '~' | '@'
        )
    }
}

impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let peeked = self.chars.last().copied()?;
        let line = self.line;
        let symbol = match peeked {
            _ if peeked.is_whitespace() => {
                self.lex_while(char::is_whitespace)?;
                if self.skip_whitespace {
                    return self.next();
                }
                Symbol::Whitespace
            }
            '\'' => Symbol::LitString(self.lex_string()?),
            '"' => {
                let comment = self.lex_comment()?;
                if self.skip_comments {
                    return self.next();
                }
                Symbol::Comment(comment)
            }
            '(' | ')' | '{' | '}' | ',' | ';' | '.' => {
                self.bump()?;
                match peeked {
                    '(' => Symbol::NewTerm,
                    ')' => Symbol::EndTerm,
                    '{' => Symbol::NewObject,
                    '}' => Symbol::EndObject,
                    ',' => Symbol::Comma,
                    ';' => Symbol::Semicolon,
                    _ => Symbol::Dot,
                }
            }
            _ if Lexer::is_operator(peeked) => {
                let operator = self.lex_while(Lexer::is_operator)?;
                if operator == "=" {
                    Symbol::Equal
                } else {
                    Symbol::Operator(operator)
                }
            }
            _ if peeked.is_ascii_digit() => Symbol::LitNumber(self.lex_number()?),
            _ if peeked.is_alphabetic() || peeked == '_' => {
                let ident = self.lex_while(|ch| ch.is_alphanumeric() || ch == '_')?;
                Lexer::keyword(ident.as_str()).unwrap_or(Symbol::Identifier(ident))
            }
            _ => return None,
        };
        Some(Token::new(symbol, line))
    }
}
