use crate::QueryError;
use crate::filter::Comparator;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    LParen,
    RParen,
    And,
    Or,
    Not,
    Pipe,
    Star,
    Op(Comparator),
    Word(String),
    Quoted(String),
}

impl Token {
    pub(crate) fn describe(&self) -> String {
        match self {
            Self::LParen => "'('".into(),
            Self::RParen => "')'".into(),
            Self::And => "'&&'".into(),
            Self::Or => "'||'".into(),
            Self::Not => "'!'".into(),
            Self::Pipe => "'|'".into(),
            Self::Star => "'*'".into(),
            Self::Op(op) => format!("'{op}'"),
            Self::Word(w) => format!("'{w}'"),
            Self::Quoted(q) => format!("\"{q}\""),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Spanned {
    pub token: Token,
    pub pos: usize,
}

fn is_special(c: char) -> bool {
    matches!(
        c,
        '(' | ')' | '|' | '&' | '!' | '=' | '<' | '>' | '*' | '^' | '$' | '~' | '"'
    )
}

fn syntax(pos: usize, message: impl Into<String>) -> QueryError {
    QueryError::Syntax {
        position: pos,
        message: message.into(),
    }
}

pub(crate) fn tokenize(input: &str) -> Result<Vec<Spanned>, QueryError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        if c.is_whitespace() {
            continue;
        }

        let next_is_eq = matches!(chars.peek(), Some((_, '=')));
        let token = match c {
            '(' => Token::LParen,
            ')' => Token::RParen,
            '&' => match chars.next() {
                Some((_, '&')) => Token::And,
                _ => return Err(syntax(pos, "expected '&&'")),
            },
            '|' => {
                if matches!(chars.peek(), Some((_, '|'))) {
                    chars.next();
                    Token::Or
                } else {
                    Token::Pipe
                }
            }
            '!' if next_is_eq => {
                chars.next();
                Token::Op(Comparator::NotEq)
            }
            '!' => Token::Not,
            '*' if next_is_eq => {
                chars.next();
                Token::Op(Comparator::Contains)
            }
            '*' => Token::Star,
            '=' => {
                if next_is_eq {
                    chars.next();
                }
                Token::Op(Comparator::Eq)
            }
            '>' | '<' => {
                if next_is_eq {
                    chars.next();
                }
                Token::Op(match (c, next_is_eq) {
                    ('>', true) => Comparator::Gte,
                    ('>', false) => Comparator::Gt,
                    ('<', true) => Comparator::Lte,
                    _ => Comparator::Lt,
                })
            }
            '^' | '$' | '~' => {
                if !next_is_eq {
                    return Err(syntax(pos, format!("expected '=' after '{c}'")));
                }
                chars.next();
                Token::Op(match c {
                    '^' => Comparator::StartsWith,
                    '$' => Comparator::EndsWith,
                    _ => Comparator::Matches,
                })
            }
            '"' => Token::Quoted(read_quoted(&mut chars, pos)?),
            _ => {
                let mut word = String::from(c);
                while let Some(&(_, next)) = chars.peek() {
                    if next.is_whitespace() || is_special(next) {
                        break;
                    }
                    word.push(next);
                    chars.next();
                }
                Token::Word(word)
            }
        };
        tokens.push(Spanned { token, pos });
    }

    Ok(tokens)
}

fn read_quoted(
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    start: usize,
) -> Result<String, QueryError> {
    let mut out = String::new();
    loop {
        match chars.next() {
            Some((_, '"')) => return Ok(out),
            Some((_, '\\')) => match chars.next() {
                Some((_, escaped)) => out.push(escaped),
                None => break,
            },
            Some((_, c)) => out.push(c),
            None => break,
        }
    }
    Err(syntax(start, "unterminated string"))
}
