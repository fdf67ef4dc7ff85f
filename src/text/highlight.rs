use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Key,
    String,
    Punct,
    Number,
    Bool,
    Null,
    Plain,
}

/// A classified run of chars, as a char-index range into the tokenized line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub range: Range<usize>,
}

/// Slice of one visual row ready for styling. `cursor` marks the single
/// cell the editor cursor sits on; at end of row it is an empty range and
/// the renderer draws a blank cell for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub kind: TokenKind,
    pub range: Range<usize>,
    pub cursor: bool,
}

fn is_ident(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_number_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-')
}

fn keyword_at(chars: &[char], i: usize, kw: &str) -> bool {
    let n = kw.chars().count();
    chars.len() >= i + n
        && chars[i..i + n].iter().copied().eq(kw.chars())
        && chars.get(i + n).map_or(true, |&c| !is_ident(c))
}

/// A string token is a key when the next non-blank char is a colon.
fn followed_by_colon(chars: &[char], mut i: usize) -> bool {
    while let Some(&c) = chars.get(i) {
        if !c.is_whitespace() {
            return c == ':';
        }
        i += 1;
    }
    false
}

/// Classify a line of (possibly invalid) JSON. Never fails; anything
/// unrecognized is `Plain`. Adjacent plain chars are merged.
pub fn tokenize(chars: &[char]) -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::new();
    let mut push = |kind: TokenKind, range: Range<usize>| {
        if kind == TokenKind::Plain {
            if let Some(last) = tokens.last_mut() {
                if last.kind == TokenKind::Plain && last.range.end == range.start {
                    last.range.end = range.end;
                    return;
                }
            }
        }
        tokens.push(Token { kind, range });
    };

    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        match c {
            '"' => {
                let start = i;
                i += 1;
                while i < chars.len() {
                    match chars[i] {
                        '\\' => i += 2,
                        '"' => {
                            i += 1;
                            break;
                        }
                        _ => i += 1,
                    }
                }
                let end = i.min(chars.len());
                i = end;
                let kind = if followed_by_colon(chars, end) {
                    TokenKind::Key
                } else {
                    TokenKind::String
                };
                push(kind, start..end);
            }
            '{' | '}' | '[' | ']' | ':' | ',' => {
                push(TokenKind::Punct, i..i + 1);
                i += 1;
            }
            '-' if !chars.get(i + 1).is_some_and(char::is_ascii_digit) => {
                push(TokenKind::Plain, i..i + 1);
                i += 1;
            }
            '-' | '0'..='9' => {
                let start = i;
                i += 1;
                while i < chars.len() && is_number_char(chars[i]) {
                    i += 1;
                }
                push(TokenKind::Number, start..i);
            }
            't' if keyword_at(chars, i, "true") => {
                push(TokenKind::Bool, i..i + 4);
                i += 4;
            }
            'f' if keyword_at(chars, i, "false") => {
                push(TokenKind::Bool, i..i + 5);
                i += 5;
            }
            'n' if keyword_at(chars, i, "null") => {
                push(TokenKind::Null, i..i + 4);
                i += 4;
            }
            _ => {
                push(TokenKind::Plain, i..i + 1);
                i += 1;
            }
        }
    }
    tokens
}

/// Clip a line's tokens to one visual row and split out the cursor cell.
/// Returned ranges are relative to the row start.
pub fn row_pieces(tokens: &[Token], row: Range<usize>, cursor: Option<usize>) -> Vec<Piece> {
    let mut pieces = Vec::new();
    for t in tokens {
        let start = t.range.start.max(row.start);
        let end = t.range.end.min(row.end);
        if start >= end {
            continue;
        }
        let local = (start - row.start)..(end - row.start);
        match cursor {
            Some(c) if local.contains(&c) => {
                if local.start < c {
                    pieces.push(Piece { kind: t.kind, range: local.start..c, cursor: false });
                }
                pieces.push(Piece { kind: t.kind, range: c..c + 1, cursor: true });
                if c + 1 < local.end {
                    pieces.push(Piece { kind: t.kind, range: c + 1..local.end, cursor: false });
                }
            }
            _ => pieces.push(Piece { kind: t.kind, range: local, cursor: false }),
        }
    }
    if let Some(c) = cursor {
        if c >= row.len() {
            pieces.push(Piece { kind: TokenKind::Plain, range: row.len()..row.len(), cursor: true });
        }
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(s: &str) -> Vec<(TokenKind, String)> {
        let chars: Vec<char> = s.chars().collect();
        tokenize(&chars)
            .into_iter()
            .map(|t| (t.kind, chars[t.range].iter().collect()))
            .collect()
    }

    #[test]
    fn key_value_pair() {
        use TokenKind::*;
        assert_eq!(
            kinds(r#"  "name": "kv","#),
            vec![
                (Plain, "  ".into()),
                (Key, r#""name""#.into()),
                (Punct, ":".into()),
                (Plain, " ".into()),
                (String, r#""kv""#.into()),
                (Punct, ",".into()),
            ]
        );
    }

    #[test]
    fn key_with_space_before_colon() {
        assert_eq!(kinds(r#""a"  :1"#)[0].0, TokenKind::Key);
    }

    #[test]
    fn escaped_quote_stays_in_string() {
        let toks = kinds(r#""a\"b" x"#);
        assert_eq!(toks[0], (TokenKind::String, r#""a\"b""#.to_string()));
    }

    #[test]
    fn trailing_backslash_ends_string() {
        let toks = kinds(r#""abc\"#);
        assert_eq!(toks, vec![(TokenKind::String, r#""abc\"#.to_string())]);
    }

    #[test]
    fn unterminated_string_runs_to_end() {
        assert_eq!(kinds(r#""abc"#), vec![(TokenKind::String, r#""abc"#.to_string())]);
    }

    #[test]
    fn numbers_and_minus() {
        use TokenKind::*;
        assert_eq!(kinds("-1.5e+3")[0], (Number, "-1.5e+3".into()));
        assert_eq!(kinds("- 1")[0], (Plain, "- ".into()));
        assert_eq!(kinds("- 1")[1], (Number, "1".into()));
    }

    #[test]
    fn keywords_need_boundary() {
        use TokenKind::*;
        assert_eq!(kinds("true")[0].0, Bool);
        assert_eq!(kinds("false,")[0].0, Bool);
        assert_eq!(kinds("null]")[0].0, Null);
        assert_eq!(kinds("nullable"), vec![(Plain, "nullable".into())]);
        assert_eq!(kinds("true_x"), vec![(Plain, "true_x".into())]);
    }

    #[test]
    fn pieces_split_at_cursor() {
        let chars: Vec<char> = r#""abc": 1"#.chars().collect();
        let toks = tokenize(&chars);
        let pieces = row_pieces(&toks, 0..chars.len(), Some(2));
        assert_eq!(
            pieces[..3],
            [
                Piece { kind: TokenKind::Key, range: 0..2, cursor: false },
                Piece { kind: TokenKind::Key, range: 2..3, cursor: true },
                Piece { kind: TokenKind::Key, range: 3..5, cursor: false },
            ]
        );
    }

    #[test]
    fn cursor_at_row_end_adds_blank_cell() {
        let chars: Vec<char> = "ab".chars().collect();
        let toks = tokenize(&chars);
        let pieces = row_pieces(&toks, 0..2, Some(2));
        assert_eq!(pieces.last().unwrap(), &Piece { kind: TokenKind::Plain, range: 2..2, cursor: true });
    }

    #[test]
    fn pieces_clip_to_row() {
        let chars: Vec<char> = r#""hello world""#.chars().collect();
        let toks = tokenize(&chars);
        let pieces = row_pieces(&toks, 7..13, None);
        assert_eq!(pieces, vec![Piece { kind: TokenKind::String, range: 0..6, cursor: false }]);
    }
}
