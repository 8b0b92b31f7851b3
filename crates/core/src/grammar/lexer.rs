use super::ast::Quote;

/// Classification of an options-file token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokKind {
    /// `--` followed by word or hyphen characters (e.g. `--inputs-dir`).
    OptionName,
    /// A complete single- or double-quoted string.
    String(Quote),
    /// A run of non-whitespace characters.
    Bare,
    /// A quote that never closed, read as a bare run of non-whitespace.
    UnterminatedString,
    /// `#` up to (not including) the end of the line.
    Comment,
    /// One or more whitespace characters, newlines included.
    Whitespace,
}

impl TokKind {
    /// Comments and whitespace carry no meaning for the entry parser.
    pub fn is_trivia(self) -> bool {
        matches!(self, TokKind::Comment | TokKind::Whitespace)
    }
}

/// A token that borrows its text directly from the source input.
///
/// `text` is always exactly `&input[start..end]`; `end` is exclusive, one
/// past the last consumed byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    /// The classification of this token.
    pub kind: TokKind,
    /// Borrowed slice of the source input for this token.
    pub text: &'a str,
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
}

impl<'a> Token<'a> {
    /// The token's value with surrounding quotes removed.
    ///
    /// Backslash escapes inside a quoted string are kept as written.
    pub fn image(&self) -> &'a str {
        match self.kind {
            TokKind::String(_) => &self.text[1..self.text.len() - 1],
            _ => self.text,
        }
    }
}

/// Tokenize an options document.
///
/// At every position the first matching shape wins: comment, option name,
/// quoted string, whitespace, bare token. The lexer never fails; an
/// unterminated quote becomes an [`TokKind::UnterminatedString`] token
/// spanning the same text a bare token would.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut toks = Vec::new();
    let mut i = 0usize;
    while let Some(c) = input[i..].chars().next() {
        let start = i;
        let kind = if c == '#' {
            i = scan_comment(input, i);
            TokKind::Comment
        } else if input[i..].starts_with("--") {
            i = scan_option_name(input, i);
            TokKind::OptionName
        } else if c == '"' || c == '\'' {
            match scan_quoted(input, i, c) {
                Some(end) => {
                    i = end;
                    TokKind::String(if c == '"' { Quote::Double } else { Quote::Single })
                }
                None => {
                    i = scan_bare(input, i);
                    TokKind::UnterminatedString
                }
            }
        } else if is_space(c) {
            i = scan_while(input, i, is_space);
            TokKind::Whitespace
        } else {
            i = scan_bare(input, i);
            TokKind::Bare
        };
        toks.push(Token {
            kind,
            text: &input[start..i],
            start,
            end: i,
        });
    }
    toks
}

/// Unicode whitespace plus U+FEFF, so a byte-order mark reads as blank.
fn is_space(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

/// Advance over characters matching `pred`, returning the first offset that
/// does not match.
fn scan_while(input: &str, from: usize, pred: impl Fn(char) -> bool) -> usize {
    input[from..]
        .char_indices()
        .find(|&(_, c)| !pred(c))
        .map_or(input.len(), |(off, _)| from + off)
}

fn scan_comment(input: &str, from: usize) -> usize {
    scan_while(input, from, |c| c != '\n' && c != '\r')
}

fn scan_option_name(input: &str, from: usize) -> usize {
    scan_while(input, from + 2, |c| {
        c.is_ascii_alphanumeric() || c == '_' || c == '-'
    })
}

fn scan_bare(input: &str, from: usize) -> usize {
    scan_while(input, from, |c| !is_space(c))
}

/// Scan a quoted string opening at `from`. Returns the offset one past the
/// closing quote, or `None` if the string never closes.
///
/// A backslash escapes the following character, except a line terminator.
fn scan_quoted(input: &str, from: usize, quote: char) -> Option<usize> {
    let mut chars = input[from + 1..].char_indices();
    while let Some((off, c)) = chars.next() {
        if c == quote {
            return Some(from + 1 + off + c.len_utf8());
        }
        if c == '\\' {
            match chars.next() {
                Some((_, '\n' | '\r' | '\u{2028}' | '\u{2029}')) | None => return None,
                Some(_) => {}
            }
        }
    }
    None
}
