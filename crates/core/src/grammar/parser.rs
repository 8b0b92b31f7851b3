use super::{
    ast::{EntryValue, OptionEntry, ParsedDocument, Quote},
    diag::{Diagnostic, Span, codes},
    lexer::{TokKind, Token, tokenize},
};

/// Result of parsing an options document with diagnostics collected.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ParseResult {
    /// The parsed entries.
    pub document: ParsedDocument,
    /// Recovered anomalies. Never affects `document`.
    pub diagnostics: Vec<Diagnostic>,
}

// ─── Public API ─────────────────────────────────────────────────────────────

/// Parse an options document.
pub fn parse(input: &str) -> ParsedDocument {
    parse_with_offset(input, 0)
}

/// Parse `input` as if it started at byte `offset` of a larger text.
///
/// Every reported entry offset is shifted by `offset`, so a single line of a
/// scenarios file yields positions that are valid in the whole file.
pub fn parse_with_offset(input: &str, offset: usize) -> ParsedDocument {
    parse_with_diagnostics(input, offset).document
}

/// Parse and also report the anomalies the parser recovered from.
pub fn parse_with_diagnostics(input: &str, offset: usize) -> ParseResult {
    Parser::new(input, offset).parse()
}

// ─── Parser Implementation ─────────────────────────────────────────────────

/// Single-use parser; all state lives for one call.
struct Parser<'a> {
    toks: Vec<Token<'a>>,
    pos: usize,
    offset: usize,
    entries: Vec<OptionEntry>,
    diags: Vec<Diagnostic>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str, offset: usize) -> Self {
        Self {
            toks: tokenize(input)
                .into_iter()
                .filter(|t| !t.kind.is_trivia())
                .collect(),
            pos: 0,
            offset,
            entries: Vec::new(),
            diags: Vec::new(),
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.toks.len()
    }

    fn span(&self, start: usize, end: usize) -> Span {
        Span::new(start + self.offset, end + self.offset)
    }

    fn parse(mut self) -> ParseResult {
        while !self.at_end() {
            if self.toks[self.pos].kind == TokKind::OptionName {
                self.parse_entry();
            } else {
                self.skip_stray_values();
            }
        }
        ParseResult {
            document: ParsedDocument {
                entries: self.entries,
            },
            diagnostics: self.diags,
        }
    }

    /// `entry := OptionName value*`
    fn parse_entry(&mut self) {
        let name = &self.toks[self.pos];
        let name_text = name.text.to_owned();
        let start = name.start;
        let mut end = name.end;
        self.pos += 1;

        let mut values = Vec::new();
        while !self.at_end() {
            let tok = &self.toks[self.pos];
            let quote = match tok.kind {
                TokKind::OptionName => break,
                TokKind::String(q) => q,
                TokKind::Bare => Quote::None,
                TokKind::UnterminatedString => {
                    let span = self.span(tok.start, tok.end);
                    self.diags.push(
                        Diagnostic::warn(
                            codes::UNTERMINATED_QUOTE,
                            "unterminated quoted value",
                            Some(span),
                        )
                        .with_context(ctx!("option" => name_text.as_str(), "value" => tok.text)),
                    );
                    Quote::None
                }
                TokKind::Comment | TokKind::Whitespace => {
                    self.pos += 1;
                    continue;
                }
            };
            values.push(EntryValue {
                text: tok.image().to_owned(),
                quote,
            });
            end = tok.end;
            self.pos += 1;
        }

        self.entries.push(OptionEntry {
            name: name_text,
            values,
            start: start + self.offset,
            end: end + self.offset,
        });
    }

    /// Skip values that precede the first option name. Adjacent stray tokens
    /// are coalesced into one diagnostic.
    fn skip_stray_values(&mut self) {
        let start = self.toks[self.pos].start;
        let mut end = self.toks[self.pos].end;
        self.pos += 1;
        while !self.at_end() && self.toks[self.pos].kind != TokKind::OptionName {
            end = self.toks[self.pos].end;
            self.pos += 1;
        }
        self.diags.push(Diagnostic::warn(
            codes::STRAY_VALUE,
            "value outside of any option entry",
            Some(self.span(start, end)),
        ));
    }
}
