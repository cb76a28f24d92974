//! Minimal parser for Valve's KeyValues text format ("VDF"), plus the
//! depot key extraction built on top of it.
//!
//! Payloads come from semi-trusted third-party repositories with
//! inconsistent formatting, so the parser tolerates unquoted tokens,
//! `//` comments, and unknown escape sequences. The extractor never
//! fails the pipeline: any undecodable or malformed document yields
//! zero keys.

use std::iter::Peekable;
use std::str::CharIndices;

use thiserror::Error;
use tracing::warn;

use crate::types::DepotKey;

/// Field carrying a depot's decryption key.
const DECRYPTION_KEY_FIELD: &str = "DecryptionKey";

/// A VDF document: an ordered list of key/value pairs. Duplicate keys
/// are preserved in order.
pub type Document = Vec<(String, Value)>;

/// A VDF value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A string leaf.
    Str(String),
    /// A nested `{ ... }` block.
    Block(Document),
}

impl Value {
    /// The nested block, if this value is one.
    pub fn as_block(&self) -> Option<&Document> {
        match self {
            Self::Block(doc) => Some(doc),
            Self::Str(_) => None,
        }
    }

    /// The string leaf, if this value is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            Self::Block(_) => None,
        }
    }
}

/// Structural errors raised by [`parse`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VdfError {
    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("unbalanced braces")]
    Unbalanced,

    #[error("expected a value after key '{0}'")]
    MissingValue(String),
}

#[derive(Debug, PartialEq)]
enum Token {
    Str(String),
    Open,
    Close,
}

struct Lexer<'a> {
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            chars: src.char_indices().peekable(),
        }
    }

    fn next_token(&mut self) -> Result<Option<Token>, VdfError> {
        self.skip_trivia();
        let Some(&(_, ch)) = self.chars.peek() else {
            return Ok(None);
        };
        match ch {
            '{' => {
                self.chars.next();
                Ok(Some(Token::Open))
            }
            '}' => {
                self.chars.next();
                Ok(Some(Token::Close))
            }
            '"' => {
                self.chars.next();
                self.quoted().map(|s| Some(Token::Str(s)))
            }
            _ => Ok(Some(Token::Str(self.bare()))),
        }
    }

    /// Skip whitespace and `//` line comments.
    fn skip_trivia(&mut self) {
        loop {
            match self.chars.peek() {
                Some(&(_, c)) if c.is_whitespace() => {
                    self.chars.next();
                }
                Some(&(_, '/')) => {
                    let mut ahead = self.chars.clone();
                    ahead.next();
                    if matches!(ahead.peek(), Some(&(_, '/'))) {
                        for (_, c) in self.chars.by_ref() {
                            if c == '\n' {
                                break;
                            }
                        }
                    } else {
                        break;
                    }
                }
                _ => break,
            }
        }
    }

    /// Body of a quoted string; the opening quote is already consumed.
    fn quoted(&mut self) -> Result<String, VdfError> {
        let mut out = String::new();
        while let Some((_, c)) = self.chars.next() {
            match c {
                '"' => return Ok(out),
                '\\' => match self.chars.next() {
                    Some((_, 'n')) => out.push('\n'),
                    Some((_, 't')) => out.push('\t'),
                    // Unknown escapes keep the escaped character.
                    Some((_, esc)) => out.push(esc),
                    None => return Err(VdfError::UnexpectedEof),
                },
                _ => out.push(c),
            }
        }
        Err(VdfError::UnexpectedEof)
    }

    /// An unquoted token: runs until whitespace, a brace, or a quote.
    fn bare(&mut self) -> String {
        let mut out = String::new();
        while let Some(&(_, c)) = self.chars.peek() {
            if c.is_whitespace() || matches!(c, '{' | '}' | '"') {
                break;
            }
            out.push(c);
            self.chars.next();
        }
        out
    }
}

/// Parse VDF text into a [`Document`].
pub fn parse(src: &str) -> Result<Document, VdfError> {
    let mut lexer = Lexer::new(src);
    parse_pairs(&mut lexer, false)
}

fn parse_pairs(lexer: &mut Lexer<'_>, in_block: bool) -> Result<Document, VdfError> {
    let mut pairs = Document::new();
    loop {
        match lexer.next_token()? {
            None if in_block => return Err(VdfError::UnexpectedEof),
            None => return Ok(pairs),
            Some(Token::Close) if in_block => return Ok(pairs),
            Some(Token::Close) | Some(Token::Open) => return Err(VdfError::Unbalanced),
            Some(Token::Str(key)) => {
                let value = match lexer.next_token()? {
                    Some(Token::Str(s)) => Value::Str(s),
                    Some(Token::Open) => Value::Block(parse_pairs(lexer, true)?),
                    Some(Token::Close) => return Err(VdfError::MissingValue(key)),
                    None => return Err(VdfError::MissingValue(key)),
                };
                pairs.push((key, value));
            }
        }
    }
}

/// Extract (depot id, decryption key) pairs from a raw VDF payload.
///
/// Walks every `depots` block in the document, wherever it nests
/// (`key.vdf` carries it at the root, `config.vdf` buries it under
/// `InstallConfigStore/Software/Valve/Steam`), and emits each child
/// whose `DecryptionKey` field is present, non-empty, and not the
/// all-zero placeholder.
///
/// Never fails: decode and parse errors are logged and yield an empty
/// vec.
pub fn extract_depot_keys(payload: &[u8]) -> Vec<DepotKey> {
    let text = match std::str::from_utf8(payload) {
        Ok(t) => t,
        Err(e) => {
            warn!(error = %e, "payload is not UTF-8");
            return Vec::new();
        }
    };
    let doc = match parse(text) {
        Ok(d) => d,
        Err(e) => {
            warn!(error = %e, "payload is not valid VDF");
            return Vec::new();
        }
    };
    let mut keys = Vec::new();
    collect_depots(&doc, &mut keys);
    keys
}

fn collect_depots(doc: &Document, out: &mut Vec<DepotKey>) {
    for (name, value) in doc {
        let Value::Block(block) = value else { continue };
        if name.eq_ignore_ascii_case("depots") {
            extract_from_depots(block, out);
        } else {
            collect_depots(block, out);
        }
    }
}

fn extract_from_depots(depots: &Document, out: &mut Vec<DepotKey>) {
    for (depot_id, value) in depots {
        let Value::Block(fields) = value else { continue };
        let Some(key) = fields.iter().find_map(|(field, v)| {
            (field == DECRYPTION_KEY_FIELD).then(|| v.as_str()).flatten()
        }) else {
            continue;
        };
        if is_placeholder(key) {
            continue;
        }
        out.push(DepotKey {
            depot_id: depot_id.clone(),
            key: key.to_string(),
        });
    }
}

/// An all-zero key of the key's own length means "no key issued"; an
/// empty field is treated the same way.
fn is_placeholder(key: &str) -> bool {
    key.is_empty() || key.bytes().all(|b| b == b'0')
}
