//! Flag Lexer
//!
//! Splits a flag string into tokens and glues `-framework NAME` pairs
//! back together so they travel through classification as one unit.

/// The literal spelling of the macOS framework directive.
pub const FRAMEWORK: &str = "-framework";

/// Token types in a flag string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Anything starting with '-', like "-Iinclude" or "-Wl,-rpath"
    Flag,
    /// A merged "-framework NAME" unit (or a lone trailing "-framework")
    Framework,
    /// A bare word with no leading '-'
    Word,
}

/// A token with its text content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// Name carried by a framework unit, e.g. "Qt" for "-framework Qt"
    pub fn framework_name(&self) -> Option<&str> {
        if self.kind != TokenKind::Framework {
            return None;
        }
        self.text
            .strip_prefix(FRAMEWORK)
            .map(str::trim_start)
            .filter(|name| !name.is_empty())
    }
}

/// Tokenize a flag string
///
/// Words are split on whitespace; every `-framework` then takes the word
/// after it as its name, whatever that word looks like.
pub fn tokenize(flags: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut words = flags.split_whitespace();

    while let Some(word) = words.next() {
        if word == FRAMEWORK {
            match words.next() {
                Some(name) => {
                    tokens.push(Token::new(
                        TokenKind::Framework,
                        format!("{FRAMEWORK} {name}"),
                    ));
                }
                None => tokens.push(Token::new(TokenKind::Framework, FRAMEWORK)),
            }
            continue;
        }

        let kind = if word.starts_with('-') {
            TokenKind::Flag
        } else {
            TokenKind::Word
        };
        tokens.push(Token::new(kind, word));
    }

    tokens
}
