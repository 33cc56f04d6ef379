//! Token types for text analysis.
//!
//! A [`Token`] is the unit that flows through the analysis pipeline. Offsets
//! are byte positions in the text handed to the tokenizer, after char
//! filtering.
//!
//! # Examples
//!
//! ```
//! use handoff::analysis::token::Token;
//!
//! let token = Token::with_offsets("refund", 2, 8, 14);
//! assert_eq!(token.text, "refund");
//! assert_eq!(token.position, 2);
//! assert!(!token.is_stopped());
//! ```

use std::fmt;

/// A single word of a message after tokenization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    /// Index in the tokenizer output (0-based).
    pub position: usize,
    pub start_offset: usize,
    pub end_offset: usize,
    /// Set by filters that mark rather than drop tokens.
    pub stopped: bool,
}

impl Token {
    /// A token without offset information.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        Self::with_offsets(text, position, 0, 0)
    }

    pub fn with_offsets<S: Into<String>>(
        text: S,
        position: usize,
        start_offset: usize,
        end_offset: usize,
    ) -> Self {
        Token {
            text: text.into(),
            position,
            start_offset,
            end_offset,
            stopped: false,
        }
    }

    /// Mark as stopped; stopped tokens are dropped at the end of the pipeline.
    pub fn stop(self) -> Self {
        Token {
            stopped: true,
            ..self
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Whether the token would survive the end of the pipeline.
    pub fn is_live(&self) -> bool {
        !self.stopped && !self.text.is_empty()
    }

    /// Replace the text, keeping position and offsets.
    pub fn with_text<S: Into<String>>(self, text: S) -> Self {
        Token {
            text: text.into(),
            ..self
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// The lazily evaluated output of a tokenizer or filter.
pub type TokenStream = Box<dyn Iterator<Item = Token>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_creation() {
        let token = Token::new("hello", 0);

        assert_eq!(token.text, "hello");
        assert_eq!((token.start_offset, token.end_offset), (0, 0));
        assert!(token.is_live());
    }

    #[test]
    fn test_stop_and_rename_keep_offsets() {
        let token = Token::with_offsets("Agent", 1, 4, 9).stop();
        assert!(token.is_stopped());
        assert!(!token.is_live());

        let renamed = token.with_text("agent");
        assert_eq!(renamed.text, "agent");
        assert_eq!(renamed.start_offset, 4);
        assert!(renamed.is_stopped());
    }

    #[test]
    fn test_empty_token_is_not_live() {
        assert!(!Token::new("", 3).is_live());
        assert_eq!(Token::new("human", 0).to_string(), "human");
    }
}
