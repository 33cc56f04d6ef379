//! Lowercase filter implementation.

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Lowercases token text with the Unicode default case mapping.
///
/// `str::to_lowercase` does not consult the process locale, so "TITLE" and
/// "title" compare equal on every host. Stopped tokens pass through as is.
#[derive(Clone, Copy, Debug, Default)]
pub struct LowercaseFilter;

impl LowercaseFilter {
    pub fn new() -> Self {
        LowercaseFilter
    }
}

impl Filter for LowercaseFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(Box::new(tokens.map(|token| {
            if token.is_stopped() {
                return token;
            }
            let lowered = token.text.to_lowercase();
            token.with_text(lowered)
        })))
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    fn lowercase(tokens: Vec<Token>) -> Vec<String> {
        LowercaseFilter::new()
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .map(|t| t.text)
            .collect()
    }

    #[test]
    fn test_lowercase_skips_stopped() {
        let tokens = vec![
            Token::new("SPEAK", 0),
            Token::new("Human", 1),
            Token::new("The", 2).stop(),
        ];
        assert_eq!(lowercase(tokens), vec!["speak", "human", "The"]);
    }

    #[test]
    fn test_lowercase_non_ascii() {
        let result = lowercase(vec![Token::new("ÜBER", 0), Token::new("İSTANBUL", 1)]);

        assert_eq!(result[0], "über");
        // Dotted capital I maps to "i" plus a combining dot above.
        assert_eq!(result[1], "i\u{307}stanbul");
    }
}
