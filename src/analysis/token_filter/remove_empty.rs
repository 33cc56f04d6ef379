//! Drops tokens that carry no text.

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Removes empty tokens and tokens marked as stopped.
///
/// Char filtering can leave a whitespace-separated chunk with nothing in
/// it ("#42" becomes ""), so this runs last.
#[derive(Clone, Copy, Debug, Default)]
pub struct RemoveEmptyFilter;

impl RemoveEmptyFilter {
    pub fn new() -> Self {
        RemoveEmptyFilter
    }
}

impl Filter for RemoveEmptyFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(Box::new(tokens.filter(|token| token.is_live())))
    }

    fn name(&self) -> &'static str {
        "remove_empty"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    #[test]
    fn test_drops_empty_and_stopped() {
        let tokens = vec![
            Token::new("cancel", 0),
            Token::new("", 1),
            Token::new("plan", 2),
            Token::new("the", 3).stop(),
        ];

        let kept: Vec<String> = RemoveEmptyFilter::new()
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .map(|t| t.text)
            .collect();

        assert_eq!(kept, vec!["cancel", "plan"]);
    }
}
