//! Analyzers that combine char filters, a tokenizer and token filters.
//!
//! - [`PipelineAnalyzer`] - Custom char filter, tokenizer and filter chains
//! - [`HandoffAnalyzer`] - The fixed pipeline used to compare chat messages
//!   with handoff phrases
//!
//! # Examples
//!
//! ```
//! use handoff::analysis::analyzer::{Analyzer, HandoffAnalyzer};
//!
//! let analyzer = HandoffAnalyzer::new().unwrap();
//! let tokens: Vec<_> = analyzer.analyze("I'd like to SPEAK to a human!").unwrap().collect();
//!
//! let words: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
//! assert_eq!(words, vec!["like", "speak", "human"]);
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

mod handoff;
mod pipeline;

pub use handoff::HandoffAnalyzer;
pub use pipeline::PipelineAnalyzer;

/// Trait for analyzers that convert text into processed tokens.
///
/// The trait requires `Send + Sync` so a single analyzer can be shared by
/// every request handler of the surrounding service.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &'static str;
}
