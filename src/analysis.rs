//! Text analysis for handoff classification.
//!
//! Messages and reference phrases are turned into comparable token sets by a
//! small pipeline: char filters normalize the raw text, a tokenizer splits
//! it, and token filters lowercase, drop stop words and clean up.
//!
//! ```text
//! Raw Text → CharFilter* → Tokenizer → Filter* → Token set
//! ```

pub mod analyzer;
pub mod char_filter;
pub mod token;
pub mod token_filter;
pub mod tokenizer;
