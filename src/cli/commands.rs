//! Command implementations for the handoff CLI.

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use log::{debug, info, warn};
use rayon::prelude::*;
use serde::Deserialize;

use crate::classifier::{HandoffClassifier, HandoffConfig, HandoffPolicy, TracedPolicy};
use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::{HandoffError, Result};
use crate::history::History;

/// One line of a batch input file.
#[derive(Debug, Deserialize)]
struct BatchLine {
    query: String,
    #[serde(default)]
    history: String,
}

/// Execute a CLI command.
pub fn execute_command(args: HandoffArgs) -> Result<()> {
    match &args.command {
        Command::Classify(classify_args) => classify(classify_args, &args),
        Command::ClassifyFile(file_args) => classify_file(file_args, &args),
        Command::ExplainCatalog(explain_args) => explain_catalog(explain_args, &args),
        Command::CheckConfig(check_args) => check_config(check_args, &args),
    }
}

/// Load a configuration file, or the defaults when none is given.
fn load_config(path: Option<&Path>) -> Result<HandoffConfig> {
    match path {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            HandoffConfig::from_json_file(path)
        }
        None => Ok(HandoffConfig::default()),
    }
}

/// Classify one message.
fn classify(args: &ClassifyArgs, cli_args: &HandoffArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let classifier = HandoffClassifier::with_config(&config)?;

    let history = match (&args.history, &args.history_file) {
        (Some(block), _) => block.clone(),
        (None, Some(path)) => fs::read_to_string(path)?,
        (None, None) => String::new(),
    };
    let turns = History::parse(&history).len();

    let tokens = classifier
        .analyzer()
        .token_list(&args.query)
        .unwrap_or_default();

    let ignored = args.scores.then(|| {
        classifier
            .analyzer()
            .stopped_words(&args.query)
            .unwrap_or_default()
    });

    let scores = args.scores.then(|| {
        let thresholds = classifier.thresholds();
        classifier
            .phrase_scores(&args.query)
            .into_iter()
            .map(|(phrase, score)| PhraseScoreEntry {
                phrase,
                jaccard: score.jaccard,
                exact_match: score.exact_match,
                matched: thresholds.matches(&score),
            })
            .collect()
    });

    let policy = TracedPolicy::new(&classifier);
    let decision = policy.evaluate(&args.query, &history);

    output_result(
        "Classification",
        &ClassificationResult {
            policy: policy.name().to_string(),
            query: args.query.clone(),
            history_turns: turns,
            tokens,
            handoff: decision.handoff,
            reason: decision.reason,
            ignored,
            scores,
        },
        cli_args,
    )
}

/// Classify every line of a JSON-lines file in parallel.
fn classify_file(args: &ClassifyFileArgs, cli_args: &HandoffArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let classifier = HandoffClassifier::with_config(&config)?;

    let start_time = Instant::now();
    let reader = BufReader::new(File::open(&args.input)?);

    let mut lines = Vec::new();
    let mut skipped_lines = 0;
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<BatchLine>(&line) {
            Ok(parsed) => lines.push((index + 1, parsed)),
            Err(e) => {
                warn!("Skipping line {}: {}", index + 1, e);
                skipped_lines += 1;
            }
        }
    }
    debug!("Classifying {} messages", lines.len());

    // `collect` keeps input order.
    let decided: Vec<BatchEntry> = lines
        .into_par_iter()
        .map(|(line, input)| {
            let decision = classifier.evaluate(&input.query, &input.history);
            BatchEntry {
                line,
                query: input.query,
                handoff: decision.handoff,
                reason: decision.reason,
            }
        })
        .collect();

    let total = decided.len();
    let handoffs = decided.iter().filter(|entry| entry.handoff).count();
    let entries = if args.only_handoff {
        decided.into_iter().filter(|entry| entry.handoff).collect()
    } else {
        decided
    };

    output_result(
        "Batch classification",
        &BatchResult {
            entries,
            total,
            handoffs,
            skipped_lines,
            duration_ms: start_time.elapsed().as_millis() as u64,
        },
        cli_args,
    )
}

/// Print the effective catalog and thresholds.
fn explain_catalog(args: &ExplainCatalogArgs, cli_args: &HandoffArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    config.validate()?;

    output_result("Effective configuration", &config, cli_args)
}

/// Validate a configuration file.
///
/// The report is printed either way; an invalid file also fails the command.
fn check_config(args: &CheckConfigArgs, cli_args: &HandoffArgs) -> Result<()> {
    let config = HandoffConfig::from_json_file(&args.config)?;
    let validation = HandoffClassifier::with_config(&config).map(|_| ());

    let result = ConfigCheckResult {
        path: args.config.display().to_string(),
        valid: validation.is_ok(),
        error: validation.as_ref().err().map(|e| e.to_string()),
        phrases: config.catalog.phrases.len(),
        indicators: config.catalog.indicators.len(),
        frustration_keywords: config.catalog.frustration_keywords.len(),
        stop_words: config.catalog.stop_words.len(),
        thresholds: config.thresholds,
    };
    output_result("Configuration check", &result, cli_args)?;

    validation.map_err(|e| {
        HandoffError::invalid_config(format!("{} failed validation: {e}", args.config.display()))
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use clap::Parser;
    use tempfile::NamedTempFile;

    use super::*;

    fn args(argv: &[&str]) -> HandoffArgs {
        HandoffArgs::parse_from(argv)
    }

    #[test]
    fn test_classify_command() {
        let cli = args(&["handoff", "-q", "classify", "speak to a human", "--scores"]);
        assert!(execute_command(cli).is_ok());
    }

    #[test]
    fn test_classify_file_command() {
        let mut input = NamedTempFile::new().unwrap();
        writeln!(input, r#"{{"query": "get me a supervisor"}}"#).unwrap();
        writeln!(input).unwrap();
        writeln!(input, "not json").unwrap();
        writeln!(
            input,
            r#"{{"query": "what are your hours", "history": "User: hi\nBot: hello"}}"#
        )
        .unwrap();

        let path = input.path().to_str().unwrap();
        let cli = args(&["handoff", "--format", "json", "classify-file", path]);
        assert!(execute_command(cli).is_ok());
    }

    #[test]
    fn test_check_config_rejects_invalid() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"thresholds": {{"jaccard_alone": 1.5}}}}"#).unwrap();

        let path = file.path().to_str().unwrap();
        let err = execute_command(args(&["handoff", "check-config", path])).unwrap_err();
        assert!(matches!(err, HandoffError::InvalidConfig(_)));
    }

    #[test]
    fn test_check_config_accepts_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", HandoffConfig::default().to_json_pretty().unwrap()).unwrap();

        let path = file.path().to_str().unwrap();
        assert!(execute_command(args(&["handoff", "check-config", path])).is_ok());
        assert!(execute_command(args(&["handoff", "explain-catalog", "--config", path])).is_ok());
    }

    #[test]
    fn test_missing_config_file() {
        let err = execute_command(args(&[
            "handoff",
            "explain-catalog",
            "--config",
            "/nonexistent/handoff.json",
        ]))
        .unwrap_err();
        assert!(matches!(err, HandoffError::Io(_)));
    }
}
