//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::classifier::{HandoffConfig, HandoffReason, Thresholds};
use crate::cli::args::{HandoffArgs, OutputFormat};
use crate::error::Result;

/// Rendering of a result for the human output format.
pub trait HumanOutput {
    fn human_lines(&self) -> Vec<String>;
}

/// Score of the message against one reference phrase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhraseScoreEntry {
    pub phrase: String,
    pub jaccard: f64,
    pub exact_match: f64,
    pub matched: bool,
}

/// Result of classifying one message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub policy: String,
    pub query: String,
    pub history_turns: usize,
    pub tokens: Vec<String>,
    pub handoff: bool,
    pub reason: Option<HandoffReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignored: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scores: Option<Vec<PhraseScoreEntry>>,
}

/// One classified line of a batch file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchEntry {
    pub line: usize,
    pub query: String,
    pub handoff: bool,
    pub reason: Option<HandoffReason>,
}

/// Result of classifying a batch file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResult {
    pub entries: Vec<BatchEntry>,
    pub total: usize,
    pub handoffs: usize,
    pub skipped_lines: usize,
    pub duration_ms: u64,
}

/// Result of validating a configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigCheckResult {
    pub path: String,
    pub valid: bool,
    pub error: Option<String>,
    pub phrases: usize,
    pub indicators: usize,
    pub frustration_keywords: usize,
    pub stop_words: usize,
    pub thresholds: Thresholds,
}

impl HumanOutput for ClassificationResult {
    fn human_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Query:    {}", self.query),
            format!("Tokens:   [{}]", self.tokens.join(", ")),
            format!("History:  {} turns", self.history_turns),
            format!(
                "Decision: {}",
                if self.handoff { "HANDOFF" } else { "stay with assistant" }
            ),
        ];
        if let Some(ignored) = &self.ignored {
            lines.insert(2, format!("Ignored:  [{}]", ignored.join(", ")));
        }
        if let Some(reason) = &self.reason {
            lines.push(format!("Reason:   {reason}"));
        }
        if let Some(scores) = &self.scores {
            lines.push(String::new());
            lines.push("Phrase scores:".to_string());
            lines.push("──────────────".to_string());
            for score in scores {
                lines.push(format!(
                    "{} jaccard={:.3} exact={:.3}  {}",
                    if score.matched { "*" } else { " " },
                    score.jaccard,
                    score.exact_match,
                    score.phrase
                ));
            }
        }
        lines
    }
}

impl HumanOutput for BatchResult {
    fn human_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .entries
            .iter()
            .map(|entry| {
                let reason = entry
                    .reason
                    .as_ref()
                    .map(|r| format!(" ({r})"))
                    .unwrap_or_default();
                format!(
                    "{:>5}  {:<8} {}{}",
                    entry.line,
                    if entry.handoff { "HANDOFF" } else { "stay" },
                    entry.query,
                    reason
                )
            })
            .collect();

        lines.push(String::new());
        lines.push(format!(
            "{} of {} messages hand off ({} lines skipped, {}ms)",
            self.handoffs, self.total, self.skipped_lines, self.duration_ms
        ));
        lines
    }
}

impl HumanOutput for ConfigCheckResult {
    fn human_lines(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "{}: {}",
            self.path,
            if self.valid { "valid" } else { "INVALID" }
        )];
        if let Some(error) = &self.error {
            lines.push(format!("  {error}"));
        }
        lines.push(format!("  phrases:              {}", self.phrases));
        lines.push(format!("  indicators:           {}", self.indicators));
        lines.push(format!("  frustration keywords: {}", self.frustration_keywords));
        lines.push(format!("  stop words:           {}", self.stop_words));
        lines.push(format!(
            "  thresholds:           jaccard>={} with exact>={}, or jaccard>={}",
            self.thresholds.jaccard_with_exact,
            self.thresholds.exact_match,
            self.thresholds.jaccard_alone
        ));
        lines
    }
}

impl HumanOutput for HandoffConfig {
    fn human_lines(&self) -> Vec<String> {
        // The catalog is data; even the human format prints it as JSON.
        match self.to_json_pretty() {
            Ok(json) => json.lines().map(str::to_string).collect(),
            Err(e) => vec![format!("unprintable configuration: {e}")],
        }
    }
}

/// Output a result in the specified format.
pub fn output_result<T>(message: &str, result: &T, args: &HandoffArgs) -> Result<()>
where
    T: Serialize + HumanOutput,
{
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: HumanOutput>(message: &str, result: &T, args: &HandoffArgs) -> Result<()> {
    if args.verbosity() > 1 && !message.is_empty() {
        println!("{message}");
        println!();
    }

    for line in result.human_lines() {
        println!("{line}");
    }
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &HandoffArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}
