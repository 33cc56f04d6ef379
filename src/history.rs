//! Conversation history in the tagged transcript format.
//!
//! The conversation pipeline passes recent turns to a [`HandoffPolicy`] and
//! to the hosted model as one block of tagged lines:
//!
//! ```text
//! User: Where is my invoice?
//! Bot: You can download it from the billing page.
//! User: It is not there
//! ```
//!
//! A line starting with `User:` or `Bot:` opens a turn; any other line
//! continues the previous turn. Text before the first tag is ignored.
//!
//! [`HandoffPolicy`]: crate::classifier::HandoffPolicy

use std::fmt;

use serde::{Deserialize, Serialize};

const USER_TAG: &str = "User:";
const BOT_TAG: &str = "Bot:";

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Bot,
}

impl Speaker {
    fn tag(self) -> &'static str {
        match self {
            Speaker::User => USER_TAG,
            Speaker::Bot => BOT_TAG,
        }
    }
}

/// One utterance in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub speaker: Speaker,
    pub text: String,
}

impl Turn {
    pub fn user<S: Into<String>>(text: S) -> Self {
        Turn {
            speaker: Speaker::User,
            text: text.into(),
        }
    }

    pub fn bot<S: Into<String>>(text: S) -> Self {
        Turn {
            speaker: Speaker::Bot,
            text: text.into(),
        }
    }
}

/// An ordered sequence of turns, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    turns: Vec<Turn>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a tagged transcript block.
    pub fn parse(block: &str) -> Self {
        let mut turns: Vec<Turn> = Vec::new();

        for line in block.lines() {
            let opened = [Speaker::User, Speaker::Bot]
                .into_iter()
                .find_map(|speaker| {
                    line.strip_prefix(speaker.tag())
                        .map(|rest| (speaker, rest.trim_start()))
                });

            match opened {
                Some((speaker, text)) => turns.push(Turn {
                    speaker,
                    text: text.to_string(),
                }),
                None => {
                    if let Some(last) = turns.last_mut() {
                        last.text.push('\n');
                        last.text.push_str(line);
                    }
                }
            }
        }

        for turn in &mut turns {
            let trimmed = turn.text.trim_end().len();
            turn.text.truncate(trimmed);
        }

        History { turns }
    }

    /// Render as a tagged transcript block (no trailing newline).
    pub fn format(&self) -> String {
        self.turns
            .iter()
            .map(|turn| format!("{} {}", turn.speaker.tag(), turn.text))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Texts of the user turns, oldest first.
    pub fn user_turns(&self) -> impl Iterator<Item = &str> {
        self.turns
            .iter()
            .filter(|turn| turn.speaker == Speaker::User)
            .map(|turn| turn.text.as_str())
    }

    /// The most recent `n` turns.
    pub fn last(&self, n: usize) -> History {
        let start = self.turns.len().saturating_sub(n);
        History {
            turns: self.turns[start..].to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

impl FromIterator<Turn> for History {
    fn from_iter<I: IntoIterator<Item = Turn>>(iter: I) -> Self {
        History {
            turns: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for History {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_format() {
        let block = "User: What is your price?\nBot: It starts at $10.\nUser: And support?";
        let history = History::parse(block);

        assert_eq!(history.len(), 3);
        assert_eq!(history.turns()[0], Turn::user("What is your price?"));
        assert_eq!(history.turns()[1], Turn::bot("It starts at $10."));
        assert_eq!(history.format(), block);
    }

    #[test]
    fn test_multiline_turns() {
        let history = History::parse("User: first line\nsecond line\nBot: ok\n");

        assert_eq!(history.len(), 2);
        assert_eq!(history.turns()[0].text, "first line\nsecond line");
        assert_eq!(history.turns()[1].text, "ok");
    }

    #[test]
    fn test_untagged_prefix_ignored() {
        let history = History::parse("stray text\nUser: hello");
        assert_eq!(history.turns(), &[Turn::user("hello")]);
        assert!(History::parse("").is_empty());
    }

    #[test]
    fn test_empty_bot_reply() {
        let history = History::parse("User: hi\nBot: \nUser: anyone?");
        assert_eq!(history.len(), 3);
        assert_eq!(history.turns()[1].text, "");
    }

    #[test]
    fn test_user_turns_and_last() {
        let history: History = vec![
            Turn::user("a"),
            Turn::bot("b"),
            Turn::user("c"),
            Turn::bot("d"),
        ]
        .into_iter()
        .collect();

        assert_eq!(history.user_turns().collect::<Vec<_>>(), vec!["a", "c"]);
        assert_eq!(history.last(2).turns(), &[Turn::user("c"), Turn::bot("d")]);
        assert_eq!(history.last(10).len(), 4);
    }
}
