//! Automation bot author detection.

use regex::Regex;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::types::CommitAuthor;

/// Marker GitHub puts in the display name of app accounts, as in
/// `dependabot[bot] <49699333+dependabot[bot]@users.noreply.github.com>`.
const TAGGED_BOT_MARKER: &str = "[bot]";

/// Errors building a [`BotAuthorPattern`].
#[derive(Debug, Error)]
pub enum InvalidBotPattern {
    #[error("invalid bot author regexp: {0}")]
    Regex(#[from] regex::Error),

    #[error("bot author regexp {pattern:?} has {groups} capturing groups; at most one is allowed")]
    TooManyGroups { pattern: String, groups: usize },
}

/// An e-mail pattern identifying automation accounts.
///
/// If the pattern has a capturing group, the captured text must also match
/// the author's name once whitespace runs are replaced by hyphens. With
/// `noreply\+(\w+)@example\.com`, `OSS Updater <noreply+oss-updater@example.com>`
/// is a bot but `Bad Horse <noreply+neigh@example.com>` is not.
#[derive(Clone)]
pub struct BotAuthorPattern {
    regex: Regex,
}

impl BotAuthorPattern {
    pub fn new(pattern: &str) -> Result<Self, InvalidBotPattern> {
        let regex = Regex::new(pattern)?;
        // captures_len counts the implicit whole-match group.
        let groups = regex.captures_len() - 1;
        if groups > 1 {
            return Err(InvalidBotPattern::TooManyGroups {
                pattern: pattern.to_string(),
                groups,
            });
        }
        Ok(BotAuthorPattern { regex })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    fn matches(&self, name: &str, email: &str) -> bool {
        let Some(captures) = self.regex.captures(email) else {
            return false;
        };
        match captures.get(1) {
            Some(group) => hyphenate(name).to_lowercase() == group.as_str().to_lowercase(),
            // No capturing group in the pattern, or the group did not take part.
            None => self.regex.captures_len() == 1,
        }
    }
}

impl FromStr for BotAuthorPattern {
    type Err = InvalidBotPattern;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BotAuthorPattern::new(s)
    }
}

impl fmt::Debug for BotAuthorPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BotAuthorPattern")
            .field(&self.regex.as_str())
            .finish()
    }
}

/// Reports whether `author` is an automation bot.
///
/// An author missing either a name or an e-mail address is never a bot, even
/// when the name carries the `[bot]` suffix.
pub fn is_bot_author(author: &CommitAuthor, pattern: Option<&BotAuthorPattern>) -> bool {
    let (Some(name), Some(email)) = (author.name.as_deref(), author.email.as_deref()) else {
        return false;
    };
    if name.contains(TAGGED_BOT_MARKER) {
        return true;
    }
    pattern.is_some_and(|p| p.matches(name, email))
}

fn hyphenate(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join("-")
}
