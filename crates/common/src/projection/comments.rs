// Comment thread visibility and reactions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::timestamp::parse_timestamp_lenient;
use crate::types::{Comment, CommentVisibility, ParseEnumError, Reaction};

/// Who is reading the thread.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Audience {
    /// Internal staff; sees every comment.
    #[default]
    Team,
    /// Sees only comments shared with the client.
    Client,
}

impl Audience {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Team => "team",
            Self::Client => "client",
        }
    }

    pub fn can_see(self, visibility: CommentVisibility) -> bool {
        match self {
            Self::Team => true,
            Self::Client => visibility == CommentVisibility::Client,
        }
    }
}

impl fmt::Display for Audience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Audience {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "team" => Ok(Self::Team),
            "client" => Ok(Self::Client),
            other => Err(ParseEnumError { kind: "audience", value: other.to_string() }),
        }
    }
}

/// Comments on `ticket_id` the audience may read, oldest first.
/// Unparseable creation times sort last.
pub fn visible_comments<'a>(
    comments: &'a [Comment],
    ticket_id: &str,
    audience: Audience,
) -> Vec<&'a Comment> {
    let mut thread: Vec<&Comment> = comments
        .iter()
        .filter(|c| c.ticket_id == ticket_id && audience.can_see(c.visibility))
        .collect();
    thread.sort_by_cached_key(|c| {
        let ts = parse_timestamp_lenient(&c.created_at);
        (ts.is_none(), ts)
    });
    thread
}

pub fn has_reacted(reaction: &Reaction, user_id: &str) -> bool {
    reaction.users.iter().any(|u| u == user_id)
}
