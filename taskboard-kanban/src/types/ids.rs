//! Identifier newtypes.
//!
//! Every identifier is minted by the remote API (Mongo-style object ids), so
//! these wrappers only carry the string and keep the different kinds of id
//! from being mixed up.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an existing identifier string
            pub fn from_string(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the inner string value
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&$name> for $name {
            fn from(id: &$name) -> Self {
                id.clone()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Identifier of a board
    BoardId
);
string_id!(
    /// Identifier of a column (workflow stage)
    ColumnId
);
string_id!(
    /// Identifier of a card
    CardId
);
string_id!(
    /// Identifier of a comment
    CommentId
);
string_id!(
    /// Identifier of a user (board owner, member, assignee, comment author)
    UserId
);
string_id!(
    /// Identifier of a notification
    NotificationId
);
