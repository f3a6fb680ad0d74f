//! Board membership types

use super::ids::UserId;
use serde::{Deserialize, Serialize};

/// A member of a board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardMember {
    pub user_id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub email: String,
    #[serde(default)]
    pub role: MemberRole,
}

impl BoardMember {
    /// Case-insensitive match against name or email, as the team search box does
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.email.to_lowercase().contains(&query)
            || self
                .name
                .as_deref()
                .is_some_and(|n| n.to_lowercase().contains(&query))
    }
}

/// Role of a board member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Admin,
    #[default]
    Member,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_matches() {
        let member = BoardMember {
            user_id: UserId::from("u1"),
            name: Some("Ada Lovelace".into()),
            email: "ada@example.com".into(),
            role: MemberRole::Admin,
        };

        assert!(member.matches("LOVE"));
        assert!(member.matches("example.com"));
        assert!(!member.matches("grace"));
    }

    #[test]
    fn test_role_wire_format() {
        assert_eq!(serde_json::to_string(&MemberRole::Admin).unwrap(), "\"admin\"");
        let role: MemberRole = serde_json::from_str("\"member\"").unwrap();
        assert_eq!(role, MemberRole::Member);
    }
}
