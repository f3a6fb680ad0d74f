//! Board membership commands and team-page helpers

mod add;
mod list;
mod remove;
mod role;

pub use add::AddMember;
pub use list::ListMembers;
pub use remove::RemoveMember;
pub use role::UpdateMemberRole;

use crate::types::{BoardMember, MemberRole};
use serde::Serialize;

/// Members whose name or email contains `query`, ignoring case.
///
/// A blank query matches everyone.
pub fn search_members<'a>(members: &'a [BoardMember], query: &str) -> Vec<&'a BoardMember> {
    let query = query.trim();
    members
        .iter()
        .filter(|m| query.is_empty() || m.matches(query))
        .collect()
}

/// How many members hold each role
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RoleCounts {
    pub admins: usize,
    pub members: usize,
}

impl RoleCounts {
    pub fn tally(members: &[BoardMember]) -> Self {
        members.iter().fold(Self::default(), |mut counts, m| {
            match m.role {
                MemberRole::Admin => counts.admins += 1,
                MemberRole::Member => counts.members += 1,
            }
            counts
        })
    }

    pub fn total(&self) -> usize {
        self.admins + self.members
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UserId;

    fn member(name: Option<&str>, email: &str, role: MemberRole) -> BoardMember {
        BoardMember {
            user_id: UserId::from(email),
            name: name.map(str::to_string),
            email: email.into(),
            role,
        }
    }

    #[test]
    fn test_search_and_counts() {
        let team = vec![
            member(Some("Ada Lovelace"), "ada@example.com", MemberRole::Admin),
            member(None, "grace@navy.mil", MemberRole::Member),
            member(Some("Alan"), "alan@example.com", MemberRole::Member),
        ];

        assert_eq!(search_members(&team, "  ").len(), 3);
        let found: Vec<&str> = search_members(&team, "EXAMPLE")
            .into_iter()
            .map(|m| m.email.as_str())
            .collect();
        assert_eq!(found, ["ada@example.com", "alan@example.com"]);
        assert_eq!(search_members(&team, "navy").len(), 1);

        let counts = RoleCounts::tally(&team);
        assert_eq!(counts, RoleCounts { admins: 1, members: 2 });
        assert_eq!(counts.total(), 3);
    }
}
