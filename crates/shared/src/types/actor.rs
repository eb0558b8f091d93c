//! Actor types for the authenticated principal performing an operation.
//!
//! The actor is produced by the session layer (out of scope here) and
//! consumed as a given by every ledger operation.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::id::MemberId;

/// Role of an organization member.
///
/// Only team members carry a permission record; other roles are
/// default-deny and rely entirely on the manager override being absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Staff member with a stored permission record.
    TeamMember,
    /// Read-only guest account.
    Guest,
}

impl Role {
    /// Returns the string representation of the role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TeamMember => "team_member",
            Self::Guest => "guest",
        }
    }

    /// Parses a role from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "team_member" => Some(Self::TeamMember),
            "guest" => Some(Self::Guest),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The authenticated principal attached to every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The member performing the operation.
    pub id: MemberId,
    /// Display name shown in audit fields.
    pub display_name: String,
    /// The actor's role.
    pub role: Role,
}

impl Actor {
    /// Creates a new actor.
    #[must_use]
    pub fn new(id: MemberId, display_name: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_as_str() {
        assert_eq!(Role::TeamMember.as_str(), "team_member");
        assert_eq!(Role::Guest.as_str(), "guest");
    }

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse("team_member"), Some(Role::TeamMember));
        assert_eq!(Role::parse("GUEST"), Some(Role::Guest));
        assert_eq!(Role::parse("owner"), None);
    }

    #[test]
    fn test_actor_new() {
        let id = MemberId::new();
        let actor = Actor::new(id, "Amal", Role::TeamMember);
        assert_eq!(actor.id, id);
        assert_eq!(actor.display_name, "Amal");
        assert_eq!(actor.role, Role::TeamMember);
    }
}
