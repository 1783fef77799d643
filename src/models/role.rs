use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three user roles. Everything role-dependent (stats projection, nav
/// visibility, filter affordances, data scoping) dispatches on this enum,
/// never on raw strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Pentester,
    Ces,
    Manager,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Pentester, Role::Ces, Role::Manager];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Pentester => "pentester",
            Role::Ces => "ces",
            Role::Manager => "manager",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Pentester => "Pentester",
            Role::Ces => "CES",
            Role::Manager => "Manager",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pentester" => Ok(Role::Pentester),
            "ces" => Ok(Role::Ces),
            "manager" => Ok(Role::Manager),
            other => Err(format!("unknown role: {other}")),
        }
    }
}
