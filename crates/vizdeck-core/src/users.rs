//! Users and the five-level role model.
//!
//! Roles are a plain precedence ladder: a role grants everything the roles
//! below it grant. This is deliberately not a policy engine.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Access levels, lowest to highest.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Viewer,
    Tester,
    Editor,
    Developer,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Viewer => "viewer",
            Role::Tester => "tester",
            Role::Editor => "editor",
            Role::Developer => "developer",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "viewer" => Ok(Role::Viewer),
            "tester" => Ok(Role::Tester),
            "editor" => Ok(Role::Editor),
            "developer" => Ok(Role::Developer),
            "admin" => Ok(Role::Admin),
            other => Err(Error::UnknownRole(other.to_string())),
        }
    }
}

/// Visibility check. `show_as` is the dashboard's "view as" selector: when
/// set, it replaces the user's own role entirely, letting privileged users
/// preview what a lower (or higher) role sees.
pub fn role_allows(user_role: Role, required: Role, show_as: Option<Role>) -> bool {
    show_as.unwrap_or(user_role) >= required
}

/// One name/value attribute from the identity provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAttribute {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Value")]
    pub value: String,
}

/// A managed user, in the identity provider's wire shape (PascalCase keys)
/// plus the dashboard's own `group` and access lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Attributes", default)]
    pub attributes: Vec<UserAttribute>,
    #[serde(rename = "Enabled", default)]
    pub enabled: bool,
    #[serde(rename = "UserStatus", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(
        rename = "UserCreateDate",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub created: Option<DateTime<Utc>>,
    #[serde(
        rename = "UserLastModifiedDate",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub modified: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<Role>,
    #[serde(rename = "editorAccess", default, skip_serializing_if = "Vec::is_empty")]
    pub editor_access: Vec<String>,
    #[serde(
        rename = "graphicsAccess",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub graphics_access: Vec<String>,
}

impl User {
    /// Flattens the attribute list into a map. The first occurrence of a name
    /// wins, matching the dashboard's historical reduce order.
    pub fn attributes_map(&self) -> IndexMap<&str, &str> {
        let mut map = IndexMap::new();
        for attribute in &self.attributes {
            map.entry(attribute.name.as_str())
                .or_insert(attribute.value.as_str());
        }
        map
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attribute| attribute.name == name)
            .map(|attribute| attribute.value.as_str())
    }

    /// Human-facing name: the `name` attribute, then `email`, then the
    /// username.
    pub fn display_name(&self) -> &str {
        self.attribute("name")
            .or_else(|| self.attribute("email"))
            .unwrap_or(&self.username)
    }

    /// Visibility check against this user's group. Users without a group are
    /// allowed nothing unless `show_as` is set.
    pub fn allows(&self, required: Role, show_as: Option<Role>) -> bool {
        match show_as {
            Some(role) => role >= required,
            None => self.group.is_some_and(|role| role >= required),
        }
    }
}
