use serde::{Deserialize, Serialize};

/// Account role carried by every caller identity.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, schemars::JsonSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    User,
    Operator,
    Admin,
    SuperAdmin,
    /// Time-driven background jobs (completion sweep). Never accepted from callers.
    #[serde(skip_deserializing)]
    System,
}

impl Role {
    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin | Self::SuperAdmin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "USER"),
            Self::Operator => write!(f, "OPERATOR"),
            Self::Admin => write!(f, "ADMIN"),
            Self::SuperAdmin => write!(f, "SUPER_ADMIN"),
            Self::System => write!(f, "SYSTEM"),
        }
    }
}

/// Authenticated identity of the caller of a single operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: String,
    pub role: Role,
}

impl Actor {
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
        }
    }

    pub fn user(id: impl Into<String>) -> Self {
        Self::new(id, Role::User)
    }

    pub fn operator(id: impl Into<String>) -> Self {
        Self::new(id, Role::Operator)
    }

    pub fn admin(id: impl Into<String>) -> Self {
        Self::new(id, Role::Admin)
    }

    pub fn system() -> Self {
        Self::new("system", Role::System)
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Whether this actor may act as the operator owning `operator_id`'s venues.
    pub fn operates(&self, operator_id: &str) -> bool {
        self.role == Role::Operator && self.id == operator_id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}
