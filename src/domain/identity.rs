use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Customer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Customer => "customer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "customer" => Ok(Role::Customer),
            other => Err(DomainError::InvalidInput(format!("unknown role '{other}'"))),
        }
    }
}

/// The authenticated caller of an operation.
///
/// Every service call takes the principal explicitly; nothing is looked up
/// from ambient state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: Uuid,
    pub role: Role,
    /// Linked customer record, present for customers only.
    pub customer_id: Option<Uuid>,
}

impl Principal {
    pub fn customer(user_id: Uuid, customer_id: Uuid) -> Self {
        Self {
            user_id,
            role: Role::Customer,
            customer_id: Some(customer_id),
        }
    }

    pub fn admin(user_id: Uuid) -> Self {
        Self {
            user_id,
            role: Role::Admin,
            customer_id: None,
        }
    }

    /// The customer this principal acts for, or `Unauthenticated` when the
    /// principal has no linked customer record.
    pub fn require_customer(&self) -> Result<Uuid, DomainError> {
        self.customer_id.ok_or(DomainError::Unauthenticated)
    }

    pub fn require_admin(&self) -> Result<(), DomainError> {
        match self.role {
            Role::Admin => Ok(()),
            Role::Customer => Err(DomainError::Forbidden(
                "only administrators may do this".to_string(),
            )),
        }
    }
}
