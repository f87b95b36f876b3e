//! User account and role models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Functional roles on the platform
///
/// Every account carries exactly one role; authorization decisions are made
/// from the role alone.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Manager,
    Engineer,
    Inventory,
    Procurement,
    Finance,
    Viewer,
}

impl Role {
    /// All roles, in display order
    pub const ALL: [Role; 7] = [
        Role::Admin,
        Role::Manager,
        Role::Engineer,
        Role::Inventory,
        Role::Procurement,
        Role::Finance,
        Role::Viewer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Manager => "MANAGER",
            Role::Engineer => "ENGINEER",
            Role::Inventory => "INVENTORY",
            Role::Procurement => "PROCUREMENT",
            Role::Finance => "FINANCE",
            Role::Viewer => "VIEWER",
        }
    }

    /// Human-readable label
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Admin => "Administrator",
            Role::Manager => "Production Manager",
            Role::Engineer => "Maintenance Engineer",
            Role::Inventory => "Inventory Clerk",
            Role::Procurement => "Procurement Specialist",
            Role::Finance => "Finance Officer",
            Role::Viewer => "Read-Only User",
        }
    }

    /// Parse a role from its wire form; `None` for anything outside the set
    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "ADMIN" => Some(Role::Admin),
            "MANAGER" => Some(Role::Manager),
            "ENGINEER" => Some(Role::Engineer),
            "INVENTORY" => Some(Role::Inventory),
            "PROCUREMENT" => Some(Role::Procurement),
            "FINANCE" => Some(Role::Finance),
            "VIEWER" => Some(Role::Viewer),
            _ => None,
        }
    }

    /// Roles allowed to record ledger transactions
    pub fn can_record_transactions(&self) -> bool {
        matches!(self, Role::Admin | Role::Manager | Role::Inventory)
    }

    /// Roles allowed to create/update products and categories
    pub fn can_manage_products(&self) -> bool {
        matches!(self, Role::Admin | Role::Manager | Role::Procurement)
    }

    /// Roles allowed to create/update stock items and warehouses
    pub fn can_manage_stock(&self) -> bool {
        matches!(self, Role::Admin | Role::Inventory | Role::Procurement)
    }

    /// Only administrators manage accounts
    pub fn can_manage_users(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Viewer
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in Role::ALL {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
    }

    #[test]
    fn test_role_parse_rejects_unknown() {
        assert_eq!(Role::parse("SUPERUSER"), None);
        assert_eq!(Role::parse("admin"), None);
        assert_eq!(Role::parse(""), None);
    }

    #[test]
    fn test_admin_gates() {
        assert!(Role::Admin.can_manage_users());
        assert!(Role::Admin.can_record_transactions());
        assert!(Role::Admin.can_manage_products());
        assert!(Role::Admin.can_manage_stock());
    }

    #[test]
    fn test_viewer_is_read_only() {
        assert!(!Role::Viewer.can_manage_users());
        assert!(!Role::Viewer.can_record_transactions());
        assert!(!Role::Viewer.can_manage_products());
        assert!(!Role::Viewer.can_manage_stock());
    }

    #[test]
    fn test_inventory_clerk_gates() {
        assert!(Role::Inventory.can_record_transactions());
        assert!(Role::Inventory.can_manage_stock());
        assert!(!Role::Inventory.can_manage_products());
        assert!(!Role::Inventory.can_manage_users());
    }
}
