//! Permission Definitions
//!
//! Simplified RBAC. Logged-in staff can browse the catalog and open
//! orders without any grants; the permissions below gate catalog
//! management, sensitive order operations and administration.

/// Configurable permission list
///
/// Excludes `all`, which is reserved for system-level roles.
pub const ALL_PERMISSIONS: &[&str] = &[
    "books:manage",
    "authors:manage",
    "customers:manage",
    "staff:manage",
    "roles:manage",
    "reports:view",
    "orders:complete",
    "orders:delete",
];

pub const DEFAULT_ADMIN_PERMISSIONS: &[&str] = &["all"];

/// Owners hold every configurable permission
pub const DEFAULT_OWNER_PERMISSIONS: &[&str] = &[
    "books:manage",
    "authors:manage",
    "customers:manage",
    "staff:manage",
    "roles:manage",
    "reports:view",
    "orders:complete",
    "orders:delete",
];

pub const DEFAULT_MANAGER_PERMISSIONS: &[&str] = &[
    "books:manage",
    "authors:manage",
    "customers:manage",
    "reports:view",
    "orders:complete",
];

pub const DEFAULT_EMPLOYEE_PERMISSIONS: &[&str] = &["orders:complete"];

/// Default permissions for a role name
pub fn get_default_permissions(role_name: &str) -> Vec<String> {
    let set: &[&str] = match role_name {
        "admin" => DEFAULT_ADMIN_PERMISSIONS,
        "owner" => DEFAULT_OWNER_PERMISSIONS,
        "assistant-manager" => DEFAULT_MANAGER_PERMISSIONS,
        "employee" => DEFAULT_EMPLOYEE_PERMISSIONS,
        _ => &[],
    };
    set.iter().map(|s| s.to_string()).collect()
}

/// Whether a permission string is recognized
pub fn is_valid_permission(permission: &str) -> bool {
    permission == "all" || ALL_PERMISSIONS.contains(&permission) || permission.ends_with(":*")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_gets_all_configurable() {
        let perms = get_default_permissions("owner");
        assert_eq!(perms.len(), ALL_PERMISSIONS.len());
    }

    #[test]
    fn test_unknown_role_gets_nothing() {
        assert!(get_default_permissions("intern").is_empty());
    }

    #[test]
    fn test_permission_validation() {
        assert!(is_valid_permission("books:manage"));
        assert!(is_valid_permission("orders:*"));
        assert!(is_valid_permission("all"));
        assert!(!is_valid_permission("books:burn"));
    }
}
