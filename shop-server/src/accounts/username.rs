//! Login handle generation
//!
//! Handles are `first.last`, lower-cased with non-alphanumerics stripped
//! from each name part. Collisions get the smallest integer suffix
//! starting at 2 (`jane.doe`, `jane.doe2`, `jane.doe3`, ...).

use crate::db::repository::{RepoResult, credential};
use sqlx::SqliteConnection;

fn sanitize(part: &str) -> String {
    part.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect()
}

/// Canonical handle for a pair of names, before collision handling
pub fn base_username(first_name: &str, last_name: &str) -> String {
    format!("{}.{}", sanitize(first_name), sanitize(last_name))
}

/// Whether a stored username still encodes the given names
///
/// True for the exact base handle and for the base followed by a numeric
/// collision suffix. Sync uses this to leave settled handles alone.
pub fn encodes_names(username: &str, first_name: &str, last_name: &str) -> bool {
    let base = base_username(first_name, last_name);
    match username.strip_prefix(&base) {
        Some(rest) => rest.is_empty() || rest.chars().all(|c| c.is_ascii_digit()),
        None => false,
    }
}

/// Generate a unique handle for the given names
///
/// `exclude_id` ignores one credential row in the collision scan so a
/// credential never collides with itself during re-sync.
pub async fn generate_unique(
    conn: &mut SqliteConnection,
    first_name: &str,
    last_name: &str,
    exclude_id: Option<i64>,
) -> RepoResult<String> {
    let base = base_username(first_name, last_name);
    if !credential::username_exists(&mut *conn, &base, exclude_id).await? {
        return Ok(base);
    }

    let mut suffix = 2u32;
    loop {
        let candidate = format!("{base}{suffix}");
        if !credential::username_exists(&mut *conn, &candidate, exclude_id).await? {
            return Ok(candidate);
        }
        suffix += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_username_lowercases() {
        assert_eq!(base_username("Jane", "Doe"), "jane.doe");
        assert_eq!(base_username("JANE", "DOE"), "jane.doe");
    }

    #[test]
    fn test_base_username_strips_non_alphanumerics() {
        assert_eq!(base_username("Mary Ann", "O'Brien"), "maryann.obrien");
        assert_eq!(base_username("Jean-Luc", "Le Guin"), "jeanluc.leguin");
    }

    #[test]
    fn test_base_username_keeps_digits() {
        assert_eq!(base_username("John", "Smith 3rd"), "john.smith3rd");
    }

    #[test]
    fn test_encodes_names_exact_base() {
        assert!(encodes_names("jane.doe", "Jane", "Doe"));
    }

    #[test]
    fn test_encodes_names_with_suffix() {
        assert!(encodes_names("jane.doe2", "Jane", "Doe"));
        assert!(encodes_names("jane.doe15", "Jane", "Doe"));
    }

    #[test]
    fn test_encodes_names_rejects_other_names() {
        assert!(!encodes_names("jane.doe", "Janet", "Doe"));
        assert!(!encodes_names("jane.doe", "Jane", "Smith"));
        assert!(!encodes_names("jane.smith2", "Jane", "Doe"));
    }

    #[test]
    fn test_encodes_names_rejects_non_numeric_suffix() {
        assert!(!encodes_names("jane.doex", "Jane", "Doe"));
    }
}
