//! Role lookup trait.

use super::model::Role;

/// A static lookup of the roles available for interviews.
///
/// Roles are loaded once and are immutable for the lifetime of the provider.
pub trait RoleProvider: Send + Sync {
    /// Returns the role with the given internal name.
    fn get_role(&self, name: &str) -> Option<&Role>;

    /// Whether a role with the given name exists.
    fn is_valid_role(&self, name: &str) -> bool {
        self.get_role(name).is_some()
    }

    /// All role names, sorted.
    fn list_role_names(&self) -> Vec<String>;
}
