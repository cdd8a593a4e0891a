//! Role → capability policy.
//!
//! Routes declare the capability they need; the guard asks the caller's
//! [`Role`] once per request.

use serde::Serialize;

use crate::account::Role;

/// A named permission checked against the caller's role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Capability {
    ManageAccounts,
    ManageDepartments,
    ManageEmployees,
    ManageAttendance,
    ManageLeave,
    ManageSalary,
    ViewDashboard,
    ViewOwnProfile,
    ViewOwnAttendance,
    ApplyLeave,
    ViewOwnLeave,
    ViewOwnSalary,
    ChangeOwnPassword,
}

impl Capability {
    /// Capabilities every authenticated account holds.
    pub const SELF_SERVICE: &'static [Capability] = &[
        Capability::ViewOwnProfile,
        Capability::ViewOwnAttendance,
        Capability::ApplyLeave,
        Capability::ViewOwnLeave,
        Capability::ViewOwnSalary,
        Capability::ChangeOwnPassword,
    ];

    pub fn is_self_service(&self) -> bool {
        Self::SELF_SERVICE.contains(self)
    }
}

impl Role {
    /// Whether this role holds `capability`.
    pub fn grants(&self, capability: Capability) -> bool {
        match self {
            Role::Admin => true,
            Role::Employee => capability.is_self_service(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_holds_everything() {
        for cap in [
            Capability::ManageAccounts,
            Capability::ManageAttendance,
            Capability::ViewDashboard,
            Capability::ApplyLeave,
        ] {
            assert!(Role::Admin.grants(cap));
        }
    }

    #[test]
    fn employee_is_limited_to_self_service() {
        assert!(Role::Employee.grants(Capability::ViewOwnAttendance));
        assert!(Role::Employee.grants(Capability::ApplyLeave));
        assert!(Role::Employee.grants(Capability::ChangeOwnPassword));

        assert!(!Role::Employee.grants(Capability::ManageAttendance));
        assert!(!Role::Employee.grants(Capability::ManageLeave));
        assert!(!Role::Employee.grants(Capability::ManageSalary));
        assert!(!Role::Employee.grants(Capability::ViewDashboard));
    }
}
