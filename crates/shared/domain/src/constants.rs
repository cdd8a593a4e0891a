//! Domain-level constants.
//!
//! Business rules shared by the API, services and persistence layers.

// =============================================================================
// Roles
// =============================================================================

/// Administrator role, full access to every resource
pub const ROLE_ADMIN: &str = "admin";

/// Employee role, self-service access only
pub const ROLE_EMPLOYEE: &str = "employee";

/// All valid role values
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_EMPLOYEE];

/// Check if a role value is valid
pub fn is_valid_role(role: &str) -> bool {
    VALID_ROLES.contains(&role)
}

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Minimum name length requirement
pub const MIN_NAME_LENGTH: usize = 1;

/// Format of `timeIn` / `timeOut` values
pub const TIME_OF_DAY_FORMAT: &str = "HH:MM";

// =============================================================================
// Authentication
// =============================================================================

/// Default JWT token expiration in hours (ten days)
pub const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 240;

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Seconds per hour (for token expiration calculation)
pub const SECONDS_PER_HOUR: i64 = 3600;

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";

/// JWT token type identifier
pub const TOKEN_TYPE_BEARER: &str = "Bearer";

// =============================================================================
// Seed account
// =============================================================================

/// Email of the bootstrap administrator created by `ems seed-admin`
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@example.com";

/// Display name of the bootstrap administrator
pub const DEFAULT_ADMIN_NAME: &str = "Admin";
