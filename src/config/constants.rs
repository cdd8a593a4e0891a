//! Application-wide constants

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 5000;

/// Prefix every API route is nested under
pub const API_PREFIX: &str = "/api";

// =============================================================================
// Authentication
// =============================================================================

/// Signing key used by debug builds when `JWT_SECRET` is unset
pub const DEV_JWT_SECRET: &str = "dev-secret-key-minimum-32-chars!!";

/// Password given to the bootstrap admin when none is supplied
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

// =============================================================================
// Rate Limiting
// =============================================================================

/// Cache key prefix for general rate limit counters
pub const CACHE_PREFIX_RATE_LIMIT: &str = "rate_limit:";

/// Cache key prefix for credential endpoint counters
pub const CACHE_PREFIX_RATE_LIMIT_AUTH: &str = "rate_limit:auth:";
