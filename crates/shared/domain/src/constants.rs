//! Domain-level constants.

// =============================================================================
// User Roles
// =============================================================================

/// Regular user role
pub const ROLE_USER: &str = "user";

/// Administrator role with elevated privileges
pub const ROLE_ADMIN: &str = "admin";

/// All valid role values
pub const VALID_ROLES: &[&str] = &[ROLE_USER, ROLE_ADMIN];

// =============================================================================
// Authentication
// =============================================================================

/// JWT token type identifier
pub const TOKEN_TYPE_BEARER: &str = "Bearer";

/// Metadata key carrying the validation failure reason
pub const TOKEN_FAILURE_REASON: &str = "reason";
