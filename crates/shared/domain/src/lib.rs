//! Domain layer - roles, users, token claims and the token service.
//!
//! Everything token-related lives here: claims, signing and validation, the
//! clock they are checked against, and the registry that hands the token
//! service to the rest of the workspace.

pub mod clock;
pub mod constants;
pub mod service;
pub mod token;
pub mod user;

pub use clock::{Clock, ManualClock, SystemClock};
pub use constants::*;
pub use service::{JwtService, RegistryCell, ServiceRegistry, TokenService};
pub use token::TokenClaims;
pub use user::{User, UserRole};

#[cfg(any(test, feature = "test-utils"))]
pub use service::MockTokenService;
