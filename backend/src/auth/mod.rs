//! Caller identification
//!
//! Tokens are issued elsewhere; this service only verifies HS256 bearer
//! tokens and turns them into an owner id.

mod extractor;
mod jwt;

pub use extractor::AuthOwner;
pub use jwt::{Claims, JwtService, TokenError};
