//! Authentication primitives: tokens, password hashing, session transport

pub mod cookies;
pub mod jwt;
pub mod password;
pub mod session;

pub use cookies::{SessionCookies, ACCESS_COOKIE, REFRESH_COOKIE};
pub use jwt::{Claims, JwtService, TokenPair, VerifyError};
pub use password::PasswordHasher;
pub use session::{extract_token, CurrentUser};
