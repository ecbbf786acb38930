//! Helpers used when creating school accounts

pub mod email;
pub mod password;

pub use email::{credential_email, generate_school_email, SCHOOL_DOMAIN};
pub use password::{evaluate_password_strength, generate_secure_password, PasswordStrength};
