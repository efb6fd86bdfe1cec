//! User-facing response messages.

pub const SUCCESS: &str = "The operation has been successful";
pub const LOGIN: &str = "Logged in successfully";
pub const LOGOUT: &str = "Logged out successfully";
pub const EMAIL_VERIFIED: &str = "Email verified";
pub const ACCOUNT_CONFIRMATION_REQUIRED: &str =
    "Account confirmation is required before resetting the password";
pub const RESET_PASSWORD_LINK_SENT: &str = "Password reset link sent to your email address";
pub const PASSWORD_RESET: &str = "Password has been reset";
pub const UNAUTHORIZED: &str = "You are not authorized to perform this action";
pub const INVALID_TOKEN: &str = "Invalid or expired token";
pub const SERVICE_HEALTHY: &str = "Service is healthy";

pub fn not_found(entity: &str) -> String {
    format!("{} not found", entity)
}

pub fn found(entity: &str) -> String {
    format!("{} found", entity)
}

pub fn already_exists(entity: &str, field: &str) -> String {
    format!("{} already exists with the given {}", entity, field)
}
