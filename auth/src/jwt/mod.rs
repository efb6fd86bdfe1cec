pub mod claims;
pub mod errors;
pub mod handler;

pub use claims::IssuedToken;
pub use claims::SignedClaims;
pub use errors::JwtError;
pub use handler::JwtHandler;
