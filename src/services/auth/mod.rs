pub mod authorizer;
pub mod bearer;
pub mod claims;
pub mod error;
pub mod factory;
pub mod jwks;
pub mod permissions;
pub mod verifier;

#[cfg(test)]
pub mod test_support;

pub use authorizer::Authorizer;
pub use claims::Claims;
pub use error::AuthError;
pub use factory::build_authorizer;
