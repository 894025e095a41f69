pub mod claims;
pub mod errors;
pub mod service;

pub use claims::AccessClaims;
pub use claims::ACCESS_TOKEN_TYPE;
pub use errors::TokenError;
pub use service::TokenService;
