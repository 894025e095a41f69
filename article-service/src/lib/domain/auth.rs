pub mod authenticator;
pub mod errors;
pub mod guard;
pub mod policy;
pub mod ports;
pub mod service;

pub use errors::AuthError;
pub use policy::AuthorizationDecision;
pub use policy::NotPermitted;
