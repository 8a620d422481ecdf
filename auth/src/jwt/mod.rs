pub mod claims;
pub mod config;
pub mod errors;
pub mod handler;

pub use claims::SessionClaims;
pub use config::TokenConfig;
pub use errors::TokenConfigError;
pub use errors::TokenError;
pub use handler::JwtHandler;
