//! Access token encoding, decoding, signing keys, and claims.

pub mod claims;
pub mod decoder;
pub mod encoder;
pub mod service;
pub mod signer;

pub use claims::Claims;
pub use decoder::JwtDecoder;
pub use encoder::JwtEncoder;
pub use service::TokenService;
pub use signer::JwtSigner;
