pub mod claims;
pub mod codec;
pub mod errors;

pub use claims::Claims;
pub use codec::clamp_ttl;
pub use codec::clamp_ttl_seconds;
pub use codec::make_access_token;
pub use codec::validate_access_token;
pub use codec::AccessTokenCodec;
pub use codec::ISSUER;
pub use codec::MAX_ACCESS_TOKEN_TTL_SECONDS;
pub use errors::TokenError;
