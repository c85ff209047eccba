pub mod errors;
pub mod extractor;

pub use errors::HeaderError;
pub use extractor::extract_api_key;
pub use extractor::extract_bearer_token;
