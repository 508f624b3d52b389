pub mod errors;
pub mod extractor;

pub use errors::CredentialError;
pub use extractor::extract_api_key;
pub use extractor::extract_bearer;
pub use extractor::API_KEY_SCHEME;
pub use extractor::BEARER_SCHEME;
