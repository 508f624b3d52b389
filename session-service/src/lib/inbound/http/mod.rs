pub mod handlers;
pub mod middleware;

pub use handlers::login::login;
pub use handlers::refresh::refresh;
pub use handlers::revoke::revoke;
pub use middleware::require_access_token;
pub use middleware::require_api_key;
pub use middleware::AuthenticatedUser;
