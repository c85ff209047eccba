pub mod credentials;
pub mod user;

pub use credentials::PostgresCredentialStore;
pub use user::PostgresUserRepository;
