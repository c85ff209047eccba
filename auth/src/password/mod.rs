pub mod argon2;
pub mod errors;

pub use self::argon2::check_password_hash;
pub use self::argon2::hash_password;
pub use self::argon2::PasswordHasher;
pub use errors::PasswordError;
