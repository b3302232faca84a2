pub mod ownership;
pub mod password;
pub mod services;
pub mod slug;
pub mod token;

pub use password::PasswordHasher;
pub use token::TokenService;
