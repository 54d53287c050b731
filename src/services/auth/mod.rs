pub mod accounts;
pub mod password;
pub mod token_codec;
pub mod token_provider;

pub use accounts::AccountService;
pub use token_provider::TokenProvider;
