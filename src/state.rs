/*
 * Responsibility
 * - Shared context handed to the Router (AppState)
 * - Clone is cheap: Arc handles plus the carrier config
 */
use std::sync::Arc;

use crate::config::TokenCarrier;
use crate::repos::user_directory::UserDirectory;
use crate::services::auth::{AccountService, TokenProvider};

#[derive(Clone)]
pub struct AppState {
    pub tokens: Arc<TokenProvider>,
    pub accounts: Arc<AccountService>,
    pub users: Arc<dyn UserDirectory>,
    pub carrier: TokenCarrier,
}

impl AppState {
    pub fn new(
        tokens: Arc<TokenProvider>,
        accounts: Arc<AccountService>,
        users: Arc<dyn UserDirectory>,
        carrier: TokenCarrier,
    ) -> Self {
        Self {
            tokens,
            accounts,
            users,
            carrier,
        }
    }
}
