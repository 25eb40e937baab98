use std::sync::Arc;
use office_lib::user_service::DynUserService;

use crate::error::is_prod_like;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<DynUserService>,
    pub env: String,
}

impl AppState {
    pub fn new(user_service: Arc<DynUserService>, env: impl Into<String>) -> Self {
        Self {
            user_service,
            env: env.into(),
        }
    }

    pub fn is_prod_like(&self) -> bool {
        is_prod_like(&self.env)
    }
}
