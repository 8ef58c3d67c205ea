use std::sync::Arc;

use crate::{
    infra::config::AppConfig,
    use_cases::{
        auth::{AuthPipeline, UserRepo},
        user::ProfileUseCases,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub auth: Arc<AuthPipeline>,
    pub profiles: Arc<ProfileUseCases>,
    pub users: Arc<dyn UserRepo>,
}
