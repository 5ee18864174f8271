use std::sync::Arc;

use aidhub_db::gateway::PgGateway;

use crate::config::ServerConfig;
use crate::services::help_requests::HelpRequestsService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: aidhub_db::DbPool,
    /// Server configuration (JWT settings are read by the auth extractor).
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Help request service bound to this state's pool.
    pub fn help_requests(&self) -> HelpRequestsService<PgGateway> {
        HelpRequestsService::new(PgGateway::new(self.pool.clone()))
    }
}
