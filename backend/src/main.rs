//! Student registry entry-point: loads settings, selects a store and serves the REST API.

mod server;

use std::io;
use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use student_registry::domain::StudentService;
use student_registry::domain::ports::StudentRepository;
use student_registry::inbound::http::health::HealthState;
use student_registry::inbound::http::state::HttpState;
use student_registry::outbound::memory::InMemoryStudentRepository;
use student_registry::outbound::persistence::{
    DbPool, DieselStudentRepository, PoolConfig, run_pending_migrations,
};
use student_registry::settings::ServerSettings;

#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load().map_err(|e| io::Error::other(e.to_string()))?;
    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;

    let http_state = match settings.database_url() {
        Some(database_url) => {
            let max_size = settings.pool_max_size().map_err(io::Error::other)?;
            run_pending_migrations(database_url)
                .await
                .map_err(io::Error::other)?;
            let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(max_size))
                .await
                .map_err(io::Error::other)?;
            info!(max_size, "using PostgreSQL student store");
            build_http_state(Arc::new(DieselStudentRepository::new(pool)))
        }
        None => {
            warn!("no database configured; student records are kept in memory");
            build_http_state(Arc::new(InMemoryStudentRepository::new()))
        }
    };

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(bind_addr).with_allow_any_origin(settings.allow_any_origin);
    create_server(health_state, http_state, config)?.await
}

fn build_http_state<R>(repository: Arc<R>) -> HttpState
where
    R: StudentRepository + 'static,
{
    let service = Arc::new(StudentService::new(repository, Arc::new(DefaultClock)));
    HttpState::new(service.clone(), service)
}
