mod config;
mod domain;
mod infrastructure;
mod presentation;
mod telemetry;
#[cfg(test)]
mod test_support;
mod usecase;

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::{
    config::AppConfig,
    domain::repositories::user_registration_repository::UserRegistrationRepository,
    infrastructure::{
        database, reference_seeder::ReferenceSeeder,
        user_registration_repository::SeaOrmUserRegistrationRepository,
    },
    presentation::handlers::user_handler::create_user_router,
    usecase::register_user_usecase::RegisterUserUsecase,
};

/// Top level router shared by `main` and the tests
fn build_app<R: UserRegistrationRepository + 'static + Clone>(
    register_service: RegisterUserUsecase<R>,
) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .merge(create_user_router(register_service))
        .layer(TraceLayer::new_for_http())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
    }
    info!("shutting down");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    telemetry::init_tracing(&config.log_level)?;

    let db = database::connect(&config.database).await?;
    if config.run_migrations {
        database::migrate(&db).await?;
    }

    let seeder = ReferenceSeeder::new(db.clone());
    seeder.seed_interests(&config.seed.interests).await?;
    seeder.seed_skills(&config.seed.skills).await?;

    let registration_repository = SeaOrmUserRegistrationRepository::new(db.clone());
    let register_user_usecase = RegisterUserUsecase::new(registration_repository);
    let app = build_app(register_user_usecase);

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
