use database::{db::create_connection, services::identity::IdentityService};
use log::{error, info};
use migration::{Migrator, MigratorTrait};
use server::{app, config::Config, state::AppState, utils::shutdown::shutdown_signal};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("Invalid configuration: {err}");
            std::process::exit(1);
        }
    };

    let db = create_connection(&config.database_url)
        .await
        .expect("Failed to connect to the database");

    if config.run_migrations {
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");
        info!("Migrations applied");
    }

    if let Some(admin) = &config.admin {
        let created = IdentityService::ensure_admin(&db, &admin.username, &admin.password)
            .await
            .expect("Failed to create the administrator");
        if created {
            info!("Bootstrapped administrator {}", admin.username);
        }
    }

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind");
    info!("Running axum on http://{}", config.bind_addr);
    info!("API docs at http://{}/docs", config.bind_addr);

    axum::serve(listener, app(AppState::new(db)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}
