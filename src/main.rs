use actix_web::{web, App, HttpServer};
use dotenv::dotenv;

use crate::app::AppServices;
use crate::config::app_config::AppConfig;
use crate::logger::init_logger;

mod app;
mod config;
mod database;
mod handlers;
mod logger;
mod models;
mod services;

#[cfg(test)]
mod tests;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok(); // Cargar .env al inicio
    init_logger();

    let config = AppConfig::from_env();

    // Conectarnos a la DB y migrar
    let db_pool = database::setup_database(&config.database_url).await?;
    database::run_migrations(&db_pool).await?;

    let services = AppServices::new(db_pool, &config);

    if let Some(token) = &config.admin_token {
        services
            .session_service
            .ensure_session(token, &config.admin_email)
            .await?;
        log::info!("Sesión de arranque registrada para {}", config.admin_email);
    }

    log::info!(
        "Canales registrados: {:?}",
        services.notification_service.channel_names()
    );

    if config.smtp.is_some() {
        log::info!("SMTP configurado: los recordatorios por email se entregarán por correo");
    } else {
        log::info!("SMTP no configurado: el canal email solo registra en la bitácora");
    }

    log::info!(
        "Levantando servidor en {}:{}",
        config.server_host,
        config.server_port
    );
    HttpServer::new(move || {
        let services = services.clone();
        App::new()
            .configure(move |cfg: &mut web::ServiceConfig| services.register_data(cfg))
            .configure(app::init_app)
    })
    .workers(1)
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await?;

    Ok(())
}
