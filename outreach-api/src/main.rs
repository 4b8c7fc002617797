use actix_cors::Cors;
use actix_web::{get, web, App, HttpResponse, HttpServer, Responder};
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::prelude::*;

mod config;
mod database;
mod documents;
mod handlers;
mod mail;
mod pipeline;
mod salutation;

#[get("/")]
async fn hello() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "service": "outreach",
        "message": "Job application outreach API"
    }))
}

#[get("/health")]
async fn health(db: web::Data<Arc<database::Database>>) -> impl Responder {
    match db.conn() {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "healthy",
            "database": "connected"
        })),
        Err(_) => HttpResponse::InternalServerError().json(serde_json::json!({
            "status": "unhealthy",
            "database": "disconnected"
        })),
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long)]
    log_file_path: Option<String>,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if let Some(log_path) = args.log_file_path {
        let log_path = std::path::Path::new(&log_path);
        let file_appender = tracing_appender::rolling::never(
            log_path.parent().unwrap_or(std::path::Path::new(".")),
            log_path
                .file_name()
                .unwrap_or(std::ffi::OsStr::new("outreach-api.log")),
        );
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        std::mem::forget(guard);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(true)
                    .with_writer(std::io::stdout),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(non_blocking),
            )
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    // Load config
    let (config, config_path) = config::AppConfig::load().expect("Failed to load config");
    tracing::info!("Config loaded from {:?}", config_path);

    // Initialize database
    let db_path = database::get_db_path().expect("Failed to resolve database path");
    let db = Arc::new(database::Database::new(&db_path).expect("Failed to initialize database"));
    tracing::info!("Database initialized at {:?}", db_path);

    // Generated documents land here; contents are disposable.
    std::fs::create_dir_all(&config.documents.output_dir)
        .expect("Failed to create output directory");

    let transport = Arc::new(mail::DesktopMailTransport::new(config.mail.clone()));
    let config = Arc::new(config);

    let (host, port) = (config.server.host.clone(), config.server.port);
    tracing::info!("Server will listen on {}:{}", host, port);

    let config_for_server = config.clone();
    HttpServer::new(move || {
        let cors = if let Some(cors_config) = &config_for_server.cors {
            let mut cors_builder = Cors::default();
            for origin in &cors_config.allowed_origins {
                cors_builder = cors_builder.allowed_origin(origin);
            }
            cors_builder
                .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
                .allowed_headers(vec!["Authorization", "Accept", "Content-Type"])
                .max_age(3600)
        } else {
            Cors::default()
                .allow_any_origin()
                .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
                .allowed_headers(vec!["Authorization", "Accept", "Content-Type"])
                .max_age(3600)
        };

        App::new()
            .wrap(cors)
            .app_data(web::Data::new(db.clone()))
            .app_data(web::Data::new(config_for_server.clone()))
            .app_data(web::Data::new(transport.clone()))
            .service(hello)
            .service(health)
            .route("/api/contacts", web::get().to(handlers::contacts::list_contacts))
            .route("/api/contacts", web::post().to(handlers::contacts::create_contact))
            .route("/api/contacts/{id}", web::get().to(handlers::contacts::get_contact))
            .route("/api/contacts/{id}", web::put().to(handlers::contacts::update_contact))
            .route("/api/contacts/{id}", web::delete().to(handlers::contacts::delete_contact))
            .route("/api/send", web::post().to(handlers::send::send_all))
            .route("/api/send/selected", web::post().to(handlers::send::send_selected))
            .route("/api/documents/cv", web::post().to(handlers::documents::generate_cv))
            .route(
                "/api/documents/cover-letter",
                web::post().to(handlers::documents::generate_cover_letter),
            )
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
