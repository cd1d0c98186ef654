use actix_web::{middleware as actix_middleware, web, App, HttpServer};

use chat_lobby::config::AppConfig;
use chat_lobby::handlers;
use chat_lobby::middleware::identity_middleware;
use chat_lobby::oauth::{OAuthExchanger, ProfileFetcher};
use chat_lobby::session::SessionCodec;
use chat_lobby::store::UserStore;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if it exists (for development)
    dotenvy::dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    log::info!("Starting chat lobby...");

    let config = AppConfig::from_env();

    let codec = SessionCodec::new(config.session_secret.clone()).unwrap_or_else(|e| {
        eprintln!("Invalid session secret: {}", e);
        std::process::exit(1);
    });

    // One outbound client for both provider calls, bounded by the configured
    // timeout so a provider outage cannot hang a worker.
    let http = reqwest::Client::builder()
        .timeout(config.oauth.http_timeout)
        .build()
        .expect("Failed to build HTTP client");

    let users = UserStore::new();
    let exchanger = OAuthExchanger::new(config.oauth.clone(), http.clone());
    let profiles = ProfileFetcher::new(config.oauth.profile_url.clone(), http);

    log::info!(
        "Starting HTTP server at {}:{}...",
        config.server.host,
        config.server.port
    );

    HttpServer::new(move || {
        App::new()
            // Shared state
            .app_data(web::Data::new(users.clone()))
            .app_data(web::Data::new(codec.clone()))
            .app_data(web::Data::new(exchanger.clone()))
            .app_data(web::Data::new(profiles.clone()))
            // Middleware
            .wrap(actix_middleware::Logger::default())
            .wrap(actix_middleware::Compress::default())
            // Probes sit outside the identity scope so they never mint
            // identities.
            .service(handlers::health_check)
            // Every route below resolves an identity before its handler runs.
            .service(
                web::scope("")
                    .wrap(actix_middleware::from_fn(identity_middleware))
                    .service(handlers::index)
                    .service(handlers::auth_callback)
                    .service(handlers::enter_demo)
                    .service(handlers::logout)
                    .service(handlers::root),
            )
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
