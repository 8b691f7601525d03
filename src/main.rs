use actix_web::{App, HttpServer, web};
use clap::Parser;
use dotenvy::dotenv;
use log::{info, warn};
use uuid::Uuid;

use pow_ledger::api::{self, AppState};
use pow_ledger::config::NodeConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let _ = dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = NodeConfig::parse();
    let node_id = Uuid::new_v4().simple().to_string();

    let state = web::Data::new(AppState::new(&config, node_id.clone()));
    for peer in &config.peers {
        match state.peers.lock().expect("mutex poisoned").register(peer) {
            Ok(node) => info!("bootstrap peer {node} registered"),
            Err(e) => warn!("bootstrap peer skipped: {e}"),
        }
    }

    info!(
        "⛓️ Starting node {node_id} at http://{}:{} (difficulty={}, max_attempts={})",
        config.host, config.port, config.difficulty, config.max_attempts
    );

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
