mod chain;
mod error;
pub mod models;
mod nodes;
mod tx;

use actix_web::web::{self, ServiceConfig};

pub use error::ApiError;
pub use models::AppState;

pub fn init_routes(cfg: &mut ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| ApiError::BadJson(err.to_string()).into()),
    )
    .service(chain::get_chain)
    .service(chain::mine_block)
    .service(tx::new_transaction)
    .service(nodes::register_nodes)
    .service(nodes::resolve_conflicts);
}

#[cfg(test)]
pub(crate) mod testing {
    use actix_web::web;

    use super::AppState;
    use crate::config::NodeConfig;

    pub fn app_state(difficulty: usize) -> web::Data<AppState> {
        let config = NodeConfig {
            difficulty,
            peer_timeout_secs: 1,
            ..NodeConfig::default()
        };
        web::Data::new(AppState::new(&config, "node-test"))
    }

    macro_rules! test_app {
        ($state:expr) => {
            actix_web::test::init_service(
                actix_web::App::new()
                    .app_data($state.clone())
                    .configure(crate::api::init_routes),
            )
            .await
        };
    }
    pub(crate) use test_app;
}
