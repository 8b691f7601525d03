use actix_web::{HttpResponse, get, web};
use log::debug;

use super::error::ApiError;
use super::models::{AppState, ChainResponse, MineResponse};

/// Get the full chain.
#[get("/chain")]
pub async fn get_chain(state: web::Data<AppState>) -> HttpResponse {
    let ledger = state.ledger.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(ChainResponse {
        chain: ledger.chain(),
        length: ledger.len(),
    })
}

/// Mine a new block from the pending pool.
/// The proof search runs on the blocking pool so it never stalls a worker
/// and never holds the ledger lock.
#[get("/mine")]
pub async fn mine_block(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    debug!("GET /mine - starting proof search");
    let worker_state = state.clone();
    let block = web::block(move || worker_state.miner.mine(&worker_state.ledger))
        .await
        .map_err(|_| ApiError::Blocking)??;

    Ok(HttpResponse::Ok().json(MineResponse {
        message: "New Block Forged".to_string(),
        index: block.index,
        transactions: block.transactions,
        proof: block.proof,
        previous_hash: block.previous_hash,
    }))
}
