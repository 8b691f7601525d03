use actix_web::{HttpResponse, get, post, web};
use log::{info, warn};

use super::error::ApiError;
use super::models::{AppState, RegisterNodesRequest, RegisterNodesResponse, ResolveResponse};
use crate::network::resolve;

/// Add peers to the address book. All-or-nothing per request.
#[post("/nodes/register")]
pub async fn register_nodes(
    state: web::Data<AppState>,
    body: web::Json<RegisterNodesRequest>,
) -> Result<HttpResponse, ApiError> {
    let nodes = body.into_inner().nodes.ok_or(ApiError::MissingNodes)?;

    let total_nodes = {
        let mut peers = state.peers.lock().expect("mutex poisoned");
        peers
            .register_all(nodes.as_slice())
            .inspect_err(|e| warn!("POST /nodes/register - {e}"))?;
        peers.addresses()
    };
    info!(
        "POST /nodes/register - {} submitted, {} known",
        nodes.len(),
        total_nodes.len()
    );

    Ok(HttpResponse::Created().json(RegisterNodesResponse {
        message: "New nodes have been added".to_string(),
        total_nodes,
    }))
}

/// Run consensus against every known peer.
#[get("/nodes/resolve")]
pub async fn resolve_conflicts(state: web::Data<AppState>) -> HttpResponse {
    let peers = state.peers.lock().expect("mutex poisoned").addresses();
    let resolution = resolve(
        &state.ledger,
        &peers,
        &state.chain_source,
        &state.pow,
        state.peer_timeout,
    )
    .await;

    let body = if resolution.replaced {
        ResolveResponse::Replaced {
            message: "Our chain was replaced".to_string(),
            new_chain: resolution.chain,
        }
    } else {
        ResolveResponse::Confirmed {
            message: "Our chain is authoritative".to_string(),
            chain: resolution.chain,
        }
    };
    HttpResponse::Ok().json(body)
}
