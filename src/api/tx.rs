use actix_web::{HttpResponse, post, web};
use log::{debug, info};

use super::error::ApiError;
use super::models::{AppState, MessageResponse, NewTxRequest};
use crate::transaction::Transaction;

/// Queue a transaction for the next block.
#[post("/transactions/new")]
pub async fn new_transaction(
    state: web::Data<AppState>,
    body: web::Json<NewTxRequest>,
) -> Result<HttpResponse, ApiError> {
    let NewTxRequest {
        sender: Some(sender),
        recipient: Some(recipient),
        amount: Some(amount),
    } = body.into_inner()
    else {
        debug!("POST /transactions/new - rejected: missing field");
        return Err(ApiError::MissingValues);
    };

    let index = {
        let mut ledger = state.ledger.lock().expect("mutex poisoned");
        ledger.submit_transaction(Transaction::new(sender, recipient, amount))
    };
    info!("POST /transactions/new - queued for block #{index}");

    Ok(HttpResponse::Created().json(MessageResponse {
        message: format!("Transaction will be added to Block {index}"),
    }))
}
