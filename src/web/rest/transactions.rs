use actix_web::{
    get, post,
    web::{Data, Json},
    HttpResponse,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{failure, ok_json};
use crate::{
    context::ChainContext,
    ledger::{party::Party, transaction::TransactionDraft, LedgerError},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MineRequest {
    pub miner: String,
}

#[get("/transactions/pending")]
pub async fn get_pending(context: Data<ChainContext>) -> HttpResponse {
    ok_json(&context.pending().await)
}

#[post("/transactions")]
pub async fn post_transaction(
    context: Data<ChainContext>,
    draft: Json<TransactionDraft>,
) -> HttpResponse {
    match context.submit(draft.into_inner()).await {
        Ok(ref record) => ok_json(record),
        Err(err) => failure(HttpResponse::BadRequest(), err),
    }
}

#[post("/mine")]
pub async fn post_mine(context: Data<ChainContext>, request: Json<MineRequest>) -> HttpResponse {
    let MineRequest { miner } = request.into_inner();
    if miner.trim().is_empty() {
        return failure(HttpResponse::BadRequest(), "miner is required");
    }

    debug!("Sealing requested by {miner}");
    match context.seal(Party::from(miner)).await {
        Ok(ref block) => ok_json(block),
        Err(err @ LedgerError::Seal(_)) => {
            warn!("Sealing failed: {err}");
            failure(HttpResponse::ServiceUnavailable(), err)
        }
        Err(err) => failure(HttpResponse::InternalServerError(), err),
    }
}
