use actix_web::{
    get,
    web::{self, Data},
    HttpResponse,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ok_json;
use crate::{context::ChainContext, ledger::ChainFault};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verification {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fault: Option<ChainFault>,
}

/// Returns chain-level status
#[get("/chain/info")]
pub async fn get_chain_info(context: Data<ChainContext>) -> HttpResponse {
    let info = context.chain_info().await;
    debug!("Chain info: {:?}", info);
    ok_json(&info)
}

#[get("/chain/blocks")]
pub async fn get_blocks(context: Data<ChainContext>) -> HttpResponse {
    ok_json(&context.blocks().await)
}

#[get("/chain/blocks/{index}")]
pub async fn get_block(context: Data<ChainContext>, index: web::Path<u64>) -> HttpResponse {
    if let Some(ref block) = context.block(index.into_inner()).await {
        return ok_json(block);
    }
    HttpResponse::NotFound().finish()
}

#[get("/chain/verify")]
pub async fn get_verification(context: Data<ChainContext>) -> HttpResponse {
    let fault = context.verify().await.err();
    ok_json(&Verification {
        is_valid: fault.is_none(),
        fault,
    })
}
