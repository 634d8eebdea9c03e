use actix_web::{
    get,
    web::{self, Data},
    HttpResponse,
};
use tracing::debug;

use super::ok_json;
use crate::{context::ChainContext, ledger::party::Party};

#[get("/accounts/{party}/balance")]
pub async fn get_balance(context: Data<ChainContext>, party: web::Path<String>) -> HttpResponse {
    let party = Party::from(party.into_inner());
    let summary = context.balance(&party).await;
    debug!("Balance: {summary}");
    ok_json(&summary)
}

#[get("/accounts/{party}/history")]
pub async fn get_history(context: Data<ChainContext>, party: web::Path<String>) -> HttpResponse {
    let party = Party::from(party.into_inner());
    ok_json(&context.history(&party).await)
}
