use crate::helpers::test_ledger;
use actix_web::{
    http::StatusCode,
    test::{self, TestRequest},
    web::Data,
    App,
};
use fusion_chain::{
    block::seal::SealOptions, context::ChainContext, ledger::RewardPolicy, web::configure,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn test_context() -> ChainContext {
    ChainContext::new(
        test_ledger(RewardPolicy::Deferred),
        vec!["aielon-node-1".to_string()],
        SealOptions::default(),
    )
}

macro_rules! service {
    ($context:expr) => {
        test::init_service(
            App::new()
                .app_data(Data::new($context.clone()))
                .configure(configure),
        )
        .await
    };
}

#[actix_web::test]
async fn chain_info_shape() {
    let app = service!(test_context());
    let info: Value =
        test::call_and_read_body_json(&app, TestRequest::get().uri("/chain/info").to_request())
            .await;

    assert_eq!(info["chainId"], json!(338));
    assert_eq!(info["network"], json!("AiElonChain338"));
    assert_eq!(info["blockHeight"], json!(0));
    assert_eq!(info["difficulty"], json!(1));
    assert_eq!(info["pendingTransactions"], json!(0));
    assert_eq!(info["validators"], json!(["aielon-node-1"]));
    assert_eq!(info["isValid"], json!(true));
}

#[actix_web::test]
async fn submit_mine_and_query() {
    let context = test_context();
    let app = service!(context);

    let request = TestRequest::post()
        .uri("/transactions")
        .set_json(json!({ "from": "system", "to": "A", "amount": 1000 }))
        .to_request();
    let record: Value = test::call_and_read_body_json(&app, request).await;
    assert!(!record["id"].as_str().unwrap().is_empty());
    assert_eq!(record["amount"], json!(1000.0));
    assert!(record["timestamp"].is_i64());

    let pending: Value = test::call_and_read_body_json(
        &app,
        TestRequest::get().uri("/transactions/pending").to_request(),
    )
    .await;
    assert_eq!(pending.as_array().unwrap().len(), 1);

    let request = TestRequest::post()
        .uri("/mine")
        .set_json(json!({ "miner": "miner1" }))
        .to_request();
    let block: Value = test::call_and_read_body_json(&app, request).await;
    assert_eq!(block["index"], json!(1));
    assert!(block["digest"].as_str().unwrap().starts_with('0'));
    assert!(block["previousDigest"].is_string());
    assert!(block["nonce"].is_u64());

    let balance: Value = test::call_and_read_body_json(
        &app,
        TestRequest::get().uri("/accounts/A/balance").to_request(),
    )
    .await;
    assert_eq!(
        balance,
        json!({ "address": "A", "balance": 1000.0, "transactionCount": 1 })
    );

    let history: Value = test::call_and_read_body_json(
        &app,
        TestRequest::get().uri("/accounts/A/history").to_request(),
    )
    .await;
    assert_eq!(history[0]["blockIndex"], json!(1));
    assert_eq!(history[0]["blockDigest"], block["digest"]);
    assert_eq!(history[0]["to"], json!("A"));

    let blocks: Value = test::call_and_read_body_json(
        &app,
        TestRequest::get().uri("/chain/blocks").to_request(),
    )
    .await;
    assert_eq!(blocks.as_array().unwrap().len(), 2);

    let verification: Value = test::call_and_read_body_json(
        &app,
        TestRequest::get().uri("/chain/verify").to_request(),
    )
    .await;
    assert_eq!(verification, json!({ "isValid": true }));
}

#[actix_web::test]
async fn invalid_transaction_is_a_bad_request() {
    let app = service!(test_context());

    for body in [
        json!({ "to": "B", "amount": 5 }),
        json!({ "from": "A", "to": "B" }),
        json!({ "from": "A", "to": "B", "amount": "five" }),
        json!({ "from": "A", "to": "B", "amount": -5 }),
        json!({ "from": 5, "to": "B", "amount": 1 }),
    ] {
        let request = TestRequest::post()
            .uri("/transactions")
            .set_json(body)
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let failure: Value = test::read_body_json(response).await;
        assert_eq!(failure["success"], json!(false));
        assert!(failure["error"].is_string());
    }
}

#[actix_web::test]
async fn unknown_block_is_not_found() {
    let app = service!(test_context());
    let response = test::call_service(
        &app,
        TestRequest::get().uri("/chain/blocks/5").to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = test::call_service(
        &app,
        TestRequest::get().uri("/chain/blocks/0").to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[actix_web::test]
async fn mine_requires_a_miner() {
    let app = service!(test_context());

    for body in [json!({ "miner": "  " }), json!({ "miner": 7 }), json!({})] {
        let request = TestRequest::post().uri("/mine").set_json(body).to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let failure: Value = test::read_body_json(response).await;
        assert_eq!(failure["success"], json!(false));
        assert!(failure["error"].is_string());
    }
}

#[actix_web::test]
async fn cancelled_seal_is_unavailable() {
    let context = test_context();
    let app = service!(context);
    context.shutdown();

    let request = TestRequest::post()
        .uri("/mine")
        .set_json(json!({ "miner": "miner1" }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let info: Value =
        test::call_and_read_body_json(&app, TestRequest::get().uri("/chain/info").to_request())
            .await;
    assert_eq!(info["blockHeight"], json!(0));
}
