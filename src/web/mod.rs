pub mod rest;

use std::{future::Future, net};

use actix_cors::Cors;
use actix_web::dev::ServerHandle;
use actix_web::middleware;
use actix_web::web::{Data, JsonConfig, ServiceConfig};
use actix_web::App;
use actix_web::HttpServer;
use tracing::{error, info};

use crate::context::ChainContext;

use self::rest::accounts;
use self::rest::chain;
use self::rest::transactions;

/// Register every REST route; shared by the server and handler tests
pub fn configure(cfg: &mut ServiceConfig) {
    cfg.app_data(JsonConfig::default().error_handler(rest::json_error))
        .service(chain::get_chain_info)
        .service(chain::get_blocks)
        .service(chain::get_block)
        .service(chain::get_verification)
        .service(accounts::get_balance)
        .service(accounts::get_history)
        .service(transactions::get_pending)
        .service(transactions::post_transaction)
        .service(transactions::post_mine);
}

pub async fn start_web_server<A: net::ToSocketAddrs>(
    context: ChainContext,
    addrs: A,
) -> std::io::Result<()> {
    let server = HttpServer::new({
        let context = context.clone();
        move || {
            App::new()
                .app_data(Data::new(context.clone()))
                .configure(configure)
                .wrap(Cors::permissive())
                .wrap(middleware::Logger::default())
        }
    })
    .disable_signals()
    .bind(addrs)?;

    for addr in server.addrs() {
        info!("Web server listening on {addr}");
    }
    let server = server.run();
    tokio::spawn(stop_on_signal(
        context,
        server.handle(),
        tokio::signal::ctrl_c(),
    ));
    server.await
}

/// Cancel sealing before the graceful stop so in-flight `/mine` requests
/// return instead of holding the server open
async fn stop_on_signal<F>(context: ChainContext, handle: ServerHandle, signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(err) = signal.await {
        error!("Unable to listen for shutdown signal: {err}");
        return;
    }
    info!("Shutdown signal received");
    context.shutdown();
    handle.stop(true).await;
}
