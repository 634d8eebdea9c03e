pub mod block;
pub mod constants;
pub mod context;
pub mod ledger;
pub mod server;
pub mod simulate;
pub mod web;
