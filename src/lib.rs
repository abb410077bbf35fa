// Library for tests to access modules

pub mod config;
pub mod error;
pub mod marketplace_repo;
pub mod models;
pub mod poller;
pub mod render;
pub mod routes;
pub mod rpc_repo;
pub mod snapshot_store;
pub mod version;
pub mod wallet;
