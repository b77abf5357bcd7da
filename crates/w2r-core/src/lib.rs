pub mod config;
pub mod logging;

pub mod client;
pub mod error;
pub mod filename;
pub mod flow;
pub mod model;
pub mod routes;
pub mod save;
