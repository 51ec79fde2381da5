pub mod arguments;
pub mod config;
pub mod contract;
pub mod dashboard;
pub mod errors;
pub mod logger;
pub mod paths;
pub mod prices;
pub mod rpc;
pub mod run;
pub mod session;
