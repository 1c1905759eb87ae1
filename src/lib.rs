pub mod apis;
pub mod config;
pub mod constants;
pub mod error;
pub mod filter;
pub mod infra;
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod tic;
pub mod types;
