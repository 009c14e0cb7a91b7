pub mod chain;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod flow;
pub mod oracle;
pub mod payload;
pub mod presentation;
pub mod tracing;
