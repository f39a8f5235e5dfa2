pub mod classifier;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod flow;
pub mod interactive;
pub mod llm;
pub mod logging;
pub mod preview;
pub mod progress;
pub mod server;
