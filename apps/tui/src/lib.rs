// Export our modules for the binary and for tests
pub mod app;
pub mod cli;
pub mod config;
pub mod event;
pub mod http;
pub mod logging;
pub mod storage;
pub mod terminal;
pub mod ui;
