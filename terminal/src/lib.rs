pub mod app;
pub mod config;
pub mod transport;
pub mod view;
