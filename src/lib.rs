// src/lib.rs

pub mod app;
pub mod chat_message;
pub mod chat_view;
pub mod config;
pub mod constants;
pub mod controller;
pub mod errors;
pub mod key_handlers;
pub mod logging;
pub mod message_store;
pub mod models;
pub mod renderer;
pub mod responder;
pub mod settings;
pub mod status_indicator;
pub mod storage;
pub mod theme;
pub mod transcript;
pub mod translation;
pub mod ui;

pub use app::App;
pub use controller::ChatController;
pub use errors::{AquachatError, AquachatResult};
