pub mod config;
pub mod controller;
pub mod dispatcher;
pub mod engine;
pub mod error;
pub mod events;
pub mod history;
pub mod message;
pub mod session;
pub mod typing;
