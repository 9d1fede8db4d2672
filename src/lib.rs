// src/lib.rs

pub mod api;
pub mod config;
pub mod context;
pub mod filter;
pub mod history;
pub mod llm;
pub mod orchestrator;
pub mod state;
