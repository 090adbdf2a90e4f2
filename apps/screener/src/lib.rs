pub mod backend;
pub mod cli;
pub mod config;
pub mod contact;
pub mod errors;
pub mod export;
pub mod models;
pub mod projection;
pub mod roster;
pub mod state;
pub mod submission;
