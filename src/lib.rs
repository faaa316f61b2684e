pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod diff;
pub mod error;
pub mod manifest;
pub mod render;
pub mod source;
