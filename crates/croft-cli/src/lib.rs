//! Croft CLI: command-line tools for the farm site's content and cart.
//!
//! - `croft index <dir>`: write a collection's `<name>-index.json`
//! - `croft show <file>`: print a normalized record
//! - `croft list <collection>`: load a collection the way the site does
//! - `croft cart ...`: drive a cart persisted on disk
//! - `croft config ...`: inspect and create the configuration file

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod config_handlers;

pub use cli::CliArgs;
pub use config::CroftConfig;
