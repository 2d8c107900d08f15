//! dbutil Library
//!
//! A library for executing SQL scripts and stored procedures against Oracle
//! with Vault-backed authentication. The core is the script segmenter in
//! [`core::segmenter`]; everything else is connection, execution, and
//! configuration glue around it.

pub mod cli;
pub mod core;
pub mod db;
pub mod error;
pub mod models;
pub mod services;

pub use error::{Error, Result};
