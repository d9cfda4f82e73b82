//! An in-memory hierarchical namespace with a small interactive shell.

#![allow(clippy::enum_variant_names)]

pub mod config;
pub mod filesystem;
pub mod shell;
