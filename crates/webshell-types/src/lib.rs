//! Foundation types for webshell.
//!
//! This crate contains the platform-agnostic types shared by all webshell
//! crates: the error enum, the compiled-in configuration, user-facing
//! notices, and the events a host feeds into the shell.

pub mod config;
pub mod error;
pub mod event;
pub mod notice;
