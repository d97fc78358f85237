//! Core types and trait definitions for the roster person directory.
//!
//! This crate is deliberately free of HTTP and database dependencies. It owns
//! the person model, the input normalizer, the name-pair uniqueness guard,
//! the [`store::PersonStore`] abstraction with its in-process implementation,
//! and the [`directory::Directory`] service that composes them.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod directory;
pub mod error;
pub mod guard;
pub mod memory;
pub mod normalize;
pub mod person;
pub mod store;

pub use directory::Directory;
pub use error::{Error, Result};
