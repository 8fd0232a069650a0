//! The AI Files Backend Library
//!
//! This library crate defines the components behind the content site's two
//! dynamic surfaces: per-story counters and generated XML documents.
//! It serves as the foundation for the binary executable (`main.rs`).
//!
//! ## Architecture Modules
//! The system is composed of three loosely coupled subsystems plus
//! configuration:
//!
//! - **`counters`**: The core. A generic increment-and-read counter service
//!   instantiated for the feedback and reaction families, exposed over HTTP
//!   with a fixed cross-origin policy.
//! - **`store`**: The state layer. A `HashStore` trait over the hosted hash
//!   store (Upstash-style REST client) with an in-memory implementation for
//!   dev mode and tests. All counter state lives here; the process itself is
//!   stateless.
//! - **`feed`**: The document layer. Loads the static story catalog and
//!   renders the RSS feed and the sitemap on request.
//! - **`config`**: CLI and environment configuration.

pub mod config;
pub mod counters;
pub mod feed;
pub mod store;
