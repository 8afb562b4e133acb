//! Domain types and pure logic shared by the Inkpost database and API crates.
//!
//! Nothing in here touches the network or the database, so every module can
//! be unit-tested in isolation.

pub mod debounce;
pub mod error;
pub mod filter;
pub mod routes;
pub mod types;
