#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]

//! Waypost, the storage layer for destination records
//!
//! A destination is a point of interest with descriptive metadata and a
//! postal address. This crate owns the `destination` table and exposes the
//! operations on it behind the [`Storage`] trait, with a Postgres backend for
//! production and an in-memory backend for tests and ephemeral runs.

pub use crate::destinations::Destination;
pub use crate::storage::CreateDestinationValues;
pub use crate::storage::DestinationOption;
pub use crate::storage::Error;
pub use crate::storage::Memory;
pub use crate::storage::Postgres;
pub use crate::storage::Result;
pub use crate::storage::Storage;
pub use crate::storage::options_or_empty;

pub mod destinations;
pub mod storage;
#[cfg(test)]
mod tests;
