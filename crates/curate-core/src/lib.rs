//! Core types and trait definitions for the Curate catalogue.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Entities are plain values; validation is a set of stateless rules; storage
//! is reached only through the [`store::CatalogStore`] trait.

pub mod author;
pub mod error;
pub mod patch;
pub mod rating;
pub mod resource;
pub mod resource_type;
pub mod review;
pub mod rules;
pub mod store;
pub mod validation;

pub use error::{Error, Result};
pub use validation::{Errors, Validate};
