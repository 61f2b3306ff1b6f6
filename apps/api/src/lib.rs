//! Document text recovery and skill matching for job descriptions and CVs.
//!
//! The core is synchronous and storage-free: [`extraction`] turns uploaded
//! bytes into text, [`skills`] turns text into a canonical skill set and
//! [`matching`] scores one skill set against another. The remaining modules
//! wrap that core in an HTTP service.

pub mod analysis;
pub mod config;
pub mod documents;
pub mod errors;
pub mod extraction;
pub mod matching;
pub mod routes;
pub mod skills;
pub mod state;
