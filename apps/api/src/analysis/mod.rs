//! Runs job-description-versus-CV analyses over stored documents.

pub mod handlers;
pub mod service;
