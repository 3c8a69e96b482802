//! Application layer: the pure engine and the store-backed service.

pub mod engine;
pub mod service;
