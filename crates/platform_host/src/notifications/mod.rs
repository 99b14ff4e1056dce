//! User-visible notification contracts.

pub mod service;
