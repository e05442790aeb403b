//! API layer - in-process client and REST endpoints

pub mod native;
pub mod rest;
