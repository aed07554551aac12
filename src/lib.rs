// src/lib.rs

//! Bookdex Harvester Library

pub mod error;
pub mod models;
pub mod pipeline;
pub mod search;
pub mod services;
pub mod storage;
pub mod utils;
