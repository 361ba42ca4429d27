//! FitTrack backend library
//!
//! Exposes the router, state and services so integration tests can drive
//! the API in-process.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
