//! Compares the board-game tastes of two BoardGameGeek users.
//!
//! The [`services::bgg`] client reads collections and profiles from the BGG
//! XML API, and [`services::similarity`] scores two users by the Jaccard index
//! of their top games. [`api`] exposes that over HTTP.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
pub mod telemetry;
