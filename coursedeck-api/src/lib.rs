//! # CourseDeck API Server Library
//!
//! HTTP surface for the course catalogue, todo board, flashcards, pomodoro
//! timers and recommendations. All state lives in one in-memory
//! [`coursedeck_shared::store::Store`].
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `middleware`: Response security headers
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
