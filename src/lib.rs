//! vgdb — server-rendered catalog of video games and platforms.
//!
//! This crate provides:
//! - CRUD over two related collections (platforms, games)
//! - Session-based OAuth2 login with JWT verification
//! - Dual JSON/HTML responses negotiated from the `Accept` header

pub mod auth;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod negotiate;
pub mod render;
pub mod repos;
pub mod routes;
pub mod sessions;
pub mod slug;
pub mod state;
