//! tudobacana Admin library.
//!
//! This crate provides the admin panel as a library, allowing it to be
//! tested and reused by the CLI.
//!
//! # Security
//!
//! Every panel route requires an admin session. Sessions live in `PostgreSQL`
//! and admin passwords are stored as Argon2id hashes.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
