//! # pawgate-auth
//!
//! Credential caching and authenticated downstream orchestration for the
//! Pawgate gateway.
//!
//! This crate provides:
//! - A credential cache mapping opaque bearer tokens to validated
//!   identities, with a bounded idle lifetime per entry
//! - The validator seam called on a cache miss
//! - The orchestration glue a route handler calls for one downstream
//!   operation: cache lookup, validation on miss, downstream invocation,
//!   and outcome classification on failure
//!
//! ## Overview
//!
//! Route handlers do not talk to the authentication service or inspect
//! downstream failures themselves. They hand [`AuthGateway::handle`] a
//! bearer token and a downstream call; the gateway either returns the
//! call's result unchanged or a fully-formed [`pawgate_core::Outcome`]
//! ready to be written to the HTTP response.
//!
//! ## Modules
//!
//! - [`cache`] - Credential cache trait and implementations
//! - [`config`] - Gateway authentication configuration
//! - [`gateway`] - Orchestration glue for route handlers
//! - [`identity`] - The validated principal stored in the cache
//! - [`validator`] - Token validator seam and its error type

pub mod cache;
pub mod config;
pub mod gateway;
pub mod identity;
pub mod validator;

pub use cache::{
    CacheStats, CredentialCache, LocalCredentialCache, NoOpCredentialCache, spawn_sweeper,
};
pub use config::GatewayAuthConfig;
pub use gateway::AuthGateway;
pub use identity::Identity;
pub use validator::{TokenValidator, ValidationError};

/// Result of one orchestrated gateway call: the downstream payload on
/// success, a normalized outcome on any failure.
pub type GatewayResult<T> = Result<T, pawgate_core::Outcome>;
