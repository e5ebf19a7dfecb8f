//! # pawgate-core
//!
//! Core types for the Pawgate gateway: the downstream failure taxonomy and
//! the outcome classifier that turns any failure into one normalized HTTP
//! result.
//!
//! The gateway fronts a set of independent services (billing, cart,
//! customers, inventory, products, ratings, vets, visits, ...). Those
//! services fail in heterogeneous ways: some raise typed domain errors, some
//! surface raw transport statuses, some fail generically. This crate
//! centralizes the mapping from any of those shapes to a single
//! `(status, message, body?)` outcome so that every route handler reports
//! failures uniformly instead of duplicating per-call-site conditionals.
//!
//! ## Modules
//!
//! - [`error`] - The `ServiceFailure` taxonomy consumed by the classifier
//! - [`outcome`] - The normalized `Outcome` value returned to route handlers
//! - [`classify`] - The ordered rule table mapping failures to outcomes

pub mod classify;
pub mod error;
pub mod outcome;

pub use classify::OutcomeClassifier;
pub use error::{DomainKind, FailureCategory, ServiceFailure};
pub use outcome::Outcome;
