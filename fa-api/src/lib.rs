//! Fundi Admin API - HTTP client for the marketplace backend REST API.
//!
//! This crate provides a typed client with one method per backend endpoint:
//! builder skills, bulk/single SMS and history, paginated auth/OTP/audit
//! logs, password management, sign-in and customer/builder lookups. Every
//! call is a single request with a bearer header from a
//! [`CredentialProvider`]; non-2xx answers become [`fa_core::FaError::Api`]
//! carrying the backend's `message`.

pub mod client;
pub mod credentials;
pub mod endpoints;
pub mod response;

// Re-export key types
pub use client::ApiClient;
pub use credentials::{CredentialProvider, NoCredentials, StaticToken};
pub use response::{ApiEnvelope, DataEnvelope, MaybeWrapped};
