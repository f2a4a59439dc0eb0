//! Discord OAuth2 authorization-code flow client.
//!
//! Exchanges an authorization code for an access/refresh token pair,
//! wraps that pair in a signed, opaque [`TokenEnvelope`], and uses the
//! envelope to fetch the authenticated user's profile, guilds and linked
//! third-party accounts.
//!
//! The HTTP transport is abstracted behind the [`HttpClient`] trait; a
//! `reqwest`-backed implementation ships behind the default-on
//! `reqwest-client` feature.

mod client;
mod envelope;
mod error;
mod http;
mod models;
mod request;
mod scope;
mod state;

pub mod snowflake;

// Core
pub use client::{AuthorizationRequest, Client, ClientOptions};
pub use envelope::{TokenEnvelope, TokenRecord};
pub use error::{status_message, Error};
pub use http::{HttpClient, HttpRequest, HttpResponse, Method};
pub use scope::Scope;

// Profile models
pub use models::{AvatarOptions, Connection, Guild, User};

// Utilities
pub use state::generate_state;

// Default HTTP client (behind feature flag)
#[cfg(feature = "reqwest-client")]
pub use http::default_client;
