//! # Billing API Rust Client
//!
//! A Rust client for a REST billing API: plans, catalog products, and
//! subscriptions.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ApiContext`] and [`ApiContextBuilder`]
//! - Validated newtypes for credentials and endpoints
//! - An ordered [`AttributeBag`] behind every resource, with lossless JSON
//!   round-trips through [`JsonCodec`]
//! - [`PatchDocument`] for partial updates
//! - A [`CallExecutor`](clients::CallExecutor) that issues one request per
//!   call through a pluggable [`Transport`](clients::Transport)
//! - A generic [`Resource`] with `get`, `create`, `update`, `delete`, and
//!   `all`, instantiated as [`Plan`], [`Product`], and [`Subscription`]
//!
//! ## Quick Start
//!
//! ```rust
//! use billing_api::{ApiContext, ClientId, ClientSecret, Environment};
//!
//! let context = ApiContext::builder()
//!     .client_credentials(
//!         ClientId::new("your-client-id").unwrap(),
//!         ClientSecret::new("your-client-secret").unwrap(),
//!     )
//!     .environment(Environment::Sandbox)
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Working with Resources
//!
//! ```rust,ignore
//! use billing_api::clients::CallExecutor;
//! use billing_api::{ListParams, Plan};
//!
//! let executor = CallExecutor::with_default_transport()?;
//!
//! // Create
//! let mut plan = Plan::new();
//! plan.set_product_id("PROD-XXCD1234QWER65782")
//!     .set_name("Video Streaming Service Plan");
//! plan.create(&executor, Some(&context)).await?;
//! println!("Created {:?} at {:?}", plan.id(), plan.create_time());
//!
//! // List
//! let page = Plan::all(&executor, Some(&ListParams::new().page_size(5)), Some(&context)).await?;
//! println!("{} plans on this page", page.len());
//!
//! // Delete (a PATCH of the state field)
//! plan.delete(&executor, Some(&context)).await?;
//! ```
//!
//! ## Default Context
//!
//! Every operation takes an `Option<&ApiContext>`. Passing `None` uses the
//! process-wide default, which must be installed explicitly, once:
//!
//! ```rust,ignore
//! use billing_api::init_default_context;
//!
//! init_default_context(context)?;
//! let plan = Plan::get(&executor, "P-5ML4271244454362WXNWU5NQ", None).await?;
//! ```
//!
//! ## Errors
//!
//! Resource operations return [`ResourceError`], whose variants separate
//! bad input ([`InvalidArgumentError`]), server rejections
//! ([`RemoteApiError`](clients::RemoteApiError)), network failures
//! ([`TransportError`](clients::TransportError)), and payload problems
//! ([`MalformedPayloadError`]).
//!
//! ## Design Principles
//!
//! - **Explicit context**: Configuration is passed per call; the default
//!   context is a documented fallback only
//! - **Fail-fast validation**: Required arguments are checked before I/O
//! - **Thread-safe**: Contexts, executors, and resources are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **No hidden retries**: One call, one exchange

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod model;
pub mod rest;
pub mod validation;

// Re-export public types at crate root for convenience
pub use auth::Credentials;
pub use config::{
    default_context, init_default_context, AccessToken, ApiContext, ApiContextBuilder, ClientId,
    ClientSecret, EndpointUrl, Environment,
};
pub use error::ConfigError;

// Re-export model types
pub use model::{
    AttributeBag, JsonCodec, JsonPointer, MalformedPayloadError, PatchDocument, PatchError,
    PatchOperation,
};

// Re-export resource types
pub use rest::resources::{
    Plan, PlanList, Product, ProductList, Subscription, SubscriptionList,
};
pub use rest::{ListParams, Resource, ResourceError, ResourceList, TrackedResource};
pub use validation::InvalidArgumentError;
