//! Resource infrastructure for the billing API.
//!
//! This module provides:
//!
//! - **[`Resource<S>`]**: A generic record with `get`, `create`, `update`,
//!   `delete`, and `all`, configured by a [`ResourceSchema`]
//! - **[`ResourceList<S>`]**: A Deref-based wrapper over one page of records
//! - **[`ListParams`]**: Query parameters, filtered per resource
//! - **[`TrackedResource<S>`]**: Dirty tracking that produces patch documents
//! - **Path building**: Collection and item paths with encoded IDs
//! - **[`ResourceError`]**: Distinguishable failures for resource operations
//!
//! # Example
//!
//! ```rust,ignore
//! use billing_api::clients::CallExecutor;
//! use billing_api::{ListParams, Plan, TrackedResource};
//!
//! let executor = CallExecutor::with_default_transport()?;
//!
//! // Fetch a single plan
//! let plan = Plan::get(&executor, "P-5ML4271244454362WXNWU5NQ", Some(&context)).await?;
//! println!("Plan: {:?}", plan.name());
//!
//! // List plans for a product
//! let params = ListParams::new().product_id("PROD-XXCD1234QWER65782").page_size(10);
//! let page = Plan::all(&executor, Some(&params), Some(&context)).await?;
//! for plan in page.iter() {
//!     println!("- {:?}", plan.id());
//! }
//!
//! // Edit and send only the changes
//! let mut tracked = TrackedResource::from_existing(plan);
//! tracked.set_description("Updated description");
//! tracked.save_changes(&executor, Some(&context)).await?;
//!
//! // Mark it deleted
//! tracked.delete(&executor, Some(&context)).await?;
//! ```

mod errors;
mod list;
mod params;
mod path;
mod resource;
mod tracking;

pub mod resources;

// Public exports
pub use errors::ResourceError;
pub use list::{Link, ResourceList};
pub use params::ListParams;
pub use path::{collection_path, item_path, ResourceOperation};
pub use resource::{Resource, ResourceSchema};
pub use tracking::TrackedResource;
