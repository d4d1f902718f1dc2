//! Resource data model.
//!
//! - [`AttributeBag`]: ordered field container behind every resource
//! - [`JsonCodec`]: JSON text conversion for bags
//! - [`PatchDocument`] / [`PatchOperation`]: partial update documents
//! - [`JsonPointer`]: paths addressed by patch operations

mod attributes;
mod codec;
mod patch;
mod pointer;

pub use attributes::AttributeBag;
pub use codec::{JsonCodec, MalformedPayloadError};
pub(crate) use codec::json_type_name;
pub use patch::{PatchDocument, PatchError, PatchOperation};
pub use pointer::JsonPointer;
