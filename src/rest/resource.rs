//! Generic billing resource with CRUD operations.
//!
//! A resource is an [`AttributeBag`] tagged with a [`ResourceSchema`]. The
//! schema supplies the collection path, the key holding records in list
//! envelopes, and the allow-list of list query parameters. Every concrete
//! resource ([`Plan`](crate::Plan), [`Product`](crate::Product),
//! [`Subscription`](crate::Subscription)) is a type alias over
//! [`Resource<S>`]; the operations are implemented once, here.
//!
//! # Operations
//!
//! | Operation | Wire call | Result |
//! |-----------|-----------|--------|
//! | [`get`](Resource::get) | `GET <collection>/{id}` | a fresh resource |
//! | [`create`](Resource::create) | `POST <collection>` | `self` replaced by the response |
//! | [`update`](Resource::update) | `PATCH <collection>/{id}` | `true`; `self` is not refreshed |
//! | [`delete`](Resource::delete) | `PATCH <collection>/{id}` with a `state` replace | `true` |
//! | [`all`](Resource::all) | `GET <collection>?<allowed params>` | a [`ResourceList`] |
//!
//! Required arguments are validated before any network I/O; a failed check
//! returns [`ResourceError::InvalidArgument`] and the transport is never
//! called.
//!
//! # Example
//!
//! ```rust,ignore
//! use billing_api::clients::CallExecutor;
//! use billing_api::{ListParams, PatchDocument, PatchOperation, Plan};
//!
//! let executor = CallExecutor::with_default_transport()?;
//!
//! let mut plan = Plan::new();
//! plan.set_product_id("PROD-XXCD1234QWER65782")
//!     .set_name("Video Streaming Service Plan");
//! plan.create(&executor, Some(&context)).await?;
//!
//! let patch = PatchDocument::new()
//!     .with_operation(PatchOperation::replace("/description", "Monthly plan"));
//! plan.update(&executor, &patch, Some(&context)).await?;
//!
//! let page = Plan::all(&executor, Some(&ListParams::new().page_size(5)), Some(&context)).await?;
//! for plan in page.iter() {
//!     println!("{:?}", plan.name());
//! }
//!
//! plan.delete(&executor, Some(&context)).await?;
//! ```

use std::fmt::Debug;
use std::marker::PhantomData;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clients::{CallExecutor, HttpRequest, HttpRequestBuilder, Transport};
use crate::config::ApiContext;
use crate::model::{AttributeBag, JsonCodec, MalformedPayloadError, PatchDocument, PatchOperation};
use crate::rest::{
    collection_path, item_path, Link, ListParams, ResourceError, ResourceList, ResourceOperation,
};
use crate::validation::{require, validate, InvalidArgumentError};

/// Static description of a resource type.
///
/// Implementors are unit types; the constants are all the configuration a
/// resource needs.
///
/// # Example
///
/// ```rust
/// use billing_api::rest::{Resource, ResourceSchema};
///
/// #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// pub struct WebhookSchema;
///
/// impl ResourceSchema for WebhookSchema {
///     const NAME: &'static str = "Webhook";
///     const COLLECTION_PATH: &'static str = "/v1/notifications/webhooks";
///     const LIST_KEY: &'static str = "webhooks";
///     const LIST_PARAMS: &'static [&'static str] = &["anchor_type"];
/// }
///
/// pub type Webhook = Resource<WebhookSchema>;
///
/// let webhook = Webhook::new();
/// assert!(webhook.is_new());
/// ```
pub trait ResourceSchema: Clone + Debug + Default + PartialEq + Send + Sync + 'static {
    /// Singular resource name, used in logs (e.g. `"Plan"`).
    const NAME: &'static str;

    /// Collection path, e.g. `/v1/billing/plans`.
    const COLLECTION_PATH: &'static str;

    /// Envelope key holding the records of a list page, e.g. `plans`.
    const LIST_KEY: &'static str;

    /// Query parameters `all` forwards; anything else is dropped.
    const LIST_PARAMS: &'static [&'static str];
}

/// A billing record backed by an [`AttributeBag`].
///
/// Serializes transparently as its attributes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent, bound = "")]
pub struct Resource<S> {
    attributes: AttributeBag,
    #[serde(skip)]
    schema: PhantomData<S>,
}

// Verify resources are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<crate::Plan>();
};

impl<S: ResourceSchema> Resource<S> {
    /// Creates an empty, unsaved resource.
    #[must_use]
    pub fn new() -> Self {
        Self::from_attributes(AttributeBag::new())
    }

    /// Wraps an existing bag.
    #[must_use]
    pub const fn from_attributes(attributes: AttributeBag) -> Self {
        Self {
            attributes,
            schema: PhantomData,
        }
    }

    /// Decodes a resource from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedPayloadError`] if `text` is not a JSON object.
    pub fn from_json(text: &str) -> Result<Self, MalformedPayloadError> {
        JsonCodec::from_json(text).map(Self::from_attributes)
    }

    /// Encodes the resource as JSON text. Unset fields are absent.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedPayloadError`] if encoding fails.
    pub fn to_json(&self) -> Result<String, MalformedPayloadError> {
        JsonCodec::to_json(&self.attributes)
    }

    /// Returns the schema name (e.g. `"Plan"`).
    #[must_use]
    pub const fn name_of_schema() -> &'static str {
        S::NAME
    }

    /// Returns the attributes.
    #[must_use]
    pub const fn attributes(&self) -> &AttributeBag {
        &self.attributes
    }

    /// Returns the attributes for in-place editing.
    pub fn attributes_mut(&mut self) -> &mut AttributeBag {
        &mut self.attributes
    }

    /// Consumes the resource and returns its attributes.
    #[must_use]
    pub fn into_attributes(self) -> AttributeBag {
        self.attributes
    }

    /// Returns any attribute, declared or not.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Sets any attribute, declared or not.
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.attributes.set(key, value);
        self
    }

    /// Returns an attribute to the unset state.
    pub fn unset_attribute(&mut self, key: &str) -> Option<Value> {
        self.attributes.unset(key)
    }

    /// Returns the server-assigned ID.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attributes.get_str("id")
    }

    /// Sets the ID.
    pub fn set_id(&mut self, id: impl Into<String>) -> &mut Self {
        self.set_attribute("id", id.into())
    }

    /// Returns `true` if the resource has no ID yet.
    #[must_use]
    pub fn is_new(&self) -> bool {
        self.id().map_or(true, |id| id.trim().is_empty())
    }

    /// Returns `create_time` as a timestamp.
    ///
    /// Returns `None` if unset or not RFC 3339.
    #[must_use]
    pub fn create_time(&self) -> Option<DateTime<Utc>> {
        self.timestamp("create_time")
    }

    /// Returns `update_time` as a timestamp.
    #[must_use]
    pub fn update_time(&self) -> Option<DateTime<Utc>> {
        self.timestamp("update_time")
    }

    /// Returns the HATEOAS links of the resource.
    #[must_use]
    pub fn links(&self) -> Vec<Link> {
        Link::from_bag(&self.attributes)
    }

    /// Returns the path of this record.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgumentError`] if the ID is unset or blank.
    pub fn path(&self) -> Result<String, InvalidArgumentError> {
        Self::operation_path(ResourceOperation::Get, self.id())
    }

    /// Returns the path an operation is sent to.
    ///
    /// Item operations need a non-blank `id`; collection operations ignore it.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgumentError`] if the operation targets a single
    /// record and `id` is unset or blank.
    pub fn operation_path(
        operation: ResourceOperation,
        id: Option<&str>,
    ) -> Result<String, InvalidArgumentError> {
        if !operation.targets_item() {
            return Ok(collection_path(S::COLLECTION_PATH));
        }
        validate(&id, "id")?;
        Ok(item_path(S::COLLECTION_PATH, id.unwrap_or_default()))
    }

    /// Returns the patch that marks a record deleted.
    ///
    /// Exactly one operation: `{"op":"replace","path":"/","value":{"state":"DELETED"}}`.
    #[must_use]
    pub fn delete_patch() -> PatchDocument {
        let mut state = AttributeBag::new();
        state.set("state", "DELETED");
        PatchDocument::new().with_operation(PatchOperation::replace("/", state))
    }

    /// Fetches a record by ID.
    ///
    /// # Errors
    ///
    /// - [`ResourceError::InvalidArgument`] if `id` is blank; nothing is sent
    /// - [`ResourceError::Remote`] for a non-2xx response
    /// - [`ResourceError::MalformedPayload`] if the body is not a JSON object
    pub async fn get<T: Transport>(
        executor: &CallExecutor<T>,
        id: &str,
        context: Option<&ApiContext>,
    ) -> Result<Self, ResourceError> {
        let path = Self::operation_path(ResourceOperation::Get, Some(id))?;
        let body = Self::send(
            executor,
            ResourceOperation::Get,
            HttpRequest::builder(ResourceOperation::Get.http_method(), path),
            context,
        )
        .await?;
        Ok(Self::from_json(&body)?)
    }

    /// Creates the record on the server.
    ///
    /// On success the local attributes are replaced by the response, so
    /// server-assigned fields such as `id` and `create_time` are adopted. An
    /// empty response body leaves `self` unchanged.
    ///
    /// # Errors
    ///
    /// - [`ResourceError::Remote`] for a non-2xx response
    /// - [`ResourceError::MalformedPayload`] if encoding or decoding fails;
    ///   `self` is unchanged in that case
    pub async fn create<T: Transport>(
        &mut self,
        executor: &CallExecutor<T>,
        context: Option<&ApiContext>,
    ) -> Result<(), ResourceError> {
        let payload = self.to_json()?;
        let path = Self::operation_path(ResourceOperation::Create, None)?;
        let body = Self::send(
            executor,
            ResourceOperation::Create,
            HttpRequest::builder(ResourceOperation::Create.http_method(), path).body(payload),
            context,
        )
        .await?;

        if !body.trim().is_empty() {
            self.attributes = JsonCodec::from_json(&body)?;
        }
        tracing::debug!("Created {} {}", S::NAME, self.id().unwrap_or("<no id>"));
        Ok(())
    }

    /// Applies a patch to the record on the server.
    ///
    /// Returns `true` on success. `self` is not refreshed; call
    /// [`get`](Self::get) to observe server-side changes.
    ///
    /// # Errors
    ///
    /// - [`ResourceError::InvalidArgument`] if the ID is unset or the patch
    ///   is empty; nothing is sent
    /// - [`ResourceError::Patch`] if a path is not a valid pointer; nothing
    ///   is sent
    /// - [`ResourceError::Remote`] for a non-2xx response
    pub async fn update<T: Transport>(
        &self,
        executor: &CallExecutor<T>,
        patch: &PatchDocument,
        context: Option<&ApiContext>,
    ) -> Result<bool, ResourceError> {
        self.send_patch(executor, ResourceOperation::Update, patch, context)
            .await
    }

    /// Marks the record deleted.
    ///
    /// Sends [`delete_patch`](Self::delete_patch) the same way
    /// [`update`](Self::update) sends a patch. The local instance stays
    /// readable; later calls against it fail server-side.
    ///
    /// # Errors
    ///
    /// See [`update`](Self::update).
    pub async fn delete<T: Transport>(
        &self,
        executor: &CallExecutor<T>,
        context: Option<&ApiContext>,
    ) -> Result<bool, ResourceError> {
        self.send_patch(
            executor,
            ResourceOperation::Delete,
            &Self::delete_patch(),
            context,
        )
        .await
    }

    /// Lists records.
    ///
    /// `params` is filtered to the schema's allow-list; unknown keys are
    /// dropped without error. An empty set lists with server defaults.
    ///
    /// # Errors
    ///
    /// - [`ResourceError::InvalidArgument`] if `params` is `None`; nothing
    ///   is sent
    /// - [`ResourceError::Remote`] for a non-2xx response
    /// - [`ResourceError::MalformedPayload`] if the envelope is malformed
    pub async fn all<T: Transport>(
        executor: &CallExecutor<T>,
        params: Option<&ListParams>,
        context: Option<&ApiContext>,
    ) -> Result<ResourceList<S>, ResourceError> {
        let params = require(params, "params")?;

        let query = params.filter_allowed(S::LIST_PARAMS).into_pairs();
        let path = Self::operation_path(ResourceOperation::All, None)?;
        let body = Self::send(
            executor,
            ResourceOperation::All,
            HttpRequest::builder(ResourceOperation::All.http_method(), path).query(query),
            context,
        )
        .await?;
        Ok(ResourceList::from_json(&body)?)
    }

    async fn send_patch<T: Transport>(
        &self,
        executor: &CallExecutor<T>,
        operation: ResourceOperation,
        patch: &PatchDocument,
        context: Option<&ApiContext>,
    ) -> Result<bool, ResourceError> {
        let path = Self::operation_path(operation, self.id())?;
        validate(patch, "patch_request")?;
        patch.verify()?;

        let payload = JsonCodec::encode(patch)?;
        Self::send(
            executor,
            operation,
            HttpRequest::builder(operation.http_method(), path).body(payload),
            context,
        )
        .await?;
        Ok(true)
    }

    async fn send<T: Transport>(
        executor: &CallExecutor<T>,
        operation: ResourceOperation,
        request: HttpRequestBuilder,
        context: Option<&ApiContext>,
    ) -> Result<String, ResourceError> {
        let request = request.build()?;
        tracing::debug!(
            "{} {}: {} {}",
            S::NAME,
            operation.as_str(),
            request.http_method,
            request.path
        );
        Ok(executor.execute(request, context).await?.body)
    }

    fn timestamp(&self, key: &str) -> Option<DateTime<Utc>> {
        self.attributes
            .get_str(key)
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|time| time.with_timezone(&Utc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::resources::PlanSchema;
    use chrono::TimeZone;
    use serde_json::json;

    type Plan = Resource<PlanSchema>;

    #[test]
    fn test_new_resource_is_empty_and_unsaved() {
        let plan = Plan::new();
        assert!(plan.is_new());
        assert!(plan.attributes().is_empty());
        assert_eq!(plan.to_json().unwrap(), "{}");
        assert_eq!(Plan::name_of_schema(), "Plan");
    }

    #[test]
    fn test_id_accessors() {
        let mut plan = Plan::new();
        plan.set_id("P-1");
        assert_eq!(plan.id(), Some("P-1"));
        assert!(!plan.is_new());

        plan.set_id("  ");
        assert!(plan.is_new());
    }

    #[test]
    fn test_path_requires_id() {
        let mut plan = Plan::new();
        assert_eq!(plan.path(), Err(InvalidArgumentError { name: "id" }));

        plan.set_id("P-5ML4271244454362WXNWU5NQ");
        assert_eq!(
            plan.path().unwrap(),
            "/v1/billing/plans/P-5ML4271244454362WXNWU5NQ"
        );
    }

    #[test]
    fn test_operation_paths() {
        assert_eq!(
            Plan::operation_path(ResourceOperation::All, None).unwrap(),
            "/v1/billing/plans"
        );
        assert_eq!(
            Plan::operation_path(ResourceOperation::Create, Some("ignored")).unwrap(),
            "/v1/billing/plans"
        );
        for operation in [
            ResourceOperation::Get,
            ResourceOperation::Update,
            ResourceOperation::Delete,
        ] {
            assert_eq!(
                Plan::operation_path(operation, Some("P-1")).unwrap(),
                "/v1/billing/plans/P-1"
            );
            assert_eq!(
                Plan::operation_path(operation, None),
                Err(InvalidArgumentError { name: "id" })
            );
            assert_eq!(
                Plan::operation_path(operation, Some(" ")),
                Err(InvalidArgumentError { name: "id" })
            );
        }
    }

    #[test]
    fn test_delete_patch_shape() {
        assert_eq!(
            serde_json::to_value(Plan::delete_patch()).unwrap(),
            json!([{"op": "replace", "path": "/", "value": {"state": "DELETED"}}])
        );
    }

    #[test]
    fn test_timestamps() {
        let plan = Plan::from_json(
            r#"{"create_time":"2020-02-11T07:04:25Z","update_time":"2020-02-11T07:04:25.123+01:00","bad":"x"}"#,
        )
        .unwrap();

        assert_eq!(
            plan.create_time(),
            Some(Utc.with_ymd_and_hms(2020, 2, 11, 7, 4, 25).unwrap())
        );
        assert_eq!(
            plan.update_time().map(|t| t.format("%H:%M").to_string()),
            Some("06:04".to_string())
        );
    }

    #[test]
    fn test_invalid_timestamp_is_none() {
        let mut plan = Plan::new();
        plan.set_attribute("create_time", "yesterday");
        assert!(plan.create_time().is_none());
    }

    #[test]
    fn test_serializes_as_attributes() {
        let mut plan = Plan::new();
        plan.set_attribute("name", "Basic").set_attribute("custom", json!([1]));

        assert_eq!(
            serde_json::to_value(&plan).unwrap(),
            json!({"name": "Basic", "custom": [1]})
        );
        let back: Plan = serde_json::from_value(json!({"name": "Basic", "custom": [1]})).unwrap();
        assert_eq!(back, plan);
    }

    #[test]
    fn test_links() {
        let plan = Plan::from_json(
            r#"{"links":[{"href":"https://api-m.sandbox.paypal.com/v1/billing/plans/P-1","rel":"self","method":"GET"}]}"#,
        )
        .unwrap();
        let links = plan.links();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].rel, "self");
        assert_eq!(links[0].method.as_deref(), Some("GET"));
    }
}
