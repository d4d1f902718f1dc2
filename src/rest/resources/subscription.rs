//! Billing subscriptions.

use chrono::{DateTime, Utc};

use crate::rest::{Resource, ResourceList, ResourceSchema};

/// Schema of billing subscriptions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SubscriptionSchema;

impl ResourceSchema for SubscriptionSchema {
    const NAME: &'static str = "Subscription";
    const COLLECTION_PATH: &'static str = "/v1/billing/subscriptions";
    const LIST_KEY: &'static str = "subscriptions";
    // Same filters as plans.
    const LIST_PARAMS: &'static [&'static str] =
        &["page_size", "plan_ids", "page", "total_required", "product_id"];
}

/// A subscriber's enrolment in a plan.
pub type Subscription = Resource<SubscriptionSchema>;

/// A page of subscriptions.
pub type SubscriptionList = ResourceList<SubscriptionSchema>;

impl Resource<SubscriptionSchema> {
    string_fields! {
        plan_id, set_plan_id => "plan_id";
        custom_id, set_custom_id => "custom_id";
        start_time, set_start_time => "start_time";
        status, set_status => "status";
    }

    bag_fields! {
        subscriber, set_subscriber => "subscriber";
    }

    /// Returns `start_time` parsed as a timestamp.
    #[must_use]
    pub fn start_time_utc(&self) -> Option<DateTime<Utc>> {
        self.start_time()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|time| time.with_timezone(&Utc))
    }
}
