//! Billing plans.

use crate::rest::{Resource, ResourceList, ResourceSchema};

/// Schema of billing plans.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlanSchema;

impl ResourceSchema for PlanSchema {
    const NAME: &'static str = "Plan";
    const COLLECTION_PATH: &'static str = "/v1/billing/plans";
    const LIST_KEY: &'static str = "plans";
    const LIST_PARAMS: &'static [&'static str] =
        &["page_size", "plan_ids", "page", "total_required", "product_id"];
}

/// A billing plan: pricing and billing cycles for a product.
///
/// # Example
///
/// ```rust
/// use billing_api::{AttributeBag, Plan};
///
/// let mut cycle = AttributeBag::new();
/// cycle.set("tenure_type", "REGULAR").set("sequence", 1);
///
/// let mut plan = Plan::new();
/// plan.set_product_id("PROD-XXCD1234QWER65782")
///     .set_name("Video Streaming Service Plan")
///     .set_billing_cycles(vec![cycle]);
///
/// assert_eq!(plan.product_id(), Some("PROD-XXCD1234QWER65782"));
/// assert_eq!(plan.billing_cycles().map(|c| c.len()), Some(1));
/// assert!(plan.state().is_none());
/// ```
pub type Plan = Resource<PlanSchema>;

/// A page of plans.
pub type PlanList = ResourceList<PlanSchema>;

impl Resource<PlanSchema> {
    string_fields! {
        name, set_name => "name";
        description, set_description => "description";
        plan_type, set_plan_type => "type";
        state, set_state => "state";
        status, set_status => "status";
        product_id, set_product_id => "product_id";
    }

    bag_list_fields! {
        billing_cycles, set_billing_cycles => "billing_cycles";
    }

    bag_fields! {
        payment_preferences, set_payment_preferences => "payment_preferences";
    }
}
