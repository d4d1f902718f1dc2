//! Concrete billing resources.
//!
//! Each resource is a [`ResourceSchema`](crate::rest::ResourceSchema) unit
//! type plus a type alias over [`Resource`](crate::rest::Resource). Typed
//! accessors read and write a single attribute; setters never fail and
//! getters return `None` for unset fields.
//!
//! | Resource | Collection | List key |
//! |----------|------------|----------|
//! | [`Plan`] | `/v1/billing/plans` | `plans` |
//! | [`Product`] | `/v1/catalogs/products` | `products` |
//! | [`Subscription`] | `/v1/billing/subscriptions` | `subscriptions` |

/// Generates string accessors: `getter, setter => "key";`.
macro_rules! string_fields {
    ($($getter:ident, $setter:ident => $key:literal;)*) => {
        $(
            #[doc = concat!("Returns `", $key, "`.")]
            #[must_use]
            pub fn $getter(&self) -> Option<&str> {
                self.attributes().get_str($key)
            }

            #[doc = concat!("Sets `", $key, "`.")]
            pub fn $setter(&mut self, value: impl Into<String>) -> &mut Self {
                self.set_attribute($key, value.into())
            }
        )*
    };
}

/// Generates accessors for nested objects: `getter, setter => "key";`.
macro_rules! bag_fields {
    ($($getter:ident, $setter:ident => $key:literal;)*) => {
        $(
            #[doc = concat!("Returns `", $key, "` as a nested bag.")]
            #[must_use]
            pub fn $getter(&self) -> Option<$crate::AttributeBag> {
                self.attributes().get_bag($key)
            }

            #[doc = concat!("Sets `", $key, "`.")]
            pub fn $setter(&mut self, value: $crate::AttributeBag) -> &mut Self {
                self.set_attribute($key, value)
            }
        )*
    };
}

/// Generates accessors for arrays of objects: `getter, setter => "key";`.
macro_rules! bag_list_fields {
    ($($getter:ident, $setter:ident => $key:literal;)*) => {
        $(
            #[doc = concat!("Returns `", $key, "` as a list of bags.")]
            #[must_use]
            pub fn $getter(&self) -> Option<Vec<$crate::AttributeBag>> {
                self.attributes().get_bag_list($key)
            }

            #[doc = concat!("Sets `", $key, "`.")]
            pub fn $setter(&mut self, items: Vec<$crate::AttributeBag>) -> &mut Self {
                self.attributes_mut().set_bag_list($key, items);
                self
            }
        )*
    };
}

mod plan;
mod product;
mod subscription;

pub use plan::{Plan, PlanList, PlanSchema};
pub use product::{Product, ProductList, ProductSchema};
pub use subscription::{Subscription, SubscriptionList, SubscriptionSchema};
