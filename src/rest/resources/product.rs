//! Catalog products.

use crate::rest::{Resource, ResourceList, ResourceSchema};

/// Schema of catalog products.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProductSchema;

impl ResourceSchema for ProductSchema {
    const NAME: &'static str = "Product";
    const COLLECTION_PATH: &'static str = "/v1/catalogs/products";
    const LIST_KEY: &'static str = "products";
    const LIST_PARAMS: &'static [&'static str] = &["page_size", "page", "total_required"];
}

/// A catalog product that plans bill for.
pub type Product = Resource<ProductSchema>;

/// A page of products.
pub type ProductList = ResourceList<ProductSchema>;

impl Resource<ProductSchema> {
    string_fields! {
        name, set_name => "name";
        description, set_description => "description";
        product_type, set_product_type => "type";
        category, set_category => "category";
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let mut product = Product::new();
        product
            .set_name("Video Streaming Service")
            .set_product_type("SERVICE")
            .set_category("SOFTWARE");

        assert_eq!(
            product.to_json().unwrap(),
            r#"{"name":"Video Streaming Service","type":"SERVICE","category":"SOFTWARE"}"#
        );
        assert_eq!(product.product_type(), Some("SERVICE"));
        assert!(product.description().is_none());
    }

    #[test]
    fn test_list_params_exclude_plan_filters() {
        assert!(!ProductSchema::LIST_PARAMS.contains(&"plan_ids"));
        assert!(!ProductSchema::LIST_PARAMS.contains(&"product_id"));
    }
}
