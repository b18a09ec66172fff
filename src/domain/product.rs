use serde::{Deserialize, Serialize};

use crate::domain::types::ProductId;
use crate::domain::{Entity, EntityKind};

/// Product record as exchanged with the remote service.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub product_code: String,
}

impl Product {
    #[must_use]
    pub fn new(name: String, description: String, product_code: String) -> Self {
        Self {
            id: None,
            name: name.trim().to_string(),
            description: description.trim().to_string(),
            product_code: product_code.trim().to_string(),
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: ProductId) -> Self {
        self.id = Some(id);
        self
    }
}

impl Entity for Product {
    type Id = ProductId;

    const KIND: EntityKind = EntityKind::Products;

    fn id(&self) -> Option<&ProductId> {
        self.id.as_ref()
    }

    fn take_id(&mut self) -> Option<ProductId> {
        self.id.take()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn default_product_is_blank() {
        assert_eq!(
            serde_json::to_value(Product::default()).expect("serializable"),
            json!({ "name": "", "description": "", "productCode": "" })
        );
    }

    #[test]
    fn uses_camel_case_product_code() {
        let product: Product = serde_json::from_value(json!({
            "id": "abc",
            "name": "Widget",
            "description": "A widget",
            "productCode": "W-1",
        }))
        .expect("valid payload");

        assert_eq!(product.id.as_deref(), Some("abc"));
        assert_eq!(product.product_code, "W-1");
    }

    #[test]
    fn take_id_strips_identifier() {
        let mut product = Product::new("Widget".into(), String::new(), "W-1".into())
            .with_id(ProductId::new("abc").expect("valid id"));
        assert_eq!(product.take_id().as_deref(), Some("abc"));
        assert!(product.id().is_none());
    }
}
