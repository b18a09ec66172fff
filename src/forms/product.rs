use serde::Deserialize;
use validator::Validate;

use crate::domain::product::Product;
use crate::domain::types::ProductId;
use crate::forms::FormError;

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Form data for creating or editing a product.
pub struct ProductForm {
    #[serde(default)]
    pub id: Option<String>,
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(length(min = 1))]
    pub product_code: String,
}

impl TryFrom<ProductForm> for Product {
    type Error = FormError;

    fn try_from(form: ProductForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let id = form
            .id
            .map(ProductId::new)
            .transpose()
            .map_err(|_| FormError::InvalidProductId)?;

        let product = Product::new(form.name, form.description, form.product_code);

        Ok(Product { id, ..product })
    }
}

impl From<&Product> for ProductForm {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_ref().map(|id| id.as_str().to_string()),
            name: product.name.clone(),
            description: product.description.clone(),
            product_code: product.product_code.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_valid_form_into_product() {
        let form = ProductForm {
            id: Some("p-1".to_string()),
            name: " Widget ".to_string(),
            description: "Blue".to_string(),
            product_code: "W-1".to_string(),
        };

        let product = Product::try_from(form).expect("valid form");

        assert_eq!(product.id.as_deref(), Some("p-1"));
        assert_eq!(product.name, "Widget");
    }

    #[test]
    fn requires_name_and_code() {
        let form = ProductForm {
            name: String::new(),
            product_code: String::new(),
            ..ProductForm::default()
        };
        assert!(matches!(Product::try_from(form), Err(FormError::Validation(_))));
    }

    #[test]
    fn rejects_blank_identifier() {
        let form = ProductForm {
            id: Some("  ".to_string()),
            name: "Widget".to_string(),
            description: String::new(),
            product_code: "W-1".to_string(),
        };
        assert!(matches!(
            Product::try_from(form),
            Err(FormError::InvalidProductId)
        ));
    }
}
