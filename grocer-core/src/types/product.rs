//! Product listings and rankings.

use serde::{Deserialize, Serialize};

/// Entry of `/top-products`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopProduct {
    /// Product identifier
    pub product_id: u64,
    /// Display name
    pub product_name: String,
    /// Units sold
    pub total_sold: u64,
    /// Unit price
    pub price: f64,
}

impl TopProduct {
    /// Revenue implied by units sold and unit price.
    pub fn revenue(&self) -> f64 {
        self.total_sold as f64 * self.price
    }
}

/// Entry of `/products`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    /// Product identifier
    pub product_id: u64,
    /// Display name
    pub product_name: String,
    /// Unit price
    pub price: f64,
    /// Category identifier, usable with the category forecast
    pub category_id: u64,
    /// Product class label
    pub class: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_class_field() {
        let json = r#"{"product_id": 7, "product_name": "Milk", "price": 1.25, "category_id": 3, "class": "Low"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.class, "Low");
        assert_eq!(product.category_id, 3);
    }

    #[test]
    fn test_top_product_revenue() {
        let p = TopProduct {
            product_id: 1,
            product_name: "Bread".into(),
            total_sold: 4,
            price: 2.5,
        };
        assert_eq!(p.revenue(), 10.0);
    }
}
