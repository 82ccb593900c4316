use bigdecimal::BigDecimal;
use uuid::Uuid;

use super::billing::ensure_money_scale;
use super::errors::DomainError;

#[derive(Debug, Clone)]
pub struct CategoryView {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub stock: i32,
    pub description: String,
    pub category_id: Uuid,
    pub price: BigDecimal,
}

impl NewProduct {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::InvalidInput(
                "product name must not be empty".to_string(),
            ));
        }
        if self.stock < 0 {
            return Err(DomainError::InvalidInput(format!(
                "stock must not be negative, got {}",
                self.stock
            )));
        }
        if self.price < BigDecimal::from(0) {
            return Err(DomainError::InvalidInput(format!(
                "price must not be negative, got {}",
                self.price
            )));
        }
        ensure_money_scale("price", &self.price)
    }
}

#[derive(Debug, Clone)]
pub struct ProductView {
    pub id: Uuid,
    pub name: String,
    pub stock: i32,
    pub description: String,
    pub category_id: Uuid,
    pub price: BigDecimal,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn product(name: &str, stock: i32, price: &str) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            stock,
            description: String::new(),
            category_id: Uuid::new_v4(),
            price: BigDecimal::from_str(price).unwrap(),
        }
    }

    #[test]
    fn accepts_a_well_formed_product() {
        assert!(product("Stick Golf", 4, "100000").validate().is_ok());
    }

    #[test]
    fn rejects_blank_names_negative_stock_and_prices() {
        assert!(product("  ", 1, "1").validate().is_err());
        assert!(product("Bola", -1, "1").validate().is_err());
        assert!(product("Bola", 1, "-0.01").validate().is_err());
        assert!(product("Bola", 1, "0.015").validate().is_err());
    }
}
