use uuid::Uuid;

use crate::domain::catalog::{CategoryView, NewProduct, ProductView};
use crate::domain::errors::DomainError;
use crate::domain::identity::Principal;
use crate::domain::ports::CatalogRepository;

/// Categories and products. Anyone may browse; only admins may add.
pub struct CatalogService<R> {
    repo: R,
}

impl<R: CatalogRepository> CatalogService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create_category(
        &self,
        principal: &Principal,
        name: &str,
    ) -> Result<CategoryView, DomainError> {
        principal.require_admin()?;
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::InvalidInput(
                "category name must not be empty".to_string(),
            ));
        }
        let category = self.repo.create_category(name, principal.user_id)?;
        log::info!("category '{}' created", category.name);
        Ok(category)
    }

    pub fn list_categories(&self) -> Result<Vec<CategoryView>, DomainError> {
        self.repo.list_categories()
    }

    pub fn create_product(
        &self,
        principal: &Principal,
        product: NewProduct,
    ) -> Result<ProductView, DomainError> {
        principal.require_admin()?;
        product.validate()?;
        let product = self.repo.create_product(&product, principal.user_id)?;
        log::info!("product '{}' created at {}", product.name, product.price);
        Ok(product)
    }

    pub fn get_product(&self, id: Uuid) -> Result<ProductView, DomainError> {
        self.repo
            .find_product(id)?
            .ok_or_else(|| DomainError::NotFound(format!("product {id}")))
    }

    pub fn list_products(&self) -> Result<Vec<ProductView>, DomainError> {
        self.repo.list_products()
    }
}
