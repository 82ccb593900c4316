use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::catalog::{CategoryView, NewProduct, ProductView};
use crate::domain::errors::DomainError;
use crate::domain::ports::CatalogRepository;
use crate::schema::{categories, products};

use super::models::{CategoryRow, NewCategoryRow, NewProductRow, ProductRow};

pub struct DieselCatalogRepository {
    pool: DbPool,
}

impl DieselCatalogRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl CatalogRepository for DieselCatalogRepository {
    fn create_category(&self, name: &str, created_by: Uuid) -> Result<CategoryView, DomainError> {
        let mut conn = self.pool.get()?;

        let row = diesel::insert_into(categories::table)
            .values(&NewCategoryRow {
                id: Uuid::new_v4(),
                name: name.to_string(),
                created_by,
            })
            .returning(CategoryRow::as_returning())
            .get_result(&mut conn)?;

        Ok(row.into())
    }

    fn list_categories(&self) -> Result<Vec<CategoryView>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = categories::table
            .order(categories::name.asc())
            .select(CategoryRow::as_select())
            .load(&mut conn)?;

        Ok(rows.into_iter().map(CategoryView::from).collect())
    }

    fn create_product(
        &self,
        product: &NewProduct,
        created_by: Uuid,
    ) -> Result<ProductView, DomainError> {
        let mut conn = self.pool.get()?;

        let row = diesel::insert_into(products::table)
            .values(&NewProductRow {
                id: Uuid::new_v4(),
                name: product.name.clone(),
                stock: product.stock,
                description: product.description.clone(),
                category_id: product.category_id,
                price: product.price.clone(),
                created_by,
            })
            .returning(ProductRow::as_returning())
            .get_result(&mut conn)?;

        Ok(row.into())
    }

    fn find_product(&self, id: Uuid) -> Result<Option<ProductView>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = products::table
            .find(id)
            .select(ProductRow::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(row.map(ProductView::from))
    }

    fn list_products(&self) -> Result<Vec<ProductView>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = products::table
            .order(products::name.asc())
            .select(ProductRow::as_select())
            .load(&mut conn)?;

        Ok(rows.into_iter().map(ProductView::from).collect())
    }
}
