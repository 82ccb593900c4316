use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::customer::{CustomerView, NewCustomer};
use crate::domain::errors::DomainError;
use crate::domain::ports::CustomerRepository;
use crate::schema::customers;

use super::models::{CustomerRow, NewCustomerRow};

pub struct DieselCustomerRepository {
    pool: DbPool,
}

impl DieselCustomerRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl CustomerRepository for DieselCustomerRepository {
    fn create(&self, customer: &NewCustomer) -> Result<CustomerView, DomainError> {
        let mut conn = self.pool.get()?;

        let row = diesel::insert_into(customers::table)
            .values(&NewCustomerRow {
                id: Uuid::new_v4(),
                name: customer.name.clone(),
                address: customer.address.clone(),
                email: customer.email.clone(),
                phone_number: customer.phone_number.clone(),
            })
            .returning(CustomerRow::as_returning())
            .get_result(&mut conn)?;

        Ok(row.into())
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<CustomerView>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = customers::table
            .find(id)
            .select(CustomerRow::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(row.map(CustomerView::from))
    }
}
