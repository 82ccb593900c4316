use uuid::Uuid;

use super::errors::DomainError;

#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub name: String,
    pub address: String,
    pub email: String,
    pub phone_number: String,
}

impl NewCustomer {
    pub fn validate(&self) -> Result<(), DomainError> {
        for (field, value) in [
            ("name", &self.name),
            ("address", &self.address),
            ("email", &self.email),
            ("phone_number", &self.phone_number),
        ] {
            if value.trim().is_empty() {
                return Err(DomainError::InvalidInput(format!("{field} must not be empty")));
            }
        }
        if !self.email.contains('@') {
            return Err(DomainError::InvalidInput(format!(
                "'{}' is not an email address",
                self.email
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CustomerView {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub email: String,
    pub phone_number: String,
}
