use uuid::Uuid;

use crate::domain::customer::{CustomerView, NewCustomer};
use crate::domain::errors::DomainError;
use crate::domain::identity::{Principal, Role};
use crate::domain::ports::CustomerRepository;

pub struct CustomerService<R> {
    repo: R,
}

impl<R: CustomerRepository> CustomerService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn register(
        &self,
        principal: &Principal,
        customer: NewCustomer,
    ) -> Result<CustomerView, DomainError> {
        principal.require_admin()?;
        customer.validate()?;
        let customer = self.repo.create(&customer)?;
        log::info!("customer {} registered as {}", customer.name, customer.id);
        Ok(customer)
    }

    /// Admins see any customer; customers see only their own record.
    pub fn get(&self, principal: &Principal, id: Uuid) -> Result<CustomerView, DomainError> {
        if principal.role == Role::Customer && principal.require_customer()? != id {
            return Err(DomainError::NotFound(format!("customer {id}")));
        }
        self.repo
            .find_by_id(id)?
            .ok_or_else(|| DomainError::NotFound(format!("customer {id}")))
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::CustomerService;
    use crate::application::fakes::FakeStore;
    use crate::domain::customer::NewCustomer;
    use crate::domain::errors::DomainError;
    use crate::domain::identity::Principal;

    fn budi() -> NewCustomer {
        NewCustomer {
            name: "Budi".to_string(),
            address: "Jl. Merdeka 10".to_string(),
            email: "budi@example.com".to_string(),
            phone_number: "0812000111".to_string(),
        }
    }

    #[test]
    fn customer_sees_only_their_own_record() {
        let service = CustomerService::new(FakeStore::default());
        let admin = Principal::admin(Uuid::new_v4());
        let budi = service.register(&admin, budi()).unwrap();
        let other = service
            .register(
                &admin,
                NewCustomer {
                    email: "ani@example.com".to_string(),
                    ..self::budi()
                },
            )
            .unwrap();

        let me = Principal::customer(Uuid::new_v4(), budi.id);
        assert_eq!(service.get(&me, budi.id).unwrap().email, "budi@example.com");
        assert!(matches!(
            service.get(&me, other.id),
            Err(DomainError::NotFound(_))
        ));
        assert_eq!(service.get(&admin, other.id).unwrap().id, other.id);
    }

    #[test]
    fn registration_is_admin_only_and_validated() {
        let service = CustomerService::new(FakeStore::default());
        let customer = Principal::customer(Uuid::new_v4(), Uuid::new_v4());

        assert!(matches!(
            service.register(&customer, budi()),
            Err(DomainError::Forbidden(_))
        ));
        assert!(matches!(
            service.register(
                &Principal::admin(Uuid::new_v4()),
                NewCustomer {
                    email: "not-an-email".to_string(),
                    ..budi()
                }
            ),
            Err(DomainError::InvalidInput(_))
        ));
    }
}
