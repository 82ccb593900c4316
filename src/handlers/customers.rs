use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::identity::Identity;
use super::CustomerApi;
use crate::domain::customer::{CustomerView, NewCustomer};
use crate::errors::AppError;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCustomerRequest {
    pub name: String,
    pub address: String,
    pub email: String,
    pub phone_number: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerResponse {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub email: String,
    pub phone_number: String,
}

impl From<CustomerView> for CustomerResponse {
    fn from(c: CustomerView) -> Self {
        Self {
            id: c.id,
            name: c.name,
            address: c.address,
            email: c.email,
            phone_number: c.phone_number,
        }
    }
}

#[utoipa::path(
    post,
    path = "/customers",
    request_body = CreateCustomerRequest,
    responses(
        (status = 201, description = "Customer registered", body = CustomerResponse),
        (status = 400, description = "Missing field or malformed email"),
        (status = 403, description = "Not an administrator"),
        (status = 409, description = "Email or phone number already registered"),
    ),
    tag = "customers"
)]
pub async fn create_customer(
    customers: web::Data<CustomerApi>,
    Identity(principal): Identity,
    body: web::Json<CreateCustomerRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let customer = NewCustomer {
        name: body.name,
        address: body.address,
        email: body.email,
        phone_number: body.phone_number,
    };

    let customer = web::block(move || customers.register(&principal, customer))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(CustomerResponse::from(customer)))
}

#[utoipa::path(
    get,
    path = "/customers/{id}",
    params(
        ("id" = Uuid, Path, description = "Customer UUID"),
    ),
    responses(
        (status = 200, description = "Customer found", body = CustomerResponse),
        (status = 404, description = "Customer not found"),
    ),
    tag = "customers"
)]
pub async fn get_customer(
    customers: web::Data<CustomerApi>,
    Identity(principal): Identity,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let customer = web::block(move || customers.get(&principal, id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(CustomerResponse::from(customer)))
}
