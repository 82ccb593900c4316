use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::billings::SettlementResponse;
use super::identity::Identity;
use super::{parse_money, BillingApi, PaymentApi};
use crate::domain::payment::{PaymentMethod, PaymentView};
use crate::errors::AppError;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePaymentRequest {
    /// Decimal amount as a string, e.g. "120000.00"
    pub amount: String,
    /// One of `credit_card`, `va`, `transfer`
    pub method: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentResponse {
    pub id: Uuid,
    pub billing_id: Uuid,
    pub date: String,
    pub amount: String,
    pub method: String,
}

impl From<PaymentView> for PaymentResponse {
    fn from(p: PaymentView) -> Self {
        Self {
            id: p.id,
            billing_id: p.billing_id,
            date: p.date.to_rfc3339(),
            amount: p.amount.to_string(),
            method: p.method.to_string(),
        }
    }
}

/// POST /billings/{number}/payments
///
/// Pays part or all of one of the caller's open bills. The response carries
/// the statuses after settlement.
#[utoipa::path(
    post,
    path = "/billings/{number}/payments",
    params(
        ("number" = String, Path, description = "Bill number, e.g. BIL-202506-001"),
    ),
    request_body = CreatePaymentRequest,
    responses(
        (status = 201, description = "Payment recorded", body = SettlementResponse),
        (status = 400, description = "Bad amount or payment method"),
        (status = 401, description = "Please login"),
        (status = 404, description = "No payable bill with this number"),
        (status = 409, description = "Bill is cancelled or refunded"),
        (status = 422, description = "Past due or amount exceeds what is left"),
    ),
    tag = "payments"
)]
pub async fn create_payment(
    bills: web::Data<BillingApi>,
    payments: web::Data<PaymentApi>,
    Identity(principal): Identity,
    path: web::Path<String>,
    body: web::Json<CreatePaymentRequest>,
) -> Result<HttpResponse, AppError> {
    let number = path.into_inner();
    let body = body.into_inner();
    let amount = parse_money("amount", &body.amount)?;
    let method: PaymentMethod = body.method.parse()?;

    let settlement = web::block(move || {
        let bill = bills.get_bill_by_number(&principal, &number)?;
        payments.record_payment(&principal, &bill, amount, method)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(SettlementResponse::from(settlement)))
}

/// GET /billings/{number}/payments
///
/// Payments of one of the caller's bills, oldest first, whatever the bill's
/// status.
#[utoipa::path(
    get,
    path = "/billings/{number}/payments",
    params(
        ("number" = String, Path, description = "Bill number, e.g. BIL-202506-001"),
    ),
    responses(
        (status = 200, description = "Payment history", body = Vec<PaymentResponse>),
        (status = 401, description = "Please login"),
        (status = 404, description = "Bill not found"),
    ),
    tag = "payments"
)]
pub async fn list_payments(
    bills: web::Data<BillingApi>,
    payments: web::Data<PaymentApi>,
    Identity(principal): Identity,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let number = path.into_inner();

    let items = web::block(move || {
        let bill = bills.find_bill(&principal, &number)?;
        payments.list_payments(&principal, &bill)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    let items: Vec<PaymentResponse> = items.into_iter().map(PaymentResponse::from).collect();
    Ok(HttpResponse::Ok().json(items))
}
