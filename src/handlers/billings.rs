use actix_web::{web, HttpResponse};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::identity::Identity;
use super::BillingApi;
use crate::domain::billing::{BillingView, Settlement};
use crate::errors::AppError;

#[derive(Debug, Serialize, ToSchema)]
pub struct BillingResponse {
    pub id: Uuid,
    pub order_id: Uuid,
    pub number_display: String,
    pub issue_date: String,
    pub due_date: String,
    pub tax: String,
    pub total: String,
    pub status: String,
}

impl From<BillingView> for BillingResponse {
    fn from(b: BillingView) -> Self {
        Self {
            id: b.id,
            order_id: b.order_id,
            number_display: b.number_display,
            issue_date: b.issue_date.to_rfc3339(),
            due_date: b.due_date.to_rfc3339(),
            tax: b.tax.to_string(),
            total: b.total.to_string(),
            status: b.status.to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SettlementResponse {
    pub billing_id: Uuid,
    pub order_id: Uuid,
    pub amount_paid: String,
    pub billing_status: String,
    /// Present when the order was completed by this settlement.
    pub order_status: Option<String>,
}

impl From<Settlement> for SettlementResponse {
    fn from(s: Settlement) -> Self {
        Self {
            billing_id: s.billing_id,
            order_id: s.order_id,
            amount_paid: s.amount_paid.to_string(),
            billing_status: s.billing_status.to_string(),
            order_status: s.order_status.map(|status| status.to_string()),
        }
    }
}

/// GET /billings/{number}
///
/// Looks up one of the caller's bills that can still be paid (`unpaid` or
/// `lesspaid`).
#[utoipa::path(
    get,
    path = "/billings/{number}",
    params(
        ("number" = String, Path, description = "Bill number, e.g. BIL-202506-001"),
    ),
    responses(
        (status = 200, description = "Bill found", body = BillingResponse),
        (status = 401, description = "Please login"),
        (status = 404, description = "No payable bill with this number"),
    ),
    tag = "billings"
)]
pub async fn get_bill(
    bills: web::Data<BillingApi>,
    Identity(principal): Identity,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let number = path.into_inner();

    let bill = web::block(move || bills.get_bill_by_number(&principal, &number))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(BillingResponse::from(bill)))
}

/// POST /admin/billings/{id}/reconcile
///
/// Recomputes bill and order status from the recorded payments. Safe to
/// repeat.
#[utoipa::path(
    post,
    path = "/admin/billings/{id}/reconcile",
    params(
        ("id" = Uuid, Path, description = "Billing UUID"),
    ),
    responses(
        (status = 200, description = "Statuses recomputed", body = SettlementResponse),
        (status = 403, description = "Not an administrator"),
        (status = 404, description = "Billing not found"),
    ),
    tag = "billings"
)]
pub async fn reconcile(
    bills: web::Data<BillingApi>,
    Identity(principal): Identity,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let billing_id = path.into_inner();

    let settlement = web::block(move || bills.reconcile(&principal, billing_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(SettlementResponse::from(settlement)))
}
