use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::identity::Identity;
use super::ReportApi;
use crate::domain::report::{MostSoldProduct, RevenueDetail, UnpaidBill};
use crate::errors::AppError;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MostSoldParams {
    /// Number of products to return. Defaults to 5, maximum 100.
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MostSoldResponse {
    pub product_id: Uuid,
    pub name: String,
    pub total_sold: i64,
}

impl From<MostSoldProduct> for MostSoldResponse {
    fn from(p: MostSoldProduct) -> Self {
        Self {
            product_id: p.product_id,
            name: p.name,
            total_sold: p.total_sold,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UnpaidBillResponse {
    pub billing_id: Uuid,
    pub bill_number: String,
    pub order_number: String,
    pub customer_name: String,
    pub tax: String,
    pub total: String,
    pub status: String,
    pub created_at: String,
}

impl From<UnpaidBill> for UnpaidBillResponse {
    fn from(b: UnpaidBill) -> Self {
        Self {
            billing_id: b.billing_id,
            bill_number: b.bill_number,
            order_number: b.order_number,
            customer_name: b.customer_name,
            tax: b.tax.to_string(),
            total: b.total.to_string(),
            status: b.status.to_string(),
            created_at: b.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RevenueResponse {
    pub bill_number: String,
    pub payment_date: String,
    pub amount: String,
    pub method: String,
    pub customer_name: String,
    pub order_number: String,
}

impl From<RevenueDetail> for RevenueResponse {
    fn from(r: RevenueDetail) -> Self {
        Self {
            bill_number: r.bill_number,
            payment_date: r.payment_date.to_rfc3339(),
            amount: r.amount.to_string(),
            method: r.method.to_string(),
            customer_name: r.customer_name,
            order_number: r.order_number,
        }
    }
}

#[utoipa::path(
    get,
    path = "/reports/most-sold",
    params(MostSoldParams),
    responses(
        (status = 200, description = "Products by quantity sold", body = Vec<MostSoldResponse>),
        (status = 403, description = "Not an administrator"),
    ),
    tag = "reports"
)]
pub async fn most_sold(
    reports: web::Data<ReportApi>,
    Identity(principal): Identity,
    query: web::Query<MostSoldParams>,
) -> Result<HttpResponse, AppError> {
    let limit = query.into_inner().limit;

    let items = web::block(move || reports.most_sold_products(&principal, limit))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let items: Vec<MostSoldResponse> = items.into_iter().map(MostSoldResponse::from).collect();
    Ok(HttpResponse::Ok().json(items))
}

#[utoipa::path(
    get,
    path = "/reports/unpaid-bills",
    responses(
        (status = 200, description = "Bills without any payment, newest first", body = Vec<UnpaidBillResponse>),
        (status = 403, description = "Not an administrator"),
    ),
    tag = "reports"
)]
pub async fn unpaid_bills(
    reports: web::Data<ReportApi>,
    Identity(principal): Identity,
) -> Result<HttpResponse, AppError> {
    let items = web::block(move || reports.unpaid_bills(&principal))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let items: Vec<UnpaidBillResponse> = items.into_iter().map(UnpaidBillResponse::from).collect();
    Ok(HttpResponse::Ok().json(items))
}

#[utoipa::path(
    get,
    path = "/reports/revenue",
    responses(
        (status = 200, description = "Every payment received, newest first", body = Vec<RevenueResponse>),
        (status = 403, description = "Not an administrator"),
    ),
    tag = "reports"
)]
pub async fn revenue(
    reports: web::Data<ReportApi>,
    Identity(principal): Identity,
) -> Result<HttpResponse, AppError> {
    let items = web::block(move || reports.revenue_details(&principal))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let items: Vec<RevenueResponse> = items.into_iter().map(RevenueResponse::from).collect();
    Ok(HttpResponse::Ok().json(items))
}
