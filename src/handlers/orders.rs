use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::billings::BillingResponse;
use super::identity::Identity;
use super::{BillingApi, OrderApi};
use crate::domain::order::{OrderLineInput, OrderLineView, OrderView};
use crate::errors::AppError;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderLineRequest {
    pub product_id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub lines: Vec<CreateOrderLineRequest>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateLineRequest {
    pub quantity: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderLineResponse {
    pub id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub quantity: i32,
    /// Price per unit at the time the order was placed.
    pub unit_price: String,
    pub subtotal: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: Uuid,
    pub number_display: String,
    pub customer_id: Uuid,
    pub date: String,
    pub status: String,
    pub total: String,
    pub created_at: String,
    pub lines: Vec<OrderLineResponse>,
}

impl From<OrderLineView> for OrderLineResponse {
    fn from(l: OrderLineView) -> Self {
        Self {
            id: l.id,
            product_id: l.product_id,
            product_name: l.product_name,
            quantity: l.quantity,
            unit_price: l.unit_price.to_string(),
            subtotal: l.subtotal.to_string(),
        }
    }
}

impl From<OrderView> for OrderResponse {
    fn from(o: OrderView) -> Self {
        Self {
            id: o.id,
            number_display: o.number_display,
            customer_id: o.customer_id,
            date: o.date.to_string(),
            status: o.status.to_string(),
            total: o.total.to_string(),
            created_at: o.created_at.to_rfc3339(),
            lines: o.lines.into_iter().map(OrderLineResponse::from).collect(),
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /orders
///
/// Creates an order for the caller's customer record. Number, header and
/// lines are written in one transaction and the total is read back after
/// commit.
#[utoipa::path(
    post,
    path = "/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", body = OrderResponse),
        (status = 400, description = "Empty order, bad quantity or unknown product"),
        (status = 401, description = "Please login"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn create_order(
    orders: web::Data<OrderApi>,
    Identity(principal): Identity,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let lines: Vec<OrderLineInput> = body
        .into_inner()
        .lines
        .into_iter()
        .map(|l| OrderLineInput {
            product_id: l.product_id,
            quantity: l.quantity,
        })
        .collect();

    let order = web::block(move || orders.create_order(&principal, lines))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(OrderResponse::from(order)))
}

/// GET /orders
///
/// Lists the caller's orders still in `processing`, newest first.
#[utoipa::path(
    get,
    path = "/orders",
    responses(
        (status = 200, description = "Orders in processing", body = Vec<OrderResponse>),
        (status = 401, description = "Please login"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn list_orders(
    orders: web::Data<OrderApi>,
    Identity(principal): Identity,
) -> Result<HttpResponse, AppError> {
    let items = web::block(move || orders.list_orders(&principal))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let items: Vec<OrderResponse> = items.into_iter().map(OrderResponse::from).collect();
    Ok(HttpResponse::Ok().json(items))
}

#[utoipa::path(
    get,
    path = "/orders/{number}",
    params(
        ("number" = String, Path, description = "Order number, e.g. ORD-202506-001"),
    ),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 401, description = "Please login"),
        (status = 404, description = "Order not found"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    orders: web::Data<OrderApi>,
    Identity(principal): Identity,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let number = path.into_inner();

    let order = web::block(move || orders.get_order(&principal, &number))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}

/// PATCH /orders/lines/{line_id}
///
/// Changes a line's quantity and returns the order with its new total.
/// Only unbilled orders in `processing` can be edited.
#[utoipa::path(
    patch,
    path = "/orders/lines/{line_id}",
    params(
        ("line_id" = Uuid, Path, description = "Order line UUID"),
    ),
    request_body = UpdateLineRequest,
    responses(
        (status = 200, description = "Line updated", body = OrderResponse),
        (status = 400, description = "Bad quantity or order not editable"),
        (status = 404, description = "Line not found"),
        (status = 409, description = "Order already billed"),
    ),
    tag = "orders"
)]
pub async fn update_line(
    orders: web::Data<OrderApi>,
    Identity(principal): Identity,
    path: web::Path<Uuid>,
    body: web::Json<UpdateLineRequest>,
) -> Result<HttpResponse, AppError> {
    let line_id = path.into_inner();
    let quantity = body.into_inner().quantity;

    let order = web::block(move || orders.update_line(&principal, line_id, quantity))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}

#[utoipa::path(
    delete,
    path = "/orders/lines/{line_id}",
    params(
        ("line_id" = Uuid, Path, description = "Order line UUID"),
    ),
    responses(
        (status = 200, description = "Line removed", body = OrderResponse),
        (status = 400, description = "Last line or order not editable"),
        (status = 404, description = "Line not found"),
        (status = 409, description = "Order already billed"),
    ),
    tag = "orders"
)]
pub async fn remove_line(
    orders: web::Data<OrderApi>,
    Identity(principal): Identity,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let line_id = path.into_inner();

    let order = web::block(move || orders.remove_line(&principal, line_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}

/// POST /orders/{number}/billing
///
/// Issues the bill for one of the caller's orders: 10% tax, due in 30
/// minutes.
#[utoipa::path(
    post,
    path = "/orders/{number}/billing",
    params(
        ("number" = String, Path, description = "Order number, e.g. ORD-202506-001"),
    ),
    responses(
        (status = 201, description = "Bill issued", body = BillingResponse),
        (status = 401, description = "Please login"),
        (status = 404, description = "Order not found"),
        (status = 409, description = "Order is not in processing"),
    ),
    tag = "billings"
)]
pub async fn bill_order(
    orders: web::Data<OrderApi>,
    bills: web::Data<BillingApi>,
    Identity(principal): Identity,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let number = path.into_inner();

    let bill = web::block(move || {
        let order = orders.get_order(&principal, &number)?;
        bills.generate_bill(&principal, &order)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(BillingResponse::from(bill)))
}
