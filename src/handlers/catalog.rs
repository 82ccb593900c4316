use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::identity::Identity;
use super::{parse_money, CatalogApi};
use crate::domain::catalog::{CategoryView, NewProduct, ProductView};
use crate::errors::AppError;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCategoryRequest {
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
}

impl From<CategoryView> for CategoryResponse {
    fn from(c: CategoryView) -> Self {
        Self {
            id: c.id,
            name: c.name,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub name: String,
    pub stock: i32,
    #[serde(default)]
    pub description: String,
    pub category_id: Uuid,
    /// Decimal price as a string, e.g. "100000.00"
    pub price: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    pub id: Uuid,
    pub name: String,
    pub stock: i32,
    pub description: String,
    pub category_id: Uuid,
    pub price: String,
}

impl From<ProductView> for ProductResponse {
    fn from(p: ProductView) -> Self {
        Self {
            id: p.id,
            name: p.name,
            stock: p.stock,
            description: p.description,
            category_id: p.category_id,
            price: p.price.to_string(),
        }
    }
}

#[utoipa::path(
    post,
    path = "/categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 403, description = "Not an administrator"),
        (status = 409, description = "Category name taken"),
    ),
    tag = "catalog"
)]
pub async fn create_category(
    catalog: web::Data<CatalogApi>,
    Identity(principal): Identity,
    body: web::Json<CreateCategoryRequest>,
) -> Result<HttpResponse, AppError> {
    let name = body.into_inner().name;

    let category = web::block(move || catalog.create_category(&principal, &name))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(CategoryResponse::from(category)))
}

#[utoipa::path(
    get,
    path = "/categories",
    responses(
        (status = 200, description = "All categories", body = Vec<CategoryResponse>),
    ),
    tag = "catalog"
)]
pub async fn list_categories(
    catalog: web::Data<CatalogApi>,
    _identity: Identity,
) -> Result<HttpResponse, AppError> {
    let items = web::block(move || catalog.list_categories())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let items: Vec<CategoryResponse> = items.into_iter().map(CategoryResponse::from).collect();
    Ok(HttpResponse::Ok().json(items))
}

#[utoipa::path(
    post,
    path = "/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Invalid product or unknown category"),
        (status = 403, description = "Not an administrator"),
    ),
    tag = "catalog"
)]
pub async fn create_product(
    catalog: web::Data<CatalogApi>,
    Identity(principal): Identity,
    body: web::Json<CreateProductRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let product = NewProduct {
        price: parse_money("price", &body.price)?,
        name: body.name,
        stock: body.stock,
        description: body.description,
        category_id: body.category_id,
    };

    let product = web::block(move || catalog.create_product(&principal, product))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(ProductResponse::from(product)))
}

#[utoipa::path(
    get,
    path = "/products",
    responses(
        (status = 200, description = "All products", body = Vec<ProductResponse>),
    ),
    tag = "catalog"
)]
pub async fn list_products(
    catalog: web::Data<CatalogApi>,
    _identity: Identity,
) -> Result<HttpResponse, AppError> {
    let items = web::block(move || catalog.list_products())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let items: Vec<ProductResponse> = items.into_iter().map(ProductResponse::from).collect();
    Ok(HttpResponse::Ok().json(items))
}

#[utoipa::path(
    get,
    path = "/products/{id}",
    params(
        ("id" = Uuid, Path, description = "Product UUID"),
    ),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 404, description = "Product not found"),
    ),
    tag = "catalog"
)]
pub async fn get_product(
    catalog: web::Data<CatalogApi>,
    _identity: Identity,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let product = web::block(move || catalog.get_product(id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(ProductResponse::from(product)))
}
