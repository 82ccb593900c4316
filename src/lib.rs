pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod schema;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::billing_service::BillingService;
use crate::application::catalog_service::CatalogService;
use crate::application::customer_service::CustomerService;
use crate::application::order_service::OrderService;
use crate::application::payment_service::PaymentService;
use crate::application::report_service::ReportService;
use crate::domain::clock::SystemClock;
use crate::errors::StartupError;
use crate::infrastructure::billing_repo::DieselBillingRepository;
use crate::infrastructure::catalog_repo::DieselCatalogRepository;
use crate::infrastructure::customer_repo::DieselCustomerRepository;
use crate::infrastructure::order_repo::DieselOrderRepository;
use crate::infrastructure::payment_repo::DieselPaymentRepository;
use crate::infrastructure::report_repo::DieselReportRepository;

pub use config::Config;
pub use db::{create_pool, DbPool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::orders::create_order,
        handlers::orders::list_orders,
        handlers::orders::get_order,
        handlers::orders::update_line,
        handlers::orders::remove_line,
        handlers::orders::bill_order,
        handlers::billings::get_bill,
        handlers::billings::reconcile,
        handlers::payments::create_payment,
        handlers::payments::list_payments,
        handlers::catalog::create_category,
        handlers::catalog::list_categories,
        handlers::catalog::create_product,
        handlers::catalog::list_products,
        handlers::catalog::get_product,
        handlers::customers::create_customer,
        handlers::customers::get_customer,
        handlers::reports::most_sold,
        handlers::reports::unpaid_bills,
        handlers::reports::revenue,
    ),
    tags(
        (name = "orders", description = "Orders and their lines"),
        (name = "billings", description = "Bills issued for orders"),
        (name = "payments", description = "Payments against bills"),
        (name = "catalog", description = "Categories and products"),
        (name = "customers", description = "Customer records"),
        (name = "reports", description = "Sales reports"),
    )
)]
pub struct ApiDoc;

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) -> Result<(), StartupError> {
    let mut conn = pool.get()?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| StartupError::Migrations(e.to_string()))?;
    log::info!("{} pending migration(s) applied", applied.len());
    Ok(())
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    pool: DbPool,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let orders = web::Data::new(OrderService::new(
        DieselOrderRepository::new(pool.clone()),
        SystemClock,
    ));
    let bills = web::Data::new(BillingService::new(
        DieselBillingRepository::new(pool.clone()),
        SystemClock,
    ));
    let payments = web::Data::new(PaymentService::new(
        DieselPaymentRepository::new(pool.clone()),
        SystemClock,
    ));
    let catalog = web::Data::new(CatalogService::new(DieselCatalogRepository::new(
        pool.clone(),
    )));
    let customers = web::Data::new(CustomerService::new(DieselCustomerRepository::new(
        pool.clone(),
    )));
    let reports = web::Data::new(ReportService::new(DieselReportRepository::new(pool)));

    Ok(HttpServer::new(move || {
        App::new()
            .app_data(orders.clone())
            .app_data(bills.clone())
            .app_data(payments.clone())
            .app_data(catalog.clone())
            .app_data(customers.clone())
            .app_data(reports.clone())
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
            .service(
                web::scope("/orders")
                    .route("", web::post().to(handlers::orders::create_order))
                    .route("", web::get().to(handlers::orders::list_orders))
                    .route(
                        "/lines/{line_id}",
                        web::patch().to(handlers::orders::update_line),
                    )
                    .route(
                        "/lines/{line_id}",
                        web::delete().to(handlers::orders::remove_line),
                    )
                    .route("/{number}", web::get().to(handlers::orders::get_order))
                    .route(
                        "/{number}/billing",
                        web::post().to(handlers::orders::bill_order),
                    ),
            )
            .service(
                web::scope("/billings")
                    .route("/{number}", web::get().to(handlers::billings::get_bill))
                    .route(
                        "/{number}/payments",
                        web::post().to(handlers::payments::create_payment),
                    )
                    .route(
                        "/{number}/payments",
                        web::get().to(handlers::payments::list_payments),
                    ),
            )
            .route(
                "/admin/billings/{id}/reconcile",
                web::post().to(handlers::billings::reconcile),
            )
            .service(
                web::scope("/categories")
                    .route("", web::post().to(handlers::catalog::create_category))
                    .route("", web::get().to(handlers::catalog::list_categories)),
            )
            .service(
                web::scope("/products")
                    .route("", web::post().to(handlers::catalog::create_product))
                    .route("", web::get().to(handlers::catalog::list_products))
                    .route("/{id}", web::get().to(handlers::catalog::get_product)),
            )
            .service(
                web::scope("/customers")
                    .route("", web::post().to(handlers::customers::create_customer))
                    .route("/{id}", web::get().to(handlers::customers::get_customer)),
            )
            .service(
                web::scope("/reports")
                    .route("/most-sold", web::get().to(handlers::reports::most_sold))
                    .route("/unpaid-bills", web::get().to(handlers::reports::unpaid_bills))
                    .route("/revenue", web::get().to(handlers::reports::revenue)),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
