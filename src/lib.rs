pub mod application;
pub mod client;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod schema;
pub mod wire;

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::AppState;
use crate::config::Config;
use crate::domain::errors::DomainError;
use crate::domain::ports::ReportNotifier;
use crate::infrastructure::memory::InMemoryStore;
use crate::infrastructure::notifier::{LogNotifier, TelegramNotifier};
use crate::infrastructure::pg_store::PgStore;
use crate::infrastructure::seed::seed_demo_data;

pub use db::{create_pool, DbPool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Branch used for seeded staff.
const DEFAULT_BRANCH_ID: i32 = 1;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::auth::login,
        handlers::catalog::create_employee,
        handlers::catalog::list_employees,
        handlers::catalog::delete_employee,
        handlers::catalog::create_service,
        handlers::catalog::list_services,
        handlers::orders::start_order,
        handlers::orders::in_progress,
        handlers::orders::complete_order,
        handlers::orders::not_provided,
        handlers::shifts::end_shift,
        handlers::admin::report_today,
        handlers::admin::employee_today,
        handlers::admin::send_report,
    ),
    components(schemas(
        domain::model::Identity,
        domain::model::Role,
        domain::order::OrderStatus,
        domain::order::PaymentType,
        wire::PinAuthRequest,
        wire::CreateEmployeeRequest,
        wire::EmployeeResponse,
        wire::CreateServiceRequest,
        wire::ServiceResponse,
        wire::CreatedResponse,
        wire::StatusResponse,
        wire::StartOrderRequest,
        wire::StartOrderResponse,
        wire::InProgressOrder,
        wire::CompleteOrderRequest,
        wire::NotProvidedRequest,
        wire::ShiftSummaryResponse,
        wire::ReportRow,
        wire::DailyReportResponse,
        wire::EmployeeOrder,
        wire::EmployeeDayResponse,
        wire::ErrorResponse,
    )),
    tags(
        (name = "auth", description = "PIN sign-in"),
        (name = "orders", description = "Order lifecycle"),
        (name = "shifts", description = "Shift close"),
        (name = "admin", description = "Daily reporting"),
    )
)]
pub struct ApiDoc;

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) -> Result<(), DomainError> {
    let mut conn = pool.get()?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| DomainError::Internal(format!("migrations failed: {e}")))?;
    Ok(())
}

/// Register every route of the POS API.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(handlers::health))
        .route("/auth/pin", web::post().to(handlers::auth::login))
        .service(
            web::scope("/employees")
                .route("", web::post().to(handlers::catalog::create_employee))
                .route("", web::get().to(handlers::catalog::list_employees))
                .route("/{id}", web::delete().to(handlers::catalog::delete_employee)),
        )
        .service(
            web::scope("/services")
                .route("", web::post().to(handlers::catalog::create_service))
                .route("", web::get().to(handlers::catalog::list_services)),
        )
        .service(
            web::scope("/orders")
                .route("/start", web::post().to(handlers::orders::start_order))
                .route("/in-progress", web::get().to(handlers::orders::in_progress))
                .route("/{id}/complete", web::post().to(handlers::orders::complete_order))
                .route("/{id}/not-provided", web::post().to(handlers::orders::not_provided)),
        )
        .route("/shifts/end", web::post().to(handlers::shifts::end_shift))
        .service(
            web::scope("/admin")
                .route("/report/today", web::get().to(handlers::admin::report_today))
                .route("/report/today/send", web::post().to(handlers::admin::send_report))
                .route("/employee/today", web::get().to(handlers::admin::employee_today)),
        );
}

/// Wire storage and the report channel from configuration.
pub fn build_state(config: &Config) -> Result<AppState, DomainError> {
    let notifier: Arc<dyn ReportNotifier> = match &config.telegram {
        Some(tg) => Arc::new(TelegramNotifier::new(&tg.token, &tg.chat_id)?),
        None => {
            log::warn!("TELEGRAM_TOKEN not set; reports will only be logged");
            Arc::new(LogNotifier)
        }
    };

    match &config.database_url {
        Some(url) => {
            let pool = create_pool(url)?;
            run_migrations(&pool)?;
            let store = Arc::new(PgStore::new(pool));
            if config.seed_demo_data {
                seed_demo_data(store.as_ref(), DEFAULT_BRANCH_ID)?;
            }
            Ok(AppState::new(store, notifier, config.utc_offset_hours))
        }
        None => {
            log::warn!("DATABASE_URL not set; using in-memory storage, data is lost on exit");
            let store = Arc::new(InMemoryStore::new());
            if config.seed_demo_data {
                seed_demo_data(store.as_ref(), DEFAULT_BRANCH_ID)?;
            }
            Ok(AppState::new(store, notifier, config.utc_offset_hours))
        }
    }
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or spawning) the returned
/// server.
pub fn build_server(
    state: web::Data<AppState>,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let openapi = ApiDoc::openapi();
    Ok(HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .configure(routes)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi.clone()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
