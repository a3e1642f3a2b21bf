//! HTTP front for [`crate::api`].
//!
//! `POST /api/evaluate` and `POST /api/calculate` take and return JSON. Simulations run on
//! actix's blocking pool; every failure is answered with an [`ErrorBody`].

use crate::api::{self, ApiError, CalculateRequest, ErrorBody, EvaluateRequest};
use crate::equity::SimulationConfig;
use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpResponse, HttpServer, ResponseError};
use log::{info, warn};

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// The listening address.
    pub address: String,
    /// The listening port.
    pub port: u16,
    /// Applied to every request.
    pub simulation: SimulationConfig,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse {
        warn!("rejected request: {self}");
        HttpResponse::build(self.status_code()).json(ErrorBody { error: self.to_string() })
    }
}

async fn evaluate(
    config: web::Data<SimulationConfig>,
    req: web::Json<EvaluateRequest>,
) -> Result<HttpResponse, ApiError> {
    let config = config.into_inner();
    let req = req.into_inner();
    let resp = web::block(move || api::evaluate(&req, &config))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;
    Ok(HttpResponse::Ok().json(resp))
}

async fn calculate(
    config: web::Data<SimulationConfig>,
    req: web::Json<CalculateRequest>,
) -> Result<HttpResponse, ApiError> {
    let config = config.into_inner();
    let req = req.into_inner();
    let resp = web::block(move || api::calculate(&req, &config))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;
    Ok(HttpResponse::Ok().json(resp))
}

/// Malformed JSON bodies get the same `{"error"}` shape as validation failures.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let body = ErrorBody { error: err.to_string() };
        warn!("rejected request body: {err}");
        InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
    })
}

/// Registers the `/api` routes. The caller provides `web::Data<SimulationConfig>`.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config()).service(
        web::scope("/api")
            .route("/evaluate", web::post().to(evaluate))
            .route("/calculate", web::post().to(calculate)),
    );
}

/// Runs the server until it is stopped.
pub async fn run(config: Config) -> std::io::Result<()> {
    let simulation = web::Data::new(config.simulation);
    info!(
        "listening on {}:{} (trials {}, exact limit {}, workers {})",
        config.address, config.port, simulation.trials, simulation.exact_limit, simulation.workers
    );

    HttpServer::new(move || App::new().wrap(Logger::new("%r %s %Ts")).app_data(simulation.clone()).configure(routes))
        .bind((config.address.as_str(), config.port))?
        .run()
        .await
}
