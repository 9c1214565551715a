// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::{
    openapi::security::{ApiKey as ApiKeyScheme, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{auth::API_SECRET_HEADER, error::ErrorBody, state::AppState};

pub mod sweep;

pub fn router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/sweep", get(sweep::sweep_status).post(sweep::trigger_sweep))
        .with_state(state);

    Router::new()
        .merge(routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(sweep::sweep_status, sweep::trigger_sweep),
    components(
        schemas(
            sweep::StatusResponse,
            sweep::StatusErrorResponse,
            sweep::SweepResponse,
            sweep::SweptResponse,
            sweep::BelowThresholdResponse,
            ErrorBody
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Sweep", description = "Threshold-triggered token sweep")
    )
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "api_secret",
                SecurityScheme::ApiKey(ApiKeyScheme::Header(ApiKeyValue::new(API_SECRET_HEADER))),
            );
        }
    }
}
