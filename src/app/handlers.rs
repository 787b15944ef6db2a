//! Route handlers.
//!
//! Handlers never fail: every error path ends in a redirect or a rendered
//! page. Protected pages branch on [`AuthOutcome`], which the router
//! extracts before the handler runs.

use std::collections::BTreeMap;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use super::views;
use super::AppState;
use crate::auth::oauth::{begin_auth, complete_auth, AuthQuery};
use crate::auth::AuthOutcome;
use crate::config::ShopDomain;

/// Path the provider redirects back to after authorization.
pub const CALLBACK_PATH: &str = "/auth/callback";

/// A `302 Found` redirect to `location`.
fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

/// `true` if the client asked for JSON.
fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get_all(header::ACCEPT)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .any(|value| value.contains("application/json"))
}

/// Query parameters of `/auth` and `/auth/begin`.
#[derive(Debug, Default, Deserialize)]
pub struct ShopParams {
    #[serde(default)]
    shop: String,
    #[serde(default)]
    error: String,
}

fn params_or_default(query: Result<Query<ShopParams>, QueryRejection>) -> ShopParams {
    query.map(|Query(params)| params).unwrap_or_default()
}

/// `GET /`
pub async fn dashboard(auth: AuthOutcome, headers: HeaderMap) -> Response {
    let shop = auth.session().map(|session| session.shop.to_string());

    if wants_json(&headers) {
        return Json(json!({
            "authenticated": shop.is_some(),
            "shop": shop,
        }))
        .into_response();
    }

    match shop {
        Some(shop) => Html(views::dashboard(&shop)).into_response(),
        None => Html(views::install_prompt()).into_response(),
    }
}

/// `GET /auth`
pub async fn auth_page(
    headers: HeaderMap,
    query: Result<Query<ShopParams>, QueryRejection>,
) -> Response {
    let params = params_or_default(query);

    if wants_json(&headers) {
        return Json(json!({ "shop": params.shop, "error": params.error })).into_response();
    }

    Html(views::auth_form(&params.shop, &params.error)).into_response()
}

/// `GET /auth/begin`
pub async fn begin(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<ShopParams>, QueryRejection>,
) -> Response {
    let params = params_or_default(query);
    let shop = params.shop.as_str();

    if shop.is_empty() {
        return found("/auth?error=missing_shop");
    }

    let Ok(shop) = ShopDomain::new(shop) else {
        tracing::info!(shop = %shop, "rejecting install for invalid shop domain");
        return found(&format!(
            "/auth?error=invalid_shop&shop={}",
            urlencoding::encode(shop)
        ));
    };

    let started = begin_auth(&state.config, &shop, CALLBACK_PATH, false, None);
    tracing::info!(shop = %shop, "redirecting to Shopify for authorization");

    let jar = state.codec.store_state(state.codec.jar(&headers), started.state.as_ref());
    (jar, found(&started.auth_url)).into_response()
}

/// `GET /auth/callback`
pub async fn callback(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<BTreeMap<String, String>>, QueryRejection>,
) -> Response {
    let query = AuthQuery::from_params(query.map(|Query(params)| params).unwrap_or_default());
    let failure = || {
        found(&format!(
            "/auth?shop={}&error=auth_failed",
            urlencoding::encode(query.shop())
        ))
    };

    let expected_state = state.codec.state(&headers);
    let session = match complete_auth(
        &state.config,
        state.token_exchange.as_ref(),
        &query,
        expected_state.as_deref(),
    )
    .await
    {
        Ok(session) => session,
        Err(e) => {
            tracing::warn!(shop = %query.shop(), error = %e, "OAuth callback failed");
            return failure();
        }
    };

    let jar = state.codec.clear_state(state.codec.jar(&headers));
    let jar = match state.codec.encode(jar, &session) {
        Ok(jar) => jar,
        Err(e) => {
            tracing::warn!(shop = %session.shop, error = %e, "could not encode session cookie");
            return failure();
        }
    };

    tracing::info!(shop = %session.shop, online = session.is_online, "app installed");
    (jar, found("/")).into_response()
}

/// `GET /test`
pub async fn test_page(auth: AuthOutcome, headers: HeaderMap) -> Response {
    let shop = auth.session().map(|session| session.shop.to_string());

    if wants_json(&headers) {
        let test_data: &[[&str; 4]] = if shop.is_some() {
            &views::SAMPLE_PRODUCTS
        } else {
            &[]
        };
        return Json(json!({
            "authenticated": shop.is_some(),
            "shop": shop,
            "testData": test_data,
        }))
        .into_response();
    }

    match shop {
        Some(shop) => Html(views::test_page(&shop)).into_response(),
        None => Html(views::auth_required()).into_response(),
    }
}
