//! The `/api` entry point and the full application router.
//!
//! Every API call goes through [`dispatch`], which picks a handler from the
//! `resource` query parameter and the HTTP method. Handlers return
//! [`ApiResult`], so each outcome leaves here as one JSON envelope.

use crate::domain::{SortField, SortOrder, WeekListQuery};
use crate::error::{ApiError, ApiResult};
use crate::features::comments::model::CommentPayload;
use crate::features::weeks::model::WeekPayload;
use crate::features::{comments, views, weeks};
use crate::response::ApiReply;
use crate::validation::text_field;
use crate::AppState;
use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::Router;
use serde::de::DeserializeOwned;
use std::path::Path;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Query string selectors understood by the API.
#[derive(Debug, Default)]
pub struct ApiQuery {
    pub resource: Option<String>,
    pub week_id: Option<String>,
    pub id: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
}

impl ApiQuery {
    /// Folds raw query pairs into selectors. A repeated key keeps its last
    /// value and unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = ApiQuery::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "resource" => &mut query.resource,
                "week_id" => &mut query.week_id,
                "id" => &mut query.id,
                "search" => &mut query.search,
                "sort" => &mut query.sort,
                "order" => &mut query.order,
                _ => continue,
            };
            *slot = Some(value);
        }
        query
    }

    fn list_query(&self) -> WeekListQuery {
        WeekListQuery {
            search: self.search.clone(),
            sort: SortField::parse_or_default(self.sort.as_deref()),
            order: SortOrder::parse_or_default(self.order.as_deref()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resource {
    Weeks,
    Comments,
}

impl Resource {
    fn parse(raw: Option<&str>) -> ApiResult<Self> {
        match raw {
            None | Some("weeks") => Ok(Resource::Weeks),
            Some("comments") => Ok(Resource::Comments),
            Some(_) => Err(ApiError::bad_request(
                "Invalid resource: use 'weeks' or 'comments'",
            )),
        }
    }
}

pub fn api_router() -> Router<AppState> {
    Router::new().route("/api", any(dispatch))
}

/// Builds the whole application: API, rendered views, static fallback,
/// and the CORS and tracing layers.
pub fn build_app_router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .merge(api_router())
        .merge(views::views_router())
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer())
        .with_state(state)
}

/// Fully open CORS: any origin, the API's methods and headers.
pub fn build_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
}

async fn dispatch(
    State(state): State<AppState>,
    method: Method,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
    body: Bytes,
) -> Response {
    if method == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }

    let result = match query {
        Ok(Query(pairs)) => route(&state, &method, ApiQuery::from_pairs(pairs), &body).await,
        Err(rejection) => {
            tracing::debug!(error = %rejection.body_text(), "Unreadable query string");
            Err(ApiError::bad_request("Invalid query string"))
        }
    };

    match result {
        Ok(reply) => reply.into_response(),
        Err(err) => {
            tracing::debug!(%method, status = %err.status(), error = %err, "API request rejected");
            err.into_response()
        }
    }
}

async fn route(
    state: &AppState,
    method: &Method,
    query: ApiQuery,
    body: &Bytes,
) -> ApiResult<ApiReply> {
    let repo = state.repo.as_ref();

    match Resource::parse(query.resource.as_deref())? {
        Resource::Weeks => match *method {
            Method::GET => match &query.week_id {
                Some(week_id) => weeks::get_week(repo, week_id).await,
                None => weeks::list_weeks(repo, &query.list_query()).await,
            },
            Method::POST => weeks::create_week(repo, parse_body(body)).await,
            Method::PUT => weeks::update_week(repo, parse_body(body)).await,
            Method::DELETE => {
                let week_id = match query.week_id {
                    Some(id) => Some(id),
                    None => text_field(parse_body::<WeekPayload>(body).week_id.as_ref()),
                };
                weeks::delete_week(repo, week_id).await
            }
            _ => Err(ApiError::MethodNotAllowed),
        },
        Resource::Comments => match *method {
            Method::GET => comments::list_comments(repo, query.week_id.as_deref()).await,
            Method::POST => comments::create_comment(repo, parse_body(body)).await,
            Method::DELETE => {
                let id = match query.id {
                    Some(id) => Some(id),
                    None => text_field(parse_body::<CommentPayload>(body).id.as_ref()),
                };
                comments::delete_comment(repo, id).await
            }
            _ => Err(ApiError::MethodNotAllowed),
        },
    }
}

// an empty or non-object body reads as "no fields supplied"
fn parse_body<T: DeserializeOwned + Default>(body: &Bytes) -> T {
    serde_json::from_slice(body).unwrap_or_default()
}
