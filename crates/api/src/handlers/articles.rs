//! Handlers for article reads and edit submission.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use moltpedia_core::error::CoreError;
use moltpedia_db::engine::ModerationEngine;
use moltpedia_db::models::revision::SubmitEditRequest;
use moltpedia_db::repositories::{ArticleRepo, RevisionRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthContributor;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query params for listing articles.
#[derive(Debug, Deserialize)]
pub struct ListArticlesQuery {
    /// Optional search term (ILIKE over title and content).
    pub q: Option<String>,
    /// 1-based page number.
    pub page: Option<i64>,
    /// Items per page, capped at 100.
    pub limit: Option<i64>,
}

/// GET /api/v1/articles
///
/// List published articles, optionally filtered by a search term.
pub async fn list_articles(
    State(state): State<AppState>,
    Query(params): Query<ListArticlesQuery>,
) -> AppResult<impl IntoResponse> {
    let page = params.page.unwrap_or(1).max(1);
    let limit = params.limit.unwrap_or(20).clamp(1, 100);
    let offset = (page - 1) * limit;

    let articles = ArticleRepo::list(&state.pool, params.q.as_deref(), limit, offset).await?;
    Ok(Json(DataResponse { data: articles }))
}

/// GET /api/v1/articles/{slug}
///
/// Current head content of an article, via the head index.
pub async fn get_article(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let article = ArticleRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or(AppError::Core(CoreError::ArticleNotFound { slug }))?;
    Ok(Json(DataResponse { data: article }))
}

/// GET /api/v1/articles/{slug}/history
///
/// All revisions of an article, version ascending, each tagged with its
/// status. How much of this to show publicly is the caller's decision.
pub async fn get_history(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    ArticleRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::ArticleNotFound { slug: slug.clone() })
        })?;

    let history = RevisionRepo::history(&state.pool, &slug).await?;
    Ok(Json(DataResponse { data: history }))
}

/// POST /api/v1/articles/{slug}/edits
///
/// Submit a proposed edit. `base_version` 0 creates the article. Returns
/// 201 with the reserved version and whether it published or was queued.
pub async fn submit_edit(
    auth: AuthContributor,
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(input): Json<SubmitEditRequest>,
) -> AppResult<impl IntoResponse> {
    let outcome = ModerationEngine::submit_edit(&state.pool, &slug, &input, auth.id).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: outcome })))
}
