use crate::errors::AppError;
use crate::models::{ExportSnapshot, RangeQuery, RenderState, SharePayload};
use crate::pipeline::{export_snapshot, render_for_query, share_payload};
use crate::state::AppState;
use crate::ui::{HtmlPage, Renderer};
use axum::{
    extract::{Query, RawQuery, State},
    http::{header, HeaderMap},
    response::Html,
    Json,
};

pub async fn index(State(state): State<AppState>, Query(pairs): Query<QueryPairs>) -> Html<String> {
    let render = current_render(&state, pairs);
    Html(HtmlPage.render(&render))
}

pub async fn get_progress(
    State(state): State<AppState>,
    Query(pairs): Query<QueryPairs>,
) -> Json<RenderState> {
    Json(current_render(&state, pairs))
}

pub async fn get_live(State(state): State<AppState>) -> Json<RenderState> {
    Json(state.live.borrow().clone())
}

pub async fn get_export(
    State(state): State<AppState>,
    Query(pairs): Query<QueryPairs>,
) -> Json<ExportSnapshot> {
    Json(export_snapshot(&current_render(&state, pairs)))
}

pub async fn get_share(
    State(state): State<AppState>,
    Query(pairs): Query<QueryPairs>,
    RawQuery(raw_query): RawQuery,
    headers: HeaderMap,
) -> Result<Json<SharePayload>, AppError> {
    let url = share_url(state.config.public_url.as_deref(), &headers, raw_query.as_deref())?;
    Ok(Json(share_payload(&current_render(&state, pairs), url)))
}

/// Decoded query pairs. Parsed as a list so repeated or unknown keys never
/// reject the request; `RangeQuery::from_pairs` picks the ones it needs.
type QueryPairs = Vec<(String, String)>;

fn current_render(state: &AppState, pairs: QueryPairs) -> RenderState {
    let query = RangeQuery::from_pairs(pairs);
    render_for_query(&query, state.config.default_year, state.clock.now())
}

/// Page URL for a share payload, keeping the range parameters.
fn share_url(
    public_url: Option<&str>,
    headers: &HeaderMap,
    raw_query: Option<&str>,
) -> Result<String, AppError> {
    let base = match public_url {
        Some(base) => base.to_string(),
        None => {
            let host = headers
                .get(header::HOST)
                .and_then(|value| value.to_str().ok())
                .filter(|host| !host.is_empty())
                .ok_or_else(|| AppError::bad_request("missing host header"))?;
            format!("http://{host}")
        }
    };

    Ok(match raw_query.filter(|query| !query.is_empty()) {
        Some(query) => format!("{base}/?{query}"),
        None => format!("{base}/"),
    })
}
