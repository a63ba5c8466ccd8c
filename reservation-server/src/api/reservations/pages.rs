//! HTML page handlers

use axum::{
    Form,
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Response},
};
use http::{HeaderMap, StatusCode, header::SET_COOKIE};
use shared::error::{ErrorCategory, FieldErrors};
use shared::models::ReservationForm;
use shared::{AppError, ListQuery};

use super::parse_id;
use crate::core::ServerState;
use crate::db::repository::{RepoError, reservation};
use crate::flash::{self, Flash};
use crate::views::{self, form::FormTarget, index};

const LIST_PATH: &str = "/reservations";

/// Error rendered as an HTML page instead of JSON
pub struct PageError(AppError);

impl From<AppError> for PageError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<RepoError> for PageError {
    fn from(err: RepoError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = err.http_status();
        let title = if status == StatusCode::NOT_FOUND {
            "Not Found"
        } else {
            "Something went wrong"
        };
        if matches!(err.code.category(), ErrorCategory::System) {
            tracing::error!(code = %err.code, message = %err.message, "Page request failed");
        }
        let body = format!(
            "<div class=\"header\"><h1>{title}</h1></div><p>{}</p>\
<p><a href=\"{LIST_PATH}\">Back to list</a></p>",
            views::escape(&err.message)
        );
        (status, Html(views::layout(title, &body))).into_response()
    }
}

type PageResult = Result<Response, PageError>;

/// GET /reservations
pub async fn index(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
    headers: HeaderMap,
) -> PageResult {
    let flash = Flash::from_headers(&headers);
    let all = reservation::find_all(state.pool()).await?;
    let page = query.apply(all);

    let html = Html(index::render(&page, &query, flash.map(|f| f.message())));
    let mut response = html.into_response();
    if flash.is_some() {
        response.headers_mut().append(SET_COOKIE, flash::clear_cookie());
    }
    Ok(response)
}

/// GET /reservations/create
pub async fn create(State(state): State<ServerState>) -> Html<String> {
    Html(views::form::render(
        FormTarget::Create,
        &ReservationForm::blank(),
        &FieldErrors::new(),
        state.timezone(),
    ))
}

/// POST /reservations
pub async fn store(
    State(state): State<ServerState>,
    Form(form): Form<ReservationForm>,
) -> PageResult {
    let input = match form.validate(state.now(), state.timezone()) {
        Ok(input) => input,
        Err(errors) => return Ok(invalid(&state, FormTarget::Create, &form, &errors)),
    };

    let created = reservation::create(state.pool(), input).await?;
    tracing::info!(id = created.id, "Reservation created");
    Ok(Flash::Created.redirect(LIST_PATH))
}

/// GET /reservations/{id}/edit
pub async fn edit(State(state): State<ServerState>, Path(id): Path<String>) -> PageResult {
    let id = parse_id(&id)?;
    let existing = reservation::get(state.pool(), id).await?;

    Ok(Html(views::form::render(
        FormTarget::Edit(id),
        &ReservationForm::from_reservation(&existing),
        &FieldErrors::new(),
        state.timezone(),
    ))
    .into_response())
}

/// POST|PUT /reservations/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Form(form): Form<ReservationForm>,
) -> PageResult {
    let id = parse_id(&id)?;
    reservation::get(state.pool(), id).await?;

    let input = match form.validate(state.now(), state.timezone()) {
        Ok(input) => input,
        Err(errors) => return Ok(invalid(&state, FormTarget::Edit(id), &form, &errors)),
    };

    reservation::update(state.pool(), id, input).await?;
    tracing::info!(id, "Reservation updated");
    Ok(Flash::Updated.redirect(LIST_PATH))
}

/// DELETE /reservations/{id}, POST /reservations/{id}/delete
pub async fn destroy(State(state): State<ServerState>, Path(id): Path<String>) -> PageResult {
    let id = parse_id(&id)?;
    reservation::delete(state.pool(), id).await?;
    tracing::info!(id, "Reservation deleted");
    Ok(Flash::Deleted.redirect(LIST_PATH))
}

/// Re-render a rejected form with the submitted values and messages
fn invalid(
    state: &ServerState,
    target: FormTarget,
    form: &ReservationForm,
    errors: &FieldErrors,
) -> Response {
    tracing::debug!(?errors, "Reservation form rejected");
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Html(views::form::render(target, form, errors, state.timezone())),
    )
        .into_response()
}
