use axum::{
    Router,
    extract::{Form, Path, State, rejection::FormRejection},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use tracing::{debug, info};

use crate::db::repository;
use crate::error::AppError;
use crate::models::{Todo, TodoForm};
use crate::state::AppState;
use crate::views;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_todos))
        .route("/health", get(health))
        .route("/create", get(create_form).post(create_todo))
        .route("/edit/{id}", get(edit_form).post(edit_todo))
        .route("/delete/{id}", get(delete_confirm).post(delete_todo))
        .route("/toggle/{id}", post(toggle_todo))
        .with_state(state)
}

// 302 rather than axum's 303 `Redirect::to`.
fn redirect_to_list() -> Response {
    (StatusCode::FOUND, [(header::LOCATION, "/")]).into_response()
}

// Ids that are not integers cannot name a record.
fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse().map_err(|_| AppError::NotFound)
}

// A missing or unreadable body counts as an empty submission.
fn submitted(form: Result<Form<TodoForm>, FormRejection>) -> TodoForm {
    match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            debug!(%rejection, "treating unreadable form body as empty");
            TodoForm::default()
        }
    }
}

async fn find_todo(state: &AppState, raw_id: &str) -> Result<Todo, AppError> {
    let id = parse_id(raw_id)?;
    repository::find_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound)
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    sqlx::query("select 1").execute(&state.db).await?;
    Ok(StatusCode::OK)
}

async fn list_todos(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let todos = repository::list_ordered(&state.db).await?;
    let total = repository::count(&state.db).await?;
    let resolved = repository::count_by_resolved(&state.db, true).await?;
    Ok(Html(views::todo_list(
        &state.templates,
        &todos,
        resolved,
        total - resolved,
    )?))
}

async fn create_form(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    Ok(Html(views::todo_form(
        &state.templates,
        &TodoForm::default(),
        None,
        None,
    )?))
}

async fn create_todo(
    State(state): State<AppState>,
    form: Result<Form<TodoForm>, FormRejection>,
) -> Result<Response, AppError> {
    let form = submitted(form);
    let new = match form.validate() {
        Ok(new) => new,
        Err(err) => {
            debug!(error = %err, "rejected new todo");
            let html = views::todo_form(&state.templates, &form, None, Some(err.to_string()))?;
            return Ok(Html(html).into_response());
        }
    };

    let todo = repository::insert(&state.db, new).await?;
    info!(id = todo.id, title = %todo.title, "created todo");
    Ok(redirect_to_list())
}

async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let todo = find_todo(&state, &id).await?;
    let form = TodoForm::from(&todo);
    Ok(Html(views::todo_form(&state.templates, &form, Some(&todo), None)?))
}

async fn edit_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    form: Result<Form<TodoForm>, FormRejection>,
) -> Result<Response, AppError> {
    let todo = find_todo(&state, &id).await?;
    let form = submitted(form);

    let changes = match form.validate() {
        Ok(changes) => changes,
        Err(err) => {
            debug!(id = todo.id, error = %err, "rejected todo edit");
            let html =
                views::todo_form(&state.templates, &form, Some(&todo), Some(err.to_string()))?;
            return Ok(Html(html).into_response());
        }
    };

    // A concurrent delete between the lookup and the write lands here.
    let updated = repository::update(&state.db, todo.id, changes)
        .await?
        .ok_or(AppError::NotFound)?;
    info!(id = updated.id, title = %updated.title, "updated todo");
    Ok(redirect_to_list())
}

async fn delete_confirm(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let todo = find_todo(&state, &id).await?;
    Ok(Html(views::todo_confirm_delete(&state.templates, &todo)?))
}

async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id(&id)?;
    if !repository::delete(&state.db, id).await? {
        return Err(AppError::NotFound);
    }
    info!(id, "deleted todo");
    Ok(redirect_to_list())
}

async fn toggle_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id(&id)?;
    if !repository::toggle_resolved(&state.db, id).await? {
        return Err(AppError::NotFound);
    }
    info!(id, "toggled todo");
    Ok(redirect_to_list())
}
