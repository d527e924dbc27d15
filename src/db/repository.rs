use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::{NewTodo, Todo};

const TODO_COLUMNS: &str =
    "id, title, description, due_date, resolved, created_at, updated_at";

pub async fn list_ordered(db: &SqlitePool) -> Result<Vec<Todo>, sqlx::Error> {
    sqlx::query_as::<_, Todo>(&format!(
        "SELECT {TODO_COLUMNS} FROM todos ORDER BY created_at DESC, id DESC"
    ))
    .fetch_all(db)
    .await
}

pub async fn find_by_id(db: &SqlitePool, id: i64) -> Result<Option<Todo>, sqlx::Error> {
    sqlx::query_as::<_, Todo>(&format!("SELECT {TODO_COLUMNS} FROM todos WHERE id = ?"))
        .bind(id)
        .fetch_optional(db)
        .await
}

pub async fn insert(db: &SqlitePool, new: NewTodo) -> Result<Todo, sqlx::Error> {
    let now = Utc::now();

    let id = sqlx::query(
        r#"
        INSERT INTO todos
            (title, description, due_date, resolved, created_at, updated_at)
        VALUES (?1, ?2, ?3, 0, ?4, ?4)
        "#,
    )
    .bind(&new.title)
    .bind(&new.description)
    .bind(new.due_date)
    .bind(now)
    .execute(db)
    .await?
    .last_insert_rowid();

    Ok(Todo {
        id,
        title: new.title,
        description: new.description,
        due_date: new.due_date,
        resolved: false,
        created_at: now,
        updated_at: now,
    })
}

/// Overwrites the editable fields. Returns `None` when no row has `id`.
pub async fn update(
    db: &SqlitePool,
    id: i64,
    changes: NewTodo,
) -> Result<Option<Todo>, sqlx::Error> {
    let affected = sqlx::query(
        r#"
        UPDATE todos
        SET title = ?1,
            description = ?2,
            due_date = ?3,
            updated_at = ?4
        WHERE id = ?5
        "#,
    )
    .bind(&changes.title)
    .bind(&changes.description)
    .bind(changes.due_date)
    .bind(Utc::now())
    .bind(id)
    .execute(db)
    .await?
    .rows_affected();

    if affected == 0 {
        return Ok(None);
    }
    find_by_id(db, id).await
}

/// Flips `resolved` in a single statement. Returns `false` when no row has `id`.
pub async fn toggle_resolved(db: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE todos
        SET resolved = NOT resolved,
            updated_at = ?2
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .bind(Utc::now())
    .execute(db)
    .await?
    .rows_affected();

    Ok(result > 0)
}

pub async fn delete(db: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM todos WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?
        .rows_affected();

    Ok(result > 0)
}

pub async fn count(db: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM todos")
        .fetch_one(db)
        .await
}

pub async fn count_by_resolved(db: &SqlitePool, resolved: bool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM todos WHERE resolved = ?")
        .bind(resolved)
        .fetch_one(db)
        .await
}
