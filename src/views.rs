//! HTML rendering. Templates are compiled into the binary and parsed once at startup.

use serde::Serialize;
use tera::{Context, Tera};

use crate::models::{Todo, TodoForm};

pub const TODO_LIST: &str = "todos/todo_list.html";
pub const TODO_FORM: &str = "todos/todo_form.html";
pub const TODO_CONFIRM_DELETE: &str = "todos/todo_confirm_delete.html";

pub fn load_templates() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        ("base.html", include_str!("../templates/base.html")),
        (TODO_LIST, include_str!("../templates/todos/todo_list.html")),
        (TODO_FORM, include_str!("../templates/todos/todo_form.html")),
        (
            TODO_CONFIRM_DELETE,
            include_str!("../templates/todos/todo_confirm_delete.html"),
        ),
    ])?;
    Ok(tera)
}

#[derive(Serialize)]
struct ListPage<'a> {
    todos: &'a [Todo],
    resolved_count: i64,
    unresolved_count: i64,
}

pub fn todo_list(
    tera: &Tera,
    todos: &[Todo],
    resolved_count: i64,
    unresolved_count: i64,
) -> Result<String, tera::Error> {
    let page = ListPage {
        todos,
        resolved_count,
        unresolved_count,
    };
    tera.render(TODO_LIST, &Context::from_serialize(&page)?)
}

#[derive(Serialize)]
struct FormPage<'a> {
    action: String,
    form: &'a TodoForm,
    todo: Option<&'a Todo>,
    error: Option<String>,
}

/// Renders the create form (`todo` is `None`) or the edit form for `todo`.
pub fn todo_form(
    tera: &Tera,
    form: &TodoForm,
    todo: Option<&Todo>,
    error: Option<String>,
) -> Result<String, tera::Error> {
    let action = match todo {
        Some(todo) => format!("/edit/{}", todo.id),
        None => "/create".to_string(),
    };
    let page = FormPage {
        action,
        form,
        todo,
        error,
    };
    tera.render(TODO_FORM, &Context::from_serialize(&page)?)
}

pub fn todo_confirm_delete(tera: &Tera, todo: &Todo) -> Result<String, tera::Error> {
    let mut context = Context::new();
    context.insert("todo", todo);
    tera.render(TODO_CONFIRM_DELETE, &context)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn todo(id: i64, title: &str, resolved: bool) -> Todo {
        Todo {
            id,
            title: title.to_string(),
            description: String::new(),
            due_date: None,
            resolved,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn empty_list_shows_placeholder() {
        let tera = load_templates().unwrap();
        let html = todo_list(&tera, &[], 0, 0).unwrap();
        assert!(html.contains("No todos yet!"));
        assert!(!html.contains("<table>"));
    }

    #[test]
    fn list_shows_titles_and_counts() {
        let tera = load_templates().unwrap();
        let html = todo_list(&tera, &[todo(2, "Todo 2", true), todo(1, "Todo 1", false)], 1, 1)
            .unwrap();
        assert!(html.contains("Todo 1"));
        assert!(html.contains("Todo 2"));
        assert!(html.contains("1 open, 1 resolved"));
        assert!(html.contains("action=\"/toggle/2\""));
    }

    #[test]
    fn titles_are_escaped() {
        let tera = load_templates().unwrap();
        let html = todo_list(&tera, &[todo(1, "<script>", false)], 0, 1).unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn form_targets_create_or_edit() {
        let tera = load_templates().unwrap();
        let html = todo_form(&tera, &TodoForm::default(), None, None).unwrap();
        assert!(html.contains("action=\"/create\""));

        let existing = todo(7, "Original Title", false);
        let html = todo_form(&tera, &TodoForm::from(&existing), Some(&existing), None).unwrap();
        assert!(html.contains("action=\"/edit/7\""));
        assert!(html.contains("value=\"Original Title\""));
    }

    #[test]
    fn form_shows_error() {
        let tera = load_templates().unwrap();
        let html = todo_form(
            &tera,
            &TodoForm::default(),
            None,
            Some("Title is required!".to_string()),
        )
        .unwrap();
        assert!(html.contains("Title is required!"));
    }

    #[test]
    fn confirm_delete_shows_title() {
        let tera = load_templates().unwrap();
        let html = todo_confirm_delete(&tera, &todo(3, "To Delete", false)).unwrap();
        assert!(html.contains("To Delete"));
        assert!(html.contains("action=\"/delete/3\""));
    }
}
