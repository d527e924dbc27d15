pub mod todo;

pub use todo::{NewTodo, Todo, TodoForm, TodoFormError};
