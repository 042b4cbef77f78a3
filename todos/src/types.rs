//! Domain types for the todo store.
//!
//! The remote service owns the list. The store keeps the last known copy in
//! server order plus one purely local flag per item (`editing`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use todo_sync_core::api::string_or_number;

/// A single todo item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Identifier assigned by the remote service
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Description shown to the user
    #[serde(rename = "todo")]
    pub text: String,
    /// Whether the todo is completed
    #[serde(default)]
    pub completed: bool,
    /// Whether the item is open in an inline editor. Never sent to the service.
    #[serde(skip)]
    pub editing: bool,
}

impl Todo {
    /// Creates a todo that is neither completed nor being edited
    #[must_use]
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            completed: false,
            editing: false,
        }
    }

    /// Marks the todo as completed
    #[must_use]
    pub const fn into_completed(mut self) -> Self {
        self.completed = true;
        self
    }
}

/// Partial update sent with `PATCH {base}/{id}`
///
/// Absent fields are left unchanged by the service.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TodoPatch {
    /// New description
    #[serde(rename = "todo", skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// New completion flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TodoPatch {
    /// Patch that only changes the description
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            completed: None,
        }
    }

    /// Patch that only changes the completion flag
    #[must_use]
    pub const fn completed(completed: bool) -> Self {
        Self {
            text: None,
            completed: Some(completed),
        }
    }

    /// Whether the patch changes nothing
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.text.is_none() && self.completed.is_none()
    }
}

/// State of the todo store
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TodoState {
    /// Items in server order
    pub todos: Vec<Todo>,
    /// Message of the most recent failure
    pub error: Option<String>,
    /// Requests whose response has not been reduced yet
    pub pending_requests: usize,
    /// When the list was last replaced by a successful fetch
    pub last_synced_at: Option<DateTime<Utc>>,
}

impl TodoState {
    /// Creates a new empty todo state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a state holding `todos`
    #[must_use]
    pub fn with_todos(todos: Vec<Todo>) -> Self {
        Self {
            todos,
            ..Self::default()
        }
    }

    /// Whether a request to the remote service is outstanding
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.pending_requests > 0
    }

    /// Returns the number of todos
    #[must_use]
    pub fn count(&self) -> usize {
        self.todos.len()
    }

    /// Returns the number of completed todos
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|t| t.completed).count()
    }

    /// Returns a todo by ID
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    /// Checks if a todo exists
    #[must_use]
    pub fn exists(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut Todo> {
        self.todos.iter_mut().find(|t| t.id == id)
    }

    pub(crate) const fn begin_request(&mut self) {
        self.pending_requests += 1;
    }

    pub(crate) const fn finish_request(&mut self) {
        self.pending_requests = self.pending_requests.saturating_sub(1);
    }
}

/// Actions for the todo store
///
/// Intents are dispatched by the view; the past-tense variants are fed back
/// by effects once the remote service has answered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TodoAction {
    // ========== Fetch ==========
    /// Replace the list with the remote one
    FetchAll,

    /// The remote list arrived
    Fetched {
        /// Items in server order
        todos: Vec<Todo>,
    },

    /// Fetching the list failed
    FetchFailed {
        /// Human-readable reason
        error: String,
    },

    // ========== Create ==========
    /// Create a todo on the remote service
    Create {
        /// Caller-chosen tag echoed in the outcome, 0 when unused
        request: u64,
        /// Description of the new todo
        text: String,
    },

    /// The service created the todo
    Created {
        /// Tag of the `Create` this answers
        request: u64,
        /// Record returned by the service
        todo: Todo,
    },

    /// Creating the todo failed
    CreateFailed {
        /// Tag of the `Create` this answers
        request: u64,
        /// Human-readable reason
        error: String,
    },

    // ========== Update ==========
    /// Change a todo on the remote service
    Update {
        /// Todo to change
        id: String,
        /// Fields to change
        patch: TodoPatch,
    },

    /// The service applied the change
    Updated {
        /// Record returned by the service
        todo: Todo,
    },

    /// Updating the todo failed
    UpdateFailed {
        /// Human-readable reason
        error: String,
    },

    // ========== Delete ==========
    /// Delete a todo on the remote service
    Delete {
        /// Todo to delete
        id: String,
    },

    /// The service deleted the todo
    Deleted {
        /// Deleted todo
        id: String,
    },

    /// Deleting the todo failed
    DeleteFailed {
        /// Human-readable reason
        error: String,
    },

    // ========== Local ==========
    /// Open the inline editor for a todo
    SetEditing {
        /// Todo being edited
        id: String,
    },

    /// Close the inline editor for a todo
    ClearEditing {
        /// Todo no longer being edited
        id: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_record_with_numeric_id() -> Result<(), serde_json::Error> {
        let todo: Todo = serde_json::from_str(
            r#"{"id":5,"todo":"Do something nice","completed":true,"userId":26}"#,
        )?;

        assert_eq!(todo, Todo::new("5", "Do something nice").into_completed());
        assert!(!todo.editing);
        Ok(())
    }

    #[test]
    fn editing_flag_is_never_serialized() -> Result<(), serde_json::Error> {
        let mut todo = Todo::new("1", "Buy milk");
        todo.editing = true;

        let json = serde_json::to_value(&todo)?;
        assert_eq!(json, serde_json::json!({"id": "1", "todo": "Buy milk", "completed": false}));
        Ok(())
    }

    #[test]
    fn patch_serializes_only_present_fields() -> Result<(), serde_json::Error> {
        assert_eq!(
            serde_json::to_value(TodoPatch::completed(true))?,
            serde_json::json!({"completed": true})
        );
        assert_eq!(
            serde_json::to_value(TodoPatch::text("Walk the dog"))?,
            serde_json::json!({"todo": "Walk the dog"})
        );
        assert!(TodoPatch::default().is_empty());
        Ok(())
    }

    #[test]
    fn state_queries() {
        let state = TodoState::with_todos(vec![
            Todo::new("1", "Buy milk"),
            Todo::new("2", "Walk the dog").into_completed(),
        ]);

        assert_eq!(state.count(), 2);
        assert_eq!(state.completed_count(), 1);
        assert!(state.exists("2"));
        assert!(state.get("3").is_none());
        assert!(!state.is_loading());
    }
}
