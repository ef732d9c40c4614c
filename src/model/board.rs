use serde::{Deserialize, Deserializer, Serialize};

/// A single todo item
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub title: String,
    pub completed: bool,
    /// External link (URL); empty when unset
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub link: String,
}

impl Todo {
    pub fn new(title: impl Into<String>) -> Self {
        Todo {
            title: title.into(),
            completed: false,
            link: String::new(),
        }
    }
}

/// A named, ordered list of todos
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub todos: Vec<Todo>,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Project {
            name: name.into(),
            todos: Vec::new(),
        }
    }

    pub fn todo(&self, index: usize) -> Option<&Todo> {
        self.todos.get(index)
    }

    pub fn todo_mut(&mut self, index: usize) -> Option<&mut Todo> {
        self.todos.get_mut(index)
    }
}

/// Everything persisted to the data file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub projects: Vec<Project>,
}

impl Store {
    pub fn project(&self, index: usize) -> Option<&Project> {
        self.projects.get(index)
    }

    pub fn project_mut(&mut self, index: usize) -> Option<&mut Project> {
        self.projects.get_mut(index)
    }
}

/// Treat an explicit JSON `null` list the same as a missing one.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
