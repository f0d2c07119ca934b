use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionState {
    Selected,
    Unselected,
}

impl SelectionState {
    pub fn is_selected(&self) -> bool {
        matches!(self, SelectionState::Selected)
    }
}

/// Ordered, duplicate-free tool identifiers. Order is most-recent-selection
/// order: removing and re-adding an id moves it to the end.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SelectionSet {
    members: Vec<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self {
            members: Vec::new(),
        }
    }

    /// Removes `id` if present, otherwise appends it.
    pub fn toggle(&mut self, id: impl Into<String>) -> SelectionState {
        let id = id.into();
        if self.remove(&id) {
            SelectionState::Unselected
        } else {
            self.members.push(id);
            SelectionState::Selected
        }
    }

    /// Appends `id` unless already present. Returns whether it was added.
    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        if self.contains(&id) {
            return false;
        }
        self.members.push(id);
        true
    }

    pub fn remove(&mut self, id: &str) -> bool {
        match self.members.iter().position(|member| member == id) {
            Some(pos) => {
                self.members.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.members.iter().any(|member| member == id)
    }

    pub fn members(&self) -> &[String] {
        &self.members
    }

    pub fn count(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn clear(&mut self) {
        self.members.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_twice_restores_membership_but_moves_to_end() {
        let mut selection = SelectionSet::new();
        selection.toggle("git");
        selection.toggle("node");
        selection.toggle("docker");

        assert_eq!(selection.toggle("git"), SelectionState::Unselected);
        assert_eq!(selection.toggle("git"), SelectionState::Selected);
        assert_eq!(selection.members(), ["node", "docker", "git"]);
        assert_eq!(selection.count(), 3);
    }

    #[test]
    fn insert_never_duplicates() {
        let mut selection = SelectionSet::new();
        assert!(selection.insert("git"));
        assert!(!selection.insert("git"));
        assert_eq!(selection.count(), 1);
    }

    #[test]
    fn serializes_as_plain_list() {
        let mut selection = SelectionSet::new();
        selection.insert("git");
        selection.insert("rust");
        assert_eq!(serde_json::to_string(&selection).unwrap(), r#"["git","rust"]"#);
    }
}
