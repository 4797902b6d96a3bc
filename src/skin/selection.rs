/// Ordered set of fragment names picked by the user. Feeds
/// `SkinComposer::apply_many`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SkinSelection {
    names: Vec<String>,
}

impl SkinSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `name` unless it is already selected. Returns whether it was added.
    pub fn add(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.names.push(name);
        true
    }

    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.names.len();
        self.names.retain(|n| n != name);
        self.names.len() != before
    }

    /// Adds or removes `name`. Returns whether it is selected afterwards.
    pub fn toggle(&mut self, name: &str) -> bool {
        if self.remove(name) {
            false
        } else {
            self.names.push(name.to_string());
            true
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn clear(&mut self) {
        self.names.clear();
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for SkinSelection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut selection = Self::new();
        for name in iter {
            selection.add(name);
        }
        selection
    }
}
