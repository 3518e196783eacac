//! Mounted-profile registry

/// Ordered, duplicate-free set of mounted profile names.
///
/// Mount order is precedence order: a profile mounted later contributes
/// a higher-precedence settings layer. Profile counts are small, so the
/// registry is a plain vector with linear membership checks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileRegistry {
    names: Vec<String>,
}

impl ProfileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount a profile.
    ///
    /// Returns `true` iff the profile was not already mounted; mounting
    /// an already-mounted profile changes nothing, including its
    /// position.
    pub fn mount(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.names.contains(&name) {
            return false;
        }
        self.names.push(name);
        true
    }

    /// Unmount a profile. Returns `true` iff it was mounted.
    pub fn unmount(&mut self, name: &str) -> bool {
        match self.names.iter().position(|mounted| mounted == name) {
            Some(index) => {
                self.names.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn is_mounted(&self, name: &str) -> bool {
        self.names.iter().any(|mounted| mounted == name)
    }

    /// Mounted profile names, in mount order.
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
