//! Link entity representing a stored URL mapping.

/// A stored destination with its view counter.
///
/// `key` is assigned by storage on insert and is the value the public token
/// encodes. `destination` never changes after creation; `views` only grows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub key: u64,
    pub destination: String,
    pub views: u64,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(key: u64, destination: String, views: u64) -> Self {
        Self {
            key,
            destination,
            views,
        }
    }
}

/// Input data for creating a new link.
///
/// The destination must already be normalized; new links always start at
/// zero views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub destination: String,
}
