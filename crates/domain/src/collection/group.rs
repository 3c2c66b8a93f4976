//! Group type

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::id::generate_id;
use crate::request::Request;

/// A named, ordered collection of requests. Owns its requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Unique identifier
    pub id: Uuid,
    /// Group name
    pub name: String,
    /// Requests in display order
    #[serde(default)]
    pub requests: Vec<Request>,
}

impl Group {
    /// Creates a new empty group.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            requests: Vec::new(),
        }
    }

    /// Adds a request and returns self for chaining.
    #[must_use]
    pub fn with_request(mut self, request: Request) -> Self {
        self.requests.push(request);
        self
    }

    /// Finds a request by id.
    #[must_use]
    pub fn request(&self, id: Uuid) -> Option<&Request> {
        self.requests.iter().find(|r| r.id == id)
    }

    /// Finds a request by id for mutation.
    pub fn request_mut(&mut self, id: Uuid) -> Option<&mut Request> {
        self.requests.iter_mut().find(|r| r.id == id)
    }

    /// Removes a request by id, returning it if it was present.
    pub fn remove_request(&mut self, id: Uuid) -> Option<Request> {
        let index = self.requests.iter().position(|r| r.id == id)?;
        Some(self.requests.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_and_remove() {
        let request = Request::get("List", "https://x.test");
        let id = request.id;
        let mut group = Group::new("Posts").with_request(request);

        assert!(group.request(id).is_some());
        assert!(group.remove_request(id).is_some());
        assert!(group.request(id).is_none());
        assert!(group.remove_request(id).is_none());
    }
}
