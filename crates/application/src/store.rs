//! Project store
//!
//! Single owner of groups, environments, and the active environment
//! reference. Every mutation goes through a method here; lookups are by id.

use uuid::Uuid;

use postline_domain::{Environment, Group, Project, Request};

use crate::error::{ApplicationError, ApplicationResult};
use crate::variable_resolver::{ResolutionResult, VariableResolver};

/// What happened when an environment was merged in by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// An environment with the same name was updated in place.
    Replaced(Uuid),
    /// No environment had that name; it was appended.
    Appended(Uuid),
}

impl MergeOutcome {
    /// Returns the id of the environment now holding the data.
    #[must_use]
    pub const fn id(self) -> Uuid {
        match self {
            Self::Replaced(id) | Self::Appended(id) => id,
        }
    }
}

/// In-memory project state.
#[derive(Debug, Clone, Default)]
pub struct ProjectStore {
    project: Project,
    active_environment: Option<Uuid>,
}

impl ProjectStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with a `local` environment and a sample request.
    #[must_use]
    pub fn with_sample_data() -> Self {
        let environment = Environment::new("local")
            .with_variable("baseUrl", "https://api-blog.labkita.my.id");
        let request = Request::get("Get Users", "{{baseUrl}}/api/posts")
            .with_header("Content-Type", "application/json")
            .with_header("Accept", "application/json");
        let group = Group::new("Sample Collection").with_request(request);

        let active = Some(environment.id);
        Self {
            project: Project::new(vec![group], vec![environment]),
            active_environment: active,
        }
    }

    /// Creates a store holding `project`, with no active environment.
    #[must_use]
    pub fn from_project(project: Project) -> Self {
        Self {
            project,
            active_environment: None,
        }
    }

    /// Returns the whole project.
    #[must_use]
    pub const fn project(&self) -> &Project {
        &self.project
    }

    // --- Groups ---

    /// Lists groups in display order.
    #[must_use]
    pub fn groups(&self) -> &[Group] {
        &self.project.groups
    }

    /// Finds a group by id.
    #[must_use]
    pub fn group(&self, id: Uuid) -> Option<&Group> {
        self.project.groups.iter().find(|g| g.id == id)
    }

    fn group_mut(&mut self, id: Uuid) -> ApplicationResult<&mut Group> {
        self.project
            .groups
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| ApplicationError::not_found("group", id))
    }

    /// Creates an empty group and returns its id.
    pub fn create_group(&mut self, name: impl Into<String>) -> Uuid {
        let group = Group::new(name);
        let id = group.id;
        self.project.groups.push(group);
        id
    }

    /// Renames a group.
    ///
    /// # Errors
    ///
    /// `NotFound` if no group has this id.
    pub fn rename_group(&mut self, id: Uuid, name: impl Into<String>) -> ApplicationResult<()> {
        self.group_mut(id)?.name = name.into();
        Ok(())
    }

    /// Deletes a group and every request it owns.
    ///
    /// # Errors
    ///
    /// `NotFound` if no group has this id.
    pub fn delete_group(&mut self, id: Uuid) -> ApplicationResult<Group> {
        let index = self
            .project
            .groups
            .iter()
            .position(|g| g.id == id)
            .ok_or_else(|| ApplicationError::not_found("group", id))?;
        Ok(self.project.groups.remove(index))
    }

    /// Appends groups after the existing ones.
    pub fn append_groups(&mut self, groups: impl IntoIterator<Item = Group>) {
        self.project.groups.extend(groups);
    }

    // --- Requests ---

    /// Adds a copy of `template` to a group under fresh ids and returns the new request id.
    ///
    /// # Errors
    ///
    /// `NotFound` if no group has this id.
    pub fn create_request(&mut self, group_id: Uuid, template: &Request) -> ApplicationResult<Uuid> {
        let request = template.duplicate();
        let id = request.id;
        self.group_mut(group_id)?.requests.push(request);
        Ok(id)
    }

    /// Finds a request by id across all groups.
    #[must_use]
    pub fn find_request(&self, id: Uuid) -> Option<&Request> {
        self.project.groups.iter().find_map(|g| g.request(id))
    }

    fn request_mut(&mut self, id: Uuid) -> ApplicationResult<&mut Request> {
        self.project
            .groups
            .iter_mut()
            .find_map(|g| g.request_mut(id))
            .ok_or_else(|| ApplicationError::not_found("request", id))
    }

    /// Returns the group that owns a request.
    #[must_use]
    pub fn group_of(&self, request_id: Uuid) -> Option<&Group> {
        self.project
            .groups
            .iter()
            .find(|g| g.request(request_id).is_some())
    }

    /// Replaces the stored request that has the same id.
    ///
    /// # Errors
    ///
    /// `NotFound` if no request has this id.
    pub fn update_request(&mut self, request: Request) -> ApplicationResult<()> {
        let id = request.id;
        *self.request_mut(id)? = request;
        Ok(())
    }

    /// Renames a request.
    ///
    /// # Errors
    ///
    /// `NotFound` if no request has this id.
    pub fn rename_request(&mut self, id: Uuid, name: impl Into<String>) -> ApplicationResult<()> {
        self.request_mut(id)?.name = name.into();
        Ok(())
    }

    /// Deletes a request from its group.
    ///
    /// # Errors
    ///
    /// `NotFound` if no request has this id.
    pub fn delete_request(&mut self, id: Uuid) -> ApplicationResult<Request> {
        self.project
            .groups
            .iter_mut()
            .find_map(|g| g.remove_request(id))
            .ok_or_else(|| ApplicationError::not_found("request", id))
    }

    // --- Environments ---

    /// Lists environments in display order.
    #[must_use]
    pub fn environments(&self) -> &[Environment] {
        &self.project.environments
    }

    /// Finds an environment by id.
    #[must_use]
    pub fn environment(&self, id: Uuid) -> Option<&Environment> {
        self.project.environments.iter().find(|e| e.id == id)
    }

    fn environment_mut(&mut self, id: Uuid) -> ApplicationResult<&mut Environment> {
        self.project
            .environments
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| ApplicationError::not_found("environment", id))
    }

    /// Returns the active environment, if any.
    #[must_use]
    pub fn active_environment(&self) -> Option<&Environment> {
        self.active_environment.and_then(|id| self.environment(id))
    }

    /// Returns the id of the active environment, if any.
    #[must_use]
    pub const fn active_environment_id(&self) -> Option<Uuid> {
        self.active_environment
    }

    /// Sets or clears the active environment.
    ///
    /// # Errors
    ///
    /// `NotFound` if `id` is set and no environment has it.
    pub fn set_active_environment(&mut self, id: Option<Uuid>) -> ApplicationResult<()> {
        if let Some(id) = id
            && self.environment(id).is_none()
        {
            return Err(ApplicationError::not_found("environment", id));
        }
        self.active_environment = id;
        Ok(())
    }

    /// Creates an empty environment and returns its id.
    pub fn create_environment(&mut self, name: impl Into<String>) -> Uuid {
        let environment = Environment::new(name);
        let id = environment.id;
        self.project.environments.push(environment);
        id
    }

    /// Renames an environment.
    ///
    /// # Errors
    ///
    /// `NotFound` if no environment has this id.
    pub fn rename_environment(
        &mut self,
        id: Uuid,
        name: impl Into<String>,
    ) -> ApplicationResult<()> {
        self.environment_mut(id)?.name = name.into();
        Ok(())
    }

    /// Deletes an environment.
    ///
    /// Deleting the active environment makes the first remaining one active,
    /// or clears the selection if none remain.
    ///
    /// # Errors
    ///
    /// `NotFound` if no environment has this id.
    pub fn delete_environment(&mut self, id: Uuid) -> ApplicationResult<Environment> {
        let index = self
            .project
            .environments
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| ApplicationError::not_found("environment", id))?;
        let removed = self.project.environments.remove(index);
        if self.active_environment == Some(id) {
            self.active_environment = self.project.environments.first().map(|e| e.id);
        }
        Ok(removed)
    }

    /// Inserts or overwrites a variable.
    ///
    /// # Errors
    ///
    /// `NotFound` if no environment has this id.
    pub fn set_variable(
        &mut self,
        environment_id: Uuid,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> ApplicationResult<()> {
        self.environment_mut(environment_id)?
            .set_variable(key, value);
        Ok(())
    }

    /// Removes a variable, returning whether it existed.
    ///
    /// # Errors
    ///
    /// `NotFound` if no environment has this id.
    pub fn remove_variable(&mut self, environment_id: Uuid, key: &str) -> ApplicationResult<bool> {
        Ok(self
            .environment_mut(environment_id)?
            .remove_variable(key)
            .is_some())
    }

    /// Renames a variable, overwriting `new` if it exists.
    ///
    /// # Errors
    ///
    /// `NotFound` if the environment or the `old` key does not exist.
    pub fn rename_variable(
        &mut self,
        environment_id: Uuid,
        old: &str,
        new: impl Into<String>,
    ) -> ApplicationResult<()> {
        if self.environment_mut(environment_id)?.rename_variable(old, new) {
            Ok(())
        } else {
            Err(ApplicationError::not_found("variable", old))
        }
    }

    /// Merges an imported environment by name.
    ///
    /// An existing environment with the same name keeps its position and id
    /// and takes the imported variables. Otherwise the environment is appended.
    pub fn merge_environment(&mut self, imported: Environment) -> MergeOutcome {
        if let Some(existing) = self
            .project
            .environments
            .iter_mut()
            .find(|e| e.name == imported.name)
        {
            existing.variables = imported.variables;
            MergeOutcome::Replaced(existing.id)
        } else {
            let id = imported.id;
            self.project.environments.push(imported);
            MergeOutcome::Appended(id)
        }
    }

    // --- Whole project ---

    /// Replaces all groups and environments.
    ///
    /// The active environment survives only if the new project has an
    /// environment with the same id.
    pub fn replace_project(&mut self, project: Project) {
        self.project = project;
        if let Some(id) = self.active_environment
            && self.environment(id).is_none()
        {
            self.active_environment = None;
        }
    }

    /// Resolves a request's URL against the active environment.
    ///
    /// # Errors
    ///
    /// `NotFound` if no request has this id.
    pub fn preview_url(&self, request_id: Uuid) -> ApplicationResult<ResolutionResult> {
        let request = self
            .find_request(request_id)
            .ok_or_else(|| ApplicationError::not_found("request", request_id))?;
        Ok(VariableResolver::new(self.active_environment()).resolve(&request.url))
    }
}
