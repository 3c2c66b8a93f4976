//! Postline - REST client composition root
//!
//! [`App`] ties the project store, the request controller, and the
//! Postman/project codecs together behind the operations a UI calls.
//! Every import and load decodes fully before touching the store, so a
//! failed call leaves the project exactly as it was.

pub mod cli;
pub mod error;
pub mod logging;

use std::path::Path;
use std::sync::Arc;

use tokio::sync::mpsc;
use uuid::Uuid;

use postline_application::{
    ApplicationError, HttpClient, MergeOutcome, ProjectStore, RequestController, RequestEvent,
    ResolutionResult,
};
use postline_domain::{
    ClientSettings, Environment, Group, Project, Request, RequestState, Response,
};
use postline_infrastructure::persistence::{self, ProjectFileError};
use postline_infrastructure::postman::{self, ImportWarning, PostmanDocument, WarningStats};
use postline_infrastructure::{ReqwestHttpClient, SerializationError};

pub use cli::CliArgs;
pub use error::{AppError, AppResult};
pub use logging::init_tracing;

/// What an import added to the project.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImportSummary {
    /// Ids of the groups appended, in order
    pub groups: Vec<Uuid>,
    /// Number of requests across the appended groups
    pub requests: usize,
    /// Where an imported environment ended up
    pub environment: Option<MergeOutcome>,
    /// Lossy-mapping notes
    pub warnings: Vec<ImportWarning>,
}

/// The application facade.
pub struct App<C: HttpClient> {
    store: ProjectStore,
    controller: RequestController<C>,
    settings: ClientSettings,
}

impl App<ReqwestHttpClient> {
    /// Creates an app backed by the reqwest transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_settings(settings: ClientSettings, store: ProjectStore) -> AppResult<Self> {
        let client = ReqwestHttpClient::new(&settings)
            .map_err(|e| ApplicationError::Http(e.to_string()))?;
        Ok(Self::new(Arc::new(client), settings, store))
    }
}

impl<C: HttpClient> App<C> {
    /// Creates an app over any `HttpClient`.
    pub fn new(client: Arc<C>, settings: ClientSettings, store: ProjectStore) -> Self {
        Self {
            store,
            controller: RequestController::new(client),
            settings,
        }
    }

    /// Returns the project store.
    #[must_use]
    pub const fn store(&self) -> &ProjectStore {
        &self.store
    }

    /// Returns the project store for editing operations not wrapped here.
    pub const fn store_mut(&mut self) -> &mut ProjectStore {
        &mut self.store
    }

    /// Returns the active settings.
    #[must_use]
    pub const fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    // --- Groups and requests ---

    /// Lists groups in display order.
    #[must_use]
    pub fn list_groups(&self) -> &[Group] {
        self.store.groups()
    }

    /// Creates an empty group.
    pub fn create_group(&mut self, name: impl Into<String>) -> Uuid {
        self.store.create_group(name)
    }

    /// Deletes a group and its requests.
    ///
    /// # Errors
    ///
    /// `NotFound` if no group has this id.
    pub fn delete_group(&mut self, id: Uuid) -> AppResult<Group> {
        Ok(self.store.delete_group(id)?)
    }

    /// Adds a copy of `template` to a group under fresh ids.
    ///
    /// # Errors
    ///
    /// `NotFound` if no group has this id.
    pub fn create_request(&mut self, group_id: Uuid, template: &Request) -> AppResult<Uuid> {
        Ok(self.store.create_request(group_id, template)?)
    }

    /// Replaces the stored request with the same id.
    ///
    /// # Errors
    ///
    /// `NotFound` if no request has this id.
    pub fn update_request(&mut self, request: Request) -> AppResult<()> {
        Ok(self.store.update_request(request)?)
    }

    /// Deletes a request.
    ///
    /// # Errors
    ///
    /// `NotFound` if no request has this id.
    pub fn delete_request(&mut self, id: Uuid) -> AppResult<Request> {
        Ok(self.store.delete_request(id)?)
    }

    // --- Environments ---

    /// Lists environments in display order.
    #[must_use]
    pub fn list_environments(&self) -> &[Environment] {
        self.store.environments()
    }

    /// Returns the active environment.
    #[must_use]
    pub fn active_environment(&self) -> Option<&Environment> {
        self.store.active_environment()
    }

    /// Sets or clears the active environment.
    ///
    /// # Errors
    ///
    /// `NotFound` if `id` names no environment.
    pub fn set_active_environment(&mut self, id: Option<Uuid>) -> AppResult<()> {
        Ok(self.store.set_active_environment(id)?)
    }

    // --- Execution ---

    /// Returns a receiver for every execution event from now on.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<RequestEvent> {
        self.controller.subscribe()
    }

    /// Sends a stored request with the active environment.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown request, `Busy` while another request is
    /// in flight.
    pub fn send(&mut self, request_id: Uuid) -> AppResult<RequestEvent> {
        let request = self
            .store
            .find_request(request_id)
            .ok_or_else(|| ApplicationError::not_found("request", request_id))?;
        let environment = self.store.active_environment();
        Ok(self.controller.send(request, environment)?)
    }

    /// Cancels the in-flight execution of `request_id`.
    ///
    /// Returns false if that request is not in flight.
    pub fn cancel(&mut self, request_id: Uuid) -> bool {
        self.controller.cancel(request_id)
    }

    /// Waits for the in-flight execution to finish and applies it.
    ///
    /// Returns `None` when nothing is in flight.
    pub async fn next_event(&mut self) -> Option<RequestEvent> {
        self.controller.next_completion().await
    }

    /// Returns the execution state.
    #[must_use]
    pub const fn request_state(&self) -> &RequestState {
        self.controller.state()
    }

    /// Returns the latest response.
    #[must_use]
    pub const fn current_response(&self) -> Option<&Response> {
        self.controller.current_response()
    }

    /// Returns the id of the request in flight.
    #[must_use]
    pub fn in_flight_request(&self) -> Option<Uuid> {
        self.controller.in_flight_request()
    }

    /// Resolves a request's URL against the active environment.
    ///
    /// # Errors
    ///
    /// `NotFound` if no request has this id.
    pub fn preview_url(&self, request_id: Uuid) -> AppResult<ResolutionResult> {
        Ok(self.store.preview_url(request_id)?)
    }

    // --- Postman ---

    /// Imports a Postman collection, appending its groups.
    ///
    /// # Errors
    ///
    /// `Decode` if the bytes are not a valid collection; nothing is added.
    pub fn import_postman_collection(&mut self, bytes: &[u8]) -> AppResult<ImportSummary> {
        let imported =
            postman::import_collection(bytes).map_err(|e| AppError::Decode(e.to_string()))?;
        Ok(self.apply_collection(imported))
    }

    /// Exports every group as a Postman collection.
    ///
    /// # Errors
    ///
    /// `Encode` if serialization fails.
    pub fn export_postman_collection(&self) -> AppResult<Vec<u8>> {
        let bytes = postman::export_collection(self.store.groups(), &self.settings.export_name())
            .map_err(encode_error)?;
        tracing::info!(
            groups = self.store.groups().len(),
            requests = self.store.project().request_count(),
            "Exported Postman collection"
        );
        Ok(bytes)
    }

    /// Imports a Postman environment, merging it by name.
    ///
    /// # Errors
    ///
    /// `Decode` if the bytes are not a valid environment; nothing changes.
    pub fn import_environment(&mut self, bytes: &[u8]) -> AppResult<ImportSummary> {
        let imported =
            postman::import_environment(bytes).map_err(|e| AppError::Decode(e.to_string()))?;
        Ok(self.apply_environment(imported))
    }

    /// Exports one environment as a Postman environment file.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown environment, `Encode` if serialization fails.
    pub fn export_environment(&self, id: Uuid) -> AppResult<Vec<u8>> {
        let environment = self
            .store
            .environment(id)
            .ok_or_else(|| ApplicationError::not_found("environment", id))?;
        postman::export_environment(environment, &self.settings.product_name).map_err(encode_error)
    }

    /// Imports either a collection or an environment, detected from the
    /// document itself.
    ///
    /// # Errors
    ///
    /// `Decode` if the document is malformed or of an unknown kind.
    pub fn import_postman(&mut self, bytes: &[u8]) -> AppResult<ImportSummary> {
        match postman::parse_document(bytes).map_err(|e| AppError::Decode(e.to_string()))? {
            PostmanDocument::Collection(collection) => {
                Ok(self.apply_collection(postman::from_postman(&collection)))
            }
            PostmanDocument::Environment(environment) => {
                Ok(self.apply_environment(postman::environment_from_postman(&environment)))
            }
        }
    }

    fn apply_collection(&mut self, imported: postman::CollectionImport) -> ImportSummary {
        let requests = imported.request_count();
        let groups: Vec<Uuid> = imported.groups.iter().map(|g| g.id).collect();
        log_import(&imported.name, &imported.warnings);
        self.store.append_groups(imported.groups);
        ImportSummary {
            groups,
            requests,
            environment: None,
            warnings: imported.warnings,
        }
    }

    fn apply_environment(&mut self, imported: postman::EnvironmentImport) -> ImportSummary {
        log_import(&imported.environment.name, &imported.warnings);
        let outcome = self.store.merge_environment(imported.environment);
        ImportSummary {
            environment: Some(outcome),
            warnings: imported.warnings,
            ..ImportSummary::default()
        }
    }

    // --- Project ---

    /// Encodes the whole project.
    ///
    /// # Errors
    ///
    /// `Encode` if serialization fails.
    pub fn save_project(&self) -> AppResult<Vec<u8>> {
        persistence::save_project(self.store.project()).map_err(encode_error)
    }

    /// Replaces the project with decoded bytes.
    ///
    /// The active environment is kept only if the loaded project contains it.
    /// An in-flight request is not affected.
    ///
    /// # Errors
    ///
    /// `Decode` if the bytes are not a valid project; the current project is
    /// left untouched.
    pub fn load_project(&mut self, bytes: &[u8]) -> AppResult<()> {
        let project =
            persistence::load_project(bytes).map_err(|e| AppError::Decode(e.to_string()))?;
        self.replace_project(project);
        Ok(())
    }

    /// Writes the project to a file.
    ///
    /// # Errors
    ///
    /// `Encode` or `Storage` on failure.
    pub async fn save_project_to(&self, path: &Path) -> AppResult<()> {
        persistence::write_project_file(path, self.store.project())
            .await
            .map_err(|e| match e {
                ProjectFileError::Serialization(e) => encode_error(e),
                other => AppError::Storage(other.to_string()),
            })
    }

    /// Replaces the project with the contents of a file.
    ///
    /// # Errors
    ///
    /// `Decode` or `Storage` on failure; the current project is left
    /// untouched.
    pub async fn load_project_from(&mut self, path: &Path) -> AppResult<()> {
        let project = persistence::read_project_file(path)
            .await
            .map_err(|e| match e {
                ProjectFileError::Serialization(e) => AppError::Decode(e.to_string()),
                other => AppError::Storage(other.to_string()),
            })?;
        self.replace_project(project);
        Ok(())
    }

    fn replace_project(&mut self, project: Project) {
        tracing::info!(
            groups = project.groups.len(),
            environments = project.environments.len(),
            "Project replaced"
        );
        self.store.replace_project(project);
    }
}

#[allow(clippy::needless_pass_by_value)]
fn encode_error(error: SerializationError) -> AppError {
    AppError::Encode(error.to_string())
}

fn log_import(name: &str, warnings: &[ImportWarning]) {
    let stats = WarningStats::from_warnings(warnings);
    tracing::info!(
        name,
        info = stats.info_count,
        warnings = stats.warning_count,
        "Imported Postman document"
    );
    for warning in warnings {
        tracing::debug!(%warning, "Import note");
    }
}
