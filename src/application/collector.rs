//! Wiring for one session against a workspace

use crate::application::{
    DeleteEntryService, FormState, LiveList, Notifier, SubmitEntryService,
};
use crate::error::Result;
use crate::infrastructure::{Config, EntryRepository, Workspace};

/// Configuration, repository and notifier for an opened workspace
pub struct Collector {
    workspace: Workspace,
    config: Config,
    repository: EntryRepository,
    notifier: Notifier,
}

impl Collector {
    /// Load the workspace config (with environment overrides), connect the
    /// store and sign in
    pub async fn open(workspace: Workspace) -> Result<Self> {
        let config = workspace.load_config()?.with_env_overrides();
        let repository = EntryRepository::connect(&config, &workspace).await?;
        Ok(Self::with_repository(workspace, config, repository))
    }

    pub fn with_repository(
        workspace: Workspace,
        config: Config,
        repository: EntryRepository,
    ) -> Self {
        let notifier = Notifier::new(config.notification_delay());
        Collector {
            workspace,
            config,
            repository,
            notifier,
        }
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn repository(&self) -> &EntryRepository {
        &self.repository
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Empty form using the configured default grade and image ceiling
    pub fn new_form(&self) -> FormState {
        FormState::from_config(&self.config)
    }

    pub fn submit_service(&self) -> SubmitEntryService {
        SubmitEntryService::new(self.repository.clone(), self.notifier.clone())
    }

    pub fn delete_service(&self) -> DeleteEntryService {
        DeleteEntryService::new(self.repository.clone(), self.notifier.clone())
    }

    /// Subscribe to the collection and mirror it locally
    pub fn follow(&self) -> LiveList {
        LiveList::follow(self.repository.subscribe())
    }

    pub async fn close(self) -> Result<()> {
        self.repository.close().await
    }
}
