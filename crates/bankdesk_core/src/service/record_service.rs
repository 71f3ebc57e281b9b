//! Generic record use-case service.
//!
//! # Responsibility
//! - Provide stable CRUD entry points for presentation callers.
//! - Implement the form "save" flow: update when a record is selected,
//!   create otherwise.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Service layer remains storage-agnostic.

use crate::model::RecordId;
use crate::repo::{RepoResult, Repository};

/// Use-case service wrapper over one entity repository.
pub struct RecordService<R: Repository> {
    repo: R,
}

impl<R: Repository> RecordService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn create(&self, input: &R::Create) -> RepoResult<RecordId> {
        self.repo.create(input)
    }

    pub fn get_by_id(&self, id: RecordId) -> RepoResult<Option<R::Record>> {
        self.repo.get_by_id(id)
    }

    pub fn get_all(&self) -> RepoResult<Vec<R::Record>> {
        self.repo.get_all()
    }

    /// Searches by `term`; a blank term lists everything.
    pub fn search(&self, term: &str) -> RepoResult<Vec<R::Record>> {
        let term = term.trim();
        if term.is_empty() {
            return self.repo.get_all();
        }
        self.repo.search(term)
    }

    /// Applies a partial update.
    ///
    /// Returns repository-level not-found or validation errors unchanged.
    pub fn update(&self, id: RecordId, changes: &R::Update) -> RepoResult<()> {
        self.repo.update(id, changes)
    }

    pub fn delete(&self, id: RecordId) -> RepoResult<()> {
        self.repo.delete(id)
    }
}

impl<R> RecordService<R>
where
    R: Repository,
    R::Create: Clone,
    R::Update: From<R::Create>,
{
    /// Saves a full form.
    ///
    /// # Contract
    /// - `current = Some(id)`: rewrites every field of `id`, returns `id`.
    /// - `current = None`: inserts a new row, returns its generated id.
    pub fn save(&self, current: Option<RecordId>, input: &R::Create) -> RepoResult<RecordId> {
        match current {
            Some(id) => {
                self.repo.update(id, &R::Update::from(input.clone()))?;
                Ok(id)
            }
            None => self.repo.create(input),
        }
    }
}
