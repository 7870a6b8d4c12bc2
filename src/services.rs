//! The effects layer: performs the network and cache I/O for each user action
//! and returns the new [ExpenseState].
//!
//! The caller owns the state. Each operation takes the current state and, on
//! success, returns the state to use next. On failure the caller keeps the
//! state it already has.
//!
//! The remote service, the local cache and the state are not updated
//! atomically. The remote service is treated as the source of truth: a failed
//! cache write after a successful remote call is logged and otherwise ignored,
//! and the next [ExpenseService::load_all] brings the cache back in line.

use crate::{
    Error,
    aggregation::{Summary, aggregate},
    draft::{ExpenseDraft, ValidationError, validate},
    expense::{Expense, ExpenseId},
    remote::ExpenseApi,
    state::{Action, ExpenseState},
    stores::{ExpenseCache, KeyValueStore},
};

/// Where the expense list returned by [ExpenseService::load_all] came from.
#[derive(Debug, PartialEq)]
pub enum DataSource {
    /// Freshly fetched from the REST service.
    Remote,
    /// Read from the local cache because the REST service failed with the
    /// contained error. The list may be out of date.
    Cache(Error),
}

/// The result of [ExpenseService::load_all].
#[derive(Debug, PartialEq)]
pub struct Loaded {
    /// The state holding the loaded expenses.
    pub state: ExpenseState,
    /// Where the expenses came from.
    pub source: DataSource,
}

/// Whether [ExpenseService::save_or_update] created or updated an expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveKind {
    /// A new expense was added.
    Created,
    /// An existing expense was replaced.
    Updated,
}

/// The result of [ExpenseService::save_or_update].
#[derive(Debug, Clone, PartialEq)]
pub struct Saved {
    /// The state including the saved expense.
    pub state: ExpenseState,
    /// The expense as stored by the REST service.
    pub expense: Expense,
    /// Whether the expense was created or updated.
    pub kind: SaveKind,
}

/// Runs user actions against the REST service `A` and the local cache backed
/// by `S`.
#[derive(Debug)]
pub struct ExpenseService<A, S> {
    api: A,
    cache: ExpenseCache<S>,
}

impl<A, S> ExpenseService<A, S>
where
    A: ExpenseApi,
    S: KeyValueStore,
{
    /// Create a service that uses `api` for the REST service and `cache` as
    /// the local mirror.
    pub fn new(api: A, cache: ExpenseCache<S>) -> Self {
        Self { api, cache }
    }

    /// The REST client.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// The local cache.
    pub fn cache(&self) -> &ExpenseCache<S> {
        &self.cache
    }

    /// Fetch the full expense list and replace the state with it.
    ///
    /// If the REST service fails, the cached list is used instead and the
    /// failure is reported in [Loaded::source].
    ///
    /// # Errors
    /// Returns the REST service's error if the cache cannot be read either.
    pub async fn load_all(&self, state: &ExpenseState) -> Result<Loaded, Error> {
        match self.api.list().await {
            Ok(expenses) => {
                self.mirror(|cache| cache.replace_all(&expenses));
                tracing::info!("Loaded {} expenses", expenses.len());

                Ok(Loaded {
                    state: state.reduce(Action::Set(expenses)),
                    source: DataSource::Remote,
                })
            }
            Err(remote_error) => {
                tracing::warn!("Could not fetch expenses, falling back to cache: {remote_error}");

                match self.cache.load() {
                    Ok(expenses) => Ok(Loaded {
                        state: state.reduce(Action::Set(expenses)),
                        source: DataSource::Cache(remote_error),
                    }),
                    Err(cache_error) => {
                        tracing::error!("Could not read cached expenses: {cache_error}");
                        Err(remote_error)
                    }
                }
            }
        }
    }

    /// Validate `draft` and save it, creating a new expense or, if the draft
    /// has an ID, replacing the existing one.
    ///
    /// Validation happens before any I/O, so an invalid draft sends nothing.
    ///
    /// # Errors
    /// Returns an [Error::Validation] for invalid input, an
    /// [Error::NotFound] when updating an expense the service does not have,
    /// or an [Error::Network] if the service could not be reached.
    pub async fn save_or_update(
        &self,
        state: &ExpenseState,
        draft: &ExpenseDraft,
    ) -> Result<Saved, Error> {
        let expense = validate(draft)?;

        if draft.is_edit() {
            let updated = self.api.update(&expense.id, &expense).await?;
            self.mirror(|cache| cache.replace(&updated));
            tracing::info!("Updated expense {}", updated.id);

            Ok(Saved {
                state: state.reduce(Action::Update(updated.clone())),
                expense: updated,
                kind: SaveKind::Updated,
            })
        } else {
            let created = self.api.create(&expense).await?;
            self.mirror(|cache| cache.append(&created));
            tracing::info!("Created expense {}", created.id);

            Ok(Saved {
                state: state.reduce(Action::Add(created.clone())),
                expense: created,
                kind: SaveKind::Created,
            })
        }
    }

    /// Delete the expense `id`.
    ///
    /// # Errors
    /// Returns an [Error::NotFound] if the service does not have the expense,
    /// or an [Error::Network] if the service could not be reached.
    pub async fn delete(&self, state: &ExpenseState, id: &ExpenseId) -> Result<ExpenseState, Error> {
        self.api.delete(id).await?;
        self.mirror(|cache| cache.remove(id));
        tracing::info!("Deleted expense {id}");

        Ok(state.reduce(Action::Remove(id.clone())))
    }

    /// Summarise the expenses in `state` between `start` and `end` inclusive.
    ///
    /// # Errors
    /// Returns [ValidationError::InvalidDate] if either date is malformed.
    pub fn filter_by_range(
        &self,
        state: &ExpenseState,
        start: &str,
        end: &str,
    ) -> Result<Summary, ValidationError> {
        aggregate(state.expenses(), start, end)
    }

    fn mirror(&self, write: impl FnOnce(&ExpenseCache<S>) -> Result<(), Error>) {
        if let Err(error) = write(&self.cache) {
            tracing::warn!("Could not update the local expense cache: {error}");
        }
    }
}
