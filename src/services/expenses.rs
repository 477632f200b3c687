use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    domain::{
        form::ExpenseDraft,
        models::{ExpenseId, ExpenseRecord},
    },
    infrastructure::state::AppState,
};

use super::errors::{ServiceError, DELETE_FAILED, SAVE_FAILED};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitTarget {
    Create,
    Update(ExpenseId),
}

/// Create, edit and delete flows behind the manage-expense form.
pub struct ExpenseService {
    pub state: Arc<AppState>,
}

impl ExpenseService {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Opens a blank form, or one seeded from the book when editing.
    pub fn open_form(&self, editing: Option<&ExpenseId>) -> Result<ExpenseDraft, ServiceError> {
        let Some(id) = editing else {
            return Ok(ExpenseDraft::default());
        };
        let book = self.state.book.read();
        let record = book.find(id).ok_or(ServiceError::NotFound)?;
        Ok(ExpenseDraft::new(Some(record)))
    }

    pub async fn submit(
        &self,
        mut draft: ExpenseDraft,
        target: SubmitTarget,
    ) -> Result<ExpenseRecord, ServiceError> {
        if let SubmitTarget::Update(id) = &target {
            if self.state.book.read().find(id).is_none() {
                return Err(ServiceError::NotFound);
            }
        }

        let Some(data) = draft.submit() else {
            return Err(ServiceError::Invalid(Box::new(draft)));
        };

        match target {
            SubmitTarget::Create => {
                let id = self.state.store.store_expense(&data).await.map_err(|err| {
                    warn!(error = %err, "failed to store expense");
                    ServiceError::Store(SAVE_FAILED)
                })?;
                let record = data.into_record(id);
                info!(id = %record.id, "expense created");
                self.state.book.write().add_expense(record.clone());
                Ok(record)
            }
            SubmitTarget::Update(id) => {
                self.state
                    .store
                    .update_expense(&id, &data)
                    .await
                    .map_err(|err| {
                        warn!(error = %err, %id, "failed to update expense");
                        ServiceError::Store(SAVE_FAILED)
                    })?;
                let record = data.clone().into_record(id.clone());
                if self.state.book.write().update_expense(&id, data) {
                    info!(%id, "expense updated");
                } else {
                    warn!(%id, "expense updated remotely but no longer in the local list");
                }
                Ok(record)
            }
        }
    }

    pub async fn delete(&self, id: &ExpenseId) -> Result<(), ServiceError> {
        self.state.store.delete_expense(id).await.map_err(|err| {
            warn!(error = %err, %id, "failed to delete expense");
            ServiceError::Store(DELETE_FAILED)
        })?;
        self.state.book.write().delete_expense(id);
        info!(%id, "expense deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{OnceLock, Weak};

    use super::*;
    use crate::{
        domain::{
            form::{FieldId, FieldPhase},
            models::ExpenseData,
        },
        infrastructure::{
            config::Config,
            store::{MemoryStore, RemoteStore, StoreError},
        },
    };
    use async_trait::async_trait;
    use chrono::NaiveDate;

    /// Drops the entry from the local book while its remote update is in flight.
    #[derive(Default)]
    struct LocalDeleteDuringUpdate {
        inner: MemoryStore,
        state: OnceLock<Weak<AppState>>,
    }

    #[async_trait]
    impl RemoteStore for LocalDeleteDuringUpdate {
        async fn fetch_expenses(&self) -> Result<Vec<ExpenseRecord>, StoreError> {
            self.inner.fetch_expenses().await
        }

        async fn store_expense(&self, data: &ExpenseData) -> Result<ExpenseId, StoreError> {
            self.inner.store_expense(data).await
        }

        async fn update_expense(&self, id: &ExpenseId, data: &ExpenseData) -> Result<(), StoreError> {
            if let Some(state) = self.state.get().and_then(Weak::upgrade) {
                state.book.write().delete_expense(id);
            }
            self.inner.update_expense(id, data).await
        }

        async fn delete_expense(&self, id: &ExpenseId) -> Result<(), StoreError> {
            self.inner.delete_expense(id).await
        }
    }

    fn service() -> (ExpenseService, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::default());
        let state = Arc::new(AppState::new(
            Arc::new(Config::default()),
            Arc::clone(&store) as Arc<dyn RemoteStore>,
        ));
        (ExpenseService::new(state), store)
    }

    #[tokio::test]
    async fn create_stores_remotely_then_prepends_to_book() {
        let (service, store) = service();
        let draft = ExpenseDraft::from_inputs("12.5", "2023-06-01", "Lunch");

        let record = service.submit(draft, SubmitTarget::Create).await.unwrap();

        assert_eq!(record.amount, 12.5);
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2023, 6, 1).unwrap());
        let remote = store.fetch_expenses().await.unwrap();
        assert_eq!(remote, vec![record.clone()]);
        assert_eq!(service.state.book.read().expenses(), &[record]);
    }

    #[tokio::test]
    async fn invalid_draft_is_returned_without_side_effects() {
        let (service, store) = service();
        let draft = ExpenseDraft::from_inputs("-5", "2023-06-01", "Lunch");

        let err = service.submit(draft, SubmitTarget::Create).await.unwrap_err();

        let ServiceError::Invalid(draft) = err else {
            panic!("expected invalid draft");
        };
        assert_eq!(draft.amount.phase, FieldPhase::Validated { valid: false });
        assert_eq!(draft.amount.value, "-5");
        assert!(store.fetch_expenses().await.unwrap().is_empty());
        assert!(service.state.book.read().expenses().is_empty());
    }

    #[tokio::test]
    async fn edit_flow_seeds_form_and_updates_both_sides() {
        let (service, store) = service();
        let created = service
            .submit(
                ExpenseDraft::from_inputs("3", "2023-06-01", "Coffee"),
                SubmitTarget::Create,
            )
            .await
            .unwrap();

        let mut draft = service.open_form(Some(&created.id)).unwrap();
        assert_eq!(draft.amount.value, "3");
        draft.input_changed(FieldId::Amount, "4.25");

        let updated = service
            .submit(draft, SubmitTarget::Update(created.id.clone()))
            .await
            .unwrap();

        assert_eq!(updated.amount, 4.25);
        assert_eq!(store.fetch_expenses().await.unwrap()[0].amount, 4.25);
        assert_eq!(service.state.book.read().expenses()[0].amount, 4.25);
    }

    #[tokio::test]
    async fn editing_unknown_expense_is_not_found() {
        let (service, _) = service();
        let id = ExpenseId::new("ghost");

        assert!(matches!(service.open_form(Some(&id)), Err(ServiceError::NotFound)));
        let err = service
            .submit(
                ExpenseDraft::from_inputs("1", "2023-06-01", "x"),
                SubmitTarget::Update(id),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound));
    }

    #[tokio::test]
    async fn delete_removes_from_store_and_book() {
        let (service, store) = service();
        let created = service
            .submit(
                ExpenseDraft::from_inputs("3", "2023-06-01", "Coffee"),
                SubmitTarget::Create,
            )
            .await
            .unwrap();

        service.delete(&created.id).await.unwrap();

        assert!(store.fetch_expenses().await.unwrap().is_empty());
        assert!(service.state.book.read().expenses().is_empty());
    }

    #[tokio::test]
    async fn update_that_lands_after_local_delete_reports_saved_record() {
        let store = Arc::new(LocalDeleteDuringUpdate::default());
        let state = Arc::new(AppState::new(
            Arc::new(Config::default()),
            Arc::clone(&store) as Arc<dyn RemoteStore>,
        ));
        store.state.get_or_init(|| Arc::downgrade(&state));
        let service = ExpenseService::new(state);
        let created = service
            .submit(
                ExpenseDraft::from_inputs("3", "2023-06-01", "Coffee"),
                SubmitTarget::Create,
            )
            .await
            .unwrap();

        let updated = service
            .submit(
                ExpenseDraft::from_inputs("8", "2023-06-01", "Coffee beans"),
                SubmitTarget::Update(created.id.clone()),
            )
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.amount, 8.0);
        assert_eq!(store.fetch_expenses().await.unwrap(), vec![updated]);
        assert!(service.state.book.read().expenses().is_empty());
    }
}
