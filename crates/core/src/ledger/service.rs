//! Permission-gated entry point to the ledger.
//!
//! The repositories know nothing about users. [`LedgerService`] checks the
//! caller's [`Principal`] before every operation and refuses with
//! [`LedgerError::PermissionDenied`] before any storage call is made.

use std::sync::Arc;

use sarraf_shared::auth::{Permission, Principal};
use tracing::warn;

use super::draft::Draft;
use super::error::LedgerError;
use super::feed::{FeedEntry, merge_feed};
use super::kind::{Bank, Hawala, TransactionKind};
use super::repository::{RecordOf, TransactionRepository};
use super::view::{ListQuery, TransactionView, build_view};
use crate::gateway::DocumentGateway;
use crate::reference::{AddOutcome, ReferenceCollection, ReferenceRecord, ReferenceRepository};

fn require(principal: &Principal, permission: Permission) -> Result<(), LedgerError> {
    if principal.has(permission) {
        Ok(())
    } else {
        warn!(user = %principal.user_id, %permission, "permission denied");
        Err(LedgerError::PermissionDenied {
            user: principal.user_id,
            permission,
        })
    }
}

/// Both transfer repositories and the reference lists over one gateway.
pub struct LedgerService<G> {
    bank: TransactionRepository<G, Bank>,
    hawala: TransactionRepository<G, Hawala>,
    banks: ReferenceRepository<G>,
    markets: ReferenceRepository<G>,
    accounts: ReferenceRepository<G>,
}

impl<G: DocumentGateway> LedgerService<G> {
    /// Wires every repository to the same gateway.
    #[must_use]
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            bank: TransactionRepository::new(Arc::clone(&gateway)),
            hawala: TransactionRepository::new(Arc::clone(&gateway)),
            banks: ReferenceRepository::new(Arc::clone(&gateway), ReferenceCollection::Banks),
            markets: ReferenceRepository::new(Arc::clone(&gateway), ReferenceCollection::Markets),
            accounts: ReferenceRepository::new(gateway, ReferenceCollection::Accounts),
        }
    }

    /// Bank transfer operations for `principal`.
    #[must_use]
    pub fn bank_transactions<'a>(&'a self, principal: &'a Principal) -> Transactions<'a, G, Bank> {
        Transactions {
            repository: &self.bank,
            principal,
        }
    }

    /// Hawala transfer operations for `principal`.
    #[must_use]
    pub fn hawala_transactions<'a>(
        &'a self,
        principal: &'a Principal,
    ) -> Transactions<'a, G, Hawala> {
        Transactions {
            repository: &self.hawala,
            principal,
        }
    }

    /// Reference list operations for `principal`.
    #[must_use]
    pub fn reference<'a>(
        &'a self,
        collection: ReferenceCollection,
        principal: &'a Principal,
    ) -> References<'a, G> {
        let repository = match collection {
            ReferenceCollection::Banks => &self.banks,
            ReferenceCollection::Markets => &self.markets,
            ReferenceCollection::Accounts => &self.accounts,
        };
        References {
            repository,
            principal,
        }
    }

    /// Dashboard feed of both kinds, most recent first.
    ///
    /// Needs the dashboard permission. Kinds the principal may not view are
    /// left out rather than refused.
    pub async fn feed(&self, principal: &Principal) -> Result<Vec<FeedEntry>, LedgerError> {
        require(principal, Permission::ViewDashboard)?;

        let bank = if principal.has(Bank::VIEW_PERMISSION) {
            self.bank.list().await?
        } else {
            Vec::new()
        };
        let hawala = if principal.has(Hawala::VIEW_PERMISSION) {
            self.hawala.list().await?
        } else {
            Vec::new()
        };
        Ok(merge_feed(bank, hawala))
    }
}

/// Transfer operations of one kind on behalf of a principal.
pub struct Transactions<'a, G, K> {
    repository: &'a TransactionRepository<G, K>,
    principal: &'a Principal,
}

impl<G: DocumentGateway, K: TransactionKind> Transactions<'_, G, K> {
    /// See [`TransactionRepository::list`].
    pub async fn list(&self) -> Result<Vec<RecordOf<K>>, LedgerError> {
        require(self.principal, K::VIEW_PERMISSION)?;
        self.repository.list().await
    }

    /// Filtered, summarized, paginated history.
    pub async fn view(&self, query: &ListQuery) -> Result<TransactionView<K::Details>, LedgerError> {
        require(self.principal, K::VIEW_PERMISSION)?;
        Ok(build_view(self.repository.list().await?, query))
    }

    /// See [`TransactionRepository::get_by_id`].
    pub async fn get_by_id(&self, id: &str) -> Result<RecordOf<K>, LedgerError> {
        require(self.principal, K::VIEW_PERMISSION)?;
        self.repository.get_by_id(id).await
    }

    /// See [`TransactionRepository::save`].
    pub async fn save(&self, draft: &Draft) -> Result<RecordOf<K>, LedgerError> {
        require(self.principal, K::MANAGE_PERMISSION)?;
        self.repository.save(draft).await
    }

    /// See [`TransactionRepository::update`].
    pub async fn update(&self, id: &str, draft: &Draft) -> Result<RecordOf<K>, LedgerError> {
        require(self.principal, K::MANAGE_PERMISSION)?;
        self.repository.update(id, draft).await
    }

    /// See [`TransactionRepository::toggle_status`].
    pub async fn toggle_status(&self, id: &str) -> Result<RecordOf<K>, LedgerError> {
        require(self.principal, K::MANAGE_PERMISSION)?;
        self.repository.toggle_status(id).await
    }

    /// See [`TransactionRepository::delete`].
    pub async fn delete(&self, id: &str) -> Result<(), LedgerError> {
        require(self.principal, K::MANAGE_PERMISSION)?;
        self.repository.delete(id).await
    }
}

/// Reference list operations on behalf of a principal.
///
/// Reading is open to any principal, since transfer forms need the names.
/// Adding and deleting need [`Permission::ManageReferenceData`].
pub struct References<'a, G> {
    repository: &'a ReferenceRepository<G>,
    principal: &'a Principal,
}

impl<G: DocumentGateway> References<'_, G> {
    /// See [`ReferenceRepository::list_all`].
    pub async fn list_all(&self) -> Result<Vec<ReferenceRecord>, LedgerError> {
        self.repository.list_all().await
    }

    /// See [`ReferenceRepository::names`].
    pub async fn names(&self) -> Result<Vec<String>, LedgerError> {
        self.repository.names().await
    }

    /// See [`ReferenceRepository::get_by_id`].
    pub async fn get_by_id(&self, id: &str) -> Result<ReferenceRecord, LedgerError> {
        self.repository.get_by_id(id).await
    }

    /// See [`ReferenceRepository::add`].
    pub async fn add(&self, name: &str) -> Result<AddOutcome, LedgerError> {
        require(self.principal, Permission::ManageReferenceData)?;
        self.repository.add(name).await
    }

    /// See [`ReferenceRepository::delete`].
    pub async fn delete(&self, id: &str) -> Result<(), LedgerError> {
        require(self.principal, Permission::ManageReferenceData)?;
        self.repository.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::{Document, GatewayError, Patch};
    use crate::ledger::feed::TransactionSource;
    use crate::ledger::types::{Currency, TransactionType};
    use crate::storage::FlatFileGateway;
    use sarraf_shared::types::UserId;

    fn service() -> LedgerService<FlatFileGateway> {
        LedgerService::new(Arc::new(FlatFileGateway::in_memory().expect("memory gateway")))
    }

    fn principal(permissions: &[Permission]) -> Principal {
        Principal::new(UserId::new(), permissions.iter().copied())
    }

    fn bank_draft() -> Draft {
        Draft::new()
            .with("amount", "10")
            .with("currency", "USD")
            .with("transactionType", "send")
            .with("bankName", "Rafidain")
    }

    fn hawala_draft() -> Draft {
        Draft::new()
            .with("amount", "10")
            .with("currency", "IQD")
            .with("transactionType", "receive")
            .with("market", "Erbil")
            .with("accountName", "Karwan")
    }

    #[tokio::test]
    async fn test_viewer_cannot_save() {
        let service = service();
        let viewer = principal(&[Permission::ViewBankTransactions]);

        let err = service
            .bank_transactions(&viewer)
            .save(&bank_draft())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LedgerError::PermissionDenied {
                permission: Permission::ManageBankTransactions,
                ..
            }
        ));
        assert!(service.bank_transactions(&viewer).list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_manager_lifecycle() {
        let service = service();
        let manager = principal(&[Permission::ManageHawalaTransactions]);
        let hawala = service.hawala_transactions(&manager);

        let saved = hawala.save(&hawala_draft()).await.unwrap();
        let id = saved.id.to_string();
        assert_eq!(hawala.get_by_id(&id).await.unwrap(), saved);
        hawala.toggle_status(&id).await.unwrap();
        hawala.update(&id, &hawala_draft().with("purpose", "family")).await.unwrap();

        let view = hawala.view(&ListQuery::default()).await.unwrap();
        assert_eq!(view.page.meta.total, 1);

        hawala.delete(&id).await.unwrap();
        assert!(hawala.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_view_survives_amounts_at_decimal_limit() {
        let service = service();
        let manager = principal(&[Permission::ManageBankTransactions]);
        let bank = service.bank_transactions(&manager);
        let draft = bank_draft().with("amount", "79228162514264337593543950335");

        let first = bank.save(&draft).await.unwrap();
        bank.save(&draft).await.unwrap();

        let query = ListQuery::on(first.calendar_date().expect("saved with a date"));
        let view = bank.view(&query).await.unwrap();
        assert_eq!(view.page.meta.total, 2);
        assert!(view.summary.is_saturated(TransactionType::Send, Currency::Usd));
        assert_eq!(
            view.summary.total(TransactionType::Send, Currency::Usd),
            rust_decimal::Decimal::MAX
        );
    }

    #[tokio::test]
    async fn test_kinds_are_gated_separately() {
        let service = service();
        let bank_only = principal(&[Permission::ManageBankTransactions]);

        assert!(service.bank_transactions(&bank_only).save(&bank_draft()).await.is_ok());
        assert!(matches!(
            service.hawala_transactions(&bank_only).list().await,
            Err(LedgerError::PermissionDenied { .. })
        ));
    }

    #[tokio::test]
    async fn test_feed_includes_only_viewable_kinds() {
        let service = service();
        let admin = principal(&Permission::ALL);
        service.bank_transactions(&admin).save(&bank_draft()).await.unwrap();
        service.hawala_transactions(&admin).save(&hawala_draft()).await.unwrap();

        assert_eq!(service.feed(&admin).await.unwrap().len(), 2);

        let dashboard_bank = principal(&[Permission::ViewDashboard, Permission::ViewBankTransactions]);
        let feed = service.feed(&dashboard_bank).await.unwrap();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].source(), TransactionSource::Bank);

        let no_dashboard = principal(&[Permission::ViewBankTransactions]);
        assert!(matches!(
            service.feed(&no_dashboard).await,
            Err(LedgerError::PermissionDenied { .. })
        ));
    }

    #[tokio::test]
    async fn test_reference_writes_need_permission() {
        let service = service();
        let clerk = principal(&[Permission::ManageBankTransactions]);
        let admin = principal(&[Permission::ManageReferenceData]);

        assert!(matches!(
            service.reference(ReferenceCollection::Banks, &clerk).add("Rafidain").await,
            Err(LedgerError::PermissionDenied { .. })
        ));
        assert!(service
            .reference(ReferenceCollection::Banks, &admin)
            .add("Rafidain")
            .await
            .unwrap()
            .is_added());
        assert_eq!(
            service.reference(ReferenceCollection::Banks, &clerk).names().await.unwrap(),
            vec!["Rafidain"]
        );
    }

    /// Gateway that fails the test if it is ever called.
    struct Untouchable;

    impl DocumentGateway for Untouchable {
        async fn list_all(&self, _: &str) -> Result<Vec<Document>, GatewayError> {
            panic!("storage must not be reached")
        }

        async fn get_by_id(&self, _: &str, _: &str) -> Result<Option<Document>, GatewayError> {
            panic!("storage must not be reached")
        }

        async fn insert(&self, _: &str, _: Document) -> Result<(), GatewayError> {
            panic!("storage must not be reached")
        }

        async fn update(
            &self,
            _: &str,
            _: &str,
            _: Patch,
        ) -> Result<Option<Document>, GatewayError> {
            panic!("storage must not be reached")
        }

        async fn delete_by_id(&self, _: &str, _: &str) -> Result<(), GatewayError> {
            panic!("storage must not be reached")
        }
    }

    #[tokio::test]
    async fn test_denied_before_storage() {
        let service = LedgerService::new(Arc::new(Untouchable));
        let nobody = principal(&[]);
        let bank = service.bank_transactions(&nobody);

        assert!(bank.list().await.is_err());
        assert!(bank.get_by_id("x").await.is_err());
        assert!(bank.save(&bank_draft()).await.is_err());
        assert!(bank.update("x", &bank_draft()).await.is_err());
        assert!(bank.toggle_status("x").await.is_err());
        assert!(bank.delete("x").await.is_err());
        assert!(service.feed(&nobody).await.is_err());
        assert!(service
            .reference(ReferenceCollection::Markets, &nobody)
            .delete("x")
            .await
            .is_err());
    }
}
