use crate::config::StoreConfig;
use crate::domain::application::Application;
use crate::domain::contract::{Contract, ContractStatus};
use crate::domain::delivery::Delivery;
use crate::domain::event::Event;
use crate::domain::notification::Notification;
use crate::domain::ports::{
    ApplicationStore, ContractStore, DeliveryStore, EventStore, NotificationSink,
    TransactionStore,
};
use crate::domain::transaction::{TransactionRecord, TransactionStatus};
use crate::error::{Result, SweepError};
use crate::interfaces::json::seed_reader::SeedTarget;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rocksdb::{ColumnFamilyDescriptor, DB, Options};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::warn;

/// Column Family per collection, JSON documents keyed by id.
pub const CF_EVENTS: &str = "events";
pub const CF_CONTRACTS: &str = "contracts";
pub const CF_APPLICATIONS: &str = "applications";
pub const CF_TRANSACTIONS: &str = "transactions";
pub const CF_DELIVERIES: &str = "deliveries";
pub const CF_NOTIFICATIONS: &str = "notifications";

const ALL_CFS: &[&str] = &[
    CF_EVENTS,
    CF_CONTRACTS,
    CF_APPLICATIONS,
    CF_TRANSACTIONS,
    CF_DELIVERIES,
    CF_NOTIFICATIONS,
];

/// A persistent document store backed by RocksDB.
///
/// Stands in for the hosted document store when running locally or under
/// cron: one column family per collection, JSON values, document id as key.
/// Thread-safe; `Clone` shares the underlying `Arc<DB>`.
#[derive(Clone)]
pub struct RocksDbStore {
    db: Arc<DB>,
}

impl RocksDbStore {
    /// Opens or creates the database described by `config`, ensuring every
    /// collection's column family exists. Failure here is the one fatal error
    /// of a sweep invocation.
    pub fn open(config: &StoreConfig) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let descriptors = ALL_CFS
            .iter()
            .map(|name| ColumnFamilyDescriptor::new(*name, Options::default()))
            .collect::<Vec<_>>();

        let db = DB::open_cf_descriptors(&opts, &config.db_path, descriptors)?;

        Ok(Self { db: Arc::new(db) })
    }

    fn cf(&self, name: &'static str) -> Result<&rocksdb::ColumnFamily> {
        self.db.cf_handle(name).ok_or_else(|| {
            SweepError::Internal(Box::new(std::io::Error::other(format!(
                "{name} column family not found"
            ))))
        })
    }

    fn put_doc<T: Serialize>(&self, collection: &'static str, id: &str, doc: &T) -> Result<()> {
        let cf = self.cf(collection)?;
        let value = serde_json::to_vec(doc).map_err(|source| SweepError::MalformedDocument {
            collection,
            id: id.to_string(),
            source,
        })?;
        self.db.put_cf(cf, id.as_bytes(), value)?;
        Ok(())
    }

    fn get_doc<T: DeserializeOwned>(
        &self,
        collection: &'static str,
        id: &str,
    ) -> Result<Option<T>> {
        let cf = self.cf(collection)?;
        match self.db.get_cf(cf, id.as_bytes())? {
            Some(bytes) => {
                let doc = serde_json::from_slice(&bytes).map_err(|source| {
                    SweepError::MalformedDocument {
                        collection,
                        id: id.to_string(),
                        source,
                    }
                })?;
                Ok(Some(doc))
            }
            None => Ok(None),
        }
    }

    /// Full collection scan. Malformed documents are logged and skipped so one
    /// bad write from another producer cannot wedge the whole sweep.
    fn scan<T: DeserializeOwned>(&self, collection: &'static str) -> Result<Vec<T>> {
        let cf = self.cf(collection)?;
        let mut docs = Vec::new();
        for item in self.db.iterator_cf(cf, rocksdb::IteratorMode::Start) {
            let (key, value) = item?;
            match serde_json::from_slice(&value) {
                Ok(doc) => docs.push(doc),
                Err(e) => {
                    let id = String::from_utf8_lossy(&key);
                    warn!(collection, id = %id, error = %e, "skipping malformed document");
                }
            }
        }
        Ok(docs)
    }
}

#[async_trait]
impl EventStore for RocksDbStore {
    async fn all(&self) -> Result<Vec<Event>> {
        self.scan(CF_EVENTS)
    }

    async fn get(&self, event_id: &str) -> Result<Option<Event>> {
        self.get_doc(CF_EVENTS, event_id)
    }

    async fn delete(&self, event_id: &str) -> Result<()> {
        let cf = self.cf(CF_EVENTS)?;
        self.db.delete_cf(cf, event_id.as_bytes())?;
        Ok(())
    }
}

#[async_trait]
impl ContractStore for RocksDbStore {
    async fn all(&self) -> Result<Vec<Contract>> {
        self.scan(CF_CONTRACTS)
    }

    async fn for_event(&self, event_id: &str) -> Result<Vec<Contract>> {
        let mut contracts: Vec<Contract> = self.scan(CF_CONTRACTS)?;
        contracts.retain(|c| c.event_id.as_deref() == Some(event_id));
        Ok(contracts)
    }

    async fn set_status(
        &self,
        contract_id: &str,
        status: ContractStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<()> {
        let mut contract: Contract = self
            .get_doc(CF_CONTRACTS, contract_id)?
            .ok_or_else(|| SweepError::NotFound {
                collection: CF_CONTRACTS,
                id: contract_id.to_string(),
            })?;
        contract.status = status;
        contract.updated_at = Some(updated_at);
        self.put_doc(CF_CONTRACTS, contract_id, &contract)
    }
}

#[async_trait]
impl ApplicationStore for RocksDbStore {
    async fn for_event(&self, event_id: &str) -> Result<Vec<Application>> {
        let mut applications: Vec<Application> = self.scan(CF_APPLICATIONS)?;
        applications.retain(|a| a.event_id.as_deref() == Some(event_id));
        Ok(applications)
    }
}

#[async_trait]
impl TransactionStore for RocksDbStore {
    async fn any_for_contract(
        &self,
        contract_id: &str,
        statuses: &[TransactionStatus],
    ) -> Result<bool> {
        let transactions: Vec<TransactionRecord> = self.scan(CF_TRANSACTIONS)?;
        Ok(transactions
            .iter()
            .any(|t| t.contract_id.as_deref() == Some(contract_id) && statuses.contains(&t.status)))
    }
}

#[async_trait]
impl DeliveryStore for RocksDbStore {
    async fn any_for_contract(&self, contract_id: &str) -> Result<bool> {
        let deliveries: Vec<Delivery> = self.scan(CF_DELIVERIES)?;
        Ok(deliveries
            .iter()
            .any(|d| d.contract_id.as_deref() == Some(contract_id)))
    }
}

#[async_trait]
impl NotificationSink for RocksDbStore {
    async fn push(&self, notification: Notification) -> Result<()> {
        self.put_doc(CF_NOTIFICATIONS, &notification.id, &notification)
    }
}

#[async_trait]
impl SeedTarget for RocksDbStore {
    async fn put_event(&self, event: Event) -> Result<()> {
        self.put_doc(CF_EVENTS, &event.id, &event)
    }

    async fn put_contract(&self, contract: Contract) -> Result<()> {
        self.put_doc(CF_CONTRACTS, &contract.id, &contract)
    }

    async fn put_application(&self, application: Application) -> Result<()> {
        self.put_doc(CF_APPLICATIONS, &application.id, &application)
    }

    async fn put_transaction(&self, tx: TransactionRecord) -> Result<()> {
        self.put_doc(CF_TRANSACTIONS, &tx.id, &tx)
    }

    async fn put_delivery(&self, delivery: Delivery) -> Result<()> {
        self.put_doc(CF_DELIVERIES, &delivery.id, &delivery)
    }
}
