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
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory document store backing every collection.
///
/// `Clone` shares the underlying maps, so one instance can be handed to each
/// store port and to test assertions at the same time. Ideal for tests and
/// dry runs where persistence is not required.
#[derive(Default, Clone)]
pub struct InMemoryStore {
    events: Arc<RwLock<HashMap<String, Event>>>,
    contracts: Arc<RwLock<HashMap<String, Contract>>>,
    applications: Arc<RwLock<HashMap<String, Application>>>,
    transactions: Arc<RwLock<HashMap<String, TransactionRecord>>>,
    deliveries: Arc<RwLock<HashMap<String, Delivery>>>,
    notifications: Arc<RwLock<Vec<Notification>>>,
}

impl InMemoryStore {
    /// Creates a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn put_event(&self, event: Event) {
        self.events.write().await.insert(event.id.clone(), event);
    }

    pub async fn put_contract(&self, contract: Contract) {
        self.contracts
            .write()
            .await
            .insert(contract.id.clone(), contract);
    }

    pub async fn put_application(&self, application: Application) {
        self.applications
            .write()
            .await
            .insert(application.id.clone(), application);
    }

    pub async fn put_transaction(&self, tx: TransactionRecord) {
        self.transactions.write().await.insert(tx.id.clone(), tx);
    }

    pub async fn put_delivery(&self, delivery: Delivery) {
        self.deliveries
            .write()
            .await
            .insert(delivery.id.clone(), delivery);
    }

    pub async fn contract(&self, contract_id: &str) -> Option<Contract> {
        self.contracts.read().await.get(contract_id).cloned()
    }

    pub async fn event_exists(&self, event_id: &str) -> bool {
        self.events.read().await.contains_key(event_id)
    }

    /// Snapshot of every notification pushed so far, for assertions.
    pub async fn notifications(&self) -> Vec<Notification> {
        self.notifications.read().await.clone()
    }
}

#[async_trait]
impl EventStore for InMemoryStore {
    async fn all(&self) -> Result<Vec<Event>> {
        Ok(self.events.read().await.values().cloned().collect())
    }

    async fn get(&self, event_id: &str) -> Result<Option<Event>> {
        Ok(self.events.read().await.get(event_id).cloned())
    }

    async fn delete(&self, event_id: &str) -> Result<()> {
        self.events.write().await.remove(event_id);
        Ok(())
    }
}

#[async_trait]
impl ContractStore for InMemoryStore {
    async fn all(&self) -> Result<Vec<Contract>> {
        Ok(self.contracts.read().await.values().cloned().collect())
    }

    async fn for_event(&self, event_id: &str) -> Result<Vec<Contract>> {
        Ok(self
            .contracts
            .read()
            .await
            .values()
            .filter(|c| c.event_id.as_deref() == Some(event_id))
            .cloned()
            .collect())
    }

    async fn set_status(
        &self,
        contract_id: &str,
        status: ContractStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<()> {
        let mut contracts = self.contracts.write().await;
        let contract = contracts
            .get_mut(contract_id)
            .ok_or_else(|| SweepError::NotFound {
                collection: "contracts",
                id: contract_id.to_string(),
            })?;
        contract.status = status;
        contract.updated_at = Some(updated_at);
        Ok(())
    }
}

#[async_trait]
impl ApplicationStore for InMemoryStore {
    async fn for_event(&self, event_id: &str) -> Result<Vec<Application>> {
        Ok(self
            .applications
            .read()
            .await
            .values()
            .filter(|a| a.event_id.as_deref() == Some(event_id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl TransactionStore for InMemoryStore {
    async fn any_for_contract(
        &self,
        contract_id: &str,
        statuses: &[TransactionStatus],
    ) -> Result<bool> {
        Ok(self
            .transactions
            .read()
            .await
            .values()
            .any(|t| t.contract_id.as_deref() == Some(contract_id) && statuses.contains(&t.status)))
    }
}

#[async_trait]
impl DeliveryStore for InMemoryStore {
    async fn any_for_contract(&self, contract_id: &str) -> Result<bool> {
        Ok(self
            .deliveries
            .read()
            .await
            .values()
            .any(|d| d.contract_id.as_deref() == Some(contract_id)))
    }
}

#[async_trait]
impl NotificationSink for InMemoryStore {
    async fn push(&self, notification: Notification) -> Result<()> {
        self.notifications.write().await.push(notification);
        Ok(())
    }
}

#[async_trait]
impl SeedTarget for InMemoryStore {
    async fn put_event(&self, event: Event) -> Result<()> {
        InMemoryStore::put_event(self, event).await;
        Ok(())
    }

    async fn put_contract(&self, contract: Contract) -> Result<()> {
        InMemoryStore::put_contract(self, contract).await;
        Ok(())
    }

    async fn put_application(&self, application: Application) -> Result<()> {
        InMemoryStore::put_application(self, application).await;
        Ok(())
    }

    async fn put_transaction(&self, tx: TransactionRecord) -> Result<()> {
        InMemoryStore::put_transaction(self, tx).await;
        Ok(())
    }

    async fn put_delivery(&self, delivery: Delivery) -> Result<()> {
        InMemoryStore::put_delivery(self, delivery).await;
        Ok(())
    }
}
