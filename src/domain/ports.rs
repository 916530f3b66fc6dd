use super::application::Application;
use super::contract::{Contract, ContractStatus};
use super::event::Event;
use super::notification::Notification;
use super::transaction::TransactionStatus;
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait EventStore: Send + Sync {
    async fn all(&self) -> Result<Vec<Event>>;
    async fn get(&self, event_id: &str) -> Result<Option<Event>>;
    async fn delete(&self, event_id: &str) -> Result<()>;
}

#[async_trait]
pub trait ContractStore: Send + Sync {
    async fn all(&self) -> Result<Vec<Contract>>;
    async fn for_event(&self, event_id: &str) -> Result<Vec<Contract>>;
    /// Partial update: only the status and update timestamp change.
    async fn set_status(
        &self,
        contract_id: &str,
        status: ContractStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<()>;
}

#[async_trait]
pub trait ApplicationStore: Send + Sync {
    async fn for_event(&self, event_id: &str) -> Result<Vec<Application>>;
}

#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Whether any transaction for this contract carries one of the statuses.
    async fn any_for_contract(
        &self,
        contract_id: &str,
        statuses: &[TransactionStatus],
    ) -> Result<bool>;
}

#[async_trait]
pub trait DeliveryStore: Send + Sync {
    async fn any_for_contract(&self, contract_id: &str) -> Result<bool>;
}

/// Append-only notification sink. The sweep never reads back what it wrote.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn push(&self, notification: Notification) -> Result<()>;
}

/// Wall-clock source. All "now" comparisons and write timestamps go through
/// this so tests can pin time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub type EventStoreBox = Box<dyn EventStore>;
pub type ContractStoreBox = Box<dyn ContractStore>;
pub type ApplicationStoreBox = Box<dyn ApplicationStore>;
pub type TransactionStoreBox = Box<dyn TransactionStore>;
pub type DeliveryStoreBox = Box<dyn DeliveryStore>;
pub type NotificationSinkBox = Box<dyn NotificationSink>;
pub type ClockBox = Box<dyn Clock>;

/// A store adapter that backs every collection at once, which is how both
/// bundled adapters work.
pub trait DocumentStore:
    EventStore
    + ContractStore
    + ApplicationStore
    + TransactionStore
    + DeliveryStore
    + NotificationSink
{
}

impl<T> DocumentStore for T where
    T: EventStore
        + ContractStore
        + ApplicationStore
        + TransactionStore
        + DeliveryStore
        + NotificationSink
{
}
