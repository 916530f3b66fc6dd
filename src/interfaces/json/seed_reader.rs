use crate::domain::application::Application;
use crate::domain::contract::Contract;
use crate::domain::delivery::Delivery;
use crate::domain::event::Event;
use crate::domain::transaction::TransactionRecord;
use crate::error::Result;
use async_trait::async_trait;
use serde::Deserialize;
use std::io::Read;

/// A JSON fixture describing the five input collections as plain arrays.
/// Absent collections default to empty.
#[derive(Debug, Default, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub contracts: Vec<Contract>,
    #[serde(default)]
    pub applications: Vec<Application>,
    #[serde(default)]
    pub transactions: Vec<TransactionRecord>,
    #[serde(default)]
    pub deliveries: Vec<Delivery>,
}

/// Anything a seed can be loaded into. Both bundled store adapters implement
/// this.
#[async_trait]
pub trait SeedTarget: Send + Sync {
    async fn put_event(&self, event: Event) -> Result<()>;
    async fn put_contract(&self, contract: Contract) -> Result<()>;
    async fn put_application(&self, application: Application) -> Result<()>;
    async fn put_transaction(&self, tx: TransactionRecord) -> Result<()>;
    async fn put_delivery(&self, delivery: Delivery) -> Result<()>;
}

impl Seed {
    /// Writes every document into `target`, returning how many were loaded.
    pub async fn load_into(self, target: &dyn SeedTarget) -> Result<usize> {
        let mut loaded = 0;
        for event in self.events {
            target.put_event(event).await?;
            loaded += 1;
        }
        for contract in self.contracts {
            target.put_contract(contract).await?;
            loaded += 1;
        }
        for application in self.applications {
            target.put_application(application).await?;
            loaded += 1;
        }
        for tx in self.transactions {
            target.put_transaction(tx).await?;
            loaded += 1;
        }
        for delivery in self.deliveries {
            target.put_delivery(delivery).await?;
            loaded += 1;
        }
        Ok(loaded)
    }
}

/// Reads a seed fixture from any `Read` source (e.g. File, Stdin).
pub struct SeedReader<R: Read> {
    source: R,
}

impl<R: Read> SeedReader<R> {
    pub fn new(source: R) -> Self {
        Self { source }
    }

    pub fn read(self) -> Result<Seed> {
        let seed = serde_json::from_reader(self.source)?;
        Ok(seed)
    }
}
