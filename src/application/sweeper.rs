use crate::domain::contract::{Contract, ContractStatus};
use crate::domain::event::Event;
use crate::domain::notification::Notification;
use crate::domain::policy;
use crate::domain::ports::{
    ApplicationStoreBox, ClockBox, ContractStoreBox, DeliveryStoreBox, DocumentStore,
    EventStoreBox, NotificationSinkBox, TransactionStoreBox,
};
use crate::error::Result;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use std::fmt;
use tracing::{debug, info, warn};

/// Counters for one full sweep, printed as a single `key=value` line.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SweepReport {
    pub contracts_scanned: usize,
    pub contracts_cancelled: usize,
    pub contracts_skipped: usize,
    pub events_scanned: usize,
    pub events_deleted: usize,
    pub events_skipped: usize,
    pub notifications_sent: usize,
    pub errors: usize,
}

impl fmt::Display for SweepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "contracts_scanned={} contracts_cancelled={} contracts_skipped={} \
             events_scanned={} events_deleted={} events_skipped={} \
             notifications_sent={} errors={}",
            self.contracts_scanned,
            self.contracts_cancelled,
            self.contracts_skipped,
            self.events_scanned,
            self.events_deleted,
            self.events_skipped,
            self.notifications_sent,
            self.errors,
        )
    }
}

enum ContractOutcome {
    Cancelled { notifications: NotificationTally },
    Untouched,
    Skipped(&'static str),
}

enum EventOutcome {
    Deleted { notifications: NotificationTally },
    Kept,
    Skipped(&'static str),
}

/// Outcome of the best-effort notification writes for one document.
#[derive(Default)]
struct NotificationTally {
    sent: usize,
    failed: usize,
}

/// The boxed port bundle one sweeper runs against. Assemble it by hand to mix
/// adapters; [`LifecycleSweeper::from_store`] covers the common case of a
/// single adapter backing every collection.
pub struct SweepPorts {
    pub events: EventStoreBox,
    pub contracts: ContractStoreBox,
    pub applications: ApplicationStoreBox,
    pub transactions: TransactionStoreBox,
    pub deliveries: DeliveryStoreBox,
    pub notifications: NotificationSinkBox,
}

impl SweepPorts {
    /// Wires every port to clones of one adapter.
    pub fn from_store<S>(store: S) -> Self
    where
        S: DocumentStore + Clone + 'static,
    {
        Self {
            events: Box::new(store.clone()),
            contracts: Box::new(store.clone()),
            applications: Box::new(store.clone()),
            transactions: Box::new(store.clone()),
            deliveries: Box::new(store.clone()),
            notifications: Box::new(store),
        }
    }
}

/// The lifecycle sweep over the marketplace document store.
///
/// One `run()` performs two independent passes: cancel expired contracts with
/// no payment/delivery activity, then delete expired events with no active
/// children. Terminal-state guards make re-execution converge to the same end
/// state, so overlapping scheduler triggers are benign (modulo duplicate
/// notifications, which are not deduplicated).
pub struct LifecycleSweeper {
    events: EventStoreBox,
    contracts: ContractStoreBox,
    applications: ApplicationStoreBox,
    transactions: TransactionStoreBox,
    deliveries: DeliveryStoreBox,
    notifications: NotificationSinkBox,
    clock: ClockBox,
}

impl LifecycleSweeper {
    pub fn new(ports: SweepPorts, clock: ClockBox) -> Self {
        let SweepPorts {
            events,
            contracts,
            applications,
            transactions,
            deliveries,
            notifications,
        } = ports;
        Self {
            events,
            contracts,
            applications,
            transactions,
            deliveries,
            notifications,
            clock,
        }
    }

    /// Builds a sweeper from one adapter backing every collection.
    pub fn from_store<S>(store: S, clock: ClockBox) -> Self
    where
        S: DocumentStore + Clone + 'static,
    {
        Self::new(SweepPorts::from_store(store), clock)
    }

    /// One full sweep: contract cancellation pass, then event deletion pass.
    pub async fn run(&self) -> Result<SweepReport> {
        let mut report = SweepReport::default();
        self.cancel_expired_contracts(&mut report).await?;
        self.delete_expired_events(&mut report).await?;
        info!(%report, "sweep complete");
        Ok(report)
    }

    async fn cancel_expired_contracts(&self, report: &mut SweepReport) -> Result<()> {
        let now = self.clock.now();
        let contracts = self.contracts.all().await?;
        debug!(count = contracts.len(), "scanning contracts");

        for contract in contracts {
            report.contracts_scanned += 1;
            match self.process_contract(&contract, now).await {
                Ok(ContractOutcome::Cancelled { notifications }) => {
                    report.contracts_cancelled += 1;
                    report.notifications_sent += notifications.sent;
                    report.errors += notifications.failed;
                }
                Ok(ContractOutcome::Untouched) => {}
                Ok(ContractOutcome::Skipped(reason)) => {
                    report.contracts_skipped += 1;
                    debug!(contract = %contract.id, reason, "contract skipped");
                }
                Err(e) => {
                    // One bad document must not abort the rest of the pass.
                    report.errors += 1;
                    warn!(contract = %contract.id, error = %e, "contract pass error, continuing");
                }
            }
        }
        Ok(())
    }

    async fn process_contract(
        &self,
        contract: &Contract,
        now: DateTime<Utc>,
    ) -> Result<ContractOutcome> {
        let Some(event_id) = contract.event_id.as_deref() else {
            return Ok(ContractOutcome::Skipped("missing event reference"));
        };
        let Some(event) = self.events.get(event_id).await? else {
            return Ok(ContractOutcome::Skipped("event not found"));
        };
        let event_date = match event.parsed_date() {
            Ok(date) => date,
            Err(e) => {
                warn!(contract = %contract.id, event = event_id, error = %e, "skipping, cannot determine expiry");
                return Ok(ContractOutcome::Skipped("unparseable event date"));
            }
        };
        if policy::contract_is_terminal(&contract.status) {
            return Ok(ContractOutcome::Skipped("already terminal"));
        }
        if !has_expired(event_date, now) {
            return Ok(ContractOutcome::Untouched);
        }

        let has_transactions = self
            .transactions
            .any_for_contract(&contract.id, policy::ACTIVITY_TRANSACTION_STATUSES)
            .await?;
        if has_transactions {
            return Ok(ContractOutcome::Untouched);
        }
        if self.deliveries.any_for_contract(&contract.id).await? {
            return Ok(ContractOutcome::Untouched);
        }

        info!(contract = %contract.id, event = event_id, "cancelling expired contract with no activity");
        self.contracts
            .set_status(&contract.id, ContractStatus::Cancelled, now)
            .await?;

        // Post-commit, best effort: one failed notification must not block
        // the other, and neither undoes the cancellation.
        let mut notifications = NotificationTally::default();
        let receivers = [
            contract.supplier_id.as_deref(),
            contract.planner_id.as_deref(),
        ];
        for receiver in receivers.into_iter().flatten() {
            let note =
                Notification::contract_cancelled(receiver, &contract.id, event.display_name(), now);
            match self.notifications.push(note).await {
                Ok(()) => notifications.sent += 1,
                Err(e) => {
                    notifications.failed += 1;
                    warn!(contract = %contract.id, receiver, error = %e, "notification write failed");
                }
            }
        }
        Ok(ContractOutcome::Cancelled { notifications })
    }

    async fn delete_expired_events(&self, report: &mut SweepReport) -> Result<()> {
        let now = self.clock.now();
        let events = self.events.all().await?;
        debug!(count = events.len(), "scanning events");

        for event in events {
            report.events_scanned += 1;
            match self.process_event(&event, now).await {
                Ok(EventOutcome::Deleted { notifications }) => {
                    report.events_deleted += 1;
                    report.notifications_sent += notifications.sent;
                    report.errors += notifications.failed;
                }
                Ok(EventOutcome::Kept) => {}
                Ok(EventOutcome::Skipped(reason)) => {
                    report.events_skipped += 1;
                    debug!(event = %event.id, reason, "event skipped");
                }
                Err(e) => {
                    report.errors += 1;
                    warn!(event = %event.id, error = %e, "event pass error, continuing");
                }
            }
        }
        Ok(())
    }

    async fn process_event(&self, event: &Event, now: DateTime<Utc>) -> Result<EventOutcome> {
        let event_date = match event.parsed_date() {
            Ok(date) => date,
            Err(e) => {
                warn!(event = %event.id, error = %e, "skipping, cannot determine expiry");
                return Ok(EventOutcome::Skipped("unparseable event date"));
            }
        };
        if !has_expired(event_date, now) {
            return Ok(EventOutcome::Kept);
        }

        let contracts = self.contracts.for_event(&event.id).await?;
        let active_contracts = contracts
            .iter()
            .filter(|c| policy::contract_counts_active_for_event(&c.status))
            .count();
        let applications = self.applications.for_event(&event.id).await?;
        let active_applications = applications
            .iter()
            .filter(|a| policy::application_counts_active(&a.status))
            .count();

        if !policy::event_is_deletable(active_contracts, active_applications) {
            return Ok(EventOutcome::Kept);
        }

        info!(event = %event.id, name = event.display_name(), "deleting expired event");
        let mut notifications = NotificationTally::default();
        if let Some(owner) = event.owner_id() {
            let note = Notification::event_deleted(owner, event.display_name(), now);
            match self.notifications.push(note).await {
                Ok(()) => notifications.sent += 1,
                Err(e) => {
                    notifications.failed += 1;
                    warn!(event = %event.id, receiver = owner, error = %e, "notification write failed");
                }
            }
        }
        self.events.delete(&event.id).await?;
        Ok(EventOutcome::Deleted { notifications })
    }
}

/// An event counts as expired once its date (at midnight) lies strictly
/// before the current instant, so "today" is already expired.
fn has_expired(event_date: NaiveDate, now: DateTime<Utc>) -> bool {
    event_date.and_time(NaiveTime::MIN) < now.naive_utc()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::application::{Application, ApplicationStatus};
    use crate::domain::delivery::Delivery;
    use crate::domain::ports::{ContractStore, EventStore, NotificationSink};
    use crate::domain::transaction::{TransactionRecord, TransactionStatus};
    use crate::error::SweepError;
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::in_memory::InMemoryStore;
    use async_trait::async_trait;
    use chrono::TimeZone;

    fn fixed_clock() -> ClockBox {
        Box::new(FixedClock::at(
            Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap(),
        ))
    }

    fn event(id: &str, date: Option<&str>) -> Event {
        Event {
            id: id.into(),
            event_name: Some(format!("Event {id}")),
            event_date: date.map(Into::into),
            user_id: Some(format!("planner-{id}")),
            planner_id: None,
        }
    }

    fn contract(id: &str, event_id: &str, status: ContractStatus) -> Contract {
        Contract {
            id: id.into(),
            event_id: Some(event_id.into()),
            supplier_id: Some(format!("supplier-{id}")),
            planner_id: Some(format!("planner-{id}")),
            status,
            updated_at: None,
        }
    }

    fn sweeper_with(store: &InMemoryStore) -> LifecycleSweeper {
        LifecycleSweeper::from_store(store.clone(), fixed_clock())
    }

    fn unavailable(msg: &'static str) -> SweepError {
        SweepError::Internal(Box::new(std::io::Error::other(msg)))
    }

    /// Sink that rejects writes for receivers matching a prefix and delegates
    /// the rest to the shared store.
    struct RejectingSink {
        inner: InMemoryStore,
        reject_prefix: &'static str,
    }

    #[async_trait]
    impl NotificationSink for RejectingSink {
        async fn push(&self, notification: Notification) -> Result<()> {
            if notification.receiver_id.starts_with(self.reject_prefix) {
                return Err(unavailable("notification service down"));
            }
            self.inner.push(notification).await
        }
    }

    /// Contract store whose status update fails for one id.
    struct RejectingStatusWrites {
        inner: InMemoryStore,
        reject_id: &'static str,
    }

    #[async_trait]
    impl ContractStore for RejectingStatusWrites {
        async fn all(&self) -> Result<Vec<Contract>> {
            ContractStore::all(&self.inner).await
        }

        async fn for_event(&self, event_id: &str) -> Result<Vec<Contract>> {
            ContractStore::for_event(&self.inner, event_id).await
        }

        async fn set_status(
            &self,
            contract_id: &str,
            status: ContractStatus,
            updated_at: DateTime<Utc>,
        ) -> Result<()> {
            if contract_id == self.reject_id {
                return Err(unavailable("status write rejected"));
            }
            ContractStore::set_status(&self.inner, contract_id, status, updated_at).await
        }
    }

    /// Event store whose delete fails for one id.
    struct RejectingDeletes {
        inner: InMemoryStore,
        reject_id: &'static str,
    }

    #[async_trait]
    impl EventStore for RejectingDeletes {
        async fn all(&self) -> Result<Vec<Event>> {
            EventStore::all(&self.inner).await
        }

        async fn get(&self, event_id: &str) -> Result<Option<Event>> {
            EventStore::get(&self.inner, event_id).await
        }

        async fn delete(&self, event_id: &str) -> Result<()> {
            if event_id == self.reject_id {
                return Err(unavailable("delete rejected"));
            }
            EventStore::delete(&self.inner, event_id).await
        }
    }

    #[tokio::test]
    async fn test_expired_inactive_contract_is_cancelled_with_notifications() {
        let store = InMemoryStore::new();
        store.put_event(event("e1", Some("2020-01-01"))).await;
        store
            .put_contract(contract("c1", "e1", ContractStatus::Pending))
            .await;

        let report = sweeper_with(&store).run().await.unwrap();

        assert_eq!(report.contracts_cancelled, 1);
        let updated = store.contract("c1").await.unwrap();
        assert_eq!(updated.status, ContractStatus::Cancelled);
        assert!(updated.updated_at.is_some());

        let notes = store.notifications().await;
        let receivers: Vec<_> = notes
            .iter()
            .filter(|n| n.title == "Contract Auto-Cancelled")
            .map(|n| n.receiver_id.clone())
            .collect();
        assert!(receivers.contains(&"supplier-c1".to_string()));
        assert!(receivers.contains(&"planner-c1".to_string()));
        assert_eq!(receivers.len(), 2);
    }

    #[tokio::test]
    async fn test_future_contract_is_untouched() {
        let store = InMemoryStore::new();
        store.put_event(event("e1", Some("2099-01-01"))).await;
        store
            .put_contract(contract("c1", "e1", ContractStatus::Pending))
            .await;

        let report = sweeper_with(&store).run().await.unwrap();

        assert_eq!(report.contracts_cancelled, 0);
        assert_eq!(
            store.contract("c1").await.unwrap().status,
            ContractStatus::Pending
        );
        assert!(
            store
                .notifications()
                .await
                .iter()
                .all(|n| n.title != "Contract Auto-Cancelled")
        );
    }

    #[tokio::test]
    async fn test_terminal_contracts_are_never_touched() {
        let store = InMemoryStore::new();
        store.put_event(event("e1", Some("2020-01-01"))).await;
        store
            .put_contract(contract("c1", "e1", ContractStatus::Completed))
            .await;
        store
            .put_contract(contract("c2", "e1", ContractStatus::Cancelled))
            .await;

        let report = sweeper_with(&store).run().await.unwrap();

        assert_eq!(report.contracts_cancelled, 0);
        assert_eq!(report.contracts_skipped, 2);
        assert_eq!(
            store.contract("c1").await.unwrap().status,
            ContractStatus::Completed
        );
        assert!(
            store
                .notifications()
                .await
                .iter()
                .all(|n| n.title != "Contract Auto-Cancelled")
        );
    }

    #[tokio::test]
    async fn test_hold_transaction_blocks_cancellation() {
        let store = InMemoryStore::new();
        store.put_event(event("e1", Some("2020-01-01"))).await;
        store
            .put_contract(contract("c1", "e1", ContractStatus::Pending))
            .await;
        store
            .put_transaction(TransactionRecord {
                id: "t1".into(),
                contract_id: Some("c1".into()),
                status: TransactionStatus::Hold,
            })
            .await;

        let report = sweeper_with(&store).run().await.unwrap();

        assert_eq!(report.contracts_cancelled, 0);
        assert_eq!(
            store.contract("c1").await.unwrap().status,
            ContractStatus::Pending
        );
    }

    #[tokio::test]
    async fn test_failed_transaction_does_not_block_cancellation() {
        let store = InMemoryStore::new();
        store.put_event(event("e1", Some("2020-01-01"))).await;
        store
            .put_contract(contract("c1", "e1", ContractStatus::Pending))
            .await;
        store
            .put_transaction(TransactionRecord {
                id: "t1".into(),
                contract_id: Some("c1".into()),
                status: TransactionStatus::Other("FAILED".into()),
            })
            .await;

        let report = sweeper_with(&store).run().await.unwrap();
        assert_eq!(report.contracts_cancelled, 1);
    }

    #[tokio::test]
    async fn test_delivery_blocks_cancellation() {
        let store = InMemoryStore::new();
        store.put_event(event("e1", Some("2020-01-01"))).await;
        store
            .put_contract(contract("c1", "e1", ContractStatus::Pending))
            .await;
        store
            .put_delivery(Delivery {
                id: "d1".into(),
                contract_id: Some("c1".into()),
            })
            .await;

        let report = sweeper_with(&store).run().await.unwrap();

        assert_eq!(report.contracts_cancelled, 0);
        assert_eq!(
            store.contract("c1").await.unwrap().status,
            ContractStatus::Pending
        );
    }

    #[tokio::test]
    async fn test_dangling_and_missing_event_references_are_skipped() {
        let store = InMemoryStore::new();
        store
            .put_contract(Contract {
                id: "c1".into(),
                event_id: None,
                supplier_id: None,
                planner_id: None,
                status: ContractStatus::Pending,
                updated_at: None,
            })
            .await;
        store
            .put_contract(contract("c2", "missing-event", ContractStatus::Pending))
            .await;

        let report = sweeper_with(&store).run().await.unwrap();

        assert_eq!(report.contracts_scanned, 2);
        assert_eq!(report.contracts_skipped, 2);
        assert_eq!(report.contracts_cancelled, 0);
        assert_eq!(report.errors, 0);
    }

    #[tokio::test]
    async fn test_sweep_is_idempotent() {
        let store = InMemoryStore::new();
        store.put_event(event("e1", Some("2020-01-01"))).await;
        store
            .put_contract(contract("c1", "e1", ContractStatus::Pending))
            .await;
        // An unknown-status contract keeps e1 alive through the event pass.
        store
            .put_contract(contract("c2", "e1", ContractStatus::Other("Negotiating".into())))
            .await;
        store
            .put_application(Application {
                id: "a1".into(),
                event_id: Some("e1".into()),
                status: ApplicationStatus::Other("Withdrawn".into()),
            })
            .await;
        // c2 has a delivery, so only c1 gets cancelled.
        store
            .put_delivery(Delivery {
                id: "d1".into(),
                contract_id: Some("c2".into()),
            })
            .await;

        let sweeper = sweeper_with(&store);
        let first = sweeper.run().await.unwrap();
        assert_eq!(first.contracts_cancelled, 1);
        assert_eq!(first.events_deleted, 0);
        let notes_after_first = store.notifications().await.len();

        let second = sweeper.run().await.unwrap();
        assert_eq!(second.contracts_cancelled, 0);
        assert_eq!(second.events_deleted, 0);
        assert_eq!(store.notifications().await.len(), notes_after_first);
        assert_eq!(
            store.contract("c1").await.unwrap().status,
            ContractStatus::Cancelled
        );
    }

    #[tokio::test]
    async fn test_expired_empty_event_is_deleted_with_owner_notification() {
        let store = InMemoryStore::new();
        store.put_event(event("e3", Some("2020-01-01"))).await;

        let report = sweeper_with(&store).run().await.unwrap();

        assert_eq!(report.events_deleted, 1);
        assert!(!store.event_exists("e3").await);
        let notes = store.notifications().await;
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title, "Event Deleted");
        assert_eq!(notes[0].receiver_id, "planner-e3");
    }

    #[tokio::test]
    async fn test_event_with_unparseable_date_is_never_deleted() {
        let store = InMemoryStore::new();
        store.put_event(event("e1", Some("next summer"))).await;
        store.put_event(event("e2", None)).await;

        let report = sweeper_with(&store).run().await.unwrap();

        assert_eq!(report.events_deleted, 0);
        assert_eq!(report.events_skipped, 2);
        assert!(store.event_exists("e1").await);
        assert!(store.event_exists("e2").await);
    }

    #[tokio::test]
    async fn test_event_deletion_disjunction_fires_on_one_empty_side() {
        let store = InMemoryStore::new();
        // Active contract, but zero applications: still deletable.
        store.put_event(event("e1", Some("2020-01-01"))).await;
        store
            .put_contract(contract("c1", "e1", ContractStatus::Other("Negotiating".into())))
            .await;
        // c1 has a delivery so the cancel pass leaves it alone.
        store
            .put_delivery(Delivery {
                id: "d1".into(),
                contract_id: Some("c1".into()),
            })
            .await;

        let report = sweeper_with(&store).run().await.unwrap();

        assert_eq!(report.events_deleted, 1);
        assert!(!store.event_exists("e1").await);
    }

    #[tokio::test]
    async fn test_event_with_active_children_on_both_sides_survives() {
        let store = InMemoryStore::new();
        store.put_event(event("e1", Some("2020-01-01"))).await;
        store
            .put_contract(contract("c1", "e1", ContractStatus::Other("Negotiating".into())))
            .await;
        store
            .put_delivery(Delivery {
                id: "d1".into(),
                contract_id: Some("c1".into()),
            })
            .await;
        store
            .put_application(Application {
                id: "a1".into(),
                event_id: Some("e1".into()),
                status: ApplicationStatus::Other("Withdrawn".into()),
            })
            .await;

        let report = sweeper_with(&store).run().await.unwrap();

        assert_eq!(report.events_deleted, 0);
        assert!(store.event_exists("e1").await);
    }

    #[tokio::test]
    async fn test_approved_and_pending_applications_do_not_keep_event_alive() {
        let store = InMemoryStore::new();
        store.put_event(event("e1", Some("2020-01-01"))).await;
        store
            .put_contract(contract("c1", "e1", ContractStatus::Other("Negotiating".into())))
            .await;
        store
            .put_delivery(Delivery {
                id: "d1".into(),
                contract_id: Some("c1".into()),
            })
            .await;
        // Approved/Pending applications count as inactive under the current
        // policy, so the disjunction fires despite the active contract.
        store
            .put_application(Application {
                id: "a1".into(),
                event_id: Some("e1".into()),
                status: ApplicationStatus::Approved,
            })
            .await;

        let report = sweeper_with(&store).run().await.unwrap();

        assert_eq!(report.events_deleted, 1);
        assert!(!store.event_exists("e1").await);
    }

    #[tokio::test]
    async fn test_notification_failure_blocks_neither_cancellation_nor_other_receiver() {
        let store = InMemoryStore::new();
        store.put_event(event("e1", Some("2020-01-01"))).await;
        store
            .put_contract(contract("c1", "e1", ContractStatus::Pending))
            .await;
        // An active contract plus an active application keep e1 out of the
        // event pass, so only the cancellation notifications are in play.
        store
            .put_contract(contract("c2", "e1", ContractStatus::Other("Negotiating".into())))
            .await;
        store
            .put_delivery(Delivery {
                id: "d1".into(),
                contract_id: Some("c2".into()),
            })
            .await;
        store
            .put_application(Application {
                id: "a1".into(),
                event_id: Some("e1".into()),
                status: ApplicationStatus::Other("Withdrawn".into()),
            })
            .await;

        let mut ports = SweepPorts::from_store(store.clone());
        ports.notifications = Box::new(RejectingSink {
            inner: store.clone(),
            reject_prefix: "supplier-",
        });

        let report = LifecycleSweeper::new(ports, fixed_clock())
            .run()
            .await
            .unwrap();

        // The cancellation committed despite the failed supplier write.
        assert_eq!(report.contracts_cancelled, 1);
        assert_eq!(
            store.contract("c1").await.unwrap().status,
            ContractStatus::Cancelled
        );
        // The planner notification still landed; the failure was counted.
        let notes = store.notifications().await;
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].receiver_id, "planner-c1");
        assert_eq!(report.notifications_sent, 1);
        assert_eq!(report.errors, 1);
    }

    #[tokio::test]
    async fn test_status_write_failure_is_counted_and_pass_continues() {
        let store = InMemoryStore::new();
        store.put_event(event("e1", Some("2020-01-01"))).await;
        store
            .put_contract(contract("c1", "e1", ContractStatus::Pending))
            .await;
        store
            .put_contract(contract("c2", "e1", ContractStatus::Pending))
            .await;

        let mut ports = SweepPorts::from_store(store.clone());
        ports.contracts = Box::new(RejectingStatusWrites {
            inner: store.clone(),
            reject_id: "c1",
        });

        let report = LifecycleSweeper::new(ports, fixed_clock())
            .run()
            .await
            .unwrap();

        assert_eq!(report.contracts_scanned, 2);
        assert_eq!(report.contracts_cancelled, 1);
        assert_eq!(report.errors, 1);
        assert_eq!(
            store.contract("c1").await.unwrap().status,
            ContractStatus::Pending
        );
        assert_eq!(
            store.contract("c2").await.unwrap().status,
            ContractStatus::Cancelled
        );
        // No notifications for the contract whose write failed.
        assert!(
            store
                .notifications()
                .await
                .iter()
                .all(|n| n.receiver_id != "supplier-c1" && n.receiver_id != "planner-c1")
        );
    }

    #[tokio::test]
    async fn test_delete_failure_is_counted_and_pass_continues() {
        let store = InMemoryStore::new();
        store.put_event(event("e1", Some("2020-01-01"))).await;
        store.put_event(event("e2", Some("2020-01-01"))).await;

        let mut ports = SweepPorts::from_store(store.clone());
        ports.events = Box::new(RejectingDeletes {
            inner: store.clone(),
            reject_id: "e1",
        });

        let report = LifecycleSweeper::new(ports, fixed_clock())
            .run()
            .await
            .unwrap();

        assert_eq!(report.events_scanned, 2);
        assert_eq!(report.events_deleted, 1);
        assert_eq!(report.errors, 1);
        assert!(store.event_exists("e1").await);
        assert!(!store.event_exists("e2").await);
    }

    #[test]
    fn test_has_expired_boundaries() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        let past = NaiveDate::from_ymd_opt(2024, 6, 14).unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let future = NaiveDate::from_ymd_opt(2024, 6, 16).unwrap();

        assert!(has_expired(past, now));
        // Midnight has passed by noon, so today already counts as expired.
        assert!(has_expired(today, now));
        assert!(!has_expired(future, now));
    }
}
