//! Record lifecycle (服务记录生命周期)
//!
//! Every operation re-reads `records`, applies one change and writes the
//! list back. Cancellation also appends to `deletedRecords` in the same
//! batch. Confirm and cancel do not check the current status.

use serde_json::Map;
use shared::models::{
    DeletedRecordEntry, PaymentConfirmation, Record, RecordCreate, RecordEdit, RecordId,
    RecordStatus,
};
use shared::util;

use super::{CancelledEditPolicy, merge};
use crate::db::repository::{
    CarHistoryRepository, DeletedRecordRepository, RecordRepository, RepoError, RepoResult,
};
use crate::db::{Store, WriteBatch};

#[derive(Clone)]
pub struct RecordLifecycle {
    store: Store,
    records: RecordRepository,
    deleted: DeletedRecordRepository,
    cars: CarHistoryRepository,
    policy: CancelledEditPolicy,
}

impl RecordLifecycle {
    pub fn new(store: Store, policy: CancelledEditPolicy) -> Self {
        Self {
            records: RecordRepository::new(store.clone()),
            deleted: DeletedRecordRepository::new(store.clone()),
            cars: CarHistoryRepository::new(store.clone()),
            store,
            policy,
        }
    }

    pub fn policy(&self) -> CancelledEditPolicy {
        self.policy
    }

    /// Create an in-progress record at the top of the list
    pub fn create(&self, data: RecordCreate) -> RepoResult<Record> {
        if util::is_blank(&data.client) {
            return Err(RepoError::Validation("Client is required".into()));
        }
        if util::is_blank(&data.car) {
            return Err(RepoError::Validation("Car is required".into()));
        }

        let record = Record {
            id: RecordId::generate(),
            client: data.client.trim().to_string(),
            client_name: data.client_name,
            car: data.car.trim().to_string(),
            service: data.service,
            price: data.price,
            date: data.date,
            master: data.master,
            payment_status: RecordStatus::InProgress,
            payment_amount: None,
            payment_comment: None,
            cancel_reason: None,
            cancelled_at: None,
            extra: Map::new(),
        };

        let mut records = self.records.find_all();
        records.insert(0, record.clone());

        let mut batch = WriteBatch::new();
        self.records.stage(&mut batch, &records);
        self.cars.stage_remember(&mut batch, &record.car);
        self.store.commit(batch);

        tracing::info!(record_id = %record.id, car = %record.car, "Record created");
        Ok(record)
    }

    /// Manual edit; the free-text status goes through the normalizer.
    ///
    /// `None` when the id is unknown.
    pub fn edit(&self, id: &RecordId, data: RecordEdit) -> RepoResult<Option<Record>> {
        let status = RecordStatus::normalize(&data.payment_status);
        let mut records = self.records.find_all();
        let Some(record) = records.iter_mut().find(|r| &r.id == id) else {
            return Ok(None);
        };

        if self.policy == CancelledEditPolicy::Reject
            && record.payment_status == RecordStatus::Cancelled
            && status != RecordStatus::Cancelled
        {
            return Err(RepoError::CancelledRecordLocked(id.clone()));
        }

        let from = record.payment_status;
        record.client = data.client;
        record.car = data.car;
        record.service = data.service;
        record.price = data.price;
        record.date = data.date;
        record.payment_status = status;
        let updated = record.clone();

        self.records.save_all(&records);
        tracing::info!(record_id = %id, %from, to = %status, "Record edited");
        Ok(Some(updated))
    }

    /// Cancel with a reason and log the cancelled snapshot
    pub fn cancel(&self, id: &RecordId, reason: &str) -> RepoResult<Option<Record>> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(RepoError::Validation("Cancellation reason is required".into()));
        }

        let mut records = self.records.find_all();
        let Some(record) = records.iter_mut().find(|r| &r.id == id) else {
            return Ok(None);
        };

        let now = util::now();
        record.payment_status = RecordStatus::Cancelled;
        record.cancel_reason = Some(reason.to_string());
        record.cancelled_at = Some(now);
        let cancelled = record.clone();

        let mut batch = WriteBatch::new();
        self.records.stage(&mut batch, &records);
        self.deleted.stage_append(
            &mut batch,
            DeletedRecordEntry {
                id: cancelled.id.clone(),
                deleted_at: now,
                reason: reason.to_string(),
                record: cancelled.clone(),
            },
        );
        self.store.commit(batch);

        tracing::info!(record_id = %id, reason, "Record cancelled");
        Ok(Some(cancelled))
    }

    /// Mark a record paid
    pub fn confirm(&self, id: &RecordId, payment: PaymentConfirmation) -> RepoResult<Option<Record>> {
        if payment.amount.is_nan() || payment.amount < 0.0 {
            return Err(RepoError::Validation(format!(
                "Payment amount must be a non-negative number, got {}",
                payment.amount
            )));
        }

        let mut records = self.records.find_all();
        let Some(record) = records.iter_mut().find(|r| &r.id == id) else {
            return Ok(None);
        };

        record.payment_status = RecordStatus::Completed;
        record.payment_amount = Some(payment.amount);
        record.payment_comment = Some(payment.comment);
        let confirmed = record.clone();

        self.records.save_all(&records);
        tracing::info!(record_id = %id, amount = payment.amount, "Payment confirmed");
        Ok(Some(confirmed))
    }

    /// Fold imported records into the local list; returns how many were added
    pub fn merge_remote(&self, remote: Vec<Record>) -> usize {
        if remote.is_empty() {
            return 0;
        }
        let mut records = self.records.find_all();
        let added = merge::merge_remote(&mut records, remote, util::now_millis());
        if added > 0 {
            self.records.save_all(&records);
        }
        tracing::info!(added, total = records.len(), "Merged remote records");
        added
    }

    pub fn find_all(&self) -> Vec<Record> {
        self.records.find_all()
    }

    pub fn find_by_id(&self, id: &RecordId) -> Option<Record> {
        self.records.find_by_id(id)
    }

    pub fn find_by_status(&self, status: RecordStatus) -> Vec<Record> {
        self.records.find_by_status(status)
    }

    /// Cancellation log, oldest first
    pub fn deleted_log(&self) -> Vec<DeletedRecordEntry> {
        self.deleted.find_all()
    }

    pub fn car_history(&self) -> Vec<String> {
        self.cars.find_all()
    }
}
