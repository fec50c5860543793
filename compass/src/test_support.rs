//! In-memory endpoint fakes for unit tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use shared::{Entity, NewWallet, Wallet};
use tokio::sync::oneshot;

use crate::core::error::{AppError, Result};
use crate::core::service::{Collection, Document, NestedCollection};

/// Minimal entity used where the record shape does not matter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub name: String,
}

impl Entity for Note {
    type Draft = String;
    const KIND: &'static str = "notes";

    fn id(&self) -> &str {
        &self.id
    }
}

pub fn note(id: &str, name: &str) -> Note {
    Note {
        id: id.to_string(),
        name: name.to_string(),
    }
}

/// Builds the record a server would return for a draft.
pub trait FromDraft: Entity {
    fn from_draft(id: String, draft: &Self::Draft) -> Self;
}

impl FromDraft for Note {
    fn from_draft(id: String, draft: &String) -> Self {
        Note { id, name: draft.clone() }
    }
}

impl FromDraft for Wallet {
    fn from_draft(id: String, draft: &NewWallet) -> Self {
        Wallet {
            id,
            address: draft.address.clone(),
            name: draft.name.clone(),
            blockchain: draft.blockchain.clone(),
            group: draft.group.clone(),
            is_archived: false,
            gas_logs: Vec::new(),
        }
    }
}

/// A server-side collection held in memory.
pub struct FakeCollection<T> {
    items: Mutex<Vec<T>>,
    next_id: AtomicUsize,
    fail: Mutex<Option<AppError>>,
    held_lists: Mutex<VecDeque<oneshot::Receiver<()>>>,
    lists_started: AtomicUsize,
}

impl<T> Default for FakeCollection<T> {
    fn default() -> Self {
        Self {
            items: Mutex::new(Vec::new()),
            next_id: AtomicUsize::new(1),
            fail: Mutex::new(None),
            held_lists: Mutex::new(VecDeque::new()),
            lists_started: AtomicUsize::new(0),
        }
    }
}

impl<T: FromDraft> FakeCollection<T> {
    pub fn with(items: Vec<T>) -> Self {
        let fake = Self::default();
        *fake.items.lock() = items;
        fake
    }

    /// Make the next call fail with `error`.
    pub fn fail_next(&self, error: AppError) {
        *self.fail.lock() = Some(error);
    }

    /// Hold the next `list` call until the returned sender fires (or is dropped).
    pub fn hold_next_list(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.held_lists.lock().push_back(rx);
        tx
    }

    pub fn lists_started(&self) -> usize {
        self.lists_started.load(Ordering::SeqCst)
    }

    pub fn server_items(&self) -> Vec<T> {
        self.items.lock().clone()
    }

    fn check(&self) -> Result<()> {
        match self.fail.lock().take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl<T: FromDraft> Collection<T> for FakeCollection<T> {
    fn path(&self) -> &str {
        "/fake"
    }

    async fn list(&self) -> Result<Vec<T>> {
        self.lists_started.fetch_add(1, Ordering::SeqCst);
        let held = self.held_lists.lock().pop_front();
        if let Some(release) = held {
            let _ = release.await;
        }
        self.check()?;
        Ok(self.server_items())
    }

    async fn create(&self, draft: &T::Draft) -> Result<T> {
        self.check()?;
        let id = format!("{}-{}", T::KIND, self.next_id.fetch_add(1, Ordering::SeqCst));
        let record = T::from_draft(id, draft);
        self.items.lock().push(record.clone());
        Ok(record)
    }

    async fn update(&self, record: &T) -> Result<T> {
        self.check()?;
        let mut items = self.items.lock();
        match items.iter_mut().find(|item| item.id() == record.id()) {
            Some(slot) => {
                *slot = record.clone();
                Ok(record.clone())
            }
            None => Err(AppError::Http {
                status: 404,
                message: "Not found".to_string(),
            }),
        }
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.check()?;
        self.items.lock().retain(|item| item.id() != id);
        Ok(())
    }
}

type Builder<C> = Box<dyn Fn(String, &<C as Entity>::Draft) -> C + Send + Sync>;

/// Nested endpoint that echoes what it is sent.
pub struct FakeNested<C: Entity> {
    build: Builder<C>,
    next_id: AtomicUsize,
    calls: AtomicUsize,
    fail: Mutex<Option<AppError>>,
}

impl<C: Entity> FakeNested<C> {
    pub fn new(build: impl Fn(String, &C::Draft) -> C + Send + Sync + 'static) -> Self {
        Self {
            build: Box::new(build),
            next_id: AtomicUsize::new(1),
            calls: AtomicUsize::new(0),
            fail: Mutex::new(None),
        }
    }

    pub fn fail_next(&self, error: AppError) {
        *self.fail.lock() = Some(error);
    }

    /// Number of requests received.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.fail.lock().take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl<C: Entity> NestedCollection<C> for FakeNested<C> {
    async fn create(&self, _parent_id: &str, draft: &C::Draft) -> Result<C> {
        self.check()?;
        let id = format!("{}-{}", C::KIND, self.next_id.fetch_add(1, Ordering::SeqCst));
        Ok((self.build)(id, draft))
    }

    async fn update(&self, _parent_id: &str, record: &C) -> Result<C> {
        self.check()?;
        Ok(record.clone())
    }

    async fn delete(&self, _parent_id: &str, _id: &str) -> Result<()> {
        self.check()
    }
}

/// A singleton document held in memory.
pub struct FakeDocument<T> {
    value: Mutex<T>,
    fail: Mutex<Option<AppError>>,
}

impl<T: Clone + Send + Sync> FakeDocument<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Mutex::new(value),
            fail: Mutex::new(None),
        }
    }

    pub fn fail_next(&self, error: AppError) {
        *self.fail.lock() = Some(error);
    }

    fn check(&self) -> Result<()> {
        match self.fail.lock().take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl<T: Clone + Send + Sync + 'static> Document<T> for FakeDocument<T> {
    fn path(&self) -> &str {
        "/fake-document"
    }

    async fn get(&self) -> Result<T> {
        self.check()?;
        Ok(self.value.lock().clone())
    }

    async fn put(&self, document: &T) -> Result<T> {
        self.check()?;
        *self.value.lock() = document.clone();
        Ok(document.clone())
    }
}
