//! Port stubs shared by use-case tests.

use crate::domain::{DomainError, Item, ItemDetails, ItemQuery, ItemSource};
use crate::ports::{DataSourcePort, LlmPort};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Replays scripted responses and counts calls.
pub struct ScriptedLlm {
    responses: Mutex<VecDeque<Result<String, DomainError>>>,
    calls: AtomicUsize,
}

impl ScriptedLlm {
    pub fn new(responses: Vec<Result<String, DomainError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl LlmPort for ScriptedLlm {
    async fn generate(&self, _prompt: &str) -> Result<String, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(DomainError::Invocation("script exhausted".into())))
    }
}

/// In-memory data source with a failure switch and a fetch counter.
pub struct StubSource {
    source: ItemSource,
    items: Vec<Item>,
    details: Mutex<Option<ItemDetails>>,
    failing: AtomicBool,
    fetches: AtomicUsize,
    detail_fetches: AtomicUsize,
}

impl StubSource {
    pub fn new(source: ItemSource, items: Vec<Item>) -> Arc<Self> {
        Self::with_details(source, items, None)
    }

    pub fn with_details(
        source: ItemSource,
        items: Vec<Item>,
        details: Option<ItemDetails>,
    ) -> Arc<Self> {
        Arc::new(Self {
            source,
            items,
            details: Mutex::new(details),
            failing: AtomicBool::new(false),
            fetches: AtomicUsize::new(0),
            detail_fetches: AtomicUsize::new(0),
        })
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn set_details(&self, details: Option<ItemDetails>) {
        *self.details.lock().unwrap() = details;
    }

    pub fn detail_fetches(&self) -> usize {
        self.detail_fetches.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl DataSourcePort for StubSource {
    fn source(&self) -> ItemSource {
        self.source
    }

    async fn fetch(&self, query: &ItemQuery) -> Result<Vec<Item>, DomainError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::Fetch("API Error: 429".into()));
        }
        let term = query.term().map(str::to_lowercase);
        Ok(self
            .items
            .iter()
            .filter(|i| {
                term.as_deref()
                    .is_none_or(|t| i.title.to_lowercase().contains(t))
            })
            .cloned()
            .collect())
    }

    async fn details(&self, _item: &Item) -> Result<Option<ItemDetails>, DomainError> {
        self.detail_fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.details.lock().unwrap().clone())
    }
}

pub fn item(source: ItemSource, id: &str, title: &str, body: &str) -> Item {
    Item {
        id: id.to_string(),
        source,
        title: title.to_string(),
        body_text: body.to_string(),
        status_text: "Introduced".to_string(),
        url: None,
        date: None,
    }
}
