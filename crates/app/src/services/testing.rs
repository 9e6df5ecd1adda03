//! In-memory fakes shared by the service tests.

use std::future::Future;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use jsonserver_domain::document::Document;
use jsonserver_domain::error::JsonServerError;

use crate::ports::{DocumentStore, IdGenerator};

pub(crate) struct InMemoryDocumentStore {
    document: Mutex<Document>,
    saves: AtomicUsize,
    broken: bool,
}

impl InMemoryDocumentStore {
    pub(crate) fn with(value: serde_json::Value) -> Self {
        Self {
            document: Mutex::new(serde_json::from_value(value).unwrap()),
            saves: AtomicUsize::new(0),
            broken: false,
        }
    }

    pub(crate) fn broken() -> Self {
        Self {
            document: Mutex::new(Document::default()),
            saves: AtomicUsize::new(0),
            broken: true,
        }
    }

    pub(crate) fn snapshot(&self) -> serde_json::Value {
        serde_json::to_value(&*self.document.lock().unwrap()).unwrap()
    }

    pub(crate) fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    fn failure() -> JsonServerError {
        JsonServerError::Internal(Box::new(std::io::Error::other("store unavailable")))
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn load(&self) -> impl Future<Output = Result<Document, JsonServerError>> + Send {
        let result = if self.broken {
            Err(Self::failure())
        } else {
            Ok(self.document.lock().unwrap().clone())
        };
        async { result }
    }

    fn save(&self, document: Document) -> impl Future<Output = Result<(), JsonServerError>> + Send {
        let result = if self.broken {
            Err(Self::failure())
        } else {
            *self.document.lock().unwrap() = document;
            self.saves.fetch_add(1, Ordering::SeqCst);
            Ok(())
        };
        async { result }
    }
}

/// Hands out a fixed list of candidates, cycling when exhausted.
pub(crate) struct SequenceIdGenerator {
    candidates: Vec<String>,
    next: AtomicUsize,
}

impl SequenceIdGenerator {
    pub(crate) fn new<const N: usize>(candidates: [&str; N]) -> Self {
        Self {
            candidates: candidates.iter().map(ToString::to_string).collect(),
            next: AtomicUsize::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.next.load(Ordering::SeqCst)
    }
}

impl IdGenerator for SequenceIdGenerator {
    fn next_id(&self) -> String {
        let index = self.next.fetch_add(1, Ordering::SeqCst);
        self.candidates[index % self.candidates.len()].clone()
    }
}
