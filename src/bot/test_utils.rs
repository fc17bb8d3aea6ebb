use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use super::{
    api::{ApiError, Quote, QuoteSource},
    dispatcher::HandlerResult,
    outbox::{Outbox, Reply},
};

/* Test doubles for the two collaborators of the processor. */

pub fn homer_quote() -> Quote {
    Quote {
        quote: "D'oh!".to_string(),
        character: "Homer Simpson".to_string(),
        image: "http://example.com/homer.png".to_string(),
    }
}

// Serves the same answer every time and counts how often it was asked.
#[derive(Clone)]
pub struct StubSource {
    quote: Option<Quote>,
    fail: bool,
    fetches: Arc<AtomicUsize>,
}

impl StubSource {
    pub fn serving(quote: Option<Quote>) -> Self {
        StubSource {
            quote,
            fail: false,
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing() -> Self {
        StubSource {
            quote: None,
            fail: true,
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl QuoteSource for StubSource {
    async fn fetch_quote(&self) -> Result<Option<Quote>, ApiError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(ApiError::EmptyResponse)
        } else {
            Ok(self.quote.clone())
        }
    }
}

// Records every reply instead of sending it.
#[derive(Clone, Default)]
pub struct RecordingOutbox {
    sent: Arc<Mutex<Vec<Reply>>>,
}

impl RecordingOutbox {
    pub fn sent(&self) -> Vec<Reply> {
        self.sent.lock().unwrap().clone()
    }
}

impl Outbox for RecordingOutbox {
    async fn deliver(&self, reply: Reply) -> HandlerResult {
        self.sent.lock().unwrap().push(reply);
        Ok(())
    }
}
