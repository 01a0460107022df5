//! Scripted address lookup for tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{AddressLookup, FetchError, PublicAddress};

/// A mock [`AddressLookup`] that replays a fixed sequence of results.
///
/// Once the script runs out the last successful address is repeated, or
/// [`FetchError::NoEndpoints`] is returned if there never was one.
#[derive(Debug, Default)]
pub struct ScriptedLookup {
    script: Mutex<VecDeque<Result<PublicAddress, FetchError>>>,
    last: Mutex<Option<PublicAddress>>,
    calls: AtomicUsize,
}

impl ScriptedLookup {
    /// Always answers with `address`.
    #[must_use]
    pub fn fixed(address: &str) -> Self {
        Self::sequence(&[address])
    }

    /// Answers with each address in turn.
    #[must_use]
    pub fn sequence(addresses: &[&str]) -> Self {
        let script: VecDeque<Result<PublicAddress, FetchError>> = addresses
            .iter()
            .map(|a| Ok(a.parse::<PublicAddress>().unwrap()))
            .collect();
        Self {
            script: Mutex::new(script),
            ..Self::default()
        }
    }

    /// Fails every lookup.
    #[must_use]
    pub fn failing() -> Self {
        Self::default()
    }

    /// Queues a failure before the remaining script.
    #[must_use]
    pub fn then_fail(self) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Err(FetchError::NoEndpoints));
        self
    }

    /// Queues a successful answer.
    #[must_use]
    pub fn then(self, address: &str) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Ok(address.parse::<PublicAddress>().unwrap()));
        self
    }

    /// Number of lookups performed.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl AddressLookup for ScriptedLookup {
    async fn lookup(&self) -> Result<PublicAddress, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Ok(address)) => {
                *self.last.lock().unwrap() = Some(address);
                Ok(address)
            }
            Some(Err(e)) => Err(e),
            None => (*self.last.lock().unwrap()).ok_or(FetchError::NoEndpoints),
        }
    }
}
