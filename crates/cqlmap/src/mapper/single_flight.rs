use cqlmap_core::Result;

use std::{collections::HashMap, future::Future, hash::Hash, sync::Mutex};
use tokio::sync::watch;
use tracing::debug;

/// Caches loaded values by key, running at most one load per key at a time.
///
/// The first caller for a missing key runs the load; callers arriving while
/// it is in flight wait for its outcome. Successful values are kept. Failures
/// are handed to everyone waiting but are not kept, so the next call loads
/// again.
#[derive(Debug)]
pub(crate) struct SingleFlight<K, V> {
    slots: Mutex<HashMap<K, Slot<V>>>,
}

#[derive(Debug)]
enum Slot<V> {
    Ready(V),
    Pending(watch::Receiver<Option<Result<V>>>),
}

impl<K, V> SingleFlight<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub(crate) fn new() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }

    pub(crate) async fn get_or_load<F, Fut>(&self, key: &K, load: F) -> Result<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V>>,
    {
        let tx = loop {
            let mut rx = {
                let mut slots = self.slots.lock().unwrap();

                match slots.get(key) {
                    Some(Slot::Ready(value)) => return Ok(value.clone()),
                    Some(Slot::Pending(rx)) => {
                        debug!("joining in-flight load");
                        rx.clone()
                    }
                    None => {
                        let (tx, rx) = watch::channel(None);
                        slots.insert(key.clone(), Slot::Pending(rx));
                        break tx;
                    }
                }
            };

            // Clone out of the watch guard so `rx` is free again below.
            let waited = rx
                .wait_for(Option::is_some)
                .await
                .map(|outcome| (*outcome).clone());

            match waited {
                Ok(Some(result)) => return result,
                Ok(None) => {}
                Err(_) => {
                    // The loading caller went away without an outcome. Clear
                    // its slot, unless someone already did, and race again.
                    let mut slots = self.slots.lock().unwrap();

                    if matches!(slots.get(key), Some(Slot::Pending(pending)) if pending.same_channel(&rx))
                    {
                        slots.remove(key);
                    }
                }
            }
        };

        let result = load().await;

        {
            let mut slots = self.slots.lock().unwrap();

            match &result {
                Ok(value) => {
                    slots.insert(key.clone(), Slot::Ready(value.clone()));
                }
                Err(_) => {
                    slots.remove(key);
                }
            }
        }

        tx.send_replace(Some(result.clone()));
        result
    }

    #[cfg(test)]
    fn is_cached(&self, key: &K) -> bool {
        matches!(self.slots.lock().unwrap().get(key), Some(Slot::Ready(_)))
    }
}
