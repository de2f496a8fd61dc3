//! Page sessions.
//!
//! Every load of the form page opens a new session with its own controller,
//! so reloading the page starts over with a fresh attempt counter.

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicU64, Ordering},
    },
};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{controller::GenerationController, image_service::ImageGenerator};

pub const MAX_SESSIONS: usize = 256;

pub struct Session<G> {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub controller: GenerationController<G>,
}

struct Entry<G> {
    last_used: u64,
    session: Arc<Session<G>>,
}

/// Live sessions, evicting the least recently used one when full.
///
/// Busy sessions are only evicted when every session is busy.
pub struct SessionRegistry<G> {
    generator: G,
    clock: AtomicU64,
    sessions: Mutex<HashMap<String, Entry<G>>>,
    capacity: usize,
}

impl<G: ImageGenerator + Clone> SessionRegistry<G> {
    pub fn new(generator: G) -> Self {
        Self::with_capacity(generator, MAX_SESSIONS)
    }

    pub fn with_capacity(generator: G, capacity: usize) -> Self {
        Self {
            generator,
            clock: AtomicU64::new(0),
            sessions: Mutex::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    pub fn create(&self) -> Arc<Session<G>> {
        let id = Uuid::new_v4().simple().to_string();
        let session = Arc::new(Session {
            id: id.clone(),
            created_at: Utc::now(),
            controller: GenerationController::new(self.generator.clone()),
        });

        let mut sessions = self.lock();
        while sessions.len() >= self.capacity {
            let Some(victim) = least_recently_used(&sessions) else {
                break;
            };
            sessions.remove(&victim);
            tracing::debug!(session = %victim, "evicted least recently used session");
        }
        sessions.insert(
            id.clone(),
            Entry {
                last_used: self.tick(),
                session: session.clone(),
            },
        );
        tracing::info!(session = %id, active = sessions.len(), "session opened");
        session
    }

    pub fn get(&self, id: &str) -> Option<Arc<Session<G>>> {
        let mut sessions = self.lock();
        let entry = sessions.get_mut(id)?;
        entry.last_used = self.tick();
        Some(entry.session.clone())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn tick(&self) -> u64 {
        self.clock.fetch_add(1, Ordering::Relaxed)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Entry<G>>> {
        self.sessions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn least_recently_used<G: ImageGenerator>(
    sessions: &HashMap<String, Entry<G>>,
) -> Option<String> {
    let idle = sessions
        .iter()
        .filter(|(_, entry)| !entry.session.controller.snapshot().busy)
        .min_by_key(|(_, entry)| entry.last_used);
    idle.or_else(|| sessions.iter().min_by_key(|(_, entry)| entry.last_used))
        .map(|(key, _)| key.clone())
}
