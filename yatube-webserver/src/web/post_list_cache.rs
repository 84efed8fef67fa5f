use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use parking_lot::RwLock;
use yatube_application::error::AppError;
use yatube_core::{repositories::PostQuery, usecases};

use super::sqlite;

/// A single page of a post listing
pub type Key = (PostQuery, u64);

#[derive(Default)]
struct Entries {
    // Incremented by every clear. Pages that were loaded
    // before a clear must not be stored afterwards.
    generation: u64,
    pages: HashMap<Key, (Instant, usecases::PostPage)>,
}

/// Read-through cache of post listings.
///
/// Pages are cached without any viewer specific data. Every
/// mutation that might change the contents or the order of
/// a listing must clear the cache.
pub struct PostListCache {
    max_age: Duration,
    entries: RwLock<Entries>,
}

impl PostListCache {
    pub fn new(max_age: Duration) -> Self {
        Self {
            max_age,
            entries: RwLock::new(Entries::default()),
        }
    }

    pub fn query_posts(
        &self,
        db: &sqlite::Connections,
        query: &PostQuery,
        page: u64,
    ) -> Result<usecases::PostPage, AppError> {
        let key = (query.clone(), page);
        let (cached, generation) = {
            let entries = self.entries.read();
            (entries.pages.get(&key).cloned(), entries.generation)
        };
        if let Some((created_at, posts)) = cached {
            if created_at.elapsed() < self.max_age {
                return Ok(posts);
            }
            self.invalidate(&key);
        }
        let posts = usecases::query_posts(&db.shared()?, query, page)?;
        self.insert(key, generation, posts.clone());
        Ok(posts)
    }

    // Returns `false` if the cache has been cleared since
    // `generation` was read.
    fn insert(&self, key: Key, generation: u64, posts: usecases::PostPage) -> bool {
        let mut entries = self.entries.write();
        let max_age = self.max_age;
        entries
            .pages
            .retain(|_, (created_at, _)| created_at.elapsed() < max_age);
        if entries.generation != generation {
            log::debug!("Discarding post listing that was loaded before clearing the cache");
            return false;
        }
        entries.pages.insert(key, (Instant::now(), posts));
        true
    }

    pub fn invalidate(&self, key: &Key) -> bool {
        self.entries.write().pages.remove(key).is_some()
    }

    pub fn clear(&self) {
        let mut entries = self.entries.write();
        if !entries.pages.is_empty() {
            log::debug!("Clearing {} cached post listings", entries.pages.len());
        }
        entries.pages.clear();
        entries.generation = entries.generation.wrapping_add(1);
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries.read().pages.len()
    }

    #[cfg(test)]
    fn generation(&self) -> u64 {
        self.entries.read().generation
    }
}
