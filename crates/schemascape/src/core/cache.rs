//! Parse result cache
//!
//! Editors re-submit the same text on every keystroke pause. The cache keys
//! parse results by the text itself and the format hint, so repeated
//! submissions skip the parse entirely. Failed parses are cached too.
//! Once the cache holds `capacity` entries the oldest one is evicted.

use std::collections::{HashMap, VecDeque};

use tracing::trace;

use super::{DatabaseSchema, SchemaFormat};

/// Entries kept by [`ParseCache::new`]
pub const DEFAULT_CACHE_CAPACITY: usize = 64;

type CacheKey = (String, Option<SchemaFormat>);

#[derive(Debug)]
pub struct ParseCache {
    entries: HashMap<CacheKey, Option<DatabaseSchema>>,
    /// Insertion order, oldest first
    order: VecDeque<CacheKey>,
    capacity: usize,
    hits: usize,
    misses: usize,
}

impl Default for ParseCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }
}

impl ParseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A cache holding at most `capacity` results (at least one)
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity: capacity.max(1),
            hits: 0,
            misses: 0,
        }
    }

    /// Return the cached result for this text, parsing it on first sight
    pub fn get_or_parse(
        &mut self,
        text: &str,
        format_hint: Option<SchemaFormat>,
    ) -> Option<DatabaseSchema> {
        let key = (text.to_string(), format_hint);
        if let Some(cached) = self.entries.get(&key) {
            self.hits += 1;
            trace!(text_len = text.len(), ?format_hint, "Parse cache hit");
            return cached.clone();
        }

        self.misses += 1;
        let parsed = crate::parse_schema(text, format_hint);
        while self.entries.len() >= self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
            trace!(capacity = self.capacity, "Evicted oldest parse result");
        }
        self.order.push_back(key.clone());
        self.entries.insert(key, parsed.clone());
        parsed
    }

    pub fn contains(&self, text: &str, format_hint: Option<SchemaFormat>) -> bool {
        self.entries.contains_key(&(text.to_string(), format_hint))
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
        self.hits = 0;
        self.misses = 0;
    }
}
