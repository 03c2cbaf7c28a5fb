use crate::config::AnswerConfig;
use crate::engine::BoundedStack;
use crate::error::{CalcError, CalcResult};
use log::{debug, warn};
use std::collections::VecDeque;
use std::fmt;

/// Paged history of computed results.
///
/// Answers are addressed by the chronological index [`AnswerStore::append`]
/// returned. Every page but the one being filled is full, so retained answer
/// `n` lives in page `n / page_capacity`, slot `n % page_capacity`.
#[derive(Debug, Clone)]
pub struct AnswerStore {
    pages: VecDeque<BoundedStack<f64>>,
    page_capacity: usize,
    /// Answers currently retained.
    len: usize,
    /// Answers dropped from the front by eviction.
    evicted: usize,
    auto_evict: bool,
}

impl AnswerStore {
    pub fn new(page_count: usize, page_capacity: usize) -> CalcResult<Self> {
        Self::with_config(&AnswerConfig::new(page_count, page_capacity))
    }

    pub fn with_config(config: &AnswerConfig) -> CalcResult<Self> {
        if config.page_count == 0 {
            return Err(CalcError::InvalidSize { what: "page count" });
        }
        if config.page_capacity == 0 {
            return Err(CalcError::InvalidSize {
                what: "page capacity",
            });
        }

        let mut pages = VecDeque::new();
        pages
            .try_reserve_exact(config.page_count)
            .map_err(|_| CalcError::OutOfMemory)?;
        for _ in 0..config.page_count {
            pages.push_back(BoundedStack::new(config.page_capacity)?);
        }

        Ok(Self {
            pages,
            page_capacity: config.page_capacity,
            len: 0,
            evicted: 0,
            auto_evict: config.auto_evict,
        })
    }

    /// Stores `value` and returns the index it can be referenced by.
    pub fn append(&mut self, value: f64) -> CalcResult<usize> {
        let index = self.next_index();
        index.checked_add(1).ok_or(CalcError::CountOverflow)?;

        // The page for the next answer is added before this one is stored, so a
        // failed growth leaves the store as it was.
        let fills_last_page = self.len + 1 == self.capacity();
        if fills_last_page && !self.auto_evict {
            self.grow()?;
        }

        let page = self.len / self.page_capacity;
        self.pages[page].push(value)?;
        self.len += 1;
        debug!("stored A{index} = {value}");

        if fills_last_page && self.auto_evict {
            self.evict_oldest();
        }
        Ok(index)
    }

    /// Looks up the answer stored under `index`.
    pub fn get(&self, index: usize) -> CalcResult<f64> {
        let position = index
            .checked_sub(self.evicted)
            .filter(|position| *position < self.len)
            .ok_or_else(|| CalcError::invalid_reference(format!("A{index}")))?;

        self.pages[position / self.page_capacity]
            .get(position % self.page_capacity)
            .copied()
            .ok_or_else(|| CalcError::invalid_reference(format!("A{index}")))
    }

    /// The most recently stored answer.
    pub fn last(&self) -> Option<f64> {
        let position = self.len.checked_sub(1)?;
        self.pages[position / self.page_capacity]
            .get(position % self.page_capacity)
            .copied()
    }

    pub fn set_eviction_policy(&mut self, enabled: bool) {
        self.auto_evict = enabled;
    }

    pub fn toggle_auto_evict(&mut self) {
        self.auto_evict = !self.auto_evict;
    }

    pub fn auto_evict(&self) -> bool {
        self.auto_evict
    }

    /// Number of answers still reachable.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Index the next appended answer will receive.
    pub fn next_index(&self) -> usize {
        self.evicted + self.len
    }

    /// Oldest index still reachable.
    pub fn first_index(&self) -> usize {
        self.evicted
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn page_capacity(&self) -> usize {
        self.page_capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.pages
            .iter()
            .flat_map(|page| page.iter().copied())
            .enumerate()
            .map(move |(position, value)| (self.evicted + position, value))
    }

    fn capacity(&self) -> usize {
        self.pages.len() * self.page_capacity
    }

    fn grow(&mut self) -> CalcResult<()> {
        self.pages
            .len()
            .checked_add(1)
            .and_then(|pages| pages.checked_mul(self.page_capacity))
            .ok_or(CalcError::CountOverflow)?;
        self.pages
            .try_reserve(1)
            .map_err(|_| CalcError::OutOfMemory)?;
        self.pages.push_back(BoundedStack::new(self.page_capacity)?);
        debug!("answer store grew to {} pages", self.pages.len());
        Ok(())
    }

    fn evict_oldest(&mut self) {
        if let Some(mut page) = self.pages.pop_front() {
            warn!(
                "evicting answers A{} to A{}",
                self.evicted,
                self.evicted + page.len() - 1
            );
            self.len -= page.len();
            self.evicted += page.len();
            page.clear();
            self.pages.push_back(page);
        }
    }
}

impl fmt::Display for AnswerStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, value) in self.iter() {
            writeln!(f, "A{index} = {value}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_append_and_get() {
        let mut store = AnswerStore::new(1, 4).unwrap();
        for i in 0..10 {
            assert_eq!(store.append(i as f64 * 1.5).unwrap(), i);
        }
        assert_eq!(store.len(), 10);
        for i in 0..10 {
            assert_eq!(store.get(i), Ok(i as f64 * 1.5));
        }
        assert!(matches!(
            store.get(10),
            Err(CalcError::InvalidAnswerReference { .. })
        ));
    }

    #[test]
    fn test_grows_one_page_when_full() {
        let mut store = AnswerStore::new(2, 3).unwrap();
        for i in 0..5 {
            store.append(i as f64).unwrap();
        }
        assert_eq!(store.page_count(), 2);
        store.append(5.0).unwrap();
        assert_eq!(store.page_count(), 3);
        assert_eq!(store.get(5), Ok(5.0));
    }

    #[test]
    fn test_eviction_drops_oldest_page() {
        let mut store = AnswerStore::new(2, 3).unwrap();
        store.set_eviction_policy(true);
        for i in 0..5 {
            store.append(i as f64).unwrap();
        }
        assert_eq!(store.len(), 5);

        store.append(5.0).unwrap();
        assert_eq!(store.len(), 3);
        assert_eq!(store.page_count(), 2);
        for i in 0..3 {
            assert!(store.get(i).is_err());
        }
        for i in 3..6 {
            assert_eq!(store.get(i), Ok(i as f64));
        }
        assert_eq!(store.first_index(), 3);
        assert_eq!(store.append(6.0), Ok(6));
        assert_eq!(store.get(6), Ok(6.0));
    }

    #[test]
    fn test_eviction_policy_is_not_retroactive() {
        let mut store = AnswerStore::new(1, 2).unwrap();
        store.append(1.0).unwrap();
        store.append(2.0).unwrap();
        assert_eq!(store.page_count(), 2);

        store.toggle_auto_evict();
        assert!(store.auto_evict());
        assert_eq!(store.page_count(), 2);
        assert_eq!(store.get(0), Ok(1.0));

        store.append(3.0).unwrap();
        store.append(4.0).unwrap();
        assert_eq!(store.len(), 2);
        assert!(store.get(1).is_err());
        assert_eq!(store.get(2), Ok(3.0));
    }

    #[test]
    fn test_count_overflow_leaves_store_unchanged() {
        let mut store = AnswerStore::new(1, 4).unwrap();
        store.evicted = usize::MAX - 1;
        assert_eq!(store.append(1.0), Ok(usize::MAX - 1));

        assert_eq!(store.append(2.0), Err(CalcError::CountOverflow));
        assert_eq!(store.len(), 1);
        assert_eq!(store.next_index(), usize::MAX);
        assert_eq!(store.get(usize::MAX - 1), Ok(1.0));
        assert_eq!(store.last(), Some(1.0));
    }

    #[test]
    fn test_failed_growth_leaves_store_unchanged() {
        let page_capacity = usize::MAX / 2 + 1;
        let mut store = AnswerStore::new(1, page_capacity).unwrap();
        // Pretend the only page is one answer short of full.
        store.len = page_capacity - 1;

        for _ in 0..2 {
            assert_eq!(store.append(1.0), Err(CalcError::CountOverflow));
            assert_eq!(store.len(), page_capacity - 1);
            assert_eq!(store.page_count(), 1);
        }
    }

    #[test]
    fn test_evicting_config_keeps_a_page_of_history() {
        let config = AnswerConfig::new(1, 2).with_auto_evict(true);
        let mut store = AnswerStore::with_config(&config).unwrap();
        for i in 0..4 {
            store.append(i as f64).unwrap();
        }
        assert_eq!(store.page_count(), 2);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(2), Ok(2.0));
        assert_eq!(store.get(3), Ok(3.0));
    }

    #[test]
    fn test_last() {
        let mut store = AnswerStore::new(1, 2).unwrap();
        assert_eq!(store.last(), None);
        store.append(4.0).unwrap();
        store.append(8.0).unwrap();
        assert_eq!(store.last(), Some(8.0));
    }

    #[test]
    fn test_zero_sizes_rejected() {
        assert!(matches!(
            AnswerStore::new(0, 8),
            Err(CalcError::InvalidSize { .. })
        ));
        assert!(matches!(
            AnswerStore::new(8, 0),
            Err(CalcError::InvalidSize { .. })
        ));
    }

    #[test]
    fn test_display() {
        let mut store = AnswerStore::new(1, 4).unwrap();
        store.append(1.5).unwrap();
        store.append(-2.0).unwrap();
        assert_eq!(store.to_string(), "A0 = 1.5\nA1 = -2\n");
    }

    #[test]
    fn test_default_store_is_lazy() {
        let store = AnswerStore::with_config(&AnswerConfig::default()).unwrap();
        assert_eq!(store.page_count(), 1024);
        assert_eq!(store.page_capacity(), 8192);
        assert!(store.is_empty());
    }

    #[test]
    fn test_random_appends_round_trip() {
        let mut rng = rand::rng();
        for _ in 0..20 {
            let page_capacity = rng.random_range(1..8);
            let page_count = rng.random_range(1..4);
            let count = rng.random_range(0..100);
            let mut store = AnswerStore::new(page_count, page_capacity).unwrap();
            let values: Vec<f64> = (0..count).map(|_| rng.random_range(-1e6..1e6)).collect();
            for value in &values {
                store.append(*value).unwrap();
            }
            assert_eq!(store.len(), count);
            for (index, value) in values.iter().enumerate() {
                assert_eq!(store.get(index), Ok(*value));
            }
            assert!(store.get(count).is_err());
            assert!(store.len() <= store.page_count() * store.page_capacity());
        }
    }
}
