use crate::error::{CalcError, CalcResult};

/// A stack that refuses to grow past the capacity it was built with.
///
/// The backing buffer is reserved on the first push, so an unused stack costs
/// nothing beyond its header.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundedStack<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> BoundedStack<T> {
    pub fn new(capacity: usize) -> CalcResult<Self> {
        if capacity == 0 {
            return Err(CalcError::InvalidSize {
                what: "stack capacity",
            });
        }
        Ok(Self {
            items: Vec::new(),
            capacity,
        })
    }

    pub fn push(&mut self, item: T) -> CalcResult<()> {
        if self.is_full() {
            return Err(CalcError::StackExhausted {
                capacity: self.capacity,
            });
        }
        if self.items.capacity() == 0 {
            self.items
                .try_reserve_exact(self.capacity)
                .map_err(|_| CalcError::OutOfMemory)?;
        }
        self.items.push(item);
        Ok(())
    }

    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    pub fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    /// Slot `index` counted from the bottom of the stack.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() == self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
