use crate::core::error::{ParticleError, Result};

/// Objects that can be flagged for removal from their set.
pub trait Expirable {
    fn has_expired(&self) -> bool;
}

/// Ordered object storage using a flat Vec.
/// Insertion order is preserved and duplicates are allowed; designed for the
/// small object counts a per-frame O(R × N) collision pass can afford.
#[derive(Debug, Clone)]
pub struct ObjectSet<T> {
    objects: Vec<T>,
}

impl<T> ObjectSet<T> {
    pub fn new() -> Self {
        Self {
            objects: Vec::with_capacity(64),
        }
    }

    /// Create a set with a specific capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            objects: Vec::with_capacity(capacity),
        }
    }

    /// Append an object to the end of the set.
    pub fn add(&mut self, object: T) {
        self.objects.push(object);
    }

    /// Remove the object at `index`, preserving the order of the rest.
    pub fn remove_at(&mut self, index: usize) -> Result<T> {
        self.check(index)?;
        Ok(self.objects.remove(index))
    }

    /// Number of objects in the set.
    pub fn size(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Bounds-checked indexed access.
    pub fn get_object_at(&self, index: usize) -> Result<&T> {
        let len = self.objects.len();
        self.objects
            .get(index)
            .ok_or(ParticleError::IndexOutOfBounds { index, len })
    }

    /// Bounds-checked mutable indexed access.
    pub fn get_object_at_mut(&mut self, index: usize) -> Result<&mut T> {
        let len = self.objects.len();
        self.objects
            .get_mut(index)
            .ok_or(ParticleError::IndexOutOfBounds { index, len })
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.objects.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.objects.iter_mut()
    }

    /// Keep only the objects for which `keep` returns true, in order.
    pub fn retain(&mut self, keep: impl FnMut(&T) -> bool) {
        self.objects.retain(keep);
    }

    pub fn clear(&mut self) {
        self.objects.clear();
    }

    fn check(&self, index: usize) -> Result<()> {
        if index < self.objects.len() {
            Ok(())
        } else {
            Err(ParticleError::IndexOutOfBounds {
                index,
                len: self.objects.len(),
            })
        }
    }
}

impl<T: Expirable> ObjectSet<T> {
    /// Drop every expired object. Returns how many were removed.
    pub fn remove_expired(&mut self) -> usize {
        let before = self.objects.len();
        self.objects.retain(|o| !o.has_expired());
        before - self.objects.len()
    }
}

impl<T> Default for ObjectSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Ttl(i32);

    impl Expirable for Ttl {
        fn has_expired(&self) -> bool {
            self.0 < 0
        }
    }

    #[test]
    fn preserves_insertion_order() {
        let mut set = ObjectSet::new();
        set.add('a');
        set.add('b');
        set.add('a');
        assert_eq!(set.size(), 3);
        assert_eq!(*set.get_object_at(0).unwrap(), 'a');
        assert_eq!(*set.get_object_at(1).unwrap(), 'b');
        assert_eq!(*set.get_object_at(2).unwrap(), 'a');
    }

    #[test]
    fn out_of_range_is_an_error() {
        let mut set = ObjectSet::new();
        set.add(1);
        match set.get_object_at(1) {
            Err(ParticleError::IndexOutOfBounds { index, len }) => {
                assert_eq!(index, 1);
                assert_eq!(len, 1);
            }
            other => panic!("expected bounds error, got {:?}", other),
        }
        assert!(set.remove_at(5).is_err());
    }

    #[test]
    fn remove_at_keeps_order() {
        let mut set = ObjectSet::new();
        for i in 0..4 {
            set.add(i);
        }
        assert_eq!(set.remove_at(1).unwrap(), 1);
        let rest: Vec<_> = set.iter().copied().collect();
        assert_eq!(rest, vec![0, 2, 3]);
    }

    #[test]
    fn remove_expired_counts_removals() {
        let mut set = ObjectSet::new();
        set.add(Ttl(3));
        set.add(Ttl(-1));
        set.add(Ttl(0));
        set.add(Ttl(-5));
        assert_eq!(set.remove_expired(), 2);
        assert_eq!(set.size(), 2);
    }
}
