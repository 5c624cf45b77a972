use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::core::models::BaseEntity;

/// Id-keyed store that hands out ids on insertion. Iteration is always in
/// id order, which doubles as insertion order.
#[derive(Debug, Clone)]
pub struct Repository<T: BaseEntity> {
    items: BTreeMap<i32, T>,
    next_id: i32,
}

impl<T: BaseEntity> Default for Repository<T> {
    fn default() -> Self {
        Self {
            items: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<T: BaseEntity> Repository<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Stores `entity` under a fresh id and returns that id.
    pub fn insert(&mut self, mut entity: T) -> i32 {
        let id = self.next_id;
        self.next_id += 1;
        entity.set_id(id);
        self.items.insert(id, entity);
        id
    }

    pub fn get(&self, id: i32) -> Option<&T> {
        self.items.get(&id)
    }

    pub fn get_mut(&mut self, id: i32) -> Option<&mut T> {
        self.items.get_mut(&id)
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.items.values()
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.items.values_mut()
    }

    pub fn query(&self) -> Query<'_, T> {
        Query {
            items: &self.items,
            filters: Vec::new(),
            cmp: None,
        }
    }
}

/// Filter-then-sort view over a repository.
pub struct Query<'a, T: BaseEntity> {
    items: &'a BTreeMap<i32, T>,
    filters: Vec<Box<dyn Fn(&T) -> bool + 'a>>,
    cmp: Option<Box<dyn Fn(&T, &T) -> Ordering + 'a>>,
}

impl<'a, T: BaseEntity> Query<'a, T> {
    pub fn r#where(mut self, pred: impl Fn(&T) -> bool + 'a) -> Self {
        self.filters.push(Box::new(pred));
        self
    }

    pub fn order_with(mut self, cmp: impl Fn(&T, &T) -> Ordering + 'a) -> Self {
        self.cmp = Some(Box::new(cmp));
        self
    }

    /// Matching entities in comparator order; equal entities, or all of them
    /// without a comparator, stay in id order.
    pub fn collect(self) -> Vec<&'a T> {
        let mut out: Vec<&'a T> = self
            .items
            .values()
            .filter(|e| self.filters.iter().all(|f| f(*e)))
            .collect();
        if let Some(cmp) = &self.cmp {
            out.sort_by(|a, b| cmp(*a, *b));
        }
        out
    }

    pub fn ids(self) -> Vec<i32> {
        self.collect().into_iter().map(|e| e.id()).collect()
    }
}
