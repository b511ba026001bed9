use crate::{Database, Model, Result};

use baserow_core::{Error, Ref};

use std::{cell::OnceCell, fmt};

/// The rows a link field points to, loaded on first access.
///
/// Each entry is fetched at most once; later accesses return the cached
/// instance. A link without a bound [`Database`] can only return entries
/// that were cached at construction.
#[derive(Clone)]
pub struct LinkedRow<M> {
    db: Option<Database>,
    refs: Vec<Ref>,
    cache: Vec<OnceCell<M>>,
}

impl<M: Model> LinkedRow<M> {
    pub fn new(db: Option<Database>, refs: Vec<Ref>) -> LinkedRow<M> {
        let cache = refs.iter().map(|_| OnceCell::new()).collect();
        LinkedRow { db, refs, cache }
    }

    /// Creates a link whose entries are partially known. `cache` is matched
    /// to `refs` by position.
    pub fn with_cache(
        db: Option<Database>,
        refs: Vec<Ref>,
        cache: impl IntoIterator<Item = Option<M>>,
    ) -> LinkedRow<M> {
        let mut link = LinkedRow::new(db, refs);
        for (cell, instance) in link.cache.iter_mut().zip(cache) {
            if let Some(instance) = instance {
                *cell = OnceCell::from(instance);
            }
        }
        link
    }

    /// Linking new rows is not supported yet.
    pub fn from_models(models: Vec<M>) -> Result<LinkedRow<M>> {
        Err(Error::unsupported_feature(format!(
            "assigning {} new linked rows of {}",
            models.len(),
            M::model_id()
        )))
    }

    pub fn len(&self) -> usize {
        self.refs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    pub fn refs(&self) -> &[Ref] {
        &self.refs
    }

    pub fn ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.refs.iter().map(|r| r.id)
    }

    pub fn is_cached(&self, index: usize) -> bool {
        self.cache.get(index).is_some_and(|cell| cell.get().is_some())
    }

    /// Returns the entry at `index`, fetching it if it was never loaded.
    pub fn get(&self, index: usize) -> Option<Result<&M>> {
        let cell = self.cache.get(index)?;
        if let Some(instance) = cell.get() {
            return Some(Ok(instance));
        }

        let row_id = self.refs[index].id;
        let Some(db) = &self.db else {
            return Some(Err(Error::detached_link(row_id)));
        };

        Some(
            db.load_single::<M>(row_id)
                .map(|instance| cell.get_or_init(|| instance)),
        )
    }

    pub fn iter(&self) -> Iter<'_, M> {
        Iter {
            link: self,
            index: 0,
        }
    }
}

/// Iterator over the entries of a [`LinkedRow`], fetching as it goes.
pub struct Iter<'a, M> {
    link: &'a LinkedRow<M>,
    index: usize,
}

impl<'a, M: Model> Iterator for Iter<'a, M> {
    type Item = Result<&'a M>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.link.get(self.index)?;
        self.index += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.link.len() - self.index;
        (remaining, Some(remaining))
    }
}

impl<'a, M: Model> IntoIterator for &'a LinkedRow<M> {
    type Item = Result<&'a M>;
    type IntoIter = Iter<'a, M>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<M> fmt::Debug for LinkedRow<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkedRow")
            .field("refs", &self.refs)
            .field("attached", &self.db.is_some())
            .finish()
    }
}

impl<M> PartialEq for LinkedRow<M> {
    fn eq(&self, other: &Self) -> bool {
        self.refs == other.refs
    }
}
