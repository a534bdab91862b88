use std::collections::VecDeque;
use std::rc::Rc;

use tilenav_core::Point;

use crate::area::NonblockingArea;
use crate::blocking::BlockingMap;
use crate::context::{ContextId, SearchContext};

/// How [`ContextCache::acquire`] came by its context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Acquired {
    /// A context with the same parameters was reassigned in place.
    Recycled,
    /// A new context was allocated below capacity.
    Allocated,
    /// The least recently used context was reassigned.
    Evicted,
}

/// Search contexts in most-recently-used order (front = newest).
#[derive(Debug)]
pub(crate) struct ContextCache {
    contexts: VecDeque<SearchContext>,
    capacity: usize,
}

impl ContextCache {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            contexts: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    fn position(
        &self,
        map: &BlockingMap,
        seed: Point,
        area: NonblockingArea,
        reverse: bool,
    ) -> Option<usize> {
        self.contexts
            .iter()
            .position(|ctx| ctx.matches(map, seed, area, reverse))
    }

    /// Move the context matching these parameters to the front and return
    /// it, keeping its exploration state.
    pub(crate) fn touch(
        &mut self,
        map: &BlockingMap,
        seed: Point,
        area: NonblockingArea,
        reverse: bool,
    ) -> Option<&mut SearchContext> {
        let i = self.position(map, seed, area, reverse)?;
        if i > 0 {
            let ctx = self.contexts.remove(i)?;
            self.contexts.push_front(ctx);
        }
        self.contexts.front_mut()
    }

    /// Return a freshly assigned context at the front.
    ///
    /// A context already matching the parameters is reused rather than
    /// duplicated; otherwise a new one is allocated, or the least recently
    /// used one is overwritten once the cache is full.
    pub(crate) fn acquire(
        &mut self,
        id: ContextId,
        map: &Rc<BlockingMap>,
        seed: Point,
        area: NonblockingArea,
        reverse: bool,
    ) -> (&mut SearchContext, Acquired) {
        let recycled = self
            .position(map, seed, area, reverse)
            .and_then(|i| self.contexts.remove(i));
        let (ctx, how) = match recycled {
            Some(mut ctx) => {
                ctx.assign(id, Rc::clone(map), seed, area, reverse);
                (ctx, Acquired::Recycled)
            }
            None if self.contexts.len() < self.capacity => (
                SearchContext::new(id, Rc::clone(map), seed, area, reverse),
                Acquired::Allocated,
            ),
            None => match self.contexts.pop_back() {
                Some(mut ctx) => {
                    log::debug!("evicting {} (seed {}) for {seed}", ctx.id(), ctx.seed());
                    ctx.assign(id, Rc::clone(map), seed, area, reverse);
                    (ctx, Acquired::Evicted)
                }
                None => (
                    SearchContext::new(id, Rc::clone(map), seed, area, reverse),
                    Acquired::Allocated,
                ),
            },
        };
        self.contexts.push_front(ctx);
        (&mut self.contexts[0], how)
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.contexts.len()
    }

    pub(crate) fn clear(&mut self) {
        self.contexts.clear();
    }

    #[cfg(test)]
    pub(crate) fn ids(&self) -> Vec<ContextId> {
        self.contexts.iter().map(SearchContext::id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::BlockingKey;
    use crate::test_support::{AsciiTerrain, ground};

    const NONE: NonblockingArea = NonblockingArea::NONE;

    fn map() -> Rc<BlockingMap> {
        let t = AsciiTerrain::open(4, 4);
        let key = BlockingKey::new(1, ground());
        Rc::new(BlockingMap::build(&t, key, 1).unwrap())
    }

    fn acquire(cache: &mut ContextCache, id: u64, m: &Rc<BlockingMap>, x: i32) -> Acquired {
        let (_, how) = cache.acquire(ContextId(id), m, Point::new(x, 0), NONE, true);
        how
    }

    #[test]
    fn allocates_until_full_then_evicts_oldest() {
        let m = map();
        let mut cache = ContextCache::new(2);
        assert_eq!(acquire(&mut cache, 1, &m, 0), Acquired::Allocated);
        assert_eq!(acquire(&mut cache, 2, &m, 1), Acquired::Allocated);
        assert_eq!(cache.ids(), vec![ContextId(2), ContextId(1)]);
        assert_eq!(acquire(&mut cache, 3, &m, 2), Acquired::Evicted);
        assert_eq!(cache.ids(), vec![ContextId(3), ContextId(2)]);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn matching_context_is_recycled_not_duplicated() {
        let m = map();
        let mut cache = ContextCache::new(4);
        acquire(&mut cache, 1, &m, 0);
        acquire(&mut cache, 2, &m, 1);
        assert_eq!(acquire(&mut cache, 3, &m, 0), Acquired::Recycled);
        assert_eq!(cache.ids(), vec![ContextId(3), ContextId(2)]);
    }

    #[test]
    fn touch_promotes_without_resetting() {
        let m = map();
        let mut cache = ContextCache::new(4);
        let (ctx, _) = cache.acquire(ContextId(1), &m, Point::ZERO, NONE, true);
        let generation = ctx.generation();
        acquire(&mut cache, 2, &m, 1);

        let ctx = cache.touch(&m, Point::ZERO, NONE, true).unwrap();
        assert_eq!(ctx.id(), ContextId(1));
        assert_eq!(ctx.generation(), generation);
        assert_eq!(cache.ids(), vec![ContextId(1), ContextId(2)]);

        assert!(cache.touch(&m, Point::ZERO, NONE, false).is_none());
        cache.clear();
        assert!(cache.touch(&m, Point::ZERO, NONE, true).is_none());
    }
}
