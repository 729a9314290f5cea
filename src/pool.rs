//! Growable entity pool with an active list and a free list.
//!
//! An entity lives in exactly one of the two lists at any time, so the same
//! instance can never be handed out twice while it is still in play. Entities
//! move back to the free list only through [`Pool::reclaim_destroyed`], which
//! the session runs after collision resolution.

use tracing::debug;

use crate::entities::Entity;
use crate::geometry::WorldRect;
use crate::renderer::Canvas;

/// Entities that can be recycled by a [`Pool`].
pub trait Poolable: Entity {
    /// Clears transient state (position, health, destroyed flag) before reuse.
    fn reset(&mut self);

    /// Releases external resources held by the entity. Called once per entity
    /// when its pool is disposed.
    fn release(&mut self) {}
}

pub struct Pool<T> {
    name: &'static str,
    active: Vec<T>,
    free: Vec<T>,
    factory: Box<dyn FnMut() -> T>,
    constructed: usize,
}

impl<T: Poolable> Pool<T> {
    /// Creates an empty pool. `factory` builds a new entity whenever the free
    /// list runs dry.
    pub fn new(name: &'static str, factory: impl FnMut() -> T + 'static) -> Self {
        Self {
            name,
            active: Vec::new(),
            free: Vec::new(),
            factory: Box::new(factory),
            constructed: 0,
        }
    }

    /// Moves a free entity (or a newly built one) into play and returns it for
    /// setup. Never fails.
    pub fn acquire(&mut self) -> &mut T {
        let mut entity = match self.free.pop() {
            Some(entity) => entity,
            None => {
                self.constructed += 1;
                debug!(pool = self.name, constructed = self.constructed, "pool grew");
                (self.factory)()
            }
        };
        entity.reset();
        self.active.push(entity);
        let last = self.active.len() - 1;
        &mut self.active[last]
    }

    /// Active entities in activation order.
    pub fn active(&self) -> &[T] {
        &self.active
    }

    pub fn active_mut(&mut self) -> &mut [T] {
        &mut self.active
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    /// Number of entities the factory has built over the pool's lifetime.
    pub fn constructed(&self) -> usize {
        self.constructed
    }

    pub fn update_all(&mut self, delta: f32, bounds: &WorldRect) {
        for entity in &mut self.active {
            entity.update(delta, bounds);
        }
    }

    pub fn draw_all(&self, canvas: &mut dyn Canvas) {
        for entity in &self.active {
            entity.draw(canvas);
        }
    }

    /// Moves every destroyed active entity to the free list. Survivors keep
    /// their relative order. Returns how many were reclaimed.
    pub fn reclaim_destroyed(&mut self) -> usize {
        let before = self.free.len();
        self.free
            .extend(self.active.extract_if(.., |entity| entity.is_destroyed()));
        self.free.len() - before
    }

    /// Releases every entity the pool holds, active or free, and empties both
    /// lists. Calling it again releases nothing.
    pub fn dispose(&mut self) -> usize {
        let mut released = 0;
        for mut entity in self.active.drain(..).chain(self.free.drain(..)) {
            entity.release();
            released += 1;
        }
        if released > 0 {
            debug!(pool = self.name, released, "pool disposed");
        }
        released
    }
}

impl<T> std::fmt::Debug for Pool<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pool")
            .field("name", &self.name)
            .field("active", &self.active.len())
            .field("free", &self.free.len())
            .field("constructed", &self.constructed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Body;
    use std::cell::Cell;
    use std::collections::HashSet;
    use std::rc::Rc;

    /// Minimal pooled entity that remembers which factory call built it.
    #[derive(Debug)]
    struct Token {
        id: usize,
        body: Body,
        resets: usize,
        released: Rc<Cell<usize>>,
    }

    impl Entity for Token {
        fn body(&self) -> &Body {
            &self.body
        }

        fn body_mut(&mut self) -> &mut Body {
            &mut self.body
        }

        fn update(&mut self, delta: f32, _bounds: &WorldRect) {
            self.body.pos.y += delta;
        }

        fn draw(&self, _canvas: &mut dyn Canvas) {}
    }

    impl Poolable for Token {
        fn reset(&mut self) {
            self.body = Body::default();
            self.resets += 1;
        }

        fn release(&mut self) {
            self.released.set(self.released.get() + 1);
        }
    }

    fn token_pool() -> (Pool<Token>, Rc<Cell<usize>>) {
        let released = Rc::new(Cell::new(0));
        let counter = Rc::clone(&released);
        let mut next_id = 0;
        let pool = Pool::new("tokens", move || {
            next_id += 1;
            Token {
                id: next_id,
                body: Body::default(),
                resets: 0,
                released: Rc::clone(&counter),
            }
        });
        (pool, released)
    }

    fn ids(entities: &[Token]) -> Vec<usize> {
        entities.iter().map(|token| token.id).collect()
    }

    #[test]
    fn test_acquire_grows_when_empty() {
        let (mut pool, _) = token_pool();
        pool.acquire();
        pool.acquire();
        assert_eq!(pool.active_count(), 2);
        assert_eq!(pool.free_count(), 0);
        assert_eq!(pool.constructed(), 2);
        assert_eq!(ids(pool.active()), vec![1, 2]);
    }

    #[test]
    fn test_acquire_reuses_and_resets() {
        let (mut pool, _) = token_pool();
        pool.acquire().body.pos.x = 5.0;
        pool.active_mut()[0].destroy();
        assert_eq!(pool.reclaim_destroyed(), 1);

        let reused = pool.acquire();
        assert_eq!(reused.id, 1);
        assert_eq!(reused.resets, 2);
        assert_eq!(reused.body.pos.x, 0.0);
        assert!(!reused.is_destroyed());
        assert_eq!(pool.constructed(), 1);
    }

    #[test]
    fn test_reclaim_keeps_survivor_order() {
        let (mut pool, _) = token_pool();
        for _ in 0..5 {
            pool.acquire();
        }
        pool.active_mut()[1].destroy();
        pool.active_mut()[3].destroy();

        assert_eq!(pool.reclaim_destroyed(), 2);
        assert_eq!(ids(pool.active()), vec![1, 3, 5]);
        assert_eq!(pool.free_count(), 2);
        assert_eq!(pool.reclaim_destroyed(), 0);
    }

    #[test]
    fn test_update_all_touches_active_only() {
        let (mut pool, _) = token_pool();
        pool.acquire();
        pool.acquire();
        pool.active_mut()[0].destroy();
        pool.reclaim_destroyed();

        pool.update_all(1.0, &WorldRect::default());
        assert_eq!(pool.active()[0].body.pos.y, 1.0);
    }

    #[test]
    fn test_dispose_releases_everything_once() {
        let (mut pool, released) = token_pool();
        for _ in 0..3 {
            pool.acquire();
        }
        pool.active_mut()[0].destroy();
        pool.reclaim_destroyed();

        assert_eq!(pool.dispose(), 3);
        assert_eq!(released.get(), 3);
        assert_eq!(pool.active_count(), 0);
        assert_eq!(pool.free_count(), 0);

        assert_eq!(pool.dispose(), 0);
        assert_eq!(released.get(), 3);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Acquire,
            Destroy(usize),
            Reclaim,
        }

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![
                Just(Op::Acquire),
                (0usize..16).prop_map(Op::Destroy),
                Just(Op::Reclaim),
            ]
        }

        proptest! {
            #[test]
            fn test_active_and_free_stay_disjoint(ops in prop::collection::vec(op(), 0..64)) {
                let (mut pool, _) = token_pool();
                for op in ops {
                    match op {
                        Op::Acquire => {
                            let id = pool.acquire().id;
                            let holders = pool.active().iter().filter(|t| t.id == id).count();
                            prop_assert_eq!(holders, 1);
                        }
                        Op::Destroy(idx) => {
                            let len = pool.active_count();
                            if len > 0 {
                                pool.active_mut()[idx % len].destroy();
                            }
                        }
                        Op::Reclaim => {
                            pool.reclaim_destroyed();
                            prop_assert!(pool.active().iter().all(|t| !t.is_destroyed()));
                        }
                    }

                    let active: HashSet<usize> = pool.active().iter().map(|t| t.id).collect();
                    let free: HashSet<usize> = pool.free.iter().map(|t| t.id).collect();
                    prop_assert_eq!(active.len(), pool.active_count());
                    prop_assert_eq!(free.len(), pool.free_count());
                    prop_assert!(active.is_disjoint(&free));
                    prop_assert_eq!(active.len() + free.len(), pool.constructed());
                }
            }
        }
    }
}
