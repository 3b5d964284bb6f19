//! Spawned obstacles and collectibles
//!
//! The registry owns every live entity: it moves them along the scroll axis,
//! removes them once they pass their expiry threshold, and mirrors spawns and
//! removals into the optional front-end factory.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::platform::{EntityFactory, EntityHandle};
use crate::tuning::{EntityTuning, SpawnTuning};

/// What a spawned entity does on contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityCategory {
    /// Ends the run
    Obstacle,
    /// Adds one point
    Collectible,
}

impl EntityCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityCategory::Obstacle => "obstacle",
            EntityCategory::Collectible => "collectible",
        }
    }
}

/// Stable id, allocated in spawn order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// A live obstacle or collectible
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnedEntity {
    pub id: EntityId,
    pub category: EntityCategory,
    /// Lateral lane center
    pub lane_x: f32,
    /// Distance travelled along the scroll axis since spawning
    pub travel_distance: f32,
    pub expiry_threshold: f32,
    /// Scroll speed (units/sec)
    pub speed: f32,
    pub half_extents: Vec2,
    /// Already reported as an obstacle hit; excluded from further overlap tests
    pub struck: bool,
    /// Front-end handle, if a factory is wired
    pub handle: Option<EntityHandle>,
}

impl SpawnedEntity {
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.lane_x, self.travel_distance)
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.position(), self.half_extents)
    }

    pub fn is_expired(&self) -> bool {
        self.travel_distance > self.expiry_threshold
    }
}

/// Owns live entities and their lifetime bookkeeping
pub struct EntityRegistry {
    obstacle: EntityTuning,
    collectible: EntityTuning,
    despawn_line: Option<f32>,
    despawn_only: Option<EntityCategory>,
    entities: Vec<SpawnedEntity>,
    factory: Option<Box<dyn EntityFactory>>,
    next_id: u32,
}

impl EntityRegistry {
    pub fn new(tuning: &SpawnTuning, factory: Option<Box<dyn EntityFactory>>) -> Self {
        Self {
            obstacle: tuning.obstacle,
            collectible: tuning.collectible,
            despawn_line: tuning.despawn_line,
            despawn_only: tuning.despawn_only,
            entities: Vec::new(),
            factory,
            next_id: 1,
        }
    }

    fn tuning_for(&self, category: EntityCategory) -> &EntityTuning {
        match category {
            EntityCategory::Obstacle => &self.obstacle,
            EntityCategory::Collectible => &self.collectible,
        }
    }

    /// Register a new entity at travel distance 0 in the given lane
    pub fn spawn(&mut self, category: EntityCategory, lane_x: f32) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;

        let tuning = *self.tuning_for(category);
        let handle = self
            .factory
            .as_mut()
            .map(|factory| factory.spawn(category, lane_x));

        self.entities.push(SpawnedEntity {
            id,
            category,
            lane_x,
            travel_distance: 0.0,
            expiry_threshold: tuning.expiry_threshold,
            speed: tuning.speed,
            half_extents: Vec2::from_array(tuning.half_extents),
            struck: false,
            handle,
        });
        id
    }

    /// Advance every entity along the scroll axis
    pub fn advance(&mut self, dt: f32) {
        for entity in &mut self.entities {
            entity.travel_distance += entity.speed * dt;
        }
    }

    fn past_despawn_line(&self, entity: &SpawnedEntity) -> bool {
        let Some(line) = self.despawn_line else {
            return false;
        };
        entity.travel_distance > line && self.despawn_only.is_none_or(|c| c == entity.category)
    }

    /// Remove entities past their threshold (or the sensor line).
    /// Returns how many were removed.
    pub fn expire(&mut self) -> usize {
        let expired: Vec<EntityId> = self
            .entities
            .iter()
            .filter(|e| e.is_expired() || self.past_despawn_line(e))
            .map(|e| e.id)
            .collect();
        for &id in &expired {
            log::trace!("Entity {:?} expired", id);
            self.despawn(id);
        }
        expired.len()
    }

    /// Remove an entity and destroy its front-end representation
    pub fn despawn(&mut self, id: EntityId) -> Option<SpawnedEntity> {
        let index = self.entities.iter().position(|e| e.id == id)?;
        let entity = self.entities.remove(index);
        if let (Some(factory), Some(handle)) = (self.factory.as_mut(), entity.handle) {
            factory.destroy(handle);
        }
        Some(entity)
    }

    /// Remove everything (session reload)
    pub fn clear(&mut self) {
        let ids: Vec<EntityId> = self.entities.iter().map(|e| e.id).collect();
        for id in ids {
            self.despawn(id);
        }
    }

    pub fn get(&self, id: EntityId) -> Option<&SpawnedEntity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut SpawnedEntity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpawnedEntity> {
        self.entities.iter()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn count(&self, category: EntityCategory) -> usize {
        self.entities.iter().filter(|e| e.category == category).count()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[derive(Default)]
    struct FactoryLog {
        spawned: Vec<(EntityCategory, f32)>,
        destroyed: Vec<EntityHandle>,
    }

    struct SharedFactory(Rc<RefCell<FactoryLog>>);

    impl EntityFactory for SharedFactory {
        fn spawn(&mut self, category: EntityCategory, lane_x: f32) -> EntityHandle {
            let mut log = self.0.borrow_mut();
            log.spawned.push((category, lane_x));
            EntityHandle(log.spawned.len() as u64)
        }

        fn destroy(&mut self, handle: EntityHandle) {
            self.0.borrow_mut().destroyed.push(handle);
        }
    }

    #[test]
    fn test_expiry_after_threshold() {
        let mut registry = EntityRegistry::new(&SpawnTuning::default(), None);
        let id = registry.spawn(EntityCategory::Obstacle, 1.35);
        assert_eq!(registry.get(id).unwrap().expiry_threshold, 25.0);

        registry.get_mut(id).unwrap().travel_distance = 25.0;
        assert_eq!(registry.expire(), 0);

        registry.get_mut(id).unwrap().travel_distance = 25.01;
        assert_eq!(registry.expire(), 1);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_categories_expire_independently() {
        let mut registry = EntityRegistry::new(&SpawnTuning::default(), None);
        let car = registry.spawn(EntityCategory::Obstacle, -4.05);
        let coin = registry.spawn(EntityCategory::Collectible, 4.05);

        // 2.3s at 10 u/s: past the coin threshold (22), short of the car's (25)
        registry.advance(2.3);
        registry.expire();
        assert!(registry.get(car).is_some());
        assert!(registry.get(coin).is_none());
    }

    #[test]
    fn test_factory_mirrors_lifecycle() {
        let log = Rc::new(RefCell::new(FactoryLog::default()));
        let factory = Box::new(SharedFactory(log.clone()));
        let mut registry = EntityRegistry::new(&SpawnTuning::default(), Some(factory));

        let a = registry.spawn(EntityCategory::Collectible, 1.35);
        registry.spawn(EntityCategory::Obstacle, -1.35);
        assert_eq!(registry.get(a).unwrap().handle, Some(EntityHandle(1)));

        registry.despawn(a);
        registry.clear();
        let log = log.borrow();
        assert_eq!(log.spawned.len(), 2);
        assert_eq!(log.destroyed, vec![EntityHandle(1), EntityHandle(2)]);
    }

    #[test]
    fn test_despawn_line() {
        let tuning = SpawnTuning {
            despawn_line: Some(10.0),
            ..Default::default()
        };
        let mut registry = EntityRegistry::new(&tuning, None);
        registry.spawn(EntityCategory::Obstacle, 1.35);
        registry.advance(1.5);
        assert_eq!(registry.expire(), 1);
    }

    #[test]
    fn test_despawn_line_category_filter() {
        let tuning = SpawnTuning {
            despawn_line: Some(10.0),
            despawn_only: Some(EntityCategory::Collectible),
            ..Default::default()
        };
        let mut registry = EntityRegistry::new(&tuning, None);
        let car = registry.spawn(EntityCategory::Obstacle, 1.35);
        let coin = registry.spawn(EntityCategory::Collectible, -1.35);
        registry.advance(1.5);
        assert_eq!(registry.expire(), 1);
        assert!(registry.get(car).is_some());
        assert!(registry.get(coin).is_none());

        // The car still leaves at its own threshold
        registry.advance(1.1);
        assert_eq!(registry.expire(), 1);
        assert!(registry.is_empty());
    }
}
