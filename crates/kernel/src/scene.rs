use glam::Vec3;
use rand::Rng;
use rand::distr::Uniform;
use stagehand_assets::Renderable;
use stagehand_common::{EntityId, MathError, Pose};
use std::collections::BTreeMap;

use crate::entity::Entity;

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum SceneError {
    #[error("entity {0:?} is not in the scene")]
    EntityNotFound(EntityId),
    #[error(transparent)]
    Math(#[from] MathError),
}

/// Totals from one [`Scene::update`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub tick: u64,
    pub entities: usize,
    pub applied: usize,
    pub skipped: usize,
}

/// The set of live entities plus the frame counter.
///
/// Uses BTreeMap so updates and frame captures visit entities in the same
/// order on every run.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    entities: BTreeMap<EntityId, Entity>,
    tick: u64,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of completed updates.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.keys().copied()
    }

    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        let id = entity.id();
        tracing::debug!(id = %id.short(), position = ?entity.local().position(), "spawned entity");
        self.entities.insert(id, entity);
        id
    }

    pub fn spawn_at(&mut self, renderable: Renderable, position: Vec3) -> EntityId {
        self.spawn(Entity::at(renderable, position))
    }

    /// Spawn `count` entities sharing `renderable`, each placed uniformly in
    /// the cube `[-extent, extent]^3` with a random yaw.
    pub fn spawn_scattered<R: Rng + ?Sized>(
        &mut self,
        count: usize,
        renderable: Renderable,
        extent: f32,
        rng: &mut R,
    ) -> Result<Vec<EntityId>, SceneError> {
        let degenerate = MathError::DegenerateRange {
            low: -extent,
            high: extent,
        };
        if !extent.is_finite() || extent < 0.0 {
            return Err(degenerate.into());
        }
        // extents past f32::MAX / 2 overflow the width of the range
        let axis = Uniform::new_inclusive(-extent, extent).map_err(|_| degenerate)?;
        let ids = (0..count)
            .map(|_| {
                let position = Vec3::new(rng.sample(&axis), rng.sample(&axis), rng.sample(&axis));
                let yaw = rng.random_range(-std::f32::consts::PI..std::f32::consts::PI);
                let pose = Pose::from_orientation(position, Vec3::new(yaw, 0.0, 0.0));
                self.spawn(Entity::new(renderable, pose))
            })
            .collect();
        Ok(ids)
    }

    pub fn despawn(&mut self, id: EntityId) -> Result<Entity, SceneError> {
        let entity = self
            .entities
            .remove(&id)
            .ok_or(SceneError::EntityNotFound(id))?;
        tracing::debug!(id = %id.short(), "despawned entity");
        Ok(entity)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    /// Like [`Scene::get_mut`], but a missing id is an error.
    pub fn entity_mut(&mut self, id: EntityId) -> Result<&mut Entity, SceneError> {
        self.get_mut(id).ok_or(SceneError::EntityNotFound(id))
    }

    /// Advance one tick: every entity drains its queue and rebuilds its
    /// world matrix before this returns.
    pub fn update(&mut self, dt: f32, total: f32) -> TickReport {
        self.tick += 1;
        let span = tracing::info_span!("scene_update", tick = self.tick);
        let _enter = span.enter();

        let mut report = TickReport {
            tick: self.tick,
            entities: self.entities.len(),
            ..TickReport::default()
        };
        for entity in self.entities.values_mut() {
            let summary = entity.update(dt, total);
            report.applied += summary.applied;
            report.skipped += summary.skipped;
        }
        if report.applied > 0 {
            tracing::debug!(applied = report.applied, skipped = report.skipped, "drained queues");
        }
        report
    }
}
