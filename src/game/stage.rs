//! Stage: the scene state layers operate on
//!
//! Owns the live entity collection and the tile map. Iteration order
//! of entities is always insertion order; determinism depends on it.
//! Structural changes are deferred: new entities queue until the level
//! flushes them at end of step, removals are flags purged at the end
//! of the entity pass. Nothing mutates the collection while a pass is
//! iterating.

use crate::math::{Rect, Size, Vec2};
use super::entity::{Entity, EntityId};

/// Grid of solid cells, fixed size per level.
#[derive(Debug, Clone)]
pub struct TileMap {
    tile_size: f32,
    width: usize,
    height: usize,
    solid: Vec<bool>,
}

impl TileMap {
    pub fn new(width: usize, height: usize, tile_size: f32) -> Self {
        Self {
            tile_size,
            width,
            height,
            solid: vec![false; width * height],
        }
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// World-space width of the whole map.
    pub fn world_width(&self) -> f32 {
        self.width as f32 * self.tile_size
    }

    /// World-space height of the whole map.
    pub fn world_height(&self) -> f32 {
        self.height as f32 * self.tile_size
    }

    pub fn set_solid(&mut self, col: usize, row: usize, solid: bool) {
        if col < self.width && row < self.height {
            self.solid[row * self.width + col] = solid;
        }
    }

    /// Cells outside the grid are empty, so actors can fall off the
    /// map bottom and walk past the edges.
    pub fn is_solid(&self, col: i32, row: i32) -> bool {
        if col < 0 || row < 0 {
            return false;
        }
        let (col, row) = (col as usize, row as usize);
        if col >= self.width || row >= self.height {
            return false;
        }
        self.solid[row * self.width + col]
    }

    /// World-space rect of one cell.
    pub fn tile_rect(&self, col: i32, row: i32) -> Rect {
        Rect::new(
            Vec2::new(col as f32 * self.tile_size, row as f32 * self.tile_size),
            Size::new(self.tile_size, self.tile_size),
        )
    }

    /// Solid tiles in the cell range the rect touches. Callers that
    /// need strict overlap (touching edges excluded) filter with
    /// `Rect::overlaps`.
    pub fn solid_tiles_in(&self, rect: Rect) -> Vec<Rect> {
        let first_col = (rect.left() / self.tile_size).floor() as i32;
        let last_col = (rect.right() / self.tile_size).floor() as i32;
        let first_row = (rect.top() / self.tile_size).floor() as i32;
        let last_row = (rect.bottom() / self.tile_size).floor() as i32;

        let mut tiles = Vec::new();
        for row in first_row..=last_row {
            for col in first_col..=last_col {
                if self.is_solid(col, row) {
                    tiles.push(self.tile_rect(col, row));
                }
            }
        }
        tiles
    }
}

/// Live scene state: entities plus the tile map.
pub struct Stage {
    pub tiles: TileMap,
    entities: Vec<Entity>,
    pending: Vec<Entity>,
    next_id: EntityId,
}

impl Stage {
    pub fn new(tiles: TileMap) -> Self {
        Self {
            tiles,
            entities: Vec::new(),
            pending: Vec::new(),
            next_id: EntityId::first(),
        }
    }

    fn take_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id = id.next();
        id
    }

    /// Add an entity immediately. Composition-time only; during a step
    /// use `spawn` so the collection never changes mid-pass.
    pub fn insert(&mut self, mut entity: Entity) -> EntityId {
        let id = self.take_id();
        entity.assign_id(id);
        self.entities.push(entity);
        id
    }

    /// Queue an entity for insertion at end of step.
    /// Its id is assigned now so the caller can hold a handle.
    pub fn spawn(&mut self, mut entity: Entity) -> EntityId {
        let id = self.take_id();
        entity.assign_id(id);
        self.pending.push(entity);
        id
    }

    /// Append all queued entities. Called by the level at step end.
    pub(crate) fn flush_pending(&mut self) {
        self.entities.append(&mut self.pending);
    }

    /// Drop every entity flagged for removal. Called at the end of the
    /// entity pass so later passes in the same step never see them.
    pub(crate) fn purge_removed(&mut self) {
        self.entities.retain(|e| !e.state().remove);
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.iter().any(|e| e.id() == id)
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id() == id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id() == id)
    }

    /// Entities in insertion order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn entities_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Tile map and entity list borrowed together, for passes that
    /// resolve entities against the grid.
    pub fn tiles_and_entities(&mut self) -> (&TileMap, &mut [Entity]) {
        (&self.tiles, &mut self.entities)
    }
}
