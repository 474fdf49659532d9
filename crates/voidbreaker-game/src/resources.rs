//! World resources shared with collaborators
//!
//! Input and viewport flow in before a tick; the render queue and sound
//! events flow out after it.

use glam::Vec2;
use voidbreaker_core::{Aabb, Color};
use voidbreaker_ecs::Entity;

/// Current screen size in world units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(0.0, self.width, 0.0, self.height)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// Player intent for this tick, already decoded from keyboard/gamepad
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
}

impl InputState {
    /// Unit steering direction, or zero with no input
    pub fn direction(&self) -> Vec2 {
        let x = (self.right as i8 - self.left as i8) as f32;
        let y = (self.down as i8 - self.up as i8) as f32;
        Vec2::new(x, y).normalize_or_zero()
    }
}

/// Time scale applied to entities that do not carry their own `TimeScale`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldClock {
    pub scale: f32,
}

impl Default for WorldClock {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

/// Abstract sound identifiers; the audio collaborator maps them to assets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Fire,
    BlockHit,
    BlockDestroyed,
    PickupCollected,
    ShieldHit,
    ShieldBroken,
    ShipHit,
    ShipDestroyed,
}

impl SoundCue {
    pub fn id(self) -> &'static str {
        match self {
            Self::Fire => "sfx.fire",
            Self::BlockHit => "sfx.block_hit",
            Self::BlockDestroyed => "sfx.block_destroyed",
            Self::PickupCollected => "sfx.pickup",
            Self::ShieldHit => "sfx.shield_hit",
            Self::ShieldBroken => "sfx.shield_broken",
            Self::ShipHit => "sfx.ship_hit",
            Self::ShipDestroyed => "sfx.ship_destroyed",
        }
    }
}

/// A cue raised by an entity during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoundEvent {
    pub source: Entity,
    pub cue: SoundCue,
}

/// Cues waiting for the audio collaborator, in the order they were raised
#[derive(Debug, Default)]
pub struct SoundQueue {
    events: Vec<SoundEvent>,
}

impl SoundQueue {
    pub fn push(&mut self, source: Entity, cue: SoundCue) {
        self.events.push(SoundEvent { source, cue });
    }

    pub fn drain(&mut self) -> Vec<SoundEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// What the renderer should draw for an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    Ship,
    Bullet,
    Block,
    Pickup,
    Unknown,
}

impl Sprite {
    /// Draw order, lowest first
    pub fn z_order(self) -> u8 {
        match self {
            Self::Unknown => 0,
            Self::Block => 1,
            Self::Pickup => 2,
            Self::Bullet => 3,
            Self::Ship => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderItem {
    pub entity: Entity,
    pub bounds: Aabb,
    pub sprite: Sprite,
    pub tint: Color,
}

/// Draw list rebuilt at the end of every tick, sorted back to front
#[derive(Debug, Default)]
pub struct RenderQueue {
    pub items: Vec<RenderItem>,
}

/// Running score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Score(pub u32);

/// Session status flags for the screen layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameStatus {
    pub game_over: bool,
}

/// Counters from the most recent collision pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollisionStats {
    pub indexed: usize,
    pub culled: usize,
    pub candidates: usize,
    pub eligible: usize,
    pub overlapping: usize,
    pub resolved: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_direction_is_normalized() {
        let input = InputState {
            right: true,
            down: true,
            ..Default::default()
        };
        let dir = input.direction();
        assert!((dir.length() - 1.0).abs() < 1e-6);
        assert!(dir.x > 0.0 && dir.y > 0.0);
    }

    #[test]
    fn opposing_input_cancels() {
        let input = InputState {
            left: true,
            right: true,
            ..Default::default()
        };
        assert_eq!(input.direction(), Vec2::ZERO);
    }

    #[test]
    fn sound_queue_drains_in_order() {
        let mut queue = SoundQueue::default();
        queue.push(Entity::from_raw(1), SoundCue::Fire);
        queue.push(Entity::from_raw(2), SoundCue::BlockHit);
        let events = queue.drain();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].cue, SoundCue::Fire);
        assert_eq!(events[1].source, Entity::from_raw(2));
        assert!(queue.is_empty());
    }
}
