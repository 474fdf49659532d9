//! Gameplay components
//!
//! Every component the game stores is one variant of [`GameComponent`]. The
//! fieldless [`ComponentKind`] mirrors it and is what systems declare
//! interest in.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use voidbreaker_core::Aabb;
use voidbreaker_ecs::{impl_variants, Component, Entity, World};

use crate::tags::{CollisionLayer, TagSet};

/// Position and velocity. Position is the top-left corner of the entity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transform {
    pub position: Vec2,
    /// Units per second
    pub velocity: Vec2,
}

impl Transform {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
        }
    }

    pub fn moving(position: Vec2, velocity: Vec2) -> Self {
        Self { position, velocity }
    }
}

/// Steering tuning for input-driven entities
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Movement {
    /// Top speed in units per second
    pub max_speed: f32,
    /// Acceleration while steering, units per second squared
    pub acceleration: f32,
    /// Fraction of velocity shed per second with no input
    pub drag: f32,
}

/// Collision box and the labels used to filter and dispatch contacts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub size: Vec2,
    pub tags: TagSet,
    pub layer: CollisionLayer,
    /// Triggers ignore layer separation
    pub trigger: bool,
}

impl Collider {
    pub fn new(size: Vec2, tags: TagSet) -> Self {
        Self {
            size,
            tags,
            layer: CollisionLayer::MAIN,
            trigger: false,
        }
    }

    pub fn on_layer(mut self, layer: CollisionLayer) -> Self {
        self.layer = layer;
        self
    }

    pub fn as_trigger(mut self) -> Self {
        self.trigger = true;
        self
    }

    /// World-space box for an entity at `position`
    pub fn bounds(&self, position: Vec2) -> Aabb {
        Aabb::from_position_size(position, self.size)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    /// Apply damage, flooring at zero. Returns remaining health.
    pub fn damage(&mut self, amount: f32) -> f32 {
        self.current = (self.current - amount).max(0.0);
        self.current
    }

    pub fn heal(&mut self, amount: f32) {
        self.current = (self.current + amount).min(self.max);
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }

    pub fn fraction(&self) -> f32 {
        if self.max > 0.0 {
            self.current / self.max
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weapon {
    /// Damage carried by each bullet before buffs
    pub damage: f32,
    /// Seconds between shots
    pub cooldown: f32,
    pub bullet_speed: f32,
    /// Seconds until the next shot is allowed
    pub timer: f32,
}

/// Destructible obstacle state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Block {
    pub durability: f32,
    pub max_durability: f32,
    /// Ignores projectile damage entirely
    pub indestructible: bool,
    /// Damage dealt to an actor that rams this block
    pub contact_damage: f32,
    /// Score awarded when destroyed by fire
    pub points: u32,
}

impl Block {
    pub fn new(durability: f32, contact_damage: f32, points: u32) -> Self {
        Self {
            durability,
            max_durability: durability,
            indestructible: false,
            contact_damage,
            points,
        }
    }

    pub fn indestructible(contact_damage: f32) -> Self {
        Self {
            indestructible: true,
            ..Self::new(1.0, contact_damage, 0)
        }
    }

    /// Subtract projectile damage, clamped at zero. Returns `true` once the
    /// block is worn through.
    pub fn apply_damage(&mut self, amount: f32) -> bool {
        if self.indestructible {
            return false;
        }
        self.durability = (self.durability - amount).max(0.0);
        self.durability <= 0.0
    }

    pub fn fraction(&self) -> f32 {
        if self.max_durability > 0.0 {
            self.durability / self.max_durability
        } else {
            0.0
        }
    }
}

/// What a pickup grants when an actor touches it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PickupEffect {
    Shield { capacity: f32, duration: f32 },
    RapidFire { cooldown_divisor: f32, duration: f32 },
    DamageBoost { multiplier: f32, duration: f32 },
    SpeedBoost { multiplier: f32, duration: f32 },
    SlowMotion { factor: f32, duration: f32 },
    Repair { amount: f32 },
}

impl PickupEffect {
    /// Install the effect on `actor`. Timed effects replace any buff of the
    /// same kind outright; durations never stack.
    pub fn apply(self, world: &mut World<GameComponent>, actor: Entity) {
        match self {
            Self::Shield { capacity, duration } => {
                world.insert(actor, Shield { capacity, remaining: duration });
            }
            Self::RapidFire { cooldown_divisor, duration } => {
                world.insert(actor, RapidFire { cooldown_divisor, remaining: duration });
            }
            Self::DamageBoost { multiplier, duration } => {
                world.insert(actor, DamageBoost { multiplier, remaining: duration });
            }
            Self::SpeedBoost { multiplier, duration } => {
                world.insert(actor, SpeedBoost { multiplier, remaining: duration });
            }
            Self::SlowMotion { factor, duration } => {
                world.insert(actor, TimeScale { factor, remaining: duration });
            }
            Self::Repair { amount } => {
                if let Some(health) = world.get_mut::<Health>(actor) {
                    health.heal(amount);
                }
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Shield { .. } => "shield",
            Self::RapidFire { .. } => "rapid_fire",
            Self::DamageBoost { .. } => "damage_boost",
            Self::SpeedBoost { .. } => "speed_boost",
            Self::SlowMotion { .. } => "slow_motion",
            Self::Repair { .. } => "repair",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pickup {
    pub effect: PickupEffect,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub damage: f32,
    pub owner: Option<Entity>,
}

/// Marks an entity steered by the input collaborator
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlayerControl;

/// Slows the rest of the world while active. The holder runs at full speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    pub factor: f32,
    pub remaining: f32,
}

/// Absorbs contact damage until capacity runs out
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shield {
    pub capacity: f32,
    pub remaining: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RapidFire {
    pub cooldown_divisor: f32,
    pub remaining: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageBoost {
    pub multiplier: f32,
    pub remaining: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedBoost {
    pub multiplier: f32,
    pub remaining: f32,
}

/// A buff that counts down and is removed when it runs out
pub trait TimedBuff: voidbreaker_ecs::Variant<GameComponent> {
    fn remaining_mut(&mut self) -> &mut f32;
}

macro_rules! impl_timed_buff {
    ($($buff:ty),+) => {
        $(
            impl TimedBuff for $buff {
                fn remaining_mut(&mut self) -> &mut f32 {
                    &mut self.remaining
                }
            }
        )+
    };
}

impl_timed_buff!(TimeScale, Shield, RapidFire, DamageBoost, SpeedBoost);

#[derive(Debug, Clone, PartialEq)]
pub enum GameComponent {
    Transform(Transform),
    Movement(Movement),
    Collider(Collider),
    Health(Health),
    Weapon(Weapon),
    Block(Block),
    Pickup(Pickup),
    Projectile(Projectile),
    PlayerControl(PlayerControl),
    TimeScale(TimeScale),
    Shield(Shield),
    RapidFire(RapidFire),
    DamageBoost(DamageBoost),
    SpeedBoost(SpeedBoost),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ComponentKind {
    Transform,
    Movement,
    Collider,
    Health,
    Weapon,
    Block,
    Pickup,
    Projectile,
    PlayerControl,
    TimeScale,
    Shield,
    RapidFire,
    DamageBoost,
    SpeedBoost,
}

impl Component for GameComponent {
    type Kind = ComponentKind;

    fn kind(&self) -> ComponentKind {
        match self {
            Self::Transform(_) => ComponentKind::Transform,
            Self::Movement(_) => ComponentKind::Movement,
            Self::Collider(_) => ComponentKind::Collider,
            Self::Health(_) => ComponentKind::Health,
            Self::Weapon(_) => ComponentKind::Weapon,
            Self::Block(_) => ComponentKind::Block,
            Self::Pickup(_) => ComponentKind::Pickup,
            Self::Projectile(_) => ComponentKind::Projectile,
            Self::PlayerControl(_) => ComponentKind::PlayerControl,
            Self::TimeScale(_) => ComponentKind::TimeScale,
            Self::Shield(_) => ComponentKind::Shield,
            Self::RapidFire(_) => ComponentKind::RapidFire,
            Self::DamageBoost(_) => ComponentKind::DamageBoost,
            Self::SpeedBoost(_) => ComponentKind::SpeedBoost,
        }
    }
}

impl_variants!(GameComponent, ComponentKind {
    Transform(Transform),
    Movement(Movement),
    Collider(Collider),
    Health(Health),
    Weapon(Weapon),
    Block(Block),
    Pickup(Pickup),
    Projectile(Projectile),
    PlayerControl(PlayerControl),
    TimeScale(TimeScale),
    Shield(Shield),
    RapidFire(RapidFire),
    DamageBoost(DamageBoost),
    SpeedBoost(SpeedBoost),
});

/// The game's world type
pub type GameWorld = World<GameComponent>;
