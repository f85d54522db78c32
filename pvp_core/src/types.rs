//! Core types shared by the attack and damage pipelines

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// Stable identity of an actor in the simulated world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub u32);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "actor#{}", self.0)
    }
}

impl From<u32> for ActorId {
    fn from(id: u32) -> Self {
        ActorId(id)
    }
}

/// Position or velocity in world space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Vec3 { x, y, z }
    }

    pub fn dot(self, other: Vec3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn length_squared(self) -> f64 {
        self.dot(self)
    }

    pub fn distance_squared(self, other: Vec3) -> f64 {
        (self - other).length_squared()
    }

    /// Unit vector in the same direction, or zero for a zero vector
    pub fn normalize(self) -> Vec3 {
        let len = self.length_squared().sqrt();
        if len < 1.0e-4 {
            Vec3::ZERO
        } else {
            self * (1.0 / len)
        }
    }

    /// Component-wise multiplication
    pub fn scale(self, factor: Vec3) -> Vec3 {
        Vec3::new(self.x * factor.x, self.y * factor.y, self.z * factor.z)
    }

    /// Horizontal facing vector for a yaw given in degrees
    pub fn from_yaw(yaw: f32) -> Vec3 {
        let radians = f64::from(yaw).to_radians();
        Vec3::new(-radians.sin(), 0.0, radians.cos())
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: f64) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// Equipment slot for gear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentSlot {
    MainHand,
    OffHand,
    Helmet,
    Chestplate,
    Leggings,
    Boots,
}

impl EquipmentSlot {
    /// Get all equipment slots
    pub fn all() -> &'static [EquipmentSlot] {
        &[
            EquipmentSlot::MainHand,
            EquipmentSlot::OffHand,
            EquipmentSlot::Helmet,
            EquipmentSlot::Chestplate,
            EquipmentSlot::Leggings,
            EquipmentSlot::Boots,
        ]
    }

    /// Slots that count as worn armor
    pub fn armor() -> &'static [EquipmentSlot] {
        &[
            EquipmentSlot::Helmet,
            EquipmentSlot::Chestplate,
            EquipmentSlot::Leggings,
            EquipmentSlot::Boots,
        ]
    }
}

/// Hand holding an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hand {
    Main,
    Off,
}

impl Hand {
    /// Hands in the order they are checked for usable items
    pub fn all() -> &'static [Hand] {
        &[Hand::Main, Hand::Off]
    }

    pub fn slot(self) -> EquipmentSlot {
        match self {
            Hand::Main => EquipmentSlot::MainHand,
            Hand::Off => EquipmentSlot::OffHand,
        }
    }
}

/// Enchantments the combat pipeline cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Enchantment {
    Sharpness,
    Smite,
    BaneOfArthropods,
    Knockback,
    FireAspect,
    Protection,
    FireProtection,
    FeatherFalling,
    ProjectileProtection,
    Thorns,
}

/// A stack of items in an equipment slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemStack {
    /// Material identifier, e.g. "diamond_sword"
    pub material: String,
    pub amount: u32,
    #[serde(default)]
    pub enchantments: BTreeMap<Enchantment, u32>,
}

impl ItemStack {
    pub const AIR: &'static str = "air";
    pub const TOTEM_OF_UNDYING: &'static str = "totem_of_undying";
    pub const SHIELD: &'static str = "shield";

    pub fn new(material: impl Into<String>, amount: u32) -> Self {
        ItemStack {
            material: material.into(),
            amount,
            enchantments: BTreeMap::new(),
        }
    }

    pub fn air() -> Self {
        ItemStack::new(Self::AIR, 0)
    }

    /// Builder-style enchantment
    pub fn with_enchantment(mut self, enchantment: Enchantment, level: u32) -> Self {
        self.enchantments.insert(enchantment, level);
        self
    }

    pub fn is_air(&self) -> bool {
        self.amount == 0 || self.material == Self::AIR
    }

    pub fn is(&self, material: &str) -> bool {
        !self.is_air() && self.material == material
    }

    /// Same item ignoring the stack size
    pub fn is_similar(&self, other: &ItemStack) -> bool {
        if self.is_air() || other.is_air() {
            return self.is_air() && other.is_air();
        }
        self.material == other.material && self.enchantments == other.enchantments
    }

    /// Copy of this stack with a different amount; zero turns it into air
    pub fn with_amount(&self, amount: u32) -> ItemStack {
        if amount == 0 {
            return ItemStack::air();
        }
        ItemStack {
            amount,
            ..self.clone()
        }
    }

    pub fn enchantment_level(&self, enchantment: Enchantment) -> u32 {
        if self.is_air() {
            return 0;
        }
        self.enchantments.get(&enchantment).copied().unwrap_or(0)
    }
}

impl Default for ItemStack {
    fn default() -> Self {
        ItemStack::air()
    }
}

/// Kinds of status effect consulted or granted by combat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusEffectKind {
    FireResistance,
    Resistance,
    Blindness,
    Regeneration,
    Absorption,
}

/// Active status effect on an actor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActiveStatusEffect {
    pub kind: StatusEffectKind,
    /// Zero-based potency (amplifier 0 = level I)
    pub amplifier: u8,
    pub duration_ticks: u32,
}

impl ActiveStatusEffect {
    pub fn new(kind: StatusEffectKind, amplifier: u8, duration_ticks: u32) -> Self {
        ActiveStatusEffect {
            kind,
            amplifier,
            duration_ticks,
        }
    }
}

/// What sort of entity an actor is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Player,
    Mob,
    /// Non-living but attackable (boats, minecarts, armor stands...)
    Object,
    Projectile,
    DroppedItem,
    ExperienceOrb,
}

impl EntityKind {
    pub fn is_living(self) -> bool {
        matches!(self, EntityKind::Player | EntityKind::Mob)
    }

    /// Whether a client may legitimately send an attack against this kind
    pub fn is_attackable(self) -> bool {
        !matches!(
            self,
            EntityKind::Projectile | EntityKind::DroppedItem | EntityKind::ExperienceOrb
        )
    }
}

/// Damage group used by group-specific attack enchantments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityGroup {
    #[default]
    Default,
    Undead,
    Arthropod,
    Illager,
    Aquatic,
}

/// Game mode of an actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    #[default]
    Survival,
    Creative,
    Adventure,
    Spectator,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_similarity_ignores_amount() {
        let a = ItemStack::new("diamond_sword", 1).with_enchantment(Enchantment::Sharpness, 2);
        let b = a.with_amount(5);
        let c = ItemStack::new("diamond_sword", 1);

        assert!(a.is_similar(&b));
        assert!(!a.is_similar(&c));
        assert!(ItemStack::air().is_similar(&ItemStack::new("stone", 0)));
    }

    #[test]
    fn test_with_amount_zero_is_air() {
        let totem = ItemStack::new(ItemStack::TOTEM_OF_UNDYING, 1);
        assert!(totem.with_amount(0).is_air());
        assert!(!totem.with_amount(0).is(ItemStack::TOTEM_OF_UNDYING));
    }

    #[test]
    fn test_attackable_kinds() {
        assert!(EntityKind::Player.is_attackable());
        assert!(EntityKind::Object.is_attackable());
        assert!(!EntityKind::Object.is_living());
        assert!(!EntityKind::Projectile.is_attackable());
        assert!(!EntityKind::DroppedItem.is_attackable());
        assert!(!EntityKind::ExperienceOrb.is_attackable());
    }

    #[test]
    fn test_yaw_facing() {
        // yaw 0 faces +z
        let facing = Vec3::from_yaw(0.0);
        assert!((facing.z - 1.0).abs() < 1e-9);
        assert!(facing.x.abs() < 1e-9);

        // yaw 90 faces -x
        let facing = Vec3::from_yaw(90.0);
        assert!((facing.x + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_zero() {
        assert_eq!(Vec3::ZERO.normalize(), Vec3::ZERO);
        let n = Vec3::new(3.0, 0.0, 4.0).normalize();
        assert!((n.length_squared() - 1.0).abs() < 1e-9);
    }
}
