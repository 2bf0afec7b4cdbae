//! Error types
//!
//! Only session startup, config parsing and farm actions can fail. The
//! per-frame simulation path is total and never returns an error.

use thiserror::Error;

/// Precondition failures detected when a session starts
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("session bounds must be positive, got {width}x{height}")]
    DegenerateBounds { width: f32, height: f32 },

    #[error("session bounds {width}x{height} cannot fit a {size}px hostile")]
    BoundsTooSmall { width: f32, height: f32, size: f32 },

    #[error("hostile count must be at least 1")]
    NoHostiles,

    #[error("hostile count {count} exceeds the maximum of {max}")]
    TooManyHostiles { count: u32, max: u32 },

    #[error("damage per shot must be at least 1")]
    ZeroDamage,

    #[error("hostile max health must be at least 1")]
    ZeroHealth,

    #[error("hitbox scale must be in (0, 1], got {0}")]
    InvalidHitboxScale(f32),

    #[error("invulnerability window must be a finite, non-negative number of seconds, got {0}")]
    InvalidInvulnerability(f64),
}

/// Settings or session config could not be decoded
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("unknown game variant {0:?}")]
    UnknownVariant(String),
}

/// Rejected farm actions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FarmError {
    #[error("not enough money: need ${needed}, have ${available}")]
    NotEnoughMoney { needed: i64, available: i64 },

    #[error("field {0} is full")]
    FieldFull(u32),

    #[error("no field with id {0}")]
    UnknownField(u32),

    #[error("no tree with id {0}")]
    UnknownTree(u32),

    #[error("tree {0} is not ready for sale")]
    TreeNotReady(u32),

    #[error("field {0} already has a tractor")]
    TractorOwned(u32),

    #[error("field {0} needs a tractor for that")]
    TractorRequired(u32),
}
