//! Tree farm clicker
//!
//! A small economy driven by the same pull-based clock as the arcade
//! sessions: the caller advances time, trees age on whole-day boundaries,
//! and actions return typed errors instead of silently failing.

use serde::{Deserialize, Serialize};

use crate::audio::{AudioCue, CueQueue};
use crate::error::FarmError;

pub type FieldId = u32;
pub type TreeId = u32;

/// Farm economy constants
pub mod prices {
    pub const STARTING_MONEY: i64 = 1000;
    pub const FIELD_COST: i64 = 1000;
    pub const PLANT_COST: i64 = 5;
    pub const SELL_PRICE: i64 = 20;
    pub const TRACTOR_COST: i64 = 500;
    pub const TREES_PER_FIELD: usize = 16;
    /// Days a tree grows before its next birthday marks it ready
    pub const GROW_DAYS: u32 = 5;
    /// Length of one farm day (seconds)
    pub const DAY_SECS: f64 = 1.0;
}

use prices::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub id: TreeId,
    pub field: FieldId,
    /// Age in days
    pub age: u32,
    pub ready: bool,
}

impl Tree {
    /// Display scale, growing from 1/6 to full size
    pub fn growth_scale(&self) -> f32 {
        (self.age + 1) as f32 / (GROW_DAYS + 1) as f32
    }

    fn grow_one_day(&mut self) {
        if self.age < GROW_DAYS {
            self.age += 1;
        } else {
            self.ready = true;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub id: FieldId,
    pub has_tractor: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Farm {
    money: i64,
    fields: Vec<Field>,
    trees: Vec<Tree>,
    clock: f64,
    next_day_at: f64,
    next_id: u32,
    cues: CueQueue,
    /// Cues raised by actions since the last `advance`
    immediate: Vec<AudioCue>,
}

impl Farm {
    /// A fresh farm with starting money and one empty field
    pub fn new() -> Self {
        let mut farm = Self {
            money: STARTING_MONEY,
            fields: Vec::new(),
            trees: Vec::new(),
            clock: 0.0,
            next_day_at: DAY_SECS,
            next_id: 1,
            cues: CueQueue::new(),
            immediate: Vec::new(),
        };
        let id = farm.next_id();
        farm.fields.push(Field {
            id,
            has_tractor: false,
        });
        farm
    }

    fn next_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn money(&self) -> i64 {
        self.money
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn trees(&self) -> &[Tree] {
        &self.trees
    }

    pub fn clock(&self) -> f64 {
        self.clock
    }

    /// Trees planted in `field`, in planting order
    pub fn trees_in(&self, field: FieldId) -> impl Iterator<Item = &Tree> {
        self.trees.iter().filter(move |t| t.field == field)
    }

    fn field(&self, id: FieldId) -> Result<&Field, FarmError> {
        self.fields
            .iter()
            .find(|f| f.id == id)
            .ok_or(FarmError::UnknownField(id))
    }

    fn field_mut(&mut self, id: FieldId) -> Result<&mut Field, FarmError> {
        self.fields
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or(FarmError::UnknownField(id))
    }

    fn spend(&mut self, amount: i64) -> Result<(), FarmError> {
        if self.money < amount {
            return Err(FarmError::NotEnoughMoney {
                needed: amount,
                available: self.money,
            });
        }
        self.money -= amount;
        Ok(())
    }

    fn free_slots(&self, field: FieldId) -> usize {
        TREES_PER_FIELD.saturating_sub(self.trees_in(field).count())
    }

    fn plant_into(&mut self, field: FieldId) -> TreeId {
        let id = self.next_id();
        self.trees.push(Tree {
            id,
            field,
            age: 0,
            ready: false,
        });
        id
    }

    /// Advance the farm clock and collect due audio cues.
    ///
    /// Every tree ages once per whole day crossed. Non-finite `dt` is
    /// ignored.
    pub fn advance(&mut self, dt: f64) -> Vec<AudioCue> {
        if dt.is_finite() {
            self.clock += dt.max(0.0);
        }

        let mut days = 0u32;
        if self.clock >= self.next_day_at {
            let crossed = ((self.clock - self.next_day_at) / DAY_SECS).floor() + 1.0;
            // Saturating cast; anything past a ready tree is a no-op anyway
            days = crossed as u32;
            self.next_day_at += crossed * DAY_SECS;
        }
        // Aging saturates once a tree is ready
        for _ in 0..days.min(GROW_DAYS + 1) {
            for tree in &mut self.trees {
                tree.grow_one_day();
            }
        }

        let mut cues = std::mem::take(&mut self.immediate);
        cues.extend(self.cues.drain_due(self.clock));
        cues
    }

    /// Buy another field
    pub fn buy_field(&mut self) -> Result<FieldId, FarmError> {
        self.spend(FIELD_COST)?;
        let id = self.next_id();
        self.fields.push(Field {
            id,
            has_tractor: false,
        });
        log::info!("Bought field {} (${} left)", id, self.money);
        Ok(id)
    }

    /// Plant a single tree
    pub fn plant_tree(&mut self, field: FieldId) -> Result<TreeId, FarmError> {
        self.field(field)?;
        if self.free_slots(field) == 0 {
            return Err(FarmError::FieldFull(field));
        }
        self.spend(PLANT_COST)?;
        let id = self.plant_into(field);
        self.immediate.push(AudioCue::Plant);
        Ok(id)
    }

    /// Plant as many trees as money and space allow. Needs a tractor.
    pub fn plant_field(&mut self, field: FieldId) -> Result<usize, FarmError> {
        if !self.field(field)?.has_tractor {
            return Err(FarmError::TractorRequired(field));
        }
        let slots = self.free_slots(field);
        if slots == 0 {
            return Err(FarmError::FieldFull(field));
        }
        let affordable = (self.money.max(0) / PLANT_COST) as usize;
        let count = slots.min(affordable);
        if count == 0 {
            return Err(FarmError::NotEnoughMoney {
                needed: PLANT_COST,
                available: self.money,
            });
        }

        self.spend(PLANT_COST * count as i64)?;
        for _ in 0..count {
            self.plant_into(field);
        }
        self.cues.schedule_repeat(AudioCue::Plant, 3, 0.03, self.clock);
        log::debug!("Planted {} trees in field {}", count, field);
        Ok(count)
    }

    /// Sell one ready tree
    pub fn sell_tree(&mut self, tree: TreeId) -> Result<i64, FarmError> {
        let index = self
            .trees
            .iter()
            .position(|t| t.id == tree)
            .ok_or(FarmError::UnknownTree(tree))?;
        if !self.trees[index].ready {
            return Err(FarmError::TreeNotReady(tree));
        }
        self.trees.remove(index);
        self.money += SELL_PRICE;
        self.immediate.push(AudioCue::Kaching);
        Ok(SELL_PRICE)
    }

    /// Sell every ready tree in the field and clear it, saplings included.
    /// Needs a tractor. Returns the money earned.
    pub fn harvest_field(&mut self, field: FieldId) -> Result<i64, FarmError> {
        if !self.field(field)?.has_tractor {
            return Err(FarmError::TractorRequired(field));
        }
        let ready = self.trees_in(field).filter(|t| t.ready).count() as i64;
        let earned = ready * SELL_PRICE;

        self.trees.retain(|t| t.field != field);
        self.money += earned;
        self.cues.schedule_repeat(AudioCue::Kaching, 3, 0.1, self.clock);
        log::info!("Harvested field {}: {} trees for ${}", field, ready, earned);
        Ok(earned)
    }

    /// Buy the field's tractor
    pub fn buy_tractor(&mut self, field: FieldId) -> Result<(), FarmError> {
        if self.field(field)?.has_tractor {
            return Err(FarmError::TractorOwned(field));
        }
        self.spend(TRACTOR_COST)?;
        self.field_mut(field)?.has_tractor = true;
        self.immediate.push(AudioCue::Tractor);
        log::info!("Bought tractor for field {}", field);
        Ok(())
    }
}

impl Default for Farm {
    fn default() -> Self {
        Self::new()
    }
}
