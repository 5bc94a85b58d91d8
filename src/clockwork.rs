//! The cycle-based calendar computation engine.
//!
//! A calendar is described as a hierarchy of cycles: 400 years contain
//! 146097 days, which split into four centuries, which split into
//! four-year cycles, then years, then months, then days. A `Clockwork`
//! walks such a table from the largest cycle down to the smallest to turn
//! a day count into calendar fields (`decompose`), and back (`compose`).
//!
//! Leap rules are expressed through *ceilings*: a century may contain
//! only three full “short” centuries before the last one absorbs the
//! remaining leap day, so the 36524-day level has a ceiling of 3.

use tracing::trace;

use crate::arith::div_mod;
use crate::error::{Error, Result};


/// One tier of a calendar's cycle table.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct CycleLevel {

    /// Length of this cycle, in elementary units (days).
    pub cycle_length: i64,

    /// How many times this cycle may repeat inside its parent before the
    /// remainder spills into the last repetition. `None` means no cap.
    pub ceiling: Option<i64>,

    /// Added to the ceiling of the *next* level when this level has
    /// reached its ceiling. Used for embolismic cycles, where the last
    /// sub-cycle holds one element more or less.
    pub sub_cycle_shift: i64,

    /// How much one repetition of this cycle adds to its target field.
    pub multiplier: i64,

    /// The canvas field this level counts into.
    pub target: &'static str,
}

impl CycleLevel {

    /// A level that may repeat any number of times.
    pub fn unbounded(cycle_length: i64, multiplier: i64, target: &'static str) -> Self {
        Self { cycle_length, ceiling: None, sub_cycle_shift: 0, multiplier, target }
    }

    /// A level that repeats at most `ceiling` times within its parent.
    pub fn bounded(cycle_length: i64, ceiling: i64, multiplier: i64, target: &'static str) -> Self {
        Self { cycle_length, ceiling: Some(ceiling), sub_cycle_shift: 0, multiplier, target }
    }

    /// Sets the shift applied to the next level's ceiling.
    pub fn with_sub_cycle_shift(self, sub_cycle_shift: i64) -> Self {
        Self { sub_cycle_shift, ..self }
    }

    /// The ceiling in force, given the shift handed down by the level above.
    fn effective_ceiling(&self, add_cycle: i64) -> Option<i64> {
        self.ceiling.map(|c| c + add_cycle)
    }
}


/// One field of the result of a decomposition, and its value at epoch.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct CanvasField {
    pub name: &'static str,
    pub init: i64,
}

impl CanvasField {
    pub fn new(name: &'static str, init: i64) -> Self {
        Self { name, init }
    }
}


/// The complete description of a calendar for the engine: its origin,
/// its cycle table, and the fields it produces.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct CalendarRule {
    time_epoch: i64,
    levels: Vec<CycleLevel>,
    canvas: Vec<CanvasField>,
}

impl CalendarRule {

    /// Checks and builds a rule.
    ///
    /// Every level must target a canvas field, have positive length and
    /// multiplier, and the levels must go from the largest cycle to the
    /// smallest. Levels that share a target must be consecutive.
    pub fn new(time_epoch: i64, levels: Vec<CycleLevel>, canvas: Vec<CanvasField>) -> Result<Self> {
        if levels.is_empty() || canvas.is_empty() {
            return Err(Error::InvalidRule("a rule needs at least one level and one field".into()));
        }

        let mut seen_targets: Vec<&'static str> = Vec::new();
        for (index, level) in levels.iter().enumerate() {
            if level.cycle_length <= 0 || level.multiplier <= 0 {
                return Err(Error::InvalidRule(format!("level {} has a non-positive length or multiplier", index)));
            }

            if ! canvas.iter().any(|f| f.name == level.target) {
                return Err(Error::InvalidRule(format!("level {} targets unknown field {:?}", index, level.target)));
            }

            if index > 0 && levels[index - 1].cycle_length < level.cycle_length {
                return Err(Error::InvalidRule(format!("level {} is longer than the level above it", index)));
            }

            if seen_targets.last() != Some(&level.target) {
                if seen_targets.contains(&level.target) {
                    return Err(Error::InvalidRule(format!("levels targeting {:?} are not consecutive", level.target)));
                }
                seen_targets.push(level.target);
            }
        }

        Ok(Self { time_epoch, levels, canvas })
    }

    /// Builds one of this crate's own rules, which are known to be valid.
    pub(crate) fn fixed(time_epoch: i64, levels: Vec<CycleLevel>, canvas: Vec<CanvasField>) -> Self {
        debug_assert!(Self::new(time_epoch, levels.clone(), canvas.clone()).is_ok());
        Self { time_epoch, levels, canvas }
    }

    pub fn time_epoch(&self) -> i64 {
        self.time_epoch
    }

    pub fn levels(&self) -> &[CycleLevel] {
        &self.levels
    }

    pub fn canvas(&self) -> &[CanvasField] {
        &self.canvas
    }

    /// The epoch value of a canvas field.
    pub fn init(&self, name: &str) -> Option<i64> {
        self.canvas.iter().find(|f| f.name == name).map(|f| f.init)
    }
}


/// The fields of a decomposed quantity, in canvas order.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Fields {
    values: Vec<(&'static str, i64)>,
}

impl Fields {

    /// Fields set to the epoch values of a canvas.
    pub fn from_canvas(canvas: &[CanvasField]) -> Self {
        Self { values: canvas.iter().map(|f| (f.name, f.init)).collect() }
    }

    /// Builds fields from name-value pairs, in the given order.
    pub fn of(pairs: &[(&'static str, i64)]) -> Self {
        Self { values: pairs.to_vec() }
    }

    pub fn get(&self, name: &str) -> Option<i64> {
        self.values.iter().find(|(n, _)| *n == name).map(|&(_, v)| v)
    }

    /// Sets a field, adding it at the end if it is not there yet.
    pub fn set(&mut self, name: &'static str, value: i64) {
        match self.values.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None        => self.values.push((name, value)),
        }
    }

    fn add(&mut self, name: &'static str, value: i64) -> Result<()> {
        if let Some(entry) = self.values.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = entry.1.checked_add(value).ok_or(Error::OutOfRange)?;
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item=(&'static str, i64)> + '_ {
        self.values.iter().cloned()
    }
}


/// A calendar rule, ready to convert quantities into fields and back.
///
/// A clockwork holds nothing but its rule: every call is computed from
/// scratch, so one may be shared between threads freely.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Clockwork {
    rule: CalendarRule,
}

impl Clockwork {

    pub fn new(rule: CalendarRule) -> Self {
        Self { rule }
    }

    pub fn rule(&self) -> &CalendarRule {
        &self.rule
    }

    /// Splits a quantity, counted from the absolute origin, into the
    /// fields of the rule's canvas.
    ///
    /// Fails with `OutOfRange` if a field cannot hold its value.
    ///
    /// ### Examples
    ///
    /// ```
    /// use calendrical::clockwork::{Clockwork, CalendarRule, CycleLevel, CanvasField};
    ///
    /// // A toy calendar: years of 12 months of 30 days, starting at day 100.
    /// let rule = CalendarRule::new(100,
    ///     vec![ CycleLevel::unbounded(360, 1, "year"),
    ///           CycleLevel::unbounded(30, 1, "month"),
    ///           CycleLevel::unbounded(1, 1, "day") ],
    ///     vec![ CanvasField::new("year", 0),
    ///           CanvasField::new("month", 1),
    ///           CanvasField::new("day", 1) ]).unwrap();
    ///
    /// let fields = Clockwork::new(rule).decompose(100 + 360 + 45).unwrap();
    /// assert_eq!(fields.get("year"),  Some(1));
    /// assert_eq!(fields.get("month"), Some(2));
    /// assert_eq!(fields.get("day"),   Some(16));
    /// ```
    pub fn decompose(&self, quantity: i64) -> Result<Fields> {
        let mut fields = Fields::from_canvas(&self.rule.canvas);
        let mut remainder = quantity.checked_sub(self.rule.time_epoch).ok_or(Error::OutOfRange)?;
        let mut add_cycle = 0;

        for level in &self.rule.levels {
            let count;

            if level.cycle_length == 1 {
                // The terminal level simply takes whatever is left.
                count = remainder;
                remainder = 0;
                add_cycle = 0;
            }
            else {
                let ceiling = level.effective_ceiling(add_cycle);
                let (mut whole, rest) = if remainder < 0 {
                    div_mod(remainder, level.cycle_length)?
                }
                else {
                    (remainder / level.cycle_length, remainder % level.cycle_length)
                };

                let mut rest = rest;
                if let Some(ceiling) = ceiling {
                    if whole > ceiling && remainder >= 0 {
                        rest += (whole - ceiling) * level.cycle_length;
                        whole = ceiling;
                    }
                }

                count = whole;
                remainder = rest;
                add_cycle = match ceiling {
                    Some(c) if count == c => level.sub_cycle_shift,
                    _                     => 0,
                };
            }

            let amount = count.checked_mul(level.multiplier).ok_or(Error::OutOfRange)?;
            fields.add(level.target, amount)?;
        }

        trace!(quantity, fields = ?fields, "decomposed");
        Ok(fields)
    }

    /// Builds a quantity back from fields.
    ///
    /// Fields beyond their usual range are carried into the larger
    /// fields: day 32 of a 31-day month is the first of the next month.
    /// Fields missing from `fields` count as their epoch value, and the
    /// result fails with `OutOfRange` if it does not fit in an `i64`.
    pub fn compose(&self, fields: &Fields) -> Result<i64> {
        let mut quantity = self.rule.time_epoch;
        let mut current_target = "";
        let mut counter = 0;
        let mut add_cycle = 0;

        for level in &self.rule.levels {
            if level.target != current_target {
                current_target = level.target;
                let init = self.rule.init(current_target).unwrap_or(0);
                counter = fields.get(current_target).unwrap_or(init).checked_sub(init).ok_or(Error::OutOfRange)?;
            }

            let ceiling = level.effective_ceiling(add_cycle);
            let mut count;

            if counter < 0 {
                let (whole, rest) = div_mod(counter, level.multiplier)?;
                count = whole;
                counter = rest;
            }
            else {
                count = counter / level.multiplier;
                if let Some(ceiling) = ceiling {
                    count = count.min(ceiling.max(0));
                }
                counter -= count * level.multiplier;
            }

            add_cycle = match ceiling {
                Some(c) if count == c => level.sub_cycle_shift,
                _                     => 0,
            };

            quantity = count.checked_mul(level.cycle_length)
                            .and_then(|length| quantity.checked_add(length))
                            .ok_or(Error::OutOfRange)?;
        }

        trace!(quantity, fields = ?fields, "composed");
        Ok(quantity)
    }
}
