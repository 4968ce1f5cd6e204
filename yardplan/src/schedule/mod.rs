//! Day-capacity scheduling.
//!
//! Open work is spread over consecutive calendar days with a greedy
//! first-fit pass: items are taken in the order given and piled onto the
//! current day until the next one would push the day over its capacity,
//! at which point the plan moves on to the following day.
//!
//! # Algorithm
//!
//! 1. Start on `start_day` with an empty day bucket.
//! 2. For each item, if the current day already carries load and adding
//!    the item would exceed capacity, open the next calendar day.
//! 3. Put the item on the current day and add its cost to the day's load.
//!
//! Items are never reordered to fill a day better. An item bigger than a
//! whole day still gets a day of its own instead of looping. Items without
//! remaining effort never move the plan forward.
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use yardplan::schedule::{DailyCapacity, DayScheduler, WorkItem};
//!
//! let day0 = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
//! let items = vec![
//!     WorkItem::new("V1", 5.0),
//!     WorkItem::new("V2", 4.0),
//!     WorkItem::new("V3", 3.0),
//! ];
//!
//! let scheduler = DayScheduler::new(DailyCapacity::new(7.0).unwrap());
//! let assignments = scheduler.schedule(&items, day0).unwrap();
//!
//! let day1 = day0.succ_opt().unwrap();
//! assert_eq!(assignments["V1"], day0);
//! assert_eq!(assignments["V2"], day1);
//! assert_eq!(assignments["V3"], day1);
//! ```

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};

use crate::error::{Error, Result};

#[cfg(test)]
mod proptests;

/// Tolerance for float accumulation when comparing a day's load to capacity.
const LOAD_TOLERANCE: f64 = 1e-9;

/// Work-hours the yard can process per day.
///
/// Always strictly positive and finite.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct DailyCapacity(f64);

impl DailyCapacity {
    /// Creates a capacity of `hours` work-hours per day.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCapacity`] if `hours` is zero, negative or
    /// not finite.
    ///
    /// # Examples
    ///
    /// ```
    /// use yardplan::schedule::DailyCapacity;
    ///
    /// assert!(DailyCapacity::new(16.0).is_ok());
    /// assert!(DailyCapacity::new(0.0).is_err());
    /// assert!(DailyCapacity::new(-8.0).is_err());
    /// ```
    pub fn new(hours: f64) -> Result<Self> {
        if !hours.is_finite() {
            return Err(Error::InvalidCapacity {
                value: hours,
                reason: "must be a finite number".into(),
            });
        }
        if hours <= 0.0 {
            return Err(Error::InvalidCapacity {
                value: hours,
                reason: "must be greater than zero".into(),
            });
        }
        Ok(Self(hours))
    }

    /// Capacity of a crew: `headcount` people working `hours_per_person`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCapacity`] if the product is not positive.
    ///
    /// # Examples
    ///
    /// ```
    /// use yardplan::schedule::DailyCapacity;
    ///
    /// let capacity = DailyCapacity::from_staffing(3, 7.5).unwrap();
    /// assert!((capacity.hours() - 22.5).abs() < f64::EPSILON);
    /// assert!(DailyCapacity::from_staffing(0, 8.0).is_err());
    /// ```
    pub fn from_staffing(headcount: u32, hours_per_person: f64) -> Result<Self> {
        Self::new(f64::from(headcount) * hours_per_person)
    }

    /// Returns the capacity in work-hours.
    #[must_use]
    pub const fn hours(self) -> f64 {
        self.0
    }
}

/// One unit of open work with its remaining effort.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkItem<K> {
    /// Identifier carried through to the plan.
    pub id: K,
    /// Remaining effort in work-hours.
    pub remaining_hours: f64,
}

impl<K> WorkItem<K> {
    /// Creates a work item.
    pub fn new(id: K, remaining_hours: f64) -> Self {
        Self {
            id,
            remaining_hours,
        }
    }

    /// Effort used for planning; malformed values count as no effort.
    fn planned_hours(&self) -> f64 {
        if self.remaining_hours.is_finite() && self.remaining_hours > 0.0 {
            self.remaining_hours
        } else {
            0.0
        }
    }
}

/// Scheduled work for a single calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct DayBucket<K> {
    day: NaiveDate,
    items: Vec<K>,
    load_hours: f64,
    capacity_hours: f64,
}

impl<K> DayBucket<K> {
    fn new(day: NaiveDate, capacity_hours: f64) -> Self {
        Self {
            day,
            items: Vec::new(),
            load_hours: 0.0,
            capacity_hours,
        }
    }

    fn would_overflow(&self, hours: f64) -> bool {
        hours > 0.0
            && self.load_hours > 0.0
            && self.load_hours + hours > self.capacity_hours + LOAD_TOLERANCE
    }

    /// The calendar day.
    #[must_use]
    pub const fn day(&self) -> NaiveDate {
        self.day
    }

    /// Items scheduled on this day, in planning order.
    #[must_use]
    pub fn items(&self) -> &[K] {
        &self.items
    }

    /// Total work-hours scheduled on this day.
    #[must_use]
    pub const fn load_hours(&self) -> f64 {
        self.load_hours
    }

    /// Capacity the day was planned against.
    #[must_use]
    pub const fn capacity_hours(&self) -> f64 {
        self.capacity_hours
    }

    /// Returns `true` if a single oversized item pushed the day over
    /// capacity.
    #[must_use]
    pub fn is_overloaded(&self) -> bool {
        self.load_hours > self.capacity_hours + LOAD_TOLERANCE
    }
}

/// The result of a scheduling pass, as ordered day buckets.
#[derive(Debug, Clone, PartialEq)]
pub struct DayPlan<K> {
    days: Vec<DayBucket<K>>,
}

impl<K> DayPlan<K> {
    /// Day buckets in calendar order, without gaps.
    #[must_use]
    pub fn days(&self) -> &[DayBucket<K>] {
        &self.days
    }

    /// Returns `true` if nothing was scheduled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// The last day holding work, if any.
    #[must_use]
    pub fn last_day(&self) -> Option<NaiveDate> {
        self.days.last().map(DayBucket::day)
    }

    /// Total scheduled work-hours.
    #[must_use]
    pub fn total_hours(&self) -> f64 {
        self.days.iter().map(DayBucket::load_hours).sum()
    }
}

impl<K: Ord + Clone> DayPlan<K> {
    /// Flattens the plan into an item → day mapping.
    #[must_use]
    pub fn assignments(&self) -> BTreeMap<K, NaiveDate> {
        self.days
            .iter()
            .flat_map(|bucket| bucket.items.iter().map(|id| (id.clone(), bucket.day)))
            .collect()
    }
}

/// Greedy first-fit day scheduler.
#[derive(Debug, Clone, Copy)]
pub struct DayScheduler {
    capacity: DailyCapacity,
}

impl DayScheduler {
    /// Creates a scheduler for the given daily capacity.
    #[must_use]
    pub const fn new(capacity: DailyCapacity) -> Self {
        Self { capacity }
    }

    /// The capacity this scheduler plans against.
    #[must_use]
    pub const fn capacity(&self) -> DailyCapacity {
        self.capacity
    }

    /// Partitions `items` into consecutive days starting at `start_day`.
    ///
    /// The day only moves on when it already carries load: an item larger
    /// than the whole capacity stays on a day that is still empty, so
    /// `start_day` is never skipped and the oversized item gets that day to
    /// itself.
    ///
    /// # Errors
    ///
    /// Returns an error only if the plan would run past the last
    /// representable calendar day.
    pub fn plan<K: Clone>(&self, items: &[WorkItem<K>], start_day: NaiveDate) -> Result<DayPlan<K>> {
        let capacity = self.capacity.hours();
        let mut days = Vec::new();
        let mut current = DayBucket::new(start_day, capacity);

        for item in items {
            let hours = item.planned_hours();
            if current.would_overflow(hours) {
                let next = current
                    .day
                    .checked_add_days(Days::new(1))
                    .ok_or_else(|| Error::Validation {
                        field: "scheduled_day".into(),
                        message: format!("cannot plan past {}", current.day),
                    })?;
                days.push(std::mem::replace(&mut current, DayBucket::new(next, capacity)));
            }
            current.items.push(item.id.clone());
            current.load_hours += hours;
        }

        if !current.items.is_empty() {
            days.push(current);
        }

        log::debug!(
            "scheduled {} item(s) over {} day(s) at {capacity}h/day",
            items.len(),
            days.len()
        );
        Ok(DayPlan { days })
    }

    /// Partitions `items` into days and returns the item → day mapping.
    ///
    /// Item ids are expected to be unique.
    ///
    /// # Errors
    ///
    /// See [`DayScheduler::plan`].
    pub fn schedule<K: Ord + Clone>(
        &self,
        items: &[WorkItem<K>],
        start_day: NaiveDate,
    ) -> Result<BTreeMap<K, NaiveDate>> {
        Ok(self.plan(items, start_day)?.assignments())
    }
}

/// Schedules `items` against a raw capacity figure.
///
/// The capacity is validated before anything is planned, so a bad capacity
/// never yields a partial schedule.
///
/// # Errors
///
/// Returns [`Error::InvalidCapacity`] if `capacity_hours` is not positive.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use yardplan::schedule::{schedule, WorkItem};
///
/// let today = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
/// assert!(schedule(&[WorkItem::new(1, 2.0)], 0.0, today).is_err());
/// assert!(schedule::<u32>(&[], 8.0, today).unwrap().is_empty());
/// ```
pub fn schedule<K: Ord + Clone>(
    items: &[WorkItem<K>],
    capacity_hours: f64,
    start_day: NaiveDate,
) -> Result<BTreeMap<K, NaiveDate>> {
    let capacity = DailyCapacity::new(capacity_hours)?;
    DayScheduler::new(capacity).schedule(items, start_day)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(offset: u64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 3)
            .unwrap()
            .checked_add_days(Days::new(offset))
            .unwrap()
    }

    fn scheduler(hours: f64) -> DayScheduler {
        DayScheduler::new(DailyCapacity::new(hours).unwrap())
    }

    #[test]
    fn test_capacity_rejects_non_positive() {
        assert!(DailyCapacity::new(0.0).is_err());
        assert!(DailyCapacity::new(-1.0).is_err());
        assert!(DailyCapacity::new(f64::NAN).is_err());
        assert!(DailyCapacity::new(f64::INFINITY).is_err());
        assert!(DailyCapacity::from_staffing(2, 0.0).is_err());
    }

    #[test]
    fn test_greedy_first_fit_scenario() {
        let items = vec![
            WorkItem::new("V1", 5.0),
            WorkItem::new("V2", 4.0),
            WorkItem::new("V3", 3.0),
        ];
        let result = scheduler(7.0).schedule(&items, day(0)).unwrap();
        assert_eq!(result["V1"], day(0));
        assert_eq!(result["V2"], day(1));
        assert_eq!(result["V3"], day(1));
    }

    #[test]
    fn test_exact_fit_stays_on_day() {
        let items = vec![WorkItem::new(1, 4.0), WorkItem::new(2, 4.0)];
        let result = scheduler(8.0).schedule(&items, day(0)).unwrap();
        assert_eq!(result[&1], day(0));
        assert_eq!(result[&2], day(0));
    }

    #[test]
    fn test_empty_input_yields_empty_mapping() {
        let plan = scheduler(8.0).plan::<u32>(&[], day(0)).unwrap();
        assert!(plan.is_empty());
        assert!(plan.assignments().is_empty());
        assert!(plan.last_day().is_none());
    }

    #[test]
    fn test_zero_cost_items_never_advance() {
        let items = vec![
            WorkItem::new(1, 8.0),
            WorkItem::new(2, 0.0),
            WorkItem::new(3, 0.0),
        ];
        let result = scheduler(8.0).schedule(&items, day(0)).unwrap();
        assert_eq!(result[&2], day(0));
        assert_eq!(result[&3], day(0));
    }

    #[test]
    fn test_zero_cost_after_overloaded_day_stays() {
        let items = vec![WorkItem::new(1, 12.0), WorkItem::new(2, 0.0)];
        let result = scheduler(8.0).schedule(&items, day(0)).unwrap();
        assert_eq!(result[&1], day(0));
        assert_eq!(result[&2], day(0));
    }

    #[test]
    fn test_oversized_item_gets_own_day() {
        let items = vec![
            WorkItem::new("small", 2.0),
            WorkItem::new("huge", 20.0),
            WorkItem::new("next", 1.0),
        ];
        let plan = scheduler(8.0).plan(&items, day(0)).unwrap();
        let days = plan.days();
        assert_eq!(days.len(), 3);
        assert_eq!(days[0].items(), ["small"]);
        assert_eq!(days[1].items(), ["huge"]);
        assert!(days[1].is_overloaded());
        assert_eq!(days[2].items(), ["next"]);
        assert!(!days[2].is_overloaded());
    }

    #[test]
    fn test_oversized_first_item_starts_today() {
        let items = vec![WorkItem::new(1, 30.0)];
        let result = scheduler(8.0).schedule(&items, day(0)).unwrap();
        assert_eq!(result[&1], day(0));
    }

    #[test]
    fn test_input_order_is_preserved() {
        // A later small item never jumps back into an earlier day's gap.
        let items = vec![
            WorkItem::new(1, 6.0),
            WorkItem::new(2, 6.0),
            WorkItem::new(3, 1.0),
        ];
        let result = scheduler(8.0).schedule(&items, day(0)).unwrap();
        assert_eq!(result[&1], day(0));
        assert_eq!(result[&2], day(1));
        assert_eq!(result[&3], day(1));
    }

    #[test]
    fn test_malformed_costs_count_as_zero() {
        let items = vec![
            WorkItem::new(1, 8.0),
            WorkItem::new(2, f64::NAN),
            WorkItem::new(3, -3.0),
        ];
        let plan = scheduler(8.0).plan(&items, day(0)).unwrap();
        assert_eq!(plan.days().len(), 1);
        assert!((plan.total_hours() - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_fractional_costs_fill_exactly() {
        let items: Vec<WorkItem<u32>> = (0..10).map(|i| WorkItem::new(i, 0.1)).collect();
        let plan = scheduler(1.0).plan(&items, day(0)).unwrap();
        assert_eq!(plan.days().len(), 1);
    }

    #[test]
    fn test_bucket_accessors() {
        let items = vec![WorkItem::new(1, 3.0), WorkItem::new(2, 2.5)];
        let plan = scheduler(8.0).plan(&items, day(4)).unwrap();
        let bucket = &plan.days()[0];
        assert_eq!(bucket.day(), day(4));
        assert!((bucket.load_hours() - 5.5).abs() < f64::EPSILON);
        assert!((bucket.capacity_hours() - 8.0).abs() < f64::EPSILON);
        assert_eq!(plan.last_day(), Some(day(4)));
    }

    #[test]
    fn test_schedule_function_validates_capacity() {
        let items = vec![WorkItem::new(1, 1.0)];
        let err = schedule(&items, -4.0, day(0)).unwrap_err();
        assert!(matches!(err, Error::InvalidCapacity { .. }));
    }

    #[test]
    fn test_plan_past_calendar_end_fails() {
        let items = vec![WorkItem::new(1, 8.0), WorkItem::new(2, 8.0)];
        assert!(scheduler(8.0).schedule(&items, NaiveDate::MAX).is_err());
    }
}
