//! Start/end selection and the transitions driven by taps, wheel changes and
//! text commits. Every transition takes `self` by value and returns the next
//! selection, so `start`, `end` and the visible month never alias.

use std::ops::RangeInclusive;

use tracing::debug;

use crate::widgets::shared::bounds::{Bounds, MinuteInterval, Rounding, round_minutes, snap_minutes};
use crate::widgets::shared::datetime::DateTime;

/// Where a range selection stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    /// Range mode is off; only `start` is tracked.
    Single,
    /// Range mode is on and the next eligible tap completes the range.
    AwaitingEnd,
    /// Both ends chosen.
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Start,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    start: DateTime,
    end: Option<DateTime>,
    range_mode: bool,
    /// Armed on open in range mode: the first tap always restarts the range,
    /// even when it falls after the seeded start.
    first_tap_armed: bool,
    bounds: Bounds,
    interval: MinuteInterval,
}

impl Selection {
    /// Seeds the selection for a freshly opened picker.
    pub fn open(
        initial: DateTime,
        initial_end: Option<DateTime>,
        range_mode: bool,
        bounds: Bounds,
        interval: MinuteInterval,
    ) -> Self {
        let seed = |value: DateTime| {
            let value = bounds.clamp(value);
            let rounding = if value.same_day(bounds.minimum()) {
                Rounding::Up
            } else {
                Rounding::Down
            };
            bounds.clamp(snap_minutes(value, interval, rounding))
        };

        let start = seed(initial);
        let end = if range_mode {
            initial_end.map(|end| seed(end).max(start))
        } else {
            None
        };

        Self {
            start,
            end,
            range_mode,
            first_tap_armed: range_mode,
            bounds,
            interval,
        }
    }

    pub fn start(&self) -> DateTime {
        self.start
    }

    pub fn end(&self) -> Option<DateTime> {
        self.end
    }

    pub fn get(&self, side: Side) -> Option<DateTime> {
        match side {
            Side::Start => Some(self.start),
            Side::End => self.end,
        }
    }

    pub fn range_mode(&self) -> bool {
        self.range_mode
    }

    pub fn first_tap_armed(&self) -> bool {
        self.first_tap_armed
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn interval(&self) -> MinuteInterval {
        self.interval
    }

    pub fn state(&self) -> SelectionState {
        match (self.range_mode, self.end) {
            (false, _) => SelectionState::Single,
            (true, None) => SelectionState::AwaitingEnd,
            (true, Some(_)) => SelectionState::Complete,
        }
    }

    /// The confirmed shape: `(start, Some(end))` only when range mode is on
    /// and an end was chosen.
    pub fn picked(&self) -> (DateTime, Option<DateTime>) {
        if self.range_mode {
            (self.start, self.end)
        } else {
            (self.start, None)
        }
    }

    /// A tap on a calendar day. Days outside the bounds are ignored.
    pub fn select_date(self, candidate: DateTime, preserve_time: bool) -> Self {
        if !self.bounds.contains_day(candidate) {
            debug!(day = %candidate.day_key(), "tap on disabled day ignored");
            return self;
        }

        let candidate = if preserve_time {
            candidate.with_time_of(self.start)
        } else {
            candidate
        };
        let candidate = self.bounds.snap(candidate, self.interval, None);

        let next = if !self.range_mode {
            Self {
                start: candidate,
                end: None,
                ..self
            }
        } else if self.end.is_none() && candidate >= self.start && !self.first_tap_armed {
            Self {
                end: Some(candidate),
                ..self
            }
        } else {
            Self {
                start: candidate,
                end: None,
                first_tap_armed: false,
                ..self
            }
        };

        debug!(
            from = ?self.state(),
            to = ?next.state(),
            start = %next.start,
            end = ?next.end.map(|end| end.to_string()),
            "date selected"
        );
        next
    }

    /// Re-clamps both ends into the bounds after free-form edits. The start
    /// rounds its minutes up, the end rounds down, and an end before the
    /// start collapses onto it.
    pub fn normalize(self) -> Self {
        let start = self.bounds.snap(self.start, self.interval, Some(Rounding::Up));
        let end = self.end.map(|end| {
            self.bounds
                .snap(end, self.interval, Some(Rounding::Down))
                .max(start)
        });
        Self { start, end, ..self }
    }

    /// Month/year navigation: outside range mode the start follows the
    /// visible month, keeping its day where the month allows.
    pub fn follow_visible_month(self, visible: DateTime) -> Self {
        if self.range_mode {
            return self;
        }
        let start = self
            .start
            .with_date_parts(visible.year(), visible.month(), self.start.day());
        Self { start, ..self }
    }

    /// Hour/minute change from a wheel or text field.
    pub fn set_time(self, side: Side, hour: u32, minute: u32) -> Self {
        let mut next = self;
        match side {
            Side::Start => next.start = self.start.with_time(hour, minute),
            Side::End => match self.end {
                Some(end) => next.end = Some(end.with_time(hour, minute)),
                None => return self,
            },
        }
        if let Some(end) = next.end
            && next.start > end
        {
            next.end = Some(end.with_time_of(next.start).max(next.start));
        }
        next
    }

    /// A completed `DD.MM.YYYY` text entry for one side.
    pub fn commit_date(self, side: Side, year: i32, month: u32, day: u32) -> Self {
        match side {
            Side::Start => Self {
                start: self.start.with_date_parts(year, month, day),
                ..self
            },
            Side::End => match self.end {
                Some(end) => Self {
                    end: Some(end.with_date_parts(year, month, day)),
                    ..self
                },
                None => self,
            },
        }
    }

    /// Month/year wheel commit: the edited side moves to the visible month's
    /// date; a start pushed past the end drags the end along.
    pub fn pick_month_year(self, side: Side, visible: DateTime) -> Self {
        let mut next = self;
        match side {
            Side::Start => next.start = self.start.with_date_of(visible),
            Side::End => match self.end {
                Some(end) => next.end = Some(end.with_date_of(visible)),
                None => return self,
            },
        }
        if let Some(end) = next.end
            && next.start > end
        {
            next.end = Some(next.start);
        }
        next
    }

    /// Seeds `end := start`, used by the time-only range mode.
    pub fn with_end_at_start(self) -> Self {
        if !self.range_mode {
            return self;
        }
        Self {
            end: Some(self.start),
            ..self
        }
    }

    // ── Time wheel ranges ─────────────────────────────────────────────────────

    fn time_floor(&self, side: Side, value: DateTime) -> (u32, u32) {
        let mut floor = (0, 0);
        let minimum = self.bounds.minimum();
        if value.same_day(minimum) {
            let minute = round_minutes(minimum.minute(), self.interval, Rounding::Up);
            floor = if minute >= 60 {
                (minimum.hour() + 1, 0)
            } else {
                (minimum.hour(), minute)
            };
        }
        if side == Side::End && value.same_day(self.start) {
            floor = floor.max((self.start.hour(), self.start.minute()));
        }
        floor
    }

    fn time_ceiling(&self, value: DateTime) -> (u32, u32) {
        let maximum = self.bounds.maximum();
        if value.same_day(maximum) {
            (maximum.hour(), maximum.minute())
        } else {
            (23, 59)
        }
    }

    /// Hours offered by the time wheel for `side`.
    pub fn hour_options(&self, side: Side) -> RangeInclusive<u32> {
        let Some(value) = self.get(side) else {
            return 0..=23;
        };
        let (min_hour, _) = self.time_floor(side, value);
        let (max_hour, _) = self.time_ceiling(value);
        min_hour.min(23)..=max_hour
    }

    /// Minutes offered for the current hour of `side`, stepped by the interval.
    pub fn minute_options(&self, side: Side) -> Vec<u32> {
        let Some(value) = self.get(side) else {
            return (0..60).step_by(self.interval.get() as usize).collect();
        };
        let (floor_hour, floor_minute) = self.time_floor(side, value);
        let (ceil_hour, ceil_minute) = self.time_ceiling(value);
        let first = if value.hour() == floor_hour { floor_minute } else { 0 };
        let last = if value.hour() == ceil_hour { ceil_minute } else { 59 };
        let first = round_minutes(first, self.interval, Rounding::Up);
        (first..=last)
            .step_by(self.interval.get() as usize)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn dt(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime {
        DateTime::from_ymd_hm(year, month, day, hour, minute).expect("valid datetime")
    }

    fn day(d: u32) -> DateTime {
        dt(2024, 1, d, 0, 0)
    }

    fn january_bounds() -> Bounds {
        Bounds::new(dt(2024, 1, 10, 0, 0), dt(2024, 1, 20, 23, 59)).expect("bounds")
    }

    fn open(range_mode: bool) -> Selection {
        Selection::open(
            dt(2024, 1, 10, 12, 0),
            None,
            range_mode,
            january_bounds(),
            MinuteInterval::default(),
        )
    }

    #[test]
    fn tap_on_disabled_day_changes_nothing() {
        let selection = open(false);
        assert_eq!(selection.select_date(day(5), true), selection);
    }

    #[test]
    fn single_mode_tap_moves_start_and_keeps_time() {
        let selection = open(false).select_date(day(15), true);
        assert_eq!(selection.start(), dt(2024, 1, 15, 12, 0));
        assert_eq!(selection.end(), None);
        assert_eq!(selection.state(), SelectionState::Single);
    }

    #[test]
    fn range_scenario_from_restart_to_completion() {
        let selection = open(true);
        assert_eq!(selection.state(), SelectionState::AwaitingEnd);

        let selection = selection.select_date(day(5), true);
        assert!(selection.first_tap_armed());

        let selection = selection.select_date(day(15), true);
        assert_eq!(selection.start().date(), day(15).date());
        assert_eq!(selection.end(), None);
        assert!(!selection.first_tap_armed());

        let selection = selection.select_date(day(12), true);
        assert_eq!(selection.start().date(), day(12).date());
        assert_eq!(selection.end(), None);

        let selection = selection.select_date(day(18), true);
        assert_eq!(selection.start().date(), day(12).date());
        assert_eq!(selection.end().map(DateTime::date), Some(day(18).date()));
        assert_eq!(selection.state(), SelectionState::Complete);
    }

    #[test]
    fn first_tap_after_open_never_completes_the_range() {
        let selection = open(true).select_date(day(16), true);
        assert_eq!(selection.start().date(), day(16).date());
        assert_eq!(selection.end(), None);
    }

    #[test]
    fn tap_on_complete_range_restarts_it() {
        let selection = open(true)
            .select_date(day(11), true)
            .select_date(day(13), true)
            .select_date(day(19), true);
        assert_eq!(selection.start().date(), day(19).date());
        assert_eq!(selection.end(), None);
    }

    #[test]
    fn tap_on_lower_bound_day_snaps_time_up() {
        let bounds = Bounds::new(dt(2024, 1, 10, 9, 7), dt(2024, 1, 20, 18, 0)).expect("bounds");
        let quarter = MinuteInterval::new(15).expect("interval");
        let selection = Selection::open(dt(2024, 1, 12, 8, 0), None, false, bounds, quarter)
            .select_date(day(10), true);
        assert_eq!(selection.start(), dt(2024, 1, 10, 9, 15));
    }

    #[test]
    fn normalize_rounds_start_up_and_end_down() {
        let quarter = MinuteInterval::new(15).expect("interval");
        let selection = Selection::open(day(12), Some(day(14)), true, january_bounds(), quarter)
            .set_time(Side::Start, 9, 7)
            .set_time(Side::End, 9, 7)
            .normalize();
        assert_eq!(selection.start(), dt(2024, 1, 12, 9, 15));
        assert_eq!(selection.end(), Some(dt(2024, 1, 14, 9, 0)));
    }

    #[test]
    fn normalize_pulls_out_of_range_text_edits_back() {
        let selection = open(true)
            .commit_date(Side::Start, 2030, 5, 1)
            .normalize();
        assert_eq!(selection.start(), dt(2024, 1, 20, 23, 55));
    }

    #[test]
    fn end_before_start_collapses_onto_start() {
        let selection = Selection::open(
            day(15),
            Some(day(16)),
            true,
            january_bounds(),
            MinuteInterval::ONE,
        )
        .commit_date(Side::End, 2024, 1, 11)
        .normalize();
        assert_eq!(selection.end(), Some(selection.start()));
    }

    #[test]
    fn seeded_end_never_precedes_start() {
        let selection = Selection::open(
            day(15),
            Some(day(12)),
            true,
            january_bounds(),
            MinuteInterval::ONE,
        );
        assert_eq!(selection.end(), Some(selection.start()));
        let single = Selection::open(
            day(15),
            Some(day(18)),
            false,
            january_bounds(),
            MinuteInterval::ONE,
        );
        assert_eq!(single.end(), None);
    }

    #[test]
    fn start_time_past_end_drags_end_time() {
        let selection = Selection::open(
            dt(2024, 1, 12, 9, 0),
            Some(dt(2024, 1, 12, 10, 0)),
            true,
            january_bounds(),
            MinuteInterval::ONE,
        )
        .set_time(Side::Start, 11, 30);
        assert_eq!(selection.end(), Some(dt(2024, 1, 12, 11, 30)));
    }

    #[test]
    fn navigation_moves_start_only_outside_range_mode() {
        let visible = dt(2024, 2, 1, 0, 0);
        let single = open(false).follow_visible_month(visible);
        assert_eq!(single.start(), dt(2024, 2, 10, 12, 0));
        let range = open(true).follow_visible_month(visible);
        assert_eq!(range.start(), open(true).start());
    }

    #[test]
    fn time_options_respect_bound_days() {
        let bounds = Bounds::new(dt(2024, 1, 10, 9, 7), dt(2024, 1, 20, 17, 30)).expect("bounds");
        let quarter = MinuteInterval::new(15).expect("interval");
        let low = Selection::open(dt(2024, 1, 10, 9, 30), None, false, bounds, quarter);
        assert_eq!(low.hour_options(Side::Start), 9..=23);

        let at_floor = low.set_time(Side::Start, 9, 15);
        assert_eq!(at_floor.minute_options(Side::Start), vec![15, 30, 45]);

        let high = Selection::open(dt(2024, 1, 20, 17, 0), None, false, bounds, quarter);
        assert_eq!(high.hour_options(Side::Start), 0..=17);
        assert_eq!(high.minute_options(Side::Start), vec![0, 15, 30]);
    }

    #[test]
    fn end_time_options_start_at_start_on_same_day() {
        let selection = Selection::open(
            dt(2024, 1, 12, 14, 20),
            Some(dt(2024, 1, 12, 14, 40)),
            true,
            january_bounds(),
            MinuteInterval::new(10).expect("interval"),
        );
        assert_eq!(selection.hour_options(Side::End), 14..=23);
        assert_eq!(selection.minute_options(Side::End), vec![20, 30, 40, 50]);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Tap(u32, bool),
        Normalize,
    }

    fn arb_op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (1u32..=31, any::<bool>()).prop_map(|(d, keep)| Op::Tap(d, keep)),
            Just(Op::Normalize),
        ]
    }

    proptest! {
        #[test]
        fn range_invariant_holds_after_any_sequence(
            range_mode in any::<bool>(),
            start_day in 1u32..=31,
            hour in 0u32..24,
            minute in 0u32..60,
            ops in prop::collection::vec(arb_op(), 0..40),
        ) {
            let mut selection = Selection::open(
                dt(2024, 1, start_day, hour, minute),
                Some(dt(2024, 1, 31, 0, 0)),
                range_mode,
                january_bounds(),
                MinuteInterval::default(),
            );
            for op in ops {
                selection = match op {
                    Op::Tap(d, keep) => selection.select_date(dt(2024, 1, d, hour, minute), keep),
                    Op::Normalize => selection.normalize(),
                };
                let bounds = selection.bounds();
                prop_assert!(bounds.contains(selection.start()));
                if let Some(end) = selection.end() {
                    prop_assert!(range_mode);
                    prop_assert!(end >= selection.start());
                    prop_assert!(bounds.contains(end));
                }
            }
        }
    }
}
