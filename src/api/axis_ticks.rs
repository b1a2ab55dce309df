use ordered_float::OrderedFloat;
use serde::Serialize;

/// Month boundary on the campaign axis.
///
/// Positions are month starts on the fixed 365-day table; gridlines between
/// them are spaced ~30.4 days apart by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthTick {
    pub day_index: u16,
    pub label: &'static str,
}

const fn tick(day_index: u16, label: &'static str) -> MonthTick {
    MonthTick { day_index, label }
}

pub const MONTH_TICKS: [MonthTick; 12] = [
    tick(0, "Sep"),
    tick(30, "Oct"),
    tick(61, "Nov"),
    tick(91, "Dec"),
    tick(122, "Jan"),
    tick(153, "Feb"),
    tick(181, "Mar"),
    tick(212, "Apr"),
    tick(242, "May"),
    tick(273, "Jun"),
    tick(303, "Jul"),
    tick(334, "Aug"),
];

/// Axis values farther than this from every tick get no label.
pub const MONTH_LABEL_TOLERANCE_DAYS: f64 = 5.0;

/// Label of the month tick nearest to `axis_value`, if strictly within
/// [`MONTH_LABEL_TOLERANCE_DAYS`].
#[must_use]
pub fn month_tick_label(axis_value: f64) -> Option<&'static str> {
    if !axis_value.is_finite() {
        return None;
    }

    MONTH_TICKS
        .iter()
        .min_by_key(|tick| OrderedFloat((f64::from(tick.day_index) - axis_value).abs()))
        .filter(|tick| (f64::from(tick.day_index) - axis_value).abs() < MONTH_LABEL_TOLERANCE_DAYS)
        .map(|tick| tick.label)
}
