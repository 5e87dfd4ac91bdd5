//! The fixed shift list.
//!
//! Shift ids must match the `CHECK` constraint on `assignments.shift_id`.

use serde::{Deserialize, Serialize};

pub const SHIFT_MORNING: &str = "morning";
pub const SHIFT_EVENING: &str = "evening";
pub const SHIFT_NIGHT: &str = "night";
pub const SHIFT_LEAVE: &str = "leave";

/// A row of the weekly grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shift {
    Morning,
    Evening,
    Night,
    /// Planned absence rather than a working shift.
    Leave,
}

/// Grid row order.
pub const SHIFTS: [Shift; 4] = [Shift::Morning, Shift::Evening, Shift::Night, Shift::Leave];

/// Working shifts only, as counted by duty statistics.
pub const WORKING_SHIFTS: [Shift; 3] = [Shift::Morning, Shift::Evening, Shift::Night];

impl Shift {
    /// Convert from a database string value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            SHIFT_MORNING => Ok(Self::Morning),
            SHIFT_EVENING => Ok(Self::Evening),
            SHIFT_NIGHT => Ok(Self::Night),
            SHIFT_LEAVE => Ok(Self::Leave),
            _ => Err(format!(
                "Invalid shift '{s}'. Must be one of: {SHIFT_MORNING}, {SHIFT_EVENING}, \
                 {SHIFT_NIGHT}, {SHIFT_LEAVE}"
            )),
        }
    }

    /// Convert to the database string value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Morning => SHIFT_MORNING,
            Self::Evening => SHIFT_EVENING,
            Self::Night => SHIFT_NIGHT,
            Self::Leave => SHIFT_LEAVE,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Morning => "Morning",
            Self::Evening => "Evening",
            Self::Night => "Night",
            Self::Leave => "On Leave",
        }
    }

    pub fn hours(self) -> &'static str {
        match self {
            Self::Morning => "8:00 AM - 2:00 PM",
            Self::Evening => "2:00 PM - 8:00 PM",
            Self::Night => "8:00 PM - 8:00 AM",
            Self::Leave => "Full Day",
        }
    }

    pub fn is_working(self) -> bool {
        !matches!(self, Self::Leave)
    }

    /// Resolve a free-text shift label (as shown on the grid) back to a shift.
    ///
    /// Matches either the display label or the id, ignoring case and
    /// surrounding whitespace. Returns `None` for anything else.
    pub fn resolve_label(label: &str) -> Option<Self> {
        let wanted = label.trim();
        SHIFTS.into_iter().find(|shift| {
            shift.label().eq_ignore_ascii_case(wanted) || shift.as_str().eq_ignore_ascii_case(wanted)
        })
    }
}

impl std::fmt::Display for Shift {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
