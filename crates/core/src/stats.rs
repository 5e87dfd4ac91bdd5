//! Duty statistics: per-ward monthly analytics and a user's own profile.
//!
//! Only working shifts are counted; `leave` entries are ignored throughout.
//! Weeks are buckets of the month (days 1-7, 8-14, ...), see
//! [`calendar::week_of_month`].

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::calendar::{self, WEEKS_PER_MONTH};
use crate::error::CoreError;
use crate::models::{Assignment, Staff};
use crate::repository::RosterStore;
use crate::roles::DutyRole;
use crate::roster::{match_staff, RosterService};
use crate::shifts::Shift;
use crate::types::DbId;

/// Working-shift tally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ShiftCounts {
    pub morning: usize,
    pub evening: usize,
    pub night: usize,
}

impl ShiftCounts {
    pub fn total(&self) -> usize {
        self.morning + self.evening + self.night
    }

    /// Count one entry. Leave is ignored.
    fn record(&mut self, shift: Shift) {
        match shift {
            Shift::Morning => self.morning += 1,
            Shift::Evening => self.evening += 1,
            Shift::Night => self.night += 1,
            Shift::Leave => {}
        }
    }
}

/// Counts for one period, with an optional week-of-month breakdown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DutyPeriod {
    pub total: usize,
    pub by_shift: ShiftCounts,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by_week: Option<[ShiftCounts; WEEKS_PER_MONTH]>,
}

impl DutyPeriod {
    fn with_weeks() -> Self {
        Self {
            by_week: Some([ShiftCounts::default(); WEEKS_PER_MONTH]),
            ..Self::default()
        }
    }

    fn record(&mut self, date: NaiveDate, shift: Shift) {
        if !shift.is_working() {
            return;
        }
        self.total += 1;
        self.by_shift.record(shift);
        if let Some(weeks) = self.by_week.as_mut() {
            weeks[calendar::week_of_month(date)].record(shift);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StaffDutyStats {
    pub staff_id: DbId,
    pub name: String,
    pub role: DutyRole,
    #[serde(flatten)]
    pub duties: DutyPeriod,
}

/// Monthly analytics for one ward.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WardDutyStats {
    pub ward_id: DbId,
    pub year: i32,
    pub month: u32,
    pub staff_count: usize,
    pub total_duties: usize,
    /// Duties per roster member, rounded to the nearest whole duty.
    pub average_per_staff: usize,
    /// Busiest first; ties keep roster order.
    pub staff: Vec<StaffDutyStats>,
}

impl WardDutyStats {
    /// The roster member with the most duties this month, if any.
    pub fn most_active(&self) -> Option<&StaffDutyStats> {
        self.staff.first()
    }
}

/// A signed-in user's own duty history in one ward.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserDutyProfile {
    pub ward_id: DbId,
    pub staff_id: DbId,
    pub name: String,
    pub this_month: DutyPeriod,
    pub last_month: DutyPeriod,
    pub all_time: DutyPeriod,
}

fn in_month(date: NaiveDate, year: i32, month: u32) -> bool {
    date.year() == year && date.month() == month
}

/// Tally a month of assignments per roster member.
///
/// Entries for staff not on `staff` are skipped.
pub fn compute_ward_stats(
    ward_id: DbId,
    year: i32,
    month: u32,
    staff: &[Staff],
    assignments: &[Assignment],
) -> WardDutyStats {
    let mut rows: Vec<StaffDutyStats> = staff
        .iter()
        .map(|s| StaffDutyStats {
            staff_id: s.id,
            name: s.name.clone(),
            role: s.role,
            duties: DutyPeriod::with_weeks(),
        })
        .collect();

    for assignment in assignments {
        let date = assignment.date_key.date();
        if !in_month(date, year, month) {
            continue;
        }
        if let Some(row) = rows.iter_mut().find(|r| r.staff_id == assignment.staff_id) {
            row.duties.record(date, assignment.shift_id);
        }
    }

    // Stable sort keeps roster order between equal totals.
    rows.sort_by(|a, b| b.duties.total.cmp(&a.duties.total));

    let total_duties: usize = rows.iter().map(|r| r.duties.total).sum();
    let average_per_staff = if rows.is_empty() {
        0
    } else {
        (total_duties as f64 / rows.len() as f64).round() as usize
    };

    WardDutyStats {
        ward_id,
        year,
        month,
        staff_count: rows.len(),
        total_duties,
        average_per_staff,
        staff: rows,
    }
}

/// Tally one staff member's duties relative to `today`.
pub fn compute_user_profile(
    ward_id: DbId,
    staff: &Staff,
    assignments: &[Assignment],
    today: NaiveDate,
) -> UserDutyProfile {
    let (last_year, last_month) = calendar::previous_month(today.year(), today.month());
    let mut this_month = DutyPeriod::with_weeks();
    let mut last = DutyPeriod::default();
    let mut all_time = DutyPeriod::default();

    for assignment in assignments.iter().filter(|a| a.staff_id == staff.id) {
        let date = assignment.date_key.date();
        let shift = assignment.shift_id;
        all_time.record(date, shift);
        if in_month(date, today.year(), today.month()) {
            this_month.record(date, shift);
        } else if in_month(date, last_year, last_month) {
            last.record(date, shift);
        }
    }

    UserDutyProfile {
        ward_id,
        staff_id: staff.id,
        name: staff.name.clone(),
        this_month,
        last_month: last,
        all_time,
    }
}

impl<S: RosterStore> RosterService<S> {
    /// Per-staff working-shift counts for one month of a ward.
    pub async fn ward_duty_stats(
        &self,
        ward_id: DbId,
        year: i32,
        month: u32,
    ) -> Result<WardDutyStats, CoreError> {
        if !(1..=12).contains(&month) {
            return Err(CoreError::Validation(format!("Invalid month {month}")));
        }
        self.find_ward(ward_id).await?;
        let staff = self.store().list_staff_by_ward(ward_id).await?;
        let assignments = self.store().list_assignments_by_ward(ward_id).await?;
        Ok(compute_ward_stats(ward_id, year, month, &staff, &assignments))
    }

    /// The duty profile of the roster entry matching a login user.
    ///
    /// Returns `None` when nobody on the ward's roster matches the user.
    pub async fn user_duty_profile(
        &self,
        ward_id: DbId,
        user_id: DbId,
        today: NaiveDate,
    ) -> Result<Option<UserDutyProfile>, CoreError> {
        self.find_ward(ward_id).await?;
        let user = self.find_user(user_id).await?;
        let staff = self.store().list_staff_by_ward(ward_id).await?;
        let Some(member) = match_staff(&staff, user.id, &user.full_name) else {
            tracing::debug!(ward_id, user_id, "No roster entry matches user");
            return Ok(None);
        };
        let assignments = self.store().list_assignments_by_ward(ward_id).await?;
        Ok(Some(compute_user_profile(ward_id, member, &assignments, today)))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::calendar::DateKey;

    fn member(id: DbId, name: &str) -> Staff {
        Staff {
            id,
            ward_id: 1,
            name: name.to_string(),
            role: DutyRole::Staff,
            user_id: None,
            created_at: Utc::now(),
        }
    }

    fn entry(staff_id: DbId, date: &str, shift: Shift) -> Assignment {
        Assignment {
            id: 0,
            ward_id: 1,
            date_key: DateKey::parse(date).unwrap(),
            shift_id: shift,
            staff_id,
            created_at: Utc::now(),
        }
    }

    fn date(s: &str) -> NaiveDate {
        DateKey::parse(s).unwrap().date()
    }

    #[test]
    fn test_ward_stats_skip_leave_and_other_months() {
        let staff = vec![member(1, "Asha"), member(2, "Ravi")];
        let assignments = vec![
            entry(1, "2024-06-03", Shift::Morning),
            entry(1, "2024-06-03", Shift::Night),
            entry(1, "2024-06-10", Shift::Leave),
            entry(1, "2024-07-01", Shift::Morning),
            entry(2, "2024-06-29", Shift::Evening),
            entry(99, "2024-06-03", Shift::Morning),
        ];

        let stats = compute_ward_stats(1, 2024, 6, &staff, &assignments);
        assert_eq!(stats.total_duties, 3);
        assert_eq!(stats.staff_count, 2);
        assert_eq!(stats.average_per_staff, 2);
        assert_eq!(stats.most_active().map(|s| s.staff_id), Some(1));

        let asha = &stats.staff[0];
        assert_eq!(asha.duties.by_shift.morning, 1);
        assert_eq!(asha.duties.by_shift.night, 1);
        let weeks = asha.duties.by_week.unwrap();
        assert_eq!(weeks[0].total(), 2);

        let ravi = &stats.staff[1];
        assert_eq!(ravi.duties.by_week.unwrap()[4].evening, 1);
    }

    #[test]
    fn test_ward_stats_ties_keep_roster_order() {
        let staff = vec![member(1, "Asha"), member(2, "Ravi")];
        let stats = compute_ward_stats(1, 2024, 6, &staff, &[]);
        assert_eq!(stats.staff[0].staff_id, 1);
        assert_eq!(stats.average_per_staff, 0);
    }

    #[test]
    fn test_empty_roster_has_no_average() {
        let stats = compute_ward_stats(1, 2024, 6, &[], &[entry(1, "2024-06-03", Shift::Night)]);
        assert_eq!(stats.total_duties, 0);
        assert!(stats.most_active().is_none());
    }

    #[test]
    fn test_profile_rolls_january_back_to_december() {
        let asha = member(1, "Asha");
        let assignments = vec![
            entry(1, "2025-01-02", Shift::Morning),
            entry(1, "2024-12-31", Shift::Night),
            entry(1, "2024-12-30", Shift::Leave),
            entry(1, "2024-11-15", Shift::Evening),
            entry(2, "2025-01-02", Shift::Morning),
        ];

        let profile = compute_user_profile(1, &asha, &assignments, date("2025-01-20"));
        assert_eq!(profile.this_month.total, 1);
        assert_eq!(profile.this_month.by_week.unwrap()[0].morning, 1);
        assert_eq!(profile.last_month.total, 1);
        assert_eq!(profile.last_month.by_shift.night, 1);
        assert!(profile.last_month.by_week.is_none());
        assert_eq!(profile.all_time.total, 3);
    }

    #[tokio::test]
    async fn test_user_profile_is_none_without_matching_staff() {
        use crate::memory::MemoryStore;
        use crate::models::CreateUser;
        use crate::roles::UserRole;

        let svc = RosterService::new(MemoryStore::new());
        let ward = svc.create_ward("ICU").await.unwrap();
        let user = svc
            .create_user(CreateUser {
                username: "asha".into(),
                password_hash: "$argon2id$stub".into(),
                full_name: "Asha".into(),
                role: UserRole::Staff,
                assigned_wards: vec![ward.id],
            })
            .await
            .unwrap();
        let today = date("2024-06-20");
        assert!(svc.user_duty_profile(ward.id, user.id, today).await.unwrap().is_none());

        let staff = svc.add_staff(ward.id, "asha", DutyRole::Staff).await.unwrap();
        svc.assign(ward.id, DateKey::parse("2024-06-03").unwrap(), Shift::Morning, staff.id)
            .await
            .unwrap();
        let profile = svc
            .user_duty_profile(ward.id, user.id, today)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(profile.staff_id, staff.id);
        assert_eq!(profile.this_month.total, 1);
    }

    #[tokio::test]
    async fn test_ward_stats_rejects_bad_month() {
        use crate::memory::MemoryStore;

        let svc = RosterService::new(MemoryStore::new());
        let ward = svc.create_ward("ICU").await.unwrap();
        assert!(svc.ward_duty_stats(ward.id, 2024, 13).await.is_err());
        assert_eq!(svc.ward_duty_stats(ward.id, 2024, 6).await.unwrap().staff_count, 0);
    }
}
