//! End-to-end roster scenarios against the in-memory store.

use assert_matches::assert_matches;
use wardroster_core::calendar::{self, DateKey};
use wardroster_core::error::CoreError;
use wardroster_core::memory::MemoryStore;
use wardroster_core::models::{CreateUser, Requester};
use wardroster_core::roles::{DutyRole, UserRole, USER_ROLES};
use wardroster_core::roster::{ApprovalEffect, RosterService};
use wardroster_core::shifts::Shift;
use wardroster_core::workflow::RequestStatus;

fn service() -> RosterService<MemoryStore> {
    RosterService::new(MemoryStore::new())
}

fn day(s: &str) -> DateKey {
    DateKey::parse(s).unwrap()
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_icu_asha_assignment_cleared_when_staff_removed() {
    let svc = service();
    let icu = svc.create_ward("ICU").await.unwrap();
    let asha = svc.add_staff(icu.id, "Asha", DutyRole::Staff).await.unwrap();
    let monday = day("2024-06-03");

    svc.assign(icu.id, monday, Shift::Morning, asha.id).await.unwrap();
    assert_eq!(
        svc.get_cell(icu.id, monday, Shift::Morning).await.unwrap(),
        vec![asha.id]
    );

    svc.remove_staff(asha.id).await.unwrap();
    assert!(svc
        .get_cell(icu.id, monday, Shift::Morning)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_assign_twice_equals_once() {
    let svc = service();
    let icu = svc.create_ward("ICU").await.unwrap();
    let asha = svc.add_staff(icu.id, "Asha", DutyRole::Staff).await.unwrap();
    let monday = day("2024-06-03");

    svc.assign(icu.id, monday, Shift::Night, asha.id).await.unwrap();
    svc.assign(icu.id, monday, Shift::Night, asha.id).await.unwrap();
    assert_eq!(
        svc.get_cell(icu.id, monday, Shift::Night).await.unwrap(),
        vec![asha.id]
    );
}

#[tokio::test]
async fn test_wards_are_independent_namespaces() {
    let svc = service();
    let icu = svc.create_ward("ICU").await.unwrap();
    let er = svc.create_ward("ER").await.unwrap();
    let asha = svc.add_staff(icu.id, "Asha", DutyRole::Staff).await.unwrap();
    let monday = day("2024-06-03");

    svc.assign(icu.id, monday, Shift::Morning, asha.id).await.unwrap();
    assert!(svc.get_cell(er.id, monday, Shift::Morning).await.unwrap().is_empty());
    assert!(svc.list_staff(er.id).await.unwrap().is_empty());
}

#[test]
fn test_wednesday_anchor_runs_monday_to_sunday() {
    let dates = calendar::week_dates(day("2024-06-05").date());
    assert_eq!(DateKey::new(dates[0]), day("2024-06-03"));
    assert_eq!(DateKey::new(dates[6]), day("2024-06-09"));
}

// ---------------------------------------------------------------------------
// Ward deletion
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_delete_ward_cascades_everything() {
    let svc = service();
    let icu = svc.create_ward("ICU").await.unwrap();
    let er = svc.create_ward("ER").await.unwrap();
    let asha = svc.add_staff(icu.id, "Asha", DutyRole::Staff).await.unwrap();
    let kiran = svc.add_staff(er.id, "Kiran", DutyRole::Staff).await.unwrap();
    let monday = day("2024-06-03");
    svc.assign(icu.id, monday, Shift::Morning, asha.id).await.unwrap();
    svc.assign(er.id, monday, Shift::Morning, kiran.id).await.unwrap();
    let ravi = Requester {
        user_id: 50,
        display_name: "Ravi".into(),
    };
    svc.submit(icu.id, &ravi, monday, "Night", "medical")
        .await
        .unwrap();

    let deletion = svc.delete_ward(icu.id).await.unwrap();
    assert_eq!(deletion.staff_removed, 1);
    assert_eq!(deletion.assignments_removed, 1);
    assert_eq!(deletion.requests_removed, 1);
    assert_eq!(deletion.next_ward_id, Some(er.id));

    assert!(svc.list_staff(icu.id).await.unwrap().is_empty());
    assert!(svc.list_requests(icu.id).await.unwrap().is_empty());
    assert!(svc.get_cell(icu.id, monday, Shift::Morning).await.unwrap().is_empty());
    assert_matches!(
        svc.find_ward(icu.id).await,
        Err(CoreError::NotFound { entity: "Ward", .. })
    );

    // The other ward is untouched.
    assert_eq!(svc.list_staff(er.id).await.unwrap().len(), 1);
    assert_eq!(
        svc.get_cell(er.id, monday, Shift::Morning).await.unwrap(),
        vec![kiran.id]
    );
}

#[tokio::test]
async fn test_failed_cascade_reports_transport() {
    let svc = service();
    let icu = svc.create_ward("ICU").await.unwrap();
    svc.add_staff(icu.id, "Asha", DutyRole::Staff).await.unwrap();

    svc.store().set_offline(true);
    assert_matches!(svc.delete_ward(icu.id).await, Err(CoreError::Transport(_)));
    svc.store().set_offline(false);

    // Nothing was applied, so a retry completes the cascade.
    assert_eq!(svc.list_staff(icu.id).await.unwrap().len(), 1);
    svc.delete_ward(icu.id).await.unwrap();
    assert!(svc.list_wards().await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Change requests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_ravi_request_approved_without_matching_staff() {
    let svc = service();
    let icu = svc.create_ward("ICU").await.unwrap();
    let ravi = Requester {
        user_id: 50,
        display_name: "Ravi".into(),
    };
    let night = day("2024-06-10");

    let request = svc
        .submit(icu.id, &ravi, night, "Night", "medical")
        .await
        .unwrap();
    assert_eq!(request.status, RequestStatus::Pending);

    let outcome = svc.approve(request.id).await.unwrap();
    assert_eq!(outcome.request.status, RequestStatus::Approved);
    assert_eq!(outcome.effect, ApprovalEffect::NoMatchingStaff);
    assert!(svc.get_cell(icu.id, night, Shift::Night).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_terminal_request_status_never_changes() {
    let svc = service();
    let icu = svc.create_ward("ICU").await.unwrap();
    let ravi = Requester {
        user_id: 50,
        display_name: "Ravi".into(),
    };
    let request = svc
        .submit(icu.id, &ravi, day("2024-06-10"), "Night", "medical")
        .await
        .unwrap();
    svc.approve(request.id).await.unwrap();

    for _ in 0..2 {
        assert_matches!(
            svc.reject(request.id).await,
            Err(CoreError::InvalidTransition { .. })
        );
        assert_matches!(
            svc.approve(request.id).await,
            Err(CoreError::InvalidTransition { .. })
        );
    }
    assert_eq!(
        svc.find_request(request.id).await.unwrap().status,
        RequestStatus::Approved
    );
}

#[tokio::test]
async fn test_requests_listed_newest_first_with_pending_count() {
    let svc = service();
    let icu = svc.create_ward("ICU").await.unwrap();
    let ravi = Requester {
        user_id: 50,
        display_name: "Ravi".into(),
    };
    let first = svc
        .submit(icu.id, &ravi, day("2024-06-10"), "Night", "medical")
        .await
        .unwrap();
    let second = svc
        .submit(icu.id, &ravi, day("2024-06-11"), "Morning", "exam")
        .await
        .unwrap();
    svc.reject(first.id).await.unwrap();

    let listed = svc.list_requests(icu.id).await.unwrap();
    assert_eq!(listed[0].id, second.id);
    assert_eq!(listed[1].id, first.id);
    assert_eq!(svc.count_pending(icu.id).await.unwrap(), 1);
}

// ---------------------------------------------------------------------------
// Visibility
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_no_viewer_sees_a_role_outside_their_set() {
    let svc = service();
    let icu = svc.create_ward("ICU").await.unwrap();
    for (name, role) in [
        ("Meera", DutyRole::InCharge),
        ("Asha", DutyRole::Staff),
        ("Sunil", DutyRole::Attendant),
        ("Gopal", DutyRole::Sweeper),
        ("Lata", DutyRole::Reliever),
    ] {
        svc.add_staff(icu.id, name, role).await.unwrap();
    }

    for viewer in USER_ROLES {
        let caps = viewer.capabilities();
        for staff in svc.list_visible_staff(icu.id, *viewer).await.unwrap() {
            assert!(caps.can_see(staff.role), "{viewer:?} saw {:?}", staff.role);
        }
    }
}

#[tokio::test]
async fn test_promoted_user_request_lands_in_cell() {
    let svc = service();
    let icu = svc.create_ward("ICU").await.unwrap();
    let user = svc
        .create_user(CreateUser {
            username: "sunil".into(),
            password_hash: "$argon2id$stub".into(),
            full_name: "Sunil Patil".into(),
            role: UserRole::Attendant,
            assigned_wards: vec![icu.id],
        })
        .await
        .unwrap();
    let staff = svc.promote_user(icu.id, user.id).await.unwrap();
    let sunday = day("2024-06-09");

    let request = svc
        .submit(icu.id, &Requester::from(&user), sunday, "Evening", "cover")
        .await
        .unwrap();
    svc.approve(request.id).await.unwrap();

    let seen_by_attendant = svc
        .list_visible_cell(icu.id, sunday, Shift::Evening, UserRole::Attendant)
        .await
        .unwrap();
    assert_eq!(seen_by_attendant, vec![staff.id]);
    let seen_by_staff = svc
        .list_visible_cell(icu.id, sunday, Shift::Evening, UserRole::Staff)
        .await
        .unwrap();
    assert!(seen_by_staff.is_empty());
}
