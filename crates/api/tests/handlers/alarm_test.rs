use axum::Json;
use mockall::predicate;
use uuid::Uuid;
use wakesync_api::middleware::error_handling::AppError;
use wakesync_core::{
    errors::AlarmError,
    models::{
        alarm::{AlarmResponse, CreateAlarmRequest, StopMethod, ToggleAlarmResponse},
        session::SessionIdentity,
        time::TimeFormat,
    },
};
use wakesync_db::models::DbAlarm;

use crate::test_utils::{sample_db_alarm, TestContext};

// Test wrappers that route handler logic through the mock repositories
// instead of a live database.

async fn test_get_alarm_wrapper(
    ctx: &TestContext,
    id: Uuid,
    user_id: Uuid,
) -> Result<Json<AlarmResponse>, AppError> {
    match ctx.alarm_repo.get_alarm_by_id(id, user_id).await {
        Ok(Some(db_alarm)) => {
            let alarm = db_alarm.into_alarm().map_err(AlarmError::Database)?;
            Ok(Json(AlarmResponse::from_alarm(
                alarm,
                TimeFormat::TwentyFourHour,
            )))
        }
        Ok(None) => Err(AppError(AlarmError::NotFound(format!(
            "Alarm with ID {} not found",
            id
        )))),
        Err(e) => Err(AppError(AlarmError::Database(e))),
    }
}

async fn test_create_alarm_wrapper(
    ctx: &TestContext,
    identity: &SessionIdentity,
    request: CreateAlarmRequest,
) -> Result<Json<AlarmResponse>, AppError> {
    // Validation must run before any repository call
    let new_alarm = request.normalize(identity)?;

    let db_alarm = ctx
        .alarm_repo
        .create_alarm(new_alarm)
        .await
        .map_err(AlarmError::Database)?;

    let alarm = db_alarm.into_alarm().map_err(AlarmError::Database)?;
    Ok(Json(AlarmResponse::from_alarm(
        alarm,
        TimeFormat::TwentyFourHour,
    )))
}

async fn test_toggle_alarm_wrapper(
    ctx: &TestContext,
    id: Uuid,
    user_id: Uuid,
) -> Result<Json<ToggleAlarmResponse>, AppError> {
    let current = ctx
        .alarm_repo
        .get_alarm_by_id(id, user_id)
        .await
        .map_err(AlarmError::Database)?
        .ok_or_else(|| AlarmError::NotFound(format!("Alarm with ID {} not found", id)))?;

    let updated = ctx
        .alarm_repo
        .set_alarm_active(id, user_id, !current.is_active)
        .await
        .map_err(AlarmError::Database)?
        .ok_or_else(|| AlarmError::NotFound(format!("Alarm with ID {} not found", id)))?;

    Ok(Json(ToggleAlarmResponse {
        id: updated.id,
        is_active: updated.is_active,
        updated_at: updated.updated_at,
    }))
}

fn create_request(name: &str) -> CreateAlarmRequest {
    CreateAlarmRequest {
        name: name.to_string(),
        hour: 6,
        minutes: 30,
        time_format: TimeFormat::TwentyFourHour,
        meridiem: None,
        days_active: vec![1, 3, 5],
        stop_method: StopMethod::Default,
        snooze_duration_minutes: None,
        snooze_max_count: None,
        wake_sequence: None,
    }
}

#[tokio::test]
async fn test_get_alarm_success() {
    let mut ctx = TestContext::new();
    let user_id = Uuid::new_v4();
    let db_alarm = sample_db_alarm(user_id);
    let alarm_id = db_alarm.id;

    ctx.alarm_repo
        .expect_get_alarm_by_id()
        .with(predicate::eq(alarm_id), predicate::eq(user_id))
        .returning(move |_, _| Ok(Some(db_alarm.clone())));

    let response = test_get_alarm_wrapper(&ctx, alarm_id, user_id).await.unwrap();

    assert_eq!(response.0.id, alarm_id);
    assert_eq!(response.0.time, "06:30");
    assert_eq!(response.0.days_label, "Mon, Wed, Fri");
}

#[tokio::test]
async fn test_get_alarm_not_found() {
    let mut ctx = TestContext::new();
    let user_id = Uuid::new_v4();
    let alarm_id = Uuid::new_v4();

    ctx.alarm_repo
        .expect_get_alarm_by_id()
        .returning(|_, _| Ok(None));

    let result = test_get_alarm_wrapper(&ctx, alarm_id, user_id).await;

    assert!(matches!(result, Err(AppError(AlarmError::NotFound(_)))));
}

#[tokio::test]
async fn test_get_alarm_is_scoped_to_user() {
    let mut ctx = TestContext::new();
    let owner = Uuid::new_v4();
    let intruder = Uuid::new_v4();
    let db_alarm = sample_db_alarm(owner);
    let alarm_id = db_alarm.id;

    // The repository only matches on (id, user_id); a different user sees
    // nothing
    ctx.alarm_repo
        .expect_get_alarm_by_id()
        .with(predicate::eq(alarm_id), predicate::eq(intruder))
        .returning(|_, _| Ok(None));

    let result = test_get_alarm_wrapper(&ctx, alarm_id, intruder).await;
    assert!(matches!(result, Err(AppError(AlarmError::NotFound(_)))));
}

#[tokio::test]
async fn test_create_alarm_success() {
    let mut ctx = TestContext::new();
    let user_id = Uuid::new_v4();
    let identity = SessionIdentity::authenticated(user_id, "user");
    let db_alarm = sample_db_alarm(user_id);

    ctx.alarm_repo
        .expect_create_alarm()
        .withf(move |new_alarm| {
            new_alarm.user_id == user_id
                && new_alarm.name == "Morning Workout"
                && new_alarm.is_active
        })
        .returning(move |_| Ok(db_alarm.clone()));

    let response = test_create_alarm_wrapper(&ctx, &identity, create_request("Morning Workout"))
        .await
        .unwrap();

    assert_eq!(response.0.name, "Morning Workout");
    assert!(response.0.is_active);
}

#[tokio::test]
async fn test_create_alarm_rejects_empty_name_before_persistence() {
    // No expectation is set on the mock: a repository call would panic
    let ctx = TestContext::new();
    let identity = SessionIdentity::authenticated(Uuid::new_v4(), "user");

    let result = test_create_alarm_wrapper(&ctx, &identity, create_request("   ")).await;

    assert!(matches!(result, Err(AppError(AlarmError::Validation(_)))));
}

#[tokio::test]
async fn test_create_alarm_rejects_unauthenticated_before_persistence() {
    // No expectation is set on the mock: a repository call would panic
    let ctx = TestContext::new();
    let identity = SessionIdentity::unknown();

    let result = test_create_alarm_wrapper(&ctx, &identity, create_request("Gym")).await;

    assert!(matches!(result, Err(AppError(AlarmError::Authorization(_)))));
}

#[tokio::test]
async fn test_toggle_flips_only_is_active() {
    let mut ctx = TestContext::new();
    let user_id = Uuid::new_v4();
    let db_alarm = sample_db_alarm(user_id);
    let alarm_id = db_alarm.id;

    let toggled = DbAlarm {
        is_active: false,
        ..db_alarm.clone()
    };

    let fetched = db_alarm.clone();
    ctx.alarm_repo
        .expect_get_alarm_by_id()
        .with(predicate::eq(alarm_id), predicate::eq(user_id))
        .returning(move |_, _| Ok(Some(fetched.clone())));

    let stored = toggled.clone();
    ctx.alarm_repo
        .expect_set_alarm_active()
        .with(
            predicate::eq(alarm_id),
            predicate::eq(user_id),
            predicate::eq(false),
        )
        .returning(move |_, _, _| Ok(Some(stored.clone())));

    let response = test_toggle_alarm_wrapper(&ctx, alarm_id, user_id)
        .await
        .unwrap();

    assert_eq!(response.0.id, alarm_id);
    assert!(!response.0.is_active);

    // Everything except is_active stays as stored
    assert_eq!(toggled.days_active, db_alarm.days_active);
    assert_eq!(toggled.stop_method, db_alarm.stop_method);
    assert_eq!(toggled.hour, db_alarm.hour);
    assert_eq!(toggled.minutes, db_alarm.minutes);
    assert_eq!(toggled.created_at, db_alarm.created_at);
}

#[tokio::test]
async fn test_toggle_alarm_not_found() {
    let mut ctx = TestContext::new();

    ctx.alarm_repo
        .expect_get_alarm_by_id()
        .returning(|_, _| Ok(None));

    let result = test_toggle_alarm_wrapper(&ctx, Uuid::new_v4(), Uuid::new_v4()).await;
    assert!(matches!(result, Err(AppError(AlarmError::NotFound(_)))));
}

#[tokio::test]
async fn test_delete_alarm_not_found() {
    let mut ctx = TestContext::new();

    ctx.alarm_repo
        .expect_delete_alarm()
        .returning(|_, _| Ok(false));

    let deleted = ctx
        .alarm_repo
        .delete_alarm(Uuid::new_v4(), Uuid::new_v4())
        .await
        .unwrap();
    assert!(!deleted);
}

#[tokio::test]
async fn test_list_alarms_maps_all_rows() {
    let mut ctx = TestContext::new();
    let user_id = Uuid::new_v4();
    let first = sample_db_alarm(user_id);
    let second = DbAlarm {
        id: Uuid::new_v4(),
        name: "Work Start".to_string(),
        hour: 8,
        minutes: 0,
        days_active: Some(vec![1, 2, 3, 4, 5]),
        ..sample_db_alarm(user_id)
    };

    let rows = vec![first.clone(), second.clone()];
    ctx.alarm_repo
        .expect_list_alarms_by_user()
        .with(predicate::eq(user_id))
        .returning(move |_| Ok(rows.clone()));

    let db_alarms = ctx.alarm_repo.list_alarms_by_user(user_id).await.unwrap();
    let alarms: Vec<AlarmResponse> = db_alarms
        .into_iter()
        .map(|row| {
            AlarmResponse::from_alarm(row.into_alarm().unwrap(), TimeFormat::TwelveHour)
        })
        .collect();

    assert_eq!(alarms.len(), 2);
    assert_eq!(alarms[0].time, "06:30 AM");
    assert_eq!(alarms[1].time, "08:00 AM");
    assert_eq!(alarms[1].days_label, "Workdays");
}
