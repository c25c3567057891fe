use barber::db::SCHEMA_SQL;
use barber::{
    Appointment, AppointmentBoard, AppointmentFilter, AppointmentId, AppointmentStatus, BarberDb,
    BarberError, Collection, CollectionQuery, FeedState, LiveFeed, OrderDirection, StaffSession,
    StaffUid, StatusWriter, SwipeDirection, SwipeOutcome,
};
use std::time::Duration;

fn test_database_url() -> Option<String> {
    std::env::var("BARBER_TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .ok()
        .filter(|url| !url.trim().is_empty())
}

async fn prepared_db() -> Result<BarberDb, String> {
    let url = test_database_url().ok_or("DATABASE_URL or BARBER_TEST_DATABASE_URL must be set")?;
    let db = BarberDb::new(&url).await.map_err(|e| e.to_string())?;
    db.initialize_schema_from_sql(SCHEMA_SQL)
        .await
        .map_err(|e| e.to_string())?;
    Ok(db)
}

async fn insert_appointment(db: &BarberDb, status: &str) -> Result<AppointmentId, String> {
    let id = uuid::Uuid::new_v4().to_string();
    sqlx::query(
        "INSERT INTO appointments (id, user_id, user_name, phone, date, time_slot, status, type)
         VALUES ($1, 'u1', 'Luis', '555-0101', now(), '10:00', $2, 'scheduled')",
    )
    .bind(&id)
    .bind(status)
    .execute(db.pool())
    .await
    .map_err(|e| e.to_string())?;
    Ok(AppointmentId::new(id))
}

fn find<'a>(state: &'a FeedState<Appointment>, id: &AppointmentId) -> Option<&'a Appointment> {
    state.snapshot().iter().find(|a| &a.id == id)
}

/// Other tests share the table, so skip deliveries until `ready` holds.
async fn wait_for<F>(
    feed: &mut LiveFeed<Appointment>,
    ready: F,
) -> Result<FeedState<Appointment>, String>
where
    F: Fn(&FeedState<Appointment>) -> bool,
{
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            let state = feed
                .changed()
                .await
                .ok_or_else(|| "feed ended".to_string())?;
            if ready(&state) {
                return Ok::<_, String>(state);
            }
        }
    })
    .await
    .map_err(|_| "feed did not re-deliver in time".to_string())?
}

#[tokio::test]
#[ignore = "requires DATABASE_URL or BARBER_TEST_DATABASE_URL"]
async fn given_live_feed_when_status_is_written_then_full_snapshot_is_redelivered(
) -> Result<(), String> {
    let db = prepared_db().await?;
    let id = insert_appointment(&db, "pending").await?;

    let mut feed = LiveFeed::<Appointment>::spawn(&db, CollectionQuery::appointments_by_date());
    let initial = feed.settled().await;
    let before = find(&initial, &id).cloned().ok_or("inserted row missing from snapshot")?;
    assert!(before.status.is(AppointmentStatus::Pending));

    db.update_status(&id, AppointmentStatus::Processing)
        .await
        .map_err(|e| e.to_string())?;

    let after = wait_for(&mut feed, |state| {
        find(state, &id).is_some_and(|a| a.status.is(AppointmentStatus::Processing))
    })
    .await?;
    let updated = find(&after, &id).cloned().ok_or("row missing after update")?;
    assert!(updated.status.is(AppointmentStatus::Processing));
    assert_eq!(updated.user_name, before.user_name);
    assert_eq!(updated.date, before.date);
    feed.release();
    Ok(())
}

#[tokio::test]
#[ignore = "requires DATABASE_URL or BARBER_TEST_DATABASE_URL"]
async fn given_board_on_postgres_when_swiped_then_feed_moves_the_item() -> Result<(), String> {
    let db = prepared_db().await?;
    let id = insert_appointment(&db, "processing").await?;

    let mut feed = LiveFeed::<Appointment>::spawn(&db, CollectionQuery::appointments_by_date());
    let mut board = AppointmentBoard::open(StaffSession::new(StaffUid::new("staff-1")));
    board.observe(feed.settled().await);

    let outcome = board.swipe(&db, &id, SwipeDirection::Right).await;
    assert!(matches!(outcome, SwipeOutcome::Requested(_)));

    board.observe(
        wait_for(&mut feed, |state| {
            find(state, &id).is_some_and(|a| a.status.is(AppointmentStatus::Completed))
        })
        .await?,
    );
    board.set_filter(AppointmentFilter::Completed);
    assert!(board.visible().iter().any(|a| a.id == id));
    Ok(())
}

#[tokio::test]
#[ignore = "requires DATABASE_URL or BARBER_TEST_DATABASE_URL"]
async fn given_missing_id_when_status_is_written_then_not_found() -> Result<(), String> {
    let db = prepared_db().await?;
    let missing = AppointmentId::new(uuid::Uuid::new_v4().to_string());

    let result = db.update_status(&missing, AppointmentStatus::Cancelled).await;
    assert!(matches!(result, Err(BarberError::NotFound(_))));
    Ok(())
}

#[tokio::test]
#[ignore = "requires DATABASE_URL or BARBER_TEST_DATABASE_URL"]
async fn given_unsupported_order_key_when_subscribing_then_invalid_query_is_delivered(
) -> Result<(), String> {
    let db = prepared_db().await?;
    let query = CollectionQuery::new(Collection::Appointments, "phone", OrderDirection::Descending);

    let mut feed = LiveFeed::<Appointment>::spawn(&db, query);
    let state = feed.settled().await;
    assert!(matches!(state, FeedState::Failed(ref message) if message.contains("phone")));
    Ok(())
}

#[tokio::test]
#[ignore = "requires DATABASE_URL or BARBER_TEST_DATABASE_URL"]
async fn given_listener_connection_dropped_when_status_is_written_then_feed_still_redelivers(
) -> Result<(), String> {
    let db = prepared_db().await?;
    let id = insert_appointment(&db, "pending").await?;

    let mut feed = LiveFeed::<Appointment>::spawn(&db, CollectionQuery::appointments_by_date());
    let _ = feed.settled().await;

    sqlx::query(
        "SELECT pg_terminate_backend(pid) FROM pg_stat_activity
         WHERE pid <> pg_backend_pid()
           AND datname = current_database()
           AND query LIKE 'LISTEN %'",
    )
    .execute(db.pool())
    .await
    .map_err(|e| e.to_string())?;

    // Written while the listener is down or still reconnecting.
    db.update_status(&id, AppointmentStatus::Processing)
        .await
        .map_err(|e| e.to_string())?;

    let after = wait_for(&mut feed, |state| {
        find(state, &id).is_some_and(|a| a.status.is(AppointmentStatus::Processing))
    })
    .await?;
    assert!(find(&after, &id).is_some());
    feed.release();
    Ok(())
}
