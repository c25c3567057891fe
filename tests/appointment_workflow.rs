use barber::workflow::{SectionHeading, SectionKind};
use barber::{
    Appointment, AppointmentBoard, AppointmentFilter, AppointmentId, AppointmentStatus, BoardView,
    CollectionQuery, LiveFeed, MemoryStore, StaffSession, StaffUid, StatusUpdate,
    SwipeDirection, SwipeOutcome,
};
use chrono::{TimeZone, Utc};

fn session() -> StaffSession {
    StaffSession::new(StaffUid::new("staff-1"))
}

fn dated(id: &str, status: &str, day: u32) -> Appointment {
    let appointment = Appointment::new(AppointmentId::new(id), status);
    match Utc.with_ymd_and_hms(2025, 3, day, 10, 0, 0).single() {
        Some(date) => appointment.with_date(date),
        None => appointment,
    }
}

fn ids(appointments: &[Appointment]) -> Vec<&str> {
    appointments.iter().map(|a| a.id.value()).collect()
}

async fn board_on_feed(
    store: &MemoryStore,
    filter: AppointmentFilter,
) -> (AppointmentBoard, LiveFeed<Appointment>) {
    let mut feed = LiveFeed::spawn(store, CollectionQuery::appointments_by_date());
    let mut board = AppointmentBoard::open(session()).with_filter(filter);
    board.observe(feed.settled().await);
    (board, feed)
}

#[tokio::test]
async fn given_mixed_statuses_when_each_filter_applies_then_views_match_the_scenario(
) -> Result<(), String> {
    let store = MemoryStore::new();
    store.appointments().replace_all(vec![
        dated("a", "pending", 1),
        dated("b", "processing", 2),
        dated("c", "cancelled", 3),
    ]);

    let (mut board, _feed) = board_on_feed(&store, AppointmentFilter::Active).await;
    assert_eq!(ids(&board.visible()), vec!["b", "a"]);

    let BoardView::Ready(sections) = board.view() else {
        return Err("Given active appointments, Then the board should have sections".to_string());
    };
    let headings: Vec<_> = sections.iter().filter_map(|s| s.heading.clone()).collect();
    assert_eq!(
        headings,
        vec![
            SectionHeading {
                kind: SectionKind::Processing,
                count: 1
            },
            SectionHeading {
                kind: SectionKind::Pending,
                count: 1
            },
        ]
    );

    board.set_filter(AppointmentFilter::Cancelled);
    assert_eq!(ids(&board.visible()), vec!["c"]);
    assert!(matches!(
        board.view(),
        BoardView::Ready(ref s) if s.iter().all(|s| s.heading.is_none())
    ));

    board.set_filter(AppointmentFilter::Completed);
    assert!(matches!(
        board.view(),
        BoardView::Empty {
            title: "No hay citas completadas",
            ..
        }
    ));
    Ok(())
}

#[tokio::test]
async fn given_pending_item_when_swiped_right_then_only_status_changes_and_feed_redelivers(
) -> Result<(), String> {
    let store = MemoryStore::new();
    let original = dated("a1", "pending", 5).with_customer("u1", "Luis", "555-0101");
    store.appointments().replace_all(vec![original.clone()]);

    let (mut board, mut feed) = board_on_feed(&store, AppointmentFilter::Active).await;

    let outcome = board
        .swipe(&store, &AppointmentId::new("a1"), SwipeDirection::Right)
        .await;
    assert_eq!(
        outcome,
        SwipeOutcome::Requested(StatusUpdate::new(
            AppointmentId::new("a1"),
            AppointmentStatus::Processing
        ))
    );

    // Nothing moves locally until the feed speaks.
    assert!(board.visible()[0].status.is(AppointmentStatus::Pending));

    let redelivered = feed.changed().await;
    let Some(state) = redelivered else {
        return Err("Given a successful write, Then the feed should re-deliver".to_string());
    };
    board.observe(state);

    let stored = store.appointments().documents();
    let expected = Appointment {
        status: AppointmentStatus::Processing.into(),
        ..original
    };
    assert_eq!(stored, vec![expected.clone()]);
    assert_eq!(board.visible(), vec![expected]);
    Ok(())
}

#[tokio::test]
async fn given_processing_item_when_swiped_left_then_it_moves_to_cancelled_view() {
    let store = MemoryStore::new();
    store
        .appointments()
        .replace_all(vec![dated("p", "processing", 2), dated("q", "pending", 1)]);

    let (mut board, mut feed) = board_on_feed(&store, AppointmentFilter::Active).await;
    board
        .swipe(&store, &AppointmentId::new("p"), SwipeDirection::Left)
        .await;

    if let Some(state) = feed.changed().await {
        board.observe(state);
    }
    assert_eq!(ids(&board.visible()), vec!["q"]);

    board.set_filter(AppointmentFilter::Cancelled);
    assert_eq!(ids(&board.visible()), vec!["p"]);
}

#[tokio::test]
async fn given_rejected_write_when_swiped_then_notice_is_raised_and_view_is_unchanged() {
    let store = MemoryStore::new();
    store.appointments().replace_all(vec![dated("a1", "pending", 5)]);
    store.reject_writes(Some("permission denied".to_string()));

    let (mut board, _feed) = board_on_feed(&store, AppointmentFilter::Active).await;
    let before = board.view();

    let outcome = board
        .swipe(&store, &AppointmentId::new("a1"), SwipeDirection::Right)
        .await;

    assert!(matches!(outcome, SwipeOutcome::WriteFailed(_)));
    assert_eq!(board.notice(), Some("Error al actualizar el estado"));
    assert_eq!(board.view(), before);
    assert!(store.appointments().documents()[0]
        .status
        .is(AppointmentStatus::Pending));
}

#[tokio::test]
async fn given_unknown_status_when_listed_then_it_shows_as_active_without_gestures() {
    let store = MemoryStore::new();
    store
        .appointments()
        .replace_all(vec![dated("legacy", "confirmed", 4), dated("a", "pending", 1)]);

    let (mut board, _feed) = board_on_feed(&store, AppointmentFilter::Active).await;
    assert_eq!(ids(&board.visible()), vec!["a", "legacy"]);
    assert!(board
        .plan(&AppointmentId::new("legacy"), SwipeDirection::Right)
        .is_none());

    let outcome = board
        .swipe(&store, &AppointmentId::new("legacy"), SwipeDirection::Left)
        .await;
    assert_eq!(outcome, SwipeOutcome::Settled);
    assert_eq!(store.appointments().documents()[0].status.as_str(), "confirmed");
}

#[tokio::test]
async fn given_feed_failure_when_observed_then_board_shows_error_and_resubscribe_recovers() {
    let store = MemoryStore::new();
    store.appointments().replace_all(vec![dated("a", "pending", 1)]);

    let (mut board, mut feed) = board_on_feed(&store, AppointmentFilter::Active).await;
    store.appointments().fail("connection reset");

    if let Some(state) = feed.changed().await {
        board.observe(state);
    }
    assert!(matches!(
        board.view(),
        BoardView::Failed { ref message } if message.contains("connection reset")
    ));
    assert!(feed.changed().await.is_none());

    store.appointments().recover();
    let mut fresh = LiveFeed::spawn(&store, CollectionQuery::appointments_by_date());
    board.observe(fresh.settled().await);
    assert_eq!(ids(&board.visible()), vec!["a"]);
}

#[tokio::test]
async fn given_empty_collection_when_any_filter_applies_then_empty_texts_show() {
    let store = MemoryStore::new();
    let (mut board, _feed) = board_on_feed(&store, AppointmentFilter::Active).await;

    for filter in AppointmentFilter::ALL {
        board.set_filter(filter);
        assert!(board.visible().is_empty());
        assert!(matches!(board.view(), BoardView::Empty { .. }));
    }
}
