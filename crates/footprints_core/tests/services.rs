use footprints_core::db::open_db_in_memory;
use footprints_core::model::submission::MAX_MESSAGE_CHARS;
use footprints_core::service::clock::ManualClock;
use footprints_core::service::notify::{NotifyError, SubmissionNotifier};
use footprints_core::{
    AdminGate, AuthError, Emotion, GalleryConfig, GalleryQuery, GalleryService, ModerationQuery,
    ModerationService, ServiceError, SqliteSubmissionRepository, StatusFilter, Submission,
    SubmissionForm, SubmissionRepository, SubmissionService, SubmissionStatus,
    SubmissionValidationError,
};
use rusqlite::Connection;
use std::cell::RefCell;

const PASSWORD: &str = "follow-the-white-rabbit";

#[derive(Default)]
struct RecordingNotifier {
    seen: RefCell<Vec<String>>,
}

impl SubmissionNotifier for RecordingNotifier {
    fn notify_submitted(&self, submission: &Submission) -> Result<(), NotifyError> {
        self.seen.borrow_mut().push(submission.id.to_string());
        Ok(())
    }
}

struct FailingNotifier;

impl SubmissionNotifier for FailingNotifier {
    fn notify_submitted(&self, _submission: &Submission) -> Result<(), NotifyError> {
        Err(NotifyError("mail relay offline".to_string()))
    }
}

fn form(message: &str, emotion: &str, location: &str) -> SubmissionForm {
    SubmissionForm {
        message: message.to_string(),
        emotion: emotion.to_string(),
        location: location.to_string(),
    }
}

fn submit_all(conn: &Connection, clock: &ManualClock, forms: &[SubmissionForm]) -> Vec<Submission> {
    let repo = SqliteSubmissionRepository::try_new(conn).unwrap();
    let service = SubmissionService::with_clock(repo, RecordingNotifier::default(), clock.clone());
    forms
        .iter()
        .map(|form| {
            clock.advance_ms(1);
            service.submit(form).unwrap()
        })
        .collect()
}

fn approve(conn: &Connection, submissions: &[Submission]) {
    let repo = SqliteSubmissionRepository::try_new(conn).unwrap();
    for submission in submissions {
        repo.set_status(submission.id, SubmissionStatus::Approved)
            .unwrap();
    }
}

fn moderation(conn: &Connection, clock: ManualClock) -> ModerationService<SqliteSubmissionRepository<'_>, ManualClock> {
    ModerationService::with_clock(
        SqliteSubmissionRepository::try_new(conn).unwrap(),
        AdminGate::new(Some(PASSWORD.to_string())),
        GalleryConfig::default(),
        clock,
    )
}

#[test]
fn submit_stores_pending_submission_and_notifies() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSubmissionRepository::try_new(&conn).unwrap();
    let notifier = RecordingNotifier::default();
    let service = SubmissionService::with_clock(repo, &notifier, ManualClock::new(42));

    let stored = service
        .submit(&form("  was here  ", "Surprise", " The Construct "))
        .unwrap();

    assert_eq!(stored.message, "was here");
    assert_eq!(stored.emotion, Emotion::Surprise);
    assert_eq!(stored.location, "The Construct");
    assert_eq!(stored.status, SubmissionStatus::Pending);
    assert_eq!(stored.created_at, 42);
    assert_eq!(*notifier.seen.borrow(), vec![stored.id.to_string()]);

    let repo = SqliteSubmissionRepository::try_new(&conn).unwrap();
    assert_eq!(repo.get_submission(stored.id).unwrap(), Some(stored));
}

#[test]
fn submit_rejects_invalid_forms() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSubmissionRepository::try_new(&conn).unwrap();
    let service = SubmissionService::new(repo, RecordingNotifier::default());

    let too_long = "x".repeat(MAX_MESSAGE_CHARS + 1);
    let cases = [
        (form("   ", "fear", "Zion"), "empty message"),
        (form(&too_long, "fear", "Zion"), "long message"),
        (form("hi", "joy", "Zion"), "unknown emotion"),
        (form("hi", "fear", "  "), "empty location"),
    ];

    for (input, label) in cases {
        let err = service.submit(&input).unwrap_err();
        assert!(
            matches!(err, ServiceError::Validation(_)),
            "{label}: unexpected {err}"
        );
    }

    let err = service.submit(&form("hi", "joy", "Zion")).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(SubmissionValidationError::UnknownEmotion(value)) if value == "joy"
    ));
}

#[test]
fn notification_failure_does_not_fail_submission() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSubmissionRepository::try_new(&conn).unwrap();
    let service = SubmissionService::new(repo, FailingNotifier);

    let stored = service.submit(&form("still here", "sadness", "Zion")).unwrap();

    let repo = SqliteSubmissionRepository::try_new(&conn).unwrap();
    assert!(repo.get_submission(stored.id).unwrap().is_some());
}

#[test]
fn gallery_lists_only_approved_items() {
    let conn = open_db_in_memory().unwrap();
    let clock = ManualClock::new(1_000);
    let stored = submit_all(
        &conn,
        &clock,
        &[
            form("one", "fear", "Zion"),
            form("two", "anger", "The Grid"),
            form("three", "fear", "Zion"),
        ],
    );
    approve(&conn, &stored[..2]);

    let repo = SqliteSubmissionRepository::try_new(&conn).unwrap();
    let mut gallery = GalleryService::with_clock(repo, GalleryConfig::default(), clock);
    let page = gallery.list(&GalleryQuery::default()).unwrap();

    let messages: Vec<&str> = page.items.iter().map(|item| item.message.as_str()).collect();
    assert_eq!(messages, vec!["two", "one"]);
    assert_eq!(page.total, 2);
    assert_eq!(page.page, 1);
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.items[0].emotion, Some(Emotion::Anger));
    assert_eq!(page.items[0].location.as_deref(), Some("The Grid"));
}

#[test]
fn gallery_filters_and_paginates() {
    let conn = open_db_in_memory().unwrap();
    let clock = ManualClock::new(0);
    let forms: Vec<SubmissionForm> = (0..7)
        .map(|i| {
            let emotion = if i % 2 == 0 { "fear" } else { "happiness" };
            form(&format!("note {i}"), emotion, "Zion")
        })
        .collect();
    let stored = submit_all(&conn, &clock, &forms);
    approve(&conn, &stored);

    let repo = SqliteSubmissionRepository::try_new(&conn).unwrap();
    let mut gallery = GalleryService::with_clock(repo, GalleryConfig::default(), clock);

    let fear_page_two = gallery
        .list(&GalleryQuery {
            emotions: vec![Emotion::Fear],
            page: Some(2),
            limit: Some(3),
            ..GalleryQuery::default()
        })
        .unwrap();
    assert_eq!(fear_page_two.total, 4);
    assert_eq!(fear_page_two.total_pages, 2);
    let messages: Vec<&str> = fear_page_two
        .items
        .iter()
        .map(|item| item.message.as_str())
        .collect();
    assert_eq!(messages, vec!["note 0"]);

    let searched = gallery
        .list(&GalleryQuery {
            search: Some("NOTE 3".to_string()),
            ..GalleryQuery::default()
        })
        .unwrap();
    assert_eq!(searched.total, 1);

    let clamped = gallery
        .list(&GalleryQuery {
            limit: Some(0),
            ..GalleryQuery::default()
        })
        .unwrap();
    assert_eq!(clamped.items.len(), 1);
    assert_eq!(clamped.total_pages, 7);
}

#[test]
fn gallery_search_matches_non_ascii_text_in_any_case() {
    let conn = open_db_in_memory().unwrap();
    let clock = ManualClock::new(0);
    let stored = submit_all(
        &conn,
        &clock,
        &[
            form("Ärger im Büro", "anger", "München"),
            form("plain", "fear", "Zion"),
        ],
    );
    approve(&conn, &stored);

    let repo = SqliteSubmissionRepository::try_new(&conn).unwrap();
    let mut gallery = GalleryService::with_clock(repo, GalleryConfig::default(), clock);
    for term in ["Ärger", "ärger", "münchen"] {
        let page = gallery
            .list(&GalleryQuery {
                search: Some(term.to_string()),
                ..GalleryQuery::default()
            })
            .unwrap();
        assert_eq!(page.total, 1, "term {term}");
        assert_eq!(page.items[0].message, "Ärger im Büro");
    }
}

#[test]
fn gallery_cache_serves_stale_page_until_ttl_or_invalidate() {
    let conn = open_db_in_memory().unwrap();
    let clock = ManualClock::new(0);
    let stored = submit_all(&conn, &clock, &[form("first", "fear", "Zion")]);
    approve(&conn, &stored);

    let config = GalleryConfig {
        cache_ttl_ms: 1_000,
        ..GalleryConfig::default()
    };
    let repo = SqliteSubmissionRepository::try_new(&conn).unwrap();
    let mut gallery = GalleryService::with_clock(repo, config, clock.clone());
    assert_eq!(gallery.list(&GalleryQuery::default()).unwrap().total, 1);

    let more = submit_all(&conn, &clock, &[form("second", "fear", "Zion")]);
    approve(&conn, &more);

    clock.advance_ms(500);
    assert_eq!(gallery.list(&GalleryQuery::default()).unwrap().total, 1);

    clock.advance_ms(600);
    assert_eq!(gallery.list(&GalleryQuery::default()).unwrap().total, 2);

    let third = submit_all(&conn, &clock, &[form("third", "fear", "Zion")]);
    approve(&conn, &third);
    assert_eq!(gallery.list(&GalleryQuery::default()).unwrap().total, 2);
    gallery.invalidate();
    assert_eq!(gallery.list(&GalleryQuery::default()).unwrap().total, 3);
}

#[test]
fn moderation_login_checks_password() {
    let conn = open_db_in_memory().unwrap();
    let service = moderation(&conn, ManualClock::new(0));

    assert!(service.login(PASSWORD).is_ok());
    assert!(matches!(
        service.login("wrong"),
        Err(ServiceError::Unauthorized(AuthError::InvalidPassword))
    ));
    assert!(matches!(
        service.login(""),
        Err(ServiceError::Unauthorized(AuthError::MissingPassword))
    ));

    let disabled = ModerationService::new(
        SqliteSubmissionRepository::try_new(&conn).unwrap(),
        AdminGate::new(None),
        GalleryConfig::default(),
    );
    assert!(matches!(
        disabled.login(PASSWORD),
        Err(ServiceError::Unauthorized(AuthError::NotConfigured))
    ));
}

#[test]
fn moderation_queue_defaults_to_pending_and_searches_emotions() {
    let conn = open_db_in_memory().unwrap();
    let clock = ManualClock::new(0);
    let stored = submit_all(
        &conn,
        &clock,
        &[
            form("grim", "disgust", "Zion"),
            form("bright", "happiness", "The Grid"),
            form("done", "fear", "Zion"),
        ],
    );
    approve(&conn, &stored[2..]);

    let mut service = moderation(&conn, clock);
    let token = service.login(PASSWORD).unwrap();

    let pending = service.list(&token, &ModerationQuery::default()).unwrap();
    assert_eq!(pending.total, 2);
    assert!(pending
        .items
        .iter()
        .all(|item| item.status == SubmissionStatus::Pending));

    let by_emotion = service
        .list(
            &token,
            &ModerationQuery {
                status: StatusFilter::All,
                search: Some("DISG".to_string()),
                ..ModerationQuery::default()
            },
        )
        .unwrap();
    assert_eq!(by_emotion.total, 1);
    assert_eq!(by_emotion.items[0].message, "grim");
}

#[test]
fn moderation_decision_updates_status_and_refreshes_queue() {
    let conn = open_db_in_memory().unwrap();
    let clock = ManualClock::new(0);
    let stored = submit_all(
        &conn,
        &clock,
        &[form("keep", "fear", "Zion"), form("drop", "anger", "Zion")],
    );

    let mut service = moderation(&conn, clock);
    let token = service.login(PASSWORD).unwrap();
    assert_eq!(
        service
            .list(&token, &ModerationQuery::default())
            .unwrap()
            .total,
        2
    );

    let approved = service
        .set_status(&token, stored[0].id, SubmissionStatus::Approved)
        .unwrap();
    assert_eq!(approved.status, SubmissionStatus::Approved);
    let rejected = service
        .set_status(&token, stored[1].id, SubmissionStatus::Rejected)
        .unwrap();
    assert_eq!(rejected.status, SubmissionStatus::Rejected);

    let pending = service.list(&token, &ModerationQuery::default()).unwrap();
    assert_eq!(pending.total, 0);

    let missing = uuid::Uuid::new_v4();
    assert!(matches!(
        service.set_status(&token, missing, SubmissionStatus::Approved),
        Err(ServiceError::NotFound(id)) if id == missing
    ));
}
