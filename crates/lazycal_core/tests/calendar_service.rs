use chrono::{NaiveDate, NaiveTime};
use lazycal_core::db::open_db_in_memory;
use lazycal_core::{
    decode_events, CalendarError, CalendarService, EventDraft, EventQuery,
    EventValidationError, KvRepository, MemoryKvRepository, SqliteKvRepository,
    EVENTS_STORAGE_KEY,
};

fn june(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
}

fn form(title: &str, date: &str, start: &str, end: &str) -> EventDraft {
    EventDraft::from_form(None, title, date, start, end).unwrap()
}

#[test]
fn standup_then_overlapping_sync_is_rejected() {
    let mut service = CalendarService::open(MemoryKvRepository::new());

    service
        .save_event(&form("Standup", "2024-06-10", "09:00", "09:30"))
        .unwrap();
    let err = service
        .save_event(&form("Sync", "2024-06-10", "09:15", "09:45"))
        .unwrap_err();

    assert!(matches!(
        err,
        CalendarError::Validation(EventValidationError::Overlap { .. })
    ));
    assert_eq!(service.events().len(), 1);
}

#[test]
fn rejected_save_does_not_touch_storage() {
    let repo = MemoryKvRepository::new();
    let mut service = CalendarService::open(&repo);

    let err = service
        .save_event(&form("  ", "2024-06-10", "09:00", "09:30"))
        .unwrap_err();

    assert_eq!(err.to_string(), "Title is required.");
    assert_eq!(repo.get_value(EVENTS_STORAGE_KEY).unwrap(), None);
}

#[test]
fn edit_moves_event_and_keeps_id() {
    let mut service = CalendarService::open(MemoryKvRepository::new());
    let created = service
        .save_event(&form("Standup", "2024-06-10", "09:00", "09:30"))
        .unwrap();

    let mut edit = service.edit_draft(created.id).unwrap();
    edit.start = NaiveTime::from_hms_opt(9, 15, 0);
    edit.end = NaiveTime::from_hms_opt(9, 45, 0);
    let updated = service.save_event(&edit).unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(service.events(), &[updated]);
}

#[test]
fn editing_a_deleted_event_reports_not_found() {
    let mut service = CalendarService::open(MemoryKvRepository::new());
    let created = service
        .save_event(&form("Standup", "2024-06-10", "09:00", "09:30"))
        .unwrap();
    let edit = service.edit_draft(created.id).unwrap();

    assert!(service.delete_event(created.id));
    assert_eq!(
        service.save_event(&edit).unwrap_err(),
        CalendarError::EventNotFound(created.id)
    );
    assert!(service.events().is_empty());
}

#[test]
fn delete_is_persisted() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteKvRepository::new(&conn);
    let mut service = CalendarService::open(&repo);
    let keep = service
        .save_event(&form("Standup", "2024-06-10", "09:00", "09:30"))
        .unwrap();
    let drop_me = service
        .save_event(&form("Lunch", "2024-06-10", "12:00", "13:00"))
        .unwrap();

    assert!(service.delete_event(drop_me.id));
    assert!(!service.delete_event(drop_me.id));

    let raw = repo.get_value(EVENTS_STORAGE_KEY).unwrap().unwrap();
    assert_eq!(decode_events(&raw).unwrap(), vec![keep]);

    let reopened = CalendarService::open(&repo);
    assert!(reopened.get_event(drop_me.id).is_none());
}

#[test]
fn search_is_case_insensitive_and_sorted_by_start() {
    let mut service = CalendarService::open(MemoryKvRepository::new());
    service
        .save_event(&form("Team lunch", "2024-06-11", "12:00", "13:00"))
        .unwrap();
    service
        .save_event(&form("Planning", "2024-06-10", "15:00", "16:00"))
        .unwrap();
    service
        .save_event(&form("LUNCH with Sam", "2024-06-10", "12:00", "13:00"))
        .unwrap();

    let titles = service
        .search(&EventQuery::new("lunch"))
        .into_iter()
        .map(|event| event.title.as_str())
        .collect::<Vec<_>>();
    assert_eq!(titles, vec!["LUNCH with Sam", "Team lunch"]);

    let all = service.search(&EventQuery::default());
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].title, "LUNCH with Sam");
    assert_eq!(all[1].title, "Planning");
}

#[test]
fn events_on_filters_one_day() {
    let mut service = CalendarService::open(MemoryKvRepository::new());
    service
        .save_event(&form("Retro", "2024-06-10", "16:00", "17:00"))
        .unwrap();
    service
        .save_event(&form("Standup", "2024-06-10", "09:00", "09:30"))
        .unwrap();
    service
        .save_event(&form("Standup", "2024-06-11", "09:00", "09:30"))
        .unwrap();

    let day = service.events_on(june(10), &EventQuery::default());
    assert_eq!(day.len(), 2);
    assert_eq!(day[0].title, "Standup");
    assert_eq!(day[1].title, "Retro");

    let filtered = service.events_on(june(10), &EventQuery::new("retro"));
    assert_eq!(filtered.len(), 1);
}

#[test]
fn new_draft_saved_without_title_edit_is_rejected() {
    let service = CalendarService::open(MemoryKvRepository::new());
    let draft = service.new_draft(june(10));

    assert_eq!(
        service.validate(&draft).unwrap_err(),
        EventValidationError::EmptyTitle
    );
}

#[test]
fn replace_events_persists_the_new_list() {
    let repo = MemoryKvRepository::new();
    let mut service = CalendarService::open(&repo);
    service
        .save_event(&form("Standup", "2024-06-10", "09:00", "09:30"))
        .unwrap();

    service.replace_events(Vec::new());

    assert!(service.events().is_empty());
    assert_eq!(
        repo.get_value(EVENTS_STORAGE_KEY).unwrap().as_deref(),
        Some("[]")
    );
}
