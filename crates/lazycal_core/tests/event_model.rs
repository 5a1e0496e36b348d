use chrono::{NaiveDate, NaiveTime};
use lazycal_core::{Event, EventDraft, EventFieldError};

fn standup() -> Event {
    Event {
        id: 1_718_000_000_000,
        title: "Standup".to_string(),
        date: NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
        start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        end: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
    }
}

#[test]
fn event_serialization_uses_expected_wire_fields() {
    let event = standup();

    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["id"], 1_718_000_000_000_i64);
    assert_eq!(json["title"], "Standup");
    assert_eq!(json["date"], "2024-06-10");
    assert_eq!(json["start"], "09:00");
    assert_eq!(json["end"], "09:30");

    let decoded: Event = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, event);
}

#[test]
fn deserialize_rejects_reversed_time_range() {
    let value = serde_json::json!({
        "id": 7,
        "title": "backwards",
        "date": "2024-06-10",
        "start": "10:00",
        "end": "09:00"
    });

    let err = serde_json::from_value::<Event>(value).unwrap_err();
    assert!(
        err.to_string().contains("end (09:00) must be after start (10:00)"),
        "unexpected error: {err}"
    );
}

#[test]
fn deserialize_rejects_unpadded_times() {
    let value = serde_json::json!({
        "id": 7,
        "title": "loose",
        "date": "2024-06-10",
        "start": "9:00",
        "end": "10:00"
    });

    assert!(serde_json::from_value::<Event>(value).is_err());
}

#[test]
fn deserialize_rejects_unpadded_dates() {
    let value = serde_json::json!({
        "id": 7,
        "title": "loose",
        "date": "2024-6-1",
        "start": "09:00",
        "end": "10:00"
    });

    let err = serde_json::from_value::<Event>(value).unwrap_err();
    assert!(
        err.to_string().contains("invalid date `2024-6-1`"),
        "unexpected error: {err}"
    );
}

#[test]
fn overlap_uses_half_open_ranges() {
    let event = standup();
    let at = |hour, minute| NaiveTime::from_hms_opt(hour, minute, 0).unwrap();

    assert!(event.overlaps(at(9, 15), at(9, 45)));
    assert!(event.overlaps(at(8, 45), at(9, 15)));
    assert!(event.overlaps(at(8, 0), at(10, 0)));
    assert!(event.overlaps(at(9, 10), at(9, 20)));
    assert!(!event.overlaps(at(9, 30), at(10, 0)));
    assert!(!event.overlaps(at(8, 30), at(9, 0)));
}

#[test]
fn new_draft_defaults_to_nine_to_ten() {
    let date = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
    let draft = EventDraft::new_on(date);

    assert_eq!(draft.id, None);
    assert!(draft.title.is_empty());
    assert_eq!(draft.date, Some(date));
    assert_eq!(draft.start, NaiveTime::from_hms_opt(9, 0, 0));
    assert_eq!(draft.end, NaiveTime::from_hms_opt(10, 0, 0));
}

#[test]
fn edit_draft_carries_event_id() {
    let event = standup();
    let draft = EventDraft::from_event(&event);

    assert!(draft.is_edit());
    assert_eq!(draft.id, Some(event.id));
    assert_eq!(draft.title, event.title);
}

#[test]
fn form_parsing_names_the_bad_field() {
    let err = EventDraft::from_form(None, "Sync", "2024-06-10", "09:00", "25:00").unwrap_err();
    assert_eq!(
        err,
        EventFieldError::InvalidTime {
            field: "end",
            value: "25:00".to_string(),
        }
    );
}
