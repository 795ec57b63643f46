use attendance_core::{
    normalize_and_validate, AttendanceRecord, AttendanceStatus, RawAttendanceRecord,
    RecordValidationError,
};

#[test]
fn normalizes_name_status_and_remarks() {
    let raw = RawAttendanceRecord::new("  john   DOE ", " 2025-08-24 ", " pRESENT ", "  on time ");

    let record = raw.normalize_and_validate().unwrap();
    assert_eq!(record.student_name(), "John   Doe");
    assert_eq!(record.date(), "2025-08-24");
    assert_eq!(record.status(), AttendanceStatus::Present);
    assert_eq!(record.remarks(), "on time");
}

#[test]
fn date_is_rendered_zero_padded() {
    let record = RawAttendanceRecord::new("Ann Lee", "2025-8-4", "late", "")
        .normalize_and_validate()
        .unwrap();
    assert_eq!(record.date(), "2025-08-04");
}

#[test]
fn rejects_dates_that_are_not_calendar_days() {
    for date in [
        "2025-02-30",
        "24-08-2025",
        "2025/08/24",
        "",
        "tomorrow",
        "+2025-08-24",
        "225-08-24",
        "2025- 8-24",
    ] {
        let err = RawAttendanceRecord::new("Ann Lee", date, "Present", "")
            .normalize_and_validate()
            .unwrap_err();
        assert_eq!(
            err,
            RecordValidationError::InvalidDate(date.to_string()),
            "date `{date}` should be rejected"
        );
    }
}

#[test]
fn rejects_unknown_status() {
    let err = RawAttendanceRecord::new("Ann Lee", "2025-08-24", "excused", "")
        .normalize_and_validate()
        .unwrap_err();
    assert_eq!(err, RecordValidationError::InvalidStatus("Excused".to_string()));
}

#[test]
fn absent_requires_remarks() {
    let err = RawAttendanceRecord::new("Ann Lee", "2025-08-24", "absent", "   ")
        .normalize_and_validate()
        .unwrap_err();
    assert_eq!(err, RecordValidationError::MissingRemarks);

    let record = RawAttendanceRecord::new("Ann Lee", "2025-08-24", "absent", " flu ")
        .normalize_and_validate()
        .unwrap();
    assert_eq!(record.status(), AttendanceStatus::Absent);
    assert_eq!(record.remarks(), "flu");
}

#[test]
fn late_and_present_do_not_require_remarks() {
    for status in ["late", "present"] {
        assert!(RawAttendanceRecord::new("Ann Lee", "2025-08-24", status, "")
            .normalize_and_validate()
            .is_ok());
    }
}

#[test]
fn rejects_blank_name() {
    let err = RawAttendanceRecord::new("   ", "2025-08-24", "Present", "")
        .normalize_and_validate()
        .unwrap_err();
    assert_eq!(err, RecordValidationError::EmptyName);
}

#[test]
fn first_failing_rule_wins() {
    let everything_wrong = RawAttendanceRecord::new("", "bad", "nope", "");
    assert!(matches!(
        everything_wrong.normalize_and_validate(),
        Err(RecordValidationError::InvalidDate(_))
    ));

    let bad_status_and_name = RawAttendanceRecord::new("", "2025-08-24", "nope", "");
    assert!(matches!(
        bad_status_and_name.normalize_and_validate(),
        Err(RecordValidationError::InvalidStatus(_))
    ));

    let absent_without_name = RawAttendanceRecord::new("", "2025-08-24", "absent", "");
    assert_eq!(
        absent_without_name.normalize_and_validate().unwrap_err(),
        RecordValidationError::MissingRemarks
    );
}

#[test]
fn validation_is_idempotent_on_normalized_records() {
    let inputs = [
        RawAttendanceRecord::new("mary-jane o'neil", "2025-1-9", "LATE", ""),
        RawAttendanceRecord::new(" john doe ", "2025-08-24", "absent", " sick "),
        RawAttendanceRecord::new("ZOE", "2024-02-29", "Present", "early"),
    ];

    for raw in inputs {
        let first = normalize_and_validate(&raw).unwrap();
        let second = normalize_and_validate(&RawAttendanceRecord::from(&first)).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn error_messages_are_distinct() {
    let messages = [
        RecordValidationError::InvalidDate("x".to_string()).to_string(),
        RecordValidationError::InvalidStatus("x".to_string()).to_string(),
        RecordValidationError::MissingRemarks.to_string(),
        RecordValidationError::EmptyName.to_string(),
    ];
    for (index, message) in messages.iter().enumerate() {
        assert!(!message.is_empty());
        assert!(messages[index + 1..].iter().all(|other| other != message));
    }
    assert!(messages[0].contains("YYYY-MM-DD"));
    assert!(messages[1].contains("Present, Absent, Late"));
}

#[test]
fn status_parses_only_canonical_names() {
    assert_eq!("Late".parse::<AttendanceStatus>().unwrap(), AttendanceStatus::Late);
    assert!("late".parse::<AttendanceStatus>().is_err());
    assert_eq!(AttendanceStatus::ALL.len(), 3);
    assert_eq!(AttendanceStatus::Absent.to_string(), "Absent");
}

#[test]
fn record_serialization_uses_expected_wire_fields() {
    let record = RawAttendanceRecord::new("jane doe", "2025-08-24", "absent", "sick")
        .normalize_and_validate()
        .unwrap();

    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "student_name": "Jane Doe",
            "date": "2025-08-24",
            "status": "Absent",
            "remarks": "sick"
        })
    );

    let decoded: AttendanceRecord = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, record);
}

#[test]
fn deserialize_defaults_missing_remarks_and_rejects_unknown_status() {
    let record: AttendanceRecord = serde_json::from_value(serde_json::json!({
        "student_name": "John Doe",
        "date": "2025-08-24",
        "status": "Present"
    }))
    .unwrap();
    assert_eq!(record.remarks(), "");

    let err = serde_json::from_value::<AttendanceRecord>(serde_json::json!({
        "student_name": "John Doe",
        "date": "2025-08-24",
        "status": "Sleeping",
        "remarks": ""
    }));
    assert!(err.is_err());
}
