use attendance_core::{
    AttendanceConfig, AttendanceStore, MemoryRecordRepository, RawAttendanceRecord, StoreError,
    CSV_HEADER,
};
use std::fs;

#[test]
fn export_writes_header_and_rows_in_storage_order() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = AttendanceStore::new(MemoryRecordRepository::new());
    store
        .add_record(&RawAttendanceRecord::new("zoe park", "2025-09-02", "present", ""))
        .unwrap();
    store
        .add_record(&RawAttendanceRecord::new("adam smith", "2025-09-01", "absent", "flu"))
        .unwrap();

    let out = dir.path().join("export.csv");
    let written = store.export_csv(&out).unwrap();
    assert_eq!(written, out);

    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        "student_name,date,status,remarks\n\
         Zoe Park,2025-09-02,Present,\n\
         Adam Smith,2025-09-01,Absent,flu\n"
    );
}

#[test]
fn export_quotes_fields_with_separators() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = AttendanceStore::new(MemoryRecordRepository::new());
    store
        .add_record(&RawAttendanceRecord::new(
            "ann lee",
            "2025-09-01",
            "absent",
            "fever, sent \"home\"",
        ))
        .unwrap();

    let out = store.export_csv(dir.path().join("export.csv")).unwrap();

    let mut reader = csv::Reader::from_path(&out).unwrap();
    assert_eq!(reader.headers().unwrap(), &csv::StringRecord::from(CSV_HEADER.to_vec()));
    let rows = reader
        .records()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(&rows[0][3], "fever, sent \"home\"");
}

#[test]
fn export_of_empty_store_has_only_header_and_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("export.csv");
    fs::write(&out, "stale content\nmore\n").unwrap();

    let store = AttendanceStore::new(MemoryRecordRepository::new());
    store.export_csv(&out).unwrap();

    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        "student_name,date,status,remarks\n"
    );
}

#[test]
fn export_default_uses_configured_path() {
    let dir = tempfile::tempdir().unwrap();
    let config = AttendanceConfig::in_dir(dir.path());
    let mut store = AttendanceStore::open_with_config(&config).unwrap();
    store
        .add_record(&RawAttendanceRecord::new("ann lee", "2025-09-01", "late", ""))
        .unwrap();

    let out = store.export_csv_default().unwrap();
    assert_eq!(out, config.export_file);
    assert!(fs::read_to_string(&out).unwrap().contains("Ann Lee,2025-09-01,Late,"));
}

#[test]
fn export_into_missing_directory_fails_with_path() {
    let dir = tempfile::tempdir().unwrap();
    let store = AttendanceStore::new(MemoryRecordRepository::new());
    let out = dir.path().join("missing").join("export.csv");

    let err = store.export_csv(&out).unwrap_err();
    match err {
        StoreError::Export(export) => assert_eq!(export.path, out),
        other => panic!("unexpected error: {other}"),
    }
}
