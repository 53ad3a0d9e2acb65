#![forbid(unsafe_code)]
use horaire::{io, Day, JsonStorage, Scheduler, ShiftKind, Storage};
use tempfile::tempdir;

#[test]
fn roster_roundtrip_keeps_ids_and_constraints() {
    let dir = tempdir().unwrap();
    let storage = JsonStorage::open(dir.path().join("roster.json")).unwrap();

    let mut s = Scheduler::new();
    let alice = s.add_employee("Alice", 16).unwrap();
    s.set_availability(alice, &[Day::Mon], &[ShiftKind::Night])
        .unwrap();
    s.set_time_off(alice, Day::Sun).unwrap();
    storage.save(s.roster()).unwrap();

    let mut reloaded = Scheduler::from_roster(storage.load().unwrap());
    assert_eq!(reloaded.roster(), s.roster());

    // le compteur d'identifiants survit au rechargement
    let bob = reloaded.add_employee("Bob", 40).unwrap();
    assert_eq!(bob.get(), 2);
}

#[test]
fn missing_file_loads_empty_roster() {
    let dir = tempdir().unwrap();
    let storage = JsonStorage::open(dir.path().join("absent.json")).unwrap();
    assert!(storage.load().is_err());
    assert!(storage.load_or_default().unwrap().is_empty());
}

#[test]
fn schedule_exports_to_csv_and_json() {
    let dir = tempdir().unwrap();
    let mut s = Scheduler::new();
    let alice = s.add_employee("Alice", 40).unwrap();
    s.set_availability(alice, &[Day::Tue], &[ShiftKind::Evening])
        .unwrap();
    let schedule = s.generate_schedule();

    let csv_path = dir.path().join("schedule.csv");
    io::export_schedule_csv(&csv_path, &schedule, s.roster()).unwrap();
    let csv = std::fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 22);
    assert_eq!(lines[0], "day,shift,employee_id,employee_name");
    assert!(lines.contains(&"Tue,evening,1,Alice"));
    assert!(lines.contains(&"Mon,morning,,"));

    let json_path = dir.path().join("schedule.json");
    io::export_schedule_json(&json_path, &schedule, s.roster()).unwrap();
    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(value["coverage"], 1);
    assert_eq!(value["cells"].as_array().unwrap().len(), 21);
}

#[test]
fn records_import_from_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("records.json");
    std::fs::write(
        &path,
        r#"[{"name":"Eve","max_hours":24,"days":["Sat"],"shift_kinds":["night"],"time_off":[]}]"#,
    )
    .unwrap();

    let records = io::import_records_json(&path).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].days, [Day::Sat]);
    assert_eq!(records[0].shift_kinds, [ShiftKind::Night]);
}

#[test]
fn hand_edited_roster_is_validated_on_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("roster.json");
    let storage = JsonStorage::open(&path).unwrap();

    let mut s = Scheduler::new();
    s.add_employee("Alice", 16).unwrap();
    s.add_employee("Bob", 24).unwrap();
    storage.save(s.roster()).unwrap();

    // compteur ramené en arrière à la main
    let mut value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    value["next_id"] = 1.into();
    std::fs::write(&path, value.to_string()).unwrap();
    let mut reloaded = Scheduler::from_roster(storage.load().unwrap());
    let carol = reloaded.add_employee("Carol", 8).unwrap();
    assert_eq!(carol.get(), 3);

    value["employees"][0]["max_hours"] = 0.into();
    std::fs::write(&path, value.to_string()).unwrap();
    let err = storage.load().unwrap_err();
    assert!(format!("{err:#}").contains("max_hours must be positive"));

    value["employees"][0]["max_hours"] = 16.into();
    value["employees"][1]["name"] = "  ".into();
    std::fs::write(&path, value.to_string()).unwrap();
    let err = storage.load().unwrap_err();
    assert!(format!("{err:#}").contains("name cannot be empty"));

    value["employees"][1]["name"] = "Bob".into();
    value["employees"][1]["id"] = 1.into();
    std::fs::write(&path, value.to_string()).unwrap();
    let err = storage.load().unwrap_err();
    assert!(format!("{err:#}").contains("duplicate employee id: 1"));
}

#[test]
fn export_into_missing_directory_names_the_path() {
    let dir = tempdir().unwrap();
    let mut s = Scheduler::new();
    let schedule = s.generate_schedule();
    let target = dir.path().join("absent").join("schedule.json");

    let err = io::export_schedule_json(&target, &schedule, s.roster()).unwrap_err();
    let msg = format!("{err:#}");
    assert!(msg.contains("writing"));
    assert!(msg.contains("schedule.json"));
}
