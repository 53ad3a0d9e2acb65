use crate::model::{Day, EmployeeId, EmployeeRecord, Roster, Schedule, ShiftKind};
use anyhow::Context;
use chrono::{DateTime, Utc};
use csv::WriterBuilder;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Case exportée, employé résolu par son nom.
#[derive(Debug, Clone, Serialize)]
pub struct ExportedCell {
    pub day: Day,
    pub shift: ShiftKind,
    pub employee_id: Option<EmployeeId>,
    pub employee_name: Option<String>,
}

/// Planning exporté (JSON).
#[derive(Debug, Clone, Serialize)]
pub struct ExportedSchedule {
    pub generated_at: DateTime<Utc>,
    pub coverage: usize,
    pub cells: Vec<ExportedCell>,
}

impl ExportedSchedule {
    pub fn new(schedule: &Schedule, roster: &Roster, generated_at: DateTime<Utc>) -> Self {
        let cells = schedule
            .cells()
            .map(|(day, shift, who)| ExportedCell {
                day,
                shift,
                employee_id: who,
                employee_name: who
                    .and_then(|id| roster.get(id).ok())
                    .map(|e| e.name.clone()),
            })
            .collect();
        Self {
            generated_at,
            coverage: schedule.coverage(),
            cells,
        }
    }
}

/// Import d'enregistrements déjà validés (tableau JSON d'`EmployeeRecord`).
pub fn import_records_json<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<EmployeeRecord>> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let records: Vec<EmployeeRecord> = serde_json::from_slice(&data)
        .with_context(|| format!("parsing records {}", path.display()))?;
    Ok(records)
}

/// Export JSON du planning (jolie mise en forme)
pub fn export_schedule_json<P: AsRef<Path>>(
    path: P,
    schedule: &Schedule,
    roster: &Roster,
) -> anyhow::Result<()> {
    let path = path.as_ref();
    let exported = ExportedSchedule::new(schedule, roster, Utc::now());
    let s = serde_json::to_string_pretty(&exported)?;
    fs::write(path, s).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Export CSV du planning: header `day,shift,employee_id,employee_name`
pub fn export_schedule_csv<P: AsRef<Path>>(
    path: P,
    schedule: &Schedule,
    roster: &Roster,
) -> anyhow::Result<()> {
    let path = path.as_ref();
    let mut w = WriterBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("writing {}", path.display()))?;
    w.write_record(["day", "shift", "employee_id", "employee_name"])?;
    for (day, shift, who) in schedule.cells() {
        let id = who.map(|id| id.to_string()).unwrap_or_default();
        let name = who
            .and_then(|id| roster.get(id).ok())
            .map(|e| e.name.as_str())
            .unwrap_or("");
        w.write_record([day.as_str(), shift.as_str(), id.as_str(), name])?;
    }
    w.flush()?;
    Ok(())
}
