use super::GenerateOptions;
use crate::model::{Day, Employee, ShiftKind};

/// Accumulateur d'heures d'une génération, indexé par position dans le roster.
///
/// Le roster n'est mis à jour qu'en fin de génération (`Roster::commit_hours`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HoursLedger {
    hours: Vec<u32>,
    worked: Vec<[bool; 7]>,
}

impl HoursLedger {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            hours: vec![0; len],
            worked: vec![[false; 7]; len],
        }
    }

    pub(crate) fn hours(&self, idx: usize) -> u32 {
        self.hours[idx]
    }

    pub(crate) fn record(&mut self, idx: usize, day: Day, kind: ShiftKind) {
        self.hours[idx] += kind.hours();
        self.worked[idx][day.index()] = true;
    }

    /// Disponibilité, congés, plafond et politique « un créneau par jour ».
    pub(crate) fn can_take(
        &self,
        emp: &Employee,
        idx: usize,
        day: Day,
        kind: ShiftKind,
        opts: GenerateOptions,
    ) -> bool {
        if !emp.is_eligible(day, kind) {
            return false;
        }
        if self.hours[idx] + kind.hours() > emp.max_hours {
            return false;
        }
        opts.allow_multiple_shifts_per_day || !self.worked[idx][day.index()]
    }

    pub(crate) fn peak(&self) -> u32 {
        self.hours.iter().copied().max().unwrap_or(0)
    }

    pub(crate) fn into_hours(self) -> Vec<u32> {
        self.hours
    }
}
