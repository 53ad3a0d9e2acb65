mod assemble;
mod heuristic;
pub mod optimizer;
mod types;
mod util;

pub use optimizer::{
    AssignmentProblem, BranchAndBound, CellVars, OptimizerBackend, SolveOutcome, Variable,
};
pub use types::{GenerateOptions, GenerationReport, OptimizePath, SchedError, SolveBudget};

use crate::model::{Day, Employee, EmployeeId, EmployeeRecord, Roster, Schedule, ShiftKind};

/// Scheduler : encapsule un Roster et, éventuellement, un backend d'optimisation.
///
/// Une génération mute les heures du roster : `generate_schedule` prend
/// `&mut self`, les générations concurrentes sur un même roster sont donc
/// sérialisées par l'appelant.
#[derive(Default)]
pub struct Scheduler {
    roster: Roster,
    backend: Option<Box<dyn OptimizerBackend>>,
    options: GenerateOptions,
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("roster", &self.roster)
            .field("backend", &self.backend.as_ref().map(|b| b.name()))
            .field("options", &self.options)
            .finish()
    }
}

impl Scheduler {
    /// Sans backend : génération purement gloutonne.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_backend(backend: Box<dyn OptimizerBackend>) -> Self {
        Self {
            backend: Some(backend),
            ..Self::default()
        }
    }

    pub fn with_options(mut self, options: GenerateOptions) -> Self {
        self.options = options;
        self
    }

    pub fn from_roster(roster: Roster) -> Self {
        Self {
            roster,
            ..Self::default()
        }
    }

    pub fn set_backend(&mut self, backend: Option<Box<dyn OptimizerBackend>>) {
        self.backend = backend;
    }

    pub fn options(&self) -> GenerateOptions {
        self.options
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }
    pub fn roster_mut(&mut self) -> &mut Roster {
        &mut self.roster
    }

    pub fn add_employee(&mut self, name: &str, max_hours: u32) -> Result<EmployeeId, SchedError> {
        self.roster.add(name, max_hours)
    }

    /// Ajoute un enregistrement livré par un collaborateur.
    pub fn add_record(&mut self, record: &EmployeeRecord) -> Result<EmployeeId, SchedError> {
        let id = self.roster.add(&record.name, record.max_hours)?;
        self.roster
            .set_availability(id, &record.days, &record.shift_kinds)?;
        for day in &record.time_off {
            self.roster.set_time_off(id, *day)?;
        }
        Ok(id)
    }

    pub fn set_availability(
        &mut self,
        id: EmployeeId,
        days: &[Day],
        kinds: &[ShiftKind],
    ) -> Result<(), SchedError> {
        self.roster.set_availability(id, days, kinds)
    }

    pub fn set_time_off(&mut self, id: EmployeeId, day: Day) -> Result<(), SchedError> {
        self.roster.set_time_off(id, day)
    }

    pub fn employee(&self, id: EmployeeId) -> Result<&Employee, SchedError> {
        self.roster.get(id)
    }

    /// Employés dans l'ordre d'insertion.
    pub fn list_employees(&self) -> &[Employee] {
        self.roster.employees()
    }

    pub fn generate_schedule(&mut self) -> Schedule {
        self.generate_with_report().0
    }

    /// Comme `generate_schedule`, avec le bilan de la génération.
    pub fn generate_with_report(&mut self) -> (Schedule, GenerationReport) {
        assemble::generate(self)
    }
}
