//! Adaptateur d'optimisation exacte.
//!
//! Le problème est formulé une fois (`AssignmentProblem`) puis confié à un
//! `OptimizerBackend`. Toute implémentation du trait peut être branchée ; la
//! crate fournit `BranchAndBound`, un solveur exact borné en nœuds et en temps.
//!
//! Modèle :
//! - une variable booléenne par triplet (employé, jour, créneau) éligible ;
//! - chaque case ayant au moins une variable reçoit exactement un employé ;
//! - heures par employé ≤ `max_hours` ;
//! - une borne partagée ≥ heures de chaque employé ;
//! - objectif : maximiser `100 × cases pourvues − borne`.

use super::{util::HoursLedger, GenerateOptions, OptimizePath, SolveBudget};
use crate::model::{Day, Roster, Schedule, ShiftKind};
use std::time::Instant;
use tracing::debug;

/// Poids de la couverture dans l'objectif ; domine toujours la borne d'heures.
pub const COVERAGE_WEIGHT: i64 = 100;

/// Variable de décision : `employee` est la position dans le roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Variable {
    pub employee: usize,
    pub day: Day,
    pub kind: ShiftKind,
}

/// Case couverte par au moins une variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellVars {
    pub day: Day,
    pub kind: ShiftKind,
    pub vars: Vec<usize>,
}

/// Formulation indépendante du backend.
#[derive(Debug, Clone)]
pub struct AssignmentProblem {
    pub variables: Vec<Variable>,
    pub cells: Vec<CellVars>,
    /// Plafond d'heures par position dans le roster.
    pub caps: Vec<u32>,
    /// Contrainte additionnelle : au plus un créneau par employé et par jour.
    pub one_shift_per_day: bool,
}

impl AssignmentProblem {
    pub fn build(roster: &Roster, opts: GenerateOptions) -> Self {
        let employees = roster.employees();
        let mut variables = Vec::new();
        let mut cells = Vec::new();

        for day in Day::ALL {
            for kind in ShiftKind::ALL {
                let mut vars = Vec::new();
                for (idx, emp) in employees.iter().enumerate() {
                    if emp.is_eligible(day, kind) {
                        vars.push(variables.len());
                        variables.push(Variable {
                            employee: idx,
                            day,
                            kind,
                        });
                    }
                }
                if !vars.is_empty() {
                    cells.push(CellVars { day, kind, vars });
                }
            }
        }

        Self {
            variables,
            cells,
            caps: employees.iter().map(|e| e.max_hours).collect(),
            one_shift_per_day: !opts.allow_multiple_shifts_per_day,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn employee_count(&self) -> usize {
        self.caps.len()
    }

    /// Heures par employé pour un ensemble de variables vraies.
    pub fn loads(&self, chosen: &[usize]) -> Vec<u32> {
        let mut loads = vec![0u32; self.caps.len()];
        for &v in chosen {
            let var = self.variables[v];
            loads[var.employee] += var.kind.hours();
        }
        loads
    }

    /// `100 × cases pourvues − pic d'heures`.
    pub fn objective(&self, chosen: &[usize]) -> i64 {
        let peak = self.loads(chosen).into_iter().max().unwrap_or(0);
        COVERAGE_WEIGHT * chosen.len() as i64 - i64::from(peak)
    }

    /// Vérifie une affectation : exactement une variable par case couverte,
    /// plafonds et politique journalière respectés. Une réponse partielle est refusée.
    pub fn admits(&self, chosen: &[usize]) -> bool {
        let mut cell_taken = [[false; 3]; 7];
        let mut worked = vec![[false; 7]; self.caps.len()];
        for &v in chosen {
            let Some(var) = self.variables.get(v) else {
                return false;
            };
            let cell = &mut cell_taken[var.day.index()][var.kind.index()];
            if *cell {
                return false;
            }
            *cell = true;
            let day = &mut worked[var.employee][var.day.index()];
            if self.one_shift_per_day && *day {
                return false;
            }
            *day = true;
        }
        let all_covered = self
            .cells
            .iter()
            .all(|c| cell_taken[c.day.index()][c.kind.index()]);
        all_covered
            && self
                .loads(chosen)
                .iter()
                .zip(&self.caps)
                .all(|(load, cap)| load <= cap)
    }
}

/// Résultat rendu par un backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
    /// Optimum prouvé ; indices dans `AssignmentProblem::variables`.
    Optimal(Vec<usize>),
    /// Solution réalisable, budget épuisé avant la preuve d'optimalité.
    Feasible(Vec<usize>),
    /// Aucune affectation ne satisfait les contraintes.
    Infeasible,
    /// Backend incapable de répondre (absent, budget épuisé sans solution…).
    Unavailable(String),
}

/// Capacité « tenter d'optimiser ».
pub trait OptimizerBackend {
    fn name(&self) -> &str;
    fn solve(&self, problem: &AssignmentProblem, budget: SolveBudget) -> SolveOutcome;
}

/// Étape OPTIMIZE : écrit la solution acceptée dans la grille et l'accumulateur.
pub(super) fn optimize(
    backend: &dyn OptimizerBackend,
    roster: &Roster,
    schedule: &mut Schedule,
    ledger: &mut HoursLedger,
    opts: GenerateOptions,
) -> (OptimizePath, usize) {
    let problem = AssignmentProblem::build(roster, opts);
    if problem.is_empty() {
        debug!(backend = backend.name(), "no eligible variable, skipping optimizer");
        return (OptimizePath::Skipped, 0);
    }

    let started = Instant::now();
    let outcome = backend.solve(&problem, opts.budget);
    debug!(
        backend = backend.name(),
        variables = problem.variables.len(),
        cells = problem.cells.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        ?outcome,
        "optimizer finished"
    );

    let (chosen, optimal) = match outcome {
        SolveOutcome::Optimal(chosen) => (chosen, true),
        SolveOutcome::Feasible(chosen) => (chosen, false),
        SolveOutcome::Infeasible => {
            return (OptimizePath::Degraded("infeasible".to_string()), 0);
        }
        SolveOutcome::Unavailable(reason) => return (OptimizePath::Degraded(reason), 0),
    };

    if !problem.admits(&chosen) {
        debug!(backend = backend.name(), "backend returned an inadmissible assignment");
        return (
            OptimizePath::Degraded("inadmissible assignment".to_string()),
            0,
        );
    }

    let employees = roster.employees();
    for &v in &chosen {
        let var = problem.variables[v];
        schedule.set(var.day, var.kind, employees[var.employee].id);
        ledger.record(var.employee, var.day, var.kind);
    }

    (OptimizePath::Optimized { optimal }, chosen.len())
}

/// Séparation-évaluation exacte du modèle, bornée par `SolveBudget`.
///
/// Cases les plus contraintes d'abord, candidats les moins chargés d'abord :
/// la première feuille atteinte ressemble à la solution gloutonne.
#[derive(Debug, Default, Clone, Copy)]
pub struct BranchAndBound;

impl OptimizerBackend for BranchAndBound {
    fn name(&self) -> &str {
        "branch-and-bound"
    }

    fn solve(&self, problem: &AssignmentProblem, budget: SolveBudget) -> SolveOutcome {
        let mut cells: Vec<&CellVars> = problem.cells.iter().collect();
        cells.sort_by_key(|c| c.vars.len());

        let mut search = Search {
            problem,
            cells,
            budget,
            started: Instant::now(),
            nodes: 0,
            exhausted: false,
            loads: vec![0; problem.employee_count()],
            worked: vec![[false; 7]; problem.employee_count()],
            stack: Vec::with_capacity(problem.cells.len()),
            best: None,
            lower_bound: peak_lower_bound(problem),
        };
        search.descend(0, 0);

        match (search.best, search.exhausted) {
            (Some((_, chosen)), false) => SolveOutcome::Optimal(chosen),
            (Some((peak, chosen)), true) if peak <= search.lower_bound => {
                SolveOutcome::Optimal(chosen)
            }
            (Some((_, chosen)), true) => SolveOutcome::Feasible(chosen),
            (None, false) => SolveOutcome::Infeasible,
            (None, true) => SolveOutcome::Unavailable("search budget exhausted".to_string()),
        }
    }
}

/// Pic minimal atteignable si toutes les cases sont pourvues : répartition
/// uniforme sur les employés ayant au moins une variable.
fn peak_lower_bound(problem: &AssignmentProblem) -> u32 {
    let mut involved = vec![false; problem.employee_count()];
    for var in &problem.variables {
        involved[var.employee] = true;
    }
    let staff = involved.iter().filter(|b| **b).count();
    if staff == 0 {
        return 0;
    }
    let shifts = problem.cells.len().div_ceil(staff);
    shifts as u32 * ShiftKind::HOURS
}

struct Search<'a> {
    problem: &'a AssignmentProblem,
    cells: Vec<&'a CellVars>,
    budget: SolveBudget,
    started: Instant,
    nodes: u64,
    exhausted: bool,
    loads: Vec<u32>,
    worked: Vec<[bool; 7]>,
    stack: Vec<usize>,
    best: Option<(u32, Vec<usize>)>,
    lower_bound: u32,
}

impl Search<'_> {
    /// Renvoie `true` quand la recherche doit s'arrêter.
    fn descend(&mut self, depth: usize, peak: u32) -> bool {
        if self.out_of_budget() {
            return true;
        }
        if let Some((best_peak, _)) = &self.best {
            if peak >= *best_peak {
                return false;
            }
        }
        if depth == self.cells.len() {
            self.best = Some((peak, self.stack.clone()));
            return peak <= self.lower_bound;
        }

        let cell = self.cells[depth];
        let mut candidates = cell.vars.clone();
        candidates.sort_by_key(|&v| {
            let emp = self.problem.variables[v].employee;
            (self.loads[emp], emp)
        });

        for v in candidates {
            let var = self.problem.variables[v];
            let emp = var.employee;
            let hours = var.kind.hours();
            if self.loads[emp] + hours > self.problem.caps[emp] {
                continue;
            }
            let day = var.day.index();
            if self.problem.one_shift_per_day && self.worked[emp][day] {
                continue;
            }

            let was_working = self.worked[emp][day];
            self.loads[emp] += hours;
            self.worked[emp][day] = true;
            self.stack.push(v);

            let stop = self.descend(depth + 1, peak.max(self.loads[emp]));

            self.stack.pop();
            self.worked[emp][day] = was_working;
            self.loads[emp] -= hours;

            if stop {
                return true;
            }
        }
        false
    }

    fn out_of_budget(&mut self) -> bool {
        if self.exhausted {
            return true;
        }
        self.nodes += 1;
        if self.nodes > self.budget.max_nodes
            || (self.nodes % 1024 == 0 && self.started.elapsed() >= self.budget.max_duration)
        {
            self.exhausted = true;
        }
        self.exhausted
    }
}
