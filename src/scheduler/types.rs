use crate::model::EmployeeId;
use std::time::Duration;
use thiserror::Error;

/// Options de génération
#[derive(Debug, Clone, Copy)]
pub struct GenerateOptions {
    /// Autorise plusieurs créneaux le même jour pour un même employé.
    pub allow_multiple_shifts_per_day: bool,
    pub budget: SolveBudget,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            allow_multiple_shifts_per_day: true,
            budget: SolveBudget::default(),
        }
    }
}

/// Budget d'exploration accordé à l'optimiseur.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolveBudget {
    pub max_nodes: u64,
    pub max_duration: Duration,
}

impl Default for SolveBudget {
    fn default() -> Self {
        Self {
            max_nodes: 200_000,
            max_duration: Duration::from_secs(2),
        }
    }
}

/// Chemin suivi par une génération.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptimizePath {
    /// Pas de backend, roster vide ou aucune variable.
    Skipped,
    /// Le backend a fourni une solution (optimale ou non).
    Optimized { optimal: bool },
    /// Le backend n'a rien donné ; la grille repart vide.
    Degraded(String),
}

/// Bilan d'une génération.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub path: OptimizePath,
    pub optimizer_filled: usize,
    pub heuristic_filled: usize,
    pub coverage: usize,
    pub peak_hours: u32,
}

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("employee not found: {0}")]
    NotFound(EmployeeId),
    #[error("duplicate employee id: {0}")]
    DuplicateId(EmployeeId),
    #[error("max_hours must be positive (got {0})")]
    InvalidMaxHours(u32),
    #[error("employee name cannot be empty")]
    EmptyName,
    #[error("unknown day: {0}")]
    UnknownDay(String),
    #[error("unknown shift kind: {0}")]
    UnknownShiftKind(String),
}
