#![forbid(unsafe_code)]
//! Horaire — génération de planning hebdomadaire d'équipe (en mémoire).
//!
//! - Grille fixe : 7 jours × 3 créneaux de 8 h.
//! - Optimiseur exact borné derrière un trait, repli glouton déterministe.
//! - Passe gloutonne sur toute case laissée vide par l'optimiseur.
//! - Aucune E/S dans le cœur ; `io`/`storage` derrière la feature `serde`.

#[cfg(feature = "serde")]
pub mod io;
pub mod model;
pub mod scheduler;
#[cfg(feature = "serde")]
pub mod storage;

pub use model::{Day, Employee, EmployeeId, EmployeeRecord, Roster, Schedule, ShiftKind};
pub use scheduler::{
    BranchAndBound, GenerateOptions, GenerationReport, OptimizePath, OptimizerBackend,
    SchedError, Scheduler, SolveBudget, SolveOutcome,
};
#[cfg(feature = "serde")]
pub use storage::{JsonStorage, Storage};
