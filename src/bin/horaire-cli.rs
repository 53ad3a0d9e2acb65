#![forbid(unsafe_code)]
use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use horaire::{
    io,
    model::{parse_list, Day, EmployeeId, ShiftKind},
    scheduler::{BranchAndBound, GenerateOptions, OptimizePath, Scheduler, SolveBudget},
    storage::{JsonStorage, Storage},
    Employee,
};
use std::time::Duration;
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de planning hebdomadaire (7 jours × matin/soir/nuit)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON du roster
    #[arg(long, global = true, default_value = "roster.json")]
    roster: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Solver {
    /// Glouton seul
    None,
    /// Optimiseur exact borné, puis glouton sur les cases restantes
    BranchAndBound,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ajouter un employé
    AddEmployee {
        #[arg(long)]
        name: String,
        #[arg(long, default_value_t = Employee::DEFAULT_MAX_HOURS)]
        max_hours: u32,
    },

    /// Ajouter des disponibilités
    Availability {
        /// identifiant ou nom (insensible à la casse)
        #[arg(long = "employee", visible_alias = "id")]
        employee: String,
        /// liste "Mon,Tue,..."
        #[arg(long)]
        days: String,
        /// liste "morning,evening,night"
        #[arg(long)]
        shifts: String,
    },

    /// Poser un jour de congé
    TimeOff {
        #[arg(long = "employee", visible_alias = "id")]
        employee: String,
        #[arg(long)]
        day: String,
    },

    /// Importer des enregistrements JSON déjà validés
    Import {
        #[arg(long)]
        json: String,
    },

    /// Lister les employés
    Employees,

    /// Générer le planning et optionnellement l'exporter
    Schedule {
        #[arg(long, value_enum, default_value_t = Solver::BranchAndBound)]
        solver: Solver,
        #[arg(long, default_value_t = SolveBudget::default().max_nodes)]
        node_budget: u64,
        #[arg(long, default_value_t = 2000)]
        time_budget_ms: u64,
        /// Interdit plusieurs créneaux le même jour pour un employé
        #[arg(long)]
        one_shift_per_day: bool,
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
    },
}

/// Un nombre est pris comme identifiant (vérifié plus loin), sinon comme nom.
fn resolve_employee(scheduler: &Scheduler, raw: &str) -> Result<EmployeeId> {
    if let Ok(n) = raw.trim().parse::<u32>() {
        return Ok(EmployeeId::new(n));
    }
    match scheduler.roster().find_by_name(raw) {
        Some(emp) => Ok(emp.id),
        None => bail!("unknown employee: {}", raw.trim()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.roster)?;
    let mut scheduler = Scheduler::from_roster(storage.load_or_default()?);

    match cli.cmd {
        Commands::AddEmployee { name, max_hours } => {
            let id = scheduler.add_employee(&name, max_hours)?;
            storage.save(scheduler.roster())?;
            println!("Added employee {id}: {name} (max {max_hours}h/week)");
        }
        Commands::Availability {
            employee,
            days,
            shifts,
        } => {
            let id = resolve_employee(&scheduler, &employee)?;
            let days: Vec<Day> = parse_list(&days)?;
            let kinds: Vec<ShiftKind> = parse_list(&shifts)?;
            if days.is_empty() || kinds.is_empty() {
                bail!("at least one day and one shift kind are required");
            }
            scheduler.set_availability(id, &days, &kinds)?;
            storage.save(scheduler.roster())?;
            println!("Availability updated.");
        }
        Commands::TimeOff { employee, day } => {
            let id = resolve_employee(&scheduler, &employee)?;
            let day: Day = day.parse()?;
            scheduler.set_time_off(id, day)?;
            storage.save(scheduler.roster())?;
            println!("Time off recorded.");
        }
        Commands::Import { json } => {
            let records = io::import_records_json(json)?;
            for record in &records {
                scheduler.add_record(record)?;
            }
            storage.save(scheduler.roster())?;
            println!("Imported {} employee(s).", records.len());
        }
        Commands::Employees => {
            if scheduler.list_employees().is_empty() {
                println!("No employees.");
            } else {
                println!("{}", scheduler.roster().render());
            }
        }
        Commands::Schedule {
            solver,
            node_budget,
            time_budget_ms,
            one_shift_per_day,
            out_json,
            out_csv,
        } => {
            let opts = GenerateOptions {
                allow_multiple_shifts_per_day: !one_shift_per_day,
                budget: SolveBudget {
                    max_nodes: node_budget,
                    max_duration: Duration::from_millis(time_budget_ms),
                },
            };
            scheduler = scheduler.with_options(opts);
            if solver == Solver::BranchAndBound {
                scheduler.set_backend(Some(Box::new(BranchAndBound)));
            }

            let (schedule, report) = scheduler.generate_with_report();
            storage.save(scheduler.roster())?;

            if let Some(path) = out_json {
                io::export_schedule_json(path, &schedule, scheduler.roster())?;
            }
            if let Some(path) = out_csv {
                io::export_schedule_csv(path, &schedule, scheduler.roster())?;
            }

            println!("{}", schedule.render(scheduler.roster()));
            let path = match report.path {
                OptimizePath::Skipped => "heuristic".to_string(),
                OptimizePath::Optimized { optimal: true } => "optimal".to_string(),
                OptimizePath::Optimized { optimal: false } => "feasible".to_string(),
                OptimizePath::Degraded(reason) => format!("fallback ({reason})"),
            };
            println!(
                "coverage {}/21, peak {}h, {}",
                report.coverage, report.peak_hours, path
            );
        }
    }

    Ok(())
}
