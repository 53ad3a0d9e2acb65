use crate::scheduler::SchedError;
use chrono::Weekday;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// Identifiant séquentiel d'un employé (attribué à partir de 1, jamais réutilisé).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct EmployeeId(u32);

impl EmployeeId {
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Jour de la semaine, ordonné du lundi au dimanche.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Day {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Mon,
        Day::Tue,
        Day::Wed,
        Day::Thu,
        Day::Fri,
        Day::Sat,
        Day::Sun,
    ];

    /// Position 0..7 dans la grille.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Day::Mon => "Mon",
            Day::Tue => "Tue",
            Day::Wed => "Wed",
            Day::Thu => "Thu",
            Day::Fri => "Fri",
            Day::Sat => "Sat",
            Day::Sun => "Sun",
        }
    }
}

impl From<Weekday> for Day {
    fn from(w: Weekday) -> Self {
        Day::ALL[w.num_days_from_monday() as usize]
    }
}

impl From<Day> for Weekday {
    fn from(d: Day) -> Self {
        match d {
            Day::Mon => Weekday::Mon,
            Day::Tue => Weekday::Tue,
            Day::Wed => Weekday::Wed,
            Day::Thu => Weekday::Thu,
            Day::Fri => Weekday::Fri,
            Day::Sat => Weekday::Sat,
            Day::Sun => Weekday::Sun,
        }
    }
}

impl FromStr for Day {
    type Err = SchedError;

    /// Accepte `Mon`, `monday`, `MONDAY`… (via `chrono::Weekday`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<Weekday>()
            .map(Day::from)
            .map_err(|_| SchedError::UnknownDay(s.trim().to_string()))
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type de créneau quotidien, chacun de durée fixe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum ShiftKind {
    Morning,
    Evening,
    Night,
}

impl ShiftKind {
    pub const ALL: [ShiftKind; 3] = [ShiftKind::Morning, ShiftKind::Evening, ShiftKind::Night];

    /// Durée d'un créneau, identique pour les trois types.
    pub const HOURS: u32 = 8;

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn hours(self) -> u32 {
        Self::HOURS
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ShiftKind::Morning => "morning",
            ShiftKind::Evening => "evening",
            ShiftKind::Night => "night",
        }
    }
}

impl FromStr for ShiftKind {
    type Err = SchedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "morning" | "am" => Ok(ShiftKind::Morning),
            "evening" | "pm" => Ok(ShiftKind::Evening),
            "night" => Ok(ShiftKind::Night),
            _ => Err(SchedError::UnknownShiftKind(s.trim().to_string())),
        }
    }
}

impl fmt::Display for ShiftKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse une liste séparée par des virgules (`"Mon, Tue"`), entrées vides ignorées.
pub fn parse_list<T: FromStr>(raw: &str) -> Result<Vec<T>, T::Err> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect()
}

/// Employé et ses contraintes hebdomadaires.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub max_hours: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub availability: BTreeMap<Day, BTreeSet<ShiftKind>>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub time_off: BTreeSet<Day>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub assigned_hours: u32,
}

impl Employee {
    pub const DEFAULT_MAX_HOURS: u32 = 40;

    /// Vrai si l'employé peut tenir ce créneau hors plafond d'heures.
    pub fn is_eligible(&self, day: Day, kind: ShiftKind) -> bool {
        !self.time_off.contains(&day)
            && self
                .availability
                .get(&day)
                .is_some_and(|kinds| kinds.contains(&kind))
    }
}

/// Enregistrement déjà validé livré par un collaborateur (dialogue, import…).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EmployeeRecord {
    pub name: String,
    pub max_hours: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub days: Vec<Day>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub shift_kinds: Vec<ShiftKind>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub time_off: Vec<Day>,
}

/// Registre des employés, dans l'ordre d'insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RosterData"))]
pub struct Roster {
    employees: Vec<Employee>,
    next_id: u32,
}

/// Forme brute d'un roster relu depuis l'extérieur, avant validation.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RosterData {
    employees: Vec<Employee>,
    #[serde(default)]
    next_id: u32,
}

#[cfg(feature = "serde")]
impl TryFrom<RosterData> for Roster {
    type Error = SchedError;

    /// Mêmes règles qu'`add` ; `next_id` ne redescend jamais sous le plus grand id connu.
    fn try_from(data: RosterData) -> Result<Self, Self::Error> {
        let mut seen = BTreeSet::new();
        for emp in &data.employees {
            if emp.name.trim().is_empty() {
                return Err(SchedError::EmptyName);
            }
            if emp.max_hours == 0 {
                return Err(SchedError::InvalidMaxHours(emp.max_hours));
            }
            if !seen.insert(emp.id) {
                return Err(SchedError::DuplicateId(emp.id));
            }
        }
        let after_last = seen.last().map_or(1, |id| id.get() + 1);
        Ok(Self {
            next_id: data.next_id.max(after_last),
            employees: data.employees,
        })
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self {
            employees: Vec::new(),
            next_id: 1,
        }
    }
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ajoute un employé et renvoie son identifiant séquentiel.
    pub fn add(&mut self, name: &str, max_hours: u32) -> Result<EmployeeId, SchedError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SchedError::EmptyName);
        }
        if max_hours == 0 {
            return Err(SchedError::InvalidMaxHours(max_hours));
        }
        let id = EmployeeId(self.next_id);
        self.next_id += 1;
        self.employees.push(Employee {
            id,
            name: name.to_string(),
            max_hours,
            availability: BTreeMap::new(),
            time_off: BTreeSet::new(),
            assigned_hours: 0,
        });
        Ok(id)
    }

    pub fn get(&self, id: EmployeeId) -> Result<&Employee, SchedError> {
        self.employees
            .iter()
            .find(|e| e.id == id)
            .ok_or(SchedError::NotFound(id))
    }

    fn get_mut(&mut self, id: EmployeeId) -> Result<&mut Employee, SchedError> {
        self.employees
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(SchedError::NotFound(id))
    }

    /// Recherche insensible à la casse, premier trouvé.
    pub fn find_by_name(&self, name: &str) -> Option<&Employee> {
        let name = name.trim();
        self.employees
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(name))
    }

    /// Ajoute `kinds` aux disponibilités de chaque jour de `days` (union).
    pub fn set_availability(
        &mut self,
        id: EmployeeId,
        days: &[Day],
        kinds: &[ShiftKind],
    ) -> Result<(), SchedError> {
        let emp = self.get_mut(id)?;
        for day in days {
            emp.availability
                .entry(*day)
                .or_default()
                .extend(kinds.iter().copied());
        }
        Ok(())
    }

    pub fn set_time_off(&mut self, id: EmployeeId, day: Day) -> Result<(), SchedError> {
        self.get_mut(id)?.time_off.insert(day);
        Ok(())
    }

    /// Remet à zéro les heures de tout le monde.
    pub fn reset_hours(&mut self) {
        for emp in &mut self.employees {
            emp.assigned_hours = 0;
        }
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    /// Écrit les heures accumulées, dans l'ordre du registre.
    pub(crate) fn commit_hours(&mut self, hours: &[u32]) {
        for (emp, h) in self.employees.iter_mut().zip(hours) {
            emp.assigned_hours = *h;
        }
    }

    /// Une ligne par employé : `1: Alice (16h)`.
    pub fn render(&self) -> String {
        self.employees
            .iter()
            .map(|e| format!("{}: {} ({}h)", e.id, e.name, e.max_hours))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Grille 7 × 3 ; au plus un employé par case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Schedule {
    cells: [[Option<EmployeeId>; 3]; 7],
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, day: Day, kind: ShiftKind) -> Option<EmployeeId> {
        self.cells[day.index()][kind.index()]
    }

    pub(crate) fn set(&mut self, day: Day, kind: ShiftKind, id: EmployeeId) {
        self.cells[day.index()][kind.index()] = Some(id);
    }

    /// Toutes les cases dans l'ordre (jour, créneau).
    pub fn cells(&self) -> impl Iterator<Item = (Day, ShiftKind, Option<EmployeeId>)> + '_ {
        Day::ALL.into_iter().flat_map(move |day| {
            ShiftKind::ALL
                .into_iter()
                .map(move |kind| (day, kind, self.get(day, kind)))
        })
    }

    pub fn empty_cells(&self) -> impl Iterator<Item = (Day, ShiftKind)> + '_ {
        self.cells()
            .filter(|(_, _, who)| who.is_none())
            .map(|(day, kind, _)| (day, kind))
    }

    /// Nombre de cases pourvues.
    pub fn coverage(&self) -> usize {
        self.cells().filter(|(_, _, who)| who.is_some()).count()
    }

    /// Heures planifiées pour un employé.
    pub fn hours_of(&self, id: EmployeeId) -> u32 {
        self.cells()
            .filter(|(_, _, who)| *who == Some(id))
            .map(|(_, kind, _)| kind.hours())
            .sum()
    }

    /// Rendu texte, une ligne par jour : `Mon: morning:Alice, evening:-, night:-`.
    pub fn render(&self, roster: &Roster) -> String {
        Day::ALL
            .iter()
            .map(|day| {
                let parts: Vec<String> = ShiftKind::ALL
                    .iter()
                    .map(|kind| {
                        let who = self
                            .get(*day, *kind)
                            .and_then(|id| roster.get(id).ok())
                            .map(|e| e.name.as_str())
                            .unwrap_or("-");
                        format!("{kind}:{who}")
                    })
                    .collect();
                format!("{day}: {}", parts.join(", "))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
