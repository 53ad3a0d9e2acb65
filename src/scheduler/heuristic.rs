use super::{util::HoursLedger, GenerateOptions};
use crate::model::{Roster, Schedule};
use tracing::trace;

/// Remplit chaque case encore vide avec l'employé éligible le moins chargé.
///
/// Classement refait avant chaque case : heures croissantes, puis ordre du
/// roster (tri stable). Aucun retour arrière. Renvoie le nombre de cases pourvues.
pub(super) fn fill(
    roster: &Roster,
    schedule: &mut Schedule,
    ledger: &mut HoursLedger,
    opts: GenerateOptions,
) -> usize {
    let employees = roster.employees();
    let mut order: Vec<usize> = (0..employees.len()).collect();
    let mut filled = 0usize;

    let open: Vec<_> = schedule.empty_cells().collect();
    for (day, kind) in open {
        order.sort_by_key(|&idx| (ledger.hours(idx), idx));

        let chosen = order
            .iter()
            .copied()
            .find(|&idx| ledger.can_take(&employees[idx], idx, day, kind, opts));

        if let Some(idx) = chosen {
            let emp = &employees[idx];
            schedule.set(day, kind, emp.id);
            ledger.record(idx, day, kind);
            filled += 1;
            trace!(%day, %kind, employee = %emp.id, hours = ledger.hours(idx), "heuristic placement");
        }
    }

    filled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Day, ShiftKind};

    fn roster_ab() -> Roster {
        let mut r = Roster::new();
        let a = r.add("Alice", 16).unwrap();
        let b = r.add("Bob", 40).unwrap();
        r.set_availability(a, &[Day::Mon, Day::Tue], &[ShiftKind::Morning])
            .unwrap();
        r.set_availability(b, &[Day::Mon], &[ShiftKind::Morning, ShiftKind::Evening])
            .unwrap();
        r
    }

    #[test]
    fn least_loaded_wins_and_ties_follow_roster_order() {
        let r = roster_ab();
        let mut s = Schedule::new();
        let mut ledger = HoursLedger::new(r.len());
        let filled = fill(&r, &mut s, &mut ledger, GenerateOptions::default());

        assert_eq!(filled, 3);
        let alice = r.find_by_name("alice").unwrap().id;
        let bob = r.find_by_name("bob").unwrap().id;
        assert_eq!(s.get(Day::Mon, ShiftKind::Morning), Some(alice));
        assert_eq!(s.get(Day::Mon, ShiftKind::Evening), Some(bob));
        assert_eq!(s.get(Day::Tue, ShiftKind::Morning), Some(alice));
        assert_eq!(ledger.hours(0), 16);
        assert_eq!(ledger.hours(1), 8);
    }

    #[test]
    fn prefilled_cells_are_left_alone() {
        let r = roster_ab();
        let bob = r.find_by_name("Bob").unwrap().id;
        let mut s = Schedule::new();
        s.set(Day::Mon, ShiftKind::Morning, bob);
        let mut ledger = HoursLedger::new(r.len());
        ledger.record(1, Day::Mon, ShiftKind::Morning);

        let filled = fill(&r, &mut s, &mut ledger, GenerateOptions::default());
        assert_eq!(filled, 2);
        assert_eq!(s.get(Day::Mon, ShiftKind::Morning), Some(bob));
    }

    #[test]
    fn one_shift_per_day_policy_blocks_second_same_day_shift() {
        let mut r = Roster::new();
        let a = r.add("Alice", 40).unwrap();
        r.set_availability(a, &[Day::Mon], &ShiftKind::ALL).unwrap();
        let opts = GenerateOptions {
            allow_multiple_shifts_per_day: false,
            ..GenerateOptions::default()
        };

        let mut s = Schedule::new();
        let mut ledger = HoursLedger::new(r.len());
        assert_eq!(fill(&r, &mut s, &mut ledger, opts), 1);
        assert_eq!(s.get(Day::Mon, ShiftKind::Morning), Some(a));
        assert_eq!(s.get(Day::Mon, ShiftKind::Evening), None);
    }
}
