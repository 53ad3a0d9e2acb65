#![forbid(unsafe_code)]
use horaire::{Day, Scheduler, ShiftKind};

#[test]
fn weekly_grid_renders_one_line_per_day() {
    let mut s = Scheduler::new();
    let alice = s.add_employee("Alice", 16).unwrap();
    let bob = s.add_employee("Bob", 40).unwrap();
    s.set_availability(alice, &[Day::Mon, Day::Tue], &[ShiftKind::Morning])
        .unwrap();
    s.set_availability(bob, &[Day::Mon], &[ShiftKind::Morning, ShiftKind::Evening])
        .unwrap();

    let schedule = s.generate_schedule();
    insta::assert_snapshot!(schedule.render(s.roster()), @r"
    Mon: morning:Alice, evening:Bob, night:-
    Tue: morning:Alice, evening:-, night:-
    Wed: morning:-, evening:-, night:-
    Thu: morning:-, evening:-, night:-
    Fri: morning:-, evening:-, night:-
    Sat: morning:-, evening:-, night:-
    Sun: morning:-, evening:-, night:-
    ");
}

#[test]
fn employee_list_renders_ids_and_caps() {
    let mut s = Scheduler::new();
    s.add_employee("Alice", 16).unwrap();
    s.add_employee("Bob", 40).unwrap();
    insta::assert_snapshot!(s.roster().render(), @r"
    1: Alice (16h)
    2: Bob (40h)
    ");
}
