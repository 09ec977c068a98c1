use exam_allocator::{
    CourseGroup, CourseKey, EnrollmentRecord, Room, RunConfig, ScheduleRunner, Seed, SlotSpec,
    Strategy, allocate_slot, group_by_course, run_schedule,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::{HashMap, HashSet};

const STRATEGIES: [Strategy; 3] = [Strategy::Smart, Strategy::CourseWise, Strategy::Balanced];

fn record(code: &str, i: usize) -> EnrollmentRecord {
    EnrollmentRecord {
        roll_number: format!("{code}-{i:03}"),
        name: format!("Student {i}"),
        subject_code: code.to_string(),
        subject_name: format!("{code} title"),
        semester: "S1".to_string(),
        program: None,
        batch: None,
        site_code: None,
    }
}

fn course(code: &str, n: usize) -> CourseGroup {
    CourseGroup {
        course: CourseKey::new(code, format!("{code} title")),
        students: (0..n).map(|i| record(code, i)).collect(),
    }
}

fn slots(n: usize) -> Vec<SlotSpec> {
    (0..n)
        .map(|i| SlotSpec::new("2025-05-18", format!("Slot {}", i + 1), "09:00 - 12:00"))
        .collect()
}

fn rolls(students: &[EnrollmentRecord]) -> Vec<&str> {
    students.iter().map(|s| s.roll_number.as_str()).collect()
}

/// Random rooms (largest first) and enrollments for property checks.
fn random_input(rng: &mut ChaCha8Rng) -> (Vec<Room>, Vec<EnrollmentRecord>) {
    let mut rooms: Vec<Room> = (0..rng.random_range(0..6))
        .map(|i| Room::new(format!("R{i}"), rng.random_range(0..25)))
        .collect();
    rooms.sort_by(|a, b| b.capacity.cmp(&a.capacity));

    let mut students = Vec::new();
    for c in 0..rng.random_range(0..8) {
        let code = format!("C{c}");
        for i in 0..rng.random_range(0..30) {
            students.push(record(&code, i));
        }
    }
    // interleave courses so grouping has work to do
    students.sort_by_key(|s| {
        let seq = s.roll_number[s.roll_number.len() - 3..].to_string();
        (seq, s.subject_code.clone())
    });
    (rooms, students)
}

#[test]
fn course_wise_two_rooms_leaves_residual_without_backfill() {
    let rooms = [Room::new("A", 5), Room::new("B", 5)];
    let mut students: Vec<_> = (0..7).map(|i| record("C1", i)).collect();
    students.extend((0..3).map(|i| record("C2", i)));

    let config = RunConfig {
        strategy: Strategy::CourseWise,
        max_courses_per_room: 1,
        seed: Some(Seed::Int(2025)),
    };
    let run = run_schedule(&rooms, students, &slots(1), &config).unwrap();
    let slot = &run.schedule.slots[0];

    assert_eq!(slot.assignments.len(), 2);
    assert_eq!(slot.assignments[0].room.room_id, "A");
    assert_eq!(
        rolls(&slot.assignments[0].students),
        vec!["C1-000", "C1-001", "C1-002", "C1-003", "C1-004"]
    );
    assert_eq!(slot.assignments[1].room.room_id, "B");
    assert_eq!(rolls(&slot.assignments[1].students), vec!["C2-000", "C2-001", "C2-002"]);

    assert_eq!(slot.residual.len(), 1);
    assert_eq!(slot.residual[0].course.subject_code, "C1");
    assert_eq!(rolls(&slot.residual[0].students), vec!["C1-005", "C1-006"]);
    assert_eq!(slot.seated() + slot.unseated(), 10);
    assert_eq!(run.spillover.total_unplaced, 2);
}

#[test]
fn balanced_alternates_tied_courses() {
    for seed in 0..10 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let out = allocate_slot(
            &[Room::new("A", 4)],
            vec![course("C1", 5), course("C2", 5)],
            Strategy::Balanced,
            2,
            &mut rng,
        )
        .unwrap();

        let seated = &out.assignments[0].students;
        assert_eq!(seated.len(), 4);
        let codes: Vec<_> = seated.iter().map(|s| s.subject_code.as_str()).collect();
        assert_ne!(codes[0], codes[1]);
        assert_eq!(codes[0], codes[2]);
        assert_eq!(codes[1], codes[3]);

        let residual: HashMap<_, _> = out
            .residual
            .iter()
            .map(|g| (g.course.subject_code.as_str(), g.students.len()))
            .collect();
        assert_eq!(residual, HashMap::from([("C1", 3), ("C2", 3)]));
    }
}

#[test]
fn course_wise_underfills_instead_of_mixing() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let out = allocate_slot(
        &[Room::new("A", 5)],
        vec![course("C1", 3), course("C2", 2)],
        Strategy::CourseWise,
        3,
        &mut rng,
    )
    .unwrap();

    assert_eq!(rolls(&out.assignments[0].students), vec!["C1-000", "C1-001", "C1-002"]);
    assert_eq!(out.residual, vec![course("C2", 2)]);
}

#[test]
fn slot_with_more_students_than_seats_is_partial_not_fatal() {
    let config = RunConfig {
        strategy: Strategy::Smart,
        max_courses_per_room: 2,
        seed: Some(Seed::from("overflow")),
    };
    let students: Vec<_> = (0..40).map(|i| record("BIG", i)).collect();
    let run = run_schedule(&[Room::new("A", 10), Room::new("B", 5)], students, &slots(1), &config)
        .unwrap();

    assert_eq!(run.schedule.total_seated(), 15);
    assert_eq!(run.spillover.total_unplaced, 25);
}

#[test]
fn conservation_capacity_and_fifo_hold_for_all_strategies() {
    let mut gen_rng = ChaCha8Rng::seed_from_u64(0xE8A);
    for _ in 0..60 {
        let (rooms, students) = random_input(&mut gen_rng);
        let num_slots = gen_rng.random_range(1..4);
        let groups: HashMap<CourseKey, Vec<EnrollmentRecord>> = group_by_course(students.clone())
            .into_iter()
            .map(|g| (g.course, g.students))
            .collect();

        for strategy in STRATEGIES {
            let config = RunConfig {
                strategy,
                max_courses_per_room: gen_rng.random_range(1..4),
                seed: Some(Seed::Int(gen_rng.random())),
            };
            let run = run_schedule(&rooms, students.clone(), &slots(num_slots), &config).unwrap();
            assert_eq!(run.schedule.slots.len(), num_slots);

            let mut spilled = 0;
            for slot in &run.schedule.slots {
                let routed: usize = slot.courses.iter().map(|c| groups[c].len()).sum();
                assert_eq!(slot.seated() + slot.unseated(), routed);
                spilled += slot.unseated();

                for assignment in &slot.assignments {
                    assert!(!assignment.students.is_empty());
                    assert!(assignment.students.len() <= assignment.room.capacity as usize);
                    if strategy == Strategy::CourseWise {
                        let keys: HashSet<_> =
                            assignment.students.iter().map(|s| s.course_key()).collect();
                        assert_eq!(keys.len(), 1);
                    }
                }

                // Per course, seats in room order followed by residual replay the input order.
                for key in &slot.courses {
                    let mut replay: Vec<&EnrollmentRecord> = slot
                        .assignments
                        .iter()
                        .flat_map(|a| a.students.iter())
                        .filter(|s| &s.course_key() == key)
                        .collect();
                    replay.extend(
                        slot.residual
                            .iter()
                            .filter(|g| &g.course == key)
                            .flat_map(|g| g.students.iter()),
                    );
                    let expected: Vec<&EnrollmentRecord> = groups[key].iter().collect();
                    assert_eq!(replay, expected);
                }
            }
            assert_eq!(run.spillover.total_unplaced, spilled);
        }
    }
}

#[test]
fn identical_seed_gives_identical_schedule() {
    let mut gen_rng = ChaCha8Rng::seed_from_u64(77);
    let (mut rooms, students) = random_input(&mut gen_rng);
    rooms.push(Room::new("Annex", 12));

    for strategy in STRATEGIES {
        for seed in [Seed::Int(42), Seed::from("midterms")] {
            let config = RunConfig {
                strategy,
                max_courses_per_room: 2,
                seed: Some(seed),
            };
            let a = run_schedule(&rooms, students.clone(), &slots(3), &config).unwrap();
            let b = run_schedule(&rooms, students.clone(), &slots(3), &config).unwrap();
            assert_eq!(
                serde_json::to_string(&a).unwrap(),
                serde_json::to_string(&b).unwrap()
            );
        }
    }
}

#[test]
fn runner_accepts_an_injected_generator() {
    let students: Vec<_> = (0..6)
        .map(|i| record("X", i))
        .chain((0..6).map(|i| record("Y", i)))
        .collect();
    let rooms = [Room::new("A", 8), Room::new("B", 8)];

    let mut first = ScheduleRunner::with_rng(Strategy::Smart, 2, ChaCha8Rng::seed_from_u64(5));
    let mut second = ScheduleRunner::with_rng(Strategy::Smart, 2, ChaCha8Rng::seed_from_u64(5));
    let a = first.run(&rooms, students.clone(), &slots(2)).unwrap();
    let b = second.run(&rooms, students, &slots(2)).unwrap();

    assert_eq!(a, b);
    assert_eq!(a.schedule.total_seated(), 12);
}

#[test]
fn more_slots_than_courses_leaves_empty_slots() {
    let students: Vec<_> = (0..3).map(|i| record("ONLY", i)).collect();
    let config = RunConfig {
        seed: Some(Seed::Int(8)),
        ..RunConfig::default()
    };
    let run = run_schedule(&[Room::new("A", 10)], students, &slots(4), &config).unwrap();

    let empty = run.schedule.slots.iter().filter(|s| s.courses.is_empty()).count();
    assert_eq!(empty, 3);
    assert!(
        run.schedule
            .slots
            .iter()
            .filter(|s| s.courses.is_empty())
            .all(|s| s.assignments.is_empty() && s.residual.is_empty())
    );
}
