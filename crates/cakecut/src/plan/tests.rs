use super::*;
use crate::geom2::Tray;
use nalgebra::{vector, Vector2};
use proptest::prelude::*;

fn square(side: f64) -> Tray {
    Tray::new(side, side).unwrap()
}

fn planned(start: Vector2<f64>, end: Vector2<f64>, tray: &Tray) -> Vec<Vector2<f64>> {
    let mut q = MoveQueue::default();
    sneak(start, end, tray, &mut q);
    q.iter().copied().collect()
}

#[test]
fn sneak_short_hop_goes_straight() {
    let tray = square(100.0);
    let path = planned(vector![0.01, 0.0], vector![0.0, 50.0], &tray);
    assert_eq!(path, vec![vector![0.0, 50.0]]);
}

#[test]
fn sneak_same_horizontal_edge_single_bounce() {
    let tray = square(100.0);
    let path = planned(vector![10.0, 0.0], vector![90.0, 0.0], &tray);
    assert_eq!(path, vec![vector![100.0, 0.01], vector![90.0, 0.0]]);
}

#[test]
fn sneak_opposite_horizontal_edge_ricochets() {
    let tray = square(100.0);
    let path = planned(vector![30.0, 0.0], vector![70.0, 100.0], &tray);
    assert_eq!(
        path,
        vec![
            vector![100.0, 0.01],
            vector![99.99, 0.0],
            vector![99.99, 100.0],
            vector![100.0, 99.99],
            vector![70.0, 100.0],
        ]
    );
}

#[test]
fn sneak_from_vertical_edge_through_corner() {
    let tray = square(100.0);
    let path = planned(vector![100.0, 50.0], vector![50.0, 100.0], &tray);
    assert_eq!(
        path,
        vec![
            vector![99.99, 100.0],
            vector![100.0, 99.99],
            vector![50.0, 100.0],
        ]
    );
}

#[test]
fn sneak_degenerate_is_single_noop() {
    let tray = square(100.0);
    let p = vector![0.0, 40.0];
    assert_eq!(planned(p, p, &tray), vec![p]);
}

#[test]
fn move_queue_drops_repeated_tail() {
    let tray = square(10.0);
    let mut q = MoveQueue::default();
    q.push(&tray, vector![0.0, 5.0]);
    q.push(&tray, vector![0.0, 5.0]);
    q.push(&tray, vector![10.0, 5.0]);
    assert_eq!(q.len(), 2);
    assert_eq!(q.peek(), Some(&vector![0.0, 5.0]));
    assert_eq!(q.pop(), Some(vector![0.0, 5.0]));
    assert_eq!(q.pop(), Some(vector![10.0, 5.0]));
    assert!(q.is_empty());
}

#[test]
#[should_panic(expected = "outside tray")]
fn move_queue_rejects_points_off_the_tray() {
    let tray = square(10.0);
    MoveQueue::default().push(&tray, vector![10.5, 0.0]);
}

#[test]
#[should_panic(expected = "phase may only advance")]
fn phase_cannot_go_back() {
    let mut s = PlanState::default();
    s.enter(Phase::Done);
    s.enter(Phase::Vertical);
}

#[test]
fn scheduler_rejects_unusable_inputs() {
    assert_eq!(
        EvenCutScheduler::new(square(100.0), 0).unwrap_err(),
        ScheduleError::NoRequests
    );
    assert!(matches!(
        EvenCutScheduler::new(square(1.0), 1_000_000),
        Err(ScheduleError::StripTooNarrow { .. })
    ));
    let s = EvenCutScheduler::new(Tray::new(100.0, 60.0).unwrap(), 4).unwrap();
    assert_eq!(s.strip(), vector![50.0, 30.0]);
}

#[test]
fn two_by_two_grid_schedule() {
    let cuts = even_cut_sequence(square(100.0), 4, vector![0.01, 0.0]).unwrap();
    assert_eq!(
        cuts,
        vec![
            vector![0.0, 50.0],
            vector![100.0, 50.0],
            vector![99.99, 100.0],
            vector![100.0, 99.99],
            vector![50.0, 100.0],
            vector![50.0, 0.0],
        ]
    );
}

#[test]
fn three_by_three_grid_schedule() {
    let cuts = even_cut_sequence(square(90.0), 9, vector![0.01, 0.0]).unwrap();
    assert_eq!(
        cuts,
        vec![
            vector![0.0, 30.0],
            vector![90.0, 30.0],
            vector![89.99, 90.0],
            vector![90.0, 60.0],
            vector![0.0, 60.0],
            vector![0.01, 90.0],
            vector![0.0, 89.99],
            vector![30.0, 90.0],
            vector![30.0, 0.0],
            vector![90.0, 0.01],
            vector![60.0, 0.0],
            vector![60.0, 90.0],
        ]
    );
}

#[test]
fn phases_only_advance_and_done_is_final() {
    let tray = square(90.0);
    let sched = EvenCutScheduler::new(tray, 9).unwrap();
    let mut state = PlanState::default();
    let mut pos = vector![0.01, 0.0];
    let mut seen = vec![state.phase];
    for turn in 2..200u32 {
        sched.schedule(&mut state, turn, pos);
        seen.push(state.phase);
        match state.queue.pop() {
            Some(p) => pos = p,
            None => break,
        }
    }
    assert!(seen.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(state.phase, Phase::Done);
    assert_eq!(state.direction, Direction::Left);
    for turn in 200..210 {
        sched.schedule(&mut state, turn, pos);
        assert!(state.queue.is_empty());
        assert_eq!(state.phase, Phase::Done);
    }
}

#[test]
fn schedule_waits_for_queued_moves() {
    let tray = square(100.0);
    let sched = EvenCutScheduler::new(tray, 4).unwrap();
    let mut state = PlanState::default();
    state.queue.push(&tray, vector![0.0, 10.0]);
    sched.schedule(&mut state, 7, vector![100.0, 50.0]);
    assert_eq!(state.queue.len(), 1);
    assert_eq!(state.phase, Phase::Horizontal);
}

fn boundary_point(edge: u8, t: f64, w: f64, l: f64) -> Vector2<f64> {
    match edge % 4 {
        0 => Vector2::new(t * w, 0.0),
        1 => Vector2::new(w, t * l),
        2 => Vector2::new(t * w, l),
        _ => Vector2::new(0.0, t * l),
    }
}

proptest! {
    #[test]
    fn sneak_paths_are_legal(
        w in 1u32..300,
        l in 1u32..300,
        e0 in 0u8..4,
        t0 in 0.0f64..=1.0,
        e1 in 0u8..4,
        t1 in 0.0f64..=1.0,
    ) {
        let (w, l) = (w as f64, l as f64);
        let tray = Tray::new(w, l).unwrap();
        let start = boundary_point(e0, t0, w, l);
        let end = boundary_point(e1, t1, w, l);
        prop_assume!(start != end);
        let path = planned(start, end, &tray);
        prop_assert_eq!(*path.last().unwrap(), end);
        prop_assert!(path.len() <= 5);
        let mut prev = start;
        for p in &path {
            prop_assert!(*p != prev, "repeated point {:?}", p);
            prop_assert!(tray.on_boundary(*p), "off-boundary point {:?}", p);
            prev = *p;
        }
    }

    #[test]
    fn offline_schedule_stays_on_boundary(
        w in 10u32..300,
        l in 10u32..300,
        n in 1usize..60,
    ) {
        let tray = Tray::new(w as f64, l as f64).unwrap();
        let init = vector![0.01, 0.0];
        let cuts = even_cut_sequence(tray, n, init).unwrap();
        prop_assert!(cuts.len() >= 2);
        let mut prev = init;
        for p in &cuts {
            prop_assert!(*p != prev);
            prop_assert!(tray.on_boundary(*p), "off-boundary cut {:?}", p);
            prev = *p;
        }
    }
}
