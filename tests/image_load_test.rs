//! Image load lifecycle: replayed signal sequences and the no-op rule

use showcase::domain::{ImageEvent, ImageLoadController, LoadPhase};

#[derive(Debug, Clone, Copy)]
enum Signal {
    Start,
    Success,
    Failure,
}

impl Signal {
    const ALL: [Signal; 3] = [Signal::Start, Signal::Success, Signal::Failure];

    fn event(self, step: usize) -> ImageEvent {
        match self {
            Signal::Start => ImageEvent::LoadStarted,
            Signal::Success => ImageEvent::LoadSucceeded,
            Signal::Failure => ImageEvent::LoadFailed(format!("error #{step}")),
        }
    }
}

/// Phase and error after the last transition the machine accepts
fn expected(sequence: &[Signal]) -> (LoadPhase, Option<String>) {
    let mut phase = LoadPhase::Loading;
    let mut error = None;
    for (step, signal) in sequence.iter().enumerate() {
        match (phase, signal) {
            (_, Signal::Start) => {
                phase = LoadPhase::Loading;
                error = None;
            }
            (LoadPhase::Loading, Signal::Success) => phase = LoadPhase::Loaded,
            (LoadPhase::Loading, Signal::Failure) => {
                phase = LoadPhase::Failed;
                error = Some(format!("error #{step}"));
            }
            _ => {}
        }
    }
    (phase, error)
}

fn sequences(len: usize) -> Vec<Vec<Signal>> {
    let mut out = vec![Vec::new()];
    for _ in 0..len {
        out = out
            .into_iter()
            .flat_map(|prefix| {
                Signal::ALL.iter().map(move |signal| {
                    let mut next = prefix.clone();
                    next.push(*signal);
                    next
                })
            })
            .collect();
    }
    out
}

#[test]
fn test_replay_matches_last_valid_transition() {
    for len in 0..=5 {
        for sequence in sequences(len) {
            let mut controller = ImageLoadController::new("probe");
            for (step, signal) in sequence.iter().enumerate() {
                controller.handle(signal.event(step));
            }
            let (phase, error) = expected(&sequence);
            assert_eq!(controller.phase(), phase, "sequence {sequence:?}");
            assert_eq!(controller.last_error(), error, "sequence {sequence:?}");
        }
    }
}

#[test]
fn test_outcomes_outside_loading_are_noops() {
    for settle in [ImageEvent::LoadSucceeded, ImageEvent::LoadFailed("first".into())] {
        let mut controller = ImageLoadController::new("probe");
        assert!(controller.handle(settle));
        let before = controller.snapshot();

        assert!(!controller.on_load_success());
        assert!(!controller.on_load_failure("late"));
        assert_eq!(controller.snapshot(), before);
    }
}

#[test]
fn test_failure_then_success_scenario() {
    let mut controller = ImageLoadController::new("Remote Image");
    assert_eq!(controller.phase(), LoadPhase::Loading);

    controller.on_load_failure("network");
    assert_eq!(controller.phase(), LoadPhase::Failed);
    assert_eq!(controller.last_error().as_deref(), Some("network"));

    controller.on_load_success();
    assert_eq!(controller.phase(), LoadPhase::Failed);
    assert_eq!(controller.last_error().as_deref(), Some("network"));
}

#[test]
fn test_reload_recovers_from_failure() {
    let mut controller = ImageLoadController::new("Local Image");
    controller.on_load_failure("missing");
    assert!(controller.presentation().show_error);

    assert!(controller.reload());
    assert!(controller.presentation().show_indicator);
    assert_eq!(controller.last_error(), None);

    controller.on_load_success();
    assert!(controller.presentation().show_image);
}

#[test]
fn test_subscribers_see_only_real_changes() {
    let mut controller = ImageLoadController::new("probe");
    let mut rx = controller.subscribe();

    controller.on_load_success();
    assert!(rx.has_changed().unwrap());
    assert_eq!(rx.borrow_and_update().phase(), LoadPhase::Loaded);

    controller.on_load_failure("late");
    assert!(!rx.has_changed().unwrap());
}
