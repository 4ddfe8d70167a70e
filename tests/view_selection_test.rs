//! Section selection over the fundamentals keys

use showcase::domain::{SelectionError, SelectionKey, ViewMap, ViewSelection};
use showcase::modules::fundamentals::{FundamentalsState, Section};

#[test]
fn test_basics_then_lists_then_unknown() {
    let props = FundamentalsState::default();
    let mut selection: ViewSelection<Section> = ViewSelection::new();
    assert_eq!(selection.active().key(), "basics");

    selection.select("lists").unwrap();
    assert_eq!(selection.current_view(&props).title, "Lists & Data");

    let err = selection.select("nonexistent").unwrap_err();
    assert_eq!(err, SelectionError::InvalidSelection("nonexistent".into()));
    assert_eq!(selection.active(), Section::Lists);
    assert_eq!(selection.current_view(&props).title, "Lists & Data");
}

#[test]
fn test_every_key_renders_its_own_view() {
    let props = FundamentalsState {
        counter: 7,
        text: "typed".into(),
        ..Default::default()
    };
    let mut selection: ViewSelection<Section> = ViewSelection::new();
    for section in Section::ALL {
        selection.select(section.key()).unwrap();
        assert_eq!(selection.active(), *section);
        assert_eq!(selection.current_view(&props), (section.producer())(&props));
    }
}

#[test]
fn test_keys_are_case_insensitive_and_trimmed() {
    let mut selection: ViewSelection<Section> = ViewSelection::new();
    assert_eq!(selection.select(" Advanced ").unwrap(), Section::Advanced);
}

#[test]
fn test_cycle_wraps() {
    let mut selection: ViewSelection<Section> = ViewSelection::new();
    assert_eq!(selection.cycle(false), Section::Advanced);
    assert_eq!(selection.cycle(true), Section::Basics);
    assert!(selection.select_index(4).is_err());
    assert_eq!(selection.active(), Section::Basics);
}
