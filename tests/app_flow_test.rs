//! App-level flows driven through keys and worker settlements

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use showcase::app::{App, Overlay, Request, Screen};
use showcase::config::Config;
use showcase::core::NotifyLevel;
use showcase::domain::{FetchError, ImageEvent, LoadPhase, LoadTicket, Settlement};
use showcase::infrastructure::source::mock_batch;
use showcase::modules::fundamentals::Section;

fn press(app: &mut App, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
}

fn type_command(app: &mut App, command: &str) {
    press(app, KeyCode::Char(':'));
    for c in command.chars() {
        press(app, KeyCode::Char(c));
    }
    press(app, KeyCode::Enter);
}

/// Booted app with the dashboard on screen; returns the initial fetch
fn booted() -> (App, u64, LoadTicket) {
    let mut app = App::new(Config::default());
    app.boot();
    let fetch = app
        .take_requests()
        .into_iter()
        .find_map(|request| match request {
            Request::FetchDashboard { mount, ticket } => Some((mount, ticket)),
            _ => None,
        })
        .expect("boot issues a dashboard fetch");
    press(&mut app, KeyCode::F(3));
    (app, fetch.0, fetch.1)
}

fn dashboard_len(app: &App) -> Option<usize> {
    app.dashboard.as_ref().map(|d| d.collection().len())
}

fn top_confirm_title(app: &App) -> Option<String> {
    match app.top_overlay() {
        Some(Overlay::Confirm { pending, .. }) => Some(pending.dialog().title.clone()),
        _ => None,
    }
}

#[test]
fn test_boot_requests_dashboard_and_every_image() {
    let config = Config::default();
    let image_count = config.images.len();
    let mut app = App::new(config);
    app.boot();

    let requests = app.take_requests();
    let fetches = requests
        .iter()
        .filter(|r| matches!(r, Request::FetchDashboard { .. }))
        .count();
    let images = requests
        .iter()
        .filter(|r| matches!(r, Request::LoadImage(_)))
        .count();
    assert_eq!(fetches, 1);
    assert_eq!(images, image_count);
    assert!(app.take_requests().is_empty());
    assert!(app.dashboard.as_ref().unwrap().collection().is_refreshing());
}

#[test]
fn test_settlement_fills_dashboard() {
    let (mut app, mount, ticket) = booted();
    let settlement = app.apply_dashboard_settled(mount, ticket, Ok(mock_batch()));
    assert_eq!(settlement, Some(Settlement::Replaced { count: 4 }));
    assert_eq!(dashboard_len(&app), Some(4));
    assert!(!app.dashboard.as_ref().unwrap().collection().is_refreshing());
}

#[test]
fn test_refresh_while_loading_is_coalesced() {
    let (mut app, mount, ticket) = booted();
    press(&mut app, KeyCode::Char('r'));
    assert!(app.take_requests().is_empty());

    app.apply_dashboard_settled(mount, ticket, Ok(mock_batch()));
    press(&mut app, KeyCode::Char('r'));
    assert!(matches!(
        app.take_requests().as_slice(),
        [Request::FetchDashboard { .. }]
    ));
}

#[test]
fn test_failed_fetch_raises_alert_and_keeps_items() {
    let (mut app, mount, ticket) = booted();
    app.apply_dashboard_settled(mount, ticket, Ok(mock_batch()));

    press(&mut app, KeyCode::Char('r'));
    let Some(Request::FetchDashboard { ticket, .. }) = app.take_requests().pop() else {
        panic!("refresh issues a fetch");
    };
    app.apply_dashboard_settled(mount, ticket, Err(FetchError::Failed("boom".into())));

    match app.top_overlay() {
        Some(Overlay::Alert { title, body }) => {
            assert_eq!(title, "Error");
            assert_eq!(body, "Failed to load dashboard data");
        }
        other => panic!("unexpected overlay {other:?}"),
    }
    assert_eq!(dashboard_len(&app), Some(4));

    press(&mut app, KeyCode::Enter);
    assert!(app.top_overlay().is_none());
}

#[test]
fn test_inline_sign_out_confirmed() {
    let (mut app, mount, ticket) = booted();
    press(&mut app, KeyCode::Char('x'));
    assert_eq!(top_confirm_title(&app).as_deref(), Some("Sign Out"));

    press(&mut app, KeyCode::Char('y'));
    assert!(app.top_overlay().is_none());
    assert!(!app.is_signed_in());

    // The fetch started before sign-out settles against nothing
    assert_eq!(app.apply_dashboard_settled(mount, ticket, Ok(mock_batch())), None);
    assert!(app.dashboard.is_none());
}

#[test]
fn test_sign_out_focus_defaults_to_cancel() {
    let (mut app, _, _) = booted();
    press(&mut app, KeyCode::Char('x'));
    press(&mut app, KeyCode::Enter);
    assert!(app.top_overlay().is_none());
    assert!(app.is_signed_in());

    press(&mut app, KeyCode::Char('x'));
    press(&mut app, KeyCode::Right);
    press(&mut app, KeyCode::Enter);
    assert!(!app.is_signed_in());
}

#[test]
fn test_sign_out_dismissed_or_cancelled() {
    for key in [KeyCode::Esc, KeyCode::Char('n')] {
        let (mut app, _, _) = booted();
        press(&mut app, KeyCode::Char('x'));
        press(&mut app, key);
        assert!(app.top_overlay().is_none());
        assert!(app.is_signed_in());
    }
}

#[test]
fn test_sheet_asks_twice() {
    let (mut app, _, _) = booted();
    press(&mut app, KeyCode::Char('X'));
    match app.top_overlay() {
        Some(Overlay::Confirm { pending, .. }) => {
            assert!(pending.dialog().body.contains("demo's account"));
        }
        other => panic!("unexpected overlay {other:?}"),
    }

    press(&mut app, KeyCode::Char('y'));
    assert_eq!(top_confirm_title(&app).as_deref(), Some("Confirm Sign Out"));
    assert!(app.is_signed_in());

    press(&mut app, KeyCode::Char('y'));
    assert!(app.top_overlay().is_none());
    assert!(!app.is_signed_in());
}

#[test]
fn test_sign_in_mounts_fresh_dashboard() {
    let (mut app, old_mount, old_ticket) = booted();
    press(&mut app, KeyCode::Char('x'));
    press(&mut app, KeyCode::Char('y'));

    press(&mut app, KeyCode::Enter);
    assert!(app.is_signed_in());
    let Some(Request::FetchDashboard { mount, ticket }) = app.take_requests().pop() else {
        panic!("sign-in issues a fetch");
    };
    assert_ne!(mount, old_mount);
    assert_eq!(
        app.status_text(),
        Some(("Welcome back, demo!", NotifyLevel::Info))
    );

    assert_eq!(
        app.apply_dashboard_settled(old_mount, old_ticket, Ok(mock_batch())),
        None
    );
    assert_eq!(dashboard_len(&app), Some(0));

    app.apply_dashboard_settled(mount, ticket, Ok(mock_batch()));
    assert_eq!(dashboard_len(&app), Some(4));
}

#[test]
fn test_section_commands() {
    let mut app = App::new(Config::default());
    press(&mut app, KeyCode::F(2));

    type_command(&mut app, "tab lists");
    assert_eq!(app.active_screen(), Screen::Fundamentals);
    assert_eq!(app.fundamentals.active_section(), Section::Lists);

    type_command(&mut app, "tab nonexistent");
    assert_eq!(app.fundamentals.active_section(), Section::Lists);
    let (text, level) = app.status_text().unwrap();
    assert!(text.contains("nonexistent"));
    assert_eq!(level, NotifyLevel::Warn);
}

#[test]
fn test_unknown_command_notifies() {
    let mut app = App::new(Config::default());
    type_command(&mut app, "frobnicate");
    assert_eq!(
        app.status_text(),
        Some(("Unknown command: frobnicate", NotifyLevel::Warn))
    );
}

#[test]
fn test_image_reload_supersedes_old_attempt() {
    let mut app = App::new(Config::default());
    app.boot();
    app.take_requests();

    press(&mut app, KeyCode::F(2));
    press(&mut app, KeyCode::Char('r'));
    let Some(Request::LoadImage(request)) = app.take_requests().pop() else {
        panic!("reload issues an image load");
    };
    assert_eq!(request.slot, 0);
    assert_eq!(request.attempt, 2);

    assert!(!app.apply_image_signal(0, 1, ImageEvent::LoadFailed("late".into())));
    assert!(app.apply_image_signal(0, 2, ImageEvent::LoadSucceeded));
    assert_eq!(
        app.gallery.slot(0).unwrap().controller().phase(),
        LoadPhase::Loaded
    );
}

#[test]
fn test_loading_timer_uses_configured_delay() {
    let mut app = App::new(Config {
        loading_demo_ms: 500,
        ..Config::default()
    });
    type_command(&mut app, "tab advanced");
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Enter);
    assert_eq!(
        app.take_requests(),
        vec![Request::LoadingTimer(Duration::from_millis(500))]
    );
}
