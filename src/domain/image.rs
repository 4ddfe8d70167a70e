//! Image load lifecycle: Loading -> Loaded | Failed, re-entered only by reload

use std::fmt;
use std::path::PathBuf;

use tracing::{debug, info, warn};

use super::error::ResourceLoadFailure;
use super::observe::Observable;

/// Where an image comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Remote resource fetched over HTTP(S)
    Remote(String),
    /// Asset bundled with the app, resolved against the asset directory
    Bundled(PathBuf),
}

impl ImageSource {
    /// `http://` and `https://` locators are remote, everything else is a bundled path
    pub fn parse(locator: &str) -> Self {
        let trimmed = locator.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            ImageSource::Remote(trimmed.to_string())
        } else {
            ImageSource::Bundled(PathBuf::from(trimmed))
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, ImageSource::Remote(_))
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSource::Remote(url) => f.write_str(url),
            ImageSource::Bundled(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Loading,
    Loaded,
    Failed,
}

/// Phase plus the error of the last failed attempt.
///
/// `last_error` is present exactly when the phase is `Failed`; the fields are
/// private so that only the transitions below can produce a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageLoadState {
    phase: LoadPhase,
    last_error: Option<String>,
}

impl Default for ImageLoadState {
    fn default() -> Self {
        Self::loading()
    }
}

impl ImageLoadState {
    fn loading() -> Self {
        Self {
            phase: LoadPhase::Loading,
            last_error: None,
        }
    }

    fn loaded() -> Self {
        Self {
            phase: LoadPhase::Loaded,
            last_error: None,
        }
    }

    fn failed(reason: String) -> Self {
        Self {
            phase: LoadPhase::Failed,
            last_error: Some(reason),
        }
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn failure(&self) -> Option<ResourceLoadFailure> {
        self.last_error.clone().map(ResourceLoadFailure::new)
    }

    /// What the rendering layer shows for this state
    pub fn presentation(&self) -> ImagePresentation {
        match self.phase {
            LoadPhase::Loading => ImagePresentation {
                show_indicator: true,
                show_image: false,
                show_error: false,
            },
            LoadPhase::Loaded => ImagePresentation {
                show_indicator: false,
                show_image: true,
                show_error: false,
            },
            LoadPhase::Failed => ImagePresentation {
                show_indicator: false,
                show_image: false,
                show_error: true,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImagePresentation {
    pub show_indicator: bool,
    pub show_image: bool,
    /// Error block with the fallback placeholder
    pub show_error: bool,
}

/// Signals emitted by the image resource collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageEvent {
    LoadStarted,
    LoadSucceeded,
    LoadFailed(String),
}

/// Pure transition function. `None` means the event is a no-op in `state`.
pub fn transition(state: &ImageLoadState, event: &ImageEvent) -> Option<ImageLoadState> {
    match (state.phase, event) {
        (_, ImageEvent::LoadStarted) => Some(ImageLoadState::loading()),
        (LoadPhase::Loading, ImageEvent::LoadSucceeded) => Some(ImageLoadState::loaded()),
        (LoadPhase::Loading, ImageEvent::LoadFailed(reason)) => {
            Some(ImageLoadState::failed(reason.clone()))
        }
        // Late delivery from a superseded attempt
        (LoadPhase::Loaded | LoadPhase::Failed, _) => None,
    }
}

/// Owns the load state of one image-bearing view
#[derive(Debug)]
pub struct ImageLoadController {
    label: String,
    state: Observable<ImageLoadState>,
}

impl ImageLoadController {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            state: Observable::default(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Apply one signal. Returns `false` when it was dropped as out-of-order.
    pub fn handle(&mut self, event: ImageEvent) -> bool {
        let next = transition(&self.state.borrow(), &event);
        let Some(next) = next else {
            debug!(image = %self.label, ?event, "ignoring out-of-order image signal");
            return false;
        };

        match next.phase() {
            LoadPhase::Loading => info!(image = %self.label, "loading image"),
            LoadPhase::Loaded => info!(image = %self.label, "image loaded"),
            LoadPhase::Failed => warn!(
                image = %self.label,
                reason = next.last_error().unwrap_or_default(),
                "image failed to load"
            ),
        }

        self.state.update(|current| {
            if *current == next {
                return false;
            }
            *current = next;
            true
        });
        true
    }

    pub fn on_load_start(&mut self) -> bool {
        self.handle(ImageEvent::LoadStarted)
    }

    pub fn on_load_success(&mut self) -> bool {
        self.handle(ImageEvent::LoadSucceeded)
    }

    pub fn on_load_failure(&mut self, reason: impl Into<String>) -> bool {
        self.handle(ImageEvent::LoadFailed(reason.into()))
    }

    /// Explicit external reload request
    pub fn reload(&mut self) -> bool {
        self.on_load_start()
    }

    pub fn phase(&self) -> LoadPhase {
        self.state.borrow().phase()
    }

    pub fn last_error(&self) -> Option<String> {
        self.state.borrow().last_error.clone()
    }

    pub fn snapshot(&self) -> ImageLoadState {
        self.state.snapshot()
    }

    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<ImageLoadState> {
        self.state.subscribe()
    }

    pub fn presentation(&self) -> ImagePresentation {
        self.state.borrow().presentation()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_source() {
        assert_eq!(
            ImageSource::parse("https://reactnative.dev/img/tiny_logo.png"),
            ImageSource::Remote("https://reactnative.dev/img/tiny_logo.png".to_string())
        );
        assert_eq!(
            ImageSource::parse(" ./logo.png "),
            ImageSource::Bundled(PathBuf::from("./logo.png"))
        );
        assert!(ImageSource::parse("HTTP://example.com/a.png").is_remote());
    }

    #[test]
    fn test_reload_clears_error() {
        let mut ctl = ImageLoadController::new("logo");
        ctl.on_load_failure("404");
        assert_eq!(ctl.last_error().as_deref(), Some("404"));

        assert!(ctl.reload());
        assert_eq!(ctl.phase(), LoadPhase::Loading);
        assert_eq!(ctl.last_error(), None);
    }

    #[test]
    fn test_failure_only_in_failed_phase() {
        let mut ctl = ImageLoadController::new("logo");
        assert_eq!(ctl.snapshot().failure(), None);
        ctl.on_load_failure("timeout");
        assert_eq!(
            ctl.snapshot().failure(),
            Some(ResourceLoadFailure::new("timeout"))
        );
        ctl.reload();
        assert_eq!(ctl.snapshot().failure(), None);
    }

    #[test]
    fn test_presentation_per_phase() {
        let mut ctl = ImageLoadController::new("logo");
        assert!(ctl.presentation().show_indicator);
        assert!(!ctl.presentation().show_image);

        ctl.on_load_success();
        let shown = ctl.presentation();
        assert!(shown.show_image && !shown.show_indicator && !shown.show_error);

        ctl.reload();
        ctl.on_load_failure("boom");
        let failed = ctl.presentation();
        assert!(failed.show_error && !failed.show_image && !failed.show_indicator);
    }
}
