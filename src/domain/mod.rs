//! Domain layer - UI state models, independent of any rendering technology
//!
//! - image: image load lifecycle controller
//! - selection: active tab/section over a fixed key set
//! - collection: dashboard items with an async refresh
//! - confirm: exactly-one-outcome confirmation dialog
//! - observe: snapshot + change stream shared by the models above

pub mod collection;
pub mod confirm;
pub mod error;
pub mod image;
pub mod observe;
pub mod selection;

pub use collection::{
    CollectionSnapshot, DashboardItem, DashboardSource, LoadTicket, RefreshableCollection,
    Settlement,
};
pub use confirm::{ConfirmDialog, ConfirmOutcome, PendingConfirm};
pub use error::{FetchError, ResourceLoadFailure, SelectionError};
pub use image::{
    ImageEvent, ImageLoadController, ImageLoadState, ImagePresentation, ImageSource, LoadPhase,
};
pub use observe::Observable;
pub use selection::{SelectionKey, ViewMap, ViewSelection};
