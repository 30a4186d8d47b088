//! Reactive state behind the generic admin screens
//!
//! Each view model owns its signals and spawns its own requests; the markup
//! layer only reads the signals and calls the commands.

pub(crate) mod actions;
pub mod form;
pub mod list;
pub mod settings;
pub mod sortable;

pub use form::FormViewModel;
pub use list::CrudListViewModel;
pub use settings::SettingsViewModel;
pub use sortable::SortableListViewModel;
