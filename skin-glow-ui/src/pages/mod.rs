//! Pages
//!
//! Routed pages and the dashboard tabs.

pub mod actives;
pub mod analysis;
pub mod home;
pub mod profile;
pub mod progress;
pub mod routine;
pub mod settings;

pub use actives::ActivesTab;
pub use analysis::AnalysisTab;
pub use home::Home;
pub use profile::Profile;
pub use progress::ProgressTab;
pub use routine::RoutineTab;
pub use settings::AccountSettings;
