//! UI Components
//!
//! Reusable Leptos components shared by the pages.

pub mod clock;
pub mod header;
pub mod loading;
pub mod login_form;
pub mod profile_dropdown;
pub mod progress_bar;
pub mod toast;

pub use clock::Clock;
pub use header::Header;
pub use loading::InlineLoading;
pub use login_form::LoginForm;
pub use profile_dropdown::ProfileDropdown;
pub use progress_bar::ProgressBar;
pub use toast::Toast;
