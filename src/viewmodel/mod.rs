//! Per-screen view models
//!
//! Each screen owns one view model holding its load state, derived views and
//! mutation guards. View models receive the [`GymApi`](crate::api::GymApi)
//! and the [`SessionStore`](crate::store::SessionStore) they use; none of
//! them reach for global state.
//!
//! - [`state`] -- the `Idle -> Loading -> Ready | Failed` machine and guards
//! - [`clock`] -- where "today" comes from
//! - [`login`], [`register`], [`profile`] -- member account screens
//! - [`admin`] -- the admin dashboard
//! - [`workout`] -- the member workout screen
//! - [`trainer`] -- random trainer workout plans

pub mod admin;
pub mod clock;
pub mod login;
pub mod profile;
pub mod register;
pub mod state;
pub mod trainer;
pub mod workout;

pub use admin::AdminDashboardViewModel;
pub use clock::{Clock, FixedClock, SystemClock};
pub use login::{AdminLoginViewModel, LoginViewModel};
pub use profile::{ProfileEdit, ProfileViewModel};
pub use register::RegisterViewModel;
pub use state::{ActionGuard, LoadOutcome, Loadable, Mount, Phase, Screen, Submission};
pub use trainer::TrainerViewModel;
pub use workout::{HistoryCriteria, WorkoutViewModel};
