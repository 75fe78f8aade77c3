/*!
Command handlers for the CLI

Each handler builds the view model for one screen, drives it once and
renders the result:

- `account`     -- login, admin login, registration, profile, logout
- `workouts`    -- the member workout screen
- `members`     -- the admin dashboard
- `info`        -- membership tiers, diet plans and trainer plans

Handlers share an [`AppContext`] holding the API client and the session
store, so every view model receives the same injected dependencies.
*/

use std::sync::Arc;

use colored::Colorize;

use crate::api::{GymApi, HttpApiClient};
use crate::config::{Config, SessionBackend};
use crate::error::{FittrackError, Result};
use crate::store::{KeyringStore, MemoryStore, SecureStore, SessionStore};
use crate::viewmodel::{LoadOutcome, Submission};

// Member workout screen
pub mod workouts;

// Admin dashboard
pub mod members;

/// Dependencies shared by all command handlers
#[derive(Clone)]
pub struct AppContext {
    pub api: Arc<dyn GymApi>,
    pub session: SessionStore,
}

impl AppContext {
    /// Builds the HTTP client and the configured session backend.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be constructed
    pub fn from_config(config: &Config) -> Result<Self> {
        let api = HttpApiClient::new(&config.api)?;
        let backend: Arc<dyn SecureStore> = match config.session.backend {
            SessionBackend::Keyring => Arc::new(KeyringStore::new(&config.session.service)),
            SessionBackend::Memory => {
                tracing::warn!("Using in-memory session store; sign-in will not persist");
                Arc::new(MemoryStore::new())
            }
        };
        tracing::debug!(base_url = %api.base_url(), "Application context ready");
        Ok(Self {
            api: Arc::new(api),
            session: SessionStore::new(backend),
        })
    }
}

/// Unwraps a submission; single-shot CLI runs only ever complete.
pub(crate) fn completed<T>(submission: Submission<T>, action: &str) -> Result<T> {
    match submission {
        Submission::Completed(value) => Ok(value),
        Submission::Suppressed => Err(anyhow::anyhow!("{} is already in progress", action)),
        Submission::Discarded => Err(anyhow::anyhow!("{} was cancelled", action)),
    }
}

/// Turns a non-ready load into an error.
pub(crate) fn loaded(outcome: LoadOutcome) -> Result<()> {
    match outcome {
        LoadOutcome::Ready => Ok(()),
        LoadOutcome::Failed(e) => Err(anyhow::Error::from(e)),
        LoadOutcome::AlreadyLoading => Err(anyhow::anyhow!("A refresh is already running")),
        LoadOutcome::Discarded => Err(anyhow::anyhow!("Screen closed before data arrived")),
    }
}

/// Title and message for the blocking error notice.
///
/// Client errors use their own title and the server's message verbatim;
/// anything else is reported as a generic error.
pub fn error_notice(error: &anyhow::Error) -> (&'static str, String) {
    if let Some(e) = error.downcast_ref::<FittrackError>() {
        return (e.title(), e.user_message());
    }
    if let Some(e) = error.downcast_ref::<Arc<FittrackError>>() {
        return (e.title(), e.user_message());
    }
    ("Error", format!("{:#}", error))
}

/// Prints the blocking error notice to stderr.
pub fn print_error(error: &anyhow::Error) {
    let (title, message) = error_notice(error);
    eprintln!("{} {}", format!("{}:", title).red().bold(), message);
}

pub(crate) fn print_success(message: &str) {
    println!("{}", message.green());
}

// Account commands
pub mod account {
    //! Login, admin login, registration, profile and logout.

    use super::*;
    use crate::api::RegistrationForm;
    use crate::viewmodel::{
        AdminLoginViewModel, LoginViewModel, ProfileEdit, ProfileViewModel, RegisterViewModel,
    };
    use prettytable::{format, Table};

    /// Sign a member in and persist the session
    pub async fn login(ctx: &AppContext, phone: &str, password: &str) -> Result<()> {
        let vm = LoginViewModel::new(ctx.api.clone(), ctx.session.clone());
        let session = completed(vm.submit(phone, password).await?, "Login")?;
        print_success(&format!("Welcome back, {}!", session.display_name()));
        Ok(())
    }

    /// Sign an admin in
    pub async fn admin_login(ctx: &AppContext, mobile: &str, password: &str) -> Result<()> {
        let vm = AdminLoginViewModel::new(ctx.api.clone(), ctx.session.clone());
        completed(vm.submit(mobile, password).await?, "Admin login")?;
        print_success("Admin signed in.");
        Ok(())
    }

    /// Create an account and sign in
    pub async fn register(ctx: &AppContext, form: RegistrationForm) -> Result<()> {
        let vm = RegisterViewModel::new(ctx.api.clone(), ctx.session.clone());
        let session = completed(vm.submit(&form).await?, "Registration")?;
        print_success(&format!(
            "Account created. Welcome, {}!",
            session.display_name()
        ));
        Ok(())
    }

    /// Print the stored profile
    pub async fn show_profile(ctx: &AppContext) -> Result<()> {
        let vm = ProfileViewModel::new(ctx.session.clone());
        loaded(vm.load().await)?;
        let Some(profile) = vm.profile() else {
            println!("{}", "Not signed in. Use `fittrack login` first.".yellow());
            return Ok(());
        };

        let optional = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());
        let number = |v: Option<f64>, unit: &str| {
            v.map(|n| format!("{} {}", n, unit))
                .unwrap_or_else(|| "-".to_string())
        };

        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
        table.add_row(prettytable::row!["Name".bold(), profile.display_name()]);
        table.add_row(prettytable::row!["Phone".bold(), &profile.phone]);
        table.add_row(prettytable::row!["Height".bold(), number(profile.height, "cm")]);
        table.add_row(prettytable::row!["Weight".bold(), number(profile.weight, "kg")]);
        table.add_row(prettytable::row![
            "BMI".bold(),
            profile
                .bmi()
                .map(|b| format!("{:.1}", b))
                .unwrap_or_else(|| "-".to_string())
        ]);
        table.add_row(prettytable::row!["Gender".bold(), optional(&profile.gender)]);
        table.add_row(prettytable::row!["Goal".bold(), optional(&profile.fitness_goal)]);
        table.add_row(prettytable::row![
            "Membership".bold(),
            optional(&profile.membership_type)
        ]);

        println!("\nProfile:");
        table.printstd();
        println!();
        Ok(())
    }

    /// Apply profile changes
    pub async fn edit_profile(ctx: &AppContext, edit: ProfileEdit) -> Result<()> {
        let vm = ProfileViewModel::new(ctx.session.clone());
        completed(vm.save(&edit).await?, "Profile update")?;
        print_success("Profile updated.");
        Ok(())
    }

    /// Forget the stored session
    pub fn logout(ctx: &AppContext) -> Result<()> {
        let vm = ProfileViewModel::new(ctx.session.clone());
        vm.logout()?;
        ctx.session.clear_admin()?;
        print_success("Signed out.");
        Ok(())
    }
}

// Static catalogs
pub mod info {
    //! Membership tiers, diet plans and trainer plans.

    use super::*;
    use crate::catalog::{diet_goals, diet_plan, MEMBERSHIP_TIERS};
    use crate::viewmodel::TrainerViewModel;
    use prettytable::{format, Table};

    /// Print a random workout plan for the signed-in member
    pub fn trainer(ctx: &AppContext) -> Result<()> {
        let vm = TrainerViewModel::new(ctx.session.clone());
        let plan = vm.generate()?;

        println!("\n{} {}", "Your Workout Plan:".bold(), plan.name.green());
        for (i, step) in plan.steps.iter().enumerate() {
            println!("  {}. {}", i + 1, step);
        }
        println!();
        Ok(())
    }

    /// Print the membership tiers
    pub fn memberships() -> Result<()> {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.add_row(prettytable::row![
            "Plan".bold(),
            "Price".bold(),
            "Benefits".bold()
        ]);
        for tier in MEMBERSHIP_TIERS.iter() {
            table.add_row(prettytable::row![
                tier.title.cyan(),
                tier.price,
                tier.benefits.join("\n")
            ]);
        }
        println!("\nMembership Plans:");
        table.printstd();
        println!();
        Ok(())
    }

    /// Print the weekly diet plan for `goal`, or for the signed-in member's
    /// goal when none is given
    pub fn diet(ctx: &AppContext, goal: Option<String>) -> Result<()> {
        let goal = match goal {
            Some(g) => g,
            None => ctx
                .session
                .load()?
                .and_then(|s| s.fitness_goal)
                .ok_or_else(|| {
                    FittrackError::Validation(
                        "No fitness goal on file. Pass --goal to choose one.".to_string(),
                    )
                })?,
        };

        let Some(plan) = diet_plan(&goal) else {
            let known: Vec<_> = diet_goals().collect();
            return Err(FittrackError::NotFound(format!(
                "No diet plan for goal '{}'. Available: {}",
                goal,
                known.join(", ")
            ))
            .into());
        };

        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
        table.add_row(prettytable::row![
            "Day".bold(),
            "Meal".bold(),
            "Description".bold(),
            "Calories".bold()
        ]);
        for day in &plan.days {
            for (i, meal) in day.meals.iter().enumerate() {
                let label = if i == 0 { day.day } else { "" };
                table.add_row(prettytable::row![label.cyan(), meal.name, meal.description, meal.calories]);
            }
            table.add_row(prettytable::row![
                "",
                "",
                "Daily total".italic(),
                day.total_calories().to_string().bold()
            ]);
        }

        println!("\nWeekly Diet Plan: {}", plan.goal.green());
        table.printstd();
        println!();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_notice_uses_client_title_and_message() {
        let err = anyhow::Error::from(FittrackError::Authentication(
            "Invalid credentials".to_string(),
        ));
        assert_eq!(
            error_notice(&err),
            ("Login Failed", "Invalid credentials".to_string())
        );
    }

    #[test]
    fn test_error_notice_for_failed_load() {
        let outcome = LoadOutcome::Failed(Arc::new(FittrackError::Network(
            "Network error. Please try again.".to_string(),
        )));
        let err = loaded(outcome).unwrap_err();
        let (title, message) = error_notice(&err);
        assert_eq!(title, "Network Error");
        assert_eq!(message, "Network error. Please try again.");
    }

    #[test]
    fn test_error_notice_for_plain_error() {
        let err = anyhow::anyhow!("boom");
        assert_eq!(error_notice(&err), ("Error", "boom".to_string()));
    }

    #[test]
    fn test_completed_rejects_suppressed() {
        assert_eq!(completed(Submission::Completed(3), "x").unwrap(), 3);
        assert!(completed::<()>(Submission::Suppressed, "Login").is_err());
    }

    #[test]
    fn test_trainer_without_session_needs_login() {
        let mut config = Config::default();
        config.session.backend = SessionBackend::Memory;
        let ctx = AppContext::from_config(&config).unwrap();

        let err = info::trainer(&ctx).unwrap_err();
        assert_eq!(
            error_notice(&err),
            (
                "Login Required",
                "Please log in to access workout plans.".to_string()
            )
        );
    }

    #[test]
    fn test_from_config_with_memory_backend() {
        let mut config = Config::default();
        config.session.backend = SessionBackend::Memory;
        let ctx = AppContext::from_config(&config).unwrap();
        assert!(ctx.session.load().unwrap().is_none());
    }
}
