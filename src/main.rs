//! FitTrack - gym membership and workout tracker CLI
//!
#![doc = "Main entry point for the FitTrack client."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fittrack::api::{MemberForm, RegistrationForm};
use fittrack::catalog::ClassForm;
use fittrack::cli::{Cli, Commands, MemberCommand, ProfileCommand, WorkoutCommand};
use fittrack::commands::{self, account, info, members, workouts, AppContext};
use fittrack::config::Config;
use fittrack::viewmodel::ProfileEdit;

#[tokio::main]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        tracing::debug!("Command failed: {:#}", e);
        commands::print_error(&e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    let ctx = AppContext::from_config(&config)?;

    // Execute command
    match cli.command {
        Commands::Login { phone, password } => {
            tracing::info!("Signing in {}", phone);
            account::login(&ctx, &phone, &password).await
        }
        Commands::AdminLogin { mobile, password } => {
            tracing::info!("Signing in admin {}", mobile);
            account::admin_login(&ctx, &mobile, &password).await
        }
        Commands::Register {
            name,
            phone,
            password,
            height,
            weight,
            goal,
        } => {
            let form = RegistrationForm {
                name,
                phone,
                password,
                height,
                weight,
                goal,
            };
            account::register(&ctx, form).await
        }
        Commands::Profile { command } => match command.unwrap_or(ProfileCommand::Show) {
            ProfileCommand::Show => account::show_profile(&ctx).await,
            ProfileCommand::Edit {
                name,
                phone,
                height,
                weight,
                gender,
                goal,
                membership,
            } => {
                let edit = ProfileEdit {
                    name,
                    phone,
                    height,
                    weight,
                    gender,
                    fitness_goal: goal,
                    membership_type: membership,
                };
                account::edit_profile(&ctx, edit).await
            }
        },
        Commands::Logout => account::logout(&ctx),
        Commands::Workouts { command } => match command {
            WorkoutCommand::List { filter, order } => workouts::list(&ctx, &filter, &order).await,
            WorkoutCommand::Add {
                workout_type,
                name,
                duration,
                date,
            } => workouts::add(&ctx, workout_type, name, duration, date).await,
        },
        Commands::Members { command } => match command {
            MemberCommand::List { search } => members::list(&ctx, search).await,
            MemberCommand::Add {
                name,
                phone,
                membership,
            } => {
                let form = MemberForm {
                    name,
                    contact: phone,
                    membership_type: membership,
                };
                members::add(&ctx, form).await
            }
            MemberCommand::Delete { id } => members::delete(&ctx, &id).await,
            MemberCommand::AddWorkout {
                id,
                workout_type,
                name,
                duration,
                date,
            } => members::add_workout(&ctx, &id, workout_type, name, duration, date).await,
            MemberCommand::Stats => members::stats(&ctx).await,
            MemberCommand::Classes => members::classes(&ctx),
            MemberCommand::AddClass {
                name,
                instructor,
                schedule,
                capacity,
                difficulty,
            } => {
                let form = ClassForm {
                    name,
                    instructor,
                    schedule,
                    capacity: capacity.unwrap_or_default(),
                    difficulty,
                };
                members::add_class(&ctx, form)
            }
        },
        Commands::Memberships => info::memberships(),
        Commands::Trainer => info::trainer(&ctx),
        Commands::Diet { goal } => info::diet(&ctx, goal),
    }
}

/// Initialize tracing subscriber with environment filter
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "fittrack=debug"
    } else {
        "fittrack=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
