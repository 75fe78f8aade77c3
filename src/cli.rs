//! Command-line interface definition for FitTrack
//!
//! This module defines the CLI structure using clap's derive API. Each
//! subcommand drives one screen's view model.

use clap::{Parser, Subcommand};

/// FitTrack - gym membership and workout tracker
///
/// Sign in as a member to log workouts, or as an admin to manage members.
#[derive(Parser, Debug, Clone)]
#[command(name = "fittrack")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Override the backend base URL from config
    #[arg(long)]
    pub base_url: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for FitTrack
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Sign in as a member
    Login {
        /// Registered phone number
        #[arg(short, long)]
        phone: String,

        /// Account password
        #[arg(short = 'P', long, env = "FITTRACK_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Sign in as a gym admin
    AdminLogin {
        /// Admin mobile number
        #[arg(short, long)]
        mobile: String,

        /// Admin password
        #[arg(short = 'P', long, env = "FITTRACK_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create a member account and sign in
    Register {
        #[arg(long)]
        name: String,

        #[arg(long)]
        phone: String,

        #[arg(short = 'P', long, env = "FITTRACK_PASSWORD", hide_env_values = true)]
        password: String,

        /// Height in centimetres
        #[arg(long)]
        height: String,

        /// Weight in kilograms
        #[arg(long)]
        weight: String,

        /// Fitness goal (Weight Loss, Muscle Gain, Endurance, Flexibility, Overall Fitness)
        #[arg(long)]
        goal: String,
    },

    /// Show or edit the signed-in profile
    Profile {
        #[command(subcommand)]
        command: Option<ProfileCommand>,
    },

    /// Sign out and forget the stored session
    Logout,

    /// Log and review your workouts
    Workouts {
        #[command(subcommand)]
        command: WorkoutCommand,
    },

    /// Admin member management
    Members {
        #[command(subcommand)]
        command: MemberCommand,
    },

    /// Show membership tiers
    Memberships,

    /// Get a random workout plan from the trainer
    Trainer,

    /// Show the weekly diet plan for a fitness goal
    Diet {
        /// Goal to show; defaults to the signed-in member's goal
        #[arg(short, long)]
        goal: Option<String>,
    },
}

/// Profile subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ProfileCommand {
    /// Show the stored profile
    Show,

    /// Change profile fields; omitted fields keep their value
    Edit {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        height: Option<f64>,

        #[arg(long)]
        weight: Option<f64>,

        #[arg(long)]
        gender: Option<String>,

        #[arg(long)]
        goal: Option<String>,

        #[arg(long)]
        membership: Option<String>,
    },
}

/// Workout subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum WorkoutCommand {
    /// Show today's workouts and the history
    List {
        /// History filter: "all" or a workout type
        #[arg(short, long, default_value = "all")]
        filter: String,

        /// History date order (asc, desc)
        #[arg(short, long, default_value = "desc")]
        order: String,
    },

    /// Log a workout
    Add {
        /// Workout type, e.g. Cardio
        #[arg(short = 't', long = "type")]
        workout_type: String,

        /// What you did, e.g. "5k run"
        #[arg(short, long)]
        name: String,

        /// Duration in minutes
        #[arg(short, long)]
        duration: u32,

        /// Day of the workout (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date: Option<String>,
    },
}

/// Admin member subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum MemberCommand {
    /// List members
    List {
        /// Case-insensitive match on name or membership type
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Add a member
    Add {
        #[arg(long)]
        name: String,

        /// Contact phone number
        #[arg(long)]
        phone: String,

        /// Membership tier; defaults to Basic
        #[arg(short, long, default_value = "Basic")]
        membership: String,
    },

    /// Delete a member
    Delete {
        /// Member id
        id: String,
    },

    /// Log a workout for a member
    AddWorkout {
        /// Member id
        id: String,

        #[arg(short = 't', long = "type")]
        workout_type: String,

        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        duration: u32,

        #[arg(long)]
        date: Option<String>,
    },

    /// Show member statistics
    Stats,

    /// List fitness classes
    Classes,

    /// Schedule a fitness class
    AddClass {
        #[arg(long)]
        name: String,

        #[arg(long)]
        instructor: String,

        /// When it runs, e.g. "Mon/Wed 6 AM"
        #[arg(long)]
        schedule: String,

        /// Maximum attendees
        #[arg(long)]
        capacity: Option<String>,

        /// beginner, intermediate or advanced
        #[arg(long, default_value = "beginner")]
        difficulty: String,
    },
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            verbose: false,
            base_url: None,
            command: Commands::Memberships,
        }
    }
}
