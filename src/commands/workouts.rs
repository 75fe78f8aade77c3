//! Member workout screen commands: list today and history, log a workout

use colored::Colorize;
use prettytable::{format, Table};
use std::sync::Arc;

use super::{completed, loaded, print_success, AppContext};
use crate::error::Result;
use crate::models::{SortOrder, Workout, WorkoutFilter};
use crate::viewmodel::{Clock, SystemClock, WorkoutViewModel};

fn workout_table(workouts: &[Workout]) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.add_row(prettytable::row![
        "Date".bold(),
        "Type".bold(),
        "Workout".bold(),
        "Minutes".bold()
    ]);
    for w in workouts {
        table.add_row(prettytable::row![
            w.calendar_day(),
            w.workout_type.cyan(),
            w.workout_name,
            w.duration_minutes
        ]);
    }
    table
}

/// Show today's workouts and the filtered, sorted history
pub async fn list(ctx: &AppContext, filter: &str, order: &str) -> Result<()> {
    let order: SortOrder = order.parse()?;
    let vm = WorkoutViewModel::new(ctx.api.clone(), ctx.session.clone(), Arc::new(SystemClock));
    loaded(vm.load().await)?;
    vm.set_filter(WorkoutFilter::from_label(filter));
    vm.set_order(order);

    let split = vm.split();
    println!("\nToday's Workouts:");
    if split.today.is_empty() {
        println!("{}", "No workouts logged today.".yellow());
    } else {
        workout_table(&split.today).printstd();
        println!("Total: {} minutes", split.today_minutes().to_string().green());
    }

    let history = vm.history();
    println!("\nHistory ({}):", vm.history_types().join(" | "));
    if history.is_empty() {
        println!("{}", "No workouts found.".yellow());
    } else {
        workout_table(&history).printstd();
    }
    println!();
    Ok(())
}

/// Log a workout for the signed-in member
pub async fn add(
    ctx: &AppContext,
    workout_type: String,
    name: String,
    duration: u32,
    date: Option<String>,
) -> Result<()> {
    let clock = Arc::new(SystemClock);
    let date = date.unwrap_or_else(|| clock.today_string());
    let vm = WorkoutViewModel::new(ctx.api.clone(), ctx.session.clone(), clock);
    let workout = Workout::new(workout_type, name, duration, date);
    let ack = completed(vm.add_workout(workout).await?, "Add workout")?;
    print_success(ack.message.as_deref().unwrap_or("Workout added."));
    Ok(())
}
