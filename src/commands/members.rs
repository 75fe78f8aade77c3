//! Admin dashboard commands
//!
//! Fitness classes live on the client, so `classes` and `add-class` only
//! see the built-in schedule plus what this run added.

use colored::Colorize;
use prettytable::{format, Table};
use std::sync::Arc;

use super::{completed, loaded, print_success, AppContext};
use crate::api::MemberForm;
use crate::catalog::{ClassForm, FitnessClass};
use crate::error::{FittrackError, Result};
use crate::models::Workout;
use crate::viewmodel::{AdminDashboardViewModel, Clock, SystemClock};

fn require_admin(ctx: &AppContext) -> Result<()> {
    match ctx.session.load_admin()? {
        Some(_) => Ok(()),
        None => Err(FittrackError::LoginRequired(
            "Admin sign-in required. Use `fittrack admin-login` first.".to_string(),
        )
        .into()),
    }
}

async fn dashboard(ctx: &AppContext) -> Result<AdminDashboardViewModel> {
    require_admin(ctx)?;
    let vm = AdminDashboardViewModel::new(ctx.api.clone());
    loaded(vm.load().await)?;
    Ok(vm)
}

/// List members, optionally filtered by a search string
pub async fn list(ctx: &AppContext, search: Option<String>) -> Result<()> {
    let vm = dashboard(ctx).await?;
    if let Some(query) = search {
        vm.set_search(query);
    }

    let members = vm.filtered_members();
    if members.is_empty() {
        println!("{}", "No members found.".yellow());
        return Ok(());
    }

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.add_row(prettytable::row![
        "ID".bold(),
        "Name".bold(),
        "Phone".bold(),
        "Membership".bold(),
        "Goal".bold(),
        "Workouts".bold()
    ]);
    for m in &members {
        table.add_row(prettytable::row![
            m.id.cyan(),
            m.name,
            m.phone,
            m.membership_type,
            m.goal.as_deref().unwrap_or("-"),
            m.workouts.len()
        ]);
    }

    println!("\nMembers ({} of {}):", members.len(), vm.members().len());
    table.printstd();
    println!();
    Ok(())
}

/// Add a member, joining today
pub async fn add(ctx: &AppContext, form: MemberForm) -> Result<()> {
    require_admin(ctx)?;
    let vm = AdminDashboardViewModel::new(ctx.api.clone());
    let member = completed(vm.add_member(&form).await?, "Add member")?;
    print_success(&format!(
        "Added {} ({} membership).",
        member.name, member.membership_type
    ));
    Ok(())
}

/// Delete a member by id
pub async fn delete(ctx: &AppContext, id: &str) -> Result<()> {
    require_admin(ctx)?;
    let vm = AdminDashboardViewModel::new(ctx.api.clone());
    let ack = completed(vm.delete_member(id).await?, "Delete member")?;
    print_success(ack.message.as_deref().unwrap_or("Member deleted."));
    Ok(())
}

/// Log a workout for a member
pub async fn add_workout(
    ctx: &AppContext,
    id: &str,
    workout_type: String,
    name: String,
    duration: u32,
    date: Option<String>,
) -> Result<()> {
    let vm = dashboard(ctx).await?;
    let date = date.unwrap_or_else(|| SystemClock.today_string());
    let workout = Workout::new(workout_type, name, duration, date);
    let ack = completed(vm.add_workout(id, workout).await?, "Add workout")?;
    print_success(ack.message.as_deref().unwrap_or("Workout added."));
    Ok(())
}

/// Show member statistics
pub async fn stats(ctx: &AppContext) -> Result<()> {
    let vm = dashboard(ctx).await?;
    let stats = vm.stats();

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.add_row(prettytable::row!["Total members".bold(), stats.total_members]);
    table.add_row(prettytable::row!["Total workouts".bold(), stats.total_workouts]);
    table.add_row(prettytable::row!["Active classes".bold(), vm.classes().len()]);
    for (kind, count) in &stats.membership_types {
        table.add_row(prettytable::row![format!("  {}", kind), count]);
    }

    println!("\nDashboard:");
    table.printstd();
    println!();
    Ok(())
}

fn print_classes(classes: &[FitnessClass]) {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.add_row(prettytable::row![
        "ID".bold(),
        "Class".bold(),
        "Instructor".bold(),
        "Schedule".bold(),
        "Enrolled".bold(),
        "Level".bold()
    ]);
    for class in classes {
        let enrolled = match class.capacity {
            Some(cap) => format!("{}/{}", class.current_enrollment, cap),
            None => class.current_enrollment.to_string(),
        };
        table.add_row(prettytable::row![
            class.id.to_string().cyan(),
            class.name,
            class.instructor,
            class.schedule,
            enrolled,
            class.difficulty
        ]);
    }

    println!("\nFitness Classes:");
    table.printstd();
    println!();
}

/// List fitness classes
pub fn classes(ctx: &AppContext) -> Result<()> {
    require_admin(ctx)?;
    let vm = AdminDashboardViewModel::new(ctx.api.clone());
    print_classes(&vm.classes());
    Ok(())
}

/// Schedule a class and show the resulting schedule
pub fn add_class(ctx: &AppContext, form: ClassForm) -> Result<()> {
    require_admin(ctx)?;
    let vm = AdminDashboardViewModel::new(ctx.api.clone());
    let class = vm.add_class(&form)?;
    print_success(&format!("Scheduled {} ({}).", class.name, class.schedule));
    print_classes(&vm.classes());
    Ok(())
}
