use crate::cli::commands::open_db;
use crate::cli::parser::{Commands, EmployeeAction};
use crate::config::Config;
use crate::core::bus::DataChangeBus;
use crate::core::employee::{EmployeeLogic, NewEmployee};
use crate::errors::{AppError, AppResult};
use crate::models::profile::Role;
use crate::ui::messages::{info, success};
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Employee { action } = cmd {
        let actor = cfg.acting_user()?;
        let pool = open_db(cfg)?;
        let bus = DataChangeBus::new();

        match action {
            EmployeeAction::List => {
                let profiles = EmployeeLogic::list(&pool, actor)?;
                if profiles.is_empty() {
                    info("No employees.");
                    return Ok(());
                }
                let mut table = Table::new(vec!["ID", "Name", "E-mail", "Role"]);
                for p in &profiles {
                    table.add_row(vec![
                        p.id.clone(),
                        p.display_name(),
                        p.email.clone(),
                        p.role.to_db_str().to_string(),
                    ]);
                }
                print!("{}", table.render());
            }
            EmployeeAction::Add {
                id,
                email,
                first_name,
                last_name,
                admin,
            } => {
                let role = if *admin { Role::Admin } else { Role::Employee };
                let profile = EmployeeLogic::add(
                    &pool,
                    &bus,
                    actor,
                    NewEmployee {
                        id: id.clone(),
                        email: email.clone(),
                        first_name: first_name.clone(),
                        last_name: last_name.clone(),
                        role,
                    },
                )?;
                success(format!(
                    "Employee '{}' ({}) added as {}",
                    profile.id,
                    profile.display_name(),
                    profile.role.to_db_str()
                ));
            }
            EmployeeAction::SetRole { id, role } => {
                let role =
                    Role::from_db_str(role).ok_or_else(|| AppError::InvalidRole(role.clone()))?;
                let profile = EmployeeLogic::set_role(&pool, &bus, actor, id, role)?;
                success(format!(
                    "Employee '{}' is now {}",
                    profile.id,
                    profile.role.to_db_str()
                ));
            }
            EmployeeAction::Rename {
                id,
                first_name,
                last_name,
            } => {
                let profile =
                    EmployeeLogic::rename(&pool, &bus, actor, id, first_name, last_name.clone())?;
                success(format!("Employee '{}' renamed to {}", profile.id, profile.display_name()));
            }
            EmployeeAction::Del { id } => {
                EmployeeLogic::delete(&pool, &bus, actor, id)?;
                success(format!("Employee '{id}' deleted (punches kept)"));
            }
        }
    }
    Ok(())
}
