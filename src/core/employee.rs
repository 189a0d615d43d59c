use crate::core::bus::{DataChange, DataChangeBus};
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::profiles::{
    count_profiles, delete_profile, insert_profile, load_profile, load_profiles, update_profile,
};
use crate::errors::{AppError, AppResult};
use crate::models::profile::{EmployeeProfile, Role};
use regex::Regex;
use std::sync::OnceLock;

/// Fields accepted when creating a profile.
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub role: Role,
}

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap())
}

pub struct EmployeeLogic;

impl EmployeeLogic {
    pub fn require_profile(pool: &DbPool, user_id: &str) -> AppResult<EmployeeProfile> {
        load_profile(&pool.conn, user_id)?
            .ok_or_else(|| AppError::NotFound(format!("employee '{user_id}'")))
    }

    pub fn require_admin(pool: &DbPool, actor: &str) -> AppResult<EmployeeProfile> {
        let profile = Self::require_profile(pool, actor)?;
        if !profile.is_admin() {
            return Err(AppError::Forbidden(format!(
                "'{actor}' is not an administrator"
            )));
        }
        Ok(profile)
    }

    /// Whose data `actor` may read when asking for `requested`.
    /// `None` means every employee and is only granted to administrators;
    /// non-administrators asking for nobody in particular get their own.
    /// Administrators may name ids whose profile was deleted; their punches
    /// are kept.
    pub fn visible_scope(
        pool: &DbPool,
        actor: &str,
        requested: Option<&str>,
    ) -> AppResult<Option<String>> {
        let profile = Self::require_profile(pool, actor)?;
        match requested {
            Some(u) if u == actor => Ok(Some(u.to_string())),
            Some(u) => {
                if !profile.is_admin() {
                    return Err(AppError::Forbidden(format!(
                        "'{actor}' cannot read data of '{u}'"
                    )));
                }
                Ok(Some(u.to_string()))
            }
            None if profile.is_admin() => Ok(None),
            None => Ok(Some(actor.to_string())),
        }
    }

    pub fn list(pool: &DbPool, actor: &str) -> AppResult<Vec<EmployeeProfile>> {
        Self::require_admin(pool, actor)?;
        load_profiles(&pool.conn)
    }

    pub fn add(
        pool: &DbPool,
        bus: &DataChangeBus,
        actor: &str,
        new: NewEmployee,
    ) -> AppResult<EmployeeProfile> {
        Self::require_admin(pool, actor)?;
        let profile = Self::create(pool, new)?;
        audit(
            &pool.conn,
            "employee_add",
            &profile.id,
            &format!("added {} ({}) by {actor}", profile.display_name(), profile.role.to_db_str()),
        )?;
        bus.publish(&DataChange::ProfilesChanged);
        Ok(profile)
    }

    /// Create the first administrator of an empty database.
    pub fn bootstrap_admin(
        pool: &DbPool,
        id: &str,
        email: &str,
        first_name: &str,
    ) -> AppResult<EmployeeProfile> {
        if count_profiles(&pool.conn)? > 0 {
            return Err(AppError::Forbidden(
                "profiles already exist; use 'employee add' as an administrator".into(),
            ));
        }

        let profile = Self::create(
            pool,
            NewEmployee {
                id: id.to_string(),
                email: email.to_string(),
                first_name: first_name.to_string(),
                last_name: None,
                role: Role::Admin,
            },
        )?;
        audit(&pool.conn, "init", &profile.id, "first administrator created")?;
        Ok(profile)
    }

    fn create(pool: &DbPool, new: NewEmployee) -> AppResult<EmployeeProfile> {
        let id = new.id.trim();
        let first_name = new.first_name.trim();
        let email = new.email.trim();

        if id.is_empty() || first_name.is_empty() || email.is_empty() {
            return Err(AppError::MissingData(
                "id, email and first name are required".into(),
            ));
        }
        if !email_re().is_match(email) {
            return Err(AppError::MissingData(format!("invalid email '{email}'")));
        }
        if load_profile(&pool.conn, id)?.is_some() {
            return Err(AppError::Other(format!("employee '{id}' already exists")));
        }

        let profile = EmployeeProfile {
            id: id.to_string(),
            first_name: first_name.to_string(),
            last_name: new.last_name.filter(|l| !l.trim().is_empty()),
            email: email.to_string(),
            role: new.role,
            avatar_url: None,
            updated_at: None,
        };
        insert_profile(&pool.conn, &profile)?;
        tracing::debug!(id = %profile.id, "profile created");
        Ok(profile)
    }

    pub fn set_role(
        pool: &DbPool,
        bus: &DataChangeBus,
        actor: &str,
        user_id: &str,
        role: Role,
    ) -> AppResult<EmployeeProfile> {
        Self::require_admin(pool, actor)?;
        let mut profile = Self::require_profile(pool, user_id)?;
        profile.role = role;
        update_profile(&pool.conn, &profile)?;
        audit(
            &pool.conn,
            "employee_role",
            user_id,
            &format!("role set to {} by {actor}", role.to_db_str()),
        )?;
        bus.publish(&DataChange::ProfilesChanged);
        Ok(profile)
    }

    pub fn rename(
        pool: &DbPool,
        bus: &DataChangeBus,
        actor: &str,
        user_id: &str,
        first_name: &str,
        last_name: Option<String>,
    ) -> AppResult<EmployeeProfile> {
        Self::require_admin(pool, actor)?;
        if first_name.trim().is_empty() {
            return Err(AppError::MissingData("first name is required".into()));
        }
        let mut profile = Self::require_profile(pool, user_id)?;
        profile.first_name = first_name.trim().to_string();
        profile.last_name = last_name.filter(|l| !l.trim().is_empty());
        update_profile(&pool.conn, &profile)?;
        audit(&pool.conn, "employee_edit", user_id, &format!("renamed by {actor}"))?;
        bus.publish(&DataChange::ProfilesChanged);
        Ok(profile)
    }

    /// Remove a profile and its schedule. Clock events are kept.
    pub fn delete(pool: &DbPool, bus: &DataChangeBus, actor: &str, user_id: &str) -> AppResult<()> {
        Self::require_admin(pool, actor)?;
        if actor == user_id {
            return Err(AppError::Forbidden("an administrator cannot delete itself".into()));
        }
        if delete_profile(&pool.conn, user_id)? == 0 {
            return Err(AppError::NotFound(format!("employee '{user_id}'")));
        }
        audit(&pool.conn, "employee_del", user_id, &format!("deleted by {actor}"))?;
        bus.publish(&DataChange::ProfilesChanged);
        Ok(())
    }
}
