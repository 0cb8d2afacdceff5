use crate::{
    entities::{auth_tokens, hods, programs, students, users},
    error::{ServiceError, is_unique_violation},
    password::{hash_password, verify_password},
    services::directory::DirectoryService,
};
use chrono::Utc;
use log::{info, warn};
use models::{identity::Principal, semester::Semester};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, NotSet, QueryFilter, QueryOrder, TransactionTrait, sea_query::OnConflict,
};
use uuid::Uuid;

/// Credentials and profile of a user being created
#[derive(Debug, Clone, Default)]
pub struct NewAccount {
    pub username: String,
    pub password: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// Result of a successful login
#[derive(Debug, Clone)]
pub struct Session {
    pub user: users::Model,
    pub principal: Principal,
    pub token: String,
}

pub struct IdentityService;

impl IdentityService {
    /// Verifies credentials and hands out the user's bearer token
    pub async fn login(
        db: &DatabaseConnection,
        username: &str,
        password: &str,
    ) -> Result<Session, ServiceError> {
        let user = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(db)
            .await?;

        let Some(user) = user.filter(|user| verify_password(password, &user.password_hash))
        else {
            warn!("Rejected login for {username}");
            return Err(ServiceError::InvalidCredentials);
        };

        let principal = Self::resolve_principal(db, user.id).await?;
        let token = Self::issue_token(db, user.id).await?;

        info!("{} logged in as {}", user.username, principal.role().as_str());
        Ok(Session {
            user,
            principal,
            token,
        })
    }

    /// Returns the user's token, creating it on first use
    pub async fn issue_token<C: ConnectionTrait>(
        db: &C,
        user_id: i32,
    ) -> Result<String, ServiceError> {
        let existing = auth_tokens::Entity::find()
            .filter(auth_tokens::Column::UserId.eq(user_id))
            .one(db)
            .await?;
        if let Some(token) = existing {
            return Ok(token.key);
        }

        let token = auth_tokens::ActiveModel {
            key: Set(Uuid::new_v4().simple().to_string()),
            user_id: Set(user_id),
            created_at: Set(Utc::now().naive_utc()),
        };

        // A concurrent login may have created the token in the meantime
        match auth_tokens::Entity::insert(token)
            .on_conflict(
                OnConflict::column(auth_tokens::Column::UserId)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await
        {
            Ok(_) | Err(DbErr::RecordNotInserted) => {}
            Err(err) => return Err(err.into()),
        }

        auth_tokens::Entity::find()
            .filter(auth_tokens::Column::UserId.eq(user_id))
            .one(db)
            .await?
            .map(|token| token.key)
            .ok_or_else(|| ServiceError::not_found("Token for user", user_id))
    }

    /// Resolves a bearer token to the principal it belongs to
    pub async fn authenticate<C: ConnectionTrait>(
        db: &C,
        key: &str,
    ) -> Result<Option<Principal>, ServiceError> {
        let Some(token) = auth_tokens::Entity::find_by_id(key.to_string())
            .one(db)
            .await?
        else {
            return Ok(None);
        };

        Self::resolve_principal(db, token.user_id).await.map(Some)
    }

    /// Classifies a user: HOD first, then student, otherwise administrator
    pub async fn resolve_principal<C: ConnectionTrait>(
        db: &C,
        user_id: i32,
    ) -> Result<Principal, ServiceError> {
        let hod = hods::Entity::find()
            .filter(hods::Column::UserId.eq(user_id))
            .one(db)
            .await?;
        if let Some(hod) = hod {
            return Ok(Principal::Hod {
                user_id,
                hod_id: hod.id,
                department_id: hod.department_id,
            });
        }

        let student = students::Entity::find()
            .filter(students::Column::UserId.eq(user_id))
            .one(db)
            .await?;
        if let Some(student) = student {
            return Ok(Principal::Student {
                user_id,
                student_id: student.id,
                department_id: student.department_id,
                program_id: student.program_id,
                batch_id: student.batch_id,
            });
        }

        Ok(Principal::Admin { user_id })
    }

    pub async fn get_user<C: ConnectionTrait>(
        db: &C,
        user_id: i32,
    ) -> Result<users::Model, ServiceError> {
        users::Entity::find_by_id(user_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id))
    }

    pub async fn get_student<C: ConnectionTrait>(
        db: &C,
        student_id: i32,
    ) -> Result<students::Model, ServiceError> {
        students::Entity::find_by_id(student_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Student", student_id))
    }

    /// Students of a department together with their user rows
    pub async fn students_of_department<C: ConnectionTrait>(
        db: &C,
        department_id: i32,
    ) -> Result<Vec<(students::Model, users::Model)>, ServiceError> {
        let students = students::Entity::find()
            .filter(students::Column::DepartmentId.eq(department_id))
            .order_by_asc(students::Column::Id)
            .find_also_related(users::Entity)
            .all(db)
            .await?
            .into_iter()
            .filter_map(|(student, user)| user.map(|u| (student, u)))
            .collect();

        Ok(students)
    }

    /// Inserts a user row, rejecting blank or taken usernames
    pub async fn create_account<C: ConnectionTrait>(
        db: &C,
        account: NewAccount,
    ) -> Result<users::Model, ServiceError> {
        let username = account.username.trim().to_string();
        if username.is_empty() {
            return Err(ServiceError::validation("Username is required."));
        }
        if account.password.is_empty() {
            return Err(ServiceError::validation("Password is required."));
        }

        let taken = users::Entity::find()
            .filter(users::Column::Username.eq(username.as_str()))
            .one(db)
            .await?
            .is_some();
        let taken_error = || ServiceError::validation(format!("Username {username} is already taken."));
        if taken {
            return Err(taken_error());
        }

        let password_hash = hash_password(&account.password)?;
        users::ActiveModel {
            id: NotSet,
            username: Set(username.clone()),
            email: Set(account.email.trim().to_string()),
            first_name: Set(account.first_name.trim().to_string()),
            last_name: Set(account.last_name.trim().to_string()),
            password_hash: Set(password_hash),
            created_at: Set(Utc::now().naive_utc()),
        }
        .insert(db)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                taken_error()
            } else {
                err.into()
            }
        })
    }

    /// Creates the bootstrap administrator unless the username already exists
    ///
    /// # Returns
    /// Whether a user was created
    pub async fn ensure_admin(
        db: &DatabaseConnection,
        username: &str,
        password: &str,
    ) -> Result<bool, ServiceError> {
        let exists = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(db)
            .await?
            .is_some();
        if exists {
            return Ok(false);
        }

        let admin = Self::create_account(
            db,
            NewAccount {
                username: username.to_string(),
                password: password.to_string(),
                ..Default::default()
            },
        )
        .await?;

        info!("Created administrator {}", admin.username);
        Ok(true)
    }

    /// Registers the head of a department; only administrators may do this
    pub async fn register_hod(
        db: &DatabaseConnection,
        principal: &Principal,
        account: NewAccount,
        department_id: i32,
    ) -> Result<(hods::Model, users::Model), ServiceError> {
        if !matches!(principal, Principal::Admin { .. }) {
            return Err(ServiceError::unauthorized(
                "Only administrators can register heads of department.",
            ));
        }

        let txn = db.begin().await?;
        let department = DirectoryService::get_department(&txn, department_id).await?;

        let has_hod = hods::Entity::find()
            .filter(hods::Column::DepartmentId.eq(department.id))
            .one(&txn)
            .await?
            .is_some();
        if has_hod {
            return Err(ServiceError::validation(format!(
                "Department {} already has a head.",
                department.name
            )));
        }

        let user = Self::create_account(&txn, account).await?;
        let hod = hods::ActiveModel {
            id: NotSet,
            user_id: Set(user.id),
            department_id: Set(department.id),
        }
        .insert(&txn)
        .await?;
        txn.commit().await?;

        info!("Registered {} as head of {}", user.username, department.name);
        Ok((hod, user))
    }

    /// Registers a student in a program and batch
    pub async fn register_student(
        db: &DatabaseConnection,
        principal: &Principal,
        account: NewAccount,
        program_id: i32,
        batch_id: i32,
        semester: Semester,
    ) -> Result<(students::Model, users::Model), ServiceError> {
        let txn = db.begin().await?;
        let program = DirectoryService::get_program(&txn, program_id).await?;
        if !principal.manages_department(program.department_id) {
            return Err(ServiceError::unauthorized(
                "You can only register students in your own department.",
            ));
        }
        DirectoryService::get_batch(&txn, batch_id).await?;

        let registered = Self::create_student(&txn, account, &program, batch_id, semester).await?;
        txn.commit().await?;

        info!(
            "Registered student {} in program {}",
            registered.1.username, program.name
        );
        Ok(registered)
    }

    /// Inserts the user and student rows for an already resolved program
    pub async fn create_student<C: ConnectionTrait>(
        db: &C,
        account: NewAccount,
        program: &programs::Model,
        batch_id: i32,
        semester: Semester,
    ) -> Result<(students::Model, users::Model), ServiceError> {
        let user = Self::create_account(db, account).await?;
        let student = students::ActiveModel {
            id: NotSet,
            user_id: Set(user.id),
            department_id: Set(program.department_id),
            program_id: Set(program.id),
            batch_id: Set(batch_id),
            semester: Set(semester),
        }
        .insert(db)
        .await?;

        Ok((student, user))
    }
}
