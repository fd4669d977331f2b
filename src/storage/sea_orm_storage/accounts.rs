use super::SeaOrmStorage;
use crate::entity::accounts::{ActiveModel, Column, Entity as Accounts};
use crate::errors::{Result, SiabsenError};
use crate::models::accounts::{
    entities::{Account, AccountStatus, ProfileRef},
    requests::CreateAccountRequest,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, Set};

impl SeaOrmStorage {
    pub async fn create_account_impl(&self, req: CreateAccountRequest) -> Result<Account> {
        let now = chrono::Utc::now().timestamp();
        let (profile_type, profile_id) = req.profile.into_columns();

        let model = ActiveModel {
            username: Set(req.username),
            email: Set(req.email),
            password_hash: Set(req.password_hash),
            role: Set(req.role.to_string()),
            profile_type: Set(profile_type),
            profile_id: Set(profile_id),
            status: Set(AccountStatus::Active.to_string()),
            must_change_password: Set(req.must_change_password),
            last_login: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SiabsenError::database_operation(format!("Create account failed: {e}")))?;

        Ok(result.into_account())
    }

    pub async fn get_account_by_id_impl(&self, id: i64) -> Result<Option<Account>> {
        let result = Accounts::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SiabsenError::database_operation(format!("Query account failed: {e}")))?;

        Ok(result.map(|m| m.into_account()))
    }

    pub async fn get_account_by_username_or_email_impl(
        &self,
        identifier: &str,
    ) -> Result<Option<Account>> {
        let result = Accounts::find()
            .filter(
                Condition::any()
                    .add(Column::Username.eq(identifier))
                    .add(Column::Email.eq(identifier)),
            )
            .one(&self.db)
            .await
            .map_err(|e| SiabsenError::database_operation(format!("Query account failed: {e}")))?;

        Ok(result.map(|m| m.into_account()))
    }

    pub async fn get_account_by_profile_impl(
        &self,
        profile: &ProfileRef,
    ) -> Result<Option<Account>> {
        let (profile_type, profile_id) = profile.into_columns();
        let (Some(profile_type), Some(profile_id)) = (profile_type, profile_id) else {
            return Ok(None);
        };

        let result = Accounts::find()
            .filter(Column::ProfileType.eq(profile_type))
            .filter(Column::ProfileId.eq(profile_id))
            .one(&self.db)
            .await
            .map_err(|e| SiabsenError::database_operation(format!("Query account failed: {e}")))?;

        Ok(result.map(|m| m.into_account()))
    }

    pub async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Accounts::update_many()
            .col_expr(Column::LastLogin, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                SiabsenError::database_operation(format!("Update last login failed: {e}"))
            })?;

        Ok(result.rows_affected > 0)
    }

    /// Stores the new hash and clears the rotation flag in one statement.
    pub async fn update_password_impl(&self, id: i64, password_hash: &str) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Accounts::update_many()
            .col_expr(
                Column::PasswordHash,
                sea_orm::sea_query::Expr::value(password_hash),
            )
            .col_expr(
                Column::MustChangePassword,
                sea_orm::sea_query::Expr::value(false),
            )
            .col_expr(Column::UpdatedAt, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                SiabsenError::database_operation(format!("Update password failed: {e}"))
            })?;

        Ok(result.rows_affected > 0)
    }
}
