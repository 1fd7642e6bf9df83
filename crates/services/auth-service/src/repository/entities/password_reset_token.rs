//! Password reset token entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::PasswordResetToken;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "password_reset_tokens")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    #[sea_orm(unique)]
    pub token: String,
    pub expires_at: DateTimeUtc,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for PasswordResetToken {
    fn from(model: Model) -> Self {
        PasswordResetToken {
            id: model.id,
            user_id: model.user_id,
            token: model.token,
            expires_at: model.expires_at,
            created_at: model.created_at,
        }
    }
}

impl From<&PasswordResetToken> for ActiveModel {
    fn from(record: &PasswordResetToken) -> Self {
        ActiveModel {
            id: Set(record.id),
            user_id: Set(record.user_id),
            token: Set(record.token.clone()),
            expires_at: Set(record.expires_at),
            created_at: Set(record.created_at),
        }
    }
}
