use chrono::Utc;
use common::{Gender, Role};
use sea_orm::sea_query::{Index, OnConflict, PostgresQueryBuilder};
use sea_orm::*;
use tracing::info;

use crate::config::AdminSeed;
use crate::entity::{team_member, user};
use crate::utils::team::generate_user_id;

/// Create the configured admin accounts. Admins whose email already exists
/// are left untouched; an admin whose contact is taken by another user is
/// skipped with a warning.
pub async fn seed_admins(db: &DatabaseConnection, admins: &[AdminSeed]) -> Result<(), DbErr> {
    let mut inserted = 0u32;
    for seed in admins {
        let now = Utc::now();
        let model = user::ActiveModel {
            user_id: Set(generate_user_id()),
            team_id: Set(None),
            name: Set(seed.name.trim().to_string()),
            gender: Set(Gender::Other),
            email: Set(seed.email.trim().to_lowercase()),
            contact: Set(seed.contact.trim().to_string()),
            college: Set(String::new()),
            stream: Set(String::new()),
            year: Set(0),
            role: Set(Role::Admin),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = user::Entity::insert(model)
            .on_conflict(
                OnConflict::column(user::Column::Email)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await;

        match result {
            Ok(n) if n > 0 => inserted += 1,
            Ok(_) | Err(DbErr::RecordNotInserted) => {}
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                tracing::warn!(
                    admin = %seed.name,
                    "Skipping admin seed: contact already belongs to another user"
                );
            }
            Err(e) => return Err(e),
        }
    }

    if inserted > 0 {
        info!("Seeded {} new admin accounts", inserted);
    }

    Ok(())
}

/// Ensure required database indexes exist.
///
/// Schema sync doesn't create composite non-unique indexes, so the roster
/// lookup index is created here on startup.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    // SELECT ... FROM team_member WHERE team_id IN (...) ORDER BY team_id, position
    let stmt = Index::create()
        .if_not_exists()
        .name("idx_team_member_team_position")
        .table(team_member::Entity)
        .col(team_member::Column::TeamId)
        .col(team_member::Column::Position)
        .to_string(PostgresQueryBuilder);

    match db.execute_unprepared(&stmt).await {
        Ok(_) => info!("Ensured index idx_team_member_team_position exists"),
        Err(e) => {
            tracing::warn!("Failed to create index idx_team_member_team_position: {}", e);
        }
    }

    Ok(())
}
