use super::{
    models::{Hero, HeroDetail, HeroPower, NewHero, NewHeroPower, NewPower, Power},
    validation::ValidationError,
};
use sqlx::{SqliteConnection, SqlitePool};
use thiserror::Error;
use tracing::{debug, instrument};

/// Why a hero power could not be created. Either way nothing was persisted.
#[derive(Debug, Error)]
pub enum HeroPowerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub struct HeroRepo;

impl HeroRepo {
    /// Lists all heroes ordered by id.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn list_heroes(pool: &SqlitePool) -> Result<Vec<Hero>, sqlx::Error> {
        sqlx::query_as::<_, Hero>("SELECT id, name, super_name FROM heroes ORDER BY id")
            .fetch_all(pool)
            .await
    }

    /// # Errors
    /// Returns an error if the query fails.
    pub async fn get_hero(pool: &SqlitePool, id: i64) -> Result<Option<Hero>, sqlx::Error> {
        sqlx::query_as::<_, Hero>("SELECT id, name, super_name FROM heroes WHERE id = ?1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Gets a hero along with every `hero_powers` row that references it.
    ///
    /// # Errors
    /// Returns an error if either query fails.
    pub async fn get_hero_detail(
        pool: &SqlitePool,
        id: i64,
    ) -> Result<Option<HeroDetail>, sqlx::Error> {
        let Some(hero) = Self::get_hero(pool, id).await? else {
            return Ok(None);
        };

        let hero_powers = sqlx::query_as::<_, HeroPower>(
            "SELECT id, strength, hero_id, power_id FROM hero_powers WHERE hero_id = ?1 ORDER BY id",
        )
        .bind(id)
        .fetch_all(pool)
        .await?;

        Ok(Some(HeroDetail::new(hero, hero_powers)))
    }

    /// # Errors
    /// Returns an error if the insert fails.
    pub async fn insert_hero(pool: &SqlitePool, hero: &NewHero) -> Result<Hero, sqlx::Error> {
        sqlx::query_as::<_, Hero>(
            r"
            INSERT INTO heroes (name, super_name)
            VALUES (?1, ?2)
            RETURNING id, name, super_name
            ",
        )
        .bind(&hero.name)
        .bind(&hero.super_name)
        .fetch_one(pool)
        .await
    }

    /// Deletes a hero and its `hero_powers` in one transaction.
    /// Returns `false` when no hero has this id.
    ///
    /// # Errors
    /// Returns an error if a delete fails; the transaction is rolled back.
    #[instrument(skip(pool))]
    pub async fn delete_hero(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let associations = sqlx::query("DELETE FROM hero_powers WHERE hero_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let deleted = sqlx::query("DELETE FROM heroes WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        debug!("Deleted hero {id} with {associations} hero powers");

        Ok(deleted > 0)
    }

    /// Lists all powers ordered by id.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn list_powers(pool: &SqlitePool) -> Result<Vec<Power>, sqlx::Error> {
        sqlx::query_as::<_, Power>("SELECT id, name, description FROM powers ORDER BY id")
            .fetch_all(pool)
            .await
    }

    /// # Errors
    /// Returns an error if the query fails.
    pub async fn get_power(pool: &SqlitePool, id: i64) -> Result<Option<Power>, sqlx::Error> {
        sqlx::query_as::<_, Power>("SELECT id, name, description FROM powers WHERE id = ?1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// # Errors
    /// Returns an error if the insert fails.
    pub async fn insert_power(pool: &SqlitePool, power: &NewPower) -> Result<Power, sqlx::Error> {
        sqlx::query_as::<_, Power>(
            r"
            INSERT INTO powers (name, description)
            VALUES (?1, ?2)
            RETURNING id, name, description
            ",
        )
        .bind(&power.name)
        .bind(power.description.as_str())
        .fetch_one(pool)
        .await
    }

    /// Persists the description of an already-validated `Power` and returns the stored row.
    ///
    /// # Errors
    /// Returns `sqlx::Error::RowNotFound` if the power no longer exists.
    pub async fn update_power_description(
        pool: &SqlitePool,
        power: &Power,
    ) -> Result<Power, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let updated = sqlx::query_as::<_, Power>(
            r"
            UPDATE powers SET description = ?1
            WHERE id = ?2
            RETURNING id, name, description
            ",
        )
        .bind(power.description())
        .bind(power.id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(updated)
    }

    /// Deletes a power and its `hero_powers` in one transaction.
    /// Returns `false` when no power has this id.
    ///
    /// # Errors
    /// Returns an error if a delete fails; the transaction is rolled back.
    #[instrument(skip(pool))]
    pub async fn delete_power(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let associations = sqlx::query("DELETE FROM hero_powers WHERE power_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let deleted = sqlx::query("DELETE FROM powers WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        debug!("Deleted power {id} with {associations} hero powers");

        Ok(deleted > 0)
    }

    /// Validates and inserts a hero power inside a transaction.
    ///
    /// The transaction is rolled back on any failure, whether the strength is
    /// rejected or the store refuses the row (e.g. a dangling foreign key).
    ///
    /// # Errors
    /// Returns `HeroPowerError::Validation` for a bad strength and
    /// `HeroPowerError::Database` for any store failure.
    #[instrument(skip(pool))]
    pub async fn create_hero_power(
        pool: &SqlitePool,
        strength: &str,
        hero_id: i64,
        power_id: i64,
    ) -> Result<HeroPower, HeroPowerError> {
        let mut tx = pool.begin().await?;

        let result = match NewHeroPower::new(strength, hero_id, power_id) {
            Ok(new) => Self::insert_hero_power(&mut *tx, &new)
                .await
                .map_err(HeroPowerError::from),
            Err(err) => Err(HeroPowerError::from(err)),
        };

        match result {
            Ok(hero_power) => {
                tx.commit().await?;
                Ok(hero_power)
            }
            Err(err) => {
                tx.rollback().await?;
                Err(err)
            }
        }
    }

    async fn insert_hero_power(
        conn: &mut SqliteConnection,
        hero_power: &NewHeroPower,
    ) -> Result<HeroPower, sqlx::Error> {
        sqlx::query_as::<_, HeroPower>(
            r"
            INSERT INTO hero_powers (strength, hero_id, power_id)
            VALUES (?1, ?2, ?3)
            RETURNING id, strength, hero_id, power_id
            ",
        )
        .bind(hero_power.strength.as_str())
        .bind(hero_power.hero_id)
        .bind(hero_power.power_id)
        .fetch_one(conn)
        .await
    }

    /// Removes every row from all three tables.
    ///
    /// # Errors
    /// Returns an error if a delete fails; the transaction is rolled back.
    pub async fn clear(pool: &SqlitePool) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;
        for table in ["hero_powers", "heroes", "powers"] {
            sqlx::query(&format!("DELETE FROM {table}"))
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heroes::{db, validation::Strength};
    use anyhow::Result;

    async fn pool() -> Result<SqlitePool> {
        let pool = db::connect("sqlite::memory:").await?;
        db::migrate(&pool).await?;
        Ok(pool)
    }

    async fn seed_pair(pool: &SqlitePool) -> Result<(Hero, Power)> {
        let hero = HeroRepo::insert_hero(pool, &NewHero::new("Kamala Khan", "Ms. Marvel")).await?;
        let power = HeroRepo::insert_power(
            pool,
            &NewPower::new("super strength", "gives the wielder super-human strengths")?,
        )
        .await?;
        Ok((hero, power))
    }

    async fn count(pool: &SqlitePool, table: &str) -> Result<i64> {
        Ok(sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(pool)
            .await?)
    }

    #[tokio::test]
    async fn create_hero_power_persists_row() -> Result<()> {
        let pool = pool().await?;
        let (hero, power) = seed_pair(&pool).await?;

        let created = HeroRepo::create_hero_power(&pool, "Strong", hero.id, power.id).await?;
        assert_eq!(created.strength, Strength::Strong);
        assert_eq!(created.hero_id, hero.id);
        assert_eq!(created.power_id, power.id);

        let detail = HeroRepo::get_hero_detail(&pool, hero.id).await?;
        assert_eq!(detail.map(|d| d.hero_powers), Some(vec![created]));
        Ok(())
    }

    #[tokio::test]
    async fn create_hero_power_rejects_bad_strength() -> Result<()> {
        let pool = pool().await?;
        let (hero, power) = seed_pair(&pool).await?;

        let result = HeroRepo::create_hero_power(&pool, "Mighty", hero.id, power.id).await;
        assert!(matches!(
            result,
            Err(HeroPowerError::Validation(ValidationError::Strength))
        ));
        assert_eq!(count(&pool, "hero_powers").await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn create_hero_power_rolls_back_on_dangling_foreign_key() -> Result<()> {
        let pool = pool().await?;
        let (hero, _) = seed_pair(&pool).await?;

        let result = HeroRepo::create_hero_power(&pool, "Weak", hero.id, 999).await;
        assert!(matches!(result, Err(HeroPowerError::Database(_))));
        assert_eq!(count(&pool, "hero_powers").await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn update_power_description_persists() -> Result<()> {
        let pool = pool().await?;
        let (_, mut power) = seed_pair(&pool).await?;

        power.set_description("lets the wielder lift an entire city block".to_string())?;
        let updated = HeroRepo::update_power_description(&pool, &power).await?;
        assert_eq!(updated, power);

        let stored = HeroRepo::get_power(&pool, power.id).await?;
        assert_eq!(
            stored.as_ref().map(Power::description),
            Some("lets the wielder lift an entire city block")
        );
        Ok(())
    }

    #[tokio::test]
    async fn store_rejects_short_description() -> Result<()> {
        let pool = pool().await?;
        let result = sqlx::query("INSERT INTO powers (name, description) VALUES ('x', 'short')")
            .execute(&pool)
            .await;
        assert!(result.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn deleting_hero_cascades_to_hero_powers() -> Result<()> {
        let pool = pool().await?;
        let (hero, power) = seed_pair(&pool).await?;
        HeroRepo::create_hero_power(&pool, "Average", hero.id, power.id).await?;

        assert!(HeroRepo::delete_hero(&pool, hero.id).await?);
        assert_eq!(count(&pool, "hero_powers").await?, 0);
        assert_eq!(count(&pool, "powers").await?, 1);
        assert!(!HeroRepo::delete_hero(&pool, hero.id).await?);
        Ok(())
    }

    #[tokio::test]
    async fn deleting_power_cascades_to_hero_powers() -> Result<()> {
        let pool = pool().await?;
        let (hero, power) = seed_pair(&pool).await?;
        HeroRepo::create_hero_power(&pool, "Weak", hero.id, power.id).await?;

        assert!(HeroRepo::delete_power(&pool, power.id).await?);
        assert_eq!(count(&pool, "hero_powers").await?, 0);
        assert_eq!(count(&pool, "heroes").await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn foreign_key_cascade_applies_to_raw_deletes() -> Result<()> {
        let pool = pool().await?;
        let (hero, power) = seed_pair(&pool).await?;
        HeroRepo::create_hero_power(&pool, "Strong", hero.id, power.id).await?;

        sqlx::query("DELETE FROM heroes WHERE id = ?1")
            .bind(hero.id)
            .execute(&pool)
            .await?;
        assert_eq!(count(&pool, "hero_powers").await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn clear_empties_all_tables() -> Result<()> {
        let pool = pool().await?;
        let (hero, power) = seed_pair(&pool).await?;
        HeroRepo::create_hero_power(&pool, "Strong", hero.id, power.id).await?;

        HeroRepo::clear(&pool).await?;
        for table in ["heroes", "powers", "hero_powers"] {
            assert_eq!(count(&pool, table).await?, 0);
        }
        Ok(())
    }
}
