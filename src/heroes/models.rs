use super::validation::{
    validate_description, validate_strength, Description, Strength, ValidationError,
};
use serde::Serialize;
use sqlx::{sqlite::SqliteRow, FromRow, Row};
use utoipa::ToSchema;

/// Row from `heroes`, serialized as `{id, name, super_name}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Hero {
    pub id: i64,
    pub name: String,
    pub super_name: String,
}

/// A hero together with its `hero_powers` associations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct HeroDetail {
    pub id: i64,
    pub name: String,
    pub super_name: String,
    pub hero_powers: Vec<HeroPower>,
}

impl HeroDetail {
    #[must_use]
    pub fn new(hero: Hero, hero_powers: Vec<HeroPower>) -> Self {
        Self {
            id: hero.id,
            name: hero.name,
            super_name: hero.super_name,
            hero_powers,
        }
    }
}

/// Row from `powers`, serialized as `{id, name, description}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Power {
    pub id: i64,
    pub name: String,
    description: Description,
}

impl Power {
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Replace the description, keeping the old one if the new value is too short.
    ///
    /// # Errors
    /// Returns `ValidationError::Description` when `description` has fewer than 20 characters.
    pub fn set_description(&mut self, description: String) -> Result<(), ValidationError> {
        self.description = validate_description(description)?;
        Ok(())
    }
}

/// Row from `hero_powers`, serialized as `{id, strength, hero_id, power_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct HeroPower {
    pub id: i64,
    pub strength: Strength,
    pub hero_id: i64,
    pub power_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHero {
    pub name: String,
    pub super_name: String,
}

impl NewHero {
    #[must_use]
    pub fn new(name: impl Into<String>, super_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            super_name: super_name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPower {
    pub name: String,
    pub description: Description,
}

impl NewPower {
    /// # Errors
    /// Returns `ValidationError::Description` when `description` has fewer than 20 characters.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            name: name.into(),
            description: validate_description(description.into())?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewHeroPower {
    pub strength: Strength,
    pub hero_id: i64,
    pub power_id: i64,
}

impl NewHeroPower {
    /// # Errors
    /// Returns `ValidationError::Strength` unless `strength` is `Strong`, `Weak` or `Average`.
    pub fn new(strength: &str, hero_id: i64, power_id: i64) -> Result<Self, ValidationError> {
        Ok(Self {
            strength: validate_strength(strength)?,
            hero_id,
            power_id,
        })
    }
}

/// Wrap a persisted value that no longer passes validation as a decode error.
fn invalid_column(column: &str, err: &ValidationError) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(err.clone()),
    }
}

impl<'r> FromRow<'r, SqliteRow> for Hero {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            super_name: row.try_get("super_name")?,
        })
    }
}

impl<'r> FromRow<'r, SqliteRow> for Power {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let description: String = row.try_get("description")?;
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            description: validate_description(description)
                .map_err(|err| invalid_column("description", &err))?,
        })
    }
}

impl<'r> FromRow<'r, SqliteRow> for HeroPower {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let strength: String = row.try_get("strength")?;
        Ok(Self {
            id: row.try_get("id")?,
            strength: validate_strength(&strength)
                .map_err(|err| invalid_column("strength", &err))?,
            hero_id: row.try_get("hero_id")?,
            power_id: row.try_get("power_id")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn power() -> Power {
        Power {
            id: 1,
            name: "flight".to_string(),
            description: Description::try_from("gives the wielder the ability to fly")
                .unwrap_or_else(|err| panic!("valid description rejected: {err}")),
        }
    }

    #[test]
    fn new_power_validates_description() {
        assert_eq!(
            NewPower::new("flight", "too short"),
            Err(ValidationError::Description)
        );
        assert!(NewPower::new("flight", "gives the wielder the ability to fly").is_ok());
    }

    #[test]
    fn set_description_keeps_old_value_on_error() {
        let mut power = power();
        assert_eq!(
            power.set_description("short".to_string()),
            Err(ValidationError::Description)
        );
        assert_eq!(power.description(), "gives the wielder the ability to fly");

        assert_eq!(
            power.set_description("allows the wielder to fly through the skies".to_string()),
            Ok(())
        );
        assert_eq!(
            power.description(),
            "allows the wielder to fly through the skies"
        );
    }

    #[test]
    fn new_hero_power_validates_strength() {
        assert_eq!(
            NewHeroPower::new("Legendary", 1, 2),
            Err(ValidationError::Strength)
        );
        assert_eq!(
            NewHeroPower::new("Average", 1, 2),
            Ok(NewHeroPower {
                strength: Strength::Average,
                hero_id: 1,
                power_id: 2,
            })
        );
    }

    #[test]
    fn serialized_field_sets() {
        let hero = Hero {
            id: 1,
            name: "Kamala Khan".to_string(),
            super_name: "Ms. Marvel".to_string(),
        };
        let hero_power = HeroPower {
            id: 3,
            strength: Strength::Strong,
            hero_id: 1,
            power_id: 1,
        };

        assert_eq!(
            serde_json::to_value(&hero).ok(),
            Some(json!({"id": 1, "name": "Kamala Khan", "super_name": "Ms. Marvel"}))
        );
        assert_eq!(
            serde_json::to_value(power()).ok(),
            Some(json!({
                "id": 1,
                "name": "flight",
                "description": "gives the wielder the ability to fly"
            }))
        );
        assert_eq!(
            serde_json::to_value(HeroDetail::new(hero, vec![hero_power])).ok(),
            Some(json!({
                "id": 1,
                "name": "Kamala Khan",
                "super_name": "Ms. Marvel",
                "hero_powers": [
                    {"id": 3, "strength": "Strong", "hero_id": 1, "power_id": 1}
                ]
            }))
        );
    }
}
