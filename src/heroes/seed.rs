//! Sample data for local development.

use super::{
    models::{NewHero, NewPower},
    repo::HeroRepo,
    validation::Strength,
};
use anyhow::{Context, Result};
use sqlx::SqlitePool;
use tracing::info;

const HEROES: [(&str, &str); 10] = [
    ("Kamala Khan", "Ms. Marvel"),
    ("Doreen Green", "Squirrel Girl"),
    ("Gwen Stacy", "Spider-Gwen"),
    ("Janet Van Dyne", "The Wasp"),
    ("Wanda Maximoff", "Scarlet Witch"),
    ("Carol Danvers", "Captain Marvel"),
    ("Jean Grey", "Dark Phoenix"),
    ("Ororo Munroe", "Storm"),
    ("Kitty Pryde", "Shadowcat"),
    ("Elektra Natchios", "Elektra"),
];

const POWERS: [(&str, &str); 4] = [
    ("super strength", "gives the wielder super-human strengths"),
    (
        "flight",
        "gives the wielder the ability to fly through the skies at supersonic speed",
    ),
    (
        "super human senses",
        "allows the wielder to use her senses at a super-human level",
    ),
    (
        "elasticity",
        "can stretch the human body to extreme lengths",
    ),
];

const STRENGTHS: [Strength; 3] = [Strength::Strong, Strength::Weak, Strength::Average];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub heroes: usize,
    pub powers: usize,
    pub hero_powers: usize,
}

/// Clear all tables and insert the sample heroes, powers, and one hero power per hero.
///
/// # Errors
/// Returns an error if any insert fails.
pub async fn run(pool: &SqlitePool) -> Result<SeedSummary> {
    HeroRepo::clear(pool)
        .await
        .context("Failed to clear existing data")?;

    let mut summary = SeedSummary::default();

    let mut powers = Vec::with_capacity(POWERS.len());
    for (name, description) in POWERS {
        let power = HeroRepo::insert_power(pool, &NewPower::new(name, description)?)
            .await
            .with_context(|| format!("Failed to insert power: {name}"))?;
        powers.push(power);
        summary.powers += 1;
    }

    for (index, (name, super_name)) in HEROES.iter().enumerate() {
        let hero = HeroRepo::insert_hero(pool, &NewHero::new(*name, *super_name))
            .await
            .with_context(|| format!("Failed to insert hero: {name}"))?;
        summary.heroes += 1;

        let Some(power) = powers.get(index % powers.len()) else {
            continue;
        };
        let strength = STRENGTHS[index % STRENGTHS.len()];
        HeroRepo::create_hero_power(pool, strength.as_str(), hero.id, power.id)
            .await
            .with_context(|| format!("Failed to link {name} to {}", power.name))?;
        summary.hero_powers += 1;
    }

    info!(
        "Seeded {} heroes, {} powers, {} hero powers",
        summary.heroes, summary.powers, summary.hero_powers
    );

    Ok(summary)
}
