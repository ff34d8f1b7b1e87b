use super::handlers::{health, hero_powers, heroes, powers, ErrorBody, ErrorsBody};
use crate::heroes::{Hero, HeroDetail, HeroPower, Power, Strength};
use utoipa::{
    openapi::{Contact, License},
    OpenApi,
};

pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";
pub const SWAGGER_UI_PATH: &str = "/swagger-ui";

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        heroes::list_heroes,
        heroes::get_hero,
        powers::list_powers,
        powers::get_power,
        powers::update_power,
        hero_powers::create_hero_power,
    ),
    components(schemas(
        Hero,
        HeroDetail,
        Power,
        HeroPower,
        Strength,
        ErrorBody,
        ErrorsBody,
        powers::UpdatePowerRequest,
        hero_powers::CreateHeroPowerRequest,
        health::Health,
    )),
    tags(
        (name = "heroes", description = "Heroes and their hero powers"),
        (name = "powers", description = "Powers and their descriptions"),
        (name = "hero_powers", description = "Strength-rated links between heroes and powers"),
        (name = "health", description = "Service health"),
    )
)]
struct ApiDoc;

/// `OpenAPI` document with info taken from Cargo metadata.
#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    let mut spec = ApiDoc::openapi();

    spec.info.title = env!("CARGO_PKG_NAME").to_string();
    spec.info.version = env!("CARGO_PKG_VERSION").to_string();
    spec.info.description = non_empty(env!("CARGO_PKG_DESCRIPTION")).map(str::to_string);
    spec.info.contact = cargo_contact();
    spec.info.license = non_empty(env!("CARGO_PKG_LICENSE")).map(|identifier| {
        let mut license = License::new(identifier);
        license.identifier = Some(identifier.to_string());
        license
    });

    spec
}

fn cargo_contact() -> Option<Contact> {
    // Cargo authors are `;` separated and may include "Name <email>".
    let primary = env!("CARGO_PKG_AUTHORS").split(';').next().map(str::trim)?;
    let (name, email) = parse_author(primary);
    if name.is_none() && email.is_none() {
        return None;
    }

    let mut contact = Contact::new();
    contact.name = name.map(str::to_string);
    contact.email = email.map(str::to_string);
    Some(contact)
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn parse_author(author: &str) -> (Option<&str>, Option<&str>) {
    match author.split_once('<') {
        Some((name, email)) => (non_empty(name), non_empty(email.trim_end_matches('>'))),
        None => (non_empty(author), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_info_from_cargo() {
        let spec = openapi();
        assert_eq!(spec.info.title, "superheroes");
        assert_eq!(spec.info.version, env!("CARGO_PKG_VERSION"));

        let contact = spec.info.contact;
        assert_eq!(
            contact.as_ref().and_then(|c| c.name.as_deref()),
            Some("Team Superheroes")
        );
        assert_eq!(
            contact.as_ref().and_then(|c| c.email.as_deref()),
            Some("team@superheroes.dev")
        );
        assert_eq!(
            spec.info.license.map(|l| l.name),
            Some("BSD-3-Clause".to_string())
        );
    }

    #[test]
    fn openapi_documents_every_route() {
        let spec = openapi();
        for path in [
            "/health",
            "/heroes",
            "/heroes/{id}",
            "/powers",
            "/powers/{id}",
            "/hero_powers",
        ] {
            assert!(spec.paths.paths.contains_key(path), "missing {path}");
        }
        let tags = spec.tags.unwrap_or_default();
        assert!(tags.iter().any(|tag| tag.name == "hero_powers"));
    }

    #[test]
    fn parse_author_variants() {
        assert_eq!(
            parse_author("Jane Doe <jane@example.com>"),
            (Some("Jane Doe"), Some("jane@example.com"))
        );
        assert_eq!(parse_author("Jane Doe"), (Some("Jane Doe"), None));
        assert_eq!(parse_author("<jane@example.com>"), (None, Some("jane@example.com")));
        assert_eq!(parse_author(""), (None, None));
    }
}
