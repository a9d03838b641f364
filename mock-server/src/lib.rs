use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

pub const DEFAULT_TOKEN: &str = "test-token";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Powerstats {
    pub intelligence: String,
    pub strength: String,
    pub speed: String,
    pub durability: String,
    pub power: String,
    pub combat: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Biography {
    #[serde(rename = "full-name")]
    pub full_name: String,
    pub aliases: Vec<String>,
    pub publisher: String,
    pub alignment: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Work {
    pub occupation: String,
    pub base: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Hero {
    pub id: String,
    pub name: String,
    pub powerstats: Powerstats,
    pub biography: Biography,
    pub work: Work,
    pub image: Image,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HeroSummary {
    pub id: String,
    pub name: String,
    pub image: Image,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub response: String,
    #[serde(rename = "results-for")]
    pub results_for: String,
    pub results: Vec<HeroSummary>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HeroResponse {
    pub response: String,
    #[serde(flatten)]
    pub hero: Hero,
}

/// The upstream reports failures with status 200 and this body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub response: String,
    pub error: String,
}

impl ErrorResponse {
    fn new(error: &str) -> Json<Self> {
        Json(Self {
            response: "error".to_string(),
            error: error.to_string(),
        })
    }
}

#[derive(Clone)]
struct AppState {
    token: Arc<str>,
    heroes: Arc<Vec<Hero>>,
}

pub fn app() -> Router {
    app_with(DEFAULT_TOKEN, fixtures())
}

pub fn app_with(token: &str, heroes: Vec<Hero>) -> Router {
    let state = AppState {
        token: Arc::from(token),
        heroes: Arc::new(heroes),
    };
    Router::new()
        .route("/api/{token}/search/{name}", get(search_heroes))
        .route("/api/{token}/{id}", get(get_hero))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with(listener: TcpListener, token: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(token, fixtures())).await
}

async fn search_heroes(
    State(state): State<AppState>,
    Path((token, name)): Path<(String, String)>,
) -> Result<Json<SearchResponse>, Json<ErrorResponse>> {
    if token != *state.token {
        return Err(ErrorResponse::new("access denied"));
    }
    let needle = name.to_lowercase();
    let results: Vec<HeroSummary> = state
        .heroes
        .iter()
        .filter(|h| h.name.to_lowercase().contains(&needle))
        .map(|h| HeroSummary {
            id: h.id.clone(),
            name: h.name.clone(),
            image: h.image.clone(),
        })
        .collect();
    tracing::debug!(%name, hits = results.len(), "search");
    if results.is_empty() {
        return Err(ErrorResponse::new("character with given name not found"));
    }
    Ok(Json(SearchResponse {
        response: "success".to_string(),
        results_for: name,
        results,
    }))
}

async fn get_hero(
    State(state): State<AppState>,
    Path((token, id)): Path<(String, String)>,
) -> Result<Json<HeroResponse>, Json<ErrorResponse>> {
    if token != *state.token {
        return Err(ErrorResponse::new("access denied"));
    }
    tracing::debug!(%id, "lookup");
    state
        .heroes
        .iter()
        .find(|h| h.id == id)
        .cloned()
        .map(|hero| {
            Json(HeroResponse {
                response: "success".to_string(),
                hero,
            })
        })
        .ok_or_else(|| ErrorResponse::new("invalid id"))
}

#[allow(clippy::too_many_arguments)]
fn hero(
    id: &str,
    name: &str,
    stats: [&str; 6],
    full_name: &str,
    aliases: &[&str],
    publisher: &str,
    alignment: &str,
    work: (&str, &str),
) -> Hero {
    let [intelligence, strength, speed, durability, power, combat] = stats.map(String::from);
    Hero {
        id: id.to_string(),
        name: name.to_string(),
        powerstats: Powerstats {
            intelligence,
            strength,
            speed,
            durability,
            power,
            combat,
        },
        biography: Biography {
            full_name: full_name.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
            publisher: publisher.to_string(),
            alignment: alignment.to_string(),
        },
        work: Work {
            occupation: work.0.to_string(),
            base: work.1.to_string(),
        },
        image: Image {
            url: format!("https://www.superherodb.com/pictures2/portraits/10/100/{id}.jpg"),
        },
    }
}

/// Built-in dataset. Search order follows this list.
pub fn fixtures() -> Vec<Hero> {
    vec![
        hero(
            "70",
            "Batman",
            ["100", "26", "27", "50", "47", "100"],
            "Bruce Wayne",
            &["Insider", "Matches Malone"],
            "DC Comics",
            "good",
            ("Businessman", "Batcave, Stately Wayne Manor, Gotham City"),
        ),
        hero(
            "69",
            "Batman",
            ["81", "40", "29", "55", "63", "90"],
            "Terry McGinnis",
            &["Batman II", "The Tomorrow Knight"],
            "DC Comics",
            "good",
            ("-", "21st Century Gotham City"),
        ),
        hero(
            "490",
            "Nightwing",
            ["88", "11", "33", "28", "36", "100"],
            "Dick Grayson",
            &["Robin", "Boy Wonder"],
            "DC Comics",
            "good",
            ("-", "Gotham City"),
        ),
        hero(
            "620",
            "Spider-Man",
            ["90", "55", "67", "75", "74", "85"],
            "Peter Parker",
            &["Spiderman", "Bag-Man", "Black Marvel", "Captain Universe"],
            "Marvel Comics",
            "good",
            ("Freelance photographer, teacher", "New York, New York"),
        ),
        hero(
            "346",
            "Iron Man",
            ["100", "85", "58", "85", "100", "64"],
            "Tony Stark",
            &["Iron Knight", "Hogan Potts", "Spare Parts Man"],
            "Marvel Comics",
            "good",
            ("Inventor, industrialist", "Seattle, Washington"),
        ),
        hero(
            "370",
            "Joker",
            ["100", "10", "12", "60", "43", "70"],
            "Jack Napier",
            &["Red Hood", "Clown Prince of Crime"],
            "DC Comics",
            "bad",
            ("Professional criminal", "Arkham Asylum, Gotham City"),
        ),
        hero(
            "251",
            "Deadpool",
            ["69", "32", "50", "100", "100", "100"],
            "Wade Wilson",
            &["Merc with a Mouth"],
            "Marvel Comics",
            "neutral",
            ("Mercenary", "Mobile"),
        ),
        hero(
            "1",
            "A-Bomb",
            ["38", "100", "17", "80", "24", "64"],
            "Richard Milhouse Jones",
            &["Rick Jones"],
            "Marvel Comics",
            "good",
            ("Musician, adventurer, author", "-"),
        ),
        hero(
            "10",
            "Agent Bob",
            ["null", "null", "null", "null", "null", "null"],
            "Bob",
            &["-"],
            "Marvel Comics",
            "good",
            ("-", "-"),
        ),
    ]
}
