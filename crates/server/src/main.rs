//! Team Builder Server
//!
//! Axum server exposing the team builder over a JSON API, plus a couple of
//! one-shot CLI commands that share the same configuration and store.

mod api;

use axum::{
    http::header,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse,
    },
    routing::{get, put},
    Router,
};
use clap::{Parser, Subcommand};
use futures::stream::{self, Stream};
use std::{collections::HashMap, convert::Infallible, net::SocketAddr, sync::Arc, time::Duration};
use teambuilder_core::{
    config::config_path, open_store, AppConfig, PokeApiCatalog, TeamStats, TeamSynchronizer,
};
use tokio::{net::TcpListener, sync::broadcast::error::RecvError};
use utoipa::OpenApi;

use api::{
    catalog::{self as catalog_api, catalog_routes},
    teams::{self as teams_api, team_routes},
    AppState, SharedState,
};

#[derive(Parser, Clone)]
#[command(author, version, about = "Team Builder - build and sync Pokémon teams")]
struct Args {
    /// Override the configured team store (memory, sqlite, firestore)
    #[arg(long, global = true)]
    store: Option<String>,

    #[command(subcommand)]
    command: Option<CliCommand>,
}

#[derive(Subcommand, Clone)]
enum CliCommand {
    /// Start the API server (default)
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },
    /// List stored teams with their stats
    Teams,
    /// Search the species catalog
    Catalog {
        /// Case-insensitive name filter
        query: Option<String>,
    },
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Team Builder API",
        version = "1.0.0",
        description = "Create teams, pick members from the catalog, keep everything in sync with the team store"
    ),
    paths(
        teams_api::get_state,
        teams_api::list_teams,
        teams_api::create_team,
        teams_api::rename_team,
        teams_api::delete_team,
        teams_api::add_member,
        teams_api::remove_member,
        teams_api::team_stats,
        teams_api::select_team,
        catalog_api::search_catalog,
        catalog_api::reload_catalog
    ),
    components(
        schemas(
            api::ApiResponse,
            api::MemberView,
            api::TeamView,
            api::StatsView,
            api::StateView,
            api::CatalogItem,
            teams_api::CreateTeamRequest,
            teams_api::CreateTeamResponse,
            teams_api::RenameTeamRequest,
            teams_api::AddMemberRequest,
            teams_api::SelectTeamRequest,
            catalog_api::CatalogResponse
        )
    ),
    tags(
        (name = "teams", description = "Team lifecycle and membership"),
        (name = "catalog", description = "Species catalog search")
    )
)]
struct ApiDoc;

/// SSE stream of sync events with a heartbeat every 15 seconds
async fn events(
    axum::extract::State(state): axum::extract::State<SharedState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.sync.subscribe();

    let stream = stream::unfold(rx, |mut rx| async move {
        let timeout = tokio::time::timeout(Duration::from_secs(15), rx.recv()).await;

        match timeout {
            Ok(Ok(event)) => {
                let json = serde_json::to_string(&event).unwrap_or_default();
                Some((Ok(Event::default().data(json)), rx))
            }
            // Slow client; the next event carries the full team list anyway
            Ok(Err(RecvError::Lagged(skipped))) => Some((
                Ok(Event::default().comment(format!("lagged {}", skipped))),
                rx,
            )),
            Ok(Err(RecvError::Closed)) => None,
            Err(_) => Some((Ok(Event::default().comment("heartbeat")), rx)),
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

async fn serve_openapi() -> impl IntoResponse {
    let spec = ApiDoc::openapi().to_json().unwrap_or_default();
    ([(header::CONTENT_TYPE, "application/json")], spec)
}

/// Load configuration from the config file, `.env` and the process environment
fn load_config(store_override: Option<&str>) -> anyhow::Result<AppConfig> {
    let mut env: HashMap<String, String> = std::env::vars().collect();
    if let Some(store) = store_override {
        env.insert("TEAMBUILDER_STORE".to_string(), store.to_string());
    }
    let config = AppConfig::from_file(&config_path())?.with_overrides(&env)?;
    Ok(config)
}

fn build_state(config: &AppConfig) -> anyhow::Result<SharedState> {
    let store = open_store(config)?;
    let catalog = PokeApiCatalog::new(&config.catalog_url, config.http_timeout())?;
    Ok(Arc::new(AppState {
        sync: TeamSynchronizer::new(store),
        catalog: Arc::new(catalog),
        catalog_limit: config.catalog_limit,
    }))
}

async fn run_server(state: SharedState, port: u16) -> anyhow::Result<()> {
    match state.sync.load_teams().await {
        Ok(teams) => println!(
            "📋 Loaded {} teams from {}",
            teams.len(),
            state.sync.store().backend_name()
        ),
        Err(e) => eprintln!("⚠️ Failed to load teams: {}", e),
    }

    // Catalog loads in the background; searches see it once it lands
    let catalog_state = state.clone();
    tokio::spawn(async move {
        let count = catalog_state
            .sync
            .load_catalog(catalog_state.catalog.as_ref(), catalog_state.catalog_limit)
            .await;
        println!("📚 Loaded {} catalog entries", count);
    });

    let app = Router::new()
        .route("/api/v1/state", get(teams_api::get_state))
        .route("/api/v1/active", put(teams_api::select_team))
        .route("/api/v1/events", get(events))
        .nest("/api/v1/teams", team_routes())
        .nest("/api/v1/catalog", catalog_routes())
        .route("/api/v1/openapi.json", get(serve_openapi))
        .with_state(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    println!("🚀 Team Builder running at http://{}", addr);
    println!("   API v1 Routes:");
    println!("   State:   /api/v1/state, /active (PUT), /events");
    println!("   Teams:   /api/v1/teams, /:id, /:id/members, /:id/stats");
    println!("   Catalog: /api/v1/catalog?q=, /reload");
    println!("   Docs:    /api/v1/openapi.json");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn print_teams(state: SharedState) -> anyhow::Result<()> {
    let teams = state.sync.load_teams().await?;
    if teams.is_empty() {
        println!("No teams yet.");
        return Ok(());
    }
    for team in &teams {
        let stats = TeamStats::of(&team.pokemons);
        println!(
            "{} [{}] {}/{} avg exp {} types: {}",
            team.name,
            team.id,
            stats.size,
            stats.capacity,
            stats.average_base_experience,
            stats.types_covered.join(", ")
        );
        for member in &team.pokemons {
            println!("   - {} ({})", member.name, member.type_);
        }
    }
    Ok(())
}

async fn print_catalog(state: SharedState, query: Option<String>) -> anyhow::Result<()> {
    let count = state
        .sync
        .load_catalog(state.catalog.as_ref(), state.catalog_limit)
        .await;
    if count == 0 {
        eprintln!("⚠️ Catalog source returned no entries");
        return Ok(());
    }
    state.sync.set_query(query.as_deref().unwrap_or_default()).await;
    for entry in state.sync.filtered_catalog().await {
        println!(
            "{:<16} {:<20} base exp {}",
            entry.name, entry.type_, entry.base_experience
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let config = load_config(args.store.as_deref())?;
    let state = build_state(&config)?;

    match args.command {
        Some(CliCommand::Teams) => print_teams(state).await,
        Some(CliCommand::Catalog { query }) => print_catalog(state, query).await,
        Some(CliCommand::Serve { port }) => {
            print_banner();
            run_server(state, port).await
        }
        None => {
            print_banner();
            run_server(state, 8080).await
        }
    }
}

fn print_banner() {
    println!("╔══════════════════════════════════════╗");
    println!("║          TEAM BUILDER SERVER         ║");
    println!("╚══════════════════════════════════════╝");
}
