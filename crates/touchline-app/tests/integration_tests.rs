// Integration tests for the touchline client.
//
// These tests drive the public API end-to-end against an in-memory fake of
// the fantasy server: catalog lookups, squad building through the composer,
// the save workflow, hydration, and the session store that carries a draft
// between invocations.

use std::sync::Mutex;

use async_trait::async_trait;

use touchline_app::api::types::User;
use touchline_app::api::{ApiError, FantasyApi};
use touchline_app::commands::team::{apply_add, apply_remove, AddSlot};
use touchline_app::commands::AppContext;
use touchline_app::config;
use touchline_app::db::SessionStore;
use touchline_app::workflow::{pull_team, save_draft, SaveError};
use touchline_core::squad::catalog::filter_players;
use touchline_core::squad::views::{self, SaveBlocker};
use touchline_core::team::{FantasyTeam, SetPlayersRequest, StarterPlayer};
use touchline_core::{Composer, Draft, Player, Position, Price, SquadError, SquadRules};

// ===========================================================================
// Fake server
// ===========================================================================

#[derive(Default)]
struct FakeState {
    team: Option<FantasyTeam>,
    created_names: Vec<String>,
    saves: Vec<(String, SetPlayersRequest)>,
    reject_saves_with: Option<String>,
}

struct FakeApi {
    catalog: Vec<Player>,
    state: Mutex<FakeState>,
}

impl FakeApi {
    fn new(catalog: Vec<Player>) -> Self {
        FakeApi {
            catalog,
            state: Mutex::new(FakeState::default()),
        }
    }

    fn with_team(self, team: FantasyTeam) -> Self {
        self.state.lock().unwrap().team = Some(team);
        self
    }

    fn find(&self, id: &str) -> Result<Player, ApiError> {
        self.catalog
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| ApiError::Server {
                status: 404,
                message: "Player not found".into(),
            })
    }
}

#[async_trait]
impl FantasyApi for FakeApi {
    async fn list_players(
        &self,
        position: Option<Position>,
        search: Option<&str>,
    ) -> Result<Vec<Player>, ApiError> {
        Ok(filter_players(&self.catalog, position, search)
            .into_iter()
            .cloned()
            .collect())
    }

    async fn get_player(&self, player_id: &str) -> Result<Player, ApiError> {
        self.find(player_id)
    }

    async fn my_team(&self) -> Result<Option<FantasyTeam>, ApiError> {
        Ok(self.state.lock().unwrap().team.clone())
    }

    async fn create_team(&self, name: &str) -> Result<FantasyTeam, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.created_names.push(name.to_string());
        let team = FantasyTeam {
            id: format!("team-{}", state.created_names.len()),
            user_id: Some("u1".into()),
            name: name.to_string(),
            captain_id: None,
            created_at: None,
            players: Vec::new(),
            bench: Vec::new(),
            total_points: 0,
        };
        state.team = Some(team.clone());
        Ok(team)
    }

    async fn set_team_players(
        &self,
        team_id: &str,
        request: &SetPlayersRequest,
    ) -> Result<FantasyTeam, ApiError> {
        let mut state = self.state.lock().unwrap();
        if let Some(message) = &state.reject_saves_with {
            return Err(ApiError::Server {
                status: 400,
                message: message.clone(),
            });
        }
        state.saves.push((team_id.to_string(), request.clone()));

        let mut players = Vec::new();
        for s in &request.starters {
            players.push(StarterPlayer {
                player: self.find(&s.player_id)?,
                assigned_position: s.assigned_position,
            });
        }
        let bench = request
            .bench_player_ids
            .iter()
            .map(|id| self.find(id))
            .collect::<Result<Vec<_>, _>>()?;

        let name = state
            .team
            .as_ref()
            .map(|t| t.name.clone())
            .unwrap_or_else(|| "My Squad".into());
        let team = FantasyTeam {
            id: team_id.to_string(),
            user_id: Some("u1".into()),
            name,
            captain_id: Some(request.captain_id.clone()),
            created_at: None,
            players,
            bench,
            total_points: 0,
        };
        state.team = Some(team.clone());
        Ok(team)
    }
}

// ===========================================================================
// Fixtures
// ===========================================================================

fn player(id: &str, name: &str, position: Position, cents: i64) -> Player {
    Player {
        id: id.into(),
        name: name.into(),
        position,
        secondary_position: None,
        is_top_player: false,
        team_name: "Harbour FC".into(),
        photo_url: None,
        price: Price::from_cents(cents),
        total_points: 0,
    }
}

/// Twelve players: enough for a full squad plus a dual-position player, a
/// pair of top players and a goalkeeper sharing the owner's name.
fn catalog() -> Vec<Player> {
    let mut dual = player("m3", "Dana Flex", Position::Defender, 600);
    dual.secondary_position = Some(Position::Midfielder);
    let mut star1 = player("f1", "Sol Striker", Position::Forward, 1200);
    star1.is_top_player = true;
    let mut star2 = player("f2", "Kit Finisher", Position::Forward, 1100);
    star2.is_top_player = true;
    let mut star3 = player("m4", "Ace Playmaker", Position::Midfielder, 1000);
    star3.is_top_player = true;

    vec![
        player("g1", "Gil Keeper", Position::Goalkeeper, 500),
        player("g2", "Casey Coach", Position::Goalkeeper, 450),
        player("d1", "Dre Stone", Position::Defender, 550),
        player("d2", "Lee Wall", Position::Defender, 500),
        player("d3", "Pat Block", Position::Defender, 400),
        player("m1", "Max Engine", Position::Midfielder, 650),
        player("m2", "Rio Pass", Position::Midfielder, 600),
        dual,
        star1,
        star2,
        star3,
        player("f3", "Ty Poacher", Position::Forward, 450),
    ]
}

fn composer() -> Composer {
    Composer::new(SquadRules::default()).with_owner("Casey Coach")
}

/// Build the standard complete squad through the fake catalog.
async fn build_complete_draft(api: &FakeApi) -> Draft {
    let c = composer();
    let mut draft = Draft::new();
    for (id, slot) in [
        ("g1", AddSlot::Starter(None)),
        ("d1", AddSlot::Starter(None)),
        ("d2", AddSlot::Starter(None)),
        ("m1", AddSlot::Starter(None)),
        ("m3", AddSlot::Starter(Some(Position::Midfielder))),
        ("f1", AddSlot::Starter(None)),
        ("d3", AddSlot::Bench),
        ("f3", AddSlot::Bench),
        ("g2", AddSlot::Bench),
    ] {
        let p = api.get_player(id).await.unwrap();
        draft = apply_add(&c, &draft, &p, slot).unwrap();
    }
    c.set_captain(&draft, "f1").unwrap()
}

fn sample_user() -> User {
    User {
        id: "u1".into(),
        username: "casey".into(),
        full_name: "Casey Coach".into(),
        email: "casey@example.com".into(),
        created_at: None,
    }
}

// ===========================================================================
// Squad building against the catalog
// ===========================================================================

#[tokio::test]
async fn complete_squad_is_save_ready() {
    let api = FakeApi::new(catalog());
    let draft = build_complete_draft(&api).await;
    let rules = SquadRules::default();

    assert_eq!(views::formation_label(&draft).as_deref(), Some("2-2-1"));
    assert!(views::missing_positions(&draft).is_empty());
    assert_eq!(views::bench_goalkeeper_count(&draft), 1);
    assert_eq!(views::top_player_count(&draft), 1);
    assert!(composer().is_save_ready(&draft));
    assert_eq!(
        views::remaining_budget(&draft, &rules),
        Price::from_cents(7000 - 5300)
    );
}

#[tokio::test]
async fn owner_cannot_captain_their_namesake() {
    let api = FakeApi::new(catalog());
    let c = composer();
    let keeper = api.get_player("g2").await.unwrap();
    let draft = apply_add(&c, &Draft::new(), &keeper, AddSlot::Starter(None)).unwrap();

    let err = c.set_captain(&draft, "g2").unwrap_err();
    assert!(matches!(err, SquadError::SelfCaptaincyForbidden { .. }));
    assert!(draft.captain_id().is_none());
}

#[tokio::test]
async fn third_top_player_is_refused_until_one_leaves() {
    let api = FakeApi::new(catalog());
    let c = composer();
    let mut draft = Draft::new();
    for id in ["f1", "f2"] {
        let p = api.get_player(id).await.unwrap();
        draft = apply_add(&c, &draft, &p, AddSlot::Starter(None)).unwrap();
    }
    let third = api.get_player("m4").await.unwrap();
    assert_eq!(
        apply_add(&c, &draft, &third, AddSlot::Starter(None)).unwrap_err(),
        SquadError::TopPlayerLimitExceeded { limit: 2 }
    );

    let draft = apply_remove(&c, &draft, "f2").unwrap();
    assert!(apply_add(&c, &draft, &third, AddSlot::Starter(None)).is_ok());
}

#[tokio::test]
async fn catalog_filter_matches_secondary_position() {
    let api = FakeApi::new(catalog());
    let mids = api.list_players(Some(Position::Midfielder), None).await.unwrap();
    assert!(mids.iter().any(|p| p.id == "m3"));
    assert!(mids.iter().all(|p| p.can_play(Position::Midfielder)));

    let search = api.list_players(None, Some("STONE")).await.unwrap();
    assert_eq!(search.len(), 1);
    assert_eq!(search[0].id, "d1");
}

// ===========================================================================
// Save workflow
// ===========================================================================

#[tokio::test]
async fn first_save_creates_team_then_saves() {
    let api = FakeApi::new(catalog());
    let draft = build_complete_draft(&api).await;

    let saved = save_draft(&api, &draft, &composer(), None, "Casey's XI")
        .await
        .unwrap();

    let state = api.state.lock().unwrap();
    assert_eq!(state.created_names, vec!["Casey's XI".to_string()]);
    assert_eq!(state.saves.len(), 1);
    assert_eq!(state.saves[0].0, "team-1");
    assert_eq!(state.saves[0].1.captain_id, "f1");
    assert_eq!(state.saves[0].1.bench_player_ids, vec!["d3", "f3", "g2"]);

    assert_eq!(saved.team.id, "team-1");
    assert_eq!(saved.draft, draft);
}

#[tokio::test]
async fn known_team_id_skips_creation() {
    let api = FakeApi::new(catalog());
    let draft = build_complete_draft(&api).await;

    save_draft(&api, &draft, &composer(), Some("team-42"), "ignored")
        .await
        .unwrap();

    let state = api.state.lock().unwrap();
    assert!(state.created_names.is_empty());
    assert_eq!(state.saves[0].0, "team-42");
}

#[tokio::test]
async fn incomplete_draft_is_refused_without_requests() {
    let api = FakeApi::new(catalog());
    let draft = build_complete_draft(&api).await;
    let draft = composer().clear_captain(&draft);

    let err = save_draft(&api, &draft, &composer(), None, "My Squad")
        .await
        .unwrap_err();
    match err {
        SaveError::NotReady(blockers) => assert_eq!(blockers, vec![SaveBlocker::NoCaptain]),
        other => panic!("expected NotReady, got {other:?}"),
    }

    let state = api.state.lock().unwrap();
    assert!(state.created_names.is_empty());
    assert!(state.saves.is_empty());
}

#[tokio::test]
async fn server_rejection_surfaces_message_and_keeps_draft() {
    let api = FakeApi::new(catalog());
    let draft = build_complete_draft(&api).await;
    api.state.lock().unwrap().reject_saves_with =
        Some("Bench must include exactly 1 goalkeeper (GK)".into());

    let err = save_draft(&api, &draft, &composer(), Some("team-1"), "My Squad")
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Bench must include exactly 1 goalkeeper (GK)"
    );
    assert!(composer().is_save_ready(&draft));
}

// ===========================================================================
// Hydration
// ===========================================================================

#[tokio::test]
async fn pull_without_team_yields_empty_draft() {
    let api = FakeApi::new(catalog());
    let (team, draft) = pull_team(&api).await.unwrap();
    assert!(team.is_none());
    assert!(draft.is_empty());
}

#[tokio::test]
async fn pull_hydrates_legacy_team_as_is() {
    let cat = catalog();
    let legacy = FantasyTeam {
        id: "team-7".into(),
        user_id: Some("u1".into()),
        name: "Old Boys".into(),
        captain_id: None,
        created_at: None,
        players: vec![StarterPlayer {
            player: cat[2].clone(),
            assigned_position: Position::Defender,
        }],
        bench: vec![cat[0].clone(), cat[1].clone()],
        total_points: 31,
    };
    let api = FakeApi::new(cat).with_team(legacy);

    let (team, draft) = pull_team(&api).await.unwrap();
    assert_eq!(team.map(|t| t.id).as_deref(), Some("team-7"));
    assert_eq!(draft.starters().len(), 1);
    // Two bench keepers would never pass the composer, but hydration keeps them.
    assert_eq!(views::bench_goalkeeper_count(&draft), 2);
    assert!(!composer().is_save_ready(&draft));
}

#[tokio::test]
async fn hydrated_self_captain_is_refused_before_save() {
    let cat = catalog();
    let find = |id: &str| cat.iter().find(|p| p.id == id).cloned().unwrap();
    let starter = |id: &str, pos| StarterPlayer {
        player: find(id),
        assigned_position: pos,
    };
    // Saved elsewhere with the owner's namesake keeper as captain.
    let team = FantasyTeam {
        id: "team-9".into(),
        user_id: Some("u1".into()),
        name: "Casey's XI".into(),
        captain_id: Some("g2".into()),
        created_at: None,
        players: vec![
            starter("g2", Position::Goalkeeper),
            starter("d1", Position::Defender),
            starter("d2", Position::Defender),
            starter("m1", Position::Midfielder),
            starter("m3", Position::Midfielder),
            starter("f1", Position::Forward),
        ],
        bench: vec![find("g1"), find("d3"), find("f3")],
        total_points: 0,
    };
    let api = FakeApi::new(cat.clone()).with_team(team);

    let (_, draft) = pull_team(&api).await.unwrap();
    assert!(views::is_save_ready(&draft, &SquadRules::default()));

    let err = save_draft(&api, &draft, &composer(), Some("team-9"), "ignored")
        .await
        .unwrap_err();
    match err {
        SaveError::NotReady(blockers) => assert_eq!(
            blockers,
            vec![SaveBlocker::SelfCaptain {
                name: "Casey Coach".into()
            }]
        ),
        other => panic!("expected NotReady, got {other:?}"),
    }
    assert!(api.state.lock().unwrap().saves.is_empty());

    let fixed = composer().set_captain(&draft, "f1").unwrap();
    assert!(save_draft(&api, &fixed, &composer(), Some("team-9"), "ignored")
        .await
        .is_ok());
}

// ===========================================================================
// Session store
// ===========================================================================

#[tokio::test]
async fn draft_survives_between_sessions_and_logout_clears_it() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("session.db");
    let path = path.to_string_lossy();

    let api = FakeApi::new(catalog());
    let draft = build_complete_draft(&api).await;
    {
        let store = SessionStore::open(&path).unwrap();
        store.save_auth("tok", &sample_user()).unwrap();
        store.set_team_id("team-1").unwrap();
        store.save_draft(&draft).unwrap();
    }

    let store = SessionStore::open(&path).unwrap();
    assert_eq!(store.load_draft().unwrap(), Some(draft));
    assert_eq!(store.user().unwrap().map(|u| u.full_name).as_deref(), Some("Casey Coach"));

    store.clear_auth().unwrap();
    assert!(store.load_draft().unwrap().is_none());
    assert!(store.team_id().unwrap().is_none());
}

#[test]
fn app_context_opens_session_in_data_dir() {
    let tmp = tempfile::tempdir().unwrap();
    let config = config::load_config(Some(&tmp.path().join("config"))).unwrap();
    let data_dir = tmp.path().join("data");

    {
        let ctx = AppContext::open(config.clone(), &data_dir).unwrap();
        ctx.session.save_auth("tok", &sample_user()).unwrap();
        assert_eq!(ctx.composer().unwrap().owner_name(), Some("Casey Coach"));
    }
    assert!(data_dir.join("session.db").is_file());

    let reopened = AppContext::open(config, &data_dir).unwrap();
    assert_eq!(reopened.session.token().unwrap().as_deref(), Some("tok"));
}

#[test]
fn config_bootstrap_and_session_path() {
    let tmp = tempfile::tempdir().unwrap();
    let config = config::load_config(Some(tmp.path())).unwrap();
    assert_eq!(
        config.session_db_path(tmp.path()),
        tmp.path().join("session.db")
    );
}
