//! Turn-based battle lobby.
//!
//! The lobby lists open challenges. Accepting one opens a dispatch window to pick and confirm a
//! character, which then routes to `/gameplay/:gameId`. Battle resolution itself happens
//! on-chain and is out of scope here.

use desktop_app_contract::{
    use_app_router, use_app_routes, use_dispatch_windows, AppRouteDefinition, AppRouterContext,
    AppRouterProvider, DispatchContent, DispatchWindowConfig, DispatchWindowId,
    DispatchWindowsContext, Position, RouteParams, RouteRenderer, Size,
};
use leptos::*;

pub(super) const LOBBY_PATH: &str = "/";
pub(super) const GAMEPLAY_PATH: &str = "/gameplay/:gameId";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Challenge {
    pub game_id: u32,
    pub challenger: &'static str,
    pub wager: u32,
}

pub(super) const OPEN_CHALLENGES: [Challenge; 3] = [
    Challenge {
        game_id: 17,
        challenger: "0xA11CE",
        wager: 5,
    },
    Challenge {
        game_id: 42,
        challenger: "0xB0B",
        wager: 20,
    },
    Challenge {
        game_id: 108,
        challenger: "0xC4R0L",
        wager: 1,
    },
];

pub(super) const CHARACTERS: [&str; 4] = ["Knight", "Ranger", "Mage", "Rogue"];

pub(super) fn gameplay_path(game_id: u32) -> String {
    format!("/gameplay/{game_id}")
}

pub(super) fn character_params(character: &str) -> RouteParams {
    RouteParams::from([("character".to_string(), character.to_string())])
}

#[component]
pub fn ArenaApp() -> impl IntoView {
    view! {
        <div class="app app-arena">
            <AppRouterProvider>
                <ArenaRoutes />
            </AppRouterProvider>
        </div>
    }
}

#[component]
fn ArenaRoutes() -> impl IntoView {
    let router = use_app_routes([
        AppRouteDefinition::new(LOBBY_PATH, |_| view! { <ArenaLobby /> }.into_view()),
        AppRouteDefinition::new(GAMEPLAY_PATH, |params| {
            view! { <ArenaGameplay params=params /> }.into_view()
        }),
    ]);
    router.navigate(LOBBY_PATH);

    view! { <RouteRenderer /> }
}

#[component]
fn ArenaLobby() -> impl IntoView {
    let router = use_app_router();
    let dispatch = use_dispatch_windows();

    view! {
        <section class="arena-lobby">
            <h2>"Open challenges"</h2>
            <ul>
                {OPEN_CHALLENGES
                    .into_iter()
                    .map(|challenge| {
                        let router = router.clone();
                        view! {
                            <li class="arena-challenge">
                                <span>{format!("#{} from {}", challenge.game_id, challenge.challenger)}</span>
                                <span>{format!("{} tokens", challenge.wager)}</span>
                                <button on:click=move |_| {
                                    open_character_select(dispatch, router.clone(), challenge)
                                }>
                                    "Accept"
                                </button>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </section>
    }
}

/// Opens a character picker that swaps to a confirmation step, then closes itself and moves the
/// router to gameplay.
fn open_character_select(
    dispatch: DispatchWindowsContext,
    router: AppRouterContext,
    challenge: Challenge,
) {
    dispatch.create_dispatch_window_with(move |window_id| {
        let content = character_picker(dispatch, router, challenge, window_id);
        DispatchWindowConfig::new("Select a character to accept a challenge", content)
            .with_position(Position { x: 160, y: 120 })
            .with_size(Size {
                width: 360,
                height: 240,
            })
    });
}

fn character_picker(
    dispatch: DispatchWindowsContext,
    router: AppRouterContext,
    challenge: Challenge,
    window_id: DispatchWindowId,
) -> DispatchContent {
    DispatchContent::new(move || {
        let router = router.clone();
        view! {
            <div class="character-select">
                <p>{format!("Select a character to accept challenge #{}", challenge.game_id)}</p>
                {CHARACTERS
                    .into_iter()
                    .map(|character| {
                        let router = router.clone();
                        view! {
                            <button on:click=move |_| {
                                let confirm = confirm_character(
                                    dispatch,
                                    router.clone(),
                                    challenge,
                                    window_id,
                                    character,
                                );
                                dispatch.set_dispatch_content(window_id, confirm);
                            }>
                                {character}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        }
        .into_view()
    })
}

fn confirm_character(
    dispatch: DispatchWindowsContext,
    router: AppRouterContext,
    challenge: Challenge,
    window_id: DispatchWindowId,
    character: &'static str,
) -> DispatchContent {
    DispatchContent::new(move || {
        let fight = {
            let router = router.clone();
            move |_| {
                dispatch.close_dispatch_window(window_id);
                router.navigate_with(&gameplay_path(challenge.game_id), character_params(character));
            }
        };
        let pick_again = {
            let router = router.clone();
            move |_| {
                let picker = character_picker(dispatch, router.clone(), challenge, window_id);
                dispatch.set_dispatch_content(window_id, picker);
            }
        };
        view! {
            <div class="character-confirm">
                <p>
                    {format!(
                        "Fight {} as {character} for {} tokens?",
                        challenge.challenger,
                        challenge.wager,
                    )}
                </p>
                <button on:click=fight>"Fight"</button>
                <button on:click=pick_again>"Pick another"</button>
            </div>
        }
        .into_view()
    })
}

#[component]
fn ArenaGameplay(params: RouteParams) -> impl IntoView {
    let router = use_app_router();
    let can_go_back = {
        let router = router.clone();
        move || router.can_go_back()
    };
    let game_id = params.get("gameId").cloned().unwrap_or_default();
    let character = params
        .get("character")
        .cloned()
        .unwrap_or_else(|| "an unnamed fighter".to_string());
    let challenge = game_id
        .parse::<u32>()
        .ok()
        .and_then(|id| OPEN_CHALLENGES.into_iter().find(|c| c.game_id == id));

    view! {
        <section class="arena-gameplay">
            <h2>{format!("Game #{game_id}")}</h2>
            <p>{format!("Playing as {character}")}</p>
            {match challenge {
                Some(challenge) => view! {
                    <p>{format!("Opponent {} · {} tokens at stake", challenge.challenger, challenge.wager)}</p>
                }
                .into_view(),
                None => view! { <p>"Waiting for the match to be indexed."</p> }.into_view(),
            }}
            <button disabled=move || !can_go_back() on:click=move |_| {
                router.back();
            }>
                "Back to lobby"
            </button>
        </section>
    }
}
