//! Tic-tac-toe matchmaking client.
//!
//! The lobby (`/`) creates or joins a match and routes to `/match/:matchId`. Matches are played
//! hot-seat on a local board; matchmaking against remote players is not wired up.

use desktop_app_contract::{
    use_app_router, use_app_routes, AppRouteDefinition, AppRouterProvider, RouteParams,
    RouteRenderer,
};
use leptos::*;

const LOBBY_PATH: &str = "/";
const MATCH_PATH: &str = "/match/:matchId";

const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    X,
    O,
}

impl Mark {
    fn other(self) -> Self {
        match self {
            Self::X => Self::O,
            Self::O => Self::X,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::X => "X",
            Self::O => "O",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    InProgress { next: Mark },
    Won(Mark),
    Draw,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Board {
    cells: [Option<Mark>; 9],
    next: Mark,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            cells: [None; 9],
            next: Mark::X,
        }
    }
}

impl Board {
    /// Places the next mark. Returns `false` for occupied cells, out-of-range indices, or a
    /// finished game.
    fn play(&mut self, index: usize) -> bool {
        if !matches!(self.outcome(), Outcome::InProgress { .. }) {
            return false;
        }
        let Some(cell) = self.cells.get_mut(index) else {
            return false;
        };
        if cell.is_some() {
            return false;
        }
        *cell = Some(self.next);
        self.next = self.next.other();
        true
    }

    fn outcome(&self) -> Outcome {
        for [a, b, c] in WINNING_LINES {
            if let Some(mark) = self.cells[a] {
                if self.cells[b] == Some(mark) && self.cells[c] == Some(mark) {
                    return Outcome::Won(mark);
                }
            }
        }
        if self.cells.iter().all(Option::is_some) {
            Outcome::Draw
        } else {
            Outcome::InProgress { next: self.next }
        }
    }
}

fn match_path(match_id: u32) -> String {
    format!("/match/{match_id}")
}

/// Parses a user-entered match code such as `12` or `#12`.
fn parse_match_code(raw: &str) -> Option<u32> {
    raw.trim().trim_start_matches('#').parse().ok().filter(|id| *id > 0)
}

#[component]
pub fn TicTacToeApp() -> impl IntoView {
    view! {
        <div class="app app-tic-tac-toe">
            <AppRouterProvider>
                <TicTacToeRoutes />
            </AppRouterProvider>
        </div>
    }
}

/// Hands out match numbers for one app window; outlives lobby remounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MatchCounter(u32);

impl Default for MatchCounter {
    fn default() -> Self {
        Self(1)
    }
}

impl MatchCounter {
    fn take(&mut self) -> u32 {
        let id = self.0;
        self.0 = self.0.saturating_add(1);
        id
    }
}

#[component]
fn TicTacToeRoutes() -> impl IntoView {
    let counter = store_value(MatchCounter::default());
    let router = use_app_routes([
        AppRouteDefinition::new(LOBBY_PATH, move |_| {
            view! { <MatchLobby counter=counter /> }.into_view()
        }),
        AppRouteDefinition::new(MATCH_PATH, |params| {
            view! { <MatchBoard params=params /> }.into_view()
        }),
    ]);
    router.navigate(LOBBY_PATH);

    view! { <RouteRenderer /> }
}

#[component]
fn MatchLobby(counter: StoredValue<MatchCounter>) -> impl IntoView {
    let router = use_app_router();
    let join_code = create_rw_signal(String::new());
    let join_error = create_rw_signal(None::<String>);

    let create_match = {
        let router = router.clone();
        move |_| {
            let match_id = counter
                .try_update_value(MatchCounter::take)
                .unwrap_or_default();
            if match_id > 0 {
                router.navigate(&match_path(match_id));
            }
        }
    };
    let join_match = move |_| match parse_match_code(&join_code.get_untracked()) {
        Some(match_id) => {
            join_error.set(None);
            router.navigate(&match_path(match_id));
        }
        None => join_error.set(Some("Enter a match number like 12".to_string())),
    };

    view! {
        <section class="ttt-lobby">
            <h2>"Tic-Tac-Toe"</h2>
            <button on:click=create_match>"Create match"</button>
            <div class="ttt-join">
                <input
                    placeholder="Match #"
                    prop:value=move || join_code.get()
                    on:input=move |ev| join_code.set(event_target_value(&ev))
                />
                <button on:click=join_match>"Join"</button>
            </div>
            {move || join_error.get().map(|err| view! { <p class="ttt-error">{err}</p> })}
        </section>
    }
}

#[component]
fn MatchBoard(params: RouteParams) -> impl IntoView {
    let router = use_app_router();
    let match_id = params.get("matchId").cloned().unwrap_or_default();
    let board = create_rw_signal(Board::default());

    let status = move || match board.with(Board::outcome) {
        Outcome::InProgress { next } => format!("{} to move", next.label()),
        Outcome::Won(mark) => format!("{} wins", mark.label()),
        Outcome::Draw => "Draw".to_string(),
    };

    view! {
        <section class="ttt-match">
            <h2>{format!("Match #{match_id}")}</h2>
            <p class="ttt-status">{status}</p>
            <div class="ttt-board" role="grid">
                {(0..9)
                    .map(|index| {
                        let label = move || {
                            board.with(|b| b.cells[index].map(Mark::label).unwrap_or(""))
                        };
                        view! {
                            <button
                                class="ttt-cell"
                                role="gridcell"
                                on:click=move |_| {
                                    board.update(|b| {
                                        b.play(index);
                                    });
                                }
                            >
                                {label}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
            <button on:click=move |_| board.set(Board::default())>"Rematch"</button>
            <button on:click=move |_| {
                router.back();
            }>"Leave match"</button>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn row_completion_wins() {
        let mut board = Board::default();
        for index in [0, 3, 1, 4, 2] {
            assert!(board.play(index));
        }

        assert_eq!(board.outcome(), Outcome::Won(Mark::X));
        assert!(!board.play(8));
    }

    #[test]
    fn occupied_and_out_of_range_cells_are_rejected() {
        let mut board = Board::default();
        assert!(board.play(4));
        assert!(!board.play(4));
        assert!(!board.play(9));
        assert_eq!(board.outcome(), Outcome::InProgress { next: Mark::O });
    }

    #[test]
    fn full_board_without_line_is_a_draw() {
        let mut board = Board::default();
        for index in [0, 1, 2, 4, 3, 5, 7, 6, 8] {
            assert!(board.play(index));
        }

        assert_eq!(board.outcome(), Outcome::Draw);
    }

    #[test]
    fn match_counter_keeps_counting_across_lobby_visits() {
        let mut counter = MatchCounter::default();

        assert_eq!(counter.take(), 1);
        assert_eq!(counter.take(), 2);
        assert_eq!(counter, MatchCounter(3));
    }

    #[test]
    fn match_codes_accept_optional_hash() {
        assert_eq!(parse_match_code(" #12 "), Some(12));
        assert_eq!(parse_match_code("7"), Some(7));
        assert_eq!(parse_match_code("0"), None);
        assert_eq!(parse_match_code("abc"), None);
    }

    #[test]
    fn match_path_matches_route_pattern() {
        let pattern = desktop_app_contract::RoutePattern::compile(MATCH_PATH);
        let params = pattern.captures(&match_path(3)).expect("pattern matches");

        assert_eq!(params.get("matchId").map(String::as_str), Some("3"));
    }
}
