//! Headless in-app router: a path-pattern registry plus a back-only navigation history.
//!
//! One [`InternalAppRouter`] backs one mini-app instance. The router never touches the
//! reactive runtime; [`crate::router_view`] bridges it into Leptos signals.

use std::{
    cell::{Cell, RefCell},
    collections::BTreeMap,
    rc::Rc,
};

use leptos::logging;

/// Named-segment values extracted from a navigated path, merged with explicit params.
pub type RouteParams = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
enum PatternSegment {
    Literal(String),
    Param(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Compiled matcher for a registered route path.
///
/// `:name` segments capture exactly one non-empty path segment; every other segment must match
/// literally. Matching is anchored at both ends of the path.
pub struct RoutePattern {
    segments: Vec<PatternSegment>,
}

impl RoutePattern {
    /// Compiles `path` into a matcher.
    pub fn compile(path: &str) -> Self {
        let segments = path
            .split('/')
            .map(|segment| match segment.strip_prefix(':') {
                Some(name) if is_param_name(name) => PatternSegment::Param(name.to_string()),
                _ => PatternSegment::Literal(segment.to_string()),
            })
            .collect();
        Self { segments }
    }

    /// Returns the captured named-segment values when `path` matches this pattern.
    pub fn captures(&self, path: &str) -> Option<RouteParams> {
        let parts: Vec<&str> = path.split('/').collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = RouteParams::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                PatternSegment::Literal(literal) if literal == part => {}
                PatternSegment::Literal(_) => return None,
                PatternSegment::Param(_) if part.is_empty() => return None,
                PatternSegment::Param(name) => {
                    params.insert(name.clone(), part.to_string());
                }
            }
        }
        Some(params)
    }
}

fn is_param_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[derive(Debug, Clone, PartialEq)]
/// A registered screen, or the resolved current screen when `params` is populated.
pub struct Route<C> {
    /// Path as registered, possibly containing `:name` segments.
    pub path: String,
    /// Renderable bound to this path.
    pub component: C,
    /// Matcher compiled from [`Route::path`].
    pub pattern: RoutePattern,
    /// Params extracted on navigation. Empty for registry entries.
    pub params: RouteParams,
}

#[derive(Debug, Clone, PartialEq)]
/// Current route plus the back stack.
pub struct RouterState<C> {
    /// Route currently displayed, if any navigation has succeeded.
    pub current_route: Option<Route<C>>,
    /// Previously displayed routes, most recent last.
    pub history: Vec<Route<C>>,
}

impl<C> Default for RouterState<C> {
    fn default() -> Self {
        Self {
            current_route: None,
            history: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Handle returned by [`InternalAppRouter::subscribe`].
pub struct SubscriptionId(u64);

type RouteListener<C> = Rc<dyn Fn(Option<&Route<C>>)>;

/// Path registry and navigation history for a single mini-app instance.
///
/// Methods take `&self` so the router can be shared through context as an `Rc`. Listeners are
/// invoked after every internal borrow is released, which lets a listener call back into the
/// router.
pub struct InternalAppRouter<C> {
    routes: RefCell<Vec<Route<C>>>,
    state: RefCell<RouterState<C>>,
    listeners: RefCell<Vec<(SubscriptionId, RouteListener<C>)>>,
    next_subscription: Cell<u64>,
}

impl<C> Default for InternalAppRouter<C> {
    fn default() -> Self {
        Self {
            routes: RefCell::new(Vec::new()),
            state: RefCell::new(RouterState::default()),
            listeners: RefCell::new(Vec::new()),
            next_subscription: Cell::new(1),
        }
    }
}

impl<C: Clone> InternalAppRouter<C> {
    /// Creates an empty router.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `component` under `path`.
    ///
    /// Re-registering a path logs a warning and replaces the earlier entry in place, so it keeps
    /// its original resolution order.
    pub fn register(&self, path: impl Into<String>, component: C) {
        let path = path.into();
        let route = Route {
            pattern: RoutePattern::compile(&path),
            path,
            component,
            params: RouteParams::new(),
        };

        let mut routes = self.routes.borrow_mut();
        match routes.iter_mut().find(|existing| existing.path == route.path) {
            Some(existing) => {
                logging::warn!("route `{}` is already registered; overwriting", route.path);
                *existing = route;
            }
            None => routes.push(route),
        }
    }

    /// Navigates to `path`, merging `additional_params` over the extracted segment values.
    ///
    /// Returns `false` (and logs) when no registered route matches; state is left untouched.
    pub fn navigate(&self, path: &str, additional_params: RouteParams) -> bool {
        let Some((route, mut params)) = self.resolve(path) else {
            logging::error!("no route registered for `{path}`");
            return false;
        };
        params.extend(additional_params);

        {
            let mut state = self.state.borrow_mut();
            if let Some(previous) = state.current_route.take() {
                state.history.push(previous);
            }
            state.current_route = Some(Route { params, ..route });
        }
        self.notify();
        true
    }

    /// Returns to the most recent history entry.
    ///
    /// Returns `false` (and logs) when history is empty.
    pub fn back(&self) -> bool {
        {
            let mut state = self.state.borrow_mut();
            let Some(previous) = state.history.pop() else {
                logging::warn!("router history is empty; ignoring back()");
                return false;
            };
            state.current_route = Some(previous);
        }
        self.notify();
        true
    }

    /// Adds a listener notified after every successful `navigate` or `back`.
    pub fn subscribe(&self, listener: impl Fn(Option<&Route<C>>) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription.get());
        self.next_subscription.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` when `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    /// Returns a clone of the current route.
    pub fn current_route(&self) -> Option<Route<C>> {
        self.state.borrow().current_route.clone()
    }

    /// Returns the params of the current route, or empty params.
    pub fn params(&self) -> RouteParams {
        self.state
            .borrow()
            .current_route
            .as_ref()
            .map(|route| route.params.clone())
            .unwrap_or_default()
    }

    /// Returns the number of routes that `back` can still return to.
    pub fn history_len(&self) -> usize {
        self.state.borrow().history.len()
    }

    fn resolve(&self, path: &str) -> Option<(Route<C>, RouteParams)> {
        let routes = self.routes.borrow();
        if let Some(route) = routes.iter().find(|route| route.path == path) {
            let params = route.pattern.captures(path).unwrap_or_default();
            return Some((route.clone(), params));
        }

        routes.iter().find_map(|route| {
            route
                .pattern
                .captures(path)
                .map(|params| (route.clone(), params))
        })
    }

    fn notify(&self) {
        let listeners: Vec<RouteListener<C>> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        let current = self.current_route();
        for listener in listeners {
            listener(current.as_ref());
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn router() -> InternalAppRouter<&'static str> {
        let router = InternalAppRouter::new();
        router.register("/", "lobby");
        router.register("/a", "exact");
        router.register("/a/:id", "pattern");
        router.register("/gameplay/:gameId", "battle");
        router
    }

    fn current_component(router: &InternalAppRouter<&'static str>) -> Option<&'static str> {
        router.current_route().map(|route| route.component)
    }

    #[test]
    fn exact_path_wins_over_pattern() {
        let router = router();

        assert!(router.navigate("/a", RouteParams::new()));
        assert_eq!(current_component(&router), Some("exact"));

        assert!(router.navigate("/a/7", RouteParams::new()));
        assert_eq!(current_component(&router), Some("pattern"));
        assert_eq!(router.params().get("id").map(String::as_str), Some("7"));
    }

    #[test]
    fn pattern_extracts_named_segments() {
        let router = router();

        assert!(router.navigate("/gameplay/42", RouteParams::new()));
        let route = router.current_route().expect("current route");
        assert_eq!(route.path, "/gameplay/:gameId");
        assert_eq!(route.params.get("gameId").map(String::as_str), Some("42"));
    }

    #[test]
    fn explicit_params_override_extracted_values() {
        let router = router();
        let mut extra = RouteParams::new();
        extra.insert("gameId".to_string(), "override".to_string());
        extra.insert("opponent".to_string(), "0xabc".to_string());

        assert!(router.navigate("/gameplay/42", extra));
        let params = router.params();
        assert_eq!(params.get("gameId").map(String::as_str), Some("override"));
        assert_eq!(params.get("opponent").map(String::as_str), Some("0xabc"));
    }

    #[test]
    fn back_restores_previous_route_and_tolerates_empty_history() {
        let router = InternalAppRouter::new();
        router.register("/x", "x");
        router.register("/y", "y");

        assert!(!router.back(), "back with no history is a no-op");
        assert!(router.current_route().is_none());

        router.navigate("/x", RouteParams::new());
        router.navigate("/y", RouteParams::new());
        assert_eq!(router.history_len(), 1);

        assert!(router.back());
        assert_eq!(router.current_route().map(|r| r.component), Some("x"));

        assert!(!router.back());
        assert_eq!(router.current_route().map(|r| r.component), Some("x"));
    }

    #[test]
    fn unknown_path_leaves_state_unchanged() {
        let router = router();
        router.navigate("/gameplay/1", RouteParams::new());
        let before = router.current_route();

        assert!(!router.navigate("/does-not-exist", RouteParams::new()));
        assert_eq!(router.current_route(), before);
        assert_eq!(router.history_len(), 0);
    }

    #[test]
    fn pattern_matching_is_anchored_and_rejects_empty_segments() {
        let pattern = RoutePattern::compile("/a/:id");

        assert!(pattern.captures("/a/").is_none());
        assert!(pattern.captures("/x/a/5").is_none());
        assert!(pattern.captures("/a/5/extra").is_none());
        assert_eq!(
            RoutePattern::compile("/plain").captures("/plain"),
            Some(RouteParams::new())
        );
    }

    #[test]
    fn duplicate_registration_overwrites_in_place() {
        let router = router();
        router.register("/a", "replacement");
        router.navigate("/a", RouteParams::new());
        assert_eq!(current_component(&router), Some("replacement"));

        router.register("/b/:first", "first");
        router.register("/b/:second", "second");
        router.register("/b/:first", "first again");
        assert!(router.navigate("/b/1", RouteParams::new()));
        assert_eq!(current_component(&router), Some("first again"));
    }

    #[test]
    fn listeners_fire_in_order_and_can_unsubscribe() {
        let router = Rc::new(router());
        let seen = Rc::new(RefCell::new(Vec::new()));

        let first = {
            let seen = seen.clone();
            router.subscribe(move |route| {
                seen.borrow_mut()
                    .push(format!("first:{}", route.map(|r| r.component).unwrap_or("-")));
            })
        };
        {
            let seen = seen.clone();
            router.subscribe(move |route| {
                seen.borrow_mut()
                    .push(format!("second:{}", route.map(|r| r.component).unwrap_or("-")));
            });
        }

        router.navigate("/", RouteParams::new());
        router.navigate("/missing", RouteParams::new());
        assert!(router.unsubscribe(first));
        assert!(!router.unsubscribe(first));
        router.navigate("/a", RouteParams::new());

        assert_eq!(
            *seen.borrow(),
            vec!["first:lobby", "second:lobby", "second:exact"]
        );
    }

    #[test]
    fn listener_may_navigate_reentrantly() {
        let router = Rc::new(router());
        {
            let inner = Rc::downgrade(&router);
            router.subscribe(move |route| {
                if route.map(|r| r.component) == Some("exact") {
                    if let Some(router) = inner.upgrade() {
                        router.navigate("/", RouteParams::new());
                    }
                }
            });
        }

        router.navigate("/a", RouteParams::new());
        assert_eq!(current_component(&router), Some("lobby"));
        assert_eq!(router.history_len(), 1);
    }
}
