//! Leptos bindings for [`InternalAppRouter`].

use std::rc::Rc;

use leptos::*;

use crate::router::{InternalAppRouter, Route, RouteParams};

/// Renderable bound to a route; receives the resolved params as props.
pub type RouteComponent = Rc<dyn Fn(RouteParams) -> View>;

#[derive(Clone)]
/// A `(path, component)` pair passed to [`use_app_routes`].
pub struct AppRouteDefinition {
    /// Path, possibly containing `:name` segments.
    pub path: String,
    /// Renderable for the path.
    pub component: RouteComponent,
}

impl AppRouteDefinition {
    /// Creates a route definition.
    pub fn new(path: impl Into<String>, component: impl Fn(RouteParams) -> View + 'static) -> Self {
        Self {
            path: path.into(),
            component: Rc::new(component),
        }
    }
}

#[derive(Clone)]
/// Context exposed by [`AppRouterProvider`].
///
/// Holds the single router instance owned by the provider plus a signal mirroring its current
/// route, so navigation re-renders [`RouteRenderer`].
pub struct AppRouterContext {
    router: Rc<InternalAppRouter<RouteComponent>>,
    current: RwSignal<Option<Route<RouteComponent>>>,
}

impl AppRouterContext {
    /// Navigates to `path` with no extra params.
    pub fn navigate(&self, path: &str) -> bool {
        self.router.navigate(path, RouteParams::new())
    }

    /// Navigates to `path`, merging `params` over the extracted segment values.
    pub fn navigate_with(&self, path: &str, params: RouteParams) -> bool {
        self.router.navigate(path, params)
    }

    /// Returns to the previous route.
    pub fn back(&self) -> bool {
        self.router.back()
    }

    /// Registers a route on the provider's router.
    pub fn register(&self, definition: AppRouteDefinition) {
        self.router.register(definition.path, definition.component);
    }

    /// Reactive read of the current route.
    pub fn current_route(&self) -> Option<Route<RouteComponent>> {
        self.current.get()
    }

    /// Reactive read of the current route params.
    pub fn params(&self) -> RouteParams {
        self.current
            .with(|route| route.as_ref().map(|route| route.params.clone()))
            .unwrap_or_default()
    }

    /// Returns `true` when `back` would change the current route.
    pub fn can_go_back(&self) -> bool {
        self.current.with(|_| self.router.history_len() > 0)
    }
}

impl AppRouterContext {
    fn new() -> Self {
        let router = Rc::new(InternalAppRouter::<RouteComponent>::new());
        let current = create_rw_signal(None::<Route<RouteComponent>>);

        let subscription = router.subscribe(move |route| current.set(route.cloned()));
        {
            let router = router.clone();
            on_cleanup(move || {
                router.unsubscribe(subscription);
            });
        }

        Self { router, current }
    }
}

#[component]
/// Owns one [`InternalAppRouter`] for the lifetime of this mount and provides it as context.
pub fn AppRouterProvider(children: Children) -> impl IntoView {
    provide_context(AppRouterContext::new());

    children().into_view()
}

/// Returns the nearest [`AppRouterContext`].
///
/// # Panics
///
/// Panics if called outside [`AppRouterProvider`].
pub fn use_app_router() -> AppRouterContext {
    use_context::<AppRouterContext>()
        .expect("use_app_router must be used within an AppRouterProvider")
}

/// Registers `routes` on the enclosing provider's router and returns its context.
///
/// # Panics
///
/// Panics if called outside [`AppRouterProvider`].
pub fn use_app_routes(routes: impl IntoIterator<Item = AppRouteDefinition>) -> AppRouterContext {
    let router = use_app_router();
    for definition in routes {
        router.register(definition);
    }
    router
}

#[component]
/// Renders the current route's component with its params, or nothing before first navigation.
pub fn RouteRenderer() -> impl IntoView {
    let router = use_app_router();
    move || {
        router
            .current_route()
            .map(|route| (route.component)(route.params))
    }
}
