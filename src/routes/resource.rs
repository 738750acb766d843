//! Resource routes built from an explicit method/path/operation table.

use crate::handlers::resource::{create, index, show};
use crate::model::Model;
use crate::state::AppState;
use axum::{
    routing::{on, MethodFilter, MethodRouter},
    Router,
};

/// Operations a resource controller exposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Index,
    Create,
    Show,
}

/// One row of the route table. Paths are relative to the resource's base path.
#[derive(Clone, Copy, Debug)]
pub struct RouteSpec {
    pub method: MethodFilter,
    pub path: &'static str,
    pub operation: Operation,
}

pub const RESOURCE_ROUTES: [RouteSpec; 3] = [
    RouteSpec { method: MethodFilter::GET, path: "/", operation: Operation::Index },
    RouteSpec { method: MethodFilter::POST, path: "/", operation: Operation::Create },
    RouteSpec { method: MethodFilter::GET, path: "/:id", operation: Operation::Show },
];

fn method_router<M: Model>(spec: &RouteSpec) -> MethodRouter<AppState<M>> {
    match spec.operation {
        Operation::Index => on(spec.method, index::<M>),
        Operation::Create => on(spec.method, create::<M>),
        Operation::Show => on(spec.method, show::<M>),
    }
}

/// Routes for one resource, to be nested under its base path.
pub fn resource_routes<M: Model>(state: AppState<M>) -> Router {
    let mut by_path: Vec<(&'static str, MethodRouter<AppState<M>>)> = Vec::new();
    for spec in RESOURCE_ROUTES.iter() {
        let handler = method_router::<M>(spec);
        match by_path.iter().position(|(p, _)| *p == spec.path) {
            Some(pos) => {
                let (path, existing) = by_path.remove(pos);
                by_path.insert(pos, (path, existing.merge(handler)));
            }
            None => by_path.push((spec.path, handler)),
        }
    }
    let mut router = Router::new();
    for (path, method_router) in by_path {
        router = router.route(path, method_router);
    }
    router.with_state(state)
}
