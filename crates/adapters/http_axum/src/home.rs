//! Home page: an HTML index of every routed key and its endpoints.

use askama::Template;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};

use jsonserver_domain::key::ResourceKey;

use crate::state::AppState;

/// One routed key as shown on the home page.
pub struct HomeEntry {
    name: String,
    list: bool,
}

impl From<&ResourceKey> for HomeEntry {
    fn from(key: &ResourceKey) -> Self {
        Self {
            name: key.name().to_string(),
            list: key.is_list(),
        }
    }
}

/// Home page template.
#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    entries: Vec<HomeEntry>,
}

impl IntoResponse for HomeTemplate {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}

/// `GET /`
pub async fn index<S, G>(State(state): State<AppState<S, G>>) -> HomeTemplate
where
    S: Send + Sync + 'static,
    G: Send + Sync + 'static,
{
    HomeTemplate {
        entries: state.keys.iter().map(HomeEntry::from).collect(),
    }
}
