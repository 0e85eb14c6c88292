//! The `/star` endpoint: authorization gate, toggle dispatch and response
//! shaping. Sessions and persistence are injected through [`StarState`].

use axum::{
    body::Bytes,
    extract::{FromRequest, Request, State},
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Form, Router,
};
use std::sync::Arc;
use tracing::{debug, info};

use crate::auth::SessionResolver;
use crate::error::{PackageStarsError, StarError};
use crate::store::StarStore;
use crate::types::{Identity, StarAction, StarRequest, StarResult};

pub const DEFAULT_LOGIN_PATH: &str = "/login";
pub const DEFAULT_BROWSE_PATH: &str = "/browse/userstar";

/// Where the view path sends its callers
#[derive(Debug, Clone)]
pub struct StarConfig {
    pub login_path: String,
    pub browse_path: String,
}

impl Default for StarConfig {
    fn default() -> Self {
        Self {
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            browse_path: DEFAULT_BROWSE_PATH.to_string(),
        }
    }
}

impl StarConfig {
    /// Per-user listing location, e.g. `/browse/userstar/fakeuser`
    pub fn browse_location(&self, username: &str) -> String {
        format!(
            "{}/{}",
            self.browse_path.trim_end_matches('/'),
            urlencoding::encode(username)
        )
    }
}

#[derive(Clone)]
pub struct StarState<S, T> {
    pub sessions: S,
    pub store: T,
    pub config: Arc<StarConfig>,
}

impl<S: SessionResolver, T: StarStore> StarState<S, T> {
    pub fn new(sessions: S, store: T, config: StarConfig) -> Self {
        Self {
            sessions,
            store,
            config: Arc::new(config),
        }
    }
}

/// Terminal state for one request, selected by (method, identity presence)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StarOutcome {
    AnonymousView,
    AuthenticatedView(Identity),
    AnonymousToggle,
    AuthenticatedToggle(Identity),
}

impl StarOutcome {
    /// `None` for methods the endpoint does not serve.
    pub fn select(method: &Method, identity: Option<Identity>) -> Option<Self> {
        // axum routes HEAD to the GET handler
        if *method == Method::GET || *method == Method::HEAD {
            Some(match identity {
                None => StarOutcome::AnonymousView,
                Some(identity) => StarOutcome::AuthenticatedView(identity),
            })
        } else if *method == Method::POST {
            Some(match identity {
                None => StarOutcome::AnonymousToggle,
                Some(identity) => StarOutcome::AuthenticatedToggle(identity),
            })
        } else {
            None
        }
    }
}

pub fn star_router<S: SessionResolver, T: StarStore>(state: StarState<S, T>) -> Router {
    Router::new()
        .route("/star", get(handle_star::<S, T>).post(handle_star::<S, T>))
        .with_state(state)
}

async fn handle_star<S: SessionResolver, T: StarStore>(
    State(state): State<StarState<S, T>>,
    method: Method,
    request: Request,
) -> Result<Response, StarError> {
    let identity = state.sessions.resolve(request.headers()).await;

    let Some(outcome) = StarOutcome::select(&method, identity) else {
        return Ok(StatusCode::METHOD_NOT_ALLOWED.into_response());
    };

    match outcome {
        StarOutcome::AnonymousView => {
            debug!("Anonymous star view, redirecting to {}", state.config.login_path);
            redirect(&state.config.login_path)
        }
        StarOutcome::AuthenticatedView(identity) => {
            let location = state.config.browse_location(&identity.name);
            debug!("Star view for {}, redirecting to {}", identity.name, location);
            redirect(&location)
        }
        StarOutcome::AnonymousToggle => Err(StarError::AuthenticationMissing),
        StarOutcome::AuthenticatedToggle(identity) => {
            // Only read once the gate has passed
            let payload = read_star_request(request).await?;
            let result = toggle(&state.store, &identity, payload).await?;
            Ok((StatusCode::OK, result.message()).into_response())
        }
    }
}

/// Decode a toggle body, either form-urlencoded (browser AJAX) or JSON.
pub async fn read_star_request(request: Request) -> Result<StarRequest, PackageStarsError> {
    if is_form(request.headers()) {
        let Form(payload) = Form::<StarRequest>::from_request(request, &())
            .await
            .map_err(|e| PackageStarsError::PayloadError(e.body_text()))?;
        Ok(payload)
    } else {
        let body = Bytes::from_request(request, &())
            .await
            .map_err(|e| PackageStarsError::PayloadError(e.body_text()))?;
        Ok(serde_json::from_slice(&body)?)
    }
}

fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/x-www-form-urlencoded"))
}

/// Flip the caller-supplied star state through the store. The store is not
/// consulted for the current state.
pub async fn toggle<T: StarStore>(
    store: &T,
    identity: &Identity,
    request: StarRequest,
) -> Result<StarResult, StarError> {
    let action = StarAction::toggle(request.is_starred);

    match action {
        StarAction::Star => store.star(&request.name, &identity.name).await?,
        StarAction::Unstar => store.unstar(&request.name, &identity.name).await?,
    }

    let result = StarResult {
        username: identity.name.clone(),
        package_name: request.name,
        action,
    };
    info!("{}", result);
    Ok(result)
}

fn redirect(location: &str) -> Result<Response, StarError> {
    let location = HeaderValue::from_str(location)
        .map_err(|e| StarError::Internal(format!("Invalid redirect location {:?}: {}", location, e)))?;
    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_selection_covers_method_and_identity() {
        let user = Identity::new("fakeuser");
        assert_eq!(StarOutcome::select(&Method::GET, None), Some(StarOutcome::AnonymousView));
        assert_eq!(
            StarOutcome::select(&Method::GET, Some(user.clone())),
            Some(StarOutcome::AuthenticatedView(user.clone()))
        );
        assert_eq!(StarOutcome::select(&Method::POST, None), Some(StarOutcome::AnonymousToggle));
        assert_eq!(
            StarOutcome::select(&Method::POST, Some(user.clone())),
            Some(StarOutcome::AuthenticatedToggle(user))
        );
        assert_eq!(StarOutcome::select(&Method::DELETE, None), None);
    }

    #[test]
    fn browse_location_encodes_username() {
        let config = StarConfig::default();
        assert_eq!(config.browse_location("fakeuser"), "/browse/userstar/fakeuser");
        assert_eq!(config.browse_location("a b"), "/browse/userstar/a%20b");

        let trailing = StarConfig {
            browse_path: "/browse/userstar/".to_string(),
            ..StarConfig::default()
        };
        assert_eq!(trailing.browse_location("fakeuser"), "/browse/userstar/fakeuser");
    }

    #[test]
    fn redirect_is_302_with_location() {
        let response = redirect("/login").unwrap();
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[header::LOCATION], "/login");
    }
}
