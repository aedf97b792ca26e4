use std::sync::{Arc, OnceLock};

use osrsnav_core::{snapshot, Coordinate, DataSelection, Edge, GameState, PathGenerationRequest, SessionReader};
use tracing::{error, info, info_span, warn, Instrument};

use crate::config::ClientConfig;
use crate::error::NavError;
use crate::selection::SelectionCache;
use crate::transport::{HttpTransport, Request, Transport, PATH_PATH, SELECT_PATH};

static GLOBAL: OnceLock<NavClient> = OnceLock::new();

/// Client for the path service.
///
/// The public exchanges never fail: any transport, status or decode problem is logged and
/// surfaces as `None`, so a polling loop can simply try again next tick. The `try_*` variants
/// return the underlying [`NavError`].
#[derive(Debug)]
pub struct NavClient<T = HttpTransport> {
    transport: Arc<T>,
    selection: SelectionCache,
}

impl<T> Clone for NavClient<T> {
    fn clone(&self) -> Self {
        Self { transport: Arc::clone(&self.transport), selection: self.selection.clone() }
    }
}

impl NavClient<HttpTransport> {
    pub fn new(config: ClientConfig) -> Result<Self, NavError> {
        Ok(Self::with_transport(HttpTransport::new(config)?))
    }

    pub fn from_env() -> Result<Self, NavError> { Self::new(ClientConfig::from_env()) }

    /// Process-wide client configured from the environment, built on first use.
    pub fn global() -> Result<&'static NavClient, NavError> {
        if let Some(client) = GLOBAL.get() {
            return Ok(client);
        }
        let client = Self::from_env()?;
        Ok(GLOBAL.get_or_init(|| client))
    }
}

impl<T: Transport> NavClient<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport: Arc::new(transport), selection: SelectionCache::new() }
    }

    pub fn selection_cache(&self) -> &SelectionCache { &self.selection }

    pub fn transport(&self) -> &T { &self.transport }

    // 200 or an error carrying the body as diagnostic text.
    async fn exchange(&self, request: Request) -> Result<Vec<u8>, NavError> {
        let res = self.transport.send(request).await?;
        if !res.is_ok() {
            let body = res.text();
            warn!(status = res.status, body = %body, "path service rejected request");
            return Err(NavError::Status { status: res.status, body });
        }
        Ok(res.body)
    }

    pub async fn try_fetch_selection(&self) -> Result<DataSelection, NavError> {
        let body = self.exchange(Request::get(SELECT_PATH)).await?;
        serde_json::from_slice(&body).map_err(NavError::Decode)
    }

    /// The server's selection, fetched on first use and retried until a fetch succeeds.
    pub async fn get_selection(&self) -> Option<Arc<DataSelection>> {
        self.selection
            .get_or_fetch(|| async move {
                match self.try_fetch_selection().await {
                    Ok(sel) => Some(sel),
                    Err(e) => {
                        error!(error = %e, "selection fetch failed");
                        None
                    }
                }
            })
            .await
    }

    /// `Ok(None)` when the server answered but found no route.
    pub async fn try_request_path(
        &self,
        start: Coordinate,
        end: Coordinate,
        game_state: GameState,
    ) -> Result<Option<Vec<Edge>>, NavError> {
        let request = PathGenerationRequest { start, end, game_state };
        let body = serde_json::to_vec(&request).map_err(NavError::Encode)?;
        let body = self.exchange(Request::post_json(PATH_PATH, body)).await?;
        serde_json::from_slice(&body).map_err(NavError::Decode)
    }

    pub async fn request_path(&self, start: Coordinate, end: Coordinate, game_state: GameState) -> Option<Vec<Edge>> {
        let span = info_span!("request_path", %start, %end);
        async move {
            match self.try_request_path(start, end, game_state).await {
                Ok(Some(route)) => {
                    info!(edges = route.len(), "route received");
                    Some(route)
                }
                Ok(None) => {
                    info!("server found no route");
                    None
                }
                Err(e) => {
                    error!(error = %e, "path request failed");
                    None
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Fetch the selection if needed, capture the session and request a route.
    pub async fn build_between<S: SessionReader + ?Sized>(
        &self,
        start: Coordinate,
        end: Coordinate,
        session: &S,
    ) -> Option<Vec<Edge>> {
        let selection = self.get_selection().await;
        let game_state = snapshot(session, selection.as_deref());
        self.request_path(start, end, game_state).await
    }
}
