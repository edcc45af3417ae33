//! Local server rendering the insights pages on every request

use anyhow::Result;
use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{Request, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::content::MarkdownRenderer;
use crate::templates::{IndexTab, TemplateRenderer};
use crate::Site;

/// Server state, shared read-only between requests
pub struct ServerState {
    site: Site,
    templates: TemplateRenderer,
    markdown: MarkdownRenderer,
}

impl ServerState {
    pub fn new(site: &Site) -> Result<Self> {
        Ok(Self {
            site: site.clone(),
            templates: TemplateRenderer::new()?,
            markdown: MarkdownRenderer::with_options(&site.config.highlight),
        })
    }

    /// Render the insights index from a fresh read of the content directory
    pub fn index_page(&self, tab: IndexTab) -> Result<String> {
        let articles = self.site.loader().list_articles()?;
        let talks = self.site.talks()?;
        self.templates.render_index(&self.site.config, &articles, &talks, tab)
    }

    /// Render an article page, or the not-found page with a 404 status.
    ///
    /// Hidden articles are served when addressed by slug.
    pub fn article_page(&self, slug: &str) -> Result<(StatusCode, String)> {
        match self.site.loader().get_article(slug) {
            Some(article) => {
                let content_html = self.markdown.render(&article.content);
                let html = self
                    .templates
                    .render_article(&self.site.config, &article, &content_html)?;
                Ok((StatusCode::OK, html))
            }
            None => Ok((StatusCode::NOT_FOUND, self.not_found_page(Some(slug))?)),
        }
    }

    pub fn not_found_page(&self, slug: Option<&str>) -> Result<String> {
        self.templates.render_not_found(&self.site.config, slug)
    }
}

/// Build the router
pub fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::temporary("/insights/") }))
        .route("/insights", get(index_handler))
        .route("/insights/", get(index_handler))
        .route("/insights/:slug", get(article_handler))
        .route("/insights/:slug/", get(article_handler))
        .fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server
pub async fn start(site: &Site, ip: &str, port: u16) -> Result<()> {
    let state = Arc::new(ServerState::new(site)?);
    let app = router(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}/insights/", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[derive(Deserialize)]
struct IndexQuery {
    tab: Option<String>,
}

async fn index_handler(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<IndexQuery>,
) -> Response {
    let tab = IndexTab::from_query(query.tab.as_deref());
    let result = tokio::task::spawn_blocking(move || state.index_page(tab)).await;
    match result {
        Ok(Ok(html)) => Html(html).into_response(),
        Ok(Err(e)) => internal_error(e),
        Err(e) => internal_error(e.into()),
    }
}

async fn article_handler(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Response {
    let result = tokio::task::spawn_blocking(move || state.article_page(&slug)).await;
    match result {
        Ok(Ok((status, html))) => (status, Html(html)).into_response(),
        Ok(Err(e)) => internal_error(e),
        Err(e) => internal_error(e.into()),
    }
}

/// Serve generated static files, falling back to the 404 page
async fn fallback_handler(
    State(state): State<Arc<ServerState>>,
    request: Request<Body>,
) -> Response {
    let mut service =
        ServeDir::new(&state.site.public_dir).append_index_html_on_directories(true);
    match service.try_call(request).await {
        Ok(response) if response.status() != StatusCode::NOT_FOUND => response.into_response(),
        Ok(_) => match state.not_found_page(None) {
            Ok(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
            Err(e) => internal_error(e),
        },
        Err(e) => internal_error(e.into()),
    }
}

fn internal_error(e: anyhow::Error) -> Response {
    tracing::error!("Request failed: {:#}", e);
    (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
}
