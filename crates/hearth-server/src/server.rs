//! Site server implementation.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::services::ServeDir;

use hearth_articles::{Article, ArticleStore};

use crate::templates::{ArticleContext, ArticleSummary, IndexContext, TemplateEngine};

/// Configuration for the site server.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Title shown in the header and page titles
    pub site_title: String,

    /// Directory of static files served for unmatched paths
    pub static_dir: PathBuf,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            site_title: "Hearth".to_string(),
            static_dir: PathBuf::from("html"),
        }
    }
}

/// Errors that can occur with the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid bind address {0}: {1}")]
    Address(String, String),

    #[error("Failed to bind to {0}: {1}")]
    Bind(SocketAddr, String),
}

/// Shared server state.
///
/// The store is built before the server starts and never mutated while
/// requests are served, so a plain `Arc` is enough; no lock.
struct SiteState {
    site_title: String,
    store: ArticleStore,
    templates: TemplateEngine,
}

/// The personal-site server.
pub struct SiteServer {
    config: SiteConfig,
    store: ArticleStore,
}

impl SiteServer {
    /// Create a server over an already-loaded article store.
    pub fn new(config: SiteConfig, store: ArticleStore) -> Self {
        Self { config, store }
    }

    /// Bind and serve until the process exits.
    pub async fn start(self) -> Result<(), ServerError> {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .map_err(|e: std::net::AddrParseError| {
                ServerError::Address(
                    format!("{}:{}", self.config.host, self.config.port),
                    e.to_string(),
                )
            })?;

        let app = self.into_router();

        tracing::info!("Serving site at http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::Bind(addr, e.to_string()))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Bind(addr, e.to_string()))?;

        Ok(())
    }

    /// Build the router: homepage, article pages, static fallback.
    pub fn into_router(self) -> Router {
        let static_dir = self.config.static_dir.clone();
        let state = Arc::new(SiteState {
            site_title: self.config.site_title,
            store: self.store,
            templates: TemplateEngine::new(),
        });

        Router::new()
            .route("/", get(index_handler))
            .route("/articles/{id}", get(article_handler))
            .fallback_service(ServeDir::new(static_dir))
            .with_state(state)
    }
}

/// Handler for the homepage article index.
async fn index_handler(State(state): State<Arc<SiteState>>) -> Response {
    let ctx = IndexContext {
        site_title: state.site_title.clone(),
        articles: state.store.list_by_date().into_iter().map(summarize).collect(),
    };

    match state.templates.render_index(&ctx) {
        Ok(html) => Html(html).into_response(),
        Err(e) => render_failure(e),
    }
}

/// Handler for a single article page.
async fn article_handler(
    Path(id): Path<String>,
    State(state): State<Arc<SiteState>>,
) -> Response {
    let Some(article) = state.store.get(&id) else {
        return (
            StatusCode::NOT_FOUND,
            Html("<h1>Not found</h1>".to_string()),
        )
            .into_response();
    };

    let ctx = ArticleContext {
        site_title: state.site_title.clone(),
        title: display_title(article),
        authors: article.authors.clone(),
        date: article.date.clone(),
        content: article.content.clone(),
    };

    match state.templates.render_article(&ctx) {
        Ok(html) => Html(html).into_response(),
        Err(e) => render_failure(e),
    }
}

fn summarize(article: &Article) -> ArticleSummary {
    ArticleSummary {
        id: article.id.clone(),
        title: display_title(article),
        date: article.date.clone(),
    }
}

/// Untitled articles fall back to their id so the index never shows a
/// blank link.
fn display_title(article: &Article) -> String {
    article.title.clone().unwrap_or_else(|| article.id.clone())
}

fn render_failure(err: minijinja::Error) -> Response {
    tracing::error!("Template render failed: {}", err);
    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearth_articles::CmarkConverter;
    use std::fs;
    use tempfile::TempDir;

    fn test_state() -> Arc<SiteState> {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("first.pandoc"),
            "% First Post\n% Me\n% 2024-05-01\n\nHello.\n",
        )
        .unwrap();
        fs::write(dir.path().join("untitled.pandoc"), "Just a body.\n").unwrap();

        let store = ArticleStore::load_from_dir(dir.path(), &CmarkConverter).unwrap();

        Arc::new(SiteState {
            site_title: "Test Site".to_string(),
            store,
            templates: TemplateEngine::new(),
        })
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn default_config_matches_original_site() {
        let config = SiteConfig::default();
        assert_eq!(config.port, 8000);
        assert_eq!(config.host, "0.0.0.0");
    }

    #[tokio::test]
    async fn index_lists_articles() {
        let response = index_handler(State(test_state())).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains(r#"<a href="/articles/first">First Post</a>"#));
        // Untitled articles link by id.
        assert!(body.contains(r#"<a href="/articles/untitled">untitled</a>"#));
    }

    #[tokio::test]
    async fn article_page_renders_content() {
        let response = article_handler(Path("first".to_string()), State(test_state())).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("First Post"));
        assert!(body.contains("<p>Hello.</p>"));
    }

    #[tokio::test]
    async fn unknown_article_is_not_found() {
        let response = article_handler(Path("missing".to_string()), State(test_state())).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
