//! HTTP server with live reload

use anyhow::Result;
use axum::{
    extract::{
        ws::{Message, WebSocket},
        Path, State, WebSocketUpgrade,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use notify::RecursiveMode;
use notify_debouncer_mini::new_debouncer;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::calendar::DayParam;
use crate::helpers::home_path;
use crate::templates::TemplateRenderer;
use crate::view::{DoorView, RenderMode};
use crate::{Advent, SiteResolver};

/// Socket endpoint, relative to the site root
const LIVE_RELOAD_ENDPOINT: &str = "__livereload";

/// Live reload script injected into HTML pages; `%ENDPOINT%` is the socket path
const LIVE_RELOAD_SCRIPT: &str = r#"
<script>
(function() {
    var ws = new WebSocket('ws://' + location.host + '%ENDPOINT%');
    ws.onmessage = function(msg) {
        if (msg.data === 'reload') {
            location.reload();
        }
    };
    ws.onclose = function() {
        console.log('Live reload disconnected. Attempting to reconnect...');
        setTimeout(function() { location.reload(); }, 1000);
    };
})();
</script>
</body>
"#;

/// Server state
pub struct ServerState {
    advent: Advent,
    resolver: SiteResolver,
    renderer: TemplateRenderer,
    reload_tx: broadcast::Sender<()>,
    live_reload: bool,
}

impl ServerState {
    pub fn new(advent: Advent, resolver: SiteResolver, live_reload: bool) -> Result<Self> {
        let (reload_tx, _) = broadcast::channel::<()>(16);
        Ok(Self {
            advent,
            resolver,
            renderer: TemplateRenderer::new()?,
            reload_tx,
            live_reload,
        })
    }

    fn home(&self) -> String {
        home_path(&self.advent.config)
    }

    fn mount(&self, path: &str) -> String {
        mount_path(&self.home(), path)
    }

    fn page(&self, html: String) -> Response {
        if self.live_reload {
            let endpoint = self.mount(LIVE_RELOAD_ENDPOINT);
            Html(inject_live_reload(&html, &endpoint)).into_response()
        } else {
            Html(html).into_response()
        }
    }
}

/// Build the router, mounted under the configured site root
pub fn router(state: Arc<ServerState>) -> Router {
    let index = state.mount("");
    let mut app = Router::new()
        .route(&index, get(index_handler))
        .route(&state.mount(LIVE_RELOAD_ENDPOINT), get(livereload_handler))
        .route(&state.mount(":day"), get(article_handler));
    if index != "/" {
        // `/advent` as well as `/advent/`
        app = app.route(index.trim_end_matches('/'), get(index_handler));
    }

    app.fallback(not_found_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server
pub async fn start(
    advent: &Advent,
    today: Option<u32>,
    ip: &str,
    port: u16,
    watch: bool,
    open: bool,
) -> Result<()> {
    let resolver = advent.resolver(today)?;
    if resolver.bypass() {
        tracing::warn!(
            "Environment '{}' opens every door",
            advent.config.environment
        );
    }

    let state = Arc::new(ServerState::new(advent.clone(), resolver, watch)?);
    let app = router(Arc::clone(&state));

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}{}", ip, port, state.home());
    println!("Server running at {}", url);
    if watch {
        println!("Live reload enabled. Watching for changes...");
    }
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    if watch {
        let content_dir = advent.content_dir.clone();
        let watched = Arc::clone(&state);
        tokio::task::spawn_blocking(move || {
            if let Err(e) = watch_and_reload(content_dir, watched) {
                tracing::error!("File watcher error: {}", e);
            }
        });
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Watch the content directory, drop cached payloads and tell browsers to reload
fn watch_and_reload(content_dir: PathBuf, state: Arc<ServerState>) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();

    // Create debouncer to avoid multiple rapid reloads
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    if !content_dir.exists() {
        std::fs::create_dir_all(&content_dir)?;
    }
    debouncer
        .watcher()
        .watch(&content_dir, RecursiveMode::Recursive)?;
    tracing::debug!("Watching: {:?}", content_dir);

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let relevant: Vec<_> = events
                    .iter()
                    .filter(|e| {
                        let path_str = e.path.to_string_lossy();
                        !path_str.contains(".git")
                            && !path_str.contains(".DS_Store")
                            && !path_str.ends_with('~')
                    })
                    .collect();

                if relevant.is_empty() {
                    continue;
                }

                for event in &relevant {
                    tracing::info!("File changed: {}", event.path.display());
                }

                state.resolver.store().invalidate();
                // No subscribers just means no browser is open
                let _ = state.reload_tx.send(());
            }
            Ok(Err(e)) => {
                tracing::error!("Watch error: {:?}", e);
            }
            Err(e) => {
                tracing::error!("Channel error: {:?}", e);
                break;
            }
        }
    }

    Ok(())
}

/// Calendar index
async fn index_handler(State(state): State<Arc<ServerState>>) -> Response {
    let current_day = state.resolver.current_day();
    let bypass = state.resolver.bypass();

    // Locked days never reach the store; load failures are logged by the resolver
    let mut titles = Vec::new();
    for day in state.resolver.store().loader().scan() {
        let result = state.resolver.resolve(i64::from(day.get())).await;
        if let Some(payload) = result.payload() {
            titles.push((day, payload.title.clone()));
        }
    }

    let doors = DoorView::all(current_day, bypass, &titles);
    match state.renderer.render_index(&state.advent.config, &doors) {
        Ok(html) => state.page(html),
        Err(e) => render_error(e),
    }
}

/// A day's article, or a redirect home when it cannot be shown
async fn article_handler(
    State(state): State<Arc<ServerState>>,
    Path(segment): Path<String>,
) -> Response {
    let param = DayParam::parse(&segment);
    let result = state.resolver.resolve_param(&param).await;
    let mode = RenderMode::from_result(
        &param,
        &result,
        state.resolver.current_day(),
        &state.home(),
    );

    match mode {
        RenderMode::Redirect { to } => Redirect::to(&to).into_response(),
        mode => match state.renderer.render_mode(&state.advent.config, &mode) {
            Ok(Some(html)) => state.page(html),
            Ok(None) => Redirect::to(&state.home()).into_response(),
            Err(e) => render_error(e),
        },
    }
}

async fn not_found_handler() -> Response {
    (StatusCode::NOT_FOUND, "Not found").into_response()
}

fn render_error(e: anyhow::Error) -> Response {
    tracing::error!("Render failed: {:#}", e);
    (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
}

/// WebSocket handler for live reload
async fn livereload_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<ServerState>>,
) -> impl IntoResponse {
    let reload_rx = state.reload_tx.subscribe();
    ws.on_upgrade(move |socket| handle_livereload_socket(socket, reload_rx))
}

/// Handle WebSocket connection for live reload
async fn handle_livereload_socket(mut socket: WebSocket, mut reload_rx: broadcast::Receiver<()>) {
    tracing::debug!("Live reload client connected");

    loop {
        tokio::select! {
            result = reload_rx.recv() => {
                match result {
                    Ok(_) => {
                        if socket.send(Message::Text("reload".to_string())).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                }
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
        }
    }

    tracing::debug!("Live reload client disconnected");
}

/// Absolute route path for `path` under the site root
fn mount_path(home: &str, path: &str) -> String {
    let root = home.trim_matches('/');
    if root.is_empty() {
        format!("/{}", path)
    } else {
        format!("/{}/{}", root, path)
    }
}

/// Inject live reload script into HTML content
fn inject_live_reload(html: &str, endpoint: &str) -> String {
    let script = LIVE_RELOAD_SCRIPT.replace("%ENDPOINT%", endpoint);
    if html.contains("</body>") {
        html.replacen("</body>", &script, 1)
    } else {
        format!("{}{}", html, script)
    }
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}
