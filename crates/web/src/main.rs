use scoresheet_core::{GameVariant, Session, SessionAction, SheetView};
use scoresheet_data::{
    default_state_path, load_sheet_dir, persist_changes, restore_session, JsonFileStore,
    KeyValueStore, MemoryStore,
};
use serde::Serialize;
use std::io::Read;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tiny_http::{Header, Method, Response, Server, StatusCode};

const ADDR_ENV: &str = "SCORESHEET_ADDR";
const DEFAULT_ADDR: &str = "0.0.0.0:7878";

type Store = Box<dyn KeyValueStore + Send>;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let addr = std::env::var(ADDR_ENV).unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let state = AppState::load()?;
    let server = Server::http(addr.as_str()).map_err(|err| -> Box<dyn std::error::Error> { err })?;
    println!("Scoresheet web server on http://{addr}");
    let state = Arc::new(Mutex::new(state));
    for request in server.incoming_requests() {
        let state = state.clone();
        if let Err(err) = handle_request(request, state) {
            eprintln!("request error: {err}");
        }
    }
    Ok(())
}

struct AppState {
    session: Session,
    store: Store,
}

impl AppState {
    fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let sheet = load_sheet_dir(&asset_dir())?;
        let store: Store = match default_state_path() {
            Some(path) => {
                let mut store = JsonFileStore::open(path);
                println!("state file {}", store.path().display());
                if let Some(warning) = store.take_warning() {
                    eprintln!("persist warning: {warning}");
                }
                Box::new(store)
            }
            None => {
                eprintln!("persist warning: no state path, keeping state in memory");
                Box::new(MemoryStore::new())
            }
        };
        Ok(Self::with_store(sheet, store))
    }

    fn with_store(sheet: GameVariant, store: Store) -> Self {
        let (session, warnings) = restore_session(store.as_ref(), sheet);
        for warning in warnings {
            eprintln!("persist warning: {warning}");
        }
        Self { session, store }
    }
}

#[derive(Serialize)]
struct ApiResponse {
    ok: bool,
    error: Option<String>,
    state: SheetView,
}

fn handle_request(
    mut request: tiny_http::Request,
    state: Arc<Mutex<AppState>>,
) -> Result<(), Box<dyn std::error::Error>> {
    let url = request.url().to_string();
    match (request.method(), url.as_str()) {
        (&Method::Get, "/") => {
            respond_with_file(request, web_path("index.html"), "text/html; charset=utf-8")?;
        }
        (&Method::Get, "/app.js") => {
            respond_with_file(request, web_path("app.js"), "application/javascript")?;
        }
        (&Method::Get, "/styles.css") => {
            respond_with_file(request, web_path("styles.css"), "text/css; charset=utf-8")?;
        }
        (&Method::Get, "/api/state") => {
            let guard = state.lock().map_err(|_| "state lock poisoned")?;
            let response = build_response(&guard, None);
            respond_json(request, response, StatusCode(200))?;
        }
        (&Method::Post, "/api/action") => {
            let mut body = String::new();
            request.as_reader().read_to_string(&mut body)?;
            let mut guard = state.lock().map_err(|_| "state lock poisoned")?;
            let (status, err) = match parse_action(&body) {
                Ok(action) => (StatusCode(200), apply_action(&mut guard, &action)),
                Err(err) => (StatusCode(400), Some(err)),
            };
            let response = build_response(&guard, err);
            respond_json(request, response, status)?;
        }
        _ => {
            let response = Response::empty(StatusCode(404));
            request.respond(response)?;
        }
    }
    Ok(())
}

fn repo_path(dir: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join(dir)
}

fn asset_dir() -> PathBuf {
    repo_path("assets")
}

fn web_path(file: &str) -> PathBuf {
    repo_path("web").join(file)
}

fn respond_with_file(
    request: tiny_http::Request,
    path: PathBuf,
    content_type: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut file = std::fs::File::open(path)?;
    let mut content = Vec::new();
    file.read_to_end(&mut content)?;
    let header = Header::from_bytes(&b"Content-Type"[..], content_type)
        .map_err(|_| "invalid content type header")?;
    let response = Response::from_data(content).with_header(header);
    request.respond(response)?;
    Ok(())
}

fn respond_json(
    request: tiny_http::Request,
    response: ApiResponse,
    status: StatusCode,
) -> Result<(), Box<dyn std::error::Error>> {
    let body = serde_json::to_vec_pretty(&response)?;
    let header = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
        .map_err(|_| "invalid content type header")?;
    request.respond(
        Response::from_data(body)
            .with_header(header)
            .with_status_code(status),
    )?;
    Ok(())
}

fn build_response(state: &AppState, err: Option<String>) -> ApiResponse {
    ApiResponse {
        ok: err.is_none(),
        error: err,
        state: SheetView::build(&state.session),
    }
}

fn parse_action(body: &str) -> Result<SessionAction, String> {
    serde_json::from_str(body).map_err(|err| format!("invalid action: {err}"))
}

/// Apply one action and persist whatever it changed. Returns the error text
/// when the action was rejected; the session is left as it was.
fn apply_action(state: &mut AppState, action: &SessionAction) -> Option<String> {
    match state.session.apply(action) {
        Ok(next) => {
            for warning in persist_changes(state.store.as_mut(), &state.session, &next) {
                eprintln!("persist warning: {warning}");
            }
            state.session = next;
            None
        }
        Err(err) => Some(err.to_string()),
    }
}
