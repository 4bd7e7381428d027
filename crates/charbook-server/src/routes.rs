//! Router construction and request handlers.

use std::net::SocketAddr;
use std::sync::Arc;

use askama::Template;
use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use serde::Deserialize;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;
use tower_sessions::{MemoryStore, Session, SessionManagerLayer};
use tracing::info;

use charbook_store::{Database, StoreError};

use crate::auth::{self, AuthUser, SESSION_USER_ID_KEY};
use crate::error::ServerError;
use crate::export::{self, DOCX_FILENAME, DOCX_MIME};
use crate::extract::{characters_for_user, tokenize};

/// Shared application state.
///
/// The rusqlite connection is synchronous, so it sits behind an async mutex
/// and each handler holds the lock only for its store round-trip.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Mutex<Database>>,
}

pub fn build_router(state: AppState) -> Router {
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store).with_secure(false);

    Router::new()
        .route("/", get(home))
        .route("/register", get(register_page).post(register_submit))
        .route("/login", get(login_page).post(login_submit))
        .route("/add_words", get(add_words_page).post(add_words_submit))
        .route("/filter_words", get(filter_words))
        .route("/clear", get(clear_words))
        .route("/logout", get(logout))
        .route("/download", get(download))
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

#[derive(Template)]
#[template(path = "login.html")]
struct LoginTemplate;

#[derive(Template)]
#[template(path = "register.html")]
struct RegisterTemplate;

#[derive(Template)]
#[template(path = "add_words.html")]
struct AddWordsTemplate;

#[derive(Template)]
#[template(path = "filtered.html")]
struct FilteredTemplate {
    characters: Vec<char>,
}

// ---------------------------------------------------------------------------
// Forms
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct CredentialsForm {
    username: String,
    password: String,
}

#[derive(Deserialize)]
struct WordsForm {
    words: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// `GET /` -- send the browser wherever it can act.
async fn home(session: Session) -> Redirect {
    match session.get::<i64>(SESSION_USER_ID_KEY).await {
        Ok(Some(_)) => Redirect::to("/add_words"),
        _ => Redirect::to("/login"),
    }
}

async fn register_page() -> RegisterTemplate {
    RegisterTemplate
}

/// `POST /register` -- create the account, then hand off to the login page.
async fn register_submit(
    State(state): State<AppState>,
    Form(form): Form<CredentialsForm>,
) -> Result<Redirect, ServerError> {
    let password_hash = auth::hash_password(&form.password)?;

    let user = {
        let db = state.db.lock().await;
        db.create_user(&form.username, &password_hash)?
    };

    info!(user_id = user.id, username = %user.username, "registered new user");
    Ok(Redirect::to("/login"))
}

async fn login_page() -> LoginTemplate {
    LoginTemplate
}

/// `POST /login` -- exact username + password match establishes the session.
async fn login_submit(
    session: Session,
    State(state): State<AppState>,
    Form(form): Form<CredentialsForm>,
) -> Result<Redirect, ServerError> {
    let user = {
        let db = state.db.lock().await;
        match db.get_user_by_username(&form.username) {
            Ok(user) => user,
            Err(StoreError::NotFound) => return Err(ServerError::InvalidCredentials),
            Err(other) => return Err(other.into()),
        }
    };

    if !auth::verify_password(&form.password, &user.password_hash)? {
        return Err(ServerError::InvalidCredentials);
    }

    session.insert(SESSION_USER_ID_KEY, user.id).await?;
    info!(user_id = user.id, "logged in");
    Ok(Redirect::to("/add_words"))
}

async fn add_words_page(_user: AuthUser) -> AddWordsTemplate {
    AddWordsTemplate
}

/// `POST /add_words` -- tokenize the submission and persist every token.
async fn add_words_submit(
    user: AuthUser,
    State(state): State<AppState>,
    Form(form): Form<WordsForm>,
) -> Result<Redirect, ServerError> {
    let tokens = tokenize(&form.words);
    let token_refs: Vec<&str> = tokens.iter().map(String::as_str).collect();

    let count = {
        let mut db = state.db.lock().await;
        db.insert_words(user.id, &token_refs)?
    };

    info!(user_id = user.id, count, "ingested words");
    Ok(Redirect::to("/filter_words"))
}

/// `GET /filter_words` -- the unique-character sequence, newest
/// contributing word first.
async fn filter_words(
    user: AuthUser,
    State(state): State<AppState>,
) -> Result<FilteredTemplate, ServerError> {
    let characters = {
        let db = state.db.lock().await;
        characters_for_user(&db, user.id)?
    };
    Ok(FilteredTemplate { characters })
}

/// `GET /clear` -- bulk-delete the user's words.
async fn clear_words(
    user: AuthUser,
    State(state): State<AppState>,
) -> Result<Redirect, ServerError> {
    let removed = {
        let db = state.db.lock().await;
        db.delete_words_for_user(user.id)?
    };

    info!(user_id = user.id, removed, "cleared words");
    Ok(Redirect::to("/add_words"))
}

async fn logout(session: Session) -> Result<Redirect, ServerError> {
    session.flush().await?;
    Ok(Redirect::to("/login"))
}

/// `GET /download` -- the same character sequence as `/filter_words`,
/// packed as a `.docx` attachment.
async fn download(
    user: AuthUser,
    State(state): State<AppState>,
) -> Result<Response, ServerError> {
    let characters = {
        let db = state.db.lock().await;
        characters_for_user(&db, user.id)?
    };

    let bytes = export::unique_characters_docx(&characters)?;

    let headers = [
        (header::CONTENT_TYPE, DOCX_MIME.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{DOCX_FILENAME}\""),
        ),
    ];

    Ok((headers, bytes).into_response())
}

// ---------------------------------------------------------------------------
// Entry
// ---------------------------------------------------------------------------

pub async fn serve(state: AppState, addr: SocketAddr) -> anyhow::Result<()> {
    let app = build_router(state);

    info!(addr = %addr, "Starting HTTP server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
