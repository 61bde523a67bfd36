use crate::error::AppError;
use crate::render;
use crate::screens::{LoginScreen, StudentsScreen};
use crate::session::{SessionContext, SessionToken};
use crate::shell::Route;
use crate::AppState;
use axum::extract::{Form, State};
use axum::http::{HeaderMap, StatusCode, header::SET_COOKIE};
use axum::response::{Html, IntoResponse, Redirect, Response};
use roster_model::{Field, StudentId};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// One user action on the students page, decoded from a form post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudentsAction {
    Create,
    View(StudentId),
    Edit(StudentId),
    Delete(StudentId),
    Cancel,
    Submit(Vec<(Field, String)>),
}

impl StudentsAction {
    pub fn from_form(form: &HashMap<String, String>) -> Result<Self, AppError> {
        let action = form
            .get("action")
            .ok_or_else(|| AppError::MalformedForm("missing action".to_string()))?;
        let id = || {
            form.get("id")
                .filter(|id| !id.is_empty())
                .map(|id| StudentId::new(id.as_str()))
                .ok_or_else(|| AppError::MalformedForm(format!("{action} needs an id")))
        };

        match action.as_str() {
            "create" => Ok(Self::Create),
            "view" => Ok(Self::View(id()?)),
            "edit" => Ok(Self::Edit(id()?)),
            "delete" => Ok(Self::Delete(id()?)),
            "cancel" => Ok(Self::Cancel),
            "submit" => Ok(Self::Submit(
                Field::ALL
                    .into_iter()
                    .filter_map(|field| form.get(field.key()).map(|value| (field, value.clone())))
                    .collect(),
            )),
            other => Err(AppError::MalformedForm(format!("unknown action {other:?}"))),
        }
    }

    /// Applies the action to `screen`.
    pub async fn apply(self, screen: &mut StudentsScreen) -> Result<(), AppError> {
        match self {
            Self::Create => screen.create(),
            Self::View(id) => {
                if !screen.view(&id) {
                    return Err(AppError::NotFound(id.into_inner()));
                }
            }
            Self::Edit(id) => {
                if !screen.edit(&id) {
                    return Err(AppError::NotFound(id.into_inner()));
                }
            }
            Self::Delete(id) => {
                screen.delete(&id).await;
            }
            Self::Cancel => screen.close_form(),
            Self::Submit(values) => {
                for (field, value) in values {
                    screen.form_mut().edit(field, value);
                }
                if let Err(e) = screen.submit_form().await {
                    debug!("Submit left the form open: {e}");
                }
            }
        }
        Ok(())
    }
}

async fn require_session(state: &AppState, headers: &HeaderMap) -> Result<Arc<SessionContext>, AppError> {
    let token = SessionToken::from_headers(headers).ok_or(AppError::Unauthenticated)?;
    state.registry.get(&token).await.ok_or(AppError::Unauthenticated)
}

pub async fn login_page() -> Html<String> {
    Html(render::login_page(&LoginScreen::new()))
}

pub async fn login_submit(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(form): Form<LoginForm>,
) -> Response {
    let mut screen = LoginScreen::new();
    let gateway = state.registry.backend().sessions();
    match screen.submit(gateway.as_ref(), &form.email, &form.password).await {
        Ok(session) => {
            // the new cookie replaces any session this browser already had
            if let Some(previous) = SessionToken::from_headers(&headers) {
                state.registry.release(&previous).await;
            }
            let token = state.registry.acquire(session).await;
            (
                [(SET_COOKIE, token.set_cookie())],
                Redirect::to(Route::Students.path()),
            )
                .into_response()
        }
        Err(_) => (StatusCode::UNAUTHORIZED, Html(render::login_page(&screen))).into_response(),
    }
}

pub async fn students_page(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Html<String>, AppError> {
    let context = require_session(&state, &headers).await?;
    let mut screen = context.screen.lock().await;
    screen.clear_expired_notice();
    screen.ensure_loaded().await;
    Ok(Html(render::students_page(&screen, &context.session)))
}

pub async fn students_action(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> Result<Redirect, AppError> {
    let context = require_session(&state, &headers).await?;
    let action = StudentsAction::from_form(&form)?;
    debug!("{} on students page: {:?}", context.session.email, action);

    let mut screen = context.screen.lock().await;
    screen.ensure_loaded().await;
    action.apply(&mut screen).await?;
    Ok(Redirect::to(Route::Students.path()))
}

pub async fn logout(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    if let Some(token) = SessionToken::from_headers(&headers) {
        state.registry.release(&token).await;
    }
    (
        [(SET_COOKIE, SessionToken::clear_cookie())],
        Redirect::to(Route::Login.path()),
    )
        .into_response()
}
