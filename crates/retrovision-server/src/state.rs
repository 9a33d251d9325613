//! Shared application state: the session, the generator and the pages.
//!
//! The service holds exactly one [`Session`]. Every change goes through the
//! reducer while the write lock is held and, when the reducer asks for a
//! generation, the generation runs on a background task. The task reports
//! back through [`AppState::apply`] as well, so completions are subject to
//! the same staleness check as everything else.

use std::sync::Arc;

use retrovision_core::catalog;
use retrovision_core::session::{Action, Effect, GENERATION_FAILED_MESSAGE, Transition};
use retrovision_core::Session;
use retrovision_generator::Generator;
use retrovision_types::{GenerationRequest, SessionSnapshot, ViewState};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::error::ApiError;
use crate::pages::Pages;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor.
pub struct AppState {
    /// The current session.
    pub session: RwLock<Session>,
    /// Runs generations requested by the session.
    pub generator: Generator,
    /// HTML page renderer.
    pub pages: Pages,
}

/// Outcome of a state change.
#[derive(Debug)]
pub struct Applied {
    /// The session right after the change.
    pub snapshot: SessionSnapshot,
    /// The generation task started by the change, if any.
    pub generation: Option<JoinHandle<()>>,
}

/// Fields of the input form to change. Absent fields are left unchanged.
#[derive(Debug, Default, Clone, serde::Deserialize)]
pub struct FormUpdate {
    /// New invention text.
    pub invention: Option<String>,
    /// New era name; must be in the catalog.
    pub era: Option<String>,
}

impl FormUpdate {
    fn into_actions(self) -> impl Iterator<Item = Action> {
        self.invention
            .map(Action::SetInvention)
            .into_iter()
            .chain(self.era.map(Action::SelectEra))
    }
}

/// Run `action` through the reducer in place.
fn step(session: &mut Session, action: Action) -> Option<Effect> {
    let Transition {
        session: next,
        effect,
    } = std::mem::take(session).update(action);
    *session = next;
    effect
}

impl AppState {
    /// Create state with a fresh session and the built-in page templates.
    pub fn new(generator: Generator) -> Result<Self, minijinja::Error> {
        Ok(Self {
            session: RwLock::new(Session::new()),
            generator,
            pages: Pages::new()?,
        })
    }

    /// Current session snapshot.
    pub async fn snapshot(&self) -> SessionSnapshot {
        self.session.read().await.snapshot()
    }

    /// Run `action` through the session reducer and start any requested
    /// generation.
    pub async fn apply(self: &Arc<Self>, action: Action) -> Applied {
        let (snapshot, effect) = {
            let mut session = self.session.write().await;
            let effect = step(&mut session, action);
            (session.snapshot(), effect)
        };
        self.finish(snapshot, effect)
    }

    /// Edit the input form.
    ///
    /// The view check, the era check and the edits happen under one write
    /// lock, so nothing can move the session off the form in between.
    ///
    /// # Errors
    ///
    /// - [`ApiError::WrongView`] when the session is not on the input form.
    /// - [`ApiError::UnknownEra`] when the era is not in the catalog.
    ///
    /// Nothing is changed on error.
    pub async fn edit_form(&self, update: FormUpdate) -> Result<SessionSnapshot, ApiError> {
        let mut session = self.session.write().await;
        let view = session.view();
        if view != ViewState::InputForm {
            return Err(ApiError::WrongView(format!("{view:?}")));
        }
        if let Some(era) = &update.era
            && !catalog::is_known_era(era)
        {
            return Err(ApiError::UnknownEra(era.clone()));
        }

        for action in update.into_actions() {
            // Form edits never request work.
            let _ = step(&mut session, action);
        }
        Ok(session.snapshot())
    }

    /// Apply posted form fields and submit, as one change.
    ///
    /// An unknown era is left for the reducer to report on the form, and
    /// the submit is skipped.
    pub async fn submit_form(self: &Arc<Self>, update: FormUpdate) -> Applied {
        let era_known = update.era.as_deref().is_none_or(catalog::is_known_era);
        let (snapshot, effect) = {
            let mut session = self.session.write().await;
            for action in update.into_actions() {
                let _ = step(&mut session, action);
            }
            let effect = if era_known {
                step(&mut session, Action::Submit)
            } else {
                None
            };
            (session.snapshot(), effect)
        };
        self.finish(snapshot, effect)
    }

    fn finish(self: &Arc<Self>, snapshot: SessionSnapshot, effect: Option<Effect>) -> Applied {
        let generation = effect.map(|Effect::Generate(request)| self.spawn_generation(request));
        Applied {
            snapshot,
            generation,
        }
    }

    fn spawn_generation(self: &Arc<Self>, request: GenerationRequest) -> JoinHandle<()> {
        let state = Arc::clone(self);
        tokio::spawn(async move {
            let request_id = request.request_id;
            info!(
                %request_id,
                invention = %request.invention,
                era = %request.era,
                "generation submitted"
            );

            let action = match state.generator.run(&request).await {
                Ok(result) => Action::GenerationSucceeded {
                    request_id,
                    result: Box::new(result),
                },
                Err(e) => {
                    warn!(%request_id, kind = %e.kind(), error = %e, "generation failed");
                    Action::GenerationFailed {
                        request_id,
                        message: GENERATION_FAILED_MESSAGE.to_owned(),
                    }
                }
            };

            // Completions never start further work.
            let _ = state.apply(action).await;
        })
    }
}
