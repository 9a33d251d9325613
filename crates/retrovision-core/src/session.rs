//! View state machine for a single browsing session.
//!
//! A [`Session`] is a plain value. Every change goes through
//! [`Session::update`], which consumes the session and an [`Action`] and
//! returns the next session plus an optional [`Effect`] for the caller to
//! run. The reducer itself performs no I/O.
//!
//! # Transitions
//!
//! ```text
//! Landing ──start──▶ InputForm ──submit──▶ Results(Loading) ──ok──▶ Results(Ready)
//!    │                   ▲                         │
//!    ├──example──▶ Results(Ready)                  └──failed──▶ InputForm + error
//!    └──timeline──▶ Timeline
//! any ──home──▶ Landing          any ──start──▶ InputForm (form reset)
//! ```
//!
//! A pending generation is identified by its [`RequestId`]. Completions for
//! any other id are stale and leave the session untouched, so a slow
//! response can never overwrite a screen the user has already moved past.

use retrovision_types::{GenerationRequest, GenerationResult, RequestId, SessionSnapshot, ViewState};
use tracing::debug;

use crate::catalog::{self, DEFAULT_ERA};

/// Shown when the form is submitted with an empty invention.
pub const EMPTY_INVENTION_MESSAGE: &str = "Please provide an invention to reimagine.";

/// Shown when a generation fails for any reason.
pub const GENERATION_FAILED_MESSAGE: &str =
    "An error occurred while consulting the archives. Please try again.";

/// What the results screen is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsPane {
    /// Waiting for the generation with this id.
    Loading {
        /// The generation being waited on.
        request_id: RequestId,
    },
    /// A finished result.
    Ready(Box<GenerationResult>),
}

/// The active screen, with the data only that screen owns.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Screen {
    /// Landing page.
    #[default]
    Landing,
    /// Input form.
    InputForm,
    /// Results screen. Cannot exist without a result or a pending request.
    Results(ResultsPane),
    /// Era timeline.
    Timeline,
}

impl Screen {
    /// The screen's tag.
    pub const fn view(&self) -> ViewState {
        match self {
            Self::Landing => ViewState::Landing,
            Self::InputForm => ViewState::InputForm,
            Self::Results(_) => ViewState::Results,
            Self::Timeline => ViewState::Timeline,
        }
    }
}

/// Contents of the input form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    /// Invention text as typed.
    pub invention: String,
    /// Selected era. Always a catalog name.
    pub era: String,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            invention: String::new(),
            era: DEFAULT_ERA.to_owned(),
        }
    }
}

/// User and system events the session reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Header logo: back to the landing page.
    Home,
    /// "Start exploring" or "start a new exploration": fresh input form.
    StartExploring,
    /// Show the canned example result.
    ViewExample,
    /// Show the era timeline.
    ViewTimeline,
    /// Edit the invention field.
    SetInvention(String),
    /// Pick an era by name.
    SelectEra(String),
    /// Submit the input form.
    Submit,
    /// A generation finished.
    GenerationSucceeded {
        /// Which generation finished.
        request_id: RequestId,
        /// Its result.
        result: Box<GenerationResult>,
    },
    /// A generation failed.
    GenerationFailed {
        /// Which generation failed.
        request_id: RequestId,
        /// Message to show on the input form.
        message: String,
    },
}

/// Work the caller must perform after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Run the generator and report back with
    /// [`Action::GenerationSucceeded`] or [`Action::GenerationFailed`].
    Generate(GenerationRequest),
}

/// Output of [`Session::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// The next session.
    pub session: Session,
    /// Work to start, if any.
    pub effect: Option<Effect>,
}

/// State of one browsing session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    screen: Screen,
    form: FormState,
    error: Option<String>,
}

impl Session {
    /// A session on the landing page with an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// The active screen.
    pub const fn screen(&self) -> &Screen {
        &self.screen
    }

    /// The active screen's tag.
    pub const fn view(&self) -> ViewState {
        self.screen.view()
    }

    /// The input form contents.
    pub const fn form(&self) -> &FormState {
        &self.form
    }

    /// The error message shown on the input form.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The generation the session is waiting for.
    pub const fn pending_request(&self) -> Option<RequestId> {
        match &self.screen {
            Screen::Results(ResultsPane::Loading { request_id }) => Some(*request_id),
            _ => None,
        }
    }

    /// The displayed result.
    pub fn result(&self) -> Option<&GenerationResult> {
        match &self.screen {
            Screen::Results(ResultsPane::Ready(result)) => Some(result.as_ref()),
            _ => None,
        }
    }

    /// Apply one action.
    pub fn update(mut self, action: Action) -> Transition {
        let mut effect = None;

        match action {
            Action::Home => {
                self.screen = Screen::Landing;
            }
            Action::StartExploring => {
                self.form = FormState::default();
                self.error = None;
                self.screen = Screen::InputForm;
            }
            Action::ViewExample => {
                self.screen = Screen::Results(ResultsPane::Ready(Box::new(
                    catalog::example_result(),
                )));
            }
            Action::ViewTimeline => {
                self.screen = Screen::Timeline;
            }
            Action::SetInvention(text) => {
                if self.screen == Screen::InputForm {
                    self.form.invention = text;
                }
            }
            Action::SelectEra(name) => {
                if self.screen == Screen::InputForm {
                    if catalog::is_known_era(&name) {
                        self.form.era = name;
                        self.error = None;
                    } else {
                        self.error = Some(format!("Unknown era: {name}"));
                    }
                }
            }
            Action::Submit => {
                if self.screen == Screen::InputForm {
                    effect = self.submit();
                }
            }
            Action::GenerationSucceeded { request_id, result } => {
                if self.pending_request() == Some(request_id) {
                    self.screen = Screen::Results(ResultsPane::Ready(result));
                } else {
                    debug!(%request_id, "discarding stale generation result");
                }
            }
            Action::GenerationFailed {
                request_id,
                message,
            } => {
                if self.pending_request() == Some(request_id) {
                    self.error = Some(message);
                    self.screen = Screen::InputForm;
                } else {
                    debug!(%request_id, "discarding stale generation failure");
                }
            }
        }

        Transition {
            session: self,
            effect,
        }
    }

    fn submit(&mut self) -> Option<Effect> {
        let invention = self.form.invention.trim();
        if invention.is_empty() {
            self.error = Some(EMPTY_INVENTION_MESSAGE.to_owned());
            return None;
        }

        let request = GenerationRequest {
            request_id: RequestId::new(),
            invention: invention.to_owned(),
            era: self.form.era.clone(),
        };
        self.error = None;
        self.screen = Screen::Results(ResultsPane::Loading {
            request_id: request.request_id,
        });
        Some(Effect::Generate(request))
    }

    /// Serializable projection for front ends.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            view: self.view(),
            invention: self.form.invention.clone(),
            era: self.form.era.clone(),
            error: self.error.clone(),
            loading: self.pending_request().is_some(),
            pending_request: self.pending_request(),
            result: self.result().cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use retrovision_types::{Deconstruction, Simulation};

    use super::*;

    fn result_for(invention: &str) -> Box<GenerationResult> {
        Box::new(GenerationResult {
            invention: invention.to_owned(),
            era: DEFAULT_ERA.to_owned(),
            deconstruction: Deconstruction {
                materials: ["m1".into(), "m2".into(), "m3".into(), "m4".into()],
                concepts: ["c1".into(), "c2".into(), "c3".into(), "c4".into()],
            },
            simulations: vec![Simulation {
                name: format!("{invention} engine"),
                description: "d".to_owned(),
            }],
            narrative: "n".to_owned(),
            image_url: "data:image/png;base64,AAAA".to_owned(),
            image_generated: true,
        })
    }

    fn on_form() -> Session {
        Session::new().update(Action::StartExploring).session
    }

    /// Submit `invention` from a fresh form; returns the session and request.
    fn submitted(session: Session, invention: &str) -> (Session, GenerationRequest) {
        let session = session
            .update(Action::SetInvention(invention.to_owned()))
            .session;
        let Transition { session, effect } = session.update(Action::Submit);
        match effect {
            Some(Effect::Generate(request)) => (session, request),
            None => (session, GenerationRequest {
                request_id: RequestId::new(),
                invention: String::new(),
                era: String::new(),
            }),
        }
    }

    #[test]
    fn starts_on_landing() {
        let session = Session::new();
        assert_eq!(session.view(), ViewState::Landing);
        assert_eq!(session.form().era, DEFAULT_ERA);
        assert!(session.result().is_none());
    }

    #[test]
    fn start_exploring_resets_form() {
        let session = on_form()
            .update(Action::SetInvention("Radio".to_owned()))
            .session
            .update(Action::SelectEra("Ancient Era".to_owned()))
            .session
            .update(Action::ViewTimeline)
            .session
            .update(Action::StartExploring)
            .session;

        assert_eq!(session.view(), ViewState::InputForm);
        assert!(session.form().invention.is_empty());
        assert_eq!(session.form().era, DEFAULT_ERA);
        assert!(session.error().is_none());
    }

    #[test]
    fn empty_submit_stays_on_form_without_effect() {
        let Transition { session, effect } = on_form().update(Action::Submit);
        assert_eq!(session.view(), ViewState::InputForm);
        assert_eq!(session.error(), Some(EMPTY_INVENTION_MESSAGE));
        assert!(effect.is_none());
    }

    #[test]
    fn whitespace_invention_counts_as_empty() {
        let session = on_form().update(Action::SetInvention("   ".to_owned())).session;
        let Transition { session, effect } = session.update(Action::Submit);
        assert_eq!(session.view(), ViewState::InputForm);
        assert!(effect.is_none());
    }

    #[test]
    fn submit_enters_loading_and_requests_generation() {
        let session = on_form()
            .update(Action::SelectEra("Medieval Era".to_owned()))
            .session;
        let (session, request) = submitted(session, "  Telescope ");

        assert_eq!(session.view(), ViewState::Results);
        assert_eq!(session.pending_request(), Some(request.request_id));
        assert!(session.result().is_none());
        assert_eq!(request.invention, "Telescope");
        assert_eq!(request.era, "Medieval Era");
        assert!(session.snapshot().loading);
    }

    #[test]
    fn success_populates_result() {
        let (session, request) = submitted(on_form(), "Smartphone");
        let session = session
            .update(Action::GenerationSucceeded {
                request_id: request.request_id,
                result: result_for("Smartphone"),
            })
            .session;

        assert_eq!(session.view(), ViewState::Results);
        assert_eq!(session.result().map(|r| r.invention.as_str()), Some("Smartphone"));
        assert!(session.pending_request().is_none());
    }

    #[test]
    fn failure_returns_to_form_with_message() {
        let (session, request) = submitted(on_form(), "Smartphone");
        let session = session
            .update(Action::GenerationFailed {
                request_id: request.request_id,
                message: GENERATION_FAILED_MESSAGE.to_owned(),
            })
            .session;

        assert_eq!(session.view(), ViewState::InputForm);
        assert_eq!(session.error(), Some(GENERATION_FAILED_MESSAGE));
        assert!(session.result().is_none());
        assert_eq!(session.form().invention, "Smartphone");
    }

    #[test]
    fn stale_success_does_not_clobber_newer_result() {
        let (session, request_a) = submitted(on_form(), "Airplane");
        let session = session.update(Action::StartExploring).session;
        let (session, request_b) = submitted(session, "Computer");

        let session = session
            .update(Action::GenerationSucceeded {
                request_id: request_b.request_id,
                result: result_for("Computer"),
            })
            .session
            .update(Action::GenerationSucceeded {
                request_id: request_a.request_id,
                result: result_for("Airplane"),
            })
            .session;

        assert_eq!(session.result().map(|r| r.invention.as_str()), Some("Computer"));
    }

    #[test]
    fn stale_failure_is_ignored() {
        let (session, request_a) = submitted(on_form(), "Airplane");
        let session = session.update(Action::ViewExample).session;
        let session = session
            .update(Action::GenerationFailed {
                request_id: request_a.request_id,
                message: "boom".to_owned(),
            })
            .session;

        assert_eq!(session.view(), ViewState::Results);
        assert!(session.error().is_none());
        assert_eq!(session.result().map(|r| r.invention.as_str()), Some("Smartphone"));
    }

    #[test]
    fn completion_after_navigating_home_is_discarded() {
        let (session, request) = submitted(on_form(), "Airplane");
        let session = session
            .update(Action::Home)
            .session
            .update(Action::GenerationSucceeded {
                request_id: request.request_id,
                result: result_for("Airplane"),
            })
            .session;

        assert_eq!(session.view(), ViewState::Landing);
        assert!(session.result().is_none());
    }

    #[test]
    fn example_loads_identically_twice() {
        let first = Session::new().update(Action::ViewExample).session;
        let second = first.clone().update(Action::ViewExample).session;
        assert_eq!(first.result(), second.result());
        assert_eq!(first.result(), Some(&catalog::example_result()));
    }

    #[test]
    fn unknown_era_is_rejected() {
        let session = on_form()
            .update(Action::SelectEra("Space Age".to_owned()))
            .session;
        assert_eq!(session.form().era, DEFAULT_ERA);
        assert!(session.error().is_some_and(|e| e.contains("Space Age")));
    }

    #[test]
    fn valid_era_clears_unknown_era_error() {
        let session = on_form()
            .update(Action::SelectEra("Space Age".to_owned()))
            .session
            .update(Action::SelectEra("Ancient Era".to_owned()))
            .session;
        assert_eq!(session.form().era, "Ancient Era");
        assert_eq!(session.error(), None);
    }

    #[test]
    fn form_edits_outside_form_are_ignored() {
        let session = Session::new()
            .update(Action::SetInvention("Radio".to_owned()))
            .session;
        assert!(session.form().invention.is_empty());

        let Transition { session, effect } = session.update(Action::Submit);
        assert_eq!(session.view(), ViewState::Landing);
        assert!(effect.is_none());
    }

    #[test]
    fn home_is_reachable_from_every_screen() {
        let screens = [
            Session::new(),
            on_form(),
            Session::new().update(Action::ViewExample).session,
            Session::new().update(Action::ViewTimeline).session,
        ];
        for session in screens {
            assert_eq!(session.update(Action::Home).session.view(), ViewState::Landing);
        }
    }
}
