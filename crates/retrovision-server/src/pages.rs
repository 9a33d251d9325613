//! HTML rendering of the session.
//!
//! Pages are `minijinja` templates compiled into the binary. Template names
//! end in `.html`, so every interpolated value (user input and model
//! output alike) is HTML-escaped. Rendering is a pure function of the
//! [`SessionSnapshot`]: the page only shows the current screen and posts
//! actions back to the `/ui/*` routes.

use minijinja::{Environment, context};
use retrovision_core::catalog;
use retrovision_types::{SessionSnapshot, ViewState};

const TEMPLATES: [(&str, &str); 6] = [
    ("macros.html", include_str!("../templates/macros.html")),
    ("layout.html", include_str!("../templates/layout.html")),
    ("landing.html", include_str!("../templates/landing.html")),
    ("form.html", include_str!("../templates/form.html")),
    ("results.html", include_str!("../templates/results.html")),
    ("timeline.html", include_str!("../templates/timeline.html")),
];

/// Renders the page for a session snapshot.
pub struct Pages {
    env: Environment<'static>,
}

impl Pages {
    /// Compile the built-in page templates.
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        for (name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    /// Render the full page for `snapshot`.
    pub fn render(&self, snapshot: &SessionSnapshot) -> Result<String, minijinja::Error> {
        let name = match snapshot.view {
            ViewState::Landing => "landing.html",
            ViewState::InputForm => "form.html",
            ViewState::Results => "results.html",
            ViewState::Timeline => "timeline.html",
        };
        self.env.get_template(name)?.render(context! {
            snapshot => snapshot,
            eras => catalog::eras(),
            popular => catalog::POPULAR_INVENTIONS,
        })
    }
}

#[cfg(test)]
mod tests {
    use retrovision_core::Session;
    use retrovision_core::session::{Action, EMPTY_INVENTION_MESSAGE};

    use super::*;

    fn render(session: &Session) -> String {
        let page = Pages::new().and_then(|pages| pages.render(&session.snapshot()));
        assert!(page.is_ok(), "render failed: {page:?}");
        page.unwrap_or_default()
    }

    fn on_form() -> Session {
        Session::new().update(Action::StartExploring).session
    }

    #[test]
    fn landing_links_to_actions() {
        let page = render(&Session::new());
        assert!(page.contains("Reimagine History"));
        assert!(page.contains("/ui/start"));
        assert!(page.contains("/ui/example"));
        assert!(page.contains("/ui/timeline"));
        assert!(!page.contains("http-equiv"));
    }

    #[test]
    fn form_shows_validation_error_and_escapes_input() {
        let session = on_form()
            .update(Action::Submit)
            .session
            .update(Action::SetInvention("<script>".to_owned()))
            .session;
        let page = render(&session);
        assert!(page.contains(EMPTY_INVENTION_MESSAGE));
        assert!(page.contains("&lt;script&gt;"));
        assert!(!page.contains("<script>"));
    }

    #[test]
    fn form_preselects_current_era() {
        let page = render(&on_form());
        assert!(page.contains(r#"<option value="Victorian Era" selected>"#));
        assert!(page.contains(r#"<option value="Smartphone">"#));
    }

    #[test]
    fn example_result_renders_headline() {
        let session = Session::new().update(Action::ViewExample).session;
        let page = render(&session);
        assert!(page.contains("The Telegraph-Phone Apparatus"));
        assert!(page.contains("AI Generated Image"));
        assert!(page.contains("Gutta-percha"));
        assert!(page.contains("Start a New Exploration"));
    }

    #[test]
    fn timeline_lists_every_era() {
        let session = Session::new().update(Action::ViewTimeline).session;
        let page = render(&session);
        for era in catalog::eras() {
            assert!(page.contains(&era.name));
            assert!(page.contains(&era.display_range));
        }
    }

    #[test]
    fn loading_page_refreshes() {
        let session = on_form()
            .update(Action::SetInvention("Radio".to_owned()))
            .session
            .update(Action::Submit)
            .session;
        let page = render(&session);
        assert!(page.contains("Consulting the Archives"));
        assert!(page.contains(r#"http-equiv="refresh""#));
    }
}
