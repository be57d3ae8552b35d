// File: src/view.rs
// Purpose: Maud markup for the form page and its HTMX fragments

use maud::{html, Markup, PreEscaped, DOCTYPE};
use onboard::{FieldName, FormState};

use crate::theme::Theme;

const HTMX_SRC: &str = "https://unpkg.com/htmx.org@1.9.12";

/// Id of the fragment swapped after each field change
pub const STATUS_ID: &str = "form-status";

fn field_vals(field: FieldName) -> String {
    serde_json::json!({ "field": field.as_str() }).to_string()
}

fn status_target() -> String {
    format!("#{}", STATUS_ID)
}

fn theme_vals(theme: Theme) -> String {
    serde_json::json!({ "theme": theme.as_str() }).to_string()
}

/// Full document
pub fn render_page(theme: Theme, state: &FormState) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                title { "Sign up" }
                script src=(HTMX_SRC) {}
                @if let Some(css) = theme.stylesheet() {
                    style { (PreEscaped(css)) }
                }
            }
            body {
                (render_form(theme, state))
            }
        }
    }
}

fn text_input(field: FieldName, state: &FormState) -> Markup {
    let value = state.fields().get(field).as_text().to_string();
    html! {
        label for=(field.dom_id()) {
            (field.label()) " "
            input
                id=(field.dom_id())
                name=(field.as_str())
                type=(field.kind().input_type())
                value=(value)
                placeholder=[field.placeholder()]
                hx-post="/field"
                hx-trigger="input changed"
                hx-target=(status_target())
                hx-swap="outerHTML"
                hx-vals=(field_vals(field));
        }
    }
}

/// The form element, swapped whole after a submit
pub fn render_form(theme: Theme, state: &FormState) -> Markup {
    let classes = theme.classes();
    let terms = FieldName::AcceptedTerms;

    html! {
        form
            id="signup-form"
            class=(classes.form)
            method="post"
            action="/submit"
            hx-post="/submit"
            hx-target="this"
            hx-swap="outerHTML"
            hx-vals=(theme_vals(theme)) {
            div class=(classes.fields) {
                @for field in FieldName::ALL.into_iter().filter(|f| *f != terms) {
                    (text_input(field, state))
                }

                div class=(classes.checkbox) {
                    label for=(terms.dom_id()) {
                        h4 { (terms.label()) }
                        input
                            type="checkbox"
                            name=(terms.as_str())
                            id=(terms.dom_id())
                            checked[state.fields().accepted_terms]
                            hx-post="/field"
                            hx-trigger="change"
                            hx-target=(status_target())
                            hx-swap="outerHTML"
                            hx-vals=(field_vals(terms));
                    }
                }

                (render_status(theme, state))
            }
        }
    }
}

/// Error messages and the submit button. The button is disabled while the gate is closed.
pub fn render_status(theme: Theme, state: &FormState) -> Markup {
    let classes = theme.classes();
    html! {
        div id=(STATUS_ID) {
            div class=(classes.alert) {
                @for (field, message) in state.errors().iter() {
                    div data-field=(field.as_str()) { (message) }
                }
            }
            div class=(classes.submit) {
                button class=(classes.button) type="submit" disabled[!state.can_submit()] {
                    "Submit"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use onboard::{reduce, FieldChange, FormAction};

    fn valid_state() -> FormState {
        [
            FieldChange::text(FieldName::FirstName, "Jo"),
            FieldChange::text(FieldName::LastName, "Do"),
            FieldChange::text(FieldName::Email, "a@b.com"),
            FieldChange::text(FieldName::Password, "Abcdef1!"),
            FieldChange::checkbox(FieldName::AcceptedTerms, true),
        ]
        .into_iter()
        .fold(FormState::mount(), |state, change| {
            reduce(state, FormAction::FieldChanged(change))
        })
    }

    #[test]
    fn test_page_has_five_inputs() {
        let html = render_page(Theme::Plain, &FormState::mount()).into_string();
        for field in FieldName::ALL {
            assert!(html.contains(&format!(r#"name="{}""#, field.as_str())), "missing {}", field);
        }
        assert!(html.contains(r#"type="email""#));
        assert!(html.contains(r#"type="password""#));
        assert!(html.contains(r#"type="checkbox""#));
        assert!(html.contains(r#"placeholder="John""#));
    }

    #[test]
    fn test_button_disabled_while_gate_closed() {
        let html = render_status(Theme::Plain, &FormState::mount()).into_string();
        assert!(html.contains(r#"type="submit" disabled"#));
    }

    #[test]
    fn test_button_enabled_when_gate_open() {
        let html = render_status(Theme::Plain, &valid_state()).into_string();
        assert!(html.contains(r#"type="submit">"#));
        assert!(!html.contains(r#"type="submit" disabled"#));
    }

    #[test]
    fn test_status_shows_messages_as_text() {
        let state = reduce(
            FormState::mount(),
            FormAction::FieldChanged(FieldChange::text(FieldName::Email, "nope")),
        );
        let html = render_status(Theme::Plain, &state).into_string();
        assert!(html.contains("The email must be a valid email address"));
        assert!(html.contains(r#"data-field="acceptedTerms""#));
    }

    #[test]
    fn test_values_are_escaped() {
        let state = reduce(
            FormState::mount(),
            FormAction::FieldChanged(FieldChange::text(FieldName::FirstName, "<b>")),
        );
        let html = render_form(Theme::Plain, &state).into_string();
        assert!(html.contains("&lt;b&gt;"));
        assert!(!html.contains(r#"value="<b>""#));
    }

    #[test]
    fn test_checkbox_reflects_store() {
        let html = render_form(Theme::Plain, &valid_state()).into_string();
        assert!(html.contains(" checked "));
    }

    #[test]
    fn test_styled_theme_ships_css_and_classes() {
        let html = render_page(Theme::Styled, &FormState::mount()).into_string();
        assert!(html.contains("<style>"));
        assert!(html.contains("styled-btn"));
        assert!(html.contains(r#"{&quot;theme&quot;:&quot;styled&quot;}"#));
    }
}
