// File: src/theme.rs
// Purpose: Interchangeable presentation of the one form core

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Visual variant of the form. Both render the same controller state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Plain,
    Styled,
}

/// CSS classes a theme hangs on the shared markup
#[derive(Debug, Clone, Copy)]
pub struct ThemeClasses {
    pub form: &'static str,
    pub fields: &'static str,
    pub alert: &'static str,
    pub checkbox: &'static str,
    pub submit: &'static str,
    pub button: &'static str,
}

const PLAIN_CLASSES: ThemeClasses = ThemeClasses {
    form: "form-container",
    fields: "all-center",
    alert: "alert",
    checkbox: "form-checkbox",
    submit: "submit-btn",
    button: "btn",
};

const STYLED_CLASSES: ThemeClasses = ThemeClasses {
    form: "form-container styled",
    fields: "all-center styled-fields",
    alert: "alert styled-alert",
    checkbox: "form-checkbox styled-checkbox",
    submit: "submit-btn styled-submit",
    button: "btn styled-btn",
};

const STYLED_CSS: &str = r#"
.styled { max-width: 28rem; margin: 2rem auto; padding: 1.5rem; border-radius: 8px; background: #f7f7fb; box-shadow: 0 2px 8px rgba(0,0,0,.1); font-family: sans-serif; }
.styled-fields label { display: block; margin-bottom: .75rem; }
.styled-fields input[type=text], .styled-fields input[type=email], .styled-fields input[type=password] { width: 100%; padding: .4rem; border: 1px solid #ccd; border-radius: 4px; }
.styled-alert div { color: #b00020; font-size: .85rem; min-height: 1em; }
.styled-btn { padding: .5rem 1.5rem; border: none; border-radius: 4px; background: #3b5bdb; color: #fff; cursor: pointer; }
.styled-btn:disabled { background: #aab; cursor: not-allowed; }
"#;

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Plain => "plain",
            Theme::Styled => "styled",
        }
    }

    pub fn classes(self) -> ThemeClasses {
        match self {
            Theme::Plain => PLAIN_CLASSES,
            Theme::Styled => STYLED_CLASSES,
        }
    }

    /// Inline stylesheet, if the theme ships one
    pub fn stylesheet(self) -> Option<&'static str> {
        match self {
            Theme::Plain => None,
            Theme::Styled => Some(STYLED_CSS),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plain" => Ok(Theme::Plain),
            "styled" => Ok(Theme::Styled),
            other => Err(format!("unknown theme '{}', expected 'plain' or 'styled'", other)),
        }
    }
}
