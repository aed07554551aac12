// src/models/page_state.rs

//! Opaque pagination state for the storefront's postback protocol.
//!
//! The listing page is a WebForms application: every page change is a form
//! POST that must echo back the hidden state tokens from the previous
//! response. The tokens are opaque to us and consumed exactly once.

/// Hidden form field carrying the serialized page state.
pub const VIEW_STATE: &str = "__VIEWSTATE";
/// Hidden form field validating which controls may post back.
pub const EVENT_VALIDATION: &str = "__EVENTVALIDATION";
/// Hidden form field tagging the state generator.
pub const VIEW_STATE_GENERATOR: &str = "__VIEWSTATEGENERATOR";
/// Hidden form field marking the previous page.
pub const PREVIOUS_PAGE: &str = "__PREVIOUSPAGE";

/// Control namespace shared by the pager buttons.
const PAGER_NAMESPACE: &str = "ctl00$ctl00$MainContent$MainContent";

/// Per-page protocol tokens extracted from one listing response.
///
/// A missing hidden field is represented as an empty string; the crawl
/// continues best-effort with whatever tokens were present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageState {
    pub view_state: String,
    pub event_validation: String,
    pub view_state_generator: String,
    pub previous_page: String,
}

impl PageState {
    /// Build the form body for requesting the next page.
    ///
    /// The body echoes the four tokens plus the event target naming the
    /// pager control being "clicked" and an empty event argument.
    pub fn form_fields(&self, event_target: &str) -> Vec<(&'static str, String)> {
        vec![
            ("__EVENTTARGET", event_target.to_string()),
            ("__EVENTARGUMENT", String::new()),
            (VIEW_STATE, self.view_state.clone()),
            (EVENT_VALIDATION, self.event_validation.clone()),
            (VIEW_STATE_GENERATOR, self.view_state_generator.clone()),
            (PREVIOUS_PAGE, self.previous_page.clone()),
        ]
    }
}

/// Event target for requesting the given 1-based page (`page >= 2`).
///
/// Pages 2 through 10 are reachable through the numbered pager links
/// (`rptCounter`, zero-padded index `page - 2`); anything beyond uses the
/// fixed "next" button.
pub fn event_target(page: usize) -> String {
    debug_assert!(page >= 2, "page 1 is fetched with a plain GET");
    if page <= 10 {
        format!("{PAGER_NAMESPACE}$rptCounter$ctl{:02}$LinkButton1", page - 2)
    } else {
        format!("{PAGER_NAMESPACE}$ibtnNext")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbered_pager_targets_are_zero_padded() {
        assert_eq!(
            event_target(2),
            "ctl00$ctl00$MainContent$MainContent$rptCounter$ctl00$LinkButton1"
        );
        assert_eq!(
            event_target(10),
            "ctl00$ctl00$MainContent$MainContent$rptCounter$ctl08$LinkButton1"
        );
    }

    #[test]
    fn pages_beyond_ten_use_the_next_button() {
        assert_eq!(
            event_target(11),
            "ctl00$ctl00$MainContent$MainContent$ibtnNext"
        );
        assert_eq!(event_target(15), event_target(11));
    }

    #[test]
    fn form_fields_echo_every_token() {
        let state = PageState {
            view_state: "vs".into(),
            event_validation: "ev".into(),
            view_state_generator: "gen".into(),
            previous_page: "prev".into(),
        };
        let fields = state.form_fields("target");
        assert_eq!(fields[0], ("__EVENTTARGET", "target".to_string()));
        assert_eq!(fields[1], ("__EVENTARGUMENT", String::new()));
        assert!(fields.contains(&(VIEW_STATE, "vs".to_string())));
        assert!(fields.contains(&(PREVIOUS_PAGE, "prev".to_string())));
    }
}
