use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::presenter::{LOADING_MESSAGE, ViewState};

const TITLE: &str = "Summarize Text from YouTube or a Website";

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; max-width: 48rem; margin: 2rem auto; padding: 0 1rem; color: #1f2328; }
label { display: block; margin-top: 1rem; font-weight: 600; }
input { width: 100%; padding: .5rem; margin-top: .25rem; box-sizing: border-box; }
button { margin-top: 1rem; padding: .5rem 1rem; }
.panel { margin-top: 1.5rem; padding: 1rem; border-radius: .5rem; }
.success { background: #dafbe1; }
.error { background: #ffebe9; }
.summary { white-space: pre-wrap; }
#loading { display: none; margin-top: 1.5rem; }
#loading.visible { display: block; }
"#;

// Shows the busy indicator while the form submission is in flight.
const SCRIPT: &str = r#"
document.getElementById("summarize-form").addEventListener("submit", function () {
  document.getElementById("loading").classList.add("visible");
  document.getElementById("submit").disabled = true;
});
"#;

/// Renders the whole page for `state`. `url` refills the URL field; the
/// credential is never written back into the page.
pub fn render(state: &ViewState, url: &str) -> String {
    let loading_class = matches!(state, ViewState::Loading).then_some("visible");

    let page = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "Summarize the listed URL" }
                style { (PreEscaped(STYLE)) }
            }
            body {
                h1 { (TITLE) }
                h2 { "Summarize URL" }
                form id="summarize-form" method="post" action="/" {
                    label for="api_key" { "Enter your Groq API key" }
                    input id="api_key" name="api_key" type="password" autocomplete="off";
                    label for="url" { "Enter the URL of YouTube or website to summarize" }
                    input id="url" name="url" type="text" value=(url);
                    button id="submit" type="submit" {
                        "Summarize the website or YouTube transcript"
                    }
                }
                div id="loading" class=[loading_class] role="status" { (LOADING_MESSAGE) }
                (panel(state))
                script { (PreEscaped(SCRIPT)) }
            }
        }
    };

    page.into_string()
}

fn panel(state: &ViewState) -> Markup {
    match state {
        ViewState::SummaryDisplayed(result) => html! {
            section class="panel success" {
                p { strong { "Summary:" } }
                div class="summary" { (result.summary) }
            }
        },
        ViewState::ErrorDisplayed(message) => html! {
            section class="panel error" role="alert" { (message) }
        },
        ViewState::Idle | ViewState::Validating | ViewState::Loading => html! {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::LoadStrategy;
    use crate::pipeline::SummaryResult;

    #[test]
    fn idle_page_has_form_and_no_panel() {
        let html = render(&ViewState::Idle, "");
        assert!(html.contains(r#"type="password""#));
        assert!(html.contains("Summarize the website or YouTube transcript"));
        assert!(!html.contains("class=\"panel"));
        assert!(!html.contains("id=\"loading\" class=\"visible\""));
    }

    #[test]
    fn summary_is_escaped_but_otherwise_verbatim() {
        let state = ViewState::SummaryDisplayed(SummaryResult {
            summary: "# Title\n- <b>bold</b> & more".into(),
            strategy: LoadStrategy::WebPage,
            word_count: 10,
        });
        let html = render(&state, "https://example.com/?a=1&b=2");

        assert!(html.contains("<strong>Summary:</strong>"));
        assert!(html.contains("# Title\n- &lt;b&gt;bold&lt;/b&gt; &amp; more"));
        assert!(html.contains(r#"value="https://example.com/?a=1&amp;b=2""#));
    }

    #[test]
    fn error_panel_shows_message() {
        let html = render(&ViewState::ErrorDisplayed("Please enter a valid URL.".into()), "nope");
        assert!(html.contains(
            r#"<section class="panel error" role="alert">Please enter a valid URL.</section>"#
        ));
    }

    #[test]
    fn loading_state_shows_indicator() {
        let html = render(&ViewState::Loading, "https://example.com");
        assert!(html.contains(
            r#"<div id="loading" class="visible" role="status">Loading and summarizing content...</div>"#
        ));
    }

    #[test]
    fn markup_in_inputs_and_errors_is_escaped() {
        let url = r#""><script>alert(1)</script>"#;
        let html = render(&ViewState::ErrorDisplayed(format!("An error occurred: {url}")), url);

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains(r#"value="&quot;&gt;&lt;script&gt;alert(1)&lt;/script&gt;""#));
        assert!(html.contains(
            r#"role="alert">An error occurred: &quot;&gt;&lt;script&gt;alert(1)&lt;/script&gt;</section>"#
        ));
    }

    #[test]
    fn page_script_is_not_escaped() {
        let html = render(&ViewState::Idle, "");
        assert!(html.contains(r#"document.getElementById("summarize-form")"#));
    }
}
