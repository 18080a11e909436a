use std::io::Cursor;
use tiny_http::Response;

use crate::render::{render_page, Page};
use crate::state::SharedState;
use crate::util::html::html_escape;
use crate::util::url::percent_encode;

// ---------------------------------------------------------------------------
// GET / and GET /index
// ---------------------------------------------------------------------------

pub fn handle_get(state: &SharedState) -> Response<Cursor<Vec<u8>>> {
    let names = match state.viewer.list_artifacts() {
        Ok(names) => names,
        Err(e) => return crate::routes::server_error(&e.to_string()),
    };

    let body = artifact_list_html(&names);
    let dir = state.viewer.store().dir().display().to_string();

    let html = render_page(Page::Index, |h| {
        h.replace("{{CONTENT}}", &body)
         .replace("{{SUBTITLE}}", &html_escape(&dir))
    });
    crate::routes::html_response(html)
}

fn artifact_list_html(names: &[String]) -> String {
    if names.is_empty() {
        return r#"<p class="empty">No genomes saved yet. Run <code>iris-neat -g 100 -p 150</code> to create one.</p>"#
            .to_owned();
    }

    let items: String = names
        .iter()
        .map(|name| {
            format!(
                r#"<li><a href="/genome/{href}">{label}</a></li>"#,
                href = percent_encode(name),
                label = html_escape(name),
            )
        })
        .collect();
    format!(r#"<ul class="artifact-list">{}</ul>"#, items)
}
