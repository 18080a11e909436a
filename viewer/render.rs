/// Template renderer for the viewer.
///
/// One HTML template (`viewer/assets/viewer.html`) with `{{TOKEN}}`
/// placeholders, loaded at compile time. Page-specific tokens are filled by
/// the caller's closure; anything left over is blanked.

const TEMPLATE: &str = include_str!("assets/viewer.html");

#[derive(Clone, Copy)]
pub enum Page {
    Index,
    Genome,
}

impl Page {
    fn title(self) -> &'static str {
        match self {
            Page::Index => "Saved genomes",
            Page::Genome => "Genome results",
        }
    }
}

/// Renders the full page; `fill` substitutes the page-specific placeholders.
pub fn render_page<F>(page: Page, fill: F) -> String
where
    F: FnOnce(String) -> String,
{
    let mut html = TEMPLATE.to_owned();
    html = html.replace("{{PAGE_TITLE}}", page.title());
    html = fill(html);
    blank_remaining(html)
}

/// Replaces any `{{TOKEN}}` the caller did not substitute with an empty string.
fn blank_remaining(mut html: String) -> String {
    while let Some(start) = html.find("{{") {
        if let Some(end) = html[start..].find("}}") {
            let abs_end = start + end + 2;
            html.replace_range(start..abs_end, "");
        } else {
            break;
        }
    }
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leftover_tokens_are_blanked() {
        assert_eq!(blank_remaining("a{{X}}b{{Y_Z}}c".to_owned()), "abc");
        assert_eq!(blank_remaining("open {{ only".to_owned()), "open {{ only");
    }

    #[test]
    fn title_is_filled() {
        let html = render_page(Page::Index, |h| h);
        assert!(html.contains("Saved genomes"));
        assert!(!html.contains("{{"));
    }
}
