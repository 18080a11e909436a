/// Escapes text for safe inclusion in HTML element content and attributes.
/// Braces are escaped too, so user text never looks like a `{{TOKEN}}`.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
     .replace('<', "&lt;")
     .replace('>', "&gt;")
     .replace('"', "&quot;")
     .replace('\'', "&#39;")
     .replace('{', "&#123;")
     .replace('}', "&#125;")
}

/// Formats a float vector as `[a, b, c]` with fixed precision.
pub fn format_vector(values: &[f64]) -> String {
    let parts: Vec<String> = values.iter().map(|v| format!("{:.3}", v)).collect();
    format!("[{}]", parts.join(", "))
}
