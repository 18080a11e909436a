use std::io::Cursor;
use tiny_http::Response;

use iris_neat::{ArtifactReport, Genome, Inspection, Species};

use crate::render::{render_page, Page};
use crate::state::SharedState;
use crate::util::html::{format_vector, html_escape};
use crate::util::url::percent_encode;

// ---------------------------------------------------------------------------
// GET /genome/{name}
// ---------------------------------------------------------------------------

/// Replays the named artifact and renders one row per record.
pub fn handle_get(name: &str, state: &SharedState) -> Response<Cursor<Vec<u8>>> {
    let report = match state.viewer.inspect(name) {
        Ok(report) => report,
        Err(e) => return super::error_response(name, &e),
    };

    let summary = summary_html(&report);
    let results = results_table_html(&report.inspection);

    let html = render_page(Page::Genome, |h| {
        h.replace("{{SUBTITLE}}", &html_escape(name))
         .replace("{{CONTENT}}", &format!("{}{}", summary, results))
    });
    crate::routes::html_response(html)
}

// ---------------------------------------------------------------------------
// GET /genome/{name}/json
// ---------------------------------------------------------------------------

/// Serves the replay report as a JSON attachment.
pub fn handle_download(name: &str, state: &SharedState) -> Response<Cursor<Vec<u8>>> {
    let report = match state.viewer.inspect(name) {
        Ok(report) => report,
        Err(e) => return super::error_response(name, &e),
    };
    match serde_json::to_string_pretty(&report) {
        Ok(json) => crate::routes::json_download_response(json, &format!("{}.json", name)),
        Err(e) => crate::routes::server_error(&e.to_string()),
    }
}

fn summary_html(report: &ArtifactReport<Genome>) -> String {
    let inspection = &report.inspection;
    let fitness = report
        .fitness
        .map(|f| format!("{:.4}", f))
        .unwrap_or_else(|| "—".into());
    let hidden = report.genome.hidden_sizes();
    let hidden = if hidden.is_empty() {
        "none".to_owned()
    } else {
        hidden.iter().map(|n| n.to_string()).collect::<Vec<_>>().join(" → ")
    };

    format!(
        r#"<table class="summary-table">
          <tr><th>Dataset</th><td>{source}</td></tr>
          <tr><th>Genome key</th><td>{key}</td></tr>
          <tr><th>Fitness</th><td>{fitness}</td></tr>
          <tr><th>Hidden layers</th><td>{hidden}</td></tr>
          <tr><th>Parameters</th><td>{params}</td></tr>
          <tr><th>Total</th><td>{total}</td></tr>
          <tr><th>Correct</th><td>{correct}</td></tr>
          <tr><th>Accuracy</th><td>{accuracy:.2}%</td></tr>
        </table>
        <p><a href="/">← all genomes</a> · <a href="/genome/{href}/json">download JSON</a></p>"#,
        source = html_escape(&report.source),
        key = report.genome.key,
        fitness = fitness,
        hidden = hidden,
        params = report.genome.num_parameters(),
        total = inspection.total,
        correct = inspection.correct,
        accuracy = inspection.accuracy() * 100.0,
        href = percent_encode(&report.name),
    )
}

fn species_cell(species: Option<Species>) -> &'static str {
    species.map(Species::label).unwrap_or("—")
}

fn results_table_html(inspection: &Inspection) -> String {
    let rows: String = inspection
        .results
        .iter()
        .map(|r| {
            format!(
                r#"<tr class="{class}"><td>{index}</td><td>{input}</td><td>{expected}</td><td>{actual}</td><td>{mae:.4}</td><td>{exp_species}</td><td>{pred_species}</td><td>{verdict}</td></tr>"#,
                class = if r.is_correct { "correct" } else { "wrong" },
                index = r.index,
                input = format_vector(&r.input),
                expected = format_vector(&r.expected),
                actual = format_vector(&r.actual),
                mae = r.mean_absolute_error,
                exp_species = species_cell(r.expected_species),
                pred_species = species_cell(r.predicted_species),
                verdict = if r.is_correct { "✓" } else { "✗" },
            )
        })
        .collect();

    format!(
        r#"<table class="results-table">
          <thead><tr><th>#</th><th>Input</th><th>Expected</th><th>Output</th><th>MAE</th><th>Species</th><th>Predicted</th><th></th></tr></thead>
          <tbody>{}</tbody>
        </table>"#,
        rows
    )
}
