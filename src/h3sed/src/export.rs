//! Hero index export as CSV or HTML

use serde::Serialize;
use std::fmt;
use std::io::Write;
use std::str::FromStr;
use thiserror::Error;

use crate::save::HeroSummary;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Export is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Export file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Html,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Html => "html",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "html" | "htm" => Ok(ExportFormat::Html),
            other => Err(format!("Unknown export format: {}", other)),
        }
    }
}

/// Column headers, in row order
pub const COLUMNS: [&str; 15] = [
    "Name",
    "Level",
    "Attack",
    "Defense",
    "Power",
    "Knowledge",
    "Experience",
    "Mana",
    "Movement total",
    "Movement left",
    "Army",
    "Artifacts",
    "Inventory",
    "Skills",
    "Spells",
];

fn row(hero: &HeroSummary) -> Vec<String> {
    vec![
        hero.name.clone(),
        hero.level.to_string(),
        hero.attack.to_string(),
        hero.defense.to_string(),
        hero.power.to_string(),
        hero.knowledge.to_string(),
        hero.experience.to_string(),
        hero.mana.to_string(),
        hero.movement_total.to_string(),
        hero.movement_left.to_string(),
        hero.army.join(", "),
        hero.artifacts.join(", "),
        hero.inventory.join(", "),
        hero.skills.join(", "),
        hero.spells.join(", "),
    ]
}

/// Write heroes as CSV with a header row
pub fn write_csv<W: Write>(heroes: &[HeroSummary], writer: W) -> Result<(), ExportError> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(COLUMNS)?;
    for hero in heroes {
        csv.write_record(row(hero))?;
    }
    csv.flush()?;
    Ok(())
}

pub fn to_csv(heroes: &[HeroSummary]) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    write_csv(heroes, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

/// Escape text for HTML element content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Escape JSON for embedding inside a `<script>` element
///
/// The result is still valid JSON, but cannot close the script element or
/// open a comment or CDATA section.
pub fn escape_script_json(json: &str) -> String {
    let mut escaped = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => escaped.push_str("\\u003c"),
            '>' => escaped.push_str("\\u003e"),
            '&' => escaped.push_str("\\u0026"),
            '\'' => escaped.push_str("\\u0027"),
            '\u{2028}' => escaped.push_str("\\u2028"),
            '\u{2029}' => escaped.push_str("\\u2029"),
            c => escaped.push(c),
        }
    }
    escaped
}

const HTML_SCRIPT: &str = r##"
  var input = document.getElementById("search");
  var rows = document.querySelectorAll("#heroes tbody tr");
  input.addEventListener("input", function() {
    var words = input.value.toLowerCase().split(/\s+/).filter(Boolean);
    DATA.forEach(function(cells, i) {
      var text = cells.join(" ").toLowerCase();
      var show = words.every(function(w) { return text.indexOf(w) >= 0; });
      rows[i].style.display = show ? "" : "none";
    });
  });
"##;

/// Standalone HTML page with a searchable hero table
pub fn to_html(title: &str, heroes: &[HeroSummary]) -> Result<String, ExportError> {
    let rows: Vec<Vec<String>> = heroes.iter().map(row).collect();
    let data = escape_script_json(&serde_json::to_string(&rows)?);
    let title = escape_html(title);

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", title));
    html.push_str(
        "<style>table { border-collapse: collapse; } th, td { border: 1px solid #999; \
         padding: 2px 6px; text-align: left; vertical-align: top; }</style>\n",
    );
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!("<h1>{}</h1>\n", title));
    html.push_str(&format!("<p>{} heroes</p>\n", heroes.len()));
    html.push_str("<input id=\"search\" type=\"search\" placeholder=\"Filter heroes\">\n");
    html.push_str("<table id=\"heroes\">\n<thead><tr>");
    for column in COLUMNS {
        html.push_str(&format!("<th>{}</th>", escape_html(column)));
    }
    html.push_str("</tr></thead>\n<tbody>\n");
    for cells in &rows {
        html.push_str("<tr>");
        for cell in cells {
            html.push_str(&format!("<td>{}</td>", escape_html(cell)));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>\n");
    html.push_str(&format!("<script>\nvar DATA = {};\n{}</script>\n", data, HTML_SCRIPT));
    html.push_str("</body>\n</html>\n");
    Ok(html)
}

/// Export heroes in the given format
pub fn export(
    format: ExportFormat,
    title: &str,
    heroes: &[HeroSummary],
) -> Result<String, ExportError> {
    match format {
        ExportFormat::Csv => to_csv(heroes),
        ExportFormat::Html => to_html(title, heroes),
    }
}
