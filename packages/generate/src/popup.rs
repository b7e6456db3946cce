//! Popup markup bound to every marker and shape.

use worldmap_records_models::RecordDetails;

/// Builds the popup body for a marker or shape.
///
/// Layout: title, year line, description, historic location, present
/// location, source. Empty descriptive fields keep their label. The source
/// is a link only when both a name and a URL are present.
#[must_use]
pub fn compose(details: &RecordDetails) -> String {
    let mut body = format!("<p><b><u>{}</u></b>", details.title);

    body.push_str(&year_line(details));
    body.push_str(&labeled_line("Description", &details.description));
    body.push_str(&labeled_line("Historic Location", &details.historic_location));
    body.push_str(&labeled_line("Present Location", &details.present_location));
    body.push_str(&source_line(details));
    body.push_str("</p>");

    body
}

fn year_line(details: &RecordDetails) -> String {
    if !details.date_range_text.is_empty() {
        format!("<br/><b>Years:</b> {}", details.date_range_text)
    } else if !details.end_year.is_empty() {
        format!(
            "<br/><b>Years:</b> {} - {}",
            details.start_year, details.end_year
        )
    } else {
        format!("<br/><b>Year:</b> {}", details.start_year)
    }
}

fn labeled_line(label: &str, value: &str) -> String {
    if value.is_empty() {
        format!("<br/><b>{label}:</b> ")
    } else {
        format!("<br/><b>{label}:</b> {value}")
    }
}

fn source_line(details: &RecordDetails) -> String {
    match (details.source_name.is_empty(), details.source_url.is_empty()) {
        (false, false) => format!(
            "<br/><b>Source:</b> <a href='{}'>{}</a>",
            details.source_url, details.source_name
        ),
        (false, true) => format!("<br/><b>Source:</b> {}", details.source_name),
        (true, _) => "<br/><b>Source:</b> ".to_string(),
    }
}
