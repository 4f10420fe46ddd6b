//! Free-text point extraction for deliberation.
//!
//! These functions pull structured points out of free-form LLM output.
//! They are pure domain logic — no I/O, no session management, just text
//! pattern matching. Parsing is best-effort: on no-match the fallback is
//! an empty list (or an analysis-only opinion), never an error.

use super::contribution::ExpertOpinion;
use super::point::Point;

/// Extract key points from free text.
///
/// Segments bullet lists (`-`, `*`, `•`) and numbered lists (`1.`, `2)`)
/// into individual points. Lines that are not list items are ignored, so
/// prose-only text yields an empty list — callers must treat that as
/// "no points raised", not as a failure.
pub fn parse_points(text: &str) -> Vec<String> {
    let mut points = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let item = strip_list_marker(trimmed);
        if let Some(item) = item {
            let item = item.trim().trim_end_matches(['.', ';']);
            // Skip markers with no payload and section headers like "- Concerns:"
            if item.len() > 2 && !item.ends_with(':') {
                points.push(item.to_string());
            }
        }
    }

    points
}

/// Strip a leading bullet or numbered-list marker, if present
fn strip_list_marker(line: &str) -> Option<&str> {
    for marker in ["- ", "* ", "• "] {
        if let Some(rest) = line.strip_prefix(marker) {
            return Some(rest);
        }
    }

    // Numbered list: "1. point" or "12) point"
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 && digits <= 3 {
        let rest = &line[digits..];
        if let Some(rest) = rest.strip_prefix(". ").or_else(|| rest.strip_prefix(") ")) {
            return Some(rest);
        }
    }

    None
}

/// Parse a full expert response into an [`ExpertOpinion`].
///
/// Expects (but does not require) the response to carry `CONCERNS:` and
/// `RECOMMENDATIONS:` sections with list items underneath. Text before the
/// first recognized section header becomes the analysis. When no sections
/// are found the entire response is treated as analysis with no points —
/// the documented fallback for unstructured model output.
pub fn parse_opinion(domain: &str, response: &str) -> ExpertOpinion {
    let mut analysis = String::new();
    let mut concerns = Vec::new();
    let mut recommendations = Vec::new();

    #[derive(PartialEq)]
    enum Section {
        Analysis,
        Concerns,
        Recommendations,
        Other,
    }

    let mut section = Section::Analysis;

    for line in response.lines() {
        let upper = line.trim().trim_start_matches(['#', '*', ' ']).to_uppercase();

        if upper.starts_with("CONCERNS") {
            section = Section::Concerns;
            continue;
        }
        if upper.starts_with("RECOMMENDATIONS") {
            section = Section::Recommendations;
            continue;
        }
        if upper.starts_with("ANALYSIS") {
            section = Section::Analysis;
            continue;
        }
        // Any other header ends point collection for the current section
        if upper.ends_with(':') && upper.len() < 40 && section != Section::Analysis {
            section = Section::Other;
            continue;
        }

        match section {
            Section::Analysis => {
                analysis.push_str(line);
                analysis.push('\n');
            }
            Section::Concerns => {
                if let Some(item) = strip_list_marker(line.trim()) {
                    concerns.push(Point::new(domain, item.trim().trim_end_matches('.')));
                }
            }
            Section::Recommendations => {
                if let Some(item) = strip_list_marker(line.trim()) {
                    recommendations.push(Point::new(domain, item.trim().trim_end_matches('.')));
                }
            }
            Section::Other => {}
        }
    }

    ExpertOpinion {
        analysis: analysis.trim().to_string(),
        concerns,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== parse_points Tests ====================

    #[test]
    fn test_parse_points_bullets() {
        let text = "Summary of issues:\n- Missing disclosure requirements\n- Ambiguous ownership transfer\n* Late payment treatment unclear";
        let points = parse_points(text);
        assert_eq!(points.len(), 3);
        assert_eq!(points[0], "Missing disclosure requirements");
        assert_eq!(points[2], "Late payment treatment unclear");
    }

    #[test]
    fn test_parse_points_numbered() {
        let text = "1. Define digital asset custody\n2) Align with FAS 4 terminology";
        let points = parse_points(text);
        assert_eq!(points.len(), 2);
        assert_eq!(points[1], "Align with FAS 4 terminology");
    }

    #[test]
    fn test_parse_points_prose_fallback_is_empty() {
        let text = "The standard appears adequate overall and no changes are required.";
        assert!(parse_points(text).is_empty());
        assert!(parse_points("").is_empty());
    }

    #[test]
    fn test_parse_points_skips_headers_and_empty_markers() {
        let text = "- Concerns:\n- \n- Real point here";
        let points = parse_points(text);
        assert_eq!(points, vec!["Real point here"]);
    }

    #[test]
    fn test_parse_points_strips_trailing_punctuation() {
        let points = parse_points("- Clarify settlement timing.");
        assert_eq!(points, vec!["Clarify settlement timing"]);
    }

    // ==================== parse_opinion Tests ====================

    #[test]
    fn test_parse_opinion_sections() {
        let response = r#"The proposal addresses custody but not settlement.

CONCERNS:
- Settlement finality is undefined
- No guidance for hard forks

RECOMMENDATIONS:
- Add a settlement finality clause
"#;
        let opinion = parse_opinion("shariah_compliance", response);

        assert!(opinion.analysis.contains("custody"));
        assert_eq!(opinion.concerns.len(), 2);
        assert_eq!(opinion.recommendations.len(), 1);
        assert_eq!(opinion.concerns[0].domain, "shariah_compliance");
        assert_eq!(opinion.concerns[1].description, "No guidance for hard forks");
    }

    #[test]
    fn test_parse_opinion_markdown_headers() {
        let response = "## Analysis\nLooks fine.\n\n## Concerns:\n- One issue\n\n## Recommendations:\n- One fix";
        let opinion = parse_opinion("risk_management", response);
        assert_eq!(opinion.analysis, "Looks fine.");
        assert_eq!(opinion.concerns.len(), 1);
        assert_eq!(opinion.recommendations.len(), 1);
    }

    #[test]
    fn test_parse_opinion_unstructured_fallback() {
        let response = "I see no structural problems with this proposal.";
        let opinion = parse_opinion("practicality", response);
        assert_eq!(opinion.analysis, response);
        assert!(opinion.concerns.is_empty());
        assert!(opinion.recommendations.is_empty());
    }
}
