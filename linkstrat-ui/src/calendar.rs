//! Content calendar extraction
//!
//! The calendar stage returns markdown prose containing a labeled section
//! with a pipe-delimited table. This module deterministically splits that
//! blob into preamble / table rows / postamble so the rows can drive
//! per-post generation. Parsing never fails: anything that does not match
//! the expected shape degrades to "all preamble, no rows".

use serde::Serialize;

/// Section heading that introduces the calendar table
pub const CALENDAR_MARKER: &str = "## FOUR-WEEK CONTENT CALENDAR";

/// One planned post, extracted positionally from a table row
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CalendarRow {
    pub week_day: String,
    pub pillar: String,
    pub topic: String,
    pub approach: String,
    pub content_type: String,
}

/// The calendar text split into renderable segments
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CalendarDocument {
    /// Prose before the calendar section marker
    pub preamble: String,
    /// Parsed table rows in source order (header row excluded)
    pub rows: Vec<CalendarRow>,
    /// Text after the table, re-prefixed with the section marker so the
    /// heading survives downstream rendering
    pub postamble: Option<String>,
}

/// Split a calendar blob into preamble, rows, and postamble
pub fn extract(text: &str) -> CalendarDocument {
    let Some(marker_pos) = text.find(CALENDAR_MARKER) else {
        return degrade(text);
    };

    let preamble = text[..marker_pos].to_string();
    let section = &text[marker_pos + CALENDAR_MARKER.len()..];

    let lines: Vec<&str> = section.lines().collect();
    let last_table_line = lines
        .iter()
        .rposition(|line| line.trim_start().starts_with('|'));

    let Some(last_table_line) = last_table_line else {
        // Marker but no table at all
        return degrade(text);
    };

    let mut cell_rows: Vec<Vec<String>> = Vec::new();
    for line in &lines[..=last_table_line] {
        if !line.trim_start().starts_with('|') {
            continue;
        }
        let cells: Vec<String> = line
            .split('|')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect();
        if cells.is_empty() {
            continue;
        }
        // Separator rows (all dashes) carry no data
        if cells.iter().all(|c| c.chars().all(|ch| ch == '-')) {
            continue;
        }
        cell_rows.push(cells);
    }

    if cell_rows.is_empty() {
        return degrade(text);
    }

    // First retained row is the header
    let rows = cell_rows
        .into_iter()
        .skip(1)
        .map(|cells| {
            let mut cells = cells.into_iter();
            CalendarRow {
                week_day: cells.next().unwrap_or_default(),
                pillar: cells.next().unwrap_or_default(),
                topic: cells.next().unwrap_or_default(),
                approach: cells.next().unwrap_or_default(),
                content_type: cells.next().unwrap_or_default(),
            }
        })
        .collect();

    let remainder = lines[last_table_line + 1..].join("\n");
    let postamble = if remainder.trim().is_empty() {
        None
    } else {
        Some(format!("{}\n{}", CALENDAR_MARKER, remainder))
    };

    CalendarDocument {
        preamble,
        rows,
        postamble,
    }
}

/// Graceful degradation: the whole blob becomes preamble
fn degrade(text: &str) -> CalendarDocument {
    CalendarDocument {
        preamble: text.to_string(),
        rows: Vec::new(),
        postamble: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "before\n\
        ## FOUR-WEEK CONTENT CALENDAR\n\
        | Week - Day | Pillar | Topic | Approach | Content Type |\n\
        | --- | --- | --- | --- | --- |\n\
        | Week 1 - Monday | Growth | Scaling | Educational | Carousel |\n\
        after text";

    #[test]
    fn test_extracts_preamble_rows_and_postamble() {
        let doc = extract(SAMPLE);

        assert_eq!(doc.preamble, "before\n");
        assert_eq!(doc.rows.len(), 1);
        assert_eq!(
            doc.rows[0],
            CalendarRow {
                week_day: "Week 1 - Monday".to_string(),
                pillar: "Growth".to_string(),
                topic: "Scaling".to_string(),
                approach: "Educational".to_string(),
                content_type: "Carousel".to_string(),
            }
        );

        let postamble = doc.postamble.unwrap();
        assert!(postamble.starts_with(CALENDAR_MARKER));
        assert!(postamble.contains("after text"));
    }

    #[test]
    fn test_missing_marker_degrades_to_preamble() {
        let text = "just some prose\nwith | pipes | but no marker";
        let doc = extract(text);
        assert_eq!(doc.preamble, text);
        assert!(doc.rows.is_empty());
        assert_eq!(doc.postamble, None);
    }

    #[test]
    fn test_marker_without_table_degrades() {
        let text = "intro\n## FOUR-WEEK CONTENT CALENDAR\nno table here";
        let doc = extract(text);
        assert_eq!(doc.preamble, text);
        assert!(doc.rows.is_empty());
    }

    #[test]
    fn test_short_rows_pad_with_empty_strings() {
        let text = "## FOUR-WEEK CONTENT CALENDAR\n\
            | Week - Day | Pillar | Topic | Approach | Content Type |\n\
            | Week 2 - Friday | Leadership |\n";
        let doc = extract(text);
        assert_eq!(doc.rows.len(), 1);
        assert_eq!(doc.rows[0].week_day, "Week 2 - Friday");
        assert_eq!(doc.rows[0].pillar, "Leadership");
        assert_eq!(doc.rows[0].topic, "");
        assert_eq!(doc.rows[0].approach, "");
        assert_eq!(doc.rows[0].content_type, "");
    }

    #[test]
    fn test_rows_preserve_source_order_and_allow_duplicates() {
        let text = "## FOUR-WEEK CONTENT CALENDAR\n\
            | Week - Day | Pillar | Topic | Approach | Content Type |\n\
            | --- | --- | --- | --- | --- |\n\
            | Week 1 - Monday | A | T1 | Ap | Text |\n\
            | Week 1 - Monday | A | T1 | Ap | Text |\n\
            | Week 1 - Wednesday | B | T2 | Ap | Poll |\n";
        let doc = extract(text);
        let days: Vec<&str> = doc.rows.iter().map(|r| r.week_day.as_str()).collect();
        assert_eq!(
            days,
            vec!["Week 1 - Monday", "Week 1 - Monday", "Week 1 - Wednesday"]
        );
    }

    #[test]
    fn test_no_postamble_when_table_ends_the_text() {
        let text = "## FOUR-WEEK CONTENT CALENDAR\n\
            | Week - Day | Pillar | Topic | Approach | Content Type |\n\
            | Week 1 - Monday | A | T | Ap | Text |";
        let doc = extract(text);
        assert_eq!(doc.rows.len(), 1);
        assert_eq!(doc.postamble, None);
    }
}
