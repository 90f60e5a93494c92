use crate::core::engine::Analysis;
use crate::utils::error::Result;

pub fn render_text(analysis: &Analysis, place: &str) -> String {
    let (start, end) = (analysis.query.start(), analysis.query.end());
    let summary = &analysis.summary;

    if summary.total == 0 {
        format!(
            "No known extant manuscripts found matching the criteria for the period {}-{} CE produced in {} in the loaded data.",
            start, end, place
        )
    } else {
        format!(
            "Total known extant manuscripts ({}, {}-{} CE): {}\n\
             Number of these containing illustrations/illuminations: {}\n\
             Percentage illustrated: {}%",
            place, start, end, summary.total, summary.illustrated, summary.percentage
        )
    }
}

pub fn render_json(analysis: &Analysis) -> Result<String> {
    Ok(serde_json::to_string_pretty(analysis)?)
}

/// Where to look when compiling or checking a manuscript data file.
pub fn data_sources() -> &'static str {
    "\
Data sources for Insular manuscripts (Britain, 700-1100 CE)
-----------------------------------------------------------
This tool only analyzes a locally compiled data file; it cannot query these
catalogues directly.

Corpus reference:
  - Gneuss & Lapidge, Anglo-Saxon Manuscripts: A Bibliographical Handlist of
    Manuscripts and Manuscript Fragments Written or Owned in England up to 1100
    (University of Toronto Press, 2014)

Catalogues and digital collections:
  - British Library: search.bl.uk, www.bl.uk/manuscripts,
    www.bl.uk/catalogues/illuminatedmanuscripts
  - Bodleian Libraries: search.bodleian.ox.ac.uk, digital.bodleian.ox.ac.uk
  - Cambridge Digital Library: cudl.lib.cam.ac.uk
  - Parker Library on the Web: parker.stanford.edu
  - Digital Scriptorium: digital-scriptorium.org

Expected columns (0-based): 4 start year, 5 end year, 6 broad place,
9 illustrated flag (true/yes/1)."
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::query::parse_year_input;
    use crate::domain::model::{Summary, YearBounds};

    fn analysis(input: &str, total: usize, illustrated: usize) -> Analysis {
        Analysis {
            query: parse_year_input(input, &YearBounds::default()).unwrap(),
            summary: Summary::from_counts(total, illustrated),
        }
    }

    #[test]
    fn test_render_text_with_matches() {
        let text = render_text(&analysis("750-1100", 3, 1), "Britain");
        assert_eq!(
            text,
            "Total known extant manuscripts (Britain, 750-1100 CE): 3\n\
             Number of these containing illustrations/illuminations: 1\n\
             Percentage illustrated: 33.33%"
        );
    }

    #[test]
    fn test_render_text_without_matches() {
        let text = render_text(&analysis("850", 0, 0), "Britain");
        assert!(text.starts_with("No known extant manuscripts found"));
        assert!(text.contains("850-850 CE produced in Britain"));
    }

    #[test]
    fn test_render_json() {
        let json = render_json(&analysis("800-900", 4, 1)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["query"]["start"], 800);
        assert_eq!(value["query"]["end"], 900);
        assert_eq!(value["query"]["kind"], "range");
        assert_eq!(value["summary"]["total"], 4);
        assert_eq!(value["summary"]["percentage"], "25.00");
        assert!(value["summary"]["error"].is_null());
    }
}
