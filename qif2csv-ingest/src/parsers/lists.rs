//! Parsers for the `!Type:Cat` and `!Type:Tag` list sections.
//!
//! Unlike register entries, list entries must sit on consecutive lines and
//! each one is closed by a `^` line.

use super::transactions::FieldCursor;
use crate::document::{Line, lines};
use crate::types::{CategoryDef, TagDef};

/// Category entries: `N`, `D`, then optional `T`, tax line (`R`/`E`/`,`), `I`, then `^`.
pub fn parse_category_defs(text: &str) -> Vec<CategoryDef> {
    parse_entries(text, |cur| {
        let name = cur.take('N')?;
        let description = cur.take('D')?;
        cur.take('T');
        cur.take_if(|line| line.starts_with(['R', 'E', ',']).then_some(()));
        cur.take('I');
        end_of_entry(cur)?;
        Some(CategoryDef {
            name: name.trim().to_string(),
            description: description.trim().to_string(),
        })
    })
}

/// Tag entries: `N`, optional `D`, then `^`.
pub fn parse_tag_defs(text: &str) -> Vec<TagDef> {
    parse_entries(text, |cur| {
        let name = cur.take('N')?;
        let description = cur.take('D');
        end_of_entry(cur)?;
        Some(TagDef {
            name: name.trim().to_string(),
            description: description.map(|d| d.trim().to_string()),
        })
    })
}

fn end_of_entry(cur: &mut FieldCursor<'_, '_>) -> Option<()> {
    cur.take_if(|line| (line == "^").then_some(()))
}

fn parse_entries<T>(
    text: &str,
    parse: impl for<'l, 'a> Fn(&mut FieldCursor<'l, 'a>) -> Option<T>,
) -> Vec<T> {
    let lines: Vec<Line<'_>> = lines(text);
    let mut out = Vec::new();

    let mut i = 0;
    while i < lines.len() {
        let mut cur = FieldCursor::strict(&lines, i);
        match parse(&mut cur) {
            Some(entry) => {
                out.push(entry);
                i = cur.position();
            }
            None => i += 1,
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_entries_with_optional_lines() {
        let text = "NAuto\nDVehicle costs\nE\n^\nNSalary\nDIncome\nT\nR\nI\n^\nNGifts\nDPresents\n^\n";
        let cats = parse_category_defs(text);
        let names: Vec<_> = cats.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Auto", "Salary", "Gifts"]);
        assert_eq!(cats[0].description, "Vehicle costs");
    }

    #[test]
    fn test_category_entry_requires_description() {
        let text = "NAuto\n^\nNFood\nDGroceries\n^\n";
        let cats = parse_category_defs(text);
        assert_eq!(cats.len(), 1);
        assert_eq!(cats[0].name, "Food");
    }

    #[test]
    fn test_category_entry_requires_terminator() {
        let text = "NAuto\nDVehicle\nXunexpected\n^\n";
        assert!(parse_category_defs(text).is_empty());
    }

    #[test]
    fn test_category_comma_tax_line() {
        let text = "NCharity\nDDonations\n,\n^\n";
        assert_eq!(parse_category_defs(text).len(), 1);
    }

    #[test]
    fn test_tag_entries() {
        let text = "NVacation\nDSummer trip\n^\nNReimbursable\n^\n";
        let tags = parse_tag_defs(text);
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].name, "Vacation");
        assert_eq!(tags[0].description.as_deref(), Some("Summer trip"));
        assert_eq!(tags[1].name, "Reimbursable");
        assert_eq!(tags[1].description, None);
    }

    #[test]
    fn test_tag_entries_do_not_skip_blank_lines() {
        let text = "NVacation\n\n^\n";
        assert!(parse_tag_defs(text).is_empty());
    }

    #[test]
    fn test_empty_list() {
        assert!(parse_category_defs("").is_empty());
        assert!(parse_tag_defs("").is_empty());
    }
}
