// Title/year fallback matching for tracked records that carry no usable id

use shelf_models::{ExternalItem, TrackedRecord};

/// Normalize title for comparison (lowercase, trim)
pub fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}

/// Check whether an external item has the given title and year.
///
/// Years only block a match when both sides have one. A blank title never
/// matches.
pub fn titles_match(item: &ExternalItem, title: &str, year: Option<i32>) -> bool {
    let wanted = normalize_title(title);
    if wanted.is_empty() || normalize_title(&item.title) != wanted {
        return false;
    }
    match (item.year, year) {
        (Some(a), Some(b)) => a == b,
        _ => true,
    }
}

/// Find the first external item, in list order, that matches the record by
/// title and year and passes `eligible`.
///
/// First match wins; there is no ranking between candidates.
pub fn find_fallback_match<F>(
    external: &[ExternalItem],
    record: &TrackedRecord,
    eligible: F,
) -> Option<usize>
where
    F: Fn(usize) -> bool,
{
    let year = record.year();
    external
        .iter()
        .enumerate()
        .find(|(index, item)| titles_match(item, &record.title, year) && eligible(*index))
        .map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_models::MediaType;

    fn dune(year: Option<i32>) -> ExternalItem {
        let item = ExternalItem::new("7", "Dune", MediaType::Movie);
        match year {
            Some(year) => item.with_year(year),
            None => item,
        }
    }

    #[test]
    fn test_titles_match_ignores_case_and_whitespace() {
        assert!(titles_match(&dune(Some(2021)), "  dUNE ", Some(2021)));
        assert!(!titles_match(&dune(Some(2021)), "Dune: Part Two", Some(2021)));
    }

    #[test]
    fn test_missing_year_is_wildcard() {
        assert!(titles_match(&dune(None), "Dune", Some(1984)));
        assert!(titles_match(&dune(Some(2021)), "Dune", None));
        assert!(!titles_match(&dune(Some(2021)), "Dune", Some(1984)));
    }

    #[test]
    fn test_blank_title_never_matches() {
        let item = ExternalItem::new("1", "  ", MediaType::Movie);
        assert!(!titles_match(&item, "", None));
    }

    #[test]
    fn test_find_fallback_match_first_wins() {
        let external = vec![
            ExternalItem::new("1", "Solaris", MediaType::Movie).with_year(1972),
            ExternalItem::new("2", "Solaris", MediaType::Movie),
            ExternalItem::new("3", "Solaris", MediaType::Movie).with_year(2002),
        ];
        let record = TrackedRecord::new("solaris", MediaType::Movie).with_release_date("2002-11-27");

        assert_eq!(find_fallback_match(&external, &record, |_| true), Some(1));
        assert_eq!(find_fallback_match(&external, &record, |index| index != 1), Some(2));
        assert_eq!(find_fallback_match(&external, &record, |_| false), None);
    }
}
