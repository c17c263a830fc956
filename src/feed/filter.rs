//! Caption search filter

use crate::models::MediaItem;

/// Whether an item's caption contains an already lower-cased query
fn matches_lowercase(item: &MediaItem, query_lower: &str) -> bool {
    query_lower.is_empty() || item.caption_lowercase().contains(query_lower)
}

/// Items whose caption contains `query`, ignoring case, in input order
pub fn filter(items: &[MediaItem], query: &str) -> Vec<MediaItem> {
    filter_refs(items, query).into_iter().cloned().collect()
}

/// Borrowing variant of [`filter`] used on every render
pub fn filter_refs<'a>(items: &'a [MediaItem], query: &str) -> Vec<&'a MediaItem> {
    let query = query.to_lowercase();
    items
        .iter()
        .filter(|item| matches_lowercase(item, &query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<MediaItem> {
        vec![
            MediaItem::new("1", "p1", "u1", "Krishna speaks\nThe Gita"),
            MediaItem::new("2", "p2", "u2", "Draupadi\nThe dice game"),
            MediaItem::new("3", "p3", "u3", ""),
            MediaItem::new("4", "p4", "u4", "BHISHMA\non the bed of arrows"),
        ]
    }

    #[test]
    fn test_empty_query_is_identity() {
        assert_eq!(filter(&items(), ""), items());
    }

    #[test]
    fn test_case_insensitive_match() {
        let found = filter(&items(), "bhishma");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "4");

        let found = filter(&items(), "THE");
        let ids: Vec<_> = found.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "4"]);
    }

    #[test]
    fn test_query_matches_body_lines_too() {
        let found = filter(&items(), "dice");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "2");
    }

    #[test]
    fn test_sound_and_complete() {
        let all = items();
        for query in ["the", "a", "gita", "xyz", "\n", "ARROWS"] {
            let found = filter(&all, query);
            let q = query.to_lowercase();
            for item in &found {
                assert!(item.caption.to_lowercase().contains(&q));
            }
            let expected = all
                .iter()
                .filter(|i| i.caption.to_lowercase().contains(&q))
                .count();
            assert_eq!(found.len(), expected, "query {query:?}");
        }
    }

    #[test]
    fn test_idempotent() {
        let once = filter(&items(), "the");
        assert_eq!(filter(&once, "the"), once);
    }

    #[test]
    fn test_single_item_ignores_case() {
        let item = [MediaItem::new("1", "p", "u", "Karna")];
        assert_eq!(filter_refs(&item, "KAR").len(), 1);
        assert!(filter_refs(&item, "arjuna").is_empty());
    }
}
