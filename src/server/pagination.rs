pub const QUESTIONS_PER_PAGE: usize = 10;

/// Returns the `page`-th window (1-indexed) of `items`. Pages below 1 are read
/// as page 1; pages past the end are empty.
pub fn paginate<T>(page: i64, items: Vec<T>) -> Vec<T> {
    let page = usize::try_from(page.max(1)).unwrap_or(usize::MAX);
    let start = (page - 1).saturating_mul(QUESTIONS_PER_PAGE);
    items
        .into_iter()
        .skip(start)
        .take(QUESTIONS_PER_PAGE)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: i64) -> Vec<i64> {
        (1..=n).collect()
    }

    #[test]
    fn first_page_holds_ten() {
        assert_eq!(paginate(1, items(25)), (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn last_page_is_partial() {
        assert_eq!(paginate(3, items(25)), (21..=25).collect::<Vec<_>>());
    }

    #[test]
    fn pages_reconstruct_the_listing() {
        let all = items(37);
        let rebuilt: Vec<i64> = (1..)
            .map(|p| paginate(p, all.clone()))
            .take_while(|page| !page.is_empty())
            .flatten()
            .collect();
        assert_eq!(rebuilt, all);
    }

    #[test]
    fn out_of_range_page_is_empty() {
        assert!(paginate(1000, items(19)).is_empty());
        assert!(paginate(i64::MAX, items(19)).is_empty());
    }

    #[test]
    fn non_positive_page_clamps_to_first() {
        assert_eq!(paginate(0, items(12)), paginate(1, items(12)));
        assert_eq!(paginate(-4, items(12)), paginate(1, items(12)));
    }
}
