//! Pagination footer and limit selector.

use hntr_core::format::grouped_number;
use hntr_core::pagination::{Pagination, LIMIT_CHOICES};

/// `Showing 1 to 500 of 1,234 results`, plus the previous/next hints.
pub fn footer(pagination: &Pagination, count: u64) -> String {
    let range = pagination.range(count);
    let mut out = if range.is_empty() {
        format!("Showing 0 of {} results", grouped_number(count))
    } else {
        format!(
            "Showing {} to {} of {} results",
            grouped_number(range.first),
            grouped_number(range.last),
            grouped_number(range.total)
        )
    };

    let mut nav = Vec::new();
    if pagination.page > 0 {
        nav.push(format!("previous: --page {}", pagination.previous().page));
    }
    if pagination.has_next(count) {
        nav.push(format!("next: --page {}", pagination.next().page));
    }
    if !nav.is_empty() {
        out.push_str(&format!(" ({})", nav.join(", ")));
    }
    out.push('\n');
    out
}

/// `Limit: 100 [500] 1000 5000`
pub fn limit_selector(current: u64) -> String {
    let choices: Vec<String> = LIMIT_CHOICES
        .iter()
        .map(|&l| {
            if l == current {
                format!("[{l}]")
            } else {
                l.to_string()
            }
        })
        .collect();
    format!("Limit: {}", choices.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_offers_next_only() {
        let p = Pagination::new(0, Some(500));
        assert_eq!(
            footer(&p, 1234),
            "Showing 1 to 500 of 1,234 results (next: --page 1)\n"
        );
    }

    #[test]
    fn last_page_offers_previous_only() {
        let p = Pagination::new(2, Some(500));
        assert_eq!(
            footer(&p, 1234),
            "Showing 1,001 to 1,234 of 1,234 results (previous: --page 1)\n"
        );
    }

    #[test]
    fn past_the_end_is_empty() {
        let p = Pagination::new(9, Some(100));
        assert_eq!(
            footer(&p, 50),
            "Showing 0 of 50 results (previous: --page 8)\n"
        );
    }

    #[test]
    fn selector_marks_current() {
        assert_eq!(limit_selector(500), "Limit: 100 [500] 1000 5000");
    }
}
