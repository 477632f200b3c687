use chrono::{Days, NaiveDate};

use crate::domain::models::ExpenseRecord;

pub const DEFAULT_WINDOW_DAYS: u32 = 7;

/// Returns the records dated within `(now - window_days, now]`, in input order.
pub fn filter_recent(
    now: NaiveDate,
    window_days: u32,
    records: &[ExpenseRecord],
) -> Vec<ExpenseRecord> {
    let lower = window_start(now, window_days);
    records
        .iter()
        .filter(|record| record.date > lower && record.date <= now)
        .cloned()
        .collect()
}

/// Exclusive lower bound of the window ending at `now`.
pub fn window_start(now: NaiveDate, window_days: u32) -> NaiveDate {
    now.checked_sub_days(Days::new(u64::from(window_days)))
        .unwrap_or(NaiveDate::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::ExpenseId;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(id: &str, on: NaiveDate) -> ExpenseRecord {
        ExpenseRecord {
            id: ExpenseId::new(id),
            amount: 1.0,
            date: on,
            description: format!("expense {id}"),
        }
    }

    #[test]
    fn lower_bound_is_exclusive_and_now_inclusive() {
        let records = vec![
            record("a", date(2023, 6, 1)),
            record("b", date(2023, 6, 5)),
            record("c", date(2023, 6, 10)),
        ];

        let recent = filter_recent(date(2023, 6, 10), 7, &records);

        let ids: Vec<_> = recent.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
    }

    #[test]
    fn exact_boundary_day_is_excluded() {
        let records = vec![record("edge", date(2023, 6, 3)), record("in", date(2023, 6, 4))];

        let recent = filter_recent(date(2023, 6, 10), 7, &records);

        assert_eq!(recent, vec![record("in", date(2023, 6, 4))]);
    }

    #[test]
    fn future_dates_are_excluded() {
        let records = vec![record("tomorrow", date(2023, 6, 11))];
        assert!(filter_recent(date(2023, 6, 10), 7, &records).is_empty());
    }

    #[test]
    fn input_order_is_preserved() {
        let records = vec![
            record("late", date(2023, 6, 9)),
            record("early", date(2023, 6, 4)),
            record("mid", date(2023, 6, 7)),
        ];

        let recent = filter_recent(date(2023, 6, 10), 7, &records);

        let ids: Vec<_> = recent.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["late", "early", "mid"]);
    }

    #[test]
    fn window_crosses_month_boundaries_by_day_count() {
        assert_eq!(window_start(date(2023, 3, 3), 7), date(2023, 2, 24));
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(filter_recent(date(2023, 6, 10), 7, &[]).is_empty());
    }
}
