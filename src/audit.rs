//! Candidate filter: pure function of the account snapshot, the audit
//! configuration, and the current time.

use crate::config::AuditConfig;
use crate::directory::Account;
use chrono::{DateTime, NaiveDate, Utc};

/// Rendered in place of a day count or date when the account has never
/// signed in.
pub const NEVER: &str = "Never";

/// Separator for accounts matching more than one watched SKU.
const LICENSE_SEPARATOR: &str = ", ";

/// An account flagged as a license-reclaim opportunity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub display_name: String,
    pub user_principal_name: String,
    /// Whole days since last sign-in; `None` means no sign-in on record.
    pub inactive_days: Option<i64>,
    /// Matched watched SKUs, joined in the order they appear on the account.
    pub matched_licenses: String,
    /// Calendar date of the last sign-in, if any.
    pub last_sign_in: Option<NaiveDate>,
}

impl Candidate {
    pub fn inactive_days_display(&self) -> String {
        self.inactive_days
            .map_or_else(|| NEVER.to_string(), |days| days.to_string())
    }

    pub fn last_sign_in_display(&self) -> String {
        self.last_sign_in
            .map_or_else(|| NEVER.to_string(), |date| date.format("%Y-%m-%d").to_string())
    }
}

/// Apply the inactivity rule to every account, preserving enumeration order.
///
/// An account qualifies when its license set intersects the watched SKUs and
/// either its last sign-in is strictly more than `threshold_days` calendar
/// days before `now`, or it has never signed in at all. A sign-in exactly on
/// the boundary day does not qualify.
pub fn find_candidates(
    accounts: &[Account],
    config: &AuditConfig,
    now: DateTime<Utc>,
) -> Vec<Candidate> {
    accounts
        .iter()
        .filter_map(|account| classify(account, config, now))
        .collect()
}

fn classify(account: &Account, config: &AuditConfig, now: DateTime<Utc>) -> Option<Candidate> {
    let matched: Vec<&str> = account
        .licenses
        .iter()
        .filter(|sku| config.watched_skus.iter().any(|w| w == *sku))
        .map(String::as_str)
        .collect();
    if matched.is_empty() {
        return None;
    }

    let (inactive_days, last_sign_in) = match account.last_sign_in {
        Some(timestamp) => {
            // Calendar-day truncation on UTC dates, not a rounded hour count
            let days = (now.date_naive() - timestamp.date_naive()).num_days();
            if days <= config.threshold_days {
                return None;
            }
            (Some(days), Some(timestamp.date_naive()))
        }
        // No recorded activity counts as maximal inactivity
        None => (None, None),
    };

    Some(Candidate {
        display_name: account.display_name.clone(),
        user_principal_name: account.user_principal_name.clone(),
        inactive_days,
        matched_licenses: matched.join(LICENSE_SEPARATOR),
        last_sign_in,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn account(name: &str, skus: &[&str], last_sign_in: Option<DateTime<Utc>>) -> Account {
        Account {
            display_name: name.to_string(),
            user_principal_name: format!("{}@contoso.com", name.to_lowercase()),
            licenses: skus.iter().map(|s| s.to_string()).collect(),
            last_sign_in,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 27, 12, 0, 0).unwrap()
    }

    fn config() -> AuditConfig {
        AuditConfig::new(
            vec![
                "SPE_E5".to_string(),
                "VISIOCLIENT".to_string(),
                "POWER_BI_PRO".to_string(),
            ],
            90,
        )
        .unwrap()
    }

    #[test]
    fn account_without_watched_license_is_never_flagged() {
        let accounts = vec![account(
            "Dana",
            &["FLOW_FREE"],
            Some(now() - Duration::days(400)),
        )];
        assert!(find_candidates(&accounts, &config(), now()).is_empty());
    }

    #[test]
    fn sign_in_on_the_boundary_day_is_excluded() {
        let accounts = vec![account("Eve", &["SPE_E5"], Some(now() - Duration::days(90)))];
        assert!(find_candidates(&accounts, &config(), now()).is_empty());
    }

    #[test]
    fn one_day_past_the_boundary_is_flagged() {
        let accounts = vec![account("Eve", &["SPE_E5"], Some(now() - Duration::days(91)))];
        let candidates = find_candidates(&accounts, &config(), now());
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].inactive_days, Some(91));
        assert_eq!(candidates[0].inactive_days_display(), "91");
    }

    #[test]
    fn day_difference_truncates_rather_than_rounds() {
        // 90 days and 22 hours elapsed: a rounded count would be 91, but the
        // calendar-date difference is 90, which stays inside the boundary.
        let current = Utc.with_ymd_and_hms(2026, 8, 27, 23, 0, 0).unwrap();
        let last = current - Duration::hours(90 * 24 + 22);
        let accounts = vec![account("Frank", &["SPE_E5"], Some(last))];
        assert!(find_candidates(&accounts, &config(), current).is_empty());
    }

    #[test]
    fn never_signed_in_is_flagged_regardless_of_threshold() {
        let accounts = vec![account("Charlie", &["POWER_BI_PRO"], None)];
        for threshold in [1, 90, 100_000] {
            let config =
                AuditConfig::new(vec!["POWER_BI_PRO".to_string()], threshold).unwrap();
            let candidates = find_candidates(&accounts, &config, now());
            assert_eq!(candidates.len(), 1);
            assert_eq!(candidates[0].inactive_days, None);
            assert_eq!(candidates[0].inactive_days_display(), NEVER);
            assert_eq!(candidates[0].last_sign_in_display(), NEVER);
        }
    }

    #[test]
    fn multiple_matches_join_in_account_order() {
        let accounts = vec![account(
            "Grace",
            &["VISIOCLIENT", "SPE_E5", "FLOW_FREE"],
            None,
        )];
        let candidates = find_candidates(&accounts, &config(), now());
        assert_eq!(candidates[0].matched_licenses, "VISIOCLIENT, SPE_E5");
    }

    #[test]
    fn filter_is_idempotent_for_a_fixed_snapshot_and_time() {
        let accounts = vec![
            account("Alice", &["SPE_E5"], Some(now() - Duration::days(124))),
            account("Charlie", &["POWER_BI_PRO"], None),
            account("Dana", &[], Some(now() - Duration::days(400))),
        ];
        let first = find_candidates(&accounts, &config(), now());
        let second = find_candidates(&accounts, &config(), now());
        assert_eq!(first, second);
    }

    #[test]
    fn empty_input_yields_no_candidates() {
        assert!(find_candidates(&[], &config(), now()).is_empty());
    }

    #[test]
    fn worked_example() {
        let accounts = vec![
            account("Alice", &["SPE_E5"], Some(now() - Duration::days(124))),
            account("Bob", &["VISIOCLIENT"], Some(now() - Duration::days(95))),
            account("Charlie", &["POWER_BI_PRO"], None),
            account("Dana", &["FLOW_FREE"], Some(now() - Duration::days(400))),
        ];
        let candidates = find_candidates(&accounts, &config(), now());

        assert_eq!(candidates.len(), 3);
        assert_eq!(candidates[0].display_name, "Alice");
        assert_eq!(candidates[0].inactive_days, Some(124));
        assert_eq!(candidates[0].matched_licenses, "SPE_E5");
        assert_eq!(
            candidates[0].last_sign_in,
            Some((now() - Duration::days(124)).date_naive())
        );
        assert_eq!(candidates[1].display_name, "Bob");
        assert_eq!(candidates[1].inactive_days, Some(95));
        assert_eq!(candidates[2].display_name, "Charlie");
        assert_eq!(candidates[2].inactive_days, None);
        assert_eq!(candidates[2].last_sign_in_display(), NEVER);
    }
}
