//! Reservation domain entity

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Reservation lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationStatus {
    /// Created, awaiting host/admin confirmation
    Pending,
    /// Confirmed by host or admin
    Confirmed,
    /// Cancelled by guest, host or admin (terminal)
    Cancelled,
    /// Stay took place (terminal, set by explicit admin action)
    Completed,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::Cancelled => "Cancelled",
            Self::Completed => "Completed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(Self::Pending),
            "Confirmed" => Some(Self::Confirmed),
            "Cancelled" => Some(Self::Cancelled),
            "Completed" => Some(Self::Completed),
            _ => None,
        }
    }

    /// Whether a reservation in this status blocks its date range.
    /// Only Pending and Confirmed reservations hold dates.
    pub fn is_blocking(&self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }

    /// Legal lifecycle edges. Cancelled and Completed are terminal,
    /// and nothing ever re-enters Pending.
    pub fn can_transition_to(&self, target: ReservationStatus) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Confirmed)
                | (Self::Pending, Self::Cancelled)
                | (Self::Confirmed, Self::Cancelled)
                | (Self::Confirmed, Self::Completed)
        )
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Guest contact details captured with a booking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestInfo {
    pub full_name: String,
    pub phone: String,
    pub address: String,
}

/// A guest's claim on a listing for a half-open date range `[start, end)`
#[derive(Debug, Clone)]
pub struct Reservation {
    /// Assigned on creation, stable for the record's lifetime
    pub id: Uuid,
    pub listing_id: i32,
    /// Check-in date (inclusive)
    pub start: NaiveDate,
    /// Check-out date (exclusive); back-to-back stays never conflict
    pub end: NaiveDate,
    pub guest_count: i32,
    pub guest: GuestInfo,
    pub status: ReservationStatus,
    /// Computed once at creation as nights * nightly price; price changes
    /// on the listing never retroactively affect existing reservations.
    pub total_price: Decimal,
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    pub fn new_pending(
        listing_id: i32,
        start: NaiveDate,
        end: NaiveDate,
        guest_count: i32,
        guest: GuestInfo,
        total_price: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            listing_id,
            start,
            end,
            guest_count,
            guest,
            status: ReservationStatus::Pending,
            total_price,
            created_at: Utc::now(),
        }
    }

    /// Number of nights in the stay. Positive for any valid range.
    pub fn nights(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Half-open interval overlap: `[s1,e1)` and `[s2,e2)` overlap
    /// iff `s1 < e2 && s2 < e1`.
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start < end && start < self.end
    }

    /// Whether this reservation currently holds its date range
    pub fn is_blocking(&self) -> bool {
        self.status.is_blocking()
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn sample_reservation(start: &str, end: &str) -> Reservation {
        Reservation::new_pending(
            7,
            date(start),
            date(end),
            2,
            GuestInfo {
                full_name: "Amina Berrada".into(),
                phone: "+212600112233".into(),
                address: "12 Rue Atlas, Casablanca".into(),
            },
            dec!(4000),
        )
    }

    #[test]
    fn new_reservation_is_pending_and_blocking() {
        let r = sample_reservation("2024-01-10", "2024-01-15");
        assert_eq!(r.status, ReservationStatus::Pending);
        assert!(r.is_blocking());
        assert_eq!(r.nights(), 5);
    }

    #[test]
    fn adjacent_ranges_do_not_overlap() {
        let r = sample_reservation("2024-01-10", "2024-01-15");
        assert!(!r.overlaps(date("2024-01-15"), date("2024-01-20")));
        assert!(!r.overlaps(date("2024-01-05"), date("2024-01-10")));
    }

    #[test]
    fn contained_and_straddling_ranges_overlap() {
        let r = sample_reservation("2024-01-10", "2024-01-15");
        assert!(r.overlaps(date("2024-01-12"), date("2024-01-18")));
        assert!(r.overlaps(date("2024-01-08"), date("2024-01-11")));
        assert!(r.overlaps(date("2024-01-11"), date("2024-01-12")));
        assert!(r.overlaps(date("2024-01-01"), date("2024-02-01")));
    }

    #[test]
    fn legal_transitions() {
        use ReservationStatus::*;
        assert!(Pending.can_transition_to(Confirmed));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Confirmed.can_transition_to(Cancelled));
        assert!(Confirmed.can_transition_to(Completed));
    }

    #[test]
    fn no_transition_reenters_pending() {
        use ReservationStatus::*;
        for from in [Pending, Confirmed, Cancelled, Completed] {
            assert!(!from.can_transition_to(Pending));
        }
    }

    #[test]
    fn terminal_states_have_no_outbound_edges() {
        use ReservationStatus::*;
        for target in [Pending, Confirmed, Cancelled, Completed] {
            assert!(!Cancelled.can_transition_to(target));
            assert!(!Completed.can_transition_to(target));
        }
    }

    #[test]
    fn cancelled_and_completed_do_not_block() {
        let mut r = sample_reservation("2024-01-10", "2024-01-15");
        r.status = ReservationStatus::Cancelled;
        assert!(!r.is_blocking());
        r.status = ReservationStatus::Completed;
        assert!(!r.is_blocking());
        r.status = ReservationStatus::Confirmed;
        assert!(r.is_blocking());
    }

    #[test]
    fn status_display_roundtrip() {
        use ReservationStatus::*;
        for status in [Pending, Confirmed, Cancelled, Completed] {
            assert_eq!(ReservationStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ReservationStatus::parse("Expired"), None);
    }
}
