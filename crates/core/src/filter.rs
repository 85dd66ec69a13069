//! Search, filtering and grouping over store collections.
//!
//! Everything here is a pure function of its inputs. Results borrow from the collection and keep
//! its order.

use crate::error::{WardError, WardResult};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use ward_catalog::{
    Alert, AlertStatus, ApprovalKind, ApprovalRequest, ApprovalStatus, Availability,
    ClinicalReview, DietPlan, EventKind, Incident, IncidentStatus, MedicationDose,
    MedicationStatus, NoteCategory, NurseNote, Patient, PatientCondition, Prescription,
    PrescriptionStatus, Priority, Referral, ReferralStatus, RefillRequest, RefillStatus,
    ResultFlag, ResultStatus, ReviewStatus, Role, Service, SessionStatus, Severity, Shift,
    StaffMember, TestCategory, TestOrder, TestOrderStatus, TestResult, TherapySession, Urgency,
    WardEvent,
};

/// Text fields a free-text search looks at.
pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;
}

macro_rules! searchable {
    ($($ty:ty => [$($field:ident),+]),+ $(,)?) => {
        $(
            impl Searchable for $ty {
                fn search_fields(&self) -> Vec<&str> {
                    vec![$(self.$field.as_str()),+]
                }
            }
        )+
    };
}

searchable! {
    Patient => [name, bed_number, diagnosis],
    Alert => [patient_name, bed_number, message],
    MedicationDose => [patient_name, drug, bed_number],
    NurseNote => [patient_name, text],
    TestOrder => [patient_name, test_name, bed_number],
    TestResult => [patient_name, test_name],
    Prescription => [patient_name, medication, bed_number],
    RefillRequest => [patient_name, medication, bed_number],
    ApprovalRequest => [patient_name, description, bed_number],
    ClinicalReview => [patient_name, reason, bed_number],
    Incident => [title, location],
    StaffMember => [name],
    Referral => [patient_name, reason, bed_number],
    TherapySession => [patient_name, exercise_plan, bed_number],
    DietPlan => [patient_name, diet, bed_number],
}

impl Searchable for WardEvent {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str(), self.location.as_str()];
        if let Some(name) = &self.patient_name {
            fields.push(name);
        }
        fields
    }
}

/// Whether `item` matches `term`, ignoring case. A blank term matches everything.
pub fn matches<T: Searchable>(item: &T, term: &str) -> bool {
    let needle = term.trim().to_lowercase();
    needle.is_empty()
        || item
            .search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
}

/// Items whose search fields contain `term`, case-insensitively.
pub fn search<'a, T: Searchable>(items: &'a [Arc<T>], term: &str) -> Vec<&'a Arc<T>> {
    items.iter().filter(|&item| matches(&**item, term)).collect()
}

/// A closed set of values a collection can be filtered or grouped by.
pub trait Dimension: Copy + Eq + fmt::Display + 'static {
    /// Every value, in declaration order.
    fn values() -> &'static [Self];
}

macro_rules! dimensions {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Dimension for $ty {
                fn values() -> &'static [Self] {
                    <$ty>::ALL
                }
            }
        )+
    };
}

dimensions! {
    Role, Urgency, Severity, Priority,
    PatientCondition,
    AlertStatus, MedicationStatus, NoteCategory,
    TestCategory, TestOrderStatus, ResultFlag, ResultStatus,
    Availability, PrescriptionStatus, RefillStatus,
    ApprovalKind, ApprovalStatus, ReviewStatus,
    IncidentStatus, EventKind, Shift,
    Service, ReferralStatus, SessionStatus,
}

/// Parses a dimension value from its display spelling, ignoring case and accepting `_` for `-`.
pub fn parse_value<D: Dimension>(raw: &str) -> WardResult<D> {
    let wanted = raw.trim().to_lowercase().replace('_', "-");
    D::values()
        .iter()
        .copied()
        .find(|value| value.to_string() == wanted)
        .ok_or_else(|| {
            let known: Vec<String> = D::values().iter().map(ToString::to_string).collect();
            WardError::InvalidInput(format!(
                "unknown filter value {raw:?}; expected one of: {}",
                known.join(", ")
            ))
        })
}

/// Items whose `key` equals `value`; `None` keeps everything.
pub fn filter_by<'a, T, D, F>(items: &'a [Arc<T>], key: F, value: Option<D>) -> Vec<&'a Arc<T>>
where
    D: Dimension,
    F: Fn(&T) -> D,
{
    items
        .iter()
        .filter(|&item| value.map_or(true, |v| key(item) == v))
        .collect()
}

/// Items sharing one dimension value.
#[derive(Debug)]
pub struct Bucket<'a, T, D> {
    pub key: D,
    pub items: Vec<&'a Arc<T>>,
}

impl<T, D> Bucket<'_, T, D> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// Partitions `items` into one bucket per dimension value, in declaration order.
///
/// Buckets with no items are kept so views can show an empty state for them.
pub fn group_by<'a, T, D, F>(items: &'a [Arc<T>], key: F) -> Vec<Bucket<'a, T, D>>
where
    D: Dimension,
    F: Fn(&T) -> D,
{
    let mut buckets: Vec<Bucket<'a, T, D>> = D::values()
        .iter()
        .map(|&key| Bucket {
            key,
            items: Vec::new(),
        })
        .collect();

    for item in items {
        let k = key(item);
        if let Some(bucket) = buckets.iter_mut().find(|b| b.key == k) {
            bucket.items.push(item);
        }
    }
    buckets
}

/// Number of items for one dimension value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Count {
    pub key: String,
    pub count: usize,
}

/// Counts per dimension value, zeros included.
pub fn count_by<T, D, F>(items: &[Arc<T>], key: F) -> Vec<Count>
where
    D: Dimension,
    F: Fn(&T) -> D,
{
    group_by(items, key)
        .into_iter()
        .map(|bucket| Count {
            key: bucket.key.to_string(),
            count: bucket.len(),
        })
        .collect()
}

/// Count for a single dimension value.
pub fn count_where<T, D, F>(items: &[Arc<T>], key: F, value: D) -> usize
where
    D: Dimension,
    F: Fn(&T) -> D,
{
    items.iter().filter(|&item| key(item) == value).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ward_catalog::Catalog;

    fn seed() -> Catalog {
        Catalog::seed().unwrap()
    }

    fn arcs<T>(items: Vec<T>) -> Vec<Arc<T>> {
        items.into_iter().map(Arc::new).collect()
    }

    #[test]
    fn test_search_ignores_case() {
        let patients = arcs(seed().patients);
        let lower: Vec<_> = search(&patients, "john").iter().map(|p| p.id.clone()).collect();
        let upper: Vec<_> = search(&patients, "JOHN").iter().map(|p| p.id.clone()).collect();
        assert!(!lower.is_empty());
        assert_eq!(lower, upper);
    }

    #[test]
    fn test_blank_search_matches_everything() {
        let orders = arcs(seed().test_orders);
        assert_eq!(search(&orders, "   ").len(), orders.len());
        assert_eq!(search(&orders, "").len(), orders.len());
    }

    #[test]
    fn test_search_matches_bed_number() {
        let meds = arcs(seed().medications);
        let hits = search(&meds, "a-01");
        assert!(!hits.is_empty());
        assert!(hits.iter().all(|m| m.bed_number == "A-01"));
    }

    #[test]
    fn test_groupings_partition_every_collection() {
        let catalog = seed();

        fn check<T, D: Dimension>(items: &[Arc<T>], key: impl Fn(&T) -> D) {
            let buckets = group_by(items, &key);
            assert_eq!(buckets.len(), D::values().len());
            let total: usize = buckets.iter().map(Bucket::len).sum();
            assert_eq!(total, items.len());
            for bucket in &buckets {
                assert!(bucket.items.iter().all(|item| key(item) == bucket.key));
            }
            // Disjoint: every item lands in exactly one bucket.
            for item in items {
                let homes = buckets
                    .iter()
                    .filter(|b| b.items.iter().any(|x| Arc::ptr_eq(x, item)))
                    .count();
                assert_eq!(homes, 1);
            }
        }

        check(&arcs(catalog.test_orders.clone()), |o: &TestOrder| o.urgency);
        check(&arcs(catalog.test_orders.clone()), |o: &TestOrder| o.status);
        check(&arcs(catalog.alerts.clone()), |a: &Alert| a.severity);
        check(&arcs(catalog.alerts.clone()), Alert::status);
        check(&arcs(catalog.medications.clone()), |m: &MedicationDose| m.status);
        check(&arcs(catalog.prescriptions.clone()), |p: &Prescription| p.availability);
        check(&arcs(catalog.approval_requests.clone()), |a: &ApprovalRequest| a.priority);
        check(&arcs(catalog.clinical_reviews.clone()), |r: &ClinicalReview| r.status);
        check(&arcs(catalog.refill_requests.clone()), |r: &RefillRequest| r.urgency);
        check(&arcs(catalog.incidents.clone()), |i: &Incident| i.severity);
        check(&arcs(catalog.staff.clone()), |s: &StaffMember| s.role);
        check(&arcs(catalog.patients.clone()), |p: &Patient| p.condition);
    }

    #[test]
    fn test_group_keeps_empty_buckets() {
        let empty: Vec<Arc<Incident>> = Vec::new();
        let buckets = group_by(&empty, |i: &Incident| i.status);
        assert_eq!(buckets.len(), IncidentStatus::ALL.len());
        assert!(buckets.iter().all(Bucket::is_empty));
    }

    #[test]
    fn test_filter_none_keeps_all() {
        let orders = arcs(seed().test_orders);
        assert_eq!(filter_by(&orders, |o: &TestOrder| o.urgency, None).len(), orders.len());
        let stat = filter_by(&orders, |o: &TestOrder| o.urgency, Some(Urgency::Stat));
        assert!(stat.iter().all(|o| o.urgency == Urgency::Stat));
        assert_eq!(stat.len(), count_where(&orders, |o: &TestOrder| o.urgency, Urgency::Stat));
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value::<Urgency>("STAT").unwrap(), Urgency::Stat);
        assert_eq!(
            parse_value::<TestOrderStatus>("in_progress").unwrap(),
            TestOrderStatus::InProgress
        );
        let err = parse_value::<Severity>("severe").unwrap_err();
        assert!(err.to_string().contains("critical, high, medium, low"));
    }

    #[test]
    fn test_count_by_includes_zeros() {
        let items: Vec<Arc<Alert>> = Vec::new();
        let counts = count_by(&items, |a: &Alert| a.severity);
        assert_eq!(
            counts.iter().map(|c| c.key.as_str()).collect::<Vec<_>>(),
            vec!["critical", "high", "medium", "low"]
        );
        assert!(counts.iter().all(|c| c.count == 0));
    }
}
