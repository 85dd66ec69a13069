//! Applying lifecycle actions to a collection.
//!
//! Collections are slices of `Arc<T>`. A transition rebuilds the vector, cloning only the entity
//! that changes; every other element is the same `Arc` as before.

use crate::actor::Stamp;
use crate::error::{WardError, WardResult};
use crate::lifecycle::Lifecycle;
use std::sync::Arc;

/// Outcome of a successful [`try_transition`].
#[derive(Clone, Debug)]
pub struct Transitioned<T: Lifecycle> {
    /// The collection after the action.
    pub items: Vec<Arc<T>>,

    /// The entity as it stands after the action.
    pub entity: Arc<T>,

    /// Status before the action.
    pub from: T::Status,

    /// `false` when the entity was already in the action's target state.
    pub changed: bool,
}

/// Applies `action` to the entity with `id`.
///
/// # Errors
/// - [`WardError::NotFound`] if no entity has `id`.
/// - [`WardError::InvalidTransition`] if `action` is not allowed from the entity's status.
pub fn try_transition<T: Lifecycle>(
    items: &[Arc<T>],
    id: &str,
    action: T::Action,
    stamp: &Stamp,
) -> WardResult<Transitioned<T>> {
    let index = items
        .iter()
        .position(|item| item.id() == id)
        .ok_or_else(|| WardError::NotFound {
            kind: T::KIND,
            id: id.to_string(),
        })?;

    let current = &items[index];
    let from = current.status();
    let to = T::target(from, action).ok_or_else(|| WardError::InvalidTransition {
        kind: T::KIND,
        id: id.to_string(),
        from: from.to_string(),
        action: action.to_string(),
    })?;

    if to == from {
        return Ok(Transitioned {
            items: items.to_vec(),
            entity: Arc::clone(current),
            from,
            changed: false,
        });
    }

    let mut updated = T::clone(current);
    updated.record(action, to, stamp);
    let entity = Arc::new(updated);

    let mut next = items.to_vec();
    next[index] = Arc::clone(&entity);

    Ok(Transitioned {
        items: next,
        entity,
        from,
        changed: true,
    })
}

/// Applies `action` to the entity with `id`, returning the input unchanged if the id is unknown or
/// the action is not allowed.
pub fn transition<T: Lifecycle>(
    items: &[Arc<T>],
    id: &str,
    action: T::Action,
    stamp: &Stamp,
) -> Vec<Arc<T>> {
    match try_transition(items, id, action, stamp) {
        Ok(done) => done.items,
        Err(_) => items.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::TestOrderAction;
    use chrono::{DateTime, Utc};
    use ward_catalog::{TestCategory, TestOrder, TestOrderStatus, Urgency};

    fn at() -> DateTime<Utc> {
        "2024-03-14T10:30:00Z".parse().unwrap()
    }

    fn stamp() -> Stamp {
        Stamp {
            by: "Lab Tech Omar Haddad".into(),
            at: at(),
        }
    }

    fn order(id: &str, status: TestOrderStatus) -> Arc<TestOrder> {
        Arc::new(TestOrder {
            id: id.into(),
            patient_id: "P-001".into(),
            patient_name: "John Martinez".into(),
            bed_number: "A-01".into(),
            test_name: "Complete Blood Count".into(),
            category: TestCategory::Laboratory,
            urgency: Urgency::Stat,
            ordered_by: "Dr. Sarah Chen".into(),
            ordered_at: "2024-03-14T07:00:00Z".parse().unwrap(),
            status,
            collected_by: None,
            collected_at: None,
            updated_by: None,
            updated_at: None,
        })
    }

    #[test]
    fn test_unknown_id_is_a_noop() {
        let items = vec![
            order("a", TestOrderStatus::Ordered),
            order("b", TestOrderStatus::Collected),
        ];
        let after = transition(&items, "missing", TestOrderAction::Collect, &stamp());
        assert_eq!(after, items);
        assert!(after.iter().zip(&items).all(|(x, y)| Arc::ptr_eq(x, y)));
    }

    #[test]
    fn test_try_transition_reports_unknown_id() {
        let items = vec![order("a", TestOrderStatus::Ordered)];
        let err = try_transition(&items, "zz", TestOrderAction::Collect, &stamp()).unwrap_err();
        assert!(matches!(err, WardError::NotFound { ref id, .. } if id == "zz"));
    }

    #[test]
    fn test_collect_updates_only_the_target() {
        let items = vec![
            order("a", TestOrderStatus::Ordered),
            order("b", TestOrderStatus::Collected),
        ];
        let after = transition(&items, "a", TestOrderAction::Collect, &stamp());

        assert_eq!(after.len(), 2);
        assert_eq!(after[0].status, TestOrderStatus::Collected);
        assert_eq!(after[0].collected_by.as_deref(), Some("Lab Tech Omar Haddad"));
        assert_eq!(after[0].collected_at, Some(at()));
        assert_eq!(after[1].status, TestOrderStatus::Collected);
        assert!(Arc::ptr_eq(&after[1], &items[1]));
        // The input collection is untouched.
        assert_eq!(items[0].status, TestOrderStatus::Ordered);
    }

    #[test]
    fn test_unrelated_entities_keep_identity() {
        let items: Vec<_> = (0..5)
            .map(|i| order(&format!("TO-{i}"), TestOrderStatus::Scheduled))
            .collect();
        let after = transition(&items, "TO-2", TestOrderAction::Collect, &stamp());
        for (i, (x, y)) in after.iter().zip(&items).enumerate() {
            assert_eq!(Arc::ptr_eq(x, y), i != 2, "element {i}");
        }
    }

    #[test]
    fn test_advance_walks_to_completed_without_revisiting_ordered() {
        let mut items = vec![order("a", TestOrderStatus::Ordered)];
        let mut seen = Vec::new();
        for _ in 0..10 {
            let done = try_transition(&items, "a", TestOrderAction::Advance, &stamp());
            match done {
                Ok(done) => {
                    seen.push(done.entity.status);
                    items = done.items;
                }
                Err(err) => {
                    assert!(matches!(err, WardError::InvalidTransition { .. }));
                    break;
                }
            }
        }
        assert_eq!(seen.last(), Some(&TestOrderStatus::Completed));
        assert!(!seen.contains(&TestOrderStatus::Ordered));
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn test_disallowed_action_is_rejected_or_ignored() {
        let items = vec![order("a", TestOrderStatus::Completed)];
        let err = try_transition(&items, "a", TestOrderAction::Collect, &stamp()).unwrap_err();
        assert!(matches!(err, WardError::InvalidTransition { ref from, .. } if from == "completed"));

        let after = transition(&items, "a", TestOrderAction::Collect, &stamp());
        assert!(Arc::ptr_eq(&after[0], &items[0]));
    }

    #[test]
    fn test_reapply_is_accepted_without_change() {
        let items = vec![order("b", TestOrderStatus::Collected)];
        let done = try_transition(&items, "b", TestOrderAction::Collect, &stamp()).unwrap();
        assert!(!done.changed);
        assert_eq!(done.from, TestOrderStatus::Collected);
        assert!(Arc::ptr_eq(&done.entity, &items[0]));
        assert!(done.entity.collected_by.is_none());
    }
}
