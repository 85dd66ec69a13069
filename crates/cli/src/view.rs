//! Building and rendering dashboard views.
//!
//! A [`View`] is everything one tab shows for one role: the top bar plus a body derived from the
//! store through the search, filter and grouping rules. It renders either as plain text for the
//! terminal or as JSON.

use chrono::{DateTime, NaiveTime, Utc};
use serde::Serialize;
use std::fmt::Write;
use std::sync::Arc;
use ward_core::catalog::{
    Alert, ApprovalRequest, ClinicalReview, DietPlan, Incident, MedicationDose, NurseNote,
    Patient, PatientCondition, Prescription, Referral, RefillRequest, Role, Service, StaffMember,
    TestCategory, TestOrder, TestResult, TherapySession, WardEvent,
};
use ward_core::derived::{
    bed_occupancy, dashboard, orders_in, patient_summaries, referrals_for, results_in,
    BedStatus, DashboardSummary, PatientSummary, TopBar,
};
use ward_core::constants::{NURSE_NOTE_ID_PREFIX, PRESCRIPTION_ID_PREFIX, REFERRAL_ID_PREFIX};
use ward_core::filter::{filter_by, group_by, parse_value, search, Dimension, Searchable};
use ward_core::ids::parse_generated_id;
use ward_core::{Actor, Navigation, Tab, WardError, WardResult, WardStore};

/// Free-text search and filter value applied to the current tab.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewQuery {
    pub search: Option<String>,
    pub filter: Option<String>,
}

impl ViewQuery {
    fn term(&self) -> &str {
        self.search.as_deref().unwrap_or("")
    }
}

/// One record as a table row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Row {
    pub id: String,
    pub columns: Vec<String>,
}

/// Rows sharing one value of the tab's grouping dimension.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Group {
    pub key: String,
    pub rows: Vec<Row>,
}

/// A grouped table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Grouped {
    /// Plural noun for the records, used in empty-state messages.
    pub noun: &'static str,
    /// Name of the grouping dimension, or `None` for a flat list.
    pub dimension: Option<&'static str>,
    pub groups: Vec<Group>,
}

/// Body of a tab.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Body {
    Dashboard(DashboardSummary),
    Patients { rows: Vec<PatientSummary> },
    Beds { rows: Vec<BedStatus> },
    Table(Grouped),
}

/// A rendered tab.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct View {
    pub role: Role,
    pub tab: Tab,
    pub actor: String,
    pub rendered_at: DateTime<Utc>,
    pub top_bar: TopBar,
    pub body: Body,
}

/// Title shown above a tab.
pub fn tab_title(tab: Tab) -> &'static str {
    match tab {
        Tab::Dashboard => "Dashboard",
        Tab::Patients => "Patients",
        Tab::Medications => "Medications",
        Tab::Alerts => "Alerts",
        Tab::Notes => "Nurse Notes",
        Tab::Schedule => "Schedule",
        Tab::Approvals => "Approvals",
        Tab::Reviews => "Clinical Reviews",
        Tab::Results => "Results",
        Tab::Prescriptions => "Prescriptions",
        Tab::Referrals => "Referrals",
        Tab::Overview => "Ward Overview",
        Tab::Beds => "Beds",
        Tab::Staff => "Staff",
        Tab::Incidents => "Incidents",
        Tab::TestOrders => "Test Orders",
        Tab::Refills => "Refill Requests",
        Tab::Inventory => "Inventory",
        Tab::ImagingOrders => "Imaging Orders",
        Tab::Reports => "Reports",
        Tab::DietPlans => "Diet Plans",
        Tab::Sessions => "Therapy Sessions",
    }
}

fn time(at: &DateTime<Utc>) -> String {
    at.format("%d %b %H:%M").to_string()
}

fn clock(at: &NaiveTime) -> String {
    at.format("%H:%M").to_string()
}

fn grouped<T, D>(
    items: &[Arc<T>],
    query: &ViewQuery,
    noun: &'static str,
    dimension: &'static str,
    key: impl Fn(&T) -> D,
    row: impl Fn(&T) -> Row,
) -> WardResult<Grouped>
where
    T: Searchable,
    D: Dimension,
{
    let wanted = query.filter.as_deref().map(parse_value::<D>).transpose()?;
    let hits: Vec<Arc<T>> = search(items, query.term()).into_iter().cloned().collect();

    let groups = group_by(&hits, &key)
        .into_iter()
        .filter(|bucket| wanted.map_or(true, |w| bucket.key == w))
        .map(|bucket| Group {
            key: bucket.key.to_string(),
            rows: bucket.items.iter().map(|item| row(item)).collect(),
        })
        .collect();

    Ok(Grouped {
        noun,
        dimension: Some(dimension),
        groups,
    })
}

fn listed<T: Searchable>(
    items: &[Arc<T>],
    query: &ViewQuery,
    noun: &'static str,
    row: impl Fn(&T) -> Row,
) -> WardResult<Grouped> {
    if query.filter.is_some() {
        return Err(WardError::InvalidInput(format!(
            "{noun} cannot be filtered, try search instead"
        )));
    }
    Ok(Grouped {
        noun,
        dimension: None,
        groups: vec![Group {
            key: "all".into(),
            rows: search(items, query.term())
                .into_iter()
                .map(|item| row(item))
                .collect(),
        }],
    })
}

fn medication_row(m: &MedicationDose) -> Row {
    Row {
        id: m.id.clone(),
        columns: vec![
            clock(&m.scheduled_time),
            m.bed_number.clone(),
            m.patient_name.clone(),
            format!("{} {} {}", m.drug, m.dose, m.route),
        ],
    }
}

fn alert_row(a: &Alert) -> Row {
    let mut columns = vec![
        time(&a.raised_at),
        a.bed_number.clone(),
        a.patient_name.clone(),
        a.message.clone(),
        a.status().to_string(),
    ];
    if let Some(by) = &a.acknowledged_by {
        columns.push(format!("by {by}"));
    }
    Row {
        id: a.id.clone(),
        columns,
    }
}

/// Tags rows for records a form created this session.
fn mark_new(mut columns: Vec<String>, prefix: &str, id: &str) -> Vec<String> {
    if parse_generated_id(prefix, id).is_ok() {
        columns.push("new".to_string());
    }
    columns
}

fn note_row(n: &NurseNote) -> Row {
    Row {
        id: n.id.clone(),
        columns: mark_new(
            vec![
                time(&n.written_at),
                n.patient_name.clone(),
                n.text.clone(),
                format!("by {}", n.written_by),
            ],
            NURSE_NOTE_ID_PREFIX,
            &n.id,
        ),
    }
}

fn event_row(e: &WardEvent) -> Row {
    let mut columns = vec![time(&e.scheduled_at), e.title.clone(), e.location.clone()];
    if let Some(name) = &e.patient_name {
        columns.push(name.clone());
    }
    Row {
        id: e.id.clone(),
        columns,
    }
}

fn approval_row(a: &ApprovalRequest) -> Row {
    Row {
        id: a.id.clone(),
        columns: vec![
            a.priority.to_string(),
            a.kind.to_string(),
            a.patient_name.clone(),
            a.description.clone(),
            format!("from {}", a.requested_by),
        ],
    }
}

fn review_row(r: &ClinicalReview) -> Row {
    Row {
        id: r.id.clone(),
        columns: vec![
            r.priority.to_string(),
            format!("due {}", time(&r.due_at)),
            r.bed_number.clone(),
            r.patient_name.clone(),
            r.reason.clone(),
        ],
    }
}

fn result_row(r: &TestResult) -> Row {
    let value = match &r.unit {
        Some(unit) => format!("{} {}", r.value, unit),
        None => r.value.clone(),
    };
    let mut columns = vec![
        r.patient_name.clone(),
        r.test_name.clone(),
        value,
        r.flag.to_string(),
        r.status.to_string(),
    ];
    if let Some(range) = &r.reference_range {
        columns.push(format!("ref {range}"));
    }
    Row {
        id: r.id.clone(),
        columns,
    }
}

fn prescription_row(p: &Prescription) -> Row {
    Row {
        id: p.id.clone(),
        columns: mark_new(
            vec![
                p.urgency.to_string(),
                p.bed_number.clone(),
                p.patient_name.clone(),
                format!("{} {} {}", p.medication, p.dose, p.frequency),
                p.availability.to_string(),
                p.status.to_string(),
            ],
            PRESCRIPTION_ID_PREFIX,
            &p.id,
        ),
    }
}

fn referral_row(r: &Referral) -> Row {
    Row {
        id: r.id.clone(),
        columns: mark_new(
            vec![
                r.urgency.to_string(),
                r.service.to_string(),
                r.bed_number.clone(),
                r.patient_name.clone(),
                r.reason.clone(),
            ],
            REFERRAL_ID_PREFIX,
            &r.id,
        ),
    }
}

fn staff_row(s: &StaffMember) -> Row {
    Row {
        id: s.id.clone(),
        columns: vec![
            s.name.clone(),
            s.role.to_string(),
            if s.on_duty { "on duty" } else { "off duty" }.to_string(),
        ],
    }
}

fn incident_row(i: &Incident) -> Row {
    Row {
        id: i.id.clone(),
        columns: vec![
            i.severity.to_string(),
            time(&i.reported_at),
            i.title.clone(),
            i.location.clone(),
            format!("reported by {}", i.reported_by),
        ],
    }
}

fn order_row(o: &TestOrder) -> Row {
    Row {
        id: o.id.clone(),
        columns: vec![
            o.status.to_string(),
            o.bed_number.clone(),
            o.patient_name.clone(),
            o.test_name.clone(),
            format!("ordered by {}", o.ordered_by),
        ],
    }
}

fn refill_row(r: &RefillRequest) -> Row {
    Row {
        id: r.id.clone(),
        columns: vec![
            r.urgency.to_string(),
            r.bed_number.clone(),
            r.patient_name.clone(),
            r.medication.clone(),
            format!("from {}", r.requested_by),
        ],
    }
}

fn diet_row(d: &DietPlan) -> Row {
    let mut columns = vec![
        d.bed_number.clone(),
        d.patient_name.clone(),
        d.diet.clone(),
        format!("{} kcal/day", d.calories_per_day),
    ];
    if !d.restrictions.is_empty() {
        columns.push(d.restrictions.join(", "));
    }
    Row {
        id: d.id.clone(),
        columns,
    }
}

fn session_row(s: &TherapySession) -> Row {
    Row {
        id: s.id.clone(),
        columns: vec![
            time(&s.scheduled_at),
            s.bed_number.clone(),
            s.patient_name.clone(),
            s.exercise_plan.clone(),
        ],
    }
}

fn patients_body(store: &WardStore, query: &ViewQuery) -> WardResult<Body> {
    let condition: Option<PatientCondition> =
        query.filter.as_deref().map(parse_value).transpose()?;
    let hits: Vec<Arc<Patient>> = search(store.patients(), query.term())
        .into_iter()
        .cloned()
        .collect();
    let visible = filter_by(&hits, |p: &Patient| p.condition, condition);
    Ok(Body::Patients {
        rows: patient_summaries(visible, store.test_orders(), store.alerts()),
    })
}

fn body(store: &WardStore, role: Role, tab: Tab, query: &ViewQuery) -> WardResult<Body> {
    let table = match tab {
        Tab::Dashboard | Tab::Overview => return Ok(Body::Dashboard(dashboard(store, role))),
        Tab::Patients => return patients_body(store, query),
        Tab::Beds => {
            let beds = bed_occupancy(&store.ward().beds, store.patients());
            let term = query.term().trim().to_lowercase();
            let rows = beds
                .into_iter()
                .filter(|b| {
                    term.is_empty()
                        || b.bed_number.to_lowercase().contains(&term)
                        || b
                            .patient_name
                            .as_deref()
                            .is_some_and(|n| n.to_lowercase().contains(&term))
                })
                .collect();
            return Ok(Body::Beds { rows });
        }
        Tab::Medications => grouped(
            store.medications(),
            query,
            "medications",
            "status",
            |m: &MedicationDose| m.status,
            medication_row,
        )?,
        Tab::Alerts => grouped(
            store.alerts(),
            query,
            "alerts",
            "severity",
            |a: &Alert| a.severity,
            alert_row,
        )?,
        Tab::Notes => grouped(
            store.nurse_notes(),
            query,
            "notes",
            "category",
            |n: &NurseNote| n.category,
            note_row,
        )?,
        Tab::Schedule => grouped(
            store.events(),
            query,
            "events",
            "kind",
            |e: &WardEvent| e.kind,
            event_row,
        )?,
        Tab::Approvals => grouped(
            store.approval_requests(),
            query,
            "approval requests",
            "status",
            |a: &ApprovalRequest| a.status,
            approval_row,
        )?,
        Tab::Reviews => grouped(
            store.clinical_reviews(),
            query,
            "reviews",
            "status",
            |r: &ClinicalReview| r.status,
            review_row,
        )?,
        Tab::Results if role == Role::Doctor => grouped(
            store.test_results(),
            query,
            "results",
            "flag",
            |r: &TestResult| r.flag,
            result_row,
        )?,
        Tab::Results => grouped(
            &results_in(store, TestCategory::Laboratory),
            query,
            "results",
            "status",
            |r: &TestResult| r.status,
            result_row,
        )?,
        Tab::Reports => grouped(
            &results_in(store, TestCategory::Imaging),
            query,
            "reports",
            "status",
            |r: &TestResult| r.status,
            result_row,
        )?,
        Tab::Prescriptions if role == Role::Pharmacist => grouped(
            store.prescriptions(),
            query,
            "prescriptions",
            "urgency",
            |p: &Prescription| p.urgency,
            prescription_row,
        )?,
        Tab::Prescriptions => grouped(
            store.prescriptions(),
            query,
            "prescriptions",
            "status",
            |p: &Prescription| p.status,
            prescription_row,
        )?,
        Tab::Inventory => grouped(
            store.prescriptions(),
            query,
            "medications",
            "availability",
            |p: &Prescription| p.availability,
            prescription_row,
        )?,
        Tab::Referrals => {
            let referrals = match role {
                Role::Nutritionist => referrals_for(store, Service::Nutrition),
                Role::PhysicalTherapist => referrals_for(store, Service::Physiotherapy),
                _ => store.referrals().to_vec(),
            };
            grouped(
                &referrals,
                query,
                "referrals",
                "status",
                |r: &Referral| r.status,
                referral_row,
            )?
        }
        Tab::Staff => grouped(
            store.staff(),
            query,
            "staff",
            "shift",
            |s: &StaffMember| s.shift,
            staff_row,
        )?,
        Tab::Incidents => grouped(
            store.incidents(),
            query,
            "incidents",
            "status",
            |i: &Incident| i.status,
            incident_row,
        )?,
        Tab::TestOrders => grouped(
            &orders_in(store, TestCategory::Laboratory),
            query,
            "test orders",
            "urgency",
            |o: &TestOrder| o.urgency,
            order_row,
        )?,
        Tab::ImagingOrders => grouped(
            &orders_in(store, TestCategory::Imaging),
            query,
            "imaging orders",
            "urgency",
            |o: &TestOrder| o.urgency,
            order_row,
        )?,
        Tab::Refills => grouped(
            store.refill_requests(),
            query,
            "refill requests",
            "status",
            |r: &RefillRequest| r.status,
            refill_row,
        )?,
        Tab::DietPlans => listed(store.diet_plans(), query, "diet plans", diet_row)?,
        Tab::Sessions => grouped(
            store.therapy_sessions(),
            query,
            "sessions",
            "status",
            |s: &TherapySession| s.status,
            session_row,
        )?,
    };
    Ok(Body::Table(table))
}

/// Builds the current tab of `nav` as `actor` sees it at `now`.
pub fn build_view(
    store: &WardStore,
    nav: &Navigation,
    actor: &Actor,
    query: &ViewQuery,
    now: DateTime<Utc>,
) -> WardResult<View> {
    Ok(View {
        role: nav.role(),
        tab: nav.tab(),
        actor: actor.name.to_string(),
        rendered_at: now,
        top_bar: TopBar::from_store(store),
        body: body(store, nav.role(), nav.tab(), query)?,
    })
}

/// Renders a view as plain text.
pub fn render_text(view: &View) -> String {
    let mut out = String::new();
    let profile = ward_core::navigation::profile(view.role);

    let _ = writeln!(
        out,
        "{} | {} ({}) | {}",
        view.top_bar.ward_name,
        profile.label,
        view.actor,
        view.rendered_at.format("%a %d %b %Y %H:%M UTC")
    );
    let _ = writeln!(
        out,
        "critical alerts: {}  medications due: {}  pending approvals: {}",
        view.top_bar.critical_alerts, view.top_bar.medications_due, view.top_bar.pending_approvals
    );
    let tabs: Vec<String> = profile
        .tabs
        .iter()
        .map(|t| {
            if *t == view.tab {
                format!("[{t}]")
            } else {
                t.to_string()
            }
        })
        .collect();
    let _ = writeln!(out, "{}", tabs.join("  "));
    let _ = writeln!(out);
    let _ = writeln!(out, "== {} ==", tab_title(view.tab));

    match &view.body {
        Body::Dashboard(summary) => {
            for metric in &summary.metrics {
                let _ = writeln!(out, "  {:<32}{}", metric.label, metric.value);
            }
            for breakdown in &summary.breakdowns {
                let counts: Vec<String> = breakdown
                    .counts
                    .iter()
                    .map(|c| format!("{} {}", c.key, c.count))
                    .collect();
                let _ = writeln!(out, "  {}: {}", breakdown.label, counts.join(", "));
            }
        }
        Body::Patients { rows } if rows.is_empty() => {
            let _ = writeln!(out, "  No patients match.");
        }
        Body::Patients { rows } => {
            for p in rows {
                let mut flags = Vec::new();
                if p.test_pending {
                    flags.push("tests pending".to_string());
                }
                if p.active_alerts > 0 {
                    flags.push(format!("{} active alerts", p.active_alerts));
                }
                if !p.allergies.is_empty() {
                    flags.push(format!("allergies: {}", p.allergies.join(", ")));
                }
                let _ = writeln!(
                    out,
                    "  {:<8}{:<6}{} ({}), {}, {}, {}{}",
                    p.id,
                    p.bed_number,
                    p.name,
                    p.age,
                    p.diagnosis,
                    p.condition,
                    p.attending_doctor,
                    if flags.is_empty() {
                        String::new()
                    } else {
                        format!(" [{}]", flags.join("; "))
                    }
                );
            }
        }
        Body::Beds { rows } => {
            let occupied = rows.iter().filter(|b| b.occupied()).count();
            let _ = writeln!(out, "  {occupied} of {} beds occupied", rows.len());
            for bed in rows {
                match (&bed.patient_name, bed.condition) {
                    (Some(name), Some(condition)) => {
                        let _ = writeln!(out, "  {:<8}{} ({})", bed.bed_number, name, condition);
                    }
                    _ => {
                        let _ = writeln!(out, "  {:<8}available", bed.bed_number);
                    }
                }
            }
        }
        Body::Table(table) => {
            for group in &table.groups {
                if table.dimension.is_some() {
                    let _ = writeln!(out, "-- {} ({}) --", group.key, group.rows.len());
                }
                if group.rows.is_empty() {
                    match table.dimension {
                        Some(_) => {
                            let _ = writeln!(out, "  No {} {}.", group.key, table.noun);
                        }
                        None => {
                            let _ = writeln!(out, "  No {}.", table.noun);
                        }
                    }
                }
                for row in &group.rows {
                    let _ = writeln!(out, "  {:<8}{}", row.id, row.columns.join("  "));
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ward_core::catalog::{NoteCategory, TestOrderStatus, Urgency};
    use ward_core::forms::NurseNoteForm;

    fn now() -> DateTime<Utc> {
        "2024-03-14T09:30:00Z".parse().unwrap()
    }

    fn view_of(store: &WardStore, role: Role, tab: Tab, query: ViewQuery) -> WardResult<View> {
        let mut nav = Navigation::for_role(role);
        nav.select_tab(tab)?;
        let actor = Actor::new("Duty Staff", role)?;
        build_view(store, &nav, &actor, &query, now())
    }

    fn table(view: &View) -> &Grouped {
        match &view.body {
            Body::Table(table) => table,
            other => panic!("expected a table, got {other:?}"),
        }
    }

    #[test]
    fn test_every_tab_of_every_role_renders() {
        let store = WardStore::seeded().unwrap();
        for role in Role::ALL {
            for tab in ward_core::navigation::profile(*role).tabs {
                let view = view_of(&store, *role, *tab, ViewQuery::default()).unwrap();
                let text = render_text(&view);
                assert!(text.contains(tab_title(*tab)), "{role}/{tab}");
            }
        }
    }

    #[test]
    fn test_lab_orders_are_grouped_by_urgency_with_empty_buckets() {
        let store = WardStore::seeded().unwrap();
        let view = view_of(
            &store,
            Role::LabTechnician,
            Tab::TestOrders,
            ViewQuery::default(),
        )
        .unwrap();
        let table = table(&view);
        let keys: Vec<_> = table.groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["stat", "urgent", "routine"]);

        let lab_orders = orders_in(&store, TestCategory::Laboratory).len();
        let rows: usize = table.groups.iter().map(|g| g.rows.len()).sum();
        assert_eq!(rows, lab_orders);
    }

    #[test]
    fn test_filter_keeps_only_the_selected_bucket() {
        let store = WardStore::seeded().unwrap();
        let query = ViewQuery {
            search: None,
            filter: Some("stat".into()),
        };
        let view = view_of(&store, Role::LabTechnician, Tab::TestOrders, query).unwrap();
        let table = table(&view);
        assert_eq!(table.groups.len(), 1);
        assert_eq!(table.groups[0].key, Urgency::Stat.as_str());
    }

    #[test]
    fn test_empty_bucket_renders_message() {
        let store = WardStore::seeded().unwrap();
        let query = ViewQuery {
            search: Some("no such patient".into()),
            filter: None,
        };
        let view = view_of(&store, Role::Nurse, Tab::Medications, query).unwrap();
        let text = render_text(&view);
        assert!(text.contains("No due medications."));
        assert!(text.contains("No missed medications."));
    }

    #[test]
    fn test_search_is_case_insensitive_in_views() {
        let store = WardStore::seeded().unwrap();
        let lower = view_of(
            &store,
            Role::Nurse,
            Tab::Patients,
            ViewQuery {
                search: Some("john".into()),
                filter: None,
            },
        )
        .unwrap();
        let upper = view_of(
            &store,
            Role::Nurse,
            Tab::Patients,
            ViewQuery {
                search: Some("JOHN".into()),
                filter: None,
            },
        )
        .unwrap();
        assert_eq!(lower.body, upper.body);
    }

    #[test]
    fn test_bad_filter_value_is_rejected() {
        let store = WardStore::seeded().unwrap();
        let query = ViewQuery {
            search: None,
            filter: Some("purple".into()),
        };
        let err = view_of(&store, Role::Nurse, Tab::Alerts, query).unwrap_err();
        assert!(matches!(err, WardError::InvalidInput(_)));
    }

    #[test]
    fn test_view_serializes_to_json() {
        let store = WardStore::seeded().unwrap();
        let view = view_of(&store, Role::Radiologist, Tab::ImagingOrders, ViewQuery::default())
            .unwrap();
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["tab"], "imaging-orders");
        assert_eq!(json["body"]["kind"], "table");
        let statuses: Vec<&str> = TestOrderStatus::ALL.iter().map(|s| s.as_str()).collect();
        assert!(statuses.contains(&"ordered"));
    }

    #[test]
    fn test_form_created_rows_are_marked_new() {
        let mut store = WardStore::seeded().unwrap();
        let nurse = Actor::new("Duty Staff", Role::Nurse).unwrap();
        let note = store
            .submit_nurse_note(
                &nurse,
                &NurseNoteForm {
                    patient_id: "P-001".into(),
                    category: NoteCategory::Observation,
                    text: "Settled overnight.".into(),
                },
            )
            .unwrap();

        let view = view_of(&store, Role::Nurse, Tab::Notes, ViewQuery::default()).unwrap();
        let rows: Vec<&Row> = table(&view).groups.iter().flat_map(|g| &g.rows).collect();
        for row in rows {
            let marked = row.columns.last().map(String::as_str) == Some("new");
            assert_eq!(marked, row.id == note.id, "{}", row.id);
        }
    }
}
