//! Interactive dashboard session.
//!
//! A [`Session`] holds the store, the navigation state and the current search/filter, and turns
//! one line of user input into a reply. Reading stdin and printing replies is left to the binary.

use crate::view::{build_view, render_text, ViewQuery};
use chrono::Utc;
use ward_core::catalog::{NoteCategory, Role, Service, Urgency};
use ward_core::forms::{NurseNoteForm, PrescriptionForm, ReferralForm};
use ward_core::{Actor, Navigation, Tab, WardError, WardResult, WardStore, WorkflowAction};

pub const HELP: &str = "\
commands:
  role <role>                                  switch role (resets the tab)
  tab <tab>                                    switch tab
  show                                         redraw the current tab
  search <text> | filter <value> | clear       narrow the current tab
  do <action> <id>                             press a button, e.g. `do collect-sample TO-001`
  note <patient> <category> <text>             new nurse note
  prescribe <patient> <urgency> <drug> | <dose> | <frequency>
  refer <patient> <service> <urgency> <reason>
  roles | tabs | actions                       list what the current role can use
  export                                       print the session state as YAML
  help | quit";

/// A parsed input line.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionCommand {
    Role(Role),
    Tab(Tab),
    Show,
    Search(String),
    Filter(String),
    Clear,
    Do(WorkflowAction, String),
    Note(NurseNoteForm),
    Prescribe(PrescriptionForm),
    Refer(ReferralForm),
    Roles,
    Tabs,
    Actions,
    Export,
    Help,
    Quit,
}

fn usage(text: &str) -> WardError {
    WardError::InvalidInput(format!("usage: {text}"))
}

fn parse_catalog<T>(parsed: Result<T, ward_core::catalog::CatalogError>) -> WardResult<T> {
    parsed.map_err(WardError::from)
}

impl SessionCommand {
    /// Parses one line; `Ok(None)` for a blank line.
    pub fn parse(line: &str) -> WardResult<Option<Self>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_lowercase().as_str() {
            "role" if !rest.is_empty() => Self::Role(parse_catalog(Role::parse(rest))?),
            "role" => return Err(usage("role <role>")),
            "tab" if !rest.is_empty() => Self::Tab(Tab::parse(rest)?),
            "tab" => return Err(usage("tab <tab>")),
            "show" | "view" => Self::Show,
            "search" => Self::Search(rest.to_string()),
            "filter" if !rest.is_empty() => Self::Filter(rest.to_string()),
            "filter" => return Err(usage("filter <value>")),
            "clear" => Self::Clear,
            "do" => {
                let (action, id) = rest
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| usage("do <action> <id>"))?;
                Self::Do(WorkflowAction::parse(action)?, id.trim().to_string())
            }
            "note" => {
                let mut parts = rest.splitn(3, char::is_whitespace);
                let (Some(patient), Some(category)) = (parts.next(), parts.next()) else {
                    return Err(usage("note <patient> <category> <text>"));
                };
                Self::Note(NurseNoteForm {
                    patient_id: patient.to_string(),
                    category: parse_catalog(NoteCategory::parse(category))?,
                    text: parts.next().unwrap_or("").to_string(),
                })
            }
            "prescribe" => {
                let mut parts = rest.splitn(3, char::is_whitespace);
                let (Some(patient), Some(urgency), Some(details)) =
                    (parts.next(), parts.next(), parts.next())
                else {
                    return Err(usage(
                        "prescribe <patient> <urgency> <drug> | <dose> | <frequency>",
                    ));
                };
                let fields: Vec<&str> = details.split('|').map(str::trim).collect();
                let [medication, dose, frequency] = fields.as_slice() else {
                    return Err(usage(
                        "prescribe <patient> <urgency> <drug> | <dose> | <frequency>",
                    ));
                };
                Self::Prescribe(PrescriptionForm {
                    patient_id: patient.to_string(),
                    medication: medication.to_string(),
                    dose: dose.to_string(),
                    frequency: frequency.to_string(),
                    urgency: parse_catalog(Urgency::parse(urgency))?,
                })
            }
            "refer" => {
                let mut parts = rest.splitn(4, char::is_whitespace);
                let (Some(patient), Some(service), Some(urgency)) =
                    (parts.next(), parts.next(), parts.next())
                else {
                    return Err(usage("refer <patient> <service> <urgency> <reason>"));
                };
                Self::Refer(ReferralForm {
                    patient_id: patient.to_string(),
                    service: parse_catalog(Service::parse(service))?,
                    urgency: parse_catalog(Urgency::parse(urgency))?,
                    reason: parts.next().unwrap_or("").to_string(),
                })
            }
            "roles" => Self::Roles,
            "tabs" => Self::Tabs,
            "actions" => Self::Actions,
            "export" => Self::Export,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => {
                return Err(WardError::InvalidInput(format!(
                    "unknown command {other:?}, try `help`"
                )))
            }
        };
        Ok(Some(command))
    }
}

/// What the binary should do after a command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    Output(String),
    Quit,
}

/// State of one interactive session.
#[derive(Debug)]
pub struct Session {
    store: WardStore,
    nav: Navigation,
    actor: Actor,
    query: ViewQuery,
}

impl Session {
    /// Starts on `actor`'s role and its default tab.
    pub fn new(store: WardStore, actor: Actor) -> Self {
        Self {
            store,
            nav: Navigation::for_role(actor.role),
            actor,
            query: ViewQuery::default(),
        }
    }

    pub fn store(&self) -> &WardStore {
        &self.store
    }

    pub fn navigation(&self) -> &Navigation {
        &self.nav
    }

    /// Renders the current tab.
    pub fn render(&self) -> WardResult<String> {
        let view = build_view(&self.store, &self.nav, &self.actor, &self.query, Utc::now())?;
        Ok(render_text(&view))
    }

    /// Runs one command.
    pub fn execute(&mut self, command: SessionCommand) -> WardResult<Reply> {
        let output = match command {
            SessionCommand::Role(role) => {
                tracing::info!("-- Switching to {} ({})", role, self.actor.name);
                self.nav.select_role(role);
                self.actor = self.actor.with_role(role);
                self.query = ViewQuery::default();
                self.render()?
            }
            SessionCommand::Tab(tab) => {
                self.nav.select_tab(tab)?;
                tracing::debug!("{} tab selected", tab);
                self.query = ViewQuery::default();
                self.render()?
            }
            SessionCommand::Show => self.render()?,
            SessionCommand::Search(term) => {
                self.query.search = Some(term).filter(|t| !t.trim().is_empty());
                self.render()?
            }
            SessionCommand::Filter(value) => {
                let previous = self.query.filter.replace(value);
                match self.render() {
                    Ok(text) => text,
                    Err(e) => {
                        self.query.filter = previous;
                        return Err(e);
                    }
                }
            }
            SessionCommand::Clear => {
                self.query = ViewQuery::default();
                self.render()?
            }
            SessionCommand::Do(action, id) => {
                let outcome = self.store.perform(&self.actor, action, &id)?;
                let line = if outcome.changed {
                    format!("{} {}: {} -> {}", outcome.kind, outcome.id, outcome.from, outcome.to)
                } else {
                    format!("{} {} is already {}", outcome.kind, outcome.id, outcome.to)
                };
                format!("{line}\n\n{}", self.render()?)
            }
            SessionCommand::Note(form) => {
                let note = self.store.submit_nurse_note(&self.actor, &form)?;
                format!("added nurse note {} for {}", note.id, note.patient_name)
            }
            SessionCommand::Prescribe(form) => {
                let rx = self.store.submit_prescription(&self.actor, &form)?;
                format!("added prescription {} for {}", rx.id, rx.patient_name)
            }
            SessionCommand::Refer(form) => {
                let referral = self.store.submit_referral(&self.actor, &form)?;
                format!(
                    "added {} referral {} for {}",
                    referral.service, referral.id, referral.patient_name
                )
            }
            SessionCommand::Roles => crate::list_roles(),
            SessionCommand::Tabs => crate::list_tabs(self.nav.role()),
            SessionCommand::Actions => {
                let profile = self.nav.profile();
                let mut names: Vec<String> =
                    profile.actions.iter().map(ToString::to_string).collect();
                names.extend(profile.forms.iter().map(|f| format!("{f} form")));
                if names.is_empty() {
                    format!("the {} role is read-only", profile.label)
                } else {
                    names.join("\n")
                }
            }
            SessionCommand::Export => {
                tracing::info!("++ Exporting catalog for {}", self.store.ward().name);
                self.store.to_catalog().render()?
            }
            SessionCommand::Help => HELP.to_string(),
            SessionCommand::Quit => return Ok(Reply::Quit),
        };
        Ok(Reply::Output(output))
    }

    /// Parses and runs one input line. Blank lines produce empty output.
    pub fn handle_line(&mut self, line: &str) -> WardResult<Reply> {
        match SessionCommand::parse(line)? {
            Some(command) => self.execute(command),
            None => Ok(Reply::Output(String::new())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ward_core::catalog::TestOrderStatus;

    fn session(role: Role) -> Session {
        let store = WardStore::seeded().unwrap();
        Session::new(store, Actor::new("Duty Staff", role).unwrap())
    }

    fn output(reply: Reply) -> String {
        match reply {
            Reply::Output(text) => text,
            Reply::Quit => panic!("unexpected quit"),
        }
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(SessionCommand::parse("   ").unwrap(), None);
        assert_eq!(
            SessionCommand::parse("role Lab-Technician").unwrap(),
            Some(SessionCommand::Role(Role::LabTechnician))
        );
        assert_eq!(
            SessionCommand::parse("do collect-sample TO-001").unwrap(),
            Some(SessionCommand::Do(
                WorkflowAction::CollectSample,
                "TO-001".into()
            ))
        );
        assert!(SessionCommand::parse("do collect-sample").is_err());
        assert!(SessionCommand::parse("dance").is_err());
    }

    #[test]
    fn test_parse_prescription_form() {
        let Some(SessionCommand::Prescribe(form)) =
            SessionCommand::parse("prescribe P-002 urgent Amoxicillin | 500 mg | TDS").unwrap()
        else {
            panic!("expected a prescription");
        };
        assert_eq!(form.patient_id, "P-002");
        assert_eq!(form.urgency, Urgency::Urgent);
        assert_eq!(form.medication, "Amoxicillin");
        assert_eq!(form.dose, "500 mg");
        assert_eq!(form.frequency, "TDS");

        assert!(SessionCommand::parse("prescribe P-002 urgent Amoxicillin").is_err());
    }

    #[test]
    fn test_role_switch_resets_tab_and_query() {
        let mut session = session(Role::Nurse);
        session.handle_line("tab alerts").unwrap();
        session.handle_line("search john").unwrap();
        session.handle_line("role ward-incharge").unwrap();
        assert_eq!(session.navigation().tab(), Tab::Overview);
        assert_eq!(session.query, ViewQuery::default());
    }

    #[test]
    fn test_do_updates_store_and_rerenders() {
        let mut session = session(Role::LabTechnician);
        session.handle_line("tab test-orders").unwrap();
        let text = output(session.handle_line("do collect-sample TO-001").unwrap());
        assert!(text.starts_with("test order TO-001: ordered -> collected"));
        assert!(text.contains("== Test Orders =="));
        let order = session
            .store()
            .test_orders()
            .iter()
            .find(|o| o.id == "TO-001")
            .unwrap();
        assert_eq!(order.status, TestOrderStatus::Collected);
    }

    #[test]
    fn test_invalid_filter_keeps_previous_filter() {
        let mut session = session(Role::Nurse);
        session.handle_line("tab medications").unwrap();
        session.handle_line("filter due").unwrap();
        assert!(session.handle_line("filter sideways").is_err());
        assert_eq!(session.query.filter.as_deref(), Some("due"));
    }

    #[test]
    fn test_nurse_note_requires_text() {
        let mut session = session(Role::Nurse);
        let err = session.handle_line("note P-001 observation").unwrap_err();
        assert!(matches!(err, WardError::InvalidInput(_)));
        let text = output(
            session
                .handle_line("note P-001 handover Family visiting at 14:00")
                .unwrap(),
        );
        assert!(text.contains("John Martinez"));
    }

    #[test]
    fn test_quit() {
        let mut session = session(Role::Nurse);
        assert_eq!(session.handle_line("quit").unwrap(), Reply::Quit);
    }

    #[test]
    fn test_export_reflects_session_actions() {
        let mut session = session(Role::Nurse);
        session.handle_line("do acknowledge-alert AL-001").unwrap();
        let yaml = output(session.handle_line("export").unwrap());
        let catalog = ward_core::catalog::Catalog::parse(&yaml).unwrap();
        let alert = catalog.alerts.iter().find(|a| a.id == "AL-001").unwrap();
        assert!(alert.acknowledged);
    }
}
