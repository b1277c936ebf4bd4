use std::{collections::HashMap, fs, path::Path};

use bson::oid::ObjectId;
use chrono::{DateTime, Local, NaiveDateTime, TimeZone as _};
use eyre::{eyre, Context as _, Result};
use ledger::Ledger;
use log::{info, warn};
use model::{
    decimal::Decimal,
    session::{ForumType, SessionType, START_AT_FORMAT},
    tx::Tx,
    user::{Gender, Person},
};
use serde::Deserialize;

/// A list of administrative commands run against one ledger in order.
#[derive(Debug, Deserialize)]
pub struct Script {
    /// Clock for the whole run, `dd-MM-yyyy HH:mm`. Wall time when absent.
    #[serde(default)]
    pub now: Option<String>,
    pub commands: Vec<Command>,
}

#[derive(Debug, Deserialize, strum::IntoStaticStr)]
#[serde(tag = "cmd", rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Command {
    Person {
        alias: String,
        name: String,
        #[serde(default)]
        balance: f64,
        gender: Gender,
        birthday: String,
    },
    AppointSecretary {
        person: String,
        salary: f64,
    },
    RegisterClient {
        person: String,
    },
    UnregisterClient {
        person: String,
    },
    HireInstructor {
        person: String,
        salary_per_hour: f64,
        certifications: Vec<SessionType>,
    },
    ScheduleSession {
        alias: String,
        tp: SessionType,
        start_at: String,
        forum: ForumType,
        instructor: String,
    },
    Enroll {
        client: String,
        session: String,
    },
    Notify {
        message: String,
        #[serde(default)]
        date: Option<String>,
        #[serde(default)]
        session: Option<String>,
    },
    Deposit {
        amount: f64,
        description: String,
    },
    PaySalaries,
}

impl Command {
    pub fn name(&self) -> &'static str {
        self.into()
    }
}

impl Script {
    pub fn load(path: impl AsRef<Path>) -> Result<Script> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        Script::parse(&raw).with_context(|| format!("Invalid script {}", path.display()))
    }

    pub fn parse(raw: &str) -> Result<Script> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn now(&self) -> Result<DateTime<Local>> {
        match &self.now {
            Some(now) => parse_date_time(now),
            None => Ok(Local::now()),
        }
    }
}

pub fn parse_date_time(value: &str) -> Result<DateTime<Local>> {
    let naive = NaiveDateTime::parse_from_str(value.trim(), START_AT_FORMAT)
        .with_context(|| format!("Invalid date '{}', expected dd-MM-yyyy HH:mm", value))?;
    Local
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| eyre!("Ambiguous local time '{}'", value))
}

/// Outcome of one command.
pub struct Report {
    pub step: usize,
    pub command: &'static str,
    pub outcome: Result<String>,
}

/// Resolves script aliases to ledger ids while running commands.
pub struct Runner<'a> {
    ledger: &'a Ledger,
    people: HashMap<String, Person>,
    sessions: HashMap<String, ObjectId>,
}

impl<'a> Runner<'a> {
    pub fn new(ledger: &'a Ledger) -> Self {
        Runner {
            ledger,
            people: HashMap::new(),
            sessions: HashMap::new(),
        }
    }

    /// Runs every command. A failed command does not stop the run.
    pub fn run(&mut self, tx: &mut Tx, commands: &[Command]) -> Vec<Report> {
        commands
            .iter()
            .enumerate()
            .map(|(idx, command)| {
                let outcome = self.apply(tx, command);
                if let Err(err) = &outcome {
                    warn!("step {} ({}) failed: {:#}", idx + 1, command.name(), err);
                }
                Report {
                    step: idx + 1,
                    command: command.name(),
                    outcome,
                }
            })
            .collect()
    }

    fn apply(&mut self, tx: &mut Tx, command: &Command) -> Result<String> {
        match command {
            Command::Person {
                alias,
                name,
                balance,
                gender,
                birthday,
            } => {
                let person = Person::new(name, Decimal::from(*balance), *gender, birthday)?;
                let line = format!("{} is {}", alias, person.name);
                self.people.insert(alias.clone(), person);
                Ok(line)
            }
            Command::AppointSecretary { person, salary } => {
                let person = self.person(person)?;
                let secretary =
                    self.ledger
                        .appoint_secretary(tx, person, Decimal::from(*salary))?;
                Ok(secretary.to_string())
            }
            Command::RegisterClient { person } => {
                let person = self.person(person)?;
                let client = self.ledger.register_client(tx, person)?;
                Ok(client.to_string())
            }
            Command::UnregisterClient { person } => {
                let id = self.person(person)?.id;
                self.ledger.unregister_client(tx, id)?;
                Ok(format!("{} unregistered", person))
            }
            Command::HireInstructor {
                person,
                salary_per_hour,
                certifications,
            } => {
                let person = self.person(person)?;
                let instructor = self.ledger.hire_instructor(
                    tx,
                    person,
                    Decimal::from(*salary_per_hour),
                    certifications.clone(),
                )?;
                Ok(instructor.to_string())
            }
            Command::ScheduleSession {
                alias,
                tp,
                start_at,
                forum,
                instructor,
            } => {
                let start_at = parse_date_time(start_at)?;
                let instructor = self.person(instructor)?.id;
                let session =
                    self.ledger
                        .schedule_session(tx, *tp, start_at, *forum, instructor)?;
                self.sessions.insert(alias.clone(), session.id());
                Ok(session.to_string())
            }
            Command::Enroll { client, session } => {
                let client_id = self.person(client)?.id;
                let session_id = self.session(session)?;
                self.ledger.enroll(tx, client_id, session_id)?;
                Ok(format!("{} joined {}", client, session))
            }
            Command::Notify {
                message,
                date,
                session,
            } => {
                let delivered = match (session, date) {
                    (Some(session), _) => {
                        let id = self.session(session)?;
                        self.ledger.notify_session(tx, id, message)?
                    }
                    (None, Some(date)) => self.ledger.notify_all_dated(tx, date, message)?,
                    (None, None) => self.ledger.notify_all(tx, message)?,
                };
                Ok(format!("{} inboxes", delivered))
            }
            Command::Deposit {
                amount,
                description,
            } => {
                self.ledger
                    .deposit(tx, Decimal::from(*amount), description)?;
                Ok(format!("balance {}", self.ledger.balance()))
            }
            Command::PaySalaries => {
                let paid = self.ledger.pay_salaries(tx)?;
                Ok(format!("paid {}, balance {}", paid, self.ledger.balance()))
            }
        }
    }

    fn person(&self, alias: &str) -> Result<Person> {
        self.people
            .get(alias)
            .cloned()
            .ok_or_else(|| eyre!("Unknown person '{}'", alias))
    }

    fn session(&self, alias: &str) -> Result<ObjectId> {
        self.sessions
            .get(alias)
            .copied()
            .ok_or_else(|| eyre!("Unknown session '{}'", alias))
    }
}

/// Prints every report followed by the committed action log.
pub fn print(ledger: &Ledger, reports: &[Report]) {
    for report in reports {
        match &report.outcome {
            Ok(line) => println!("{:>3}. {:<18} ok      {}", report.step, report.command, line),
            Err(err) => println!("{:>3}. {:<18} failed  {}", report.step, report.command, err),
        }
    }

    println!();
    println!("Actions:");
    for action in ledger.history.actions() {
        println!("  {}", action);
    }

    println!();
    println!("Sessions:");
    for session in ledger.calendar.sessions() {
        println!("  {} ({}/{})", session, session.participants().len(), session.capacity());
    }
    info!("balance {}", ledger.balance());
}

#[cfg(test)]
mod tests {
    use ledger::Ledger;
    use model::{config::Config, errors::LedgerError};
    use storage::Storage;

    use super::*;

    const DEMO: &str = include_str!("../../demos/gym.json");

    fn run(raw: &str) -> (Ledger, Vec<Report>) {
        let script = Script::parse(raw).unwrap();
        let ledger = Ledger::new(Storage::new(), Config::default());
        let mut tx = ledger.tx_at(script.now().unwrap());
        let reports = Runner::new(&ledger).run(&mut tx, &script.commands);
        (ledger, reports)
    }

    fn error(report: &Report) -> Option<&LedgerError> {
        report.outcome.as_ref().err()?.downcast_ref::<LedgerError>()
    }

    #[test]
    fn test_demo_script() {
        let (ledger, reports) = run(DEMO);
        assert!(reports.iter().any(|r| r.outcome.is_ok()));
        assert!(reports
            .iter()
            .any(|r| matches!(error(r), Some(LedgerError::InvalidAge { .. }))));
        assert!(reports
            .iter()
            .any(|r| matches!(error(r), Some(LedgerError::ForumMismatch { .. }))));
        assert!(!ledger.calendar.sessions().is_empty());
        assert!(!ledger.history.actions().is_empty());
    }

    #[test]
    fn test_failures_do_not_stop_the_run() {
        let raw = r#"{
            "now": "15-01-2025 12:00",
            "commands": [
                {"cmd": "register_client", "person": "ghost"},
                {"cmd": "person", "alias": "dana", "name": "Dana", "balance": 100,
                 "gender": "Female", "birthday": "01-01-1990"},
                {"cmd": "register_client", "person": "dana"},
                {"cmd": "register_client", "person": "dana"},
                {"cmd": "notify", "message": "welcome"}
            ]
        }"#;
        let (ledger, reports) = run(raw);
        assert_eq!(5, reports.len());
        assert!(reports[0].outcome.is_err());
        assert!(reports[2].outcome.is_ok());
        assert!(matches!(
            error(&reports[3]),
            Some(LedgerError::DuplicateClient(_))
        ));
        assert_eq!("1 inboxes", reports[4].outcome.as_ref().unwrap());
        assert_eq!("notify", reports[4].command);
        assert_eq!(1, ledger.users.clients().len());
    }

    #[test]
    fn test_parse_date_time() {
        assert!(parse_date_time("16-01-2025 09:30").is_ok());
        assert!(parse_date_time("2025-01-16 09:30").is_err());
    }
}
