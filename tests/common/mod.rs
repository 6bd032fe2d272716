//! Shared test utilities and fixtures
//!
//! Scriptable collaborators that record every call into one ordered event log,
//! so tests can check both call counts and happens-before relations. Each
//! entry also captures whether the orchestrator read busy at that moment.

#![allow(dead_code)]

use std::sync::{Arc, Mutex, OnceLock};

use chrono::{DateTime, TimeZone, Utc};
use tokio::sync::oneshot;

use waypoint_core::{
    AnonWorkStore, AuthOrchestrator, AuthProvider, BoxError, BusyWatch, CollabFut, Collaborators,
    Navigator, ProjectStore,
};
use waypoint_types::{
    AnonWork, AuthOutcome, ChatMessage, Credentials, FileNode, FileSystemData, Workspace,
    WorkspaceId, WorkspaceSeed,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    SignIn,
    SignUp,
    AnonRead,
    AnonClear,
    List,
    Create(WorkspaceSeed),
    GoTo(WorkspaceId),
}

#[derive(Debug, Clone, Default)]
pub struct EventLog {
    entries: Arc<Mutex<Vec<(Event, bool)>>>,
    busy: Arc<OnceLock<BusyWatch>>,
}

impl EventLog {
    /// Samples `watch` on every later push.
    pub fn observe(&self, watch: BusyWatch) {
        assert!(self.busy.set(watch).is_ok(), "busy watch attached twice");
    }

    pub fn push(&self, event: Event) {
        let busy = self.busy.get().is_some_and(BusyWatch::is_busy);
        self.entries.lock().unwrap().push((event, busy));
    }

    pub fn events(&self) -> Vec<Event> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .map(|(event, _)| event.clone())
            .collect()
    }

    /// Busy state sampled at each matching event, in order.
    pub fn busy_at(&self, pred: impl Fn(&Event) -> bool) -> Vec<bool> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|(event, _)| pred(event))
            .map(|(_, busy)| *busy)
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&Event) -> bool) -> usize {
        self.events().iter().filter(|e| pred(e)).count()
    }

    pub fn position(&self, pred: impl Fn(&Event) -> bool) -> Option<usize> {
        self.events().iter().position(pred)
    }

    pub fn creates(&self) -> Vec<WorkspaceSeed> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Create(seed) => Some(seed),
                _ => None,
            })
            .collect()
    }

    pub fn navigations(&self) -> Vec<WorkspaceId> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::GoTo(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    /// Only the provider was called.
    pub fn provider_only(&self) -> bool {
        self.events()
            .iter()
            .all(|e| matches!(e, Event::SignIn | Event::SignUp))
    }
}

pub enum AuthScript {
    Respond(AuthOutcome),
    Fail(String),
    Pending(oneshot::Receiver<Result<AuthOutcome, BoxError>>),
}

pub struct MockAuth {
    log: EventLog,
    script: Mutex<Option<AuthScript>>,
}

impl MockAuth {
    fn respond(&self) -> CollabFut<'_, AuthOutcome> {
        let script = self.script.lock().unwrap().take();
        Box::pin(async move {
            match script {
                Some(AuthScript::Respond(outcome)) => Ok(outcome),
                Some(AuthScript::Fail(message)) => Err(BoxError::from(message)),
                Some(AuthScript::Pending(rx)) => rx
                    .await
                    .unwrap_or_else(|_| Err(BoxError::from("pending provider dropped"))),
                None => Err(BoxError::from("provider called more than once")),
            }
        })
    }
}

impl AuthProvider for MockAuth {
    fn sign_in<'a>(&'a self, _credentials: &'a Credentials) -> CollabFut<'a, AuthOutcome> {
        self.log.push(Event::SignIn);
        self.respond()
    }

    fn sign_up<'a>(&'a self, _credentials: &'a Credentials) -> CollabFut<'a, AuthOutcome> {
        self.log.push(Event::SignUp);
        self.respond()
    }
}

pub struct MockAnonStore {
    log: EventLog,
    work: Mutex<Option<AnonWork>>,
}

impl AnonWorkStore for MockAnonStore {
    fn read(&self) -> Option<AnonWork> {
        self.log.push(Event::AnonRead);
        self.work.lock().unwrap().clone()
    }

    fn clear(&self) {
        self.log.push(Event::AnonClear);
        self.work.lock().unwrap().take();
    }
}

impl MockAnonStore {
    pub fn current(&self) -> Option<AnonWork> {
        self.work.lock().unwrap().clone()
    }
}

pub struct MockProjects {
    log: EventLog,
    list: Mutex<Result<Vec<Workspace>, String>>,
    create: Mutex<Result<String, String>>,
}

impl ProjectStore for MockProjects {
    fn list(&self) -> CollabFut<'_, Vec<Workspace>> {
        self.log.push(Event::List);
        let response = self.list.lock().unwrap().clone();
        Box::pin(async move { response.map_err(BoxError::from) })
    }

    fn create(&self, seed: WorkspaceSeed) -> CollabFut<'_, Workspace> {
        self.log.push(Event::Create(seed));
        let response = self.create.lock().unwrap().clone();
        Box::pin(async move {
            response
                .map(|id| Workspace::new(id, Utc::now(), Utc::now()))
                .map_err(BoxError::from)
        })
    }
}

pub struct MockNavigator {
    log: EventLog,
}

impl Navigator for MockNavigator {
    fn go_to(&self, workspace: &WorkspaceId) {
        self.log.push(Event::GoTo(workspace.clone()));
    }
}

/// Builder for an orchestrator wired to recording mocks.
pub struct Harness {
    pub log: EventLog,
    pub auth: Arc<MockAuth>,
    pub anon: Arc<MockAnonStore>,
    pub projects: Arc<MockProjects>,
    pub orchestrator: AuthOrchestrator,
}

pub struct HarnessBuilder {
    auth: AuthScript,
    anon: Option<AnonWork>,
    list: Result<Vec<Workspace>, String>,
    create: Result<String, String>,
}

impl Harness {
    pub fn builder() -> HarnessBuilder {
        HarnessBuilder {
            auth: AuthScript::Respond(AuthOutcome::succeeded()),
            anon: None,
            list: Ok(Vec::new()),
            create: Ok("created-proj".to_string()),
        }
    }
}

impl HarnessBuilder {
    pub fn auth(mut self, script: AuthScript) -> Self {
        self.auth = script;
        self
    }

    pub fn outcome(self, outcome: AuthOutcome) -> Self {
        self.auth(AuthScript::Respond(outcome))
    }

    pub fn anon_work(mut self, work: AnonWork) -> Self {
        self.anon = Some(work);
        self
    }

    pub fn workspaces(mut self, workspaces: Vec<Workspace>) -> Self {
        self.list = Ok(workspaces);
        self
    }

    pub fn list_fails(mut self, message: &str) -> Self {
        self.list = Err(message.to_string());
        self
    }

    pub fn creates(mut self, id: &str) -> Self {
        self.create = Ok(id.to_string());
        self
    }

    pub fn create_fails(mut self, message: &str) -> Self {
        self.create = Err(message.to_string());
        self
    }

    pub fn build(self) -> Harness {
        let log = EventLog::default();
        let auth = Arc::new(MockAuth {
            log: log.clone(),
            script: Mutex::new(Some(self.auth)),
        });
        let anon = Arc::new(MockAnonStore {
            log: log.clone(),
            work: Mutex::new(self.anon),
        });
        let projects = Arc::new(MockProjects {
            log: log.clone(),
            list: Mutex::new(self.list),
            create: Mutex::new(self.create),
        });
        let navigator = Arc::new(MockNavigator { log: log.clone() });
        let orchestrator = AuthOrchestrator::new(Collaborators {
            auth: auth.clone(),
            anon_work: anon.clone(),
            projects: projects.clone(),
            navigator,
        });
        log.observe(orchestrator.busy_watch());
        Harness {
            log,
            auth,
            anon,
            projects,
            orchestrator,
        }
    }
}

pub fn creds() -> Credentials {
    Credentials::new("user@example.com", "password123")
}

pub fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}

pub fn workspace(id: &str, created: i64, updated: i64) -> Workspace {
    Workspace::new(id, at(created), at(updated))
}

pub fn sample_anon_work() -> AnonWork {
    let mut files = FileSystemData::new();
    files.insert("/App.jsx".to_string(), FileNode::file("..."));
    AnonWork::new(vec![ChatMessage::user("1", "Hello")], files)
}
