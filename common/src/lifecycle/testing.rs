//! In-memory roast API and a small driver for controller tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use async_trait::async_trait;
use futures::channel::oneshot;
use futures::executor::LocalPool;
use futures::task::LocalSpawnExt;

use crate::client::{RequestFailure, RoastApi};
use crate::identifier::ResourceIdentifier;
use crate::lifecycle::controller::{Completion, RequestController};
use crate::lifecycle::token::CancelSignal;
use crate::model::profile::ProfileSummary;
use crate::model::roast::{RoastResponse, RoastText};

type Reply = Result<RoastResponse, RequestFailure>;

pub(crate) fn id(name: &str) -> ResourceIdentifier {
    ResourceIdentifier::validate(name).unwrap()
}

pub(crate) fn response(login: &str, roast: &str) -> RoastResponse {
    RoastResponse {
        roast: RoastText(roast.to_string()),
        profile: ProfileSummary {
            login: login.to_string(),
            ..Default::default()
        },
    }
}

/// Each call parks until the test resolves it by username.
#[derive(Default)]
pub(crate) struct ScriptedApi {
    calls: RefCell<Vec<String>>,
    cancelled: Rc<RefCell<Vec<String>>>,
    waiting: RefCell<HashMap<String, Vec<oneshot::Sender<Reply>>>>,
}

impl ScriptedApi {
    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub(crate) fn cancelled(&self) -> Vec<String> {
        self.cancelled.borrow().clone()
    }

    /// Answers the oldest outstanding call for `username`. Returns `false`
    /// if there was none or its caller has gone away.
    pub(crate) fn resolve(&self, username: &str, reply: Reply) -> bool {
        let sender = self
            .waiting
            .borrow_mut()
            .get_mut(username)
            .filter(|senders| !senders.is_empty())
            .map(|senders| senders.remove(0));
        sender.is_some_and(|sender| sender.send(reply).is_ok())
    }
}

#[async_trait(?Send)]
impl RoastApi for ScriptedApi {
    async fn fetch_roast(
        &self,
        identifier: &ResourceIdentifier,
        signal: &CancelSignal,
    ) -> Result<RoastResponse, RequestFailure> {
        let username = identifier.to_string();
        self.calls.borrow_mut().push(username.clone());

        let cancelled = Rc::clone(&self.cancelled);
        let name = username.clone();
        signal.on_cancel(move || cancelled.borrow_mut().push(name));

        let (tx, rx) = oneshot::channel();
        self.waiting.borrow_mut().entry(username).or_default().push(tx);
        rx.await.unwrap_or(Err(RequestFailure::Cancelled))
    }
}

/// Controller plus a single-threaded executor, standing in for the browser.
pub(crate) struct Harness {
    pub(crate) controller: RequestController<ScriptedApi>,
    pub(crate) api: Rc<ScriptedApi>,
    pool: LocalPool,
    completions: Rc<RefCell<Vec<Completion>>>,
}

impl Harness {
    pub(crate) fn new() -> Self {
        let api = Rc::new(ScriptedApi::default());
        Self {
            controller: RequestController::new(Rc::clone(&api)),
            api,
            pool: LocalPool::new(),
            completions: Rc::default(),
        }
    }

    /// Observes `name` and spawns the resulting fetch, if any.
    pub(crate) fn observe(&mut self, name: &str) {
        if let Some(fetch) = self.controller.observe(id(name)) {
            let completions = Rc::clone(&self.completions);
            self.pool
                .spawner()
                .spawn_local(async move {
                    let completion = fetch.run().await;
                    completions.borrow_mut().push(completion);
                })
                .unwrap();
        }
    }

    /// Polls every spawned fetch until none can make progress.
    pub(crate) fn run(&mut self) {
        self.pool.run_until_stalled();
    }

    pub(crate) fn take_completions(&mut self) -> Vec<Completion> {
        std::mem::take(&mut *self.completions.borrow_mut())
    }

    /// Settles completions in arrival order. Returns how many changed the state.
    pub(crate) fn deliver(&mut self) -> usize {
        self.take_completions()
            .into_iter()
            .map(|completion| self.controller.settle(completion))
            .filter(|changed| *changed)
            .count()
    }
}
