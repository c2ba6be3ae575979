//! Shared test fixtures: a scriptable in-memory `RemoteService`.

#![allow(dead_code)]

use async_trait::async_trait;
use movieshelf::domain::{Credentials, MovieDraft, MovieId, Registration};
use movieshelf::remote::{ImportFile, Page, RemoteFailure, RemoteResult, RemoteService, SearchField};
use movieshelf::{Client, Config};
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

pub const TOKEN: &str = "T1";

/// Remote operations a response can be scripted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    CreateAccount,
    CreateSession,
    List,
    Get,
    Create,
    Delete,
    Import,
    Search,
}

/// One recorded call.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub op: Op,
    pub token: Option<String>,
    pub detail: Value,
}

struct Scripted {
    result: RemoteResult<Value>,
    gate: Option<Arc<Notify>>,
}

/// In-memory `RemoteService`.
///
/// Responses are queued per operation and consumed in call order. A gated
/// response is held until its `Notify` is signalled. An operation with
/// nothing queued fails as a transport error.
#[derive(Default)]
pub struct FakeRemote {
    script: Mutex<HashMap<Op, VecDeque<Scripted>>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeRemote {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, op: Op, result: RemoteResult<Value>) {
        self.push(op, result, None);
    }

    /// Queues a response that is only released once the returned gate is notified.
    pub fn respond_gated(&self, op: Op, result: RemoteResult<Value>) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.push(op, result, Some(gate.clone()));
        gate
    }

    fn push(&self, op: Op, result: RemoteResult<Value>, gate: Option<Arc<Notify>>) {
        self.script
            .lock()
            .unwrap()
            .entry(op)
            .or_default()
            .push_back(Scripted { result, gate });
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, op: Op) -> Vec<Call> {
        self.calls().into_iter().filter(|call| call.op == op).collect()
    }

    async fn answer(&self, op: Op, token: Option<&str>, detail: Value) -> RemoteResult<Value> {
        self.calls.lock().unwrap().push(Call {
            op,
            token: token.map(String::from),
            detail,
        });

        let scripted = self.script.lock().unwrap().get_mut(&op).and_then(VecDeque::pop_front);
        let Some(Scripted { result, gate }) = scripted else {
            return Err(RemoteFailure::Transport(format!("no response scripted for {op:?}")));
        };

        if let Some(gate) = gate {
            gate.notified().await;
        }
        result
    }
}

#[async_trait]
impl RemoteService for FakeRemote {
    async fn create_account(&self, registration: &Registration) -> RemoteResult<Value> {
        let detail = serde_json::to_value(registration).unwrap();
        self.answer(Op::CreateAccount, None, detail).await
    }

    async fn create_session(&self, credentials: &Credentials) -> RemoteResult<Value> {
        let detail = serde_json::to_value(credentials).unwrap();
        self.answer(Op::CreateSession, None, detail).await
    }

    async fn list_movies(&self, token: &str, page: Page) -> RemoteResult<Value> {
        let detail = json!({"limit": page.limit, "offset": page.offset});
        self.answer(Op::List, Some(token), detail).await
    }

    async fn get_movie(&self, token: &str, id: MovieId) -> RemoteResult<Value> {
        self.answer(Op::Get, Some(token), json!(id)).await
    }

    async fn create_movie(&self, token: &str, draft: &MovieDraft) -> RemoteResult<Value> {
        let detail = serde_json::to_value(draft).unwrap();
        self.answer(Op::Create, Some(token), detail).await
    }

    async fn delete_movie(&self, token: &str, id: MovieId) -> RemoteResult<()> {
        self.answer(Op::Delete, Some(token), json!(id)).await.map(|_| ())
    }

    async fn import_movies(&self, token: &str, file: &ImportFile) -> RemoteResult<Value> {
        let detail = json!({"file_name": file.file_name, "size": file.bytes.len()});
        self.answer(Op::Import, Some(token), detail).await
    }

    async fn search_movies(&self, token: &str, field: SearchField, query: &str) -> RemoteResult<Value> {
        self.answer(Op::Search, Some(token), json!({"field": field.as_str(), "query": query})).await
    }
}

/// A client over `remote` with default configuration.
pub fn client(remote: &Arc<FakeRemote>) -> Client {
    client_with(remote, &Config::default())
}

pub fn client_with(remote: &Arc<FakeRemote>, config: &Config) -> Client {
    Client::with_service(remote.clone(), config)
}

pub fn movie(id: i64, title: &str) -> Value {
    json!({"id": id, "title": title, "year": 1990, "format": "VHS", "actors": []})
}

/// A rejection carrying an API error code.
pub fn rejected(code: &str) -> RemoteResult<Value> {
    Err(RemoteFailure::Rejected {
        status: Some(400),
        body: json!({"status": 0, "error": {"code": code}}),
    })
}

pub fn offline() -> RemoteResult<Value> {
    Err(RemoteFailure::Transport("connection refused".to_string()))
}

/// Lets spawned and joined futures make progress up to their next pending point.
pub async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}
