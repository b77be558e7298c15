//! # In-Memory Drive
//!
//! A simulated remote store, deterministic and inspectable.
//!
//! Files live in insertion order in a shared table. Listings evaluate the
//! subset of the filter language that drivepath itself emits:
//!
//! - `'<id>' in parents`
//! - `name='<name>'`
//! - `mimeType='<type>'`
//! - `trashed=false`
//!
//! joined with ` and `. Anything else is rejected as a malformed request,
//! the way the real store rejects filters it cannot parse. Quoted values
//! must not contain a quote; names are never unescaped.
//!
//! Every call is recorded as a [`StoreCall`] so tests can assert on the
//! exact traffic a higher layer produced.

use crate::error::StoreError;
use crate::request::{ListPage, ListRequest};
use crate::store::{DriveBackend, RemoteFileStore};
use drive_types::{Entry, FileId, PageToken};
use serde_json::Value;
use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;
use uuid::Uuid;

/// MIME type the store uses for folders
pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

/// Default number of entries per listing page
const DEFAULT_PAGE_SIZE: usize = 100;

/// A file held by the simulated store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub id: FileId,
    pub name: String,
    pub parents: Vec<FileId>,
    pub mime_type: String,
    pub content: String,
}

impl StoredFile {
    /// Full entry with every field the store knows
    fn to_entry(&self) -> Entry {
        let parents = self
            .parents
            .iter()
            .map(|p| Value::String(p.as_str().to_string()))
            .collect::<Vec<_>>();
        Entry::with_id(&self.id)
            .with_field("name", self.name.as_str())
            .with_field("mimeType", self.mime_type.as_str())
            .with_field("parents", Value::Array(parents))
    }
}

/// A call observed by the simulated store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    OpenFiles,
    List(ListRequest),
    Create {
        parent: FileId,
        name: String,
        mime_type: String,
    },
    GetContent(FileId),
    Update {
        file_id: FileId,
        mime_type: String,
    },
    Delete(FileId),
    Close,
}

#[derive(Debug)]
struct DriveState {
    files: Vec<StoredFile>,
    calls: Vec<StoreCall>,
    page_size: usize,
    open_failures: VecDeque<StoreError>,
}

impl Default for DriveState {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            calls: Vec::new(),
            page_size: DEFAULT_PAGE_SIZE,
            open_failures: VecDeque::new(),
        }
    }
}

fn lock(state: &Mutex<DriveState>) -> MutexGuard<'_, DriveState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Simulated drive backend
///
/// Clones share the same drive, so a test can keep a handle for seeding
/// and inspection while the code under test owns another.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDrive {
    state: Arc<Mutex<DriveState>>,
}

impl InMemoryDrive {
    /// Creates an empty drive (only the implicit `root` folder exists)
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how many entries a listing page holds
    pub fn with_page_size(self, page_size: usize) -> Self {
        lock(&self.state).page_size = page_size.max(1);
        self
    }

    /// Adds a folder under `parent` without recording a call
    pub fn add_folder(&self, parent: &FileId, name: &str) -> FileId {
        self.add_file(parent, name, "", FOLDER_MIME_TYPE)
    }

    /// Adds a file under `parent` without recording a call
    pub fn add_file(&self, parent: &FileId, name: &str, content: &str, mime_type: &str) -> FileId {
        let id = FileId::new(Uuid::new_v4().to_string());
        lock(&self.state).files.push(StoredFile {
            id: id.clone(),
            name: name.to_string(),
            parents: vec![parent.clone()],
            mime_type: mime_type.to_string(),
            content: content.to_string(),
        });
        id
    }

    /// Makes the next `open_files` calls fail with these errors, in order
    pub fn fail_next_opens(&self, errors: impl IntoIterator<Item = StoreError>) {
        lock(&self.state).open_failures.extend(errors);
    }

    /// Looks up a stored file by ID
    pub fn file(&self, file_id: &FileId) -> Option<StoredFile> {
        lock(&self.state)
            .files
            .iter()
            .find(|f| &f.id == file_id)
            .cloned()
    }

    /// Content of a stored file
    pub fn content_of(&self, file_id: &FileId) -> Option<String> {
        self.file(file_id).map(|f| f.content)
    }

    /// Number of stored files and folders
    pub fn file_count(&self) -> usize {
        lock(&self.state).files.len()
    }

    /// Every call recorded so far
    pub fn calls(&self) -> Vec<StoreCall> {
        lock(&self.state).calls.clone()
    }

    /// Only the listing requests recorded so far
    pub fn list_requests(&self) -> Vec<ListRequest> {
        lock(&self.state)
            .calls
            .iter()
            .filter_map(|call| match call {
                StoreCall::List(request) => Some(request.clone()),
                _ => None,
            })
            .collect()
    }

    /// Number of recorded calls matching `pred`
    pub fn count_calls(&self, pred: impl Fn(&StoreCall) -> bool) -> usize {
        lock(&self.state).calls.iter().filter(|c| pred(c)).count()
    }

    /// Forgets recorded calls
    pub fn clear_calls(&self) {
        lock(&self.state).calls.clear();
    }
}

impl DriveBackend for InMemoryDrive {
    type Files = InMemoryFiles;

    fn open_files(&self) -> Result<InMemoryFiles, StoreError> {
        let mut state = lock(&self.state);
        state.calls.push(StoreCall::OpenFiles);
        if let Some(err) = state.open_failures.pop_front() {
            return Err(err);
        }
        Ok(InMemoryFiles {
            state: Arc::clone(&self.state),
            closed: AtomicBool::new(false),
        })
    }
}

/// Files resource of an [`InMemoryDrive`]
#[derive(Debug)]
pub struct InMemoryFiles {
    state: Arc<Mutex<DriveState>>,
    closed: AtomicBool,
}

impl InMemoryFiles {
    /// Returns true once `close` has been called
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn record(&self, call: StoreCall) -> Result<MutexGuard<'_, DriveState>, StoreError> {
        let mut state = lock(&self.state);
        state.calls.push(call);
        if self.is_closed() {
            return Err(StoreError::Closed);
        }
        Ok(state)
    }
}

impl RemoteFileStore for InMemoryFiles {
    fn list_children(&self, request: &ListRequest) -> Result<ListPage, StoreError> {
        let state = self.record(StoreCall::List(request.clone()))?;

        let clauses = parse_filter(&request.query)?;
        let projection = parse_fields(request.fields.as_deref());
        let offset = match &request.page_token {
            Some(token) => token.as_str().parse::<usize>().map_err(|_| {
                StoreError::MalformedRequest(format!("invalid page token: {}", token))
            })?,
            None => 0,
        };

        let matching: Vec<&StoredFile> = state
            .files
            .iter()
            .filter(|f| clauses.iter().all(|c| c.matches(f)))
            .collect();

        let end = offset
            .checked_add(state.page_size)
            .ok_or_else(|| {
                StoreError::MalformedRequest(format!("page token out of range: {}", offset))
            })?
            .min(matching.len());
        let files = matching
            .get(offset..end)
            .unwrap_or_default()
            .iter()
            .map(|f| project(f.to_entry(), projection.as_ref()))
            .collect();
        let next_page_token = (end < matching.len()).then(|| PageToken::new(end.to_string()));

        debug!(query = %request.query, offset, end, total = matching.len(), "served listing page");
        Ok(ListPage {
            files,
            next_page_token,
        })
    }

    fn create_file(
        &self,
        parent: &FileId,
        name: &str,
        content: &str,
        mime_type: &str,
    ) -> Result<Entry, StoreError> {
        let mut state = self.record(StoreCall::Create {
            parent: parent.clone(),
            name: name.to_string(),
            mime_type: mime_type.to_string(),
        })?;

        let file = StoredFile {
            id: FileId::new(Uuid::new_v4().to_string()),
            name: name.to_string(),
            parents: vec![parent.clone()],
            mime_type: mime_type.to_string(),
            content: content.to_string(),
        };
        let entry = file.to_entry();
        state.files.push(file);
        Ok(entry)
    }

    fn get_file_content(&self, file_id: &FileId) -> Result<String, StoreError> {
        let state = self.record(StoreCall::GetContent(file_id.clone()))?;
        state
            .files
            .iter()
            .find(|f| &f.id == file_id)
            .map(|f| f.content.clone())
            .ok_or_else(|| StoreError::NotFound(file_id.clone()))
    }

    fn update_file_content(
        &self,
        file_id: &FileId,
        content: &str,
        mime_type: &str,
    ) -> Result<(), StoreError> {
        let mut state = self.record(StoreCall::Update {
            file_id: file_id.clone(),
            mime_type: mime_type.to_string(),
        })?;
        let file = state
            .files
            .iter_mut()
            .find(|f| &f.id == file_id)
            .ok_or_else(|| StoreError::NotFound(file_id.clone()))?;
        file.content = content.to_string();
        file.mime_type = mime_type.to_string();
        Ok(())
    }

    fn delete_file(&self, file_id: &FileId) -> Result<(), StoreError> {
        let mut state = self.record(StoreCall::Delete(file_id.clone()))?;
        if !state.files.iter().any(|f| &f.id == file_id) {
            return Err(StoreError::NotFound(file_id.clone()));
        }

        // Deleting a folder takes its whole subtree with it
        let mut doomed: HashSet<FileId> = HashSet::from([file_id.clone()]);
        loop {
            let before = doomed.len();
            for file in &state.files {
                if file.parents.iter().any(|p| doomed.contains(p)) {
                    doomed.insert(file.id.clone());
                }
            }
            if doomed.len() == before {
                break;
            }
        }
        state.files.retain(|f| !doomed.contains(&f.id));
        Ok(())
    }

    fn close(&self) -> Result<(), StoreError> {
        lock(&self.state).calls.push(StoreCall::Close);
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// One conjunct of a filter expression
#[derive(Debug, Clone, PartialEq, Eq)]
enum Clause {
    InParents(FileId),
    Name(String),
    MimeType(String),
    NotTrashed,
}

impl Clause {
    fn matches(&self, file: &StoredFile) -> bool {
        match self {
            Clause::InParents(parent) => file.parents.contains(parent),
            Clause::Name(name) => &file.name == name,
            Clause::MimeType(mime_type) => &file.mime_type == mime_type,
            Clause::NotTrashed => true,
        }
    }
}

fn parse_filter(query: &str) -> Result<Vec<Clause>, StoreError> {
    if query.trim().is_empty() {
        return Ok(Vec::new());
    }
    query.split(" and ").map(parse_clause).collect()
}

fn parse_clause(clause: &str) -> Result<Clause, StoreError> {
    let clause = clause.trim();
    let malformed = || StoreError::MalformedRequest(format!("cannot parse filter clause: {}", clause));

    if let Some(parent) = clause.strip_suffix(" in parents") {
        return unquote(parent).map(|p| Clause::InParents(FileId::new(p))).ok_or_else(malformed);
    }
    if let Some(name) = clause.strip_prefix("name=") {
        return unquote(name).map(|n| Clause::Name(n.to_string())).ok_or_else(malformed);
    }
    if let Some(mime_type) = clause.strip_prefix("mimeType=") {
        return unquote(mime_type)
            .map(|m| Clause::MimeType(m.to_string()))
            .ok_or_else(malformed);
    }
    if clause == "trashed=false" {
        return Ok(Clause::NotTrashed);
    }
    Err(malformed())
}

/// Strips single quotes; a quote inside the value is a syntax error
fn unquote(value: &str) -> Option<&str> {
    let inner = value.trim().strip_prefix('\'')?.strip_suffix('\'')?;
    (!inner.contains('\'')).then_some(inner)
}

/// Parses a field projection into the per-entry field names
///
/// `None` means every field. Accepts `files(id,name)`, bare `id,name`, and
/// ignores `nextPageToken`.
fn parse_fields(fields: Option<&str>) -> Option<Vec<String>> {
    let fields = fields?;
    let mut selected = Vec::new();

    for part in split_top_level(fields) {
        let part = part.trim();
        if part.is_empty() || part == "nextPageToken" {
            continue;
        }
        if part == "files" || part == "*" {
            return None;
        }
        match part
            .strip_prefix("files(")
            .and_then(|inner| inner.strip_suffix(')'))
        {
            Some(inner) => selected.extend(inner.split(',').map(|f| f.trim().to_string())),
            None => selected.push(part.to_string()),
        }
    }
    Some(selected)
}

fn split_top_level(fields: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in fields.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&fields[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&fields[start..]);
    parts
}

fn project(entry: Entry, projection: Option<&Vec<String>>) -> Entry {
    match projection {
        None => entry,
        Some(fields) => Entry::from_map(
            entry
                .into_map()
                .into_iter()
                .filter(|(k, _)| fields.iter().any(|f| f == k))
                .collect(),
        ),
    }
}
