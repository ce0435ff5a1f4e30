//! In-memory object store for engine tests.
//!
//! Trees are path to content maps. Merges are three-way per path: a path
//! changed on only one side takes that side, a path changed identically on
//! both sides is kept, anything else is a conflict.

#![allow(clippy::unwrap_used)]

use std::collections::hash_map::DefaultHasher;
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::hash::{Hash, Hasher};
use std::sync::Mutex;

use crate::traits::{ObjectStore, StoreResult};

use super::error::StoreError;
use super::types::{CommitRange, CommitRef, MergeResult, NewCommit, Signature};

type Tree = BTreeMap<String, String>;

#[derive(Default)]
struct Inner {
    trees: HashMap<String, Tree>,
    commits: HashMap<String, CommitRef>,
    refs: HashMap<String, String>,
    rejected: HashSet<String>,
    ref_writes: Vec<(String, String)>,
    clock: u32,
}

fn hash_hex(value: &impl Hash) -> String {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}

impl Inner {
    fn put_tree(&mut self, tree: Tree) -> String {
        let sha = hash_hex(&tree);
        self.trees.insert(sha.clone(), tree);
        sha
    }

    fn put_commit(&mut self, commit: NewCommit) -> CommitRef {
        let sha = hash_hex(&(
            &commit.tree,
            &commit.parents,
            &commit.author,
            &commit.committer,
            &commit.message,
        ));
        let stored = CommitRef {
            sha: sha.clone(),
            tree: commit.tree,
            parents: commit.parents,
            author: commit.author,
            committer: commit.committer,
            message: commit.message,
        };
        self.commits.insert(sha, stored.clone());
        stored
    }

    fn tree_of(&self, commit_sha: &str) -> Tree {
        self.commits
            .get(commit_sha)
            .and_then(|c| self.trees.get(&c.tree))
            .cloned()
            .unwrap_or_default()
    }

    fn ancestors(&self, sha: &str) -> HashSet<String> {
        let mut seen = HashSet::new();
        let mut queue = VecDeque::from([sha.to_string()]);
        while let Some(next) = queue.pop_front() {
            if !seen.insert(next.clone()) {
                continue;
            }
            if let Some(commit) = self.commits.get(&next) {
                queue.extend(commit.parents.iter().cloned());
            }
        }
        seen
    }

    fn merge_base(&self, a: &str, b: &str) -> Option<String> {
        let from_a = self.ancestors(a);
        let mut seen = HashSet::new();
        let mut queue = VecDeque::from([b.to_string()]);
        while let Some(next) = queue.pop_front() {
            if from_a.contains(&next) {
                return Some(next);
            }
            if !seen.insert(next.clone()) {
                continue;
            }
            if let Some(commit) = self.commits.get(&next) {
                queue.extend(commit.parents.iter().cloned());
            }
        }
        None
    }

    fn require_commit(&self, sha: &str) -> StoreResult<&CommitRef> {
        self.commits
            .get(sha)
            .ok_or_else(|| StoreError::NotFound(sha.to_string()))
    }

    fn signature(&mut self, name: &str) -> Signature {
        self.clock += 1;
        Signature {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            date: Some(format!("2024-01-01T00:{:02}:{:02}Z", self.clock / 60, self.clock % 60)),
        }
    }
}

fn three_way(base: &Tree, ours: &Tree, theirs: &Tree) -> Option<Tree> {
    let paths: HashSet<&String> = base.keys().chain(ours.keys()).chain(theirs.keys()).collect();
    let mut merged = Tree::new();

    for path in paths {
        let (b, o, t) = (base.get(path), ours.get(path), theirs.get(path));
        let pick = if o == t || t == b {
            o
        } else if o == b {
            t
        } else {
            return None;
        };
        if let Some(content) = pick {
            merged.insert(path.clone(), content.clone());
        }
    }

    Some(merged)
}

fn rejected(branch: &str) -> StoreError {
    StoreError::Backend(Box::new(std::io::Error::other(format!(
        "update to {branch} rejected"
    ))))
}

/// Object store kept entirely in memory.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[allow(clippy::unwrap_used)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a commit whose tree is `parent`'s tree with `files` overwritten.
    pub fn commit(&self, parent: Option<&str>, files: &[(&str, &str)], message: &str) -> String {
        self.commit_as(parent, files, message, "Ada")
    }

    /// Like [`MemoryStore::commit`] with a chosen author and committer.
    pub fn commit_as(
        &self,
        parent: Option<&str>,
        files: &[(&str, &str)],
        message: &str,
        author: &str,
    ) -> String {
        let mut inner = self.inner.lock().unwrap();
        let mut tree = parent.map(|p| inner.tree_of(p)).unwrap_or_default();
        for (path, content) in files {
            tree.insert((*path).to_string(), (*content).to_string());
        }
        let tree = inner.put_tree(tree);
        let signature = inner.signature(author);
        inner
            .put_commit(NewCommit {
                tree,
                parents: parent.map(ToString::to_string).into_iter().collect(),
                author: Some(signature.clone()),
                committer: Some(signature),
                message: message.to_string(),
            })
            .sha
    }

    /// Write a two-parent commit carrying `left`'s tree.
    pub fn merge_commit(&self, left: &str, right: &str, message: &str) -> String {
        let mut inner = self.inner.lock().unwrap();
        let tree = inner.commits[left].tree.clone();
        inner
            .put_commit(NewCommit {
                tree,
                parents: vec![left.to_string(), right.to_string()],
                author: None,
                committer: None,
                message: message.to_string(),
            })
            .sha
    }

    pub fn set_ref(&self, branch: &str, sha: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.refs.insert(branch.to_string(), sha.to_string());
    }

    pub fn ref_sha(&self, branch: &str) -> Option<String> {
        self.inner.lock().unwrap().refs.get(branch).cloned()
    }

    /// Make every later update of `branch` fail.
    pub fn reject_updates_to(&self, branch: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.rejected.insert(branch.to_string());
    }

    /// Number of successful updates applied to `branch`.
    pub fn ref_writes(&self, branch: &str) -> usize {
        let inner = self.inner.lock().unwrap();
        inner.ref_writes.iter().filter(|(b, _)| b == branch).count()
    }

    /// Files of a commit's tree.
    pub fn files(&self, sha: &str) -> Tree {
        self.inner.lock().unwrap().tree_of(sha)
    }

    /// Read a stored commit.
    pub fn commit_ref(&self, sha: &str) -> CommitRef {
        self.inner.lock().unwrap().commits[sha].clone()
    }
}

#[allow(clippy::unwrap_used)]
impl ObjectStore for MemoryStore {
    async fn resolve_ref(&self, branch: &str) -> StoreResult<String> {
        self.ref_sha(branch)
            .ok_or_else(|| StoreError::NotFound(format!("refs/heads/{branch}")))
    }

    async fn create_ref(&self, branch: &str, sha: &str) -> StoreResult<()> {
        let mut inner = self.inner.lock().unwrap();
        if inner.refs.contains_key(branch) {
            return Err(StoreError::RefExists(branch.to_string()));
        }
        inner.require_commit(sha)?;
        inner.refs.insert(branch.to_string(), sha.to_string());
        Ok(())
    }

    async fn update_ref(&self, branch: &str, sha: &str, force: bool) -> StoreResult<()> {
        let mut inner = self.inner.lock().unwrap();
        if inner.rejected.contains(branch) {
            return Err(rejected(branch));
        }
        let current = inner
            .refs
            .get(branch)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("refs/heads/{branch}")))?;
        inner.require_commit(sha)?;
        if !force && !inner.ancestors(sha).contains(&current) {
            return Err(rejected(branch));
        }
        inner.refs.insert(branch.to_string(), sha.to_string());
        inner.ref_writes.push((branch.to_string(), sha.to_string()));
        Ok(())
    }

    async fn delete_ref(&self, branch: &str) -> StoreResult<()> {
        let mut inner = self.inner.lock().unwrap();
        inner
            .refs
            .remove(branch)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(format!("refs/heads/{branch}")))
    }

    async fn get_commit(&self, sha: &str) -> StoreResult<CommitRef> {
        let inner = self.inner.lock().unwrap();
        inner.require_commit(sha).cloned()
    }

    async fn create_commit(&self, commit: NewCommit) -> StoreResult<CommitRef> {
        let mut inner = self.inner.lock().unwrap();
        if !inner.trees.contains_key(&commit.tree) {
            return Err(StoreError::NotFound(commit.tree));
        }
        for parent in &commit.parents {
            inner.require_commit(parent)?;
        }
        Ok(inner.put_commit(commit))
    }

    async fn compare(&self, base: &str, head: &str) -> StoreResult<CommitRange> {
        let inner = self.inner.lock().unwrap();
        inner.require_commit(base)?;
        inner.require_commit(head)?;

        let merge_base = inner
            .merge_base(base, head)
            .ok_or_else(|| StoreError::NotFound(format!("merge base of {base} and {head}")))?;
        let excluded = inner.ancestors(base);

        // Post-order walk so parents come before children.
        let mut ordered = Vec::new();
        let mut visited = HashSet::new();
        let mut stack = vec![(head.to_string(), false)];
        while let Some((sha, expanded)) = stack.pop() {
            if excluded.contains(&sha) {
                continue;
            }
            if expanded {
                ordered.push(inner.commits[&sha].clone());
                continue;
            }
            if !visited.insert(sha.clone()) {
                continue;
            }
            stack.push((sha.clone(), true));
            for parent in inner.commits[&sha].parents.iter().rev() {
                stack.push((parent.clone(), false));
            }
        }

        Ok(CommitRange {
            merge_base,
            commits: ordered,
        })
    }

    async fn merge(&self, branch: &str, sha: &str, message: &str) -> StoreResult<MergeResult> {
        let mut inner = self.inner.lock().unwrap();
        let ours = inner
            .refs
            .get(branch)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("refs/heads/{branch}")))?;
        inner.require_commit(sha)?;

        if inner.ancestors(&ours).contains(sha) {
            return Ok(MergeResult::UpToDate);
        }

        let base_tree = inner
            .merge_base(&ours, sha)
            .map(|b| inner.tree_of(&b))
            .unwrap_or_default();
        let merged = three_way(&base_tree, &inner.tree_of(&ours), &inner.tree_of(sha))
            .ok_or(StoreError::Conflict)?;

        let tree = inner.put_tree(merged);
        let commit = inner.put_commit(NewCommit {
            tree,
            parents: vec![ours, sha.to_string()],
            author: None,
            committer: None,
            message: message.to_string(),
        });
        inner.refs.insert(branch.to_string(), commit.sha.clone());

        Ok(MergeResult::Merged(commit))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn tree(entries: &[(&str, &str)]) -> Tree {
        entries
            .iter()
            .map(|(p, c)| ((*p).to_string(), (*c).to_string()))
            .collect()
    }

    #[test]
    fn test_three_way_takes_one_sided_changes() {
        let base = tree(&[("a", "0"), ("b", "0")]);
        let ours = tree(&[("a", "1"), ("b", "0")]);
        let theirs = tree(&[("a", "0"), ("b", "2"), ("c", "new")]);

        let merged = three_way(&base, &ours, &theirs).unwrap();

        assert_eq!(merged, tree(&[("a", "1"), ("b", "2"), ("c", "new")]));
    }

    #[test]
    fn test_three_way_conflict() {
        let base = tree(&[("a", "0")]);
        assert!(three_way(&base, &tree(&[("a", "1")]), &tree(&[("a", "2")])).is_none());
    }

    #[test]
    fn test_three_way_deletion() {
        let base = tree(&[("a", "0"), ("b", "0")]);
        let ours = tree(&[("a", "0")]);
        let merged = three_way(&base, &ours, &base).unwrap();
        assert_eq!(merged, tree(&[("a", "0")]));
    }

    #[test]
    fn test_identical_commits_share_sha() {
        let store = MemoryStore::new();
        let base = store.commit(None, &[("a", "0")], "B");
        let first = store.commit_ref(&base);

        let mut inner = store.inner.lock().unwrap();
        let again = inner.put_commit(NewCommit {
            tree: first.tree.clone(),
            parents: first.parents.clone(),
            author: first.author.clone(),
            committer: first.committer.clone(),
            message: first.message,
        });
        assert_eq!(again.sha, base);
    }
}
