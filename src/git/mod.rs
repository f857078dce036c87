//! Git operations for the destination repository
//!
//! After a release the staged tree is committed and pushed:
//! - changes below the destination root are staged (additions, edits, deletions)
//! - a commit is created on the current branch
//! - the branch is pushed to the configured remote
//!
//! A commit whose push failed is pushed again on the next run even when the tree has
//! not changed since.
//!
//! Authentication is delegated to git's native credential system, see [`auth`].

pub mod auth;

use std::path::{Path, PathBuf};

use git2::{
    ErrorCode, IndexAddOption, Oid, PushOptions, RemoteCallbacks, Repository, Signature,
};

use crate::error::{
    Result, git_open_failed, git_operation_failed, push_failed, remote_not_found,
};

/// Fallback identity when git has no `user.name`/`user.email`
const FALLBACK_NAME: &str = "fanout";
const FALLBACK_EMAIL: &str = "fanout@localhost";

/// What a commit-and-push produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitOutcome {
    pub oid: Oid,
    pub branch: String,
    /// `false` when an earlier, unpushed commit was pushed
    pub created: bool,
}

/// Open the repository containing `path`
pub fn open_repository(path: &Path) -> Result<Repository> {
    Repository::discover(path)
        .map_err(|e| git_open_failed(path.display().to_string(), e.message()))
}

/// Pathspec selecting everything below `path` inside the repository
///
/// A directory pathspec matches every path below it.
fn pathspec_for(repo: &Repository, path: &Path) -> Result<String> {
    let workdir = repo
        .workdir()
        .ok_or_else(|| git_operation_failed("repository has no working directory"))?;
    let workdir = dunce::canonicalize(workdir)?;
    let path = dunce::canonicalize(path)?;

    let relative = path
        .strip_prefix(&workdir)
        .map_or_else(|_| PathBuf::new(), Path::to_path_buf);
    if relative.as_os_str().is_empty() {
        return Ok("*".to_string());
    }
    Ok(relative.to_string_lossy().replace('\\', "/"))
}

/// Stage everything below `path` and commit it
///
/// Returns `None` when nothing changed since the last commit.
pub fn commit_all(repo: &Repository, path: &Path, message: &str) -> Result<Option<Oid>> {
    let pathspec = pathspec_for(repo, path)?;

    let mut index = repo.index()?;
    index.add_all([pathspec.as_str()], IndexAddOption::DEFAULT, None)?;
    index.update_all([pathspec.as_str()], None)?;
    index.write()?;

    let tree_id = index.write_tree()?;
    let parent = match repo.head() {
        Ok(head) => Some(head.peel_to_commit()?),
        Err(_) => None,
    };

    if parent.as_ref().is_some_and(|p| p.tree_id() == tree_id) {
        tracing::debug!("nothing to commit");
        return Ok(None);
    }

    let tree = repo.find_tree(tree_id)?;
    let signature = repo
        .signature()
        .or_else(|_| Signature::now(FALLBACK_NAME, FALLBACK_EMAIL))?;
    let parents: Vec<_> = parent.iter().collect();

    let oid = repo.commit(
        Some("HEAD"),
        &signature,
        &signature,
        message,
        &tree,
        &parents,
    )?;
    tracing::debug!(%oid, "created commit");
    Ok(Some(oid))
}

/// Name of the branch HEAD points at
pub fn current_branch(repo: &Repository) -> Result<String> {
    let head = repo.head()?;
    head.shorthand()
        .filter(|_| head.is_branch())
        .map(str::to_string)
        .ok_or_else(|| git_operation_failed("HEAD is not on a branch"))
}

/// Push the current branch to `remote_name`
pub fn push_current_branch(repo: &Repository, remote_name: &str) -> Result<String> {
    let branch = current_branch(repo)?;
    let mut remote = repo
        .find_remote(remote_name)
        .map_err(|_| remote_not_found(remote_name))?;

    let mut callbacks = RemoteCallbacks::new();
    auth::setup_auth_callbacks(&mut callbacks);
    callbacks.push_update_reference(|refname, status| match status {
        Some(message) => Err(git2::Error::from_str(&format!(
            "{refname} rejected: {message}"
        ))),
        None => Ok(()),
    });

    let mut options = PushOptions::new();
    options.remote_callbacks(callbacks);

    let refspec = format!("refs/heads/{branch}:refs/heads/{branch}");
    remote
        .push(&[refspec.as_str()], Some(&mut options))
        .map_err(|e| push_failed(remote_name, e.message()))?;

    let head = repo.head()?.peel_to_commit()?.id();
    repo.reference(
        &tracking_ref(remote_name, &branch),
        head,
        true,
        "fanout: push",
    )?;

    tracing::debug!(remote = remote_name, %branch, "pushed");
    Ok(branch)
}

fn tracking_ref(remote: &str, branch: &str) -> String {
    format!("refs/remotes/{remote}/{branch}")
}

/// HEAD commit if the remote-tracking branch does not point at it yet
fn unpushed_head(repo: &Repository, remote: &str) -> Result<Option<Oid>> {
    let head = match repo.head() {
        Ok(head) => head,
        Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => {
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };
    let Some(branch) = head.shorthand().filter(|_| head.is_branch()) else {
        return Ok(None);
    };

    let oid = head.peel_to_commit()?.id();
    match repo.refname_to_id(&tracking_ref(remote, branch)) {
        Ok(pushed) if pushed == oid => Ok(None),
        _ => Ok(Some(oid)),
    }
}

/// Commit everything below `path` and push the branch
///
/// Without changes, HEAD is still pushed if the remote has not seen it. Returns `None`
/// when there was nothing to commit or push.
pub fn commit_and_push(path: &Path, message: &str, remote: &str) -> Result<Option<CommitOutcome>> {
    let repo = open_repository(path)?;
    let (oid, created) = match commit_all(&repo, path, message)? {
        Some(oid) => (oid, true),
        None => match unpushed_head(&repo, remote)? {
            Some(oid) => {
                tracing::debug!(%oid, "pushing earlier commit");
                (oid, false)
            }
            None => return Ok(None),
        },
    };
    let branch = push_current_branch(&repo, remote)?;
    Ok(Some(CommitOutcome {
        oid,
        branch,
        created,
    }))
}
