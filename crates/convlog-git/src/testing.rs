//! Repository fixtures for tests

use git2::{Oid, Repository, Signature, Time};
use tempfile::TempDir;

use crate::GitRepo;

/// 2021-01-01T00:00:00Z
pub const START: i64 = 1_609_459_200;
const DAY: i64 = 86_400;

pub fn commit(repo: &Repository, message: &str, day: i64) -> Oid {
    let sig = Signature::new("Test", "test@example.com", &Time::new(START + day * DAY, 0)).unwrap();
    let tree_id = repo.index().unwrap().write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();

    let parents = match repo.head() {
        Ok(head) => vec![head.peel_to_commit().unwrap()],
        Err(_) => Vec::new(),
    };
    let parent_refs: Vec<&git2::Commit<'_>> = parents.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
        .unwrap()
}

/// A repository with two releases and unreleased work on top:
///
/// ```text
/// day 0  chore: initial commit          <- v0.1.0 (lightweight)
/// day 1  feat: add parser
/// day 2  fix(lexer): handle CRLF        <- v0.2.0 (annotated)
/// day 3  Merge branch 'topic'
/// day 4  feat!: drop legacy api
/// ```
pub fn repo_with_history() -> (TempDir, GitRepo) {
    let temp = TempDir::new().unwrap();
    let repo = Repository::init(temp.path()).unwrap();

    let first = commit(&repo, "chore: initial commit", 0);
    repo.tag_lightweight("v0.1.0", &repo.find_object(first, None).unwrap(), false)
        .unwrap();

    commit(&repo, "feat: add parser\n\nthe parser has a body", 1);
    let third = commit(&repo, "fix(lexer): handle CRLF\n\nCloses #7", 2);
    let sig = Signature::new("Test", "test@example.com", &Time::new(START + 2 * DAY, 0)).unwrap();
    repo.tag(
        "v0.2.0",
        &repo.find_object(third, None).unwrap(),
        &sig,
        "release 0.2.0",
        false,
    )
    .unwrap();

    commit(&repo, "Merge branch 'topic'", 3);
    commit(&repo, "feat!: drop legacy api", 4);

    let git_repo = GitRepo::open(temp.path()).unwrap();
    (temp, git_repo)
}
