//! Tag selection against a version constraint
//!
//! Matching is exact: a tag matches when its name, with one leading `v`
//! removed, equals the constraint. Range operators (`^`, `~`, `>=`) are not
//! interpreted. Without a constraint the provider's first tag wins.
//!
//! Replaying a manifest record matches on the parsed tag version instead, so
//! partial tag names such as `v1.2` find their recorded `1.2.0` again.

use crate::domain::{DependencySpec, Tag};
use crate::error::RegistryError;
use crate::manifest::ResolvedDependency;
use crate::registry::TagSource;
use log::info;

/// Fetch tags for a spec and select the one matching its constraint
pub async fn resolve(source: &dyn TagSource, spec: &DependencySpec) -> Result<Tag, RegistryError> {
    let tags = source.fetch_tags(spec).await?;
    let tag = select_tag(&spec.slug(), tags, spec.constraint.as_deref())?;
    info!(
        "resolved {} to tag {} ({})",
        spec,
        tag.name,
        short_hash(&tag.commit_hash)
    );
    Ok(tag)
}

/// Select a tag from an ordered list
pub fn select_tag(
    repo: &str,
    tags: Vec<Tag>,
    constraint: Option<&str>,
) -> Result<Tag, RegistryError> {
    let found = match constraint {
        None => tags.into_iter().next(),
        Some(wanted) => tags.into_iter().find(|tag| tag.matches(wanted)),
    };

    found.ok_or_else(|| RegistryError::no_match(repo, constraint.unwrap_or("latest")))
}

/// Fetch tags for a spec and select the tag a manifest record was resolved to
pub async fn resolve_recorded(
    source: &dyn TagSource,
    spec: &DependencySpec,
    recorded: &ResolvedDependency,
) -> Result<Tag, RegistryError> {
    let tags = source.fetch_tags(spec).await?;
    let tag = select_recorded(&spec.slug(), tags, recorded)?;
    info!(
        "replayed {} as tag {} ({})",
        spec,
        tag.name,
        short_hash(&tag.commit_hash)
    );
    Ok(tag)
}

/// Select the tag whose version equals the recorded one
///
/// Falls back to the tag pointing at the recorded commit.
pub fn select_recorded(
    repo: &str,
    tags: Vec<Tag>,
    recorded: &ResolvedDependency,
) -> Result<Tag, RegistryError> {
    let wanted = semver::Version::parse(&recorded.semver).ok();
    let by_version = wanted.as_ref().and_then(|wanted| {
        tags.iter()
            .position(|tag| tag.semver().is_ok_and(|version| &version == wanted))
    });
    let index = by_version.or_else(|| tags.iter().position(|tag| tag.commit_hash == recorded.hash));

    index
        .map(|i| tags[i].clone())
        .ok_or_else(|| RegistryError::no_match(repo, &recorded.semver))
}

fn short_hash(hash: &str) -> &str {
    hash.get(..7).unwrap_or(hash)
}
