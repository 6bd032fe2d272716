use waypoint_types::WorkspaceId;

/// Path of a workspace under `prefix`, joined with exactly one `/`.
#[must_use]
pub fn workspace_route(prefix: &str, id: &WorkspaceId) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        format!("/{id}")
    } else {
        format!("/{trimmed}/{id}")
    }
}
