use axum::extract::State;

use super::{data, ApiResult, AppState};

/// Nodes and links for the client-side graph. Both arrays are always
/// present, empty when there is no data.
pub async fn tree_data(State(state): State<AppState>) -> ApiResult {
    data(state.db.build_tree()?)
}

pub async fn stats(State(state): State<AppState>) -> ApiResult {
    data(state.db.stats()?)
}
