// src/state.rs

use std::sync::Arc;

use crate::services::model::TextModel;

#[derive(Clone)]
pub struct AppState {
    pub model: Arc<dyn TextModel>,
}
