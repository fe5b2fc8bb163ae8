use axum::extract::{Extension, Json};

use crate::entities::Theme;
use crate::theme::ThemeStore;

pub async fn find(Extension(theme): Extension<ThemeStore>) -> Json<Theme> {
    theme.current().into()
}

pub async fn toggle(Extension(theme): Extension<ThemeStore>) -> Json<Theme> {
    theme.toggle().into()
}
