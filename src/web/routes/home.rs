use axum::{extract::State, response::Html};

use crate::{
    web::{
        types::{Notice, PageState},
        WebResult,
    },
    AppState,
};

pub async fn home(State(app_state): State<AppState>) -> WebResult<Html<String>> {
    render_home(&app_state, PageState::Form, None)
}

pub(super) fn render_home(
    app_state: &AppState,
    page_state: PageState,
    notice: Option<&Notice>,
) -> WebResult<Html<String>> {
    let body = app_state
        .templ_mgr
        .render_home(&app_state.site.product_name, page_state, notice)?;

    Ok(Html(body))
}
