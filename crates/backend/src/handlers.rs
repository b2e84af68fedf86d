use axum::{
    extract::{Form, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use fluids_core::{
    build_calendar, duplicate_confirmation, duplicate_row, latest_entry, purveyors, timestamp,
    Catalog, LatestEntry, NewEntry, ReferenceLists,
};
use serde::Deserialize;

use crate::auth::authorize_write;
use crate::error::{ApiError, ApiResult};
use crate::sheets::{CATALOG_SHEET, FLUIDS_APPEND_RANGE, FLUIDS_SHEET, LISTS_SHEET};
use crate::AppState;

pub async fn hello() -> &'static str {
    "hello"
}

pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

// Read handlers
pub async fn latest(State(state): State<AppState>) -> ApiResult<Json<LatestEntry>> {
    let rows = state.sheets.read_range(FLUIDS_SHEET).await?;
    Ok(Json(latest_entry(&rows)?))
}

/// One entry per `Catalog` row. Blank rows come back as `null`.
pub async fn list_purveyors(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<Option<String>>>> {
    let rows = state.sheets.read_range(CATALOG_SHEET).await?;
    Ok(Json(purveyors(&rows)))
}

#[derive(Debug, Deserialize)]
pub struct CatalogParams {
    pub venue: Option<String>,
}

/// Items for one venue, or `null` when the venue is unknown.
pub async fn catalog(
    State(state): State<AppState>,
    Query(params): Query<CatalogParams>,
) -> ApiResult<Json<Option<Vec<String>>>> {
    let rows = state.sheets.read_range(CATALOG_SHEET).await?;
    let catalog = Catalog::from_rows(&rows);

    let items = params
        .venue
        .as_deref()
        .and_then(|venue| catalog.items_for(venue))
        .map(<[String]>::to_vec);

    Ok(Json(items))
}

pub async fn lists(State(state): State<AppState>) -> ApiResult<Json<ReferenceLists>> {
    let rows = state.sheets.read_range(LISTS_SHEET).await?;
    Ok(Json(ReferenceLists::from_rows(&rows)))
}

pub async fn calendar(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let rows = state.sheets.read_range(FLUIDS_SHEET).await?;
    let ics = build_calendar(&rows)?;

    Ok((
        [(header::CONTENT_TYPE, "text/calendar; charset=utf-8")],
        ics,
    ))
}

// Write handlers

/// Write parameters, read from the query string and the form body alike.
#[derive(Debug, Default, Deserialize)]
pub struct WriteParams {
    pub passphrase: Option<String>,
    pub purchased: Option<String>,
    pub item: Option<String>,
    pub oz: Option<String>,
    pub vessel: Option<String>,
    pub consumed: Option<String>,
}

impl WriteParams {
    /// Body fields win over query fields. A missing or unreadable body counts
    /// as empty, so the passphrase check still runs.
    fn merge(query: Option<Query<Self>>, form: Option<Form<Self>>) -> Self {
        let query = query.map(|Query(q)| q).unwrap_or_default();
        let form = form.map(|Form(f)| f).unwrap_or_default();

        Self {
            passphrase: form.passphrase.or(query.passphrase),
            purchased: form.purchased.or(query.purchased),
            item: form.item.or(query.item),
            oz: form.oz.or(query.oz),
            vessel: form.vessel.or(query.vessel),
            consumed: form.consumed.or(query.consumed),
        }
    }

    fn into_entry(self) -> ApiResult<NewEntry> {
        fn required(value: Option<String>, name: &str) -> ApiResult<String> {
            value.ok_or_else(|| ApiError::bad_request(format!("missing field `{}`", name)))
        }

        Ok(NewEntry {
            purchased: required(self.purchased, "purchased")?,
            item: required(self.item, "item")?,
            oz: required(self.oz, "oz")?,
            vessel: required(self.vessel, "vessel")?,
            consumed: required(self.consumed, "consumed")?,
        })
    }
}

pub async fn add_entry(
    State(state): State<AppState>,
    query: Option<Query<WriteParams>>,
    form: Option<Form<WriteParams>>,
) -> ApiResult<Json<String>> {
    let mut params = WriteParams::merge(query, form);
    authorize_write(params.passphrase.take().as_deref(), &state.passphrase)?;
    let entry = params.into_entry()?;

    let consumed_at = timestamp::now();
    state
        .sheets
        .append_row(FLUIDS_APPEND_RANGE, entry.to_row(&consumed_at))
        .await?;

    tracing::info!(item = %entry.item, oz = %entry.oz, "Logged new entry");
    Ok(Json(entry.confirmation(&consumed_at)))
}

pub async fn duplicate_latest(
    State(state): State<AppState>,
    query: Option<Query<WriteParams>>,
    form: Option<Form<WriteParams>>,
) -> ApiResult<Json<String>> {
    let params = WriteParams::merge(query, form);
    authorize_write(params.passphrase.as_deref(), &state.passphrase)?;

    let consumed_at = timestamp::now();
    let rows = state.sheets.read_range(FLUIDS_SHEET).await?;
    let row = duplicate_row(&rows, &consumed_at)?;
    let confirmation = duplicate_confirmation(&row);

    state.sheets.append_row(FLUIDS_APPEND_RANGE, row).await?;

    tracing::info!("Duplicated latest entry");
    Ok(Json(confirmation))
}
