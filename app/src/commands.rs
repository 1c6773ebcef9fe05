//! FILENAME: app/src/commands.rs
// PURPOSE: Dashboard commands (grouping, filters, paging, export, detail).
// CONTEXT: Each command locks only the state it needs, one mutex at a time,
// and never calls another command while holding a lock.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use competitor_data::{
    export::save_csv, facets, is_groupable, matches_search, to_records, CompetitorData,
    CompetitorDetail, CompetitorGenerator, TimeRange,
};
use grouping_engine::{collect_group_ids, GroupId, Record};

use crate::api_types::{row_data, RowData, ViewResponse};
use crate::error::DashboardError;
use crate::pagination::is_valid_page_size;
use crate::{log_debug, log_enter, log_info, log_warn, AppState};

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, DashboardError> {
    mutex.lock().map_err(|e| DashboardError::Lock(e.to_string()))
}

/// Rows passing the filter bar and the search box, in dataset order.
fn filtered_rows(state: &AppState) -> Result<Vec<CompetitorData>, DashboardError> {
    let filters = lock(&state.filters)?.clone();
    let query = lock(&state.search)?.clone();
    let dataset = lock(&state.dataset)?;
    Ok(dataset
        .iter()
        .filter(|row| filters.matches(row) && matches_search(row, &query))
        .cloned()
        .collect())
}

fn filtered_records(state: &AppState) -> Result<Vec<Record>, DashboardError> {
    Ok(to_records(&filtered_rows(state)?))
}

fn reset_page(state: &AppState) -> Result<(), DashboardError> {
    lock(&state.pagination)?.page = 1;
    Ok(())
}

fn check_groupable(field: &str) -> Result<(), DashboardError> {
    if is_groupable(field) {
        Ok(())
    } else {
        log_warn!("GROUP", "rejected unknown field {}", field);
        Err(DashboardError::UnknownField(field.to_string()))
    }
}

// ============================================================================
// VIEW
// ============================================================================

/// The current page of the grouped, filtered grid.
pub fn get_view(state: &AppState) -> Result<ViewResponse, DashboardError> {
    log_enter!("CMD", "get_view");

    let rows = filtered_rows(state)?;
    let records = to_records(&rows);
    // records[i] was built from rows[i]; leaves map back by position so duplicate ids stay distinct.
    let position: HashMap<*const Record, usize> = records
        .iter()
        .enumerate()
        .map(|(i, record)| (record as *const Record, i))
        .collect();
    let source_row = |record: &Record| {
        position
            .get(&(record as *const Record))
            .and_then(|&i| rows.get(i))
    };

    let grouping = lock(&state.grouping)?.clone();
    let display = grouping.display(&records);
    let leaf_level = grouping.fields().len();

    let (page_info, range) = {
        let mut pagination = lock(&state.pagination)?;
        let (info, range) = pagination.paginate(display.len());
        pagination.page = info.page;
        (info, range)
    };

    let page_rows: Vec<RowData> = display[range]
        .iter()
        .filter_map(|row| row_data(row, leaf_level, source_row))
        .collect();

    let facets = facets(&lock(&state.dataset)?);
    let filters = lock(&state.filters)?.clone();
    let search = lock(&state.search)?.clone();

    log_debug!(
        "CMD",
        "get_view -> {} of {} display rows, page {}/{}",
        page_rows.len(),
        display.len(),
        page_info.page,
        page_info.total_pages
    );

    Ok(ViewResponse {
        rows: page_rows,
        page_info,
        group_by: grouping.fields().to_vec(),
        total_rows: rows.len(),
        filters,
        search,
        facets,
    })
}

// ============================================================================
// GROUPING
// ============================================================================

/// Appends a grouping level (drop on the group area).
///
/// Returns false when the field is already grouped.
pub fn add_group_field(state: &AppState, field: &str) -> Result<bool, DashboardError> {
    log_enter!("CMD", "add_group_field", "field={}", field);
    check_groupable(field)?;

    // New-level groups come from the whole dataset so groups hidden by a
    // filter are already expanded when the filter is cleared.
    let records = to_records(&lock(&state.dataset)?);
    let added = lock(&state.grouping)?.add_field(field, &records);
    if added {
        reset_page(state)?;
        log_info!("GROUP", "grouped by {}", field);
    }
    Ok(added)
}

/// Removes a grouping level. Returns false when the field was not grouped.
pub fn remove_group_field(state: &AppState, field: &str) -> Result<bool, DashboardError> {
    log_enter!("CMD", "remove_group_field", "field={}", field);
    check_groupable(field)?;

    let removed = lock(&state.grouping)?.remove_field(field);
    if removed {
        reset_page(state)?;
        log_info!("GROUP", "ungrouped {}", field);
    }
    Ok(removed)
}

/// Drops every grouping level.
pub fn clear_grouping(state: &AppState) -> Result<(), DashboardError> {
    log_enter!("CMD", "clear_grouping");
    lock(&state.grouping)?.clear();
    reset_page(state)
}

/// Flips one group. `group_key` is the key sent in `RowData::Group::id`.
///
/// Returns the new state (true = expanded).
pub fn toggle_group(state: &AppState, group_key: &str) -> Result<bool, DashboardError> {
    log_enter!("CMD", "toggle_group", "key={}", group_key);

    let id: GroupId = group_key
        .parse()
        .map_err(|_| DashboardError::UnknownGroup(group_key.to_string()))?;

    let records = filtered_records(state)?;
    let mut grouping = lock(&state.grouping)?;
    if !collect_group_ids(&records, grouping.fields()).contains(&id) {
        log_warn!("GROUP", "toggle of unknown group {}", group_key);
        return Err(DashboardError::UnknownGroup(group_key.to_string()));
    }

    let expanded = grouping.toggle(&id);
    log_debug!("GROUP", "{} -> {}", group_key, if expanded { "expanded" } else { "collapsed" });
    Ok(expanded)
}

pub fn expand_all_groups(state: &AppState) -> Result<(), DashboardError> {
    log_enter!("CMD", "expand_all_groups");
    let records = to_records(&lock(&state.dataset)?);
    lock(&state.grouping)?.expand_all(&records);
    Ok(())
}

pub fn collapse_all_groups(state: &AppState) -> Result<(), DashboardError> {
    log_enter!("CMD", "collapse_all_groups");
    lock(&state.grouping)?.collapse_all();
    reset_page(state)
}

// ============================================================================
// FILTERS, SEARCH, PAGING
// ============================================================================

/// Sets one filter selector. Keys: `location`, `product`, `competitor`,
/// `timeRange`. An empty value or `"all"` clears a selector.
pub fn set_filter(state: &AppState, key: &str, value: &str) -> Result<(), DashboardError> {
    log_enter!("CMD", "set_filter", "{}={}", key, value);

    let selector = match value.trim() {
        "" => None,
        v => Some(v.to_string()),
    };
    {
        let mut filters = lock(&state.filters)?;
        match key {
            "location" => filters.location = selector,
            "product" => filters.product = selector,
            "competitor" => filters.competitor = selector,
            "timeRange" => {
                filters.time_range = value.parse::<TimeRange>().map_err(|_| {
                    DashboardError::InvalidFilter {
                        key: key.to_string(),
                        value: value.to_string(),
                    }
                })?;
            }
            _ => return Err(DashboardError::UnknownField(key.to_string())),
        }
    }
    reset_page(state)
}

pub fn set_search(state: &AppState, query: &str) -> Result<(), DashboardError> {
    log_enter!("CMD", "set_search", "query={:?}", query);
    *lock(&state.search)? = query.to_string();
    reset_page(state)
}

/// Moves to a 1-based page. The next `get_view` clamps it to the last page.
pub fn set_page(state: &AppState, page: usize) -> Result<(), DashboardError> {
    log_enter!("CMD", "set_page", "page={}", page);
    lock(&state.pagination)?.page = page.max(1);
    Ok(())
}

pub fn set_page_size(state: &AppState, size: usize) -> Result<(), DashboardError> {
    log_enter!("CMD", "set_page_size", "size={}", size);
    if !is_valid_page_size(size) {
        return Err(DashboardError::InvalidPageSize(size));
    }
    let mut pagination = lock(&state.pagination)?;
    pagination.page_size = size;
    pagination.page = 1;
    Ok(())
}

// ============================================================================
// EXPORT & DETAIL
// ============================================================================

/// Writes the filtered rows (ungrouped, dataset order) as CSV.
/// Returns the number of rows written.
pub fn export_csv(state: &AppState, path: &Path) -> Result<usize, DashboardError> {
    log_enter!("CMD", "export_csv", "path={}", path.display());

    let rows = filtered_rows(state)?;
    let refs: Vec<&CompetitorData> = rows.iter().collect();
    let count = save_csv(&refs, path)?;

    log_info!("EXPORT", "wrote {} rows to {}", count, path.display());
    Ok(count)
}

/// Detail analytics for one row, trimmed to the selected time range.
pub fn get_competitor_detail(state: &AppState, id: &str) -> Result<CompetitorDetail, DashboardError> {
    log_enter!("CMD", "get_competitor_detail", "id={}", id);

    if !lock(&state.dataset)?.iter().any(|row| row.id == id) {
        return Err(DashboardError::CompetitorNotFound(id.to_string()));
    }
    let time_range = lock(&state.filters)?.time_range;

    let detail = CompetitorGenerator::new(state.seed)
        .detail(id, state.today)
        .within(time_range, state.today);
    Ok(detail)
}
