use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, ShowcaseError};
use crate::model::{next_record_id, RecordId, ServiceDraft, ServiceProduct};
use crate::query::{self, AdminSort, Selection, ServiceQuery};
use crate::store::DataStore;
use chrono::Utc;

/// Every service, ordered for the admin table.
pub fn list<S: DataStore>(store: &S, sort: &AdminSort) -> Result<CmdResult> {
    let services = store.load_services()?;
    Ok(CmdResult::default().with_listed_services(query::admin_services(&services, sort)))
}

/// Live services matching `query`, in storefront order.
pub fn storefront<S: DataStore>(store: &S, query: &ServiceQuery) -> Result<CmdResult> {
    let services = store.load_services()?;
    Ok(CmdResult::default().with_listed_services(query::storefront_services(&services, query)))
}

pub fn get<S: DataStore>(store: &S, id: RecordId) -> Result<ServiceProduct> {
    store
        .load_services()?
        .into_iter()
        .find(|s| s.id == id)
        .ok_or(ShowcaseError::NotFound(id))
}

fn validate(draft: &ServiceDraft) -> Result<()> {
    if draft.title.trim().is_empty() {
        return Err(ShowcaseError::Validation(
            "Service title is required".to_string(),
        ));
    }
    if draft.icon.trim().is_empty() {
        return Err(ShowcaseError::Validation("Service icon is required".to_string()));
    }
    Ok(())
}

/// Create (`id == None`) or update a service from a draft.
///
/// New services get a fresh id and are appended with `sort_order` equal to the
/// collection length. Updates replace every editable field and keep `id`,
/// `created_at`, `sort_order` and `deleted_at`.
pub fn save<S: DataStore>(
    store: &mut S,
    draft: ServiceDraft,
    id: Option<RecordId>,
) -> Result<CmdResult> {
    validate(&draft)?;
    let mut services = store.load_services()?;
    let mut result = CmdResult::default();

    let saved = match id {
        Some(id) => {
            let existing = services
                .iter_mut()
                .find(|s| s.id == id)
                .ok_or(ShowcaseError::NotFound(id))?;
            existing.apply_draft(draft);
            result.add_message(CmdMessage::success(format!(
                "Service updated: {}",
                existing.title
            )));
            existing.clone()
        }
        None => {
            let id = next_record_id(services.iter().map(|s| s.id));
            let product = ServiceProduct::from_draft(id, services.len() as i64, draft);
            result.add_message(CmdMessage::success(format!(
                "Service created: {}",
                product.title
            )));
            services.push(product.clone());
            product
        }
    };

    store.save_services(&services)?;
    result.affected_services.push(saved);
    Ok(result)
}

/// Permanently remove services. Unknown ids are reported, not fatal.
pub fn delete<S: DataStore>(store: &mut S, ids: &[RecordId]) -> Result<CmdResult> {
    let services = store.load_services()?;
    let mut result = CmdResult::default();

    let (removed, kept): (Vec<ServiceProduct>, Vec<ServiceProduct>) =
        services.into_iter().partition(|s| ids.contains(&s.id));

    for id in ids {
        if !removed.iter().any(|s| s.id == *id) {
            result.add_message(CmdMessage::warning(format!("No service with id {}", id)));
        }
    }

    if !removed.is_empty() {
        store.save_services(&kept)?;
        result.add_message(CmdMessage::success(format!(
            "Deleted {} service(s)",
            removed.len()
        )));
    }
    result.affected_services = removed;
    Ok(result)
}

fn update_each<S, F>(store: &mut S, ids: &[RecordId], verb: &str, mut change: F) -> Result<CmdResult>
where
    S: DataStore,
    F: FnMut(&mut ServiceProduct),
{
    let mut services = store.load_services()?;
    let mut result = CmdResult::default();

    for id in ids {
        match services.iter_mut().find(|s| s.id == *id) {
            Some(service) => {
                change(service);
                result.add_message(CmdMessage::success(format!(
                    "Service {}: {}",
                    verb, service.title
                )));
                result.affected_services.push(service.clone());
            }
            None => {
                result.add_message(CmdMessage::warning(format!("No service with id {}", id)));
            }
        }
    }

    if !result.affected_services.is_empty() {
        store.save_services(&services)?;
    }
    Ok(result)
}

/// Bulk publish or unpublish.
pub fn set_published<S: DataStore>(
    store: &mut S,
    ids: &[RecordId],
    published: bool,
) -> Result<CmdResult> {
    let verb = if published { "published" } else { "unpublished" };
    update_each(store, ids, verb, |s| s.is_published = published)
}

pub fn toggle_published<S: DataStore>(store: &mut S, id: RecordId) -> Result<CmdResult> {
    let current = get(store, id)?;
    set_published(store, &[id], !current.is_published)
}

/// Soft delete: hidden from the storefront, still listed in the admin table.
pub fn retire<S: DataStore>(store: &mut S, ids: &[RecordId]) -> Result<CmdResult> {
    update_each(store, ids, "retired", |s| {
        let now = Utc::now();
        s.deleted_at = Some(now);
        s.updated_at = now;
    })
}

pub fn restore<S: DataStore>(store: &mut S, ids: &[RecordId]) -> Result<CmdResult> {
    update_each(store, ids, "restored", |s| {
        s.deleted_at = None;
        s.updated_at = Utc::now();
    })
}

/// Admin actions that run over the bulk selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkAction {
    Publish,
    Unpublish,
    Retire,
    Restore,
    Delete,
}

/// Select every service, or clear the selection when all of them are already selected.
pub fn toggle_select_all<S: DataStore>(store: &S, selection: &mut Selection) -> Result<()> {
    let ids: Vec<RecordId> = store.load_services()?.iter().map(|s| s.id).collect();
    selection.toggle_all(&ids);
    Ok(())
}

/// Run `action` over every selected service. The selection is cleared once the
/// action has been applied.
pub fn apply_to_selection<S: DataStore>(
    store: &mut S,
    selection: &mut Selection,
    action: BulkAction,
) -> Result<CmdResult> {
    if selection.is_empty() {
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::info("No services selected"));
        return Ok(result);
    }

    let ids = selection.ids();
    let result = match action {
        BulkAction::Publish => set_published(store, &ids, true)?,
        BulkAction::Unpublish => set_published(store, &ids, false)?,
        BulkAction::Retire => retire(store, &ids)?,
        BulkAction::Restore => restore(store, &ids)?,
        BulkAction::Delete => delete(store, &ids)?,
    };
    selection.clear();
    Ok(result)
}
