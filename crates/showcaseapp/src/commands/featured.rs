use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, ShowcaseError};
use crate::model::{next_record_id, FeaturedContent, FeaturedDraft, RecordId, ServiceProduct};
use crate::query;
use crate::store::DataStore;

/// Every featured entry in stored order.
pub fn list<S: DataStore>(store: &S) -> Result<CmdResult> {
    Ok(CmdResult::default().with_listed_featured(store.load_featured()?))
}

/// Live featured entries in storefront order.
pub fn storefront<S: DataStore>(store: &S) -> Result<CmdResult> {
    let featured = store.load_featured()?;
    Ok(CmdResult::default().with_listed_featured(query::storefront_featured(&featured)))
}

pub fn get<S: DataStore>(store: &S, id: RecordId) -> Result<FeaturedContent> {
    store
        .load_featured()?
        .into_iter()
        .find(|f| f.id == id)
        .ok_or(ShowcaseError::NotFound(id))
}

/// Services a featured entry links to, in catalog order. Dangling ids are skipped.
pub fn recommended<S: DataStore>(store: &S, item: &FeaturedContent) -> Result<Vec<ServiceProduct>> {
    let services = store.load_services()?;
    Ok(query::recommended_services(item, &services)
        .into_iter()
        .cloned()
        .collect())
}

fn validate(draft: &FeaturedDraft, max_recommended: usize) -> Result<()> {
    if draft.title.trim().is_empty()
        || draft.description.trim().is_empty()
        || draft.image.trim().is_empty()
    {
        return Err(ShowcaseError::Validation(
            "Featured entries need a title, a description and a cover image".to_string(),
        ));
    }
    if draft.recommended_services.len() > max_recommended {
        return Err(ShowcaseError::Validation(format!(
            "At most {} recommended services are allowed",
            max_recommended
        )));
    }
    Ok(())
}

/// Create (`id == None`) or update a featured entry. Same identity rules as services.
pub fn save<S: DataStore>(
    store: &mut S,
    draft: FeaturedDraft,
    id: Option<RecordId>,
    max_recommended: usize,
) -> Result<CmdResult> {
    validate(&draft, max_recommended)?;
    let mut featured = store.load_featured()?;
    let mut result = CmdResult::default();

    let saved = match id {
        Some(id) => {
            let existing = featured
                .iter_mut()
                .find(|f| f.id == id)
                .ok_or(ShowcaseError::NotFound(id))?;
            existing.apply_draft(draft);
            result.add_message(CmdMessage::success(format!(
                "Featured entry updated: {}",
                existing.title
            )));
            existing.clone()
        }
        None => {
            let id = next_record_id(featured.iter().map(|f| f.id));
            let item = FeaturedContent::from_draft(id, featured.len() as i64, draft);
            result.add_message(CmdMessage::success(format!(
                "Featured entry created: {}",
                item.title
            )));
            featured.push(item.clone());
            item
        }
    };

    store.save_featured(&featured)?;
    result.affected_featured.push(saved);
    Ok(result)
}

pub fn delete<S: DataStore>(store: &mut S, id: RecordId) -> Result<CmdResult> {
    let featured = store.load_featured()?;
    let (removed, kept): (Vec<FeaturedContent>, Vec<FeaturedContent>) =
        featured.into_iter().partition(|f| f.id == id);
    if removed.is_empty() {
        return Err(ShowcaseError::NotFound(id));
    }
    store.save_featured(&kept)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Featured entry deleted: {}",
        removed[0].title
    )));
    result.affected_featured = removed;
    Ok(result)
}

/// Add or remove a service from a draft's recommendations.
///
/// Returns whether the service is recommended afterwards. Adding past the cap is a
/// validation error and leaves the draft untouched.
pub fn toggle_recommended(
    draft: &mut FeaturedDraft,
    service_id: RecordId,
    max_recommended: usize,
) -> Result<bool> {
    if let Some(pos) = draft
        .recommended_services
        .iter()
        .position(|id| *id == service_id)
    {
        draft.recommended_services.remove(pos);
        return Ok(false);
    }
    if draft.recommended_services.len() >= max_recommended {
        return Err(ShowcaseError::Validation(format!(
            "At most {} recommended services are allowed",
            max_recommended
        )));
    }
    draft.recommended_services.push(service_id);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    const CAP: usize = 5;

    fn draft(title: &str) -> FeaturedDraft {
        FeaturedDraft::new(title, "<p>Body</p>", "pic/banners/a.jpg")
    }

    #[test]
    fn create_and_update() {
        let mut store = InMemoryStore::new();
        let created = save(&mut store, draft("Spring"), None, CAP).unwrap();
        let id = created.affected_featured[0].id;
        assert_eq!(created.affected_featured[0].sort_order, 0);
        assert!(created.affected_featured[0].images.is_empty());

        let mut edit = get(&store, id).unwrap().to_draft();
        edit.title = "Summer".into();
        save(&mut store, edit, Some(id), CAP).unwrap();
        let item = get(&store, id).unwrap();
        assert_eq!(item.title, "Summer");
        assert_eq!(store.load_featured().unwrap().len(), 1);
    }

    #[test]
    fn incomplete_draft_is_rejected() {
        let mut store = InMemoryStore::new();
        let no_image = FeaturedDraft::new("T", "<p/>", "");
        assert!(matches!(
            save(&mut store, no_image, None, CAP),
            Err(ShowcaseError::Validation(_))
        ));
        let no_body = FeaturedDraft::new("T", "", "pic/a.png");
        assert!(save(&mut store, no_body, None, CAP).is_err());
        assert!(store.load_featured().unwrap().is_empty());
    }

    #[test]
    fn too_many_recommendations_are_rejected() {
        let mut store = InMemoryStore::new();
        let mut d = draft("Busy");
        d.recommended_services = vec![1, 2, 3, 4, 5, 6];
        let err = save(&mut store, d, None, CAP).unwrap_err();
        assert!(err.to_string().contains("At most 5"));
    }

    #[test]
    fn toggle_recommended_honours_cap() {
        let mut d = draft("Pick");
        for id in 1..=5 {
            assert!(toggle_recommended(&mut d, id, CAP).unwrap());
        }
        assert!(toggle_recommended(&mut d, 6, CAP).is_err());
        assert_eq!(d.recommended_services.len(), 5);

        assert!(!toggle_recommended(&mut d, 3, CAP).unwrap());
        assert_eq!(d.recommended_services, vec![1, 2, 4, 5]);
        assert!(toggle_recommended(&mut d, 6, CAP).unwrap());
    }

    #[test]
    fn delete_removes_entry() {
        let mut store = StoreFixture::new()
            .with_featured("A", vec![])
            .with_featured("B", vec![])
            .store;
        delete(&mut store, 101).unwrap();
        let left: Vec<i64> = store.load_featured().unwrap().iter().map(|f| f.id).collect();
        assert_eq!(left, vec![102]);
        assert!(matches!(
            delete(&mut store, 101),
            Err(ShowcaseError::NotFound(101))
        ));
    }

    #[test]
    fn recommended_follows_catalog_order_and_skips_dangling() {
        let store = StoreFixture::new()
            .with_service("One", "Workspace")
            .with_service("Two", "Workspace")
            .with_featured("F", vec![2, 77, 1])
            .store;
        let item = get(&store, 101).unwrap();
        let titles: Vec<String> = recommended(&store, &item)
            .unwrap()
            .into_iter()
            .map(|s| s.title)
            .collect();
        assert_eq!(titles, vec!["One", "Two"]);
    }

    #[test]
    fn storefront_lists_only_live_entries() {
        let mut store = StoreFixture::new()
            .with_featured("A", vec![])
            .with_featured("B", vec![])
            .store;
        let mut hidden = get(&store, 102).unwrap().to_draft();
        hidden.is_published = false;
        save(&mut store, hidden, Some(102), CAP).unwrap();

        assert_eq!(storefront(&store).unwrap().listed_featured.len(), 1);
        assert_eq!(list(&store).unwrap().listed_featured.len(), 2);
    }
}
