use serde::Serialize;

use crate::models::{BookingDraft, Catalog, OTHERS_ID};

/// A selected service resolved for display and billing. The free-text
/// "Others" option is its own variant instead of a magic catalog id, so a
/// miss on lookup can only mean a genuinely unknown id.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SelectedService {
    Listed {
        id: &'static str,
        name: &'static str,
        price: i64,
    },
    Custom {
        description: String,
    },
}

impl SelectedService {
    pub fn name(&self) -> &str {
        match self {
            SelectedService::Listed { name, .. } => name,
            SelectedService::Custom { .. } => "Others",
        }
    }

    /// Custom work is quoted on request and contributes nothing here.
    pub fn price(&self) -> i64 {
        match self {
            SelectedService::Listed { price, .. } => *price,
            SelectedService::Custom { .. } => 0,
        }
    }
}

/// Sum of catalog prices over the selection. Ids that don't resolve
/// (including the reserved "others" key) contribute zero.
pub fn compute_total(draft: &BookingDraft, catalog: &Catalog) -> i64 {
    draft
        .selected_services
        .iter()
        .filter_map(|id| catalog.lookup(id))
        .map(|svc| svc.price)
        .sum()
}

/// Expands the selection into display entries, in catalog declaration
/// order regardless of the order boxes were ticked. The "Others" entry,
/// when selected, always comes last and carries the problem description.
/// Unknown ids are dropped.
pub fn resolve_selected(draft: &BookingDraft, catalog: &Catalog) -> Vec<SelectedService> {
    let mut resolved: Vec<SelectedService> = catalog
        .services()
        .iter()
        .filter(|svc| draft.has_service(svc.id))
        .map(|svc| SelectedService::Listed {
            id: svc.id,
            name: svc.name,
            price: svc.price,
        })
        .collect();

    if draft.has_service(OTHERS_ID) {
        resolved.push(SelectedService::Custom {
            description: draft.custom_problem.clone(),
        });
    }

    resolved
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft_with(services: &[&str]) -> BookingDraft {
        BookingDraft {
            selected_services: services.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_total_for_tyre_and_battery() {
        let catalog = Catalog::standard();
        let draft = draft_with(&["tyre", "battery"]);
        assert_eq!(compute_total(&draft, &catalog), 498);
    }

    #[test]
    fn test_total_independent_of_selection_order() {
        let catalog = Catalog::standard();
        let forward = draft_with(&["general", "engine", "wash"]);
        let backward = draft_with(&["wash", "engine", "general"]);
        assert_eq!(
            compute_total(&forward, &catalog),
            compute_total(&backward, &catalog)
        );
        assert_eq!(compute_total(&forward, &catalog), 499 + 999 + 149);
    }

    #[test]
    fn test_others_and_unknown_ids_contribute_zero() {
        let catalog = Catalog::standard();
        let draft = draft_with(&["others", "not-a-service", "tyre"]);
        assert_eq!(compute_total(&draft, &catalog), 199);
    }

    #[test]
    fn test_empty_selection_totals_zero() {
        let catalog = Catalog::standard();
        assert_eq!(compute_total(&draft_with(&[]), &catalog), 0);
        assert!(resolve_selected(&draft_with(&[]), &catalog).is_empty());
    }

    #[test]
    fn test_resolution_follows_catalog_order() {
        let catalog = Catalog::standard();
        // Ticked in reverse of catalog order.
        let draft = draft_with(&["wash", "battery", "general"]);
        let resolved = resolve_selected(&draft, &catalog);
        let names: Vec<&str> = resolved.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["General Service", "Battery Service", "Wash & Clean"]);
    }

    #[test]
    fn test_others_resolves_last_with_description() {
        let catalog = Catalog::standard();
        let mut draft = draft_with(&["others", "wash"]);
        draft.custom_problem = "loose chain".to_string();

        let resolved = resolve_selected(&draft, &catalog);
        assert_eq!(resolved.len(), 2);
        assert_eq!(
            resolved[0],
            SelectedService::Listed {
                id: "wash",
                name: "Wash & Clean",
                price: 149
            }
        );
        assert_eq!(
            resolved[1],
            SelectedService::Custom {
                description: "loose chain".to_string()
            }
        );
        assert_eq!(resolved[1].price(), 0);
        assert_eq!(compute_total(&draft, &catalog), 149);
    }

    #[test]
    fn test_unknown_ids_dropped_from_resolution() {
        let catalog = Catalog::standard();
        let draft = draft_with(&["tyre", "hovercraft"]);
        let resolved = resolve_selected(&draft, &catalog);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].name(), "Tyre Service");
    }
}
