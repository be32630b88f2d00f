use serde::Serialize;

/// Reserved selection key for the free-text "Others" option. It never
/// appears as a real catalog id; pricing treats it as zero.
pub const OTHERS_ID: &str = "others";

#[derive(Debug, Clone, Serialize)]
pub struct ServiceDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub price: i64,
}

/// The fixed, ordered list of offered services. Built once at startup and
/// never mutated; declaration order governs display order everywhere.
#[derive(Debug, Clone)]
pub struct Catalog {
    services: Vec<ServiceDefinition>,
}

impl Catalog {
    pub fn standard() -> Self {
        Self {
            services: vec![
                ServiceDefinition {
                    id: "general",
                    name: "General Service",
                    description: "Oil change, filter cleaning & checkup",
                    icon: "🔧",
                    price: 499,
                },
                ServiceDefinition {
                    id: "tyre",
                    name: "Tyre Service",
                    description: "Puncture repair & replacement",
                    icon: "🛞",
                    price: 199,
                },
                ServiceDefinition {
                    id: "battery",
                    name: "Battery Service",
                    description: "Battery check & replacement",
                    icon: "🔋",
                    price: 299,
                },
                ServiceDefinition {
                    id: "brake",
                    name: "Brake Service",
                    description: "Brake pad & fluid service",
                    icon: "🛑",
                    price: 199,
                },
                ServiceDefinition {
                    id: "engine",
                    name: "Engine Repair",
                    description: "Engine tuning & repair",
                    icon: "⚙️",
                    price: 999,
                },
                ServiceDefinition {
                    id: "wash",
                    name: "Wash & Clean",
                    description: "Complete wash & polish",
                    icon: "🚿",
                    price: 149,
                },
            ],
        }
    }

    pub fn services(&self) -> &[ServiceDefinition] {
        &self.services
    }

    pub fn lookup(&self, id: &str) -> Option<&ServiceDefinition> {
        self.services.iter().find(|s| s.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let catalog = Catalog::standard();
        for (i, a) in catalog.services().iter().enumerate() {
            for b in catalog.services().iter().skip(i + 1) {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn test_reserved_key_not_in_catalog() {
        let catalog = Catalog::standard();
        assert!(catalog.lookup(OTHERS_ID).is_none());
    }

    #[test]
    fn test_lookup() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.lookup("tyre").unwrap().price, 199);
        assert_eq!(catalog.lookup("engine").unwrap().price, 999);
        assert!(catalog.lookup("nonexistent").is_none());
    }

    #[test]
    fn test_prices_non_negative() {
        for svc in Catalog::standard().services() {
            assert!(svc.price >= 0);
        }
    }
}
