//! The static service catalog.
//!
//! Entries are seed data compiled into the binary. Prices snapshot into
//! service lines at selection time, so editing this table only affects work
//! orders created after the redeploy.

use models_preservation::catalog::{ServiceCategory, ServiceDefinition, ServiceFrequency};
use rust_decimal_macros::dec;

pub static CATALOG: &[ServiceDefinition] = &[
    ServiceDefinition {
        id: "lawn_mowing",
        name: "Lawn Mowing & Maintenance",
        category: ServiceCategory::LawnCare,
        description: "Regular lawn cutting, edging, and grass removal",
        base_price: dec!(100),
        unit: "per visit",
        frequency: ServiceFrequency::Monthly,
    },
    ServiceDefinition {
        id: "lawn_cleanup",
        name: "Lawn Debris Cleanup",
        category: ServiceCategory::LawnCare,
        description: "Removal of leaves, branches, and yard waste",
        base_price: dec!(75),
        unit: "per visit",
        frequency: ServiceFrequency::AsNeeded,
    },
    ServiceDefinition {
        id: "exterior_cleaning",
        name: "Exterior Property Cleaning",
        category: ServiceCategory::Cleaning,
        description: "Sweep walkways, remove cobwebs, clean gutters",
        base_price: dec!(200),
        unit: "per visit",
        frequency: ServiceFrequency::Monthly,
    },
    ServiceDefinition {
        id: "pressure_washing",
        name: "Pressure Washing",
        category: ServiceCategory::Cleaning,
        description: "Driveway, walkways, siding, and exterior surfaces",
        base_price: dec!(300),
        unit: "per visit",
        frequency: ServiceFrequency::Quarterly,
    },
    ServiceDefinition {
        id: "window_cleaning",
        name: "Window Cleaning (Exterior)",
        category: ServiceCategory::Cleaning,
        description: "Clean all exterior windows and glass doors",
        base_price: dec!(150),
        unit: "per visit",
        frequency: ServiceFrequency::Quarterly,
    },
    ServiceDefinition {
        id: "property_securing",
        name: "Property Securing",
        category: ServiceCategory::Security,
        description: "Install lockboxes, secure doors/windows, change locks",
        base_price: dec!(250),
        unit: "one-time",
        frequency: ServiceFrequency::AsNeeded,
    },
    ServiceDefinition {
        id: "board_up",
        name: "Window/Door Board-Up",
        category: ServiceCategory::Security,
        description: "Board up broken windows or damaged doors",
        base_price: dec!(150),
        unit: "per opening",
        frequency: ServiceFrequency::AsNeeded,
    },
    ServiceDefinition {
        id: "winterization",
        name: "Winterization Service",
        category: ServiceCategory::Seasonal,
        description: "Drain pipes, antifreeze in drains, HVAC shutdown",
        base_price: dec!(350),
        unit: "one-time",
        frequency: ServiceFrequency::Seasonal,
    },
    ServiceDefinition {
        id: "de_winterization",
        name: "De-Winterization Service",
        category: ServiceCategory::Seasonal,
        description: "Restore water, test systems, prepare for occupancy",
        base_price: dec!(300),
        unit: "one-time",
        frequency: ServiceFrequency::Seasonal,
    },
    ServiceDefinition {
        id: "hvac_check",
        name: "HVAC System Check",
        category: ServiceCategory::Inspection,
        description: "Inspect and test heating/cooling systems",
        base_price: dec!(125),
        unit: "per visit",
        frequency: ServiceFrequency::Quarterly,
    },
    ServiceDefinition {
        id: "full_inspection",
        name: "Full Property Inspection",
        category: ServiceCategory::Inspection,
        description: "Complete interior/exterior inspection with photos",
        base_price: dec!(200),
        unit: "per visit",
        frequency: ServiceFrequency::Monthly,
    },
    ServiceDefinition {
        id: "photo_documentation",
        name: "Photo Documentation",
        category: ServiceCategory::Inspection,
        description: "GPS-stamped photos of property condition",
        base_price: dec!(50),
        unit: "per visit",
        frequency: ServiceFrequency::Monthly,
    },
    ServiceDefinition {
        id: "debris_removal",
        name: "Debris & Trash Removal",
        category: ServiceCategory::Maintenance,
        description: "Remove and haul away debris, furniture, trash",
        base_price: dec!(400),
        unit: "per load",
        frequency: ServiceFrequency::AsNeeded,
    },
    ServiceDefinition {
        id: "minor_repairs",
        name: "Minor Repairs",
        category: ServiceCategory::Maintenance,
        description: "Small repairs, patching, touch-up painting",
        base_price: dec!(150),
        unit: "per hour",
        frequency: ServiceFrequency::AsNeeded,
    },
    ServiceDefinition {
        id: "gutter_cleaning",
        name: "Gutter Cleaning",
        category: ServiceCategory::Maintenance,
        description: "Clean gutters and downspouts",
        base_price: dec!(125),
        unit: "per visit",
        frequency: ServiceFrequency::Quarterly,
    },
    ServiceDefinition {
        id: "pest_control",
        name: "Pest Control Treatment",
        category: ServiceCategory::Maintenance,
        description: "Pest inspection and treatment",
        base_price: dec!(175),
        unit: "per visit",
        frequency: ServiceFrequency::Quarterly,
    },
    ServiceDefinition {
        id: "emergency_response",
        name: "Emergency Response",
        category: ServiceCategory::Emergency,
        description: "24/7 emergency response (water, break-in, etc.)",
        base_price: dec!(500),
        unit: "per visit",
        frequency: ServiceFrequency::AsNeeded,
    },
];

/// look up one catalog entry by id
pub fn lookup(service_id: &str) -> Option<&'static ServiceDefinition> {
    CATALOG.iter().find(|service| service.id == service_id)
}

/// every entry in a category, in catalog order
pub fn list_by_category(
    category: ServiceCategory,
) -> impl Iterator<Item = &'static ServiceDefinition> {
    CATALOG
        .iter()
        .filter(move |service| service.category == category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_finds_seeded_services() {
        let lawn = lookup("lawn_mowing").unwrap();
        assert_eq!(lawn.base_price, dec!(100));
        assert_eq!(lawn.frequency, ServiceFrequency::Monthly);

        assert!(lookup("does_not_exist").is_none());
    }

    #[test]
    fn list_by_category_preserves_catalog_order() {
        let cleaning: Vec<_> = list_by_category(ServiceCategory::Cleaning).collect();
        assert_eq!(cleaning.len(), 3);
        assert_eq!(cleaning[0].id, "exterior_cleaning");
        assert_eq!(cleaning[2].id, "window_cleaning");
    }

    #[test]
    fn catalog_ids_are_unique() {
        for (i, service) in CATALOG.iter().enumerate() {
            assert!(
                !CATALOG[i + 1..].iter().any(|other| other.id == service.id),
                "duplicate catalog id {}",
                service.id
            );
        }
    }
}
