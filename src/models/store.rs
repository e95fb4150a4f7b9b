use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{
    area::{Area, AreaFields},
    settings::SiteSettings,
};

/// Current schema version
pub const CURRENT_VERSION: u32 = 2;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Store {
    pub version: u32,
    /// Areas in creation order
    pub areas: Vec<Area>,
    #[serde(default)]
    pub settings: SiteSettings,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            version: CURRENT_VERSION,
            areas: vec![],
            settings: SiteSettings::default(),
        }
    }
}

impl Store {
    pub fn add_area(&mut self, fields: AreaFields) -> &Area {
        let area = Area {
            name: fields.name,
            order: fields.order,
            status: fields.status,
            custom_image: fields.custom_image,
            link_url: fields.link_url,
            ..Area::default()
        };
        self.areas.push(area);
        &self.areas[self.areas.len() - 1]
    }

    pub fn get_area(&self, id: Uuid) -> Option<&Area> {
        self.areas.iter().find(|a| a.id == id)
    }

    /// Replaces every editable field. The area keeps its slot in creation
    /// order so ties on `order` stay where they were.
    pub fn update_area(&mut self, id: Uuid, fields: AreaFields) -> Option<&Area> {
        let area = self.areas.iter_mut().find(|a| a.id == id)?;
        area.name = fields.name;
        area.order = fields.order;
        area.status = fields.status;
        area.custom_image = fields.custom_image;
        area.link_url = fields.link_url;
        area.updated_at = Some(Timestamp::now());
        Some(area)
    }

    pub fn remove_area(&mut self, id: Uuid) -> Option<Area> {
        let index = self.areas.iter().position(|a| a.id == id)?;
        Some(self.areas.remove(index))
    }

    /// All areas ascending by `order`, unset last, ties in creation order
    pub fn ordered_areas(&self) -> Vec<&Area> {
        let mut areas: Vec<&Area> = self.areas.iter().collect();
        areas.sort_by_key(|a| (a.order.is_none(), a.order));
        areas
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(name: &str, order: Option<u32>) -> AreaFields {
        AreaFields {
            name: name.to_string(),
            order,
            ..AreaFields::default()
        }
    }

    fn names(store: &Store) -> Vec<&str> {
        store.ordered_areas().iter().map(|a| a.name.as_str()).collect()
    }

    #[test]
    fn test_ordered_by_ascending_order() {
        let mut store = Store::default();
        store.add_area(fields("Sharjah", Some(3)));
        store.add_area(fields("Dubai", Some(1)));
        store.add_area(fields("Ajman", Some(2)));

        assert_eq!(names(&store), vec!["Dubai", "Ajman", "Sharjah"]);
    }

    #[test]
    fn test_ties_keep_creation_order() {
        let mut store = Store::default();
        store.add_area(fields("Fujairah", Some(1)));
        store.add_area(fields("Dubai", Some(0)));
        store.add_area(fields("Ras Al Khaimah", Some(1)));
        store.add_area(fields("Umm Al Quwain", Some(1)));

        assert_eq!(
            names(&store),
            vec!["Dubai", "Fujairah", "Ras Al Khaimah", "Umm Al Quwain"]
        );
    }

    #[test]
    fn test_unset_order_sorts_last() {
        let mut store = Store::default();
        store.add_area(fields("Al Ain", None));
        store.add_area(fields("Dubai", Some(10)));
        store.add_area(fields("Sharjah", None));
        store.add_area(fields("Abu Dhabi", Some(0)));

        assert_eq!(names(&store), vec!["Abu Dhabi", "Dubai", "Al Ain", "Sharjah"]);
    }

    #[test]
    fn test_update_keeps_creation_slot() {
        let mut store = Store::default();
        let first = store.add_area(fields("Dubai", Some(5))).id;
        store.add_area(fields("Sharjah", Some(1)));

        store.update_area(first, fields("Dubai Marina", Some(1))).unwrap();

        assert_eq!(names(&store), vec!["Dubai Marina", "Sharjah"]);
        assert!(store.get_area(first).unwrap().updated_at.is_some());
    }

    #[test]
    fn test_update_and_remove_unknown_id() {
        let mut store = Store::default();
        let missing = Uuid::new_v4();
        assert!(store.update_area(missing, fields("Dubai", None)).is_none());
        assert!(store.remove_area(missing).is_none());
    }

    #[test]
    fn test_remove_area() {
        let mut store = Store::default();
        let id = store.add_area(fields("Dubai", None)).id;
        store.add_area(fields("Sharjah", None));

        let removed = store.remove_area(id).unwrap();

        assert_eq!(removed.name, "Dubai");
        assert_eq!(names(&store), vec!["Sharjah"]);
    }
}
