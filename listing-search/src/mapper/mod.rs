//! Maps catalog listings to search documents.
//!
//! The mapping is a pure function with no I/O. It is only ever invoked on
//! listings already known to be published, so `published` is set
//! unconditionally; translation blobs pass through verbatim and are parsed
//! lazily by consumers at read time.

use listing_search_shared::{GeoPoint, ListingDocument};

use crate::catalog::CatalogListing;

/// Convert a catalog listing into its index-resident projection.
///
/// Rules:
/// - `id` is the string form of the listing's UUID;
/// - translation blobs are copied verbatim, never re-encoded or validated;
/// - `address` is the composite `"{street}, {city}"` display string
///   (province and postal code deliberately omitted);
/// - optional contact fields default to empty strings, never null.
pub fn map_to_document(listing: &CatalogListing) -> ListingDocument {
    ListingDocument {
        id: listing.id.to_string(),
        name_translations: listing.name_translations.clone(),
        description_translations: listing.description_translations.clone(),
        category_id: listing.category_id.to_string(),
        category_name: listing.category_name.clone(),
        city: listing.address.city.clone(),
        province: listing.address.province.clone(),
        address: format!("{}, {}", listing.address.street, listing.address.city),
        location: GeoPoint::new(listing.address.latitude, listing.address.longitude),
        phone: listing.phone.clone().unwrap_or_default(),
        email: listing.email.clone().unwrap_or_default(),
        website: listing.website.clone().unwrap_or_default(),
        tags: listing.tags.clone(),
        published: true,
        created_at: listing.created_at,
        updated_at: listing.updated_at,
        published_at: listing.published_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogAddress;
    use chrono::Utc;
    use uuid::Uuid;

    fn sample_listing() -> CatalogListing {
        CatalogListing {
            id: Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap(),
            name_translations: r#"{"en":"Mama's Kitchen"}"#.to_string(),
            description_translations: "definitely-not-json".to_string(),
            category_id: Uuid::parse_str("6ba7b810-9dad-11d1-80b4-00c04fd430c8").unwrap(),
            category_name: "food".to_string(),
            address: CatalogAddress {
                street: "12 King St".to_string(),
                city: "Toronto".to_string(),
                province: "Ontario".to_string(),
                postal_code: "M5H 1A1".to_string(),
                country: "Canada".to_string(),
                latitude: 43.65,
                longitude: -79.38,
            },
            phone: None,
            email: Some("hello@example.com".to_string()),
            website: None,
            tags: vec!["jollof".to_string()],
            created_at: Utc::now(),
            updated_at: Utc::now(),
            published_at: Some(Utc::now()),
        }
    }

    #[test]
    fn test_id_is_string_form_of_uuid() {
        let document = map_to_document(&sample_listing());
        assert_eq!(document.id, "550e8400-e29b-41d4-a716-446655440000");
        assert_eq!(document.category_id, "6ba7b810-9dad-11d1-80b4-00c04fd430c8");
    }

    #[test]
    fn test_composite_address_omits_province() {
        let document = map_to_document(&sample_listing());
        assert_eq!(document.address, "12 King St, Toronto");
    }

    #[test]
    fn test_location_from_address_coordinates() {
        let document = map_to_document(&sample_listing());
        assert_eq!(document.location, GeoPoint::new(43.65, -79.38));
    }

    #[test]
    fn test_missing_contacts_become_empty_strings() {
        let document = map_to_document(&sample_listing());
        assert_eq!(document.phone, "");
        assert_eq!(document.website, "");
        assert_eq!(document.email, "hello@example.com");
    }

    #[test]
    fn test_published_set_unconditionally() {
        let mut listing = sample_listing();
        listing.published_at = None;

        let document = map_to_document(&listing);
        assert!(document.published);
        assert!(document.published_at.is_none());
    }

    #[test]
    fn test_translation_blobs_pass_through_verbatim() {
        let document = map_to_document(&sample_listing());
        // Even a malformed blob is carried untouched; consumers handle it
        // at read time.
        assert_eq!(document.name_translations, r#"{"en":"Mama's Kitchen"}"#);
        assert_eq!(document.description_translations, "definitely-not-json");
    }

    #[test]
    fn test_mapping_is_deterministic() {
        let listing = sample_listing();
        assert_eq!(map_to_document(&listing), map_to_document(&listing));
    }
}
