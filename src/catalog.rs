//! Catalog data model and category filtering.
//!
//! The catalog arrives as already-fetched JSON (see [`crate::source`]); this
//! module only describes its shape and reduces it to the renderable subset.

use serde::Deserialize;

/// Item categories that get a card in the shop image. Everything else
/// (music packs, loading screens, bundles-of-currency, ...) is dropped.
pub const ALLOWED_TYPES: [&str; 6] = ["outfit", "pickaxe", "emote", "wrap", "glider", "backbling"];

/// One purchasable entry in the shop feed, possibly bundling several
/// granted sub-items. Immutable input to the renderer.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub main_type: String,
    #[serde(default)]
    pub rarity: Option<Tag>,
    #[serde(default)]
    pub series: Option<Tag>,
    #[serde(default)]
    pub price: Price,
    #[serde(default)]
    pub granted: Vec<GrantedItem>,
    #[serde(default)]
    pub display_assets: Vec<DisplayAsset>,
    /// Opaque, externally supplied ordering weight. The feed computes this
    /// upstream; the renderer only uses it as the primary sort key.
    #[serde(default)]
    pub sort_priority: i64,
}

impl ShopItem {
    pub fn is_bundle(&self) -> bool {
        self.main_type == "bundle"
    }

    /// Series id of the item itself, else of its first granted sub-item.
    pub fn series_id(&self) -> Option<&str> {
        self.series
            .as_ref()
            .or_else(|| self.granted.first().and_then(|g| g.series.as_ref()))
            .map(|t| t.id.as_str())
    }

    /// Rarity id of the item itself, else of its first granted sub-item.
    pub fn rarity_id(&self) -> Option<&str> {
        self.rarity
            .as_ref()
            .or_else(|| self.granted.first().and_then(|g| g.rarity.as_ref()))
            .map(|t| t.id.as_str())
    }

    /// URL of the primary display asset, else the first granted icon.
    pub fn icon_url(&self) -> Option<&str> {
        self.display_assets
            .first()
            .map(|a| a.url.as_str())
            .filter(|u| !u.is_empty())
            .or_else(|| self.granted.first().and_then(|g| g.icon_url()))
    }
}

/// A rarity or series tag. Only the id matters for rendering.
#[derive(Debug, Clone, Deserialize)]
pub struct Tag {
    #[serde(default)]
    pub id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    #[serde(default)]
    pub final_price: u32,
}

/// A sub-item granted by a catalog entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GrantedItem {
    #[serde(default)]
    pub rarity: Option<Tag>,
    #[serde(default)]
    pub series: Option<Tag>,
    #[serde(default)]
    pub images: Option<GrantedImages>,
}

impl GrantedItem {
    pub fn icon_url(&self) -> Option<&str> {
        self.images
            .as_ref()
            .and_then(|i| i.icon.as_deref())
            .filter(|u| !u.is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GrantedImages {
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisplayAsset {
    #[serde(default)]
    pub url: String,
}

/// Top-level fetch payload: the item list plus the catalog date.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopCatalog {
    #[serde(default)]
    pub shop: Vec<ShopItem>,
    pub last_update: LastUpdate,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LastUpdate {
    pub date: String,
}

/// Keep only the item categories that get a card. Order-preserving.
///
/// Precondition: the caller has already rejected an empty catalog
/// (`Error::CatalogData`); an empty result here simply yields an empty list.
pub fn filter_items(items: Vec<ShopItem>) -> Vec<ShopItem> {
    items
        .into_iter()
        .filter(|item| ALLOWED_TYPES.contains(&item.main_type.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, main_type: &str) -> ShopItem {
        serde_json::from_value(serde_json::json!({
            "id": name,
            "displayName": name,
            "mainType": main_type,
        }))
        .unwrap()
    }

    #[test]
    fn filter_keeps_allowed_types_in_order() {
        let items = vec![
            item("a", "outfit"),
            item("b", "music"),
            item("c", "emote"),
            item("d", "loadingscreen"),
            item("e", "backbling"),
        ];
        let kept = filter_items(items);
        let names: Vec<_> = kept.iter().map(|i| i.display_name.as_str()).collect();
        assert_eq!(names, vec!["a", "c", "e"]);
    }

    #[test]
    fn filter_of_empty_is_empty() {
        assert!(filter_items(Vec::new()).is_empty());
    }

    #[test]
    fn parses_catalog_payload() {
        let json = r#"{
            "shop": [{
                "id": "itm-1",
                "displayName": "Renegade",
                "mainType": "outfit",
                "rarity": {"id": "Rare"},
                "price": {"finalPrice": 1200},
                "granted": [{"rarity": {"id": "Rare"}, "images": {"icon": "http://x/icon.png"}}],
                "displayAssets": [{"url": "http://x/featured.png"}],
                "sortPriority": 7
            }],
            "lastUpdate": {"date": "2024-03-01 00:00:00"}
        }"#;
        let catalog: ShopCatalog = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.shop.len(), 1);
        let it = &catalog.shop[0];
        assert_eq!(it.display_name, "Renegade");
        assert_eq!(it.rarity_id(), Some("Rare"));
        assert_eq!(it.series_id(), None);
        assert_eq!(it.price.final_price, 1200);
        assert_eq!(it.icon_url(), Some("http://x/featured.png"));
        assert_eq!(it.sort_priority, 7);
        assert_eq!(catalog.last_update.date, "2024-03-01 00:00:00");
    }

    #[test]
    fn icon_url_falls_back_to_granted_icon() {
        let it: ShopItem = serde_json::from_value(serde_json::json!({
            "mainType": "outfit",
            "granted": [{"images": {"icon": "http://x/granted.png"}}]
        }))
        .unwrap();
        assert_eq!(it.icon_url(), Some("http://x/granted.png"));
    }

    #[test]
    fn rarity_falls_back_to_first_granted() {
        let it: ShopItem = serde_json::from_value(serde_json::json!({
            "mainType": "pickaxe",
            "granted": [{"rarity": {"id": "Epic"}}]
        }))
        .unwrap();
        assert_eq!(it.rarity_id(), Some("Epic"));
    }
}
