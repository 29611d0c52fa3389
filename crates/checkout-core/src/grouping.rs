//! Partitions shipping options by the seller that offers them.

use indexmap::IndexMap;

use crate::types::ShippingOption;

/// Heading used for options that no seller owns.
pub const PLATFORM_HEADING: &str = "Platform";

/// Grouping key: a specific seller, or the platform-wide bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SellerKey {
    Platform,
    Seller(String),
}

impl SellerKey {
    #[must_use]
    pub fn of(option: &ShippingOption) -> Self {
        match option.seller_id.as_deref() {
            Some(id) if !id.is_empty() => SellerKey::Seller(id.to_owned()),
            _ => SellerKey::Platform,
        }
    }

    #[must_use]
    pub fn seller_id(&self) -> Option<&str> {
        match self {
            SellerKey::Platform => None,
            SellerKey::Seller(id) => Some(id.as_str()),
        }
    }
}

impl std::fmt::Display for SellerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SellerKey::Platform => write!(f, "platform"),
            SellerKey::Seller(id) => write!(f, "{id}"),
        }
    }
}

/// Options offered by one seller, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SellerGroup<'a> {
    pub key: SellerKey,
    pub options: Vec<&'a ShippingOption>,
}

impl SellerGroup<'_> {
    /// Display heading: first option's seller name, else the seller id.
    #[must_use]
    pub fn heading(&self) -> String {
        let first_name = self
            .options
            .first()
            .and_then(|o| o.seller_name.as_deref())
            .filter(|n| !n.trim().is_empty());
        match (first_name, &self.key) {
            (Some(name), _) => name.to_owned(),
            (None, SellerKey::Platform) => PLATFORM_HEADING.to_owned(),
            (None, SellerKey::Seller(id)) => id.clone(),
        }
    }
}

/// Ordered mapping from [`SellerKey`] to the options that key owns.
///
/// Keys iterate in order of first encounter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SellerGroups<'a> {
    groups: IndexMap<SellerKey, SellerGroup<'a>>,
}

impl<'a> SellerGroups<'a> {
    #[must_use]
    pub fn get(&self, key: &SellerKey) -> Option<&SellerGroup<'a>> {
        self.groups.get(key)
    }

    pub fn iter(&self) -> indexmap::map::Values<'_, SellerKey, SellerGroup<'a>> {
        self.groups.values()
    }

    #[must_use]
    pub fn keys(&self) -> Vec<&SellerKey> {
        self.groups.keys().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total options across every group.
    #[must_use]
    pub fn option_count(&self) -> usize {
        self.groups.values().map(|g| g.options.len()).sum()
    }

    fn push(mut self, option: &'a ShippingOption) -> Self {
        let key = SellerKey::of(option);
        self.groups
            .entry(key.clone())
            .or_insert_with(|| SellerGroup {
                key,
                options: Vec::new(),
            })
            .options
            .push(option);
        self
    }
}

impl<'a> IntoIterator for SellerGroups<'a> {
    type Item = SellerGroup<'a>;
    type IntoIter = indexmap::map::IntoValues<SellerKey, SellerGroup<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_values()
    }
}

impl<'s, 'a> IntoIterator for &'s SellerGroups<'a> {
    type Item = &'s SellerGroup<'a>;
    type IntoIter = indexmap::map::Values<'s, SellerKey, SellerGroup<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.values()
    }
}

/// Groups `options` by seller, preserving input order within each group.
#[must_use]
pub fn group_by_seller(options: &[ShippingOption]) -> SellerGroups<'_> {
    options
        .iter()
        .fold(SellerGroups::default(), SellerGroups::push)
}
