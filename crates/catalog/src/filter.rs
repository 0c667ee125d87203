//! Filter criteria and the catalog filter predicate.

use serde::{Deserialize, Serialize};

use frostcart_core::Money;

use crate::product::{Category, Product, Rating};

/// Inclusive price bounds. Ordering of `min`/`max` is the caller's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Money,
    pub max: Money,
}

impl PriceRange {
    /// Slider bounds of the listing page: 0 to 100 000.00.
    pub const DEFAULT: PriceRange = PriceRange {
        min: Money::ZERO,
        max: Money::from_major(100_000),
    };

    pub const fn new(min: Money, max: Money) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, price: Money) -> bool {
        self.min <= price && price <= self.max
    }

    pub fn is_default(&self) -> bool {
        *self == Self::DEFAULT
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl core::fmt::Display for PriceRange {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// The shopper's current constraints on the listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub category: Option<Category>,
    pub price_range: PriceRange,
    pub rating: Option<Rating>,
    /// Carried for the presentation layer; not part of the predicate.
    pub colors: Vec<String>,
}

impl FilterCriteria {
    /// Whether `product` passes category, price and rating constraints.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = self.category {
            if product.category != category {
                return false;
            }
        }
        if !self.price_range.contains(product.price) {
            return false;
        }
        if let Some(floor) = self.rating {
            if product.rating < floor {
                return false;
            }
        }
        true
    }

    /// Field-by-field merge; fields absent from `patch` keep their value.
    pub fn merged(&self, patch: &FilterPatch) -> FilterCriteria {
        FilterCriteria {
            category: patch.category.unwrap_or(self.category),
            price_range: patch.price_range.unwrap_or(self.price_range),
            rating: patch.rating.unwrap_or(self.rating),
            colors: patch.colors.clone().unwrap_or_else(|| self.colors.clone()),
        }
    }

    pub fn is_default(&self) -> bool {
        *self == FilterCriteria::default()
    }

    /// Listing heading: the category label, or "All Products".
    pub fn heading(&self) -> &'static str {
        self.category.map_or("All Products", |c| c.label())
    }

    /// Criteria that differ from the default, in display order.
    pub fn active_filters(&self) -> Vec<ActiveFilter> {
        let mut active = Vec::new();
        if let Some(category) = self.category {
            active.push(ActiveFilter::Category(category));
        }
        if !self.price_range.is_default() {
            active.push(ActiveFilter::PriceRange(self.price_range));
        }
        if let Some(rating) = self.rating {
            active.push(ActiveFilter::Rating(rating));
        }
        if !self.colors.is_empty() {
            active.push(ActiveFilter::Colors(self.colors.clone()));
        }
        active
    }
}

/// Partial update of [`FilterCriteria`].
///
/// `None` leaves a field untouched. For the optional criteria,
/// `Some(None)` clears the field.
///
/// On the wire an absent key leaves the field untouched and `null` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterPatch {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "present")]
    pub category: Option<Option<Category>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_range: Option<PriceRange>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "present")]
    pub rating: Option<Option<Rating>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
}

/// A key that is present, `null` included, is a change.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl FilterPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(Some(category));
        self
    }

    pub fn any_category(mut self) -> Self {
        self.category = Some(None);
        self
    }

    pub fn price_range(mut self, min: Money, max: Money) -> Self {
        self.price_range = Some(PriceRange::new(min, max));
        self
    }

    pub fn min_rating(mut self, rating: Rating) -> Self {
        self.rating = Some(Some(rating));
        self
    }

    pub fn any_rating(mut self) -> Self {
        self.rating = Some(None);
        self
    }

    pub fn colors(mut self, colors: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.colors = Some(colors.into_iter().map(Into::into).collect());
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == FilterPatch::default()
    }
}

/// One non-default criterion, rendered as a removable chip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActiveFilter {
    Category(Category),
    PriceRange(PriceRange),
    Rating(Rating),
    Colors(Vec<String>),
}

impl ActiveFilter {
    /// Chip text, e.g. `category: ac`.
    pub fn label(&self) -> String {
        match self {
            ActiveFilter::Category(c) => format!("category: {c}"),
            ActiveFilter::PriceRange(r) => format!("priceRange: {r}"),
            ActiveFilter::Rating(r) => format!("rating: {r}"),
            ActiveFilter::Colors(colors) => format!("colors: {}", colors.join(",")),
        }
    }

    /// Patch that resets only this criterion to its default.
    pub fn removal_patch(&self) -> FilterPatch {
        match self {
            ActiveFilter::Category(_) => FilterPatch::new().any_category(),
            ActiveFilter::PriceRange(_) => {
                FilterPatch::new().price_range(PriceRange::DEFAULT.min, PriceRange::DEFAULT.max)
            }
            ActiveFilter::Rating(_) => FilterPatch::new().any_rating(),
            ActiveFilter::Colors(_) => FilterPatch::new().colors(Vec::<String>::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::ProductId;

    fn product(category: Category, price: u64, rating_tenths: u8) -> Product {
        Product {
            id: ProductId::new(format!("{category}-{price}")),
            name: "test".to_string(),
            description: String::new(),
            price: Money::from_major(price),
            category,
            image: String::new(),
            rating: Rating::saturating(rating_tenths),
            reviews: 0,
            colors: vec![],
            sizes: None,
            features: vec![],
            stock: 1,
        }
    }

    #[test]
    fn default_criteria_admit_both_categories() {
        let criteria = FilterCriteria::default();
        assert!(criteria.matches(&product(Category::Ac, 100, 10)));
        assert!(criteria.matches(&product(Category::Fan, 100, 10)));
    }

    #[test]
    fn price_bounds_are_inclusive_on_both_ends() {
        let criteria = FilterCriteria::default().merged(
            &FilterPatch::new().price_range(Money::from_major(2_500), Money::from_major(30_000)),
        );
        assert!(criteria.matches(&product(Category::Fan, 2_500, 40)));
        assert!(criteria.matches(&product(Category::Ac, 30_000, 40)));
        assert!(!criteria.matches(&product(Category::Ac, 30_001, 40)));
        assert!(!criteria.matches(&product(Category::Fan, 2_499, 40)));
    }

    #[test]
    fn rating_floor_is_inclusive() {
        let criteria =
            FilterCriteria::default().merged(&FilterPatch::new().min_rating(Rating::stars(4).unwrap()));
        assert!(criteria.matches(&product(Category::Fan, 10, 40)));
        assert!(!criteria.matches(&product(Category::Fan, 10, 39)));
    }

    #[test]
    fn merge_keeps_unspecified_fields() {
        let first = FilterCriteria::default().merged(&FilterPatch::new().category(Category::Ac));
        let second = first.merged(&FilterPatch::new().min_rating(Rating::saturating(30)));
        assert_eq!(second.category, Some(Category::Ac));
        assert_eq!(second.rating, Some(Rating::saturating(30)));
        assert_eq!(second.price_range, PriceRange::DEFAULT);
    }

    #[test]
    fn merge_accepts_inverted_range_without_validation() {
        let criteria = FilterCriteria::default().merged(
            &FilterPatch::new().price_range(Money::from_major(500), Money::from_major(100)),
        );
        assert_eq!(criteria.price_range.min, Money::from_major(500));
        assert!(!criteria.matches(&product(Category::Fan, 300, 40)));
    }

    #[test]
    fn heading_follows_category() {
        let mut criteria = FilterCriteria::default();
        assert_eq!(criteria.heading(), "All Products");
        criteria.category = Some(Category::Fan);
        assert_eq!(criteria.heading(), "Fans");
    }

    #[test]
    fn removing_a_chip_resets_only_that_field() {
        let criteria = FilterCriteria::default().merged(
            &FilterPatch::new()
                .category(Category::Ac)
                .price_range(Money::ZERO, Money::from_major(30_000))
                .min_rating(Rating::stars(3).unwrap()),
        );

        let chips = criteria.active_filters();
        assert_eq!(chips.len(), 3);
        assert_eq!(chips[0].label(), "category: ac");

        let without_price = criteria.merged(&chips[1].removal_patch());
        assert_eq!(without_price.price_range, PriceRange::DEFAULT);
        assert_eq!(without_price.category, Some(Category::Ac));
        assert_eq!(without_price.rating, Some(Rating::saturating(30)));
    }

    #[test]
    fn clearing_patches_survive_json() {
        let patch = FilterPatch::new().any_category().any_rating();
        let json = serde_json::to_string(&patch).unwrap();
        assert_eq!(json, r#"{"category":null,"rating":null}"#);

        let back: FilterPatch = serde_json::from_str(&json).unwrap();
        assert_eq!(back, patch);
        assert_eq!(back.category, Some(None));
        assert_eq!(back.rating, Some(None));

        let untouched: FilterPatch = serde_json::from_str("{}").unwrap();
        assert!(untouched.is_empty());
    }

    #[test]
    fn setting_patches_survive_json() {
        let patch = FilterPatch::new()
            .category(Category::Fan)
            .min_rating(Rating::saturating(40));
        let back: FilterPatch = serde_json::from_str(&serde_json::to_string(&patch).unwrap()).unwrap();
        assert_eq!(back, patch);
    }

    #[test]
    fn colors_are_carried_but_never_filter() {
        let criteria = FilterCriteria::default().merged(&FilterPatch::new().colors(["#blue"]));
        let mut red_fan = product(Category::Fan, 10, 40);
        red_fan.colors = vec!["#red".to_string()];
        assert!(criteria.matches(&red_fan));
        assert_eq!(criteria.active_filters(), vec![ActiveFilter::Colors(vec!["#blue".to_string()])]);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_category() -> impl Strategy<Value = Category> {
            prop_oneof![Just(Category::Ac), Just(Category::Fan)]
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: price admission is exactly `lo <= price <= hi`.
            #[test]
            fn price_admission_matches_inclusive_bounds(
                price in 0u64..200_000,
                lo in 0u64..200_000,
                hi in 0u64..200_000,
                category in arb_category(),
            ) {
                let criteria = FilterCriteria::default().merged(
                    &FilterPatch::new().price_range(Money::from_major(lo), Money::from_major(hi)),
                );
                let p = product(category, price, 40);
                prop_assert_eq!(criteria.matches(&p), lo <= price && price <= hi);
            }

            /// Property: an unset rating floor never excludes on rating.
            #[test]
            fn unset_rating_admits_every_rating(tenths in 0u8..=50, category in arb_category()) {
                let criteria = FilterCriteria::default();
                prop_assert!(criteria.matches(&product(category, 1_000, tenths)));
            }
        }
    }
}
