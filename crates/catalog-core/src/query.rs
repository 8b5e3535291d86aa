//! # Product Queries
//!
//! Turns untrusted listing parameters into a [`ProductQuery`]: an ordered
//! list of filters, at most one sort, and exactly one page window.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Query Composition Pipeline                          │
//! │                                                                         │
//! │  ?page=2&size=10&minPrice=5&sortBy=Price&sortOrder=desc                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ProductQueryParams::from_pairs   (raw strings, keys case-insensitive) │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ProductQuery::build(params, profile, limits)                          │
//! │       │   ├── filters: [AvailableOnly?, MinPrice, MaxPrice,            │
//! │       │   │             SearchTerm, SkuEquals, NameContains]           │
//! │       │   ├── sort:    Some(Price, Descending) | None                  │
//! │       │   └── window:  page 2, size 10 → OFFSET 10 LIMIT 10            │
//! │       ▼                                                                 │
//! │  Executor (SQL in catalog-db, or ProductQuery::apply in memory)        │
//! │       filter ──► sort ──► offset/limit                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Profiles
//! - [`QueryProfile::Basic`] honors page, size and the price bounds.
//! - [`QueryProfile::Extended`] restricts to available products first and
//!   additionally honors sku, name, searchTerm, sortBy and sortOrder.
//!
//! ## Determinism
//! Every ordering ends with the product id (in the same direction as the
//! requested sort), so consecutive pages never overlap or skip rows over a
//! stable dataset, and a descending sort is the exact reverse of the
//! ascending one.

use std::cmp::Ordering;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Product;
use crate::validation::{parse_positive, ValidationResult};
use crate::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

// =============================================================================
// Raw Parameters
// =============================================================================

/// Listing parameters exactly as received, before any interpretation.
///
/// Empty values are dropped at construction, so `?sku=` behaves like an
/// absent `sku`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQueryParams {
    pub page: Option<String>,
    pub size: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub sku: Option<String>,
    pub name: Option<String>,
    pub search_term: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

impl ProductQueryParams {
    /// Collects parameters from decoded query-string pairs.
    ///
    /// Keys match ASCII-case-insensitively and ignore `_`/`-`, so `Page`,
    /// `page`, `minPrice` and `min_price` all bind. Unknown keys are ignored.
    /// When a key repeats, the first non-empty value wins.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut params = ProductQueryParams::default();

        for (key, value) in pairs {
            let value = value.as_ref();
            if value.trim().is_empty() {
                continue;
            }

            let normalized: String = key
                .as_ref()
                .chars()
                .filter(|c| *c != '_' && *c != '-')
                .map(|c| c.to_ascii_lowercase())
                .collect();

            let slot = match normalized.as_str() {
                "page" => &mut params.page,
                "size" => &mut params.size,
                "minprice" => &mut params.min_price,
                "maxprice" => &mut params.max_price,
                "sku" => &mut params.sku,
                "name" => &mut params.name,
                "searchterm" => &mut params.search_term,
                "sortby" => &mut params.sort_by,
                "sortorder" => &mut params.sort_order,
                _ => continue,
            };

            if slot.is_none() {
                *slot = Some(value.to_string());
            }
        }

        params
    }
}

// =============================================================================
// Profile & Limits
// =============================================================================

/// Which parameter set a listing surface honors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryProfile {
    /// Pagination and price bounds over all products.
    Basic,
    /// Available products only, with text search and sorting.
    Extended,
}

/// Page-size policy for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryLimits {
    /// Size used when the request has none.
    pub default_page_size: u32,
    /// Requests above this are clamped down to it.
    pub max_page_size: u32,
}

impl Default for QueryLimits {
    fn default() -> Self {
        QueryLimits {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

// =============================================================================
// Filters
// =============================================================================

/// A single predicate over products.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// `is_available` must be true.
    AvailableOnly,
    /// `price >= bound`.
    MinPrice(Money),
    /// `price <= bound`.
    MaxPrice(Money),
    /// Sku or name equals the term after [`fold_case`].
    SearchTerm(String),
    /// Sku equals the value exactly (case-sensitive).
    SkuEquals(String),
    /// Name contains the value after [`fold_case`].
    NameContains(String),
}

impl Filter {
    /// Evaluates the predicate against one product.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Filter::AvailableOnly => product.is_available,
            Filter::MinPrice(bound) => product.price >= *bound,
            Filter::MaxPrice(bound) => product.price <= *bound,
            Filter::SearchTerm(term) => {
                let term = fold_case(term);
                fold_case(&product.sku) == term || fold_case(&product.name) == term
            }
            Filter::SkuEquals(sku) => product.sku == *sku,
            Filter::NameContains(fragment) => fold_case(&product.name).contains(&fold_case(fragment)),
        }
    }
}

/// Case folding for text filters: Unicode lowercase.
///
/// The store keeps `fold_case(sku)` and `fold_case(name)` next to the
/// originals, so SQL and in-memory matching fold identically.
pub fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

// =============================================================================
// Sorting
// =============================================================================

/// The product attributes a listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Sku,
    Name,
    Description,
    Price,
    IsAvailable,
    CategoryId,
}

impl SortField {
    pub const ALL: [SortField; 7] = [
        SortField::Id,
        SortField::Sku,
        SortField::Name,
        SortField::Description,
        SortField::Price,
        SortField::IsAvailable,
        SortField::CategoryId,
    ];

    /// Attribute name as exposed to clients.
    pub fn attribute(&self) -> &'static str {
        match self {
            SortField::Id => "Id",
            SortField::Sku => "Sku",
            SortField::Name => "Name",
            SortField::Description => "Description",
            SortField::Price => "Price",
            SortField::IsAvailable => "IsAvailable",
            SortField::CategoryId => "CategoryId",
        }
    }

    /// Backing column in the `products` table.
    pub fn column(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Sku => "sku",
            SortField::Name => "name",
            SortField::Description => "description",
            SortField::Price => "price_cents",
            SortField::IsAvailable => "is_available",
            SortField::CategoryId => "category_id",
        }
    }

    /// Resolves an attribute name, ASCII-case-insensitively.
    ///
    /// Returns `None` for names that are not product attributes.
    pub fn parse(name: &str) -> Option<SortField> {
        let name = name.trim();
        SortField::ALL
            .into_iter()
            .find(|field| field.attribute().eq_ignore_ascii_case(name))
    }

    /// Natural ascending comparison of this attribute.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortField::Id => a.id.cmp(&b.id),
            SortField::Sku => a.sku.cmp(&b.sku),
            SortField::Name => a.name.cmp(&b.name),
            SortField::Description => a.description.cmp(&b.description),
            SortField::Price => a.price.cmp(&b.price),
            SortField::IsAvailable => a.is_available.cmp(&b.is_available),
            SortField::CategoryId => a.category_id.cmp(&b.category_id),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// `desc` / `descending` (any case) selects descending; anything else
    /// is ascending.
    pub fn parse(raw: Option<&str>) -> SortOrder {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("desc") | Some("descending") => SortOrder::Descending,
            _ => SortOrder::Ascending,
        }
    }

    /// SQL keyword for this direction.
    pub fn keyword(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC",
        }
    }

    fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }
}

/// A resolved sort instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub field: SortField,
    pub order: SortOrder,
}

// =============================================================================
// Page Window
// =============================================================================

/// A 1-based page of fixed size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: u32,
    pub size: u32,
}

impl PageWindow {
    /// Zero-based row offset: `size * (page - 1)`, saturating at `i64::MAX`.
    pub fn offset(&self) -> i64 {
        let rows = u64::from(self.size) * u64::from(self.page.saturating_sub(1));
        i64::try_from(rows).unwrap_or(i64::MAX)
    }

    /// Maximum number of rows on the page.
    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }
}

// =============================================================================
// Product Query
// =============================================================================

/// A validated listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    /// Predicates, all of which must hold.
    pub filters: Vec<Filter>,
    /// Requested ordering; `None` means store order (ascending id).
    pub sort: Option<Sort>,
    /// The page to return.
    pub window: PageWindow,
}

impl ProductQuery {
    /// Builds a query from raw parameters.
    ///
    /// ## Errors
    /// - `page` or `size` not a positive integer → [`ValidationError`]
    /// - price bound not a decimal with at most two places → [`ValidationError`]
    ///
    /// An unknown `sortBy` is not an error: the sort is dropped.
    pub fn build(
        params: &ProductQueryParams,
        profile: QueryProfile,
        limits: QueryLimits,
    ) -> ValidationResult<ProductQuery> {
        let page = match params.page.as_deref() {
            Some(raw) => parse_positive("page", raw)?,
            None => 1,
        };

        let size = match params.size.as_deref() {
            Some(raw) => parse_positive("size", raw)?,
            None => limits.default_page_size,
        }
        .min(limits.max_page_size);

        let mut filters = Vec::new();

        if profile == QueryProfile::Extended {
            filters.push(Filter::AvailableOnly);
        }

        if let Some(raw) = params.min_price.as_deref() {
            filters.push(Filter::MinPrice(parse_price("minPrice", raw)?));
        }
        if let Some(raw) = params.max_price.as_deref() {
            filters.push(Filter::MaxPrice(parse_price("maxPrice", raw)?));
        }

        let mut sort = None;

        if profile == QueryProfile::Extended {
            if let Some(term) = &params.search_term {
                filters.push(Filter::SearchTerm(term.clone()));
            }
            if let Some(sku) = &params.sku {
                filters.push(Filter::SkuEquals(sku.clone()));
            }
            if let Some(name) = &params.name {
                filters.push(Filter::NameContains(name.clone()));
            }

            sort = params
                .sort_by
                .as_deref()
                .and_then(SortField::parse)
                .map(|field| Sort {
                    field,
                    order: SortOrder::parse(params.sort_order.as_deref()),
                });
        }

        Ok(ProductQuery {
            filters,
            sort,
            window: PageWindow { page, size },
        })
    }

    /// True when the product passes every filter.
    pub fn matches(&self, product: &Product) -> bool {
        self.filters.iter().all(|filter| filter.matches(product))
    }

    /// Total order used for listing: requested sort, then id in the same
    /// direction.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self.sort {
            Some(sort) => sort
                .order
                .apply(sort.field.compare(a, b).then_with(|| a.id.cmp(&b.id))),
            None => a.id.cmp(&b.id),
        }
    }

    /// Reference evaluation over an in-memory collection.
    ///
    /// Applies filter → sort → window, in that order. The SQL executor in
    /// catalog-db must agree with this for every input.
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        let mut selected: Vec<&Product> = products.iter().filter(|p| self.matches(p)).collect();
        selected.sort_by(|a, b| self.compare(a, b));

        let offset = usize::try_from(self.window.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(self.window.limit()).unwrap_or(usize::MAX);

        selected
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect()
    }
}

fn parse_price(field: &str, raw: &str) -> ValidationResult<Money> {
    raw.parse::<Money>()
        .map_err(|e| ValidationError::invalid_format(field, e.to_string()))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn product(id: i64, sku: &str, name: &str, cents: i64, available: bool) -> Product {
        let now = Utc::now();
        Product {
            id,
            sku: sku.to_string(),
            name: name.to_string(),
            description: format!("{} description", name),
            price: Money::from_cents(cents),
            is_available: available,
            category_id: 1 + id % 2,
            version: 1,
            created_at: now,
            updated_at: now,
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product(1, "AWMGSJ", "Grunge Skater Jeans", 6800, true),
            product(2, "AWMPS", "Polo Shirt", 3500, true),
            product(3, "AWMSGT", "Skater Graphic T-Shirt", 3300, false),
            product(4, "AWMSTS", "Slicker Jacket", 12500, true),
            product(5, "AWMTJ", "Thermal Fleece Jacket", 6000, true),
            product(6, "AWMCTS", "Unisex Thermal Vest", 9500, false),
            product(7, "AWMHCT", "V-Neck Pullover", 6500, true),
        ]
    }

    fn params(pairs: &[(&str, &str)]) -> ProductQueryParams {
        ProductQueryParams::from_pairs(pairs.iter().copied())
    }

    fn build(pairs: &[(&str, &str)], profile: QueryProfile) -> ProductQuery {
        ProductQuery::build(&params(pairs), profile, QueryLimits::default()).unwrap()
    }

    fn ids(products: &[Product]) -> Vec<i64> {
        products.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_params_keys_are_case_insensitive() {
        let p = params(&[("Page", "2"), ("min_price", "5"), ("SEARCHTERM", "x"), ("other", "1")]);
        assert_eq!(p.page.as_deref(), Some("2"));
        assert_eq!(p.min_price.as_deref(), Some("5"));
        assert_eq!(p.search_term.as_deref(), Some("x"));
        assert_eq!(p.size, None);
    }

    #[test]
    fn test_params_drop_empty_values_and_keep_first() {
        let p = params(&[("sku", ""), ("name", "a"), ("name", "b")]);
        assert_eq!(p.sku, None);
        assert_eq!(p.name.as_deref(), Some("a"));
    }

    #[test]
    fn test_defaults() {
        let q = build(&[], QueryProfile::Basic);
        assert!(q.filters.is_empty());
        assert_eq!(q.sort, None);
        assert_eq!(q.window, PageWindow { page: 1, size: DEFAULT_PAGE_SIZE });
        assert_eq!(q.window.offset(), 0);
    }

    #[test]
    fn test_invalid_page_and_size_are_rejected() {
        let limits = QueryLimits::default();
        for bad in [("page", "0"), ("page", "-1"), ("size", "0"), ("size", "abc")] {
            let result = ProductQuery::build(&params(&[bad]), QueryProfile::Basic, limits);
            assert!(result.is_err(), "{:?} should be rejected", bad);
        }
    }

    #[test]
    fn test_size_is_clamped_to_maximum() {
        let q = build(&[("size", "1000")], QueryProfile::Basic);
        assert_eq!(q.window.size, MAX_PAGE_SIZE);
    }

    #[test]
    fn test_offset_is_size_times_previous_pages() {
        let q = build(&[("page", "3"), ("size", "10")], QueryProfile::Basic);
        assert_eq!(q.window.offset(), 20);
        assert_eq!(q.window.limit(), 10);

        let huge = PageWindow { page: u32::MAX, size: u32::MAX };
        assert_eq!(huge.offset(), i64::MAX);
    }

    #[test]
    fn test_bad_price_bound_is_rejected() {
        let limits = QueryLimits::default();
        assert!(ProductQuery::build(&params(&[("minPrice", "cheap")]), QueryProfile::Basic, limits).is_err());
        assert!(ProductQuery::build(&params(&[("maxPrice", "1.001")]), QueryProfile::Basic, limits).is_err());
    }

    #[test]
    fn test_basic_profile_ignores_extended_parameters() {
        let q = build(
            &[("sku", "AWMPS"), ("name", "x"), ("searchTerm", "y"), ("sortBy", "Price")],
            QueryProfile::Basic,
        );
        assert!(q.filters.is_empty());
        assert_eq!(q.sort, None);
    }

    #[test]
    fn test_extended_profile_filter_order() {
        let q = build(
            &[
                ("name", "jacket"),
                ("sku", "AWMTJ"),
                ("searchTerm", "awmtj"),
                ("maxPrice", "100"),
                ("minPrice", "10"),
            ],
            QueryProfile::Extended,
        );
        assert_eq!(
            q.filters,
            vec![
                Filter::AvailableOnly,
                Filter::MinPrice(Money::from_cents(1000)),
                Filter::MaxPrice(Money::from_cents(10000)),
                Filter::SearchTerm("awmtj".to_string()),
                Filter::SkuEquals("AWMTJ".to_string()),
                Filter::NameContains("jacket".to_string()),
            ]
        );
    }

    #[test]
    fn test_price_bounds_are_inclusive() {
        let data = catalog();
        for p in &data {
            let at_min = build(&[("minPrice", p.price.to_string().as_str())], QueryProfile::Basic);
            assert!(ids(&at_min.apply(&data)).contains(&p.id));

            let below = (p.price - Money::from_cents(1)).to_string();
            let under_max = build(&[("maxPrice", below.as_str())], QueryProfile::Basic);
            assert!(!ids(&under_max.apply(&data)).contains(&p.id));
        }
    }

    #[test]
    fn test_min_price_scenario() {
        let data = vec![product(1, "A", "Cheap", 500, true), product(2, "B", "Dear", 1500, true)];
        let q = build(&[("minPrice", "10")], QueryProfile::Basic);
        assert_eq!(ids(&q.apply(&data)), vec![2]);
    }

    #[test]
    fn test_extended_profile_hides_unavailable() {
        let data = catalog();
        let q = build(&[], QueryProfile::Extended);
        assert!(q.apply(&data).iter().all(|p| p.is_available));
        assert_eq!(q.apply(&data).len(), 5);
    }

    #[test]
    fn test_search_term_is_case_insensitive_equality() {
        let data = catalog();

        let by_sku = build(&[("searchTerm", "awmps")], QueryProfile::Extended);
        assert_eq!(ids(&by_sku.apply(&data)), vec![2]);

        let by_name = build(&[("searchTerm", "POLO SHIRT")], QueryProfile::Extended);
        assert_eq!(ids(&by_name.apply(&data)), vec![2]);

        // Equality, not containment
        let partial = build(&[("searchTerm", "Polo")], QueryProfile::Extended);
        assert!(partial.apply(&data).is_empty());
    }

    #[test]
    fn test_text_filters_fold_unicode_case() {
        let cafe = product(8, "ÉCLAIR", "Café", 450, true);
        assert!(Filter::SearchTerm("CAFÉ".to_string()).matches(&cafe));
        assert!(Filter::SearchTerm("éclair".to_string()).matches(&cafe));
        assert!(Filter::NameContains("AFÉ".to_string()).matches(&cafe));
        assert!(!Filter::SkuEquals("éclair".to_string()).matches(&cafe));
        assert_eq!(fold_case("ÇA VA"), "ça va");
    }

    #[test]
    fn test_sku_is_case_sensitive_and_name_is_substring() {
        let data = catalog();

        let exact = build(&[("sku", "AWMTJ")], QueryProfile::Extended);
        assert_eq!(ids(&exact.apply(&data)), vec![5]);

        let wrong_case = build(&[("sku", "awmtj")], QueryProfile::Extended);
        assert!(wrong_case.apply(&data).is_empty());

        let name = build(&[("name", "JACKET")], QueryProfile::Extended);
        assert_eq!(ids(&name.apply(&data)), vec![4, 5]);
    }

    #[test]
    fn test_sort_descending_by_price() {
        let data = vec![
            product(1, "A", "Five", 500, true),
            product(2, "B", "Fifteen", 1500, true),
            product(3, "C", "Ten", 1000, true),
        ];
        let q = build(&[("sortBy", "Price"), ("sortOrder", "desc")], QueryProfile::Extended);
        let prices: Vec<i64> = q.apply(&data).iter().map(|p| p.price.cents()).collect();
        assert_eq!(prices, vec![1500, 1000, 500]);
    }

    #[test]
    fn test_descending_is_reverse_of_ascending() {
        let data = catalog();
        for field in SortField::ALL {
            let asc = build(&[("sortBy", field.attribute())], QueryProfile::Basic);
            let asc = ProductQuery { sort: Some(Sort { field, order: SortOrder::Ascending }), ..asc };
            let desc = ProductQuery {
                sort: Some(Sort { field, order: SortOrder::Descending }),
                ..asc.clone()
            };

            let mut forward = ids(&asc.apply(&data));
            forward.reverse();
            assert_eq!(forward, ids(&desc.apply(&data)), "field {:?}", field);
        }
    }

    #[test]
    fn test_unknown_sort_field_is_ignored() {
        let data = catalog();
        let unsorted = build(&[], QueryProfile::Extended);
        let bogus = build(&[("sortBy", "Colour"), ("sortOrder", "desc")], QueryProfile::Extended);

        assert_eq!(bogus.sort, None);
        assert_eq!(ids(&bogus.apply(&data)), ids(&unsorted.apply(&data)));
    }

    #[test]
    fn test_sort_field_names() {
        assert_eq!(SortField::parse("Price"), Some(SortField::Price));
        assert_eq!(SortField::parse("price"), Some(SortField::Price));
        assert_eq!(SortField::parse("isavailable"), Some(SortField::IsAvailable));
        assert_eq!(SortField::parse("Category"), None);
        assert_eq!(SortOrder::parse(Some("DESC")), SortOrder::Descending);
        assert_eq!(SortOrder::parse(Some("sideways")), SortOrder::Ascending);
        assert_eq!(SortOrder::parse(None), SortOrder::Ascending);
    }

    #[test]
    fn test_pages_partition_the_result_set() {
        let data = catalog();
        let full = build(&[("sortBy", "Name"), ("size", "100")], QueryProfile::Extended).apply(&data);

        for size in 1..=4u32 {
            let mut collected = Vec::new();
            for page in 1..=10u32 {
                let q = build(
                    &[("sortBy", "Name"), ("size", size.to_string().as_str()), ("page", page.to_string().as_str())],
                    QueryProfile::Extended,
                );
                let chunk = q.apply(&data);
                assert!(chunk.len() <= size as usize);
                collected.extend(chunk);
            }
            assert_eq!(ids(&collected), ids(&full), "size {}", size);
        }
    }

    #[test]
    fn test_page_past_the_end_is_empty() {
        let q = build(&[("page", "50"), ("size", "10")], QueryProfile::Basic);
        assert!(q.apply(&catalog()).is_empty());
    }

    #[test]
    fn test_page_beyond_u32_saturates_to_empty_page() {
        let q = build(&[("page", "4294967296"), ("size", "10")], QueryProfile::Basic);
        assert_eq!(q.window.page, u32::MAX);
        assert!(q.apply(&catalog()).is_empty());
    }

    #[test]
    fn test_huge_size_is_clamped_not_rejected() {
        let q = build(&[("size", "99999999999")], QueryProfile::Basic);
        assert_eq!(q.window.size, MAX_PAGE_SIZE);
        assert_eq!(ids(&q.apply(&catalog())), vec![1, 2, 3, 4, 5, 6, 7]);
    }
}
