//! Client-side filtering, sorting and pagination.
//!
//! The dashboard fetches whole lists from the backend and narrows them in the
//! browser. Only the users screen pages on the server; its sort column and page
//! position are tracked by [`Pager`] and [`UserSortColumn`].

use std::cmp::Ordering;

use crate::records::{DashboardStats, FileItem, Product, User};

/// Products with a quantity below this are flagged as low stock.
pub const LOW_STOCK_THRESHOLD: i32 = 10;

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProductSort {
    #[default]
    Name,
    Price,
    Quantity,
    Category,
}

impl ProductSort {
    pub const ALL: [ProductSort; 4] = [
        ProductSort::Name,
        ProductSort::Price,
        ProductSort::Quantity,
        ProductSort::Category,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductSort::Name => "name",
            ProductSort::Price => "price",
            ProductSort::Quantity => "quantity",
            ProductSort::Category => "category",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProductSort::Name => "Name",
            ProductSort::Price => "Price",
            ProductSort::Quantity => "Stock",
            ProductSort::Category => "Category",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == s)
    }

    fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            ProductSort::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            ProductSort::Price => a.price.total_cmp(&b.price),
            ProductSort::Quantity => a.quantity.cmp(&b.quantity),
            ProductSort::Category => a.category.to_lowercase().cmp(&b.category.to_lowercase()),
        }
    }
}

/// Search, category filter and sort order for the products grid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductQuery {
    pub search: String,
    /// `None` means all categories.
    pub category: Option<String>,
    pub sort: ProductSort,
    pub descending: bool,
}

impl ProductQuery {
    pub fn is_filtered(&self) -> bool {
        !self.search.trim().is_empty() || self.category.is_some()
    }

    pub fn matches(&self, product: &Product) -> bool {
        let needle = self.search.trim().to_lowercase();
        let text_match = needle.is_empty()
            || contains_ci(&product.name, &needle)
            || contains_ci(&product.description, &needle);
        let category_match = self
            .category
            .as_ref()
            .map_or(true, |c| &product.category == c);
        text_match && category_match
    }

    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        let mut out: Vec<Product> = products.iter().filter(|p| self.matches(p)).cloned().collect();
        out.sort_by(|a, b| {
            let ord = self.sort.compare(a, b);
            if self.descending {
                ord.reverse()
            } else {
                ord
            }
        });
        out
    }
}

/// Distinct non-empty categories in first-seen order.
pub fn categories(products: &[Product]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for p in products {
        if !p.category.is_empty() && !seen.contains(&p.category) {
            seen.push(p.category.clone());
        }
    }
    seen
}

pub fn low_stock(products: &[Product], threshold: i32) -> usize {
    products.iter().filter(|p| p.is_low_stock(threshold)).count()
}

/// Search and status filter for the users list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserQuery {
    pub search: String,
    pub status: Option<String>,
}

impl UserQuery {
    pub fn is_filtered(&self) -> bool {
        !self.search.trim().is_empty() || self.status.is_some()
    }

    pub fn matches(&self, user: &User) -> bool {
        let needle = self.search.trim().to_lowercase();
        let text_match = needle.is_empty()
            || contains_ci(&user.first_name, &needle)
            || contains_ci(&user.last_name, &needle)
            || contains_ci(&user.email, &needle);
        let status_match = self
            .status
            .as_ref()
            .map_or(true, |s| user.status.eq_ignore_ascii_case(s));
        text_match && status_match
    }

    pub fn apply(&self, users: &[User]) -> Vec<User> {
        users.iter().filter(|u| self.matches(u)).cloned().collect()
    }
}

/// Sort column understood by the backend's paginated user listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UserSortColumn {
    #[default]
    FirstName,
    LastName,
    Email,
    Status,
}

impl UserSortColumn {
    pub const ALL: [UserSortColumn; 4] = [
        UserSortColumn::FirstName,
        UserSortColumn::LastName,
        UserSortColumn::Email,
        UserSortColumn::Status,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserSortColumn::FirstName => "firstName",
            UserSortColumn::LastName => "lastName",
            UserSortColumn::Email => "email",
            UserSortColumn::Status => "status",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UserSortColumn::FirstName => "First Name",
            UserSortColumn::LastName => "Last Name",
            UserSortColumn::Email => "Email",
            UserSortColumn::Status => "Status",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

pub fn filter_files(files: &[FileItem], search: &str) -> Vec<FileItem> {
    let needle = search.trim().to_lowercase();
    if needle.is_empty() {
        return files.to_vec();
    }
    files
        .iter()
        .filter(|f| contains_ci(&f.filename, &needle))
        .cloned()
        .collect()
}

/// Zero-based page cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    pub page: u32,
    pub size: u32,
    pub total_pages: u32,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(10)
    }
}

impl Pager {
    pub const SIZES: [u32; 4] = [5, 10, 20, 50];

    pub fn new(size: u32) -> Self {
        Self {
            page: 0,
            size: size.max(1),
            total_pages: 0,
        }
    }

    pub fn has_prev(&self) -> bool {
        self.page > 0
    }

    pub fn has_next(&self) -> bool {
        self.total_pages > 0 && self.page < self.total_pages - 1
    }

    /// Returns whether the page changed.
    pub fn next(&mut self) -> bool {
        if self.has_next() {
            self.page += 1;
            true
        } else {
            false
        }
    }

    pub fn prev(&mut self) -> bool {
        if self.has_prev() {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.page = 0;
    }

    pub fn set_size(&mut self, size: u32) {
        self.size = size.max(1);
        self.page = 0;
    }

    pub fn update_total(&mut self, total_pages: u32) {
        self.total_pages = total_pages;
        if total_pages == 0 {
            self.page = 0;
        } else if self.page >= total_pages {
            self.page = total_pages - 1;
        }
    }

    pub fn label(&self) -> String {
        format!("Page {} of {}", self.page + 1, self.total_pages.max(1))
    }
}

pub fn total_pages(len: usize, size: u32) -> u32 {
    let size = size.max(1) as usize;
    len.div_ceil(size) as u32
}

/// The slice of `items` shown on `page`. Out-of-range pages are empty.
pub fn paginate<T>(items: &[T], page: u32, size: u32) -> &[T] {
    let size = size.max(1) as usize;
    let start = (page as usize).saturating_mul(size);
    if start >= items.len() {
        return &[];
    }
    let end = (start + size).min(items.len());
    &items[start..end]
}

/// Dashboard counters computed from fetched lists when the backend stats
/// endpoint is unavailable. Growth figures stay at zero.
pub fn compute_stats(
    products: &[Product],
    users: &[User],
    files: &[FileItem],
    threshold: i32,
) -> DashboardStats {
    DashboardStats {
        total_products: products.len() as u64,
        total_users: users.len() as u64,
        total_files: files.len() as u64,
        low_stock_products: low_stock(products, threshold) as u64,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, desc: &str, category: &str, price: f64, quantity: i32) -> Product {
        Product {
            id: name.to_lowercase(),
            name: name.to_string(),
            description: desc.to_string(),
            price,
            quantity,
            category: category.to_string(),
            inventory: None,
        }
    }

    fn user(first: &str, last: &str, email: &str, status: &str) -> User {
        User {
            id: email.to_string(),
            email: email.to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            status: status.to_string(),
            ..Default::default()
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product("Wireless Headphones", "Noise cancelling", "Audio", 99.0, 25),
            product("Gaming Mouse", "RGB, 16000 dpi", "Peripherals", 49.5, 4),
            product("Keyboard", "Mechanical switches", "Peripherals", 79.0, 12),
            product("Speaker", "Wireless bluetooth speaker", "Audio", 59.0, 9),
        ]
    }

    #[test]
    fn test_search_matches_name_or_description() {
        let query = ProductQuery {
            search: "WIRELESS".to_string(),
            ..Default::default()
        };
        let names: Vec<String> = query.apply(&catalog()).into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Speaker", "Wireless Headphones"]);
    }

    #[test]
    fn test_category_filter_and_sort() {
        let query = ProductQuery {
            category: Some("Peripherals".to_string()),
            sort: ProductSort::Price,
            descending: true,
            ..Default::default()
        };
        let names: Vec<String> = query.apply(&catalog()).into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Keyboard", "Gaming Mouse"]);
        assert!(query.is_filtered());
    }

    #[test]
    fn test_empty_query_keeps_everything() {
        let query = ProductQuery::default();
        assert!(!query.is_filtered());
        assert_eq!(query.apply(&catalog()).len(), 4);
    }

    #[test]
    fn test_categories_first_seen_order() {
        let mut products = catalog();
        products.push(product("Cable", "", "", 5.0, 100));
        assert_eq!(categories(&products), vec!["Audio", "Peripherals"]);
    }

    #[test]
    fn test_low_stock_is_strictly_below_threshold() {
        let products = vec![
            product("A", "", "x", 1.0, 9),
            product("B", "", "x", 1.0, 10),
            product("C", "", "x", 1.0, 0),
        ];
        assert_eq!(low_stock(&products, LOW_STOCK_THRESHOLD), 2);
    }

    #[test]
    fn test_user_query_search_and_status() {
        let users = vec![
            user("John", "Doe", "john@example.com", "ACTIVE"),
            user("Jane", "Roe", "jane@example.com", "INACTIVE"),
            user("Mark", "Johnson", "mark@example.com", "ACTIVE"),
        ];
        let query = UserQuery {
            search: "john".to_string(),
            status: None,
        };
        assert_eq!(query.apply(&users).len(), 2);

        let query = UserQuery {
            search: String::new(),
            status: Some("inactive".to_string()),
        };
        let filtered = query.apply(&users);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].first_name, "Jane");
    }

    #[test]
    fn test_filter_files_by_name() {
        let files = vec![
            FileItem {
                id: "1".to_string(),
                filename: "Invoice-2024.pdf".to_string(),
                ..Default::default()
            },
            FileItem {
                id: "2".to_string(),
                filename: "logo.png".to_string(),
                ..Default::default()
            },
        ];
        assert_eq!(filter_files(&files, "invoice").len(), 1);
        assert_eq!(filter_files(&files, "  ").len(), 2);
    }

    #[test]
    fn test_pager_bounds() {
        let mut pager = Pager::new(10);
        pager.update_total(3);
        assert!(!pager.prev());
        assert!(pager.next());
        assert!(pager.next());
        assert!(!pager.next());
        assert_eq!(pager.page, 2);
        assert_eq!(pager.label(), "Page 3 of 3");

        pager.set_size(20);
        assert_eq!(pager.page, 0);

        pager.page = 2;
        pager.update_total(1);
        assert_eq!(pager.page, 0);
    }

    #[test]
    fn test_pager_without_pages() {
        let mut pager = Pager::default();
        assert!(!pager.has_next());
        assert!(!pager.next());
        assert_eq!(pager.label(), "Page 1 of 1");
    }

    #[test]
    fn test_paginate_slices() {
        let items: Vec<u32> = (0..23).collect();
        assert_eq!(total_pages(items.len(), 10), 3);
        assert_eq!(paginate(&items, 0, 10).len(), 10);
        assert_eq!(paginate(&items, 2, 10), &[20, 21, 22]);
        assert!(paginate(&items, 3, 10).is_empty());
        assert_eq!(paginate(&items, 0, 0), &[0]);
        assert_eq!(total_pages(0, 10), 0);
    }

    #[test]
    fn test_compute_stats() {
        let users = vec![user("A", "B", "a@b.c", "ACTIVE")];
        let stats = compute_stats(&catalog(), &users, &[], LOW_STOCK_THRESHOLD);
        assert_eq!(stats.total_products, 4);
        assert_eq!(stats.total_users, 1);
        assert_eq!(stats.total_files, 0);
        assert_eq!(stats.low_stock_products, 2);
    }

    #[test]
    fn test_user_sort_column_roundtrip_names() {
        assert_eq!(UserSortColumn::default().as_str(), "firstName");
        assert_eq!(UserSortColumn::parse("status"), Some(UserSortColumn::Status));
        assert_eq!(UserSortColumn::parse("nope"), None);
    }
}
