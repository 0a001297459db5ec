use super::*;
use serde_json::{json, Value};
use shared::domain::{Product, ProductId};

fn numbered(count: usize) -> Vec<Value> {
    (1..=count).map(|id| json!({ "id": id })).collect()
}

fn ids(items: &[Value]) -> Vec<u64> {
    items.iter().filter_map(|item| item["id"].as_u64()).collect()
}

fn priced(prices: &[f64]) -> Vec<Product> {
    prices
        .iter()
        .enumerate()
        .map(|(idx, price)| Product::new(ProductId(idx as i64 + 1)).with_attribute("price", *price))
        .collect()
}

#[test]
fn rejects_zero_page_size() {
    assert_eq!(
        ResultList::<Value>::new(0).err(),
        Some(PaginationError::ZeroPageSize)
    );
}

#[test]
fn default_list_uses_nine_items_per_page() {
    let list = ResultList::<Value>::default();
    assert_eq!(list.page_size(), DEFAULT_PAGE_SIZE);
    assert_eq!(list.page_size(), 9);
}

#[test]
fn reads_before_any_load_behave_as_empty() {
    let mut list = ResultList::<Value>::new(9).expect("list");
    assert!(list.current_page_items().is_empty());
    assert_eq!(list.total_pages(), 1);
    list.go_to_page(3);
    assert_eq!(list.current_page(), 1);
}

#[test]
fn empty_load_has_one_empty_page() {
    let mut list = ResultList::<Value>::new(9).expect("list");
    list.load(Vec::new());
    assert!(list.current_page_items().is_empty());
    assert_eq!(list.total_pages(), 1);
    assert!(list.is_empty());
    assert!(!list.has_next());
    assert!(!list.has_previous());
}

#[test]
fn pages_cover_every_item_exactly_once_in_order() {
    for len in [0usize, 1, 8, 9, 10, 17, 18, 19, 100] {
        for page_size in [1usize, 4, 9, 25] {
            let mut list = ResultList::new(page_size).expect("list");
            list.load(numbered(len));

            let mut seen = Vec::new();
            for page in 1..=list.total_pages() {
                list.go_to_page(page as i64);
                seen.extend(ids(list.current_page_items()));
            }

            let expected: Vec<u64> = (1..=len as u64).collect();
            assert_eq!(seen, expected, "len={len} page_size={page_size}");
            assert_eq!(list.total_pages(), len.div_ceil(page_size).max(1));
        }
    }
}

#[test]
fn last_page_is_truncated() {
    let mut list = ResultList::new(9).expect("list");
    list.load(numbered(20));
    list.go_to_page(3);
    assert_eq!(ids(list.current_page_items()), vec![19, 20]);
}

#[test]
fn go_to_page_clamps_any_input() {
    let mut list = ResultList::new(9).expect("list");
    list.load(numbered(30));

    for (requested, expected) in [
        (i64::MIN, 1),
        (-5, 1),
        (0, 1),
        (1, 1),
        (3, 3),
        (4, 4),
        (5, 4),
        (i64::MAX, 4),
    ] {
        list.go_to_page(requested);
        assert_eq!(list.current_page(), expected, "requested {requested}");
    }
}

#[test]
fn load_resets_to_first_page() {
    let mut list = ResultList::new(2).expect("list");
    list.load(numbered(10));
    list.go_to_page(4);
    list.load(numbered(3));
    assert_eq!(list.current_page(), 1);
    assert_eq!(ids(list.current_page_items()), vec![1, 2]);
}

#[test]
fn failed_load_clears_and_resets() {
    let mut list = ResultList::new(2).expect("list");
    list.load(numbered(10));
    list.go_to_page(3);

    list.load_result::<String>(Err("HTTP 500: Internal Server Error".to_string()));
    assert!(list.is_empty());
    assert_eq!(list.current_page(), 1);
    assert_eq!(list.total_pages(), 1);

    list.load_result::<String>(Ok(numbered(5)));
    assert_eq!(list.len(), 5);
}

#[test]
fn sorts_by_price_in_both_directions() {
    let mut list = ResultList::new(9).expect("list");
    list.load(priced(&[30.0, 10.0, 20.0]));

    list.sort_by(&SortKey::parse("price"), SortOrder::Ascending);
    let prices: Vec<f64> = list.items().iter().filter_map(Product::price).collect();
    assert_eq!(prices, vec![10.0, 20.0, 30.0]);

    list.sort_by(&SortKey::parse("price"), SortOrder::Descending);
    let prices: Vec<f64> = list.items().iter().filter_map(Product::price).collect();
    assert_eq!(prices, vec![30.0, 20.0, 10.0]);
}

#[test]
fn sorts_titles_case_insensitively() {
    let mut list = ResultList::new(9).expect("list");
    list.load(vec![
        Product::new(ProductId(1)).with_attribute("title", "banana"),
        Product::new(ProductId(2)).with_attribute("title", "Apple"),
    ]);

    list.sort_by(&SortKey::parse("title"), SortOrder::Ascending);
    let titles: Vec<&str> = list.items().iter().map(Product::title).collect();
    assert_eq!(titles, vec!["Apple", "banana"]);
}

#[test]
fn missing_rating_sorts_as_zero() {
    let mut list = ResultList::new(9).expect("list");
    list.load(vec![
        Product::new(ProductId(1)).with_attribute("rating", 4.5),
        Product::new(ProductId(2)),
        Product::new(ProductId(3)).with_attribute("rating", 0.5),
    ]);

    list.sort_by(&SortKey::parse("rating"), SortOrder::Ascending);
    let ids: Vec<i64> = list.items().iter().filter_map(|p| p.id).map(|id| id.0).collect();
    assert_eq!(ids, vec![2, 3, 1]);
}

#[test]
fn sorting_resets_to_first_page() {
    let mut list = ResultList::new(2).expect("list");
    list.load(priced(&[5.0, 4.0, 3.0, 2.0, 1.0]));
    list.go_to_page(3);
    list.sort_by(&SortKey::parse("price"), SortOrder::Ascending);
    assert_eq!(list.current_page(), 1);
    let first: Vec<f64> = list
        .current_page_items()
        .iter()
        .filter_map(Product::price)
        .collect();
    assert_eq!(first, vec![1.0, 2.0]);
}

#[test]
fn page_window_follows_current_page() {
    let mut list = ResultList::new(9).expect("list");
    list.load(numbered(90));
    assert_eq!(list.total_pages(), 10);

    list.go_to_page(1);
    assert_eq!(list.page_window(5), vec![1, 2, 3, 4, 5]);
    list.go_to_page(10);
    assert_eq!(list.page_window(5), vec![6, 7, 8, 9, 10]);
    list.go_to_page(5);
    assert_eq!(list.page_window(5), vec![3, 4, 5, 6, 7]);
}

#[test]
fn page_window_is_clipped_to_available_pages() {
    let mut list = ResultList::new(9).expect("list");
    list.load(numbered(20));
    list.go_to_page(2);
    assert_eq!(list.page_window(5), vec![1, 2, 3]);
    assert!(list.page_window(0).is_empty());

    list.load(Vec::new());
    assert_eq!(list.page_window(5), vec![1]);
}

#[test]
fn oversized_page_window_lists_every_page() {
    let mut list = ResultList::new(9).expect("list");
    list.load(numbered(90));
    list.go_to_page(3);
    assert_eq!(list.page_window(usize::MAX), (1..=10).collect::<Vec<_>>());
    assert_eq!(list.page_window(usize::MAX - 1), (1..=10).collect::<Vec<_>>());
}

#[test]
fn previous_and_next_stay_in_range() {
    let mut list = ResultList::new(9).expect("list");
    list.load(numbered(10));
    list.previous_page();
    assert_eq!(list.current_page(), 1);
    list.next_page();
    list.next_page();
    assert_eq!(list.current_page(), 2);
    assert!(list.has_previous());
    assert!(!list.has_next());
}

#[test]
fn snapshot_serializes_current_page() {
    let mut list = ResultList::new(2).expect("list");
    list.load(numbered(5));
    list.go_to_page(2);

    let view = serde_json::to_value(list.snapshot(5)).expect("serialize");
    assert_eq!(
        view,
        json!({
            "total_items": 5,
            "total_pages": 3,
            "current_page": 2,
            "per_page": 2,
            "has_previous": true,
            "has_next": true,
            "page_window": [1, 2, 3],
            "items": [{ "id": 3 }, { "id": 4 }]
        })
    );
}
