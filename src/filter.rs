//! 検索クエリによるアイテム絞り込み。

use crate::store::Item;

/// クエリを部分文字列として含むアイテムだけを元の順序で返す。
///
/// 大文字小文字は区別しない。クエリが空または空白のみなら全件をそのまま返す。
pub fn filter_items<'a>(items: &'a [Item], query: &str) -> Vec<&'a Item> {
    if query.trim().is_empty() {
        return items.iter().collect();
    }
    let needle = query.to_lowercase();
    items
        .iter()
        .filter(|item| item.label.to_lowercase().contains(&needle))
        .collect()
}
