//! 買い物アイテムの保持と追加。

use uuid::Uuid;

/// 買い物リストの1行。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Item {
    /// チェック状態を紐付けるための安定ID（ラベルは重複し得る）。
    pub id: Uuid,
    /// 表示用のラベル。
    pub label: String,
}

impl Item {
    /// 新しいIDでアイテムを作成する。
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            label: label.into(),
        }
    }

    /// 一覧のアバターに使う頭文字（空ラベルは`?`）。
    pub fn initial(&self) -> String {
        self.label
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_else(|| "?".into())
    }
}

/// 全画面で共有する、挿入順のアイテム列。
#[derive(Clone, Debug, Default)]
pub struct ItemStore {
    items: Vec<Item>,
}

impl ItemStore {
    /// ラベル列から初期データを作る。空白ラベルは捨てる。
    pub fn with_defaults<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut store = Self::default();
        for label in labels {
            store.append(label.as_ref());
        }
        store
    }

    /// ラベルを末尾へ追加する。空白のみなら何もせずNoneを返す。
    pub fn append(&mut self, label: &str) -> Option<&Item> {
        // 前後の空白を落としてから判定・保存する。
        let label = label.trim();
        if label.is_empty() {
            tracing::debug!("append rejected: blank label");
            return None;
        }
        self.items.push(Item::new(label));
        tracing::info!("item appended: {label}");
        self.items.last()
    }

    /// `Item {n}` 形式の連番アイテムを追加し、そのラベルを返す。
    pub fn append_numbered(&mut self) -> String {
        // nは追加前の件数+1。
        let label = format!("Item {}", self.items.len() + 1);
        self.items.push(Item::new(label.clone()));
        tracing::info!("numbered item appended: {label}");
        label
    }

    /// 現在のアイテム列。借用中は追加できないので、読み手は一貫した列を見る。
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(store: &ItemStore) -> Vec<&str> {
        store.items().iter().map(|i| i.label.as_str()).collect()
    }

    #[test]
    fn test_append_non_blank_grows_by_one() {
        // 非空白ラベルは1件だけ末尾に増える。
        let mut store = ItemStore::with_defaults(["Susu Segar"]);
        let added = store.append("Roti Tawar").map(|i| i.label.clone());
        assert_eq!(added.as_deref(), Some("Roti Tawar"));
        assert_eq!(store.len(), 2);
        assert_eq!(labels(&store).last(), Some(&"Roti Tawar"));
    }

    #[test]
    fn test_append_trims_label() {
        // 保存されるラベルは前後の空白を除いたもの。
        let mut store = ItemStore::default();
        store.append("  Apel Fuji \t");
        assert_eq!(labels(&store), vec!["Apel Fuji"]);
    }

    #[test]
    fn test_append_blank_is_noop() {
        // 空文字・空白のみは無視される。
        let mut store = ItemStore::with_defaults(["Telur Ayam"]);
        for blank in ["", " ", "\t\n", "   "] {
            assert!(store.append(blank).is_none());
        }
        assert_eq!(labels(&store), vec!["Telur Ayam"]);
    }

    #[test]
    fn test_append_numbered_uses_pre_insert_count() {
        // 5件のストアへの連番追加は "Item 6"。
        let mut store = ItemStore::with_defaults([
            "Susu Segar",
            "Roti Tawar",
            "Telur Ayam",
            "Apel Fuji",
            "Daging Sapi",
        ]);
        assert_eq!(store.append_numbered(), "Item 6");
        assert_eq!(store.len(), 6);
        assert_eq!(labels(&store).last(), Some(&"Item 6"));
        assert_eq!(store.append_numbered(), "Item 7");
    }

    #[test]
    fn test_items_reflect_every_append() {
        // 追加後に読み直した列は挿入順で全件を含む。
        let mut store = ItemStore::with_defaults(["Susu Segar"]);
        let before: Vec<_> = store.items().iter().map(|i| i.id).collect();
        store.append("Daging Sapi");
        store.append_numbered();
        assert_eq!(before.len(), 1);
        assert_eq!(&labels(&store)[1..], ["Daging Sapi", "Item 3"]);
        assert_eq!(store.items()[0].id, before[0]);
    }

    #[test]
    fn test_duplicate_labels_get_distinct_ids() {
        // 同じラベルでもIDは別。
        let mut store = ItemStore::default();
        store.append("Roti Tawar");
        store.append("Roti Tawar");
        let ids: Vec<_> = store.items().iter().map(|i| i.id).collect();
        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn test_initial() {
        // 頭文字は大文字化、空ラベルは`?`。
        assert_eq!(Item::new("susu").initial(), "S");
        assert_eq!(Item::new("").initial(), "?");
    }
}
