//! ホーム画面と設定画面が持つ画面固有の状態。

use std::collections::HashSet;

use uuid::Uuid;

use crate::{
    config::PreferencesCfg,
    filter::filter_items,
    input::TextInput,
    store::{Item, ItemStore},
};

/// ホーム画面でキー入力を受ける部品。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HomeFocus {
    List,
    NewItem,
    Search,
}

impl HomeFocus {
    /// Tabで巡回する次のフォーカス。
    pub fn next(self) -> Self {
        match self {
            HomeFocus::List => HomeFocus::NewItem,
            HomeFocus::NewItem => HomeFocus::Search,
            HomeFocus::Search => HomeFocus::List,
        }
    }
}

/// ホーム画面の状態。アイテム本体は共有ストア側にある。
#[derive(Clone, Debug)]
pub struct HomeState {
    pub focus: HomeFocus,
    /// 絞り込み後の一覧における選択行。
    pub selected: usize,
    pub new_item: TextInput,
    pub search: TextInput,
    /// チェック済みアイテムのID。
    pub checked: HashSet<Uuid>,
}

impl HomeState {
    pub fn new() -> Self {
        Self {
            focus: HomeFocus::List,
            selected: 0,
            new_item: TextInput::default(),
            search: TextInput::default(),
            checked: HashSet::new(),
        }
    }

    /// 現在の検索語で絞り込んだ一覧。
    pub fn visible<'a>(&self, store: &'a ItemStore) -> Vec<&'a Item> {
        filter_items(store.items(), &self.search.value)
    }

    /// 選択中のアイテム。
    pub fn selected_item<'a>(&self, store: &'a ItemStore) -> Option<&'a Item> {
        self.visible(store).get(self.selected).copied()
    }

    pub fn move_down(&mut self, len: usize) {
        if self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// 一覧が縮んだときに選択行を範囲内へ戻す。
    pub fn clamp(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    /// チェック状態を反転し、反転後の値を返す。
    pub fn toggle_checked(&mut self, id: Uuid) -> bool {
        if self.checked.remove(&id) {
            false
        } else {
            self.checked.insert(id);
            true
        }
    }

    pub fn is_checked(&self, id: Uuid) -> bool {
        self.checked.contains(&id)
    }
}

impl Default for HomeState {
    fn default() -> Self {
        Self::new()
    }
}

/// 設定画面のトグル項目。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettingToggle {
    Notifications,
    DarkMode,
}

/// 設定画面に並ぶ順序。
pub const SETTING_TOGGLES: [SettingToggle; 2] =
    [SettingToggle::Notifications, SettingToggle::DarkMode];

impl SettingToggle {
    pub fn title(self) -> &'static str {
        match self {
            SettingToggle::Notifications => "Notifikasi",
            SettingToggle::DarkMode => "Mode Gelap",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            SettingToggle::Notifications => "Aktifkan untuk menerima pengingat belanja",
            SettingToggle::DarkMode => "Sesuaikan tampilan dengan preferensi gelap",
        }
    }

    pub fn value(self, prefs: &PreferencesCfg) -> bool {
        match self {
            SettingToggle::Notifications => prefs.notifications,
            SettingToggle::DarkMode => prefs.dark_mode,
        }
    }

    /// 値を反転し、反転後の値を返す。
    pub fn toggle(self, prefs: &mut PreferencesCfg) -> bool {
        let slot = match self {
            SettingToggle::Notifications => &mut prefs.notifications,
            SettingToggle::DarkMode => &mut prefs.dark_mode,
        };
        *slot = !*slot;
        *slot
    }
}

/// 設定画面のカーソルと未保存フラグ。
#[derive(Clone, Debug, Default)]
pub struct SettingsForm {
    pub cursor: usize,
    /// 保存後に変更があるか。
    pub dirty: bool,
}

impl SettingsForm {
    pub fn current(&self) -> SettingToggle {
        SETTING_TOGGLES[self.cursor.min(SETTING_TOGGLES.len() - 1)]
    }

    pub fn move_down(&mut self) {
        if self.cursor + 1 < SETTING_TOGGLES.len() {
            self.cursor += 1;
        }
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }
}
