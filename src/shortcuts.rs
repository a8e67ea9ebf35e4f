//! ショートカット設定の管理。

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// ショートカット設定の全体。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shortcuts {
    /// ボトムバーの行き先を左から順に選ぶキー。
    pub bottom_bar: Vec<String>,
    pub global: GlobalShortcuts,
    pub home: HomeShortcuts,
    pub setting: SettingShortcuts,
    pub detail: DetailShortcuts,
    pub drawer: DrawerShortcuts,
    pub text_input: TextInputShortcuts,
}

/// 入力欄以外のどの画面でも効くショートカット。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalShortcuts {
    pub quit: Vec<String>,
    pub drawer: Vec<String>,
    pub quick_add: Vec<String>,
}

/// ホーム画面（一覧にフォーカス中）のショートカット。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeShortcuts {
    pub down: Vec<String>,
    pub up: Vec<String>,
    pub open: Vec<String>,
    pub toggle: Vec<String>,
    pub new_item: Vec<String>,
    pub search: Vec<String>,
    pub clear_search: Vec<String>,
    pub next_focus: Vec<String>,
}

/// 設定画面のショートカット。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingShortcuts {
    pub down: Vec<String>,
    pub up: Vec<String>,
    pub toggle: Vec<String>,
    pub save: Vec<String>,
}

/// 詳細画面のショートカット。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailShortcuts {
    pub back: Vec<String>,
}

/// ドロワー表示中のショートカット。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawerShortcuts {
    pub down: Vec<String>,
    pub up: Vec<String>,
    pub select: Vec<String>,
    pub close: Vec<String>,
}

/// 入力欄編集中のショートカット。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextInputShortcuts {
    pub confirm: Vec<String>,
    pub cancel: Vec<String>,
    pub next_focus: Vec<String>,
    pub backspace: Vec<String>,
    pub delete: Vec<String>,
    pub left: Vec<String>,
    pub right: Vec<String>,
    pub home: Vec<String>,
    pub end: Vec<String>,
    pub clear_line: Vec<String>,
}

impl Shortcuts {
    /// TOMLから読み込み、無ければデフォルトを返す。
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// 押されたキーがボトムバーの何番目に当たるか。
    pub fn bottom_bar_index(&self, key: &KeyEvent) -> Option<usize> {
        self.bottom_bar
            .iter()
            .position(|s| matches_single_shortcut(key, s))
    }
}

fn keys(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for Shortcuts {
    fn default() -> Self {
        Self {
            global: GlobalShortcuts {
                quit: keys(&["q"]),
                drawer: keys(&["m"]),
                quick_add: keys(&["+"]),
            },
            home: HomeShortcuts {
                down: keys(&["Down", "j"]),
                up: keys(&["Up", "k"]),
                open: keys(&["Enter"]),
                toggle: keys(&["Space", "x"]),
                new_item: keys(&["i", "a"]),
                search: keys(&["/"]),
                clear_search: keys(&["Esc"]),
                next_focus: keys(&["Tab"]),
            },
            setting: SettingShortcuts {
                down: keys(&["Down", "j"]),
                up: keys(&["Up", "k"]),
                toggle: keys(&["Space", "Enter"]),
                save: keys(&["s"]),
            },
            detail: DetailShortcuts {
                back: keys(&["Esc", "Backspace", "b"]),
            },
            drawer: DrawerShortcuts {
                down: keys(&["Down", "j"]),
                up: keys(&["Up", "k"]),
                select: keys(&["Enter"]),
                close: keys(&["Esc", "m"]),
            },
            bottom_bar: keys(&["1", "2"]),
            text_input: TextInputShortcuts {
                confirm: keys(&["Enter"]),
                cancel: keys(&["Esc"]),
                next_focus: keys(&["Tab"]),
                backspace: keys(&["Backspace"]),
                delete: keys(&["Delete"]),
                left: keys(&["Left"]),
                right: keys(&["Right"]),
                home: keys(&["Home"]),
                end: keys(&["End"]),
                clear_line: keys(&["Ctrl+u"]),
            },
        }
    }
}

/// KeyEventがいずれかのショートカット文字列と一致するか判定する。
pub fn matches_shortcut(key: &KeyEvent, shortcuts: &[String]) -> bool {
    shortcuts.iter().any(|s| matches_single_shortcut(key, s))
}

/// ショートカット文字列を修飾キーとキー名に分ける。
fn split_shortcut(shortcut: &str) -> (Vec<&str>, &str) {
    // 末尾の"+"はキーそのもの（例: "+", "Ctrl++"）。
    if let Some(head) = shortcut.strip_suffix('+')
        && (head.is_empty() || head.ends_with('+'))
    {
        let mods = head
            .trim_end_matches('+')
            .split('+')
            .filter(|s| !s.is_empty())
            .collect();
        return (mods, "+");
    }
    let mut parts: Vec<&str> = shortcut.split('+').collect();
    let key = parts.pop().unwrap_or_default();
    (parts, key)
}

/// KeyEventが単一のショートカット文字列と一致するか判定する。
fn matches_single_shortcut(key: &KeyEvent, shortcut: &str) -> bool {
    let (modifiers_str, key_str) = split_shortcut(shortcut);

    // 修飾キーを解析して期待値を作る。
    let mut expected_modifiers = KeyModifiers::empty();
    for modifier in modifiers_str {
        match modifier {
            "Ctrl" | "ctrl" => expected_modifiers |= KeyModifiers::CONTROL,
            "Alt" | "alt" => expected_modifiers |= KeyModifiers::ALT,
            "Shift" | "shift" => expected_modifiers |= KeyModifiers::SHIFT,
            _ => return false,
        }
    }

    // 文字キーのShiftは記号や大文字の入力に含まれるので比較から外す。
    let actual_modifiers = match key.code {
        KeyCode::Char(_) => key.modifiers.difference(KeyModifiers::SHIFT),
        _ => key.modifiers,
    };
    if actual_modifiers != expected_modifiers {
        return false;
    }

    match key_str {
        "Enter" | "enter" => key.code == KeyCode::Enter,
        "Esc" | "esc" => key.code == KeyCode::Esc,
        "Tab" | "tab" => key.code == KeyCode::Tab,
        "BackTab" | "backtab" => key.code == KeyCode::BackTab,
        "Space" | "space" => key.code == KeyCode::Char(' '),
        "Backspace" | "backspace" => key.code == KeyCode::Backspace,
        "Delete" | "delete" => key.code == KeyCode::Delete,
        "Up" | "up" => key.code == KeyCode::Up,
        "Down" | "down" => key.code == KeyCode::Down,
        "Left" | "left" => key.code == KeyCode::Left,
        "Right" | "right" => key.code == KeyCode::Right,
        "Home" | "home" => key.code == KeyCode::Home,
        "End" | "end" => key.code == KeyCode::End,
        s => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => key.code == KeyCode::Char(c),
                _ => false,
            }
        }
    }
}

/// ショートカットキーの配列を表示用文字列に変換する。
pub fn format_keys(keys: &[String]) -> String {
    keys.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_shortcut_simple_char() {
        // 単一文字の一致判定を検証する。
        let key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::empty());
        assert!(matches_shortcut(&key, &[String::from("q")]));
        assert!(!matches_shortcut(&key, &[String::from("w")]));
    }

    #[test]
    fn test_matches_shortcut_special_key() {
        // 特殊キーの一致判定を検証する。
        let key = KeyEvent::new(KeyCode::Enter, KeyModifiers::empty());
        assert!(matches_shortcut(&key, &[String::from("Enter")]));
        assert!(!matches_shortcut(&key, &[String::from("Esc")]));
    }

    #[test]
    fn test_matches_shortcut_with_modifier() {
        // 修飾キー付きの一致判定を検証する。
        let key = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL);
        assert!(matches_shortcut(&key, &[String::from("Ctrl+u")]));
        assert!(!matches_shortcut(&key, &[String::from("u")]));
    }

    #[test]
    fn test_matches_plus_key() {
        // "+" はShift付きで届いても一致する。
        let plain = KeyEvent::new(KeyCode::Char('+'), KeyModifiers::empty());
        let shifted = KeyEvent::new(KeyCode::Char('+'), KeyModifiers::SHIFT);
        let sc = [String::from("+")];
        assert!(matches_shortcut(&plain, &sc));
        assert!(matches_shortcut(&shifted, &sc));
        let ctrl = KeyEvent::new(KeyCode::Char('+'), KeyModifiers::CONTROL);
        assert!(matches_shortcut(&ctrl, &[String::from("Ctrl++")]));
        assert!(!matches_shortcut(&ctrl, &sc));
    }

    #[test]
    fn test_matches_space() {
        let key = KeyEvent::new(KeyCode::Char(' '), KeyModifiers::empty());
        assert!(matches_shortcut(&key, &[String::from("Space")]));
    }

    #[test]
    fn test_matches_shortcut_multiple_keys() {
        // 複数キーバインドの一致判定を検証する。
        let key_up = KeyEvent::new(KeyCode::Up, KeyModifiers::empty());
        let key_k = KeyEvent::new(KeyCode::Char('k'), KeyModifiers::empty());
        let shortcuts = vec![String::from("Up"), String::from("k")];

        assert!(matches_shortcut(&key_up, &shortcuts));
        assert!(matches_shortcut(&key_k, &shortcuts));

        let key_j = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::empty());
        assert!(!matches_shortcut(&key_j, &shortcuts));
    }

    #[test]
    fn test_bottom_bar_index() {
        // 数字キーはボトムバーの位置に対応する。
        let sc = Shortcuts::default();
        let two = KeyEvent::new(KeyCode::Char('2'), KeyModifiers::empty());
        let nine = KeyEvent::new(KeyCode::Char('9'), KeyModifiers::empty());
        assert_eq!(sc.bottom_bar_index(&two), Some(1));
        assert_eq!(sc.bottom_bar_index(&nine), None);
    }

    #[test]
    fn test_defaults_round_trip_through_toml() {
        // 既定値はTOMLへ書き出して読み戻せる。
        let sc = Shortcuts::default();
        let text = toml::to_string_pretty(&sc).unwrap();
        let back: Shortcuts = toml::from_str(&text).unwrap();
        assert_eq!(back.global.quick_add, vec!["+".to_string()]);
        assert_eq!(back.bottom_bar.len(), 2);
    }
}
