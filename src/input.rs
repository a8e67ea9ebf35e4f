//! 画面内に埋め込む1行テキスト入力欄。

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

/// 1行入力欄の状態。
#[derive(Clone, Debug, Default)]
pub struct TextInput {
    /// 現在の入力値。
    pub value: String,
    /// カーソル位置（文字単位）。
    pub cursor: usize,
}

impl TextInput {
    /// 文字単位の位置をバイト位置へ変換する。
    fn byte_index(&self, char_pos: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_pos)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    /// カーソル位置に文字を挿入する。
    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    /// カーソル直前の1文字を削除する。
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.value.remove(at);
    }

    /// カーソル位置の1文字を削除する。
    pub fn delete(&mut self) {
        if self.cursor < self.char_count() {
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_count());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    /// 入力値を空にする。
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }
}

/// 入力欄を枠付きで描画する。フォーカス中はカーソル位置に`|`を出す。
pub fn render_text_input(
    f: &mut Frame,
    area: Rect,
    state: &TextInput,
    title: &str,
    focused: bool,
    accent: Color,
) {
    // 枠内の表示幅（左右の枠線ぶんを除く）。
    let width = area.width.saturating_sub(2) as usize;
    // カーソルが見える位置まで横スクロールする。
    let scroll = state.cursor.saturating_sub(width.saturating_sub(1));
    let visible: String = state.value.chars().skip(scroll).take(width).collect();

    let text = if focused {
        let split = state.cursor - scroll;
        let before: String = visible.chars().take(split).collect();
        let after: String = visible.chars().skip(split).collect();
        format!("{before}|{after}")
    } else {
        visible
    };

    let border_style = if focused {
        Style::default().fg(accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let widget = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title.to_string()),
    );
    f.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(s: &str) -> TextInput {
        let mut input = TextInput::default();
        for c in s.chars() {
            input.insert_char(c);
        }
        input
    }

    #[test]
    fn test_insert_and_backspace() {
        // 末尾への入力と削除。
        let mut input = typed("Roti");
        assert_eq!(input.value, "Roti");
        assert_eq!(input.cursor, 4);
        input.backspace();
        assert_eq!(input.value, "Rot");
        assert_eq!(input.cursor, 3);
    }

    #[test]
    fn test_insert_in_middle_multibyte() {
        // マルチバイト文字を含む中間挿入。
        let mut input = typed("äpfel");
        input.move_home();
        input.move_right();
        input.insert_char('x');
        assert_eq!(input.value, "äxpfel");
        input.move_end();
        input.delete();
        assert_eq!(input.value, "äxpfel");
        input.move_home();
        input.delete();
        assert_eq!(input.value, "xpfel");
    }

    #[test]
    fn test_cursor_bounds() {
        // カーソルは0..=文字数に収まる。
        let mut input = typed("ab");
        input.move_right();
        assert_eq!(input.cursor, 2);
        input.move_home();
        input.move_left();
        assert_eq!(input.cursor, 0);
        input.backspace();
        assert_eq!(input.value, "ab");
    }

    #[test]
    fn test_clear() {
        // clearで空に戻る。
        let mut input = typed("Telur");
        input.clear();
        assert_eq!(input.cursor, 0);
        assert!(input.value.is_empty());
    }
}
