//! レイアウト計算のヘルパー関数

use ratatui::prelude::*;

/// 全画面共通の4つの領域
pub struct MainLayout {
    /// タイトルとメニュー表示の上部バー
    pub top_bar: Rect,
    /// 各画面の本体
    pub body: Rect,
    /// ボトムナビゲーション
    pub bottom_bar: Rect,
    /// STATUSバー
    pub status_bar: Rect,
}

/// ホーム画面の3つの領域
pub struct HomeLayout {
    /// 新規アイテム入力欄
    pub new_item: Rect,
    /// 検索欄
    pub search: Rect,
    /// アイテム一覧
    pub list: Rect,
}

/// 画面を上部バー・本体・ボトムバー・STATUSに分割
pub fn create_main_layout(area: Rect) -> MainLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // 上部バー
            Constraint::Min(1),    // 本体
            Constraint::Length(3), // ボトムバー
            Constraint::Length(3), // STATUSバー
        ])
        .split(area);

    MainLayout {
        top_bar: chunks[0],
        body: chunks[1],
        bottom_bar: chunks[2],
        status_bar: chunks[3],
    }
}

/// ホーム本体を入力欄2つと一覧に分割
pub fn create_home_layout(area: Rect) -> HomeLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // 新規入力
            Constraint::Length(3), // 検索
            Constraint::Min(1),    // 一覧
        ])
        .split(area);

    HomeLayout {
        new_item: chunks[0],
        search: chunks[1],
        list: chunks[2],
    }
}

/// 左端から幅2/3のドロワー領域
pub fn drawer_area(area: Rect) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(66), Constraint::Min(0)])
        .split(area);
    chunks[0]
}

/// 本体下端に重ねるトースト領域
pub fn toast_area(body: Rect) -> Rect {
    let height = 3.min(body.height);
    let width = body.width.saturating_sub(4).min(60);
    Rect {
        x: body.x + (body.width.saturating_sub(width)) / 2,
        y: body.y + body.height.saturating_sub(height),
        width,
        height,
    }
}

/// スライド中の画面を横にずらした描画領域。はみ出した部分は切り捨てる。
pub fn shifted(area: Rect, offset: i32) -> Rect {
    let shift = offset.unsigned_abs().min(u32::from(area.width)) as u16;
    if offset >= 0 {
        // 右から入ってくる: 左端を押し出す。
        Rect {
            x: area.x + shift,
            width: area.width - shift,
            ..area
        }
    } else {
        // 左から入ってくる: 右端を削る。
        Rect {
            width: area.width - shift,
            ..area
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shifted_clamps_to_area() {
        // ずれ量は領域幅を超えない。
        let area = Rect::new(0, 0, 40, 10);
        assert_eq!(shifted(area, 10), Rect::new(10, 0, 30, 10));
        assert_eq!(shifted(area, -10), Rect::new(0, 0, 30, 10));
        assert_eq!(shifted(area, 100).width, 0);
        assert_eq!(shifted(area, 0), area);
    }

    #[test]
    fn test_toast_sits_at_bottom() {
        let body = Rect::new(0, 3, 80, 20);
        let t = toast_area(body);
        assert_eq!(t.y + t.height, body.y + body.height);
        assert!(t.width <= 60);
    }
}
