//! ドロワーとボトムバーの行き先定義と選択状態。

use crate::navigation::{Navigator, Route, RouteChange};

/// ドロワー/ボトムバーに並ぶ行き先1件。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Destination {
    pub route: Route,
    pub label: &'static str,
    /// 端末で描画するアイコン文字。
    pub icon: &'static str,
}

/// ボトムバーの行き先（表示順）。
pub const BOTTOM_DESTINATIONS: &[Destination] = &[
    Destination {
        route: Route::Home,
        label: "Home",
        icon: "⌂",
    },
    Destination {
        route: Route::Profile,
        label: "Profile",
        icon: "☺",
    },
];

/// ドロワーの行き先（表示順）。
pub const DRAWER_DESTINATIONS: &[Destination] = &[Destination {
    route: Route::Setting,
    label: "Setting",
    icon: "⚙",
}];

/// 行き先を選んで遷移させる。同じ行き先なら遷移なし。
pub fn select(nav: &mut Navigator, dest: &Destination) -> Option<RouteChange> {
    tracing::debug!("destination selected: {}", dest.label);
    nav.navigate(dest.route)
}

/// ボトムバーの位置（0始まり）から行き先を選ぶ。
pub fn select_bottom(nav: &mut Navigator, index: usize) -> Option<RouteChange> {
    let dest = BOTTOM_DESTINATIONS.get(index)?;
    select(nav, dest)
}

/// ドロワーの開閉とカーソル位置。
#[derive(Clone, Debug, Default)]
pub struct DrawerState {
    pub open: bool,
    pub cursor: usize,
}

impl DrawerState {
    /// 開閉を切り替える。開くときはカーソルを現在ルートへ合わせる。
    pub fn toggle(&mut self, current: Route) {
        if self.open {
            self.close();
        } else {
            self.open = true;
            self.cursor = DRAWER_DESTINATIONS
                .iter()
                .position(|d| d.route == current)
                .unwrap_or(0);
        }
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn move_down(&mut self) {
        if self.cursor + 1 < DRAWER_DESTINATIONS.len() {
            self.cursor += 1;
        }
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// カーソル位置の行き先へ遷移し、ドロワーを閉じる。
    pub fn activate(&mut self, nav: &mut Navigator) -> Option<RouteChange> {
        let change = DRAWER_DESTINATIONS
            .get(self.cursor)
            .and_then(|dest| select(nav, dest));
        self.close();
        change
    }
}
