//! 画面ルートと遷移状態機械。
//!
//! 現在の画面は [`View`] 一つで表し、詳細画面だけが選択アイテムを持つ。
//! これにより「ルートがDetailのときに限り選択アイテムがある」ことを型で保証する。

/// 表示可能な画面の閉じた集合。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Profile,
    Setting,
    Detail,
}

/// 遷移方向を決めるためのルート順序。
pub const ROUTE_ORDER: [Route; 3] = [Route::Home, Route::Profile, Route::Setting];

impl Route {
    /// ルートの識別名。
    pub fn key(self) -> &'static str {
        match self {
            Route::Home => "home",
            Route::Profile => "profile",
            Route::Setting => "setting",
            Route::Detail => "detail",
        }
    }

    /// 上部バーに出す画面タイトル。
    pub fn title(self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Profile => "Profile",
            Route::Setting => "Setting",
            Route::Detail => "Detail",
        }
    }

    /// 順序上の位置。DetailはHomeの子としてHomeと同じ位置に置く。
    pub fn order_index(self) -> usize {
        let anchor = if self == Route::Detail {
            Route::Home
        } else {
            self
        };
        ROUTE_ORDER
            .iter()
            .position(|r| *r == anchor)
            .unwrap_or_default()
    }
}

/// 画面切り替え時のスライド方向。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slide {
    /// 新画面は後端から入り、旧画面は先端側へ抜ける。
    Forward,
    /// Forwardの逆。
    Backward,
    /// Home→Detail固有の全幅スライド。
    IntoDetail,
    /// Detail→Home固有の全幅スライド。
    OutOfDetail,
}

/// 2つのルート間のスライド方向。同じルートならNone。
pub fn slide_between(from: Route, to: Route) -> Option<Slide> {
    match (from, to) {
        _ if from == to => None,
        (Route::Home, Route::Detail) => Some(Slide::IntoDetail),
        (Route::Detail, Route::Home) => Some(Slide::OutOfDetail),
        _ if to.order_index() > from.order_index() => Some(Slide::Forward),
        _ => Some(Slide::Backward),
    }
}

/// 現在の画面と、その画面が持つ状態。
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum View {
    Home,
    Profile,
    Setting,
    Detail { item: String },
}

impl View {
    pub fn route(&self) -> Route {
        match self {
            View::Home => Route::Home,
            View::Profile => Route::Profile,
            View::Setting => Route::Setting,
            View::Detail { .. } => Route::Detail,
        }
    }
}

/// 実際に起きた画面遷移。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteChange {
    pub from: Route,
    pub to: Route,
    pub slide: Slide,
}

/// 画面遷移の状態機械。戻り履歴は持たない。
#[derive(Clone, Debug)]
pub struct Navigator {
    view: View,
}

impl Navigator {
    /// Homeから開始する。
    pub fn new() -> Self {
        Self { view: View::Home }
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn route(&self) -> Route {
        self.view.route()
    }

    /// 詳細画面で表示中のアイテム。
    pub fn selected_item(&self) -> Option<&str> {
        match &self.view {
            View::Detail { item } => Some(item),
            _ => None,
        }
    }

    /// Homeでアイテムを選び詳細画面へ進む。Home以外では無視する。
    pub fn open_detail(&mut self, item: impl Into<String>) -> Option<RouteChange> {
        if self.route() != Route::Home {
            tracing::debug!("open_detail ignored on {}", self.route().key());
            return None;
        }
        self.set_view(View::Detail { item: item.into() })
    }

    /// 詳細画面からHomeへ戻る。どこから来たかに関係なく常にHome。
    pub fn back(&mut self) -> Option<RouteChange> {
        if self.route() != Route::Detail {
            return None;
        }
        self.set_view(View::Home)
    }

    /// ドロワーやボトムバーからの遷移。Detailはペイロードが要るため対象外。
    pub fn navigate(&mut self, to: Route) -> Option<RouteChange> {
        let view = match to {
            Route::Home => View::Home,
            Route::Profile => View::Profile,
            Route::Setting => View::Setting,
            Route::Detail => {
                tracing::warn!("navigate to detail without an item ignored");
                return None;
            }
        };
        self.set_view(view)
    }

    /// 画面を差し替え、ルートが変わった場合だけ遷移を返す。
    fn set_view(&mut self, view: View) -> Option<RouteChange> {
        let from = self.route();
        let to = view.route();
        self.view = view;
        let slide = slide_between(from, to)?;
        tracing::info!("route {} -> {}", from.key(), to.key());
        Some(RouteChange { from, to, slide })
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_invariant(nav: &Navigator) {
        // Detail ⇔ 選択アイテムあり。
        assert_eq!(nav.route() == Route::Detail, nav.selected_item().is_some());
    }

    #[test]
    fn test_starts_at_home() {
        // 初期状態はHomeで選択なし。
        let nav = Navigator::new();
        assert_eq!(nav.route(), Route::Home);
        assert_invariant(&nav);
    }

    #[test]
    fn test_detail_round_trip() {
        // Home→Detail("Apel Fuji")→Home。
        let mut nav = Navigator::new();
        let change = nav.open_detail("Apel Fuji");
        assert_eq!(change.map(|c| c.slide), Some(Slide::IntoDetail));
        assert_eq!(nav.route(), Route::Detail);
        assert_eq!(nav.selected_item(), Some("Apel Fuji"));
        assert_invariant(&nav);

        let change = nav.back();
        assert_eq!(change.map(|c| c.slide), Some(Slide::OutOfDetail));
        assert_eq!(nav.route(), Route::Home);
        assert_eq!(nav.selected_item(), None);
        assert_invariant(&nav);
    }

    #[test]
    fn test_destination_direction() {
        // Home→Settingは前進、Setting→Homeは後退。
        let mut nav = Navigator::new();
        let change = nav.navigate(Route::Setting);
        assert_eq!(
            change,
            Some(RouteChange {
                from: Route::Home,
                to: Route::Setting,
                slide: Slide::Forward,
            })
        );
        let change = nav.navigate(Route::Home);
        assert_eq!(change.map(|c| c.slide), Some(Slide::Backward));
        assert_eq!(nav.route(), Route::Home);
    }

    #[test]
    fn test_reselect_same_route_is_noop() {
        // 現在と同じ行き先は遷移なし。
        let mut nav = Navigator::new();
        assert!(nav.navigate(Route::Home).is_none());
        nav.navigate(Route::Profile);
        assert!(nav.navigate(Route::Profile).is_none());
        assert_eq!(nav.route(), Route::Profile);
    }

    #[test]
    fn test_open_detail_only_from_home() {
        // Home以外からの詳細遷移は無視される。
        let mut nav = Navigator::new();
        nav.navigate(Route::Profile);
        assert!(nav.open_detail("Roti Tawar").is_none());
        assert_eq!(nav.route(), Route::Profile);
        assert_invariant(&nav);
    }

    #[test]
    fn test_back_outside_detail_is_noop() {
        // Detail以外での戻るは何もしない。
        let mut nav = Navigator::new();
        nav.navigate(Route::Setting);
        assert!(nav.back().is_none());
        assert_eq!(nav.route(), Route::Setting);
    }

    #[test]
    fn test_navigate_away_from_detail_clears_selection() {
        // 行き先選択でDetailを離れると選択は消える。
        let mut nav = Navigator::new();
        nav.open_detail("Telur Ayam");
        let change = nav.navigate(Route::Profile);
        assert_eq!(change.map(|c| c.slide), Some(Slide::Forward));
        assert_eq!(nav.selected_item(), None);
        assert_invariant(&nav);
    }

    #[test]
    fn test_navigate_to_detail_rejected() {
        // ペイロードなしのDetail遷移は拒否する。
        let mut nav = Navigator::new();
        assert!(nav.navigate(Route::Detail).is_none());
        assert_eq!(nav.route(), Route::Home);
    }

    #[test]
    fn test_slide_between_order() {
        // 順序 [Home, Profile, Setting] に従う。
        assert_eq!(slide_between(Route::Home, Route::Profile), Some(Slide::Forward));
        assert_eq!(slide_between(Route::Profile, Route::Setting), Some(Slide::Forward));
        assert_eq!(slide_between(Route::Setting, Route::Profile), Some(Slide::Backward));
        assert_eq!(slide_between(Route::Profile, Route::Home), Some(Slide::Backward));
        assert_eq!(slide_between(Route::Setting, Route::Setting), None);
    }
}
