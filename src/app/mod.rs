//! TUIのイベントループと、全画面で共有するアプリ状態。

mod handlers;
mod render;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use std::{
    path::PathBuf,
    time::{Duration, Instant},
};
use tokio::{sync::mpsc, time::MissedTickBehavior};

use crate::{
    config::Config,
    events::{AppEvent, UiState},
    menu::DrawerState,
    navigation::{Navigator, Route, RouteChange},
    screens::{HomeFocus, HomeState, SettingsForm},
    shortcuts::Shortcuts,
    store::ItemStore,
    transition::Transition,
    ui::Tui,
};

use handlers::{handle_key, is_ctrl_c};
use render::draw;

/// 入力処理と描画で共有するアプリ状態。メインタスクだけが変更する。
pub struct App {
    /// 永続化された設定ファイルのパス。
    pub cfg_path: PathBuf,
    /// メモリ上の現在設定。
    pub cfg: Config,
    /// ステータスやトーストなどUI固有の状態。
    pub ui: UiState,
    /// 全画面で共有する買い物アイテム。
    pub store: ItemStore,
    /// 現在の画面と選択アイテム。
    pub nav: Navigator,
    /// ドロワーの開閉状態。
    pub drawer: DrawerState,
    /// ホーム画面の入力欄と一覧の状態。
    pub home: HomeState,
    /// 設定画面のカーソル。
    pub settings: SettingsForm,
    /// 進行中の画面切り替え。
    pub transition: Option<Transition>,
    /// ショートカットキー設定。
    pub shortcuts: Shortcuts,
}

impl App {
    /// 設定の初期アイテムでストアを作り、Homeから始める。
    pub fn new(cfg_path: PathBuf, cfg: Config, shortcuts: Shortcuts) -> Self {
        let store = ItemStore::with_defaults(&cfg.store.default_items);
        Self {
            cfg_path,
            cfg,
            ui: UiState::new(),
            store,
            nav: Navigator::new(),
            drawer: DrawerState::default(),
            home: HomeState::new(),
            settings: SettingsForm::default(),
            transition: None,
            shortcuts,
        }
    }

    /// 遷移結果をアニメーションとログへ反映する。
    pub fn apply_route_change(&mut self, change: Option<RouteChange>, now: Instant) {
        let Some(change) = change else {
            return;
        };
        self.transition = Some(Transition::start(change, now));
        // Homeへ戻ったときは一覧にフォーカスを戻す。
        if change.to == Route::Home {
            self.home.focus = HomeFocus::List;
        }
        self.ui
            .push_log(format!("{} -> {}", change.from.title(), change.to.title()));
    }

    /// ティック毎の時間経過処理。
    pub fn on_tick(&mut self, now: Instant) {
        self.ui.expire_toast(now);
        if let Some(t) = self.transition
            && t.is_finished(now)
        {
            tracing::debug!("transition {:?} finished", t.slide);
            self.transition = None;
        }
    }

    /// イベントを1件処理し、終了すべきならtrueを返す。入力エラーはそのまま返す。
    pub fn handle_event(&mut self, ev: AppEvent) -> Result<bool> {
        match ev {
            AppEvent::Input(Event::Key(k)) => {
                // 押下以外（リピート解除など）は無視する。
                if k.kind != KeyEventKind::Press {
                    return Ok(false);
                }
                // どの画面でもCtrl+Cで終了できるようにする。
                Ok(is_ctrl_c(&k) || handle_key(self, k)?)
            }
            AppEvent::Input(_) => Ok(false),
            AppEvent::InputError(e) => Err(e),
            AppEvent::Tick => {
                self.on_tick(Instant::now());
                Ok(false)
            }
        }
    }
}

/// ユーザーが終了するまでメインTUIループを回す。
pub async fn run_app(terminal: &mut Tui) -> Result<()> {
    // 設定ファイルを読み込む（初回はデフォルトを生成）。
    let cfg_path = PathBuf::from("config.toml");
    let cfg = Config::load_or_default(&cfg_path)?;

    // ショートカット設定を読み込む（無ければデフォルト）。
    let shortcuts = Shortcuts::load_or_default("shortcut.toml")?;

    let tick_rate = Duration::from_millis(cfg.ui.tick_rate_ms.max(10));
    let mut app = App::new(cfg_path, cfg, shortcuts);
    tracing::info!("store seeded with {} items", app.store.len());

    // 入力とティックを1本のチャネルへ集める。
    let (tx, mut rx) = mpsc::channel::<AppEvent>(256);
    spawn_input_reader(tx.clone());
    spawn_ticker(tx, tick_rate);

    terminal.draw(|f| draw(f, &app))?;
    while let Some(ev) = rx.recv().await {
        if app.handle_event(ev)? {
            break;
        }
        terminal.draw(|f| draw(f, &app))?;
    }
    Ok(())
}

/// 端末入力をブロッキングで読み、チャネルへ流す。受信側が閉じたら終わる。
fn spawn_input_reader(tx: mpsc::Sender<AppEvent>) {
    tokio::task::spawn_blocking(move || {
        while !tx.is_closed() {
            let ev = match event::poll(Duration::from_millis(50)) {
                Ok(true) => event::read().context("failed to read terminal input"),
                Ok(false) => continue,
                Err(e) => Err(anyhow::Error::new(e).context("failed to poll terminal input")),
            };
            match ev {
                Ok(ev) => {
                    if tx.blocking_send(AppEvent::Input(ev)).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    // メインループへ知らせて終了させる。
                    tracing::error!("{e:#}");
                    let _ = tx.blocking_send(AppEvent::InputError(e));
                    break;
                }
            }
        }
        tracing::debug!("input reader stopped");
    });
}

/// 一定間隔でティックを送る。
fn spawn_ticker(tx: mpsc::Sender<AppEvent>, period: Duration) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            if tx.send(AppEvent::Tick).await.is_err() {
                break;
            }
        }
    });
}
