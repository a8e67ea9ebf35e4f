//! キー入力ハンドラー関数。

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::{Duration, Instant};

use crate::{
    menu,
    navigation::Route,
    screens::HomeFocus,
    shortcuts::matches_shortcut,
};

use super::App;

/// キー入力を1件処理し、終了すべきならtrueを返す。
pub fn handle_key(app: &mut App, k: KeyEvent) -> Result<bool> {
    let now = Instant::now();

    // ドロワーが開いていれば最優先で処理する。
    if app.drawer.open {
        handle_drawer_key(app, k, now);
        return Ok(false);
    }

    // 入力欄にフォーカスがあれば文字入力として扱う。
    if app.nav.route() == Route::Home && app.home.focus != HomeFocus::List {
        handle_text_input_key(app, k);
        return Ok(false);
    }

    // どの画面でも効くショートカット。
    let sc = &app.shortcuts.global;
    if matches_shortcut(&k, &sc.quit) {
        return Ok(true);
    } else if matches_shortcut(&k, &sc.drawer) {
        app.drawer.toggle(app.nav.route());
        return Ok(false);
    } else if matches_shortcut(&k, &sc.quick_add) {
        quick_add(app, now);
        return Ok(false);
    } else if let Some(index) = app.shortcuts.bottom_bar_index(&k) {
        let change = menu::select_bottom(&mut app.nav, index);
        app.apply_route_change(change, now);
        return Ok(false);
    }

    // 画面ごとのハンドラへ委譲する。
    match app.nav.route() {
        Route::Home => handle_home_key(app, k, now),
        Route::Profile => {}
        Route::Setting => handle_setting_key(app, k)?,
        Route::Detail => handle_detail_key(app, k, now),
    }
    Ok(false)
}

/// Ctrl+Cかどうかを判定する。
pub fn is_ctrl_c(k: &KeyEvent) -> bool {
    k.modifiers.contains(KeyModifiers::CONTROL) && k.code == KeyCode::Char('c')
}

/// 連番アイテムを追加し、通知が有効ならトーストを出す。
fn quick_add(app: &mut App, now: Instant) {
    let label = app.store.append_numbered();
    let message = format!("Adding: {label}");
    if app.cfg.preferences.notifications {
        let ttl = Duration::from_millis(app.cfg.ui.toast_ms);
        app.ui.show_toast(message.clone(), ttl, now);
    }
    app.ui.push_log(message);
}

/// ドロワー表示中のキー処理。
fn handle_drawer_key(app: &mut App, k: KeyEvent, now: Instant) {
    let sc = &app.shortcuts.drawer;

    if matches_shortcut(&k, &sc.close) {
        app.drawer.close();
    } else if matches_shortcut(&k, &sc.down) {
        app.drawer.move_down();
    } else if matches_shortcut(&k, &sc.up) {
        app.drawer.move_up();
    } else if matches_shortcut(&k, &sc.select) {
        // 選んだ行き先へ遷移し、ドロワーを閉じる。
        let change = app.drawer.activate(&mut app.nav);
        app.apply_route_change(change, now);
    }
}

/// ホーム画面（一覧フォーカス）のキー処理。
fn handle_home_key(app: &mut App, k: KeyEvent, now: Instant) {
    let sc = &app.shortcuts.home;
    let visible_len = app.home.visible(&app.store).len();

    if matches_shortcut(&k, &sc.down) {
        app.home.move_down(visible_len);
    } else if matches_shortcut(&k, &sc.up) {
        app.home.move_up();
    } else if matches_shortcut(&k, &sc.open) {
        // 選択中のアイテムを詳細画面で開く。
        let Some(label) = app
            .home
            .selected_item(&app.store)
            .map(|item| item.label.clone())
        else {
            return;
        };
        let change = app.nav.open_detail(label);
        app.apply_route_change(change, now);
    } else if matches_shortcut(&k, &sc.toggle) {
        // 選択中のアイテムのチェックを反転する。
        let Some(item) = app.home.selected_item(&app.store) else {
            return;
        };
        let (id, label) = (item.id, item.label.clone());
        let checked = app.home.toggle_checked(id);
        tracing::info!("item {label} checked={checked}");
        app.ui.status = if checked {
            format!("Checked {label}")
        } else {
            format!("Unchecked {label}")
        };
    } else if matches_shortcut(&k, &sc.new_item) {
        app.home.focus = HomeFocus::NewItem;
    } else if matches_shortcut(&k, &sc.search) {
        app.home.focus = HomeFocus::Search;
    } else if matches_shortcut(&k, &sc.next_focus) {
        app.home.focus = app.home.focus.next();
    } else if matches_shortcut(&k, &sc.clear_search) && !app.home.search.value.is_empty() {
        // 検索語を消して全件表示に戻す。
        app.home.search.clear();
        app.home.selected = 0;
        app.ui.status = "Search cleared".into();
    }
}

/// ホーム画面の入力欄（新規アイテム・検索）のキー処理。
fn handle_text_input_key(app: &mut App, k: KeyEvent) {
    let sc = &app.shortcuts.text_input;
    let focus = app.home.focus;

    if matches_shortcut(&k, &sc.confirm) {
        match focus {
            HomeFocus::NewItem => submit_new_item(app),
            // 検索は入力のたびに反映済みなので一覧へ戻るだけ。
            _ => app.home.focus = HomeFocus::List,
        }
        return;
    } else if matches_shortcut(&k, &sc.cancel) {
        app.home.focus = HomeFocus::List;
        return;
    } else if matches_shortcut(&k, &sc.next_focus) {
        app.home.focus = focus.next();
        return;
    }

    let Some(field) = (match focus {
        HomeFocus::NewItem => Some(&mut app.home.new_item),
        HomeFocus::Search => Some(&mut app.home.search),
        HomeFocus::List => None,
    }) else {
        return;
    };

    if matches_shortcut(&k, &sc.backspace) {
        field.backspace();
    } else if matches_shortcut(&k, &sc.delete) {
        field.delete();
    } else if matches_shortcut(&k, &sc.left) {
        field.move_left();
    } else if matches_shortcut(&k, &sc.right) {
        field.move_right();
    } else if matches_shortcut(&k, &sc.home) {
        field.move_home();
    } else if matches_shortcut(&k, &sc.end) {
        field.move_end();
    } else if matches_shortcut(&k, &sc.clear_line) {
        field.clear();
    } else if let KeyCode::Char(c) = k.code
        && !k
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        // 修飾キーなしの文字だけを挿入する。
        field.insert_char(c);
    }

    // 検索語が変わったら選択行を収め直す。
    if focus == HomeFocus::Search {
        let len = app.home.visible(&app.store).len();
        app.home.clamp(len);
    }
}

/// 新規アイテムを確定する。空白のみなら入力欄をそのまま残す。
fn submit_new_item(app: &mut App) {
    let Some(label) = app
        .store
        .append(&app.home.new_item.value)
        .map(|item| item.label.clone())
    else {
        return;
    };
    app.home.new_item.clear();
    app.ui.push_log(format!("Added {label}"));
}

/// 設定画面のキー処理。
fn handle_setting_key(app: &mut App, k: KeyEvent) -> Result<()> {
    let sc = &app.shortcuts.setting;

    if matches_shortcut(&k, &sc.down) {
        app.settings.move_down();
    } else if matches_shortcut(&k, &sc.up) {
        app.settings.move_up();
    } else if matches_shortcut(&k, &sc.toggle) {
        // 設定値はすぐ反映し、保存は別操作にする。
        let toggle = app.settings.current();
        let value = toggle.toggle(&mut app.cfg.preferences);
        app.settings.dirty = true;
        tracing::info!("{} set to {value}", toggle.title());
        app.ui.status = format!("{}: {}", toggle.title(), on_off(value));
    } else if matches_shortcut(&k, &sc.save) {
        // 設定ファイルを保存する。失敗してもアプリは続行する。
        match app.cfg.save(&app.cfg_path) {
            Ok(()) => {
                app.settings.dirty = false;
                tracing::info!("settings saved to {}", app.cfg_path.display());
                app.ui.push_log("Saved settings");
            }
            Err(e) => {
                tracing::error!("settings save failed: {e}");
                app.ui.push_log(format!("Save failed: {e}"));
            }
        }
    }
    Ok(())
}

/// 詳細画面のキー処理。
fn handle_detail_key(app: &mut App, k: KeyEvent, now: Instant) {
    if matches_shortcut(&k, &app.shortcuts.detail.back) {
        let change = app.nav.back();
        app.apply_route_change(change, now);
    }
}

/// トグル値の表示用文字列。
pub fn on_off(value: bool) -> &'static str {
    if value { "ON" } else { "OFF" }
}
