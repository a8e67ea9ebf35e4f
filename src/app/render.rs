//! TUI描画関連の関数。

use std::time::Instant;

use ratatui::{
    Frame,
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::{
    input,
    layout,
    menu::{BOTTOM_DESTINATIONS, DRAWER_DESTINATIONS},
    navigation::{Route, View},
    screens::{HomeFocus, SETTING_TOGGLES},
    shortcuts::{Shortcuts, format_keys},
};

use super::{App, handlers::on_off};

/// ドロワーに出すログの行数。
const DRAWER_LOG_LINES: usize = 8;

/// ライト/ダークで切り替える配色。
struct Palette {
    bg: Color,
    fg: Color,
    accent: Color,
    muted: Color,
    highlight_bg: Color,
    highlight_fg: Color,
}

impl Palette {
    fn new(dark: bool) -> Self {
        if dark {
            Self {
                bg: Color::Rgb(24, 24, 28),
                fg: Color::Rgb(230, 230, 230),
                accent: Color::Rgb(130, 180, 255),
                muted: Color::Gray,
                highlight_bg: Color::Rgb(60, 90, 160),
                highlight_fg: Color::White,
            }
        } else {
            Self {
                bg: Color::Reset,
                fg: Color::Reset,
                accent: Color::Blue,
                muted: Color::DarkGray,
                highlight_bg: Color::Rgb(200, 220, 255),
                highlight_fg: Color::Black,
            }
        }
    }
}

/// 画面全体のレイアウトを描画する。
pub fn draw(f: &mut Frame, app: &App) {
    let now = Instant::now();
    let palette = Palette::new(app.cfg.preferences.dark_mode);

    // 背景色を塗ってから各領域を描く。
    f.render_widget(
        Block::default().style(Style::default().bg(palette.bg).fg(palette.fg)),
        f.area(),
    );
    let main_layout = layout::create_main_layout(f.area());

    draw_top_bar(f, app, main_layout.top_bar, &palette);

    // スライド中は本体をずらし、前半は薄く表示する。
    let body = match app.transition {
        Some(t) => layout::shifted(main_layout.body, t.offset(main_layout.body.width, now)),
        None => main_layout.body,
    };
    match app.nav.view() {
        View::Home => draw_home(f, app, body, &palette),
        View::Profile => draw_profile(f, app, body, &palette),
        View::Setting => draw_setting(f, app, body, &palette),
        View::Detail { item } => draw_detail(f, app, item, body, &palette),
    }
    if app.transition.is_some_and(|t| t.is_fading(now)) {
        f.buffer_mut()
            .set_style(body, Style::default().add_modifier(Modifier::DIM));
    }

    draw_bottom_bar(f, app, main_layout.bottom_bar, &palette);
    f.render_widget(build_status_bar(app), main_layout.status_bar);

    // トーストは本体の下端に重ねる。
    if let Some(toast) = &app.ui.toast {
        let area = layout::toast_area(main_layout.body);
        f.render_widget(Clear, area);
        let widget = Paragraph::new(toast.message.clone())
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(palette.highlight_fg).bg(palette.highlight_bg));
        f.render_widget(widget, area);
    }

    // ドロワーは最前面に重ねる。
    if app.drawer.open {
        draw_drawer(f, app, &palette);
    }
}

/// 上部バー（メニューアイコンと画面タイトル）。
fn draw_top_bar(f: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let icon = if app.drawer.open { "⚙" } else { "≡" };
    let line = Line::from(vec![
        Span::styled(format!(" {icon} "), Style::default().fg(palette.accent)),
        Span::styled(
            app.nav.route().title(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]);
    let bar = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    f.render_widget(bar, area);
}

/// ホーム画面（入力欄2つとアイテム一覧）。
fn draw_home(f: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let home_layout = layout::create_home_layout(area);
    let focus = app.home.focus;

    input::render_text_input(
        f,
        home_layout.new_item,
        &app.home.new_item,
        "Tambah item",
        focus == HomeFocus::NewItem,
        palette.accent,
    );
    input::render_text_input(
        f,
        home_layout.search,
        &app.home.search,
        "Cari",
        focus == HomeFocus::Search,
        palette.accent,
    );

    let visible = app.home.visible(&app.store);
    let title = format!("Daftar Belanja ({}/{})", visible.len(), app.store.len());
    let block = Block::default().borders(Borders::ALL).title(title);

    if visible.is_empty() {
        let text = if app.store.is_empty() {
            "Belum ada item"
        } else {
            "Tidak ada item yang cocok"
        };
        let empty = Paragraph::new(text)
            .style(Style::default().fg(palette.muted))
            .block(block);
        f.render_widget(empty, home_layout.list);
        return;
    }

    // 各行はチェック欄・頭文字・ラベル。
    let rows: Vec<ListItem> = visible
        .iter()
        .map(|item| {
            let checked = app.home.is_checked(item.id);
            let mark = if checked { "[x]" } else { "[ ]" };
            let label_style = if checked {
                Style::default().fg(palette.accent)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::raw(format!("{mark} ")),
                Span::styled(
                    format!("({}) ", item.initial()),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(item.label.clone(), label_style),
            ]))
        })
        .collect();

    let list = List::new(rows).block(block).highlight_style(
        Style::default()
            .bg(palette.highlight_bg)
            .fg(palette.highlight_fg)
            .add_modifier(Modifier::BOLD),
    );
    let mut state = ListState::default();
    if focus == HomeFocus::List {
        state.select(Some(app.home.selected));
    }
    f.render_stateful_widget(list, home_layout.list, &mut state);
}

/// プロフィール画面。
fn draw_profile(f: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let profile = &app.cfg.profile;
    let mut lines = vec![
        Line::styled(
            profile.greeting.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::raw(profile.bio.clone()),
        Line::raw(""),
    ];
    for entry in &profile.entries {
        lines.push(Line::styled(
            entry.label.clone(),
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        ));
        lines.push(Line::raw(format!("  {}", entry.value)));
    }
    lines.push(Line::raw(""));
    lines.push(Line::styled(
        profile.farewell.clone(),
        Style::default().fg(palette.muted),
    ));

    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Profil"))
        .wrap(Wrap { trim: true });
    f.render_widget(widget, area);
}

/// 設定画面（トグル2つと保存）。
fn draw_setting(f: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let mut lines = vec![
        Line::styled(
            "Ini halaman Pengaturan",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
    ];
    for (i, toggle) in SETTING_TOGGLES.iter().enumerate() {
        let marker = if i == app.settings.cursor { "→" } else { " " };
        let value = toggle.value(&app.cfg.preferences);
        let value_style = if value {
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.muted)
        };
        lines.push(Line::from(vec![
            Span::raw(format!("{marker} ")),
            Span::styled(format!("[{}] ", on_off(value)), value_style),
            Span::styled(toggle.title(), Style::default().add_modifier(Modifier::BOLD)),
        ]));
        lines.push(Line::styled(
            format!("      {}", toggle.description()),
            Style::default().fg(palette.muted),
        ));
    }
    lines.push(Line::raw(""));
    let save_hint = format!(
        "{}: Simpan Pengaturan{}",
        format_keys(&app.shortcuts.setting.save),
        if app.settings.dirty {
            " (belum disimpan)"
        } else {
            ""
        }
    );
    lines.push(Line::raw(save_hint));

    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Pengaturan"))
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

/// 詳細画面。
fn draw_detail(f: &mut Frame, app: &App, item: &str, area: Rect, palette: &Palette) {
    let lines = vec![
        Line::styled("Detail Item", Style::default().fg(palette.muted)),
        Line::raw(""),
        Line::styled(
            item.to_string(),
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::raw(format!(
            "{}: Kembali",
            format_keys(&app.shortcuts.detail.back)
        )),
    ];
    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Detail"))
        .wrap(Wrap { trim: true });
    f.render_widget(widget, area);
}

/// ボトムバー（行き先とキー）。
fn draw_bottom_bar(f: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let current = app.nav.route();
    let mut spans = vec![];
    for (i, dest) in BOTTOM_DESTINATIONS.iter().enumerate() {
        let key = app
            .shortcuts
            .bottom_bar
            .get(i)
            .map(String::as_str)
            .unwrap_or("-");
        let style = if dest.route == current {
            Style::default()
                .bg(palette.highlight_bg)
                .fg(palette.highlight_fg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        spans.push(Span::styled(
            format!(" [{key}] {} {} ", dest.icon, dest.label),
            style,
        ));
        spans.push(Span::raw("  "));
    }
    let bar = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(bar, area);
}

/// ドロワー（画面左側に重ねるメニュー）。
fn draw_drawer(f: &mut Frame, app: &App, palette: &Palette) {
    let area = layout::drawer_area(f.area());
    f.render_widget(Clear, area);

    let current = app.nav.route();
    let mut lines = vec![Line::raw("")];
    for (i, dest) in DRAWER_DESTINATIONS.iter().enumerate() {
        let mut style = Style::default();
        if dest.route == current {
            style = style.fg(palette.accent).add_modifier(Modifier::BOLD);
        }
        if i == app.drawer.cursor {
            style = style.bg(palette.highlight_bg).fg(palette.highlight_fg);
        }
        lines.push(Line::styled(format!(" {} {} ", dest.icon, dest.label), style));
    }
    lines.push(Line::raw(""));
    lines.push(Line::styled(
        "─".repeat(area.width.saturating_sub(2) as usize),
        Style::default().fg(palette.muted),
    ));
    lines.push(Line::styled(
        format!("{}: tutup menu", format_keys(&app.shortcuts.drawer.close)),
        Style::default().fg(palette.muted),
    ));

    // 直近の操作履歴。
    lines.push(Line::raw(""));
    lines.push(Line::styled(
        "Riwayat",
        Style::default().add_modifier(Modifier::BOLD),
    ));
    for entry in app.ui.recent_log(DRAWER_LOG_LINES) {
        lines.push(Line::styled(
            format!(" {entry}"),
            Style::default().fg(palette.muted),
        ));
    }

    let drawer = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Menu")
            .style(Style::default().bg(palette.bg).fg(palette.fg)),
    );
    f.render_widget(drawer, area);
}

/// ステータスバー（画面名・件数・最新ステータス、下枠にヘルプ）。
fn build_status_bar(app: &App) -> Paragraph<'static> {
    let route = app.nav.route();
    let checked = app
        .store
        .items()
        .iter()
        .filter(|i| app.home.is_checked(i.id))
        .count();
    let screen = match app.nav.selected_item() {
        Some(item) => format!("{}: {item}", route.title()),
        None => route.title().to_string(),
    };
    let text = format!(
        "[{}] Items: {} total, {} checked | {}",
        screen,
        app.store.len(),
        checked,
        app.ui.status
    );
    Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .title("STATUS")
            .title_bottom(get_help_text(app, &app.shortcuts)),
    )
}

/// 現在の操作対象に応じたヘルプ文字列を返す。
fn get_help_text(app: &App, shortcuts: &Shortcuts) -> String {
    if app.drawer.open {
        let sc = &shortcuts.drawer;
        return format!(
            " {}/{}: move | {}: open | {}: close ",
            format_keys(&sc.up),
            format_keys(&sc.down),
            format_keys(&sc.select),
            format_keys(&sc.close)
        );
    }
    let global = format!(
        "{}: quit | {}: menu | {}: quick add | {}: tabs",
        format_keys(&shortcuts.global.quit),
        format_keys(&shortcuts.global.drawer),
        format_keys(&shortcuts.global.quick_add),
        format_keys(&shortcuts.bottom_bar)
    );
    match app.nav.route() {
        Route::Home if app.home.focus != HomeFocus::List => {
            let sc = &shortcuts.text_input;
            format!(
                " {}: confirm | {}: back to list | {}: next field | {}: clear ",
                format_keys(&sc.confirm),
                format_keys(&sc.cancel),
                format_keys(&sc.next_focus),
                format_keys(&sc.clear_line)
            )
        }
        Route::Home => {
            let sc = &shortcuts.home;
            format!(
                " {}: open | {}: check | {}: new | {}: search | {} ",
                format_keys(&sc.open),
                format_keys(&sc.toggle),
                format_keys(&sc.new_item),
                format_keys(&sc.search),
                global
            )
        }
        Route::Profile => format!(" {global} "),
        Route::Setting => {
            let sc = &shortcuts.setting;
            format!(
                " {}: toggle | {}: save | {} ",
                format_keys(&sc.toggle),
                format_keys(&sc.save),
                global
            )
        }
        Route::Detail => format!(
            " {}: back | {} ",
            format_keys(&shortcuts.detail.back),
            global
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::test_app;
    use ratatui::{Terminal, backend::TestBackend};

    fn rendered(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_drawer_shows_recent_log() {
        // ドロワーに直近のログが時刻付きで出る。
        let mut app = test_app();
        app.ui.push_log("Added Keju");
        app.drawer.open = true;
        let screen = rendered(&app);
        assert!(screen.contains("Riwayat"));
        assert!(screen.contains(app.ui.log[0].as_str()));
    }

    #[test]
    fn test_closed_drawer_hides_log() {
        // ドロワーを閉じていれば履歴見出しは出ない。
        let mut app = test_app();
        app.ui.push_log("Added Keju");
        assert!(!rendered(&app).contains("Riwayat"));
    }
}
