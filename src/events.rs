//! イベントループに流れるイベントと、描画側と共有するUI状態。

use std::time::{Duration, Instant};

use crossterm::event::Event;

/// セッションログに保持する最大行数。
pub const LOG_CAPACITY: usize = 200;

/// メインタスクへ送られるイベント。
#[derive(Debug)]
pub enum AppEvent {
    /// 端末からの入力。
    Input(Event),
    /// 入力の読み取りに失敗した。受け取ったらループを終える。
    InputError(anyhow::Error),
    /// アニメーション用の定期ティック。
    Tick,
}

/// 一定時間だけ表示する通知。
#[derive(Clone, Debug)]
pub struct Toast {
    pub message: String,
    pub expires_at: Instant,
}

/// 描画側と共有するUI状態。
#[derive(Clone, Debug)]
pub struct UiState {
    /// 画面下部のステータス文言。
    pub status: String,
    /// 時刻付きのセッションログ。
    pub log: Vec<String>,
    /// 表示中のトースト。
    pub toast: Option<Toast>,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            status: "Ready".into(),
            log: vec![],
            toast: None,
        }
    }

    /// ログへ時刻付きで追記し、ステータスにも反映する。
    pub fn push_log(&mut self, line: impl Into<String>) {
        let line = line.into();
        let stamp = chrono::Local::now().format("%H:%M:%S");
        self.log.push(format!("{stamp} {line}"));
        if self.log.len() > LOG_CAPACITY {
            let excess = self.log.len() - LOG_CAPACITY;
            self.log.drain(..excess);
        }
        self.status = line;
    }

    /// 直近n行のログ（古い順）。
    pub fn recent_log(&self, n: usize) -> &[String] {
        &self.log[self.log.len().saturating_sub(n)..]
    }

    /// トーストを表示する。
    pub fn show_toast(&mut self, message: String, ttl: Duration, now: Instant) {
        self.toast = Some(Toast {
            message,
            expires_at: now + ttl,
        });
    }

    /// 期限切れのトーストを消す。
    pub fn expire_toast(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|t| now >= t.expires_at) {
            self.toast = None;
        }
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_expires() {
        // 期限を過ぎたトーストだけが消える。
        let mut ui = UiState::new();
        let now = Instant::now();
        ui.show_toast("Adding: Item 6".into(), Duration::from_millis(100), now);
        ui.expire_toast(now + Duration::from_millis(50));
        assert!(ui.toast.is_some());
        ui.expire_toast(now + Duration::from_millis(100));
        assert!(ui.toast.is_none());
    }

    #[test]
    fn test_push_log_updates_status() {
        // ログ追記でステータスも最新になる。
        let mut ui = UiState::new();
        ui.push_log("Added Roti Tawar");
        assert_eq!(ui.status, "Added Roti Tawar");
        assert!(ui.log[0].ends_with("Added Roti Tawar"));
    }

    #[test]
    fn test_log_is_capped() {
        // 上限を超えた古い行から捨てる。
        let mut ui = UiState::new();
        for i in 0..LOG_CAPACITY * 3 {
            ui.push_log(format!("entry {i}"));
        }
        assert_eq!(ui.log.len(), LOG_CAPACITY);
        let last = format!("entry {}", LOG_CAPACITY * 3 - 1);
        assert!(ui.log[LOG_CAPACITY - 1].ends_with(&last));
        let first = format!("entry {}", LOG_CAPACITY * 2);
        assert!(ui.log[0].ends_with(&first));
    }

    #[test]
    fn test_recent_log_tail() {
        // 直近n行を古い順で返し、行数が足りなければ全件。
        let mut ui = UiState::new();
        ui.push_log("Home -> Profile");
        ui.push_log("Profile -> Home");
        ui.push_log("Added Keju");
        let tail = ui.recent_log(2);
        assert_eq!(tail.len(), 2);
        assert!(tail[0].ends_with("Profile -> Home"));
        assert!(tail[1].ends_with("Added Keju"));
        assert_eq!(ui.recent_log(10).len(), 3);
        assert!(UiState::new().recent_log(5).is_empty());
    }
}
