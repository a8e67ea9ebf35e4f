//! 画面切り替えアニメーションの進行計算。

use std::time::{Duration, Instant};

use crate::navigation::{RouteChange, Slide};

/// スライドの所要時間。
pub const SLIDE_DURATION: Duration = Duration::from_millis(300);

/// 進行中の画面切り替え。入ってくる側の画面だけを動かす。
#[derive(Clone, Copy, Debug)]
pub struct Transition {
    pub slide: Slide,
    started: Instant,
    duration: Duration,
}

impl Transition {
    pub fn start(change: RouteChange, now: Instant) -> Self {
        Self {
            slide: change.slide,
            started: now,
            duration: SLIDE_DURATION,
        }
    }

    /// 0.0〜1.0の進行度。
    pub fn progress(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }

    /// 前半はフェードイン中として扱う。
    pub fn is_fading(&self, now: Instant) -> bool {
        self.progress(now) < 0.5
    }

    /// 入ってくる画面の水平方向のずれ（列数）。正は後端（右）側から。
    pub fn offset(&self, width: u16, now: Instant) -> i32 {
        let width = i32::from(width);
        // 通常の前後移動は幅の1/4、Detailの出入りは全幅を動く。
        let (distance, sign) = match self.slide {
            Slide::Forward => (width / 4, 1),
            Slide::Backward => (width / 4, -1),
            Slide::IntoDetail => (width, 1),
            Slide::OutOfDetail => (width, -1),
        };
        let remaining = 1.0 - self.progress(now);
        sign * (distance as f32 * remaining).round() as i32
    }
}
