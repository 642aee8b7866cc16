//! # Clock（時刻プロバイダ）
//!
//! Todo の作成・更新時刻とトークンの発行時刻は、すべてこのトレイト経由で取得する。
//! テストでは [`FixedClock`] を注入して時刻を固定する。
//!
//! [`SystemClock`] はマイクロ秒に切り捨てた時刻を返す。PostgreSQL の
//! `TIMESTAMPTZ` と同じ精度なので、保存前に返した値と読み出した値が一致する。

use chrono::{DateTime, SubsecRound, Utc};

/// `TIMESTAMPTZ` の小数秒の桁数
const STORE_SUBSEC_DIGITS: u16 = 6;

/// 現在時刻を提供するトレイト
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// システム時刻をマイクロ秒精度で返す実装
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now().trunc_subsecs(STORE_SUBSEC_DIGITS)
    }
}

/// 固定時刻を返すテスト用実装
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    /// UNIX 秒から固定時刻を作る
    ///
    /// 範囲外の値は UNIX エポックに丸める。
    pub fn at_timestamp(secs: i64) -> Self {
        Self::new(DateTime::from_timestamp(secs, 0).unwrap_or_default())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}
