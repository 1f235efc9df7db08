// 年齢範囲ポリシー
//
// 保存対象とする年齢の閉区間を保持し、
// 環境変数からの読み込みとデフォルト値を提供するドメイン層コンポーネント。

use serde_json::Number;
use thiserror::Error;
use tracing::{info, warn};

// ===========================================
// デフォルト値定義
// ===========================================

/// 保存対象とする年齢の下限（この値を含む）
pub const DEFAULT_AGE_MIN: f64 = 50.0;

/// 保存対象とする年齢の上限（この値を含む）
pub const DEFAULT_AGE_MAX: f64 = 100.0;

// ===========================================
// 環境変数名定義
// ===========================================

/// 環境変数名: 年齢の下限
pub const ENV_AGE_MIN: &str = "INGEST_AGE_MIN";

/// 環境変数名: 年齢の上限
pub const ENV_AGE_MAX: &str = "INGEST_AGE_MAX";

/// 年齢範囲の設定エラー
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AgePolicyError {
    /// 下限が上限を超えている、または有限値でない
    #[error("invalid age range: [{min}, {max}]")]
    InvalidRange { min: f64, max: f64 },
}

/// 年齢判定の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeDecision {
    /// 範囲内（保存する）
    Accepted,
    /// 範囲外（保存しない）
    Rejected,
}

/// 年齢範囲ポリシー（閉区間 [min, max]）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgePolicy {
    min: f64,
    max: f64,
}

impl Default for AgePolicy {
    fn default() -> Self {
        Self {
            min: DEFAULT_AGE_MIN,
            max: DEFAULT_AGE_MAX,
        }
    }
}

impl AgePolicy {
    /// 明示的な範囲でポリシーを作成
    pub fn new(min: f64, max: f64) -> Result<Self, AgePolicyError> {
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(AgePolicyError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// 環境変数から範囲を読み込み
    ///
    /// 未設定・パースエラーの場合はデフォルト値を使用する。
    /// 下限が上限を超える場合はデフォルトの範囲に戻す。
    ///
    /// # 環境変数
    /// - INGEST_AGE_MIN: 年齢の下限（デフォルト 50）
    /// - INGEST_AGE_MAX: 年齢の上限（デフォルト 100）
    pub fn from_env() -> Self {
        let min = parse_env_f64(ENV_AGE_MIN, DEFAULT_AGE_MIN);
        let max = parse_env_f64(ENV_AGE_MAX, DEFAULT_AGE_MAX);

        match Self::new(min, max) {
            Ok(policy) => {
                info!(min, max, "AgePolicy loaded");
                policy
            }
            Err(err) => {
                warn!(
                    error = %err,
                    default_min = DEFAULT_AGE_MIN,
                    default_max = DEFAULT_AGE_MAX,
                    "Invalid age range, using default"
                );
                Self::default()
            }
        }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// 年齢が範囲内かどうかを判定（両端を含む）
    pub fn evaluate(&self, age: &Number) -> AgeDecision {
        match age.as_f64() {
            Some(value) if value >= self.min && value <= self.max => AgeDecision::Accepted,
            _ => AgeDecision::Rejected,
        }
    }
}

/// 環境変数からf64値を読み込む
///
/// 未設定またはパースエラーの場合はデフォルト値を返す。
fn parse_env_f64(key: &str, default: f64) -> f64 {
    match std::env::var(key) {
        Ok(value) => match value.trim().parse::<f64>() {
            Ok(parsed) if parsed.is_finite() => {
                info!(key, value = parsed, "Environment variable loaded");
                parsed
            }
            _ => {
                info!(
                    key,
                    value = %value,
                    default,
                    "Environment variable parse error, using default"
                );
                default
            }
        },
        Err(_) => default,
    }
}
