/// ログ基盤モジュール
///
/// Lambda環境向けのJSON構造化ログを設定する。
/// 呼び出しごとのspan（request_id）をログに含める。
use std::sync::Once;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// 環境変数`RUST_LOG`が未設定の場合のフィルター
const DEFAULT_LOG_FILTER: &str = "info";

static INIT: Once = Once::new();

/// Lambda環境向けのログサブスクライバーを初期化する
///
/// JSON形式で出力し、`RUST_LOG`または`info`でフィルタリングする。
/// 複数回呼び出しても最初の呼び出しのみ初期化を実行する。
pub fn init_logging() {
    INIT.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

        // CloudWatch向け。invocation spanのrequest_idを各行に出力する
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(false)
            .with_file(true)
            .with_line_number(true)
            .flatten_event(true)
            .with_current_span(true)
            .with_span_list(false);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(json_layer)
            .init();
    });
}

/// テスト用のログサブスクライバーを初期化する（人間が読みやすい形式）
#[cfg(test)]
pub fn init_test_logging() {
    static TEST_INIT: Once = Once::new();

    TEST_INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_test_writer()
            .with_target(true)
            .compact();

        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_test_logging_idempotent() {
        init_test_logging();
        init_test_logging();
    }

    #[test]
    fn test_invocation_span_fields() {
        init_test_logging();

        let span = tracing::info_span!("invocation", request_id = "req-123");
        let _guard = span.enter();

        tracing::info!(object_key = "123456.json", bucket = "test-bucket", "オブジェクト保存完了");
        tracing::info!(age = 30, "年齢が範囲外のため保存をスキップ");
    }

    #[test]
    fn test_json_layer_configuration() {
        let env_filter = EnvFilter::new(DEFAULT_LOG_FILTER);
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true);

        let _subscriber = tracing_subscriber::registry()
            .with(env_filter)
            .with(json_layer);
    }
}
